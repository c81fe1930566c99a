use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} must be at least {min} bytes long")]
    WeakSecret { var: &'static str, min: usize },

    #[error("{var} has an invalid value: {value:?}")]
    Invalid { var: &'static str, value: String },
}
