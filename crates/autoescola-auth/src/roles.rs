//! Role universes.
//!
//! Administrative actors ([`AdminRole`]) and application actors ([`AppRole`])
//! are disjoint types. Both spell their administrator variant `ADMIN`, but
//! nothing converts one into the other.

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

/// Behaviour shared by every role universe.
pub trait Role:
    Copy
    + Eq
    + Hash
    + fmt::Debug
    + fmt::Display
    + FromStr<Err = UnknownRole>
    + Serialize
    + DeserializeOwned
    + Send
    + Sync
    + 'static
{
    /// Wire and storage spelling (`ADMIN`, `OPERATOR`, ...).
    fn as_str(&self) -> &'static str;

    fn all() -> &'static [Self];
}

/// Roles of admin panel actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdminRole {
    Admin,
    Operator,
}

/// Roles of backend API actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppRole {
    Admin,
    Instructor,
    Student,
}

impl Role for AdminRole {
    fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "ADMIN",
            AdminRole::Operator => "OPERATOR",
        }
    }

    fn all() -> &'static [Self] {
        &[AdminRole::Admin, AdminRole::Operator]
    }
}

impl Role for AppRole {
    fn as_str(&self) -> &'static str {
        match self {
            AppRole::Admin => "ADMIN",
            AppRole::Instructor => "INSTRUCTOR",
            AppRole::Student => "STUDENT",
        }
    }

    fn all() -> &'static [Self] {
        &[AppRole::Admin, AppRole::Instructor, AppRole::Student]
    }
}

impl FromStr for AdminRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl FromStr for AppRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AppRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_admin_roles() {
        assert_eq!("ADMIN".parse::<AdminRole>(), Ok(AdminRole::Admin));
        assert_eq!("operator".parse::<AdminRole>(), Ok(AdminRole::Operator));
        assert!("STUDENT".parse::<AdminRole>().is_err());
    }

    #[test]
    fn test_parse_app_roles() {
        assert_eq!("INSTRUCTOR".parse::<AppRole>(), Ok(AppRole::Instructor));
        assert_eq!(" student ".parse::<AppRole>(), Ok(AppRole::Student));
        assert!("OPERATOR".parse::<AppRole>().is_err());
    }

    #[test]
    fn test_serde_spelling_matches_as_str() {
        for role in AdminRole::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
        for role in AppRole::all() {
            let json = serde_json::to_string(role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }
}
