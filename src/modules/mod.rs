pub mod admin_auth;
pub mod audit;
pub mod auth;
pub mod instructors;
pub mod panel;
pub mod plans;
