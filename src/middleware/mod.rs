pub mod auth;
pub mod secure;
