pub mod auth;
pub mod authorization;
pub mod cors;
pub mod metrics;
pub mod validation;
