pub mod cache;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod filters;
pub mod lifecycle;
pub mod model;
pub mod remote;

pub use self::error::{ConfigError, LeaseError};
