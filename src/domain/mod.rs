//! Core domain types: the fixed platform dataset, user records and errors.

pub mod error;
pub mod platform;
pub mod user;

pub use error::DomainError;
pub use platform::{dataset_csv, filter_platforms, find_platform, PlatformRow, PLATFORMS};
pub use user::UserRecord;
