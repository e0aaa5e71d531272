//! REST API surface: response envelope, modules and the router.

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc};
