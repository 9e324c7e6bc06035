//! Service layer: authentication, reference resolution, and the aggregate
//! builders behind each endpoint.

pub mod auth;
pub mod class;
pub mod reports;
pub mod resolver;
pub mod stats;
pub mod student;
