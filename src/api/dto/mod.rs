//! Data Transfer Objects for REST request/response serialization.
//!
//! Request bodies default every field so that a missing field reaches the
//! service as an empty string and is reported as a typed
//! [`crate::error::LedgerError`] instead of a body rejection.

pub mod booking_dto;
pub mod common_dto;
pub mod feedback_dto;
pub mod report_dto;
pub mod route_dto;

pub use booking_dto::*;
pub use common_dto::*;
pub use feedback_dto::*;
pub use report_dto::*;
pub use route_dto::*;
