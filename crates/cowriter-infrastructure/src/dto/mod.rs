//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs describe the stored JSON shape of records whose domain model
//! carries state that must not be persisted.

mod user_config;

pub use user_config::{EvalItemDto, UserConfigDto};
