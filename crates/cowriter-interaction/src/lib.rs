//! HTTP interaction with the CoWriter language-model backend.

pub mod client;
pub mod dto;
pub mod error;

pub use client::{BackendClient, HttpBackendClient};
pub use error::BackendError;
