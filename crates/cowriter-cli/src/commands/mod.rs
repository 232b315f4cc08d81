pub mod auth;
pub mod config;
pub mod docs;
pub mod llm;
pub mod types;
