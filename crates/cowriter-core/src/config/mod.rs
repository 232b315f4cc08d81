//! User configuration: preferences, action buttons and evals.

mod model;
mod repository;

pub use model::{
    ActionButton, EvalItem, Tone, UserConfig, WritingStyle, default_actions, default_evals,
};
pub use repository::ConfigRepository;
