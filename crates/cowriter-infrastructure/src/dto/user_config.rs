//! User configuration DTO.
//!
//! Eval `score`/`result` are session state and have no field here, so a
//! stored configuration can never carry them.

use serde::{Deserialize, Serialize};

use cowriter_core::config::{ActionButton, EvalItem, Tone, UserConfig, WritingStyle};

/// Persisted fields of an eval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalItemDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
}

impl From<&EvalItem> for EvalItemDto {
    fn from(eval: &EvalItem) -> Self {
        EvalItemDto {
            id: eval.id.clone(),
            name: eval.name.clone(),
            description: eval.description.clone(),
            emoji: eval.emoji.clone(),
        }
    }
}

impl From<EvalItemDto> for EvalItem {
    fn from(dto: EvalItemDto) -> Self {
        EvalItem::new(dto.id, dto.name, dto.description, dto.emoji)
    }
}

/// Stored configuration under `cowriter_config`.
///
/// Missing fields fall back to the defaults so older records still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserConfigDto {
    pub actions: Vec<ActionButton>,
    pub evals: Vec<EvalItemDto>,
    pub about_me: String,
    pub preferred_style: WritingStyle,
    pub tone: Tone,
}

impl Default for UserConfigDto {
    fn default() -> Self {
        (&UserConfig::default()).into()
    }
}

impl From<&UserConfig> for UserConfigDto {
    fn from(config: &UserConfig) -> Self {
        UserConfigDto {
            actions: config.actions.clone(),
            evals: config.evals.iter().map(EvalItemDto::from).collect(),
            about_me: config.about_me.clone(),
            preferred_style: config.preferred_style,
            tone: config.tone,
        }
    }
}

impl From<UserConfigDto> for UserConfig {
    fn from(dto: UserConfigDto) -> Self {
        UserConfig {
            actions: dto.actions,
            evals: dto.evals.into_iter().map(EvalItem::from).collect(),
            about_me: dto.about_me,
            preferred_style: dto.preferred_style,
            tone: dto.tone,
        }
    }
}
