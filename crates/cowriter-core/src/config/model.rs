//! User configuration domain models.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::score::Score;

/// A user-defined one-shot rewrite instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionButton {
    pub id: String,
    pub name: String,
    /// Free-text instruction sent to the backend
    pub action: String,
    pub emoji: String,
}

impl ActionButton {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        action: impl Into<String>,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            action: action.into(),
            emoji: emoji.into(),
        }
    }
}

/// A user-defined scored critique.
///
/// `score` and `result` describe the last run against the current text and
/// are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    /// Markdown critique returned by the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl EvalItem {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            emoji: emoji.into(),
            score: None,
            result: None,
        }
    }

    /// Returns true if this eval carries a result for the current text.
    pub fn has_result(&self) -> bool {
        self.score.is_some() || self.result.is_some()
    }

    /// Drops the ephemeral outcome.
    pub fn clear_result(&mut self) {
        self.score = None;
        self.result = None;
    }
}

/// Writing style preference forwarded with every action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum WritingStyle {
    #[default]
    Professional,
    Casual,
    Academic,
    Creative,
}

/// Tone preference forwarded with every action.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Tone {
    #[default]
    Formal,
    Informal,
    Friendly,
    Technical,
}

/// The user's configuration singleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserConfig {
    pub actions: Vec<ActionButton>,
    pub evals: Vec<EvalItem>,
    pub about_me: String,
    pub preferred_style: WritingStyle,
    pub tone: Tone,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            actions: default_actions(),
            evals: default_evals(),
            about_me: String::new(),
            preferred_style: WritingStyle::default(),
            tone: Tone::default(),
        }
    }
}

impl UserConfig {
    pub fn find_action(&self, key: &str) -> Option<&ActionButton> {
        self.actions
            .iter()
            .find(|a| a.id == key)
            .or_else(|| self.actions.iter().find(|a| a.name.eq_ignore_ascii_case(key)))
    }

    pub fn find_eval(&self, key: &str) -> Option<&EvalItem> {
        self.evals
            .iter()
            .find(|e| e.id == key)
            .or_else(|| self.evals.iter().find(|e| e.name.eq_ignore_ascii_case(key)))
    }

    /// Clears score/result on every eval.
    pub fn clear_eval_results(&mut self) {
        self.evals.iter_mut().for_each(EvalItem::clear_result);
    }

    /// Returns the next free numeric id for a new action.
    pub fn next_action_id(&self) -> String {
        next_numeric_id(self.actions.iter().map(|a| a.id.as_str()))
    }

    /// Returns the next free numeric id for a new eval.
    pub fn next_eval_id(&self) -> String {
        next_numeric_id(self.evals.iter().map(|e| e.id.as_str()))
    }
}

fn next_numeric_id<'a>(ids: impl Iterator<Item = &'a str>) -> String {
    let max = ids.filter_map(|id| id.parse::<u64>().ok()).max().unwrap_or(0);
    (max + 1).to_string()
}

/// Built-in actions offered on first start and after a reset.
pub fn default_actions() -> Vec<ActionButton> {
    vec![
        ActionButton::new("1", "Expand", "Expand the text while maintaining the context", "✨"),
        ActionButton::new("2", "Shorten", "Make the text more concise", "✂️"),
        ActionButton::new("3", "Critique", "Provide feedback on the writing", "🎯"),
    ]
}

/// Built-in evals offered on first start and after a reset.
pub fn default_evals() -> Vec<EvalItem> {
    vec![
        EvalItem::new(
            "1",
            "Interesting",
            "Evaluate how interesting and engaging the text is",
            "🧠",
        ),
        EvalItem::new(
            "2",
            "Spammy",
            "Check if the text contains spam-like content or excessive marketing language",
            "🚫",
        ),
        EvalItem::new(
            "3",
            "Clarity",
            "Assess how clear and easy to understand the text is",
            "💡",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = UserConfig::default();
        assert_eq!(config.actions.len(), 3);
        assert_eq!(config.evals.len(), 3);
        assert!(config.about_me.is_empty());
        assert_eq!(config.preferred_style, WritingStyle::Professional);
        assert_eq!(config.tone, Tone::Formal);
        assert!(config.evals.iter().all(|e| !e.has_result()));
    }

    #[test]
    fn test_find_by_id_or_name() {
        let config = UserConfig::default();
        assert_eq!(config.find_action("2").unwrap().name, "Shorten");
        assert_eq!(config.find_action("expand").unwrap().id, "1");
        assert_eq!(config.find_eval("clarity").unwrap().id, "3");
        assert!(config.find_eval("missing").is_none());
    }

    #[test]
    fn test_next_ids() {
        let mut config = UserConfig::default();
        assert_eq!(config.next_action_id(), "4");
        config.evals.push(EvalItem::new("10", "Tone", "d", "🎵"));
        assert_eq!(config.next_eval_id(), "11");
    }

    #[test]
    fn test_clear_eval_results() {
        let mut config = UserConfig::default();
        config.evals[0].score = Some(Score::new(7).unwrap());
        config.evals[1].result = Some("meh".into());
        config.clear_eval_results();
        assert!(config.evals.iter().all(|e| !e.has_result()));
    }
}
