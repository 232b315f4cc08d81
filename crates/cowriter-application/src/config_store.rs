//! User configuration store.
//!
//! Holds the actions, evals and writing preferences for the session. Every
//! persisted change writes the whole configuration back. Eval outcomes are
//! kept in memory only.

use std::sync::Arc;
use tokio::sync::RwLock;

use cowriter_core::CoWriterError;
use cowriter_core::config::{
    ActionButton, ConfigRepository, EvalItem, Tone, UserConfig, WritingStyle,
};
use cowriter_core::error::Result;
use cowriter_core::event::{EventBus, SessionEvent};
use cowriter_core::score::Score;

pub struct ConfigStore {
    repository: Arc<dyn ConfigRepository>,
    bus: EventBus,
    config: RwLock<UserConfig>,
}

impl ConfigStore {
    pub fn new(repository: Arc<dyn ConfigRepository>, bus: EventBus) -> Self {
        Self {
            repository,
            bus,
            config: RwLock::new(UserConfig::default()),
        }
    }

    /// Loads the stored configuration. Without one, defaults stay in memory
    /// and nothing is written until the first change.
    pub async fn load(&self) {
        match self.repository.load().await {
            Ok(Some(config)) => *self.config.write().await = config,
            Ok(None) => tracing::debug!("[ConfigStore] No stored configuration; using defaults"),
            Err(e) => tracing::warn!("[ConfigStore] Failed to load configuration: {}", e),
        }
    }

    pub async fn snapshot(&self) -> UserConfig {
        self.config.read().await.clone()
    }

    pub async fn set_actions(&self, actions: Vec<ActionButton>) {
        self.update(|config| config.actions = actions).await;
    }

    pub async fn set_evals(&self, evals: Vec<EvalItem>) {
        self.update(|config| config.evals = evals).await;
    }

    pub async fn set_about_me(&self, about_me: impl Into<String>) {
        let about_me = about_me.into();
        self.update(|config| config.about_me = about_me).await;
    }

    pub async fn set_preferred_style(&self, style: WritingStyle) {
        self.update(|config| config.preferred_style = style).await;
    }

    pub async fn set_tone(&self, tone: Tone) {
        self.update(|config| config.tone = tone).await;
    }

    /// Appends a new action with the next free id.
    pub async fn add_action(&self, name: &str, instruction: &str, emoji: &str) -> Result<ActionButton> {
        require_text("Action name", name)?;
        require_text("Action instruction", instruction)?;

        self.try_update(|config| {
            let action = ActionButton::new(config.next_action_id(), name.trim(), instruction.trim(), emoji);
            config.actions.push(action.clone());
            Ok(action)
        })
        .await
    }

    /// Replaces the action with the same id.
    pub async fn update_action(&self, action: ActionButton) -> Result<()> {
        require_text("Action name", &action.name)?;
        require_text("Action instruction", &action.action)?;

        self.try_update(|config| {
            let slot = config
                .actions
                .iter_mut()
                .find(|a| a.id == action.id)
                .ok_or_else(|| CoWriterError::not_found("Action", &action.id))?;
            *slot = action;
            Ok(())
        })
        .await
    }

    pub async fn remove_action(&self, id: &str) -> Result<ActionButton> {
        self.try_update(|config| {
            let position = config
                .actions
                .iter()
                .position(|a| a.id == id)
                .ok_or_else(|| CoWriterError::not_found("Action", id))?;
            Ok(config.actions.remove(position))
        })
        .await
    }

    /// Appends a new eval with the next free id.
    pub async fn add_eval(&self, name: &str, description: &str, emoji: &str) -> Result<EvalItem> {
        require_text("Eval name", name)?;
        require_text("Eval description", description)?;

        self.try_update(|config| {
            let eval = EvalItem::new(config.next_eval_id(), name.trim(), description.trim(), emoji);
            config.evals.push(eval.clone());
            Ok(eval)
        })
        .await
    }

    /// Replaces the persisted fields of the eval with the same id.
    ///
    /// The eval's current outcome is kept.
    pub async fn update_eval(&self, eval: EvalItem) -> Result<()> {
        require_text("Eval name", &eval.name)?;
        require_text("Eval description", &eval.description)?;

        self.try_update(|config| {
            let slot = config
                .evals
                .iter_mut()
                .find(|e| e.id == eval.id)
                .ok_or_else(|| CoWriterError::not_found("Eval", &eval.id))?;
            slot.name = eval.name;
            slot.description = eval.description;
            slot.emoji = eval.emoji;
            Ok(())
        })
        .await
    }

    pub async fn remove_eval(&self, id: &str) -> Result<EvalItem> {
        self.try_update(|config| {
            let position = config
                .evals
                .iter()
                .position(|e| e.id == id)
                .ok_or_else(|| CoWriterError::not_found("Eval", id))?;
            Ok(config.evals.remove(position))
        })
        .await
    }

    /// Restores every field to its default in one update.
    pub async fn reset(&self) {
        tracing::info!("[ConfigStore] Resetting configuration to defaults");
        self.update(|config| *config = UserConfig::default()).await;
    }

    /// Stores the outcome of an eval run on that eval only.
    pub async fn record_eval_result(&self, id: &str, score: Score, result: String) -> Result<()> {
        let mut config = self.config.write().await;
        let eval = config
            .evals
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| CoWriterError::not_found("Eval", id))?;
        tracing::debug!("[ConfigStore] Eval {} scored {}", eval.name, score);
        eval.score = Some(score);
        eval.result = Some(result);
        Ok(())
    }

    /// Clears the outcome of every eval.
    pub async fn invalidate_eval_results(&self) {
        let mut config = self.config.write().await;
        if config.evals.iter().any(EvalItem::has_result) {
            tracing::debug!("[ConfigStore] Invalidating eval results");
            config.clear_eval_results();
        }
    }

    async fn update<F>(&self, f: F)
    where
        F: FnOnce(&mut UserConfig),
    {
        let _ = self
            .try_update(|config| {
                f(config);
                Ok(())
            })
            .await;
    }

    async fn try_update<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&mut UserConfig) -> Result<R>,
    {
        let mut config = self.config.write().await;
        let out = f(&mut config)?;

        if let Err(e) = self.repository.save(&config).await {
            tracing::warn!("[ConfigStore] Failed to persist configuration: {}", e);
        }
        drop(config);

        self.bus.publish(SessionEvent::ConfigChanged);
        Ok(out)
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CoWriterError::invalid_input(format!("{} must not be empty", field)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cowriter_core::config::{default_actions, default_evals};
    use cowriter_core::storage::{CONFIG_KEY, KeyValueStore};
    use cowriter_infrastructure::storage::MemoryKeyValueStore;
    use cowriter_infrastructure::{KvConfigRepository, StorageAdapter};

    async fn setup() -> (Arc<MemoryKeyValueStore>, EventBus, ConfigStore) {
        let store = Arc::new(MemoryKeyValueStore::new());
        let adapter = Arc::new(StorageAdapter::new(store.clone()));
        let bus = EventBus::new();
        let config = ConfigStore::new(Arc::new(KvConfigRepository::new(adapter)), bus.clone());
        config.load().await;
        (store, bus, config)
    }

    fn stored(store: &MemoryKeyValueStore) -> serde_json::Value {
        serde_json::from_str(&store.get_item(CONFIG_KEY).unwrap().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_defaults_are_not_persisted_until_changed() {
        let (store, _, config) = setup().await;
        assert_eq!(config.snapshot().await, UserConfig::default());
        assert!(store.get_item(CONFIG_KEY).unwrap().is_none());

        config.set_tone(Tone::Friendly).await;
        assert_eq!(stored(&store)["tone"], "Friendly");
    }

    #[tokio::test]
    async fn test_setters_persist_whole_configuration() {
        let (store, bus, config) = setup().await;
        let mut events = bus.subscribe();

        config.set_about_me("Indie developer").await;
        config.set_preferred_style(WritingStyle::Creative).await;

        let json = stored(&store);
        assert_eq!(json["aboutMe"], "Indie developer");
        assert_eq!(json["preferredStyle"], "Creative");
        assert_eq!(json["actions"].as_array().unwrap().len(), 3);
        assert_eq!(events.recv().await.unwrap(), SessionEvent::ConfigChanged);
    }

    #[tokio::test]
    async fn test_action_crud() {
        let (store, _, config) = setup().await;

        let added = config.add_action("Punchier", "Make it punchier", "⚡").await.unwrap();
        assert_eq!(added.id, "4");

        let mut edited = added.clone();
        edited.action = "Make every sentence punchier".into();
        config.update_action(edited).await.unwrap();
        assert_eq!(
            config.snapshot().await.find_action("4").unwrap().action,
            "Make every sentence punchier"
        );

        config.remove_action("1").await.unwrap();
        let ids: Vec<String> = config.snapshot().await.actions.into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
        assert_eq!(stored(&store)["actions"].as_array().unwrap().len(), 3);

        assert!(config.remove_action("1").await.unwrap_err().is_not_found());
        assert!(config.add_action(" ", "x", "").await.is_err());
    }

    #[tokio::test]
    async fn test_eval_crud_keeps_outcome_on_update() {
        let (_, _, config) = setup().await;

        config
            .record_eval_result("2", Score::new(2).unwrap(), "Not spammy".into())
            .await
            .unwrap();
        let mut spammy = config.snapshot().await.find_eval("2").cloned().unwrap();
        spammy.description = "Does it read like an ad?".into();
        spammy.score = None;
        config.update_eval(spammy).await.unwrap();

        let after = config.snapshot().await;
        let spammy = after.find_eval("2").unwrap();
        assert_eq!(spammy.description, "Does it read like an ad?");
        assert_eq!(spammy.score, Score::new(2));

        let added = config.add_eval("Hook", "Does the opening grab attention?", "🪝").await.unwrap();
        assert_eq!(added.id, "4");
        config.remove_eval("4").await.unwrap();
        assert_eq!(config.snapshot().await.evals.len(), 3);
    }

    #[tokio::test]
    async fn test_record_eval_result_touches_one_eval() {
        let (store, _, config) = setup().await;

        config
            .record_eval_result("1", Score::new(8).unwrap(), "Rating: 8/10".into())
            .await
            .unwrap();
        config
            .record_eval_result("3", Score::new(6).unwrap(), "Fairly clear".into())
            .await
            .unwrap();

        let snapshot = config.snapshot().await;
        assert_eq!(snapshot.evals[0].score, Score::new(8));
        assert!(!snapshot.evals[1].has_result());
        assert_eq!(snapshot.evals[2].result.as_deref(), Some("Fairly clear"));
        // Outcomes are not a persisted change.
        assert!(store.get_item(CONFIG_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalidate_clears_all_outcomes() {
        let (_, _, config) = setup().await;
        config
            .record_eval_result("1", Score::new(8).unwrap(), "good".into())
            .await
            .unwrap();
        config.invalidate_eval_results().await;
        assert!(config.snapshot().await.evals.iter().all(|e| !e.has_result()));
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (store, _, config) = setup().await;
        config.set_actions(Vec::new()).await;
        config.set_evals(Vec::new()).await;
        config.set_about_me("me").await;

        config.reset().await;
        let snapshot = config.snapshot().await;
        assert_eq!(snapshot.actions, default_actions());
        assert_eq!(snapshot.evals, default_evals());
        assert!(snapshot.about_me.is_empty());
        assert_eq!(stored(&store)["aboutMe"], "");
    }

    #[tokio::test]
    async fn test_load_existing_configuration() {
        let store = Arc::new(MemoryKeyValueStore::with_entries([(
            CONFIG_KEY,
            r#"{"actions":[],"evals":[],"aboutMe":"hi","preferredStyle":"Academic","tone":"Technical"}"#,
        )]));
        let adapter = Arc::new(StorageAdapter::new(store));
        let config = ConfigStore::new(Arc::new(KvConfigRepository::new(adapter)), EventBus::new());
        config.load().await;

        let snapshot = config.snapshot().await;
        assert!(snapshot.actions.is_empty());
        assert_eq!(snapshot.preferred_style, WritingStyle::Academic);
        assert_eq!(snapshot.tone, Tone::Technical);
    }
}
