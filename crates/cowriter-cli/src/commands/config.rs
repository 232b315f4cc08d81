use anyhow::Result;
use clap::Subcommand;

use cowriter_application::WriterSession;
use cowriter_core::config::{Tone, WritingStyle};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the writing preferences
    Show,
    /// Set the "about me" text sent with every action
    AboutMe { text: String },
    /// Set the preferred writing style
    Style { style: WritingStyle },
    /// Set the tone
    Tone { tone: Tone },
    /// Restore default actions, evals and preferences
    Reset,
}

#[derive(Subcommand)]
pub enum ActionsAction {
    List,
    /// Add an action
    Add {
        name: String,
        instruction: String,
        #[arg(long, default_value = "")]
        emoji: String,
    },
    /// Change an action's instruction
    Update { id: String, instruction: String },
    /// Remove an action by id
    Remove { id: String },
}

#[derive(Subcommand)]
pub enum EvalsAction {
    List,
    /// Add an eval
    Add {
        name: String,
        description: String,
        #[arg(long, default_value = "")]
        emoji: String,
    },
    /// Change an eval's description
    Update { id: String, description: String },
    /// Remove an eval by id
    Remove { id: String },
}

pub async fn run(session: &WriterSession, action: ConfigAction) -> Result<()> {
    let store = session.config();
    match action {
        ConfigAction::Show => {
            let config = store.snapshot().await;
            println!("Style:    {}", config.preferred_style);
            println!("Tone:     {}", config.tone);
            println!("About me: {}", config.about_me);
        }
        ConfigAction::AboutMe { text } => store.set_about_me(text).await,
        ConfigAction::Style { style } => store.set_preferred_style(style).await,
        ConfigAction::Tone { tone } => store.set_tone(tone).await,
        ConfigAction::Reset => {
            store.reset().await;
            println!("Configuration reset to defaults");
        }
    }
    Ok(())
}

pub async fn run_actions(session: &WriterSession, action: ActionsAction) -> Result<()> {
    let store = session.config();
    match action {
        ActionsAction::List => {
            for action in store.snapshot().await.actions {
                println!("{:>3} {} {:<12} {}", action.id, action.emoji, action.name, action.action);
            }
        }
        ActionsAction::Add {
            name,
            instruction,
            emoji,
        } => {
            let action = store.add_action(&name, &instruction, &emoji).await?;
            println!("Added action {} ({})", action.name, action.id);
        }
        ActionsAction::Update { id, instruction } => {
            let mut action = store
                .snapshot()
                .await
                .find_action(&id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No action with id {}", id))?;
            action.action = instruction;
            store.update_action(action).await?;
        }
        ActionsAction::Remove { id } => {
            let removed = store.remove_action(&id).await?;
            println!("Removed action {}", removed.name);
        }
    }
    Ok(())
}

pub async fn run_evals(session: &WriterSession, action: EvalsAction) -> Result<()> {
    let store = session.config();
    match action {
        EvalsAction::List => {
            for eval in store.snapshot().await.evals {
                println!("{:>3} {} {:<12} {}", eval.id, eval.emoji, eval.name, eval.description);
            }
        }
        EvalsAction::Add {
            name,
            description,
            emoji,
        } => {
            let eval = store.add_eval(&name, &description, &emoji).await?;
            println!("Added eval {} ({})", eval.name, eval.id);
        }
        EvalsAction::Update { id, description } => {
            let mut eval = store
                .snapshot()
                .await
                .find_eval(&id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No eval with id {}", id))?;
            eval.description = description;
            store.update_eval(eval).await?;
        }
        EvalsAction::Remove { id } => {
            let removed = store.remove_eval(&id).await?;
            println!("Removed eval {}", removed.name);
        }
    }
    Ok(())
}
