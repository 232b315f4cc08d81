use anyhow::{Result, bail};
use clap::Args;

use cowriter_application::{SendOutcome, WriterSession};
use cowriter_core::llm::LlmConnection;
use cowriter_interaction::BackendClient;

/// How the backend should reach a model. Connections last for one
/// invocation only.
#[derive(Args, Clone)]
pub struct ConnectArgs {
    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_key: Option<String>,
    /// Host of a llama.cpp server
    #[arg(long, requires = "llama_port", conflicts_with = "openai_key")]
    pub llama_host: Option<String>,
    #[arg(long, requires = "llama_host")]
    pub llama_port: Option<String>,
}

impl ConnectArgs {
    fn connection(&self) -> Result<LlmConnection> {
        match (&self.openai_key, &self.llama_host, &self.llama_port) {
            (Some(api_key), _, _) => Ok(LlmConnection::OpenAi {
                api_key: api_key.clone(),
            }),
            (None, Some(host), Some(port)) => Ok(LlmConnection::Llama {
                host: host.clone(),
                port: port.clone(),
            }),
            _ => bail!("Provide --openai-key or --llama-host with --llama-port"),
        }
    }
}

async fn connect(session: &WriterSession, args: &ConnectArgs) -> Result<()> {
    let message = session.connect(args.connection()?).await?;
    if let Some(message) = message {
        tracing::info!("{}", message);
    }
    Ok(())
}

pub async fn run_action(session: &WriterSession, key: &str, args: &ConnectArgs) -> Result<()> {
    connect(session, args).await?;
    let text = session.run_action(key).await?;
    println!("{}", text);
    Ok(())
}

pub async fn run_eval(session: &WriterSession, key: &str, args: &ConnectArgs) -> Result<()> {
    connect(session, args).await?;
    let outcome = session.run_eval(key).await?;
    println!("Score: {} ({:?})", outcome.score, outcome.score.band());
    println!();
    println!("{}", outcome.result);
    Ok(())
}

pub async fn chat(session: &WriterSession, message: &str, args: &ConnectArgs) -> Result<()> {
    connect(session, args).await?;
    match session.send_chat(message).await {
        SendOutcome::Replied(reply) => println!("{}", reply.text),
        SendOutcome::Failed(reply) => {
            println!("{}", reply.text);
            bail!("Chat request failed");
        }
        SendOutcome::Ignored => bail!("Nothing to send"),
    }
    Ok(())
}

pub async fn status(client: &dyn BackendClient) -> Result<()> {
    let health = client.health().await?;
    println!("Backend:   {}", health.status);
    match health.llm_type {
        Some(kind) if health.llm_connected => println!("LLM:       connected ({})", kind),
        _ => println!("LLM:       not connected"),
    }
    Ok(())
}
