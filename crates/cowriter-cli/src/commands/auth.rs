use anyhow::Result;
use clap::Subcommand;

use cowriter_core::auth::TokenProvider;

use cowriter_infrastructure::KvAuthTokenStore;

#[derive(Subcommand)]
pub enum TokenAction {
    /// Store a bearer token obtained from the backend's sign-in
    Set { token: String },
    /// Forget the stored token and user
    Clear,
    /// Show who the stored token belongs to
    Whoami,
}

pub fn run(tokens: &KvAuthTokenStore, action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Set { token } => {
            tokens.set_token(token.trim());
            println!("Token stored");
        }
        TokenAction::Clear => {
            tokens.clear();
            println!("Signed out");
        }
        TokenAction::Whoami => match (tokens.bearer_token(), tokens.user()) {
            (Some(_), Some(user)) => println!("{}", user.username.unwrap_or(user.email)),
            (Some(_), None) => println!("Token stored, no user profile"),
            (None, _) => println!("Not signed in"),
        },
    }
    Ok(())
}
