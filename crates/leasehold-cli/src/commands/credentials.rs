//! Credential commands.
//!
//! `leasehold credentials set|get|rm` drive the [`CredentialStore`] built by
//! [`crate::app::build_store`].

use std::io::Write;

use clap::Args;
use leasehold_secrets::{CredentialStore, EncryptionKey};

use crate::app::{self, Context};

/// Credentials command arguments.
#[derive(Args)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub command: CredentialsCommand,
}

#[derive(clap::Subcommand)]
pub enum CredentialsCommand {
    /// Store a credential (prompts for the value)
    Set {
        /// Credential key, e.g. session_token
        key: String,

        /// Credential value (if omitted, prompts for hidden input)
        #[arg(long)]
        value: Option<String>,
    },

    /// Print a stored credential
    Get {
        /// Credential key
        key: String,
    },

    /// Remove a credential
    #[command(alias = "delete")]
    Rm {
        /// Credential key
        key: String,
    },
}

/// Run the credentials command.
pub async fn run(args: CredentialsArgs, ctx: &Context) -> anyhow::Result<()> {
    let config = ctx.config()?;
    let store = app::build_store(config, EncryptionKey::from_env())?;

    let command = match args.command {
        CredentialsCommand::Set { key, value: None } => {
            let prompt = format!("Enter value for '{key}': ");
            let value = rpassword::prompt_password(prompt)
                .map_err(|e| anyhow::anyhow!("Failed to read credential: {}", e))?;
            CredentialsCommand::Set {
                key,
                value: Some(value),
            }
        }
        other => other,
    };

    execute(command, &store, &mut std::io::stdout()).await
}

/// Execute a credentials command against `store`, writing results to `out`.
pub async fn execute(
    command: CredentialsCommand,
    store: &CredentialStore,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    match command {
        CredentialsCommand::Set { key, value } => {
            let value = value.unwrap_or_default();
            if value.is_empty() {
                anyhow::bail!("Credential value must not be empty");
            }

            store.store(&key, &value).await?;
            writeln!(out, "Credential '{}' stored.", key)?;
        }

        CredentialsCommand::Get { key } => match store.retrieve(&key).await {
            Some(value) => writeln!(out, "{}", value.expose_secret())?,
            None => anyhow::bail!("No value stored for '{}'", key),
        },

        CredentialsCommand::Rm { key } => {
            store.remove(&key).await?;
            writeln!(out, "Credential '{}' removed.", key)?;
        }
    }

    Ok(())
}
