use clap::Subcommand;
use folio_config::Config;
use folio_email_contracts::{Email, EmailService};
use tracing::info;

use crate::email;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Send a test message to the configured recipient
    Test {
        /// Address to put into the Reply-To header
        #[arg(long)]
        reply_to: Option<String>,
    },
    /// Connect and authenticate to the smtp server without sending anything
    Ping,
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { reply_to } => test(config, reply_to).await,
            EmailCommand::Ping => ping(config).await,
        }
    }
}

async fn test(config: Config, reply_to: Option<String>) -> anyhow::Result<()> {
    let email_service = email::connect(&config.smtp)?;

    email_service
        .send(Email {
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            reply_to,
        })
        .await?;

    info!("Test email sent");
    Ok(())
}

async fn ping(config: Config) -> anyhow::Result<()> {
    email::connect(&config.smtp)?.ping().await?;
    info!("Smtp server is reachable");
    Ok(())
}
