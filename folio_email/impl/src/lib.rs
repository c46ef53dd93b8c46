use std::{future::Future, sync::Arc, time::Duration};

use anyhow::{anyhow, bail, Context};
use folio_email_contracts::{Email, EmailSendError, EmailService};
use folio_models::Sensitive;
use folio_utils::Apply;
use lettre::{
    message::{header::ContentType, Mailbox, MessageBuilder},
    transport::smtp::{authentication::Credentials, AsyncSmtpTransportBuilder},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct EmailServiceImpl<Transport = AsyncSmtpTransport<Tokio1Executor>> {
    relay: Arc<Relay<Transport>>,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub tls: SmtpTls,
    pub timeout: Duration,
}

/// How the encrypted channel to the SMTP server is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpTls {
    /// Plain connection upgraded with `STARTTLS` after the first `EHLO`.
    StartTls,
    /// TLS from the first byte (SMTPS).
    Implicit,
}

impl SmtpTls {
    pub fn from_use_tls(use_tls: bool) -> Self {
        if use_tls {
            Self::StartTls
        } else {
            Self::Implicit
        }
    }

    fn relay(self, host: &str) -> Result<AsyncSmtpTransportBuilder, lettre::transport::smtp::Error> {
        match self {
            Self::StartTls => AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host),
            Self::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(host),
        }
    }
}

impl std::fmt::Display for SmtpTls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartTls => f.write_str("STARTTLS"),
            Self::Implicit => f.write_str("implicit TLS"),
        }
    }
}

/// A single message delivery over a fresh connection.
pub trait MailTransport: Send + Sync + 'static {
    fn deliver(&self, message: Message) -> impl Future<Output = anyhow::Result<()>> + Send;

    fn check(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl MailTransport for AsyncSmtpTransport<Tokio1Executor> {
    async fn deliver(&self, message: Message) -> anyhow::Result<()> {
        let response = self.send(message).await?;
        if !response.is_positive() {
            bail!("SMTP server rejected the message ({})", response.code());
        }
        Ok(())
    }

    async fn check(&self) -> anyhow::Result<()> {
        self.test_connection()
            .await?
            .then_some(())
            .ok_or_else(|| anyhow!("Failed to ping smtp server"))
    }
}

#[derive(Debug)]
enum Relay<Transport> {
    Configured {
        from: Mailbox,
        to: Mailbox,
        target: String,
        transport: Transport,
    },
    Unconfigured {
        missing: Vec<&'static str>,
    },
}

impl EmailServiceImpl {
    /// Prepare the relay described by `config`.
    ///
    /// Missing credentials or addresses do not fail here: the relay is
    /// created in an unconfigured state and rejects every message instead.
    /// No connection is opened until a message is sent.
    pub fn new(config: &EmailServiceConfig) -> anyhow::Result<Self> {
        let username = present(config.username.as_deref());
        let password = present(config.password.as_deref().map(String::as_str));
        let from = present(config.from.as_deref());
        let to = present(config.to.as_deref());

        let (Some(username), Some(password), Some(from), Some(to)) = (username, password, from, to)
        else {
            let missing = [
                ("SMTP_USERNAME", username.is_none()),
                ("SMTP_PASSWORD", password.is_none()),
                ("MAIL_FROM", from.is_none()),
                ("MAIL_TO", to.is_none()),
            ]
            .into_iter()
            .filter_map(|(key, missing)| missing.then_some(key))
            .collect::<Vec<_>>();
            warn!(
                "Email relay is not configured, missing {}",
                missing.join(", ")
            );
            return Ok(Self::unconfigured(missing));
        };

        let from = from.parse().context("Invalid MAIL_FROM address")?;
        let to = to.parse().context("Invalid MAIL_TO address")?;

        let transport = config
            .tls
            .relay(&config.host)
            .context("Failed to set up smtp transport")?
            .port(config.port)
            .credentials(Credentials::new(username.into(), password.into()))
            .timeout(Some(config.timeout))
            .build();

        let target = format!("{}:{} ({})", config.host, config.port, config.tls);

        Ok(Self::configured(from, to, target, transport))
    }
}

impl<Transport: MailTransport> EmailServiceImpl<Transport> {
    pub fn configured(from: Mailbox, to: Mailbox, target: String, transport: Transport) -> Self {
        Self {
            relay: Arc::new(Relay::Configured {
                from,
                to,
                target,
                transport,
            }),
        }
    }

    pub fn unconfigured(missing: Vec<&'static str>) -> Self {
        Self {
            relay: Arc::new(Relay::Unconfigured { missing }),
        }
    }
}

impl<Transport: MailTransport> EmailService for EmailServiceImpl<Transport> {
    async fn send(&self, email: Email) -> Result<(), EmailSendError> {
        let (from, to, target, transport) = match &*self.relay {
            Relay::Configured {
                from,
                to,
                target,
                transport,
            } => (from, to, target, transport),
            Relay::Unconfigured { missing } => {
                return Err(EmailSendError::MissingConfig(missing.clone()));
            }
        };

        let message = build_message(from.clone(), to.clone(), email)?;

        info!("Connecting to {target} to send email to {to}");
        transport
            .deliver(message)
            .await
            .inspect(|_| info!("Email sent to {to}"))
            .inspect_err(|err| error!("Failed to send email via {target}: {err}"))
            .map_err(Into::into)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        match &*self.relay {
            Relay::Configured { transport, .. } => transport.check().await,
            Relay::Unconfigured { missing } => {
                Err(EmailSendError::MissingConfig(missing.clone()).into())
            }
        }
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|x| !x.is_empty())
}

fn build_message(from: Mailbox, to: Mailbox, email: Email) -> anyhow::Result<Message> {
    let reply_to = email
        .reply_to
        .and_then(|reply_to| match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => Some(mailbox),
            Err(err) => {
                warn!("Sending without unparseable Reply-To address {reply_to:?}: {err}");
                None
            }
        });

    Message::builder()
        .from(from)
        .to(to)
        .apply_map(reply_to, MessageBuilder::reply_to)
        .subject(email.subject)
        .header(ContentType::TEXT_PLAIN)
        .body(email.body)
        .context("Failed to build email")
}
