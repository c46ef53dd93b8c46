use std::{net::IpAddr, path::Path};

use anyhow::Context;
use config::{builder::DefaultState, ConfigBuilder, File, FileFormat};
use folio_models::Sensitive;
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Load the configuration from the given TOML files (later files take
/// precedence) and apply overrides from the process environment.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_env(paths, |key| std::env::var(key).ok())
}

/// Like [`load`], but reads environment overrides through `env`.
pub fn load_with_env(
    paths: &[impl AsRef<Path>],
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    apply_env_overrides(builder, env)?
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn apply_env_overrides(
    builder: ConfigBuilder<DefaultState>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ConfigBuilder<DefaultState>> {
    let port = |key: &str| {
        env(key)
            .map(|port| port.trim().parse::<u16>())
            .transpose()
            .with_context(|| format!("Invalid port in {key}"))
            .map(|port| port.map(i64::from))
    };

    builder
        .set_override_option("http.host", env("HTTP_HOST"))?
        .set_override_option("http.port", port("HTTP_PORT")?)?
        .set_override_option("smtp.host", env("SMTP_SERVER"))?
        .set_override_option("smtp.port", port("SMTP_PORT")?)?
        .set_override_option("smtp.username", env("SMTP_USERNAME"))?
        .set_override_option("smtp.password", env("SMTP_PASSWORD"))?
        .set_override_option("smtp.from", env("MAIL_FROM"))?
        .set_override_option("smtp.to", env("MAIL_TO"))?
        .set_override_option(
            "smtp.use_tls",
            env("USE_TLS").map(|tls| tls.eq_ignore_ascii_case("true")),
        )
        .map_err(Into::into)
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub smtp: SmtpConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub host: IpAddr,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<Sensitive<String>>,
    pub from: Option<String>,
    pub to: Option<String>,
    /// `true` selects STARTTLS, `false` a direct TLS connection.
    pub use_tls: bool,
    pub timeout: Duration,
}

impl SmtpConfig {
    /// An empty `SMTP_USERNAME` counts as unset.
    pub fn username_set(&self) -> bool {
        self.username.as_deref().is_some_and(|u| !u.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub subject_prefix: String,
}
