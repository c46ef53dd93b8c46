use folio_config::SmtpConfig;
use folio_email_impl::{EmailServiceConfig, EmailServiceImpl, SmtpTls};

/// Set up the SMTP relay. No connection is opened until a message is sent.
pub fn connect(config: &SmtpConfig) -> anyhow::Result<EmailServiceImpl> {
    EmailServiceImpl::new(&EmailServiceConfig {
        host: config.host.clone(),
        port: config.port,
        username: config.username.clone(),
        password: config.password.clone(),
        from: config.from.clone(),
        to: config.to.clone(),
        tls: SmtpTls::from_use_tls(config.use_tls),
        timeout: config.timeout.into(),
    })
}
