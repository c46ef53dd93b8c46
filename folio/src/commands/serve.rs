use folio_config::Config;
use tracing::info;

use crate::environment;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(
        mail_from = config.smtp.from.as_deref().unwrap_or_default(),
        mail_to = config.smtp.to.as_deref().unwrap_or_default(),
        smtp_user_set = config.smtp.username_set(),
        use_tls = config.smtp.use_tls,
        "Using smtp server {}:{}",
        config.smtp.host,
        config.smtp.port,
    );

    let server = environment::build(&config)?;

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(shutdown_signal()).await?;

    info!("Http server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Received shutdown signal");
    } else {
        // Without a signal handler the server runs until the process is killed.
        std::future::pending::<()>().await;
    }
}
