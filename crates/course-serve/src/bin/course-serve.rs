//! course-serve binary entry point

use courserve::config::ServerConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize logging, preferring `RUST_LOG` over the configured level
fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var("COURSE_SERVE_CONFIG") {
        Ok(path) => ServerConfig::from_toml_file(Path::new(&path))?,
        Err(_) => ServerConfig::from_env(),
    };

    init_logging(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = config.port,
        db_path = %config.db_path,
        personalize = config.personalize.is_configured(),
        "Starting course recommendation server"
    );

    let server = courserve::CourseServer::new(config)?;
    server.start().await?;

    tracing::info!("Server stopped");
    Ok(())
}
