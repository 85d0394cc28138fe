use anyhow::{Context, Result};
use log::info;

use taskboard::config::Config;
use taskboard::logger;
use taskboard::service::BoardService;

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--init-config") {
        return Config::generate_default_config(Config::get_default_config_path()?);
    }

    let config = Config::load()?;
    logger::init(&config.logging)?;

    let service = BoardService::open(&config).await.context("Failed to open storage")?;
    info!("Storage ready ({})", config.storage.database_url());

    let mut snapshots = Vec::new();
    for project in service.get_projects().await? {
        snapshots.push(service.project_snapshot(project.id).await?);
    }

    println!("{}", serde_json::to_string_pretty(&snapshots)?);
    Ok(())
}
