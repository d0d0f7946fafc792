use anyhow::Result;
use chrono::Local;
use tracing_subscriber::EnvFilter;

use outage_alert::api::OutageClient;
use outage_alert::config::{Cli, Config};
use outage_alert::run_check;
use outage_alert::voice::{Announcer, SilentAnnouncer, TtsManager};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let config: Config = Cli::parse_or_exit().into();

    if let Err(e) = run(config).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<()> {
    let client = OutageClient::new(&config.api)?;

    let announcer: Box<dyn Announcer> = if config.mute {
        Box::new(SilentAnnouncer)
    } else {
        Box::new(TtsManager::new(config.tts.clone()))
    };

    let now = config.at.unwrap_or_else(|| Local::now().time());
    run_check(
        &client,
        &config.account,
        config.hour_labels,
        now,
        announcer.as_ref(),
    )
    .await?;
    Ok(())
}
