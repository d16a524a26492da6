use clap::Parser;

use grading_assistant::cli::{self, Cli};
use grading_assistant::infrastructure::logging;
use grading_assistant::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;

    logging::init_logging(&config.logging);

    cli::run(cli, &config).await
}
