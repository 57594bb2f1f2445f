//! List configured tickers command.

use anyhow::Result;
use feature_config::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    println!("Configured Tickers ({})", config.pipeline.tickers.len());
    println!("═══════════════════════════════════════════════════════════");

    for chunk in config.pipeline.tickers.chunks(8) {
        println!("  {}", chunk.join("  "));
    }

    println!();
    println!("Use --tickers AAPL,MSFT to override for a single run.");

    Ok(())
}
