//! Training command: long history with the next-day return label.

use anyhow::Result;
use feature_config::AppConfig;
use feature_core::types::Variant;

use super::features;
use crate::cli::RunArgs;

pub async fn run(args: RunArgs, config: &AppConfig) -> Result<()> {
    features::execute(Variant::Training, args, None, config).await
}
