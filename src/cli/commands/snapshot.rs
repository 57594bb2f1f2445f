//! Snapshot command: recent history for scoring.

use anyhow::Result;
use feature_config::AppConfig;
use feature_core::types::Variant;

use super::features;
use crate::cli::SnapshotArgs;

pub async fn run(args: SnapshotArgs, config: &AppConfig) -> Result<()> {
    features::execute(Variant::Snapshot, args.run, args.snapshot_output, config).await
}
