//! Shared feature-run logic for the snapshot and training commands.

use anyhow::{Context, Result};
use chrono::Local;
use feature_config::AppConfig;
use feature_core::traits::DataSource;
use feature_core::types::Variant;
use feature_data::{CsvDataSource, YahooConfig, YahooDataSource};
use feature_monitor::RunSummary;
use feature_pipeline::{Pipeline, PipelineSettings};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

use crate::cli::RunArgs;

/// Merge command-line overrides into the configured pipeline settings.
pub fn resolve_settings(
    variant: Variant,
    args: &RunArgs,
    snapshot_output: Option<PathBuf>,
    config: &AppConfig,
) -> PipelineSettings {
    let mut pipeline = config.pipeline.clone();
    if args.start.is_some() {
        pipeline.start = args.start;
    }
    if args.end.is_some() {
        pipeline.end = args.end;
    }

    let tickers = if args.tickers.is_empty() {
        pipeline.tickers.clone()
    } else {
        args.tickers.iter().map(|t| t.trim().to_uppercase()).collect()
    };

    let (start, end) = pipeline.date_range(variant, Local::now().date_naive());
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| pipeline.output_for(variant));

    let mut settings = PipelineSettings::new(variant, tickers, start, end)
        .with_output(output)
        .with_fail_fast(args.fail_fast || pipeline.fail_fast);

    if variant == Variant::Snapshot {
        if let Some(path) = snapshot_output.or(pipeline.snapshot_output) {
            settings = settings.with_snapshot_output(path);
        }
    }

    settings
}

/// Run one variant end to end and print the summary.
pub async fn execute(
    variant: Variant,
    args: RunArgs,
    snapshot_output: Option<PathBuf>,
    config: &AppConfig,
) -> Result<()> {
    let settings = resolve_settings(variant, &args, snapshot_output, config);
    let data_dir = args.data_dir.clone().or_else(|| config.pipeline.data_dir.clone());

    let summary = match data_dir {
        Some(dir) => {
            let source = CsvDataSource::new(&dir)
                .with_context(|| format!("Data directory '{}' is not readable", dir.display()))?;
            run_with(source, settings).await?
        }
        None => {
            let yahoo = YahooConfig {
                base_url: config.yahoo.base_url.clone(),
                timeout: Duration::from_secs(config.yahoo.timeout_secs),
                user_agent: config.yahoo.user_agent.clone(),
            };
            let source = YahooDataSource::new(yahoo).context("Failed to create Yahoo Finance client")?;
            run_with(source, settings).await?
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary);
    }

    Ok(())
}

async fn run_with<S: DataSource>(source: S, settings: PipelineSettings) -> Result<RunSummary> {
    let started = Instant::now();
    let output = settings.output.clone();

    let pipeline = Pipeline::new(source, settings).context("Invalid run settings")?;
    let report = pipeline
        .run()
        .await
        .with_context(|| format!("Feature run failed (output {})", output.display()))?;

    let summary = RunSummary::from_outcomes(report.table.variant(), &report.outcomes)
        .with_snapshot_rows(report.snapshot.len())
        .with_elapsed_ms(started.elapsed().as_millis() as u64);

    info!(output = %output.display(), "Results saved");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn args() -> RunArgs {
        RunArgs {
            tickers: vec![],
            start: None,
            end: None,
            output: None,
            data_dir: None,
            fail_fast: false,
            json: false,
        }
    }

    #[test]
    fn test_defaults_come_from_config() {
        let config = AppConfig::default();
        let settings = resolve_settings(Variant::Training, &args(), None, &config);

        assert_eq!(settings.tickers.len(), 24);
        assert_eq!(settings.start, NaiveDate::from_ymd_opt(1999, 1, 1).unwrap());
        assert_eq!(settings.output, PathBuf::from("sp500_data_with_indicators.csv"));
        assert!(settings.snapshot_output.is_none());
        assert!(!settings.fail_fast);
    }

    #[test]
    fn test_configured_snapshot_output_only_applies_to_snapshot() {
        let mut config = AppConfig::default();
        config.pipeline.snapshot_output = Some("scoring/latest.csv".into());

        let training = resolve_settings(Variant::Training, &args(), None, &config);
        assert!(training.snapshot_output.is_none());

        let snapshot = resolve_settings(Variant::Snapshot, &args(), None, &config);
        assert_eq!(snapshot.snapshot_output, Some(PathBuf::from("scoring/latest.csv")));
    }

    #[test]
    fn test_arguments_override_config() {
        let config = AppConfig::default();
        let overrides = RunArgs {
            tickers: vec!["ibm".into(), " orcl ".into()],
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            end: NaiveDate::from_ymd_opt(2024, 3, 1),
            output: Some("out.csv".into()),
            fail_fast: true,
            ..args()
        };

        let settings = resolve_settings(Variant::Snapshot, &overrides, Some("latest.csv".into()), &config);
        assert_eq!(settings.tickers, vec!["IBM", "ORCL"]);
        assert_eq!(settings.start, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(settings.end, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(settings.output, PathBuf::from("out.csv"));
        assert_eq!(settings.snapshot_output, Some(PathBuf::from("latest.csv")));
        assert!(settings.fail_fast);
    }
}
