//! Pipeline orchestration: fetch, enrich, combine, write.

use feature_core::error::FeatureResult;
use feature_core::traits::DataSource;
use feature_core::types::{
    EnrichedRow, SnapshotRow, TickerOutcome, TickerSeries, TickerStatus, Variant,
};
use tracing::{error, info, warn};

use crate::aggregate::CombinedTable;
use crate::engineer::FeatureEngineer;
use crate::settings::PipelineSettings;
use crate::sink;

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Combined table as written to the output file
    pub table: CombinedTable,
    /// One outcome per requested ticker, in request order
    pub outcomes: Vec<TickerOutcome>,
    /// Latest row per ticker
    pub snapshot: Vec<SnapshotRow>,
}

impl RunReport {
    pub fn enriched_count(&self) -> usize {
        self.count(TickerStatus::Enriched)
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.enriched_count()
    }

    fn count(&self, status: TickerStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }
}

/// Sequential per-ticker pipeline over a data source.
pub struct Pipeline<S: DataSource> {
    source: S,
    settings: PipelineSettings,
    engineer: FeatureEngineer,
}

impl<S: DataSource> Pipeline<S> {
    /// Create a pipeline. Fails if the settings are not runnable.
    pub fn new(source: S, settings: PipelineSettings) -> FeatureResult<Self> {
        settings.validate()?;
        let engineer = FeatureEngineer::new(settings.variant);
        Ok(Self {
            source,
            settings,
            engineer,
        })
    }

    /// Fetch one ticker's bars.
    ///
    /// Data source errors are logged and treated as "no data" unless the run
    /// is configured to fail fast.
    async fn fetch_ticker(&self, ticker: &str) -> FeatureResult<Option<TickerSeries>> {
        info!("Fetching data for {}", ticker);

        let bars = match self
            .source
            .get_daily_bars(ticker, self.settings.start, self.settings.end)
            .await
        {
            Ok(bars) => bars,
            Err(e) if self.settings.fail_fast => {
                error!(ticker, source = self.source.name(), error = %e, "Fetch failed");
                return Err(e.into());
            }
            Err(e) => {
                warn!(ticker, source = self.source.name(), error = %e, "Fetch failed, skipping ticker");
                return Ok(None);
            }
        };

        if bars.is_empty() {
            warn!("No data found for {}", ticker);
            return Ok(None);
        }

        Ok(Some(TickerSeries::new(ticker, bars)))
    }

    /// Fetch and enrich one ticker.
    async fn process_ticker(&self, ticker: &str) -> FeatureResult<(Vec<EnrichedRow>, TickerOutcome)> {
        let Some(series) = self.fetch_ticker(ticker).await? else {
            return Ok((Vec::new(), TickerOutcome::no_data(ticker)));
        };

        let status = if series.has_min_history() {
            TickerStatus::Enriched
        } else {
            TickerStatus::InsufficientHistory
        };

        let rows = self.engineer.enrich(&series);
        let outcome = TickerOutcome::new(ticker, status, rows.len());
        Ok((rows, outcome))
    }

    /// Process every ticker in order and combine the results.
    pub async fn collect(&self) -> FeatureResult<(CombinedTable, Vec<TickerOutcome>)> {
        let mut results = Vec::with_capacity(self.settings.tickers.len());
        let mut outcomes = Vec::with_capacity(self.settings.tickers.len());

        for ticker in &self.settings.tickers {
            let (rows, outcome) = self.process_ticker(ticker).await?;
            results.push(rows);
            outcomes.push(outcome);
        }

        let table = CombinedTable::from_results(self.settings.variant, results);
        Ok((table, outcomes))
    }

    /// Run the batch end to end and write the output files.
    pub async fn run(&self) -> FeatureResult<RunReport> {
        info!(
            variant = %self.settings.variant,
            tickers = self.settings.tickers.len(),
            start = %self.settings.start,
            end = %self.settings.end,
            source = self.source.name(),
            "Starting feature run"
        );

        let (table, outcomes) = self.collect().await?;
        sink::write_table(&table, &self.settings.output)?;

        let snapshot = table.latest_snapshot();
        // Only the scoring variant persists its snapshot
        if let (Variant::Snapshot, Some(path)) = (self.settings.variant, &self.settings.snapshot_output) {
            sink::write_snapshot(&snapshot, path)?;
        }

        let report = RunReport {
            table,
            outcomes,
            snapshot,
        };

        info!(
            rows = report.table.len(),
            enriched = report.enriched_count(),
            skipped = report.skipped_count(),
            "Feature run complete"
        );

        Ok(report)
    }
}
