//! Data-loading collaborator boundary.
//!
//! The engine never fetches anything itself: a `DataSource` hands it raw
//! quote/dividend series, which are canonicalized (invalid records silently
//! dropped, sorted by time) before entering the dataset pipeline.

pub mod parser;

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{DividendEvent, PricePoint};
use crate::error::{ChartError, ChartResult};

/// Keys for the bundled historical datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolKey {
    Vig,
    Vti,
    Vea,
}

impl SymbolKey {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vig => "vig",
            Self::Vti => "vti",
            Self::Vea => "vea",
        }
    }

    /// Bundled source file carrying this symbol's payload.
    #[must_use]
    pub fn source_file(self) -> &'static str {
        match self {
            Self::Vig => "sample-data-vig.json",
            Self::Vti => "sample-data-vti.json",
            Self::Vea => "sample-data-vea.json",
        }
    }
}

impl FromStr for SymbolKey {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "vig" => Ok(Self::Vig),
            "vti" => Ok(Self::Vti),
            "vea" => Ok(Self::Vea),
            other => Err(ChartError::InvalidData(format!(
                "unknown symbol key `{other}`"
            ))),
        }
    }
}

/// One raw quote record; any OHLC field may be absent in source data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawQuoteRecord {
    pub time: f64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawDividend {
    pub time: f64,
    pub amount: f64,
}

/// The fixed record shape every data source resolves to.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawDataset {
    pub quote: Vec<RawQuoteRecord>,
    pub dividends: Vec<RawDividend>,
}

/// Drops records with missing or invalid OHLC fields and sorts by time.
///
/// Removal is silent per the error-handling contract; only counts are
/// logged.
#[must_use]
pub fn canonicalize_quotes(records: &[RawQuoteRecord]) -> Vec<PricePoint> {
    let mut points: Vec<PricePoint> = records
        .iter()
        .filter_map(|record| {
            let open = record.open?;
            let high = record.high?;
            let low = record.low?;
            let close = record.close?;
            PricePoint::new(
                record.time,
                open,
                high,
                low,
                close,
                record.volume.unwrap_or(0),
            )
            .ok()
        })
        .collect();

    points.sort_by(|a, b| a.time.total_cmp(&b.time));
    debug!(
        original = records.len(),
        canonical = points.len(),
        "canonicalized quote records"
    );
    points
}

/// Drops invalid dividend records and sorts by time.
#[must_use]
pub fn canonicalize_dividends(records: &[RawDividend]) -> Vec<DividendEvent> {
    let mut events: Vec<DividendEvent> = records
        .iter()
        .filter_map(|record| DividendEvent::new(record.time, record.amount).ok())
        .collect();

    events.sort_by(|a, b| a.time.total_cmp(&b.time));
    events
}

/// Contract implemented by any dataset provider.
///
/// Fetching suspends only at this boundary; the engine treats the returned
/// payload as a completed load continuation.
pub trait DataSource {
    fn fetch(&mut self, symbol: SymbolKey) -> ChartResult<RawDataset>;
}

/// In-memory source mapping symbol keys to chart-API JSON payloads.
///
/// Hosts typically populate it with the bundled sample files; tests hand it
/// synthetic payloads.
#[derive(Debug, Clone, Default)]
pub struct StaticJsonSource {
    payloads: IndexMap<SymbolKey, String>,
}

impl StaticJsonSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: SymbolKey, payload: impl Into<String>) {
        self.payloads.insert(symbol, payload.into());
    }

    #[must_use]
    pub fn with_payload(mut self, symbol: SymbolKey, payload: impl Into<String>) -> Self {
        self.insert(symbol, payload);
        self
    }
}

impl DataSource for StaticJsonSource {
    fn fetch(&mut self, symbol: SymbolKey) -> ChartResult<RawDataset> {
        let payload = self.payloads.get(&symbol).ok_or_else(|| {
            ChartError::DataSource(format!("no payload for symbol `{}`", symbol.as_str()))
        })?;
        parser::parse_chart_json(payload)
    }
}
