//! Parser for the chart-API JSON envelope the bundled datasets use.
//!
//! Shape: `chart.result[0]` carries parallel arrays `timestamp` and
//! `indicators.quote[0].{open,high,low,close,volume}`, plus a sparse
//! `events.dividends` map keyed by timestamp string. Any OHLCV entry may be
//! null; nulls survive into `RawQuoteRecord` and are dropped later during
//! canonicalization.

use std::collections::HashMap;

use serde::Deserialize;

use crate::data::{RawDataset, RawDividend, RawQuoteRecord};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartNode,
}

#[derive(Debug, Deserialize)]
struct ChartNode {
    result: Vec<ResultNode>,
}

#[derive(Debug, Deserialize)]
struct ResultNode {
    timestamp: Vec<i64>,
    indicators: IndicatorsNode,
    #[serde(default)]
    events: Option<EventsNode>,
}

#[derive(Debug, Deserialize)]
struct IndicatorsNode {
    quote: Vec<QuoteNode>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteNode {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct EventsNode {
    #[serde(default)]
    dividends: HashMap<String, DividendNode>,
}

#[derive(Debug, Deserialize)]
struct DividendNode {
    date: i64,
    amount: f64,
}

/// Parses a chart-API payload into the raw dataset shape.
///
/// Dividend map ordering is irrelevant: events are sorted by date on the way
/// out so downstream windowing sees an ordered series.
pub fn parse_chart_json(payload: &str) -> ChartResult<RawDataset> {
    let envelope: ChartEnvelope = serde_json::from_str(payload)
        .map_err(|err| ChartError::DataSource(format!("malformed chart payload: {err}")))?;

    let result = envelope.chart.result.into_iter().next().ok_or_else(|| {
        ChartError::DataSource("chart payload carries no result node".to_owned())
    })?;

    let quote_node = result.indicators.quote.into_iter().next().ok_or_else(|| {
        ChartError::DataSource("chart payload carries no quote node".to_owned())
    })?;

    let quote = result
        .timestamp
        .iter()
        .enumerate()
        .map(|(index, &timestamp)| RawQuoteRecord {
            time: timestamp as f64,
            open: field_at(&quote_node.open, index),
            high: field_at(&quote_node.high, index),
            low: field_at(&quote_node.low, index),
            close: field_at(&quote_node.close, index),
            volume: field_at(&quote_node.volume, index),
        })
        .collect();

    let mut dividends: Vec<RawDividend> = result
        .events
        .map(|events| {
            events
                .dividends
                .into_values()
                .map(|node| RawDividend {
                    time: node.date as f64,
                    amount: node.amount,
                })
                .collect()
        })
        .unwrap_or_default();
    dividends.sort_by(|a, b| a.time.total_cmp(&b.time));

    Ok(RawDataset { quote, dividends })
}

fn field_at<T: Copy>(values: &[Option<T>], index: usize) -> Option<T> {
    values.get(index).copied().flatten()
}
