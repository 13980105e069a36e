//! stockchart: headless historical price chart core.
//!
//! One OHLCV + dividends series, toggleable indicator and representation
//! layers, pan/zoom view transforms and crosshair tracking. Geometry is
//! materialized into deterministic pixel-space frames so rendering backends
//! and tests consume the exact same output.

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod layers;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
