pub mod dataset;
pub mod indicators;
pub mod locator;
pub mod price_scale;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod windowing;

pub use dataset::ChartDataset;
pub use indicators::{BollingerPoint, IndicatorConfig, MovingAveragePoint};
pub use locator::nearest_point;
pub use price_scale::{PriceScale, VolumeScale};
pub use scale::LinearScale;
pub use time_scale::TimeScale;
pub use types::{ChartLayout, DividendEvent, Margins, PlotArea, PricePoint, Viewport};
pub use windowing::DisplayWindow;
