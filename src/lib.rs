//! # Crypto Forecast
//!
//! A Rust library for forecasting daily crypto closing prices with a random
//! forest regression ensemble trained on lagged and engineered features.
//!
//! ## Pipeline
//!
//! 1. A [`data::PriceSeries`] (ordered daily closes, fetched by a
//!    [`data::PriceFetcher`] collaborator or loaded from CSV) is turned into
//!    a supervised dataset by [`features::build_dataset`]: five lagged
//!    closes, two prior-window moving averages, and calendar features per
//!    row, with the next day's close as the target.
//! 2. A [`forecaster::Forecaster`] fits its model on the chronological first
//!    80% of rows and reports MSE/R2 on the remaining holdout.
//! 3. [`forecaster::Forecaster::predict_path`] rolls the one-step model
//!    forward over the horizon, feeding each prediction back in as the
//!    newest lag.
//!
//! ## Quick start
//!
//! ```no_run
//! use crypto_forecast::data::DataLoader;
//! use crypto_forecast::features::build_dataset;
//! use crypto_forecast::forecaster::{Forecaster, Horizon};
//! use crypto_forecast::models::ForestConfig;
//!
//! # fn main() -> crypto_forecast::Result<()> {
//! let series = DataLoader::from_csv("btc_usd.csv")?;
//!
//! let prepared = build_dataset(&series)?.ok_or(crypto_forecast::ForecastError::NoData)?;
//!
//! let mut forecaster = Forecaster::new(ForestConfig {
//!     tree_count: 100,
//!     random_seed: 42,
//!     ..Default::default()
//! });
//! let report = forecaster.train(&prepared.dataset)?;
//! println!("{report}");
//!
//! let path = forecaster.predict_path(&prepared.seed, Horizon::Days(7).as_days())?;
//! for point in path.points() {
//!     println!("{}  {:.2}", point.date, point.predicted_close);
//! }
//! # Ok(())
//! # }
//! ```

pub mod data;
pub mod error;
pub mod features;
pub mod forecaster;
pub mod metrics;
pub mod models;
pub mod persistence;

// Re-export commonly used types
pub use crate::data::{DataLoader, PriceFetcher, PricePoint, PriceSeries};
pub use crate::error::{ForecastError, Result};
pub use crate::features::{build_dataset, FeatureRow, LabeledDataset, PreparedDataset};
pub use crate::forecaster::{ForecastPath, ForecastPoint, Forecaster, Horizon, TrainingReport};
pub use crate::models::{ForestConfig, RandomForestRegressor, Regressor};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
