//! Feature engineering: turning a raw price series into a supervised dataset

use crate::data::PriceSeries;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of lagged close features
pub const LAG_COUNT: usize = 5;
/// Short simple-moving-average window
pub const SMA_SHORT: usize = 10;
/// Long simple-moving-average window (the longest lookback)
pub const SMA_LONG: usize = 30;
/// Minimum raw series length that yields at least one complete feature row
pub const MIN_HISTORY: usize = SMA_LONG + 1;
/// Width of the feature vector fed to the model
pub const FEATURE_COUNT: usize = LAG_COUNT + 6;

/// One fully-defined feature row for a single date
///
/// Immutable value type: the recursive forecast builds a fresh row per step
/// via [`FeatureRow::advance`] instead of mutating shared state. Calendar
/// features are derived from `date` on demand; `day_of_week` follows the
/// pandas convention (Monday = 0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    date: NaiveDate,
    close: f64,
    /// `lags[k]` is the close k+1 trading rows prior
    lags: [f64; LAG_COUNT],
    sma_10: f64,
    sma_30: f64,
}

impl FeatureRow {
    /// Build the row for series index `i`, which must have full history
    fn from_series(date: NaiveDate, closes: &[f64], i: usize) -> Self {
        let mut lags = [0.0; LAG_COUNT];
        for (k, lag) in lags.iter_mut().enumerate() {
            *lag = closes[i - k - 1];
        }

        Self {
            date,
            close: closes[i],
            lags,
            sma_10: mean(&closes[i - SMA_SHORT..i]),
            sma_30: mean(&closes[i - SMA_LONG..i]),
        }
    }

    /// Observation date
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Closing price on the observation date
    pub fn close(&self) -> f64 {
        self.close
    }

    /// Lagged closes, most recent first
    pub fn lags(&self) -> &[f64; LAG_COUNT] {
        &self.lags
    }

    /// Mean of the 10 closes strictly before the observation date
    pub fn sma_10(&self) -> f64 {
        self.sma_10
    }

    /// Mean of the 30 closes strictly before the observation date
    pub fn sma_30(&self) -> f64 {
        self.sma_30
    }

    /// Day of week, Monday = 0
    pub fn day_of_week(&self) -> u32 {
        self.date.weekday().num_days_from_monday()
    }

    /// Day of month, 1-based
    pub fn day_of_month(&self) -> u32 {
        self.date.day()
    }

    /// Month, 1-based
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Flatten into the model input vector
    ///
    /// Column order is fixed: close, lag_1..lag_5, sma_10, sma_30,
    /// day_of_week, day_of_month, month.
    pub fn feature_vector(&self) -> Vec<f64> {
        let mut features = Vec::with_capacity(FEATURE_COUNT);
        features.push(self.close);
        features.extend_from_slice(&self.lags);
        features.push(self.sma_10);
        features.push(self.sma_30);
        features.push(self.day_of_week() as f64);
        features.push(self.day_of_month() as f64);
        features.push(self.month() as f64);
        features
    }

    /// Build the next recursion row from a one-step prediction
    ///
    /// The lag window shifts down (`lag_1` becomes the prediction, `lag_k`
    /// takes the old `lag_{k-1}`) and `close` becomes the prediction.
    /// `sma_10` and `sma_30` are carried forward unchanged rather than
    /// recomputed from the shifted window; the reference implementation
    /// behaves this way and downstream compatibility depends on it.
    pub fn advance(&self, next_date: NaiveDate, predicted: f64) -> Self {
        let mut lags = [0.0; LAG_COUNT];
        lags[0] = predicted;
        lags[1..].copy_from_slice(&self.lags[..LAG_COUNT - 1]);

        Self {
            date: next_date,
            close: predicted,
            lags,
            sma_10: self.sma_10,
            sma_30: self.sma_30,
        }
    }
}

/// Supervised dataset: feature rows paired with one-step-ahead targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDataset {
    rows: Vec<FeatureRow>,
    targets: Vec<f64>,
}

impl LabeledDataset {
    /// Feature rows in chronological order
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Next-day close for each row
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Feature matrix for model fitting
    pub fn feature_matrix(&self) -> Vec<Vec<f64>> {
        self.rows.iter().map(FeatureRow::feature_vector).collect()
    }

    /// Number of trainable rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the dataset has no trainable rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Output of [`build_dataset`]: trainable rows plus the forecast seed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparedDataset {
    /// Rows with a defined next-day target
    pub dataset: LabeledDataset,
    /// Final usable row, which has no target; starting point for forecasting
    pub seed: FeatureRow,
}

/// Build a supervised dataset from a raw price series
///
/// Returns `Ok(None)` for an empty series ("no data" is a distinct outcome,
/// not an error). A non-empty series shorter than [`MIN_HISTORY`] rows cannot
/// produce a single complete feature row and fails with
/// [`ForecastError::InsufficientHistory`]. Otherwise the first [`SMA_LONG`]
/// indices are dropped (no full lag/SMA history), the last row becomes the
/// seed, and every row in between is paired with the next row's close as its
/// target. Pure and deterministic: identical input yields identical output.
pub fn build_dataset(series: &PriceSeries) -> Result<Option<PreparedDataset>> {
    if series.is_empty() {
        return Ok(None);
    }

    let n = series.len();
    if n < MIN_HISTORY {
        return Err(ForecastError::InsufficientHistory { rows: n });
    }

    let points = series.points();
    let closes = series.closes();

    let mut rows = Vec::with_capacity(n - 1 - SMA_LONG);
    let mut targets = Vec::with_capacity(n - 1 - SMA_LONG);
    for i in SMA_LONG..n - 1 {
        rows.push(FeatureRow::from_series(points[i].date, &closes, i));
        targets.push(closes[i + 1]);
    }

    let seed = FeatureRow::from_series(points[n - 1].date, &closes, n - 1);

    tracing::debug!(
        raw_rows = n,
        trainable_rows = rows.len(),
        seed_date = %seed.date(),
        "built supervised dataset"
    );

    Ok(Some(PreparedDataset {
        dataset: LabeledDataset { rows, targets },
        seed,
    }))
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
