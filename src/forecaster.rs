//! The forecaster: holdout-evaluated training and recursive multi-step prediction

use crate::error::{ForecastError, Result};
use crate::features::{FeatureRow, LabeledDataset};
use crate::metrics::{mean_squared_error, r2_score};
use crate::models::{ForestConfig, RandomForestRegressor, Regressor};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fraction of the dataset withheld as the chronological holdout
const HOLDOUT_RATIO: f64 = 0.2;

/// Holdout evaluation metrics cached by a trained forecaster
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// Mean squared error on the holdout set
    pub mse: f64,
    /// Coefficient of determination on the holdout set
    pub r2: f64,
}

impl std::fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Holdout metrics:")?;
        writeln!(f, "  MSE: {:.4}", self.mse)?;
        writeln!(f, "  R2:  {:.4}", self.r2)?;
        Ok(())
    }
}

/// One forecasted day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast date
    pub date: NaiveDate,
    /// Predicted closing price
    pub predicted_close: f64,
}

/// Ordered multi-day forecast, one point per horizon day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPath {
    points: Vec<ForecastPoint>,
}

impl ForecastPath {
    /// Forecast points in date order
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    /// Predicted closes in date order
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted_close).collect()
    }

    /// First forecast day
    pub fn first(&self) -> Option<&ForecastPoint> {
        self.points.first()
    }

    /// Last forecast day
    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }

    /// Number of forecast days
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Forecast horizon as users express it; converts to days for prediction
///
/// Months and years use the fixed 30/365-day conversions of the reference
/// application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizon {
    Days(u32),
    Months(u32),
    Years(u32),
}

impl Horizon {
    /// Horizon length in days
    pub fn as_days(&self) -> usize {
        match self {
            Horizon::Days(d) => *d as usize,
            Horizon::Months(m) => *m as usize * 30,
            Horizon::Years(y) => *y as usize * 365,
        }
    }
}

/// Price forecaster wrapping a regression model
///
/// State machine: Untrained -> Trained, one-way. [`Forecaster::train`] fits
/// the model once and caches holdout metrics; retraining requires a fresh
/// instance. [`Forecaster::predict_path`] takes `&self`, so concurrent
/// prediction is as safe as the model's `predict`; the `&mut self` on
/// `train` lets the borrow checker reject concurrent training.
#[derive(Debug, Serialize, Deserialize)]
pub struct Forecaster<M = RandomForestRegressor> {
    model: M,
    trained: bool,
    report: Option<TrainingReport>,
}

impl Forecaster<RandomForestRegressor> {
    /// Create an untrained forecaster backed by a random forest
    pub fn new(config: ForestConfig) -> Self {
        Self::with_model(RandomForestRegressor::new(config))
    }
}

impl Default for Forecaster<RandomForestRegressor> {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl<M: Regressor> Forecaster<M> {
    /// Create an untrained forecaster around any regression model
    pub fn with_model(model: M) -> Self {
        Self {
            model,
            trained: false,
            report: None,
        }
    }

    /// Whether `train` has completed on this instance
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Holdout metrics from training, if trained
    pub fn report(&self) -> Option<TrainingReport> {
        self.report
    }

    /// The wrapped regression model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Fit the model and evaluate it on a chronological holdout
    ///
    /// The last 20% of rows (size truncated, never rounded up) form the
    /// holdout; the preceding rows form the training partition. The split is
    /// always chronological, never shuffled. Fails with
    /// [`ForecastError::InsufficientData`] when either side would be empty
    /// and with [`ForecastError::AlreadyTrained`] on a second call.
    pub fn train(&mut self, dataset: &LabeledDataset) -> Result<TrainingReport> {
        if self.trained {
            return Err(ForecastError::AlreadyTrained);
        }

        let n = dataset.len();
        let holdout = (n as f64 * HOLDOUT_RATIO) as usize;
        if holdout == 0 || holdout >= n {
            return Err(ForecastError::InsufficientData { rows: n });
        }
        let split = n - holdout;

        let matrix = dataset.feature_matrix();
        let targets = dataset.targets();

        self.model.fit(&matrix[..split], &targets[..split])?;

        let mut predicted = Vec::with_capacity(holdout);
        for row in &matrix[split..] {
            predicted.push(self.model.predict(row)?);
        }

        let report = TrainingReport {
            mse: mean_squared_error(&predicted, &targets[split..])?,
            r2: r2_score(&predicted, &targets[split..])?,
        };

        tracing::info!(
            model = self.model.name(),
            train_rows = split,
            holdout_rows = holdout,
            mse = report.mse,
            r2 = report.r2,
            "trained forecaster"
        );

        self.trained = true;
        self.report = Some(report);
        Ok(report)
    }

    /// Forecast `horizon_days` days past the seed row by recursive roll-forward
    ///
    /// Each step predicts one scalar, emits it for the next calendar day,
    /// and folds it back into a fresh feature row ([`FeatureRow::advance`]):
    /// lags shift, `close` becomes the prediction, calendar fields come from
    /// the new date, and the SMA features stay frozen at the seed's values.
    /// Pure with respect to the trained state: no caching between calls.
    pub fn predict_path(&self, seed: &FeatureRow, horizon_days: usize) -> Result<ForecastPath> {
        if !self.trained {
            return Err(ForecastError::NotTrained);
        }
        if horizon_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forecast horizon must be at least one day".to_string(),
            ));
        }

        let mut points = Vec::with_capacity(horizon_days);
        let mut current = seed.clone();

        for _ in 0..horizon_days {
            let predicted = self.model.predict(&current.feature_vector())?;
            let next_date = current.date().succ_opt().ok_or_else(|| {
                ForecastError::Prediction(
                    "Forecast date beyond the supported calendar range".to_string(),
                )
            })?;

            current = current.advance(next_date, predicted);
            points.push(ForecastPoint {
                date: next_date,
                predicted_close: predicted,
            });
        }

        tracing::debug!(
            horizon_days,
            start = %seed.date(),
            "generated forecast path"
        );

        Ok(ForecastPath { points })
    }
}
