//! Regression models for one-step price prediction

use crate::error::Result;
use std::fmt::Debug;

/// A single-output regression model
///
/// The seam behind which the ensemble strategy is pluggable: the forecaster
/// only needs a model that fits on a feature matrix and predicts one scalar
/// per feature vector.
pub trait Regressor: Debug {
    /// Fit the model on a feature matrix and target vector
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()>;

    /// Predict a single scalar for one feature vector
    ///
    /// Implementations must be safe for concurrent calls through `&self`;
    /// this crate's forest is plain immutable data after fitting.
    fn predict(&self, features: &[f64]) -> Result<f64>;

    /// Name of the model
    fn name(&self) -> &str;
}

pub mod decision_tree;
pub mod random_forest;

pub use decision_tree::{RegressionTree, TreeConfig};
pub use random_forest::{ForestConfig, RandomForestRegressor};
