//! Random forest regression ensemble

use super::decision_tree::{RegressionTree, TreeConfig};
use super::Regressor;
use crate::error::{ForecastError, Result};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Random forest configuration
///
/// `tree_count` and `random_seed` are explicit rather than baked-in defaults
/// so callers (and tests) can pin determinism; the `Default` values mirror
/// the reference model (100 trees, seed 42).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble
    pub tree_count: usize,
    /// Base seed; each tree derives its own seed from this
    pub random_seed: u64,
    /// Maximum depth of each tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf node
    pub min_samples_leaf: usize,
    /// Features considered per split (None = n_features / 3)
    pub max_features: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            tree_count: 100,
            random_seed: 42,
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
        }
    }
}

/// Bagged ensemble of regression trees, averaged at prediction time
///
/// Fitting bootstraps a sample per tree with a seed derived from
/// `random_seed` plus the tree index, so results are reproducible even
/// though trees are built in parallel. After fitting the forest is plain
/// immutable data; concurrent `predict` calls through `&self` are safe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    config: ForestConfig,
    trees: Vec<RegressionTree>,
    n_features: usize,
}

impl RandomForestRegressor {
    /// Create a new, unfitted forest
    pub fn new(config: ForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            n_features: 0,
        }
    }

    /// The configuration this forest was built with
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Number of fitted trees
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Bootstrap sample indices (with replacement) for one tree
    fn bootstrap_indices(n: usize, seed: u64) -> Vec<usize> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..n).map(|_| rng.gen_range(0..n)).collect()
    }
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self::new(ForestConfig::default())
    }
}

impl Regressor for RandomForestRegressor {
    fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) -> Result<()> {
        if features.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Cannot fit a forest on an empty feature matrix".to_string(),
            ));
        }
        if features.len() != targets.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "Feature matrix has {} rows but target vector has {}",
                features.len(),
                targets.len()
            )));
        }
        if self.config.tree_count == 0 {
            return Err(ForecastError::InvalidParameter(
                "Forest needs at least one tree".to_string(),
            ));
        }

        let n_features = features[0].len();
        let config = self.config.clone();
        let max_features = config.max_features.unwrap_or((n_features / 3).max(1));

        self.trees = (0..config.tree_count)
            .into_par_iter()
            .map(|i| {
                let seed = config.random_seed.wrapping_add(i as u64);
                let tree_config = TreeConfig {
                    max_depth: config.max_depth,
                    min_samples_split: config.min_samples_split,
                    min_samples_leaf: config.min_samples_leaf,
                    max_features: Some(max_features),
                    seed,
                };

                let indices = Self::bootstrap_indices(features.len(), seed);
                let sample_x: Vec<Vec<f64>> =
                    indices.iter().map(|&j| features[j].clone()).collect();
                let sample_y: Vec<f64> = indices.iter().map(|&j| targets[j]).collect();

                let mut tree = RegressionTree::new(tree_config);
                tree.fit(&sample_x, &sample_y);
                tree
            })
            .collect();
        self.n_features = n_features;

        tracing::debug!(
            trees = self.trees.len(),
            samples = features.len(),
            features = n_features,
            "fitted random forest"
        );

        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<f64> {
        if self.trees.is_empty() {
            return Err(ForecastError::Prediction(
                "Forest has no fitted trees".to_string(),
            ));
        }
        if features.len() != self.n_features {
            return Err(ForecastError::Prediction(format!(
                "Expected {} features, got {}",
                self.n_features,
                features.len()
            )));
        }

        let sum: f64 = self.trees.iter().map(|t| t.predict_one(features)).sum();
        Ok(sum / self.trees.len() as f64)
    }

    fn name(&self) -> &str {
        "Random Forest Regressor"
    }
}
