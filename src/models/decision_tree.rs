//! Regression tree, the random forest's ensemble member

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Regression tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum depth of the tree
    pub max_depth: usize,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples in a leaf node
    pub min_samples_leaf: usize,
    /// Features considered per split (None = all)
    pub max_features: Option<usize>,
    /// Random seed for feature subsampling
    pub seed: u64,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 10,
            min_samples_split: 5,
            min_samples_leaf: 2,
            max_features: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum TreeNode {
    Leaf {
        value: f64,
    },
    Split {
        feature_idx: usize,
        threshold: f64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

/// CART-style regression tree with variance-reduction splits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionTree {
    config: TreeConfig,
    root: Option<TreeNode>,
}

impl RegressionTree {
    /// Create a new, unfitted tree
    pub fn new(config: TreeConfig) -> Self {
        Self { config, root: None }
    }

    /// Fit the tree on a feature matrix and target vector
    pub fn fit(&mut self, features: &[Vec<f64>], targets: &[f64]) {
        let indices: Vec<usize> = (0..features.len()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.root = Some(self.build_node(features, targets, &indices, 0, &mut rng));
    }

    /// Predict for a single sample; 0.0 if the tree was never fitted
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        match &self.root {
            Some(root) => Self::traverse(root, features),
            None => 0.0,
        }
    }

    fn traverse(node: &TreeNode, features: &[f64]) -> f64 {
        match node {
            TreeNode::Leaf { value } => *value,
            TreeNode::Split {
                feature_idx,
                threshold,
                left,
                right,
            } => {
                if features[*feature_idx] <= *threshold {
                    Self::traverse(left, features)
                } else {
                    Self::traverse(right, features)
                }
            }
        }
    }

    fn build_node(
        &self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> TreeNode {
        let labels: Vec<f64> = indices.iter().map(|&i| targets[i]).collect();
        let impurity = variance(&labels);

        if depth >= self.config.max_depth
            || indices.len() < self.config.min_samples_split
            || impurity < 1e-10
        {
            return TreeNode::Leaf {
                value: mean(&labels),
            };
        }

        match self.find_best_split(features, targets, indices, impurity, rng) {
            Some((feature_idx, threshold, left_idx, right_idx)) => {
                if left_idx.len() < self.config.min_samples_leaf
                    || right_idx.len() < self.config.min_samples_leaf
                {
                    return TreeNode::Leaf {
                        value: mean(&labels),
                    };
                }

                let left = self.build_node(features, targets, &left_idx, depth + 1, rng);
                let right = self.build_node(features, targets, &right_idx, depth + 1, rng);

                TreeNode::Split {
                    feature_idx,
                    threshold,
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
            None => TreeNode::Leaf {
                value: mean(&labels),
            },
        }
    }

    /// Find the split maximizing variance reduction over a feature subsample
    fn find_best_split(
        &self,
        features: &[Vec<f64>],
        targets: &[f64],
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<(usize, f64, Vec<usize>, Vec<usize>)> {
        let n_features = features.first()?.len();
        let max_features = self.config.max_features.unwrap_or(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features.max(1));

        let mut best_gain = 0.0;
        let mut best_split = None;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| features[i][feature_idx])
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            // Midpoints between consecutive distinct values as thresholds
            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| features[i][feature_idx] <= threshold);

                if left_idx.is_empty() || right_idx.is_empty() {
                    continue;
                }

                let left_labels: Vec<f64> = left_idx.iter().map(|&i| targets[i]).collect();
                let right_labels: Vec<f64> = right_idx.iter().map(|&i| targets[i]).collect();

                let n_left = left_labels.len() as f64;
                let n_right = right_labels.len() as f64;
                let weighted = (n_left * variance(&left_labels)
                    + n_right * variance(&right_labels))
                    / (n_left + n_right);

                let gain = parent_impurity - weighted;
                if gain > best_gain {
                    best_gain = gain;
                    best_split = Some((feature_idx, threshold, left_idx, right_idx));
                }
            }
        }

        best_split
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_a_linear_relationship() {
        let features: Vec<Vec<f64>> = (0..100).map(|i| vec![i as f64 / 10.0]).collect();
        let targets: Vec<f64> = features.iter().map(|f| 2.0 * f[0] + 1.0).collect();

        let mut tree = RegressionTree::new(TreeConfig::default());
        tree.fit(&features, &targets);

        // Interior points should land close to the true line
        let prediction = tree.predict_one(&[5.0]);
        assert!((prediction - 11.0).abs() < 1.0);
    }

    #[test]
    fn unfitted_tree_predicts_zero() {
        let tree = RegressionTree::new(TreeConfig::default());
        assert_eq!(tree.predict_one(&[1.0, 2.0]), 0.0);
    }

    #[test]
    fn identical_seeds_build_identical_trees() {
        let features: Vec<Vec<f64>> = (0..50)
            .map(|i| vec![i as f64, (i as f64 / 7.0).sin()])
            .collect();
        let targets: Vec<f64> = features.iter().map(|f| f[0] - f[1]).collect();

        let mut a = RegressionTree::new(TreeConfig {
            max_features: Some(1),
            ..Default::default()
        });
        let mut b = RegressionTree::new(TreeConfig {
            max_features: Some(1),
            ..Default::default()
        });
        a.fit(&features, &targets);
        b.fit(&features, &targets);

        for i in 0..50 {
            let x = [i as f64, (i as f64 / 7.0).sin()];
            assert_eq!(a.predict_one(&x), b.predict_one(&x));
        }
    }
}
