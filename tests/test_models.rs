use crypto_forecast::models::{ForestConfig, RandomForestRegressor, Regressor};
use pretty_assertions::assert_eq;

fn trending_data(n: usize) -> (Vec<Vec<f64>>, Vec<f64>) {
    let features: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let x = i as f64;
            vec![x, (x / 9.0).sin(), (x / 4.0).cos()]
        })
        .collect();
    let targets: Vec<f64> = features
        .iter()
        .map(|f| 0.5 * f[0] + 3.0 * f[1] - f[2])
        .collect();
    (features, targets)
}

#[test]
fn default_config_matches_the_reference_model() {
    let config = ForestConfig::default();
    assert_eq!(config.tree_count, 100);
    assert_eq!(config.random_seed, 42);
}

#[test]
fn forest_predictions_stay_within_the_target_range() {
    let (x, y) = trending_data(150);
    let mut forest = RandomForestRegressor::new(ForestConfig {
        tree_count: 20,
        ..Default::default()
    });
    forest.fit(&x, &y).unwrap();

    let lo = y.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = y.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    // Averaged tree leaves can never leave the observed target range
    for row in &x {
        let p = forest.predict(row).unwrap();
        assert!(p >= lo && p <= hi);
    }
}

#[test]
fn forest_fits_training_data_reasonably() {
    let (x, y) = trending_data(150);
    let mut forest = RandomForestRegressor::new(ForestConfig {
        tree_count: 30,
        max_depth: 12,
        ..Default::default()
    });
    forest.fit(&x, &y).unwrap();

    let predicted: Vec<f64> = x.iter().map(|row| forest.predict(row).unwrap()).collect();
    let r2 = crypto_forecast::metrics::r2_score(&predicted, &y).unwrap();

    assert!(r2 > 0.8, "in-sample r2 was {r2}");
}

#[test]
fn fit_rejects_mismatched_shapes() {
    let (x, mut y) = trending_data(50);
    y.pop();

    let mut forest = RandomForestRegressor::default();
    assert!(forest.fit(&x, &y).is_err());
}

#[test]
fn fit_rejects_empty_input() {
    let mut forest = RandomForestRegressor::default();
    assert!(forest.fit(&[], &[]).is_err());
}

#[test]
fn different_seeds_give_different_forests() {
    let (x, y) = trending_data(150);

    let mut a = RandomForestRegressor::new(ForestConfig {
        tree_count: 10,
        random_seed: 1,
        ..Default::default()
    });
    let mut b = RandomForestRegressor::new(ForestConfig {
        tree_count: 10,
        random_seed: 2,
        ..Default::default()
    });
    a.fit(&x, &y).unwrap();
    b.fit(&x, &y).unwrap();

    let differs = x
        .iter()
        .any(|row| a.predict(row).unwrap() != b.predict(row).unwrap());
    assert!(differs);
}
