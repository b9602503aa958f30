//! Evaluation metrics for holdout predictions

use crate::error::{ForecastError, Result};

/// Mean squared error between predictions and actual values
pub fn mean_squared_error(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    validate_lengths(predicted, actual)?;

    let sum: f64 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (p - a).powi(2))
        .sum();

    Ok(sum / predicted.len() as f64)
}

/// Coefficient of determination (R squared)
///
/// Fraction of target variance explained by the predictions. A zero-variance
/// target yields 0.0 rather than a division by zero.
pub fn r2_score(predicted: &[f64], actual: &[f64]) -> Result<f64> {
    validate_lengths(predicted, actual)?;

    let mean_actual = actual.iter().sum::<f64>() / actual.len() as f64;

    let ss_res: f64 = predicted
        .iter()
        .zip(actual.iter())
        .map(|(p, a)| (a - p).powi(2))
        .sum();
    let ss_tot: f64 = actual.iter().map(|a| (a - mean_actual).powi(2)).sum();

    if ss_tot == 0.0 {
        Ok(0.0)
    } else {
        Ok(1.0 - ss_res / ss_tot)
    }
}

fn validate_lengths(predicted: &[f64], actual: &[f64]) -> Result<()> {
    if predicted.len() != actual.len() || predicted.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "Predicted and actual values must have the same non-zero length".to_string(),
        ));
    }
    Ok(())
}
