//! Price series data handling and the market-data collaborator contract

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single daily observation: date and closing price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

/// Ordered-by-date sequence of closing prices
///
/// Dates are strictly increasing; gaps are allowed but duplicates are not.
/// An empty series is valid and signals "no data" downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Create a series from observations, validating date ordering
    pub fn new(points: Vec<PricePoint>) -> Result<Self> {
        for pair in points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ForecastError::InvalidParameter(format!(
                    "Price series dates must be strictly increasing: {} followed by {}",
                    pair[0].date, pair[1].date
                )));
            }
        }

        Ok(Self { points })
    }

    /// Create an empty series
    pub fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a series of consecutive daily closes starting at `start`
    pub fn from_closes(start: NaiveDate, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PricePoint {
                date: start + Duration::days(i as i64),
                close,
            })
            .collect();

        Self { points }
    }

    /// Get the observations
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Get the closing prices as a vector
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Market-data retrieval collaborator
///
/// The transport (network call, cache, exchange API) is outside the core;
/// implementations only have to honor the ordering contract of
/// [`PriceSeries`]. `Ok(None)` means the provider had nothing for the
/// requested range, which is a valid, non-exceptional outcome.
pub trait PriceFetcher {
    /// Fetch daily closes for a ticker over an inclusive date range
    fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<PriceSeries>>;

    /// Fetch, treating an empty result as a hard failure
    fn fetch_required(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries> {
        self.fetch(ticker, start, end)?.ok_or(ForecastError::NoData)
    }
}

/// CSV record for a daily close
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: NaiveDate,
    close: f64,
}

/// Data loader for price series files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a price series from a CSV file with `date,close` columns
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<PriceSeries> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut points = Vec::new();

        for record in reader.deserialize() {
            let row: CsvRow = record?;
            points.push(PricePoint {
                date: row.date,
                close: row.close,
            });
        }

        tracing::debug!(rows = points.len(), "loaded price series from csv");
        PriceSeries::new(points)
    }
}
