use chrono::NaiveDate;
use crypto_forecast::data::{DataLoader, PriceFetcher, PricePoint, PriceSeries};
use crypto_forecast::error::ForecastError;
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn from_closes_generates_consecutive_dates() {
    let series = PriceSeries::from_closes(date("2023-01-01"), &[100.0, 101.0, 102.0]);

    assert_eq!(series.len(), 3);
    assert_eq!(series.points()[0].date, date("2023-01-01"));
    assert_eq!(series.points()[2].date, date("2023-01-03"));
    assert_eq!(series.closes(), vec![100.0, 101.0, 102.0]);
}

#[test]
fn new_rejects_duplicate_dates() {
    let points = vec![
        PricePoint {
            date: date("2023-01-01"),
            close: 100.0,
        },
        PricePoint {
            date: date("2023-01-01"),
            close: 101.0,
        },
    ];

    assert!(matches!(
        PriceSeries::new(points),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn new_rejects_out_of_order_dates() {
    let points = vec![
        PricePoint {
            date: date("2023-01-02"),
            close: 100.0,
        },
        PricePoint {
            date: date("2023-01-01"),
            close: 101.0,
        },
    ];

    assert!(matches!(
        PriceSeries::new(points),
        Err(ForecastError::InvalidParameter(_))
    ));
}

#[test]
fn empty_series_is_valid() {
    let series = PriceSeries::empty();
    assert!(series.is_empty());
    assert_eq!(series.len(), 0);
}

#[test]
fn csv_loader_reads_date_close_files() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    writeln!(file, "2023-01-01,16500.25").unwrap();
    writeln!(file, "2023-01-02,16720.50").unwrap();
    writeln!(file, "2023-01-03,16610.00").unwrap();
    file.flush().unwrap();

    let series = DataLoader::from_csv(file.path()).unwrap();

    assert_eq!(series.len(), 3);
    assert_eq!(series.points()[1].date, date("2023-01-02"));
    assert_eq!(series.closes(), vec![16500.25, 16720.50, 16610.00]);
}

#[test]
fn csv_loader_rejects_malformed_rows() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "date,close").unwrap();
    writeln!(file, "2023-01-01,not-a-price").unwrap();
    file.flush().unwrap();

    assert!(matches!(
        DataLoader::from_csv(file.path()),
        Err(ForecastError::Csv(_))
    ));
}

struct EmptyFetcher;

impl PriceFetcher for EmptyFetcher {
    fn fetch(
        &self,
        _ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> crypto_forecast::Result<Option<PriceSeries>> {
        Ok(None)
    }
}

struct FixedFetcher(PriceSeries);

impl PriceFetcher for FixedFetcher {
    fn fetch(
        &self,
        _ticker: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> crypto_forecast::Result<Option<PriceSeries>> {
        Ok(Some(self.0.clone()))
    }
}

#[test]
fn fetch_required_turns_empty_results_into_no_data() {
    let fetcher = EmptyFetcher;

    let result = fetcher.fetch_required("BTC-USD", date("2023-01-01"), date("2023-12-31"));

    assert!(matches!(result, Err(ForecastError::NoData)));
}

#[test]
fn fetch_required_passes_data_through() {
    let series = PriceSeries::from_closes(date("2023-01-01"), &[100.0, 101.0]);
    let fetcher = FixedFetcher(series.clone());

    let fetched = fetcher
        .fetch_required("BTC-USD", date("2023-01-01"), date("2023-01-02"))
        .unwrap();

    assert_eq!(fetched, series);
}
