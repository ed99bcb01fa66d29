use std::io::Read;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::{dollars_to_cents, reader, ImportError};
use crate::conquest::MonthlyPerformance;

#[derive(Debug, Deserialize)]
struct PerformanceRow {
    month: String,
    jobs_completed: u32,
    average_rating: f32,
    revenue: String,
    response_rate: f32,
    #[serde(default)]
    cancellation_rate: f32,
}

impl PerformanceRow {
    fn into_performance(self, line: u64) -> Result<MonthlyPerformance, ImportError> {
        let month = parse_month(&self.month)
            .ok_or_else(|| ImportError::row(line, format!("invalid month '{}'", self.month)))?;
        let revenue_cents = dollars_to_cents(&self.revenue)
            .ok_or_else(|| ImportError::row(line, format!("invalid revenue '{}'", self.revenue)))?;
        for (name, rate) in [
            ("response_rate", self.response_rate),
            ("cancellation_rate", self.cancellation_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(ImportError::row(line, format!("{name} must be between 0 and 1")));
            }
        }

        Ok(MonthlyPerformance {
            month,
            jobs_completed: self.jobs_completed,
            average_rating: self.average_rating,
            revenue_cents,
            response_rate: self.response_rate,
            cancellation_rate: self.cancellation_rate,
        })
    }
}

/// Accepts `YYYY-MM` or a full date; either way the result is the first of the month.
fn parse_month(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d"))
        .ok()?;
    date.with_day0(0)
}

/// Loads monthly performance history for tier evaluation.
pub struct PerformanceImporter;

impl PerformanceImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<MonthlyPerformance>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(source: R) -> Result<Vec<MonthlyPerformance>, ImportError> {
        let mut csv_reader = reader(source);
        let headers = csv_reader.headers()?.clone();
        let mut history = Vec::new();

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            let row: PerformanceRow = record
                .deserialize(Some(&headers))
                .map_err(|err| ImportError::row(line, err.to_string()))?;
            history.push(row.into_performance(line)?);
        }

        Ok(history)
    }
}
