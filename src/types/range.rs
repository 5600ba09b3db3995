//! Date range query parameters shared by the range endpoints.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::errors::{AppError, AppResult};

/// `?startDate=...&endDate=...`, both RFC3339
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    /// Inclusive lower bound, e.g. 2023-07-10T00:00:00Z
    pub start_date: String,
    /// Inclusive upper bound, e.g. 2023-07-11T00:00:00Z
    pub end_date: String,
}

impl DateRangeQuery {
    /// Parse both bounds, rejecting malformed or inverted ranges.
    pub fn parse(&self) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        let start = parse_bound("startDate", &self.start_date)?;
        let end = parse_bound("endDate", &self.end_date)?;

        if start > end {
            return Err(AppError::validation("startDate must not be after endDate"));
        }

        Ok((start, end))
    }
}

fn parse_bound(name: &str, value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::validation(format!("invalid {} format, expected RFC3339", name)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(start: &str, end: &str) -> DateRangeQuery {
        DateRangeQuery {
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_parse_valid_range() {
        let (start, end) = query("2023-07-10T00:00:00Z", "2023-07-10T02:00:00+02:00")
            .parse()
            .unwrap();
        assert_eq!(start, end);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        let err = query("yesterday", "2023-07-10T00:00:00Z").parse().unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("startDate")));
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        let result = query("2023-07-11T00:00:00Z", "2023-07-10T00:00:00Z").parse();
        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
