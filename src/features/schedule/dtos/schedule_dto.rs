use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

/// Query params for the calendar window
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ScheduleRangeQuery {
    /// Inclusive window start (RFC 3339); `start` is accepted too
    #[serde(rename = "startDate", alias = "start")]
    pub start: DateTime<Utc>,
    /// Exclusive window end (RFC 3339); `end` is accepted too
    #[serde(rename = "endDate", alias = "end")]
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_accepts_both_param_spellings() {
        let calendar: ScheduleRangeQuery = serde_json::from_str(
            r#"{"startDate": "2030-04-01T00:00:00Z", "endDate": "2030-04-02T00:00:00Z"}"#,
        )
        .unwrap();
        let short: ScheduleRangeQuery =
            serde_json::from_str(r#"{"start": "2030-04-01T00:00:00Z", "end": "2030-04-02T00:00:00Z"}"#)
                .unwrap();

        assert_eq!(calendar.start, short.start);
        assert_eq!(calendar.end, short.end);
    }
}
