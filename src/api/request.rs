//! Request types for the maintenance planner API.
//!
//! This module defines the JSON request structures for the `/schedule` and
//! `/jobs` endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::input::{SiteRow, coerce_count};

/// Request body for the `/schedule` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Input lines, one per site (or per site and month).
    pub rows: Vec<SiteRowRequest>,
    /// First day of the horizon (inclusive).
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Last day of the horizon (inclusive).
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Replaces the server configuration for this request.
    #[serde(default)]
    pub config: Option<PlannerConfig>,
}

/// Request body for the `/jobs` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobsRequest {
    /// Input lines to aggregate.
    pub rows: Vec<SiteRowRequest>,
    /// Replaces the server configuration for this request.
    #[serde(default)]
    pub config: Option<PlannerConfig>,
}

/// One input line in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteRowRequest {
    /// Site identifier.
    pub site: String,
    /// Equipment count; a number or numeric text. Anything else counts as 0.
    pub equipment_count: serde_json::Value,
    /// Month text such as `2025-03` or `mars 2025`.
    #[serde(default)]
    pub period: Option<String>,
}

impl From<SiteRowRequest> for SiteRow {
    fn from(req: SiteRowRequest) -> Self {
        let equipment_count = match &req.equipment_count {
            serde_json::Value::Number(n) => n
                .as_f64()
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(0.0),
            serde_json::Value::String(s) => coerce_count(s),
            _ => 0.0,
        };
        SiteRow {
            site: req.site,
            equipment_count,
            period: req.period,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_schedule_request() {
        let json = r#"{
            "rows": [
                {"site": "Gare A", "equipment_count": 3},
                {"site": "Gare B", "equipment_count": "20"}
            ],
            "start_date": "2025-03-03",
            "end_date": "2025-03-07"
        }"#;

        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.rows.len(), 2);
        assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 3, 3));
        assert!(request.config.is_none());
    }

    #[test]
    fn test_deserialize_request_with_config_override() {
        let json = r#"{
            "rows": [{"site": "A", "equipment_count": 1, "period": "2025-03"}],
            "config": {"reserve_hours": 0.5, "off_days": ["2025-03-14"]}
        }"#;

        let request: ScheduleRequest = serde_json::from_str(json).unwrap();
        let config = request.config.unwrap();
        assert_eq!(config.reserve_hours, 0.5);
        assert_eq!(config.lunch_hours, 1.0);
        assert_eq!(config.off_days.len(), 1);
    }

    #[test]
    fn test_row_conversion_coerces_equipment() {
        let rows: Vec<SiteRowRequest> = serde_json::from_str(
            r#"[
                {"site": "A", "equipment_count": 2.5},
                {"site": "B", "equipment_count": "3,5"},
                {"site": "C", "equipment_count": null},
                {"site": "D", "equipment_count": -4}
            ]"#,
        )
        .unwrap();

        let counts: Vec<f64> = rows
            .into_iter()
            .map(SiteRow::from)
            .map(|r| r.equipment_count)
            .collect();
        assert_eq!(counts, vec![2.5, 3.5, 0.0, 0.0]);
    }
}
