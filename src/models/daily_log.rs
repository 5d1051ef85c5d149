// src/models/daily_log.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// One operational record per batch per calendar day.
// UNIQUE(batch_id, log_date); editable only while log_date is still "today".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyLog {
    pub id: Uuid,

    #[schema(ignore)]
    pub team_id: Uuid,

    pub batch_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2026-01-12")]
    pub log_date: NaiveDate,

    #[schema(example = 3)]
    pub mortality_count: i32,

    #[schema(value_type = String, example = "120.5")]
    pub feed_consumed_kg: Decimal,

    // Optional environmental readings.
    #[schema(value_type = Option<String>)]
    pub water_consumed_l: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub temperature_c: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub humidity_pct: Option<Decimal>,
    #[schema(value_type = Option<String>)]
    pub ammonia_ppm: Option<Decimal>,

    pub recorded_by: Uuid,
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyLog {
    /// Logs are immutable once the day rolls over. This is a derived,
    /// time-based property, not a stored flag.
    pub fn is_editable_on(&self, today: NaiveDate) -> bool {
        self.log_date == today
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal::Decimal;

    fn log_on(log_date: NaiveDate) -> DailyLog {
        let ts = Utc.with_ymd_and_hms(2026, 1, 12, 18, 0, 0).unwrap();
        DailyLog {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            batch_id: Uuid::new_v4(),
            log_date,
            mortality_count: 3,
            feed_consumed_kg: Decimal::from(120),
            water_consumed_l: None,
            temperature_c: None,
            humidity_pct: None,
            ammonia_ppm: None,
            recorded_by: Uuid::new_v4(),
            notes: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn editable_only_on_its_own_day() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let log = log_on(date);
        assert!(log.is_editable_on(date));
        // The day after (or any later day), the window is closed.
        assert!(!log.is_editable_on(date.succ_opt().unwrap()));
        // A clock reading before the log's own date is closed too.
        assert!(!log.is_editable_on(date.pred_opt().unwrap()));
    }
}
