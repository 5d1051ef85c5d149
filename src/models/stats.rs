// src/models/stats.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// The full KPI report for one batch, as assembled by the metrics
// calculator. Consumed by the dashboard and frozen into the batch row
// (`final_statistics`) at closure.
//
// Percentages and ratios are plain floats; monetary figures stay in
// integer minor units. Degenerate denominators yield the documented
// defaults (0.0, or 100.0 for liveability) instead of errors, so the
// dashboard can always render a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatistics {
    #[schema(example = 42)]
    pub age_in_days: i64,

    #[schema(example = 950)]
    pub current_quantity: i32,

    #[schema(example = 2.0)]
    pub average_weight_kg: f64,

    #[schema(example = 50)]
    pub total_mortality: i64,

    #[schema(example = 3800.0)]
    pub total_feed_consumed_kg: f64,

    #[schema(example = 5.0)]
    pub mortality_rate_pct: f64,

    #[schema(example = 95.0)]
    pub liveability_pct: f64,

    #[schema(example = 2.0)]
    pub fcr: f64,

    #[schema(example = 226.19)]
    pub epef: f64,

    #[schema(example = 5000)]
    pub cost_per_bird_cents: i64,

    #[schema(example = 2500)]
    pub cost_per_kg_cents: i64,
}
