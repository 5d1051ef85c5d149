// src/services/metrics.rs
//
// Batch metrics calculator: pure functions of (batch, its daily logs, its
// allocated expenses, today). No I/O and no hidden state, so the dashboard
// can call these as often as it likes and closure can freeze a snapshot.
//
// Every degenerate denominator yields 0.0 (or 100.0 for liveability)
// instead of an error: a batch that has not been weighed yet must render
// as zero on the dashboard, not blow it up.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{batch::Batch, daily_log::DailyLog, expense::Expense, stats::BatchStatistics};

/// Cumulative deaths across the loaded daily logs.
pub fn total_mortality(logs: &[DailyLog]) -> i64 {
    logs.iter().map(|l| i64::from(l.mortality_count)).sum()
}

/// Cumulative feed across the loaded daily logs, in kg.
pub fn total_feed_consumed_kg(logs: &[DailyLog]) -> Decimal {
    logs.iter().map(|l| l.feed_consumed_kg).sum()
}

/// Deaths as a percentage of the initial placement.
pub fn mortality_rate_pct(batch: &Batch, logs: &[DailyLog]) -> f64 {
    if batch.initial_quantity <= 0 {
        return 0.0;
    }
    total_mortality(logs) as f64 / f64::from(batch.initial_quantity) * 100.0
}

/// Share of initially placed birds still accounted for. A batch that has
/// never been requantified reads as fully alive (100.0).
pub fn liveability_pct(batch: &Batch) -> f64 {
    if batch.initial_quantity <= 0 {
        return 0.0;
    }
    f64::from(batch.remaining_quantity()) / f64::from(batch.initial_quantity) * 100.0
}

/// Feed conversion ratio: kg of feed per kg of live weight produced.
pub fn fcr(batch: &Batch, logs: &[DailyLog]) -> f64 {
    let feed = total_feed_consumed_kg(logs).to_f64().unwrap_or(0.0);
    let average_weight = batch
        .average_weight_kg
        .and_then(|w| w.to_f64())
        .unwrap_or(0.0);
    let current = f64::from(batch.remaining_quantity());

    if feed <= 0.0 || average_weight <= 0.0 || current <= 0.0 {
        return 0.0;
    }
    feed / (current * average_weight)
}

/// Whole days from placement to the actual end date, or to today while the
/// batch is still running.
pub fn age_in_days(batch: &Batch, today: NaiveDate) -> i64 {
    let Some(start) = batch.start_date else {
        return 0;
    };
    let end = batch.actual_end_date.unwrap_or(today);
    (end - start).num_days().max(0)
}

/// European Production Efficiency Factor:
/// (liveability% * avg weight kg * 100) / (age in days * FCR).
pub fn epef(batch: &Batch, logs: &[DailyLog], today: NaiveDate) -> f64 {
    let fcr_value = fcr(batch, logs);
    let age = age_in_days(batch, today);
    if fcr_value <= 0.0 || age <= 0 {
        return 0.0;
    }
    let average_weight = batch
        .average_weight_kg
        .and_then(|w| w.to_f64())
        .unwrap_or(0.0);
    (liveability_pct(batch) * average_weight * 100.0) / (age as f64 * fcr_value)
}

fn total_expense_cents(expenses: &[Expense]) -> i64 {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Allocated cost per remaining bird, floored, in minor currency units.
pub fn cost_per_bird_cents(batch: &Batch, expenses: &[Expense]) -> i64 {
    let birds = i64::from(batch.remaining_quantity());
    let total = total_expense_cents(expenses);
    if birds <= 0 || total <= 0 {
        return 0;
    }
    total / birds
}

/// Allocated cost per kg of live weight, floored, in minor currency units.
/// The weight division runs through `Decimal` so currency never touches
/// floating point.
pub fn cost_per_kg_cents(batch: &Batch, expenses: &[Expense]) -> i64 {
    let total = total_expense_cents(expenses);
    let average_weight = batch.average_weight_kg.unwrap_or(Decimal::ZERO);
    let total_weight = Decimal::from(batch.remaining_quantity()) * average_weight;
    if total <= 0 || total_weight <= Decimal::ZERO {
        return 0;
    }
    (Decimal::from(total) / total_weight)
        .floor()
        .to_i64()
        .unwrap_or(0)
}

/// The full KPI report consumed by the dashboard and by batch closure.
pub fn batch_statistics(
    batch: &Batch,
    logs: &[DailyLog],
    expenses: &[Expense],
    today: NaiveDate,
) -> BatchStatistics {
    BatchStatistics {
        age_in_days: age_in_days(batch, today),
        current_quantity: batch.remaining_quantity(),
        average_weight_kg: batch
            .average_weight_kg
            .and_then(|w| w.to_f64())
            .unwrap_or(0.0),
        total_mortality: total_mortality(logs),
        total_feed_consumed_kg: total_feed_consumed_kg(logs).to_f64().unwrap_or(0.0),
        mortality_rate_pct: mortality_rate_pct(batch, logs),
        liveability_pct: liveability_pct(batch),
        fcr: fcr(batch, logs),
        epef: epef(batch, logs, today),
        cost_per_bird_cents: cost_per_bird_cents(batch, expenses),
        cost_per_kg_cents: cost_per_kg_cents(batch, expenses),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::batch::BatchStatus;
    use crate::models::expense::ExpenseCategory;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn batch(initial: i32, current: Option<i32>, average_weight: Option<Decimal>) -> Batch {
        let ts = Utc.with_ymd_and_hms(2026, 1, 5, 8, 0, 0).unwrap();
        Batch {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            batch_number: "BATCH-2026-001".to_string(),
            name: "Shed 1".to_string(),
            supplier_id: None,
            status: BatchStatus::Harvesting,
            start_date: Some(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap()),
            expected_end_date: None,
            actual_end_date: None,
            initial_quantity: initial,
            current_quantity: current,
            target_weight_kg: None,
            average_weight_kg: average_weight,
            manure_bags_collected: None,
            closure_reason: None,
            closure_notes: None,
            final_statistics: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn log(batch_id: Uuid, day: u32, mortality: i32, feed_kg: i64) -> DailyLog {
        let ts = Utc.with_ymd_and_hms(2026, 1, day, 18, 0, 0).unwrap();
        DailyLog {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            batch_id,
            log_date: NaiveDate::from_ymd_opt(2026, 1, day).unwrap(),
            mortality_count: mortality,
            feed_consumed_kg: Decimal::from(feed_kg),
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

    fn expense(cents: i64) -> Expense {
        Expense {
            id: Uuid::new_v4(),
            team_id: Uuid::new_v4(),
            description: "feed".to_string(),
            category: ExpenseCategory::Feed,
            amount_cents: cents,
            expense_date: NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
            allocated_to_kind: None,
            allocated_to_id: None,
            created_at: Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 16).unwrap()
    }

    #[test]
    fn fcr_matches_hand_computed_value() {
        // initial=1000, current=950, avg=2.0kg, two logs totalling 3800kg
        // of feed -> FCR = 3800 / (950 * 2.0) = 2.0
        let b = batch(1000, Some(950), Some(Decimal::from(2)));
        let logs = vec![log(b.id, 10, 20, 1800), log(b.id, 11, 30, 2000)];
        assert_eq!(fcr(&b, &logs), 2.0);
    }

    #[test]
    fn liveability_from_current_quantity() {
        let b = batch(1000, Some(965), None);
        assert_eq!(liveability_pct(&b), 96.5);
    }

    #[test]
    fn liveability_is_full_when_quantity_never_set() {
        let b = batch(1000, None, None);
        assert_eq!(liveability_pct(&b), 100.0);
    }

    #[test]
    fn liveability_zero_initial_defaults_to_zero() {
        let b = batch(0, None, None);
        assert_eq!(liveability_pct(&b), 0.0);
    }

    #[test]
    fn mortality_rate_over_initial_placement() {
        let b = batch(1000, Some(950), None);
        let logs = vec![log(b.id, 10, 20, 100), log(b.id, 11, 30, 100)];
        assert_eq!(mortality_rate_pct(&b, &logs), 5.0);
    }

    #[test]
    fn cost_per_bird_uses_floor_division() {
        let b = batch(1000, Some(950), None);
        let expenses = vec![expense(4_000_000), expense(750_000)];
        assert_eq!(cost_per_bird_cents(&b, &expenses), 5000);

        // Non-exact division floors.
        let expenses = vec![expense(4_750_001)];
        assert_eq!(cost_per_bird_cents(&b, &expenses), 5000);
    }

    #[test]
    fn cost_per_kg_floors_through_decimal() {
        let b = batch(1000, Some(950), Some(Decimal::from(2)));
        let expenses = vec![expense(4_750_000)];
        // 4_750_000 / (950 * 2.0) = 2500
        assert_eq!(cost_per_kg_cents(&b, &expenses), 2500);
    }

    #[test]
    fn fcr_and_epef_default_to_zero_on_degenerate_inputs() {
        // No feed logged.
        let b = batch(1000, Some(950), Some(Decimal::from(2)));
        assert_eq!(fcr(&b, &[]), 0.0);
        assert_eq!(epef(&b, &[], today()), 0.0);

        // No average weight measured.
        let b = batch(1000, Some(950), None);
        let logs = vec![log(b.id, 10, 0, 3800)];
        assert_eq!(fcr(&b, &logs), 0.0);
        assert_eq!(epef(&b, &logs, today()), 0.0);

        // All birds gone.
        let b = batch(1000, Some(0), Some(Decimal::from(2)));
        let logs = vec![log(b.id, 10, 0, 3800)];
        assert_eq!(fcr(&b, &logs), 0.0);

        // Age zero: batch starting today.
        let mut b = batch(1000, Some(950), Some(Decimal::from(2)));
        b.start_date = Some(today());
        let logs = vec![log(b.id, 10, 0, 3800)];
        assert_eq!(epef(&b, &logs, today()), 0.0);
    }

    #[test]
    fn epef_combines_liveability_growth_and_fcr() {
        // liveability 95%, avg 2.0kg, age 42d, FCR 2.0
        // -> (95 * 2.0 * 100) / (42 * 2.0) = 226.19...
        let b = batch(1000, Some(950), Some(Decimal::from(2)));
        let logs = vec![log(b.id, 10, 20, 1800), log(b.id, 11, 30, 2000)];
        let value = epef(&b, &logs, today());
        assert!((value - 19000.0 / 84.0).abs() < 1e-9);
    }

    #[test]
    fn age_uses_actual_end_date_once_closed() {
        let mut b = batch(1000, Some(950), None);
        b.actual_end_date = Some(NaiveDate::from_ymd_opt(2026, 2, 9).unwrap());
        assert_eq!(age_in_days(&b, today()), 35);

        b.actual_end_date = None;
        assert_eq!(age_in_days(&b, today()), 42);

        b.start_date = None;
        assert_eq!(age_in_days(&b, today()), 0);
    }

    #[test]
    fn statistics_report_is_idempotent() {
        let b = batch(1000, Some(950), Some(Decimal::from(2)));
        let logs = vec![log(b.id, 10, 20, 1800), log(b.id, 11, 30, 2000)];
        let expenses = vec![expense(4_750_000)];

        let first = batch_statistics(&b, &logs, &expenses, today());
        let second = batch_statistics(&b, &logs, &expenses, today());
        assert_eq!(first, second);

        assert_eq!(first.fcr, 2.0);
        assert_eq!(first.liveability_pct, 95.0);
        assert_eq!(first.mortality_rate_pct, 5.0);
        assert_eq!(first.cost_per_bird_cents, 5000);
        assert_eq!(first.cost_per_kg_cents, 2500);
        assert_eq!(first.age_in_days, 42);
        assert_eq!(first.current_quantity, 950);
    }
}
