// src/services/slaughter_service.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BatchRepository, ProductRepository, SlaughterRepository},
    models::{
        batch::Batch,
        product::StockMovementReason,
        slaughter::{SlaughterBatchSource, SlaughterRecordDetail, SlaughterYield},
    },
    services::notifier::{DiscrepancyAlert, Notifier},
};

/// Records a slaughter session: birds drawn from one or more batches,
/// product yields booked into stock, shortfalls explained and (when the
/// reason warrants it) escalated to the farm managers.
#[derive(Clone)]
pub struct SlaughterService {
    slaughter_repo: SlaughterRepository,
    batch_repo: BatchRepository,
    product_repo: ProductRepository,
    notifier: Arc<dyn Notifier>,
}

#[derive(Debug, Clone)]
pub struct SourceInput {
    pub batch_id: Uuid,
    pub expected_quantity: i32,
    pub actual_quantity: i32,
    pub discrepancy_reason_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct YieldInput {
    pub product_id: Uuid,
    pub estimated_quantity: i32,
    pub actual_quantity: i32,
}

#[derive(Debug, Clone)]
pub struct RecordSlaughterInput {
    pub slaughter_date: NaiveDate,
    pub sources: Vec<SourceInput>,
    pub yields: Vec<YieldInput>,
    pub notes: Option<String>,
}

/// Cumulative expected/actual totals for one batch across a session's
/// sources, in first-appearance order. A batch named by several sources
/// is validated and decremented once, against these totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BatchDraw {
    pub batch_id: Uuid,
    pub expected: i32,
    pub actual: i32,
}

pub(crate) fn aggregate_draws(sources: &[SourceInput]) -> Vec<BatchDraw> {
    let mut draws: Vec<BatchDraw> = Vec::new();
    for source in sources {
        match draws.iter_mut().find(|d| d.batch_id == source.batch_id) {
            Some(draw) => {
                draw.expected += source.expected_quantity;
                draw.actual += source.actual_quantity;
            }
            None => draws.push(BatchDraw {
                batch_id: source.batch_id,
                expected: source.expected_quantity,
                actual: source.actual_quantity,
            }),
        }
    }
    draws
}

/// A draw must fit within the batch's availability on both counts: the
/// expected total and the actual total that will be deducted. Slaughter
/// never floors at zero; an oversubscribed batch rejects the session.
pub(crate) fn ensure_available(batch: &Batch, draw: &BatchDraw) -> Result<(), AppError> {
    let available = batch.remaining_quantity();
    if draw.expected > available || draw.actual > available {
        return Err(AppError::InsufficientStock(format!(
            "Batch {} has only {} birds available, {} requested.",
            batch.batch_number,
            available,
            draw.expected.max(draw.actual)
        )));
    }
    Ok(())
}

impl SlaughterService {
    pub fn new(
        slaughter_repo: SlaughterRepository,
        batch_repo: BatchRepository,
        product_repo: ProductRepository,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            slaughter_repo,
            batch_repo,
            product_repo,
            notifier,
        }
    }

    pub async fn record<'e, E>(
        &self,
        executor: E,
        team_id: Uuid,
        recorded_by: Uuid,
        input: RecordSlaughterInput,
    ) -> Result<SlaughterRecordDetail, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // 1. One row-locked load and one availability check per distinct
        // batch, against the summed totals, before mutating anything.
        let draws = aggregate_draws(&input.sources);
        let mut batches: HashMap<Uuid, Batch> = HashMap::with_capacity(draws.len());
        for draw in &draws {
            let batch = self
                .batch_repo
                .get_for_update(&mut *tx, team_id, draw.batch_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Batch not found.".to_string()))?;
            ensure_available(&batch, draw)?;
            batches.insert(draw.batch_id, batch);
        }

        let record = self
            .slaughter_repo
            .create_record(
                &mut *tx,
                team_id,
                input.slaughter_date,
                recorded_by,
                input.notes.as_deref(),
            )
            .await?;

        // 2. One cumulative decrement per batch. The availability check
        // guarantees the result is non-negative.
        for draw in &draws {
            let batch = &batches[&draw.batch_id];
            self.batch_repo
                .set_current_quantity(
                    &mut *tx,
                    team_id,
                    draw.batch_id,
                    batch.remaining_quantity() - draw.actual,
                )
                .await?;
        }

        // 3. Per-source detail rows, collecting notification-worthy
        // shortfalls.
        let mut sources: Vec<SlaughterBatchSource> = Vec::with_capacity(input.sources.len());
        let mut alerts: Vec<DiscrepancyAlert> = Vec::new();

        for source in &input.sources {
            let row = self
                .slaughter_repo
                .create_source(
                    &mut *tx,
                    record.id,
                    source.batch_id,
                    source.expected_quantity,
                    source.actual_quantity,
                    source.discrepancy_reason_id,
                    source.notes.as_deref(),
                )
                .await?;

            if row.shortfall() > 0 {
                if let Some(reason_id) = source.discrepancy_reason_id {
                    let reason = self
                        .slaughter_repo
                        .get_reason(&mut *tx, team_id, reason_id)
                        .await?
                        .ok_or_else(|| {
                            AppError::NotFound("Discrepancy reason not found.".to_string())
                        })?;
                    if reason.notify_manager {
                        alerts.push(DiscrepancyAlert {
                            batch_number: batches[&source.batch_id].batch_number.clone(),
                            shortfall: row.shortfall(),
                            reason: reason.label,
                        });
                    }
                }
            }

            sources.push(row);
        }

        // 4. Per yield: book the actual quantity into product stock with a
        // ledger entry; the estimated/actual gap is household consumption.
        let mut yields: Vec<SlaughterYield> = Vec::with_capacity(input.yields.len());
        for y in &input.yields {
            let product = self
                .product_repo
                .get_for_update(&mut *tx, team_id, y.product_id)
                .await?
                .ok_or_else(|| AppError::NotFound("Product not found.".to_string()))?;

            let delta = Decimal::from(y.actual_quantity);
            self.product_repo
                .adjust_stock(&mut *tx, team_id, product.id, delta)
                .await?;
            self.product_repo
                .record_movement(
                    &mut *tx,
                    team_id,
                    product.id,
                    delta,
                    StockMovementReason::SlaughterYield,
                    Some("Slaughter session yield"),
                )
                .await?;

            let household_consumed = (y.estimated_quantity - y.actual_quantity).max(0);
            let row = self
                .slaughter_repo
                .create_yield(
                    &mut *tx,
                    record.id,
                    y.product_id,
                    y.estimated_quantity,
                    y.actual_quantity,
                    household_consumed,
                )
                .await?;
            yields.push(row);
        }

        tx.commit().await?;

        // 5. Post-commit, fire-and-forget: delivery failures are logged by
        // the notifier and can no longer affect the recorded state.
        if !alerts.is_empty() {
            let notifier = Arc::clone(&self.notifier);
            tokio::spawn(async move {
                notifier
                    .notify_slaughter_discrepancies(team_id, alerts)
                    .await;
            });
        }

        Ok(SlaughterRecordDetail {
            record,
            sources,
            yields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::batch::BatchStatus;
    use chrono::{TimeZone, Utc};

    fn batch(initial: i32, current: Option<i32>) -> Batch {
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
            average_weight_kg: None,
            manure_bags_collected: None,
            closure_reason: None,
            closure_notes: None,
            final_statistics: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    fn source(batch_id: Uuid, expected: i32, actual: i32) -> SourceInput {
        SourceInput {
            batch_id,
            expected_quantity: expected,
            actual_quantity: actual,
            discrepancy_reason_id: None,
            notes: None,
        }
    }

    #[test]
    fn duplicate_batch_sources_accumulate_into_one_draw() {
        // Two sources naming the same 100-bird batch (60 + 40) must drain
        // it to exactly zero, not leave 60 behind.
        let b = batch(1000, Some(100));
        let draws = aggregate_draws(&[source(b.id, 60, 60), source(b.id, 40, 40)]);
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].expected, 100);
        assert_eq!(draws[0].actual, 100);
        assert!(ensure_available(&b, &draws[0]).is_ok());
        assert_eq!(b.remaining_quantity() - draws[0].actual, 0);
    }

    #[test]
    fn oversubscribed_batch_is_rejected_across_sources() {
        // 80 + 80 from a 100-bird batch passes per-source but not summed.
        let b = batch(1000, Some(100));
        let draws = aggregate_draws(&[source(b.id, 80, 80), source(b.id, 80, 80)]);
        let err = ensure_available(&b, &draws[0]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Batch BATCH-2026-001 has only 100 birds available, 160 requested."
        );
    }

    #[test]
    fn actual_exceeding_availability_is_rejected() {
        // The deducted amount is the actual count; it must fit even when
        // the expected count does.
        let b = batch(1000, Some(100));
        let draws = aggregate_draws(&[source(b.id, 90, 120)]);
        let err = ensure_available(&b, &draws[0]).unwrap_err();
        assert!(matches!(err, AppError::InsufficientStock(_)));
        assert_eq!(
            err.to_string(),
            "Batch BATCH-2026-001 has only 100 birds available, 120 requested."
        );
    }

    #[test]
    fn distinct_batches_keep_separate_draws() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let draws = aggregate_draws(&[source(a, 10, 10), source(b, 5, 5), source(a, 2, 1)]);
        assert_eq!(
            draws,
            vec![
                BatchDraw {
                    batch_id: a,
                    expected: 12,
                    actual: 11
                },
                BatchDraw {
                    batch_id: b,
                    expected: 5,
                    actual: 5
                },
            ]
        );
    }
}
