// src/services/notifier.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::TeamRepository;

/// One shortfall worth telling the managers about: a slaughter source came
/// up short and its discrepancy reason is flagged `notify_manager`.
#[derive(Debug, Clone)]
pub struct DiscrepancyAlert {
    pub batch_number: String,
    pub shortfall: i32,
    pub reason: String,
}

/// Outbound notification seam. Dispatch happens after the recording
/// transaction commits and is fire-and-forget: implementations swallow
/// delivery failures (logging them) so they can never roll back or block
/// the recorded state.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify_slaughter_discrepancies(&self, team_id: Uuid, alerts: Vec<DiscrepancyAlert>);
}

/// Default notifier: one `notifications` row per farm manager per alert,
/// written on its own pool connection.
pub struct PgNotifier {
    pool: PgPool,
    team_repo: TeamRepository,
}

impl PgNotifier {
    pub fn new(pool: PgPool, team_repo: TeamRepository) -> Self {
        Self { pool, team_repo }
    }
}

#[async_trait]
impl Notifier for PgNotifier {
    async fn notify_slaughter_discrepancies(&self, team_id: Uuid, alerts: Vec<DiscrepancyAlert>) {
        let managers = match self.team_repo.farm_manager_ids(&self.pool, team_id).await {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Could not load farm managers for discrepancy alert: {e}");
                return;
            }
        };

        for alert in &alerts {
            let message = format!(
                "Slaughter shortfall on batch {}: {} birds missing ({}).",
                alert.batch_number, alert.shortfall, alert.reason
            );
            for user_id in &managers {
                if let Err(e) = self
                    .team_repo
                    .create_notification(
                        &self.pool,
                        team_id,
                        *user_id,
                        "SLAUGHTER_DISCREPANCY",
                        &message,
                    )
                    .await
                {
                    tracing::warn!("Failed to deliver discrepancy notification: {e}");
                }
            }
        }
    }
}
