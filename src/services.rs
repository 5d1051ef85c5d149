pub mod batch_service;
pub use batch_service::BatchService;
pub mod daily_log_service;
pub use daily_log_service::DailyLogService;
pub mod expense_service;
pub use expense_service::ExpenseService;
pub mod metrics;
pub mod notifier;
pub use notifier::{Notifier, PgNotifier};
pub mod sales_service;
pub use sales_service::SalesService;
pub mod slaughter_service;
pub use slaughter_service::SlaughterService;
