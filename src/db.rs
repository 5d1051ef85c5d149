pub mod batch_repo;
pub use batch_repo::BatchRepository;
pub mod daily_log_repo;
pub use daily_log_repo::DailyLogRepository;
pub mod expense_repo;
pub use expense_repo::ExpenseRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod sales_repo;
pub use sales_repo::SalesRepository;
pub mod slaughter_repo;
pub use slaughter_repo::SlaughterRepository;
pub mod team_repo;
pub use team_repo::TeamRepository;
