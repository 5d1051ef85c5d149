pub mod batches;
pub mod daily_logs;
pub mod expenses;
pub mod products;
pub mod sales;
pub mod slaughter;
