pub mod batch;
pub mod daily_log;
pub mod expense;
pub mod product;
pub mod sales;
pub mod slaughter;
pub mod stats;
