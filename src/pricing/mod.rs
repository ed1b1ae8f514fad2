pub mod aggregate;
pub mod engine;
pub mod quick_table;
pub mod schedule;
