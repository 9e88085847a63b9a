pub mod config;
pub mod csv;
pub mod machine;
pub mod money;
pub mod types;

pub use config::Config;
pub use machine::{Outcome, Purchase, VendingMachine};
