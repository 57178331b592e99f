pub mod token;
pub mod config_loader;
pub mod report_logger;

pub use token::{AmountParseError, TokenRef, format_scaled, parse_scaled, unit_scale};
pub use config_loader::*;
pub use report_logger::{Reporter, TableReporter, format_table};
