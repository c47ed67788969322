//! Display formatting for terminal output

pub mod report;

pub use report::{
    double_separator, format_bar, format_money_colored, format_percentage, format_ratio,
    separator, truncate,
};
