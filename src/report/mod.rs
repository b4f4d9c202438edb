pub mod format;
pub mod stats;

pub use format::format_activity;
pub use stats::ActivityStats;
