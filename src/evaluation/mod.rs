// Path quality metrics and planner benchmarking

pub mod path_metrics;
pub mod benchmark;

pub use path_metrics::*;
pub use benchmark::*;
