pub mod case;
pub mod config;
pub mod runner;

pub use case::CaseParams;
pub use config::SweepConfig;
pub use runner::{prepare_case, run_case, run_sweep, CaseResult};
