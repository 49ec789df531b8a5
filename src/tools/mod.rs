pub mod common;
pub mod executor;
pub mod types;

pub use common::SAFETY_SUFFIX;
pub use executor::SafeExecutor;
pub use types::{ExecuteOptions, FileOpOutcome, FileOpResult, Intent, render_result};
