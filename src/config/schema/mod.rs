mod core;
mod logging;
mod memory;

pub use self::core::{Config, DEFAULT_API_BASE_URL, DEFAULT_MODEL};
pub use logging::LoggingConfig;
pub use memory::MemoryConfig;
