use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Conversation state file; relative paths resolve against the data directory
    #[serde(default = "default_memory_file")]
    pub file: String,
}

fn default_memory_file() -> String {
    "data/memory.json".into()
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            file: default_memory_file(),
        }
    }
}
