use clap::{Parser, Subcommand};

/// `Stark Assistant` - conversational file assistant with confirmation-gated writes.
#[derive(Parser, Debug)]
#[command(name = "stark-assistant")]
#[command(author = "Stark Technologies")]
#[command(version)]
#[command(
    about = "A conversational assistant that reads, writes and summarizes files on request.",
    long_about = None
)]
pub struct Cli {
    /// Defaults to `chat` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive session (type "exit" to shut down)
    Chat,

    /// Process a single command and print the reply
    Ask {
        /// Command text, e.g. "read notes.txt" or "yes"
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Inspect or reset conversational memory
    Memory {
        #[command(subcommand)]
        memory_command: MemoryCommands,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum MemoryCommands {
    /// Show recent turns, remembered values and any pending confirmation
    Show,
    /// Forget everything, including a pending confirmation
    Reset,
}
