use crate::agent::{CommandPipeline, LlmClassifier, LlmSummarizer};
use crate::cli::{Cli, Commands, MemoryCommands};
use crate::config::Config;
use crate::memory::MemoryStore;
use crate::providers::{OpenAiProvider, Provider};
use crate::tools::SafeExecutor;
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

use crate::app::repl;
use crate::app::status::render_memory_status;

/// Wire the pipeline from configuration.
///
/// Without an API key the provider fails fast, which the classifier reports
/// as missing credentials and the summarizer answers with its local summary.
pub fn build_pipeline(config: &Config) -> CommandPipeline {
    let provider: Arc<dyn Provider> = Arc::new(OpenAiProvider::with_base_url(
        config.api_key(),
        &config.api_base_url,
    ));

    let classifier = LlmClassifier::new(
        Arc::clone(&provider),
        config.default_model.clone(),
        config.temperature,
    );
    let summarizer =
        LlmSummarizer::new(provider, config.default_model.clone(), config.temperature);

    CommandPipeline::new(
        MemoryStore::new(config.memory_path()),
        SafeExecutor::new(config.workspace_path()),
        Arc::new(classifier),
        Arc::new(summarizer),
        config.summary_file_path(),
    )
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Chat);

    match command {
        Commands::Chat => {
            let pipeline = build_pipeline(&config);
            info!(
                memory = %pipeline.memory().path().display(),
                model = %config.default_model,
                "starting interactive session"
            );
            repl::run_stdio(&pipeline).await
        }

        Commands::Ask { message } => {
            let pipeline = build_pipeline(&config);
            let reply = pipeline.process(&message.join(" ")).await;
            println!("{reply}");
            Ok(())
        }

        Commands::Memory { memory_command } => {
            let store = MemoryStore::new(config.memory_path());
            match memory_command {
                MemoryCommands::Show => {
                    let state = store.load().await;
                    println!("{}", render_memory_status(store.path(), &state));
                }
                MemoryCommands::Reset => {
                    store
                        .reset()
                        .await
                        .context("Failed to reset conversation memory")?;
                    info!(path = %store.path().display(), "conversation memory reset");
                    println!("Memory cleared, sir.");
                }
            }
            Ok(())
        }
    }
}
