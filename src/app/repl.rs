use crate::agent::CommandPipeline;
use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::info;

const BOOT_BANNER: &str = "\
Boot sequence initiated...
Arc reactor stable.
All systems online.
Initializing combat-ready systems.
Power levels rising.
Preparing for deployment...
System check complete...
Deployment successful.
";

const GREETING: &str = "\
Hello sir! I am Stark Assistant, your personal AI assistant powered by Stark Technologies.
How can I assist you today?
";

pub const PROMPT: &str = "What would you like me to do? (type \"exit\" to shut down)> ";
pub const FAREWELL: &str = "Shutting down, sir.";
const EXIT_COMMAND: &str = "exit";

/// Line-oriented session: one command per line until `exit` or end of input.
pub async fn run<R, W>(pipeline: &CommandPipeline, input: R, mut output: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(BOOT_BANNER.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.write_all(GREETING.as_bytes()).await?;

    let mut lines = input.lines();
    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line == EXIT_COMMAND {
            break;
        }
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        let reply = pipeline.process(command).await;
        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }

    info!("session ended");
    output.write_all(FAREWELL.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}

/// Interactive session on the process's stdin and stdout.
pub async fn run_stdio(pipeline: &CommandPipeline) -> Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    run(pipeline, stdin, tokio::io::stdout()).await
}
