//! Optional Rescheduler - moves overdue optional Todoist tasks one week forward

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use optional_rescheduler::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var("OPTIONAL_RESCHEDULER_DEBUG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter("optional_rescheduler=debug")
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(
                shell,
                &mut Cli::command(),
                "optional-rescheduler",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        Some(Commands::Check(args)) => cli::check::run(&cli.global, args).await,
        Some(Commands::Run) | None => cli::run::run(&cli.global).await,
    }
}
