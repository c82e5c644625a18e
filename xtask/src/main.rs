//! xtask - Development tasks for optional-rescheduler

use clap::{Parser, Subcommand};
use optional_rescheduler::config::Config;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for optional-rescheduler")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CLI documentation from clap definitions
    GenDocs,

    /// Write a config.toml populated with every default value
    SampleConfig {
        /// Output file
        #[arg(long, default_value = "docs/config.sample.toml")]
        out: PathBuf,
    },
}

fn main() {
    let args = Xtask::parse();
    match args.command {
        Commands::GenDocs => generate_cli_docs(),
        Commands::SampleConfig { out } => write_sample_config(&out),
    }
}

fn generate_cli_docs() {
    let markdown = clap_markdown::help_markdown::<optional_rescheduler::cli::Cli>();
    write_doc(&Path::new("docs/cli").join("reference.md"), &markdown);
}

fn write_sample_config(out: &Path) {
    let content =
        toml::to_string_pretty(&Config::default()).expect("Failed to serialize default config");
    write_doc(out, &content);
}

fn write_doc(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create output directory");
    }
    fs::write(path, content).expect("Failed to write output file");
    println!("Wrote {}", path.display());
}
