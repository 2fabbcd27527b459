use std::path::PathBuf;

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};

type Error = anyhow::Error;

const MAN_DIR: &str = "docs/man";

#[derive(Debug, Parser)]
#[command(author, version)]
#[command(max_term_width = 80)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    #[command(name = "manpages")]
    #[command(about = "Generate the manpages.")]
    GenManpages,
}

fn main() -> Result<(), Error> {
    let args = Cli::parse();
    match args.command {
        Command::GenManpages => generate_manpages(),
    }
}

fn generate_manpages() -> Result<(), Error> {
    let cmd = rtc::cli::Cli::command();

    // Generate into a tempdir first so a failure doesn't leave a partial
    // docs tree behind.
    let tempdir = tempfile::tempdir().context("failed to create tempdir")?;
    clap_mangen::generate_to(cmd, tempdir.path()).context("failed to generate manpages")?;

    let output_dir = std::env::current_dir()
        .context("failed to get current directory")?
        .join(MAN_DIR);
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create {}", output_dir.display()))?;

    for dir_entry in std::fs::read_dir(tempdir.path()).context("couldn't read tempdir")? {
        let dir_entry = dir_entry.context("couldn't access dir entry")?;
        let file_name: PathBuf = dir_entry.file_name().into();
        std::fs::copy(dir_entry.path(), output_dir.join(&file_name))
            .with_context(|| format!("failed to copy {}", file_name.display()))?;
    }

    Ok(())
}
