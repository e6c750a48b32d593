use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use self::play::PlayArg;

mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(flatten)]
    log: LogArg,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, clap::Args)]
struct LogArg {
    /// Write engine and UI logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Minimum level written to the log file
    #[arg(long, global = true, env = "BLOCKFALL_LOG", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();

    // The terminal belongs to the TUI, so logs only go to a file.
    if let Some(path) = &args.log.log_file {
        crate::logger::init(path, args.log.log_level)?;
    }

    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}
