use std::time::Duration;

use blockfall_engine::{Game, PieceSeed};
use rand::Rng as _;

use crate::{command::play::app::PlayApp, tui::Tui};

mod app;
mod screen;

/// Default time between automatic drops.
const DEFAULT_DROP_INTERVAL_MS: u64 = 200;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (32 hex digits); random when omitted
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Milliseconds between automatic one-row drops
    #[clap(
        long,
        default_value_t = DEFAULT_DROP_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..),
    )]
    drop_interval_ms: u64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        drop_interval_ms,
    } = arg;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    log::info!("starting game with seed {seed}, drop interval {drop_interval_ms}ms");

    let mut app = PlayApp::new(
        Game::with_seed(seed),
        Duration::from_millis(*drop_interval_ms),
    );
    Tui::new().run(&mut app)?;

    log::info!("exiting with final score {}", app.score());
    Ok(())
}
