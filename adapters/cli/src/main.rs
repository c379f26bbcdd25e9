#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Tank Arena stage headlessly.

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tank_arena_core::{Key, Services, SoundId, SoundLog, StageDescriptor, Tunables};
use tank_arena_system_bootstrap::{Game, Outcome};
use tank_arena_world::query;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Runs a stage without a display and reports how it went.
#[derive(Debug, Parser)]
#[command(name = "tank-arena", about = "Headless Tank Arena stage runner")]
struct Cli {
    /// Stage descriptor in TOML. Defaults to the built-in stage.
    #[arg(long)]
    stage: Option<PathBuf>,
    /// Tunables in TOML. Omitted fields keep their defaults.
    #[arg(long)]
    tunables: Option<PathBuf>,
    /// Ticks to simulate unless the stage ends first.
    #[arg(long, default_value_t = 3000)]
    ticks: u64,
    /// Seed for the enemy AI and power-up rolls.
    #[arg(long)]
    seed: Option<u64>,
    /// Press fire every this many ticks.
    #[arg(long)]
    fire_every: Option<u64>,
}

/// Entry point for the Tank Arena command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let stage: StageDescriptor = config::load_or_default(cli.stage.as_deref())?;
    let mut tunables: Tunables = config::load_or_default(cli.tunables.as_deref())?;
    if let Some(seed) = cli.seed {
        tunables.ai.seed = seed;
        tunables.power_up_seed = seed;
    }

    let sounds = SoundLog::new();
    let services = Services::headless().with_sound(Box::new(sounds.clone()));
    let mut game = Game::new(services, tunables, &stage).context("failed to set up the stage")?;
    println!("{}", game.welcome_banner());

    let fire_every = cli.fire_every.filter(|every| *every > 0);
    let mut ticks = 0;
    while ticks < cli.ticks && game.outcome().is_none() {
        if let Some(every) = fire_every {
            if ticks % every == 0 {
                game.press(Key::Fire);
                game.release(Key::Fire);
            }
        }
        game.tick();
        ticks += 1;
    }
    info!(ticks, "simulation stopped");

    let ledger = game.ledger();
    println!("ticks:       {}", query::tick(game.world()));
    println!("outcome:     {}", describe(&game));
    println!("score:       {}", ledger.score());
    println!("lives:       {}", ledger.lives());
    println!("kills:       {}", ledger.total_kills());
    println!("entities:    {}", query::entity_count(game.world()));
    println!("enemies:     {}", game.enemies_left());
    println!(
        "explosions:  {}",
        sounds.count(SoundId::TankExplosion) + sounds.count(SoundId::BaseExplosion)
    );

    game.finish();
    Ok(())
}

fn describe(game: &Game) -> &'static str {
    match game.outcome() {
        Some(Outcome::Victory) => "victory",
        Some(Outcome::Defeat) => "defeat",
        None => "undecided",
    }
}
