#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Energy Grid session.
//!
//! Placements run first, then upgrades, then removals, each in the order given.
//! The board is re-simulated after every accepted action.

mod render;
mod scores;
mod script;

use std::{
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{Context, Result};
use clap::Parser;
use energy_grid_core::Event;
use energy_grid_system_builder::{ActionPoints, Builder, BuilderInput, DEFAULT_ACTION_POINTS};
use energy_grid_system_propagation::{Propagation, PropagationEngine};
use energy_grid_system_scoring::{ScoreCalculator, DEFAULT_WASTE_PENALTY_RATE};
use energy_grid_world::{self as world, query, Board, BoardConfig};
use tracing::{debug, info, warn};

use self::script::Action;

/// Largest board edge accepted on the command line.
const MAX_BOARD_SIZE: i64 = 256;

/// Builds towers on a generated board and scores the resulting energy flow.
#[derive(Debug, Parser)]
#[command(name = "energy-grid", version)]
struct Args {
    /// Edge length of the square board.
    #[arg(
        long,
        default_value_t = 8,
        value_parser = clap::value_parser!(u32).range(1..=MAX_BOARD_SIZE)
    )]
    size: u32,
    /// Number of obstacles to scatter.
    #[arg(long, default_value_t = 10)]
    obstacles: usize,
    /// Seed for the obstacle layout; derived from the clock when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Actions available to the player.
    #[arg(long, default_value_t = DEFAULT_ACTION_POINTS)]
    action_points: u32,
    /// Fraction of wasted energy subtracted from the score.
    #[arg(long, default_value_t = DEFAULT_WASTE_PENALTY_RATE)]
    waste_penalty: f64,
    /// Tower to place, as a symbol or name followed by the cell.
    #[arg(long = "place", value_name = "KIND@X,Y", value_parser = script::parse_placement)]
    placements: Vec<Action>,
    /// Tower to upgrade.
    #[arg(long = "upgrade", value_name = "X,Y", value_parser = script::parse_upgrade)]
    upgrades: Vec<Action>,
    /// Tower to remove.
    #[arg(long = "remove", value_name = "X,Y", value_parser = script::parse_removal)]
    removals: Vec<Action>,
    /// Name recorded on the leaderboard.
    #[arg(long, default_value = "player")]
    player: String,
    /// JSON leaderboard to rank the score against; created when missing.
    #[arg(long, value_name = "PATH")]
    leaderboard: Option<PathBuf>,
    /// Print every beam segment after the board.
    #[arg(long)]
    trace: bool,
}

/// Entry point for the Energy Grid command-line interface.
fn main() -> Result<()> {
    init_tracing();
    run(Args::parse())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .with_writer(std::io::stderr)
            .init();
    }
}

fn run(args: Args) -> Result<()> {
    let config =
        BoardConfig::new(args.size, args.obstacles).context("invalid board configuration")?;
    let seed = match args.seed {
        Some(seed) => seed,
        None => unix_time()?,
    };
    let board = Board::seeded(config, seed);
    info!(
        seed,
        size = config.size(),
        obstacles = query::obstacles(&board).len(),
        "board generated"
    );

    let mut session = Session::new(board, Builder::new(ActionPoints::new(args.action_points)));
    let actions = args
        .placements
        .iter()
        .chain(&args.upgrades)
        .chain(&args.removals)
        .copied();
    for action in actions {
        session.perform(action);
    }

    let calculator = ScoreCalculator::new(args.waste_penalty);
    let report = session.propagation.report;
    let breakdown = calculator.breakdown(&report);

    print!("{}", render::draw_board(&query::board_view(&session.board)));
    println!();
    print!(
        "{}",
        render::summary(&breakdown, report.max_single_waste, report.total_output)
    );
    println!(
        "action points    {:>10}",
        session.builder.action_points().remaining()
    );
    if args.trace {
        println!();
        print!("{}", render::segments(&session.propagation.segments));
    }

    match &args.leaderboard {
        Some(path) => record_score(path, &args.player, breakdown.final_score)?,
        None => info!(player = %args.player, score = breakdown.final_score, "run finished"),
    }

    Ok(())
}

fn record_score(path: &Path, player: &str, score: f64) -> Result<()> {
    let mut leaderboard = scores::load(path)?;
    match leaderboard.submit(player, score, unix_time()?) {
        Some(rank) => {
            scores::save(path, &leaderboard)?;
            println!("leaderboard rank {rank:>10}");
            info!(player, rank, score, "score recorded");
        }
        None => info!(player, score, "score did not rank"),
    }
    Ok(())
}

fn unix_time() -> Result<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .context("system clock is set before the Unix epoch")
}

/// Board, builder and latest simulation of a running session.
struct Session {
    board: Board,
    builder: Builder,
    engine: PropagationEngine,
    propagation: Propagation,
}

impl Session {
    fn new(board: Board, builder: Builder) -> Self {
        let engine = PropagationEngine::new();
        let propagation = engine.simulate(&query::board_view(&board));
        Self {
            board,
            builder,
            engine,
            propagation,
        }
    }

    fn perform(&mut self, action: Action) {
        let input: BuilderInput = action.input();
        let mut commands = Vec::new();
        let board = &self.board;
        self.builder
            .handle(input, |cell| query::cell(board, cell), &mut commands);
        if commands.is_empty() {
            warn!(
                ?action,
                remaining = self.builder.action_points().remaining(),
                "action skipped"
            );
            return;
        }

        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut self.board, command, &mut events);
        }
        for event in &events {
            match event {
                Event::TowerPlacementRejected { cell, reason, .. } => {
                    warn!(%cell, ?reason, "placement rejected");
                }
                other => debug!(event = ?other, "board changed"),
            }
        }

        self.propagation = self.engine.simulate(&query::board_view(&self.board));
        let report = self.propagation.report;
        debug!(
            collected = report.collected,
            wasted = report.wasted,
            "board re-simulated"
        );
    }
}
