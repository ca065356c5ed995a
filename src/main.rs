//! # Playing With Fire Main Entry Point
//!
//! Runs a match headless: either as fast as possible, or paced in real time
//! with keyboard input read from stdin.

use clap::Parser;
use playing_with_fire::config::SIM_DT;
use playing_with_fire::{
    BehaviorKind, Engine, FireResult, FixedStepRunner, GameEvent, InputEvent, InputQueue,
};
use std::io::{BufRead, BufReader};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::time::{interval, Instant, MissedTickBehavior};

#[cfg(feature = "dev-tools")]
use tracing::{error, info, Level};

#[cfg(not(feature = "dev-tools"))]
use log::{error, info};

/// Command line arguments for Playing With Fire.
#[derive(Parser, Debug)]
#[command(name = "playing-with-fire")]
#[command(about = "Tile-based arena combat against a bomb-laying bot")]
#[command(version)]
struct Args {
    /// Random seed for arena generation and power-up drops
    #[arg(short, long)]
    seed: Option<u64>,

    /// Stop after this many simulated seconds even without a match winner
    #[arg(long, default_value_t = 300.0)]
    max_seconds: f64,

    /// Pace the simulation in real time and read w/a/s/d/x/b from stdin
    #[arg(long)]
    realtime: bool,

    /// Let the bot policy drive Player 1 as well
    #[arg(long)]
    autopilot: bool,

    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> FireResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Playing With Fire v{}", playing_with_fire::VERSION);

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("Generating arena with seed: {}", seed);
    let mut engine = Engine::standard_match(seed)?;

    if args.autopilot {
        let humans: Vec<_> = engine
            .players()
            .iter()
            .filter(|player| !player.is_autonomous())
            .map(|player| player.id)
            .collect();
        for id in humans {
            engine.set_behavior(id, Some(BehaviorKind::Chase));
        }
        info!("Autopilot enabled");
    }

    let mut runner = FixedStepRunner::new();
    if args.realtime {
        run_realtime(&args, &mut engine, &mut runner).await;
    } else {
        run_headless(&args, &mut engine, &mut runner);
    }

    report(&engine, &runner);
    if args.json {
        println!("{}", engine.state().to_json()?);
    }

    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> FireResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        let level = match level_filter(log_level) {
            log::LevelFilter::Error | log::LevelFilter::Off => Level::ERROR,
            log::LevelFilter::Warn => Level::WARN,
            log::LevelFilter::Info => Level::INFO,
            log::LevelFilter::Debug => Level::DEBUG,
            log::LevelFilter::Trace => Level::TRACE,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .filter_level(level_filter(log_level))
            .format_timestamp_millis()
            .init();
    }

    Ok(())
}

/// Maps a `--log-level` value to a filter, falling back to info.
fn level_filter(log_level: &str) -> log::LevelFilter {
    log_level
        .to_lowercase()
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info)
}

/// Runs ticks back to back until the match ends or the time limit is hit.
fn run_headless(args: &Args, engine: &mut Engine, runner: &mut FixedStepRunner) {
    while !engine.is_match_over() && runner.elapsed() < args.max_seconds {
        for event in runner.advance(engine, SIM_DT) {
            log_event(engine, &event);
        }
    }
}

/// Runs at wall-clock pace while a reader thread feeds stdin into the queue.
///
/// The reader thread is never joined. Returning from `main` ends the process
/// even while that thread is still blocked on stdin.
async fn run_realtime(args: &Args, engine: &mut Engine, runner: &mut FixedStepRunner) {
    info!("Real-time mode: w/a/s/d to run, x to stop, b to bomb, then Enter");
    let _reader = spawn_key_reader(BufReader::new(std::io::stdin()), engine.input_queue());

    let mut ticker = interval(Duration::from_secs_f64(SIM_DT));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last = Instant::now();

    while !engine.is_match_over() && runner.elapsed() < args.max_seconds {
        ticker.tick().await;
        let now = Instant::now();
        let frame_dt = now.duration_since(last).as_secs_f64();
        last = now;

        for event in runner.advance(engine, frame_dt) {
            log_event(engine, &event);
        }
    }
}

/// Pushes one event per recognized key on a plain thread until the reader closes.
fn spawn_key_reader<R>(reader: R, queue: InputQueue) -> JoinHandle<()>
where
    R: BufRead + Send + 'static,
{
    std::thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    for event in line.chars().filter_map(InputEvent::from_key) {
                        queue.push(event);
                    }
                }
                Err(err) => {
                    error!("Failed to read input: {}", err);
                    break;
                }
            }
        }
    })
}

fn log_event(engine: &Engine, event: &GameEvent) {
    let name_of = |id| {
        engine
            .player(id)
            .map_or_else(|| "unknown".to_string(), |player| player.name.clone())
    };

    match event {
        GameEvent::RoundWon { winner, round } => {
            println!("Round {} goes to {}", round, name_of(*winner));
        }
        GameEvent::MatchWon { winner } => {
            println!("{} wins the match!", name_of(*winner));
        }
        other => log::debug!("{:?}", other),
    }
}

fn report(engine: &Engine, runner: &FixedStepRunner) {
    println!(
        "Played {} ticks ({:.1}s simulated), round {}",
        runner.ticks(),
        runner.elapsed(),
        engine.round()
    );
    for player in engine.players() {
        println!("  {:<10} wins: {}  hp: {}", player.name, player.wins, player.hp);
    }
    if !engine.is_match_over() {
        println!("No match winner yet");
    }
}
