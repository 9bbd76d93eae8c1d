use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use anyhow::Context;
use clap::Parser;
use make24_core::*;
use web_time::{Instant, SystemTime, UNIX_EPOCH};

use command::{Command, HELP};
use countdown::{Countdown, Notice};

mod command;
mod countdown;
mod render;

#[derive(Parser, Debug)]
#[command(version, about = "Make 24 from four cards before the clock runs out", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Difficulty: easy, medium or hard, anything else plays medium
    #[arg(short, long)]
    level: Option<String>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file replacing the built-in difficulties and deck
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Everything the main loop reacts to, funneled through one channel so input
/// and clock ticks are handled strictly one after the other.
enum Event {
    Line(String),
    Closed,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(std::io::stderr)
        .init();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };
    let difficulty = Difficulty::from_level(args.level.as_deref());
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::debug!("seed: {}, difficulty: {}", seed, difficulty);

    let spec = config.difficulty(difficulty);
    println!("{} ({}), {}s per round. Type h for help.", spec.label, spec.description, spec.time_limit_secs);

    let mut session = Session::new(config, difficulty, seed);
    let mut round = session
        .next_round(Instant::now())
        .context("Could not deal the first round")?;
    show(&round, session.stats());

    let events = spawn_stdin_reader();
    let mut countdown = Countdown::new(&round);
    let mut next_poll = Instant::now() + TICK_INTERVAL;

    loop {
        let wait = next_poll.saturating_duration_since(Instant::now());
        let event = match events.recv_timeout(wait) {
            Ok(Event::Closed) | Err(RecvTimeoutError::Disconnected) => break,
            Ok(Event::Line(line)) => Some(line),
            Err(RecvTimeoutError::Timeout) => None,
        };

        // the clock always catches up before a command sees the round
        let now = Instant::now();
        match countdown.poll(&mut round, now) {
            Some(Notice::SecondsLeft(secs)) => println!("{secs}s left"),
            Some(Notice::TimeUp) => {
                println!("Time is up.");
                show(&round, session.stats());
            }
            None => {}
        }
        next_poll = now + TICK_INTERVAL;

        let Some(line) = event else {
            continue;
        };
        let Some(command) = Command::parse(&line) else {
            println!("Unknown command {:?}, type h for help", line.trim());
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{HELP}"),
            Command::Next if !round.is_finished() => {
                println!("Finish the round first, or c to check it");
            }
            Command::Next => {
                round = session
                    .next_round(Instant::now())
                    .context("Could not deal the next round")?;
                countdown.restart(&round);
                show(&round, session.stats());
            }
            command => {
                let outcome = apply(&mut round, command, now);
                let stats = session.record(outcome);
                if outcome.is_final() {
                    log::info!("Round {:?}, streak {}", round.state(), stats.streak);
                }
                if outcome.has_update() {
                    countdown.restart(&round);
                    show(&round, stats);
                }
            }
        }
    }

    let stats = session.leave();
    println!(
        "Played {} rounds, best streak {}",
        session.rounds_played(),
        stats.best_streak
    );
    Ok(())
}

fn apply(round: &mut Round, command: Command, now: Instant) -> MoveOutcome {
    match command {
        Command::Tap(index) => round.tap_card(index),
        Command::Operator(operator) => round.tap_operator(operator),
        Command::Undo => round.undo(),
        Command::Reset => round.reset(now),
        Command::Check => round.check(),
        Command::Next | Command::Help | Command::Quit => MoveOutcome::NoChange,
    }
}

fn show(round: &Round, stats: SessionStats) {
    println!("{}", render::hand(round));
    println!("{}", render::status(round, stats));
    if let Some(verdict) = render::verdict(round, stats) {
        println!("{verdict}  (n: next, r: retry, q: quit)");
    }
}

fn load_config(path: &Path) -> anyhow::Result<GameConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read config {}", path.display()))?;
    GameConfig::from_json(&json).with_context(|| format!("Invalid config {}", path.display()))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|since| since.as_nanos() as u64)
        .unwrap_or_default()
}

/// Reads stdin on its own thread; only the main thread ever touches the round.
fn spawn_stdin_reader() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if sender.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = sender.send(Event::Closed);
    });
    receiver
}
