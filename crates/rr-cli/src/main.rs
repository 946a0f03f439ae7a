//! RuneReels terminal front end
//!
//! Usage:
//!   rune-reels play                     - Interactive play
//!   rune-reels auto --spins 100         - Headless auto-spin
//!   rune-reels rtp --simulate 1000000   - Exact return of the game tables
//!
//! Global options: --timing, --speed, --seed, --config, --trace

mod input;
mod presenter;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;

use rr_slot::rules::REEL_COUNT;
use rr_slot::{
    Command, GameState, PayoutTable, SessionConfig, SessionStats, SlotMachine, SlotSession,
    Symbol, TimingProfile, WeightTable, simulate, theoretical_return,
};
use rr_stage::StageTrace;

use crate::presenter::Verbosity;

#[derive(Parser)]
#[command(name = "rune-reels", about = "RuneReels terminal slot machine", version)]
struct Cli {
    /// Timing profile (overrides the config file)
    #[arg(long, value_enum, global = true)]
    timing: Option<TimingArg>,

    /// Scale every delay by this factor (0.5 = twice as fast)
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// RNG seed for a reproducible session
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Session config file (.json, .yaml, .yml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write every stage event to this JSON file
    #[arg(long, global = true)]
    trace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively from the keyboard
    Play,
    /// Auto-spin without input until the spins or the balance run out
    Auto {
        /// Maximum number of spins
        #[arg(short, long, default_value_t = 100)]
        spins: u64,

        /// Print every stage instead of one line per spin
        #[arg(short, long, conflicts_with = "quiet")]
        verbose: bool,

        /// Print only the final summary
        #[arg(short, long)]
        quiet: bool,
    },
    /// Print the exact return to player of the game tables
    Rtp {
        /// Also simulate this many spins
        #[arg(long)]
        simulate: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum TimingArg {
    Normal,
    Turbo,
    Instant,
}

impl From<TimingArg> for TimingProfile {
    fn from(arg: TimingArg) -> Self {
        match arg {
            TimingArg::Normal => TimingProfile::Normal,
            TimingArg::Turbo => TimingProfile::Turbo,
            TimingArg::Instant => TimingProfile::Instant,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = session_config(&cli)?;
    log::info!("Starting RuneReels with {:?} timing", config.timing_profile);

    match cli.command {
        Commands::Play => play(config, cli.speed, cli.trace).await,
        Commands::Auto {
            spins,
            verbose,
            quiet,
        } => {
            let verbosity = if quiet {
                Verbosity::Silent
            } else if verbose {
                Verbosity::Full
            } else {
                Verbosity::Outcomes
            };
            auto(config, cli.speed, spins, verbosity, cli.trace).await
        }
        Commands::Rtp { simulate } => {
            if cli.trace.is_some() {
                log::warn!("--trace has no effect on rtp");
            }
            report_return(&config, simulate);
            Ok(())
        }
    }
}

fn session_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if let Some(timing) = cli.timing {
        config.timing_profile = timing.into();
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

fn new_machine(config: SessionConfig, speed: Option<f64>) -> SlotMachine {
    let machine = SlotMachine::new(config);
    match speed {
        Some(factor) => {
            let timing = machine.timing().scaled(factor);
            machine.with_timing(timing)
        }
        None => machine,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODES
// ═══════════════════════════════════════════════════════════════════════════════

async fn play(
    config: SessionConfig,
    speed: Option<f64>,
    trace_path: Option<PathBuf>,
) -> Result<()> {
    let trace = trace_path.as_ref().map(|_| new_trace("play", &config));
    let machine = new_machine(config, speed);

    println!("RuneReels");
    for symbol in Symbol::ALL {
        println!(
            "  {:<7} weight {:>2}  pays {:>2}x  {}",
            symbol.name(),
            machine.weights().weight(symbol),
            machine.payouts().payout(symbol),
            machine.symbol_image(symbol)
        );
    }
    let snapshot = machine.handle().snapshot();
    println!("Balance: {}  Bet: {}", snapshot.balance, snapshot.bet);
    println!("{}", input::HELP);

    let (session, handle) = SlotSession::new(machine);
    let presenter = tokio::spawn(presenter::run(
        handle.slot().subscribe(),
        Verbosity::Full,
        trace,
    ));
    let session_task = tokio::spawn(session.run());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    'input: while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        for command in input::parse_line(&line) {
            if command == Command::Shutdown || !handle.send(command).await {
                break 'input;
            }
        }
    }

    handle.shutdown().await;
    let machine = session_task.await.context("Session task failed")?;
    print_summary(machine.stats(), machine.state());

    drop(handle);
    drop(machine);
    finish_trace(presenter, trace_path.as_deref()).await
}

async fn auto(
    config: SessionConfig,
    speed: Option<f64>,
    spins: u64,
    verbosity: Verbosity,
    trace_path: Option<PathBuf>,
) -> Result<()> {
    let trace = trace_path
        .as_ref()
        .map(|_| new_trace("auto", &config).with_metadata("spin_limit", spins.into()));
    let mut machine = new_machine(config, speed);
    log::info!(
        "Auto spin: up to {} spins, {:?} per cascade",
        spins,
        machine.timing().total_spin_duration(REEL_COUNT)
    );

    let presenter = tokio::spawn(presenter::run(machine.subscribe(), verbosity, trace));

    let handle = machine.handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("Interrupted, finishing the current spin");
            handle.set_auto_spin(false);
        }
    });

    let played = machine.start_auto_spin_for(spins).await;
    interrupt.abort();
    let _ = interrupt.await;

    println!("Auto spin played {} of {} spins", played, spins);
    print_summary(machine.stats(), machine.state());

    drop(machine);
    finish_trace(presenter, trace_path.as_deref()).await
}

fn report_return(config: &SessionConfig, spins: Option<u64>) {
    let weights = WeightTable::standard();
    let payouts = PayoutTable::standard();
    let profile = theoretical_return(&weights, &payouts, REEL_COUNT);

    println!("Middle rows enumerated: {}", profile.combinations);
    println!(
        "{:<8} {:>6} {:>5} {:>9} {:>9}",
        "symbol", "weight", "pays", "hit %", "return %"
    );
    for entry in &profile.by_symbol {
        println!(
            "{:<8} {:>6} {:>5} {:>9.4} {:>9.4}",
            entry.symbol.name(),
            weights.weight(entry.symbol),
            payouts.payout(entry.symbol),
            entry.hit_probability * 100.0,
            entry.rtp_contribution * 100.0
        );
    }
    println!(
        "RTP {:.4}%  house edge {:.4}%  hit rate {:.4}%  max win {}x bet",
        profile.rtp * 100.0,
        profile.house_edge() * 100.0,
        profile.hit_rate * 100.0,
        profile.max_multiplier
    );

    if let Some(spins) = spins {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let stats = simulate(&weights, &payouts, REEL_COUNT, spins, 1, &mut rng);
        println!(
            "Simulated {} spins: RTP {:.4}%  hit rate {:.4}%  biggest win {}x",
            stats.total_spins,
            stats.rtp() * 100.0,
            stats.hit_rate() * 100.0,
            stats.biggest_win
        );
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

fn print_summary(stats: &SessionStats, state: &GameState) {
    println!();
    println!(
        "Spins: {} (skipped {}, rejected {})",
        stats.total_spins, stats.skipped_spins, stats.rejected_spins
    );
    println!(
        "Wagered: {}  Won: {}  Net: {:+}",
        stats.total_bet,
        stats.total_win,
        stats.net()
    );
    println!(
        "RTP: {:.2}%  Hit rate: {:.2}%  Biggest win: {}",
        stats.rtp() * 100.0,
        stats.hit_rate() * 100.0,
        stats.biggest_win
    );
    println!("Final balance: {}", state.balance);
}

fn new_trace(mode: &str, config: &SessionConfig) -> StageTrace {
    let trace_id = format!("{}-{}", mode, chrono::Utc::now().format("%Y%m%d-%H%M%S"));
    StageTrace::new(trace_id, "rune-reels")
        .with_metadata("mode", mode.into())
        .with_metadata("timing", format!("{:?}", config.timing_profile).into())
        .with_metadata("seed", config.seed.into())
}

async fn finish_trace(
    presenter: JoinHandle<Option<StageTrace>>,
    path: Option<&Path>,
) -> Result<()> {
    let trace = presenter.await.context("Presenter task failed")?;
    let (Some(trace), Some(path)) = (trace, path) else {
        return Ok(());
    };

    let validation = trace.validate(REEL_COUNT as u8);
    for warning in validation.warnings() {
        log::warn!("Trace: {}", warning);
    }

    let json = serde_json::to_string_pretty(&trace).context("Failed to serialize trace")?;
    fs::write(path, json).with_context(|| format!("Failed to write trace {}", path.display()))?;
    println!("Trace written to {}", path.display());
    for line in presenter::describe_trace(&trace) {
        println!("{}", line);
    }
    Ok(())
}
