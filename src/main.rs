//! Headless skirmish runner
//!
//! Plays a scenario with the enemy commander and, optionally, a second
//! commander on the player side, then prints a summary.

use clap::Parser;
use serde::Serialize;

use jelly_skirmish::ai::load_profile_or_default;
use jelly_skirmish::core::error::Result;
use jelly_skirmish::transit::ArrivalOutcome;
use jelly_skirmish::world::{load_scenario_or_default, GameEventType, GameState, Outcome};

#[derive(Parser, Debug)]
#[command(name = "jelly-skirmish")]
#[command(about = "Run a headless skirmish and report the result")]
struct Args {
    /// Scenario name (loaded from data/scenarios/)
    #[arg(long, default_value = "opening")]
    scenario: String,

    /// Enemy AI profile (loaded from data/ai_profiles/)
    #[arg(long, default_value = "default")]
    enemy_profile: String,

    /// Player AI profile, used with --autopilot
    #[arg(long, default_value = "default")]
    player_profile: String,

    /// Let a commander play the player side
    #[arg(long)]
    autopilot: bool,

    /// Frame length in milliseconds
    #[arg(long, default_value_t = 16.0)]
    dt_ms: f32,

    /// Maximum frames before the run is called undecided
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct RunSummary {
    scenario: String,
    outcome: Outcome,
    ticks: u64,
    seconds: f32,
    player_health: i32,
    enemy_health: i32,
    troops_sent: usize,
    captures: usize,
    spells_cast: usize,
    enemy_profile: String,
    player_profile: Option<String>,
    seed: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jelly_skirmish=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let scenario = load_scenario_or_default(&args.scenario);
    let enemy = load_profile_or_default(&args.enemy_profile);
    let enemy_name = enemy.name.clone();

    let mut state = GameState::from_scenario(&scenario, enemy, seed)?;
    if args.autopilot {
        state.enable_autopilot(load_profile_or_default(&args.player_profile));
    }

    let mut troops_sent = 0;
    let mut captures = 0;
    let mut spells_cast = 0;

    while state.outcome() == Outcome::Ongoing && state.tick() < args.max_ticks {
        let log = state.update(args.dt_ms);
        for event in log.iter() {
            tracing::trace!(tick = event.tick, "{}", event.description);
        }
        troops_sent += log.count_matching(|e| matches!(e, GameEventType::TroopSent { .. }));
        captures += log.count_matching(|e| {
            matches!(
                e,
                GameEventType::TroopArrived {
                    outcome: ArrivalOutcome::Captured { .. },
                    ..
                }
            )
        });
        spells_cast += log.count_matching(|e| matches!(e, GameEventType::SpellCast { .. }));
    }

    let (player_health, enemy_health) = state.total_health();
    let summary = RunSummary {
        scenario: scenario.name,
        outcome: state.outcome(),
        ticks: state.tick(),
        seconds: state.elapsed(),
        player_health,
        enemy_health,
        troops_sent,
        captures,
        spells_cast,
        enemy_profile: enemy_name,
        player_profile: state.player_ai().map(|ai| ai.profile().name.clone()),
        seed,
    };
    tracing::info!(outcome = ?summary.outcome, ticks = summary.ticks, "run finished");

    match args.format.as_str() {
        "text" => {
            println!("Skirmish Result");
            println!("===============");
            println!("Scenario: {}", summary.scenario);
            println!("Outcome: {:?}", summary.outcome);
            println!("Ticks: {} ({:.1}s)", summary.ticks, summary.seconds);
            println!("Health: player {} / enemy {}", summary.player_health, summary.enemy_health);
            println!(
                "Troops sent: {}, captures: {}, spells: {}",
                summary.troops_sent, summary.captures, summary.spells_cast
            );
            println!("Seed: {}", summary.seed);
        }
        other => {
            if other != "json" {
                eprintln!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
