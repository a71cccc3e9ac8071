//! Battle balance simulator CLI.
//!
//! Run Monte Carlo simulations to compare archetypes.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 200 runs per class
//!   cargo run --bin simulate -- -n 50 -b 100      # 50 runs of 100 battles
//!   cargo run --bin simulate -- --seed 42 -c techie

use cyberbattle::build_info;
use cyberbattle::simulator::{run_simulation, SimConfig};
use cyberbattle::Archetype;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    // Library logs go to stderr; RUST_LOG narrows or widens them
    let default_level = if config.verbosity >= 2 {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_writer(std::io::stderr)
        .init();

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              CYBERBATTLE BALANCE SIMULATOR                    ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!("  Build:          {}", build_info::version_line());
    println!();
    println!("Configuration:");
    println!("  Runs:           {}", config.num_runs);
    println!("  Battles/Run:    {}", config.battles_per_run);
    println!("  Max Rounds:     {}", config.max_rounds_per_battle);
    println!(
        "  Classes:        {}",
        config
            .archetypes
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  Bosses:         {}", config.challenge_bosses);
    if let Some(seed) = config.seed {
        println!("  Seed:           {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    if config.verbosity >= 1 {
        println!("{}", report.to_text());
    }

    // Optionally save JSON report
    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, json)?;
        println!("JSON report saved to: {}", filename);
    }
    Ok(())
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(200);
                    i += 1;
                }
            }
            "-b" | "--battles" => {
                if i + 1 < args.len() {
                    config.battles_per_run = args[i + 1].parse().unwrap_or(60);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-c" | "--class" => {
                if i + 1 < args.len() {
                    match parse_archetype(&args[i + 1]) {
                        Some(archetype) => config.archetypes = vec![archetype],
                        None => eprintln!("Unknown class '{}', simulating all", args[i + 1]),
                    }
                    i += 1;
                }
            }
            "-r" | "--max-rounds" => {
                if i + 1 < args.len() {
                    config.max_rounds_per_battle = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "--no-bosses" => {
                config.challenge_bosses = false;
            }
            "-q" | "--quiet" => {
                config.verbosity = 0;
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig::quick_balance_check();
            }
            "--full" => {
                config = SimConfig::full_ladder();
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn parse_archetype(name: &str) -> Option<Archetype> {
    let wanted = name.to_lowercase().replace(['-', '_', ' '], "");
    Archetype::all().into_iter().find(|a| {
        let full = a.name().to_lowercase().replace(' ', "");
        full == wanted || (wanted == "samurai" && *a == Archetype::StreetSamurai)
    })
}

fn print_help() {
    println!("Cyberbattle Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Runs per class (default: 200)");
    println!("    -b, --battles <B>     Battles per run (default: 60)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -c, --class <C>       Only simulate netrunner, samurai or techie");
    println!("    -r, --max-rounds <R>  Rounds before a battle times out (default: 100)");
    println!("    --no-bosses           Never challenge bosses");
    println!("    -q, --quiet           Skip the text report");
    println!("    -v, --verbose         Per-run lines and debug logs");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick test (25 runs of 20 battles)");
    println!("    --full                Long runs aimed at the whole boss ladder");
    println!("    -h, --help            Show this help");
    println!();
    println!("CLASSES:");
    for archetype in Archetype::all() {
        println!("    {:<16}{}", archetype.name(), archetype.description());
    }
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                      # Default run");
    println!("    cargo run --bin simulate -- -n 50 -b 100      # 50 runs of 100 battles");
    println!("    cargo run --bin simulate -- --seed 42         # Reproducible");
    println!("    cargo run --bin simulate -- -c samurai --full # One class, full ladder");
}
