// Colony Soak Runner: seeded headless runs under Poisson buy traffic,
// checking the simulation invariants on every frame.
//
// Usage:
//   cargo run --release --bin soak                        # 10 runs, 120 s each
//   cargo run --release --bin soak -- --runs 3            # Quick mode
//   cargo run --release --bin soak -- --seconds 600       # Longer soak
//   cargo run --release --bin soak -- --buy-rate 4        # Buys per second
//   cargo run --release --bin soak -- --seed 42 --json    # JSON summary on stdout
//   cargo run --release --bin soak -- --runs 1 --verbose  # Engine log on stderr (RUST_LOG overrides)

mod report;
mod traffic;

use colony_engine::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use report::*;
use std::time::Instant;
use traffic::{BuyTraffic, Stimulus};

/// Frame length the runner drives the simulation with.
const FRAME_DT: f64 = 1.0 / 60.0;

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    runs: usize,
    seconds: f64,
    seed: u64,
    buy_rate: f64,
    json: bool,
    verbose: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        runs: 10,
        seconds: 120.0,
        seed: 0,
        buy_rate: 2.0,
        json: false,
        verbose: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                if i < args.len() {
                    cli.runs = args[i].parse().unwrap_or(10);
                }
            }
            "--seconds" => {
                i += 1;
                if i < args.len() {
                    cli.seconds = args[i].parse().unwrap_or(120.0);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(0);
                }
            }
            "--buy-rate" => {
                i += 1;
                if i < args.len() {
                    cli.buy_rate = args[i].parse().unwrap_or(2.0);
                }
            }
            "--json" => {
                cli.json = true;
            }
            "--verbose" | "-v" => {
                cli.verbose = true;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

// ─── Single run ─────────────────────────────────────────────────────────────

fn run_once(seed: u64, seconds: f64, buy_rate: f64) -> RunReport {
    let start = Instant::now();
    let mut sim = ColonySimulation::new(seed);
    let mut traffic = BuyTraffic::new(ChaCha8Rng::seed_from_u64(seed ^ 0x5eed), buy_rate);
    let mut checker = InvariantChecker::new();

    let frames = (seconds / FRAME_DT).ceil() as u64;
    for _ in 0..frames {
        for stimulus in traffic.frame(FRAME_DT) {
            match stimulus {
                Stimulus::Buy(intensity) => {
                    if let Err(e) = sim.apply_buy(intensity) {
                        checker.violations.push(format!("buy rejected: {}", e));
                    }
                }
                Stimulus::ForceMutation => {
                    sim.force_mutation();
                }
            }
        }
        sim.tick_core(FRAME_DT);
        checker.check(&sim);
    }

    let stats = sim.stats();
    RunReport {
        seed,
        pass: checker.violations.is_empty(),
        frames,
        sim_seconds: stats.sim_time,
        buys: traffic.buy_count,
        forced_mutations: traffic.force_count,
        final_market_cap: stats.market_cap,
        final_nutrients: stats.nutrients,
        colonies: stats.colony_count,
        worms: stats.worm_count,
        mutations: stats.mutation_count,
        violations: checker.violations,
        elapsed_ms: start.elapsed().as_millis(),
    }
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Stderr)
            .init();
    }

    if !cli.json {
        println!("\n  Colony Soak Runner");
        println!(
            "  PRNG: ChaCha8Rng | Runs: {} | Seconds/run: {} | Buys/s: {} | Base seed: {}\n",
            cli.runs, cli.seconds, cli.buy_rate, cli.seed
        );
        println!(
            "  {:<8} {:>6} {:>12} {:>9} {:>6} {:>9} {:>8}  {}",
            "Seed", "Buys", "MarketCap", "Colonies", "Worms", "Mutations", "Time", "Status"
        );
        println!("  {}", "-".repeat(76));
    }

    let mut reports = Vec::with_capacity(cli.runs);
    for run in 0..cli.runs {
        let report = run_once(cli.seed + run as u64, cli.seconds, cli.buy_rate);
        if !cli.json {
            println!(
                "  {:<8} {:>6} {:>12.0} {:>9} {:>6} {:>9} {:>6}ms  {}",
                report.seed,
                report.buys,
                report.final_market_cap,
                report.colonies,
                report.worms,
                report.mutations,
                report.elapsed_ms,
                if report.pass { "PASS" } else { "FAIL" },
            );
            for v in &report.violations {
                println!("      {}", v);
            }
        }
        reports.push(report);
    }

    let passed = reports.iter().filter(|r| r.pass).count();
    let failed = reports.len() - passed;
    let summary = SoakSummary {
        runs: reports.len(),
        passed,
        failed,
        seconds_per_run: cli.seconds,
        reports,
    };

    if cli.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize summary: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        println!("  {}", "-".repeat(76));
        println!("  Total: {}  Passed: {}  Failed: {}\n", summary.runs, summary.passed, summary.failed);
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
