//! Identify stage simulator CLI.
//!
//! This binary runs the harness and reports the outcome. It performs:
//! 1. **Run:** Load the configuration, apply command-line overrides, simulate until the stimulus stops.
//! 2. **Report:** Print statistics and coverage; optionally write the VCD trace and JSON-lines observations.
//! 3. **Decode:** Classify and disassemble individual words without simulating.

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use identify_core::config::SourceConfig;
use identify_core::isa::disasm::disassemble;
use identify_core::{Config, Simulator, decode};

#[derive(Parser, Debug)]
#[command(
    name = "idsim",
    author,
    version,
    about = "Power ISA Identify stage simulator",
    long_about = "Drive the Identify stage with a clocked stimulus, observe its outputs and write a VCD trace.\n\nExamples:\n  idsim --cycles 500 --seed 42\n  idsim --words 0x4ce41421,0x4ce33182 --trace run.vcd\n  idsim decode 0x4ce41421"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON configuration file; built-in defaults otherwise.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of words to present.
    #[arg(long)]
    cycles: Option<u64>,

    /// Trace output path.
    #[arg(long, conflicts_with = "no_trace")]
    trace: Option<PathBuf>,

    /// Do not write a trace.
    #[arg(long)]
    no_trace: bool,

    /// Seed for the random instruction source.
    #[arg(long, conflicts_with = "words")]
    seed: Option<u64>,

    /// Fixed words to present instead of random ones (hex with 0x, or decimal).
    #[arg(long, value_delimiter = ',', value_parser = parse_word)]
    words: Option<Vec<u32>>,

    /// Write every observation as a JSON line to this file.
    #[arg(long)]
    events: Option<PathBuf>,

    /// Fail if the stimulus has not stopped by this time.
    #[arg(long)]
    max_time_ns: Option<u64>,

    /// More log output (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode and disassemble words without simulating.
    Decode {
        /// Words to decode (hex with 0x, or decimal).
        #[arg(required = true, value_parser = parse_word)]
        words: Vec<u32>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(Commands::Decode { words }) = &cli.command {
        cmd_decode(words);
        return;
    }

    let config = load_config(&cli).unwrap_or_else(|e| {
        eprintln!("[!] {} failed: {e}", e.component());
        process::exit(1);
    });
    cmd_run(&cli, &config);
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the configuration file, if any, and applies the command-line overrides.
fn load_config(cli: &Cli) -> Result<Config, identify_core::common::SimError> {
    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path)?;
            info!(path = %path.display(), "configuration loaded");
            config
        }
        None => Config::default(),
    };

    if let Some(cycles) = cli.cycles {
        config.stimulus.cycles = cycles;
    }
    if let Some(path) = &cli.trace {
        config.trace.enabled = true;
        config.trace.path.clone_from(path);
    }
    if cli.no_trace {
        config.trace.enabled = false;
    }
    if let Some(seed) = cli.seed {
        config.stimulus.source = SourceConfig::Random { seed };
    }
    if let Some(words) = &cli.words {
        if cli.cycles.is_none() {
            config.stimulus.cycles = words.len() as u64;
        }
        config.stimulus.source = SourceConfig::Fixed {
            words: words.clone(),
        };
    }
    if let Some(ns) = cli.max_time_ns {
        config.general.max_time_ps = Some(ns.saturating_mul(1000));
    }
    if cli.events.is_some() {
        config.general.keep_observations = true;
    }

    config.validate()?;
    Ok(config)
}

/// Runs the harness to completion, prints statistics, and exits with status 1 on failure.
fn cmd_run(cli: &Cli, config: &Config) {
    let mut sim = Simulator::new(config);

    println!("[*] Identify stage simulation");
    println!(
        "    clock {} ps  cycles {}  source {:?}",
        config.clock.period_ps, config.stimulus.cycles, config.stimulus.source
    );
    if config.trace.enabled {
        println!("    trace {}", config.trace.path.display());
        if let Err(e) = sim.open_trace(&config.trace.path) {
            eprintln!("[!] {} failed: {e}", e.component());
            process::exit(1);
        }
    }

    let result = sim.run();

    if let Some(path) = &cli.events {
        match sim.observer().export(path) {
            Ok(n) => println!("[*] {n} observations written to {}", path.display()),
            Err(e) => {
                eprintln!("[!] {} failed: {e}", e.component());
                process::exit(1);
            }
        }
    }

    match result {
        Ok(stats) => {
            println!("\n[*] Stopped at {}", sim.now());
            stats.print();
        }
        Err(e) => {
            eprintln!("\n[!] {} failed: {e}", e.component());
            sim.stats().print();
            process::exit(1);
        }
    }
}

/// Prints the classification and disassembly of each word.
fn cmd_decode(words: &[u32]) {
    for &word in words {
        let d = decode(word);
        println!(
            "{word:#010x}  {:<24} branch={} form={} cond={} condreg={} op={} prefixed={}",
            disassemble(word),
            d.branch_identified(),
            d.branch_form(),
            d.branch_condition(),
            d.condreg_identified(),
            d.condreg_op(),
            d.prefixed()
        );
    }
}

/// Parses `0x`-prefixed hex or decimal.
fn parse_word(s: &str) -> Result<u32, String> {
    let s = s.trim();
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid instruction word {s:?}: {e}"))
}
