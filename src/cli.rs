use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use ptorzot::enumerator::SequenceCache;
use ptorzot::enumerator::constants::{MAX_OPERANDS, MIN_OPERANDS};
use ptorzot::query::handle_query;
use ptorzot::{Drill, MatchPolicy, Solver, SolverConfig, render_expression, render_trace};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Log level for the application
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_log_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Ptorzot - Combine a handful of numbers pairwise into a target
#[derive(Parser, Debug)]
#[command(name = "ptorzot")]
#[command(about = "Find a sequence of pairwise arithmetic steps that turns numbers into a target")]
#[command(version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Location of the sequence cache (default: next to the executable)
    #[arg(long, global = true, conflicts_with = "no_cache")]
    pub cache_path: Option<PathBuf>,

    /// Keep the sequence cache in memory only
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Compare results with exact equality instead of a small tolerance
    #[arg(long, global = true)]
    pub exact: bool,

    /// Log level (default: warn)
    #[arg(short, long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Solve a puzzle given on the command line
    Solve {
        /// Target value to reach
        #[arg(short, long, allow_negative_numbers = true)]
        target: f64,

        /// Numbers to combine (2 to 5)
        #[arg(required = true, allow_negative_numbers = true)]
        numbers: Vec<f64>,
    },
    /// Roll a random dice puzzle and solve it
    Drill {
        /// Seed for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Answer a lookup query string such as "numbers=1,2,3&target=6"
    Query {
        query: String,
    },
    /// Recompute the sequence cache and write it to disk
    Cache,
}

/// Initialize logging based on the provided log level
pub fn init_logging(log_level: &LogLevel) -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log_level.to_log_level_filter())
        .try_init()
        .context("Failed to initialize logging")?;
    Ok(())
}

fn solver_config(args: &CliArgs) -> SolverConfig {
    let policy = if args.exact {
        MatchPolicy::Exact
    } else {
        MatchPolicy::default()
    };
    SolverConfig { policy }
}

fn cache_path(args: &CliArgs) -> Result<PathBuf> {
    match &args.cache_path {
        Some(path) => Ok(path.clone()),
        None => SequenceCache::default_path().context("Cannot locate the default cache file"),
    }
}

fn build_solver(args: &CliArgs) -> Result<Solver> {
    let config = solver_config(args);
    if args.no_cache {
        info!("Using an in-memory sequence cache");
        return Ok(Solver::in_memory(config));
    }
    match &args.cache_path {
        Some(path) => Ok(Solver::with_cache_file(path, config)),
        None => Solver::with_default_cache(config).context("Cannot locate the default cache file"),
    }
}

fn validate_operand_count(count: usize) -> Result<()> {
    if !(MIN_OPERANDS..=MAX_OPERANDS).contains(&count) {
        bail!(
            "Expected between {} and {} numbers, got {}",
            MIN_OPERANDS,
            MAX_OPERANDS,
            count
        );
    }
    Ok(())
}

fn format_numbers(numbers: &[f64]) -> String {
    let items: Vec<String> = numbers.iter().map(|n| n.to_string()).collect();
    format!("[{}]", items.join(", "))
}

fn solve_and_print(solver: &Solver, numbers: &[f64], target: f64) -> Result<()> {
    println!("Reach {} from {}", target, format_numbers(numbers));

    match solver.find_result(numbers, target)? {
        Some(sequence) => {
            for line in render_trace(numbers, &sequence)? {
                println!("{}", line);
            }
            println!("Raw result: {}", sequence);
            println!("{} = {}", render_expression(numbers, &sequence)?, target);
        }
        None => {
            warn!("No matching sequence found");
            println!("No result");
        }
    }
    Ok(())
}

/// Run the main application logic
pub fn run() -> Result<()> {
    let args = CliArgs::parse();

    init_logging(&args.log_level)?;

    match &args.command {
        Command::Solve { target, numbers } => {
            validate_operand_count(numbers.len()).context("Invalid numbers")?;
            let solver = build_solver(&args)?;
            solve_and_print(&solver, numbers, *target)
        }
        Command::Drill { seed } => {
            let drill = match seed {
                Some(seed) => Drill::random(&mut StdRng::seed_from_u64(*seed)),
                None => Drill::random(&mut rand::rng()),
            };
            let solver = build_solver(&args)?;
            solve_and_print(&solver, &drill.operands(), drill.target as f64)
        }
        Command::Query { query } => {
            let solver = build_solver(&args)?;
            let response = handle_query(&solver, query);
            println!("{} {}", response.status, response.content_type);
            println!("{}", response.body);
            Ok(())
        }
        Command::Cache => {
            let path = cache_path(&args)?;
            let cache = SequenceCache::compute();
            cache
                .store(&path)
                .with_context(|| format!("Failed to store cache in {}", path.display()))?;
            for count in cache.operand_counts() {
                let size = cache.cached(count).map_or(0, |set| set.len());
                println!("{} operands: {} sequences", count, size);
            }
            println!("Stored cache in {}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve_command() {
        let args = CliArgs::try_parse_from(["ptorzot", "solve", "--target", "25", "5", "5", "5"]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(!args.exact);
            assert!(matches!(
                args.command,
                Command::Solve { target, ref numbers } if target == 25.0 && numbers.len() == 3
            ));
        }
    }

    #[test]
    fn test_parse_negative_numbers() {
        let args = CliArgs::try_parse_from(["ptorzot", "solve", "-t", "-3", "2", "-5"]);
        assert!(matches!(
            args,
            Ok(CliArgs { command: Command::Solve { target, ref numbers }, .. })
                if target == -3.0 && *numbers == vec![2.0, -5.0]
        ));
    }

    #[test]
    fn test_parse_global_flags() {
        let args = CliArgs::try_parse_from([
            "ptorzot",
            "drill",
            "--seed",
            "9",
            "--exact",
            "--no-cache",
            "--log-level",
            "debug",
        ]);
        assert!(args.is_ok());
        if let Ok(args) = args {
            assert!(args.exact);
            assert!(args.no_cache);
            assert!(matches!(args.log_level, LogLevel::Debug));
            assert!(matches!(args.command, Command::Drill { seed: Some(9) }));
            assert_eq!(solver_config(&args).policy, MatchPolicy::Exact);
        }
    }

    #[test]
    fn test_cache_path_conflicts_with_no_cache() {
        let args = CliArgs::try_parse_from([
            "ptorzot",
            "--no-cache",
            "--cache-path",
            "/tmp/ops.cache",
            "cache",
        ]);
        assert!(args.is_err());
    }

    #[test]
    fn test_validate_operand_count() {
        assert!(validate_operand_count(1).is_err());
        assert!(validate_operand_count(2).is_ok());
        assert!(validate_operand_count(5).is_ok());
        assert!(validate_operand_count(6).is_err());
    }

    #[test]
    fn test_format_numbers() {
        assert_eq!(format_numbers(&[1.0, 2.5, -3.0]), "[1, 2.5, -3]");
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Error.to_log_level_filter(),
            log::LevelFilter::Error
        );
        assert_eq!(LogLevel::Warn.to_log_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_log_level_filter(), log::LevelFilter::Info);
        assert_eq!(
            LogLevel::Debug.to_log_level_filter(),
            log::LevelFilter::Debug
        );
        assert_eq!(
            LogLevel::Trace.to_log_level_filter(),
            log::LevelFilter::Trace
        );
    }
}
