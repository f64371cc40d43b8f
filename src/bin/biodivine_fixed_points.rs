use biodivine_algo_asp_fixed_points::decoder::FixedPoint;
use biodivine_algo_asp_fixed_points::fixed_points::{
    FixedPointConfig, FixedPointError, FixedPointResult, FixedPoints, InconsistencyPolicy,
};
use biodivine_algo_asp_fixed_points::network::PlaceTable;
use biodivine_algo_asp_fixed_points::program::Encoding;
use biodivine_algo_asp_fixed_points::solver::Clingo;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "biodivine_fixed_points")]
#[command(about = "Compute fixed points of a Boolean network using answer set programming")]
struct Args {
    /// Path to a Boolean network file (.bnet, .aeon, etc.)
    #[arg(value_name = "FILE")]
    file: String,

    /// Maximal number of solver answers (0 = all)
    #[arg(long, short = 'm', default_value_t = 0, require_equals = true)]
    max: usize,

    /// Solver time limit in seconds (0 = unlimited)
    #[arg(long, short = 't', default_value_t = 0, require_equals = true)]
    time: u64,

    /// Encoding of the logic program
    #[arg(long, short = 'e', default_value = "conj", require_equals = true)]
    encoding: EncodingArg,

    /// Only print the number of fixed points
    #[arg(long)]
    count: bool,

    /// Path to the clingo executable
    #[arg(long, default_value = "clingo", require_equals = true)]
    clingo: String,

    /// What to do with solver answers that do not describe a network state
    #[arg(long, default_value = "abort", require_equals = true)]
    on_inconsistency: PolicyArg,

    /// Cancel the whole computation after the given number of seconds
    #[arg(long, value_name = "SECONDS", require_equals = true)]
    wall_time: Option<u64>,

    /// Logging verbosity (use -v for info, or -v=LEVEL for specific level)
    #[arg(long, short = 'v', value_name = "LEVEL", num_args = 0..=1, default_missing_value = "info", require_equals = true)]
    verbose: Option<Option<LogLevel>>,
}

#[derive(Clone, clap::ValueEnum)]
enum EncodingArg {
    Conj,
    Disj,
    Source,
}

#[derive(Clone, clap::ValueEnum)]
enum PolicyArg {
    Abort,
    Skip,
}

#[derive(Clone, clap::ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
}

impl From<EncodingArg> for Encoding {
    fn from(value: EncodingArg) -> Self {
        match value {
            EncodingArg::Conj => Encoding::Conjunctive,
            EncodingArg::Disj => Encoding::Disjunctive,
            EncodingArg::Source => Encoding::Source,
        }
    }
}

impl From<PolicyArg> for InconsistencyPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::Abort => InconsistencyPolicy::Abort,
            PolicyArg::Skip => InconsistencyPolicy::Skip,
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => LevelFilter::Trace,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
        }
    }
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        None => LevelFilter::Off,
        Some(None) => LevelFilter::Info,
        Some(Some(level)) => level.into(),
    };
    Builder::from_default_env().filter_level(log_level).init();

    let places = PlaceTable::try_from_file(&args.file).unwrap_or_else(|e| {
        eprintln!("Failed to load BN file {}: {}", args.file, e);
        std::process::exit(1);
    });

    println!(
        "# Loaded BN with {} variables ({} sources).",
        places.num_vars(),
        places.sources().len()
    );

    let config = FixedPointConfig::new(args.encoding.into())
        .with_max_results(args.max)
        .with_time_limit(args.time)
        .with_inconsistency(args.on_inconsistency.into());
    let solver = Clingo::with_executable(&args.clingo);

    let start = Instant::now();
    let result = match args.wall_time {
        None => FixedPoints::compute(&places, &config, &solver),
        Some(seconds) => cancel_this::on_timeout(Duration::from_secs(seconds), || {
            Ok(FixedPoints::compute(&places, &config, &solver))
        })
        .unwrap_or_else(|cancelled| Err(FixedPointError::Cancelled(cancelled))),
    };
    let result = result.unwrap_or_else(|e| {
        eprintln!("Fixed-point computation failed: {}", e);
        std::process::exit(1);
    });
    println!("# ASP time = {:.3}s", start.elapsed().as_secs_f64());

    match &result {
        FixedPointResult::Enumerated { fixed_points, .. } => {
            if args.count {
                println!("{}", fixed_points.len());
            } else if fixed_points.is_empty() {
                println!("There are no fixed points.");
            } else {
                for fixed_point in fixed_points {
                    println!("{}", fixed_point);
                }
            }
        }
        FixedPointResult::Aggregated {
            witnesses,
            decoder,
            aggregate,
            ..
        } => {
            println!("# answer sets = {}", witnesses);
            if args.count {
                println!("{}", aggregate.count());
            } else {
                for (key, function) in aggregate.functions() {
                    let normal = FixedPoint::new(decoder.key_values(key)).to_string();
                    for cube in function.sat_clauses() {
                        let line = [normal.clone(), decoder.format_cube(&cube)]
                            .into_iter()
                            .filter(|it| !it.is_empty())
                            .collect::<Vec<_>>()
                            .join(", ");
                        println!("{}", line);
                    }
                }
                println!("# fixed points = {}", aggregate.count());
            }
        }
    }

    if !result.outcome().is_complete() {
        eprintln!(
            "The enumeration is incomplete ({:?}); the results are a lower bound.",
            result.outcome()
        );
    }
}
