/// OddBench - a benchmarking harness for outlier detection
///
/// Copyright (C) 2026 The OddBench Authors
///
/// This program is free software: you can redistribute it and/or modify
/// it under the terms of the GNU General Public License as published by
/// the Free Software Foundation, either version 3 of the License, or
/// (at your option) any later version.
///
/// This program is distributed in the hope that it will be useful,
/// but WITHOUT ANY WARRANTY; without even the implied warranty of
/// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
/// GNU General Public License for more details.
///
/// You should have received a copy of the GNU General Public License
/// along with this program.  If not, see <https://www.gnu.org/licenses/>.
use anyhow::Context;
use chrono::NaiveDateTime;
use clap::Parser;
use oddbench::bench::{self, BenchOptions};
use oddbench::core::TimeWindow;
use oddbench::store;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Parser, Debug)]
#[command(name = "oddbench")]
#[command(version)]
#[command(about = "Benchmark outlier-detection algorithms on time-indexed datasets", long_about = None)]
struct Args {
    /// Store host (IP literal or 'localhost')
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Store user
    #[arg(long, default_value = "root")]
    user: String,

    /// Store password
    #[arg(long, default_value = "root")]
    password: String,

    /// Database name
    #[arg(long, default_value = "demo")]
    db: String,

    /// Table name
    #[arg(long, default_value = "t")]
    table: String,

    /// Comma-separated algorithm names (see --list-algorithms)
    #[arg(long, value_delimiter = ',', default_values_t = default_algorithms())]
    algorithms: Vec<String>,

    /// Expected outlier fraction, strictly between 0 and 0.5
    #[arg(long, default_value_t = 0.1)]
    contamination: f64,

    /// Seed for synthetic data and stochastic detectors
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Window start, e.g. "2019-07-20 00:00:00"
    #[arg(long)]
    start: Option<String>,

    /// Window end, e.g. "2019-08-20 00:00:00"
    #[arg(long)]
    end: Option<String>,

    /// Return rows in non-decreasing time order
    #[arg(long)]
    temporal: bool,

    /// Evaluate scores only, without ground-truth labels
    #[arg(long)]
    without_labels: bool,

    /// Print the supported algorithm names and exit
    #[arg(long)]
    list_algorithms: bool,
}

fn default_algorithms() -> Vec<String> {
    oddbench::detector::SUPPORTED
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn parse_bound(bound: Option<&str>, flag: &str) -> anyhow::Result<Option<NaiveDateTime>> {
    bound
        .map(|text| {
            NaiveDateTime::parse_from_str(text, TIME_FORMAT)
                .with_context(|| format!("--{flag} must look like '2019-07-20 00:00:00'"))
        })
        .transpose()
}

fn main() -> anyhow::Result<()> {
    // Initialize logger with millisecond precision timestamps
    // Set RUST_LOG environment variable to override (e.g., RUST_LOG=debug)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!(
        "OddBench starting up (version {}, {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH")
    );

    let args = Args::parse();

    if args.list_algorithms {
        for name in oddbench::detector::SUPPORTED {
            println!("{name}");
        }
        return Ok(());
    }

    let window = TimeWindow::new(
        parse_bound(args.start.as_deref(), "start")?,
        parse_bound(args.end.as_deref(), "end")?,
    );

    let mut conn = store::connect(&args.host, &args.user, &args.password)
        .context("failed to open store connection")?;
    let ground_truth = store::insert_demo_data(
        &mut conn,
        &args.db,
        &args.table,
        args.seed,
        !args.without_labels,
    );

    let options = BenchOptions {
        db: args.db,
        table: args.table,
        time_column: "ts".to_string(),
        algorithms: args.algorithms,
        contamination: args.contamination,
        random_seed: Some(args.seed),
        window,
        temporal: args.temporal,
        with_ground_truth: !args.without_labels,
    };

    let outcomes = bench::run(&conn, ground_truth.as_deref(), &options)
        .context("benchmark run failed")?;
    for outcome in &outcomes {
        println!("{}", outcome.report);
    }

    conn.close();
    Ok(())
}
