//! dataset-runner: headless generator for the fraudgen dataset.
//!
//! Usage:
//!   dataset-runner --seed 42 --customers 1000 --transactions 10717 --out-dir ./out
//!   dataset-runner --config run.json --out-dir ./out

use anyhow::Result;
use fraudgen_core::{export, pipeline, GeneratorConfig};
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config = match str_arg(&args, "--config") {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    // Scalar flags override whatever the config file said.
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.num_customers = parse_arg(&args, "--customers", config.num_customers);
    config.num_transactions = parse_arg(&args, "--transactions", config.num_transactions);
    config.fraud_fraction = parse_arg(&args, "--fraud-fraction", config.fraud_fraction);
    config.duplicate_ratio = parse_arg(&args, "--duplicate-ratio", config.duplicate_ratio);
    config.structuring_cases = parse_arg(&args, "--structuring-cases", config.structuring_cases);
    config.window_start = parse_arg(&args, "--window-start", config.window_start);
    config.window_end = parse_arg(&args, "--window-end", config.window_end);
    let out_dir = str_arg(&args, "--out-dir").unwrap_or("./out");

    println!("fraudgen — dataset-runner");
    println!("  seed:         {}", config.seed);
    println!("  customers:    {}", config.num_customers);
    println!("  transactions: {}", config.num_transactions);
    println!("  window:       {} .. {}", config.window_start, config.window_end);
    println!("  fraud:        {}", config.fraud_fraction);
    println!("  duplicates:   {}", config.duplicate_ratio);
    println!("  structuring:  {}", config.structuring_cases);
    println!("  out_dir:      {out_dir}");
    println!();

    let dataset = pipeline::generate(&config)?;
    log::info!("generation finished, writing CSV output to {out_dir}");
    export::write_dataset(&dataset, Path::new(out_dir))?;

    let fraud_rows = dataset.transactions.iter().filter(|t| t.is_fraud).count();
    println!("Wrote {} customers", dataset.customers.len());
    println!(
        "Wrote {} transactions ({} labeled fraud)",
        dataset.transactions.len(),
        fraud_rows
    );
    println!("Wrote {} summary rows", dataset.summaries.len());
    println!("Output: {out_dir}/customers.csv, transactions.csv, summary_statistics.csv");

    Ok(())
}

fn str_arg<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == name)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr>(args: &[String], name: &str, default: T) -> T {
    str_arg(args, name)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
