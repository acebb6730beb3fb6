use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use delaney::cfg::DEFAULT_MAX_BRANCHING;
use delaney::sample::RandomDSetParams;
use delaney::SearchCfg;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod runner;

#[derive(Parser)]
#[command(name = "delaney")]
#[command(about = "Enumerate Delaney symbols over chamber systems")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Enumerate symbols for chamber systems read from a JSON array
    Run {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = DEFAULT_MAX_BRANCHING)]
        max_branching: usize,
    },
    /// Enumerate symbols for randomly sampled chamber systems
    Sample {
        #[arg(long, default_value_t = 10)]
        count: usize,
        #[arg(long, default_value_t = 1)]
        size_min: usize,
        #[arg(long, default_value_t = 6)]
        size_max: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = DEFAULT_MAX_BRANCHING)]
        max_branching: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Run {
            input,
            out,
            max_branching,
        } => run(input, out, max_branching),
        Action::Sample {
            count,
            size_min,
            size_max,
            seed,
            out,
            max_branching,
        } => {
            let params = RandomDSetParams {
                size_min,
                size_max,
                ..RandomDSetParams::default()
            };
            sample(params, count, seed, out, max_branching)
        }
        Action::Report => report(),
    }
}

fn run(input: String, out: String, max_branching: usize) -> Result<()> {
    tracing::info!(input, out, max_branching, "run");
    let sets = runner::read_sets(Path::new(&input))?;
    let cfg = SearchCfg { max_branching };
    let (records, summary) = runner::enumerate(&sets, cfg)?;
    runner::write_records(Path::new(&out), &records)?;
    tracing::info!(?summary, "enumerated");

    let params = serde_json::json!({
        "input": input,
        "max_branching": max_branching,
        "summary": summary,
    });
    provenance::Provenance::new("run", params).write_next_to(&out)?;
    Ok(())
}

fn sample(
    params: RandomDSetParams,
    count: usize,
    seed: u64,
    out: String,
    max_branching: usize,
) -> Result<()> {
    tracing::info!(count, seed, out, max_branching, "sample");
    let sets = runner::sample_sets(params.clone(), seed, count)?;
    let cfg = SearchCfg { max_branching };
    let (records, summary) = runner::enumerate(&sets, cfg)?;
    runner::write_records(Path::new(&out), &records)?;
    tracing::info!(?summary, "enumerated");

    let params = serde_json::json!({
        "count": count,
        "seed": seed,
        "size_min": params.size_min,
        "size_max": params.size_max,
        "max_branching": max_branching,
        "summary": summary,
    });
    provenance::Provenance::new("sample", params).write_next_to(&out)?;
    Ok(())
}

fn report() -> Result<()> {
    let doc = provenance::Provenance::new("report", serde_json::json!({}));
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}
