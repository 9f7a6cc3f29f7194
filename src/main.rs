// Evaluates the WMW loss over a batch stored as JSON.
//   wmw-loss <batch.json> [config.json]
// Set RUST_LOG=debug to see the config and partition being used.
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};
use wmw_loss::{Batch, Partition, Result, WmwLoss};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.len() > 2 {
        eprintln!("usage: wmw-loss <batch.json> [config.json]");
        return ExitCode::FAILURE;
    }

    match run(&args[0], args.get(1).map(String::as_str)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("wmw-loss: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(batch_path: &str, config_path: Option<&str>) -> Result<()> {
    let loss = match config_path {
        Some(path) => WmwLoss::load_json(path)?,
        None => WmwLoss::default(),
    };
    let batch = Batch::load_json(batch_path)?;

    let value = loss.compute(&batch.labels, &batch.predictions)?;
    let partition = Partition::split(&batch.labels, &batch.predictions)?;
    let included = loss.included_pairs(&batch.labels, &batch.predictions)?;

    println!("gamma:     {}", loss.gamma());
    println!("p:         {}", loss.p());
    println!("positives: {}", partition.positives.len());
    println!("negatives: {}", partition.negatives.len());
    println!("included:  {included} / {}", partition.pair_count());
    println!("loss:      {value:.6}");
    Ok(())
}
