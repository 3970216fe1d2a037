use super::utils::open_store;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use pipegeo_config::Config;
use pipegeo_core::NewPipe;
use pipegeo_store::PipeGenerator;
use std::time::Instant;
use tracing::info;

pub fn handle_generate(config: &Config, count: Option<usize>, seed: Option<u64>) -> Result<()> {
    let count = count.unwrap_or(config.generator.count);
    if count == 0 {
        anyhow::bail!("count must be a positive number");
    }

    let mut gen_config = config.generator.clone();
    if seed.is_some() {
        gen_config.seed = seed;
    }
    let batch_size = gen_config.batch_size.max(1);

    let store = open_store(config)?;
    let existing = store.count();
    if existing > 0 {
        println!("Clearing {} existing pipes...", existing);
        store.clear()?;
    }

    println!("Generating {} connected pipes...", count);
    let started = Instant::now();

    let pb = ProgressBar::new(count as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:30.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );
    pb.set_message("pipes");

    let mut generator = PipeGenerator::new(gen_config).take(count);
    loop {
        let batch: Vec<NewPipe> = generator.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        let written = store.insert_batch(batch)?;
        pb.inc(written as u64);
    }
    store.flush()?;
    pb.finish_and_clear();

    let elapsed = started.elapsed().as_secs_f64();
    let total = store.count();
    info!(count, elapsed, "generation complete");

    println!("Generation complete!");
    println!("  Total pipes in store: {}", total);
    println!("  Time taken: {:.2}s", elapsed);
    if elapsed > 0.0 {
        println!("  Rate: {} pipes/second", (count as f64 / elapsed).floor() as u64);
    }
    Ok(())
}
