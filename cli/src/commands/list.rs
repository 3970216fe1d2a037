use super::utils::open_source;
use anyhow::Result;
use pipegeo_config::Config;
use pipegeo_core::{format_distance, PipeQuery};

pub fn handle_list(
    config: &Config,
    tag: Option<String>,
    limit: Option<usize>,
    json: bool,
) -> Result<()> {
    let (source, _) = open_source(config)?;
    let query = PipeQuery {
        tag,
        limit: Some(limit.unwrap_or(config.view.default_limit)),
    };
    let pipes = source.list_pipes(&query)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&pipes)?);
        return Ok(());
    }

    if pipes.is_empty() {
        println!("No pipes.");
        return Ok(());
    }

    println!(
        "{:>8}  {:<24} {:<18} {:<18} {:>10}  {:<8} {}",
        "ID", "NAME", "START", "END", "LENGTH", "COLOR", "TAGS"
    );
    for pipe in &pipes {
        println!(
            "{:>8}  {:<24} {:<18} {:<18} {:>10}  {:<8} {}",
            pipe.id,
            pipe.name,
            pipe.start_point.to_string(),
            pipe.end_point.to_string(),
            format_distance(pipe.length()),
            pipe.color,
            pipe.tags.join(", ")
        );
    }
    println!("{} pipes", pipes.len());
    Ok(())
}
