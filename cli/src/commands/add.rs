use super::utils::open_source;
use anyhow::Result;
use pipegeo_config::{validation::validate_hex_color, Config};
use pipegeo_core::{format_distance, Coordinate, NewPipe};

pub fn handle_add(
    config: &Config,
    name: String,
    start: Coordinate,
    end: Coordinate,
    color: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    if let Some(color) = &color {
        validate_hex_color("color", color)?;
    }

    let mut new_pipe = NewPipe::new(name, start, end);
    new_pipe.color = color;
    new_pipe.tags = Some(tags);

    let (source, _) = open_source(config)?;
    let pipe = source.create_pipe(new_pipe)?;

    println!(
        "Created pipe {} '{}' ({})",
        pipe.id,
        pipe.name,
        format_distance(pipe.length())
    );
    Ok(())
}
