use super::utils::open_source;
use anyhow::Result;
use pipegeo_config::Config;
use pipegeo_core::{distinct_tags, PipeQuery};

pub fn handle_tags(config: &Config) -> Result<()> {
    let (source, _) = open_source(config)?;
    let pipes = source.list_pipes(&PipeQuery::all())?;
    for tag in distinct_tags(&pipes) {
        println!("{}", tag);
    }
    Ok(())
}
