use super::utils::open_source;
use anyhow::Result;
use pipegeo_config::Config;
use pipegeo_core::{PipeQuery, PipeSession, SessionEvent};

pub fn handle_ui(config: &Config, limit: Option<usize>) -> Result<()> {
    let (source, label) = open_source(config)?;
    let query = PipeQuery::all().with_limit(limit.unwrap_or(config.view.default_limit));

    let mut session = PipeSession::new();
    session.apply(SessionEvent::LoadStarted);
    match source.list_pipes(&query) {
        Ok(pipes) => {
            session.apply(SessionEvent::PipesLoaded(pipes));
        }
        Err(e) => {
            session.apply(SessionEvent::LoadFailed(format!("{:#}", e)));
        }
    }

    tui::run_tui(session, &label)
}
