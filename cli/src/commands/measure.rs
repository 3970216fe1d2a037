use super::utils::open_source;
use anyhow::Result;
use pipegeo_config::Config;
use pipegeo_core::{
    format_distance, MeasurementReport, Pipe, PipeId, PipeQuery, PipeSession, SessionEvent,
};

pub fn handle_measure(config: &Config, ids: Vec<PipeId>, json: bool) -> Result<()> {
    let (source, _) = open_source(config)?;
    let session = measured_session(source.list_pipes(&PipeQuery::all())?, &ids);

    let missing: Vec<PipeId> = ids
        .iter()
        .copied()
        .filter(|id| session.pipe(*id).is_none())
        .collect();
    if !missing.is_empty() {
        eprintln!("Unknown pipe ids skipped: {:?}", missing);
    }

    let report = session.measurement();
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_report(&report));
    }
    Ok(())
}

/// A session in measurement mode with `ids` picked in order.
pub fn measured_session(pipes: Vec<Pipe>, ids: &[PipeId]) -> PipeSession {
    let mut session = PipeSession::with_pipes(pipes);
    session.apply(SessionEvent::EnableMeasurement);
    for &id in ids {
        if session.pipe(id).is_some() && !session.is_selected(id) {
            session.apply(SessionEvent::TogglePipe(id));
        }
    }
    session
}

pub fn render_report(report: &MeasurementReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Selected: {} pipes\n", report.lengths.len()));
    for entry in &report.lengths {
        out.push_str(&format!(
            "  {:>8}  {:<24} {}\n",
            entry.id,
            entry.name,
            format_distance(entry.length)
        ));
    }
    out.push_str(&format!(
        "Total length: {}\n",
        format_distance(report.total_length)
    ));
    if report.lengths.len() >= 2 {
        let route = &report.route;
        out.push_str(&format!(
            "Connected route: {} (includes {} of gaps)\n",
            format_distance(route.total_route),
            format_distance(route.gap_length)
        ));
        let order: Vec<String> = route
            .legs
            .iter()
            .map(|leg| {
                if leg.reversed {
                    format!("{} (reversed)", leg.id)
                } else {
                    leg.id.to_string()
                }
            })
            .collect();
        out.push_str(&format!("Order: {}\n", order.join(" -> ")));
    }
    out
}
