use anyhow::Result;
use pipegeo_config::{GeneratorConfig, StoreConfig};
use pipegeo_core::{Coordinate, NewPipe, PipeQuery, PipeSession, SessionEvent};
use pipegeo_store::{PipeGenerator, PipeSource, PipeStore};
use pretty_assertions::assert_eq;

fn seeded_store(dir: &std::path::Path, count: usize) -> Result<PipeStore> {
    let store = PipeStore::open(dir)?;
    let config = GeneratorConfig {
        seed: Some(42),
        ..Default::default()
    };
    let pipes: Vec<NewPipe> = PipeGenerator::new(config).take(count).collect();
    for chunk in pipes.chunks(25) {
        store.insert_batch(chunk.to_vec())?;
    }
    Ok(store)
}

#[test]
fn generated_pipes_round_trip_through_store() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = seeded_store(dir.path(), 120)?;
    assert_eq!(store.count(), 120);

    let all = store.list_pipes(&PipeQuery::all())?;
    let ids: Vec<u64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=120).collect::<Vec<u64>>());
    assert!(all[0].name.ends_with(" 1"));
    Ok(())
}

#[test]
fn tag_filter_applies_before_limit() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = seeded_store(dir.path(), 200)?;

    let tagged = store.list_pipes(&PipeQuery::all().with_tag("primary"))?;
    assert!(tagged.iter().all(|p| p.has_tag("primary")));

    let limited = store.list_pipes(&PipeQuery::all().with_tag("primary").with_limit(3))?;
    assert_eq!(limited.len(), tagged.len().min(3));
    assert_eq!(limited[..], tagged[..limited.len()]);

    let unlimited = store.list_pipes(&PipeQuery::all().with_limit(0))?;
    assert_eq!(unlimited.len(), 200);
    Ok(())
}

#[test]
fn ids_continue_after_reopen() -> Result<()> {
    let dir = tempfile::tempdir()?;
    {
        let store = seeded_store(dir.path(), 10)?;
        store.flush()?;
    }
    let store = PipeStore::open(dir.path())?;
    let pipe = store.create_pipe(NewPipe::new(
        "Manual",
        Coordinate::new(32.08, 34.78),
        Coordinate::new(32.09, 34.79),
    ))?;
    assert_eq!(pipe.id, 11);
    assert_eq!(pipe.color, "#607D8B");
    assert!(pipe.tags.is_empty());
    Ok(())
}

#[test]
fn store_feeds_a_session() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let store = seeded_store(dir.path(), 30)?;
    let source: &dyn PipeSource = &store;

    let mut session = PipeSession::new();
    session.apply(SessionEvent::LoadStarted);
    session.apply(SessionEvent::PipesLoaded(
        source.list_pipes(&PipeQuery::all().with_limit(10))?,
    ));
    session.apply(SessionEvent::EnableMeasurement);
    session.apply(SessionEvent::TogglePipe(1));
    session.apply(SessionEvent::TogglePipe(2));

    let report = session.measurement();
    assert_eq!(report.lengths.len(), 2);
    assert!(report.route.total_route >= report.total_length);
    Ok(())
}

#[test]
fn from_config_creates_parent_dir() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let config = StoreConfig {
        path: dir.path().join("nested").join("store.db"),
        default_color: "#123456".to_string(),
    };
    let store = PipeStore::from_config(&config)?;
    let pipe = store.create_pipe(NewPipe::new(
        "Colored",
        Coordinate::new(0.0, 0.0),
        Coordinate::new(0.0, 0.001),
    ))?;
    assert_eq!(pipe.color, "#123456");
    Ok(())
}
