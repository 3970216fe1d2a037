//! Selection, filtering and route measurement for geographic pipe segments.
//!
//! Everything here is synchronous and free of I/O. Pipes come in from a
//! collaborator (see `pipegeo-store`), a [`session::PipeSession`] owns the
//! interactive state, and [`measure`] turns the current selection into
//! lengths and a connected-route estimate.

pub mod filter;
pub mod geodesy;
pub mod measure;
pub mod models;
pub mod selection;
pub mod session;

pub use filter::{distinct_tags, visible_pipes, FilterState};
pub use geodesy::{distance, format_distance, EARTH_RADIUS_M};
pub use measure::{
    connected_route, individual_lengths, total_length, ConnectedRoute, MeasurementReport,
    PipeLength, RouteLeg,
};
pub use models::{Coordinate, NewPipe, Pipe, PipeId, PipeQuery};
pub use selection::{MeasurementMode, SelectionState, ToggleOutcome};
pub use session::{PipeSession, SessionEvent};
