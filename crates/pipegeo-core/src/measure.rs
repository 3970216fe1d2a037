//! Lengths of selected pipes and a connected-route estimate.
//!
//! All functions take the selection in selection order. They accept
//! `&[Pipe]` as well as `&[&Pipe]`.

use crate::geodesy::distance;
use crate::models::{Coordinate, Pipe, PipeId};
use serde::Serialize;
use std::borrow::Borrow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipeLength {
    pub id: PipeId,
    pub name: String,
    pub length: f64,
}

/// One step of the route: the pipe visited, whether it is walked end to
/// start, and the off-pipe distance travelled to reach its entry point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteLeg {
    pub id: PipeId,
    pub reversed: bool,
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedRoute {
    pub pipe_length: f64,
    pub gap_length: f64,
    pub total_route: f64,
    pub legs: Vec<RouteLeg>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementReport {
    pub lengths: Vec<PipeLength>,
    pub total_length: f64,
    pub route: ConnectedRoute,
}

impl MeasurementReport {
    pub fn from_selection<P: Borrow<Pipe>>(selected: &[P]) -> Self {
        let lengths = individual_lengths(selected);
        let total_length = lengths.iter().map(|l| l.length).sum();
        Self {
            lengths,
            total_length,
            route: connected_route(selected),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}

pub fn individual_lengths<P: Borrow<Pipe>>(selected: &[P]) -> Vec<PipeLength> {
    selected
        .iter()
        .map(|p| {
            let pipe = p.borrow();
            PipeLength {
                id: pipe.id,
                name: pipe.name.clone(),
                length: pipe.length(),
            }
        })
        .collect()
}

/// Sum of the pipe lengths, `0.0` for an empty selection.
pub fn total_length<P: Borrow<Pipe>>(selected: &[P]) -> f64 {
    selected.iter().map(|p| p.borrow().length()).sum()
}

/// Greedy nearest-neighbour estimate of the distance needed to walk every
/// selected pipe once.
///
/// This is an approximation of an open-path TSP over two-endpoint segments,
/// not an optimum. The walk starts on the first selected pipe, entering at
/// its start. From the current exit point it moves to the unvisited pipe
/// with the closest endpoint, enters there and exits at the opposite end.
///
/// Ties go to the pipe picked earliest, and within a pipe to its start
/// point, so the result depends only on the selection order.
pub fn connected_route<P: Borrow<Pipe>>(selected: &[P]) -> ConnectedRoute {
    let pipe_length = total_length(selected);

    let Some(first): Option<&Pipe> = selected.first().map(|p| p.borrow()) else {
        return ConnectedRoute::default();
    };

    let mut legs = Vec::with_capacity(selected.len());
    legs.push(RouteLeg {
        id: first.id,
        reversed: false,
        gap: 0.0,
    });

    let mut visited = vec![false; selected.len()];
    visited[0] = true;
    let mut exit = first.end_point;
    let mut gap_length = 0.0;

    for _ in 1..selected.len() {
        let Some((idx, gap, reversed)) = nearest_unvisited(selected, &visited, exit) else {
            break;
        };
        let pipe = selected[idx].borrow();

        visited[idx] = true;
        gap_length += gap;
        exit = if reversed {
            pipe.start_point
        } else {
            pipe.end_point
        };
        legs.push(RouteLeg {
            id: pipe.id,
            reversed,
            gap,
        });
    }

    ConnectedRoute {
        pipe_length,
        gap_length,
        total_route: pipe_length + gap_length,
        legs,
    }
}

/// Index, gap and orientation of the closest unvisited pipe.
fn nearest_unvisited<P: Borrow<Pipe>>(
    selected: &[P],
    visited: &[bool],
    from: Coordinate,
) -> Option<(usize, f64, bool)> {
    let mut best: Option<(usize, f64, bool)> = None;

    for (idx, p) in selected.iter().enumerate() {
        if visited[idx] {
            continue;
        }
        let pipe = p.borrow();
        let to_start = distance(from, pipe.start_point);
        let to_end = distance(from, pipe.end_point);
        let (gap, reversed) = if to_end < to_start {
            (to_end, true)
        } else {
            (to_start, false)
        };

        match best {
            Some((_, best_gap, _)) if gap >= best_gap => {}
            _ => best = Some((idx, gap, reversed)),
        }
    }

    best
}
