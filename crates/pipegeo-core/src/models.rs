use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable pipe identity, used as the selection key.
pub type PipeId = u64;

/// A point in decimal degrees on the spherical earth model.
///
/// Ranges are not checked; callers supply sane values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.lat, self.lng)
    }
}

/// A straight pipe segment between two points.
///
/// Serialized in the wire shape of the pipe API:
/// `{"id", "name", "startPoint", "endPoint", "color", "tags"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipe {
    pub id: PipeId,
    pub name: String,
    pub start_point: Coordinate,
    pub end_point: Coordinate,
    pub color: String,
    /// Display order is insertion order; filtering ignores order.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Pipe {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Great-circle length in meters.
    pub fn length(&self) -> f64 {
        crate::geodesy::distance(self.start_point, self.end_point)
    }
}

/// Payload for creating a pipe; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPipe {
    pub name: String,
    pub start_point: Coordinate,
    pub end_point: Coordinate,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl NewPipe {
    pub fn new(name: impl Into<String>, start: Coordinate, end: Coordinate) -> Self {
        Self {
            name: name.into(),
            start_point: start,
            end_point: end,
            color: None,
            tags: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Attach an id, filling the defaults for missing optional fields.
    pub fn into_pipe(self, id: PipeId, default_color: &str) -> Pipe {
        Pipe {
            id,
            name: self.name,
            start_point: self.start_point,
            end_point: self.end_point,
            color: self.color.unwrap_or_else(|| default_color.to_string()),
            tags: self.tags.unwrap_or_default(),
        }
    }
}

/// Parameters of a pipe listing.
///
/// The tag filter is applied before the limit. A limit of `0` means no
/// limit, the same as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipeQuery {
    pub tag: Option<String>,
    pub limit: Option<usize>,
}

impl PipeQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Effective limit, `None` meaning unlimited.
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|l| *l > 0)
    }

    pub fn matches(&self, pipe: &Pipe) -> bool {
        self.tag.as_deref().map_or(true, |tag| pipe.has_tag(tag))
    }
}
