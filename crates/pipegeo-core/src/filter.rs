//! Tag filter over a pipe collection.

use crate::models::Pipe;
use std::collections::BTreeSet;

/// The single active tag filter. `None` shows everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    tag: Option<String>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, tag: Option<String>) {
        self.tag = tag;
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn visible<'a>(&self, all: &'a [Pipe]) -> Vec<&'a Pipe> {
        visible_pipes(all, self.tag())
    }
}

/// Pipes carrying `tag`, or all of them when `tag` is `None`.
///
/// Input order is preserved.
pub fn visible_pipes<'a>(all: &'a [Pipe], tag: Option<&str>) -> Vec<&'a Pipe> {
    match tag {
        None => all.iter().collect(),
        Some(tag) => all.iter().filter(|p| p.has_tag(tag)).collect(),
    }
}

/// Every tag in use, sorted and without duplicates.
pub fn distinct_tags(all: &[Pipe]) -> Vec<String> {
    all.iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
