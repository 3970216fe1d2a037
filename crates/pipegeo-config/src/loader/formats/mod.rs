//! Parsers for the supported file formats

pub mod json;
pub mod toml;
pub mod yaml;
