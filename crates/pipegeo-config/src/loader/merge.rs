//! Configuration merging logic
//!
//! Merges configurations from multiple sources with proper precedence.

use crate::{types::*, Config};

/// Merge two configurations, with `overlay` taking precedence
///
/// Fields of `overlay` that differ from their defaults replace the values in
/// `base`; fields left at their default keep the base value.
pub fn merge(mut base: Config, overlay: Config) -> Config {
    base.store = merge_store(base.store, overlay.store);
    base.view = merge_view(base.view, overlay.view);
    base.remote = merge_remote(base.remote, overlay.remote);
    base.generator = merge_generator(base.generator, overlay.generator);
    base.log = merge_log(base.log, overlay.log);

    base
}

/// Pick `overlay` when it was explicitly changed from `default`
fn pick<T: PartialEq>(base: T, overlay: T, default: &T) -> T {
    if overlay != *default {
        overlay
    } else {
        base
    }
}

fn pick_f64(base: f64, overlay: f64, default: f64) -> f64 {
    if (overlay - default).abs() > f64::EPSILON {
        overlay
    } else {
        base
    }
}

fn merge_store(base: StoreConfig, overlay: StoreConfig) -> StoreConfig {
    let default = StoreConfig::default();
    StoreConfig {
        path: pick(base.path, overlay.path, &default.path),
        default_color: pick(base.default_color, overlay.default_color, &default.default_color),
    }
}

fn merge_view(base: ViewConfig, overlay: ViewConfig) -> ViewConfig {
    let default = ViewConfig::default();
    ViewConfig {
        default_limit: pick(base.default_limit, overlay.default_limit, &default.default_limit),
    }
}

fn merge_remote(base: RemoteConfig, overlay: RemoteConfig) -> RemoteConfig {
    let default = RemoteConfig::default();
    RemoteConfig {
        api_base: overlay.api_base.or(base.api_base),
        timeout_secs: pick(base.timeout_secs, overlay.timeout_secs, &default.timeout_secs),
    }
}

fn merge_generator(base: GeneratorConfig, overlay: GeneratorConfig) -> GeneratorConfig {
    let default = GeneratorConfig::default();
    GeneratorConfig {
        count: pick(base.count, overlay.count, &default.count),
        seed: overlay.seed.or(base.seed),
        min_chain: pick(base.min_chain, overlay.min_chain, &default.min_chain),
        max_chain: pick(base.max_chain, overlay.max_chain, &default.max_chain),
        step_degrees: pick_f64(base.step_degrees, overlay.step_degrees, default.step_degrees),
        jump_probability: pick_f64(
            base.jump_probability,
            overlay.jump_probability,
            default.jump_probability,
        ),
        jump_span_degrees: pick_f64(
            base.jump_span_degrees,
            overlay.jump_span_degrees,
            default.jump_span_degrees,
        ),
        origin_lat: pick_f64(base.origin_lat, overlay.origin_lat, default.origin_lat),
        origin_lng: pick_f64(base.origin_lng, overlay.origin_lng, default.origin_lng),
        bounds: merge_bounds(base.bounds, overlay.bounds),
        batch_size: pick(base.batch_size, overlay.batch_size, &default.batch_size),
    }
}

fn merge_bounds(base: BoundsConfig, overlay: BoundsConfig) -> BoundsConfig {
    let default = BoundsConfig::default();
    BoundsConfig {
        min_lat: pick_f64(base.min_lat, overlay.min_lat, default.min_lat),
        max_lat: pick_f64(base.max_lat, overlay.max_lat, default.max_lat),
        min_lng: pick_f64(base.min_lng, overlay.min_lng, default.min_lng),
        max_lng: pick_f64(base.max_lng, overlay.max_lng, default.max_lng),
    }
}

fn merge_log(base: LogConfig, overlay: LogConfig) -> LogConfig {
    let default = LogConfig::default();
    LogConfig {
        filter: pick(base.filter, overlay.filter, &default.filter),
        format: pick(base.format, overlay.format, &default.format),
        ansi: pick(base.ansi, overlay.ansi, &default.ansi),
    }
}
