//! Synthetic pipe networks for demos and load testing.
//!
//! Pipes are laid out in chains: every pipe starts where the previous one
//! ended, and each chain carries one utility kind. Between chains the cursor
//! sometimes jumps to a new area inside the configured bounds.

use pipegeo_config::{BoundsConfig, GeneratorConfig};
use pipegeo_core::{Coordinate, NewPipe};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// One utility kind: display color, type name and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeKind {
    pub color: &'static str,
    pub type_name: &'static str,
    pub tags: &'static [&'static str],
}

pub static PIPE_KINDS: [PipeKind; 8] = [
    PipeKind { color: "#2196F3", type_name: "Water Line", tags: &["water", "main"] },
    PipeKind { color: "#FF9800", type_name: "Gas Pipeline", tags: &["gas", "primary"] },
    PipeKind { color: "#795548", type_name: "Sewage Line", tags: &["sewage"] },
    PipeKind { color: "#F44336", type_name: "Electric Conduit", tags: &["electric", "primary"] },
    PipeKind { color: "#9C27B0", type_name: "Fiber Optic Run", tags: &["fiber", "main"] },
    PipeKind { color: "#4CAF50", type_name: "Data Cable", tags: &["data", "network"] },
    PipeKind { color: "#00BCD4", type_name: "Cooling Pipe", tags: &["cooling", "hvac"] },
    PipeKind { color: "#FFC107", type_name: "Steam Line", tags: &["steam", "heating"] },
];

/// Endless iterator of connected pipes. Use `take(n)` to bound it.
pub struct PipeGenerator {
    config: GeneratorConfig,
    rng: SmallRng,
    cursor: Coordinate,
    kind: &'static PipeKind,
    chain_len: usize,
    chain_pos: usize,
    produced: usize,
}

impl PipeGenerator {
    /// Seeded from `config.seed`, or from the OS when unset.
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }

    pub fn with_rng(config: GeneratorConfig, rng: SmallRng) -> Self {
        let cursor = Coordinate::new(config.origin_lat, config.origin_lng);
        Self {
            config,
            rng,
            cursor,
            kind: &PIPE_KINDS[0],
            chain_len: 0,
            chain_pos: 0,
            produced: 0,
        }
    }

    fn start_chain(&mut self) {
        self.kind = &PIPE_KINDS[self.rng.random_range(0..PIPE_KINDS.len())];
        let max = self.config.max_chain.max(self.config.min_chain + 1);
        self.chain_len = self.rng.random_range(self.config.min_chain..max);
        self.chain_pos = 0;
    }

    fn end_chain(&mut self) {
        if self.rng.random_bool(self.config.jump_probability.clamp(0.0, 1.0)) {
            let span = self.config.jump_span_degrees;
            let jumped = Coordinate::new(
                self.config.origin_lat + self.offset(span),
                self.config.origin_lng + self.offset(span),
            );
            self.cursor = clamp_to_bounds(jumped, &self.config.bounds);
        }
    }

    /// Uniform offset in `[-span / 2, span / 2)`.
    fn offset(&mut self, span: f64) -> f64 {
        (self.rng.random::<f64>() - 0.5) * span
    }
}

impl Iterator for PipeGenerator {
    type Item = NewPipe;

    fn next(&mut self) -> Option<NewPipe> {
        if self.chain_pos >= self.chain_len {
            self.start_chain();
        }

        let step = self.config.step_degrees;
        let start = self.cursor;
        let end = Coordinate::new(start.lat + self.offset(step), start.lng + self.offset(step));

        self.produced += 1;
        let pipe = NewPipe::new(
            format!("{} {}", self.kind.type_name, self.produced),
            start,
            end,
        )
        .with_color(self.kind.color)
        .with_tags(self.kind.tags.iter().copied());

        self.cursor = end;
        self.chain_pos += 1;
        if self.chain_pos >= self.chain_len {
            self.end_chain();
        }

        Some(pipe)
    }
}

pub fn clamp_to_bounds(point: Coordinate, bounds: &BoundsConfig) -> Coordinate {
    Coordinate::new(
        point.lat.clamp(bounds.min_lat, bounds.max_lat),
        point.lng.clamp(bounds.min_lng, bounds.max_lng),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> GeneratorConfig {
        GeneratorConfig {
            seed: Some(seed),
            ..Default::default()
        }
    }

    #[test]
    fn test_same_seed_same_pipes() {
        let a: Vec<NewPipe> = PipeGenerator::new(seeded(7)).take(50).collect();
        let b: Vec<NewPipe> = PipeGenerator::new(seeded(7)).take(50).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_pipes_are_connected_within_chain() {
        let config = GeneratorConfig {
            jump_probability: 0.0,
            ..seeded(3)
        };
        let pipes: Vec<NewPipe> = PipeGenerator::new(config).take(200).collect();
        for pair in pipes.windows(2) {
            assert_eq!(pair[0].end_point, pair[1].start_point);
        }
    }

    #[test]
    fn test_step_bounded() {
        let config = seeded(11);
        let half = config.step_degrees / 2.0 + 1e-12;
        for pipe in PipeGenerator::new(config).take(500) {
            assert!((pipe.end_point.lat - pipe.start_point.lat).abs() <= half);
            assert!((pipe.end_point.lng - pipe.start_point.lng).abs() <= half);
        }
    }

    #[test]
    fn test_names_colors_and_tags_follow_kind() {
        for (i, pipe) in PipeGenerator::new(seeded(5)).take(100).enumerate() {
            let color = pipe.color.clone().unwrap();
            let kind = PIPE_KINDS.iter().find(|k| k.color == color).unwrap();
            assert_eq!(pipe.name, format!("{} {}", kind.type_name, i + 1));
            let tags: Vec<&str> = pipe.tags.as_ref().unwrap().iter().map(String::as_str).collect();
            assert_eq!(tags, kind.tags);
        }
    }

    #[test]
    fn test_chain_lengths_respect_range() {
        let config = GeneratorConfig {
            min_chain: 2,
            max_chain: 4,
            jump_probability: 0.0,
            ..seeded(9)
        };
        let mut gen = PipeGenerator::new(config);
        for _ in 0..100 {
            gen.next();
            assert!(gen.chain_len >= 2 && gen.chain_len < 4);
        }
    }

    #[test]
    fn test_clamp_to_bounds() {
        let bounds = BoundsConfig::default();
        let p = clamp_to_bounds(Coordinate::new(31.0, 35.0), &bounds);
        assert_eq!(p, Coordinate::new(bounds.min_lat, bounds.max_lng));
    }

    #[test]
    fn test_jump_lands_inside_bounds() {
        let config = GeneratorConfig {
            min_chain: 1,
            max_chain: 2,
            jump_probability: 1.0,
            jump_span_degrees: 5.0,
            ..seeded(1)
        };
        let bounds = config.bounds.clone();
        let pipes: Vec<NewPipe> = PipeGenerator::new(config).take(20).collect();
        // Every chain is one pipe long, so every later start is a jump target.
        for pipe in &pipes[1..] {
            let p = pipe.start_point;
            assert!(p.lat >= bounds.min_lat && p.lat <= bounds.max_lat);
            assert!(p.lng >= bounds.min_lng && p.lng <= bounds.max_lng);
        }
    }
}
