//! `sketchboard [count]`: scatter random elements, build the spatial index,
//! and time a batch of point hit-tests against it.

use std::collections::HashMap;
use std::process::ExitCode;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sketchboard::camera::{Point, Rect};
use sketchboard::config::BoardConfig;
use sketchboard::doc::{Element, ElementKind};
use sketchboard::hit::spatial_hit_test;
use sketchboard::spatial::SpatialIndex;

const DEFAULT_COUNT: usize = 1000;
const HIT_TESTS: usize = 10_000;
const SEED: u64 = 0x5EED;

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let count = match std::env::args().nth(1) {
        None => DEFAULT_COUNT,
        Some(raw) => match raw.parse::<usize>() {
            Ok(n) => n,
            Err(e) => {
                tracing::error!(%raw, error = %e, "invalid element count");
                return ExitCode::FAILURE;
            }
        },
    };
    let config = match BoardConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let bounds = config.index.bounds;
    let mut rng = StdRng::seed_from_u64(SEED);
    let elements: Vec<Element> = (0..count).map(|i| random_element(&mut rng, &bounds, i)).collect();
    let by_id: HashMap<&str, &Element> = elements.iter().map(|el| (el.id.as_str(), el)).collect();

    let mut index = SpatialIndex::new(config.index);
    let started = Instant::now();
    index.rebuild(&elements);
    let stats = index.stats();
    tracing::info!(
        elements = count,
        nodes = stats.total_nodes,
        stored = stats.total_elements,
        max_depth = stats.max_depth_reached,
        avg_per_leaf = stats.avg_elements_per_leaf,
        overflow = stats.overflow_elements,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "index built"
    );

    let started = Instant::now();
    let mut hits = 0_usize;
    for _ in 0..HIT_TESTS {
        let p = Point::new(rng.random_range(bounds.x..bounds.right()), rng.random_range(bounds.y..bounds.bottom()));
        if spatial_hit_test(&index, p, |id| by_id.get(id).copied()).is_some() {
            hits += 1;
        }
    }
    tracing::info!(
        queries = HIT_TESTS,
        hits,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "hit-tests done"
    );

    ExitCode::SUCCESS
}

/// A rectangle, circle, or short pen stroke somewhere inside `bounds`.
fn random_element(rng: &mut StdRng, bounds: &Rect, i: usize) -> Element {
    let max = (bounds.width.min(bounds.height) / 20.0).max(2.0);
    let width = rng.random_range(1.0..max);
    let height = rng.random_range(1.0..max);
    let x = rng.random_range(bounds.x..(bounds.right() - width).max(bounds.x + 1.0));
    let y = rng.random_range(bounds.y..(bounds.bottom() - height).max(bounds.y + 1.0));

    let kind = match i % 3 {
        0 => ElementKind::Rectangle,
        1 => ElementKind::Circle,
        _ => ElementKind::Pen,
    };
    let mut element = Element::new(kind, Rect::new(x, y, width, height));
    element.z_index = rng.random_range(0..10);
    if rng.random_bool(0.2) {
        element.angle = rng.random_range(-std::f64::consts::PI..std::f64::consts::PI);
    }
    if kind == ElementKind::Pen {
        let points = (0..8)
            .map(|_| Some(Point::new(rng.random_range(0.0..width), rng.random_range(0.0..height))))
            .collect();
        element.points = Some(points);
    }
    element
}
