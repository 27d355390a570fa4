use std::f32::consts::{PI, TAU};
use std::fmt;

use clap::ValueEnum;
use eframe::egui::{Vec2, vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::util::{clamp_lenient, clamp_vec};

pub const PLACEMENT_MAX_TRIES: usize = 4500;
pub const PLACEMENT_PAD: f32 = 24.0;
pub const CENTER_EXCLUSION_RADIUS: f32 = 92.0;
pub const MIN_NODE_DISTANCE: f32 = 100.0;

const OUTER_RADIUS_FRACTION: f32 = 0.44;
const INNER_RADIUS_FRACTION: f32 = 0.18;
const BIAS_X: f32 = 0.18;
const BIAS_Y: f32 = -0.08;

const RING_MIN_RADIUS: f32 = 130.0;
const RING_RADIUS_FRACTION: f32 = 0.34;
const RING_START_ANGLE: f32 = -PI / 2.0 + 0.22;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LayoutStrategy {
    /// Random scatter biased toward an outer annulus.
    #[default]
    Scattered,
    /// Evenly spaced on a single circle.
    Ring,
}

impl LayoutStrategy {
    pub fn place<R: Rng + ?Sized>(
        self,
        count: usize,
        params: &PlacementParams,
        rng: &mut R,
    ) -> Vec<PlacedPoint> {
        match self {
            Self::Scattered => scatter(count, params, rng),
            Self::Ring => ring(count, params),
        }
    }
}

impl fmt::Display for LayoutStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scattered => "scattered",
            Self::Ring => "ring",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementParams {
    pub width: f32,
    pub height: f32,
    pub center: Vec2,
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_distance: f32,
    pub center_exclusion: f32,
    pub pad: f32,
    pub max_tries: usize,
}

impl PlacementParams {
    pub fn for_container(width: f32, height: f32) -> Self {
        let short_side = width.min(height);
        Self {
            width,
            height,
            center: vec2(width * 0.5, height * 0.5),
            min_radius: short_side * INNER_RADIUS_FRACTION,
            max_radius: short_side * OUTER_RADIUS_FRACTION,
            min_distance: MIN_NODE_DISTANCE,
            center_exclusion: CENTER_EXCLUSION_RADIUS,
            pad: PLACEMENT_PAD,
            max_tries: PLACEMENT_MAX_TRIES,
        }
    }

    fn min_corner(&self) -> Vec2 {
        vec2(self.pad, self.pad)
    }

    fn max_corner(&self) -> Vec2 {
        vec2(self.width - self.pad, self.height - self.pad)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let min = self.min_corner();
        let max = self.max_corner();
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacedPoint {
    pub position: Vec2,
    /// Set when the retry budget ran out and the point ignores separation.
    pub fallback: bool,
}

/// Scatters `count` points around the centre, rejecting candidates that sit
/// inside the centre exclusion zone or too close to an earlier point.
///
/// Radii are drawn as `min + (max - min) * u^2`, so candidates cluster
/// toward the outer edge. The whole cloud is nudged right and up by a fixed
/// fraction of the outer radius.
pub fn scatter<R: Rng + ?Sized>(
    count: usize,
    params: &PlacementParams,
    rng: &mut R,
) -> Vec<PlacedPoint> {
    let mut points: Vec<PlacedPoint> = Vec::with_capacity(count);
    let bias = vec2(BIAS_X, BIAS_Y) * params.max_radius;
    let min_distance_sq = params.min_distance * params.min_distance;
    let min = params.min_corner();
    let max = params.max_corner();

    for _ in 0..count {
        let mut accepted = None;

        for _ in 0..params.max_tries {
            let angle = rng.r#gen::<f32>() * TAU;
            let u = rng.r#gen::<f32>();
            let radius = params.min_radius + (params.max_radius - params.min_radius) * (u * u);

            let candidate = params.center + vec2(angle.cos(), angle.sin()) * radius + bias;
            let candidate = clamp_vec(candidate, min, max);

            if (candidate - params.center).length() < params.center_exclusion {
                continue;
            }

            let crowded = points
                .iter()
                .any(|point| (candidate - point.position).length_sq() < min_distance_sq);
            if crowded {
                continue;
            }

            accepted = Some(candidate);
            break;
        }

        let point = match accepted {
            Some(position) => PlacedPoint {
                position,
                fallback: false,
            },
            None => PlacedPoint {
                position: vec2(
                    clamp_lenient(rng.r#gen::<f32>() * params.width, min.x, max.x),
                    clamp_lenient(rng.r#gen::<f32>() * params.height, min.y, max.y),
                ),
                fallback: true,
            },
        };
        points.push(point);
    }

    points
}

pub fn ring(count: usize, params: &PlacementParams) -> Vec<PlacedPoint> {
    if count == 0 {
        return Vec::new();
    }

    let radius = RING_MIN_RADIUS.max(params.width.min(params.height) * RING_RADIUS_FRACTION);
    let min = params.min_corner();
    let max = params.max_corner();

    (0..count)
        .map(|index| {
            let angle = RING_START_ANGLE + (index as f32 * TAU) / count as f32;
            let position = params.center + vec2(angle.cos(), angle.sin()) * radius;
            PlacedPoint {
                position: clamp_vec(position, min, max),
                fallback: false,
            }
        })
        .collect()
}
