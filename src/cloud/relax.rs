use eframe::egui::{Vec2, vec2};
use rand::Rng;

use crate::util::{clamp_lenient, clamp_vec, guarded_length};

use super::Container;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxParams {
    pub pad: f32,
    pub speed: f32,
    pub accel: f32,
    pub damp: f32,
    pub max_velocity: f32,
    pub restitution: f32,
    pub center_exclusion: f32,
    pub center_margin: f32,
    pub min_gap: f32,
    pub collision_iterations: usize,
}

impl Default for RelaxParams {
    fn default() -> Self {
        Self {
            pad: 30.0,
            speed: 1.8,
            accel: 0.055,
            damp: 0.965,
            max_velocity: 2.2,
            restitution: 0.9,
            center_exclusion: super::placement::CENTER_EXCLUSION_RADIUS,
            center_margin: 10.0,
            min_gap: 10.0,
            collision_iterations: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    pub drift: f32,
}

impl Body {
    pub fn new(position: Vec2, velocity: Vec2, radius: f32, drift: f32) -> Self {
        Self {
            position,
            velocity,
            radius,
            drift,
        }
    }
}

/// Order matters: velocity update and integration, wall bounce, centre
/// exclusion, pairwise separation, then a final clamp. Bounce and exclusion
/// can undo each other near corners; the final clamp wins.
///
/// Returns `false` without touching any body when the container is
/// degenerate.
pub fn relax_frame<R: Rng + ?Sized>(
    bodies: &mut [Body],
    container: Container,
    params: &RelaxParams,
    delta_ratio: f32,
    rng: &mut R,
) -> bool {
    if container.is_degenerate() {
        return false;
    }

    let center = container.center();
    let min = vec2(params.pad, params.pad);
    let max = vec2(container.width - params.pad, container.height - params.pad);
    let damping = params.damp.powf(delta_ratio);

    for body in bodies.iter_mut() {
        let mut position = body.position;
        if !position.x.is_finite() {
            position.x = center.x;
        }
        if !position.y.is_finite() {
            position.y = center.y;
        }

        let mut velocity = body.velocity;
        velocity.x += (rng.r#gen::<f32>() - 0.5) * params.accel * body.drift * delta_ratio;
        velocity.y += (rng.r#gen::<f32>() - 0.5) * params.accel * body.drift * delta_ratio;
        velocity *= damping;

        let max_velocity = params.max_velocity * body.drift;
        velocity.x = clamp_lenient(velocity.x, -max_velocity, max_velocity);
        velocity.y = clamp_lenient(velocity.y, -max_velocity, max_velocity);

        position += velocity * (params.speed * delta_ratio);

        if position.x < min.x || position.x > max.x {
            velocity.x *= -params.restitution;
        }
        if position.y < min.y || position.y > max.y {
            velocity.y *= -params.restitution;
        }
        position = clamp_vec(position, min, max);

        body.velocity = velocity;
        body.position = position;
    }

    for body in bodies.iter_mut() {
        push_out_of_center(body, center, params);
    }

    push_apart(bodies, params.min_gap, params.collision_iterations);

    for body in bodies.iter_mut() {
        body.position = clamp_vec(body.position, min, max);
    }

    true
}

fn push_out_of_center(body: &mut Body, center: Vec2, params: &RelaxParams) {
    let delta = body.position - center;
    let distance = guarded_length(delta);
    let min_distance = params.center_exclusion + body.radius + params.center_margin;

    if distance < min_distance {
        body.position = center + (delta / distance) * min_distance;
    }
}

/// Pushes overlapping pairs apart by half the overlap each.
///
/// A fixed number of sweeps only partially resolves chains of overlaps.
pub fn push_apart(bodies: &mut [Body], min_gap: f32, iterations: usize) {
    let count = bodies.len();
    for _ in 0..iterations {
        for first in 0..count {
            for second in (first + 1)..count {
                let delta = bodies[second].position - bodies[first].position;
                let distance = guarded_length(delta);
                let target = bodies[first].radius + bodies[second].radius + min_gap;
                if distance >= target {
                    continue;
                }

                let push = (delta / distance) * ((target - distance) * 0.5);
                bodies[first].position -= push;
                bodies[second].position += push;
            }
        }
    }
}
