//! Floating node cloud: a one-shot placement pass followed by a relaxation
//! pass every frame.
//!
//! [`Cloud`] owns every piece of mutable state. Renderers never touch it
//! directly; they read the [`Snapshot`] published at the end of each frame.

mod placement;
mod pulse;
mod relax;
mod snapshot;
mod tween;

use std::sync::Arc;

use eframe::egui::{Vec2, vec2};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{CloudConfig, SkillEntry};
use crate::motion::platform_prefers_reduced_motion;
use crate::util::frame_delta_ratio;

pub use placement::{
    CENTER_EXCLUSION_RADIUS, LayoutStrategy, MIN_NODE_DISTANCE, PLACEMENT_MAX_TRIES,
    PLACEMENT_PAD, PlacedPoint, PlacementParams, ring, scatter,
};
pub use pulse::{
    HOVER_LINE_OPACITY, HOVER_SCALE, PulseBoard, REST_LINE_OPACITY, REST_SCALE,
    SIGNAL_FADE_SECS, SIGNAL_TRAVEL_SECS, SWEEP_STAGGER_SECS, SignalFrame, SweepTimer,
};
pub use relax::{Body, RelaxParams, push_apart, relax_frame};
pub use snapshot::{Connector, NodeFrame, Snapshot};
pub use tween::{Ease, Tween};

const SEED_VELOCITY_SPREAD: f32 = 0.9;
const DRIFT_MIN: f32 = 1.0;
const DRIFT_SPREAD: f32 = 1.3;

/// Longest wall-clock step fed to hover and pulse animations.
const MAX_ANIMATION_STEP_SECS: f32 = 0.25;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Container {
    pub width: f32,
    pub height: f32,
}

impl Container {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Unmounted,
    /// Relaxing every frame.
    Running,
    /// Laid out once; positions never change.
    Static,
    TornDown,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudOptions {
    pub strategy: LayoutStrategy,
    pub animate: bool,
    pub pulse_every: f32,
    pub seed: Option<u64>,
    pub relax: RelaxParams,
}

impl Default for CloudOptions {
    fn default() -> Self {
        Self {
            strategy: LayoutStrategy::default(),
            animate: true,
            pulse_every: crate::config::DEFAULT_PULSE_EVERY_SECS,
            seed: None,
            relax: RelaxParams::default(),
        }
    }
}

impl CloudOptions {
    pub fn from_config(config: &CloudConfig) -> Self {
        Self::from_config_with_platform(config, platform_prefers_reduced_motion())
    }

    pub fn from_config_with_platform(config: &CloudConfig, platform_reduced: bool) -> Self {
        Self {
            strategy: config.layout,
            animate: config.motion.resolve(platform_reduced),
            pulse_every: config.pulse_every,
            seed: config.seed,
            relax: RelaxParams::default(),
        }
    }
}

pub struct Cloud {
    skills: Vec<SkillEntry>,
    bodies: Vec<Body>,
    container: Container,
    strategy: LayoutStrategy,
    animate: bool,
    pulse_every: f32,
    relax: RelaxParams,
    rng: StdRng,
    pulses: PulseBoard,
    state: LoopState,
    relayout_pending: bool,
    degenerate_warned: bool,
    frame: u64,
    snapshot: Arc<Snapshot>,
}

impl Cloud {
    /// Creates one node per skill, in order. Velocities and drift are drawn
    /// here once and survive every later relayout.
    pub fn new(skills: Vec<SkillEntry>, options: CloudOptions) -> Self {
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let bodies = skills
            .iter()
            .map(|skill| {
                let velocity = vec2(
                    (rng.r#gen::<f32>() - 0.5) * SEED_VELOCITY_SPREAD,
                    (rng.r#gen::<f32>() - 0.5) * SEED_VELOCITY_SPREAD,
                );
                let drift = DRIFT_MIN + rng.r#gen::<f32>() * DRIFT_SPREAD;
                Body::new(Vec2::splat(f32::NAN), velocity, skill.radius(), drift)
            })
            .collect::<Vec<_>>();

        Self {
            pulses: PulseBoard::new(skills.len(), options.animate),
            skills,
            bodies,
            container: Container::default(),
            strategy: options.strategy,
            animate: options.animate,
            pulse_every: options.pulse_every,
            relax: options.relax,
            rng,
            state: LoopState::Unmounted,
            relayout_pending: false,
            degenerate_warned: false,
            frame: 0,
            snapshot: Arc::new(Snapshot::default()),
        }
    }

    pub fn from_config(config: &CloudConfig) -> Self {
        Self::new(config.skills.clone(), CloudOptions::from_config(config))
    }

    pub fn mount(&mut self, container: Container) {
        if self.state != LoopState::Unmounted {
            return;
        }

        self.state = if self.animate {
            LoopState::Running
        } else {
            LoopState::Static
        };
        info!(
            "mounting cloud with {} nodes ({}, {})",
            self.bodies.len(),
            self.strategy,
            if self.animate { "animated" } else { "static" }
        );

        self.container = container;
        let placed = !container.is_degenerate();
        if placed {
            self.place();
        } else {
            self.relayout_pending = true;
        }

        if self.state == LoopState::Running {
            self.pulses.start_sweep(self.pulse_every);
        }
        // Unplaced bodies sit at NaN; the empty default snapshot stands until
        // the first real frame.
        if placed {
            self.publish();
        }
    }

    /// Schedules a placement pass for the next frame. Repeated calls before
    /// that frame collapse into one pass.
    pub fn resize(&mut self, container: Container) {
        if self.state == LoopState::TornDown {
            return;
        }
        debug!(
            "resize to {:.0}x{:.0} queued",
            container.width, container.height
        );
        self.relayout_pending = true;
    }

    /// Runs one frame against freshly measured container dimensions.
    ///
    /// Returns `None` once the cloud has been torn down.
    pub fn frame(&mut self, container: Container, delta_seconds: f32) -> Option<Arc<Snapshot>> {
        match self.state {
            LoopState::TornDown => return None,
            LoopState::Unmounted => self.mount(container),
            LoopState::Running | LoopState::Static => {}
        }

        self.container = container;
        if container.is_degenerate() {
            if !self.degenerate_warned {
                warn!(
                    "skipping frames for degenerate container {:.0}x{:.0}",
                    container.width, container.height
                );
                self.degenerate_warned = true;
            }
            return Some(Arc::clone(&self.snapshot));
        }
        self.degenerate_warned = false;

        if self.relayout_pending {
            self.place();
        }

        let center = container.center();
        let bodies = &self.bodies;
        let animation_step = if delta_seconds.is_finite() {
            delta_seconds.clamp(0.0, MAX_ANIMATION_STEP_SECS)
        } else {
            0.0
        };
        self.pulses.advance(animation_step, |index| {
            bodies.get(index).map(|body| (center, body.position))
        });

        if self.state == LoopState::Running {
            relax_frame(
                &mut self.bodies,
                container,
                &self.relax,
                frame_delta_ratio(delta_seconds),
                &mut self.rng,
            );
        }

        self.frame += 1;
        self.publish();
        Some(Arc::clone(&self.snapshot))
    }

    /// Re-runs placement against the current container. Velocities are kept.
    pub fn relayout(&mut self) {
        if matches!(self.state, LoopState::Running | LoopState::Static) {
            if self.container.is_degenerate() {
                self.relayout_pending = true;
                return;
            }
            self.place();
            self.publish();
        }
    }

    pub fn set_strategy(&mut self, strategy: LayoutStrategy) {
        if self.strategy == strategy {
            return;
        }
        self.strategy = strategy;
        self.relayout();
    }

    pub fn pointer_enter(&mut self, index: usize) {
        if !self.is_live() {
            return;
        }
        if let Some(body) = self.bodies.get(index) {
            self.pulses
                .pointer_enter(index, self.container.center(), body.position);
        }
    }

    pub fn pointer_leave(&mut self, index: usize) {
        if self.is_live() {
            self.pulses.pointer_leave(index);
        }
    }

    /// Stops the loop for good: pending relayout, sweep timer and every
    /// in-flight animation are cancelled before node state is dropped.
    pub fn teardown(&mut self) {
        if self.state == LoopState::TornDown {
            return;
        }

        self.relayout_pending = false;
        self.pulses.cancel_all();
        self.state = LoopState::TornDown;
        self.bodies.clear();
        self.skills.clear();
        self.snapshot = Arc::new(Snapshot::default());
        info!("cloud torn down after {} frames", self.frame);
    }

    fn is_live(&self) -> bool {
        matches!(self.state, LoopState::Running | LoopState::Static)
    }

    fn place(&mut self) {
        self.relayout_pending = false;

        let params = PlacementParams::for_container(self.container.width, self.container.height);
        let points = self
            .strategy
            .place(self.bodies.len(), &params, &mut self.rng);

        let fallbacks = points.iter().filter(|point| point.fallback).count();
        if fallbacks > 0 {
            warn!(
                "{fallbacks} of {} nodes fell back to unconstrained positions",
                points.len()
            );
        }
        debug!(
            "placed {} nodes ({}) in {:.0}x{:.0}",
            points.len(),
            self.strategy,
            self.container.width,
            self.container.height
        );

        for (body, point) in self.bodies.iter_mut().zip(points) {
            body.position = point.position;
        }
    }

    fn publish(&mut self) {
        let center = self.container.center();
        let nodes = self
            .skills
            .iter()
            .zip(&self.bodies)
            .enumerate()
            .map(|(index, (skill, body))| NodeFrame {
                name: skill.name.clone(),
                position: body.position,
                radius: body.radius,
                scale: self.pulses.scale(index),
                line_opacity: self.pulses.line_opacity(index),
                connector: Connector {
                    from: center,
                    to: body.position,
                },
                signal: self.pulses.signal(index),
            })
            .collect();

        self.snapshot = Arc::new(Snapshot {
            container: self.container,
            center,
            nodes,
            frame: self.frame,
        });
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn strategy(&self) -> LayoutStrategy {
        self.strategy
    }

    pub fn container(&self) -> Container {
        self.container
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn skills(&self) -> &[SkillEntry] {
        &self.skills
    }

    pub fn has_pending_relayout(&self) -> bool {
        self.relayout_pending
    }

    pub fn is_animating(&self) -> bool {
        self.state == LoopState::Running || self.pulses.is_animating()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_skills;

    fn options(animate: bool) -> CloudOptions {
        CloudOptions {
            animate,
            seed: Some(99),
            ..CloudOptions::default()
        }
    }

    #[test]
    fn drift_and_velocity_seeds_stay_in_range() {
        let cloud = Cloud::new(default_skills(), options(true));
        for body in cloud.bodies() {
            assert!(body.drift >= 1.0 && body.drift < 2.3);
            assert!(body.velocity.x.abs() <= 0.45 && body.velocity.y.abs() <= 0.45);
            assert_eq!(body.radius, 32.0);
        }
    }

    #[test]
    fn relayout_keeps_velocities() {
        let mut cloud = Cloud::new(default_skills(), options(false));
        cloud.mount(Container::new(460.0, 460.0));
        let before = cloud
            .bodies()
            .iter()
            .map(|body| body.velocity)
            .collect::<Vec<_>>();

        cloud.relayout();
        let after = cloud
            .bodies()
            .iter()
            .map(|body| body.velocity)
            .collect::<Vec<_>>();
        assert_eq!(before, after);
    }

    #[test]
    fn frame_before_mount_mounts() {
        let mut cloud = Cloud::new(default_skills(), options(true));
        let snapshot = cloud.frame(Container::new(460.0, 460.0), 1.0 / 60.0).unwrap();
        assert_eq!(cloud.state(), LoopState::Running);
        assert_eq!(snapshot.nodes.len(), 24);
        assert_eq!(snapshot.frame, 1);
    }

    #[test]
    fn resize_waits_for_next_frame() {
        let mut cloud = Cloud::new(default_skills(), options(false));
        cloud.mount(Container::new(460.0, 460.0));
        let mounted = cloud.snapshot();

        cloud.resize(Container::new(900.0, 900.0));
        cloud.resize(Container::new(300.0, 300.0));
        assert!(cloud.has_pending_relayout());
        assert_eq!(cloud.snapshot(), mounted);

        cloud.frame(Container::new(300.0, 300.0), 1.0 / 60.0);
        assert!(!cloud.has_pending_relayout());
        for body in cloud.bodies() {
            assert!(body.position.x <= 300.0 - PLACEMENT_PAD);
            assert!(body.position.y <= 300.0 - PLACEMENT_PAD);
        }
    }

    #[test]
    fn degenerate_mount_places_on_first_valid_frame() {
        let mut cloud = Cloud::new(default_skills(), options(true));
        cloud.mount(Container::new(0.0, 0.0));
        assert!(cloud.has_pending_relayout());

        let skipped = cloud.frame(Container::new(0.0, 0.0), 1.0 / 60.0).unwrap();
        assert_eq!(skipped.frame, 0);
        assert!(skipped.nodes.is_empty());

        let placed = cloud.frame(Container::new(460.0, 460.0), 1.0 / 60.0).unwrap();
        assert_eq!(placed.nodes.len(), 24);
        assert!(
            placed
                .nodes
                .iter()
                .all(|node| node.position.is_finite() && node.connector.to.is_finite())
        );

        cloud.frame(Container::new(460.0, 460.0), 1.0 / 60.0);
        assert!(!cloud.has_pending_relayout());
        assert!(cloud.bodies().iter().all(|body| body.position.x.is_finite()));
    }

    #[test]
    fn hover_is_published_through_snapshot() {
        let mut cloud = Cloud::new(default_skills(), options(true));
        let container = Container::new(460.0, 460.0);
        cloud.mount(container);
        cloud.pointer_enter(3);

        let snapshot = cloud.frame(container, 1.0).unwrap();
        assert!((snapshot.nodes[3].scale - HOVER_SCALE).abs() < 1e-6);
        assert!((snapshot.nodes[3].line_opacity - HOVER_LINE_OPACITY).abs() < 1e-6);
        assert_eq!(snapshot.nodes[0].scale, REST_SCALE);

        cloud.pointer_leave(3);
        let snapshot = cloud.frame(container, 1.0).unwrap();
        assert!((snapshot.nodes[3].scale - REST_SCALE).abs() < 1e-6);
    }

    #[test]
    fn teardown_is_final() {
        let mut cloud = Cloud::new(default_skills(), options(true));
        let container = Container::new(460.0, 460.0);
        cloud.frame(container, 1.0 / 60.0);
        cloud.resize(Container::new(300.0, 300.0));
        cloud.teardown();

        assert_eq!(cloud.state(), LoopState::TornDown);
        assert!(!cloud.has_pending_relayout());
        assert!(!cloud.is_animating());
        assert!(cloud.frame(container, 1.0 / 60.0).is_none());

        cloud.mount(container);
        cloud.pointer_enter(0);
        cloud.relayout();
        assert_eq!(cloud.state(), LoopState::TornDown);
        assert!(cloud.bodies().is_empty());
    }

    #[test]
    fn platform_signal_only_matters_for_auto() {
        let mut config = CloudConfig::default();
        config.motion = crate::motion::MotionPreference::Auto;
        assert!(!CloudOptions::from_config_with_platform(&config, true).animate);
        assert!(CloudOptions::from_config_with_platform(&config, false).animate);

        config.motion = crate::motion::MotionPreference::On;
        assert!(CloudOptions::from_config_with_platform(&config, true).animate);
    }
}
