use eframe::egui::Vec2;

use super::tween::{Ease, Tween};

pub const REST_SCALE: f32 = 1.0;
pub const HOVER_SCALE: f32 = 1.12;
pub const REST_LINE_OPACITY: f32 = 0.55;
pub const HOVER_LINE_OPACITY: f32 = 1.0;

const SCALE_DURATION: f32 = 0.18;
const LINE_ENTER_DURATION: f32 = 0.2;
const LINE_LEAVE_DURATION: f32 = 0.25;

pub const SIGNAL_TRAVEL_SECS: f32 = 0.55;
pub const SIGNAL_FADE_SECS: f32 = 0.25;
pub const SWEEP_STAGGER_SECS: f32 = 0.07;
const MIN_SWEEP_INTERVAL_SECS: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignalFrame {
    pub position: Vec2,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug)]
enum SignalPhase {
    Travel(Tween),
    Fade(Tween),
}

/// A marker moving along one connector. Endpoints are fixed when fired.
#[derive(Clone, Copy, Debug)]
struct Signal {
    from: Vec2,
    to: Vec2,
    phase: SignalPhase,
}

impl Signal {
    fn fire(from: Vec2, to: Vec2) -> Self {
        Self {
            from,
            to,
            phase: SignalPhase::Travel(Tween::new(0.0, 1.0, SIGNAL_TRAVEL_SECS, Ease::Power2Out)),
        }
    }

    /// Returns `false` once the fade has finished.
    fn advance(&mut self, dt: f32) -> bool {
        match &mut self.phase {
            SignalPhase::Travel(tween) => {
                tween.advance(dt);
                if tween.is_done() {
                    self.phase = SignalPhase::Fade(Tween::new(
                        1.0,
                        0.0,
                        SIGNAL_FADE_SECS,
                        Ease::Power1Out,
                    ));
                }
                true
            }
            SignalPhase::Fade(tween) => {
                tween.advance(dt);
                !tween.is_done()
            }
        }
    }

    fn frame(&self) -> SignalFrame {
        match self.phase {
            SignalPhase::Travel(tween) => {
                let t = tween.value();
                SignalFrame {
                    position: self.from + (self.to - self.from) * t,
                    opacity: t,
                }
            }
            SignalPhase::Fade(tween) => SignalFrame {
                position: self.to,
                opacity: tween.value(),
            },
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct NodeEffects {
    scale: Tween,
    line_opacity: Tween,
    signal: Option<Signal>,
}

impl Default for NodeEffects {
    fn default() -> Self {
        Self {
            scale: Tween::rest(REST_SCALE),
            line_opacity: Tween::rest(REST_LINE_OPACITY),
            signal: None,
        }
    }
}

fn sanitize_step(dt: f32) -> f32 {
    if dt.is_finite() { dt.max(0.0) } else { 0.0 }
}

#[derive(Clone, Copy, Debug)]
struct PendingTrigger {
    node: usize,
    delay: f32,
}

/// Repeating sweep that fires every node in order with a fixed stagger.
#[derive(Clone, Debug)]
pub struct SweepTimer {
    interval: f32,
    node_count: usize,
    until_next: f32,
    pending: Vec<PendingTrigger>,
}

impl SweepTimer {
    /// Schedules the first sweep right away.
    pub fn start(interval: f32, node_count: usize) -> Self {
        let mut timer = Self {
            interval: interval.max(MIN_SWEEP_INTERVAL_SECS),
            node_count,
            until_next: 0.0,
            pending: Vec::with_capacity(node_count),
        };
        timer.schedule_sweep(0.0);
        timer.until_next = timer.interval;
        timer
    }

    fn schedule_sweep(&mut self, overshoot: f32) {
        self.pending.extend((0..self.node_count).map(|node| PendingTrigger {
            node,
            delay: node as f32 * SWEEP_STAGGER_SECS - overshoot,
        }));
    }

    /// Returns the nodes whose trigger came due during `dt`, in firing order.
    pub fn advance(&mut self, dt: f32) -> Vec<usize> {
        let dt = sanitize_step(dt);
        for trigger in &mut self.pending {
            trigger.delay -= dt;
        }

        self.until_next -= dt;
        // Sweeps missed during a stall collapse into one.
        if self.until_next <= -self.interval {
            self.schedule_sweep(0.0);
            self.until_next = self.interval;
        }
        while self.until_next <= 0.0 {
            self.schedule_sweep(-self.until_next);
            self.until_next += self.interval;
        }

        let mut due = self
            .pending
            .iter()
            .filter(|trigger| trigger.delay <= 0.0)
            .copied()
            .collect::<Vec<_>>();
        due.sort_by(|a, b| a.delay.total_cmp(&b.delay));
        self.pending.retain(|trigger| trigger.delay > 0.0);
        due.into_iter().map(|trigger| trigger.node).collect()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

#[derive(Clone, Debug)]
pub struct PulseBoard {
    effects: Vec<NodeEffects>,
    sweep: Option<SweepTimer>,
    signals_enabled: bool,
}

impl PulseBoard {
    pub fn new(node_count: usize, signals_enabled: bool) -> Self {
        Self {
            effects: vec![NodeEffects::default(); node_count],
            sweep: None,
            signals_enabled,
        }
    }

    pub fn start_sweep(&mut self, interval: f32) {
        if self.signals_enabled {
            self.sweep = Some(SweepTimer::start(interval, self.effects.len()));
        }
    }

    /// Fires a signal along `from -> to`, replacing any marker already in
    /// flight for this node.
    pub fn trigger(&mut self, node: usize, from: Vec2, to: Vec2) {
        if !self.signals_enabled {
            return;
        }
        if let Some(effects) = self.effects.get_mut(node) {
            effects.signal = Some(Signal::fire(from, to));
        }
    }

    pub fn pointer_enter(&mut self, node: usize, from: Vec2, to: Vec2) {
        let Some(effects) = self.effects.get_mut(node) else {
            return;
        };
        effects
            .scale
            .retarget(HOVER_SCALE, SCALE_DURATION, Ease::Power2Out);
        effects
            .line_opacity
            .retarget(HOVER_LINE_OPACITY, LINE_ENTER_DURATION, Ease::Power1Out);
        self.trigger(node, from, to);
    }

    pub fn pointer_leave(&mut self, node: usize) {
        let Some(effects) = self.effects.get_mut(node) else {
            return;
        };
        effects
            .scale
            .retarget(REST_SCALE, SCALE_DURATION, Ease::Power2Out);
        effects
            .line_opacity
            .retarget(REST_LINE_OPACITY, LINE_LEAVE_DURATION, Ease::Power1Out);
    }

    /// Advances every animation by `dt` seconds. Sweep triggers read their
    /// endpoints through `connector` at the moment they fire.
    pub fn advance(&mut self, dt: f32, connector: impl Fn(usize) -> Option<(Vec2, Vec2)>) {
        let dt = sanitize_step(dt);
        for effects in &mut self.effects {
            effects.scale.advance(dt);
            effects.line_opacity.advance(dt);
            if let Some(signal) = effects.signal.as_mut()
                && !signal.advance(dt)
            {
                effects.signal = None;
            }
        }

        let due = self
            .sweep
            .as_mut()
            .map(|sweep| sweep.advance(dt))
            .unwrap_or_default();
        for node in due {
            if let Some((from, to)) = connector(node) {
                self.trigger(node, from, to);
            }
        }
    }

    pub fn cancel_all(&mut self) {
        self.sweep = None;
        for effects in &mut self.effects {
            *effects = NodeEffects::default();
        }
    }

    pub fn is_animating(&self) -> bool {
        self.sweep.is_some()
            || self.effects.iter().any(|effects| {
                !effects.scale.is_done()
                    || !effects.line_opacity.is_done()
                    || effects.signal.is_some()
            })
    }

    pub fn has_sweep(&self) -> bool {
        self.sweep.is_some()
    }

    pub fn scale(&self, node: usize) -> f32 {
        self.effects
            .get(node)
            .map_or(REST_SCALE, |effects| effects.scale.value())
    }

    pub fn line_opacity(&self, node: usize) -> f32 {
        self.effects
            .get(node)
            .map_or(REST_LINE_OPACITY, |effects| effects.line_opacity.value())
    }

    pub fn signal(&self, node: usize) -> Option<SignalFrame> {
        self.effects
            .get(node)
            .and_then(|effects| effects.signal.as_ref())
            .map(Signal::frame)
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::*;

    const FROM: Vec2 = vec2(230.0, 230.0);
    const TO: Vec2 = vec2(400.0, 230.0);

    #[test]
    fn signal_travels_then_fades_out() {
        let mut board = PulseBoard::new(1, true);
        board.trigger(0, FROM, TO);

        let start = board.signal(0).unwrap();
        assert_eq!(start.position, FROM);
        assert_eq!(start.opacity, 0.0);

        board.advance(SIGNAL_TRAVEL_SECS, |_| None);
        let arrived = board.signal(0).unwrap();
        assert!((arrived.position - TO).length() < 1e-3);
        assert!((arrived.opacity - 1.0).abs() < 1e-6);

        board.advance(SIGNAL_FADE_SECS, |_| None);
        assert!(board.signal(0).is_none());
    }

    #[test]
    fn retrigger_replaces_in_flight_signal() {
        let mut board = PulseBoard::new(1, true);
        board.trigger(0, FROM, TO);
        board.advance(0.3, |_| None);
        board.trigger(0, FROM, vec2(230.0, 400.0));

        let restarted = board.signal(0).unwrap();
        assert_eq!(restarted.position, FROM);
        assert_eq!(restarted.opacity, 0.0);
    }

    #[test]
    fn disabled_signals_ignore_triggers_but_hover_still_scales() {
        let mut board = PulseBoard::new(2, false);
        board.start_sweep(1.0);
        assert!(!board.has_sweep());

        board.pointer_enter(1, FROM, TO);
        assert!(board.signal(1).is_none());
        board.advance(1.0, |_| None);
        assert!((board.scale(1) - HOVER_SCALE).abs() < 1e-6);
        assert!((board.line_opacity(1) - HOVER_LINE_OPACITY).abs() < 1e-6);

        board.pointer_leave(1);
        board.advance(1.0, |_| None);
        assert!((board.scale(1) - REST_SCALE).abs() < 1e-6);
        assert!((board.line_opacity(1) - REST_LINE_OPACITY).abs() < 1e-6);
    }

    #[test]
    fn sweep_staggers_nodes_and_repeats() {
        let mut timer = SweepTimer::start(1.0, 3);
        assert_eq!(timer.advance(0.01), vec![0]);
        assert_eq!(timer.advance(0.07), vec![1]);
        assert_eq!(timer.advance(0.07), vec![2]);
        assert!(timer.advance(0.5).is_empty());
        assert_eq!(timer.pending_len(), 0);

        // Crosses the one second mark.
        assert_eq!(timer.advance(0.36), vec![0]);
        assert_eq!(timer.pending_len(), 2);
    }

    #[test]
    fn non_finite_step_is_ignored() {
        let mut timer = SweepTimer::start(1.0, 3);
        assert_eq!(timer.advance(f32::INFINITY), vec![0]);
        assert!(timer.advance(f32::NAN).is_empty());
        assert_eq!(timer.pending_len(), 2);

        let mut board = PulseBoard::new(2, true);
        board.start_sweep(1.0);
        board.pointer_enter(1, FROM, TO);
        board.advance(f32::INFINITY, |_| Some((FROM, TO)));
        assert!(board.scale(1).is_finite());
        assert!(board.signal(1).is_some_and(|signal| signal.opacity.is_finite()));
    }

    #[test]
    fn long_stall_fires_a_single_sweep() {
        let mut timer = SweepTimer::start(1.0, 3);
        timer.advance(0.01);

        let due = timer.advance(1e6);
        // Two leftovers from the first sweep plus the head of one new sweep.
        assert_eq!(due.len(), 3);
        assert_eq!(timer.pending_len(), 2);

        assert_eq!(timer.advance(0.07), vec![1]);
    }

    #[test]
    fn sweep_fires_through_connector_lookup() {
        let mut board = PulseBoard::new(2, true);
        board.start_sweep(5.8);
        board.advance(0.08, |node| Some((FROM, FROM + vec2(node as f32 * 10.0, 0.0))));

        assert!(board.signal(0).is_some());
        assert!(board.signal(1).is_some());
    }

    #[test]
    fn cancel_all_stops_everything() {
        let mut board = PulseBoard::new(3, true);
        board.start_sweep(2.0);
        board.pointer_enter(2, FROM, TO);
        board.cancel_all();

        assert!(!board.is_animating());
        assert!(board.signal(2).is_none());
        assert_eq!(board.scale(2), REST_SCALE);
    }
}
