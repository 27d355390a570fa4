#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out.
    Power1Out,
    /// Cubic ease-out.
    Power2Out,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
    ease: Ease,
}

impl Tween {
    pub fn rest(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            duration: 0.0,
            elapsed: 0.0,
            ease: Ease::Linear,
        }
    }

    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            ease,
        }
    }

    /// Starts a new tween toward `to` from wherever this one currently is.
    pub fn retarget(&mut self, to: f32, duration: f32, ease: Ease) {
        *self = Self::new(self.value(), to, duration, ease);
    }

    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= f32::EPSILON {
            1.0
        } else {
            self.elapsed / self.duration
        }
    }

    pub fn value(&self) -> f32 {
        self.from + (self.to - self.from) * self.ease.apply(self.progress())
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_done(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eases_hit_endpoints() {
        for ease in [Ease::Linear, Ease::Power1Out, Ease::Power2Out] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
        assert!(Ease::Power2Out.apply(0.5) > Ease::Power1Out.apply(0.5));
    }

    #[test]
    fn tween_reaches_target_and_stops() {
        let mut tween = Tween::new(1.0, 1.12, 0.18, Ease::Power2Out);
        tween.advance(0.09);
        assert!(tween.value() > 1.0 && tween.value() < 1.12);
        tween.advance(1.0);
        assert!(tween.is_done());
        assert!((tween.value() - 1.12).abs() < 1e-6);
    }

    #[test]
    fn retarget_continues_from_current_value() {
        let mut tween = Tween::new(0.0, 10.0, 1.0, Ease::Linear);
        tween.advance(0.5);
        tween.retarget(0.0, 1.0, Ease::Linear);
        assert!((tween.value() - 5.0).abs() < 1e-6);
        assert_eq!(tween.target(), 0.0);
    }

    #[test]
    fn rest_is_already_done() {
        let tween = Tween::rest(0.55);
        assert!(tween.is_done());
        assert_eq!(tween.value(), 0.55);
    }
}
