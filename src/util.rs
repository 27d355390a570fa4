use eframe::egui::Vec2;

/// Smallest distance used as a divisor when two points coincide.
pub const DISTANCE_EPSILON: f32 = 0.0001;

/// Reference refresh rate that a delta ratio of 1.0 corresponds to.
pub const REFERENCE_FPS: f32 = 60.0;

/// Upper bound on a single frame's delta ratio.
pub const MAX_DELTA_RATIO: f32 = 3.0;

/// Clamps without panicking when `min > max`; `min` wins in that case.
pub fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

pub fn clamp_vec(value: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(
        clamp_lenient(value.x, min.x, max.x),
        clamp_lenient(value.y, min.y, max.y),
    )
}

/// Length of `delta`, with zero replaced by [`DISTANCE_EPSILON`].
pub fn guarded_length(delta: Vec2) -> f32 {
    let length = delta.length();
    if length > 0.0 && length.is_finite() {
        length
    } else {
        DISTANCE_EPSILON
    }
}

pub fn frame_delta_ratio(delta_seconds: f32) -> f32 {
    if !delta_seconds.is_finite() || delta_seconds <= 0.0 {
        return 0.0;
    }

    (delta_seconds * REFERENCE_FPS).min(MAX_DELTA_RATIO)
}

pub fn initials(name: &str) -> String {
    let mut words = name
        .split(|c: char| c.is_whitespace() || c == '.' || c == '-')
        .filter(|word| !word.is_empty());

    match (words.next(), words.next()) {
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .collect::<String>()
            .to_uppercase(),
        (Some(only), None) => {
            let mut chars = only.chars();
            let head = chars.next().map(|c| c.to_uppercase().to_string());
            let tail = chars.next().map(|c| c.to_string());
            head.into_iter().chain(tail).collect()
        }
        _ => String::new(),
    }
}
