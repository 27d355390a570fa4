use std::f32::consts::PI;

use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

use skills_cloud::config::Tone;

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(12, 14, 19);
pub(super) const PRIMARY: Color32 = Color32::from_rgb(129, 140, 248);

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (color.a() as f32 * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn tone_color(tone: Option<Tone>) -> Color32 {
    match tone {
        Some(Tone::Primary) => PRIMARY,
        Some(Tone::Muted) => Color32::from_rgb(148, 156, 170),
        Some(Tone::White) | None => Color32::from_gray(245),
    }
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 24.0, BACKGROUND);

    // Two soft highlights, upper left and lower right.
    for (anchor, reach, strength) in [
        (Vec2::new(0.30, 0.20), 0.45, 0.14),
        (Vec2::new(0.70, 0.70), 0.55, 0.10),
    ] {
        let center = rect.min + rect.size() * anchor;
        let radius = rect.size().max_elem() * reach;
        let rings = 6;
        for ring in 0..rings {
            let t = (ring + 1) as f32 / rings as f32;
            let alpha = strength / rings as f32;
            painter.circle_filled(
                center,
                radius * t,
                with_opacity(Color32::WHITE, alpha * 0.6),
            );
        }
    }
}

pub(super) fn local_to_screen(rect: Rect, local: Vec2) -> Pos2 {
    rect.min + local
}

pub(super) fn screen_to_local(rect: Rect, screen: Pos2) -> Vec2 {
    screen - rect.min
}

/// Gentle 1.0 -> 1.04 -> 1.0 pulse with a 3.4 second period.
pub(super) fn breathe_scale(time_secs: f64) -> f32 {
    const HALF_PERIOD_SECS: f64 = 1.7;
    let phase = (time_secs / HALF_PERIOD_SECS) as f32 * PI;
    1.0 + 0.04 * (0.5 - 0.5 * phase.cos())
}
