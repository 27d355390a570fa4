use eframe::egui::{
    self, Align2, Color32, FontId, Painter, Rect, Sense, Stroke, StrokeKind, Ui, vec2,
};

use skills_cloud::cloud::{HOVER_LINE_OPACITY, REST_LINE_OPACITY};
use skills_cloud::{Container, LoopState, Snapshot};
use skills_cloud::util::initials;

use super::super::ViewModel;
use super::super::render_utils::{
    BACKGROUND, PRIMARY, blend_color, breathe_scale, draw_background, local_to_screen,
    tone_color, with_opacity,
};

const LINE_BASE_ALPHA: f32 = 0.20;
const LINE_WIDTH: f32 = 1.2;
const SIGNAL_RADIUS: f32 = 3.2;
const NODE_CORNER_RADIUS: f32 = 16.0;

impl ViewModel {
    pub(in crate::app) fn draw_cloud(&mut self, ui: &mut Ui) {
        let width = ui.available_width();
        let height = self.config.height.min(ui.available_height()).max(0.0);
        let (rect, response) = ui.allocate_exact_size(vec2(width, height), Sense::hover());
        let container = Container::new(rect.width(), rect.height());

        match self.canvas_size {
            None => self.cloud.mount(container),
            Some(previous) if previous != rect.size() => self.cloud.resize(container),
            Some(_) => {}
        }
        self.canvas_size = Some(rect.size());

        let frame_delta_seconds = ui
            .ctx()
            .input(|input| input.stable_dt)
            .clamp(1.0 / 240.0, 1.0 / 20.0);
        let Some(snapshot) = self.cloud.frame(container, frame_delta_seconds) else {
            return;
        };

        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        let hovered = Self::hovered_node(ui, rect, &response, &snapshot);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        self.draw_connectors(&painter, rect, &snapshot);

        let breathing = self.cloud.state() == LoopState::Running;
        let center_scale = if breathing {
            breathe_scale(ui.input(|input| input.time))
        } else {
            1.0
        };
        self.draw_center_label(&painter, rect, &snapshot, center_scale);
        self.draw_nodes(&painter, rect, &snapshot, hovered);

        if let Some(index) = hovered
            && let Some(node) = snapshot.nodes.get(index)
        {
            draw_tooltip(
                &painter,
                local_to_screen(rect, node.position),
                node.name.clone(),
            );
        }

        self.apply_hover(hovered);

        if self.cloud.is_animating() || breathing {
            ui.ctx().request_repaint();
        }
    }

    fn draw_connectors(&self, painter: &Painter, rect: Rect, snapshot: &Snapshot) {
        for node in &snapshot.nodes {
            let alpha = LINE_BASE_ALPHA * node.line_opacity;
            painter.line_segment(
                [
                    local_to_screen(rect, node.connector.from),
                    local_to_screen(rect, node.connector.to),
                ],
                Stroke::new(LINE_WIDTH, with_opacity(Color32::WHITE, alpha)),
            );
        }

        for signal in snapshot.nodes.iter().filter_map(|node| node.signal) {
            painter.circle_filled(
                local_to_screen(rect, signal.position),
                SIGNAL_RADIUS,
                with_opacity(PRIMARY, signal.opacity),
            );
        }
    }

    fn draw_center_label(&self, painter: &Painter, rect: Rect, snapshot: &Snapshot, scale: f32) {
        let galley = painter.layout_no_wrap(
            self.config.center_label.clone(),
            FontId::proportional(12.0 * scale),
            with_opacity(Color32::WHITE, 0.9),
        );
        let pill_size = (galley.size() + vec2(56.0, 40.0)) * scale;
        let center = local_to_screen(rect, snapshot.center);
        let pill = Rect::from_center_size(center, pill_size);

        painter.rect_filled(pill, pill_size.y * 0.5, with_opacity(BACKGROUND, 0.6));
        painter.rect_stroke(
            pill,
            pill_size.y * 0.5,
            Stroke::new(1.0, with_opacity(Color32::WHITE, 0.12)),
            StrokeKind::Inside,
        );
        painter.galley(center - galley.size() * 0.5, galley, Color32::WHITE);
    }

    fn draw_nodes(
        &self,
        painter: &Painter,
        rect: Rect,
        snapshot: &Snapshot,
        hovered: Option<usize>,
    ) {
        let resting_fill = with_opacity(Color32::WHITE, 0.05);
        let hovered_fill = with_opacity(Color32::WHITE, 0.10);

        // Hovered node last so it sits on top.
        let order = (0..snapshot.nodes.len())
            .filter(|&index| Some(index) != hovered)
            .chain(hovered);

        for index in order {
            let node = &snapshot.nodes[index];
            let Some(skill) = self.cloud.skills().get(index) else {
                continue;
            };

            let side = node.radius * 2.0 * node.scale;
            let center = local_to_screen(rect, node.position);
            let node_rect = Rect::from_center_size(center, vec2(side, side));
            let is_hovered = hovered == Some(index);

            let fill = if is_hovered {
                hovered_fill
            } else {
                resting_fill
            };
            painter.rect_filled(node_rect, NODE_CORNER_RADIUS * node.scale, fill);
            painter.rect_stroke(
                node_rect,
                NODE_CORNER_RADIUS * node.scale,
                Stroke::new(
                    1.0,
                    blend_color(
                        with_opacity(Color32::WHITE, 0.08),
                        with_opacity(PRIMARY, 0.6),
                        (node.line_opacity - REST_LINE_OPACITY)
                            / (HOVER_LINE_OPACITY - REST_LINE_OPACITY),
                    ),
                ),
                StrokeKind::Inside,
            );
            painter.text(
                center,
                Align2::CENTER_CENTER,
                initials(&skill.name),
                FontId::proportional(node.radius * 0.55 * node.scale),
                tone_color(skill.tone),
            );
        }
    }
}

fn draw_tooltip(painter: &Painter, anchor: egui::Pos2, text: String) {
    let galley = painter.layout_no_wrap(
        text,
        FontId::proportional(11.0),
        with_opacity(Color32::WHITE, 0.9),
    );
    let size = galley.size() + vec2(24.0, 8.0);
    // Centred horizontally, bottom edge just above the anchor.
    let min = anchor - vec2(size.x * 0.5, size.y * 1.1);
    let pill = Rect::from_min_size(min, size);

    painter.rect_filled(pill, size.y * 0.5, with_opacity(BACKGROUND, 0.7));
    painter.rect_stroke(
        pill,
        size.y * 0.5,
        Stroke::new(1.0, with_opacity(Color32::WHITE, 0.12)),
        StrokeKind::Inside,
    );
    painter.galley(pill.min + vec2(12.0, 4.0), galley, Color32::WHITE);
}
