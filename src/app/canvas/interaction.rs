use eframe::egui::{self, Rect, Ui};

use skills_cloud::Snapshot;

use super::super::ViewModel;
use super::super::render_utils::screen_to_local;

impl ViewModel {
    pub(in crate::app) fn hovered_node(
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
        snapshot: &Snapshot,
    ) -> Option<usize> {
        if !response.hovered() {
            return None;
        }

        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        snapshot.hit_test(screen_to_local(rect, pointer))
    }

    pub(in crate::app) fn apply_hover(&mut self, hovered: Option<usize>) {
        if hovered == self.hovered {
            return;
        }

        if let Some(previous) = self.hovered {
            self.cloud.pointer_leave(previous);
        }
        if let Some(next) = hovered {
            self.cloud.pointer_enter(next);
        }
        self.hovered = hovered;
    }
}
