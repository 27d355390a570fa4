use eframe::egui::{self, Ui};

use skills_cloud::{LayoutStrategy, LoopState};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Cloud Controls");
        ui.separator();
        ui.add_space(4.0);

        let mut strategy = self.cloud.strategy();
        ui.horizontal_wrapped(|ui| {
            ui.selectable_value(&mut strategy, LayoutStrategy::Scattered, "Scattered")
                .on_hover_text("Random scatter biased toward an outer ring.");
            ui.selectable_value(&mut strategy, LayoutStrategy::Ring, "Ring")
                .on_hover_text("Evenly spaced around the centre label.");
        });
        if strategy != self.cloud.strategy() {
            self.cloud.set_strategy(strategy);
        }

        if ui
            .button("Relayout")
            .on_hover_text("Run a fresh placement pass; velocities are kept.")
            .clicked()
        {
            self.cloud.relayout();
        }

        ui.separator();

        let loop_label = match self.cloud.state() {
            LoopState::Unmounted => "waiting for first frame",
            LoopState::Running => "relaxing every frame",
            LoopState::Static => "static layout (reduced motion)",
            LoopState::TornDown => "stopped",
        };
        ui.label(format!("Loop: {loop_label}"));
        ui.label(format!("Sweep every {:.1}s", self.config.pulse_every));
        if let Some(seed) = self.config.seed {
            ui.label(format!("Seed: {seed}"));
        }

        ui.separator();

        egui::CollapsingHeader::new("Frame stats")
            .default_open(false)
            .show(ui, |ui| {
                ui.checkbox(&mut self.show_fps_bar, "Show FPS bar");
                ui.add_enabled_ui(self.show_fps_bar, |ui| {
                    ui.checkbox(&mut self.fps_show_current, "Current");
                    ui.checkbox(&mut self.fps_show_average, "Average");
                    ui.checkbox(&mut self.fps_show_low, "Low");
                    ui.checkbox(&mut self.fps_show_high, "High");
                    ui.checkbox(&mut self.fps_show_frame_time, "Frame time");
                });
            });

        ui.separator();
        ui.label("Skills");
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, skill) in self.cloud.skills().iter().enumerate() {
                let label = if self.hovered == Some(index) {
                    egui::RichText::new(&skill.name).strong()
                } else {
                    egui::RichText::new(&skill.name)
                };
                ui.label(label).on_hover_text(&skill.icon);
            }
        });
    }
}
