use std::collections::VecDeque;

use eframe::egui::{self, Align, Context, Layout};

use skills_cloud::{Cloud, CloudConfig};

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(config: CloudConfig) -> Self {
        Self {
            cloud: Cloud::from_config(&config),
            config,
            canvas_size: None,
            hovered: None,
            show_fps_bar: true,
            fps_show_current: true,
            fps_show_average: true,
            fps_show_low: false,
            fps_show_high: false,
            fps_show_frame_time: true,
            fps_current: 0.0,
            fps_samples: VecDeque::new(),
        }
    }

    pub(in crate::app) fn show(&mut self, ctx: &Context) {
        self.update_fps_counter(ctx);

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("skills-cloud");
                    ui.separator();
                    ui.label(format!("layout: {}", self.cloud.strategy()));
                    ui.label(format!("motion: {}", self.config.motion));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(self.cloud_status_text());
                        if let Some(fps_text) = self.fps_display_text() {
                            ui.label(fps_text);
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::CentralPanel::default().show(ctx, |ui| self.draw_cloud(ui));
    }
}
