use std::collections::VecDeque;

use eframe::egui::{Context, Vec2};
use log::info;

use skills_cloud::{Cloud, CloudConfig};

mod canvas;
mod render_utils;
mod ui;

pub struct SkillsCloudApp {
    model: ViewModel,
}

struct ViewModel {
    config: CloudConfig,
    cloud: Cloud,
    canvas_size: Option<Vec2>,
    hovered: Option<usize>,
    show_fps_bar: bool,
    fps_show_current: bool,
    fps_show_average: bool,
    fps_show_low: bool,
    fps_show_high: bool,
    fps_show_frame_time: bool,
    fps_current: f32,
    fps_samples: VecDeque<f32>,
}

impl SkillsCloudApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: CloudConfig) -> Self {
        Self {
            model: ViewModel::new(config),
        }
    }
}

impl eframe::App for SkillsCloudApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.model.show(ctx);
    }
}

impl Drop for SkillsCloudApp {
    fn drop(&mut self) {
        info!("closing skills cloud window");
        self.model.cloud.teardown();
    }
}
