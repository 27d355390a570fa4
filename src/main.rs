mod app;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};

use skills_cloud::{CloudConfig, LayoutStrategy, MotionPreference};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file with the skill list and display settings.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, value_enum)]
    motion: Option<MotionPreference>,
    #[arg(long)]
    height: Option<f32>,
    #[arg(long)]
    center_label: Option<String>,
    /// Seconds between idle signal sweeps.
    #[arg(long)]
    pulse_every: Option<f32>,
    #[arg(long, value_enum)]
    layout: Option<LayoutStrategy>,
    /// Fixed seed for reproducible placement and drift.
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn resolve_config(&self) -> Result<CloudConfig> {
        let mut config = match &self.config {
            Some(path) => {
                info!("loading config from {}", path.display());
                CloudConfig::load(path)?
            }
            None => CloudConfig::default(),
        };

        if let Some(motion) = self.motion {
            config.motion = motion;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(label) = &self.center_label {
            config.center_label = label.clone();
        }
        if let Some(pulse_every) = self.pulse_every {
            config.pulse_every = pulse_every;
        }
        if let Some(layout) = self.layout {
            config.layout = layout;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        config
            .validate()
            .context("invalid command line override")?;
        Ok(config)
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = args.resolve_config().unwrap_or_else(|error| {
        error!("{error:#}; falling back to the default configuration");
        CloudConfig::default()
    });
    info!(
        "{} skills, motion {}, layout {}",
        config.skills.len(),
        config.motion,
        config.layout
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1040.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        "skills-cloud",
        options,
        Box::new(move |cc| Ok(Box::new(app::SkillsCloudApp::new(cc, config)))),
    )
}
