pub mod cloud;
pub mod config;
pub mod motion;
pub mod util;

pub use cloud::{Cloud, CloudOptions, Container, LayoutStrategy, LoopState, Snapshot};
pub use config::{CloudConfig, SkillEntry};
pub use motion::MotionPreference;
