use std::env;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub const REDUCED_MOTION_ENV: &str = "SKILLS_CLOUD_REDUCED_MOTION";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreference {
    /// Follow the platform's reduced-motion signal.
    Auto,
    #[default]
    On,
    Off,
}

impl MotionPreference {
    pub fn resolve(self, platform_reduced: bool) -> bool {
        match self {
            Self::Off => false,
            Self::On => true,
            Self::Auto => !platform_reduced,
        }
    }
}

impl fmt::Display for MotionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Auto => "auto",
            Self::On => "on",
            Self::Off => "off",
        };
        f.write_str(label)
    }
}

pub fn platform_prefers_reduced_motion() -> bool {
    env::var(REDUCED_MOTION_ENV)
        .map(|value| is_truthy(&value))
        .unwrap_or(false)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_preferences_ignore_platform() {
        assert!(MotionPreference::On.resolve(true));
        assert!(!MotionPreference::Off.resolve(false));
    }

    #[test]
    fn auto_defers_to_platform() {
        assert!(MotionPreference::Auto.resolve(false));
        assert!(!MotionPreference::Auto.resolve(true));
    }

    #[test]
    fn truthy_values() {
        for value in ["1", "true", "YES", " on "] {
            assert!(is_truthy(value), "{value}");
        }
        for value in ["", "0", "false", "reduce-ish"] {
            assert!(!is_truthy(value), "{value}");
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let parsed: MotionPreference = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(parsed, MotionPreference::Auto);
        assert_eq!(serde_json::to_string(&MotionPreference::Off).unwrap(), "\"off\"");
    }
}
