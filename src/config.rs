use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::cloud::LayoutStrategy;
use crate::motion::MotionPreference;

pub const DEFAULT_HEIGHT: f32 = 460.0;
pub const DEFAULT_NODE_SIZE: f32 = 46.0;
pub const DEFAULT_CENTER_LABEL: &str = "SKILLS";
pub const DEFAULT_PULSE_EVERY_SECS: f32 = 5.8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    White,
    Primary,
    Muted,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconKind {
    #[default]
    Svg,
    Img,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tone: Option<Tone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<IconKind>,
}

impl SkillEntry {
    pub fn new(name: &str, icon: &str) -> Self {
        Self {
            name: name.to_owned(),
            icon: icon.to_owned(),
            size: None,
            tone: None,
            kind: None,
        }
    }

    fn with_kind(mut self, kind: IconKind) -> Self {
        self.kind = Some(kind);
        self
    }

    fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = Some(tone);
        self
    }

    pub fn icon_size(&self) -> f32 {
        self.size.unwrap_or(DEFAULT_NODE_SIZE)
    }

    /// Half the rendered box, which pads the icon by 9px on each side.
    pub fn radius(&self) -> f32 {
        (self.icon_size() + 18.0) * 0.5
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudConfig {
    pub height: f32,
    pub motion: MotionPreference,
    pub center_label: String,
    pub pulse_every: f32,
    pub layout: LayoutStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub skills: Vec<SkillEntry>,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            height: DEFAULT_HEIGHT,
            motion: MotionPreference::default(),
            center_label: DEFAULT_CENTER_LABEL.to_owned(),
            pulse_every: DEFAULT_PULSE_EVERY_SECS,
            layout: LayoutStrategy::default(),
            seed: None,
            skills: default_skills(),
        }
    }
}

impl CloudConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config = Self::from_json(&raw)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("invalid JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(anyhow!("height must be positive, got {}", self.height));
        }

        if !self.pulse_every.is_finite() || self.pulse_every <= 0.0 {
            return Err(anyhow!(
                "pulse_every must be a positive number of seconds, got {}",
                self.pulse_every
            ));
        }

        for (index, skill) in self.skills.iter().enumerate() {
            if skill.name.trim().is_empty() {
                return Err(anyhow!("skill #{index} has an empty name"));
            }
            if let Some(size) = skill.size
                && (!size.is_finite() || size <= 0.0)
            {
                return Err(anyhow!(
                    "skill {:?} has a non-positive size {size}",
                    skill.name
                ));
            }
        }

        Ok(())
    }
}

pub fn default_skills() -> Vec<SkillEntry> {
    const WHITE_SVG: [(&str, &str); 22] = [
        ("TypeScript", "/skills/typescript-colored.svg"),
        ("React", "/skills/react-colored.svg"),
        ("Next.js", "/skills/next.svg"),
        ("Node.js", "/skills/nodejs-colored.svg"),
        ("Unity", "/skills/unity-featured.svg"),
        ("Unreal Engine", "/skills/unreal-featured.svg"),
        ("Figma", "/skills/figma-colored.svg"),
        ("CSS", "/skills/css3-colored.svg"),
        ("HTML5", "/skills/html5-colored.svg"),
        ("JavaScript", "/skills/javascript-original.svg"),
        ("Angular", "/skills/angularjs-original.svg"),
        ("Fusion", "/skills/Fusion.svg"),
        ("photoshop", "/skills/photoshop-colored.svg"),
        ("AfterFX", "/skills/AfterFX.svg"),
        ("illustrator", "/skills/illustrator.svg"),
        ("Python", "/skills/python.svg"),
        ("Godot", "/skills/godot.svg"),
        ("C#", "/skills/csharp-colored.svg"),
        ("C++", "/skills/cplusplus-colored.svg"),
        ("Kotlin", "/skills/kotlin-colored.svg"),
        ("Maya", "/skills/maya-2017.svg"),
        ("3ds Max", "/skills/max.svg"),
    ];

    let mut skills = WHITE_SVG
        .iter()
        .map(|(name, icon)| {
            SkillEntry::new(name, icon)
                .with_kind(IconKind::Svg)
                .with_tone(Tone::White)
        })
        .collect::<Vec<_>>();

    // Blender keeps its own colours and sits after Unreal in the list.
    skills.insert(
        6,
        SkillEntry::new("Blender", "/skills/blender.svg").with_kind(IconKind::Svg),
    );
    skills.push(
        SkillEntry::new("Revit", "/skills/revit.svg")
            .with_kind(IconKind::Img)
            .with_tone(Tone::White),
    );
    skills
}
