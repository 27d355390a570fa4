use eframe::egui::Vec2;

use super::Container;
use super::pulse::SignalFrame;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    pub from: Vec2,
    pub to: Vec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NodeFrame {
    pub name: String,
    pub position: Vec2,
    pub radius: f32,
    pub scale: f32,
    pub line_opacity: f32,
    pub connector: Connector,
    pub signal: Option<SignalFrame>,
}

/// Immutable view of the cloud published once per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub container: Container,
    pub center: Vec2,
    pub nodes: Vec<NodeFrame>,
    /// Number of frames the cloud had run when this was published.
    pub frame: u64,
}

impl Snapshot {
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.nodes.iter().map(|node| node.position)
    }

    /// Nearest node whose scaled disc contains `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let distance = (node.position - point).length();
                (distance <= node.radius * node.scale).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }
}
