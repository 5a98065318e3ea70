//! Display projection: boat snapshots to card text, card styles and the
//! movement log.

use eframe::egui::Color32;
use shared::{domain::Scene, protocol::BoatSnapshot};

pub const WINDOW_BACKGROUND: Color32 = Color32::from_rgb(0xf0, 0xf4, 0xf7);
pub const CONTROL_FRAME: Color32 = Color32::from_rgb(0xe1, 0xec, 0xf4);
pub const CONTROL_BUTTON: Color32 = Color32::from_rgb(0xd6, 0xea, 0xff);
pub const EMERGENCY_BUTTON: Color32 = Color32::from_rgb(0xfd, 0xde, 0xde);
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xaa, 0xaa, 0xaa);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardStyle {
    Removed,
    Running,
    RunningBlink,
    Stopped,
}

impl CardStyle {
    pub fn for_boat(boat: &BoatSnapshot, blink_on: bool) -> Self {
        match (boat.active, boat.running) {
            (false, _) => Self::Removed,
            (true, true) if blink_on => Self::RunningBlink,
            (true, true) => Self::Running,
            (true, false) => Self::Stopped,
        }
    }

    pub fn fill(self) -> Color32 {
        match self {
            Self::Removed => Color32::from_rgb(0xff, 0xcc, 0xcc),
            Self::Running => Color32::from_rgb(0xb3, 0xff, 0xcc),
            Self::RunningBlink => Color32::from_rgb(0xa0, 0xf0, 0xa0),
            Self::Stopped => Color32::from_rgb(0xff, 0xe0, 0xb3),
        }
    }
}

pub fn card_label(boat: &BoatSnapshot) -> String {
    format!(
        "{}\n{} ({})\nStatus: {}",
        boat.boat_id,
        boat.scene,
        boat.phase,
        boat.status().label()
    )
}

/// Boats currently in `scene`, ordered by phase then id.
pub fn boats_in_scene(boats: &[BoatSnapshot], scene: Scene) -> Vec<&BoatSnapshot> {
    let mut in_scene = boats
        .iter()
        .filter(|boat| boat.scene == scene)
        .collect::<Vec<_>>();
    in_scene.sort_by_key(|boat| (boat.phase, boat.boat_id));
    in_scene
}

/// One block per boat with history, each truncated to its `limit` most
/// recent entries.
pub fn movement_log(boats: &[BoatSnapshot], limit: usize) -> String {
    let mut lines = Vec::new();
    for boat in boats.iter().filter(|boat| !boat.history.is_empty()) {
        lines.push(format!("{} History:", boat.boat_id));
        lines.extend(
            boat.recent_history(limit)
                .iter()
                .map(|entry| format!("  {entry}")),
        );
    }
    lines.join("\n")
}
