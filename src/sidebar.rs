//! Sidebar controls: intents sent by the host's panel and the state
//! snapshot it renders from.
//!
//! Display controls set (never toggle) their option, so a checkbox always
//! ends up matching the value it shows.

use serde::{Deserialize, Serialize};

use crate::camera::CameraView;

/// One user action from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "value", rename_all = "snake_case")]
pub enum SidebarIntent {
    /// Grid checkbox.
    ShowGrid(bool),
    /// Edges checkbox.
    ShowEdges(bool),
    /// Point-sprites checkbox.
    ShowPointSprites(bool),
    /// Metadata overlay checkbox.
    ShowMetadata(bool),
    /// FPS counter checkbox.
    ShowFps(bool),
    /// Play (`true`) or pause (`false`) scene animation.
    PlayAnimation(bool),
    /// Pause and rewind to the start of the range.
    ResetAnimation,
    /// Animate to one of the axis-aligned views.
    SnapView(CameraView),
    /// Jump to the saved default view.
    ResetView,
}

impl SidebarIntent {
    /// Parse an IPC message of the form
    /// `{"action": "show_grid", "value": true}`.
    #[must_use]
    pub fn from_message(msg: &serde_json::Value) -> Option<Self> {
        let action = msg.get("action")?.as_str()?;
        let flag = || msg.get("value")?.as_bool();
        match action {
            "show_grid" => flag().map(Self::ShowGrid),
            "show_edges" => flag().map(Self::ShowEdges),
            "show_point_sprites" => flag().map(Self::ShowPointSprites),
            "show_metadata" => flag().map(Self::ShowMetadata),
            "show_fps" => flag().map(Self::ShowFps),
            "play_animation" => flag().map(Self::PlayAnimation),
            "reset_animation" => Some(Self::ResetAnimation),
            "snap_view" => msg
                .get("value")?
                .as_str()
                .and_then(CameraView::from_name)
                .map(Self::SnapView),
            "reset_view" => Some(Self::ResetView),
            _ => None,
        }
    }
}

/// Values the sidebar controls should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SidebarState {
    /// Grid shown.
    pub grid: bool,
    /// Edges shown.
    pub edges: bool,
    /// Point sprites enabled.
    pub point_sprites: bool,
    /// Metadata overlay shown.
    pub metadata: bool,
    /// FPS counter shown.
    pub fps: bool,
    /// Whether the animation group is visible (the scene is animated).
    pub show_animation_controls: bool,
    /// Whether animation is playing.
    pub animation_running: bool,
}
