use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::PhysicsConfig;
use crate::vec2::Vec2;

/// Protocol version - increment when making breaking changes.
pub const PROTOCOL_VERSION: u32 = 1;

// === Server -> Client ===

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
#[serde(tag = "type")]
pub enum ServerMsg {
    #[serde(rename = "welcome")]
    Welcome(WelcomeMsg),
    #[serde(rename = "update")]
    Update(UpdateMsg),
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMsg {
    pub protocol_version: u32,
    pub server_version: String,
    pub self_id: u32,
    pub physics: PhysicsConfig,
}

/// Full world snapshot, sent every tick.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
pub struct UpdateMsg {
    pub players: Vec<PlayerWire>,
    pub map: Vec<ObstacleWire>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
pub struct PlayerWire {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub hitbox: HitboxWire,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
pub struct HitboxWire {
    pub position: Vec2,
    pub width: f64,
    pub height: f64,
    pub color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
pub struct ObstacleWire {
    pub x: f64,
    pub y: f64,
    pub color: String,
    pub width: f64,
    pub height: f64,
}

// === Client -> Server ===

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
#[serde(tag = "type")]
pub enum ClientMsg {
    #[serde(rename = "keyPressUpdate")]
    KeyPressUpdate(PressedKeys),
}

/// Snapshot of held keys. Missing fields read as released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../../client/src/shared/generated/")]
pub struct PressedKeys {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub space: bool,
}

impl ClientMsg {
    /// Parse a client frame. Anything unparseable decodes to "no keys pressed".
    pub fn parse_lossy(text: &str) -> ClientMsg {
        serde_json::from_str(text)
            .unwrap_or_else(|_| ClientMsg::KeyPressUpdate(PressedKeys::default()))
    }
}
