//! Arcade game snapshot pushed by the game server once per tick.

use serde::{Deserialize, Serialize};

use super::{default_true, default_on_error};

/// Axis-aligned body used for the player and for bullets.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Body {
    #[serde(deserialize_with = "default_on_error")]
    pub x: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub y: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub width: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub height: f32,
}

impl Body {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Alien {
    #[serde(deserialize_with = "default_on_error")]
    pub x: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub y: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub width: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub height: f32,
    /// CSS hex color chosen by the server per row
    #[serde(deserialize_with = "default_on_error")]
    pub color: String,
    /// Missing means active; `null` or a non-boolean means inactive
    #[serde(default = "default_true", deserialize_with = "default_on_error")]
    pub active: bool,
    #[serde(deserialize_with = "default_on_error")]
    pub row: u32,
    #[serde(deserialize_with = "default_on_error")]
    pub col: u32,
}

impl Default for Alien {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            color: String::new(),
            active: true,
            row: 0,
            col: 0,
        }
    }
}

/// One destructible block of a barrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarrierBlock {
    #[serde(deserialize_with = "default_on_error")]
    pub x: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub y: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub width: f32,
    #[serde(deserialize_with = "default_on_error")]
    pub height: f32,
    #[serde(default = "default_true", deserialize_with = "default_on_error")]
    pub active: bool,
}

impl Default for BarrierBlock {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            active: true,
        }
    }
}

/// Complete game frame state.
///
/// The default value is the placeholder shown before the first push:
/// an empty field with level 1 and three lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameSnapshot {
    #[serde(deserialize_with = "default_on_error")]
    pub player: Body,
    #[serde(deserialize_with = "default_on_error")]
    pub aliens: Vec<Alien>,
    #[serde(deserialize_with = "default_on_error")]
    pub player_bullets: Vec<Body>,
    #[serde(deserialize_with = "default_on_error")]
    pub enemy_bullets: Vec<Body>,
    /// Barriers, each a list of blocks
    #[serde(deserialize_with = "default_on_error")]
    pub barriers: Vec<Vec<BarrierBlock>>,
    #[serde(deserialize_with = "default_on_error")]
    pub score: i64,
    #[serde(deserialize_with = "default_on_error")]
    pub level: i64,
    #[serde(deserialize_with = "default_on_error")]
    pub lives: i64,
    #[serde(deserialize_with = "default_on_error")]
    pub game_over: bool,
    #[serde(deserialize_with = "default_on_error")]
    pub game_win: bool,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            player: Body::new(0.0, 0.0, 50.0, 30.0),
            aliens: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            barriers: Vec::new(),
            score: 0,
            level: 1,
            lives: 3,
            game_over: false,
            game_win: false,
        }
    }
}

impl GameSnapshot {
    /// Number of barrier blocks still standing.
    pub fn active_blocks(&self) -> usize {
        self.barriers
            .iter()
            .flat_map(|barrier| barrier.iter())
            .filter(|block| block.active)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_server_payload() {
        let payload = serde_json::json!({
            "player": {"x": 385, "y": 540, "width": 30, "height": 30},
            "aliens": [{"x": 100, "y": 80, "width": 40, "height": 30, "active": true,
                        "row": 0, "col": 0, "color": "#ef4444"}],
            "playerBullets": [{"x": 398, "y": 530, "width": 4, "height": 5}],
            "enemyBullets": [],
            "barriers": [[{"x": 120, "y": 450, "width": 26.6, "height": 13.3, "active": false}]],
            "score": 120,
            "level": 2,
            "lives": 1,
            "gameOver": false,
            "gameWin": false
        });

        let snapshot: GameSnapshot = serde_json::from_value(payload).unwrap();
        assert_eq!(snapshot.player, Body::new(385.0, 540.0, 30.0, 30.0));
        assert_eq!(snapshot.aliens[0].color, "#ef4444");
        assert_eq!(snapshot.player_bullets.len(), 1);
        assert_eq!(snapshot.score, 120);
        assert_eq!(snapshot.level, 2);
        assert_eq!(snapshot.lives, 1);
        assert_eq!(snapshot.active_blocks(), 0);
    }

    #[test]
    fn test_sparse_payload_renders_as_empty() {
        let snapshot: GameSnapshot = serde_json::from_str(r#"{"score": 5, "barriers": null}"#).unwrap();
        assert_eq!(snapshot.score, 5);
        assert!(snapshot.aliens.is_empty());
        assert!(snapshot.barriers.is_empty());
        assert!(!snapshot.game_over);
    }

    #[test]
    fn test_mistyped_counter_keeps_rest_of_snapshot() {
        let snapshot: GameSnapshot =
            serde_json::from_str(r#"{"score": "120", "level": 2, "lives": 1, "player": {"x": "left", "y": 540}}"#)
                .unwrap();
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.level, 2);
        assert_eq!(snapshot.lives, 1);
        assert_eq!(snapshot.player.x, 0.0);
        assert_eq!(snapshot.player.y, 540.0);
    }

    #[test]
    fn test_alien_active_flag() {
        let missing: Alien = serde_json::from_str(r#"{"x": 1}"#).unwrap();
        assert!(missing.active);

        let snapshot: GameSnapshot =
            serde_json::from_str(r#"{"aliens": [{"x": 1, "active": null}, {"x": 2, "active": "yes"}]}"#).unwrap();
        assert_eq!(snapshot.aliens.len(), 2);
        assert!(!snapshot.aliens[0].active);
        assert!(!snapshot.aliens[1].active);
    }

    #[test]
    fn test_blocks_without_flag_are_active() {
        let block: BarrierBlock = serde_json::from_str(r#"{"x": 1, "y": 2, "width": 3, "height": 4}"#).unwrap();
        assert!(block.active);
    }
}
