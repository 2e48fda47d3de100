//! The player and the actors placed on a level.

use serde::{Deserialize, Serialize};
use warren_core::Point;

/// What kind of thing an actor is, with its kind-specific payload.
///
/// Serialized with an explicit `kind` tag so saves are resolved by variant
/// match, never by class-name strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActorKind {
    Npc { dialogue: String },
    Enemy { health: i32, xp_reward: i32 },
    Chest { looted: bool },
}

/// A non-player entity occupying one walkable cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Point,
    pub name: String,
    #[serde(flatten)]
    pub kind: ActorKind,
}

/// The player: position plus the handful of stats the level tracks.
///
/// Combat arithmetic, inventory and quest state live with the surrounding
/// game logic; the level only needs a position to cast FOV from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Point,
    pub health: i32,
    pub max_health: i32,
    pub level: i32,
    pub xp: i32,
}

impl Player {
    pub fn new(pos: Point) -> Self {
        Self {
            pos,
            health: 100,
            max_health: 100,
            level: 1,
            xp: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_serializes_with_kind_tag() {
        let actor = Actor {
            pos: Point::new(3, 4),
            name: "gloom husk".to_string(),
            kind: ActorKind::Enemy {
                health: 50,
                xp_reward: 40,
            },
        };
        let json = serde_json::to_string(&actor).unwrap();
        assert!(json.contains("\"kind\":\"enemy\""), "got: {json}");

        let back: Actor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, actor);
    }

    #[test]
    fn all_kinds_round_trip() {
        let kinds = [
            ActorKind::Npc {
                dialogue: "warden_intro".to_string(),
            },
            ActorKind::Enemy {
                health: 80,
                xp_reward: 100,
            },
            ActorKind::Chest { looted: true },
        ];
        for kind in kinds {
            let json = serde_json::to_string(&kind).unwrap();
            let back: ActorKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = serde_json::from_str::<ActorKind>(r#"{"kind":"dragon"}"#);
        assert!(err.is_err());
    }
}
