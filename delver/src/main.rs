//! Generate one level and print it with the starting field of view.
//!
//! Legend: `@` player, `N`/`E`/`*` actors, `+`/`/` closed/open doors,
//! `#`/`.` terrain in view, dimmed to `░` for explored-but-unseen walls.

use delver::{ActorKind, Level, MapKind};
use warren_core::Point;
use warren_rl::BspParams;

fn main() {
    let mut rng = rand::rng();
    let roster = [
        (
            "warden",
            ActorKind::Npc {
                dialogue: "warden_intro".to_string(),
            },
        ),
        (
            "gloom husk",
            ActorKind::Enemy {
                health: 50,
                xp_reward: 40,
            },
        ),
        (
            "rattle shade",
            ActorKind::Enemy {
                health: 80,
                xp_reward: 100,
            },
        ),
        ("sealed chest", ActorKind::Chest { looted: false }),
    ];

    let level = match Level::generate(
        64,
        24,
        &MapKind::Rooms(BspParams::default()),
        &roster,
        8,
        &mut rng,
    ) {
        Ok(level) => level,
        Err(err) => {
            eprintln!("level generation failed: {err}");
            std::process::exit(1);
        }
    };

    for y in 0..level.grid.height() {
        let mut line = String::new();
        for x in 0..level.grid.width() {
            line.push(glyph(&level, Point::new(x, y)));
        }
        println!("{line}");
    }
    println!(
        "{} rooms, {} doors, {} actors",
        level.rooms.len(),
        level.doors.len(),
        level.actors.len()
    );
}

fn glyph(level: &Level, p: Point) -> char {
    if p == level.player.pos {
        return '@';
    }
    if level.in_fov(p) {
        if let Some(i) = level.actor_at(p) {
            return match level.actors[i].kind {
                ActorKind::Npc { .. } => 'N',
                ActorKind::Enemy { .. } => 'E',
                ActorKind::Chest { .. } => '*',
            };
        }
        if let Some(door) = level.doors.at(p) {
            return if door.open { '/' } else { '+' };
        }
        let tile = level.grid.at(p).unwrap_or_default();
        return if tile.blocked { '#' } else { '.' };
    }
    match level.grid.at(p) {
        Some(tile) if tile.explored && tile.blocked => '░',
        Some(tile) if tile.explored => '·',
        _ => ' ',
    }
}
