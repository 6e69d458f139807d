//! Game frame composition.
//!
//! Clear-then-redraw: every frame repaints the whole surface from the
//! snapshot. There is no diffing against the previous frame.

use crate::config::SurfaceConfig;
use crate::rendering::display_list::{DisplayList, Font, Rect, Rgba, TextAlign};
use crate::rendering::starfield::Starfield;
use crate::snapshot::GameSnapshot;

pub const BACKGROUND: Rgba = Rgba::rgb(0x11, 0x11, 0x11);
pub const PLAYER: Rgba = Rgba::rgb(0x4a, 0xde, 0x80);
pub const PLAYER_BULLET: Rgba = Rgba::rgb(0xfb, 0xbf, 0x24);
pub const ENEMY_BULLET: Rgba = Rgba::rgb(0xef, 0x44, 0x44);
pub const BARRIER: Rgba = Rgba::rgb(0x22, 0xc5, 0x5e);
pub const ALIEN_FALLBACK: Rgba = Rgba::rgb(0x9c, 0xa3, 0xaf);
pub const OVERLAY_VEIL: Rgba = Rgba::BLACK.with_alpha(178);
pub const GAME_OVER_TEXT: Rgba = Rgba::rgb(0xef, 0x44, 0x44);
pub const WIN_TEXT: Rgba = Rgba::rgb(0x4a, 0xde, 0x80);

const TITLE_FONT: Font = Font { size: 48.0, bold: true, monospace: true };
const HINT_FONT: Font = Font { size: 24.0, bold: false, monospace: true };

/// Composes one frame of the game surface.
pub fn compose_game_frame(snapshot: &GameSnapshot, surface: &SurfaceConfig, starfield: &Starfield) -> DisplayList {
    let mut list = DisplayList::new(surface.width, surface.height);
    list.clear(BACKGROUND);

    for star in starfield.stars() {
        list.fill_rect(*star, Rgba::WHITE);
    }

    draw_player(&mut list, snapshot);

    for bullet in &snapshot.player_bullets {
        list.fill_rect(Rect::new(bullet.x, bullet.y, bullet.width, bullet.height), PLAYER_BULLET);
    }
    for bullet in &snapshot.enemy_bullets {
        list.fill_rect(Rect::new(bullet.x, bullet.y, bullet.width, bullet.height), ENEMY_BULLET);
    }

    for alien in snapshot.aliens.iter().filter(|a| a.active) {
        let color = Rgba::from_hex_or(&alien.color, ALIEN_FALLBACK);
        list.fill_rect(Rect::new(alien.x, alien.y, alien.width, alien.height), color);
        // eyes
        list.fill_rect(Rect::new(alien.x + 10.0, alien.y + 8.0, 5.0, 5.0), Rgba::BLACK);
        list.fill_rect(Rect::new(alien.x + 25.0, alien.y + 8.0, 5.0, 5.0), Rgba::BLACK);
    }

    for block in snapshot.barriers.iter().flatten().filter(|b| b.active) {
        list.fill_rect(Rect::new(block.x, block.y, block.width, block.height), BARRIER);
    }

    if snapshot.game_over {
        draw_overlay(&mut list, "GAME OVER", GAME_OVER_TEXT);
    } else if snapshot.game_win {
        draw_overlay(&mut list, "YOU WIN", WIN_TEXT);
    }

    list
}

fn draw_player(list: &mut DisplayList, snapshot: &GameSnapshot) {
    let player = &snapshot.player;
    list.fill_rect(Rect::new(player.x, player.y, player.width, player.height), PLAYER);
    // turret
    list.fill_rect(Rect::new(player.x + player.width / 2.0 - 3.0, player.y - 5.0, 6.0, 5.0), Rgba::WHITE);
}

fn draw_overlay(list: &mut DisplayList, title: &str, color: Rgba) {
    let (w, h) = (list.width, list.height);
    list.fill_rect(Rect::new(0.0, 0.0, w, h), OVERLAY_VEIL);
    list.text(w / 2.0, h / 2.0, title, TITLE_FONT, color, TextAlign::Center);
    list.text(w / 2.0, h / 2.0 + 50.0, "Press R to restart", HINT_FONT, Rgba::WHITE, TextAlign::Center);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{Alien, BarrierBlock, Body};

    fn surface() -> SurfaceConfig {
        SurfaceConfig::default()
    }

    fn busy_snapshot() -> GameSnapshot {
        GameSnapshot {
            player: Body::new(385.0, 540.0, 30.0, 30.0),
            aliens: vec![
                Alien { x: 100.0, y: 80.0, width: 40.0, height: 30.0, color: "#3b82f6".into(), ..Alien::default() },
                Alien { x: 147.0, y: 80.0, width: 40.0, height: 30.0, color: "#3b82f6".into(), active: false, ..Alien::default() },
            ],
            player_bullets: vec![Body::new(398.0, 500.0, 4.0, 5.0)],
            enemy_bullets: vec![Body::new(120.0, 200.0, 4.0, 5.0), Body::new(220.0, 300.0, 4.0, 5.0)],
            barriers: vec![vec![
                BarrierBlock { x: 120.0, y: 450.0, width: 26.0, height: 13.0, active: true },
                BarrierBlock { x: 146.0, y: 450.0, width: 26.0, height: 13.0, active: false },
            ]],
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn test_frame_draws_each_entity() {
        let list = compose_game_frame(&busy_snapshot(), &surface(), &Starfield::empty());

        assert_eq!(list.commands()[0], crate::rendering::DrawCommand::Clear(BACKGROUND));
        assert_eq!(list.count_rects(PLAYER), 1);
        assert_eq!(list.count_rects(PLAYER_BULLET), 1);
        assert_eq!(list.count_rects(ENEMY_BULLET), 2);
        // inactive aliens and blocks are skipped
        assert_eq!(list.count_rects(Rgba::rgb(0x3b, 0x82, 0xf6)), 1);
        assert_eq!(list.count_rects(Rgba::BLACK), 2);
        assert_eq!(list.count_rects(BARRIER), 1);
        assert_eq!(list.texts().count(), 0);
    }

    #[test]
    fn test_empty_lists_draw_no_entities() {
        let snapshot = GameSnapshot::default();
        let list = compose_game_frame(&snapshot, &surface(), &Starfield::empty());

        // background, player body and turret only
        assert_eq!(list.len(), 3);
        assert_eq!(list.count_rects(ENEMY_BULLET), 0);
        assert_eq!(list.count_rects(BARRIER), 0);
    }

    #[test]
    fn test_game_over_overlay() {
        let snapshot = GameSnapshot { game_over: true, ..busy_snapshot() };
        let list = compose_game_frame(&snapshot, &surface(), &Starfield::empty());

        let texts: Vec<_> = list.texts().collect();
        assert_eq!(texts, vec!["GAME OVER", "Press R to restart"]);
        assert_eq!(list.count_rects(OVERLAY_VEIL), 1);
    }

    #[test]
    fn test_win_overlay() {
        let snapshot = GameSnapshot { game_win: true, ..GameSnapshot::default() };
        let list = compose_game_frame(&snapshot, &surface(), &Starfield::empty());
        assert_eq!(list.texts().next(), Some("YOU WIN"));
    }

    #[test]
    fn test_bad_alien_color_falls_back() {
        let snapshot = GameSnapshot {
            aliens: vec![Alien { color: "teal".into(), width: 40.0, height: 30.0, ..Alien::default() }],
            ..GameSnapshot::default()
        };
        let list = compose_game_frame(&snapshot, &surface(), &Starfield::empty());
        assert_eq!(list.count_rects(ALIEN_FALLBACK), 1);
    }

    #[test]
    fn test_starfield_is_drawn() {
        let field = Starfield::generate(3, 800.0, 600.0);
        let list = compose_game_frame(&GameSnapshot::default(), &surface(), &field);
        // stars plus the player turret
        assert_eq!(list.count_rects(Rgba::WHITE), field.stars().len() + 1);
    }
}
