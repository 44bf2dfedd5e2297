//! Player vs. platform collision resolution
//!
//! Two axis-separated passes run once per tick over the whole obstacle list:
//! a vertical landing pass, then a horizontal wall pass that sees the
//! (possibly just snapped) hitbox. Landing is predicted with `bottom + vel.y`
//! so a fast fall cannot skip past a thin platform in a single tick.
//!
//! Obstacles are tested in list order and the first match in each pass wins.

use super::geometry::Rect;
use super::player::Player;

/// What the two passes touched this tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Contacts {
    /// Platform the player landed on
    pub ground: Option<Rect>,
    /// Platform that blocked horizontal movement
    pub wall: Option<Rect>,
}

/// True if the player will reach `surface`'s top this tick from above,
/// moving down (or resting), with horizontal overlap.
pub fn is_landing(player: &Player, surface: &Rect) -> bool {
    player.hitbox_bottom() + player.vel.y >= surface.top()
        && player.hitbox_top() < surface.top()
        && player.hitbox().overlaps_horizontally(surface)
        && player.vel.y >= 0.0
}

/// Vertical pass. Lands the player on the first qualifying obstacle, or
/// marks the player falling if none qualifies.
pub fn resolve_vertical<I>(player: &mut Player, obstacles: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    for surface in obstacles {
        if is_landing(player, &surface) {
            player.land_on(surface.top());
            return Some(surface);
        }
    }
    player.is_falling = true;
    None
}

/// Horizontal pass. Pushes the player out of the first obstacle it overlaps
/// while moving sideways and zeroes horizontal velocity.
///
/// Overlaps with `vel.x == 0` are left alone, so a resting player can sit
/// slightly inside a wall.
pub fn resolve_horizontal<I>(player: &mut Player, obstacles: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    for wall in obstacles {
        if !player.hitbox().overlaps(&wall) {
            continue;
        }
        if player.vel.x > 0.0 {
            player.set_hitbox_right(wall.left());
        } else if player.vel.x < 0.0 {
            player.set_hitbox_left(wall.right());
        } else {
            continue;
        }
        player.stop();
        return Some(wall);
    }
    None
}

/// Run both passes in order
pub fn resolve<I>(player: &mut Player, obstacles: I) -> Contacts
where
    I: IntoIterator<Item = Rect> + Clone,
{
    let ground = resolve_vertical(player, obstacles.clone());
    let wall = resolve_horizontal(player, obstacles);
    Contacts { ground, wall }
}
