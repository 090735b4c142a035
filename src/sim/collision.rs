//! Platform collision queries
//!
//! Bodies land on platform tops from above and are blocked by platform sides.
//! A body "stands on" a platform when its bottom edge sits at the platform top
//! (within tolerance) and it overlaps the platform horizontally.

use super::geometry::{Platform, Rect, Terrain};
use crate::consts::LANDING_TOLERANCE;

/// Find the platform a descending body lands on this tick
///
/// `vel_y` is the velocity already including this tick's gravity. A body lands
/// when its next bottom edge reaches the platform top while its current bottom
/// edge is no more than `tolerance` below it.
pub fn find_landing<'a>(
    platforms: &'a [Platform],
    body: &Rect,
    vel_y: f32,
    tolerance: f32,
) -> Option<&'a Platform> {
    if vel_y < 0.0 {
        return None;
    }
    let next_bottom = body.bottom() + vel_y;
    platforms.iter().find(|p| {
        next_bottom >= p.top()
            && body.bottom() <= p.top() + tolerance
            && p.rect.overlaps_horizontally(body)
    })
}

/// Whether `body` rests on top of `platform`
pub fn stands_on(platform: &Platform, body: &Rect) -> bool {
    body.bottom() >= platform.top()
        && body.bottom() <= platform.top() + LANDING_TOLERANCE
        && platform.rect.overlaps_horizontally(body)
}

/// Whether moving to `candidate` would push into the side of a platform
///
/// Platforms the candidate would stand on never block.
pub fn blocked_sideways(platforms: &[Platform], candidate: &Rect) -> bool {
    platforms
        .iter()
        .any(|p| !stands_on(p, candidate) && p.intersects(candidate))
}

/// Whether `rect` touches any platform at all
pub fn touches_any(platforms: &[Platform], rect: &Rect) -> bool {
    platforms.iter().any(|p| p.intersects(rect))
}

/// Terrain under a body's feet as (grass, ice)
pub fn terrain_underfoot(platforms: &[Platform], body: &Rect) -> (bool, bool) {
    platforms
        .iter()
        .filter(|p| stands_on(p, body))
        .fold((false, false), |(grass, ice), p| match p.terrain {
            Terrain::Grass => (true, ice),
            Terrain::Ice => (grass, true),
            Terrain::Normal => (grass, ice),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ground() -> Vec<Platform> {
        vec![
            Platform::new(100.0, 450.0, 1000.0, 100.0, Terrain::Normal),
            Platform::new(210.0, 280.0, 210.0, 1.0, Terrain::Grass),
            Platform::new(775.0, 280.0, 210.0, 1.0, Terrain::Ice),
        ]
    }

    #[test]
    fn test_landing_from_above() {
        let platforms = ground();
        // Bottom edge at 448, falling 3 units -> crosses the ground top at 450
        let body = Rect::new(300.0, 358.0, 60.0, 90.0);
        let hit = find_landing(&platforms, &body, 3.0, LANDING_TOLERANCE);
        assert_eq!(hit.map(|p| p.top()), Some(450.0));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let platforms = ground();
        let body = Rect::new(300.0, 360.0, 60.0, 90.0);
        assert!(find_landing(&platforms, &body, -5.0, LANDING_TOLERANCE).is_none());
    }

    #[test]
    fn test_no_landing_from_below() {
        let platforms = ground();
        // Body well below the grass ledge top, moving down, must not snap up onto it
        let body = Rect::new(250.0, 200.0, 60.0, 90.0);
        assert!(find_landing(&platforms[1..2], &body, 2.0, LANDING_TOLERANCE).is_none());
    }

    #[test]
    fn test_side_block_but_not_floor() {
        let platforms = ground();
        // Standing on the ground: never blocked by it
        let standing = Rect::new(300.0, 360.0, 60.0, 90.0);
        assert!(!blocked_sideways(&platforms, &standing));

        // Walking into the ground block from the left while below its top
        let low = Rect::new(50.0, 470.0, 60.0, 90.0);
        assert!(blocked_sideways(&platforms, &low));
    }

    #[test]
    fn test_terrain_underfoot() {
        let platforms = ground();
        let on_grass = Rect::new(250.0, 190.0, 60.0, 90.0);
        assert_eq!(terrain_underfoot(&platforms, &on_grass), (true, false));
        let on_ice = Rect::new(800.0, 190.0, 60.0, 90.0);
        assert_eq!(terrain_underfoot(&platforms, &on_ice), (false, true));
        let airborne = Rect::new(800.0, 100.0, 60.0, 90.0);
        assert_eq!(terrain_underfoot(&platforms, &airborne), (false, false));
    }
}
