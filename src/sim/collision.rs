//! Collision predicates for the per-frame step
//!
//! Everything here is a pure test over rectangles; responses live in `tick`.

use super::rect::Rect;

/// One-sided swept landing test.
///
/// True when the body's bottom edge was at or above the platform top before
/// this frame's move, is at or below it afterwards, and the two overlap
/// horizontally. Bodies moving up or sideways through a platform never land.
#[inline]
pub fn lands_on(prev_bottom: f32, body: &Rect, platform: &Rect) -> bool {
    prev_bottom <= platform.top() && body.bottom() >= platform.top() && body.overlaps_x(platform)
}

/// Bottom edge has sunk past the bottom of the world
#[inline]
pub fn below_world(body: &Rect, world_height: f32) -> bool {
    body.bottom() > world_height
}

/// Indices of every rectangle the body overlaps, in order
pub fn overlapping<'a>(
    body: &'a Rect,
    rects: impl Iterator<Item = &'a Rect> + 'a,
) -> impl Iterator<Item = usize> + 'a {
    rects
        .enumerate()
        .filter(move |(_, r)| body.overlaps(r))
        .map(|(i, _)| i)
}
