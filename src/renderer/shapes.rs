//! Screen-space geometry for one frame

use super::vertex::{DrawRect, Vertex, colors};
use crate::consts::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
use crate::sim::rect::Rect;
use crate::sim::state::{PlatformKind, Session};
use crate::sim::{camera_offset, to_screen};

fn screen_rect(rect: &Rect, offset: f32, color: [f32; 4]) -> DrawRect {
    DrawRect::new(
        rect.left(),
        to_screen(rect.top(), offset),
        rect.size.x,
        rect.size.y,
        color,
    )
}

/// Everything to draw this frame, back to front:
/// platforms, hazards, unclaimed checkpoints, then the player
pub fn draw_list(session: &Session) -> Vec<DrawRect> {
    let world = &session.world;
    let offset = camera_offset(session.player.pos.y);

    let mut rects = Vec::with_capacity(
        world.platforms.len() + world.hazards.len() + world.checkpoints.len() + 1,
    );

    for platform in &world.platforms {
        let color = match platform.kind {
            PlatformKind::Floor => colors::FLOOR,
            PlatformKind::Tier => colors::PLATFORM,
        };
        rects.push(screen_rect(&platform.rect, offset, color));
    }

    for hazard in &world.hazards {
        rects.push(screen_rect(&hazard.rect, offset, colors::HAZARD));
    }

    for checkpoint in world.checkpoints.iter().filter(|c| !c.claimed) {
        rects.push(screen_rect(&checkpoint.rect, offset, colors::CHECKPOINT));
    }

    rects.push(screen_rect(&session.player.rect(), offset, colors::PLAYER));

    rects
}

/// Drop rectangles that fall entirely outside the viewport
pub fn visible(rects: &[DrawRect]) -> impl Iterator<Item = &DrawRect> {
    rects.iter().filter(|r| {
        let [_, y] = r.position;
        let [_, h] = r.size;
        y + h > 0.0 && y < VIEWPORT_HEIGHT
    })
}

/// Two triangles per rectangle
pub fn rect_vertices(rects: &[DrawRect]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(rects.len() * 6);

    for r in rects {
        let [x, y] = r.position;
        let [w, h] = r.size;

        vertices.push(Vertex::new(x, y, r.color));
        vertices.push(Vertex::new(x + w, y, r.color));
        vertices.push(Vertex::new(x, y + h, r.color));

        vertices.push(Vertex::new(x, y + h, r.color));
        vertices.push(Vertex::new(x + w, y, r.color));
        vertices.push(Vertex::new(x + w, y + h, r.color));
    }

    vertices
}

/// Screen-space origins of background tiles covering the viewport.
///
/// Tiles repeat every `tile_h` world pixels so the background scrolls with
/// the camera.
pub fn background_tiles(offset: f32, tile_w: f32, tile_h: f32) -> Vec<[f32; 2]> {
    if tile_w <= 0.0 || tile_h <= 0.0 {
        return Vec::new();
    }

    // Align to the tile grid in world space
    let first_row = (offset / tile_h).floor() * tile_h;
    let mut tiles = Vec::new();
    let mut world_y = first_row;
    while world_y < offset + VIEWPORT_HEIGHT {
        let mut x = 0.0;
        while x < VIEWPORT_WIDTH {
            tiles.push([x, to_screen(world_y, offset)]);
            x += tile_w;
        }
        world_y += tile_h;
    }

    tiles
}
