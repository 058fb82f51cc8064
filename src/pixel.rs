// SPDX-License-Identifier: MIT
//
// Half-block pixel plane — doubles vertical resolution on top of a
// Screen by treating each cell as two vertical subpixels, rendered with
// one of {FULL █, TOP ▀, BOTTOM ▄, SPACE ' '}. The brighter subpixel
// (by luminance) always becomes the glyph's foreground, the dimmer its
// background — this is what lets `pixelplot`/`pixelget` round-trip
// without storing any extra per-pixel state.

use crate::cell::{Cell, ColorField, DEFAULT_BG, DEFAULT_FG};
use crate::color::Color;
use crate::screen::Screen;

const FULL: char = '█';
const TOP: char = '▀';
const BOTTOM: char = '▄';
const SPACE: char = ' ';

/// Build the cell that represents subpixels `top`/`bottom`.
fn make_cell(top: Color, bottom: Color) -> Cell {
    if top == bottom {
        return if top == DEFAULT_BG {
            Cell::styled(Some(SPACE), ColorField::Concrete(top), ColorField::Concrete(bottom), crate::cell::Attr::empty())
        } else {
            Cell::styled(Some(FULL), ColorField::Concrete(top), ColorField::Inherit, crate::cell::Attr::empty())
        };
    }
    if top > bottom {
        Cell::styled(Some(TOP), ColorField::Concrete(top), ColorField::Concrete(bottom), crate::cell::Attr::empty())
    } else {
        Cell::styled(Some(BOTTOM), ColorField::Concrete(bottom), ColorField::Concrete(top), crate::cell::Attr::empty())
    }
}

/// Decode the current `(top, bottom)` subpixel colors encoded in `cell`.
fn decode_cell(cell: Cell) -> (Color, Color) {
    let fg = cell.fg.resolve(DEFAULT_FG);
    let bg = cell.bg.resolve(DEFAULT_BG);
    match cell.char {
        Some(FULL) => (fg, fg),
        Some(TOP) => (fg, bg),
        Some(BOTTOM) => (bg, fg),
        _ => (bg, bg),
    }
}

/// Plot logical pixel `(x, y)` with `color`. Writes into cell
/// `(x, y / 2)`: the top half if `y` is even, the bottom half if odd.
pub fn pixelplot(screen: &mut Screen, x: i64, y: i64, color: Color) {
    let cy = y.div_euclid(2);
    let cell = screen.get_cell(x, cy).unwrap_or(Cell::EMPTY);
    let (mut top, mut bottom) = decode_cell(cell);
    if y.rem_euclid(2) == 0 {
        top = color;
    } else {
        bottom = color;
    }
    screen.set_cell(x, cy, make_cell(top, bottom));
}

/// Alias for [`pixelplot`], matching the "pixel" verb used by the line
/// and polygon helpers below.
pub fn pixel(screen: &mut Screen, x: i64, y: i64, color: Color) {
    pixelplot(screen, x, y, color);
}

/// Read back the color last plotted at logical pixel `(x, y)`.
#[must_use]
pub fn pixelget(screen: &Screen, x: i64, y: i64) -> Color {
    let cy = y.div_euclid(2);
    let Some(cell) = screen.get_cell(x, cy) else {
        return DEFAULT_BG;
    };
    let (top, bottom) = decode_cell(cell);
    if y.rem_euclid(2) == 0 {
        top
    } else {
        bottom
    }
}

/// Draw a line from `(x0, y0)` to `(x1, y1)` using integer Bresenham.
pub fn draw_line(screen: &mut Screen, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx: i64 = if x0 < x1 { 1 } else { -1 };
    let sy: i64 = if y0 < y1 { 1 } else { -1 };
    let (mut x, mut y) = (x0, y0);

    if dx > dy {
        let mut err = dx / 2;
        while x != x1 {
            pixelplot(screen, x, y, color);
            err -= dy;
            if err < 0 {
                y += sy;
                err += dx;
            }
            x += sx;
        }
    } else {
        let mut err = dy / 2;
        while y != y1 {
            pixelplot(screen, x, y, color);
            err -= dx;
            if err < 0 {
                x += sx;
                err += dy;
            }
            y += sy;
        }
    }
    pixelplot(screen, x1, y1, color);
}

/// Draw a chain of connected line segments through `points`.
pub fn draw_polyline(screen: &mut Screen, points: &[(i64, i64)], color: Color) {
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        draw_line(screen, x0, y0, x1, y1, color);
    }
}

/// Vertices of a regular polygon: `sides` points around `(cx, cy)` at
/// `radius`, starting at `rotation` radians, plus the starting point
/// repeated at the end to close the path.
#[must_use]
pub fn regular_polygon(cx: i64, cy: i64, radius: f64, sides: u32, rotation: f64) -> Vec<(i64, i64)> {
    let step = std::f64::consts::TAU / f64::from(sides);
    let mut points: Vec<(i64, i64)> = (0..sides)
        .map(|i| {
            let angle = rotation + f64::from(i) * step;
            (
                (cx as f64 + radius * angle.cos()).round() as i64,
                (cy as f64 + radius * angle.sin()).round() as i64,
            )
        })
        .collect();
    if let Some(&first) = points.first() {
        points.push(first);
    }
    points
}

/// Draw a regular convex polygon as a closed polyline.
pub fn draw_regular_polygon(screen: &mut Screen, cx: i64, cy: i64, radius: f64, sides: u32, color: Color, rotation: f64) {
    draw_polyline(screen, &regular_polygon(cx, cy, radius, sides, rotation), color);
}

/// Errors from star-polygon construction.
#[derive(Debug, thiserror::Error)]
pub enum StarError {
    #[error("star polygon requires 0 < k < n, got k={k}, n={n}")]
    InvalidStep { k: u32, n: u32 },
}

/// Vertices of a regular star polygon `{n/k}`: walk `n` points spaced
/// evenly around a circle, stepping `k` positions at a time until the
/// walk returns to its start, then close the path.
///
/// # Errors
///
/// Returns [`StarError::InvalidStep`] unless `0 < k < n`.
pub fn regular_star(cx: i64, cy: i64, radius: f64, n: u32, k: u32, rotation: f64) -> Result<Vec<(i64, i64)>, StarError> {
    if k == 0 || k >= n {
        return Err(StarError::InvalidStep { k, n });
    }

    let step = std::f64::consts::TAU / f64::from(n);
    let circle: Vec<(i64, i64)> = (0..n)
        .map(|i| {
            let angle = rotation + f64::from(i) * step;
            (
                (cx as f64 + radius * angle.cos()).round() as i64,
                (cy as f64 + radius * angle.sin()).round() as i64,
            )
        })
        .collect();

    let mut points = Vec::new();
    let mut visited = vec![false; n as usize];
    let mut index = 0u32;
    while !visited[index as usize] {
        visited[index as usize] = true;
        points.push(circle[index as usize]);
        index = (index + k) % n;
    }
    if let Some(&first) = points.first() {
        points.push(first);
    }
    Ok(points)
}

/// Draw a regular star polygon `{n/k}` as a closed polyline.
///
/// # Errors
///
/// Returns [`StarError::InvalidStep`] unless `0 < k < n`.
pub fn draw_regular_star(
    screen: &mut Screen,
    cx: i64,
    cy: i64,
    radius: f64,
    n: u32,
    k: u32,
    color: Color,
    rotation: f64,
) -> Result<(), StarError> {
    let points = regular_star(cx, cy, radius, n, k, rotation)?;
    draw_polyline(screen, &points, color);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_block_compositing_scenario() {
        let mut screen = Screen::new(1).unwrap();
        let light = Color::rgb(200, 200, 200);
        let dark = Color::rgb(10, 10, 10);

        pixel(&mut screen, 0, 0, light);
        pixel(&mut screen, 0, 1, dark);
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.char, Some(TOP));
        assert_eq!(cell.fg, ColorField::Concrete(light));
        assert_eq!(cell.bg, ColorField::Concrete(dark));

        pixel(&mut screen, 0, 1, light);
        let cell = screen.get_cell(0, 0).unwrap();
        assert_eq!(cell.char, Some(FULL));
        assert_eq!(cell.fg, ColorField::Concrete(light));
        assert_eq!(cell.bg, ColorField::Inherit);
    }

    #[test]
    fn pixel_round_trips_for_non_default_colors() {
        let mut screen = Screen::new(2).unwrap();
        let color = Color::rgb(50, 60, 70);
        pixelplot(&mut screen, 1, 3, color);
        assert_eq!(pixelget(&screen, 1, 3), color);
    }

    #[test]
    fn repeated_pixelplot_is_idempotent() {
        let mut screen = Screen::new(1).unwrap();
        let color = Color::rgb(1, 2, 3);
        pixelplot(&mut screen, 0, 0, color);
        let first = screen.get_cell(0, 0);
        pixelplot(&mut screen, 0, 0, color);
        assert_eq!(screen.get_cell(0, 0), first);
    }

    #[test]
    fn hexagon_has_seven_points() {
        let points = regular_polygon(10, 10, 7.0, 6, 0.0);
        assert_eq!(points.len(), 7);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn pentagram_has_six_points() {
        let points = regular_star(10, 10, 6.0, 5, 2, 0.0).unwrap();
        assert_eq!(points.len(), 6);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn star_rejects_degenerate_step() {
        assert!(regular_star(0, 0, 1.0, 5, 0, 0.0).is_err());
        assert!(regular_star(0, 0, 1.0, 5, 5, 0.0).is_err());
    }

    #[test]
    fn draw_line_plots_both_endpoints() {
        let mut screen = Screen::new(10).unwrap();
        let color = Color::rgb(9, 9, 9);
        draw_line(&mut screen, 0, 0, 4, 0, color);
        assert_eq!(pixelget(&screen, 0, 0), color);
        assert_eq!(pixelget(&screen, 4, 0), color);
    }
}
