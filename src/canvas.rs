// ============================================================================
// DRAWING SURFACE
// ============================================================================

use std::f64::consts::TAU;

use tracing::trace;

use crate::paint::{Color, DrawStyle, Style};

/// Axis-aligned rectangle in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

/// Anything a widget can paint onto.
///
/// Angles are in degrees, 0° on the positive x axis and increasing
/// clockwise (y grows downward). Arcs are pie wedges: the outline of a
/// partial sweep runs back to the center along both radii.
pub trait Surface {
    fn draw_arc(&mut self, oval: RectF, start_angle: f32, sweep_angle: f32, style: &Style);
}

/// Software rasterizer over an RGBA8 frame, as handed out by `pixels`.
pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
    origin: (i32, i32),
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        let height = if width == 0 {
            0
        } else {
            height.min(frame.len() / (width * 4))
        };
        Self {
            frame,
            width,
            height,
            origin: (0, 0),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Shifts the origin used by subsequent drawing calls.
    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.origin = (self.origin.0 + dx, self.origin.1 + dy);
    }

    pub fn clear(&mut self, color: Color) {
        let (r, g, b) = color.as_tuple();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, color.alpha()]);
        }
    }

    /// Reads back a pixel in frame coordinates, ignoring the origin.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        let px = &self.frame[idx..idx + 4];
        Some(Color::from_argb(px[3], px[0], px[1], px[2]))
    }

    /// Source-over blend of `color` at local coordinates, scaled by `coverage`.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color, coverage: f64) {
        let fx = x + self.origin.0;
        let fy = y + self.origin.1;
        if fx < 0 || fy < 0 || fx as usize >= self.width || fy as usize >= self.height {
            return;
        }
        let idx = (fy as usize * self.width + fx as usize) * 4;
        let a = (color.alpha() as f64 / 255.0 * coverage).clamp(0.0, 1.0);
        let dst_a = self.frame[idx + 3] as f64 / 255.0;
        let out_a = a + dst_a * (1.0 - a);
        if out_a <= 0.0 {
            return;
        }
        let (r, g, b) = color.as_tuple();
        let src = [r as f64, g as f64, b as f64];
        for (channel, value) in src.iter().enumerate() {
            let dst = self.frame[idx + channel] as f64;
            let out = (value * a + dst * dst_a * (1.0 - a)) / out_a;
            self.frame[idx + channel] = out.round().clamp(0.0, 255.0) as u8;
        }
        self.frame[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Local pixel range covering `oval` grown by `pad`, clipped to the frame.
    fn scan_range(&self, oval: &RectF, pad: f64) -> (i32, i32, i32, i32) {
        let min_x = ((oval.left as f64 - pad).floor() as i32).max(-self.origin.0);
        let min_y = ((oval.top as f64 - pad).floor() as i32).max(-self.origin.1);
        let max_x = ((oval.right as f64 + pad).ceil() as i32).min(self.width as i32 - self.origin.0 - 1);
        let max_y = ((oval.bottom as f64 + pad).ceil() as i32).min(self.height as i32 - self.origin.1 - 1);
        (min_x, min_y, max_x, max_y)
    }

    fn fill_arc(&mut self, arc: &ArcGeometry, oval: &RectF, color: Color) {
        let (min_x, min_y, max_x, max_y) = self.scan_range(oval, 1.0);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
                let (norm, angle) = arc.polar(px, py);
                let edge = (norm - 1.0) * arc.min_radius();
                let coverage = (0.5 - edge).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                if arc.contains_angle(angle) {
                    self.set_pixel(x, y, color, coverage);
                }
            }
        }
    }

    fn stroke_arc(&mut self, arc: &ArcGeometry, oval: &RectF, style: &Style) {
        // A zero width stroke is a hairline.
        let half = style.stroke_width.max(1.0) as f64 / 2.0;
        let (min_x, min_y, max_x, max_y) = self.scan_range(oval, half + 1.0);
        let a = arc.point_at(arc.start);
        let b = arc.point_at(arc.start + arc.sweep);
        let center = (arc.cx, arc.cy);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f64 + 0.5, y as f64 + 0.5);
                let (norm, angle) = arc.polar(p.0, p.1);
                let mut dist = if arc.contains_angle(angle) {
                    (norm - 1.0).abs() * arc.min_radius()
                } else {
                    f64::INFINITY
                };
                if !arc.full {
                    dist = dist
                        .min(distance_to_segment(p, center, a))
                        .min(distance_to_segment(p, center, b));
                }
                let aa = (1.0 - (dist - half).clamp(0.0, 1.0)).clamp(0.0, 1.0);
                if aa > 0.01 {
                    self.set_pixel(x, y, style.color, aa);
                }
            }
        }
    }
}

impl Surface for Canvas<'_> {
    fn draw_arc(&mut self, oval: RectF, start_angle: f32, sweep_angle: f32, style: &Style) {
        if sweep_angle <= 0.0 || oval.is_empty() {
            trace!(sweep_angle, ?oval, "skipping degenerate arc");
            return;
        }
        let arc = ArcGeometry::new(&oval, start_angle, sweep_angle);
        match style.draw_style {
            DrawStyle::Fill => self.fill_arc(&arc, &oval, style.color),
            DrawStyle::Stroke => self.stroke_arc(&arc, &oval, style),
        }
    }
}

// ============================================================================
// GEOMETRY HELPERS
// ============================================================================

struct ArcGeometry {
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    start: f64,
    sweep: f64,
    full: bool,
}

impl ArcGeometry {
    fn new(oval: &RectF, start_angle: f32, sweep_angle: f32) -> Self {
        let full = sweep_angle >= 360.0;
        Self {
            cx: (oval.left as f64 + oval.right as f64) / 2.0,
            cy: (oval.top as f64 + oval.bottom as f64) / 2.0,
            rx: oval.width() as f64 / 2.0,
            ry: oval.height() as f64 / 2.0,
            start: (start_angle as f64).to_radians().rem_euclid(TAU),
            sweep: if full {
                TAU
            } else {
                (sweep_angle as f64).to_radians()
            },
            full,
        }
    }

    fn min_radius(&self) -> f64 {
        self.rx.min(self.ry)
    }

    /// Normalized distance from the center (1.0 on the oval) and angle.
    fn polar(&self, px: f64, py: f64) -> (f64, f64) {
        let u = (px - self.cx) / self.rx;
        let v = (py - self.cy) / self.ry;
        (u.hypot(v), v.atan2(u))
    }

    fn contains_angle(&self, angle: f64) -> bool {
        self.full || (angle - self.start).rem_euclid(TAU) <= self.sweep
    }

    fn point_at(&self, angle: f64) -> (f64, f64) {
        (self.cx + self.rx * angle.cos(), self.cy + self.ry * angle.sin())
    }
}

fn distance(p: (f64, f64), q: (f64, f64)) -> f64 {
    (p.0 - q.0).hypot(p.1 - q.1)
}

fn distance_to_segment(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, (a.0 + t * dx, a.1 + t * dy))
}
