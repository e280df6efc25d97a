//! Software rasterizer implementing both collaborator traits.
//!
//! `PixelCanvas` owns an RGBA8 frame buffer and renders ring sectors,
//! leader lines, and label text directly into it. Labels live outside the
//! cleared frame conceptually: they are stored on the canvas, survive
//! `clear`, and are re-rasterized on every `commit`.

use rusttype::{point, Font, Scale};

use crate::{Color, DrawSurface, LabelHost, LabelId, Point, RingSetError};
use std::f64::consts::TAU;

const DEFAULT_LABEL_FONT_SIZE: f32 = 16.0;
const LINE_THICKNESS: f32 = 1.0;
const OUTLINE_WIDTH: f64 = 1.0;

struct Label {
    position: Point,
    color: Color,
    text: String,
}

/// RGBA8 frame buffer with the drawing primitives the renderer needs.
///
/// Usable headless (tests read pixels back) or handed to the windowed
/// driver, which blits the frame after every tick. Label text requires an
/// installed font; geometry and leader lines do not.
pub struct PixelCanvas {
    width: u32,
    height: u32,
    frame: Vec<u8>,
    background: Color,
    font: Option<Font<'static>>,
    label_font_size: f32,
    labels: Vec<Label>,
}

impl PixelCanvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self {
            width,
            height,
            frame: vec![0; width as usize * height as usize * 4],
            background: Color::new(0xff, 0xff, 0xff),
            font: None,
            label_font_size: DEFAULT_LABEL_FONT_SIZE,
            labels: Vec::new(),
        };
        canvas.fill_background();
        canvas
    }

    /// Background color used by `clear`. Takes effect immediately.
    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.fill_background();
    }

    /// Install the font used for label text.
    pub fn set_font(&mut self, data: Vec<u8>) -> Result<(), RingSetError> {
        self.font = Some(Font::try_from_vec(data).ok_or(RingSetError::InvalidFont)?);
        Ok(())
    }

    pub fn set_label_font_size(&mut self, size: f32) {
        self.label_font_size = size;
    }

    /// The raw RGBA8 frame, row-major.
    pub fn frame(&self) -> &[u8] {
        &self.frame
    }

    /// Read one pixel back.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        Color::rgba(
            self.frame[idx],
            self.frame[idx + 1],
            self.frame[idx + 2],
            self.frame[idx + 3],
        )
    }

    fn fill_background(&mut self) {
        let (r, g, b, a) = self.background.as_tuple();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, a]);
        }
    }
}

impl DrawSurface for PixelCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear(&mut self) {
        self.fill_background();
    }

    fn fill_ring_sector(
        &mut self,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        sweep: f64,
        fill: Color,
        outline: Color,
    ) {
        fill_ring_sector_raster(
            &mut self.frame,
            self.width,
            self.height,
            center,
            inner_radius,
            outer_radius,
            start_angle,
            sweep,
            fill,
            outline,
        );
    }

    fn stroke_polyline(&mut self, points: &[Point], color: Color) {
        for pair in points.windows(2) {
            stroke_segment(
                &mut self.frame,
                self.width,
                pair[0],
                pair[1],
                LINE_THICKNESS,
                color,
            );
        }
    }

    fn commit(&mut self) {
        let Some(font) = self.font.as_ref() else {
            if !self.labels.is_empty() {
                log::debug!("labels present but no font installed; skipping text");
            }
            return;
        };
        let scale = Scale::uniform(self.label_font_size);
        for label in &self.labels {
            draw_text(
                &mut self.frame,
                self.width,
                self.height,
                label.position,
                &label.text,
                font,
                scale,
                label.color,
            );
        }
    }
}

impl LabelHost for PixelCanvas {
    fn create_label(&mut self, position: Point, color: Color) -> LabelId {
        self.labels.push(Label {
            position,
            color,
            text: String::new(),
        });
        LabelId(self.labels.len() - 1)
    }

    fn set_label_text(&mut self, id: LabelId, text: &str) {
        match self.labels.get_mut(id.0) {
            Some(label) => {
                label.text.clear();
                label.text.push_str(text);
            }
            None => log::warn!("unknown label id {}", id.0),
        }
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn blend_pixel(frame: &mut [u8], width: u32, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y, w) = (x as usize, y as usize, width as usize);
    if x >= w || y >= frame.len() / (w * 4) {
        return;
    }
    let alpha = coverage * color.a as f32 / 255.0;
    if alpha <= 0.0 {
        return;
    }
    let idx = (y * w + x) * 4;
    for (i, channel) in [color.r, color.g, color.b].into_iter().enumerate() {
        let dst = frame[idx + i] as f32;
        frame[idx + i] = (channel as f32 * alpha + dst * (1.0 - alpha)).round() as u8;
    }
    frame[idx + 3] = 0xff;
}

/// Rasterize a filled, outlined ring segment swept clockwise from
/// `start_angle` (12 o'clock = 0) by `sweep` radians.
///
/// Sweeps of a full turn or more fill the whole annulus; negative sweeps
/// wrap by +2π. Both match what a 2D canvas arc pair would draw, so
/// out-of-range progress stays visually deterministic.
#[allow(clippy::too_many_arguments)]
fn fill_ring_sector_raster(
    frame: &mut [u8],
    width: u32,
    height: u32,
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    sweep: f64,
    fill: Color,
    outline: Color,
) {
    if sweep == 0.0 {
        return;
    }
    let full = sweep >= TAU;
    let sweep = if full { TAU } else { sweep.rem_euclid(TAU) };
    if sweep == 0.0 {
        return;
    }
    let start = start_angle.rem_euclid(TAU);

    let min_x = ((center.x - outer_radius - 1.0).floor().max(0.0)) as i32;
    let max_x = ((center.x + outer_radius + 1.0).ceil().min(width as f64 - 1.0)) as i32;
    let min_y = ((center.y - outer_radius - 1.0).floor().max(0.0)) as i32;
    let max_y = ((center.y + outer_radius + 1.0).ceil().min(height as f64 - 1.0)) as i32;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = x as f64 + 0.5 - center.x;
            let dy = y as f64 + 0.5 - center.y;
            let dist = dx.hypot(dy);
            if dist > outer_radius + 1.0 || dist < inner_radius - 1.0 {
                continue;
            }

            // clockwise angle from 12 o'clock, in [0, 2π)
            let theta = dx.atan2(-dy).rem_euclid(TAU);
            let rel = (theta - start).rem_euclid(TAU);
            if !full && rel > sweep {
                continue;
            }

            let coverage = (1.0 - (dist - outer_radius).max(0.0))
                .min(1.0 - (inner_radius - dist).max(0.0))
                .clamp(0.0, 1.0);
            if coverage <= 0.0 {
                continue;
            }

            let radial_edge =
                dist >= outer_radius - OUTLINE_WIDTH || dist <= inner_radius + OUTLINE_WIDTH;
            let angular_edge = !full
                && (rel * dist <= OUTLINE_WIDTH || (sweep - rel) * dist <= OUTLINE_WIDTH);
            let color = if radial_edge || angular_edge { outline } else { fill };
            blend_pixel(frame, width, x, y, color, coverage as f32);
        }
    }
}

fn stroke_segment(frame: &mut [u8], width: u32, a: Point, b: Point, thickness: f32, color: Color) {
    let pad = thickness.ceil() as i32 + 1;
    let min_x = a.x.min(b.x).floor() as i32 - pad;
    let max_x = a.x.max(b.x).ceil() as i32 + pad;
    let min_y = a.y.min(b.y).floor() as i32 - pad;
    let max_y = a.y.max(b.y).ceil() as i32 + pad;

    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 + 0.5 - a.x;
            let py = y as f64 + 0.5 - a.y;
            let t = if len_sq > 0.0 {
                ((px * dx + py * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let dist = (t * dx - px).hypot(t * dy - py);
            let aa = (1.0 - (dist - thickness as f64 / 2.0).clamp(0.0, 1.0)).clamp(0.0, 1.0);
            if aa > 0.01 {
                blend_pixel(frame, width, x, y, color, aa as f32);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_text(
    frame: &mut [u8],
    width: u32,
    height: u32,
    position: Point,
    text: &str,
    font: &Font,
    scale: Scale,
    color: Color,
) {
    let v_metrics = font.v_metrics(scale);
    let origin = point(position.x as f32, position.y as f32 + v_metrics.ascent);
    for glyph in font.layout(text, scale, origin) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px >= 0 && px < width as i32 && py >= 0 && py < height as i32 {
                    blend_pixel(frame, width, px, py, color, v);
                }
            });
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
