//! CPU painter for timeline scenes.

use ab_glyph::PxScale;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use imageproc::drawing::{draw_antialiased_line_segment_mut, draw_text_mut, text_size};

use super::coords::{Point, Rect};
use super::fonts::LabelFonts;
use super::scene::{DrawCommand, Outline, Scene, TextAlign};

pub const CANVAS_BACKGROUND: Rgba<u8> = Rgba([0x0a, 0x0a, 0x0b, 255]);

/// Paints a scene into a fresh image the size of the surface.
///
/// Text is skipped when `fonts` is `None`.
pub fn paint_scene(scene: &Scene, fonts: Option<&LabelFonts>) -> RgbaImage {
    let mut canvas = RgbaImage::from_pixel(scene.width.max(1), scene.height.max(1), CANVAS_BACKGROUND);
    let viewport = &scene.viewport;
    let scale = viewport.scale();

    for command in &scene.commands {
        match command {
            DrawCommand::Band { rect, fill } => {
                fill_rect(&mut canvas, &viewport.rect_to_screen(*rect), *fill);
            }
            DrawCommand::Connector {
                from,
                ctrl_a,
                ctrl_b,
                to,
                color,
                width,
            } => {
                let points = [*from, *ctrl_a, *ctrl_b, *to].map(|p| viewport.world_to_screen(p));
                stroke_cubic(&mut canvas, points, width * scale, *color);
            }
            DrawCommand::Block {
                rect,
                radius,
                fill,
                outline,
                ..
            } => {
                let screen = viewport.rect_to_screen(*rect);
                let radius = radius * scale;
                fill_rounded_rect(&mut canvas, &screen, radius, *fill);
                if let Some(Outline { color, width }) = outline {
                    stroke_rounded_rect(&mut canvas, &screen, radius, width * scale, *color);
                }
            }
            DrawCommand::Text {
                text,
                anchor,
                align,
                size,
                role,
                color,
                clip,
            } => {
                let Some(fonts) = fonts else {
                    continue;
                };
                let anchor = viewport.world_to_screen(*anchor);
                let clip = clip.map(|clip| viewport.rect_to_screen(clip));
                draw_label(
                    &mut canvas,
                    fonts.get(*role),
                    text,
                    anchor,
                    *align,
                    (size * scale) as f32,
                    *color,
                    clip,
                );
            }
        }
    }

    canvas
}

/// Source-over onto an opaque pixel. The result stays fully opaque so the
/// frame never lets the host page show through.
fn composite(dest: Rgba<u8>, source: Rgba<u8>, coverage: f64) -> Rgba<u8> {
    let alpha = source[3] as f64 / 255.0 * coverage.clamp(0.0, 1.0);
    let mix = |s: u8, d: u8| (s as f64 * alpha + d as f64 * (1.0 - alpha)).round() as u8;
    Rgba([mix(source[0], dest[0]), mix(source[1], dest[1]), mix(source[2], dest[2]), u8::MAX])
}

fn blend_at(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>, coverage: f64) {
    if coverage <= 0.0 {
        return;
    }
    let pixel = canvas.get_pixel_mut(x, y);
    *pixel = composite(*pixel, color, coverage);
}

/// Pixel range covered by `[start, end)`, clamped to `[0, limit)`.
fn pixel_span(start: f64, end: f64, limit: u32) -> std::ops::Range<u32> {
    let lo = start.floor().max(0.0).min(limit as f64) as u32;
    let hi = end.ceil().max(0.0).min(limit as f64) as u32;
    lo..hi.max(lo)
}

fn fill_rect(canvas: &mut RgbaImage, rect: &Rect, color: Rgba<u8>) {
    let xs = pixel_span(rect.x, rect.right(), canvas.width());
    let ys = pixel_span(rect.y, rect.bottom(), canvas.height());
    for y in ys {
        for x in xs.clone() {
            blend_at(canvas, x, y, color, 1.0);
        }
    }
}

/// Signed distance from `(x, y)` to the rounded rectangle's edge, negative inside.
fn rounded_rect_distance(rect: &Rect, radius: f64, x: f64, y: f64) -> f64 {
    let half_w = rect.width / 2.0;
    let half_h = rect.height / 2.0;
    let radius = radius.min(half_w).min(half_h).max(0.0);
    let center = rect.center();
    let qx = (x - center.x).abs() - (half_w - radius);
    let qy = (y - center.y).abs() - (half_h - radius);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

fn fill_rounded_rect(canvas: &mut RgbaImage, rect: &Rect, radius: f64, color: Rgba<u8>) {
    let xs = pixel_span(rect.x - 1.0, rect.right() + 1.0, canvas.width());
    let ys = pixel_span(rect.y - 1.0, rect.bottom() + 1.0, canvas.height());
    for y in ys {
        for x in xs.clone() {
            let distance = rounded_rect_distance(rect, radius, x as f64 + 0.5, y as f64 + 0.5);
            blend_at(canvas, x, y, color, 0.5 - distance);
        }
    }
}

fn stroke_rounded_rect(canvas: &mut RgbaImage, rect: &Rect, radius: f64, width: f64, color: Rgba<u8>) {
    let half = width / 2.0;
    let pad = half + 1.0;
    let xs = pixel_span(rect.x - pad, rect.right() + pad, canvas.width());
    let ys = pixel_span(rect.y - pad, rect.bottom() + pad, canvas.height());
    for y in ys {
        for x in xs.clone() {
            // Inner pixels are far from the edge; skip the distance math.
            let (px, py) = (x as f64 + 0.5, y as f64 + 0.5);
            if px > rect.x + pad + radius
                && px < rect.right() - pad - radius
                && py > rect.y + pad
                && py < rect.bottom() - pad
            {
                continue;
            }
            let distance = rounded_rect_distance(rect, radius, px, py);
            blend_at(canvas, x, y, color, half + 0.5 - distance.abs());
        }
    }
}

fn cubic_point(points: &[Point; 4], t: f64) -> Point {
    let u = 1.0 - t;
    let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
    Point::new(
        a * points[0].x + b * points[1].x + c * points[2].x + d * points[3].x,
        a * points[0].y + b * points[1].y + c * points[2].y + d * points[3].y,
    )
}

fn stroke_cubic(canvas: &mut RgbaImage, points: [Point; 4], width: f64, color: Rgba<u8>) {
    let bounds = Rect::new(-width, -width, canvas.width() as f64 + width * 2.0, canvas.height() as f64 + width * 2.0);
    let hull = points.iter().fold(
        (f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
    );
    if hull.2 < bounds.x || hull.0 > bounds.right() || hull.3 < bounds.y || hull.1 > bounds.bottom() {
        return;
    }

    let length = (points[0].x - points[3].x).hypot(points[0].y - points[3].y);
    let segments = ((length / 8.0).ceil() as usize).clamp(8, 128);
    let passes = width.round().max(1.0) as i32;

    let blend = |line: Rgba<u8>, under: Rgba<u8>, weight: f32| composite(under, line, weight as f64);

    let mut previous = points[0];
    for step in 1..=segments {
        let next = cubic_point(&points, step as f64 / segments as f64);
        let on_screen = previous.x.max(next.x) >= bounds.x
            && previous.x.min(next.x) <= bounds.right()
            && previous.y.max(next.y) >= bounds.y
            && previous.y.min(next.y) <= bounds.bottom();
        if on_screen {
            for pass in 0..passes {
                let dy = pass - passes / 2;
                draw_antialiased_line_segment_mut(
                    canvas,
                    (previous.x.round() as i32, previous.y.round() as i32 + dy),
                    (next.x.round() as i32, next.y.round() as i32 + dy),
                    color,
                    blend,
                );
            }
        }
        previous = next;
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_label(
    canvas: &mut RgbaImage,
    font: &ab_glyph::FontVec,
    text: &str,
    anchor: Point,
    align: TextAlign,
    px: f32,
    color: Rgba<u8>,
    clip: Option<Rect>,
) {
    if px < 1.0 || text.is_empty() {
        return;
    }
    let scale = PxScale::from(px);
    let (text_w, text_h) = text_size(scale, font, text);
    let (left, top) = match align {
        TextAlign::Start => (anchor.x, anchor.y - text_h as f64),
        TextAlign::Center => (anchor.x - text_w as f64 / 2.0, anchor.y - text_h as f64 / 2.0),
    };

    let area = clip.unwrap_or_else(|| Rect::new(left, top, text_w as f64 + 1.0, text_h as f64 * 2.0));
    let xs = pixel_span(area.x, area.right(), canvas.width());
    let ys = pixel_span(area.y, area.bottom(), canvas.height());
    if xs.is_empty() || ys.is_empty() {
        return;
    }

    // Glyph coverage is rendered into a mask the size of the clip area, so
    // nothing outside it can be touched.
    let mut mask = GrayImage::new(xs.end - xs.start, ys.end - ys.start);
    draw_text_mut(
        &mut mask,
        Luma([u8::MAX]),
        (left - xs.start as f64).round() as i32,
        (top - ys.start as f64).round() as i32,
        scale,
        font,
        text,
    );
    for (mx, my, coverage) in mask.enumerate_pixels() {
        if coverage[0] > 0 {
            blend_at(canvas, xs.start + mx, ys.start + my, color, coverage[0] as f64 / 255.0);
        }
    }
}
