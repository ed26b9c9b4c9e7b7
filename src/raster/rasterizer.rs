use egui::{Pos2, Rect};
use image::Rgba;

use super::{Paint, PixelBuffer};
use crate::geometry::Region;
use crate::geometry::hit_testing::distance_to_segment;
use crate::stroke::StrokePath;

/// Paint `path` into `buffer`, touching no pixel outside `clip`.
///
/// A path without segments paints nothing.
pub fn stroke_path(buffer: &mut PixelBuffer, path: &StrokePath, paint: &Paint, clip: &Region, tolerance: f32) {
    if path.is_point() || clip.is_empty() {
        return;
    }

    let polyline = path.flatten(tolerance);
    let width = clip.width() as usize;
    let mut coverage = vec![0.0f32; width * clip.height() as usize];

    // Pixels farther than this from a segment get no ink.
    let reach = paint.width / 2.0 + 1.0;

    // Ink from outside this window cannot reach a pixel inside the clip.
    let window = clip_rect(clip).expand(reach);

    for pair in polyline.windows(2) {
        let Some((a, b)) = clip_segment(pair[0], pair[1], window) else {
            continue;
        };
        let Some(span) = segment_span(a, b, reach, clip) else {
            continue;
        };

        for y in span.top..span.bottom {
            for x in span.left..span.right {
                let centre = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
                let c = paint.coverage(distance_to_segment(centre, a, b));
                let slot = &mut coverage[(y - clip.top) as usize * width + (x - clip.left) as usize];
                if c > *slot {
                    *slot = c;
                }
            }
        }
    }

    for (index, &c) in coverage.iter().enumerate() {
        if c <= 0.0 {
            continue;
        }
        let x = clip.left + (index % width) as u32;
        let y = clip.top + (index / width) as u32;
        let pixel = buffer.pixel_mut(x, y);
        *pixel = blend(*pixel, paint.color, c);
    }
}

fn clip_rect(clip: &Region) -> Rect {
    Rect::from_min_max(
        Pos2::new(clip.left as f32, clip.top as f32),
        Pos2::new(clip.right as f32, clip.bottom as f32),
    )
}

/// Part of segment `a..b` inside `window` (Liang-Barsky)
fn clip_segment(a: Pos2, b: Pos2, window: Rect) -> Option<(Pos2, Pos2)> {
    let delta = b - a;
    let (mut enter, mut exit) = (0.0f32, 1.0f32);

    for (p, q) in [
        (-delta.x, a.x - window.min.x),
        (delta.x, window.max.x - a.x),
        (-delta.y, a.y - window.min.y),
        (delta.y, window.max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            enter = enter.max(t);
        } else {
            exit = exit.min(t);
        }
        if enter > exit {
            return None;
        }
    }

    Some((a + delta * enter, a + delta * exit))
}

/// Pixels around segment `a..b` within `reach`, intersected with `clip`
fn segment_span(a: Pos2, b: Pos2, reach: f32, clip: &Region) -> Option<Region> {
    let clamp_x = |v: f32| (v.max(clip.left as f32).min(clip.right as f32)) as u32;
    let clamp_y = |v: f32| (v.max(clip.top as f32).min(clip.bottom as f32)) as u32;

    let span = Region::new(
        clamp_x((a.x.min(b.x) - reach).floor()),
        clamp_y((a.y.min(b.y) - reach).floor()),
        clamp_x((a.x.max(b.x) + reach).ceil()),
        clamp_y((a.y.max(b.y) + reach).ceil()),
    );
    (!span.is_empty()).then_some(span)
}

fn blend(dst: Rgba<u8>, src: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let alpha = coverage * f32::from(src.0[3]) / 255.0;
    let mix = |d: u8, s: u8| (f32::from(s) * alpha + f32::from(d) * (1.0 - alpha)).round() as u8;
    Rgba([
        mix(dst.0[0], src.0[0]),
        mix(dst.0[1], src.0[1]),
        mix(dst.0[2], src.0[2]),
        (f32::from(src.0[3]) * coverage + f32::from(dst.0[3]) * (1.0 - coverage)).round() as u8,
    ])
}
