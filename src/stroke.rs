use egui::{Pos2, Rect};

use crate::geometry::{Region, TouchPoint};

/// Upper bound on polyline points per segment, reached only by segments far
/// larger than any page.
const MAX_SEGMENT_STEPS: usize = 256;

/// One quadratic piece of a stroke, starting where the previous one ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadSegment {
    pub control: Pos2,
    pub end: Pos2,
}

/// Smooth curve through the accepted samples of one input batch.
///
/// Lives only for the duration of one rasterization call.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokePath {
    start: Pos2,
    segments: Vec<QuadSegment>,
}

impl StrokePath {
    /// Builds a path from an ordered batch of samples.
    ///
    /// Each sample whose vertical distance from the last accepted sample is
    /// at least `jump_threshold` is dropped as a digitizer glitch; the cursor
    /// stays on the last accepted sample. Horizontal jumps are not filtered.
    ///
    /// Returns `None` for an empty batch.
    pub fn build(points: &[TouchPoint], jump_threshold: f32) -> Option<Self> {
        let (first, rest) = points.split_first()?;

        let mut previous = first.pos();
        let mut segments = Vec::with_capacity(rest.len());
        for point in rest {
            let current = point.pos();
            if (previous.y - current.y).abs() >= jump_threshold {
                log::debug!("Skipping jump sample {:?} after {:?}", current, previous);
                continue;
            }
            segments.push(QuadSegment {
                control: previous,
                end: current,
            });
            previous = current;
        }

        Some(Self {
            start: first.pos(),
            segments,
        })
    }

    pub fn start(&self) -> Pos2 {
        self.start
    }

    pub fn segments(&self) -> &[QuadSegment] {
        &self.segments
    }

    /// True when the path is a bare move-to with nothing to paint
    pub fn is_point(&self) -> bool {
        self.segments.is_empty()
    }

    /// Accepted on-curve points in order: the start plus every segment end
    pub fn vertices(&self) -> impl Iterator<Item = Pos2> + '_ {
        std::iter::once(self.start).chain(self.segments.iter().map(|s| s.end))
    }

    /// Control-point bounds of the path.
    ///
    /// Quadratic curves stay inside the hull of their control points, so this
    /// always covers the painted centre line.
    pub fn bounds(&self) -> Rect {
        let mut rect = Rect::from_min_max(self.start, self.start);
        for segment in &self.segments {
            rect.extend_with(segment.control);
            rect.extend_with(segment.end);
        }
        rect
    }

    /// Padded, clamped region this path affects on a `width` x `height`
    /// buffer when stroked with a pen of `stroke_width`.
    pub fn region(&self, stroke_width: f32, margin: u32, width: u32, height: u32) -> Option<Region> {
        Region::from_bounds(self.bounds().expand(stroke_width / 2.0), margin, width, height)
    }

    /// Approximates the path by a polyline deviating at most `tolerance`
    /// pixels from the curve, subdividing each segment at most
    /// `MAX_SEGMENT_STEPS` times.
    pub fn flatten(&self, tolerance: f32) -> Vec<Pos2> {
        let mut polyline = Vec::with_capacity(self.segments.len() + 1);
        polyline.push(self.start);

        let mut from = self.start;
        for segment in &self.segments {
            // Uniform subdivision of a quadratic deviates by |p0 - 2c + p1| / (4 n^2)
            let dd = (from.to_vec2() - segment.control.to_vec2() * 2.0 + segment.end.to_vec2()).length();
            let steps = ((dd / (4.0 * tolerance)).sqrt().ceil() as usize).clamp(1, MAX_SEGMENT_STEPS);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                polyline.push(quad_point(from, segment.control, segment.end, t));
            }
            from = segment.end;
        }

        polyline
    }
}

fn quad_point(p0: Pos2, control: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let mt = 1.0 - t;
    let v = p0.to_vec2() * (mt * mt) + control.to_vec2() * (2.0 * mt * t) + p1.to_vec2() * (t * t);
    v.to_pos2()
}
