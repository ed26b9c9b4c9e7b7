use std::time::{Duration, Instant};

use crate::geometry::TouchPoint;

/// Accumulates eraser samples so they are painted in bounded-latency
/// batches instead of one redraw per sample.
#[derive(Debug, Clone)]
pub struct EraseBatcher {
    points: Vec<TouchPoint>,
    last_flush: Instant,
    flush_points: usize,
    flush_interval: Duration,
}

impl EraseBatcher {
    pub fn new(flush_points: usize, flush_interval: Duration, now: Instant) -> Self {
        Self {
            points: Vec::with_capacity(flush_points),
            last_flush: now,
            flush_points,
            flush_interval,
        }
    }

    /// Drop pending samples and restart the flush timer
    pub fn reset(&mut self, now: Instant) {
        self.points.clear();
        self.last_flush = now;
    }

    pub fn push(&mut self, point: TouchPoint) {
        self.points.push(point);
    }

    /// True once enough samples piled up or the last flush is too old
    pub fn needs_flush(&self, now: Instant) -> bool {
        self.points.len() >= self.flush_points
            || now.saturating_duration_since(self.last_flush) > self.flush_interval
    }

    /// Hand out the pending samples and restart the flush timer
    pub fn take(&mut self, now: Instant) -> Vec<TouchPoint> {
        self.last_flush = now;
        std::mem::replace(&mut self.points, Vec::with_capacity(self.flush_points))
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last_flush(&self) -> Instant {
        self.last_flush
    }
}
