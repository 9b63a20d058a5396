//! Scroll-synchronized history of cursor positions.
//!
//! Each render tick the page scrolls left by some amount and the cursor sits
//! at a fixed X. [`TrailHistory`] keeps the recent cursor positions in
//! insertion order, slides them with the page and forgets the ones that have
//! scrolled off screen.

use std::collections::VecDeque;

use log::debug;

use crate::{Error, Result};

/// One point of the trail in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
}

/// Configuration for [`TrailHistory`].
#[derive(Debug, Clone, PartialEq)]
pub struct TrailConfig {
    /// Screen X where new points are appended.
    pub cursor_x: f32,
    /// Points scrolled left of this X are dropped.
    pub min_visible_x: f32,
    /// Maximum number of points kept.
    pub capacity: usize,
    /// Vertical change (px) needed before a new point is appended.
    pub min_dy: f32,
    /// Scroll (px) since the last append that forces a new point.
    pub min_scroll: f32,
}

impl TrailConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cursor_x(mut self, cursor_x: f32) -> Self {
        self.cursor_x = cursor_x;
        self
    }

    pub fn with_min_visible_x(mut self, min_visible_x: f32) -> Self {
        self.min_visible_x = min_visible_x;
        self
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_min_dy(mut self, min_dy: f32) -> Self {
        self.min_dy = min_dy;
        self
    }

    pub fn with_min_scroll(mut self, min_scroll: f32) -> Self {
        self.min_scroll = min_scroll;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.cursor_x.is_finite() {
            return Err(Error::parameter("cursor_x", self.cursor_x, "must be finite"));
        }
        if !self.min_visible_x.is_finite() || self.min_visible_x > self.cursor_x {
            return Err(Error::parameter(
                "min_visible_x",
                self.min_visible_x,
                "must be finite and <= cursor_x",
            ));
        }
        if self.capacity == 0 {
            return Err(Error::parameter("capacity", self.capacity, "must be > 0"));
        }
        if !self.min_dy.is_finite() || self.min_dy < 0.0 {
            return Err(Error::parameter("min_dy", self.min_dy, "must be a finite value >= 0"));
        }
        if !self.min_scroll.is_finite() || self.min_scroll < 0.0 {
            return Err(Error::parameter(
                "min_scroll",
                self.min_scroll,
                "must be a finite value >= 0",
            ));
        }
        Ok(())
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            cursor_x: 200.0,
            min_visible_x: 0.0,
            capacity: 512,
            min_dy: 0.5,
            min_scroll: 2.0,
        }
    }
}

/// Bounded, ordered buffer of trail points.
///
/// # Example
/// ```
/// use staffline::trail::{TrailConfig, TrailHistory};
///
/// let mut trail = TrailHistory::new(TrailConfig::new().with_cursor_x(100.0)).unwrap();
/// trail.update(0.0, 50.0);
/// let points = trail.update(5.0, 60.0);
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].x, 95.0);
/// assert_eq!(points[1].x, 100.0);
/// ```
#[derive(Debug, Clone)]
pub struct TrailHistory {
    config: TrailConfig,
    points: VecDeque<TrailPoint>,
    /// Horizontal scroll accumulated since the last appended point.
    scrolled: f32,
}

impl TrailHistory {
    /// # Errors
    /// Returns `Error::InvalidParameter` if `config` fails validation.
    pub fn new(config: TrailConfig) -> Result<Self> {
        config.validate()?;
        let points = VecDeque::with_capacity(config.capacity);
        Ok(Self {
            config,
            points,
            scrolled: 0.0,
        })
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points oldest first.
    pub fn points(&self) -> impl Iterator<Item = &TrailPoint> + '_ {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&TrailPoint> {
        self.points.back()
    }

    /// Scroll by `scroll_delta` and record the cursor at `screen_y`.
    ///
    /// A new point is appended when the cursor moved more than `min_dy` or the
    /// page scrolled more than `min_scroll` since the last append. Otherwise
    /// the last point is replaced. A non-finite `screen_y` only scrolls.
    pub fn update(&mut self, scroll_delta: f32, screen_y: f32) -> &[TrailPoint] {
        self.shift(scroll_delta);
        if screen_y.is_finite() {
            self.record(screen_y);
        }
        self.points.make_contiguous()
    }

    /// Scroll without recording a point (no pitch this tick).
    pub fn scroll(&mut self, scroll_delta: f32) -> &[TrailPoint] {
        self.shift(scroll_delta);
        self.points.make_contiguous()
    }

    /// Drop every point.
    pub fn reset(&mut self) {
        if !self.points.is_empty() {
            debug!("trail reset ({} points dropped)", self.points.len());
        }
        self.points.clear();
        self.scrolled = 0.0;
    }

    fn shift(&mut self, scroll_delta: f32) {
        if !scroll_delta.is_finite() || scroll_delta == 0.0 {
            return;
        }
        for point in self.points.iter_mut() {
            point.x -= scroll_delta;
        }
        let floor = self.config.min_visible_x;
        self.points.retain(|p| p.x >= floor);
        self.scrolled += scroll_delta.abs();
    }

    fn record(&mut self, screen_y: f32) {
        let point = TrailPoint {
            x: self.config.cursor_x,
            y: screen_y,
        };

        let moved_little = self
            .points
            .back()
            .is_some_and(|last| (screen_y - last.y).abs() <= self.config.min_dy);
        if moved_little && self.scrolled <= self.config.min_scroll {
            if let Some(last) = self.points.back_mut() {
                *last = point;
            }
            return;
        }

        self.points.push_back(point);
        self.scrolled = 0.0;
        while self.points.len() > self.config.capacity {
            self.points.pop_front();
        }
    }
}
