//! Nominal size, zoom factor, and the device-pixel size derived from them.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SIZE, DEFAULT_ZOOM};

/// A point or offset in device pixels (or nominal units, when divided by zoom).
///
/// Arithmetic saturates at the `i32` range; coordinates come straight from
/// user messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Divide both coordinates by `zoom`, truncating toward zero.
    #[must_use]
    pub fn to_nominal(self, zoom: i32) -> Self {
        Self { x: self.x / zoom, y: self.y / zoom }
    }

    /// Multiply both coordinates by `zoom`.
    #[must_use]
    pub fn to_device(self, zoom: i32) -> Self {
        Self { x: self.x.saturating_mul(zoom), y: self.y.saturating_mul(zoom) }
    }
}

impl Add for PixelPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x.saturating_add(rhs.x), y: self.y.saturating_add(rhs.y) }
    }
}

impl Sub for PixelPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x.saturating_sub(rhs.x), y: self.y.saturating_sub(rhs.y) }
    }
}

/// Axis-aligned rectangle in device pixels, `(x1, y1)` top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    /// Rectangle spanning `from` to `to`.
    #[must_use]
    pub fn span(from: PixelPoint, to: PixelPoint) -> Self {
        Self { x1: from.x, y1: from.y, x2: to.x, y2: to.y }
    }
}

/// Widget size bookkeeping.
///
/// Pixel dimensions are private and only ever recomputed from nominal size
/// and zoom together, so they cannot drift from `nominal × zoom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    width: i32,
    height: i32,
    pix_width: i32,
    pix_height: i32,
    zoom: i32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE, DEFAULT_SIZE)
    }
}

impl Geometry {
    /// Geometry at the default zoom factor, sizes clamped to at least 1.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let mut geometry = Self { width: 1, height: 1, pix_width: 1, pix_height: 1, zoom: DEFAULT_ZOOM };
        geometry.set_size(width, Some(height));
        geometry
    }

    /// Set the nominal size. A missing height copies the width.
    pub fn set_size(&mut self, width: i32, height: Option<i32>) {
        self.width = width.max(1);
        self.height = height.unwrap_or(width).max(1);
        self.recompute();
    }

    /// Set the host zoom factor. Non-positive factors are rejected and the
    /// previous factor is kept; returns whether the factor was accepted.
    pub fn set_zoom(&mut self, zoom: i32) -> bool {
        if zoom < 1 {
            return false;
        }
        self.zoom = zoom;
        self.recompute();
        true
    }

    fn recompute(&mut self) {
        self.pix_width = self.width.saturating_mul(self.zoom);
        self.pix_height = self.height.saturating_mul(self.zoom);
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn pix_width(&self) -> i32 {
        self.pix_width
    }

    #[must_use]
    pub fn pix_height(&self) -> i32 {
        self.pix_height
    }

    #[must_use]
    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    /// Pixel size as an offset from the origin.
    #[must_use]
    pub fn pix_extent(&self) -> PixelPoint {
        PixelPoint::new(self.pix_width, self.pix_height)
    }
}
