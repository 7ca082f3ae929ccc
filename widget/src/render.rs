//! Render regions: the rectangles the widget is drawn as, and the drawing
//! primitives issued to the host surface.
//!
//! The widget is at most three rectangles. The body is always drawn while
//! shown. The inlet strip (top-left) is drawn while no outbound channel is
//! bound, and the outlet strip (bottom-left) while no inbound channel is
//! bound. This module computes the rectangles and turns a set of regions
//! into create-or-move commands; deciding which set applies is the
//! engine's job.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use bitflags::bitflags;
use serde::{Serialize, Serializer};

use crate::color::Color;
use crate::consts::{COLOR_NORMAL, COLOR_SELECTED, IOLET_HEIGHT, IOLET_WIDTH};
use crate::geometry::{Geometry, PixelPoint, Rect};
use crate::host::{Canvas, InstanceId};

/// One drawable part of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Body,
    Inlet,
    Outlet,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::Body, Self::Inlet, Self::Outlet];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Inlet => "inlet",
            Self::Outlet => "outlet",
        }
    }
}

bitflags! {
    /// A set of regions to draw or erase.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RegionSet: u8 {
        const BODY = 0b001;
        const INLET = 0b010;
        const OUTLET = 0b100;
    }
}

impl From<Region> for RegionSet {
    fn from(region: Region) -> Self {
        match region {
            Region::Body => Self::BODY,
            Region::Inlet => Self::INLET,
            Region::Outlet => Self::OUTLET,
        }
    }
}

impl RegionSet {
    /// Regions in drawing order (body first).
    pub fn regions(self) -> impl Iterator<Item = Region> {
        Region::ALL.into_iter().filter(move |r| self.contains(Self::from(*r)))
    }
}

/// Host-side handle of one region's visual element, written `<id>-<region>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionTag {
    pub id: InstanceId,
    pub region: Region,
}

impl fmt::Display for RegionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.id, self.region.as_str())
    }
}

impl Serialize for RegionTag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A primitive issued to the host drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Create a rectangle with the given outline width.
    CreateRect { tag: RegionTag, rect: Rect, width: i32 },
    /// Move an existing rectangle.
    MoveRect { tag: RegionTag, rect: Rect },
    Fill { tag: RegionTag, color: Color },
    Outline { tag: RegionTag, color: Color },
    Erase { tag: RegionTag },
    /// Recompute connectors anchored to the widget.
    FixConnectors { id: InstanceId },
    /// Delete connectors anchored to the widget.
    DeleteConnectors { id: InstanceId },
}

/// The three rectangles for one origin and geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regions {
    pub body: Rect,
    pub inlet: Rect,
    pub outlet: Rect,
}

impl Regions {
    #[must_use]
    pub fn get(&self, region: Region) -> Rect {
        match region {
            Region::Body => self.body,
            Region::Inlet => self.inlet,
            Region::Outlet => self.outlet,
        }
    }
}

/// Compute body, inlet and outlet rectangles.
///
/// `origin` is the top-left in device pixels with any parent offset already
/// applied. Iolet sizes are nominal and scaled by the zoom factor here.
#[must_use]
pub fn compute_regions(origin: PixelPoint, geometry: &Geometry, iolet_width: i32, iolet_height: i32) -> Regions {
    let zoom = geometry.zoom();
    let pix_height = geometry.pix_height();
    let strip = PixelPoint::new(iolet_width, iolet_height).to_device(zoom);

    Regions {
        body: Rect::span(origin, origin + geometry.pix_extent()),
        inlet: Rect::span(origin, origin + strip),
        outlet: Rect::span(
            origin + PixelPoint::new(0, pix_height.saturating_sub(strip.y)),
            origin + PixelPoint::new(strip.x, pix_height),
        ),
    }
}

/// Borrowed view of what is needed to draw one widget.
#[derive(Debug, Clone, Copy)]
pub struct Painter<'a> {
    pub id: &'a InstanceId,
    pub origin: PixelPoint,
    pub geometry: &'a Geometry,
}

impl Painter<'_> {
    fn tag(&self, region: Region) -> RegionTag {
        RegionTag { id: self.id.clone(), region }
    }

    #[must_use]
    pub fn regions(&self) -> Regions {
        compute_regions(self.origin, self.geometry, IOLET_WIDTH, IOLET_HEIGHT)
    }

    /// Create (first draw) or move the given regions, then ask the host to
    /// fix connectors.
    ///
    /// A first draw also fills the body. A later draw is skipped entirely
    /// while hidden.
    pub fn sync(&self, canvas: &mut impl Canvas, first_draw: bool, regions: RegionSet, fill: Color) {
        if !first_draw && !canvas.is_visible() {
            return;
        }

        let rects = self.regions();
        for region in regions.regions() {
            let tag = self.tag(region);
            let rect = rects.get(region);
            if first_draw {
                canvas.draw(DrawCommand::CreateRect { tag, rect, width: self.geometry.zoom() });
            } else {
                canvas.draw(DrawCommand::MoveRect { tag, rect });
            }
        }

        if first_draw {
            canvas.draw(DrawCommand::Fill { tag: self.tag(Region::Body), color: fill });
        }
        canvas.draw(DrawCommand::FixConnectors { id: self.id.clone() });
    }

    /// Delete the visual element of one region.
    pub fn erase(&self, canvas: &mut impl Canvas, region: Region) {
        canvas.draw(DrawCommand::Erase { tag: self.tag(region) });
    }

    /// Recolor the body outline for the host's selection state.
    pub fn outline(&self, canvas: &mut impl Canvas, selected: bool) {
        if !canvas.is_visible() {
            return;
        }
        let color = Color::new(if selected { COLOR_SELECTED } else { COLOR_NORMAL });
        canvas.draw(DrawCommand::Outline { tag: self.tag(Region::Body), color });
    }

    /// Recolor the body fill.
    pub fn fill(&self, canvas: &mut impl Canvas, color: Color) {
        if !canvas.is_visible() {
            return;
        }
        canvas.draw(DrawCommand::Fill { tag: self.tag(Region::Body), color });
    }
}
