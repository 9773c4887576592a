//! Floor plan data model: pixel grid, routers and walls.

use crate::config::GridLayout;
use crate::geometry::{Point, Segment};
use crate::materials::{Band, FLOOR_VOID_COLOR, Material};

/// Blank floor space.
pub const BLANK_COLOR: &str = "#f0f0f0";
/// Ghost of the floor below, drawn on a freshly added floor.
pub const GHOST_COLOR: &str = "#d0d0d0";

/// A transmitter placed on the plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Router {
    pub position: Point,
    /// Transmit power scalar
    pub coef: f64,
    pub band: Band,
}

impl Router {
    pub fn new(x: i64, y: i64, coef: f64, band: Band) -> Self {
        Router {
            position: Point::new(x, y),
            coef,
            band,
        }
    }
}

/// A straight wall of a single material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wall {
    pub segment: Segment,
    pub material: Material,
    pub thickness: f64,
}

impl Wall {
    pub fn new(a: Point, b: Point, material: Material, thickness: f64) -> Self {
        Wall {
            segment: Segment::new(a, b),
            material,
            thickness,
        }
    }

    /// Euclidean length in pixels.
    pub fn pixel_length(&self) -> f64 {
        let dx = self.segment.a.x as f64 - self.segment.b.x as f64;
        let dy = self.segment.a.y as f64 - self.segment.b.y as f64;
        (dx * dx + dy * dy).sqrt()
    }

    /// Physical length given the plan's centimeters-per-pixel scale.
    pub fn length_cm(&self, wall_scale: f64) -> f64 {
        self.pixel_length() * wall_scale
    }
}

/// Everything one zone computation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlan {
    /// Row-major pixel colors: index = y * width + x
    pub pixels: Vec<String>,
    pub routers: Vec<Router>,
    pub walls: Vec<Wall>,
    pub receiver_coef: f64,
    /// Centimeters per pixel
    pub wall_scale: f64,
}

impl FloorPlan {
    /// A single blank floor with no routers or walls.
    pub fn empty(layout: &GridLayout, color: &str) -> Self {
        FloorPlan {
            pixels: vec![color.to_string(); layout.floor_pixels()],
            routers: Vec::new(),
            walls: Vec::new(),
            receiver_coef: 1.0,
            wall_scale: 1.0,
        }
    }

    /// Number of complete or partial rows.
    pub fn height(&self, layout: &GridLayout) -> usize {
        self.pixels.len().div_ceil(layout.width)
    }

    pub fn floor_count(&self, layout: &GridLayout) -> usize {
        let height = self.height(layout);
        if height <= layout.floor_rows {
            1
        } else {
            height / layout.floor_stride
        }
    }

    /// Stack a new floor under the current one.
    ///
    /// The first added floor also gets a void band above the original
    /// floor. The new floor shows the walls of the floor above it as ghost
    /// pixels; ghosts already present there turn back into blank space.
    pub fn add_floor(&mut self, layout: &GridLayout) {
        let void_band = layout.width * layout.void_rows();
        if self.height(layout) == layout.floor_rows {
            let mut stacked = vec![FLOOR_VOID_COLOR.to_string(); void_band];
            stacked.append(&mut self.pixels);
            self.pixels = stacked;
        }

        let last_floor_start = self.pixels.len().saturating_sub(layout.floor_pixels());
        let mut added = vec![FLOOR_VOID_COLOR.to_string(); void_band];
        added.extend(self.pixels[last_floor_start..].iter().map(|pixel| {
            match pixel.as_str() {
                GHOST_COLOR => BLANK_COLOR.to_string(),
                BLANK_COLOR | FLOOR_VOID_COLOR => pixel.clone(),
                _ => GHOST_COLOR.to_string(),
            }
        }));
        self.pixels.extend(added);
    }
}
