//! Free-space attenuation with wall and floor losses.
//!
//! Each router is first reduced to the constant part of the Friis
//! transmission equation. Every signal-bearing pixel then accumulates, per
//! router:
//! - a flat penalty for each floor slab between pixel and router
//! - the free-space loss over the pixel-to-router distance
//! - the material damping of every wall the direct ray crosses
//!
//! and keeps the smallest total.
//!
//! Pixels are independent of each other, so the grid is evaluated as a
//! parallel map with rayon and gathered back in index order.

use rayon::prelude::*;

use super::AttenuationAlgorithm;
use crate::config::{EngineConfig, GridLayout};
use crate::geometry::{Point, Segment};
use crate::materials::{Band, damping_for, is_structural_color};
use crate::plan::{FloorPlan, Router, Wall};

/// A router reduced to its free-space propagation constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouterCoefficient {
    /// `coef * receiver_coef * (lambda / 4pi)^2`
    pub propagation: f64,
    pub band: Band,
    pub position: Point,
}

/// Precompute the Friis constant for every router, preserving order.
///
/// The wavelength in meters is `3 / (f_GHz * 10)`.
pub fn precompute_routers(routers: &[Router], receiver_coef: f64) -> Vec<RouterCoefficient> {
    routers
        .iter()
        .map(|router| {
            let wavelength = 3.0 / (router.band.ghz() * 10.0);
            let propagation = router.coef * receiver_coef * wavelength.powi(2)
                / (16.0 * std::f64::consts::PI.powi(2));
            RouterCoefficient {
                propagation,
                band: router.band,
                position: router.position,
            }
        })
        .collect()
}

/// Friis free-space attenuation evaluator.
#[derive(Debug, Clone, Default)]
pub struct Friis {
    pub layout: GridLayout,
    /// Evaluate pixels on the rayon pool
    pub parallel: bool,
}

impl Friis {
    pub fn new(config: EngineConfig) -> Self {
        Friis {
            layout: config.layout,
            parallel: config.parallel,
        }
    }

    /// Damping in whole dB of one router's signal at `pixel`.
    pub fn router_damping(
        &self,
        pixel: Point,
        router: &RouterCoefficient,
        walls: &[Wall],
        wall_scale: f64,
        multi_floor: bool,
    ) -> f64 {
        let mut damping = 0.0;
        let mut router_y = router.position.y;

        if multi_floor {
            let rows = i64::try_from(self.layout.floor_rows.max(1)).unwrap_or(i64::MAX);
            let floors_apart = pixel.y.div_euclid(rows).saturating_sub(router.position.y.div_euclid(rows));
            let stride = i64::try_from(self.layout.floor_stride).unwrap_or(i64::MAX);
            router_y = router_y.saturating_add(floors_apart.saturating_mul(stride));
            damping += self.layout.floor_penalty_db * floors_apart.unsigned_abs() as f64;
        }
        let source = Point::new(router.position.x, router_y);

        let dx = pixel.x as f64 - source.x as f64;
        let dy = pixel.y as f64 - source.y as f64;
        let distance = ((dx * dx + dy * dy).sqrt() * wall_scale / 100.0).max(self.layout.min_distance);
        damping += 10.0 * (router.propagation / (distance * distance)).log10().abs();

        let ray = Segment::new(pixel, source);
        for wall in walls {
            if ray.intersects(&wall.segment) {
                damping += damping_for(router.band, wall.material).resolve(wall.thickness);
            }
        }

        damping.round()
    }

    /// Damping of the strongest router at pixel `index`, `None` for structure.
    pub fn pixel_damping(
        &self,
        index: usize,
        color: &str,
        routers: &[RouterCoefficient],
        walls: &[Wall],
        wall_scale: f64,
        multi_floor: bool,
    ) -> Option<f64> {
        if is_structural_color(color) {
            return None;
        }

        let width = self.layout.width;
        let pixel = Point::new((index % width) as i64, (index / width) as i64);
        let strongest = routers
            .iter()
            .map(|router| self.router_damping(pixel, router, walls, wall_scale, multi_floor))
            .fold(f64::INFINITY, f64::min);

        Some(strongest)
    }
}

impl AttenuationAlgorithm for Friis {
    fn calculate(&self, plan: &FloorPlan) -> Vec<Option<f64>> {
        let routers = precompute_routers(&plan.routers, plan.receiver_coef);
        for (i, router) in routers.iter().enumerate() {
            log::debug!(
                "router {} at ({}, {}) {:?}: propagation coefficient {:e}",
                i,
                router.position.x,
                router.position.y,
                router.band,
                router.propagation
            );
        }

        // zero-length walls can never block a ray
        let walls: Vec<Wall> = plan
            .walls
            .iter()
            .filter(|wall| !wall.segment.is_degenerate())
            .copied()
            .collect();
        if walls.len() < plan.walls.len() {
            log::debug!("ignoring {} zero-length walls", plan.walls.len() - walls.len());
        }

        let multi_floor = self.layout.is_multi_floor(plan.pixels.len());
        let evaluate = |(i, color): (usize, &String)| {
            self.pixel_damping(i, color, &routers, &walls, plan.wall_scale, multi_floor)
        };

        if self.parallel {
            plan.pixels.par_iter().enumerate().map(evaluate).collect()
        } else {
            plan.pixels.iter().enumerate().map(evaluate).collect()
        }
    }
}
