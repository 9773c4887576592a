//! Layer 1: Attenuation Calculation (pure geometry/physics)
//!
//! This module turns a floor plan into a grid of signal damping values, one
//! per pixel. All algorithms implement the `AttenuationAlgorithm` trait.

pub mod friis;

pub use friis::{Friis, RouterCoefficient, precompute_routers};

use crate::plan::FloorPlan;

/// Trait for signal attenuation algorithms.
///
/// Implementations evaluate every pixel of a floor plan and return, for each
/// signal-bearing pixel, the damping in dB of the strongest router there.
pub trait AttenuationAlgorithm {
    /// Calculate per-pixel damping for a floor plan.
    ///
    /// # Returns
    /// A grid of the same length and order as `plan.pixels`; `None` marks
    /// structural pixels (walls and floor voids), which carry no signal.
    fn calculate(&self, plan: &FloorPlan) -> Vec<Option<f64>>;
}

/// Converts a damping grid to a formatted string for debugging
pub fn damping_to_string(damping: &[Option<f64>], width: usize) -> String {
    let mut result = String::new();

    for row in damping.chunks(width.max(1)) {
        for cell in row {
            match cell {
                Some(db) => result.push_str(&format!("{:4.0} ", db)),
                None => result.push_str("   # "),
            }
        }
        result.push('\n');
    }
    result
}
