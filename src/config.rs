//! Floor layout constants and engine settings

/// Geometry of a stacked floor plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Pixels per row
    pub width: usize,
    /// Rows in one floor, also the divisor used to find a row's floor
    pub floor_rows: usize,
    /// Row offset between the same position on adjacent floors
    pub floor_stride: usize,
    /// Flat penalty per floor slab crossed, in dB
    pub floor_penalty_db: f64,
    /// Physical distance floor, in the Friis term's units
    pub min_distance: f64,
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            width: 350,
            floor_rows: 150,
            floor_stride: 160,
            floor_penalty_db: 25.0,
            min_distance: 0.01,
        }
    }
}

impl GridLayout {
    /// Rows of void pixels between two floors.
    pub fn void_rows(&self) -> usize {
        self.floor_stride - self.floor_rows
    }

    /// Pixels in a single floor.
    pub fn floor_pixels(&self) -> usize {
        self.width * self.floor_rows
    }

    /// A grid holding more pixels than one floor is treated as multi-floor.
    pub fn is_multi_floor(&self, pixel_count: usize) -> bool {
        pixel_count > self.floor_pixels()
    }
}

/// Settings for one zone computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub layout: GridLayout,
    /// Evaluate pixels on the rayon pool instead of the calling thread
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: GridLayout::default(),
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = GridLayout::default();
        assert_eq!(layout.void_rows(), 10);
        assert_eq!(layout.floor_pixels(), 52_500);
        assert!(!layout.is_multi_floor(52_500));
        assert!(layout.is_multi_floor(52_501));
    }
}
