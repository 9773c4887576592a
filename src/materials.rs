//! Wall materials and their per-band damping.
//!
//! Every wall on a floor plan is drawn in one of eight material colors. The
//! damping a wall adds to a crossing signal depends on the material and on
//! the frequency band; concrete additionally depends on wall thickness.

/// Marker color of the void band separating stacked floors.
pub const FLOOR_VOID_COLOR: &str = "#99ff99";

/// Concrete walls at least this thick use the thick damping value.
pub const CONCRETE_THICK_THRESHOLD: f64 = 10.0;

/// Construction material of a wall, identified by its drawing color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Material {
    Drywall,
    SingleGlass,
    DoubleGlass,
    Wood,
    Brick,
    Concrete,
    Metal,
    ReinforcedConcrete,
}

impl Material {
    pub const ALL: [Material; 8] = [
        Material::Drywall,
        Material::SingleGlass,
        Material::DoubleGlass,
        Material::Wood,
        Material::Brick,
        Material::Concrete,
        Material::Metal,
        Material::ReinforcedConcrete,
    ];

    /// Drawing color used for this material on the floor plan.
    pub const fn color(self) -> &'static str {
        match self {
            Material::Drywall => "#99d8f0",
            Material::SingleGlass => "#444c1d",
            Material::DoubleGlass => "#44251d",
            Material::Wood => "#796f5a",
            Material::Brick => "#a03623",
            Material::Concrete => "#999999",
            Material::Metal => "#738595",
            Material::ReinforcedConcrete => "#686c5e",
        }
    }

    /// Look up a material by its drawing color (exact, lowercase match).
    pub fn from_color(color: &str) -> Option<Material> {
        Material::ALL.into_iter().find(|m| m.color() == color)
    }
}

/// True for any pixel color that is wall material or floor void.
#[inline]
pub fn is_structural_color(color: &str) -> bool {
    color == FLOOR_VOID_COLOR || Material::from_color(color).is_some()
}

/// Tabulated frequency band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Band {
    Ghz2_4,
    Ghz5,
}

impl Band {
    /// Carrier frequency in GHz.
    pub const fn ghz(self) -> f64 {
        match self {
            Band::Ghz2_4 => 2.4,
            Band::Ghz5 => 5.0,
        }
    }
}

/// Damping of one material in one band, in dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DampingValue {
    Scalar(f64),
    /// `(thin, thick)` pair, split at `CONCRETE_THICK_THRESHOLD`.
    ThicknessDependent(f64, f64),
}

impl DampingValue {
    #[inline]
    pub fn resolve(self, thickness: f64) -> f64 {
        match self {
            DampingValue::Scalar(db) => db,
            DampingValue::ThicknessDependent(thin, thick) => {
                if thickness < CONCRETE_THICK_THRESHOLD {
                    thin
                } else {
                    thick
                }
            }
        }
    }
}

/// Material damping table.
pub const fn damping_for(band: Band, material: Material) -> DampingValue {
    use DampingValue::{Scalar, ThicknessDependent};
    match (band, material) {
        (Band::Ghz2_4, Material::Drywall) => Scalar(2.0),
        (Band::Ghz2_4, Material::SingleGlass) => Scalar(3.0),
        (Band::Ghz2_4, Material::DoubleGlass) => Scalar(13.0),
        (Band::Ghz2_4, Material::Wood) => Scalar(4.0),
        (Band::Ghz2_4, Material::Brick) => Scalar(6.0),
        (Band::Ghz2_4, Material::Concrete) => ThicknessDependent(9.0, 17.5),
        (Band::Ghz2_4, Material::Metal) => Scalar(19.0),
        (Band::Ghz2_4, Material::ReinforcedConcrete) => Scalar(22.5),

        (Band::Ghz5, Material::Drywall) => Scalar(4.0),
        (Band::Ghz5, Material::SingleGlass) => Scalar(8.0),
        (Band::Ghz5, Material::DoubleGlass) => Scalar(20.0),
        (Band::Ghz5, Material::Wood) => Scalar(7.0),
        (Band::Ghz5, Material::Brick) => Scalar(10.0),
        (Band::Ghz5, Material::Concrete) => ThicknessDependent(13.0, 25.0),
        (Band::Ghz5, Material::Metal) => Scalar(32.0),
        (Band::Ghz5, Material::ReinforcedConcrete) => Scalar(30.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_lookup() {
        for material in Material::ALL {
            assert_eq!(Material::from_color(material.color()), Some(material));
        }
        assert_eq!(Material::from_color("#f0f0f0"), None);
        assert_eq!(Material::from_color(FLOOR_VOID_COLOR), None);
    }

    #[test]
    fn test_structural_colors() {
        assert!(is_structural_color("#999999"));
        assert!(is_structural_color(FLOOR_VOID_COLOR));
        assert!(!is_structural_color("#f0f0f0"));
        assert!(!is_structural_color("#d0d0d0"));
    }

    #[test]
    fn test_concrete_threshold() {
        let concrete = damping_for(Band::Ghz5, Material::Concrete);
        assert_eq!(concrete.resolve(9.0), 13.0);
        assert_eq!(concrete.resolve(9.99), 13.0);
        assert_eq!(concrete.resolve(10.0), 25.0);
        assert_eq!(concrete.resolve(11.0), 25.0);

        let concrete = damping_for(Band::Ghz2_4, Material::Concrete);
        assert_eq!((concrete.resolve(4.0), concrete.resolve(40.0)), (9.0, 17.5));
    }

    #[test]
    fn test_scalar_ignores_thickness() {
        let metal = damping_for(Band::Ghz2_4, Material::Metal);
        assert_eq!(metal.resolve(1.0), metal.resolve(100.0));
    }

    #[test]
    fn test_five_ghz_damps_more() {
        for material in Material::ALL {
            for thickness in [4.0, 12.0] {
                let low = damping_for(Band::Ghz2_4, material).resolve(thickness);
                let high = damping_for(Band::Ghz5, material).resolve(thickness);
                assert!(high > low, "{:?}: {} <= {}", material, high, low);
            }
        }
    }
}
