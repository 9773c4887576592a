//! JSON request/response contract of the zone computation.
//!
//! A request is parsed loosely first (every field as raw JSON) so that each
//! malformed field maps onto its own error instead of a generic decode
//! failure. Validation then produces a `FloorPlan` the engine can trust.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{Rgb, compute_zones};
use crate::config::EngineConfig;
use crate::error::{ZONE_ERROR_CODE, ZoneError, ZoneResult};
use crate::geometry::Point;
use crate::materials::{Band, Material};
use crate::plan::{FloorPlan, Router, Wall};

/// Router and wall coordinates must lie within this many pixels of the
/// origin on either axis.
pub const MAX_COORDINATE: i64 = 1 << 20;

/// Incoming zone request, fields not yet validated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZoneRequest {
    #[serde(default)]
    pub pixels: Option<Value>,
    #[serde(default)]
    pub routers: Option<Value>,
    #[serde(default)]
    pub walls: Option<Value>,
    #[serde(default)]
    pub receiver_coef: Option<Value>,
    #[serde(default)]
    pub wall_scale: Option<Value>,
}

/// Successful response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneResponse {
    pub pixels: Vec<String>,
}

/// Body returned for a rejected request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: u16,
}

impl From<&ZoneError> for ErrorBody {
    fn from(err: &ZoneError) -> Self {
        ErrorBody {
            error: err.to_string(),
            code: ZONE_ERROR_CODE,
        }
    }
}

/// A JSON number, or a string holding one.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Numeric {
    Number(f64),
    Text(String),
}

impl Numeric {
    fn value(&self) -> Option<f64> {
        match self {
            Numeric::Number(n) => Some(*n),
            Numeric::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RouterEntry {
    x: i64,
    y: i64,
    coef: Numeric,
    frequency: Numeric,
}

#[derive(Debug, Deserialize)]
struct WallEntry {
    x: Point,
    y: Point,
    color: String,
    thickness: f64,
    length: f64,
}

fn parse_band(frequency: &Numeric) -> Option<Band> {
    let ghz = frequency.value()?;
    [Band::Ghz2_4, Band::Ghz5]
        .into_iter()
        .find(|band| (band.ghz() - ghz).abs() < 1e-9)
}

fn in_range(point: Point) -> bool {
    point.x.abs() <= MAX_COORDINATE && point.y.abs() <= MAX_COORDINATE
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn non_empty_array<'a>(value: &'a Option<Value>, what: &str) -> Result<&'a Vec<Value>, String> {
    match value {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items),
        Some(Value::Array(_)) => Err(format!("{} are empty", what)),
        Some(_) => Err(format!("{} must be an array", what)),
        None => Err(format!("{} are missing", what)),
    }
}

impl ZoneRequest {
    pub fn from_json(body: &str) -> ZoneResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Check every field and build the floor plan.
    pub fn validate(&self) -> ZoneResult<FloorPlan> {
        Ok(FloorPlan {
            pixels: self.validate_pixels()?,
            routers: self.validate_routers()?,
            walls: self.validate_walls()?,
            receiver_coef: self.validate_receiver_coef()?,
            wall_scale: self.validate_wall_scale()?,
        })
    }

    fn validate_pixels(&self) -> ZoneResult<Vec<String>> {
        let malformed = |reason: String| ZoneError::MalformedPixels { reason };
        let items = non_empty_array(&self.pixels, "pixels").map_err(malformed)?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::String(s) if Rgb::from_hex(s).is_some() => Ok(s.clone()),
                other => Err(malformed(format!("pixel {} is not a #rrggbb color: {}", i, other))),
            })
            .collect()
    }

    fn validate_routers(&self) -> ZoneResult<Vec<Router>> {
        let malformed = |reason: String| ZoneError::MalformedRouters { reason };
        let items = non_empty_array(&self.routers, "routers").map_err(malformed)?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let entry = RouterEntry::deserialize(item)
                    .map_err(|e| malformed(format!("router {}: {}", i, e)))?;
                let coef = entry
                    .coef
                    .value()
                    .filter(|c| positive(*c))
                    .ok_or_else(|| malformed(format!("router {}: coef must be a positive number", i)))?;
                let band = parse_band(&entry.frequency)
                    .ok_or_else(|| malformed(format!("router {}: frequency must be 2.4 or 5.0", i)))?;
                if !in_range(Point::new(entry.x, entry.y)) {
                    return Err(malformed(format!("router {}: position out of range", i)));
                }
                Ok(Router::new(entry.x, entry.y, coef, band))
            })
            .collect()
    }

    fn validate_walls(&self) -> ZoneResult<Vec<Wall>> {
        let malformed = |reason: String| ZoneError::MalformedWalls { reason };
        let items = non_empty_array(&self.walls, "walls").map_err(malformed)?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let entry = WallEntry::deserialize(item)
                    .map_err(|e| malformed(format!("wall {}: {}", i, e)))?;
                let material = Material::from_color(&entry.color)
                    .ok_or_else(|| malformed(format!("wall {}: unknown material {}", i, entry.color)))?;
                if !entry.thickness.is_finite() {
                    return Err(malformed(format!("wall {}: thickness is not finite", i)));
                }
                if !entry.length.is_finite() || entry.length < 0.0 {
                    return Err(malformed(format!("wall {}: length must be a non-negative number", i)));
                }
                if !in_range(entry.x) || !in_range(entry.y) {
                    return Err(malformed(format!("wall {}: endpoint out of range", i)));
                }
                Ok(Wall::new(entry.x, entry.y, material, entry.thickness))
            })
            .collect()
    }

    fn validate_receiver_coef(&self) -> ZoneResult<f64> {
        self.receiver_coef
            .as_ref()
            .and_then(|v| Numeric::deserialize(v).ok())
            .and_then(|n| n.value())
            .filter(|c| positive(*c))
            .ok_or_else(|| ZoneError::MalformedReceiverCoef {
                reason: format!("expected a positive number, got {:?}", self.receiver_coef),
            })
    }

    fn validate_wall_scale(&self) -> ZoneResult<f64> {
        self.wall_scale
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|s| positive(*s))
            .ok_or_else(|| ZoneError::MalformedScale {
                reason: format!("expected a positive number, got {:?}", self.wall_scale),
            })
    }
}

/// Validate a request and compute its zones.
pub fn handle_request(request: &ZoneRequest, config: EngineConfig) -> ZoneResult<ZoneResponse> {
    let plan = request.validate().inspect_err(|err| {
        log::warn!("rejected zone request: {} ({})", err, err.reason().unwrap_or("-"));
    })?;

    let wall_cm: f64 = plan.walls.iter().map(|wall| wall.length_cm(plan.wall_scale)).sum();
    log::info!(
        "computing zones: {} pixels, {} routers, {} walls ({:.0} cm), scale {:.4}",
        plan.pixels.len(),
        plan.routers.len(),
        plan.walls.len(),
        wall_cm,
        plan.wall_scale
    );

    Ok(ZoneResponse {
        pixels: compute_zones(&plan, config),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_request() -> Value {
        json!({
            "pixels": vec!["#f0f0f0"; 9],
            "receiver_coef": 4,
            "measurements": [],
            "routers": [{ "x": 82, "y": 81, "coef": "3", "frequency": "5.0" }],
            "wall_scale": 3.6231884057971016,
            "walls": [{ "x": { "x": 34, "y": 28 }, "y": { "x": 172, "y": 28 },
                        "color": "#999999", "thickness": 4, "length": 500 }]
        })
    }

    fn with(field: &str, value: Value) -> ZoneRequest {
        let mut body = valid_request();
        body[field] = value;
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_valid_request() {
        let request: ZoneRequest = serde_json::from_value(valid_request()).unwrap();
        let plan = request.validate().unwrap();
        assert_eq!(plan.pixels.len(), 9);
        assert_eq!(plan.routers, vec![Router::new(82, 81, 3.0, Band::Ghz5)]);
        assert_eq!(plan.walls[0].material, Material::Concrete);
        assert_eq!(plan.walls[0].thickness, 4.0);
        assert_eq!(plan.receiver_coef, 4.0);
    }

    #[test]
    fn test_wrong_pixels() {
        let err = with("pixels", json!("Wrong format of pixels")).validate().unwrap_err();
        assert!(matches!(err, ZoneError::MalformedPixels { .. }));
        assert_eq!(ErrorBody::from(&err).error, "Pixels have incorrect format");

        let err = with("pixels", json!(["#f0f0f0", "#fff"])).validate().unwrap_err();
        assert!(matches!(err, ZoneError::MalformedPixels { .. }));

        let err = with("pixels", json!([])).validate().unwrap_err();
        assert!(matches!(err, ZoneError::MalformedPixels { .. }));
    }

    #[test]
    fn test_pixels_must_be_hex_colors() {
        for pixel in ["abcdefg", "#gggggg", "f0f0f0#", "#f0f0f", "#+f+f+f"] {
            let err = with("pixels", json!(["#f0f0f0", pixel])).validate().unwrap_err();
            assert!(matches!(err, ZoneError::MalformedPixels { .. }), "{}", pixel);
        }
        let plan = with("pixels", json!(["#F0F0F0", "#99ff99"])).validate().unwrap();
        assert_eq!(plan.pixels, vec!["#F0F0F0", "#99ff99"]);
    }

    #[test]
    fn test_wrong_routers() {
        let err = with("routers", json!("Wrong format of routers")).validate().unwrap_err();
        assert_eq!(err.to_string(), "Routers have incorrect format");

        for router in [
            json!({ "x": 1, "y": 2, "coef": "3" }),
            json!({ "x": 1, "y": 2, "coef": "3", "frequency": "0" }),
            json!({ "x": 1, "y": 2, "coef": "abc", "frequency": "2.4" }),
            json!({ "x": 1, "y": 2, "coef": -1, "frequency": "2.4" }),
        ] {
            let err = with("routers", json!([router])).validate().unwrap_err();
            assert!(matches!(err, ZoneError::MalformedRouters { .. }), "{:?}", err);
        }
    }

    #[test]
    fn test_router_position_out_of_range() {
        for router in [
            json!({ "x": 4_000_000_000_000_000_000i64, "y": 81, "coef": "3", "frequency": "5.0" }),
            json!({ "x": 82, "y": -(MAX_COORDINATE + 1), "coef": "3", "frequency": "5.0" }),
            json!({ "x": 4e21, "y": 81, "coef": "3", "frequency": "5.0" }),
        ] {
            let err = with("routers", json!([router])).validate().unwrap_err();
            assert!(matches!(err, ZoneError::MalformedRouters { .. }), "{:?}", err);
        }

        let request = with("routers", json!([{ "x": MAX_COORDINATE, "y": -MAX_COORDINATE, "coef": 1, "frequency": 5 }]));
        let response = handle_request(&request, EngineConfig::default()).unwrap();
        assert_eq!(response.pixels.len(), 9);
    }

    #[test]
    fn test_numeric_router_fields() {
        let request = with("routers", json!([{ "x": 5, "y": 6, "coef": 2.5, "frequency": 2.4 }]));
        let plan = request.validate().unwrap();
        assert_eq!(plan.routers[0], Router::new(5, 6, 2.5, Band::Ghz2_4));

        let request = with("routers", json!([{ "x": 5, "y": 6, "coef": "1", "frequency": "5" }]));
        assert_eq!(request.validate().unwrap().routers[0].band, Band::Ghz5);
    }

    #[test]
    fn test_wrong_walls() {
        let err = with("walls", json!("Walls have incorrect format")).validate().unwrap_err();
        assert_eq!(ErrorBody::from(&err), ErrorBody {
            error: "Walls have incorrect format".to_string(),
            code: 338,
        });

        // missing length
        let wall = json!({ "x": { "x": 0, "y": 0 }, "y": { "x": 1, "y": 1 }, "color": "#999999", "thickness": 4 });
        let err = with("walls", json!([wall])).validate().unwrap_err();
        assert!(matches!(err, ZoneError::MalformedWalls { .. }));

        let wall = json!({ "x": { "x": 0, "y": 0 }, "y": { "x": 1, "y": 1 }, "color": "#123456",
                           "thickness": 4, "length": 2 });
        let err = with("walls", json!([wall])).validate().unwrap_err();
        assert!(err.reason().unwrap().contains("unknown material"));
    }

    #[test]
    fn test_wall_length_and_endpoints() {
        let wall = |a: i64, length: Value| {
            json!({ "x": { "x": a, "y": 28 }, "y": { "x": 172, "y": 28 }, "color": "#999999",
                    "thickness": 4, "length": length })
        };

        let err = with("walls", json!([wall(34, json!(-1))])).validate().unwrap_err();
        assert!(err.reason().unwrap().contains("length"));
        let err = with("walls", json!([wall(34, json!("long"))])).validate().unwrap_err();
        assert!(matches!(err, ZoneError::MalformedWalls { .. }));

        let err = with("walls", json!([wall(MAX_COORDINATE + 1, json!(500))])).validate().unwrap_err();
        assert!(err.reason().unwrap().contains("out of range"));

        let plan = with("walls", json!([wall(-MAX_COORDINATE, json!(0))])).validate().unwrap();
        assert_eq!(plan.walls[0].segment.a, Point::new(-MAX_COORDINATE, 28));
    }

    #[test]
    fn test_wrong_scale_and_receiver() {
        for scale in [json!("3.6"), json!(0.0), json!(null)] {
            let err = with("wall_scale", scale).validate().unwrap_err();
            assert!(matches!(err, ZoneError::MalformedScale { .. }));
        }
        let err = with("receiver_coef", json!(0)).validate().unwrap_err();
        assert!(matches!(err, ZoneError::MalformedReceiverCoef { .. }));
    }

    #[test]
    fn test_handle_request() {
        let request: ZoneRequest = serde_json::from_value(valid_request()).unwrap();
        let response = handle_request(&request, EngineConfig::default()).unwrap();
        assert_eq!(response.pixels, vec!["#009f60"; 9]);
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(ZoneRequest::from_json("{pixels"), Err(ZoneError::Json(_))));
    }
}
