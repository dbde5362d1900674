use crate::{Error, Result};
use geojson::{Geometry, Value};

/// Decides whether an intersects geometry is acceptable.
///
/// Any `Fn(&Geometry) -> bool` is a validator.
///
/// # Examples
///
/// ```
/// use geojson::{Geometry, Value};
/// use stac_search::{GeometryValidator, Search};
///
/// let only_points = |geometry: &Geometry| matches!(geometry.value, Value::Point(_));
/// let polygon = serde_json::json!({
///     "type": "Polygon",
///     "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
/// });
/// let result = Search::builder("api").intersects(polygon).build_with(&only_points);
/// assert!(result.is_err());
/// ```
pub trait GeometryValidator {
    /// Returns true if the geometry is valid.
    fn is_valid(&self, geometry: &Geometry) -> bool;
}

/// The default validator, with the structural rules of the GeoJSON specification.
///
/// - positions have two or three coordinates
/// - line strings have at least two positions
/// - polygon rings have at least four positions and are closed
/// - multi-geometries and collections are valid if all their members are
#[derive(Clone, Copy, Debug, Default)]
pub struct GeojsonValidator;

impl GeometryValidator for GeojsonValidator {
    fn is_valid(&self, geometry: &Geometry) -> bool {
        match &geometry.value {
            Value::Point(position) => is_position(position),
            Value::MultiPoint(positions) => positions.iter().all(|p| is_position(p)),
            Value::LineString(line) => is_line_string(line),
            Value::MultiLineString(lines) => lines.iter().all(|l| is_line_string(l)),
            Value::Polygon(rings) => is_polygon(rings),
            Value::MultiPolygon(polygons) => polygons.iter().all(|p| is_polygon(p)),
            Value::GeometryCollection(geometries) => geometries.iter().all(|g| self.is_valid(g)),
        }
    }
}

impl<F> GeometryValidator for F
where
    F: Fn(&Geometry) -> bool,
{
    fn is_valid(&self, geometry: &Geometry) -> bool {
        self(geometry)
    }
}

/// Converts a GeoJSON-like JSON value into a geometry and checks it.
pub(crate) fn validate(
    value: serde_json::Value,
    validator: &(impl GeometryValidator + ?Sized),
) -> Result<Geometry> {
    let geometry = Geometry::from_json_value(value)
        .map_err(|err| Error::InvalidGeometry(err.to_string()))?;
    check(geometry, validator)
}

/// Checks an already-built geometry.
pub(crate) fn check(
    geometry: Geometry,
    validator: &(impl GeometryValidator + ?Sized),
) -> Result<Geometry> {
    if validator.is_valid(&geometry) {
        Ok(geometry)
    } else {
        Err(Error::InvalidGeometry("GeoJSON is not valid".to_string()))
    }
}

fn is_position(position: &[f64]) -> bool {
    (2..=3).contains(&position.len())
}

fn is_line_string(line: &[Vec<f64>]) -> bool {
    line.len() >= 2 && line.iter().all(|p| is_position(p))
}

fn is_polygon(rings: &[Vec<Vec<f64>>]) -> bool {
    rings.iter().all(|ring| {
        ring.len() >= 4 && ring.iter().all(|p| is_position(p)) && ring.first() == ring.last()
    })
}
