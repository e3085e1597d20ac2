use crate::KartError;
use geojson::{FeatureCollection, GeoJson};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Default rendering of a whole vector layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    pub stroke: Rgb,
    pub stroke_width: f32,
    pub point_radius: f32,
    pub point_fill: Rgb,
}

impl Default for LayerStyle {
    fn default() -> Self {
        Self {
            stroke: Rgb::new(0.2, 0.6, 0.8),
            stroke_width: 2.0,
            point_radius: 4.0,
            point_fill: Rgb::new(0.2, 0.6, 0.8),
        }
    }
}

/// Per-feature override, cleared by passing `None` back to the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStyle {
    pub stroke: Option<Rgb>,
    pub stroke_width: f32,
    pub label: Option<String>,
}

impl FeatureStyle {
    /// The treatment for a feature under the pointer: emphasized stroke
    /// plus a name label (light fill, dark halo — rendered by the widget).
    pub fn focused(label: Option<String>) -> Self {
        Self {
            stroke: Some(Rgb::new(0.2, 0.6, 0.8)),
            stroke_width: 2.0,
            label,
        }
    }
}

/// One geographic vector shape with its property bag.
#[derive(Debug, Clone)]
pub struct MapFeature {
    pub geometry: geo::Geometry<f64>,
    pub properties: serde_json::Map<String, serde_json::Value>,
    pub style: Option<FeatureStyle>,
}

impl MapFeature {
    pub fn new(
        geometry: impl Into<geo::Geometry<f64>>,
        properties: serde_json::Map<String, serde_json::Value>,
    ) -> Self {
        Self {
            geometry: geometry.into(),
            properties,
            style: None,
        }
    }

    /// Human-readable name. The school datasets use `navn`, the
    /// administrative-boundary datasets use `name`.
    pub fn display_name(&self) -> Option<&str> {
        for key in ["navn", "name"] {
            if let Some(value) = self.properties.get(key).and_then(|v| v.as_str()) {
                return Some(value);
            }
        }
        None
    }
}

/// Where a dataset comes from. Relative paths are resolved against the
/// configured data directory by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetSource {
    Path(PathBuf),
    Url(String),
}

impl DatasetSource {
    pub fn describe(&self) -> String {
        match self {
            DatasetSource::Path(p) => p.display().to_string(),
            DatasetSource::Url(u) => u.clone(),
        }
    }
}

/// Parses a GeoJSON feature collection into map features. Features
/// without geometry are skipped; a malformed document is a
/// `ResourceLoad` error for the whole dataset.
pub fn parse_features(name: &str, raw: &str) -> Result<Vec<MapFeature>, KartError> {
    let gj: GeoJson = raw.parse().map_err(|e| KartError::resource(name, e))?;
    let fc = FeatureCollection::try_from(gj).map_err(|e| KartError::resource(name, e))?;

    let mut features = Vec::with_capacity(fc.features.len());
    for feature in fc.features {
        let Some(geometry) = feature.geometry else {
            debug!("Dataset '{}' has a feature without geometry; skipped", name);
            continue;
        };
        let geometry =
            geo::Geometry::<f64>::try_from(geometry).map_err(|e| KartError::resource(name, e))?;
        features.push(MapFeature {
            geometry,
            properties: feature.properties.unwrap_or_default(),
            style: None,
        });
    }
    Ok(features)
}

/// Loads a dataset from disk or over HTTP.
pub fn load_features(name: &str, source: &DatasetSource) -> Result<Vec<MapFeature>, KartError> {
    let raw = match source {
        DatasetSource::Path(path) => {
            std::fs::read_to_string(path).map_err(|e| KartError::resource(name, e))?
        }
        DatasetSource::Url(url) => {
            let response = ureq::get(url)
                .timeout(FETCH_TIMEOUT)
                .call()
                .map_err(|e| KartError::resource(name, e))?;
            let mut raw = String::new();
            response
                .into_reader()
                .read_to_string(&mut raw)
                .map_err(|e| KartError::resource(name, e))?;
            raw
        }
    };

    let features = parse_features(name, &raw)?;
    info!(
        "Loaded dataset '{}' — features={} source={}",
        name,
        features.len(),
        source.describe()
    );
    Ok(features)
}

/// Scans a directory for GeoJSON datasets, sorted by file name.
pub fn discover_datasets(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .max_depth(2)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| {
            p.extension()
                .map(|ext| ext.eq_ignore_ascii_case("geojson"))
                .unwrap_or(false)
        })
        .collect();
    found.sort();
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    const SMALL_FC: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "name": "Oslo" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[10.0, 59.0], [11.0, 59.0], [11.0, 60.0], [10.0, 60.0], [10.0, 59.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": { "navn": "Majorstuen skole" },
                "geometry": { "type": "Point", "coordinates": [10.71, 59.93] }
            }
        ]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let features = parse_features("kommuner", SMALL_FC).unwrap();
        assert_eq!(features.len(), 2);
        assert_eq!(features[0].display_name(), Some("Oslo"));
        assert_eq!(features[1].display_name(), Some("Majorstuen skole"));
        assert!(matches!(features[0].geometry, geo::Geometry::Polygon(_)));
        assert!(matches!(features[1].geometry, geo::Geometry::Point(_)));
    }

    #[test]
    fn test_malformed_document_is_resource_error() {
        let err = parse_features("kommuner", "{ not geojson").unwrap_err();
        match err {
            crate::KartError::ResourceLoad { name, .. } => assert_eq!(name, "kommuner"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_display_name_missing() {
        let raw = r#"{"type":"FeatureCollection","features":[
            {"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1.0,2.0]}}
        ]}"#;
        let features = parse_features("x", raw).unwrap();
        assert_eq!(features[0].display_name(), None);
    }

    #[test]
    fn test_load_from_path_and_discover() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("kommuner.geojson");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(SMALL_FC.as_bytes()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a dataset").unwrap();

        let features =
            load_features("kommuner", &DatasetSource::Path(path.clone())).unwrap();
        assert_eq!(features.len(), 2);

        let datasets = discover_datasets(dir.path());
        assert_eq!(datasets, vec![path]);
    }

    #[test]
    fn test_missing_file_is_resource_error() {
        let err = load_features(
            "fylker",
            &DatasetSource::Path(PathBuf::from("/no/such/fylker.geojson")),
        )
        .unwrap_err();
        assert!(matches!(err, crate::KartError::ResourceLoad { .. }));
    }
}
