// Hazard Zones - ring-shaped regions produced by the seismic and tsunami models
// A scenario resolves to zone lists ordered innermost first

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Seismic,
    Tsunami,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardZone {
    pub kind: HazardKind,
    /// MMI for seismic zones, wave height (m) for tsunami zones
    pub intensity: f64,
    /// Outer radius of the ring (km)
    pub radius_km: f64,
    /// Severity label ("VII", "extreme", ...)
    pub label: String,
    pub color: String,
    /// Closed ring of [longitude, latitude] vertices
    pub ring: Vec<[f64; 2]>,
}

impl HazardZone {
    /// Integer MMI level as reported to renderers (truncated toward zero).
    pub fn mmi_level(&self) -> Option<u8> {
        match self.kind {
            HazardKind::Seismic => Some(self.intensity as u8),
            HazardKind::Tsunami => None,
        }
    }

    /// GeoJSON `Feature` with a single-ring `Polygon` geometry.
    pub fn to_geojson(&self) -> Value {
        let properties = match self.kind {
            HazardKind::Seismic => json!({
                "mmi": self.mmi_level(),
                "distance_km": self.radius_km,
                "color": self.color,
            }),
            HazardKind::Tsunami => json!({
                "height_m": self.intensity,
                "category": self.label,
                "distance_km": self.radius_km,
                "color": self.color,
            }),
        };

        json!({
            "type": "Feature",
            "properties": properties,
            "geometry": {
                "type": "Polygon",
                "coordinates": [self.ring],
            }
        })
    }
}

/// Wrap zones into a GeoJSON `FeatureCollection`, preserving order.
pub fn feature_collection(zones: &[HazardZone]) -> Value {
    json!({
        "type": "FeatureCollection",
        "features": zones.iter().map(HazardZone::to_geojson).collect::<Vec<_>>(),
    })
}

/// Largest outer radius among zones of `kind`.
pub fn max_radius_km(zones: &[HazardZone], kind: HazardKind) -> Option<f64> {
    zones
        .iter()
        .filter(|z| z.kind == kind)
        .map(|z| z.radius_km)
        .fold(None, |acc, r| Some(acc.map_or(r, |a: f64| a.max(r))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(kind: HazardKind, intensity: f64, radius_km: f64) -> HazardZone {
        HazardZone {
            kind,
            intensity,
            radius_km,
            label: "test".to_string(),
            color: "#FF0000".to_string(),
            ring: vec![[0.0, 1.0], [1.0, 0.0], [0.0, 1.0]],
        }
    }

    #[test]
    fn test_seismic_geojson() {
        let feature = zone(HazardKind::Seismic, 6.8, 53.6).to_geojson();
        assert_eq!(feature["type"], "Feature");
        assert_eq!(feature["properties"]["mmi"], 6);
        assert_eq!(feature["properties"]["distance_km"], 53.6);
        assert_eq!(feature["geometry"]["type"], "Polygon");
        assert_eq!(feature["geometry"]["coordinates"][0][1][0], 1.0);
    }

    #[test]
    fn test_tsunami_geojson() {
        let feature = zone(HazardKind::Tsunami, 12.5, 500.0).to_geojson();
        assert_eq!(feature["properties"]["height_m"], 12.5);
        assert_eq!(feature["properties"]["category"], "test");
        assert!(feature["properties"].get("mmi").is_none());
    }

    #[test]
    fn test_feature_collection_keeps_order() {
        let zones = vec![
            zone(HazardKind::Seismic, 8.0, 10.0),
            zone(HazardKind::Seismic, 5.0, 20.0),
        ];
        let fc = feature_collection(&zones);
        assert_eq!(fc["features"].as_array().map(Vec::len), Some(2));
        assert_eq!(fc["features"][1]["properties"]["distance_km"], 20.0);
    }

    #[test]
    fn test_max_radius_by_kind() {
        let zones = vec![
            zone(HazardKind::Seismic, 8.0, 10.0),
            zone(HazardKind::Tsunami, 3.0, 40.0),
            zone(HazardKind::Seismic, 5.0, 20.0),
        ];
        assert_eq!(max_radius_km(&zones, HazardKind::Seismic), Some(20.0));
        assert_eq!(max_radius_km(&zones, HazardKind::Tsunami), Some(40.0));
        assert_eq!(max_radius_km(&[], HazardKind::Tsunami), None);
    }
}
