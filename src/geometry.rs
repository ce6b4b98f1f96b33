// Geospatial helpers - great-circle distance and hazard ring polygons
// Coordinates are emitted as [longitude, latitude] pairs (GeoJSON order)

use std::f64::consts::PI;

use crate::config::ZoneConfig;

/// `n` evenly spaced samples over `[start, end]`, endpoints included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Great-circle distance (km) by the haversine formula.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_km: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin() * (d_lon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    radius_km * c
}

/// Approximate a circle of `radius_km` around a center as a closed ring.
///
/// Degrees are derived with a flat-earth approximation: `Δlat = d / k` and
/// `Δlon = d / (k · cos(lat))` with `k` km per degree. Vertex angles run over
/// `[0, 2π]` inclusive, so the last vertex repeats the first.
pub fn ring_polygon(center_lat: f64, center_lon: f64, radius_km: f64, zones: &ZoneConfig) -> Vec<[f64; 2]> {
    let lat_offset = radius_km / zones.km_per_degree;
    let lon_offset = radius_km / (zones.km_per_degree * center_lat.to_radians().cos());

    linspace(0.0, 2.0 * PI, zones.ring_vertices)
        .into_iter()
        .map(|angle| {
            [
                center_lon + lon_offset * angle.sin(),
                center_lat + lat_offset * angle.cos(),
            ]
        })
        .collect()
}

/// Clamp a latitude into [-90, 90].
pub fn clamp_latitude(lat: f64) -> f64 {
    lat.clamp(-90.0, 90.0)
}

/// Wrap a longitude into [-180, 180).
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}
