//! Slippy map / Web-Mercator math shared by the hit tester, the map
//! widget and the CLI. The world is one 256-px tile at zoom 0.

pub const TILE_SIZE: f64 = 256.0;

/// Mercator's usable latitude range.
pub const MAX_LATITUDE: f64 = 85.0511;

pub fn lon_to_x(lon: f64, zoom: f64) -> f64 {
    ((lon + 180.0) / 360.0) * 2.0f64.powf(zoom) * TILE_SIZE
}

pub fn lat_to_y(lat: f64, zoom: f64) -> f64 {
    let lat_rad = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / std::f64::consts::PI) / 2.0
        * 2.0f64.powf(zoom)
        * TILE_SIZE
}

pub fn x_to_lon(x: f64, zoom: f64) -> f64 {
    (x / (TILE_SIZE * 2.0f64.powf(zoom))) * 360.0 - 180.0
}

pub fn y_to_lat(y: f64, zoom: f64) -> f64 {
    let n = std::f64::consts::PI - 2.0 * std::f64::consts::PI * y / (TILE_SIZE * 2.0f64.powf(zoom));
    (0.5 * (n.exp() - (-n).exp())).atan().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_oslo() {
        let (lon, lat) = (10.75, 59.91);
        let x = lon_to_x(lon, 11.0);
        let y = lat_to_y(lat, 11.0);
        assert_relative_eq!(x_to_lon(x, 11.0), lon, epsilon = 1e-9);
        assert_relative_eq!(y_to_lat(y, 11.0), lat, epsilon = 1e-9);
    }

    #[test]
    fn test_world_edges_at_zoom_zero() {
        assert_relative_eq!(lon_to_x(-180.0, 0.0), 0.0);
        assert_relative_eq!(lon_to_x(180.0, 0.0), TILE_SIZE);
        // Latitude is clamped, so the poles land on the tile edge
        assert_relative_eq!(lat_to_y(90.0, 0.0), lat_to_y(MAX_LATITUDE, 0.0));
    }
}
