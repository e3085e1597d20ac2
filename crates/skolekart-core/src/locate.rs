use crate::view::{LonLat, MapView};
use crate::KartError;
use log::info;
use serde::Deserialize;
use std::time::Duration;

/// Target zoom after a successful locate.
pub const LOCATE_ZOOM: f64 = 12.0;

/// Length of the recenter animation.
pub const LOCATE_DURATION: Duration = Duration::from_millis(500);

/// One-shot device position lookup: exactly one success-or-failure per
/// call, no retry, no cancellation.
pub trait GeolocationProvider {
    fn current_position(&self) -> Result<LonLat, KartError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

/// IP-based geolocation over ip-api.com. Coarse, but it needs no
/// permissions and answers with plain JSON.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    endpoint: String,
    timeout: Duration,
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self {
            endpoint: "http://ip-api.com/json/".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl IpGeolocator {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }
}

impl GeolocationProvider for IpGeolocator {
    fn current_position(&self) -> Result<LonLat, KartError> {
        let response = ureq::get(&self.endpoint)
            .timeout(self.timeout)
            .call()
            .map_err(|e| KartError::Geolocation(e.to_string()))?;
        let body: IpApiResponse = response
            .into_json()
            .map_err(|e| KartError::Geolocation(e.to_string()))?;

        if body.status != "success" {
            return Err(KartError::Geolocation(
                body.message.unwrap_or_else(|| "position unavailable".to_string()),
            ));
        }
        match (body.lon, body.lat) {
            (Some(lon), Some(lat)) => {
                info!("Geolocation fix — lon={lon} lat={lat}");
                Ok(LonLat::new(lon, lat))
            }
            _ => Err(KartError::Geolocation(
                "response carried no coordinates".to_string(),
            )),
        }
    }
}

/// Applies a successful fix: animate to the position at the fixed locate
/// zoom. Callers surface failures themselves and leave the view alone.
pub fn recenter(view: &mut MapView, position: LonLat) {
    view.animate_to(position, LOCATE_ZOOM, LOCATE_DURATION);
}
