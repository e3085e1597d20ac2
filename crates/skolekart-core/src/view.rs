use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Geographic coordinate in degrees, longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LonLat {
    pub lon: f64,
    pub lat: f64,
}

impl LonLat {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

#[derive(Debug, Clone)]
struct FlyTo {
    from_center: LonLat,
    from_zoom: f64,
    to_center: LonLat,
    to_zoom: f64,
    duration: Duration,
    elapsed: Duration,
}

/// The map camera: a center coordinate and a fractional zoom level.
///
/// Animated transitions are advanced explicitly with [`MapView::advance`]
/// so callers control the clock. Direct sets cancel a running animation.
#[derive(Debug, Clone)]
pub struct MapView {
    center: LonLat,
    zoom: f64,
    animation: Option<FlyTo>,
}

impl MapView {
    pub fn new(center: LonLat, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            animation: None,
        }
    }

    pub fn center(&self) -> LonLat {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn set_center(&mut self, center: LonLat) {
        self.animation = None;
        self.center = center;
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.animation = None;
        self.zoom = zoom;
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Starts an eased transition to a new center and zoom. A zero
    /// duration applies the target immediately.
    pub fn animate_to(&mut self, center: LonLat, zoom: f64, duration: Duration) {
        if duration.is_zero() {
            self.center = center;
            self.zoom = zoom;
            self.animation = None;
            return;
        }
        self.animation = Some(FlyTo {
            from_center: self.center,
            from_zoom: self.zoom,
            to_center: center,
            to_zoom: zoom,
            duration,
            elapsed: Duration::ZERO,
        });
    }

    /// Advances a running animation by `dt`. Returns true while an
    /// animation is still in flight after the step.
    pub fn advance(&mut self, dt: Duration) -> bool {
        let Some(fly) = self.animation.as_mut() else {
            return false;
        };
        fly.elapsed += dt;
        if fly.elapsed >= fly.duration {
            // Land exactly on the target, not on the last interpolant.
            self.center = fly.to_center;
            self.zoom = fly.to_zoom;
            self.animation = None;
            return false;
        }
        let t = fly.elapsed.as_secs_f64() / fly.duration.as_secs_f64();
        let t = t * t * (3.0 - 2.0 * t); // smoothstep
        self.center = LonLat::new(
            fly.from_center.lon + (fly.to_center.lon - fly.from_center.lon) * t,
            fly.from_center.lat + (fly.to_center.lat - fly.from_center.lat) * t,
        );
        self.zoom = fly.from_zoom + (fly.to_zoom - fly.from_zoom) * t;
        true
    }
}
