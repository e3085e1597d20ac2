use skolekart_core::locate::{recenter, GeolocationProvider, LOCATE_DURATION, LOCATE_ZOOM};
use skolekart_core::view::{LonLat, MapView};
use skolekart_core::KartError;
use std::time::Duration;

struct FixedPosition(LonLat);

impl GeolocationProvider for FixedPosition {
    fn current_position(&self) -> Result<LonLat, KartError> {
        Ok(self.0)
    }
}

struct Unavailable;

impl GeolocationProvider for Unavailable {
    fn current_position(&self) -> Result<LonLat, KartError> {
        Err(KartError::Geolocation("User denied Geolocation".to_string()))
    }
}

#[test]
fn test_successful_fix_lands_on_position_at_locate_zoom() {
    let mut view = MapView::new(LonLat::new(10.7, 59.9), 11.0);
    let provider = FixedPosition(LonLat::new(10.0, 60.0));

    let position = provider.current_position().unwrap();
    recenter(&mut view, position);

    // Drive the animation to completion
    let mut guard = 0;
    while view.advance(Duration::from_millis(16)) {
        guard += 1;
        assert!(guard < 1000, "animation never finished");
    }

    assert_eq!(view.center(), LonLat::new(10.0, 60.0));
    assert_eq!(view.zoom(), LOCATE_ZOOM);
}

#[test]
fn test_failed_fix_leaves_view_untouched() {
    let mut view = MapView::new(LonLat::new(10.7, 59.9), 11.0);
    let before_center = view.center();
    let before_zoom = view.zoom();

    let provider = Unavailable;
    let result = provider.current_position();
    match result {
        Err(KartError::Geolocation(message)) => {
            assert_eq!(message, "User denied Geolocation");
        }
        other => panic!("expected geolocation failure, got {other:?}"),
    }
    // The failure path never touches the view
    assert_eq!(view.center(), before_center);
    assert_eq!(view.zoom(), before_zoom);
    assert!(!view.is_animating());
    assert!(!view.advance(Duration::from_millis(16)));
}

#[test]
fn test_overlapping_requests_last_fix_wins() {
    let mut view = MapView::new(LonLat::new(10.7, 59.9), 11.0);

    recenter(&mut view, LonLat::new(5.0, 58.0));
    view.advance(LOCATE_DURATION / 4);

    // A second fix arrives before the first animation finishes
    recenter(&mut view, LonLat::new(10.0, 60.0));
    while view.advance(Duration::from_millis(16)) {}

    assert_eq!(view.center(), LonLat::new(10.0, 60.0));
    assert_eq!(view.zoom(), LOCATE_ZOOM);
}
