use skolekart_core::geodata::{LayerStyle, MapFeature};
use skolekart_core::schools::{SchoolLayerController, Visibility};
use skolekart_core::surface::{
    Layer, MapSurface, ViewportSize, BASEMAP_LAYER, SCHOOL_LAYER, UPPER_SECONDARY_LAYER,
};
use skolekart_core::view::{LonLat, MapView};

fn school(name: &str, at: LonLat) -> MapFeature {
    let mut properties = serde_json::Map::new();
    properties.insert("navn".to_string(), name.into());
    MapFeature::new(geo::Point::new(at.lon, at.lat), properties)
}

fn school_surface() -> (MapSurface, LonLat) {
    let center = LonLat::new(10.7, 59.9);
    let mut surface = MapSurface::new(MapView::new(center, 11.0));
    surface.register(Layer::basemap(BASEMAP_LAYER));
    surface.register(Layer::vector(UPPER_SECONDARY_LAYER, LayerStyle::default()));
    surface.register(Layer::vector(SCHOOL_LAYER, LayerStyle::default()));
    surface
        .set_features(
            UPPER_SECONDARY_LAYER,
            vec![school("Oslo katedralskole", center)],
        )
        .unwrap();
    surface
        .set_features(
            SCHOOL_LAYER,
            vec![
                school("Marienlyst skole", center),
                school("Majorstuen skole", center),
            ],
        )
        .unwrap();
    surface
        .set_layers(&[BASEMAP_LAYER, UPPER_SECONDARY_LAYER])
        .unwrap();
    surface.attach(ViewportSize {
        width: 800.0,
        height: 600.0,
    });
    (surface, center)
}

#[test]
fn test_toggle_flicker_leaves_single_copy() {
    let (mut surface, _) = school_surface();
    let mut schools = SchoolLayerController::new(SCHOOL_LAYER);

    for _ in 0..7 {
        schools.toggle(&mut surface).unwrap();
    }
    assert_eq!(schools.visibility(), Visibility::Visible);
    assert_eq!(
        surface.composited().filter(|l| l.id == SCHOOL_LAYER).count(),
        1
    );

    schools.toggle(&mut surface).unwrap();
    assert_eq!(schools.visibility(), Visibility::Hidden);
    assert!(!surface.is_shown(SCHOOL_LAYER));

    // Forcing the same state twice is harmless too
    schools.set_visible(&mut surface, true).unwrap();
    schools.set_visible(&mut surface, true).unwrap();
    assert_eq!(
        surface.composited().filter(|l| l.id == SCHOOL_LAYER).count(),
        1
    );
}

#[test]
fn test_click_while_hidden_is_a_no_op() {
    let (mut surface, center) = school_surface();
    let mut schools = SchoolLayerController::new(SCHOOL_LAYER);

    schools.map_clicked(&surface, center).unwrap();
    assert!(schools.popup().is_none());

    // Populate the popup, hide, click somewhere else: content unchanged
    schools.set_visible(&mut surface, true).unwrap();
    schools.map_clicked(&surface, center).unwrap();
    let before = schools.popup().cloned().unwrap();

    schools.set_visible(&mut surface, false).unwrap();
    schools
        .map_clicked(&surface, LonLat::new(5.0, 58.0))
        .unwrap();
    assert_eq!(schools.popup(), Some(&before));
}

#[test]
fn test_click_joins_names_in_draw_order() {
    let (mut surface, center) = school_surface();
    let mut schools = SchoolLayerController::new(SCHOOL_LAYER);
    schools.set_visible(&mut surface, true).unwrap();

    schools.map_clicked(&surface, center).unwrap();
    let popup = schools.popup().unwrap();
    assert_eq!(popup.coordinate, center);
    assert_eq!(
        popup.content(),
        "Oslo katedralskole, Marienlyst skole, Majorstuen skole"
    );
}

#[test]
fn test_click_on_empty_area_yields_empty_content() {
    let (mut surface, _) = school_surface();
    let mut schools = SchoolLayerController::new(SCHOOL_LAYER);
    schools.set_visible(&mut surface, true).unwrap();

    let far_away = LonLat::new(5.0, 58.0);
    schools.map_clicked(&surface, far_away).unwrap();
    let popup = schools.popup().unwrap();
    assert_eq!(popup.coordinate, far_away);
    assert_eq!(popup.content(), "");
}

#[test]
fn test_popup_replaced_wholesale_on_each_click() {
    let (mut surface, center) = school_surface();
    let mut schools = SchoolLayerController::new(SCHOOL_LAYER);
    schools.set_visible(&mut surface, true).unwrap();

    schools.map_clicked(&surface, center).unwrap();
    assert_eq!(schools.popup().unwrap().names.len(), 3);

    let far_away = LonLat::new(5.0, 58.0);
    schools.map_clicked(&surface, far_away).unwrap();
    assert!(schools.popup().unwrap().names.is_empty());
    assert_eq!(schools.popup().unwrap().coordinate, far_away);
}
