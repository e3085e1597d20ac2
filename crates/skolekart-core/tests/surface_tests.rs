use skolekart_core::geodata::{LayerStyle, MapFeature};
use skolekart_core::project;
use skolekart_core::surface::{
    Layer, MapSurface, ViewportSize, BASEMAP_LAYER, MUNICIPALITY_LAYER, SCHOOL_LAYER,
};
use skolekart_core::view::{LonLat, MapView};
use skolekart_core::KartError;

fn named(name: &str, geometry: impl Into<geo::Geometry<f64>>) -> MapFeature {
    let mut properties = serde_json::Map::new();
    properties.insert("name".to_string(), name.into());
    MapFeature::new(geometry, properties)
}

fn square(center: LonLat, half: f64) -> geo::Polygon<f64> {
    geo::Polygon::new(
        geo::LineString::from(vec![
            (center.lon - half, center.lat - half),
            (center.lon + half, center.lat - half),
            (center.lon + half, center.lat + half),
            (center.lon - half, center.lat + half),
            (center.lon - half, center.lat - half),
        ]),
        vec![],
    )
}

/// Surface centered over Oslo with one municipality polygon and one
/// school point, both composited.
fn oslo_surface() -> MapSurface {
    let center = LonLat::new(10.7, 59.9);
    let mut surface = MapSurface::new(MapView::new(center, 11.0));
    surface.register(Layer::basemap(BASEMAP_LAYER));
    surface.register(Layer::vector(MUNICIPALITY_LAYER, LayerStyle::default()));
    surface.register(Layer::vector(SCHOOL_LAYER, LayerStyle::default()));
    surface
        .set_features(
            MUNICIPALITY_LAYER,
            vec![named("Oslo", square(center, 0.1))],
        )
        .unwrap();
    surface
        .set_features(
            SCHOOL_LAYER,
            vec![named("Marienlyst skole", geo::Point::new(center.lon, center.lat))],
        )
        .unwrap();
    surface
        .set_layers(&[BASEMAP_LAYER, MUNICIPALITY_LAYER, SCHOOL_LAYER])
        .unwrap();
    surface.attach(ViewportSize {
        width: 800.0,
        height: 600.0,
    });
    surface
}

#[test]
fn test_polygon_containment_hit_and_miss() {
    let surface = oslo_surface();

    let inside = surface
        .features_at(LonLat::new(10.7, 59.9), 0.0, Some(MUNICIPALITY_LAYER))
        .unwrap();
    assert_eq!(inside.len(), 1);
    assert_eq!(
        surface.feature(&inside[0]).unwrap().display_name(),
        Some("Oslo")
    );

    let outside = surface
        .features_at(LonLat::new(5.0, 58.0), 0.0, Some(MUNICIPALITY_LAYER))
        .unwrap();
    assert!(outside.is_empty());
}

#[test]
fn test_point_feature_uses_screen_pixel_tolerance() {
    let surface = oslo_surface();
    let center = surface.view().center();
    let scale = 2.0f64.powf(surface.view().zoom());

    // Offset the query by a known number of screen pixels east
    let query_at = |screen_px: f64| {
        let wx = project::lon_to_x(center.lon, 0.0) + screen_px / scale;
        LonLat::new(project::x_to_lon(wx, 0.0), center.lat)
    };

    let near = surface
        .features_at(query_at(5.0), 10.0, Some(SCHOOL_LAYER))
        .unwrap();
    assert_eq!(near.len(), 1);

    let far = surface
        .features_at(query_at(25.0), 10.0, Some(SCHOOL_LAYER))
        .unwrap();
    assert!(far.is_empty());
}

#[test]
fn test_layer_filter_restricts_query() {
    let surface = oslo_surface();
    let center = surface.view().center();

    let municipalities = surface
        .features_at(center, 10.0, Some(MUNICIPALITY_LAYER))
        .unwrap();
    assert!(municipalities.iter().all(|r| r.layer == MUNICIPALITY_LAYER));

    let everything = surface.features_at(center, 10.0, None).unwrap();
    assert_eq!(everything.len(), 2);
    // Draw order: municipalities before schools
    assert_eq!(everything[0].layer, MUNICIPALITY_LAYER);
    assert_eq!(everything[1].layer, SCHOOL_LAYER);
}

#[test]
fn test_unknown_layer_filter_fails() {
    let surface = oslo_surface();
    let err = surface
        .features_at(LonLat::new(10.7, 59.9), 0.0, Some("tannlegekontor"))
        .unwrap_err();
    assert!(matches!(err, KartError::UnknownLayer(_)));
}

#[test]
fn test_hidden_layer_skipped_by_wide_query_but_directly_addressable() {
    let mut surface = oslo_surface();
    surface.hide_layer(SCHOOL_LAYER);
    let center = surface.view().center();

    let wide = surface.features_at(center, 10.0, None).unwrap();
    assert!(wide.iter().all(|r| r.layer != SCHOOL_LAYER));

    // The registered layer can still be queried by name
    let direct = surface
        .features_at(center, 10.0, Some(SCHOOL_LAYER))
        .unwrap();
    assert_eq!(direct.len(), 1);
}

#[test]
fn test_query_before_load_resolves_empty() {
    let mut surface = MapSurface::new(MapView::new(LonLat::new(10.7, 59.9), 11.0));
    surface.register(Layer::vector(MUNICIPALITY_LAYER, LayerStyle::default()));
    surface.set_layers(&[MUNICIPALITY_LAYER]).unwrap();
    surface.attach(ViewportSize {
        width: 800.0,
        height: 600.0,
    });

    // Dataset fetch has not resolved yet; the source is simply empty
    let hits = surface
        .features_at(LonLat::new(10.7, 59.9), 0.0, None)
        .unwrap();
    assert!(hits.is_empty());
}
