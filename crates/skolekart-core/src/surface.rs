use crate::geodata::{FeatureStyle, LayerStyle, MapFeature};
use crate::project;
use crate::view::{LonLat, MapView};
use crate::KartError;
use geo::{BoundingRect, Contains};
use log::warn;

pub const BASEMAP_LAYER: &str = "basemap";
pub const MUNICIPALITY_LAYER: &str = "kommuner";
pub const COUNTY_LAYER: &str = "fylker";
pub const UPPER_SECONDARY_LAYER: &str = "vgs";
pub const SCHOOL_LAYER: &str = "skoler";

#[derive(Debug, Clone)]
pub enum LayerKind {
    Basemap,
    Vector(Vec<MapFeature>),
}

#[derive(Debug, Clone)]
pub struct Layer {
    pub id: String,
    pub kind: LayerKind,
    pub style: LayerStyle,
}

impl Layer {
    pub fn basemap(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Basemap,
            style: LayerStyle::default(),
        }
    }

    /// A vector layer starts empty; its features arrive in place when the
    /// dataset load resolves.
    pub fn vector(id: impl Into<String>, style: LayerStyle) -> Self {
        Self {
            id: id.into(),
            kind: LayerKind::Vector(Vec::new()),
            style,
        }
    }

    pub fn features(&self) -> &[MapFeature] {
        match &self.kind {
            LayerKind::Vector(features) => features,
            LayerKind::Basemap => &[],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

/// Stable handle to a feature inside a registered layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRef {
    pub layer: String,
    pub index: usize,
}

/// The shared map instance: camera, layer registry and the ordered
/// composited list. Draw order is list order (basemap first).
pub struct MapSurface {
    view: MapView,
    viewport: Option<ViewportSize>,
    layers: Vec<Layer>,
    order: Vec<String>,
}

impl MapSurface {
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            viewport: None,
            layers: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut MapView {
        &mut self.view
    }

    /// Binds the surface to a drawable region. Happens once per
    /// application lifetime; later size changes go through [`resize`].
    ///
    /// [`resize`]: MapSurface::resize
    pub fn attach(&mut self, viewport: ViewportSize) {
        if self.viewport.is_some() {
            warn!("Map surface attached twice; keeping the new viewport");
        }
        self.viewport = Some(viewport);
    }

    pub fn resize(&mut self, viewport: ViewportSize) {
        if self.viewport.is_some() {
            self.viewport = Some(viewport);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    /// Adds a layer to the registry without compositing it. Registering
    /// an id again replaces the layer.
    pub fn register(&mut self, layer: Layer) {
        if let Some(existing) = self.layers.iter_mut().find(|l| l.id == layer.id) {
            *existing = layer;
        } else {
            self.layers.push(layer);
        }
    }

    /// Replaces a registered vector layer's features in place.
    pub fn set_features(
        &mut self,
        layer_id: &str,
        features: Vec<MapFeature>,
    ) -> Result<(), KartError> {
        let layer = self
            .layers
            .iter_mut()
            .find(|l| l.id == layer_id)
            .ok_or_else(|| KartError::UnknownLayer(layer_id.to_string()))?;
        layer.kind = LayerKind::Vector(features);
        Ok(())
    }

    /// Replaces the whole composited list. Unknown ids fail, duplicates
    /// collapse to their first occurrence.
    pub fn set_layers(&mut self, ids: &[&str]) -> Result<(), KartError> {
        let mut order = Vec::with_capacity(ids.len());
        for id in ids {
            if !self.layers.iter().any(|l| l.id == *id) {
                return Err(KartError::UnknownLayer(id.to_string()));
            }
            if !order.iter().any(|o: &String| o == id) {
                order.push(id.to_string());
            }
        }
        self.order = order;
        Ok(())
    }

    /// Appends a registered layer to the composited list. A no-op when
    /// the layer is already shown, so toggle flicker cannot duplicate it.
    pub fn show_layer(&mut self, id: &str) -> Result<(), KartError> {
        if !self.layers.iter().any(|l| l.id == id) {
            return Err(KartError::UnknownLayer(id.to_string()));
        }
        if !self.order.iter().any(|o| o == id) {
            self.order.push(id.to_string());
        }
        Ok(())
    }

    pub fn hide_layer(&mut self, id: &str) {
        self.order.retain(|o| o != id);
    }

    pub fn is_shown(&self, id: &str) -> bool {
        self.order.iter().any(|o| o == id)
    }

    /// Composited layers in draw order.
    pub fn composited(&self) -> impl Iterator<Item = &Layer> {
        self.order
            .iter()
            .filter_map(|id| self.layers.iter().find(|l| &l.id == id))
    }

    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn feature(&self, r: &FeatureRef) -> Option<&MapFeature> {
        self.layer(&r.layer)?.features().get(r.index)
    }

    pub fn set_feature_style(&mut self, r: &FeatureRef, style: Option<FeatureStyle>) {
        if let Some(layer) = self.layers.iter_mut().find(|l| l.id == r.layer) {
            if let LayerKind::Vector(features) = &mut layer.kind {
                if let Some(feature) = features.get_mut(r.index) {
                    feature.style = style;
                }
            }
        }
    }

    /// Geographic coordinate under a viewport pixel, with the camera
    /// centered in the viewport.
    pub fn coordinate_at_pixel(&self, pixel: (f32, f32)) -> Result<LonLat, KartError> {
        let Some(viewport) = self.viewport else {
            return Err(KartError::NotAttached);
        };
        let scale = 2.0f64.powf(self.view.zoom());
        let cx = project::lon_to_x(self.view.center().lon, 0.0);
        let cy = project::lat_to_y(self.view.center().lat, 0.0);
        let wx = cx + (pixel.0 as f64 - viewport.width as f64 / 2.0) / scale;
        let wy = cy + (pixel.1 as f64 - viewport.height as f64 / 2.0) / scale;
        Ok(LonLat::new(
            project::x_to_lon(wx, 0.0),
            project::y_to_lat(wy, 0.0),
        ))
    }

    /// Features intersecting a coordinate. Area features match by
    /// containment; point features match within `tolerance_px` screen
    /// pixels at the current zoom. `Some(layer)` restricts the query to
    /// that registered layer; `None` queries composited layers in draw
    /// order. An empty result is normal.
    pub fn features_at(
        &self,
        coord: LonLat,
        tolerance_px: f64,
        layer_filter: Option<&str>,
    ) -> Result<Vec<FeatureRef>, KartError> {
        if self.viewport.is_none() {
            return Err(KartError::NotAttached);
        }

        let scale = 2.0f64.powf(self.view.zoom());
        let tol_world = tolerance_px / scale;
        let qx = project::lon_to_x(coord.lon, 0.0);
        let qy = project::lat_to_y(coord.lat, 0.0);
        let point = geo::Point::new(coord.lon, coord.lat);

        let mut hits = Vec::new();
        match layer_filter {
            Some(id) => {
                let layer = self
                    .layer(id)
                    .ok_or_else(|| KartError::UnknownLayer(id.to_string()))?;
                collect_hits(layer, point, qx, qy, tol_world, &mut hits);
            }
            None => {
                for layer in self.composited() {
                    collect_hits(layer, point, qx, qy, tol_world, &mut hits);
                }
            }
        }
        Ok(hits)
    }

    /// Pixel-addressed variant of [`features_at`].
    ///
    /// [`features_at`]: MapSurface::features_at
    pub fn features_at_pixel(
        &self,
        pixel: (f32, f32),
        tolerance_px: f64,
        layer_filter: Option<&str>,
    ) -> Result<Vec<FeatureRef>, KartError> {
        let coord = self.coordinate_at_pixel(pixel)?;
        self.features_at(coord, tolerance_px, layer_filter)
    }
}

fn collect_hits(
    layer: &Layer,
    point: geo::Point<f64>,
    qx: f64,
    qy: f64,
    tol_world: f64,
    hits: &mut Vec<FeatureRef>,
) {
    for (index, feature) in layer.features().iter().enumerate() {
        if feature_hit(feature, point, qx, qy, tol_world) {
            hits.push(FeatureRef {
                layer: layer.id.clone(),
                index,
            });
        }
    }
}

fn feature_hit(
    feature: &MapFeature,
    point: geo::Point<f64>,
    qx: f64,
    qy: f64,
    tol_world: f64,
) -> bool {
    match &feature.geometry {
        geo::Geometry::Point(p) => point_near(*p, qx, qy, tol_world),
        geo::Geometry::MultiPoint(mp) => mp.0.iter().any(|p| point_near(*p, qx, qy, tol_world)),
        geometry => {
            // Cheap bbox reject before the full containment test
            if let Some(rect) = geometry.bounding_rect() {
                let c = point.0;
                if c.x < rect.min().x || c.x > rect.max().x || c.y < rect.min().y || c.y > rect.max().y
                {
                    return false;
                }
            }
            geometry.contains(&point)
        }
    }
}

fn point_near(p: geo::Point<f64>, qx: f64, qy: f64, tol_world: f64) -> bool {
    let px = project::lon_to_x(p.x(), 0.0);
    let py = project::lat_to_y(p.y(), 0.0);
    (px - qx).powi(2) + (py - qy).powi(2) <= tol_world.powi(2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodata::LayerStyle;

    fn surface() -> MapSurface {
        let mut s = MapSurface::new(MapView::new(LonLat::new(10.7, 59.9), 11.0));
        s.register(Layer::basemap(BASEMAP_LAYER));
        s.register(Layer::vector(MUNICIPALITY_LAYER, LayerStyle::default()));
        s.register(Layer::vector(SCHOOL_LAYER, LayerStyle::default()));
        s
    }

    #[test]
    fn test_set_layers_rejects_unknown() {
        let mut s = surface();
        let err = s.set_layers(&[BASEMAP_LAYER, "nope"]).unwrap_err();
        assert!(matches!(err, KartError::UnknownLayer(_)));
    }

    #[test]
    fn test_set_layers_collapses_duplicates() {
        let mut s = surface();
        s.set_layers(&[BASEMAP_LAYER, SCHOOL_LAYER, SCHOOL_LAYER])
            .unwrap();
        assert_eq!(s.composited().count(), 2);
    }

    #[test]
    fn test_show_layer_is_idempotent() {
        let mut s = surface();
        s.set_layers(&[BASEMAP_LAYER]).unwrap();
        for _ in 0..5 {
            s.show_layer(SCHOOL_LAYER).unwrap();
        }
        assert_eq!(
            s.composited().filter(|l| l.id == SCHOOL_LAYER).count(),
            1
        );
        s.hide_layer(SCHOOL_LAYER);
        assert!(!s.is_shown(SCHOOL_LAYER));
    }

    #[test]
    fn test_query_before_attach_fails() {
        let s = surface();
        let err = s
            .features_at(LonLat::new(10.7, 59.9), 0.0, None)
            .unwrap_err();
        assert!(matches!(err, KartError::NotAttached));
    }

    #[test]
    fn test_pixel_center_maps_to_view_center() {
        let mut s = surface();
        s.attach(ViewportSize {
            width: 800.0,
            height: 600.0,
        });
        let coord = s.coordinate_at_pixel((400.0, 300.0)).unwrap();
        let center = s.view().center();
        assert!((coord.lon - center.lon).abs() < 1e-9);
        assert!((coord.lat - center.lat).abs() < 1e-9);
    }
}
