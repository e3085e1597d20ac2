use crate::geodata::FeatureStyle;
use crate::surface::{FeatureRef, MapSurface};
use crate::view::LonLat;
use crate::KartError;

/// Pointer-hover focus over a single boundary layer.
///
/// On every pointer move the previous focus set is cleared, the layer is
/// queried at the new coordinate and the hits get the focused style.
/// Purely presentation state; the same feature appearing in consecutive
/// events re-receives an identical style, so there is nothing to flicker.
pub struct HighlightController {
    layer: String,
    active: Vec<FeatureRef>,
}

impl HighlightController {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            active: Vec::new(),
        }
    }

    /// The features currently styled as focused.
    pub fn active(&self) -> &[FeatureRef] {
        &self.active
    }

    pub fn pointer_moved(
        &mut self,
        surface: &mut MapSurface,
        coord: LonLat,
    ) -> Result<(), KartError> {
        for r in &self.active {
            surface.set_feature_style(r, None);
        }

        let hits = surface.features_at(coord, 0.0, Some(&self.layer))?;
        for r in &hits {
            let label = surface
                .feature(r)
                .and_then(|f| f.display_name())
                .map(str::to_string);
            surface.set_feature_style(r, Some(FeatureStyle::focused(label)));
        }

        self.active = hits;
        Ok(())
    }

    /// Drops all focus styling, e.g. when the pointer leaves the surface.
    pub fn clear(&mut self, surface: &mut MapSurface) {
        for r in self.active.drain(..) {
            surface.set_feature_style(&r, None);
        }
    }
}
