use crate::surface::MapSurface;
use crate::view::LonLat;
use crate::KartError;

/// Screen-pixel radius for hitting point features with a click.
pub const CLICK_TOLERANCE_PX: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Popup contents: the click coordinate and the matched display names.
/// Replaced wholesale on each qualifying click and kept until the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub coordinate: LonLat,
    pub names: Vec<String>,
}

impl Popup {
    pub fn content(&self) -> String {
        self.names.join(", ")
    }
}

/// Toggle + click-to-inspect for an auxiliary point layer.
///
/// `Visible` means the layer is in the composited list; `Hidden` removes
/// it and turns clicks into no-ops. Either way the popup keeps whatever
/// it showed last.
pub struct SchoolLayerController {
    layer: String,
    visibility: Visibility,
    popup: Option<Popup>,
    click_tolerance_px: f64,
}

impl SchoolLayerController {
    pub fn new(layer: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            visibility: Visibility::Hidden,
            popup: None,
            click_tolerance_px: CLICK_TOLERANCE_PX,
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    pub fn set_visible(
        &mut self,
        surface: &mut MapSurface,
        visible: bool,
    ) -> Result<(), KartError> {
        if visible {
            surface.show_layer(&self.layer)?;
            self.visibility = Visibility::Visible;
        } else {
            surface.hide_layer(&self.layer);
            self.visibility = Visibility::Hidden;
        }
        Ok(())
    }

    pub fn toggle(&mut self, surface: &mut MapSurface) -> Result<Visibility, KartError> {
        self.set_visible(surface, !self.is_visible())?;
        Ok(self.visibility)
    }

    /// Click handling. Only effective while `Visible`: queries every
    /// composited layer at the coordinate and replaces the popup state.
    /// Zero hits produce an empty content string, not an error.
    pub fn map_clicked(
        &mut self,
        surface: &MapSurface,
        coordinate: LonLat,
    ) -> Result<(), KartError> {
        if !self.is_visible() {
            return Ok(());
        }

        let hits = surface.features_at(coordinate, self.click_tolerance_px, None)?;
        let names = hits
            .iter()
            .map(|r| {
                surface
                    .feature(r)
                    .and_then(|f| f.display_name())
                    .unwrap_or_default()
                    .to_string()
            })
            .collect();

        self.popup = Some(Popup { coordinate, names });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_content_joins_names() {
        let popup = Popup {
            coordinate: LonLat::new(10.7, 59.9),
            names: vec!["Marienlyst skole".into(), "Majorstuen skole".into()],
        };
        assert_eq!(popup.content(), "Marienlyst skole, Majorstuen skole");
    }

    #[test]
    fn test_empty_popup_content_is_empty_string() {
        let popup = Popup {
            coordinate: LonLat::new(10.7, 59.9),
            names: Vec::new(),
        };
        assert_eq!(popup.content(), "");
    }
}
