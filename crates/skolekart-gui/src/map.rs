use crate::Message;
use geo::Centroid;
use iced::advanced::text as advanced_text;
use iced::advanced::{self, layout, renderer, widget, Layout, Widget};
use iced::widget::image;
use iced::{
    alignment, mouse, Border, Color, Element, Event, Length, Pixels, Point, Radians, Rectangle,
    Size,
};
use lru::LruCache;
use skolekart_core::geodata::{MapFeature, Rgb};
use skolekart_core::project::{lat_to_y, lon_to_x, x_to_lon, y_to_lat, MAX_LATITUDE, TILE_SIZE};
use skolekart_core::schools::Popup;
use skolekart_core::surface::{Layer, LayerKind, MapSurface};
use skolekart_core::view::LonLat;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

// --- Tile Management ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoords {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl TileCoords {
    pub fn url(&self) -> String {
        format!(
            "https://tile.openstreetmap.org/{}/{}/{}.png",
            self.z, self.x, self.y
        )
    }
}

pub struct TileManager {
    tiles: Arc<Mutex<LruCache<TileCoords, image::Handle>>>,
    pending: Arc<Mutex<std::collections::HashSet<TileCoords>>>,
}

impl TileManager {
    pub fn new() -> Self {
        Self {
            tiles: Arc::new(Mutex::new(LruCache::new(NonZeroUsize::new(300).unwrap()))),
            pending: Arc::new(Mutex::new(std::collections::HashSet::new())),
        }
    }

    pub fn get_tile(&self, coords: TileCoords) -> Option<image::Handle> {
        let mut tiles = self.tiles.lock().unwrap();
        tiles.get(&coords).cloned()
    }

    pub fn request_tile(&self, coords: TileCoords) {
        {
            let mut pending = self.pending.lock().unwrap();
            if pending.contains(&coords) {
                return;
            }
            let tiles = self.tiles.lock().unwrap();
            if tiles.contains(&coords) {
                return;
            }
            pending.insert(coords);
        }

        let tiles_arc = Arc::clone(&self.tiles);
        let pending_arc = Arc::clone(&self.pending);

        // Background fetcher; the tile shows up on the next redraw
        std::thread::spawn(move || {
            let resp = ureq::get(&coords.url())
                .set("User-Agent", "Skolekart/0.3.0")
                .timeout(std::time::Duration::from_secs(10))
                .call();

            match resp {
                Ok(response) => {
                    let mut bytes = Vec::new();
                    if std::io::Read::read_to_end(&mut response.into_reader(), &mut bytes).is_ok() {
                        let handle = image::Handle::from_bytes(bytes);
                        let mut tiles = tiles_arc.lock().unwrap();
                        tiles.put(coords, handle);
                    }
                }
                Err(e) => {
                    log::warn!("Failed to fetch tile {:?}: {}", coords, e);
                }
            }
            let mut pending = pending_arc.lock().unwrap();
            pending.remove(&coords);
        });
    }
}

// --- Map widget ---

pub struct MapCanvas<'a> {
    pub surface: &'a MapSurface,
    pub tile_manager: &'a TileManager,
    pub popup: Option<&'a Popup>,
}

#[derive(Debug, Clone, Copy)]
struct MapState {
    is_dragging: bool,
    press_position: Option<Point>,
    last_cursor: Option<Point>,
    // Track values between prop updates to handle multiple events per frame
    current_center: LonLat,
    current_zoom: f64,
    last_prop_center: Option<LonLat>,
    last_prop_zoom: Option<f64>,
    last_size: Option<Size>,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            is_dragging: false,
            press_position: None,
            last_cursor: None,
            current_center: LonLat::new(0.0, 0.0),
            current_zoom: 0.0,
            last_prop_center: None,
            last_prop_zoom: None,
            last_size: None,
        }
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::from_rgb(rgb.r, rgb.g, rgb.b)
}

impl<'a, Theme, Renderer> Widget<Message, Theme, Renderer> for MapCanvas<'a>
where
    Renderer: renderer::Renderer
        + advanced::image::Renderer<Handle = image::Handle>
        + advanced_text::Renderer,
{
    fn size(&self) -> Size<Length> {
        Size {
            width: Length::Fill,
            height: Length::Fill,
        }
    }

    fn tag(&self) -> widget::tree::Tag {
        widget::tree::Tag::of::<MapState>()
    }

    fn state(&self) -> widget::tree::State {
        widget::tree::State::new(MapState::default())
    }

    fn layout(
        &self,
        _tree: &mut widget::Tree,
        _renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        layout::Node::new(limits.max())
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        _theme: &Theme,
        _style: &renderer::Style,
        layout: Layout<'_>,
        _cursor: mouse::Cursor,
        _viewport: &Rectangle,
    ) {
        let state = tree.state.downcast_ref::<MapState>();
        let bounds = layout.bounds();

        // Prefer internal state for zero-latency feedback during interactions
        let zoom = if state.last_prop_zoom.is_some() {
            state.current_zoom
        } else {
            self.surface.view().zoom()
        };
        let center = if state.last_prop_center.is_some() {
            state.current_center
        } else {
            self.surface.view().center()
        };

        let zoom_scale = 2.0f64.powf(zoom);
        let camera_x = lon_to_x(center.lon, 0.0);
        let camera_y = lat_to_y(center.lat, 0.0);

        renderer.with_layer(bounds, |renderer| {
            renderer.fill_quad(
                renderer::Quad {
                    bounds,
                    border: Border::default(),
                    ..Default::default()
                },
                Color::from_rgb(0.05, 0.05, 0.05),
            );

            if self
                .surface
                .composited()
                .any(|l| matches!(l.kind, LayerKind::Basemap))
            {
                self.draw_tiles(renderer, bounds, camera_x, camera_y, zoom, zoom_scale);
            }
        });

        // Vector layers in composited order, popup on top
        renderer.with_layer(bounds, |renderer| {
            for layer in self.surface.composited() {
                if let LayerKind::Vector(features) = &layer.kind {
                    for feature in features {
                        draw_feature(
                            renderer, bounds, camera_x, camera_y, zoom_scale, layer, feature,
                        );
                    }
                }
            }

            if let Some(popup) = self.popup {
                draw_popup(renderer, bounds, camera_x, camera_y, zoom_scale, popup);
            }
        });
    }

    fn on_event(
        &mut self,
        tree: &mut widget::Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn advanced::Clipboard,
        shell: &mut advanced::Shell<'_, Message>,
        _viewport: &Rectangle,
    ) -> advanced::graphics::core::event::Status {
        let state = tree.state.downcast_mut::<MapState>();
        let bounds = layout.bounds();
        let center_prop = self.surface.view().center();
        let zoom_prop = self.surface.view().zoom();

        // Sync internal state from props when they changed externally
        if state.last_prop_center != Some(center_prop) || state.last_prop_zoom != Some(zoom_prop) {
            state.current_center = center_prop;
            state.current_zoom = zoom_prop;
            state.last_prop_center = Some(center_prop);
            state.last_prop_zoom = Some(zoom_prop);
        }

        // Keep the headless surface in step with the real widget size
        if state.last_size != Some(bounds.size()) {
            state.last_size = Some(bounds.size());
            shell.publish(Message::CanvasResized(bounds.width, bounds.height));
        }

        let current_zoom = state.current_zoom;
        let center = state.current_center;

        let camera_x = lon_to_x(center.lon, 0.0);
        let camera_y = lat_to_y(center.lat, 0.0);
        let scale = 2.0f64.powf(current_zoom);

        let cursor_point = cursor.position_in(bounds);
        let mouse_z0 = cursor_point.map(|p| {
            let rx = (p.x as f64) - (bounds.width as f64 / 2.0);
            let ry = (p.y as f64) - (bounds.height as f64 / 2.0);
            (camera_x + rx / scale, camera_y + ry / scale)
        });

        let coords = mouse_z0.and_then(|(wx, wy)| {
            let lon = x_to_lon(wx, 0.0);
            let lat = y_to_lat(wy, 0.0);

            if (-180.0..=180.0).contains(&lon) && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&lat) {
                Some(LonLat::new(lon, lat))
            } else {
                None
            }
        });

        match event {
            Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                if let Some(p) = cursor_point {
                    let d = match delta {
                        mouse::ScrollDelta::Lines { y, .. } => y as f64,
                        mouse::ScrollDelta::Pixels { y, .. } => (y as f64) / 100.0,
                    };
                    let min_zoom = (bounds.width as f64 / TILE_SIZE).log2();
                    let new_zoom = (current_zoom + d * 0.2).clamp(min_zoom, 19.0);

                    if (new_zoom - current_zoom).abs() > 0.001 {
                        let new_scale = 2.0f64.powf(new_zoom);

                        // Zoom around the cursor
                        let mx = (p.x as f64) - (bounds.width as f64 / 2.0);
                        let my = (p.y as f64) - (bounds.height as f64 / 2.0);

                        let new_camera_x = camera_x + mx / scale - mx / new_scale;
                        let new_camera_y = camera_y + my / scale - my / new_scale;

                        let new_half_w = (bounds.width as f64 / 2.0) / new_scale;
                        let new_camera_x = new_camera_x.clamp(new_half_w, TILE_SIZE - new_half_w);
                        let new_camera_y = new_camera_y.clamp(0.0, TILE_SIZE);

                        let new_center =
                            LonLat::new(x_to_lon(new_camera_x, 0.0), y_to_lat(new_camera_y, 0.0));

                        state.current_center = new_center;
                        state.current_zoom = new_zoom;

                        shell.publish(Message::ViewChanged {
                            center: new_center,
                            zoom: new_zoom,
                        });
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if cursor.is_over(bounds) {
                    if let Some(position) = cursor.position() {
                        state.is_dragging = true;
                        state.press_position = Some(position);
                        state.last_cursor = Some(position);
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }
            }
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                let was_dragging = state.is_dragging;
                let press_pos = state.press_position;
                let release_pos = cursor.position();

                state.is_dragging = false;
                state.press_position = None;
                state.last_cursor = None;

                if was_dragging {
                    // A release with minimal travel is a click, not a pan
                    if let (Some(p1), Some(p2)) = (press_pos, release_pos) {
                        let dist = (p1.x - p2.x).hypot(p1.y - p2.y);
                        if dist < 5.0 {
                            if let Some(coords) = coords {
                                shell.publish(Message::MapClicked(coords));
                            }
                        }
                    }
                    return advanced::graphics::core::event::Status::Captured;
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) => {
                if state.is_dragging {
                    if let Some(last_pos) = state.last_cursor {
                        let delta = position - last_pos;
                        state.last_cursor = Some(position);

                        let dx = delta.x as f64 / scale;
                        let dy = delta.y as f64 / scale;

                        let new_wx = camera_x - dx;
                        let new_wy = camera_y - dy;

                        let half_vw = (bounds.width as f64 / 2.0) / scale;
                        let half_vh = (bounds.height as f64 / 2.0) / scale;

                        let clamped_wx = if half_vw * 2.0 >= TILE_SIZE {
                            TILE_SIZE / 2.0
                        } else {
                            new_wx.clamp(half_vw, TILE_SIZE - half_vw)
                        };
                        let clamped_wy = if half_vh * 2.0 >= TILE_SIZE {
                            TILE_SIZE / 2.0
                        } else {
                            new_wy.clamp(half_vh, TILE_SIZE - half_vh)
                        };

                        let new_center =
                            LonLat::new(x_to_lon(clamped_wx, 0.0), y_to_lat(clamped_wy, 0.0));

                        state.current_center = new_center;

                        shell.publish(Message::ViewChanged {
                            center: new_center,
                            zoom: current_zoom,
                        });
                        return advanced::graphics::core::event::Status::Captured;
                    }
                }

                if let Some(coords) = coords {
                    shell.publish(Message::PointerMoved(coords));
                    return advanced::graphics::core::event::Status::Captured;
                }
            }
            _ => {}
        }

        advanced::graphics::core::event::Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Pointer
        } else {
            mouse::Interaction::default()
        }
    }
}

impl<'a> MapCanvas<'a> {
    fn draw_tiles<Renderer>(
        &self,
        renderer: &mut Renderer,
        bounds: Rectangle,
        camera_x: f64,
        camera_y: f64,
        zoom: f64,
        zoom_scale: f64,
    ) where
        Renderer: renderer::Renderer + advanced::image::Renderer<Handle = image::Handle>,
    {
        let z = zoom.floor().clamp(0.0, 19.0) as u32;
        let num_tiles = 2u32.pow(z);
        let tile_size_z0 = TILE_SIZE / 2.0f64.powf(z as f64);

        let half_w = (bounds.width as f64 / 2.0) / zoom_scale;
        let half_h = (bounds.height as f64 / 2.0) / zoom_scale;

        let min_tx = ((camera_x - half_w) / tile_size_z0).floor() as i32;
        let max_tx = ((camera_x + half_w) / tile_size_z0).ceil() as i32;
        let min_ty = ((camera_y - half_h) / tile_size_z0).floor() as i32;
        let max_ty = ((camera_y + half_h) / tile_size_z0).ceil() as i32;

        for tx in min_tx..=max_tx {
            if tx < 0 || tx >= num_tiles as i32 {
                continue;
            }
            for ty in min_ty..=max_ty {
                if ty < 0 || ty >= num_tiles as i32 {
                    continue;
                }

                let coords = TileCoords {
                    x: tx as u32,
                    y: ty as u32,
                    z,
                };
                let tile_world_x = tx as f64 * tile_size_z0;
                let tile_world_y = ty as f64 * tile_size_z0;

                let screen_x = bounds.x
                    + (bounds.width / 2.0)
                    + ((tile_world_x - camera_x) * zoom_scale) as f32;
                let screen_y = bounds.y
                    + (bounds.height / 2.0)
                    + ((tile_world_y - camera_y) * zoom_scale) as f32;
                let current_tile_size = (tile_size_z0 * zoom_scale) as f32;

                let tile_rect = Rectangle {
                    x: screen_x,
                    y: screen_y,
                    width: current_tile_size,
                    height: current_tile_size,
                };

                if let Some(handle) = self.tile_manager.get_tile(coords) {
                    renderer.draw_image(
                        advanced::image::Image {
                            handle,
                            filter_method: image::FilterMethod::Linear,
                            rotation: Radians(0.0),
                            opacity: 1.0,
                            snap: false,
                        },
                        tile_rect,
                    );
                } else {
                    renderer.fill_quad(
                        renderer::Quad {
                            bounds: tile_rect,
                            ..Default::default()
                        },
                        Color::from_rgb(0.1, 0.1, 0.1),
                    );
                    self.tile_manager.request_tile(coords);
                }
            }
        }
    }
}

fn to_screen(bounds: Rectangle, camera_x: f64, camera_y: f64, zoom_scale: f64, p: LonLat) -> Point {
    let wx = lon_to_x(p.lon, 0.0);
    let wy = lat_to_y(p.lat, 0.0);
    Point::new(
        bounds.x + (bounds.width / 2.0) + ((wx - camera_x) * zoom_scale) as f32,
        bounds.y + (bounds.height / 2.0) + ((wy - camera_y) * zoom_scale) as f32,
    )
}

fn draw_feature<Renderer>(
    renderer: &mut Renderer,
    bounds: Rectangle,
    camera_x: f64,
    camera_y: f64,
    zoom_scale: f64,
    layer: &Layer,
    feature: &MapFeature,
) where
    Renderer: renderer::Renderer + advanced_text::Renderer,
{
    let stroke_color = feature
        .style
        .as_ref()
        .and_then(|s| s.stroke)
        .map(to_color)
        .unwrap_or_else(|| to_color(layer.style.stroke));
    let stroke_width = feature
        .style
        .as_ref()
        .map(|s| s.stroke_width)
        .unwrap_or(layer.style.stroke_width);

    match &feature.geometry {
        geo::Geometry::Point(p) => {
            draw_dot(renderer, bounds, camera_x, camera_y, zoom_scale, *p, layer)
        }
        geo::Geometry::MultiPoint(mp) => {
            for p in &mp.0 {
                draw_dot(renderer, bounds, camera_x, camera_y, zoom_scale, *p, layer);
            }
        }
        geo::Geometry::Polygon(poly) => draw_polygon(
            renderer,
            bounds,
            camera_x,
            camera_y,
            zoom_scale,
            poly,
            stroke_color,
            stroke_width,
        ),
        geo::Geometry::MultiPolygon(mp) => {
            for poly in &mp.0 {
                draw_polygon(
                    renderer,
                    bounds,
                    camera_x,
                    camera_y,
                    zoom_scale,
                    poly,
                    stroke_color,
                    stroke_width,
                );
            }
        }
        geo::Geometry::LineString(line) => draw_ring(
            renderer,
            bounds,
            camera_x,
            camera_y,
            zoom_scale,
            line,
            stroke_color,
            stroke_width,
        ),
        _ => {}
    }

    // Name label for focused features: light fill over a dark halo
    if let Some(label) = feature.style.as_ref().and_then(|s| s.label.as_deref()) {
        if let Some(centroid) = feature.geometry.centroid() {
            let at = to_screen(
                bounds,
                camera_x,
                camera_y,
                zoom_scale,
                LonLat::new(centroid.x(), centroid.y()),
            );
            if bounds.contains(at) {
                fill_label(renderer, label, at, 14.0, Color::WHITE, Some(Color::BLACK), bounds);
            }
        }
    }
}

fn draw_dot<Renderer>(
    renderer: &mut Renderer,
    bounds: Rectangle,
    camera_x: f64,
    camera_y: f64,
    zoom_scale: f64,
    p: geo::Point<f64>,
    layer: &Layer,
) where
    Renderer: renderer::Renderer,
{
    let at = to_screen(
        bounds,
        camera_x,
        camera_y,
        zoom_scale,
        LonLat::new(p.x(), p.y()),
    );
    if !bounds.contains(at) {
        return;
    }
    let r = layer.style.point_radius;
    renderer.fill_quad(
        renderer::Quad {
            bounds: Rectangle {
                x: at.x - r,
                y: at.y - r,
                width: r * 2.0,
                height: r * 2.0,
            },
            border: Border {
                color: Color::BLACK,
                width: 1.0,
                radius: r.into(),
            },
            ..Default::default()
        },
        to_color(layer.style.point_fill),
    );
}

fn draw_polygon<Renderer>(
    renderer: &mut Renderer,
    bounds: Rectangle,
    camera_x: f64,
    camera_y: f64,
    zoom_scale: f64,
    poly: &geo::Polygon<f64>,
    color: Color,
    width: f32,
) where
    Renderer: renderer::Renderer,
{
    draw_ring(
        renderer, bounds, camera_x, camera_y, zoom_scale, poly.exterior(), color, width,
    );
    for interior in poly.interiors() {
        draw_ring(
            renderer, bounds, camera_x, camera_y, zoom_scale, interior, color, width,
        );
    }
}

fn draw_ring<Renderer>(
    renderer: &mut Renderer,
    bounds: Rectangle,
    camera_x: f64,
    camera_y: f64,
    zoom_scale: f64,
    ring: &geo::LineString<f64>,
    color: Color,
    width: f32,
) where
    Renderer: renderer::Renderer,
{
    let margin = 50.0;
    let visible = Rectangle {
        x: bounds.x - margin,
        y: bounds.y - margin,
        width: bounds.width + margin * 2.0,
        height: bounds.height + margin * 2.0,
    };

    let points: Vec<Point> = ring
        .coords()
        .map(|c| to_screen(bounds, camera_x, camera_y, zoom_scale, LonLat::new(c.x, c.y)))
        .collect();

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if !visible.contains(a) && !visible.contains(b) {
            continue;
        }
        draw_segment(renderer, a, b, color, width);
    }
}

/// Strokes a segment with small interpolated quads.
fn draw_segment<Renderer>(renderer: &mut Renderer, a: Point, b: Point, color: Color, width: f32)
where
    Renderer: renderer::Renderer,
{
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let distance = (dx * dx + dy * dy).sqrt();
    let steps = (distance / (width * 0.75).max(1.0)).ceil().max(1.0) as usize;
    let half = width / 2.0;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let px = a.x + dx * t;
        let py = a.y + dy * t;
        renderer.fill_quad(
            renderer::Quad {
                bounds: Rectangle {
                    x: px - half,
                    y: py - half,
                    width,
                    height: width,
                },
                ..Default::default()
            },
            color,
        );
    }
}

fn draw_popup<Renderer>(
    renderer: &mut Renderer,
    bounds: Rectangle,
    camera_x: f64,
    camera_y: f64,
    zoom_scale: f64,
    popup: &Popup,
) where
    Renderer: renderer::Renderer + advanced_text::Renderer,
{
    let anchor = to_screen(bounds, camera_x, camera_y, zoom_scale, popup.coordinate);
    if !bounds.contains(anchor) {
        return;
    }

    let label = format!("Clicked schools: {}", popup.content());
    let width = (label.chars().count() as f32 * 7.0 + 20.0).max(120.0);
    let height = 26.0;

    // Bottom-center anchored at the click coordinate
    let rect = Rectangle {
        x: anchor.x - width / 2.0,
        y: anchor.y - height - 6.0,
        width,
        height,
    };

    renderer.fill_quad(
        renderer::Quad {
            bounds: rect,
            border: Border {
                color: crate::style::palette::BORDER,
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        },
        crate::style::palette::SURFACE,
    );
    // Stem pointing at the anchor
    renderer.fill_quad(
        renderer::Quad {
            bounds: Rectangle {
                x: anchor.x - 3.0,
                y: anchor.y - 6.0,
                width: 6.0,
                height: 6.0,
            },
            ..Default::default()
        },
        crate::style::palette::SURFACE,
    );

    fill_label(
        renderer,
        &label,
        Point::new(rect.x + rect.width / 2.0, rect.y + rect.height / 2.0),
        13.0,
        crate::style::palette::TEXT_PRIMARY,
        None,
        bounds,
    );
}

fn fill_label<Renderer>(
    renderer: &mut Renderer,
    content: &str,
    at: Point,
    size: f32,
    color: Color,
    halo: Option<Color>,
    clip: Rectangle,
) where
    Renderer: advanced_text::Renderer,
{
    let make = |renderer: &Renderer| advanced_text::Text {
        content: content.to_string(),
        bounds: Size::new(400.0, 40.0),
        size: Pixels(size),
        line_height: advanced_text::LineHeight::default(),
        font: renderer.default_font(),
        horizontal_alignment: alignment::Horizontal::Center,
        vertical_alignment: alignment::Vertical::Center,
        shaping: advanced_text::Shaping::Advanced,
        wrapping: advanced_text::Wrapping::default(),
    };

    if let Some(halo) = halo {
        for (dx, dy) in [(-1.0, 0.0), (1.0, 0.0), (0.0, -1.0), (0.0, 1.0)] {
            let text = make(renderer);
            renderer.fill_text(text, Point::new(at.x + dx, at.y + dy), halo, clip);
        }
    }
    let text = make(renderer);
    renderer.fill_text(text, at, color, clip);
}

impl<'a, Theme, Renderer> From<MapCanvas<'a>> for Element<'a, Message, Theme, Renderer>
where
    Theme: 'a,
    Renderer: 'a
        + renderer::Renderer
        + advanced::image::Renderer<Handle = image::Handle>
        + advanced_text::Renderer,
{
    fn from(canvas: MapCanvas<'a>) -> Self {
        Self::new(canvas)
    }
}
