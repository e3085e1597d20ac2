use iced::widget::{button, checkbox, column, container, row, text};
use iced::{Element, Length, Subscription, Task, Theme};
use log::{error, warn};
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};
use skolekart_core::config::MapConfig;
use skolekart_core::geodata::{self, LayerStyle, MapFeature, Rgb};
use skolekart_core::highlight::HighlightController;
use skolekart_core::locate::{self, GeolocationProvider, IpGeolocator};
use skolekart_core::schools::SchoolLayerController;
use skolekart_core::surface::{
    Layer, MapSurface, ViewportSize, BASEMAP_LAYER, COUNTY_LAYER, MUNICIPALITY_LAYER,
    SCHOOL_LAYER, UPPER_SECONDARY_LAYER,
};
use skolekart_core::view::{LonLat, MapView};
use std::time::Duration;

mod map;
mod style;
use map::{MapCanvas, TileManager};

/// Animation frame step.
const TICK: Duration = Duration::from_millis(16);

fn main() -> iced::Result {
    let _ = TermLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );

    iced::application("Skolekart", App::update, App::view)
        .theme(|_| Theme::Dark)
        .subscription(App::subscription)
        .run_with(App::new)
}

#[derive(Debug, Clone)]
enum Message {
    DatasetLoaded(&'static str, Result<Vec<MapFeature>, String>),
    PointerMoved(LonLat),
    MapClicked(LonLat),
    ViewChanged { center: LonLat, zoom: f64 },
    CanvasResized(f32, f32),
    SchoolsToggled(bool),
    Locate,
    Located(Result<LonLat, String>),
    Tick,
}

struct App {
    surface: MapSurface,
    highlight: HighlightController,
    schools: SchoolLayerController,
    locator: IpGeolocator,
    tile_manager: TileManager,
    status: String,
}

impl App {
    fn new() -> (Self, Task<Message>) {
        let config = MapConfig::load_or_default();

        let mut surface = MapSurface::new(MapView::new(config.center, config.zoom));
        surface.register(Layer::basemap(BASEMAP_LAYER));
        surface.register(Layer::vector(
            MUNICIPALITY_LAYER,
            LayerStyle {
                stroke: Rgb::new(0.86, 0.18, 0.18),
                stroke_width: 2.0,
                ..Default::default()
            },
        ));
        surface.register(Layer::vector(
            COUNTY_LAYER,
            LayerStyle {
                stroke: Rgb::new(0.23, 0.51, 0.96),
                stroke_width: 4.0,
                ..Default::default()
            },
        ));
        surface.register(Layer::vector(
            UPPER_SECONDARY_LAYER,
            LayerStyle {
                point_fill: Rgb::new(0.66, 0.33, 0.97),
                point_radius: 4.0,
                ..Default::default()
            },
        ));
        surface.register(Layer::vector(
            SCHOOL_LAYER,
            LayerStyle {
                point_fill: Rgb::new(0.2, 0.7, 0.3),
                point_radius: 4.0,
                ..Default::default()
            },
        ));

        let mut composition = vec![BASEMAP_LAYER, MUNICIPALITY_LAYER];
        if config.include_counties {
            composition.push(COUNTY_LAYER);
        }
        composition.push(UPPER_SECONDARY_LAYER);
        surface
            .set_layers(&composition)
            .expect("initial layers are registered");
        surface.attach(ViewportSize {
            width: 1024.0,
            height: 768.0,
        });

        let mut schools = SchoolLayerController::new(SCHOOL_LAYER);
        if config.schools_visible {
            schools
                .set_visible(&mut surface, true)
                .expect("school layer is registered");
        }

        let datasets = [
            (
                MUNICIPALITY_LAYER,
                config.source_for(&config.municipalities),
            ),
            (COUNTY_LAYER, config.source_for(&config.counties)),
            (
                UPPER_SECONDARY_LAYER,
                config.source_for(&config.upper_secondary),
            ),
            (SCHOOL_LAYER, config.source_for(&config.schools)),
        ];
        let tasks = Task::batch(datasets.map(|(id, source)| {
            Task::perform(
                async move { geodata::load_features(id, &source).map_err(|e| e.to_string()) },
                move |result| Message::DatasetLoaded(id, result),
            )
        }));

        let app = Self {
            surface,
            highlight: HighlightController::new(MUNICIPALITY_LAYER),
            schools,
            locator: IpGeolocator::default(),
            tile_manager: TileManager::new(),
            status: "Loading datasets...".to_string(),
        };
        (app, tasks)
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::DatasetLoaded(id, result) => {
                match result {
                    Ok(features) => {
                        let count = features.len();
                        if let Err(e) = self.surface.set_features(id, features) {
                            error!("Could not store dataset '{id}': {e}");
                        } else {
                            self.status = format!("{id}: {count} features");
                        }
                    }
                    Err(e) => {
                        // The layer simply stays empty
                        warn!("Dataset '{id}' failed to load: {e}");
                        self.status = format!("{id}: failed to load");
                    }
                }
                Task::none()
            }
            Message::PointerMoved(coordinate) => {
                if let Err(e) = self.highlight.pointer_moved(&mut self.surface, coordinate) {
                    error!("Hover query failed: {e}");
                }
                Task::none()
            }
            Message::MapClicked(coordinate) => {
                if let Err(e) = self.schools.map_clicked(&self.surface, coordinate) {
                    error!("Click query failed: {e}");
                }
                Task::none()
            }
            Message::ViewChanged { center, zoom } => {
                self.surface.view_mut().set_center(center);
                self.surface.view_mut().set_zoom(zoom);
                Task::none()
            }
            Message::CanvasResized(width, height) => {
                self.surface.resize(ViewportSize { width, height });
                Task::none()
            }
            Message::SchoolsToggled(checked) => {
                if let Err(e) = self.schools.set_visible(&mut self.surface, checked) {
                    error!("Could not toggle school layer: {e}");
                }
                Task::none()
            }
            Message::Locate => {
                self.status = "Looking up your position...".to_string();
                let locator = self.locator.clone();
                Task::perform(
                    async move { locator.current_position().map_err(|e| e.to_string()) },
                    Message::Located,
                )
            }
            Message::Located(Ok(position)) => {
                locate::recenter(self.surface.view_mut(), position);
                self.status = format!("Centered on ({:.4}, {:.4})", position.lon, position.lat);
                Task::none()
            }
            Message::Located(Err(message)) => {
                warn!("Geolocation failed: {message}");
                self.status = "Geolocation failed".to_string();
                let _ = rfd::MessageDialog::new()
                    .set_level(rfd::MessageLevel::Error)
                    .set_title("Geolocation")
                    .set_description(&message)
                    .set_buttons(rfd::MessageButtons::Ok)
                    .show();
                Task::none()
            }
            Message::Tick => {
                self.surface.view_mut().advance(TICK);
                Task::none()
            }
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        if self.surface.view().is_animating() {
            iced::time::every(TICK).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let toolbar = row![
            checkbox("Show schools on map", self.schools.is_visible())
                .on_toggle(Message::SchoolsToggled),
            button(text("Center on me").size(14))
                .on_press(Message::Locate)
                .padding([6, 12])
                .style(style::button_primary),
            text(&self.status)
                .size(14)
                .color(style::palette::TEXT_SECONDARY),
        ]
        .spacing(12)
        .align_y(iced::Alignment::Center);

        let canvas: Element<'_, Message> = MapCanvas {
            surface: &self.surface,
            tile_manager: &self.tile_manager,
            popup: self.schools.popup(),
        }
        .into();

        column![
            container(toolbar)
                .width(Length::Fill)
                .padding(10)
                .style(style::container_toolbar),
            container(canvas).width(Length::Fill).height(Length::Fill),
        ]
        .into()
    }
}
