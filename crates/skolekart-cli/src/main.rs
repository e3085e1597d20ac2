use anyhow::Result;
use clap::{Parser, Subcommand};
use skolekart_core::config::MapConfig;
use skolekart_core::geodata;
use skolekart_core::schools::SchoolLayerController;
use skolekart_core::surface::{
    Layer, MapSurface, ViewportSize, COUNTY_LAYER, MUNICIPALITY_LAYER, SCHOOL_LAYER,
    UPPER_SECONDARY_LAYER,
};
use skolekart_core::view::{LonLat, MapView};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the GeoJSON datasets
    #[arg(short, long, env = "SKOLEKART_DATA")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the GeoJSON datasets in the data directory
    Datasets,
    /// List feature names in one dataset file
    Features { dataset: String },
    /// Find the municipality covering a coordinate
    Locate { lon: f64, lat: f64 },
    /// Names at a coordinate across all layers, like a map click
    Inspect {
        lon: f64,
        lat: f64,
        /// Zoom level the pixel hit radius is evaluated at
        #[arg(long, default_value_t = 11.0)]
        zoom: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = MapConfig::load_or_default();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match &cli.command {
        Commands::Datasets => {
            println!("Datasets in {:?}", config.data_dir);
            for path in geodata::discover_datasets(&config.data_dir) {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                match geodata::load_features(&name, &geodata::DatasetSource::Path(path.clone())) {
                    Ok(features) => println!("{:>6}  {}", features.len(), name),
                    Err(e) => println!("     ?  {} ({})", name, e),
                }
            }
        }
        Commands::Features { dataset } => {
            let source = config.source_for(dataset);
            let features = geodata::load_features(dataset, &source)?;
            for feature in &features {
                println!("{}", feature.display_name().unwrap_or("(unnamed)"));
            }
            println!("{} features", features.len());
        }
        Commands::Locate { lon, lat } => {
            let coordinate = LonLat::new(*lon, *lat);
            let mut surface = MapSurface::new(MapView::new(coordinate, config.zoom));
            surface.register(Layer::vector(
                MUNICIPALITY_LAYER,
                Default::default(),
            ));
            surface.set_features(
                MUNICIPALITY_LAYER,
                geodata::load_features(
                    MUNICIPALITY_LAYER,
                    &config.source_for(&config.municipalities),
                )?,
            )?;
            surface.set_layers(&[MUNICIPALITY_LAYER])?;
            surface.attach(ViewportSize {
                width: 1024.0,
                height: 768.0,
            });

            let hits = surface.features_at(coordinate, 0.0, Some(MUNICIPALITY_LAYER))?;
            if hits.is_empty() {
                println!("No municipality covers ({lon}, {lat})");
            }
            for r in &hits {
                if let Some(name) = surface.feature(r).and_then(|f| f.display_name()) {
                    println!("{name}");
                }
            }
        }
        Commands::Inspect { lon, lat, zoom } => {
            let coordinate = LonLat::new(*lon, *lat);
            let mut surface = build_full_surface(&config, coordinate, *zoom)?;
            let mut schools = SchoolLayerController::new(SCHOOL_LAYER);
            schools.set_visible(&mut surface, true)?;
            schools.map_clicked(&surface, coordinate)?;

            let popup = schools.popup().expect("click handled while visible");
            if popup.names.is_empty() {
                println!("Nothing at ({lon}, {lat})");
            } else {
                println!("{}", popup.content());
            }
        }
    }

    Ok(())
}

/// Full layer composition the viewer starts with, minus the basemap.
fn build_full_surface(config: &MapConfig, center: LonLat, zoom: f64) -> Result<MapSurface> {
    let mut surface = MapSurface::new(MapView::new(center, zoom));

    let datasets = [
        (MUNICIPALITY_LAYER, &config.municipalities),
        (COUNTY_LAYER, &config.counties),
        (UPPER_SECONDARY_LAYER, &config.upper_secondary),
        (SCHOOL_LAYER, &config.schools),
    ];
    for (id, entry) in datasets {
        surface.register(Layer::vector(id, Default::default()));
        let features = geodata::load_features(id, &config.source_for(entry))?;
        surface.set_features(id, features)?;
    }

    let mut composition = vec![MUNICIPALITY_LAYER];
    if config.include_counties {
        composition.push(COUNTY_LAYER);
    }
    composition.push(UPPER_SECONDARY_LAYER);
    surface.set_layers(&composition)?;
    surface.attach(ViewportSize {
        width: 1024.0,
        height: 768.0,
    });
    Ok(surface)
}
