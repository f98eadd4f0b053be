//! `happy map`: map centre and tile for a location.

use anyhow::{Context, Result};
use clap::Args;

use happy_core::{ConfigError, MapView, Position};

/// Arguments for `happy map`.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Latitude of the centre (defaults to the configured location).
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the centre.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Zoom level (defaults to `map_zoom` from config).
    #[arg(long)]
    pub zoom: Option<u8>,
}

impl MapArgs {
    pub fn run(self) -> Result<()> {
        let config = super::settings(None)?;
        let center = match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(Position::new(lat, lng)),
            _ => config.default_location,
        };
        let view = MapView {
            center,
            zoom: self.zoom.unwrap_or(config.map_zoom),
            marker: None,
        };

        let (Some(center), Some(tile)) = (view.center, view.center_tile()) else {
            println!("No map centre known.");
            println!("Run: happy config set-location --lat <lat> --lng <lng>");
            return Ok(());
        };

        println!("centre: {center}");
        println!("zoom:   {}", view.zoom);
        println!("tile:   {}/{}/{}", tile.z, tile.x, tile.y);
        match view.center_tile_url(config.mapbox_token.as_deref()) {
            Ok(Some(url)) => println!("url:    {url}"),
            Ok(None) => {}
            Err(ConfigError::MissingMapboxToken) => {
                println!("url:    (set MAPBOX_TOKEN or run `happy config set-token`)")
            }
            Err(err) => return Err(err).context("cannot build tile URL"),
        }
        Ok(())
    }
}
