//! Map view model and Web Mercator tile helpers.

use std::f64::consts::PI;

use crate::error::ConfigError;
use crate::form::FormState;
use crate::types::Position;

pub const DEFAULT_ZOOM: u8 = 15;

/// Mapbox `light-v10` raster tiles, 256px at 2x.
pub const TILE_URL_TEMPLATE: &str =
    "https://api.mapbox.com/styles/v1/mapbox/light-v10/tiles/256/{z}/{x}/{y}@2x?access_token={token}";

// Web Mercator is undefined at the poles.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// Tile containing `position` at `zoom`.
    pub fn containing(position: Position, zoom: u8) -> Self {
        let zoom = zoom.min(30);
        let n = f64::from(1u32 << zoom);
        let lat = position.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
        let lon = position.longitude.clamp(-180.0, 180.0);

        let x = ((lon + 180.0) / 360.0 * n).floor();
        let y = ((1.0 - lat.tan().asinh() / PI) / 2.0 * n).floor();
        let max = n - 1.0;
        Self {
            z: zoom,
            x: x.clamp(0.0, max) as u32,
            y: y.clamp(0.0, max) as u32,
        }
    }

    pub fn url(&self, token: &str) -> String {
        TILE_URL_TEMPLATE
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
            .replace("{token}", token)
    }
}

/// What the position picker renders: a centre, a zoom, and a marker only
/// once a position was picked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Option<Position>,
    pub zoom: u8,
    pub marker: Option<Position>,
}

impl MapView {
    pub fn from_form(form: &FormState, zoom: u8) -> Self {
        Self {
            center: form.initial_position(),
            zoom,
            marker: form.position(),
        }
    }

    pub fn center_tile(&self) -> Option<TileCoord> {
        self.center.map(|c| TileCoord::containing(c, self.zoom))
    }

    /// URL of the centre tile. Needs an access token.
    pub fn center_tile_url(&self, token: Option<&str>) -> Result<Option<String>, ConfigError> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(ConfigError::MissingMapboxToken)?;
        Ok(self.center_tile().map(|tile| tile.url(token)))
    }
}
