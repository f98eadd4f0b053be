//! Sources for the device's current position.

use std::future::Future;

use happy_core::Position;

/// Supplies the current position once.
///
/// `None` means the reading was denied or is unavailable. A provider may also
/// never resolve; the session copes with both.
pub trait GeolocationProvider: Send + Sync {
    fn current_position(&self) -> impl Future<Output = Option<Position>> + Send;
}

/// Always reports the same position (configured device location).
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Position);

impl GeolocationProvider for FixedLocation {
    async fn current_position(&self) -> Option<Position> {
        Some(self.0)
    }
}

/// No location source on this device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

impl GeolocationProvider for Unavailable {
    async fn current_position(&self) -> Option<Position> {
        None
    }
}
