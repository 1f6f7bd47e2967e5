//! Wire-protocol drivers for the three lighting device families the
//! pipeline speaks to directly: Hue over HTTP, Kasa and MagicHome over raw
//! TCP/UDP. Everything above this crate talks to a device only through
//! [`LightingBackend`].

mod backend;
mod color;
mod error;
mod hue;
mod kasa;
mod magichome;

pub use backend::{DiscoveredDevice, LightingBackend};
pub use error::{Error, Result};
pub use hue::HueHttp;
pub use kasa::KasaTcp;
pub use magichome::MagicHomeTcp;
