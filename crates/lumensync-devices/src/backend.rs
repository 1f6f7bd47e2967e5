//! The capability interface every wire protocol backend implements.

use crate::Result;
use lumensync_core::CapabilityBits;
use std::time::Duration;

/// One device found by a [`LightingBackend::discover`] scan, not yet connected.
#[derive(Debug, Clone)]
pub struct DiscoveredDevice {
    pub address: String,
    pub label: Option<String>,
}

/// Common surface every wire protocol (Hue HTTP, Kasa TCP, MagicHome TCP)
/// implements, so the scheduler can dispatch to any of them uniformly.
pub trait LightingBackend: Send {
    fn capabilities(&self) -> CapabilityBits;

    /// Network scan bounded by `timeout` (spec default 5s).
    fn discover(&self, timeout: Duration) -> Result<Vec<DiscoveredDevice>>;

    /// Establish a control connection to `address`. May involve pairing.
    fn connect(&mut self, address: &str) -> Result<()>;

    fn set_color(&mut self, r: u8, g: u8, b: u8) -> Result<()>;
    fn set_brightness(&mut self, brightness: u8) -> Result<()>;
    fn set_effect(&mut self, name: &str) -> Result<()>;
    fn power(&mut self, on: bool) -> Result<()>;
    fn set_transition(&mut self, ms: u32) -> Result<()>;

    /// Cheap liveness probe; failure does not necessarily mean the device is gone.
    fn ping(&mut self) -> Result<()>;
}
