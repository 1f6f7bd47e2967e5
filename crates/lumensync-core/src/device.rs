//! Physical lighting endpoints and their connection lifecycle.

use std::fmt;
use std::time::Instant;

/// Stable identifier for one physical device, stable across reconnects.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DeviceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Which wire protocol a device speaks. Immutable once a `Device` is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    Hue,
    Kasa,
    MagicHome,
}

impl DeviceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Hue => "hue",
            DeviceKind::Kasa => "kasa",
            DeviceKind::MagicHome => "magichome",
        }
    }

    /// Default token-bucket rate in commands/s, overridable via `device.<kind>.rate_cps`.
    pub fn default_rate_cps(&self) -> f32 {
        match self {
            DeviceKind::Hue => 10.0,
            DeviceKind::Kasa => 5.0,
            DeviceKind::MagicHome => 20.0,
        }
    }

    /// Default token-bucket burst, overridable via `device.<kind>.burst`.
    pub fn default_burst(&self) -> u32 {
        match self {
            DeviceKind::Hue => 5,
            DeviceKind::Kasa => 3,
            DeviceKind::MagicHome => 10,
        }
    }
}

/// Static capability bitset: which verbs a device kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilityBits {
    bits: u8,
}

impl CapabilityBits {
    pub const COLOR: u8 = 1 << 0;
    pub const BRIGHTNESS: u8 = 1 << 1;
    pub const TEMPERATURE: u8 = 1 << 2;
    pub const EFFECTS: u8 = 1 << 3;
    pub const TRANSITION: u8 = 1 << 4;
    pub const POWER: u8 = 1 << 5;

    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    pub const fn with(self, flag: u8) -> Self {
        Self {
            bits: self.bits | flag,
        }
    }

    pub const fn has(&self, flag: u8) -> bool {
        self.bits & flag != 0
    }

    pub const fn bits(&self) -> u8 {
        self.bits
    }
}

/// Connection state machine for a device: discovery through degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceState {
    Unknown,
    Discovered,
    Connected,
    Degraded,
    Dead,
}

impl DeviceState {
    /// Whether the scheduler will still dispatch commands to a device in this state.
    pub fn accepts_commands(&self) -> bool {
        matches!(self, DeviceState::Connected | DeviceState::Degraded)
    }
}

/// The last state actually confirmed applied to a device, used for dead-band suppression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceSnapshot {
    pub color: (u8, u8, u8),
    pub brightness: u8,
    pub power: bool,
}

impl Default for DeviceSnapshot {
    fn default() -> Self {
        Self {
            color: (0, 0, 0),
            brightness: 0,
            power: false,
        }
    }
}

/// One physical endpoint, from discovery through to removal.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: DeviceId,
    pub kind: DeviceKind,
    pub address: String,
    pub capabilities: CapabilityBits,
    pub min_brightness: u8,
    pub max_brightness: u8,
    pub state: DeviceState,
    pub last_seen: Instant,
    pub last_applied: DeviceSnapshot,
}

impl Device {
    pub fn new(id: DeviceId, kind: DeviceKind, address: impl Into<String>, capabilities: CapabilityBits) -> Self {
        Self {
            id,
            kind,
            address: address.into(),
            capabilities,
            min_brightness: 0,
            max_brightness: 255,
            state: DeviceState::Discovered,
            last_seen: Instant::now(),
            last_applied: DeviceSnapshot::default(),
        }
    }
}
