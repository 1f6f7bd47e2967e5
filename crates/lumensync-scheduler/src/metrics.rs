//! Per-device dispatch counters, snapshotted for observability.

#[derive(Debug, Clone, Default)]
pub struct DeviceMetrics {
    pub success: u64,
    pub failure: u64,
    pub rate_dropped: u64,
}
