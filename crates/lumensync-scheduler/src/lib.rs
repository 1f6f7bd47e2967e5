//! Fan-out dispatch: decouples command production (the Effect Engine) from
//! device I/O, enforcing per-device fairness, rate limits, and retry.

mod metrics;
mod outbox;
mod scheduler;
mod token_bucket;

pub use metrics::DeviceMetrics;
pub use outbox::DEFAULT_OUTBOX_CAPACITY;
pub use scheduler::{DeviceSpec, Scheduler, SchedulerConfig, SchedulerEvent};
