//! The fan-out dispatch loop: one background thread owns every device's
//! outbox, token bucket, and connection state, and is the only thing that
//! ever calls into a [`LightingBackend`].
//!
//! Per-call timeouts are enforced by the backends themselves (their sockets
//! and HTTP clients carry their own read timeouts) rather than by a second
//! timer here, so the dispatch loop never blocks on a misbehaving call for
//! longer than the backend's own configured bound.

use crate::metrics::DeviceMetrics;
use crate::outbox::{Outbox, DEFAULT_OUTBOX_CAPACITY};
use crate::token_bucket::TokenBucket;
use lumensync_core::{CommandPriority, CommandVerb, DeviceCommand, DeviceId, DeviceSnapshot, DeviceState};
use lumensync_devices::LightingBackend;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, RecvTimeoutError, SyncSender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

const MAX_RETRIES: u32 = 2;
const BACKOFF_MS: [u64; 2] = [100, 250];
const DEGRADE_AFTER_CONSECUTIVE_FAILURES: u32 = 3;
const TICK: Duration = Duration::from_millis(20);

/// One device's dispatch state, owned exclusively by the scheduler thread.
struct DeviceEntry {
    backend: Box<dyn LightingBackend>,
    state: DeviceState,
    outbox: Outbox,
    bucket: TokenBucket,
    consecutive_failures: u32,
    metrics: DeviceMetrics,
}

/// A device to register with the scheduler at construction time.
pub struct DeviceSpec {
    pub id: DeviceId,
    pub backend: Box<dyn LightingBackend>,
    pub rate_cps: f32,
    pub burst: u32,
}

#[derive(Debug, Clone)]
pub enum SchedulerEvent {
    /// A command was applied to a device; carries the state the engine
    /// should now treat as the device's confirmed snapshot.
    Dispatched { device_id: DeviceId, snapshot: DeviceSnapshot },
    DeviceDegraded { device_id: DeviceId },
    DeviceError { device_id: DeviceId, detail: String },
}

pub struct SchedulerConfig {
    pub outbox_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            outbox_capacity: DEFAULT_OUTBOX_CAPACITY,
        }
    }
}

pub struct Scheduler {
    commands: SyncSender<DeviceCommand>,
    running: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
    metrics: Arc<Mutex<HashMap<DeviceId, DeviceMetrics>>>,
}

impl Scheduler {
    pub fn start(devices: Vec<DeviceSpec>, config: SchedulerConfig, events: SyncSender<SchedulerEvent>) -> Self {
        let (tx, rx) = sync_channel(256);
        let running = Arc::new(AtomicBool::new(true));
        let metrics = Arc::new(Mutex::new(HashMap::new()));

        let thread_running = running.clone();
        let thread_metrics = metrics.clone();
        let join = std::thread::spawn(move || {
            run_dispatch_loop(devices, config, rx, events, thread_running, thread_metrics);
        });

        Self {
            commands: tx,
            running,
            join: Some(join),
            metrics,
        }
    }

    /// Submit a command for dispatch. Drops silently if the scheduler's
    /// input queue is momentarily full; the producer side is expected to
    /// keep emitting fresh frames rather than block on backpressure.
    pub fn submit(&self, command: DeviceCommand) {
        let _ = self.commands.try_send(command);
    }

    pub fn metrics_for(&self, device_id: &DeviceId) -> DeviceMetrics {
        self.metrics.lock().unwrap().get(device_id).cloned().unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_dispatch_loop(
    devices: Vec<DeviceSpec>,
    config: SchedulerConfig,
    incoming: Receiver<DeviceCommand>,
    events: SyncSender<SchedulerEvent>,
    running: Arc<AtomicBool>,
    shared_metrics: Arc<Mutex<HashMap<DeviceId, DeviceMetrics>>>,
) {
    let now = Instant::now();
    let mut entries: HashMap<DeviceId, DeviceEntry> = devices
        .into_iter()
        .map(|spec| {
            (
                spec.id,
                DeviceEntry {
                    backend: spec.backend,
                    state: DeviceState::Connected,
                    outbox: Outbox::new(config.outbox_capacity),
                    bucket: TokenBucket::new(spec.rate_cps, spec.burst, now),
                    consecutive_failures: 0,
                    metrics: DeviceMetrics::default(),
                },
            )
        })
        .collect();

    while running.load(Ordering::SeqCst) {
        match incoming.recv_timeout(TICK) {
            Ok(command) => admit(&mut entries, command),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        for (device_id, entry) in entries.iter_mut() {
            if !entry.state.accepts_commands() || entry.outbox.is_empty() {
                continue;
            }
            let now = Instant::now();
            if !entry.bucket.try_take(now) {
                continue;
            }
            let Some(command) = entry.outbox.pop_front() else { continue };
            dispatch_one(device_id, entry, command, &events);
        }

        {
            let mut guard = shared_metrics.lock().unwrap();
            for (id, entry) in entries.iter() {
                guard.insert(id.clone(), entry.metrics.clone());
            }
        }
    }
}

fn admit(entries: &mut HashMap<DeviceId, DeviceEntry>, command: DeviceCommand) {
    let Some(entry) = entries.get_mut(&command.device_id) else {
        return;
    };
    if !entry.state.accepts_commands() {
        return;
    }
    if command.priority != CommandPriority::Beat && !entry.bucket.peek(Instant::now()) {
        entry.metrics.rate_dropped += 1;
        return;
    }
    entry.outbox.push(command);
}

fn dispatch_one(device_id: &DeviceId, entry: &mut DeviceEntry, command: DeviceCommand, events: &SyncSender<SchedulerEvent>) {
    let mut attempt = 0;
    loop {
        let result = apply(&mut entry.backend, &command);
        match result {
            Ok(snapshot) => {
                entry.consecutive_failures = 0;
                entry.metrics.success += 1;
                let _ = events.try_send(SchedulerEvent::Dispatched {
                    device_id: device_id.clone(),
                    snapshot,
                });
                return;
            }
            Err(detail) => {
                if attempt < MAX_RETRIES {
                    std::thread::sleep(Duration::from_millis(BACKOFF_MS[attempt as usize]));
                    attempt += 1;
                    continue;
                }
                entry.consecutive_failures += 1;
                entry.metrics.failure += 1;
                if entry.consecutive_failures >= DEGRADE_AFTER_CONSECUTIVE_FAILURES {
                    entry.state = DeviceState::Degraded;
                    let _ = events.try_send(SchedulerEvent::DeviceDegraded { device_id: device_id.clone() });
                }
                let _ = events.try_send(SchedulerEvent::DeviceError {
                    device_id: device_id.clone(),
                    detail,
                });
                return;
            }
        }
    }
}

/// Issue one backend call for `command` and, on success, report the device
/// snapshot it results in (for the effect engine's dead-band comparisons).
fn apply(backend: &mut Box<dyn LightingBackend>, command: &DeviceCommand) -> Result<DeviceSnapshot, String> {
    match &command.verb {
        CommandVerb::SetColor(r, g, b) => backend
            .set_color(*r, *g, *b)
            .map(|_| DeviceSnapshot { color: (*r, *g, *b), ..Default::default() })
            .map_err(|e| e.to_string()),
        CommandVerb::SetBrightness(level) => backend
            .set_brightness(*level)
            .map(|_| DeviceSnapshot { brightness: *level, ..Default::default() })
            .map_err(|e| e.to_string()),
        CommandVerb::SetEffect(name) => backend.set_effect(name).map(|_| DeviceSnapshot::default()).map_err(|e| e.to_string()),
        CommandVerb::Power(on) => backend
            .power(*on)
            .map(|_| DeviceSnapshot { power: *on, ..Default::default() })
            .map_err(|e| e.to_string()),
        CommandVerb::SetTransition(ms) => backend.set_transition(*ms).map(|_| DeviceSnapshot::default()).map_err(|e| e.to_string()),
    }
}
