//! The Capture stage: loopback PCM in, bounded `AudioBlock` queue out.
//!
//! Runs on its own OS thread (platform audio APIs require this — see the
//! cpal stream's realtime callback requirements). A failed device
//! disappears → reconnect loop with exponential back-off
//! (100 ms to 5 s); no samples are ever fabricated while reconnecting.

use crate::backend::{BackendStreamConfig, CaptureBackend};
use lumensync_core::{AudioBlock, DropPolicy};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Condvar, Mutex};
use std::time::Duration;

const RECONNECT_INITIAL_BACKOFF: Duration = Duration::from_millis(100);
const RECONNECT_MAX_BACKOFF: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy)]
pub struct CaptureConfig {
    pub sample_rate: u32,
    /// Channels to request from the backend (1 = mono, 2 = stereo); output
    /// blocks are always downmixed to mono regardless of this setting.
    pub channels: u16,
    pub frame_size: usize,
    pub hop_size: usize,
    pub drop_policy: DropPolicy,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            channels: 2,
            frame_size: 1024,
            hop_size: 512,
            drop_policy: DropPolicy::Newest,
        }
    }
}

/// Slides a ring of samples forward by `hop_size`, yielding an overlapping
/// `frame_size`-length block each time enough samples have accumulated.
struct HopWindower {
    ring: VecDeque<f32>,
    frame_size: usize,
    hop_size: usize,
}

impl HopWindower {
    fn new(frame_size: usize, hop_size: usize) -> Self {
        Self {
            ring: VecDeque::with_capacity(frame_size * 2),
            frame_size,
            hop_size,
        }
    }

    fn push(&mut self, samples: &[f32]) -> Vec<Vec<f32>> {
        self.ring.extend(samples.iter().copied());
        let mut blocks = Vec::new();
        while self.ring.len() >= self.frame_size {
            blocks.push(self.ring.iter().take(self.frame_size).copied().collect());
            let drain = self.hop_size.min(self.ring.len());
            self.ring.drain(..drain);
        }
        blocks
    }
}

/// Downmix interleaved multi-channel samples to mono by averaging channels.
fn downmix(interleaved: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    let channels = channels as usize;
    interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect()
}

/// Bounded block queue enforcing the configured [`DropPolicy`] when full.
struct BlockQueue {
    state: Mutex<VecDeque<AudioBlock>>,
    not_empty: Condvar,
    capacity: usize,
    drop_policy: DropPolicy,
    dropped: AtomicU64,
}

impl BlockQueue {
    fn new(capacity: usize, drop_policy: DropPolicy) -> Self {
        Self {
            state: Mutex::new(VecDeque::with_capacity(capacity)),
            not_empty: Condvar::new(),
            capacity,
            drop_policy,
            dropped: AtomicU64::new(0),
        }
    }

    fn push(&self, block: AudioBlock) {
        let mut queue = self.state.lock().unwrap();
        if queue.len() >= self.capacity {
            match self.drop_policy {
                DropPolicy::Newest => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                    return;
                }
                DropPolicy::Oldest => {
                    queue.pop_front();
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
            }
        }
        queue.push_back(block);
        self.not_empty.notify_one();
    }

    fn pop_blocking(&self, timeout: Duration) -> Option<AudioBlock> {
        let mut queue = self.state.lock().unwrap();
        if queue.is_empty() {
            let (guard, _) = self
                .not_empty
                .wait_timeout_while(queue, timeout, |q| q.is_empty())
                .unwrap();
            queue = guard;
        }
        queue.pop_front()
    }
}

/// A running Capture session: an `AudioBlock` source the Analyser pulls from.
pub struct Capture {
    queue: Arc<BlockQueue>,
    running: Arc<AtomicBool>,
    join: Option<std::thread::JoinHandle<()>>,
}

impl Capture {
    /// Start capturing on a dedicated thread. Returns immediately; blocks
    /// are available via [`Capture::recv`] as they arrive.
    pub fn start<B>(backend: B, config: CaptureConfig, outbox_capacity: usize) -> Self
    where
        B: CaptureBackend + 'static,
    {
        let queue = Arc::new(BlockQueue::new(outbox_capacity, config.drop_policy));
        let running = Arc::new(AtomicBool::new(true));

        let thread_queue = Arc::clone(&queue);
        let thread_running = Arc::clone(&running);
        let join = std::thread::spawn(move || {
            run_capture_loop(backend, config, thread_queue, thread_running);
        });

        Self {
            queue,
            running,
            join: Some(join),
        }
    }

    /// Block (up to `timeout`) for the next captured block.
    pub fn recv(&self, timeout: Duration) -> Option<AudioBlock> {
        self.queue.pop_blocking(timeout)
    }

    /// Blocks dropped since start, per the configured [`DropPolicy`].
    pub fn dropped_count(&self) -> u64 {
        self.queue.dropped.load(Ordering::Relaxed)
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for Capture {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_capture_loop<B: CaptureBackend>(
    backend: B,
    config: CaptureConfig,
    queue: Arc<BlockQueue>,
    running: Arc<AtomicBool>,
) {
    let mut backoff = RECONNECT_INITIAL_BACKOFF;
    let sequence = Arc::new(AtomicU64::new(0));

    while running.load(Ordering::SeqCst) {
        let (error_tx, error_rx): (Sender<()>, Receiver<()>) = channel();

        let windower = Arc::new(Mutex::new(HopWindower::new(config.frame_size, config.hop_size)));
        let stream_queue = Arc::clone(&queue);
        let stream_windower = Arc::clone(&windower);
        let stream_sequence = Arc::clone(&sequence);
        let channels = config.channels;
        let sample_rate = config.sample_rate;

        let stream_config = BackendStreamConfig {
            sample_rate: config.sample_rate,
            buffer_size: config.hop_size as u32,
            channels: config.channels,
            device_name: None,
        };

        let input_callback = Box::new(move |data: &[f32]| {
            let mono = downmix(data, channels);
            let blocks = stream_windower.lock().unwrap().push(&mono);
            for samples in blocks {
                let seq = stream_sequence.fetch_add(1, Ordering::SeqCst);
                stream_queue.push(AudioBlock::new(samples, sample_rate, 1, seq));
            }
        });

        let error_callback = Box::new(move |msg: &str| {
            tracing::warn!(error = msg, "capture stream error");
            let _ = error_tx.send(());
        });

        match backend.build_input_stream(&stream_config, input_callback, error_callback) {
            Ok(handle) => {
                tracing::info!("capture stream established");
                backoff = RECONNECT_INITIAL_BACKOFF;
                while running.load(Ordering::SeqCst) {
                    if error_rx.recv_timeout(Duration::from_millis(100)).is_ok() {
                        break;
                    }
                }
                drop(handle);
            }
            Err(err) => {
                tracing::warn!(error = %err, backoff_ms = backoff.as_millis(), "capture unavailable, retrying");
            }
        }

        if !running.load(Ordering::SeqCst) {
            break;
        }
        std::thread::sleep(backoff);
        backoff = (backoff * 2).min(RECONNECT_MAX_BACKOFF);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hop_windower_overlaps_by_frame_minus_hop() {
        let mut w = HopWindower::new(8, 4);
        let blocks = w.push(&(0..20).map(|i| i as f32).collect::<Vec<_>>());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        assert_eq!(blocks[1], vec![4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0]);
    }

    #[test]
    fn downmix_averages_interleaved_stereo() {
        let interleaved = vec![1.0, -1.0, 0.5, 0.5];
        let mono = downmix(&interleaved, 2);
        assert_eq!(mono, vec![0.0, 0.5]);
    }

    #[test]
    fn downmix_is_identity_for_mono() {
        let samples = vec![0.1, 0.2, 0.3];
        assert_eq!(downmix(&samples, 1), samples);
    }

    #[test]
    fn queue_applies_newest_drop_policy_when_full() {
        let q = BlockQueue::new(2, DropPolicy::Newest);
        q.push(AudioBlock::new(vec![0.0], 44100, 1, 0));
        q.push(AudioBlock::new(vec![0.0], 44100, 1, 1));
        q.push(AudioBlock::new(vec![0.0], 44100, 1, 2));
        assert_eq!(q.dropped.load(Ordering::Relaxed), 1);
        let first = q.pop_blocking(Duration::from_millis(10)).unwrap();
        assert_eq!(first.sequence, 0);
    }

    #[test]
    fn queue_applies_oldest_drop_policy_when_full() {
        let q = BlockQueue::new(2, DropPolicy::Oldest);
        q.push(AudioBlock::new(vec![0.0], 44100, 1, 0));
        q.push(AudioBlock::new(vec![0.0], 44100, 1, 1));
        q.push(AudioBlock::new(vec![0.0], 44100, 1, 2));
        assert_eq!(q.dropped.load(Ordering::Relaxed), 1);
        let first = q.pop_blocking(Duration::from_millis(10)).unwrap();
        assert_eq!(first.sequence, 1, "oldest (seq 0) should have been evicted");
    }
}
