//! Per-device bounded command queue with same-verb coalescing.

use lumensync_core::DeviceCommand;
use std::collections::VecDeque;

pub const DEFAULT_OUTBOX_CAPACITY: usize = 8;

pub struct Outbox {
    capacity: usize,
    queue: VecDeque<DeviceCommand>,
}

impl Outbox {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            queue: VecDeque::with_capacity(capacity),
        }
    }

    /// Push a command, applying the fan-out coalescing rule when full:
    /// overwrite a same-verb head or tail (newest wins), else drop the head.
    pub fn push(&mut self, command: DeviceCommand) {
        if self.queue.len() < self.capacity {
            self.queue.push_back(command);
            return;
        }

        if let Some(tail) = self.queue.back_mut() {
            if tail.same_verb_slot(&command) {
                *tail = command;
                return;
            }
        }
        if let Some(head) = self.queue.front_mut() {
            if head.same_verb_slot(&command) {
                *head = command;
                return;
            }
        }
        self.queue.pop_front();
        self.queue.push_back(command);
    }

    pub fn pop_front(&mut self) -> Option<DeviceCommand> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
