// src/topology/channel.rs
//! One-directional, unbounded, blocking FIFO of byte payloads
//!
//! Pushing never blocks. Popping parks the calling thread until a payload is
//! available; there is no timeout.

use bytes::Bytes;
use crossbeam_channel::{Receiver, Sender};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Which setup call created a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Created by `connect`
    Direct,

    /// Created by `mitm` as one of the four relay sub-links
    Relay,
}

/// A single channel addressed by one directed pair
#[derive(Debug)]
pub struct Channel {
    sender: Sender<Bytes>,
    receiver: Receiver<Bytes>,
    kind: LinkKind,

    /// Payloads pushed
    sent: AtomicU64,

    /// Payloads popped
    delivered: AtomicU64,
}

impl Channel {
    pub fn new(kind: LinkKind) -> Self {
        let (sender, receiver) = crossbeam_channel::unbounded();
        Self {
            sender,
            receiver,
            kind,
            sent: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> LinkKind {
        self.kind
    }

    /// Push a payload (never blocks)
    ///
    /// Hands the payload back if the queue is disconnected, which cannot
    /// happen while the channel itself is alive.
    pub fn push(&self, payload: Bytes) -> Result<(), Bytes> {
        match self.sender.send(payload) {
            Ok(()) => {
                self.sent.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
            Err(err) => Err(err.into_inner()),
        }
    }

    /// Pop the oldest payload, blocking until one arrives
    pub fn pop(&self) -> Option<Bytes> {
        let payload = self.receiver.recv().ok()?;
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Some(payload)
    }

    /// Pop without blocking
    pub fn try_pop(&self) -> Option<Bytes> {
        let payload = self.receiver.try_recv().ok()?;
        self.delivered.fetch_add(1, Ordering::Relaxed);
        Some(payload)
    }

    /// Payloads waiting to be popped
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    pub fn stats(&self) -> ChannelStats {
        ChannelStats {
            kind: self.kind,
            sent: self.sent.load(Ordering::Relaxed),
            delivered: self.delivered.load(Ordering::Relaxed),
            pending: self.len(),
        }
    }
}

/// Traffic counters for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelStats {
    pub kind: LinkKind,
    pub sent: u64,
    pub delivered: u64,
    pub pending: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let channel = Channel::new(LinkKind::Direct);
        for i in 0..5u8 {
            channel.push(Bytes::from(vec![i])).unwrap();
        }
        for i in 0..5u8 {
            assert_eq!(channel.pop().unwrap(), Bytes::from(vec![i]));
        }
        assert!(channel.is_empty());
    }

    #[test]
    fn test_try_pop_on_empty() {
        let channel = Channel::new(LinkKind::Relay);
        assert!(channel.try_pop().is_none());
        assert_eq!(channel.kind(), LinkKind::Relay);
    }

    #[test]
    fn test_stats() {
        let channel = Channel::new(LinkKind::Direct);
        channel.push(Bytes::from_static(b"one")).unwrap();
        channel.push(Bytes::from_static(b"two")).unwrap();
        channel.pop();

        let stats = channel.stats();
        assert_eq!(stats.sent, 2);
        assert_eq!(stats.delivered, 1);
        assert_eq!(stats.pending, 1);
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let channel = Arc::new(Channel::new(LinkKind::Direct));

        let consumer = {
            let channel = Arc::clone(&channel);
            thread::spawn(move || channel.pop())
        };

        thread::sleep(std::time::Duration::from_millis(20));
        channel.push(Bytes::from_static(b"late")).unwrap();

        let received = consumer.join().unwrap();
        assert_eq!(received, Some(Bytes::from_static(b"late")));
    }
}
