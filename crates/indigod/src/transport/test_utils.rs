//! Test helpers for the transport module.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use super::{DatagramHandler, DatagramReply};

/// Counts datagrams and echoes each one back.
pub(crate) struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    pub(crate) fn new() -> (Arc<AtomicUsize>, Arc<Self>) {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = Arc::new(Self {
            count: Arc::clone(&count),
        });
        (count, handler)
    }
}

impl DatagramHandler for CountingHandler {
    fn handle(&self, datagram: &[u8], reply: &DatagramReply<'_>) {
        self.count.fetch_add(1, Ordering::SeqCst);
        let _ = reply.send(datagram);
    }
}
