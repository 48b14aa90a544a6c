//! Cancellable fixed-cadence tick source for the transport.
//!
//! A named background thread sends a unit message over a bounded channel on
//! every interval. The handle owns the thread: `cancel()` flips the shutdown
//! flag, joins, and then DISCARDS any ticks still sitting in the channel, so
//! a tick can never be observed after cancellation returns. Dropping the
//! handle cancels the same way.
//!
//! Ticks are messages, not callbacks: the host drains them on its own thread,
//! which keeps tick handling and store mutations on one logical thread.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use log::trace;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// One transport tick. Carries no payload; the transport owns the step size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick;

/// Handle to a running ticker thread.
pub struct TickerHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    rx: Receiver<Tick>,
}

impl TickerHandle {
    /// Spawn a ticker firing every `interval`.
    pub fn spawn(interval: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let (tx, rx): (Sender<Tick>, Receiver<Tick>) = bounded(64);

        let flag = Arc::clone(&shutdown);
        let handle = thread::Builder::new()
            .name("cutline-ticker".to_string())
            .spawn(move || {
                trace!("ticker started ({:?} cadence)", interval);
                loop {
                    thread::sleep(interval);
                    if flag.load(Ordering::Relaxed) {
                        break;
                    }
                    // Never block on a stalled host: a full channel drops the
                    // tick (drift is acceptable), a gone receiver ends the loop.
                    match tx.try_send(Tick) {
                        Ok(()) | Err(TrySendError::Full(_)) => {}
                        Err(TrySendError::Disconnected(_)) => break,
                    }
                }
                trace!("ticker stopped");
            })
            .expect("failed to spawn ticker thread");

        Self {
            shutdown,
            handle: Some(handle),
            rx,
        }
    }

    /// Non-blocking: take one pending tick if any.
    pub fn try_tick(&self) -> bool {
        self.rx.try_recv().is_ok()
    }

    /// Block up to `timeout` for the next tick.
    pub fn wait_tick(&self, timeout: Duration) -> bool {
        self.rx.recv_timeout(timeout).is_ok()
    }

    /// Synchronously stop the thread and drop queued ticks. Safe to call
    /// more than once.
    pub fn cancel(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_delivers_ticks() {
        let ticker = TickerHandle::spawn(Duration::from_millis(5));
        assert!(ticker.wait_tick(Duration::from_millis(500)));
    }

    #[test]
    fn test_cancel_discards_pending_ticks() {
        let mut ticker = TickerHandle::spawn(Duration::from_millis(2));
        // Let a few ticks pile up in the channel.
        thread::sleep(Duration::from_millis(30));
        ticker.cancel();
        // After cancel returns no tick may surface - queued ones are gone and
        // the thread is joined so no new ones can arrive.
        assert!(!ticker.try_tick());
        assert!(!ticker.wait_tick(Duration::from_millis(20)));
    }

    #[test]
    fn test_cancel_is_reentrant() {
        let mut ticker = TickerHandle::spawn(Duration::from_millis(2));
        ticker.cancel();
        ticker.cancel();
    }
}
