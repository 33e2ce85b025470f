//=========================================================================
// Event Collector
//=========================================================================
//
// Native-side collector for NormalizedEvents with bounded polling and
// shutdown detection.
//
// Architecture:
//   ChannelSink → Receiver<NormalizedEvent> → collect_frame() → events
//                                                   ↓
//                                              TickControl
//
// Bounded polling keeps one frame from starving the native loop. When
// every sink is gone (bridge destroyed) and the queue is empty, the
// collector reports `Exit`.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use crate::core::event::NormalizedEvent;

//=== Constants ===========================================================

/// Default per-frame drain budget.
pub const MAX_EVENTS_PER_FRAME: usize = 256;

//=== TickControl =========================================================

/// Native loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Drains delivered events into a per-frame buffer.
#[derive(Debug)]
pub struct EventCollector {
    receiver: Receiver<NormalizedEvent>,
    events: Vec<NormalizedEvent>,
    budget: usize,
}

impl EventCollector {
    pub fn new(receiver: Receiver<NormalizedEvent>) -> Self {
        Self::with_budget(receiver, MAX_EVENTS_PER_FRAME)
    }

    /// # Panics
    ///
    /// Panics if `budget == 0`.
    pub fn with_budget(receiver: Receiver<NormalizedEvent>, budget: usize) -> Self {
        assert!(budget > 0, "Frame budget must be positive");
        Self {
            receiver,
            events: Vec::with_capacity(budget.min(64)),
            budget,
        }
    }

    /// Collects pending events without blocking.
    pub fn collect_frame(&mut self) -> TickControl {
        self.events.clear();
        self.drain()
    }

    /// Like [`collect_frame`](Self::collect_frame), but waits up to
    /// `timeout` for the first event when the queue is empty.
    pub fn wait_frame(&mut self, timeout: Duration) -> TickControl {
        self.events.clear();

        match self.receiver.recv_timeout(timeout) {
            Ok(event) => self.events.push(event),
            Err(RecvTimeoutError::Timeout) => return TickControl::Continue,
            Err(RecvTimeoutError::Disconnected) => return TickControl::Exit,
        }

        self.drain()
    }

    /// Events collected this frame, in delivery order.
    pub fn events(&self) -> &[NormalizedEvent] {
        &self.events
    }

    /// Takes the collected events, leaving an empty buffer.
    pub fn take_events(&mut self) -> Vec<NormalizedEvent> {
        std::mem::take(&mut self.events)
    }

    fn drain(&mut self) -> TickControl {
        while self.events.len() < self.budget {
            match self.receiver.try_recv() {
                Ok(event) => self.events.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Deliver what arrived before teardown first.
                    return if self.events.is_empty() {
                        TickControl::Exit
                    } else {
                        TickControl::Continue
                    };
                }
            }
        }

        if self.events.len() >= self.budget {
            warn!(
                target: "bridge::native",
                "Event backlog: drained {} events this frame",
                self.events.len()
            );
        }

        TickControl::Continue
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform_bridge::{ChannelSink, NativeEventSink};
    use crossbeam_channel::unbounded;

    fn gyro(timestamp: i64) -> NormalizedEvent {
        NormalizedEvent::Gyroscope {
            values: [0.0; 3],
            timestamp,
        }
    }

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<NormalizedEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn collect_preserves_delivery_order() {
        let (sink, rx) = ChannelSink::bounded(8);
        let mut collector = EventCollector::new(rx);

        sink.deliver(gyro(1));
        sink.deliver(gyro(2));

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.events(), &[gyro(1), gyro(2)]);
    }

    #[test]
    fn collect_respects_budget() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::with_budget(rx, 2);

        for t in 0..5 {
            tx.send(gyro(t)).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.events().len(), 2);
        collector.collect_frame();
        assert_eq!(collector.events(), &[gyro(2), gyro(3)]);
    }

    #[test]
    fn collect_clears_previous_frame() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(gyro(1)).unwrap();
        collector.collect_frame();
        assert_eq!(collector.events().len(), 1);

        collector.collect_frame();
        assert!(collector.events().is_empty());
    }

    #[test]
    fn take_events_empties_buffer() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(gyro(1)).unwrap();
        collector.collect_frame();

        assert_eq!(collector.take_events(), vec![gyro(1)]);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn buffered_events_survive_disconnect() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx);

        tx.send(gyro(1)).unwrap();
        drop(tx);

        assert_eq!(collector.collect_frame(), TickControl::Continue);
        assert_eq!(collector.events(), &[gyro(1)]);
        assert_eq!(collector.collect_frame(), TickControl::Exit);
    }

    #[test]
    fn wait_frame_times_out() {
        let (_tx, rx) = unbounded::<NormalizedEvent>();
        let mut collector = EventCollector::new(rx);

        assert_eq!(collector.wait_frame(Duration::from_millis(1)), TickControl::Continue);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn wait_frame_exits_on_disconnect() {
        let (tx, rx) = unbounded::<NormalizedEvent>();
        let mut collector = EventCollector::new(rx);
        drop(tx);

        assert_eq!(collector.wait_frame(Duration::from_millis(10)), TickControl::Exit);
    }

    #[test]
    #[should_panic(expected = "Frame budget must be positive")]
    fn zero_budget_panics() {
        let (_tx, rx) = unbounded::<NormalizedEvent>();
        EventCollector::with_budget(rx, 0);
    }
}
