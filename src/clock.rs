//! Fixed-interval simulation driver
//!
//! The host (browser animation frame, native loop) only reports how much time
//! passed. The clock turns that into physics ticks, spawn ticks and send ticks,
//! each on its own interval, and hands encoded frames to a [`FrameSink`].
//!
//! Sending is single-flight: while the transport is busy, the newest frame
//! waits in the outbox and replaces any older waiting frame. Every send carries
//! a [`SendTicket`]; only the ticket of the send in flight can complete it.

use crate::codec::FrameCodec;
use crate::consts::{MAX_SUBSTEPS, SEND_TICK_MS};
use crate::framebuffer::FrameBuffer;
use crate::sim::MAX_PARTICLES;

/// A simulation the clock can drive
pub trait Simulation {
    /// Milliseconds between physics/render ticks
    fn tick_interval_ms(&self) -> f64;

    /// Milliseconds between spawn ticks, `None` when nothing spawns on a timer
    fn spawn_interval_ms(&self) -> Option<f64> {
        None
    }

    /// Advance physics by one tick
    fn tick(&mut self);

    /// Run one spawn tick
    fn spawn_tick(&mut self) {}

    /// Rasterize the current state
    fn render(&self, frame: &mut FrameBuffer);
}

/// Result of handing a frame to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Delivered (or given up on) before `send` returned
    Completed,
    /// Still sending; the transport calls [`SimulationClock::send_complete`]
    InFlight,
}

/// Identifies one send; hand it back to [`SimulationClock::send_complete`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SendTicket(u32);

impl SendTicket {
    pub fn from_id(id: u32) -> Self {
        Self(id)
    }

    pub fn id(self) -> u32 {
        self.0
    }
}

/// Outbound transport for encoded frames
pub trait FrameSink {
    fn send(&mut self, ticket: SendTicket, frame: &[u8]) -> Delivery;
}

/// Sink that keeps every frame, for tests and offline runs
#[derive(Debug, Default)]
pub struct CollectSink {
    pub frames: Vec<Vec<u8>>,
}

impl FrameSink for CollectSink {
    fn send(&mut self, _ticket: SendTicket, frame: &[u8]) -> Delivery {
        self.frames.push(frame.to_vec());
        Delivery::Completed
    }
}

/// Fixed-period accumulator
#[derive(Debug, Clone)]
pub struct Interval {
    period_ms: f64,
    accumulated_ms: f64,
    max_steps: u32,
}

impl Interval {
    /// Catch-up limited to `MAX_SUBSTEPS` per call
    pub fn new(period_ms: f64) -> Self {
        Self::with_max_steps(period_ms, MAX_SUBSTEPS)
    }

    pub fn with_max_steps(period_ms: f64, max_steps: u32) -> Self {
        Self {
            period_ms: period_ms.max(f64::EPSILON),
            accumulated_ms: 0.0,
            max_steps: max_steps.max(1),
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    pub fn set_period(&mut self, period_ms: f64) {
        self.period_ms = period_ms.max(f64::EPSILON);
    }

    /// Number of ticks due after `elapsed_ms`
    ///
    /// At most `max_steps` per call; any backlog beyond that is dropped.
    pub fn due(&mut self, elapsed_ms: f64) -> u32 {
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            self.accumulated_ms += elapsed_ms;
        }
        let mut steps = 0;
        while self.accumulated_ms >= self.period_ms && steps < self.max_steps {
            self.accumulated_ms -= self.period_ms;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulated_ms >= self.period_ms {
            log::debug!("Dropping {:.0} ms of backlog", self.accumulated_ms);
            self.accumulated_ms %= self.period_ms;
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulated_ms = 0.0;
    }
}

/// Single-flight frame queue with drop-oldest replacement
#[derive(Debug, Default)]
pub struct FrameOutbox {
    in_flight: Option<SendTicket>,
    next_id: u32,
    pending: Option<Vec<u8>>,
    dropped: u64,
    stale: u64,
}

impl FrameOutbox {
    fn issue(&mut self) -> SendTicket {
        let ticket = SendTicket(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.in_flight = Some(ticket);
        ticket
    }

    /// Offer a new frame; returns it with a fresh ticket if it should be sent now
    pub fn offer(&mut self, frame: Vec<u8>) -> Option<(SendTicket, Vec<u8>)> {
        if self.in_flight.is_none() {
            return Some((self.issue(), frame));
        }
        if self.pending.replace(frame).is_some() {
            self.dropped += 1;
        }
        None
    }

    /// Mark the send for `ticket` done; returns the next frame to send, if any
    ///
    /// Tickets that are not the one in flight (cleared by `clear`, or already
    /// completed) are ignored.
    pub fn complete(&mut self, ticket: SendTicket) -> Option<(SendTicket, Vec<u8>)> {
        if self.in_flight != Some(ticket) {
            self.stale += 1;
            log::debug!("Ignoring completion of stale send {}", ticket.id());
            return None;
        }
        match self.pending.take() {
            Some(next) => Some((self.issue(), next)),
            None => {
                self.in_flight = None;
                None
            }
        }
    }

    /// Ticket of the send currently in flight
    pub fn in_flight(&self) -> Option<SendTicket> {
        self.in_flight
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames superseded before they were sent
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Completions that arrived for a send no longer in flight
    pub fn stale_completions(&self) -> u64 {
        self.stale
    }

    /// Forget the pending frame and any in-flight send
    pub fn clear(&mut self) {
        self.in_flight = None;
        self.pending = None;
    }
}

/// What one `advance` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceSummary {
    pub ticks: u32,
    pub spawns: u32,
    pub frames_sent: u32,
}

/// Drives a [`Simulation`] on fixed intervals and streams its frames
pub struct SimulationClock<S: Simulation> {
    sim: S,
    frame: FrameBuffer,
    codec: FrameCodec,
    physics: Interval,
    spawn: Interval,
    send: Interval,
    outbox: FrameOutbox,
    running: bool,
}

impl<S: Simulation> SimulationClock<S> {
    pub fn new(sim: S, codec: FrameCodec) -> Self {
        let mut frame = FrameBuffer::new();
        sim.render(&mut frame);
        Self {
            physics: Interval::new(sim.tick_interval_ms()),
            // spawning past the particle cap in one call only replaces particles from that call
            spawn: Interval::with_max_steps(
                sim.spawn_interval_ms().unwrap_or(f64::MAX),
                MAX_PARTICLES as u32,
            ),
            send: Interval::new(SEND_TICK_MS),
            sim,
            frame,
            codec,
            outbox: FrameOutbox::default(),
            running: true,
        }
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    /// Mutable access between ticks (pointer, activation, settings)
    pub fn sim_mut(&mut self) -> &mut S {
        &mut self.sim
    }

    /// Most recently rendered frame
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn codec(&self) -> FrameCodec {
        self.codec
    }

    pub fn set_codec(&mut self, codec: FrameCodec) {
        self.codec = codec;
    }

    pub fn outbox(&self) -> &FrameOutbox {
        &self.outbox
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Let `elapsed_ms` of host time pass
    pub fn advance(&mut self, elapsed_ms: f64, sink: &mut impl FrameSink) -> AdvanceSummary {
        let mut summary = AdvanceSummary::default();
        if !self.running {
            return summary;
        }

        match self.sim.spawn_interval_ms() {
            Some(period) => {
                self.spawn.set_period(period);
                summary.spawns = self.spawn.due(elapsed_ms);
                for _ in 0..summary.spawns {
                    self.sim.spawn_tick();
                }
            }
            None => self.spawn.reset(),
        }

        self.physics.set_period(self.sim.tick_interval_ms());
        summary.ticks = self.physics.due(elapsed_ms);
        for _ in 0..summary.ticks {
            self.sim.tick();
        }
        if summary.ticks > 0 {
            self.sim.render(&mut self.frame);
        }

        if self.send.due(elapsed_ms) > 0 {
            let encoded = self.codec.encode(&self.frame);
            if let Some(frame) = self.outbox.offer(encoded) {
                summary.frames_sent = self.deliver(frame, sink);
            }
        }
        summary
    }

    /// Called by an asynchronous transport once the send for `ticket` finished
    pub fn send_complete(&mut self, ticket: SendTicket, sink: &mut impl FrameSink) -> u32 {
        if !self.running {
            return 0;
        }
        match self.outbox.complete(ticket) {
            Some(next) => self.deliver(next, sink),
            None => 0,
        }
    }

    /// Send a frame and anything that queues up behind synchronous deliveries
    fn deliver(&mut self, first: (SendTicket, Vec<u8>), sink: &mut impl FrameSink) -> u32 {
        let mut next = Some(first);
        let mut sent = 0;
        while let Some((ticket, frame)) = next.take() {
            sent += 1;
            if sink.send(ticket, &frame) == Delivery::Completed {
                next = self.outbox.complete(ticket);
            }
        }
        sent
    }

    /// Cancel all timers and discard unsent frames
    pub fn stop(&mut self) {
        if self.running {
            log::info!("Stopping simulation ({} frames dropped)", self.outbox.dropped());
        }
        self.running = false;
        self.outbox.clear();
        self.physics.reset();
        self.spawn.reset();
        self.send.reset();
    }

    pub fn start(&mut self) {
        self.running = true;
    }
}
