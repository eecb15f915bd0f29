//! Simulated bus for host-side tests
//!
//! A [`SimBus`] hands out an output line, an input line and a clock that
//! share one virtual microsecond counter. Time only moves when the code
//! under test delays or measures a pulse, so runs are deterministic.
//!
//! - The output records every level change with its timestamp.
//! - The input reads asserted (low) inside windows set with
//!   [`SimBus::hold_busy`], released otherwise.
//! - Pulse measurements replay a queue of widths; an empty queue behaves
//!   like a silent bus and times out.
//!
//! The input does not see the output: scripted traffic is the only thing
//! the link can receive.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use slink_hal::{Clock, InputPin, Level, OutputPin, PulseIn};
use slink_protocol::{byte_marks, Mark, TimingProfile};

use crate::config::LinkConfig;
use crate::link::Slink;

/// Link type produced by [`SimBus::link`]
pub type SimLink = Slink<SimOutput, SimInput, SimClock>;

#[derive(Debug, Default)]
struct BusState {
    now: u32,
    output_high: bool,
    edges: Vec<(u32, Level)>,
    busy: Vec<(u32, u32)>,
    pulses: VecDeque<u32>,
    measured: Vec<Level>,
}

impl BusState {
    fn input_asserted(&self) -> bool {
        self.busy
            .iter()
            .any(|&(from, until)| self.now >= from && self.now < until)
    }
}

/// Shared state of a simulated bus
#[derive(Debug, Clone, Default)]
pub struct SimBus {
    state: Rc<RefCell<BusState>>,
}

impl SimBus {
    /// Create a quiet bus at time 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Output line handle
    pub fn output(&self) -> SimOutput {
        SimOutput {
            state: self.state.clone(),
        }
    }

    /// Input line handle
    pub fn input(&self) -> SimInput {
        SimInput {
            state: self.state.clone(),
        }
    }

    /// Clock handle
    pub fn clock(&self) -> SimClock {
        SimClock {
            state: self.state.clone(),
        }
    }

    /// Build a link on this bus
    pub fn link(&self, config: LinkConfig) -> SimLink {
        Slink::new(self.output(), self.input(), self.clock(), config)
    }

    /// Current virtual time
    pub fn now_us(&self) -> u32 {
        self.state.borrow().now
    }

    /// Hold the input asserted during `[from_us, until_us)`
    pub fn hold_busy(&self, from_us: u32, until_us: u32) {
        self.state.borrow_mut().busy.push((from_us, until_us));
    }

    /// Queue pulse widths for the next measurements (0 = timeout)
    pub fn queue_pulses(&self, widths: &[u32]) {
        self.state.borrow_mut().pulses.extend(widths.iter().copied());
    }

    /// Queue the nominal mark widths of a frame: sync, then `bytes`
    pub fn queue_frame(&self, timing: &TimingProfile, bytes: &[u8]) {
        let mut state = self.state.borrow_mut();
        state.pulses.push_back(timing.mark_us(Mark::Sync));
        for &byte in bytes {
            for mark in byte_marks(byte) {
                state.pulses.push_back(timing.mark_us(mark));
            }
        }
    }

    /// Queued widths not yet measured
    pub fn pending_pulses(&self) -> usize {
        self.state.borrow().pulses.len()
    }

    /// Levels requested by every pulse measurement so far
    pub fn measured_levels(&self) -> Vec<Level> {
        self.state.borrow().measured.clone()
    }

    /// Current output level
    pub fn output_level(&self) -> Level {
        Level::from(self.state.borrow().output_high)
    }

    /// Recorded output level changes
    pub fn edges(&self) -> Vec<(u32, Level)> {
        self.state.borrow().edges.clone()
    }

    /// Widths of every completed output period at `level`
    pub fn marks(&self, level: Level) -> Vec<u32> {
        let edges = self.edges();
        edges
            .windows(2)
            .filter(|pair| pair[0].1 == level)
            .map(|pair| pair[1].0 - pair[0].0)
            .collect()
    }

    /// Decode everything written to the output into frames
    ///
    /// Each sync mark starts a new frame; a trailing partial byte is dropped.
    pub fn sent_frames(&self, config: &LinkConfig) -> Vec<Vec<u8>> {
        let timing = config.timing;
        let mut frames: Vec<Vec<u8>> = Vec::new();
        let mut byte = 0u8;
        let mut bits = 0;

        for width in self.marks(config.polarity.assert_level()) {
            match timing.classify(width) {
                Some(Mark::Sync) => {
                    frames.push(Vec::new());
                    byte = 0;
                    bits = 0;
                }
                Some(mark) => {
                    let Some(frame) = frames.last_mut() else {
                        continue;
                    };
                    byte = (byte << 1) | (mark == Mark::One) as u8;
                    bits += 1;
                    if bits == 8 {
                        frame.push(byte);
                        byte = 0;
                        bits = 0;
                    }
                }
                None => {}
            }
        }
        frames
    }
}

/// Simulated output line
#[derive(Debug)]
pub struct SimOutput {
    state: Rc<RefCell<BusState>>,
}

impl SimOutput {
    fn drive(&mut self, high: bool) {
        let mut state = self.state.borrow_mut();
        if state.output_high != high {
            state.output_high = high;
            let now = state.now;
            state.edges.push((now, Level::from(high)));
        }
    }
}

impl OutputPin for SimOutput {
    fn set_high(&mut self) {
        self.drive(true);
    }

    fn set_low(&mut self) {
        self.drive(false);
    }

    fn is_set_high(&self) -> bool {
        self.state.borrow().output_high
    }
}

/// Simulated input line (reads low while asserted)
#[derive(Debug)]
pub struct SimInput {
    state: Rc<RefCell<BusState>>,
}

impl InputPin for SimInput {
    fn is_high(&self) -> bool {
        !self.state.borrow().input_asserted()
    }
}

impl PulseIn for SimInput {
    fn pulse_in(&mut self, level: Level, timeout_us: u32) -> u32 {
        let mut state = self.state.borrow_mut();
        state.measured.push(level);

        match state.pulses.pop_front() {
            Some(width) if width > 0 && width <= timeout_us => {
                state.now = state.now.wrapping_add(width);
                width
            }
            _ => {
                state.now = state.now.wrapping_add(timeout_us);
                0
            }
        }
    }
}

/// Simulated clock
#[derive(Debug)]
pub struct SimClock {
    state: Rc<RefCell<BusState>>,
}

impl Clock for SimClock {
    fn now_us(&self) -> u32 {
        self.state.borrow().now
    }

    fn delay_us(&mut self, us: u32) {
        let mut state = self.state.borrow_mut();
        state.now = state.now.wrapping_add(us);
    }
}
