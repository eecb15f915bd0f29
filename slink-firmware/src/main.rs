//! Slink - S-Link controller firmware
//!
//! Demo firmware for RP2040 boards wired to a Sony S-Link / Control-A1 bus.
//! GPIO15 drives the bus through an NPN transistor, GPIO14 reads it back.
//!
//! On boot the deck is powered on and its disc title written; after that
//! the firmware only listens and dumps bus traffic to the defmt log.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use slink_core::{LinkConfig, PulseKind, Slink};
use slink_drivers::MdDeck;
use slink_hal_rp2040::{BusInput, BusOutput, EmbassyClock};
use slink_protocol::{MonitorMode, Trace};

/// Title written on boot
const DISC_TITLE: &[u8] = b"Slink";

/// Length of one monitor window
const MONITOR_WINDOW_US: u32 = 1_000_000;

/// Trace events kept per monitor window
const TRACE_CAPACITY: usize = 64;

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Slink firmware starting...");

    let p = embassy_rp::init(Default::default());

    let config = LinkConfig::new(14, 15);
    if let Err(e) = config.validate() {
        error!("Invalid link config: {:?}", e);
        return;
    }

    let output = BusOutput::new(p.PIN_15);
    let input = BusInput::new(p.PIN_14);
    let link = Slink::new(output, input, EmbassyClock::new(), config);
    let mut deck = MdDeck::new(link);
    info!(
        "S-Link ready: in=GPIO{} out=GPIO{}",
        config.in_pin(),
        config.out_pin()
    );

    // Decks ignore the bus for a moment after the interface appears
    Timer::after_millis(500).await;

    deck.power_on();
    match deck.write_disc_title(DISC_TITLE) {
        Ok(()) => info!("Disc title written"),
        Err(e) => warn!("Disc title failed: {:?}", e),
    }

    let mut trace = Trace::<TRACE_CAPACITY>::new();
    loop {
        trace.clear();
        deck.link().monitor(
            MonitorMode::Bytes,
            PulseKind::Mark,
            MONITOR_WINDOW_US,
            &mut trace,
        );

        // A window with nothing but silence is a single gap
        if trace.events().len() > 1 {
            info!("bus: {}", trace.events());
        }
        if trace.dropped() > 0 {
            warn!("{} trace events dropped", trace.dropped());
        }

        Timer::after_millis(1).await;
    }
}
