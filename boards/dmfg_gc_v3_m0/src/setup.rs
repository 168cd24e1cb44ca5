// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Board initialization.

use kernel::hil::uart::Configure;
use kernel::{debug, static_init};
use samd21::chip::Samd21DefaultPeripherals;
use samd21::pin_description::PinDescription;
use samd21::port::{PinConfig, Ports};

use crate::config::CONFIG;
use crate::io;
use crate::serial::{self, BoardSerials};
use crate::variant;

fn led_off(ports: &Ports, led: &PinDescription) {
    ports.configure(led.pin, PinConfig::Output);
    ports
        .group(led.pin.port())
        .set_level(led.pin.number(), false);
}

/// Allocate the board's peripherals and UARTs, multiplex the serial pins and
/// bring up the Serial0 console.
///
/// The returned [`BoardSerials`] is what the interrupt bottom half passes
/// NVIC lines to.
///
/// # Safety
///
/// Must be called exactly once, before interrupts are enabled.
pub unsafe fn start() -> &'static BoardSerials<'static> {
    let peripherals = static_init!(Samd21DefaultPeripherals, Samd21DefaultPeripherals::new());
    let peripherals: &'static Samd21DefaultPeripherals = peripherals;

    serial::configure_serial_pins(&peripherals.ports);
    if let Some(led) = variant::pin_description(variant::LED_BUILTIN) {
        led_off(&peripherals.ports, led);
    }

    let serials = static_init!(BoardSerials<'static>, BoardSerials::new(peripherals));
    let serials: &'static BoardSerials<'static> = serials;

    let console_ready = serials.serial0.configure(CONFIG.console);

    let writer = static_init!(io::Writer<'static>, io::Writer::new(&serials.serial0));
    kernel::debug::set_debug_writer(writer);

    if CONFIG.trace_pin_setup {
        serial::trace_serial_pins();
    }

    match console_ready {
        Ok(()) => debug!(
            "dmfg_gc_v3_m0: console on SERCOM0 at {} baud",
            CONFIG.console.baud_rate
        ),
        Err(e) => debug!("dmfg_gc_v3_m0: console configuration failed: {:?}", e),
    }

    serials
}
