// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Consistency checks between the pin table, the serial wiring and the chip's
//! multiplexing tables. None of these touch MMIO.

use dmfg_gc_v3_m0::serial::{BoardSerials, SERIAL_PORTS};
use dmfg_gc_v3_m0::variant::{self, PINS_COUNT, PIN_DESCRIPTIONS};
use kernel::platform::chip::InterruptService;
use samd21::chip::Samd21DefaultPeripherals;
use samd21::interrupts;
use samd21::pin_description::{ExtInt, PinAttributes};
use samd21::port::Pin;
use samd21::sercom::SercomId;

#[test]
fn table_covers_every_logical_pin() {
    assert_eq!(PIN_DESCRIPTIONS.len(), PINS_COUNT);
    assert_eq!(variant::PIN_DAC0, PINS_COUNT - 2);
}

#[test]
fn serial_pins_reach_their_sercom_pads() {
    for port in SERIAL_PORTS.iter() {
        let rx = &PIN_DESCRIPTIONS[port.rx_pin];
        let tx = &PIN_DESCRIPTIONS[port.tx_pin];

        let rx_function = rx.pio.function().unwrap();
        let tx_function = tx.pio.function().unwrap();

        assert_eq!(
            rx.pin.sercom_pad(rx_function),
            Some((port.sercom, port.rx_pad)),
            "{:?} RX",
            port.sercom
        );
        assert_eq!(
            tx.pin.sercom_pad(tx_function),
            Some((port.sercom, port.tx_pad.data_pad())),
            "{:?} TX",
            port.sercom
        );
    }
}

#[test]
fn external_interrupt_lines_follow_pin_numbers() {
    for (n, desc) in PIN_DESCRIPTIONS.iter().enumerate() {
        match desc.ext_int {
            Some(ExtInt::Nmi) => assert_eq!(desc.pin, Pin::PA08, "pin {}", n),
            Some(line) => assert_eq!(
                line.line(),
                Some(desc.pin.number() % 16),
                "pin {}",
                n
            ),
            None => {}
        }
    }
}

#[test]
fn timer_channels_exist_on_their_instances() {
    for (n, desc) in PIN_DESCRIPTIONS.iter().enumerate() {
        if let Some(pwm) = desc.pwm {
            assert!(pwm.is_valid(), "pin {}", n);
            assert!(desc.attributes.contains(PinAttributes::PWM), "pin {}", n);
        }
        if let Some(timer) = desc.timer {
            assert!(timer.is_valid(), "pin {}", n);
            assert!(
                desc.attributes.contains(PinAttributes::TIMER)
                    || desc.attributes.contains(PinAttributes::TIMER_ALT),
                "pin {}",
                n
            );
        }
    }
}

#[test]
fn sercom_lines_route_to_the_uart_built_on_them() {
    let peripherals = Samd21DefaultPeripherals::new();
    let serials = BoardSerials::new(&peripherals);

    for id in [
        SercomId::Sercom0,
        SercomId::Sercom1,
        SercomId::Sercom2,
        SercomId::Sercom4,
    ] {
        let uart = serials.uart_for(id.interrupt()).unwrap();
        assert_eq!(uart.sercom().id(), id);
    }

    assert!(serials.uart_for(interrupts::SERCOM3).is_none());
    assert!(serials.uart_for(interrupts::SERCOM5).is_none());
    assert!(serials.uart_for(interrupts::TC3).is_none());
}

#[test]
fn unhandled_lines_are_refused() {
    let peripherals = Samd21DefaultPeripherals::new();
    let serials = BoardSerials::new(&peripherals);

    for irq in [
        interrupts::SERCOM3,
        interrupts::SERCOM5,
        interrupts::TCC0,
        interrupts::ADC,
    ] {
        assert!(!unsafe { serials.service_interrupt(irq) });
    }
}

#[test]
fn serial4_uses_alternate_routing() {
    let peripherals = Samd21DefaultPeripherals::new();
    let serials = BoardSerials::new(&peripherals);
    let (rx_pad, tx_pad) = serials.serial4.pads();
    assert_eq!(
        PIN_DESCRIPTIONS[variant::PIN_SERIAL4_RX].pin.sercom_pad(
            PIN_DESCRIPTIONS[variant::PIN_SERIAL4_RX].pio.function().unwrap()
        ),
        Some((SercomId::Sercom4, rx_pad))
    );
    assert_eq!(
        PIN_DESCRIPTIONS[variant::PIN_SERIAL4_TX].pin,
        Pin::PA14
    );
    assert_eq!(tx_pad.data_pad(), samd21::sercom::SercomPad::Pad2);
}
