// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! The board's UARTs and the SERCOM interrupt routing to them.

use kernel::debug;
use kernel::platform::chip::InterruptService;
use samd21::chip::Samd21DefaultPeripherals;
use samd21::pin_description::PinDescription;
use samd21::port::Ports;
use samd21::sercom::{RxPad, SercomId, SercomPad, TxPad};
use samd21::uart::Uart;

use crate::variant;

/// Wiring of one UART: its pins, SERCOM instance and pad assignment.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SerialPort {
    pub rx_pin: usize,
    pub tx_pin: usize,
    pub sercom: SercomId,
    pub rx_pad: RxPad,
    pub tx_pad: TxPad,
}

impl SerialPort {
    /// A UART driver for this port on `peripherals`.
    pub fn uart<'a>(&self, peripherals: &'a Samd21DefaultPeripherals) -> Uart<'a> {
        Uart::new(peripherals.sercom(self.sercom), self.rx_pad, self.tx_pad)
    }
}

pub const SERIAL0: SerialPort = SerialPort {
    rx_pin: variant::PIN_SERIAL0_RX,
    tx_pin: variant::PIN_SERIAL0_TX,
    sercom: SercomId::Sercom0,
    rx_pad: SercomPad::Pad1,
    tx_pad: TxPad::Pad0,
};

pub const SERIAL1: SerialPort = SerialPort {
    rx_pin: variant::PIN_SERIAL1_RX,
    tx_pin: variant::PIN_SERIAL1_TX,
    sercom: SercomId::Sercom1,
    rx_pad: SercomPad::Pad1,
    tx_pad: TxPad::Pad0,
};

pub const SERIAL2: SerialPort = SerialPort {
    rx_pin: variant::PIN_SERIAL2_RX,
    tx_pin: variant::PIN_SERIAL2_TX,
    sercom: SercomId::Sercom2,
    rx_pad: SercomPad::Pad1,
    tx_pad: TxPad::Pad0,
};

pub const SERIAL4: SerialPort = SerialPort {
    rx_pin: variant::PIN_SERIAL4_RX,
    tx_pin: variant::PIN_SERIAL4_TX,
    sercom: SercomId::Sercom4,
    rx_pad: SercomPad::Pad3,
    tx_pad: TxPad::Pad2,
};

pub const SERIAL_PORTS: [SerialPort; 4] = [SERIAL0, SERIAL1, SERIAL2, SERIAL4];

/// The UART objects of the board. SERCOM3 and SERCOM5 carry no UART.
pub struct BoardSerials<'a> {
    pub serial0: Uart<'a>,
    pub serial1: Uart<'a>,
    pub serial2: Uart<'a>,
    pub serial4: Uart<'a>,
}

impl<'a> BoardSerials<'a> {
    pub fn new(peripherals: &'a Samd21DefaultPeripherals) -> Self {
        Self {
            serial0: SERIAL0.uart(peripherals),
            serial1: SERIAL1.uart(peripherals),
            serial2: SERIAL2.uart(peripherals),
            serial4: SERIAL4.uart(peripherals),
        }
    }

    /// The UART serviced by NVIC line `interrupt`, if any.
    pub fn uart_for(&self, interrupt: u32) -> Option<&Uart<'a>> {
        match SercomId::from_interrupt(interrupt)? {
            SercomId::Sercom0 => Some(&self.serial0),
            SercomId::Sercom1 => Some(&self.serial1),
            SercomId::Sercom2 => Some(&self.serial2),
            SercomId::Sercom4 => Some(&self.serial4),
            SercomId::Sercom3 | SercomId::Sercom5 => None,
        }
    }
}

impl InterruptService for BoardSerials<'_> {
    unsafe fn service_interrupt(&self, interrupt: u32) -> bool {
        match self.uart_for(interrupt) {
            Some(uart) => {
                uart.handle_interrupt();
                true
            }
            None => false,
        }
    }
}

/// Every serial pin, RX before TX, with its row of the pin table.
pub fn serial_pins() -> impl Iterator<Item = (usize, &'static PinDescription)> {
    SERIAL_PORTS
        .iter()
        .flat_map(|port| [port.rx_pin, port.tx_pin])
        .filter_map(|pin| variant::pin_description(pin).map(|desc| (pin, desc)))
}

/// Hand every serial pin to its SERCOM as the pin table describes.
pub fn configure_serial_pins(ports: &Ports) {
    for (_, desc) in serial_pins() {
        ports.configure(desc.pin, desc.pin_config());
    }
}

/// Log the multiplexing `configure_serial_pins` applied. Only useful once a
/// debug writer is registered.
pub fn trace_serial_pins() {
    for (pin, desc) in serial_pins() {
        debug!("pin {} ({:?}) -> {:?}", pin, desc.pin, desc.pio);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use samd21::pin_description::PioType;
    use samd21::port::Pin;

    #[test]
    fn serial_pins_in_port_order() {
        let mut pins = [0usize; 8];
        let mut count = 0;
        for (i, (pin, _)) in serial_pins().enumerate() {
            pins[i] = pin;
            count += 1;
        }
        assert_eq!(count, 8);
        assert_eq!(pins, [0, 1, 3, 2, 5, 4, 7, 6]);
    }

    #[test]
    fn serial_pins_carry_their_table_rows() {
        for (pin, desc) in serial_pins() {
            assert_eq!(desc, &variant::PIN_DESCRIPTIONS[pin]);
        }
        let (_, serial4_rx) = serial_pins().nth(6).unwrap();
        assert_eq!(serial4_rx.pin, Pin::PA15);
        assert_eq!(serial4_rx.pio, PioType::SercomAlt);
    }
}
