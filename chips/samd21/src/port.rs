// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! PORT controller: pin identifiers and the peripheral multiplexer.
//!
//! Every I/O pin is either driven by the PORT block as a GPIO or handed to
//! one of eight peripheral functions (A-H) through the PMUX registers. The
//! PINCFG.PMUXEN bit selects between the two.

use kernel::utilities::registers::interfaces::{ReadWriteable, Readable, Writeable};
use kernel::utilities::registers::{
    register_bitfields, register_structs, LocalRegisterCopy, ReadWrite,
};
use kernel::utilities::StaticRef;

use crate::sercom::{SercomId, SercomPad};

register_structs! {
    pub PortGroupRegisters {
        (0x00 => _reserved0),
        /// Data direction clear
        (0x04 => dirclr: ReadWrite<u32>),
        /// Data direction set
        (0x08 => dirset: ReadWrite<u32>),
        (0x0C => _reserved1),
        /// Data output value clear
        (0x14 => outclr: ReadWrite<u32>),
        /// Data output value set
        (0x18 => outset: ReadWrite<u32>),
        (0x1C => _reserved2),
        /// Peripheral multiplexing, one nibble per pin
        (0x30 => pmux: [ReadWrite<u8, PMUX::Register>; 16]),
        /// Pin configuration
        (0x40 => pincfg: [ReadWrite<u8, PINCFG::Register>; 32]),
        (0x60 => _reserved3),
        (0x80 => @END),
    }
}

register_bitfields![u8,
    PMUX [
        /// Function for the odd-numbered pin of the pair
        PMUXO OFFSET(4) NUMBITS(4) [],
        /// Function for the even-numbered pin of the pair
        PMUXE OFFSET(0) NUMBITS(4) []
    ],
    PINCFG [
        DRVSTR OFFSET(6) NUMBITS(1) [],
        PULLEN OFFSET(2) NUMBITS(1) [],
        INEN OFFSET(1) NUMBITS(1) [],
        PMUXEN OFFSET(0) NUMBITS(1) []
    ]
];

/// PMUX byte after selecting `function` for pin `number`. Each byte is shared
/// by an even/odd pin pair; the other pin's nibble is preserved.
pub fn pmux_update(current: u8, number: u8, function: PeripheralFunction) -> u8 {
    let mut pmux: LocalRegisterCopy<u8, PMUX::Register> = LocalRegisterCopy::new(current);
    if number & 1 == 1 {
        pmux.modify(PMUX::PMUXO.val(function as u8));
    } else {
        pmux.modify(PMUX::PMUXE.val(function as u8));
    }
    pmux.get()
}

const PORT_BASE: usize = 0x4100_4400;
const PORT_GROUP_STRIDE: usize = 0x80;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Port {
    PortA = 0,
    PortB = 1,
}

/// Physical pin identifiers. The discriminant is `32 * port + number`.
#[rustfmt::skip]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Pin {
    PA00 = 0, PA01 = 1, PA02 = 2, PA03 = 3, PA04 = 4, PA05 = 5, PA06 = 6, PA07 = 7,
    PA08 = 8, PA09 = 9, PA10 = 10, PA11 = 11, PA12 = 12, PA13 = 13, PA14 = 14, PA15 = 15,
    PA16 = 16, PA17 = 17, PA18 = 18, PA19 = 19, PA20 = 20, PA21 = 21, PA22 = 22, PA23 = 23,
    PA24 = 24, PA25 = 25, PA26 = 26, PA27 = 27, PA28 = 28, PA29 = 29, PA30 = 30, PA31 = 31,
    PB00 = 32, PB01 = 33, PB02 = 34, PB03 = 35, PB04 = 36, PB05 = 37, PB06 = 38, PB07 = 39,
    PB08 = 40, PB09 = 41, PB10 = 42, PB11 = 43, PB12 = 44, PB13 = 45, PB14 = 46, PB15 = 47,
    PB16 = 48, PB17 = 49, PB18 = 50, PB19 = 51, PB20 = 52, PB21 = 53, PB22 = 54, PB23 = 55,
    PB24 = 56, PB25 = 57, PB26 = 58, PB27 = 59, PB28 = 60, PB29 = 61, PB30 = 62, PB31 = 63,
}

impl Pin {
    pub const fn port(self) -> Port {
        if (self as u8) < 32 {
            Port::PortA
        } else {
            Port::PortB
        }
    }

    /// Pin number within its port group, 0-31.
    pub const fn number(self) -> u8 {
        self as u8 % 32
    }

    /// The SERCOM instance and pad this pin reaches when multiplexed to
    /// `function`. Only functions C (SERCOM) and D (SERCOM-ALT) route to a
    /// SERCOM.
    pub fn sercom_pad(self, function: PeripheralFunction) -> Option<(SercomId, SercomPad)> {
        use PeripheralFunction::{C, D};
        use SercomId::*;
        use SercomPad::*;

        let route = match (function, self) {
            (C, Pin::PA08) => (Sercom0, Pad0),
            (C, Pin::PA09) => (Sercom0, Pad1),
            (C, Pin::PA10) => (Sercom0, Pad2),
            (C, Pin::PA11) => (Sercom0, Pad3),
            (C, Pin::PA12) => (Sercom2, Pad0),
            (C, Pin::PA13) => (Sercom2, Pad1),
            (C, Pin::PA14) => (Sercom2, Pad2),
            (C, Pin::PA15) => (Sercom2, Pad3),
            (C, Pin::PA16) => (Sercom1, Pad0),
            (C, Pin::PA17) => (Sercom1, Pad1),
            (C, Pin::PA18) => (Sercom1, Pad2),
            (C, Pin::PA19) => (Sercom1, Pad3),
            (C, Pin::PA20) => (Sercom5, Pad2),
            (C, Pin::PA21) => (Sercom5, Pad3),
            (C, Pin::PA22) => (Sercom3, Pad0),
            (C, Pin::PA23) => (Sercom3, Pad1),
            (C, Pin::PA24) => (Sercom3, Pad2),
            (C, Pin::PA25) => (Sercom3, Pad3),
            (C, Pin::PB12) => (Sercom4, Pad0),
            (C, Pin::PB13) => (Sercom4, Pad1),
            (C, Pin::PB14) => (Sercom4, Pad2),
            (C, Pin::PB15) => (Sercom4, Pad3),
            (C, Pin::PB16) => (Sercom5, Pad0),
            (C, Pin::PB17) => (Sercom5, Pad1),

            (D, Pin::PA00) => (Sercom1, Pad0),
            (D, Pin::PA01) => (Sercom1, Pad1),
            (D, Pin::PA04) => (Sercom0, Pad0),
            (D, Pin::PA05) => (Sercom0, Pad1),
            (D, Pin::PA06) => (Sercom0, Pad2),
            (D, Pin::PA07) => (Sercom0, Pad3),
            (D, Pin::PA08) => (Sercom2, Pad0),
            (D, Pin::PA09) => (Sercom2, Pad1),
            (D, Pin::PA10) => (Sercom2, Pad2),
            (D, Pin::PA11) => (Sercom2, Pad3),
            (D, Pin::PA12) => (Sercom4, Pad0),
            (D, Pin::PA13) => (Sercom4, Pad1),
            (D, Pin::PA14) => (Sercom4, Pad2),
            (D, Pin::PA15) => (Sercom4, Pad3),
            (D, Pin::PA16) => (Sercom3, Pad0),
            (D, Pin::PA17) => (Sercom3, Pad1),
            (D, Pin::PA18) => (Sercom3, Pad2),
            (D, Pin::PA19) => (Sercom3, Pad3),
            (D, Pin::PA20) => (Sercom3, Pad2),
            (D, Pin::PA21) => (Sercom3, Pad3),
            (D, Pin::PA22) => (Sercom5, Pad0),
            (D, Pin::PA23) => (Sercom5, Pad1),
            (D, Pin::PA24) => (Sercom5, Pad2),
            (D, Pin::PA25) => (Sercom5, Pad3),
            (D, Pin::PA30) => (Sercom1, Pad2),
            (D, Pin::PA31) => (Sercom1, Pad3),
            (D, Pin::PB02) => (Sercom5, Pad0),
            (D, Pin::PB03) => (Sercom5, Pad1),
            (D, Pin::PB08) => (Sercom4, Pad0),
            (D, Pin::PB09) => (Sercom4, Pad1),
            (D, Pin::PB10) => (Sercom4, Pad2),
            (D, Pin::PB11) => (Sercom4, Pad3),
            (D, Pin::PB22) => (Sercom5, Pad2),
            (D, Pin::PB23) => (Sercom5, Pad3),
            (D, Pin::PB30) => (Sercom5, Pad0),
            (D, Pin::PB31) => (Sercom5, Pad1),

            _ => return None,
        };
        Some(route)
    }
}

/// Peripheral function selected through PMUX.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PeripheralFunction {
    /// EIC
    A = 0,
    /// REF, ADC, AC, DAC
    B = 1,
    /// SERCOM
    C = 2,
    /// SERCOM-ALT
    D = 3,
    /// TC/TCC
    E = 4,
    /// TCC
    F = 5,
    /// COM (USB, I2S)
    G = 6,
    /// AC/GCLK
    H = 7,
}

/// How a single pin should be programmed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PinConfig {
    /// Hand the pin to a peripheral.
    Peripheral(PeripheralFunction),
    /// GPIO input with the input buffer enabled.
    Input,
    /// GPIO input with the internal pull-up enabled.
    InputPullUp,
    /// GPIO output. The input buffer stays on so the level can be read back.
    Output,
}

pub struct PortGroup {
    registers: StaticRef<PortGroupRegisters>,
}

impl PortGroup {
    pub const fn new(port: Port) -> PortGroup {
        PortGroup {
            registers: unsafe {
                StaticRef::new(
                    (PORT_BASE + PORT_GROUP_STRIDE * port as usize) as *const PortGroupRegisters,
                )
            },
        }
    }

    /// Program pin `number` of this group.
    pub fn apply(&self, number: u8, config: PinConfig) {
        let regs = self.registers;
        let n = number as usize;
        let mask = 1u32 << number;

        match config {
            PinConfig::Peripheral(function) => {
                let pmux = &regs.pmux[n >> 1];
                pmux.set(pmux_update(pmux.get(), number, function));
                regs.pincfg[n].modify(PINCFG::PMUXEN::SET);
            }
            PinConfig::Input => {
                regs.pincfg[n].write(PINCFG::INEN::SET);
                regs.dirclr.set(mask);
            }
            PinConfig::InputPullUp => {
                regs.pincfg[n].write(PINCFG::INEN::SET + PINCFG::PULLEN::SET);
                regs.dirclr.set(mask);
                // With PULLEN set, OUT selects pull-up over pull-down.
                regs.outset.set(mask);
            }
            PinConfig::Output => {
                regs.pincfg[n].write(PINCFG::INEN::SET);
                regs.dirset.set(mask);
            }
        }
    }

    /// Drive an output pin high or low.
    pub fn set_level(&self, number: u8, high: bool) {
        let mask = 1u32 << number;
        if high {
            self.registers.outset.set(mask);
        } else {
            self.registers.outclr.set(mask);
        }
    }
}

/// Both PORT groups of the SAMD21.
pub struct Ports {
    pa: PortGroup,
    pb: PortGroup,
}

impl Ports {
    pub const fn new() -> Ports {
        Ports {
            pa: PortGroup::new(Port::PortA),
            pb: PortGroup::new(Port::PortB),
        }
    }

    pub fn group(&self, port: Port) -> &PortGroup {
        match port {
            Port::PortA => &self.pa,
            Port::PortB => &self.pb,
        }
    }

    pub fn configure(&self, pin: Pin, config: PinConfig) {
        self.group(pin.port()).apply(pin.number(), config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_encoding() {
        assert_eq!(Pin::PA00.port(), Port::PortA);
        assert_eq!(Pin::PA31.number(), 31);
        assert_eq!(Pin::PB00.port(), Port::PortB);
        assert_eq!(Pin::PB00.number(), 0);
        assert_eq!(Pin::PB17.number(), 17);
    }

    #[test]
    fn sercom_routes_depend_on_function() {
        assert_eq!(
            Pin::PA13.sercom_pad(PeripheralFunction::C),
            Some((SercomId::Sercom2, SercomPad::Pad1))
        );
        assert_eq!(
            Pin::PA13.sercom_pad(PeripheralFunction::D),
            Some((SercomId::Sercom4, SercomPad::Pad1))
        );
        // PA02 carries the ADC/DAC only.
        assert_eq!(Pin::PA02.sercom_pad(PeripheralFunction::C), None);
        assert_eq!(Pin::PA08.sercom_pad(PeripheralFunction::E), None);
    }

    #[test]
    fn pmux_keeps_neighbour_nibble() {
        assert_eq!(pmux_update(0x00, 8, PeripheralFunction::C), 0x02);
        assert_eq!(pmux_update(0x02, 9, PeripheralFunction::C), 0x22);
        assert_eq!(pmux_update(0x22, 14, PeripheralFunction::D), 0x23);
        assert_eq!(pmux_update(0x23, 15, PeripheralFunction::H), 0x73);
    }

    #[test]
    fn port_groups_are_0x80_apart() {
        let ports = Ports::new();
        assert_eq!(ports.group(Port::PortA).registers.address(), 0x4100_4400);
        assert_eq!(ports.group(Port::PortB).registers.address(), 0x4100_4480);
    }
}
