// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Serial communication interface (SERCOM) instances.
//!
//! The SAMD21 has six identical SERCOM blocks. Each can run as a USART, SPI
//! or I2C controller; the mode-specific driver (see [`crate::uart`]) overlays
//! its register view on the instance. A SERCOM exposes four pads which the
//! PORT multiplexer connects to physical pins.

use kernel::utilities::StaticRef;
use kernel::ErrorCode;

use crate::interrupts;
use crate::uart::UsartRegisters;

const SERCOM_BASE: usize = 0x4200_0800;
const SERCOM_STRIDE: usize = 0x400;

/// Reference clock feeding every SERCOM core clock.
pub const SERCOM_FREQ_REF: u32 = 48_000_000;

/// Oversampling used for asynchronous USART operation.
const SAMPLES_PER_BIT: u64 = 16;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SercomId {
    Sercom0 = 0,
    Sercom1 = 1,
    Sercom2 = 2,
    Sercom3 = 3,
    Sercom4 = 4,
    Sercom5 = 5,
}

impl SercomId {
    pub const ALL: [SercomId; 6] = [
        SercomId::Sercom0,
        SercomId::Sercom1,
        SercomId::Sercom2,
        SercomId::Sercom3,
        SercomId::Sercom4,
        SercomId::Sercom5,
    ];

    pub const fn base_address(self) -> usize {
        SERCOM_BASE + SERCOM_STRIDE * self as usize
    }

    /// NVIC line of this instance.
    pub const fn interrupt(self) -> u32 {
        interrupts::SERCOM0 + self as u32
    }

    pub fn from_interrupt(interrupt: u32) -> Option<SercomId> {
        match interrupt {
            interrupts::SERCOM0 => Some(SercomId::Sercom0),
            interrupts::SERCOM1 => Some(SercomId::Sercom1),
            interrupts::SERCOM2 => Some(SercomId::Sercom2),
            interrupts::SERCOM3 => Some(SercomId::Sercom3),
            interrupts::SERCOM4 => Some(SercomId::Sercom4),
            interrupts::SERCOM5 => Some(SercomId::Sercom5),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SercomPad {
    Pad0 = 0,
    Pad1 = 1,
    Pad2 = 2,
    Pad3 = 3,
}

/// Receive data pad. The CTRLA.RXPO encoding is the pad number.
pub type RxPad = SercomPad;

/// Transmit pad options, encoded as CTRLA.TXPO.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TxPad {
    /// TxD on pad 0, XCK on pad 1
    Pad0 = 0,
    /// TxD on pad 2, XCK on pad 3
    Pad2 = 1,
    /// TxD on pad 0, RTS on pad 2, CTS on pad 3
    Pad0RtsCtsPad2Pad3 = 2,
}

impl TxPad {
    /// The pad that carries transmit data.
    pub const fn data_pad(self) -> SercomPad {
        match self {
            TxPad::Pad0 | TxPad::Pad0RtsCtsPad2Pad3 => SercomPad::Pad0,
            TxPad::Pad2 => SercomPad::Pad2,
        }
    }
}

/// BAUD register value for asynchronous arithmetic mode with 16x
/// oversampling: `65536 * (1 - 16 * baud / fref)`.
pub fn baud_register(baud_rate: u32, fref: u32) -> Result<u16, ErrorCode> {
    let fref = fref as u64;
    let scaled = SAMPLES_PER_BIT * baud_rate as u64;
    if baud_rate == 0 || scaled > fref {
        return Err(ErrorCode::INVAL);
    }
    let ratio = (65536 * scaled) / fref;
    Ok((65536 - ratio) as u16)
}

/// One SERCOM block.
pub struct Sercom {
    id: SercomId,
    registers: StaticRef<UsartRegisters>,
}

impl Sercom {
    pub const fn new(id: SercomId) -> Sercom {
        Sercom {
            id,
            registers: unsafe { StaticRef::new(id.base_address() as *const UsartRegisters) },
        }
    }

    pub fn id(&self) -> SercomId {
        self.id
    }

    /// USART view of this instance's registers.
    pub(crate) fn usart_registers(&self) -> StaticRef<UsartRegisters> {
        self.registers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_addresses_and_lines() {
        assert_eq!(SercomId::Sercom0.base_address(), 0x4200_0800);
        assert_eq!(SercomId::Sercom5.base_address(), 0x4200_1C00);
        assert_eq!(SercomId::Sercom3.interrupt(), 12);
        for id in SercomId::ALL {
            assert_eq!(SercomId::from_interrupt(id.interrupt()), Some(id));
        }
        assert_eq!(SercomId::from_interrupt(interrupts::TCC0), None);
    }

    #[test]
    fn baud_values_at_48mhz() {
        assert_eq!(baud_register(115_200, SERCOM_FREQ_REF), Ok(63020));
        assert_eq!(baud_register(9600, SERCOM_FREQ_REF), Ok(65327));
        assert_eq!(baud_register(1_000_000, SERCOM_FREQ_REF), Ok(43691));
    }

    #[test]
    fn baud_out_of_range() {
        assert_eq!(baud_register(0, SERCOM_FREQ_REF), Err(ErrorCode::INVAL));
        assert_eq!(baud_register(SERCOM_FREQ_REF / 16, SERCOM_FREQ_REF), Ok(0));
        assert_eq!(
            baud_register(SERCOM_FREQ_REF / 16 + 1, SERCOM_FREQ_REF),
            Err(ErrorCode::INVAL)
        );
    }

    #[test]
    fn tx_pad_data_pad() {
        assert_eq!(TxPad::Pad2.data_pad(), SercomPad::Pad2);
        assert_eq!(TxPad::Pad0RtsCtsPad2Pad3.data_pad(), SercomPad::Pad0);
    }
}
