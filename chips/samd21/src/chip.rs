// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral instances shared by every SAMD21 board.

use crate::port::Ports;
use crate::sercom::{Sercom, SercomId};

/// The SERCOM blocks and PORT groups of the chip. Boards build their
/// drivers on top of references into this struct, so it normally lives in a
/// `static_init!` allocation.
pub struct Samd21DefaultPeripherals {
    pub ports: Ports,
    pub sercom0: Sercom,
    pub sercom1: Sercom,
    pub sercom2: Sercom,
    pub sercom3: Sercom,
    pub sercom4: Sercom,
    pub sercom5: Sercom,
}

impl Samd21DefaultPeripherals {
    pub const fn new() -> Self {
        Self {
            ports: Ports::new(),
            sercom0: Sercom::new(SercomId::Sercom0),
            sercom1: Sercom::new(SercomId::Sercom1),
            sercom2: Sercom::new(SercomId::Sercom2),
            sercom3: Sercom::new(SercomId::Sercom3),
            sercom4: Sercom::new(SercomId::Sercom4),
            sercom5: Sercom::new(SercomId::Sercom5),
        }
    }

    pub fn sercom(&self, id: SercomId) -> &Sercom {
        match id {
            SercomId::Sercom0 => &self.sercom0,
            SercomId::Sercom1 => &self.sercom1,
            SercomId::Sercom2 => &self.sercom2,
            SercomId::Sercom3 => &self.sercom3,
            SercomId::Sercom4 => &self.sercom4,
            SercomId::Sercom5 => &self.sercom5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sercom_lookup_matches_field() {
        let peripherals = Samd21DefaultPeripherals::new();
        for id in SercomId::ALL {
            assert_eq!(peripherals.sercom(id).id(), id);
        }
    }
}
