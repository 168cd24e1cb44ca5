// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Types boards use to describe what each of their logical pins is wired to.
//!
//! A board keeps one [`PinDescription`] per logical pin number. The entry
//! names the physical pin, the peripheral it is multiplexed to by default,
//! what the pin can be used for, and which ADC, PWM, timer and external
//! interrupt channels reach it.

use crate::port::{PeripheralFunction, Pin, PinConfig};
use crate::tc::{PwmChannel, TimerChannel};

/// How a pin is multiplexed when it is set up for its default role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PioType {
    /// External interrupt controller (function A)
    Extint,
    /// Analog: ADC, DAC, AC, reference (function B)
    Analog,
    /// SERCOM (function C)
    Sercom,
    /// SERCOM alternate (function D)
    SercomAlt,
    /// TC/TCC (function E)
    Timer,
    /// TCC alternate (function F)
    TimerAlt,
    /// USB/I2S (function G)
    Com,
    /// AC/GCLK output (function H)
    AcClk,
    /// Plain digital I/O
    Digital,
    Input,
    InputPullUp,
    Output,
}

impl PioType {
    pub const PWM: PioType = PioType::Timer;
    pub const PWM_ALT: PioType = PioType::TimerAlt;

    /// What the PORT block must be programmed with for this role.
    pub const fn pin_config(self) -> PinConfig {
        match self {
            PioType::Extint => PinConfig::Peripheral(PeripheralFunction::A),
            PioType::Analog => PinConfig::Peripheral(PeripheralFunction::B),
            PioType::Sercom => PinConfig::Peripheral(PeripheralFunction::C),
            PioType::SercomAlt => PinConfig::Peripheral(PeripheralFunction::D),
            PioType::Timer => PinConfig::Peripheral(PeripheralFunction::E),
            PioType::TimerAlt => PinConfig::Peripheral(PeripheralFunction::F),
            PioType::Com => PinConfig::Peripheral(PeripheralFunction::G),
            PioType::AcClk => PinConfig::Peripheral(PeripheralFunction::H),
            PioType::Input => PinConfig::Input,
            PioType::InputPullUp => PinConfig::InputPullUp,
            PioType::Digital | PioType::Output => PinConfig::Output,
        }
    }

    /// The peripheral function, for the multiplexed roles.
    pub const fn function(self) -> Option<PeripheralFunction> {
        match self.pin_config() {
            PinConfig::Peripheral(function) => Some(function),
            _ => None,
        }
    }
}

/// Set of capabilities a pin advertises.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PinAttributes(u32);

impl PinAttributes {
    pub const NONE: PinAttributes = PinAttributes(0);
    pub const COMBO: PinAttributes = PinAttributes(1 << 0);
    pub const ANALOG: PinAttributes = PinAttributes(1 << 1);
    pub const DIGITAL: PinAttributes = PinAttributes(1 << 2);
    pub const PWM: PinAttributes = PinAttributes(1 << 3);
    pub const TIMER: PinAttributes = PinAttributes(1 << 4);
    pub const TIMER_ALT: PinAttributes = PinAttributes(1 << 5);
    pub const EXTINT: PinAttributes = PinAttributes(1 << 6);

    pub const fn union(self, other: PinAttributes) -> PinAttributes {
        PinAttributes(self.0 | other.0)
    }

    /// True if every attribute in `other` is present.
    pub const fn contains(self, other: PinAttributes) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn bits(self) -> u32 {
        self.0
    }
}

/// ADC positive input multiplexer selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AdcChannel {
    AIN0 = 0x00,
    AIN1 = 0x01,
    AIN2 = 0x02,
    AIN3 = 0x03,
    AIN4 = 0x04,
    AIN5 = 0x05,
    AIN6 = 0x06,
    AIN7 = 0x07,
    AIN8 = 0x08,
    AIN9 = 0x09,
    AIN10 = 0x0A,
    AIN11 = 0x0B,
    AIN12 = 0x0C,
    AIN13 = 0x0D,
    AIN14 = 0x0E,
    AIN15 = 0x0F,
    AIN16 = 0x10,
    AIN17 = 0x11,
    AIN18 = 0x12,
    AIN19 = 0x13,
}

/// Analog function routed to a pin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AnalogChannel {
    Adc(AdcChannel),
    /// DAC output (VOUT)
    Dac0,
    /// Internal bandgap reference, ADC MUXPOS 0x19
    Bandgap,
    /// Internal temperature sensor, ADC MUXPOS 0x18
    Temperature,
}

/// External interrupt controller line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ExtInt {
    Ext0 = 0,
    Ext1 = 1,
    Ext2 = 2,
    Ext3 = 3,
    Ext4 = 4,
    Ext5 = 5,
    Ext6 = 6,
    Ext7 = 7,
    Ext8 = 8,
    Ext9 = 9,
    Ext10 = 10,
    Ext11 = 11,
    Ext12 = 12,
    Ext13 = 13,
    Ext14 = 14,
    Ext15 = 15,
    /// Non-maskable interrupt line
    Nmi = 16,
}

impl ExtInt {
    /// EXTINT line number, or `None` for the NMI.
    pub const fn line(self) -> Option<u8> {
        match self {
            ExtInt::Nmi => None,
            line => Some(line as u8),
        }
    }
}

/// One row of a board's pin table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PinDescription {
    pub pin: Pin,
    pub pio: PioType,
    pub attributes: PinAttributes,
    pub analog: Option<AnalogChannel>,
    pub pwm: Option<PwmChannel>,
    pub timer: Option<TimerChannel>,
    pub ext_int: Option<ExtInt>,
}

impl PinDescription {
    pub const fn new(
        pin: Pin,
        pio: PioType,
        attributes: PinAttributes,
        analog: Option<AnalogChannel>,
        pwm: Option<PwmChannel>,
        timer: Option<TimerChannel>,
        ext_int: Option<ExtInt>,
    ) -> PinDescription {
        PinDescription {
            pin,
            pio,
            attributes,
            analog,
            pwm,
            timer,
            ext_int,
        }
    }

    pub const fn has_pwm(&self) -> bool {
        self.pwm.is_some() && self.attributes.contains(PinAttributes::PWM)
    }

    pub const fn is_analog(&self) -> bool {
        self.analog.is_some()
    }

    pub const fn pin_config(&self) -> PinConfig {
        self.pio.pin_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tc::TimerInstance;

    #[test]
    fn mux_roles_map_to_functions_in_order() {
        let roles = [
            PioType::Extint,
            PioType::Analog,
            PioType::Sercom,
            PioType::SercomAlt,
            PioType::Timer,
            PioType::TimerAlt,
            PioType::Com,
            PioType::AcClk,
        ];
        for (i, role) in roles.iter().enumerate() {
            assert_eq!(role.function().map(|f| f as usize), Some(i));
        }
        assert_eq!(PioType::PWM_ALT.function(), Some(PeripheralFunction::F));
    }

    #[test]
    fn gpio_roles() {
        assert_eq!(PioType::Digital.pin_config(), PinConfig::Output);
        assert_eq!(PioType::InputPullUp.pin_config(), PinConfig::InputPullUp);
        assert_eq!(PioType::Input.function(), None);
    }

    #[test]
    fn attribute_sets() {
        let attrs = PinAttributes::DIGITAL.union(PinAttributes::PWM);
        assert!(attrs.contains(PinAttributes::PWM));
        assert!(attrs.contains(PinAttributes::NONE));
        assert!(!attrs.contains(PinAttributes::ANALOG));
        assert_eq!(attrs.bits(), 0b1100);
    }

    #[test]
    fn pwm_needs_channel_and_attribute() {
        let pwm = Some(PwmChannel::new(TimerInstance::TCC0, 1));
        let with = PinDescription::new(
            Pin::PA09,
            PioType::Sercom,
            PinAttributes::DIGITAL.union(PinAttributes::PWM),
            None,
            pwm,
            None,
            Some(ExtInt::Ext9),
        );
        let without = PinDescription {
            attributes: PinAttributes::DIGITAL,
            ..with
        };
        assert!(with.has_pwm());
        assert!(!without.has_pwm());
        assert_eq!(ExtInt::Ext9.line(), Some(9));
        assert_eq!(ExtInt::Nmi.line(), None);
    }
}
