// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Logical pin table of the board.
//!
//! Index `n` of [`PIN_DESCRIPTIONS`] describes logical pin `n`. Several
//! logical pins share a physical pin: PA02 is both A0 and the DAC output,
//! PA03 is both A1 and AREF, and PA13 appears a second time with its SERCOM4
//! alternate routing.

use samd21::pin_description::{
    AdcChannel, AnalogChannel, ExtInt, PinAttributes, PinDescription, PioType,
};
use samd21::port::Pin;
use samd21::tc::{PwmChannel, TimerChannel, TimerInstance};

const DIGITAL_PWM_TIMER: PinAttributes = PinAttributes::DIGITAL
    .union(PinAttributes::PWM)
    .union(PinAttributes::TIMER);
const DIGITAL_PWM_TIMER_ALT: PinAttributes = PinAttributes::DIGITAL
    .union(PinAttributes::PWM)
    .union(PinAttributes::TIMER_ALT);
const DIGITAL_PWM: PinAttributes = PinAttributes::DIGITAL.union(PinAttributes::PWM);
const DIGITAL_ANALOG: PinAttributes = PinAttributes::DIGITAL.union(PinAttributes::ANALOG);

pub const PINS_COUNT: usize = 23;

pub const PIN_SERIAL0_RX: usize = 0;
pub const PIN_SERIAL0_TX: usize = 1;
pub const PIN_SERIAL1_TX: usize = 2;
pub const PIN_SERIAL1_RX: usize = 3;
pub const PIN_SERIAL2_TX: usize = 4;
pub const PIN_SERIAL2_RX: usize = 5;
pub const PIN_SERIAL4_TX: usize = 6;
pub const PIN_SERIAL4_RX: usize = 7;

pub const PIN_WIRE_SDA: usize = 8;
pub const PIN_WIRE_SCL: usize = 9;

pub const PIN_LED: usize = 10;
pub const LED_BUILTIN: usize = PIN_LED;

pub const PIN_A0: usize = 13;
pub const PIN_A1: usize = 14;
pub const PIN_A2: usize = 15;
pub const PIN_A3: usize = 16;
pub const NUM_ANALOG_INPUTS: usize = 4;

pub const PIN_USB_HOST_ENABLE: usize = 17;
pub const PIN_USB_DM: usize = 18;
pub const PIN_USB_DP: usize = 19;

pub const PIN_AREF: usize = 20;
pub const PIN_DAC0: usize = 21;

pub static PIN_DESCRIPTIONS: [PinDescription; PINS_COUNT] = [
    // 0..1: Serial0 RX, TX
    PinDescription::new(
        Pin::PA09,
        PioType::Sercom,
        DIGITAL_PWM_TIMER,
        None,
        Some(PwmChannel::new(TimerInstance::TCC0, 1)),
        Some(TimerChannel::new(TimerInstance::TCC0, 1)),
        Some(ExtInt::Ext9),
    ),
    PinDescription::new(
        Pin::PA08,
        PioType::Sercom,
        DIGITAL_PWM_TIMER,
        None,
        Some(PwmChannel::new(TimerInstance::TCC0, 0)),
        Some(TimerChannel::new(TimerInstance::TCC0, 0)),
        Some(ExtInt::Nmi),
    ),
    // 2..3: Serial1 TX, RX
    PinDescription::new(
        Pin::PA16,
        PioType::Sercom,
        DIGITAL_PWM_TIMER,
        None,
        Some(PwmChannel::new(TimerInstance::TCC2, 0)),
        Some(TimerChannel::new(TimerInstance::TCC2, 0)),
        Some(ExtInt::Ext0),
    ),
    PinDescription::new(
        Pin::PA17,
        PioType::Sercom,
        DIGITAL_PWM_TIMER,
        None,
        Some(PwmChannel::new(TimerInstance::TCC2, 1)),
        Some(TimerChannel::new(TimerInstance::TCC2, 1)),
        Some(ExtInt::Ext1),
    ),
    // 4..5: Serial2 TX, RX
    PinDescription::new(
        Pin::PA12,
        PioType::Sercom,
        PinAttributes::DIGITAL,
        None,
        None,
        None,
        Some(ExtInt::Ext12),
    ),
    PinDescription::new(
        Pin::PA13,
        PioType::Sercom,
        DIGITAL_PWM,
        None,
        Some(PwmChannel::new(TimerInstance::TCC0, 5)),
        None,
        Some(ExtInt::Ext13),
    ),
    // 6..7: Serial4 TX, RX
    PinDescription::new(
        Pin::PA14,
        PioType::SercomAlt,
        PinAttributes::DIGITAL,
        None,
        None,
        None,
        Some(ExtInt::Ext14),
    ),
    PinDescription::new(
        Pin::PA15,
        PioType::SercomAlt,
        DIGITAL_PWM_TIMER,
        None,
        Some(PwmChannel::new(TimerInstance::TC3, 1)),
        Some(TimerChannel::new(TimerInstance::TC3, 1)),
        Some(ExtInt::Ext15),
    ),
    // 8..9: Wire SDA, SCL
    PinDescription::new(
        Pin::PA22,
        PioType::Sercom,
        PinAttributes::DIGITAL,
        None,
        None,
        None,
        Some(ExtInt::Ext6),
    ),
    PinDescription::new(
        Pin::PA23,
        PioType::Sercom,
        PinAttributes::DIGITAL,
        None,
        None,
        None,
        Some(ExtInt::Ext7),
    ),
    // 10: LED
    PinDescription::new(
        Pin::PA10,
        PioType::Analog,
        DIGITAL_ANALOG,
        Some(AnalogChannel::Adc(AdcChannel::AIN18)),
        None,
        None,
        Some(ExtInt::Ext10),
    ),
    // 11..12: timer outputs
    PinDescription::new(
        Pin::PA18,
        PioType::PWM,
        DIGITAL_PWM_TIMER,
        None,
        Some(PwmChannel::new(TimerInstance::TC3, 0)),
        Some(TimerChannel::new(TimerInstance::TC3, 0)),
        Some(ExtInt::Ext2),
    ),
    PinDescription::new(
        Pin::PA19,
        PioType::PWM_ALT,
        DIGITAL_PWM_TIMER_ALT,
        None,
        Some(PwmChannel::new(TimerInstance::TCC0, 3)),
        Some(TimerChannel::new(TimerInstance::TCC0, 3)),
        Some(ExtInt::Ext3),
    ),
    // 13..16: A0..A3
    PinDescription::new(
        Pin::PA02,
        PioType::Analog,
        PinAttributes::ANALOG,
        Some(AnalogChannel::Adc(AdcChannel::AIN0)),
        None,
        None,
        Some(ExtInt::Ext2),
    ),
    PinDescription::new(
        Pin::PA03,
        PioType::Analog,
        PinAttributes::ANALOG,
        None,
        None,
        None,
        None,
    ),
    PinDescription::new(
        Pin::PA04,
        PioType::Analog,
        PinAttributes::NONE,
        Some(AnalogChannel::Adc(AdcChannel::AIN4)),
        None,
        None,
        Some(ExtInt::Ext4),
    ),
    PinDescription::new(
        Pin::PA05,
        PioType::Analog,
        PinAttributes::NONE,
        Some(AnalogChannel::Adc(AdcChannel::AIN5)),
        None,
        None,
        Some(ExtInt::Ext5),
    ),
    // 17..19: USB host enable, D-, D+
    PinDescription::new(
        Pin::PA28,
        PioType::Com,
        PinAttributes::NONE,
        None,
        None,
        None,
        None,
    ),
    PinDescription::new(
        Pin::PA24,
        PioType::Com,
        PinAttributes::NONE,
        None,
        None,
        None,
        None,
    ),
    PinDescription::new(
        Pin::PA25,
        PioType::Com,
        PinAttributes::NONE,
        None,
        None,
        None,
        None,
    ),
    // 20: AREF
    PinDescription::new(
        Pin::PA03,
        PioType::Analog,
        PinAttributes::ANALOG,
        None,
        None,
        None,
        None,
    ),
    // 21: DAC VOUT
    PinDescription::new(
        Pin::PA02,
        PioType::Analog,
        PinAttributes::ANALOG,
        Some(AnalogChannel::Dac0),
        None,
        None,
        Some(ExtInt::Ext2),
    ),
    // 22: PA13 on SERCOM4
    PinDescription::new(
        Pin::PA13,
        PioType::SercomAlt,
        DIGITAL_PWM,
        None,
        Some(PwmChannel::new(TimerInstance::TCC0, 5)),
        None,
        Some(ExtInt::Ext13),
    ),
];

/// Description of logical pin `pin`, or `None` past the end of the table.
pub fn pin_description(pin: usize) -> Option<&'static PinDescription> {
    PIN_DESCRIPTIONS.get(pin)
}

pub fn digital_pin_has_pwm(pin: usize) -> bool {
    pin_description(pin).is_some_and(|desc| desc.has_pwm())
}

/// Logical pin number of analog input `A<input>`.
pub fn analog_input_to_digital_pin(input: usize) -> Option<usize> {
    if input < NUM_ANALOG_INPUTS {
        Some(PIN_A0 + input)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_past_end() {
        assert!(pin_description(PINS_COUNT - 1).is_some());
        assert!(pin_description(PINS_COUNT).is_none());
        assert!(!digital_pin_has_pwm(PINS_COUNT));
    }

    #[test]
    fn pwm_capable_pins() {
        for pin in [0, 1, 2, 3, 5, 7, 11, 12, 22] {
            assert!(digital_pin_has_pwm(pin), "pin {}", pin);
        }
        for pin in [4, 6, 8, 9, 10, 13, 17, 21] {
            assert!(!digital_pin_has_pwm(pin), "pin {}", pin);
        }
    }

    #[test]
    fn analog_inputs() {
        assert_eq!(analog_input_to_digital_pin(0), Some(PIN_A0));
        assert_eq!(analog_input_to_digital_pin(3), Some(PIN_A3));
        assert_eq!(analog_input_to_digital_pin(4), None);
        assert_eq!(
            PIN_DESCRIPTIONS[PIN_A0].analog,
            Some(AnalogChannel::Adc(AdcChannel::AIN0))
        );
        assert_eq!(PIN_DESCRIPTIONS[PIN_DAC0].analog, Some(AnalogChannel::Dac0));
    }

    #[test]
    fn analog_channel_presence() {
        let analog: [usize; 5] = [PIN_LED, PIN_A0, PIN_A2, PIN_A3, PIN_DAC0];
        for (n, desc) in PIN_DESCRIPTIONS.iter().enumerate() {
            assert_eq!(desc.is_analog(), analog.contains(&n), "pin {}", n);
        }
        // A1 and AREF carry the ANALOG attribute but no channel.
        assert!(PIN_DESCRIPTIONS[PIN_A1]
            .attributes
            .contains(PinAttributes::ANALOG));
        assert!(!PIN_DESCRIPTIONS[PIN_AREF].is_analog());
    }

    #[test]
    fn shared_physical_pins() {
        assert_eq!(PIN_DESCRIPTIONS[PIN_A0].pin, PIN_DESCRIPTIONS[PIN_DAC0].pin);
        assert_eq!(PIN_DESCRIPTIONS[PIN_A1].pin, PIN_DESCRIPTIONS[PIN_AREF].pin);
        assert_eq!(PIN_DESCRIPTIONS[PIN_SERIAL2_RX].pin, PIN_DESCRIPTIONS[22].pin);
        assert_eq!(PIN_DESCRIPTIONS[LED_BUILTIN].pin, Pin::PA10);
    }
}
