// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Timer/counter instances and the channel identifiers pin tables refer to.
//!
//! The SAMD21 has three TCC (timer/counter for control) blocks and, on the
//! 32/48-pin parts, three basic TC blocks. Timer and PWM channels in a pin
//! description name an instance and a channel within it; the instance's
//! position in [`TIMER_INSTANCES`] is the index drivers use to find it.

use crate::interrupts;

const TIMER_BASE: usize = 0x4200_2000;
const TIMER_STRIDE: usize = 0x400;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum TimerInstance {
    TCC0 = 0,
    TCC1 = 1,
    TCC2 = 2,
    TC3 = 3,
    TC4 = 4,
    TC5 = 5,
}

/// Timer instances in the order timer and PWM channels index them.
pub const TIMER_INSTANCES: [TimerInstance; 6] = [
    TimerInstance::TCC0,
    TimerInstance::TCC1,
    TimerInstance::TCC2,
    TimerInstance::TC3,
    TimerInstance::TC4,
    TimerInstance::TC5,
];

impl TimerInstance {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn base_address(self) -> usize {
        TIMER_BASE + TIMER_STRIDE * self as usize
    }

    pub const fn interrupt(self) -> u32 {
        interrupts::TCC0 + self as u32
    }

    pub const fn is_tcc(self) -> bool {
        match self {
            TimerInstance::TCC0 | TimerInstance::TCC1 | TimerInstance::TCC2 => true,
            _ => false,
        }
    }

    /// Number of compare/capture channels.
    pub const fn compare_channels(self) -> u8 {
        match self {
            TimerInstance::TCC0 => 4,
            _ => 2,
        }
    }

    /// Number of waveform outputs (WO[n]). TCC0 and TCC1 drive more outputs
    /// than they have compare channels; extra outputs repeat channel
    /// `n % compare_channels`.
    pub const fn waveform_outputs(self) -> u8 {
        match self {
            TimerInstance::TCC0 => 8,
            TimerInstance::TCC1 => 4,
            _ => 2,
        }
    }
}

/// Compare/capture channel used for timer functions such as `tone`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TimerChannel {
    pub timer: TimerInstance,
    pub channel: u8,
}

impl TimerChannel {
    pub const fn new(timer: TimerInstance, channel: u8) -> TimerChannel {
        TimerChannel { timer, channel }
    }

    pub const fn is_valid(&self) -> bool {
        self.channel < self.timer.compare_channels()
    }
}

/// Waveform output used for PWM.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PwmChannel {
    pub timer: TimerInstance,
    pub channel: u8,
}

impl PwmChannel {
    pub const fn new(timer: TimerInstance, channel: u8) -> PwmChannel {
        PwmChannel { timer, channel }
    }

    pub const fn is_valid(&self) -> bool {
        self.channel < self.timer.waveform_outputs()
    }

    /// Compare channel that sets this output's duty cycle.
    pub const fn compare_channel(&self) -> u8 {
        self.channel % self.timer.compare_channels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_table_order() {
        for (i, timer) in TIMER_INSTANCES.iter().enumerate() {
            assert_eq!(timer.index(), i);
        }
        assert_eq!(TimerInstance::TC3.base_address(), 0x4200_2C00);
        assert_eq!(TimerInstance::TC5.interrupt(), interrupts::TC5);
        assert!(TimerInstance::TCC2.is_tcc());
        assert!(!TimerInstance::TC4.is_tcc());
    }

    #[test]
    fn channel_bounds() {
        assert!(PwmChannel::new(TimerInstance::TCC0, 7).is_valid());
        assert!(!PwmChannel::new(TimerInstance::TCC2, 2).is_valid());
        assert!(TimerChannel::new(TimerInstance::TCC0, 3).is_valid());
        assert!(!TimerChannel::new(TimerInstance::TC3, 2).is_valid());
    }

    #[test]
    fn extra_outputs_share_compare_channels() {
        assert_eq!(PwmChannel::new(TimerInstance::TCC0, 5).compare_channel(), 1);
        assert_eq!(PwmChannel::new(TimerInstance::TCC1, 3).compare_channel(), 1);
        assert_eq!(PwmChannel::new(TimerInstance::TC3, 1).compare_channel(), 1);
    }
}
