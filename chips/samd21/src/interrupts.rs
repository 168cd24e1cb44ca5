// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Named NVIC lines for the SAMD21.

pub const PM: u32 = 0;
pub const SYSCTRL: u32 = 1;
pub const WDT: u32 = 2;
pub const RTC: u32 = 3;
pub const EIC: u32 = 4;
pub const NVMCTRL: u32 = 5;
pub const DMAC: u32 = 6;
pub const USB: u32 = 7;
pub const EVSYS: u32 = 8;
pub const SERCOM0: u32 = 9;
pub const SERCOM1: u32 = 10;
pub const SERCOM2: u32 = 11;
pub const SERCOM3: u32 = 12;
pub const SERCOM4: u32 = 13;
pub const SERCOM5: u32 = 14;
pub const TCC0: u32 = 15;
pub const TCC1: u32 = 16;
pub const TCC2: u32 = 17;
pub const TC3: u32 = 18;
pub const TC4: u32 = 19;
pub const TC5: u32 = 20;
pub const TC6: u32 = 21;
pub const TC7: u32 = 22;
pub const ADC: u32 = 23;
pub const AC: u32 = 24;
pub const DAC: u32 = 25;
pub const PTC: u32 = 26;
pub const I2S: u32 = 27;
