// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripheral implementations for the Microchip ATSAMD21 MCU.
//!
//! Covers the pieces a board variant wires together: the PORT pin
//! multiplexer, the pin description types boards build their pin tables
//! from, the timer/counter instance table, and the SERCOM blocks with their
//! UART driver.

#![no_std]

pub mod chip;
pub mod interrupts;
pub mod pin_description;
pub mod port;
pub mod sercom;
pub mod tc;
pub mod uart;
