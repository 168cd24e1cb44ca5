// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Board support for the DMFG GC v3 M0, a SAMD21G18A based controller.
//!
//! The board maps 23 logical pin numbers onto the chip's PORT pins and
//! brings out four UARTs:
//!
//! | UART    | SERCOM | RX pin | TX pin |
//! |---------|--------|--------|--------|
//! | Serial0 | 0      | 0      | 1      |
//! | Serial1 | 1      | 3      | 2      |
//! | Serial2 | 2      | 5      | 4      |
//! | Serial4 | 4      | 7      | 6      |
//!
//! Serial0 is the console and carries `debug!` and panic output.

#![no_std]

pub mod config;
pub mod io;
pub mod serial;
pub mod setup;
pub mod variant;
