// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core kernel support shared by the SAMD21 chip crate and its boards.
//!
//! The kernel crate holds the Hardware Interface Layer (HIL) definitions the
//! chip drivers implement, the standard [`ErrorCode`], the interrupt service
//! interface boards use to route NVIC lines to peripheral drivers, and the
//! `debug!` output path.
//!
//! Most `unsafe` code is in this kernel crate.

#![no_std]

pub mod config;
#[macro_use]
pub mod debug;
pub mod errorcode;
pub mod hil;
pub mod platform;
#[macro_use]
pub mod utilities;

pub use crate::errorcode::ErrorCode;
