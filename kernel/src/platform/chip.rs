// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interfaces for implementing microcontrollers.

/// Interface for handling interrupts on a hardware chip.
///
/// Each board creates a peripheral structure that implements this trait and
/// forwards each NVIC line to the driver that owns it. Boards that only use a
/// subset of a chip's peripherals implement it for the subset they wire up.
pub trait InterruptService {
    /// Service an interrupt, if supported by this chip. If this interrupt
    /// number is not supported, return false.
    ///
    /// # Safety
    ///
    /// Must only be called from the interrupt bottom half, with the NVIC line
    /// `interrupt` pending.
    unsafe fn service_interrupt(&self, interrupt: u32) -> bool;
}
