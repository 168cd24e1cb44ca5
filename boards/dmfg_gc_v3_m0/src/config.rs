// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Compile-time configuration of the board.

use kernel::hil::uart;

pub struct Config {
    /// Line settings of the Serial0 console.
    pub console: uart::Parameters,

    /// Print each pin as the serial setup multiplexes it.
    pub trace_pin_setup: bool,
}

pub const CONFIG: Config = Config {
    console: uart::Parameters {
        baud_rate: 115200,
        width: uart::Width::Eight,
        parity: uart::Parity::None,
        stop_bits: uart::StopBits::One,
        hw_flow_control: false,
    },
    trace_pin_setup: cfg!(feature = "trace_pin_setup"),
};
