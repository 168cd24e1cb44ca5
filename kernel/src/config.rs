// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Data structure for storing compile-time configuration options in the kernel.
//!
//! Configuration is a typed `const` object rather than scattered `#[cfg]`
//! attributes, so every code path is type-checked even when the option that
//! guards it is off. The compiler folds the constants, so a disabled branch
//! costs nothing in the final binary.

/// Data structure holding compile-time configuration options.
///
/// To change the configuration, modify the relevant values in the `CONFIG`
/// constant object defined at the end of this file.
pub struct Config {
    /// Whether the panic path should print the panic location and message to
    /// the registered debug writer.
    ///
    /// Turning this off drops the formatting machinery from size-constrained
    /// builds; the board still halts on panic.
    pub debug_panics: bool,
}

/// A unique instance of `Config` where compile-time configuration options are
/// defined. This is the only place in the kernel crate where Cargo features
/// are consulted.
pub const CONFIG: Config = Config {
    debug_panics: !cfg!(feature = "no_debug_panics"),
};
