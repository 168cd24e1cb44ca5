// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for kernel debug output.
//!
//! Boards register a synchronous [`IoWrite`] implementation during setup
//! with [`set_debug_writer`], usually a UART that can be driven by polling.
//! After that, any code in the system can print with the `debug!` macro:
//!
//! ```ignore
//! debug!("sercom{} configured at {} baud", 0, 115200);
//! ```
//!
//! Output printed before a writer is registered is discarded.
//!
//! The same writer abstraction is used from board panic handlers through
//! [`panic_print`].

use core::fmt::{self, Write};
use core::panic::PanicInfo;
use core::ptr::addr_of_mut;

use crate::config::CONFIG;

/// Synchronous byte sink used for debug and panic output.
pub trait IoWrite {
    /// Write all of `buf`, blocking until the bytes are handed to hardware.
    /// Returns the number of bytes written.
    fn write(&mut self, buf: &[u8]) -> usize;
}

/// Adapts an [`IoWrite`] so `core::fmt` machinery can target it.
pub struct FmtWriter<'a, W: IoWrite + ?Sized>(&'a mut W);

impl<'a, W: IoWrite + ?Sized> FmtWriter<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        FmtWriter(writer)
    }
}

impl<W: IoWrite + ?Sized> Write for FmtWriter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.write(s.as_bytes());
        Ok(())
    }
}

static mut DEBUG_WRITER: Option<&'static mut dyn IoWrite> = None;

/// Register the writer that `debug!` output is sent to.
///
/// # Safety
///
/// Must be called from the single kernel thread before interrupts that may
/// print are enabled.
pub unsafe fn set_debug_writer(writer: &'static mut dyn IoWrite) {
    *addr_of_mut!(DEBUG_WRITER) = Some(writer);
}

/// Write one formatted debug line, terminated with `\r\n`, to `writer`.
pub fn write_line(writer: &mut dyn IoWrite, args: fmt::Arguments) {
    let mut w = FmtWriter::new(writer);
    let _ = w.write_fmt(args);
    let _ = w.write_str("\r\n");
}

/// Backend of the `debug!` macro.
pub fn debug_println(args: fmt::Arguments) {
    // The kernel runs on one core and the writer is only installed during
    // board setup, so there is no concurrent access to the global.
    let writer = unsafe { &mut *addr_of_mut!(DEBUG_WRITER) };
    if let Some(writer) = writer.as_deref_mut() {
        write_line(writer, args);
    }
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print the location when hit
        $crate::debug!("{}:{}", file!(), line!())
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::debug_println(format_args!("{}", $msg))
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::debug_println(format_args!($fmt, $($arg)+))
    });
}

/// Print the panic location and message to `writer`.
///
/// Boards call this from their `#[panic_handler]`. Nothing is printed when
/// the kernel is built with the `no_debug_panics` feature.
pub fn panic_print<W: IoWrite>(writer: &mut W, panic_info: &PanicInfo) {
    if !CONFIG.debug_panics {
        return;
    }
    let mut w = FmtWriter::new(writer);
    let _ = w.write_str("\r\n\r\nKernel panic");
    if let Some(location) = panic_info.location() {
        let _ = write!(w, " at {}:{}", location.file(), location.line());
    }
    let _ = write!(w, ":\r\n\t\"{}\"\r\n", panic_info.message());
}
