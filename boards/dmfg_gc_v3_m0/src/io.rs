// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Console output for `debug!` and panics.

use kernel::debug::IoWrite;
use samd21::uart::Uart;

/// Blocking writer over the console UART, used for `debug!` and panics.
pub struct Writer<'a> {
    uart: &'a Uart<'a>,
}

impl<'a> Writer<'a> {
    pub fn new(uart: &'a Uart<'a>) -> Self {
        Writer { uart }
    }
}

impl IoWrite for Writer<'_> {
    fn write(&mut self, buf: &[u8]) -> usize {
        self.uart.transmit_sync(buf);
        buf.len()
    }
}

/// Panic handler.
#[cfg(all(target_arch = "arm", target_os = "none"))]
#[panic_handler]
fn panic_fmt(pi: &core::panic::PanicInfo) -> ! {
    use kernel::hil::uart::Configure;
    use samd21::chip::Samd21DefaultPeripherals;

    use crate::config::CONFIG;
    use crate::serial::SERIAL0;

    // A second set of SERCOM objects on the same hardware. Interrupts are
    // never serviced after this point so the live drivers do not observe it.
    let peripherals = Samd21DefaultPeripherals::new();
    let uart = SERIAL0.uart(&peripherals);
    let _ = uart.configure(CONFIG.console);
    let mut writer = Writer::new(&uart);
    kernel::debug::panic_print(&mut writer, pi);
    loop {
        core::hint::spin_loop();
    }
}
