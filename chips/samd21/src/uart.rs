// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! UART driver for a SERCOM in asynchronous USART mode.
//!
//! Transmit and receive are interrupt driven, one byte per DRE/RXC
//! interrupt. The SERCOM core clock must already be enabled and sourced from
//! a [`SERCOM_FREQ_REF`](crate::sercom::SERCOM_FREQ_REF) generator.

use core::cell::Cell;

use kernel::hil;
use kernel::utilities::cells::{OptionalCell, TakeCell};
use kernel::utilities::registers::interfaces::{ReadWriteable, Readable, Writeable};
use kernel::utilities::registers::{
    register_bitfields, register_structs, LocalRegisterCopy, ReadOnly, ReadWrite,
};
use kernel::ErrorCode;

use crate::sercom::{self, RxPad, Sercom, TxPad};

register_structs! {
    pub UsartRegisters {
        /// Control A
        (0x00 => ctrla: ReadWrite<u32, CTRLA::Register>),
        /// Control B
        (0x04 => ctrlb: ReadWrite<u32, CTRLB::Register>),
        (0x08 => _reserved0),
        /// Baud rate
        (0x0C => baud: ReadWrite<u16>),
        (0x0E => _reserved1),
        /// Interrupt enable clear
        (0x14 => intenclr: ReadWrite<u8, INTERRUPT::Register>),
        (0x15 => _reserved2),
        /// Interrupt enable set
        (0x16 => intenset: ReadWrite<u8, INTERRUPT::Register>),
        (0x17 => _reserved3),
        /// Interrupt flag status and clear
        (0x18 => intflag: ReadWrite<u8, INTERRUPT::Register>),
        (0x19 => _reserved4),
        /// Status, write one to clear the error bits
        (0x1A => status: ReadWrite<u16, STATUS::Register>),
        /// Synchronization busy
        (0x1C => syncbusy: ReadOnly<u32, SYNCBUSY::Register>),
        (0x20 => _reserved5),
        /// Data
        (0x28 => data: ReadWrite<u16, DATA::Register>),
        (0x2A => _reserved6),
        (0x30 => @END),
    }
}

register_bitfields![u32,
    CTRLA [
        /// Data order
        DORD OFFSET(30) NUMBITS(1) [
            MsbFirst = 0,
            LsbFirst = 1
        ],
        /// Frame format
        FORM OFFSET(24) NUMBITS(4) [
            NoParity = 0,
            WithParity = 1
        ],
        /// Receive data pinout
        RXPO OFFSET(20) NUMBITS(2) [],
        /// Transmit data pinout
        TXPO OFFSET(16) NUMBITS(2) [],
        /// Sample rate
        SAMPR OFFSET(13) NUMBITS(3) [
            Arithmetic16x = 0
        ],
        /// Operating mode
        MODE OFFSET(2) NUMBITS(3) [
            UsartExternalClock = 0,
            UsartInternalClock = 1
        ],
        ENABLE OFFSET(1) NUMBITS(1) [],
        SWRST OFFSET(0) NUMBITS(1) []
    ],
    CTRLB [
        RXEN OFFSET(17) NUMBITS(1) [],
        TXEN OFFSET(16) NUMBITS(1) [],
        /// Parity mode
        PMODE OFFSET(13) NUMBITS(1) [
            Even = 0,
            Odd = 1
        ],
        /// Stop bit mode
        SBMODE OFFSET(6) NUMBITS(1) [
            OneStopBit = 0,
            TwoStopBits = 1
        ],
        /// Character size
        CHSIZE OFFSET(0) NUMBITS(3) [
            Bits8 = 0,
            Bits9 = 1,
            Bits5 = 5,
            Bits6 = 6,
            Bits7 = 7
        ]
    ],
    SYNCBUSY [
        CTRLB OFFSET(2) NUMBITS(1) [],
        ENABLE OFFSET(1) NUMBITS(1) [],
        SWRST OFFSET(0) NUMBITS(1) []
    ]
];

register_bitfields![u8,
    INTERRUPT [
        ERROR OFFSET(7) NUMBITS(1) [],
        RXBRK OFFSET(5) NUMBITS(1) [],
        CTSIC OFFSET(4) NUMBITS(1) [],
        RXS OFFSET(3) NUMBITS(1) [],
        /// Receive complete
        RXC OFFSET(2) NUMBITS(1) [],
        /// Transmit complete
        TXC OFFSET(1) NUMBITS(1) [],
        /// Data register empty
        DRE OFFSET(0) NUMBITS(1) []
    ]
];

register_bitfields![u16,
    STATUS [
        COLL OFFSET(5) NUMBITS(1) [],
        ISF OFFSET(4) NUMBITS(1) [],
        CTS OFFSET(3) NUMBITS(1) [],
        BUFOVF OFFSET(2) NUMBITS(1) [],
        FERR OFFSET(1) NUMBITS(1) [],
        PERR OFFSET(0) NUMBITS(1) []
    ],
    DATA [
        DATA OFFSET(0) NUMBITS(9) []
    ]
];

/// Check the parameters this peripheral can honour with the given pinout.
fn validate(params: &hil::uart::Parameters, tx_pad: TxPad) -> Result<u16, ErrorCode> {
    if params.hw_flow_control && tx_pad != TxPad::Pad0RtsCtsPad2Pad3 {
        return Err(ErrorCode::NOSUPPORT);
    }
    sercom::baud_register(params.baud_rate, sercom::SERCOM_FREQ_REF)
}

/// Map the STATUS error bits to the error reported to the receive client.
/// Parity wins over framing, framing over overrun.
fn line_error(status: LocalRegisterCopy<u16, STATUS::Register>) -> hil::uart::Error {
    if status.is_set(STATUS::PERR) {
        hil::uart::Error::ParityError
    } else if status.is_set(STATUS::FERR) {
        hil::uart::Error::FramingError
    } else if status.is_set(STATUS::BUFOVF) {
        hil::uart::Error::OverrunError
    } else {
        hil::uart::Error::None
    }
}

/// Argument checks shared by transmit and receive requests.
fn check_request(
    buffer: &'static mut [u8],
    len: usize,
    in_flight: bool,
) -> Result<&'static mut [u8], (ErrorCode, &'static mut [u8])> {
    if len == 0 || len > buffer.len() {
        Err((ErrorCode::SIZE, buffer))
    } else if in_flight {
        Err((ErrorCode::BUSY, buffer))
    } else {
        Ok(buffer)
    }
}

pub struct Uart<'a> {
    sercom: &'a Sercom,
    rx_pad: RxPad,
    tx_pad: TxPad,
    tx_client: OptionalCell<&'a dyn hil::uart::TransmitClient>,
    rx_client: OptionalCell<&'a dyn hil::uart::ReceiveClient>,
    tx_buffer: TakeCell<'static, [u8]>,
    tx_len: Cell<usize>,
    tx_index: Cell<usize>,
    rx_buffer: TakeCell<'static, [u8]>,
    rx_len: Cell<usize>,
    rx_index: Cell<usize>,
}

impl<'a> Uart<'a> {
    pub const fn new(sercom: &'a Sercom, rx_pad: RxPad, tx_pad: TxPad) -> Uart<'a> {
        Uart {
            sercom,
            rx_pad,
            tx_pad,
            tx_client: OptionalCell::empty(),
            rx_client: OptionalCell::empty(),
            tx_buffer: TakeCell::empty(),
            tx_len: Cell::new(0),
            tx_index: Cell::new(0),
            rx_buffer: TakeCell::empty(),
            rx_len: Cell::new(0),
            rx_index: Cell::new(0),
        }
    }

    pub fn sercom(&self) -> &'a Sercom {
        self.sercom
    }

    pub fn pads(&self) -> (RxPad, TxPad) {
        (self.rx_pad, self.tx_pad)
    }

    fn wait_sync(&self) {
        let regs = self.sercom.usart_registers();
        while regs.syncbusy.get() != 0 {}
    }

    fn disable(&self) {
        let regs = self.sercom.usart_registers();
        regs.ctrla.modify(CTRLA::ENABLE::CLEAR);
        self.wait_sync();
    }

    fn reset(&self) {
        let regs = self.sercom.usart_registers();
        regs.ctrla.write(CTRLA::SWRST::SET);
        while regs.ctrla.is_set(CTRLA::SWRST) || regs.syncbusy.is_set(SYNCBUSY::SWRST) {}
    }

    fn enable_tx_interrupt(&self) {
        let regs = self.sercom.usart_registers();
        regs.intenset.write(INTERRUPT::DRE::SET);
    }

    fn disable_tx_interrupt(&self) {
        let regs = self.sercom.usart_registers();
        regs.intenclr.write(INTERRUPT::DRE::SET);
    }

    fn enable_rx_interrupts(&self) {
        let regs = self.sercom.usart_registers();
        regs.intenset.write(INTERRUPT::RXC::SET + INTERRUPT::ERROR::SET);
    }

    fn disable_rx_interrupts(&self) {
        let regs = self.sercom.usart_registers();
        regs.intenclr.write(INTERRUPT::RXC::SET + INTERRUPT::ERROR::SET);
    }

    /// Clear the error bits in STATUS and report which one fired.
    fn take_line_error(&self) -> hil::uart::Error {
        let regs = self.sercom.usart_registers();
        let status = regs.status.extract();
        regs.status.set(status.get());
        regs.intflag.write(INTERRUPT::ERROR::SET);
        line_error(status)
    }

    /// Record a new transmission. Leaves the hardware untouched.
    fn start_transmit(
        &self,
        tx_buffer: &'static mut [u8],
        tx_len: usize,
    ) -> Result<(), (ErrorCode, &'static mut [u8])> {
        let tx_buffer = check_request(tx_buffer, tx_len, self.tx_buffer.is_some())?;
        self.tx_len.set(tx_len);
        self.tx_index.set(0);
        self.tx_buffer.replace(tx_buffer);
        Ok(())
    }

    /// The next byte to load into DATA, or `None` once every byte has been
    /// handed to the hardware.
    fn next_tx_byte(&self) -> Option<u8> {
        let index = self.tx_index.get();
        if index >= self.tx_len.get() {
            return None;
        }
        let byte = self.tx_buffer.map(|buffer| buffer[index])?;
        self.tx_index.set(index + 1);
        Some(byte)
    }

    /// Detach the transmit buffer and the length to report, leaving the
    /// driver idle.
    fn take_transmitted(&self) -> Option<(&'static mut [u8], usize)> {
        let len = self.tx_len.get();
        self.tx_len.set(0);
        self.tx_index.set(0);
        self.tx_buffer.take().map(|buffer| (buffer, len))
    }

    /// Record a new reception. Leaves the hardware untouched.
    fn start_receive(
        &self,
        rx_buffer: &'static mut [u8],
        rx_len: usize,
    ) -> Result<(), (ErrorCode, &'static mut [u8])> {
        let rx_buffer = check_request(rx_buffer, rx_len, self.rx_buffer.is_some())?;
        self.rx_len.set(rx_len);
        self.rx_index.set(0);
        self.rx_buffer.replace(rx_buffer);
        Ok(())
    }

    /// Store a received byte. Returns true when the request is complete.
    fn store_rx_byte(&self, byte: u8) -> bool {
        let index = self.rx_index.get();
        if index >= self.rx_len.get() {
            return true;
        }
        if self.rx_buffer.map(|buffer| buffer[index] = byte).is_none() {
            return false;
        }
        self.rx_index.set(index + 1);
        index + 1 >= self.rx_len.get()
    }

    /// Detach the receive buffer and the number of bytes stored, leaving the
    /// driver idle.
    fn take_received(&self) -> Option<(&'static mut [u8], usize)> {
        let len = self.rx_index.get();
        self.rx_len.set(0);
        self.rx_index.set(0);
        self.rx_buffer.take().map(|buffer| (buffer, len))
    }

    // Driver state is idle before the client runs, so the client may start a
    // new request from inside the callback.
    fn finish_receive(&self, rval: Result<(), ErrorCode>, error: hil::uart::Error) {
        self.disable_rx_interrupts();
        if let Some((buffer, len)) = self.take_received() {
            self.rx_client.map(move |client| {
                client.received_buffer(buffer, len, rval, error);
            });
        }
    }

    fn finish_transmit(&self, rval: Result<(), ErrorCode>) {
        self.disable_tx_interrupt();
        if let Some((buffer, len)) = self.take_transmitted() {
            self.tx_client.map(move |client| {
                client.transmitted_buffer(buffer, len, rval);
            });
        }
    }

    /// Entry point from the SERCOM interrupt handler.
    pub fn handle_interrupt(&self) {
        let regs = self.sercom.usart_registers();

        // Only act on sources we enabled: DRE stays set whenever the data
        // register is empty.
        let enabled = regs.intenset.extract();
        let pending = regs.intflag.extract();

        if enabled.is_set(INTERRUPT::ERROR) && pending.is_set(INTERRUPT::ERROR) {
            let error = self.take_line_error();
            if error != hil::uart::Error::None {
                self.finish_receive(Err(ErrorCode::FAIL), error);
            }
        }

        if enabled.is_set(INTERRUPT::RXC) && pending.is_set(INTERRUPT::RXC) {
            // Reading DATA clears RXC.
            let byte = regs.data.read(DATA::DATA) as u8;
            if self.store_rx_byte(byte) {
                self.finish_receive(Ok(()), hil::uart::Error::None);
            }
        }

        if enabled.is_set(INTERRUPT::DRE) && pending.is_set(INTERRUPT::DRE) {
            match self.next_tx_byte() {
                Some(byte) => regs.data.write(DATA::DATA.val(byte as u16)),
                None => self.finish_transmit(Ok(())),
            }
        }
    }

    /// Blocking transmit used by panic and debug output. Does not touch an
    /// in-flight interrupt driven transfer's state.
    pub fn transmit_sync(&self, bytes: &[u8]) {
        let regs = self.sercom.usart_registers();
        for b in bytes.iter() {
            while !regs.intflag.is_set(INTERRUPT::DRE) {}
            regs.data.write(DATA::DATA.val(*b as u16));
        }
        while !regs.intflag.is_set(INTERRUPT::TXC) {}
        regs.intflag.write(INTERRUPT::TXC::SET);
    }
}

impl hil::uart::Configure for Uart<'_> {
    fn configure(&self, params: hil::uart::Parameters) -> Result<(), ErrorCode> {
        let baud = validate(&params, self.tx_pad)?;
        let regs = self.sercom.usart_registers();

        self.disable();
        self.reset();

        let form = match params.parity {
            hil::uart::Parity::None => CTRLA::FORM::NoParity,
            _ => CTRLA::FORM::WithParity,
        };
        regs.ctrla.write(
            CTRLA::MODE::UsartInternalClock
                + CTRLA::SAMPR::Arithmetic16x
                + CTRLA::DORD::LsbFirst
                + form
                + CTRLA::RXPO.val(self.rx_pad as u32)
                + CTRLA::TXPO.val(self.tx_pad as u32),
        );
        regs.baud.set(baud);

        let chsize = match params.width {
            hil::uart::Width::Six => CTRLB::CHSIZE::Bits6,
            hil::uart::Width::Seven => CTRLB::CHSIZE::Bits7,
            hil::uart::Width::Eight => CTRLB::CHSIZE::Bits8,
        };
        let sbmode = match params.stop_bits {
            hil::uart::StopBits::One => CTRLB::SBMODE::OneStopBit,
            hil::uart::StopBits::Two => CTRLB::SBMODE::TwoStopBits,
        };
        let pmode = match params.parity {
            hil::uart::Parity::Odd => CTRLB::PMODE::Odd,
            _ => CTRLB::PMODE::Even,
        };
        regs.ctrlb
            .write(chsize + sbmode + pmode + CTRLB::TXEN::SET + CTRLB::RXEN::SET);
        self.wait_sync();

        regs.ctrla.modify(CTRLA::ENABLE::SET);
        self.wait_sync();
        Ok(())
    }
}

impl<'a> hil::uart::Transmit<'a> for Uart<'a> {
    fn set_transmit_client(&self, client: &'a dyn hil::uart::TransmitClient) {
        self.tx_client.set(client);
    }

    fn transmit_buffer(
        &self,
        tx_buffer: &'static mut [u8],
        tx_len: usize,
    ) -> Result<(), (ErrorCode, &'static mut [u8])> {
        self.start_transmit(tx_buffer, tx_len)?;
        // The DRE interrupt fires immediately and starts the transfer.
        self.enable_tx_interrupt();
        Ok(())
    }

    /// The cancel callback is delivered synchronously, before this returns.
    fn transmit_abort(&self) -> Result<(), ErrorCode> {
        if self.tx_buffer.is_none() {
            return Ok(());
        }
        self.finish_transmit(Err(ErrorCode::CANCEL));
        Err(ErrorCode::BUSY)
    }
}

impl<'a> hil::uart::Receive<'a> for Uart<'a> {
    fn set_receive_client(&self, client: &'a dyn hil::uart::ReceiveClient) {
        self.rx_client.set(client);
    }

    fn receive_buffer(
        &self,
        rx_buffer: &'static mut [u8],
        rx_len: usize,
    ) -> Result<(), (ErrorCode, &'static mut [u8])> {
        self.start_receive(rx_buffer, rx_len)?;
        self.enable_rx_interrupts();
        Ok(())
    }

    /// The cancel callback is delivered synchronously, before this returns.
    fn receive_abort(&self) -> Result<(), ErrorCode> {
        if self.rx_buffer.is_none() {
            return Ok(());
        }
        self.finish_receive(Err(ErrorCode::CANCEL), hil::uart::Error::Aborted);
        Err(ErrorCode::BUSY)
    }
}

impl<'a> hil::uart::Uart<'a> for Uart<'a> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sercom::{SercomId, SercomPad};
    use kernel::hil::uart::{Configure, Parameters, Parity, Receive, StopBits, Transmit, Width};

    // Nothing below reaches the register block.

    fn params(baud_rate: u32, hw_flow_control: bool) -> Parameters {
        Parameters {
            baud_rate,
            width: Width::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            hw_flow_control,
        }
    }

    fn leak(len: usize) -> &'static mut [u8] {
        extern crate std;
        std::vec![0u8; len].leak()
    }

    fn leak_from(bytes: &[u8]) -> &'static mut [u8] {
        extern crate std;
        std::vec::Vec::from(bytes).leak()
    }

    fn status(bits: u16) -> LocalRegisterCopy<u16, STATUS::Register> {
        LocalRegisterCopy::new(bits)
    }

    #[test]
    fn flow_control_needs_rts_cts_pinout() {
        let sercom = Sercom::new(SercomId::Sercom0);
        let uart = Uart::new(&sercom, SercomPad::Pad1, TxPad::Pad0);
        assert_eq!(uart.configure(params(115_200, true)), Err(ErrorCode::NOSUPPORT));
        assert_eq!(
            validate(&params(115_200, true), TxPad::Pad0RtsCtsPad2Pad3),
            Ok(63020)
        );
    }

    #[test]
    fn impossible_baud_rejected() {
        let sercom = Sercom::new(SercomId::Sercom1);
        let uart = Uart::new(&sercom, SercomPad::Pad1, TxPad::Pad0);
        assert_eq!(uart.configure(params(0, false)), Err(ErrorCode::INVAL));
        assert_eq!(uart.configure(params(4_000_000, false)), Err(ErrorCode::INVAL));
    }

    #[test]
    fn bad_lengths_return_buffer() {
        let sercom = Sercom::new(SercomId::Sercom2);
        let uart = Uart::new(&sercom, SercomPad::Pad1, TxPad::Pad0);

        let (err, buf) = uart.transmit_buffer(leak(4), 0).unwrap_err();
        assert_eq!(err, ErrorCode::SIZE);
        assert_eq!(buf.len(), 4);

        let (err, buf) = uart.transmit_buffer(leak(4), 5).unwrap_err();
        assert_eq!(err, ErrorCode::SIZE);
        assert_eq!(buf.len(), 4);

        let (err, _) = uart.receive_buffer(leak(2), 3).unwrap_err();
        assert_eq!(err, ErrorCode::SIZE);
    }

    #[test]
    fn abort_with_nothing_in_flight() {
        let sercom = Sercom::new(SercomId::Sercom4);
        let uart = Uart::new(&sercom, SercomPad::Pad3, TxPad::Pad2);
        assert_eq!(uart.transmit_abort(), Ok(()));
        assert_eq!(uart.receive_abort(), Ok(()));
        assert_eq!(uart.pads(), (SercomPad::Pad3, TxPad::Pad2));
        assert_eq!(uart.sercom().id(), SercomId::Sercom4);
    }

    #[test]
    fn status_bits_map_to_line_errors() {
        assert_eq!(line_error(status(0)), hil::uart::Error::None);
        assert_eq!(line_error(status(1 << 0)), hil::uart::Error::ParityError);
        assert_eq!(line_error(status(1 << 1)), hil::uart::Error::FramingError);
        assert_eq!(line_error(status(1 << 2)), hil::uart::Error::OverrunError);
        assert_eq!(line_error(status(0b110)), hil::uart::Error::FramingError);
        assert_eq!(line_error(status(0b111)), hil::uart::Error::ParityError);
        // CTS and collision bits are not receive errors.
        assert_eq!(line_error(status(1 << 3 | 1 << 5)), hil::uart::Error::None);
    }

    #[test]
    fn second_request_is_busy() {
        let sercom = Sercom::new(SercomId::Sercom1);
        let uart = Uart::new(&sercom, SercomPad::Pad1, TxPad::Pad0);

        assert!(uart.start_transmit(leak(4), 4).is_ok());
        let (err, buf) = uart.start_transmit(leak(2), 1).unwrap_err();
        assert_eq!(err, ErrorCode::BUSY);
        assert_eq!(buf.len(), 2);
        // Length checks come first.
        let (err, _) = uart.start_transmit(leak(2), 0).unwrap_err();
        assert_eq!(err, ErrorCode::SIZE);

        assert!(uart.start_receive(leak(4), 4).is_ok());
        let (err, _) = uart.start_receive(leak(4), 2).unwrap_err();
        assert_eq!(err, ErrorCode::BUSY);
    }

    #[test]
    fn transmit_walks_buffer_then_completes() {
        let sercom = Sercom::new(SercomId::Sercom2);
        let uart = Uart::new(&sercom, SercomPad::Pad1, TxPad::Pad0);

        assert!(uart.start_transmit(leak_from(&[0x41, 0x42, 0x43, 0xFF]), 3).is_ok());
        assert_eq!(uart.next_tx_byte(), Some(0x41));
        assert_eq!(uart.next_tx_byte(), Some(0x42));
        assert_eq!(uart.next_tx_byte(), Some(0x43));
        assert_eq!(uart.next_tx_byte(), None);

        let (buf, len) = uart.take_transmitted().unwrap();
        assert_eq!(len, 3);
        assert_eq!(buf, &[0x41, 0x42, 0x43, 0xFF]);

        // Idle again: a new request may start immediately.
        assert!(uart.take_transmitted().is_none());
        assert_eq!(uart.next_tx_byte(), None);
        assert!(uart.start_transmit(leak(1), 1).is_ok());
    }

    #[test]
    fn receive_fills_buffer_then_completes() {
        let sercom = Sercom::new(SercomId::Sercom4);
        let uart = Uart::new(&sercom, SercomPad::Pad3, TxPad::Pad2);

        assert!(uart.start_receive(leak(4), 3).is_ok());
        assert!(!uart.store_rx_byte(0x0A));
        assert!(!uart.store_rx_byte(0x0B));
        assert!(uart.store_rx_byte(0x0C));

        let (buf, len) = uart.take_received().unwrap();
        assert_eq!(len, 3);
        assert_eq!(buf, &[0x0A, 0x0B, 0x0C, 0x00]);
        assert!(uart.take_received().is_none());
    }

    #[test]
    fn cancelled_receive_reports_bytes_so_far() {
        let sercom = Sercom::new(SercomId::Sercom0);
        let uart = Uart::new(&sercom, SercomPad::Pad1, TxPad::Pad0);

        assert!(uart.start_receive(leak(8), 8).is_ok());
        assert!(!uart.store_rx_byte(0x55));
        let (buf, len) = uart.take_received().unwrap();
        assert_eq!(len, 1);
        assert_eq!(buf[0], 0x55);

        // Restarting from the client callback finds the driver idle.
        assert!(uart.start_receive(buf, 2).is_ok());
    }
}
