// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Hardware interface layer (HIL) traits for UART communication.

use crate::ErrorCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopBits {
    One = 1,
    Two = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Parity {
    None = 0,
    Odd = 1,
    Even = 2,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Width {
    Six = 6,
    Seven = 7,
    Eight = 8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Parameters {
    pub baud_rate: u32, // baud rate in bit/s
    pub width: Width,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub hw_flow_control: bool,
}

/// The type of error encountered during UART transaction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No error occurred and the command completed successfully
    None,

    /// Parity error during receive
    ParityError,

    /// Framing error during receive
    FramingError,

    /// Overrun error during receive
    OverrunError,

    /// The operation was aborted before it completed
    Aborted,
}

pub trait Configure {
    /// Returns Ok(()), or
    /// - OFF: The underlying hardware is currently not available, perhaps
    ///        because it has not been initialized or in the case of a shared
    ///        hardware USART controller because it is set up for SPI.
    /// - INVAL: Impossible parameters (e.g. a `baud_rate` of 0)
    /// - NOSUPPORT: The underlying UART cannot satisfy this configuration.
    fn configure(&self, params: Parameters) -> Result<(), ErrorCode>;
}

pub trait Transmit<'a> {
    /// Set the transmit client, which will be called when transmissions
    /// complete.
    fn set_transmit_client(&self, client: &'a dyn TransmitClient);

    /// Transmit a buffer of data. On completion, `transmitted_buffer` in the
    /// `TransmitClient` will be called. If the `Result<(), ErrorCode>`
    /// returned by `transmit` is an `Ok(())`, the struct will issue a
    /// `transmitted_buffer` callback in the future. If the value of the
    /// `Result<(), ErrorCode>` is `Err(), then the `tx_buffer` argument is
    /// returned in the `Err()`, along with the `ErrorCode`.
    ///
    /// Other error codes are:
    /// - OFF: The underlying hardware is not available.
    /// - BUSY: the UART is already transmitting and has not made a
    ///   transmission callback yet.
    /// - SIZE: `tx_len` is zero or larger than `tx_buffer`.
    fn transmit_buffer(
        &self,
        tx_buffer: &'static mut [u8],
        tx_len: usize,
    ) -> Result<(), (ErrorCode, &'static mut [u8])>;

    /// Abort an outstanding transmission. The buffer is returned through the
    /// `transmitted_buffer` callback with `Err(CANCEL)` and the call returns
    /// `Err(BUSY)`. Returns Ok(()) when there was nothing to abort.
    ///
    /// The callback may run before `transmit_abort` returns. The driver is
    /// already idle when it does, so the client may issue a new
    /// `transmit_buffer` from inside it.
    fn transmit_abort(&self) -> Result<(), ErrorCode>;
}

pub trait Receive<'a> {
    /// Set the receive client, which will be called when reads complete.
    fn set_receive_client(&self, client: &'a dyn ReceiveClient);

    /// Receive `rx_len` bytes into `rx_buffer`, making a callback to the
    /// `ReceiveClient` when complete. Error codes mirror
    /// [`Transmit::transmit_buffer`].
    fn receive_buffer(
        &self,
        rx_buffer: &'static mut [u8],
        rx_len: usize,
    ) -> Result<(), (ErrorCode, &'static mut [u8])>;

    /// Abort an outstanding receive. The partially filled buffer is returned
    /// through the `received_buffer` callback with `Err(CANCEL)` and the call
    /// returns `Err(BUSY)`. Returns Ok(()) when there was nothing to abort.
    ///
    /// As with `transmit_abort`, the callback may run before this returns
    /// and the client may start a new receive from inside it.
    fn receive_abort(&self) -> Result<(), ErrorCode>;
}

/// Trait implemented by a UART transmitter to receive callbacks when
/// operations complete.
pub trait TransmitClient {
    /// A call to `Transmit::transmit_buffer` completed.
    fn transmitted_buffer(
        &self,
        tx_buffer: &'static mut [u8],
        tx_len: usize,
        rval: Result<(), ErrorCode>,
    );
}

/// Trait implemented by a UART receiver to receive callbacks when
/// operations complete.
pub trait ReceiveClient {
    /// A call to `Receive::receive_buffer` completed. `rx_len` bytes are
    /// valid. `error` describes a line error that ended the receive early.
    fn received_buffer(
        &self,
        rx_buffer: &'static mut [u8],
        rx_len: usize,
        rval: Result<(), ErrorCode>,
        error: Error,
    );
}

/// Trait that isn't required for basic UART operation, but provides useful
/// abstractions that capsules may want to be able to leverage.
pub trait Uart<'a>: Configure + Transmit<'a> + Receive<'a> {}
