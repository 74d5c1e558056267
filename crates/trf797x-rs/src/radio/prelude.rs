//! This module defines the generic traits that may
//! need to imported to use reader implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use trf797x::radio::prelude::*;
//! ```

use crate::types::{FifoStatus, IrqStatus};

use super::ReaderConfig;

/// A trait to represent the exchange of a frame with a tag
/// (transmit, then wait for the reply).
///
/// Only one transceive call may be in flight at a time.
pub trait RfidTransceive {
    type TransceiveErrorType;

    /// The largest payload [`RfidTransceive::transceive_bytes()`] will transmit.
    const MAX_TX_PAYLOAD: usize = 122;

    /// The most bits [`RfidTransceive::transceive_bits()`] will transmit.
    const MAX_TX_BITS: u8 = 7;

    /// Transmit up to 7 bits of `data` (LSB first), then receive the reply into `rx`.
    ///
    /// `timeout_ms` covers the whole exchange (transmission and reception).
    /// If `crc` is `true`, the chip appends a CRC to the transmitted frame.
    ///
    /// Returns the number of bytes stored in `rx`:
    ///
    /// - `0` if no reception completed within `timeout_ms` (no tag answered).
    ///   This is not an error.
    /// - `0` if `bits` is greater than [`RfidTransceive::MAX_TX_BITS`].
    ///   Nothing is sent on the bus in this case.
    /// - otherwise, the number of bytes in the chip's FIFO limited to `rx.len()`.
    ///   Any excess bytes are left unread.
    ///
    /// See also [`RfidFifo::last_fifo_status()`] to check for a FIFO overflow.
    fn transceive_bits(
        &mut self,
        data: u8,
        bits: u8,
        rx: &mut [u8],
        timeout_ms: u16,
        crc: bool,
    ) -> Result<u8, Self::TransceiveErrorType>;

    /// Transmit the bytes in `tx`, then receive the reply into `rx`.
    ///
    /// `timeout_ms` covers the whole exchange (transmission and reception).
    /// If `crc` is `true`, the chip appends a CRC to the transmitted frame.
    ///
    /// Returns the number of bytes stored in `rx`:
    ///
    /// - `0` if no reception completed within `timeout_ms` (no tag answered).
    ///   This is not an error.
    /// - `0` if `tx` is longer than [`RfidTransceive::MAX_TX_PAYLOAD`].
    ///   Nothing is sent on the bus in this case.
    /// - otherwise, the number of bytes in the chip's FIFO limited to `rx.len()`.
    fn transceive_bytes(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        timeout_ms: u16,
        crc: bool,
    ) -> Result<u8, Self::TransceiveErrorType>;
}

/// A trait to represent manipulation of the chip's FIFO.
pub trait RfidFifo {
    type FifoErrorType;

    /// Discard everything in the chip's FIFO.
    fn reset_fifo(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Read the FIFO status register.
    fn get_fifo_status(&mut self) -> Result<FifoStatus, Self::FifoErrorType>;

    /// The FIFO status read at the end of the last completed reception.
    ///
    /// The transceive functions silently mask off the overflow flag;
    /// use this to find out if the chip dropped received bytes.
    fn last_fifo_status(&self) -> FifoStatus;
}

/// A trait to represent the chip's IRQ status register.
pub trait RfidStatus {
    type StatusErrorType;

    /// Read (and thereby clear) the IRQ status register.
    ///
    /// The register that follows it is read as well (and discarded) because the
    /// chip only releases its status latch after that dummy read.
    fn read_irq_status(&mut self) -> Result<IrqStatus, Self::StatusErrorType>;

    /// Clear the IRQ status register, discarding its value.
    fn reset_irq_status(&mut self) -> Result<(), Self::StatusErrorType> {
        self.read_irq_status().map(|_| ())
    }
}

/// A trait to represent the small register toggles used between exchanges.
pub trait RfidControl {
    type ControlErrorType;

    /// Turn the RF field on, then wait for it to settle (6 milliseconds).
    fn rf_on(&mut self) -> Result<(), Self::ControlErrorType>;

    /// Turn the RF field off.
    fn rf_off(&mut self) -> Result<(), Self::ControlErrorType>;

    /// Enable the slot counter used for ISO15693 anticollision.
    fn enable_slot_counter(&mut self) -> Result<(), Self::ControlErrorType>;

    /// Disable the slot counter.
    fn disable_slot_counter(&mut self) -> Result<(), Self::ControlErrorType>;

    /// Enable the receiver's decoders.
    fn run_decoders(&mut self) -> Result<(), Self::ControlErrorType>;

    /// Block the receiver's decoders.
    fn stop_decoders(&mut self) -> Result<(), Self::ControlErrorType>;

    /// Send the EOF that moves an ISO15693 inventory to its next slot.
    fn transmit_next_slot(&mut self) -> Result<(), Self::ControlErrorType>;
}

/// A trait to represent the chip's bring-up.
pub trait RfidInit {
    type ConfigErrorType;

    /// Soft-initialize the chip until it reports ready, then apply
    /// [`ReaderConfig::default()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Write the register values described by `config` and adopt its poll slices.
    fn with_config(&mut self, config: &ReaderConfig) -> Result<(), Self::ConfigErrorType>;
}

/// A trait to represent debug output of the chip's state.
pub trait RfidDetails {
    type DetailsErrorType;

    /// Print details about the chip's configuration.
    ///
    /// This function uses [`defmt`](https://docs.rs/defmt/latest/defmt/) on
    /// bare-metal targets (with the `defmt` feature) or `std::println` with the
    /// `std` feature. Otherwise it does nothing.
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType>;
}
