//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

use crate::radio::mnemonics;

/// A struct to describe the contents of the chip's IRQ status register.
///
/// Reading the IRQ status register clears it. The transceive engine only acts on
/// the exact values described by [`IrqStatus::is_rx_end()`] and
/// [`IrqStatus::is_tx_end()`]; any other combination is ignored.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct IrqStatus {
    /// End of transmission.
    #[bits(1, access = RO)]
    pub tx_end: bool,

    /// Start (or end) of reception.
    #[bits(1, access = RO)]
    pub rx_end: bool,

    /// FIFO level reached its configured threshold.
    #[bits(1, access = RO)]
    pub fifo: bool,

    #[bits(1, access = RO)]
    pub crc_error: bool,

    #[bits(1, access = RO)]
    pub parity_error: bool,

    /// Byte framing or EOF error.
    #[bits(1, access = RO)]
    pub framing_error: bool,

    #[bits(1, access = RO)]
    pub collision: bool,

    /// No response within the RX no-response wait time.
    #[bits(1, access = RO)]
    pub no_response: bool,
}

impl IrqStatus {
    /// Is this status exactly "reception complete" (`0x40`)?
    pub const fn is_rx_end(&self) -> bool {
        self.into_bits() == mnemonics::IRQ_RX_END
    }

    /// Is this status exactly "transmission complete" (`0x80`)?
    pub const fn is_tx_end(&self) -> bool {
        self.into_bits() == mnemonics::IRQ_TX_END
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IrqStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "IrqStatus {=u8:#04X}", self.into_bits())
    }
}

impl Display for IrqStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "IrqStatus tx_end: {}, rx_end: {}, fifo: {}, no_response: {}",
            self.tx_end(),
            self.rx_end(),
            self.fifo(),
            self.no_response()
        )
    }
}

/// A struct to describe the contents of the chip's FIFO status register.
///
/// The most significant bit is an overflow flag. The remaining 7 bits
/// are the number of bytes available in the FIFO.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct FifoStatus {
    /// Set when more bytes were received than the FIFO can hold.
    #[bits(1, access = RO)]
    pub overflow: bool,

    /// The number of bytes available to read (overflow flag excluded).
    #[bits(7, access = RO)]
    pub count: u8,
}

#[cfg(feature = "defmt")]
impl defmt::Format for FifoStatus {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "FifoStatus count: {=u8}, overflow: {=bool}",
            self.count(),
            self.overflow()
        )
    }
}

impl Display for FifoStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "FifoStatus count: {}, overflow: {}",
            self.count(),
            self.overflow()
        )
    }
}

/// The chip's bypass modes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DirectMode {
    /// Transmit bypass. The host drives the modulation directly.
    Mode0,
    /// Receive bypass. The demodulated subcarrier is output to the host.
    Mode1,
}

#[cfg(feature = "defmt")]
impl defmt::Format for DirectMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DirectMode::Mode0 => defmt::write!(fmt, "DM0"),
            DirectMode::Mode1 => defmt::write!(fmt, "DM1"),
        }
    }
}

impl Display for DirectMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DirectMode::Mode0 => write!(f, "DM0"),
            DirectMode::Mode1 => write!(f, "DM1"),
        }
    }
}

/// The possible states of a direct mode session.
///
/// There is no automatic timeout or recovery between these states.
/// The caller owns the [`DirectModeState::Active`] period and must exit it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DirectModeState {
    /// No direct mode was entered yet.
    #[default]
    Idle,
    /// The entry sequence is being written (or was aborted by a bus error).
    Entering(DirectMode),
    /// The entry sequence completed and the bus is held selected.
    Active(DirectMode),
    /// The bus was released and the exit sequence completed.
    Exited(DirectMode),
}

#[cfg(feature = "defmt")]
impl defmt::Format for DirectModeState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DirectModeState::Idle => defmt::write!(fmt, "Idle"),
            DirectModeState::Entering(mode) => defmt::write!(fmt, "Entering {}", mode),
            DirectModeState::Active(mode) => defmt::write!(fmt, "Active {}", mode),
            DirectModeState::Exited(mode) => defmt::write!(fmt, "Exited {}", mode),
        }
    }
}

impl Display for DirectModeState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            DirectModeState::Idle => write!(f, "Idle"),
            DirectModeState::Entering(mode) => write!(f, "Entering {mode}"),
            DirectModeState::Active(mode) => write!(f, "Active {mode}"),
            DirectModeState::Exited(mode) => write!(f, "Exited {mode}"),
        }
    }
}
