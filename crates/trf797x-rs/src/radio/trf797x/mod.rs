use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};
pub(crate) mod bit_fields;
mod constants;
mod control;
mod details;
mod direct_mode;
mod fifo;
mod init;
mod status;
mod transceive;
pub use constants::{commands, mnemonics, registers};
pub use direct_mode::DirectModeSession;

use super::ReaderConfig;
use crate::{irq::IrqFlags, DirectModeState, FifoStatus};

/// An collection of error types to describe hardware malfunctions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrfError<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error (on the chip select pin).
    Gpo(DO),
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO).
    ///
    /// [`RfidInit::init()`](fn@crate::radio::prelude::RfidInit::init) returns this when
    /// the chip never reports its power-on register value.
    BinaryCorruption,
}

/// This struct implements the [`Rfid*` traits](mod@crate::radio::prelude)
/// for the TRF7970A transceiver.
///
/// Additionally, the chip's direct modes are implemented as functions specific to the TRF7970A.
///
/// Unlike most SPI drivers, this one needs the [`SpiBus`] and its chip select pin separately
/// because the direct modes keep the chip selected between two function calls.
pub struct Trf797x<'irq, SPI, CS, DELAY> {
    _spi: SPI,
    _cs_pin: CS,
    _delay_impl: DELAY,
    _irq: &'irq IrqFlags,
    _buf: [u8; 128],
    _config: ReaderConfig,
    _fifo_status: FifoStatus,
    _direct_mode: DirectModeState,
}

impl<'irq, SPI, CS, DELAY> Trf797x<'irq, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate a [`Trf797x`] object for use on the specified `spi` bus.
    ///
    /// The `cs_pin` is the chip's (active low) slave select pin.
    /// The `irq` indicators must be signaled by the interrupt handler of the chip's IRQ pin
    /// (see [`IrqFlags::signal()`]).
    ///
    /// Nothing is sent to the chip until
    /// [`init()`](fn@crate::radio::prelude::RfidInit::init) is called.
    pub fn new(spi: SPI, cs_pin: CS, delay_impl: DELAY, irq: &'irq IrqFlags) -> Self {
        Trf797x {
            _spi: spi,
            _cs_pin: cs_pin,
            _delay_impl: delay_impl,
            _irq: irq,
            _buf: [0u8; 128],
            _config: ReaderConfig::default(),
            _fifo_status: FifoStatus::new(),
            _direct_mode: DirectModeState::Idle,
        }
    }

    /// Give back the bus, the chip select pin and the delay implementation.
    pub fn release(self) -> (SPI, CS, DELAY) {
        (self._spi, self._cs_pin, self._delay_impl)
    }

    /// The state of the most recent direct mode session.
    pub fn direct_mode_state(&self) -> DirectModeState {
        self._direct_mode
    }

    fn select(&mut self) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        self._cs_pin.set_low().map_err(TrfError::Gpo)
    }

    /// Release the chip, even if the bus fails to flush.
    fn deselect(&mut self) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        // all bytes must be clocked out before the chip is released
        let flushed = self._spi.flush().map_err(TrfError::Spi);
        let released = self._cs_pin.set_high().map_err(TrfError::Gpo);
        flushed.and(released)
    }

    /// Write `self._buf[..write_len]`, then read `read_len` bytes into
    /// `self._buf[write_len..]`, all within one chip select window.
    ///
    /// The chip is deselected even if the transfer fails.
    fn spi_transfer(
        &mut self,
        write_len: usize,
        read_len: usize,
    ) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        self.select()?;
        let result = self.spi_exchange(write_len, read_len);
        let released = self.deselect();
        result.and(released)
    }

    fn spi_exchange(
        &mut self,
        write_len: usize,
        read_len: usize,
    ) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        self._spi
            .write(&self._buf[..write_len])
            .map_err(TrfError::Spi)?;
        if read_len > 0 {
            self._spi
                .read(&mut self._buf[write_len..write_len + read_len])
                .map_err(TrfError::Spi)?;
        }
        Ok(())
    }

    /// Send a direct command (a command word without data).
    fn spi_command(&mut self, command: u8) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        self._buf[0] = mnemonics::COMMAND | (command & mnemonics::ADDRESS_MASK);
        self.spi_transfer(1, 0)
    }

    /// Read a single register. The value is returned and also stored in `self._buf[1]`.
    fn spi_read(&mut self, register: u8) -> Result<u8, TrfError<SPI::Error, CS::Error>> {
        self._buf[0] = mnemonics::READ | (register & mnemonics::ADDRESS_MASK);
        self.spi_transfer(1, 1)?;
        Ok(self._buf[1])
    }

    /// Read `len` consecutive registers (or FIFO bytes) into `self._buf[1..=len]`.
    fn spi_read_cont(
        &mut self,
        register: u8,
        len: usize,
    ) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        self._buf[0] =
            mnemonics::READ | mnemonics::CONTINUOUS | (register & mnemonics::ADDRESS_MASK);
        self.spi_transfer(1, len)
    }

    fn spi_write_byte(
        &mut self,
        register: u8,
        byte: u8,
    ) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        self._buf[0] = register & mnemonics::ADDRESS_MASK;
        self._buf[1] = byte;
        self.spi_transfer(2, 0)
    }
}
