use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use super::{commands, mnemonics, registers, Trf797x, TrfError};
use crate::radio::{
    config::poll_count,
    prelude::{RfidFifo, RfidStatus, RfidTransceive},
};

impl<SPI, CS, DELAY> RfidTransceive for Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    type TransceiveErrorType = TrfError<SPI::Error, CS::Error>;

    /// See [`RfidTransceive::transceive_bits()`] for implementation-agnostic detail.
    ///
    /// The IRQ indicators are checked every
    /// [`ReaderConfig::bit_poll_slice()`](fn@crate::radio::ReaderConfig::bit_poll_slice)
    /// microseconds (10 by default).
    fn transceive_bits(
        &mut self,
        data: u8,
        bits: u8,
        rx: &mut [u8],
        timeout_ms: u16,
        crc: bool,
    ) -> Result<u8, Self::TransceiveErrorType> {
        if bits > Self::MAX_TX_BITS {
            return Ok(0);
        }
        // LSB of the length flags a final byte with fewer than 8 bits
        let header_len = self.load_tx_header(crc, 0, (bits << 1) | 1);
        self._buf[header_len] = data;
        let slice = self._config.bit_poll_slice();
        self.exchange(header_len + 1, rx, timeout_ms, slice)
    }

    /// See [`RfidTransceive::transceive_bytes()`] for implementation-agnostic detail.
    ///
    /// The IRQ indicators are checked every
    /// [`ReaderConfig::byte_poll_slice()`](fn@crate::radio::ReaderConfig::byte_poll_slice)
    /// microseconds (100 by default).
    fn transceive_bytes(
        &mut self,
        tx: &[u8],
        rx: &mut [u8],
        timeout_ms: u16,
        crc: bool,
    ) -> Result<u8, Self::TransceiveErrorType> {
        if tx.len() > Self::MAX_TX_PAYLOAD {
            return Ok(0);
        }
        let count = tx.len() as u8;
        let header_len = self.load_tx_header(crc, (count & 0xF0) >> 4, (count << 4) & 0xF0);
        self._buf[header_len..header_len + tx.len()].copy_from_slice(tx);
        let slice = self._config.byte_poll_slice();
        self.exchange(header_len + tx.len(), rx, timeout_ms, slice)
    }
}

impl<SPI, CS, DELAY> Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    /// Put the commands that precede a TX payload into `self._buf`.
    ///
    /// Returns the offset at which the payload starts.
    fn load_tx_header(&mut self, crc: bool, length_msb: u8, length_lsb: u8) -> usize {
        self._buf[0] = mnemonics::COMMAND | commands::RESET_FIFO;
        self._buf[1] = mnemonics::COMMAND
            | if crc {
                commands::TRANSMIT_CRC
            } else {
                commands::TRANSMIT_NO_CRC
            };
        // TX length bytes, then the FIFO, in one continuous write
        self._buf[2] = mnemonics::CONTINUOUS | registers::TX_LENGTH_BYTE_1;
        self._buf[3] = length_msb;
        self._buf[4] = length_lsb;
        5
    }

    /// Send `self._buf[..tx_len]`, wait for the end of reception, then drain the FIFO into `rx`.
    fn exchange(
        &mut self,
        tx_len: usize,
        rx: &mut [u8],
        timeout_ms: u16,
        slice_us: u32,
    ) -> Result<u8, TrfError<SPI::Error, CS::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!(
            "transceive: {=usize} bytes out, timeout {=u16} ms",
            tx_len,
            timeout_ms
        );
        let irq = self._irq;
        let release_irq = |e: TrfError<SPI::Error, CS::Error>| {
            irq.clear();
            e
        };

        self.spi_transfer(tx_len, 0).map_err(release_irq)?;
        irq.clear();
        let rx_end = self
            .wait_for_rx_end(timeout_ms, slice_us)
            .map_err(release_irq)?;
        irq.clear();

        if !rx_end {
            #[cfg(feature = "defmt")]
            defmt::debug!("transceive: no reply within {=u16} ms", timeout_ms);
            return Ok(0);
        }
        self.drain_fifo(rx)
    }

    /// Poll the IRQ indicators every `slice_us` for at most `timeout_ms`.
    ///
    /// Returns `true` if the chip reported the end of a reception.
    fn wait_for_rx_end(
        &mut self,
        timeout_ms: u16,
        slice_us: u32,
    ) -> Result<bool, TrfError<SPI::Error, CS::Error>> {
        for _ in 0..poll_count(timeout_ms, slice_us) {
            if self._irq.take_pending() {
                let status = self.read_irq_status()?;
                #[cfg(feature = "defmt")]
                defmt::trace!("transceive: {}", status);
                if status.is_rx_end() {
                    self._irq.set_rx_end();
                    break;
                } else if status.is_tx_end() {
                    // the tag's reply may still come; it must land in an empty FIFO
                    self.reset_fifo()?;
                }
            }
            self._delay_impl.delay_us(slice_us);
        }
        Ok(self._irq.take_rx_end())
    }
}
