use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::radio::{prelude::RfidFifo, Trf797x, TrfError};
use crate::FifoStatus;

use super::{commands, registers};

impl<SPI, CS, DELAY> RfidFifo for Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = TrfError<SPI::Error, CS::Error>;

    fn reset_fifo(&mut self) -> Result<(), Self::FifoErrorType> {
        self.spi_command(commands::RESET_FIFO)
    }

    fn get_fifo_status(&mut self) -> Result<FifoStatus, Self::FifoErrorType> {
        let status = FifoStatus::from_bits(self.spi_read(registers::FIFO_CONTROL)?);
        self._fifo_status = status;
        Ok(status)
    }

    fn last_fifo_status(&self) -> FifoStatus {
        self._fifo_status
    }
}

impl<SPI, CS, DELAY> Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    /// Copy what the chip received into `rx`, but never more than `rx.len()` bytes.
    ///
    /// Returns the number of bytes copied.
    pub(super) fn drain_fifo(
        &mut self,
        rx: &mut [u8],
    ) -> Result<u8, TrfError<SPI::Error, CS::Error>> {
        let status = self.get_fifo_status()?;
        if status.overflow() {
            #[cfg(feature = "defmt")]
            defmt::warn!("FIFO overflow, only {=u8} bytes are readable", status.count());
        }
        let len = (status.count() as usize).min(rx.len());
        if len > 0 {
            self.spi_read_cont(registers::FIFO, len)?;
            rx[..len].copy_from_slice(&self._buf[1..=len]);
        }
        Ok(len as u8)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, registers, RfidFifo};
    use crate::{cs_test_expects, spi_test_expects, test::mk_reader, FifoStatus, IrqFlags};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use std::vec;

    #[test]
    pub fn reset_fifo() {
        let spi_expectations = spi_test_expects![(vec![0x80 | commands::RESET_FIFO], vec![]),];
        let cs_expectations = cs_test_expects!(1);
        let irq = IrqFlags::new();
        let mocks = mk_reader(&irq, NoopDelay, &spi_expectations, &cs_expectations);
        let (mut reader, mut spi, mut cs_pin) = (mocks.0, mocks.1, mocks.2);
        reader.reset_fifo().unwrap();
        spi.done();
        cs_pin.done();
    }

    #[test]
    pub fn get_fifo_status() {
        let spi_expectations = spi_test_expects![
            (vec![0x40 | registers::FIFO_CONTROL], vec![0x85u8]),
        ];
        let cs_expectations = cs_test_expects!(1);
        let irq = IrqFlags::new();
        let mocks = mk_reader(&irq, NoopDelay, &spi_expectations, &cs_expectations);
        let (mut reader, mut spi, mut cs_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(reader.last_fifo_status(), FifoStatus::new());
        let status = reader.get_fifo_status().unwrap();
        assert_eq!(status.count(), 5);
        assert!(status.overflow());
        assert_eq!(reader.last_fifo_status(), status);
        spi.done();
        cs_pin.done();
    }

    fn drain_parametrized(fifo_status: u8, capacity: usize, expected: usize) {
        let fifo = [0xA0u8, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6];
        let mut spi_expectations =
            spi_test_expects![(vec![0x40 | registers::FIFO_CONTROL], vec![fifo_status]),];
        let mut windows = 1;
        if expected > 0 {
            spi_expectations.extend(spi_test_expects![(
                vec![0x60 | registers::FIFO],
                fifo[..expected].to_vec()
            ),]);
            windows += 1;
        }
        let cs_expectations = cs_test_expects!(windows);
        let irq = IrqFlags::new();
        let mocks = mk_reader(&irq, NoopDelay, &spi_expectations, &cs_expectations);
        let (mut reader, mut spi, mut cs_pin) = (mocks.0, mocks.1, mocks.2);
        let mut rx = vec![0u8; capacity];
        assert_eq!(reader.drain_fifo(&mut rx).unwrap() as usize, expected);
        assert_eq!(rx[..expected], fifo[..expected]);
        spi.done();
        cs_pin.done();
    }

    #[test]
    fn drain_all() {
        drain_parametrized(4, 7, 4);
    }

    #[test]
    fn drain_clamped_to_capacity() {
        drain_parametrized(7, 3, 3);
    }

    #[test]
    fn drain_overflow_masked() {
        drain_parametrized(0x85, 7, 5);
    }

    #[test]
    fn drain_overflow_clamped() {
        drain_parametrized(0x85, 2, 2);
    }

    #[test]
    fn drain_empty_fifo() {
        drain_parametrized(0, 7, 0);
    }

    #[test]
    fn drain_no_capacity() {
        drain_parametrized(0x03, 0, 0);
    }
}
