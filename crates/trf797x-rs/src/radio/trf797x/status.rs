use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use crate::{
    radio::{prelude::RfidStatus, Trf797x, TrfError},
    IrqStatus,
};

use super::registers;

impl<SPI, CS, DELAY> RfidStatus for Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    type StatusErrorType = TrfError<SPI::Error, CS::Error>;

    fn read_irq_status(&mut self) -> Result<IrqStatus, Self::StatusErrorType> {
        // the IRQ mask register is read as a dummy
        self.spi_read_cont(registers::IRQ_STATUS, 2)?;
        Ok(IrqStatus::from_bits(self._buf[1]))
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, RfidStatus};
    use crate::{cs_test_expects, spi_test_expects, test::mk_reader, IrqFlags};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use std::vec;

    #[test]
    pub fn read_irq_status() {
        let spi_expectations = spi_test_expects![
            // read IRQ status and the IRQ mask (dummy)
            (vec![0x60 | registers::IRQ_STATUS], vec![0xC0u8, 0x3Eu8]),
        ];
        let cs_expectations = cs_test_expects!(1);
        let irq = IrqFlags::new();
        let mocks = mk_reader(&irq, NoopDelay, &spi_expectations, &cs_expectations);
        let (mut reader, mut spi, mut cs_pin) = (mocks.0, mocks.1, mocks.2);
        let status = reader.read_irq_status().unwrap();
        assert!(status.tx_end());
        assert!(status.rx_end());
        assert!(!status.no_response());
        spi.done();
        cs_pin.done();
    }

    #[test]
    pub fn reset_irq_status() {
        let spi_expectations = spi_test_expects![
            (vec![0x6Cu8], vec![0x01u8, 0x3Eu8]),
        ];
        let cs_expectations = cs_test_expects!(1);
        let irq = IrqFlags::new();
        let mocks = mk_reader(&irq, NoopDelay, &spi_expectations, &cs_expectations);
        let (mut reader, mut spi, mut cs_pin) = (mocks.0, mocks.1, mocks.2);
        reader.reset_irq_status().unwrap();
        spi.done();
        cs_pin.done();
    }
}
