use super::{Trf797x, TrfError};
use crate::radio::prelude::RfidDetails;
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

#[cfg(any(all(feature = "defmt", target_os = "none"), feature = "std"))]
use super::{
    bit_fields::{ChipStateControl, ModulatorControl},
    registers,
};
#[cfg(any(all(feature = "defmt", target_os = "none"), feature = "std"))]
use crate::FifoStatus;

#[cfg(feature = "std")]
extern crate std;

impl<SPI, CS, DELAY> RfidDetails for Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    type DetailsErrorType = TrfError<SPI::Error, CS::Error>;

    #[cfg(feature = "defmt")]
    #[cfg(target_os = "none")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let state = ChipStateControl::from_bits(self.spi_read(registers::CHIP_STATE_CONTROL)?);
        defmt::println!("Chip state control________{=u8:#04X}", state.into_bits());
        defmt::println!("    5 V supply____________{=bool}", state.vrs_5v());
        defmt::println!("    RF field on___________{=bool}", state.rf_on());
        defmt::println!("    AGC on________________{=bool}", state.agc_on());
        defmt::println!("    Standby_______________{=bool}", state.standby());

        let iso = self.spi_read(registers::ISO_CONTROL)?;
        defmt::println!("ISO control_______________{=u8:#04X}", iso);

        let modulator = ModulatorControl::from_bits(self.spi_read(registers::MODULATOR_CONTROL)?);
        defmt::println!("Modulator control_________{=u8:#04X}", modulator.into_bits());
        defmt::println!("    Modulation____________{=u8}", modulator.modulation());
        defmt::println!("    SYS_CLK setting_______{=u8}", modulator.sys_clk());

        let regulator = self.spi_read(registers::REGULATOR_CONTROL)?;
        defmt::println!("Regulator control_________{=u8:#04X}", regulator);

        let irq_mask = self.spi_read(registers::IRQ_MASK)?;
        defmt::println!("IRQ mask__________________0b{=0..8}", irq_mask);
        defmt::println!("    Slot counter__________{=bool}", irq_mask & 1 > 0);

        let pulse = self.spi_read(registers::TX_PULSE_LENGTH_CONTROL)?;
        defmt::println!("TX pulse length___________{=u8:#04X}", pulse);
        let no_response = self.spi_read(registers::RX_NO_RESPONSE_WAIT_TIME)?;
        defmt::println!("RX no response wait_______{=u8:#04X}", no_response);
        let rx_wait = self.spi_read(registers::RX_WAIT_TIME)?;
        defmt::println!("RX wait time______________{=u8:#04X}", rx_wait);

        let fifo = FifoStatus::from_bits(self.spi_read(registers::FIFO_CONTROL)?);
        defmt::println!("FIFO______________________{}", fifo);
        defmt::println!("Direct mode_______________{}", self._direct_mode);
        Ok(())
    }

    #[cfg(not(any(all(feature = "defmt", target_os = "none"), feature = "std")))]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        Ok(())
    }

    #[cfg(not(all(feature = "defmt", target_os = "none")))]
    #[cfg(feature = "std")]
    fn print_details(&mut self) -> Result<(), Self::DetailsErrorType> {
        let state = ChipStateControl::from_bits(self.spi_read(registers::CHIP_STATE_CONTROL)?);
        std::println!("Chip state control________{:#04X}", state.into_bits());
        std::println!("    5 V supply____________{}", state.vrs_5v());
        std::println!("    RF field on___________{}", state.rf_on());
        std::println!("    AGC on________________{}", state.agc_on());
        std::println!("    Standby_______________{}", state.standby());

        let iso = self.spi_read(registers::ISO_CONTROL)?;
        std::println!("ISO control_______________{iso:#04X}");

        let modulator = ModulatorControl::from_bits(self.spi_read(registers::MODULATOR_CONTROL)?);
        std::println!("Modulator control_________{:#04X}", modulator.into_bits());
        std::println!("    Modulation____________{}", modulator.modulation());
        std::println!("    SYS_CLK setting_______{}", modulator.sys_clk());

        let regulator = self.spi_read(registers::REGULATOR_CONTROL)?;
        std::println!("Regulator control_________{regulator:#04X}");

        let irq_mask = self.spi_read(registers::IRQ_MASK)?;
        std::println!("IRQ mask__________________{irq_mask:#010b}");
        std::println!("    Slot counter__________{}", irq_mask & 1 > 0);

        let pulse = self.spi_read(registers::TX_PULSE_LENGTH_CONTROL)?;
        std::println!("TX pulse length___________{pulse:#04X}");
        let no_response = self.spi_read(registers::RX_NO_RESPONSE_WAIT_TIME)?;
        std::println!("RX no response wait_______{no_response:#04X}");
        let rx_wait = self.spi_read(registers::RX_WAIT_TIME)?;
        std::println!("RX wait time______________{rx_wait:#04X}");

        let fifo = FifoStatus::from_bits(self.spi_read(registers::FIFO_CONTROL)?);
        std::println!("FIFO______________________{fifo}");
        std::println!("Direct mode_______________{}", self._direct_mode);
        Ok(())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::RfidDetails;
    use crate::{cs_test_expects, test::mk_reader, IrqFlags};
    use embedded_hal_mock::eh1::delay::NoopDelay;

    #[cfg(feature = "std")]
    use super::registers;
    #[cfg(feature = "std")]
    use crate::spi_test_expects;
    #[cfg(feature = "std")]
    use std::vec;

    #[test]
    #[cfg(not(feature = "std"))]
    fn print_nothing() {
        let irq = IrqFlags::new();
        let cs_expectations = cs_test_expects!(0);
        let mocks = mk_reader(&irq, NoopDelay, &[], &cs_expectations);
        let (mut reader, mut spi, mut cs_pin) = (mocks.0, mocks.1, mocks.2);
        reader.print_details().unwrap();
        spi.done();
        cs_pin.done();
    }

    #[test]
    #[cfg(feature = "std")]
    fn print_details() {
        let spi_expectations = spi_test_expects![
            (vec![0x40 | registers::CHIP_STATE_CONTROL], vec![0x21u8]),
            (vec![0x40 | registers::ISO_CONTROL], vec![0x88u8]),
            (vec![0x40 | registers::MODULATOR_CONTROL], vec![0x31u8]),
            (vec![0x40 | registers::REGULATOR_CONTROL], vec![0x87u8]),
            (vec![0x40 | registers::IRQ_MASK], vec![0x3Fu8]),
            (vec![0x40 | registers::TX_PULSE_LENGTH_CONTROL], vec![0x20u8]),
            (vec![0x40 | registers::RX_NO_RESPONSE_WAIT_TIME], vec![0x0Eu8]),
            (vec![0x40 | registers::RX_WAIT_TIME], vec![0x07u8]),
            (vec![0x40 | registers::FIFO_CONTROL], vec![0x83u8]),
        ];
        let cs_expectations = cs_test_expects!(9);
        let irq = IrqFlags::new();
        let mocks = mk_reader(&irq, NoopDelay, &spi_expectations, &cs_expectations);
        let (mut reader, mut spi, mut cs_pin) = (mocks.0, mocks.1, mocks.2);
        reader.print_details().unwrap();
        spi.done();
        cs_pin.done();
    }
}
