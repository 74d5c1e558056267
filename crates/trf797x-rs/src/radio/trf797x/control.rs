use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use super::{bit_fields::ChipStateControl, commands, registers, Trf797x, TrfError};
use crate::radio::prelude::RfidControl;

impl<SPI, CS, DELAY> RfidControl for Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    type ControlErrorType = TrfError<SPI::Error, CS::Error>;

    fn rf_on(&mut self) -> Result<(), Self::ControlErrorType> {
        let state = self.spi_read(registers::CHIP_STATE_CONTROL)?;
        let state = ChipStateControl::from_bits(state & ChipStateControl::RF_ON_MASK)
            .with_rf_on(true);
        self.spi_write_byte(registers::CHIP_STATE_CONTROL, state.into_bits())?;
        // the field needs at least 5 ms to settle
        self._delay_impl.delay_ms(6);
        Ok(())
    }

    fn rf_off(&mut self) -> Result<(), Self::ControlErrorType> {
        let state = self.spi_read(registers::CHIP_STATE_CONTROL)?;
        self.spi_write_byte(
            registers::CHIP_STATE_CONTROL,
            state & ChipStateControl::RF_OFF_MASK,
        )
    }

    fn enable_slot_counter(&mut self) -> Result<(), Self::ControlErrorType> {
        let mask = self.spi_read(registers::IRQ_MASK)?;
        self.spi_write_byte(registers::IRQ_MASK, mask | 1)
    }

    fn disable_slot_counter(&mut self) -> Result<(), Self::ControlErrorType> {
        let mask = self.spi_read(registers::IRQ_MASK)?;
        self.spi_write_byte(registers::IRQ_MASK, mask & !1)
    }

    fn run_decoders(&mut self) -> Result<(), Self::ControlErrorType> {
        self.spi_command(commands::RUN_DECODERS)
    }

    fn stop_decoders(&mut self) -> Result<(), Self::ControlErrorType> {
        self.spi_command(commands::STOP_DECODERS)
    }

    fn transmit_next_slot(&mut self) -> Result<(), Self::ControlErrorType> {
        self.spi_command(commands::TRANSMIT_NEXT_SLOT)
    }
}
