use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use super::{
    bit_fields::{ChipStateControl, IsoControl},
    commands, mnemonics, registers, Trf797x, TrfError,
};
use crate::radio::{
    prelude::{RfidFifo, RfidInit, RfidStatus},
    ReaderConfig,
};

impl<SPI, CS, DELAY> RfidInit for Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = TrfError<SPI::Error, CS::Error>;

    /// Initialize the chip using the [`SpiBus`] and [`OutputPin`] given to
    /// [`Trf797x::new()`].
    ///
    /// The chip is soft-initialized until its modulator control register reads back
    /// its power-on value, at most
    /// [`ReaderConfig::init_attempts()`](fn@crate::radio::ReaderConfig::init_attempts)
    /// times. Then the stored [`ReaderConfig`] is applied
    /// ([`ReaderConfig::default()`] unless [`RfidInit::with_config()`] was called).
    ///
    /// Returns [`TrfError::BinaryCorruption`] if the chip never reported ready.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        let mut ready = false;
        for _ in 0..self._config.init_attempts() {
            self.spi_command(commands::SOFT_INIT)?;
            self.spi_command(commands::IDLE)?;
            self._delay_impl.delay_ms(1);
            if self.spi_read(registers::MODULATOR_CONTROL)? == mnemonics::MODULATOR_POR {
                ready = true;
                break;
            }
        }
        if !ready {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "init: modulator control never read {=u8:#04X}",
                mnemonics::MODULATOR_POR
            );
            return Err(TrfError::BinaryCorruption);
        }
        let config = self._config;
        self.with_config(&config)
    }

    fn with_config(&mut self, config: &ReaderConfig) -> Result<(), Self::ConfigErrorType> {
        // 5 V supply and RF field on while the FIFO is reset
        let powered = ChipStateControl::new().with_vrs_5v(true).with_rf_on(true);
        self.spi_write_byte(registers::CHIP_STATE_CONTROL, powered.into_bits())?;
        self.spi_write_byte(registers::MODULATOR_CONTROL, config.modulator())?;
        self.spi_write_byte(registers::REGULATOR_CONTROL, config.regulator())?;
        self.reset_fifo()?;

        self.spi_write_byte(registers::CHIP_STATE_CONTROL, config.chip_state())?;
        self.spi_write_byte(registers::IRQ_MASK, config.irq_mask())?;
        self.spi_write_byte(registers::FIFO_IRQ_LEVELS, config.fifo_irq_levels())?;
        self.reset_irq_status()?;
        self._config = *config;
        Ok(())
    }
}

impl<SPI, CS, DELAY> Trf797x<'_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    /// Select the air protocol (and data rate) of reader mode.
    ///
    /// `value` is written to the ISO control register.
    /// A `value` that selects NFC or card emulation (bit 5 set) is ignored.
    pub fn write_iso_control(
        &mut self,
        value: u8,
    ) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        if IsoControl::from_bits(value).rfid() {
            return Ok(());
        }
        self.spi_write_byte(registers::ISO_CONTROL, value)
    }
}
