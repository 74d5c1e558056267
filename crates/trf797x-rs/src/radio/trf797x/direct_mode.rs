use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiBus};

use super::{
    bit_fields::{ChipStateControl, IsoControl, ModulatorControl},
    registers, Trf797x, TrfError,
};
use crate::{
    radio::prelude::{RfidControl, RfidFifo, RfidInit},
    DirectMode, DirectModeState,
};

/// An open direct mode session, as returned by
/// [`Trf797x::enter_direct_mode0()`] or [`Trf797x::enter_direct_mode1()`].
///
/// The chip stays selected until [`DirectModeSession::exit()`] is called.
/// While the session is open, the [`Trf797x`] it borrows cannot be used.
///
/// There is no timeout. If the session is dropped without calling
/// [`DirectModeSession::exit()`], the chip remains selected (and in direct mode).
#[must_use = "the chip stays selected until the session is exited"]
pub struct DirectModeSession<'a, 'irq, SPI, CS, DELAY> {
    reader: &'a mut Trf797x<'irq, SPI, CS, DELAY>,
    mode: DirectMode,
}

impl<SPI, CS, DELAY> DirectModeSession<'_, '_, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    /// The direct mode this session holds.
    pub fn mode(&self) -> DirectMode {
        self.mode
    }

    /// Release the chip and return it to its normal (reader) operation.
    ///
    /// For [`DirectMode::Mode1`], the special function register is cleared, the IRQ
    /// status is read (discarded) and the ISO control register is restored to ISO14443A.
    pub fn exit(self) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        let reader = self.reader;
        reader.deselect()?;
        if self.mode == DirectMode::Mode1 {
            reader.spi_write_byte(registers::SPECIAL_FUNCTION, 0)?;
            reader.spi_read(registers::IRQ_STATUS)?;
            reader.spi_write_byte(
                registers::ISO_CONTROL,
                IsoControl::protocol_default().into_bits(),
            )?;
        }
        reader._direct_mode = DirectModeState::Exited(self.mode);
        #[cfg(feature = "defmt")]
        defmt::debug!("{} exited", self.mode);
        Ok(())
    }
}

impl<'irq, SPI, CS, DELAY> Trf797x<'irq, SPI, CS, DELAY>
where
    SPI: SpiBus,
    CS: OutputPin,
    DELAY: DelayNs,
{
    /// Enter Direct Mode 0 (transmit bypass).
    ///
    /// SYS_CLK outputs 13.56 MHz and pin 12 becomes the OOK modulation input,
    /// so the host drives the modulation itself.
    /// The chip stays selected until the returned session is exited.
    ///
    /// If the bus fails during the entry sequence, the chip is deselected (as far as
    /// possible) and [`Trf797x::direct_mode_state()`] stays
    /// [`DirectModeState::Entering`].
    pub fn enter_direct_mode0(
        &mut self,
    ) -> Result<DirectModeSession<'_, 'irq, SPI, CS, DELAY>, TrfError<SPI::Error, CS::Error>> {
        self.enter_direct_mode(DirectMode::Mode0)
    }

    /// Enter Direct Mode 1 (receive bypass).
    ///
    /// The demodulated subcarrier is output to the host.
    /// Use [`Trf797x::configure_direct_modes()`] beforehand to route it to the MOD pin.
    /// The chip stays selected until the returned session is exited.
    ///
    /// Errors are handled as in [`Trf797x::enter_direct_mode0()`].
    pub fn enter_direct_mode1(
        &mut self,
    ) -> Result<DirectModeSession<'_, 'irq, SPI, CS, DELAY>, TrfError<SPI::Error, CS::Error>> {
        self.enter_direct_mode(DirectMode::Mode1)
    }

    fn enter_direct_mode(
        &mut self,
        mode: DirectMode,
    ) -> Result<DirectModeSession<'_, 'irq, SPI, CS, DELAY>, TrfError<SPI::Error, CS::Error>> {
        self._direct_mode = DirectModeState::Entering(mode);
        if let Err(e) = self.load_direct_mode(mode) {
            #[cfg(feature = "defmt")]
            defmt::warn!("{} entry aborted", mode);
            if self.deselect().is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("{} entry aborted, chip may still be selected", mode);
            }
            return Err(e);
        }
        self._direct_mode = DirectModeState::Active(mode);
        #[cfg(feature = "defmt")]
        defmt::debug!("{} active", mode);
        Ok(DirectModeSession { reader: self, mode })
    }

    fn load_direct_mode(
        &mut self,
        mode: DirectMode,
    ) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        if mode == DirectMode::Mode0 {
            self.spi_write_byte(
                registers::MODULATOR_CONTROL,
                ModulatorControl::direct_mode_0().into_bits(),
            )?;
        }
        let iso = IsoControl::from_bits(self.spi_read(registers::ISO_CONTROL)?)
            .with_direct_mode_1(mode == DirectMode::Mode1);
        self.spi_write_byte(registers::ISO_CONTROL, iso.into_bits())?;

        // a single write that keeps the chip selected, one byte per transfer,
        // followed by 8 extra clock cycles
        self.select()?;
        for byte in [
            registers::CHIP_STATE_CONTROL,
            ChipStateControl::direct_mode().into_bits(),
            0,
        ] {
            self._spi.write(&[byte]).map_err(TrfError::Spi)?;
        }
        self._spi.flush().map_err(TrfError::Spi)
    }

    /// Re-initialize the chip with the register values used around direct mode sessions.
    ///
    /// This configures ISO14443B at 106 kbps with SYS_CLK at 3.39 MHz and OOK 100%
    /// modulation. The MOD pin becomes the receiver's (digital) subcarrier output.
    /// The decoders are restarted at the end.
    pub fn configure_direct_modes(&mut self) -> Result<(), TrfError<SPI::Error, CS::Error>> {
        self.reset_fifo()?;
        self.init()?;
        let powered = ChipStateControl::new().with_vrs_5v(true).with_rf_on(true);
        self.spi_write_byte(registers::CHIP_STATE_CONTROL, powered.into_bits())?;
        self.spi_write_byte(
            registers::ISO_CONTROL,
            IsoControl::direct_mode_setup().into_bits(),
        )?;
        self.spi_write_byte(
            registers::MODULATOR_CONTROL,
            ModulatorControl::direct_mode_setup().into_bits(),
        )?;
        self.spi_write_byte(registers::REGULATOR_CONTROL, 0x87)?;
        // 100 kHz to 1.5 MHz bandpass, no gain reduction, AGC without limit
        self.spi_write_byte(registers::RX_SPECIAL_SETTINGS, 0x31)?;
        // MOD pin outputs the receiver's subcarrier
        self.spi_write_byte(registers::TEST_SETTINGS_1, 0x40)?;
        self.stop_decoders()?;
        self.run_decoders()
    }
}
