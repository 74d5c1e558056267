use crate::radio::trf797x::bit_fields::{ChipStateControl, ModulatorControl};

/// An object to configure the chip and the transceive engine.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`ReaderConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use trf797x::radio::ReaderConfig;
///
/// let config = ReaderConfig::default()
///     .with_supply_5v(false)
///     .with_byte_poll_slice(50);
/// assert_eq!(config.byte_poll_slice(), 50);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    chip_state: ChipStateControl,
    modulator: ModulatorControl,
    regulator: u8,
    irq_mask: u8,
    fifo_irq_levels: u8,
    bit_poll_slice: u32,
    byte_poll_slice: u32,
    init_attempts: u8,
}

impl Default for ReaderConfig {
    /// Instantiate a [`ReaderConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`ReaderConfig::supply_5v()`] | `false` |
    /// | [`ReaderConfig::rf_on()`] | `false` |
    /// | [`ReaderConfig::agc()`] | `false` |
    /// | [`ReaderConfig::modulation()`] | `0` (ASK 10%) |
    /// | [`ReaderConfig::sys_clk()`] | `0` (disabled) |
    /// | [`ReaderConfig::regulator()`] | `0x87` (automatic, 5 V) |
    /// | [`ReaderConfig::irq_mask()`] | `0x3E` |
    /// | [`ReaderConfig::fifo_irq_levels()`] | `0x0F` (96 bytes RX, 32 bytes TX) |
    /// | [`ReaderConfig::bit_poll_slice()`] | `10` microseconds |
    /// | [`ReaderConfig::byte_poll_slice()`] | `100` microseconds |
    /// | [`ReaderConfig::init_attempts()`] | `10` |
    fn default() -> Self {
        Self {
            // 3 V supply, RF field off, AGC off
            chip_state: ChipStateControl::new(),
            modulator: ModulatorControl::new(),
            regulator: 0x87,
            // all IRQ sources except "no response"; collision position MSBs cleared
            irq_mask: 0x3E,
            fifo_irq_levels: 0x0F,
            bit_poll_slice: 10,
            byte_poll_slice: 100,
            init_attempts: 10,
        }
    }
}

impl ReaderConfig {
    /// Returns the value set by [`ReaderConfig::with_supply_5v()`].
    pub const fn supply_5v(&self) -> bool {
        self.chip_state.vrs_5v()
    }

    /// Select a 5 V (instead of 3 V) supply in the chip state control register.
    pub fn with_supply_5v(self, enable: bool) -> Self {
        Self {
            chip_state: self.chip_state.with_vrs_5v(enable),
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_rf_on()`].
    pub const fn rf_on(&self) -> bool {
        self.chip_state.rf_on()
    }

    /// Leave the RF field on after [`RfidInit::with_config()`](fn@crate::radio::prelude::RfidInit::with_config).
    ///
    /// See also [`RfidControl::rf_on()`](fn@crate::radio::prelude::RfidControl::rf_on).
    pub fn with_rf_on(self, enable: bool) -> Self {
        Self {
            chip_state: self.chip_state.with_rf_on(enable),
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_agc()`].
    pub const fn agc(&self) -> bool {
        self.chip_state.agc_on()
    }

    /// Enable or disable the receiver's automatic gain control.
    pub fn with_agc(self, enable: bool) -> Self {
        Self {
            chip_state: self.chip_state.with_agc_on(enable),
            ..self
        }
    }

    pub(crate) const fn chip_state(&self) -> u8 {
        self.chip_state.into_bits()
    }

    /// Returns the value set by [`ReaderConfig::with_modulation()`].
    pub const fn modulation(&self) -> u8 {
        self.modulator.modulation()
    }

    /// The modulation depth and type (bits 2:0 of the modulator control register).
    ///
    /// This value is clamped to range [0, 7].
    pub fn with_modulation(self, value: u8) -> Self {
        Self {
            modulator: self.modulator.with_modulation(value.min(7)),
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_sys_clk()`].
    pub const fn sys_clk(&self) -> u8 {
        self.modulator.sys_clk()
    }

    /// The SYS_CLK output setting (bits 5:4 of the modulator control register).
    ///
    /// This value is clamped to range [0, 3].
    pub fn with_sys_clk(self, value: u8) -> Self {
        Self {
            modulator: self.modulator.with_sys_clk(value.min(3)),
            ..self
        }
    }

    pub(crate) const fn modulator(&self) -> u8 {
        self.modulator.into_bits()
    }

    /// Returns the value set by [`ReaderConfig::with_regulator()`].
    pub const fn regulator(&self) -> u8 {
        self.regulator
    }

    /// The raw value of the regulator and I/O control register.
    pub fn with_regulator(self, value: u8) -> Self {
        Self {
            regulator: value,
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_irq_mask()`].
    pub const fn irq_mask(&self) -> u8 {
        self.irq_mask
    }

    /// The raw value of the collision position and interrupt mask register.
    ///
    /// Bit 0 enables the slot counter.
    /// See [`RfidControl::enable_slot_counter()`](fn@crate::radio::prelude::RfidControl::enable_slot_counter).
    pub fn with_irq_mask(self, value: u8) -> Self {
        Self {
            irq_mask: value,
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_fifo_irq_levels()`].
    pub const fn fifo_irq_levels(&self) -> u8 {
        self.fifo_irq_levels
    }

    /// The raw value of the adjustable FIFO IRQ levels register.
    pub fn with_fifo_irq_levels(self, value: u8) -> Self {
        Self {
            fifo_irq_levels: value,
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_bit_poll_slice()`].
    pub const fn bit_poll_slice(&self) -> u32 {
        self.bit_poll_slice
    }

    /// The delay (in microseconds) between two checks of the IRQ indicators in
    /// [`RfidTransceive::transceive_bits()`](fn@crate::radio::prelude::RfidTransceive::transceive_bits).
    ///
    /// The number of checks is the call's timeout divided by this delay.
    /// This value is clamped to a minimum of 1.
    pub fn with_bit_poll_slice(self, micros: u32) -> Self {
        Self {
            bit_poll_slice: micros.max(1),
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_byte_poll_slice()`].
    pub const fn byte_poll_slice(&self) -> u32 {
        self.byte_poll_slice
    }

    /// The delay (in microseconds) between two checks of the IRQ indicators in
    /// [`RfidTransceive::transceive_bytes()`](fn@crate::radio::prelude::RfidTransceive::transceive_bytes).
    ///
    /// The number of checks is the call's timeout divided by this delay.
    /// This value is clamped to a minimum of 1.
    pub fn with_byte_poll_slice(self, micros: u32) -> Self {
        Self {
            byte_poll_slice: micros.max(1),
            ..self
        }
    }

    /// Returns the value set by [`ReaderConfig::with_init_attempts()`].
    pub const fn init_attempts(&self) -> u8 {
        self.init_attempts
    }

    /// How many soft-init cycles [`RfidInit::init()`](fn@crate::radio::prelude::RfidInit::init)
    /// performs before giving up on the chip.
    ///
    /// This value is clamped to a minimum of 1.
    pub fn with_init_attempts(self, attempts: u8) -> Self {
        Self {
            init_attempts: attempts.max(1),
            ..self
        }
    }
}

/// Number of IRQ checks that fit in `timeout_ms` when checking every `slice_us`.
pub(crate) const fn poll_count(timeout_ms: u16, slice_us: u32) -> u32 {
    let slice_us = if slice_us == 0 { 1 } else { slice_us };
    timeout_ms as u32 * 1000 / slice_us
}
