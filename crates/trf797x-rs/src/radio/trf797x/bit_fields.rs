use bitfield_struct::bitfield;

#[bitfield(u8, order = Msb)]
pub(crate) struct ChipStateControl {
    pub standby: bool,

    /// Direct mode (the bypass flavor is selected in the ISO control register).
    pub direct: bool,

    pub rf_on: bool,

    /// Half output power.
    pub rf_pwr_half: bool,

    /// Main (instead of auxiliary) receiver input.
    pub pm_on: bool,

    pub agc_on: bool,

    /// Receiver active while the RF field is off.
    pub rec_on: bool,

    /// 5 V (instead of 3 V) supply.
    pub vrs_5v: bool,
}

impl ChipStateControl {
    /// Clears `standby`, `direct` and `rf_on`.
    pub const RF_OFF_MASK: u8 = 0x1F;

    /// Clears `standby` and `direct`.
    pub const RF_ON_MASK: u8 = 0x3F;

    /// 5 V supply, AGC on, RF field on and direct mode.
    pub const fn direct_mode() -> Self {
        Self::new()
            .with_vrs_5v(true)
            .with_agc_on(true)
            .with_rf_on(true)
            .with_direct(true)
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct IsoControl {
    pub rx_crc_disabled: bool,

    /// Set for direct mode 1, cleared for direct mode 0.
    pub direct_mode_1: bool,

    /// NFC (or card emulation) instead of reader mode.
    pub rfid: bool,

    /// Protocol (and data rate) selection.
    #[bits(5)]
    pub iso: u8,
}

impl IsoControl {
    /// ISO14443A at 106 kbps without receive CRC.
    pub const fn protocol_default() -> Self {
        Self::new().with_rx_crc_disabled(true).with_iso(0x08)
    }

    /// ISO14443B passive target at 106 kbps.
    pub const fn direct_mode_setup() -> Self {
        Self::new().with_rfid(true).with_iso(0x01)
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct ModulatorControl {
    pub clk_27mhz: bool,

    /// Pin 12 becomes the OOK modulation input.
    pub en_ook_p: bool,

    /// SYS_CLK output frequency.
    #[bits(2)]
    pub sys_clk: u8,

    pub en_ana: bool,

    /// Modulation depth and type. 0 is ASK 10%.
    #[bits(3)]
    pub modulation: u8,
}

impl ModulatorControl {
    /// SYS_CLK outputs 13.56 MHz.
    pub const SYS_CLK_13_56MHZ: u8 = 3;

    /// SYS_CLK outputs 3.39 MHz.
    pub const SYS_CLK_3_39MHZ: u8 = 1;

    /// 13.56 MHz clock out, pin 12 as OOK input, ASK 10%.
    pub const fn direct_mode_0() -> Self {
        Self::new()
            .with_en_ook_p(true)
            .with_sys_clk(Self::SYS_CLK_13_56MHZ)
    }

    /// 3.39 MHz clock out with OOK 100% modulation.
    pub const fn direct_mode_setup() -> Self {
        Self::new()
            .with_sys_clk(Self::SYS_CLK_3_39MHZ)
            .with_modulation(1)
    }
}
