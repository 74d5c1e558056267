/// A private module encapsulating register addresses for the TRF7970A.
pub mod registers {
    pub const CHIP_STATE_CONTROL: u8 = 0x00;
    pub const ISO_CONTROL: u8 = 0x01;
    pub const TX_PULSE_LENGTH_CONTROL: u8 = 0x06;
    pub const RX_NO_RESPONSE_WAIT_TIME: u8 = 0x07;
    pub const RX_WAIT_TIME: u8 = 0x08;
    pub const MODULATOR_CONTROL: u8 = 0x09;
    pub const RX_SPECIAL_SETTINGS: u8 = 0x0A;
    pub const REGULATOR_CONTROL: u8 = 0x0B;
    pub const IRQ_STATUS: u8 = 0x0C;
    pub const IRQ_MASK: u8 = 0x0D;
    pub const SPECIAL_FUNCTION: u8 = 0x10;
    pub const FIFO_IRQ_LEVELS: u8 = 0x14;
    pub const TEST_SETTINGS_1: u8 = 0x1A;
    pub const FIFO_CONTROL: u8 = 0x1C;
    pub const TX_LENGTH_BYTE_1: u8 = 0x1D;
    pub const TX_LENGTH_BYTE_2: u8 = 0x1E;
    pub const FIFO: u8 = 0x1F;
}

/// A private module encapsulating direct command opcodes for the TRF7970A.
pub mod commands {
    pub const IDLE: u8 = 0x00;
    pub const SOFT_INIT: u8 = 0x03;
    pub const RESET_FIFO: u8 = 0x0F;
    pub const TRANSMIT_NO_CRC: u8 = 0x10;
    pub const TRANSMIT_CRC: u8 = 0x11;
    pub const TRANSMIT_NEXT_SLOT: u8 = 0x14;
    pub const STOP_DECODERS: u8 = 0x16;
    pub const RUN_DECODERS: u8 = 0x17;
}

/// A private module to encapsulate the bits of the SPI address/command word.
pub mod mnemonics {
    /// Marks the word as a direct command instead of a register address.
    pub const COMMAND: u8 = 0x80;
    pub const READ: u8 = 0x40;
    pub const CONTINUOUS: u8 = 0x20;
    pub const ADDRESS_MASK: u8 = 0x1F;

    /// Value of the modulator control register right after a soft init.
    pub const MODULATOR_POR: u8 = 0x91;

    /// IRQ status when only the reception has ended.
    pub const IRQ_RX_END: u8 = 0x40;
    /// IRQ status when only the transmission has ended.
    pub const IRQ_TX_END: u8 = 0x80;
}
