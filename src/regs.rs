//! MTS4Z register map and protocol constants.

/// Fixed I2C bus address of the sensor.
pub const ADDR: u8 = 0x41;

/// Command register, mode-select write.
pub const CMD: u8 = 0x04;
/// Configuration register.
pub const CFG: u8 = 0x05;
/// Temperature LSB register. Not addressed directly, the two temperature
/// bytes come back in one combined read starting at [`TEMP_MSB`].
pub const TEMP_LSB: u8 = 0x00;
/// Temperature MSB register, start of the 2-byte temperature read.
pub const TEMP_MSB: u8 = 0x01;
/// Status register. Part of the datasheet map, not used by this driver.
pub const STATUS: u8 = 0x03;
/// Reset register, write [`RESET_MAGIC`] to trigger a device reset.
pub const RESET: u8 = 0x17;

/// Value written to [`RESET`] to reset the device.
pub const RESET_MAGIC: u8 = 0x6A;
/// Value written to [`CMD`] during configuration.
pub const CMD_MODE: u8 = 0x00;
/// Value written to [`CFG`] during configuration.
pub const CFG_MODE: u8 = 0x68;

/// Settle time after a reset before the device accepts transactions.
pub const RESET_SETTLE_MS: u8 = 100;
