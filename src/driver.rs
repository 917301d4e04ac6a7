use crate::config::Config;
use crate::constants::*;
use crate::error::Ad779xError;
use core::result::Result;
use core::result::Result::Ok;

use embedded_hal::{
    delay::DelayNs,
    digital::OutputPin,
    spi::{Operation, SpiDevice},
};

/// AD7792/AD7793 driver
pub struct Ad779x<SPI, CS, DELAY> {
    spi: SPI,
    cs: CS,
    delay: DELAY,
    config: Config,
    variant: Variant,
}

// Transport: chip select bracketing and raw byte exchange
impl<SPI, CS, DELAY, SpiError, GpioError> Ad779x<SPI, CS, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    /// Creates a new driver instance and deselects the chip.
    ///
    /// `spi` must be configured for [`MODE`](crate::MODE).
    pub fn new(
        spi: SPI,
        mut cs: CS,
        delay: DELAY,
        config: Config,
    ) -> Result<Self, Ad779xError<SpiError, GpioError>> {
        cs.set_high().map_err(Ad779xError::Gpio)?;
        Ok(Ad779x {
            spi,
            cs,
            delay,
            config,
            variant: Variant::Unknown,
        })
    }

    /// Gives back the bus, chip select and delay.
    pub fn release(self) -> (SPI, CS, DELAY) {
        (self.spi, self.cs, self.delay)
    }

    /// Runs `body` with CS held low. CS is driven high again even when `body` fails.
    ///
    /// One register transaction per call; do not nest.
    fn selected<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, Ad779xError<SpiError, GpioError>>,
    ) -> Result<T, Ad779xError<SpiError, GpioError>> {
        self.cs.set_low().map_err(Ad779xError::Gpio)?;
        let result = body(self);
        let deselected = self.cs.set_high().map_err(Ad779xError::Gpio);
        let value = result?;
        deselected?;
        Ok(value)
    }

    /// Shifts one byte out and returns the byte clocked in at the same time.
    ///
    /// The caller is responsible for chip select, usually through `selected`.
    pub fn exchange_byte(&mut self, byte: u8) -> Result<u8, Ad779xError<SpiError, GpioError>> {
        let mut buffer = [byte];
        self.spi
            .transfer_in_place(&mut buffer)
            .map_err(Ad779xError::Spi)?;
        Ok(buffer[0])
    }
}

// Register access
impl<SPI, CS, DELAY, SpiError, GpioError> Ad779x<SPI, CS, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    /// Communications byte addressing `register`, sent first in the same bus transaction as its payload
    fn select_register(register: Register, access: Access, continuous_read: bool) -> u8 {
        let command = command_byte(register, access, continuous_read);
        log::debug!("Selecting {:?} with command 0x{:02X}", register, command);
        command
    }

    /// Reads `width` bytes (at most 4) from a register, MSB first
    pub fn read_register(
        &mut self,
        register: Register,
        width: usize,
    ) -> Result<u32, Ad779xError<SpiError, GpioError>> {
        let width = width.min(4);
        let mut buffer = [0u8; 4];

        let command = Self::select_register(register, Access::Read, false);

        self.selected(|adc| {
            adc.spi
                .transaction(&mut [
                    Operation::Write(&[command]),
                    Operation::TransferInPlace(&mut buffer[..width]),
                ])
                .map_err(Ad779xError::Spi)
        })?;

        let payload = &buffer[..width];
        log::debug!("Register {:?}: {:02X?}", register, payload);
        Ok(payload
            .iter()
            .fold(0u32, |value, &byte| (value << 8) | byte as u32))
    }

    /// Writes `data` to a register, first byte first.
    ///
    /// `Register::Communications` is the command register itself, so its payload goes out
    /// without a select byte in front and is taken by the chip as raw command bytes.
    pub fn write_register(
        &mut self,
        register: Register,
        data: &[u8],
    ) -> Result<(), Ad779xError<SpiError, GpioError>> {
        log::debug!("Writing {:?}: {:02X?}", register, data);
        if register == Register::Communications {
            return self.selected(|adc| adc.spi.write(data).map_err(Ad779xError::Spi));
        }

        let command = Self::select_register(register, Access::Write, false);
        self.selected(|adc| {
            adc.spi
                .transaction(&mut [Operation::Write(&[command]), Operation::Write(data)])
                .map_err(Ad779xError::Spi)
        })
    }

    pub fn read_status_register(&mut self) -> Result<u8, Ad779xError<SpiError, GpioError>> {
        Ok(self.read_register(Register::Status, 1)? as u8)
    }

    pub fn read_mode_register(&mut self) -> Result<u16, Ad779xError<SpiError, GpioError>> {
        Ok(self.read_register(Register::Mode, 2)? as u16)
    }

    pub fn read_config_register(&mut self) -> Result<u16, Ad779xError<SpiError, GpioError>> {
        Ok(self.read_register(Register::Configuration, 2)? as u16)
    }

    pub fn read_io_register(&mut self) -> Result<u8, Ad779xError<SpiError, GpioError>> {
        Ok(self.read_register(Register::Io, 1)? as u8)
    }

    /// Reads the ID register; its low bit tells AD7792 and AD7793 apart
    pub fn read_id(&mut self) -> Result<u8, Ad779xError<SpiError, GpioError>> {
        Ok(self.read_register(Register::Id, 1)? as u8)
    }

    /// Logs every readable register at debug level
    pub fn dump_registers(&mut self) -> Result<(), Ad779xError<SpiError, GpioError>> {
        let registers = [
            (Register::Status, "STATUS"),
            (Register::Mode, "MODE"),
            (Register::Configuration, "CONFIG"),
            (Register::Id, "ID"),
            (Register::Io, "IO"),
            (Register::Offset, "OFFSET"),
            (Register::FullScale, "FULL-SCALE"),
        ];

        for (register, name) in registers.iter() {
            // Conversion sized registers are skipped until the variant is known
            let Some(width) = register.width(self.variant) else {
                continue;
            };
            let value = self.read_register(*register, width)?;
            log::debug!("Register {}: 0x{:06X}", name, value);
        }

        Ok(())
    }
}

// Conversion sequencing
impl<SPI, CS, DELAY, SpiError, GpioError> Ad779x<SPI, CS, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    /// Resets the chip and detects which variant is attached.
    pub fn init(&mut self) -> Result<(), Ad779xError<SpiError, GpioError>> {
        self.reset()?;
        self.delay.delay_ms(RESET_SETTLE_MS);

        let id = self.read_id()?;
        self.variant = Variant::from_id(id);
        log::debug!("ID 0x{:02X}, detected {:?}", id, self.variant);

        Ok(())
    }

    /// Clocks 32 ones into the chip, returning its serial interface and registers to power-on defaults
    pub fn reset(&mut self) -> Result<(), Ad779xError<SpiError, GpioError>> {
        self.selected(|adc| {
            adc.spi
                .write(&RESET_SEQUENCE)
                .map_err(Ad779xError::Spi)
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn is_initialized(&self) -> bool {
        self.variant != Variant::Unknown
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Changes the filter rate used by subsequent `read` calls
    pub fn set_update_rate(&mut self, update_rate: UpdateRate) {
        self.config.update_rate = update_rate;
    }

    /// Sets the excitation current sources. Levels above 3 switch them off.
    pub fn set_excitation_current(
        &mut self,
        level: u8,
    ) -> Result<(), Ad779xError<SpiError, GpioError>> {
        let current = ExcitationCurrent::from_level(level);
        self.write_register(Register::Io, &[current as u8])
    }

    /// Selects the input channel. Channels above 2 select AIN3.
    pub fn set_channel(&mut self, channel: u8) -> Result<(), Ad779xError<SpiError, GpioError>> {
        let channel = Channel::from_index(channel);
        self.write_register(
            Register::Configuration,
            &[CONFIG_HIGH, CONFIG_LOW_BASE | channel as u8],
        )
    }

    /// Writes the mode register, which starts a conversion or calibration for the non-idle modes.
    ///
    /// Rate code 0x00 is reserved on the chip and has no `UpdateRate` variant; write it with
    /// `write_register(Register::Mode, ..)` if it is really wanted.
    pub fn trigger_conversion(
        &mut self,
        mode: Mode,
        update_rate: UpdateRate,
    ) -> Result<(), Ad779xError<SpiError, GpioError>> {
        self.write_register(Register::Mode, &[mode as u8, update_rate as u8])
    }

    /// Waits for the status register RDY bit to clear.
    ///
    /// Status is read at least once, even with `max_polls` set to 0.
    pub fn poll_ready(&mut self) -> Result<(), Ad779xError<SpiError, GpioError>> {
        let polls = self.config.max_polls.max(1);
        for poll in 1..=polls {
            if self.read_status_register()? & STATUS_NOT_READY == 0 {
                return Ok(());
            }
            if poll < polls {
                self.delay.delay_us(self.config.poll_interval_us);
            }
        }
        log::error!("RDY did not clear after {} polls", polls);
        Err(Ad779xError::Timeout)
    }

    /// Runs a single conversion on `channel` and returns the raw code.
    ///
    /// The code is 16 bits wide on the AD7792 and 24 bits on the AD7793. It is not sign extended.
    pub fn read(&mut self, channel: u8) -> Result<u32, Ad779xError<SpiError, GpioError>> {
        let width = self
            .variant
            .data_width()
            .ok_or(Ad779xError::NotInitialized)?;

        self.set_channel(channel)?;
        self.trigger_conversion(Mode::SingleConversion, self.config.update_rate)?;
        self.poll_ready()?;

        let code = self.read_register(Register::Data, width)?;
        log::debug!("Channel {} raw code 0x{:06X}", channel, code);
        Ok(code)
    }

    /// Runs the internal zero-scale and then the internal full-scale calibration
    pub fn calibrate_internal(&mut self) -> Result<(), Ad779xError<SpiError, GpioError>> {
        for mode in [Mode::InternalZeroScale, Mode::InternalFullScale] {
            log::debug!("Calibrating: {:?}", mode);
            let command = Self::select_register(Register::Mode, Access::Write, false);
            self.selected(|adc| {
                adc.spi
                    .transaction(&mut [
                        Operation::Write(&[command]),
                        Operation::DelayNs(CALIBRATION_SETTLE_US * 1_000),
                        Operation::Write(&[mode as u8, UpdateRate::Hz4_17 as u8]),
                    ])
                    .map_err(Ad779xError::Spi)
            })?;
            self.poll_ready()?;
        }
        Ok(())
    }
}

// Calibration coefficient registers
impl<SPI, CS, DELAY, SpiError, GpioError> Ad779x<SPI, CS, DELAY>
where
    SPI: SpiDevice<Error = SpiError>,
    CS: OutputPin<Error = GpioError>,
    DELAY: DelayNs,
{
    pub fn read_offset(&mut self) -> Result<u32, Ad779xError<SpiError, GpioError>> {
        self.read_coefficient(Register::Offset)
    }

    pub fn write_offset(&mut self, value: u32) -> Result<(), Ad779xError<SpiError, GpioError>> {
        self.write_coefficient(Register::Offset, value)
    }

    pub fn read_full_scale(&mut self) -> Result<u32, Ad779xError<SpiError, GpioError>> {
        self.read_coefficient(Register::FullScale)
    }

    pub fn write_full_scale(&mut self, value: u32) -> Result<(), Ad779xError<SpiError, GpioError>> {
        self.write_coefficient(Register::FullScale, value)
    }

    fn read_coefficient(
        &mut self,
        register: Register,
    ) -> Result<u32, Ad779xError<SpiError, GpioError>> {
        let width = register
            .width(self.variant)
            .ok_or(Ad779xError::NotInitialized)?;
        self.read_register(register, width)
    }

    fn write_coefficient(
        &mut self,
        register: Register,
        value: u32,
    ) -> Result<(), Ad779xError<SpiError, GpioError>> {
        let width = register
            .width(self.variant)
            .ok_or(Ad779xError::NotInitialized)?;
        let bytes = value.to_be_bytes();
        self.write_register(register, &bytes[4 - width..])
    }
}
