use embedded_hal::spi::{Mode as SpiMode, MODE_3};

/// SPI mode the AD779x requires: clock idles high, data sampled on the falling edge, MSB first.
pub const MODE: SpiMode = MODE_3;

/// Command bytes written to the communications register
pub mod command {
    pub const READ_STATUS: u8 = 0x40;
    pub const WRITE_MODE: u8 = 0x08;
    pub const READ_MODE: u8 = 0x48;
    pub const WRITE_CONFIG: u8 = 0x10;
    pub const READ_CONFIG: u8 = 0x50;
    // No CREAD bit, although every conversion result is read back with this byte
    pub const READ_DATA: u8 = 0x58;
    pub const READ_ID: u8 = 0x60;
    pub const WRITE_IO: u8 = 0x28;
    pub const READ_IO: u8 = 0x68;
    pub const WRITE_OFFSET: u8 = 0x30;
    pub const READ_OFFSET: u8 = 0x70;
    pub const WRITE_FULL_SCALE: u8 = 0x38;
    pub const READ_FULL_SCALE: u8 = 0x78;
}

/// 32 ones on DIN put the serial interface back in its power-on state
pub const RESET_SEQUENCE: [u8; 4] = [0xFF; 4];
pub const RESET_SETTLE_MS: u32 = 2;

/// Configuration register, high byte: no bias voltage, burnout off, boost bit, gain 1
pub const CONFIG_HIGH: u8 = 0x10;
/// Configuration register, low byte: internal reference and input buffer, channel in bits 2..0
pub const CONFIG_LOW_BASE: u8 = 0x90;

/// Status register RDY bit, cleared when a conversion result is waiting
pub const STATUS_NOT_READY: u8 = 0x80;
pub const ID_VARIANT_BIT: u8 = 0x01;

/// Settle time after a mode select byte during calibration
pub const CALIBRATION_SETTLE_US: u32 = 5;

/// AD779x on-chip registers, by RS2..RS0 selector
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Register {
    Communications,
    Status,
    Mode,
    Configuration,
    Data,
    Id,
    Io,
    Offset,
    FullScale,
}

impl Register {
    /// Register select bits RS2..RS0.
    /// Communications and status share address 0; a write goes to the former, a read to the latter.
    pub const fn selector(&self) -> u8 {
        match self {
            Register::Communications | Register::Status => 0b000,
            Register::Mode => 0b001,
            Register::Configuration => 0b010,
            Register::Data => 0b011,
            Register::Id => 0b100,
            Register::Io => 0b101,
            Register::Offset => 0b110,
            Register::FullScale => 0b111,
        }
    }

    /// Payload width in bytes. `None` for the conversion-sized registers while the variant is unknown.
    pub fn width(&self, variant: Variant) -> Option<usize> {
        match self {
            Register::Communications | Register::Status | Register::Id | Register::Io => Some(1),
            Register::Mode | Register::Configuration => Some(2),
            Register::Data | Register::Offset | Register::FullScale => variant.data_width(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Builds the communications register byte addressing `register`.
///
/// Layout: bit 7 !WEN (always 0), bit 6 R/!W, bits 5..3 RS2..RS0, bit 2 CREAD, bits 1..0 zero.
pub const fn command_byte(register: Register, access: Access, continuous_read: bool) -> u8 {
    let read = match access {
        Access::Read => 1,
        Access::Write => 0,
    };
    (read << 6) | (register.selector() << 3) | ((continuous_read as u8) << 2)
}

/// Mode register MD2..MD0, sent as the high byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Continuous = 0x00,
    SingleConversion = 0x20,
    Idle = 0x40,
    PowerDown = 0x60,
    InternalZeroScale = 0x80,
    InternalFullScale = 0xA0,
    SystemZeroScale = 0xC0,
    SystemFullScale = 0xE0,
}

/// Filter update rates, FS3..FS0 of the mode register low byte
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateRate {
    Hz470 = 0x01,
    Hz242 = 0x02,
    Hz123 = 0x03,
    Hz62 = 0x04,
    Hz50 = 0x05,
    Hz39 = 0x06,
    Hz33_2 = 0x07,
    /// -90 dB rejection at 60 Hz
    Hz19_6 = 0x08,
    /// -80 dB rejection at 50 Hz
    Hz16_7 = 0x09,
    /// -65 dB rejection at 50/60 Hz
    Hz16_7Both = 0x0A,
    /// -66 dB rejection at 50/60 Hz
    Hz12_5 = 0x0B,
    /// -69 dB rejection at 50/60 Hz
    Hz10 = 0x0C,
    /// -70 dB rejection at 50/60 Hz
    Hz8_33 = 0x0D,
    /// -72 dB rejection at 50/60 Hz
    Hz6_25 = 0x0E,
    /// -74 dB rejection at 50/60 Hz
    Hz4_17 = 0x0F,
}

impl UpdateRate {
    /// Code 0x00 is reserved and has no rate.
    pub fn from_code(code: u8) -> Option<Self> {
        let rate = match code {
            0x01 => UpdateRate::Hz470,
            0x02 => UpdateRate::Hz242,
            0x03 => UpdateRate::Hz123,
            0x04 => UpdateRate::Hz62,
            0x05 => UpdateRate::Hz50,
            0x06 => UpdateRate::Hz39,
            0x07 => UpdateRate::Hz33_2,
            0x08 => UpdateRate::Hz19_6,
            0x09 => UpdateRate::Hz16_7,
            0x0A => UpdateRate::Hz16_7Both,
            0x0B => UpdateRate::Hz12_5,
            0x0C => UpdateRate::Hz10,
            0x0D => UpdateRate::Hz8_33,
            0x0E => UpdateRate::Hz6_25,
            0x0F => UpdateRate::Hz4_17,
            _ => return None,
        };
        Some(rate)
    }

    /// Output data rate in Hz
    pub fn hz(&self) -> f32 {
        match self {
            UpdateRate::Hz470 => 470.0,
            UpdateRate::Hz242 => 242.0,
            UpdateRate::Hz123 => 123.0,
            UpdateRate::Hz62 => 62.0,
            UpdateRate::Hz50 => 50.0,
            UpdateRate::Hz39 => 39.0,
            UpdateRate::Hz33_2 => 33.2,
            UpdateRate::Hz19_6 => 19.6,
            UpdateRate::Hz16_7 | UpdateRate::Hz16_7Both => 16.7,
            UpdateRate::Hz12_5 => 12.5,
            UpdateRate::Hz10 => 10.0,
            UpdateRate::Hz8_33 => 8.33,
            UpdateRate::Hz6_25 => 6.25,
            UpdateRate::Hz4_17 => 4.17,
        }
    }

    /// Filter settling time in milliseconds
    pub fn settling_ms(&self) -> u32 {
        match self {
            UpdateRate::Hz470 => 4,
            UpdateRate::Hz242 => 8,
            UpdateRate::Hz123 => 16,
            UpdateRate::Hz62 => 32,
            UpdateRate::Hz50 => 40,
            UpdateRate::Hz39 => 48,
            UpdateRate::Hz33_2 => 60,
            UpdateRate::Hz19_6 => 101,
            UpdateRate::Hz16_7 | UpdateRate::Hz16_7Both => 120,
            UpdateRate::Hz12_5 => 160,
            UpdateRate::Hz10 => 200,
            UpdateRate::Hz8_33 => 240,
            UpdateRate::Hz6_25 => 320,
            UpdateRate::Hz4_17 => 480,
        }
    }
}

/// IEXC1/IEXC0 excitation current, routed IEXC1 -> IOUT1 and IEXC2 -> IOUT2
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExcitationCurrent {
    Off = 0,
    Micro10 = 1,
    Micro210 = 2,
    Milli1 = 3,
}

impl ExcitationCurrent {
    /// Levels above 3 fall back to `Off`.
    pub fn from_level(level: u8) -> Self {
        match level {
            1 => ExcitationCurrent::Micro10,
            2 => ExcitationCurrent::Micro210,
            3 => ExcitationCurrent::Milli1,
            _ => ExcitationCurrent::Off,
        }
    }
}

/// Differential input pairs AIN(+)/AIN(-)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Ain1 = 0,
    Ain2 = 1,
    Ain3 = 2,
}

impl Channel {
    /// Indices above 2 select `Ain3`.
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => Channel::Ain1,
            1 => Channel::Ain2,
            _ => Channel::Ain3,
        }
    }
}

/// Chip variant, told apart by the low bit of the ID register
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Unknown,
    /// 16-bit results
    Ad7792,
    /// 24-bit results
    Ad7793,
}

impl Variant {
    pub fn from_id(id: u8) -> Self {
        if id & ID_VARIANT_BIT != 0 {
            Variant::Ad7793
        } else {
            Variant::Ad7792
        }
    }

    /// Bytes in the data, offset and full-scale registers
    pub fn data_width(&self) -> Option<usize> {
        match self {
            Variant::Unknown => None,
            Variant::Ad7792 => Some(2),
            Variant::Ad7793 => Some(3),
        }
    }
}
