use core::fmt;

#[derive(Debug)]
pub enum Ad779xError<SpiError, GpioError> {
    Spi(SpiError),
    Gpio(GpioError),
    /// The status register never reported a finished conversion
    Timeout,
    /// The chip variant is still unknown, call `init` first
    NotInitialized,
}

impl<SpiError: fmt::Debug, GpioError: fmt::Debug> fmt::Display for Ad779xError<SpiError, GpioError> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ad779xError::Spi(e) => write!(f, "SPI error: {:?}", e),
            Ad779xError::Gpio(e) => write!(f, "chip select error: {:?}", e),
            Ad779xError::Timeout => write!(f, "timed out waiting for conversion"),
            Ad779xError::NotInitialized => write!(f, "driver not initialized"),
        }
    }
}

#[cfg(feature = "std")]
impl<SpiError: fmt::Debug, GpioError: fmt::Debug> std::error::Error
    for Ad779xError<SpiError, GpioError>
{
}
