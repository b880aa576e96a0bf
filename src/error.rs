use core::fmt;

/// Problems detected while setting up the plate or the expander, before any
/// steady-state bus traffic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    /// The display geometry had zero columns or zero rows.
    InvalidGeometry {
        /// Requested number of columns.
        columns: u8,
        /// Requested number of rows.
        rows: u8,
    },
    /// The expander could not supply the pin with this index.
    ///
    /// Either the index is outside 0..=15, or the pin is already held by
    /// another pin object.
    PinUnavailable(u8),
    /// The I2C address is outside the 0x20..=0x27 range selectable with the
    /// MCP23017 address pins.
    InvalidAddress(u8),
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { columns, rows } => {
                write!(f, "invalid display geometry {columns}x{rows}")
            }
            Self::PinUnavailable(index) => write!(f, "expander pin {index} is unavailable"),
            Self::InvalidAddress(address) => {
                write!(f, "I2C address {address:#04x} is not a valid MCP23017 address")
            }
        }
    }
}

impl core::error::Error for ConfigurationError {}

/// Wrapper for problems when driving the plate.
///
/// `E` is the error type of the underlying bus, such as the `embedded_hal` I2C
/// implementation the expander talks through. Bus errors are passed through
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Construction failed because of an invalid argument or an unavailable pin.
    ///
    /// This is only returned while building a driver or acquiring pins, and is
    /// never retried.
    Configuration(ConfigurationError),
    /// A bus transaction failed.
    Bus(E),
}

#[doc(hidden)]
impl<E> From<ConfigurationError> for Error<E> {
    fn from(value: ConfigurationError) -> Self {
        Self::Configuration(value)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(e) => write!(f, "configuration error: {e}"),
            Self::Bus(e) => write!(f, "bus error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

impl<E: fmt::Debug> embedded_hal::digital::Error for Error<E> {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        // embedded_hal has no finer-grained digital error kinds.
        embedded_hal::digital::ErrorKind::Other
    }
}
