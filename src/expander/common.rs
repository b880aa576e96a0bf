#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Electrical level of an expander pin.
pub enum LogicLevel {
    /// Pin reads or drives high.
    High,
    /// Pin reads or drives low.
    Low,
}

impl LogicLevel {
    /// True if the level is [`LogicLevel::High`].
    pub fn is_high(self) -> bool {
        matches!(self, Self::High)
    }

    /// True if the level is [`LogicLevel::Low`].
    pub fn is_low(self) -> bool {
        matches!(self, Self::Low)
    }
}

impl From<bool> for LogicLevel {
    fn from(value: bool) -> Self {
        if value { Self::High } else { Self::Low }
    }
}

impl From<LogicLevel> for bool {
    fn from(value: LogicLevel) -> Self {
        match value {
            LogicLevel::High => true,
            LogicLevel::Low => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
/// Expander pin direction.
pub enum Direction {
    /// Pin is a high-impedance input.
    Input,
    /// Pin drives its latched output level.
    Output,
}

impl From<bool> for Direction {
    /// Interpret an IODIR register bit, where 1 means input.
    fn from(value: bool) -> Self {
        if value { Self::Input } else { Self::Output }
    }
}

impl From<Direction> for bool {
    /// Convert a [`Direction`] to its IODIR register bit (true if input).
    fn from(value: Direction) -> Self {
        match value {
            Direction::Input => true,
            Direction::Output => false,
        }
    }
}
