//! Test doubles shared by the integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use charlcd_rgb_plate::expander::Direction;
use charlcd_rgb_plate::{
    CharacterLcdRgb, Color, ConfigurationError, Error, Expander, Geometry, LcdPins,
};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};

/// Bus failure on the pin with the enclosed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeBusError(pub u8);

/// State of a pretend 16-pin expander.
#[derive(Debug, Default)]
pub struct Board {
    /// Electrical level of each pin.
    pub levels: [bool; 16],
    pub directions: [Option<Direction>; 16],
    /// Bit n set while pin n is held.
    pub held: u16,
    /// Pin the expander refuses to hand out.
    pub missing: Option<u8>,
    /// Pin whose reads and writes fail.
    pub failing: Option<u8>,
    /// Number of pin reads so far.
    pub reads: usize,
}

impl Board {
    /// Pull `pin` to ground, as a pressed button does.
    pub fn press(&mut self, pin: u8) {
        self.levels[usize::from(pin)] = false;
    }

    pub fn release(&mut self, pin: u8) {
        self.levels[usize::from(pin)] = true;
    }
}

pub struct FakeExpander(Rc<RefCell<Board>>);

impl FakeExpander {
    pub fn new() -> (Self, Rc<RefCell<Board>>) {
        let board = Rc::new(RefCell::new(Board::default()));
        (Self(Rc::clone(&board)), board)
    }

    fn take(&self, index: u8, direction: Direction) -> Result<FakePin, Error<FakeBusError>> {
        let mut board = self.0.borrow_mut();
        let unavailable = index >= 16
            || board.missing == Some(index)
            || board.held & (1 << index) != 0;
        if unavailable {
            return Err(ConfigurationError::PinUnavailable(index).into());
        }
        board.held |= 1 << index;
        board.directions[usize::from(index)] = Some(direction);
        // Inputs are pulled up, outputs start low.
        board.levels[usize::from(index)] = direction == Direction::Input;
        Ok(FakePin {
            index,
            board: Rc::clone(&self.0),
        })
    }
}

impl Expander for FakeExpander {
    type BusError = FakeBusError;
    type Input = FakePin;
    type Output = FakePin;

    fn input_pin(&mut self, index: u8) -> Result<FakePin, Error<FakeBusError>> {
        self.take(index, Direction::Input)
    }

    fn output_pin(&mut self, index: u8) -> Result<FakePin, Error<FakeBusError>> {
        self.take(index, Direction::Output)
    }
}

#[derive(Debug)]
pub struct FakePin {
    index: u8,
    board: Rc<RefCell<Board>>,
}

impl FakePin {
    pub fn index(&self) -> u8 {
        self.index
    }

    fn check(&self, board: &Board) -> Result<(), Error<FakeBusError>> {
        if board.failing == Some(self.index) {
            Err(Error::Bus(FakeBusError(self.index)))
        } else {
            Ok(())
        }
    }
}

impl Drop for FakePin {
    fn drop(&mut self) {
        self.board.borrow_mut().held &= !(1 << self.index);
    }
}

impl ErrorType for FakePin {
    type Error = Error<FakeBusError>;
}

impl InputPin for FakePin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        let mut board = self.board.borrow_mut();
        board.reads += 1;
        self.check(&board)?;
        Ok(board.levels[usize::from(self.index)])
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for FakePin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        let mut board = self.board.borrow_mut();
        self.check(&board)?;
        board.levels[usize::from(self.index)] = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        let mut board = self.board.borrow_mut();
        self.check(&board)?;
        board.levels[usize::from(self.index)] = true;
        Ok(())
    }
}

/// A display driver that records what it was asked to do.
///
/// It drives read/write low on construction, and the three backlight pins on
/// every colour change (on for any non-zero channel).
pub struct RecordingDisplay<P> {
    pub pins: LcdPins<P>,
    pub geometry: Geometry,
    pub text: String,
    pub cursor: (u8, u8),
    pub color: Color,
    pub clears: usize,
}

impl<P: OutputPin> CharacterLcdRgb<P> for RecordingDisplay<P> {
    fn new(mut pins: LcdPins<P>, geometry: Geometry) -> Result<Self, P::Error> {
        pins.read_write.set_low()?;
        Ok(Self {
            pins,
            geometry,
            text: String::new(),
            cursor: (0, 0),
            color: Color::OFF,
            clears: 0,
        })
    }

    fn clear(&mut self) -> Result<(), P::Error> {
        self.text.clear();
        self.cursor = (0, 0);
        self.clears += 1;
        Ok(())
    }

    fn home(&mut self) -> Result<(), P::Error> {
        self.cursor = (0, 0);
        Ok(())
    }

    fn set_cursor_position(&mut self, column: u8, row: u8) -> Result<(), P::Error> {
        self.cursor = (column, row);
        Ok(())
    }

    fn set_message(&mut self, message: &str) -> Result<(), P::Error> {
        self.text.push_str(message);
        Ok(())
    }

    fn set_color(&mut self, color: Color) -> Result<(), P::Error> {
        self.pins.red.set_state(PinState::from(color.red != 0))?;
        self.pins.green.set_state(PinState::from(color.green != 0))?;
        self.pins.blue.set_state(PinState::from(color.blue != 0))?;
        self.color = color;
        Ok(())
    }
}

/// Expander indices of the display pins, in `LcdPins` field order.
pub fn lcd_pin_indices(pins: &LcdPins<FakePin>) -> [u8; 10] {
    [
        pins.rs.index(),
        pins.enable.index(),
        pins.d4.index(),
        pins.d5.index(),
        pins.d6.index(),
        pins.d7.index(),
        pins.red.index(),
        pins.green.index(),
        pins.blue.index(),
        pins.read_write.index(),
    ]
}
