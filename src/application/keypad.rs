//! Calculator keys and the on-screen button grid.

use crate::domain::Operator;

/// A key the calculator reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorKey {
    /// A decimal digit, 0 through 9.
    Digit(u8),
    Point,
    Operator(Operator),
    Clear,
    Equals,
}

/// Buttons in screen order, one inner array per row.
pub const BUTTON_GRID: [[CalculatorKey; 4]; 4] = [
    [
        CalculatorKey::Digit(7),
        CalculatorKey::Digit(8),
        CalculatorKey::Digit(9),
        CalculatorKey::Operator(Operator::Divide),
    ],
    [
        CalculatorKey::Digit(4),
        CalculatorKey::Digit(5),
        CalculatorKey::Digit(6),
        CalculatorKey::Operator(Operator::Multiply),
    ],
    [
        CalculatorKey::Digit(1),
        CalculatorKey::Digit(2),
        CalculatorKey::Digit(3),
        CalculatorKey::Operator(Operator::Subtract),
    ],
    [
        CalculatorKey::Digit(0),
        CalculatorKey::Clear,
        CalculatorKey::Equals,
        CalculatorKey::Operator(Operator::Add),
    ],
];

pub const GRID_ROWS: usize = BUTTON_GRID.len();
pub const GRID_COLS: usize = BUTTON_GRID[0].len();

impl CalculatorKey {
    /// Maps a typed character to a key. `x` is accepted for multiplication.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => ch.to_digit(10).map(|d| Self::Digit(d as u8)),
            '.' => Some(Self::Point),
            'x' | 'X' => Some(Self::Operator(Operator::Multiply)),
            '=' => Some(Self::Equals),
            'c' | 'C' => Some(Self::Clear),
            _ => Operator::from_symbol(ch).map(Self::Operator),
        }
    }

    /// Text on the button and on the display.
    pub fn label(self) -> char {
        match self {
            Self::Digit(d) => char::from(b'0' + d),
            Self::Point => '.',
            Self::Operator(Operator::Multiply) => 'x',
            Self::Operator(op) => op.symbol(),
            Self::Clear => 'C',
            Self::Equals => '=',
        }
    }

    /// Character appended to the expression, for keys that append one.
    pub fn expression_char(self) -> Option<char> {
        match self {
            Self::Digit(_) | Self::Point => Some(self.label()),
            Self::Operator(op) => Some(op.symbol()),
            Self::Clear | Self::Equals => None,
        }
    }
}
