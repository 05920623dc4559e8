//! Canonical calendar months and the inputs that can name one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the twelve canonical calendar months, in calendar order.
///
/// The canonical spelling is the Spanish name used by the national weather
/// service records (note `Setiembre`, not `Septiembre`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MonthName {
    Enero,
    Febrero,
    Marzo,
    Abril,
    Mayo,
    Junio,
    Julio,
    Agosto,
    Setiembre,
    Octubre,
    Noviembre,
    Diciembre,
}

impl MonthName {
    /// All months in calendar order.
    pub const ALL: [MonthName; 12] = [
        MonthName::Enero,
        MonthName::Febrero,
        MonthName::Marzo,
        MonthName::Abril,
        MonthName::Mayo,
        MonthName::Junio,
        MonthName::Julio,
        MonthName::Agosto,
        MonthName::Setiembre,
        MonthName::Octubre,
        MonthName::Noviembre,
        MonthName::Diciembre,
    ];

    /// Zero-based position in calendar order (0 = Enero).
    pub fn index(self) -> usize {
        self as usize
    }

    /// One-based month number (1 = Enero).
    pub fn number(self) -> u32 {
        self.index() as u32 + 1
    }

    /// Month for a zero-based calendar position.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Canonical spelling.
    pub fn name(self) -> &'static str {
        match self {
            MonthName::Enero => "Enero",
            MonthName::Febrero => "Febrero",
            MonthName::Marzo => "Marzo",
            MonthName::Abril => "Abril",
            MonthName::Mayo => "Mayo",
            MonthName::Junio => "Junio",
            MonthName::Julio => "Julio",
            MonthName::Agosto => "Agosto",
            MonthName::Setiembre => "Setiembre",
            MonthName::Octubre => "Octubre",
            MonthName::Noviembre => "Noviembre",
            MonthName::Diciembre => "Diciembre",
        }
    }

    /// Three-letter abbreviation used in chart labels.
    pub fn abbreviation(self) -> &'static str {
        &self.name()[..3]
    }
}

impl fmt::Display for MonthName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A month as supplied by a caller: either a number or free text.
#[derive(Debug, Clone, PartialEq)]
pub enum MonthInput {
    Number(i64),
    Text(String),
}

impl From<i64> for MonthInput {
    fn from(n: i64) -> Self {
        MonthInput::Number(n)
    }
}

impl From<i32> for MonthInput {
    fn from(n: i32) -> Self {
        MonthInput::Number(n as i64)
    }
}

impl From<u32> for MonthInput {
    fn from(n: u32) -> Self {
        MonthInput::Number(n as i64)
    }
}

impl From<&str> for MonthInput {
    fn from(s: &str) -> Self {
        MonthInput::Text(s.to_string())
    }
}

impl From<String> for MonthInput {
    fn from(s: String) -> Self {
        MonthInput::Text(s)
    }
}

impl From<&String> for MonthInput {
    fn from(s: &String) -> Self {
        MonthInput::Text(s.clone())
    }
}

impl From<MonthName> for MonthInput {
    fn from(m: MonthName) -> Self {
        MonthInput::Text(m.name().to_string())
    }
}

impl fmt::Display for MonthInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthInput::Number(n) => write!(f, "{}", n),
            MonthInput::Text(s) => f.write_str(s),
        }
    }
}
