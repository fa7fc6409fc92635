use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Token color of a player. Determines the start square and the home entrance.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// Default seating order. Players are assigned colors from the front.
    pub const PALETTE: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    pub fn index(&self) -> usize {
        match self {
            Color::Red => 0,
            Color::Blue => 1,
            Color::Yellow => 2,
            Color::Green => 3,
        }
    }

    /// The color seated after this one in the default palette.
    pub fn next(&self) -> Color {
        Self::PALETTE[(self.index() + 1) % Self::PALETTE.len()]
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Color::Red => "🔴",
            Color::Blue => "🔵",
            Color::Yellow => "🟡",
            Color::Green => "🟢",
        }
    }
}
