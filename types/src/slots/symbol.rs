use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::REELS;

/// Reel symbols. The catalog is fixed: names, glyphs and rewards are part of
/// the public API and must not change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Symbol {
    Cherry = 0,
    Lemon = 1,
    Orange = 2,
    Watermelon = 3,
}

/// The three symbols of a single roll, left to right.
pub type Reels = [Symbol; REELS];

impl Symbol {
    /// Catalog order. Index into this array is what the reel generator draws.
    pub const ALL: [Symbol; 4] = [
        Symbol::Cherry,
        Symbol::Lemon,
        Symbol::Orange,
        Symbol::Watermelon,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Symbol::Cherry => "cherry",
            Symbol::Lemon => "lemon",
            Symbol::Orange => "orange",
            Symbol::Watermelon => "watermelon",
        }
    }

    /// Single-letter display glyph.
    pub fn glyph(&self) -> &'static str {
        match self {
            Symbol::Cherry => "C",
            Symbol::Lemon => "L",
            Symbol::Orange => "O",
            Symbol::Watermelon => "W",
        }
    }

    /// Credits paid when all reels show this symbol.
    pub fn reward(&self) -> u64 {
        match self {
            Symbol::Cherry => 10,
            Symbol::Lemon => 20,
            Symbol::Orange => 30,
            Symbol::Watermelon => 40,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown symbol: {0}")]
pub struct UnknownSymbol(pub String);

impl FromStr for Symbol {
    type Err = UnknownSymbol;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|symbol| symbol.name() == s)
            .ok_or_else(|| UnknownSymbol(s.to_string()))
    }
}

/// Display glyphs for a roll, in reel order.
pub fn glyphs(reels: &Reels) -> [&'static str; REELS] {
    reels.map(|symbol| symbol.glyph())
}

impl Write for Symbol {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for Symbol {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        Self::from_index(value as usize).ok_or(Error::InvalidEnum(value))
    }
}

impl FixedSize for Symbol {
    const SIZE: usize = 1;
}
