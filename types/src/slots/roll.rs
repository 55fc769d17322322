use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

use super::{Reels, SessionId, Symbol};

/// Audit record of a single roll. Written once, never updated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RollRecord {
    pub session_id: SessionId,
    /// Position of this roll within its session, starting at 0.
    pub index: u64,
    /// Symbols shown to the player (the substitute roll when suppressed).
    pub symbols: Reels,
    pub credits_before: u64,
    pub credits_after: u64,
    pub credits_won: u64,
    pub was_winning_roll: bool,
    /// True iff an originally winning roll was replaced by a losing one.
    pub was_rerolled: bool,
    pub created_at: u64,
}

impl Write for RollRecord {
    fn write(&self, writer: &mut impl BufMut) {
        self.session_id.write(writer);
        self.index.write(writer);
        for symbol in &self.symbols {
            symbol.write(writer);
        }
        self.credits_before.write(writer);
        self.credits_after.write(writer);
        self.credits_won.write(writer);
        self.was_winning_roll.write(writer);
        self.was_rerolled.write(writer);
        self.created_at.write(writer);
    }
}

impl Read for RollRecord {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            session_id: SessionId::read(reader)?,
            index: u64::read(reader)?,
            symbols: [
                Symbol::read(reader)?,
                Symbol::read(reader)?,
                Symbol::read(reader)?,
            ],
            credits_before: u64::read(reader)?,
            credits_after: u64::read(reader)?,
            credits_won: u64::read(reader)?,
            was_winning_roll: bool::read(reader)?,
            was_rerolled: bool::read(reader)?,
            created_at: u64::read(reader)?,
        })
    }
}

impl EncodeSize for RollRecord {
    fn encode_size(&self) -> usize {
        self.session_id.encode_size()
            + self.index.encode_size()
            + self.symbols.len() * Symbol::SIZE
            + self.credits_before.encode_size()
            + self.credits_after.encode_size()
            + self.credits_won.encode_size()
            + self.was_winning_roll.encode_size()
            + self.was_rerolled.encode_size()
            + self.created_at.encode_size()
    }
}
