use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{SlotsError, PLAY_COST, STARTING_CREDITS};

/// Opaque session identifier handed to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl Write for SessionId {
    fn write(&self, writer: &mut impl BufMut) {
        writer.put_slice(self.0.as_bytes());
    }
}

impl Read for SessionId {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        if reader.remaining() < Self::SIZE {
            return Err(Error::EndOfBuffer);
        }
        let mut bytes = [0u8; 16];
        reader.copy_to_slice(&mut bytes);
        Ok(Self(Uuid::from_bytes(bytes)))
    }
}

impl FixedSize for SessionId {
    const SIZE: usize = 16;
}

/// One player's credit ledger.
///
/// `Active` sessions can be played and cashed out. Cash-out moves every
/// remaining credit into `account_credits` and closes the session for good;
/// a closed session always has zero credits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub credits: u64,
    pub account_credits: u64,
    pub is_active: bool,
    pub created_at: u64,
    pub closed_at: Option<u64>,
    pub roll_count: u64,
}

impl Session {
    pub fn new(id: SessionId, created_at: u64) -> Self {
        Self {
            id,
            credits: STARTING_CREDITS,
            account_credits: 0,
            is_active: true,
            created_at,
            closed_at: None,
            roll_count: 0,
        }
    }

    /// True when the balance covers one roll. Does not look at `is_active`.
    pub fn can_play(&self) -> bool {
        self.credits >= PLAY_COST
    }

    pub fn deduct_credit(&mut self) -> Result<(), SlotsError> {
        if !self.can_play() {
            return Err(SlotsError::InsufficientCredits);
        }
        self.credits -= PLAY_COST;
        Ok(())
    }

    pub fn add_credits(&mut self, amount: u64) {
        debug_assert!(self.is_active, "credits added to closed session {}", self.id);
        self.credits = self.credits.saturating_add(amount);
    }

    /// Closes the session and returns the new account total.
    ///
    /// Callers only reach this through an active-session lookup.
    pub fn cash_out(&mut self, now: u64) -> u64 {
        debug_assert!(self.is_active, "cash out of closed session {}", self.id);
        self.account_credits = self.account_credits.saturating_add(self.credits);
        self.credits = 0;
        self.is_active = false;
        self.closed_at.get_or_insert(now);
        self.account_credits
    }
}

impl Write for Session {
    fn write(&self, writer: &mut impl BufMut) {
        self.id.write(writer);
        self.credits.write(writer);
        self.account_credits.write(writer);
        self.is_active.write(writer);
        self.created_at.write(writer);
        self.closed_at.write(writer);
        self.roll_count.write(writer);
    }
}

impl Read for Session {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let session = Self {
            id: SessionId::read(reader)?,
            credits: u64::read(reader)?,
            account_credits: u64::read(reader)?,
            is_active: bool::read(reader)?,
            created_at: u64::read(reader)?,
            closed_at: Option::<u64>::read(reader)?,
            roll_count: u64::read(reader)?,
        };
        if !session.is_active && session.credits != 0 {
            return Err(Error::Invalid("Session", "closed session holds credits"));
        }
        Ok(session)
    }
}

impl EncodeSize for Session {
    fn encode_size(&self) -> usize {
        self.id.encode_size()
            + self.credits.encode_size()
            + self.account_credits.encode_size()
            + self.is_active.encode_size()
            + self.created_at.encode_size()
            + self.closed_at.encode_size()
            + self.roll_count.encode_size()
    }
}
