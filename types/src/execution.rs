use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

use crate::api::{CashOutReceipt, RollOutcome, SessionCreated};
use crate::slots::{RollRecord, Session, SessionId};

/// Storage key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Session(SessionId),
    /// Roll record by session and roll index.
    Roll(SessionId, u64),
}

impl Write for Key {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Session(id) => {
                0u8.write(writer);
                id.write(writer);
            }
            Self::Roll(id, index) => {
                1u8.write(writer);
                id.write(writer);
                index.write(writer);
            }
        }
    }
}

impl Read for Key {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let key = match u8::read(reader)? {
            0 => Self::Session(SessionId::read(reader)?),
            1 => Self::Roll(SessionId::read(reader)?, u64::read(reader)?),
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(key)
    }
}

impl EncodeSize for Key {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Session(id) => id.encode_size(),
                Self::Roll(id, index) => id.encode_size() + index.encode_size(),
            }
    }
}

/// Storage value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Session(Session),
    Roll(RollRecord),
}

impl Write for Value {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Session(session) => {
                0u8.write(writer);
                session.write(writer);
            }
            Self::Roll(roll) => {
                1u8.write(writer);
                roll.write(writer);
            }
        }
    }
}

impl Read for Value {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = match u8::read(reader)? {
            0 => Self::Session(Session::read(reader)?),
            1 => Self::Roll(RollRecord::read(reader)?),
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(value)
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Session(session) => session.encode_size(),
                Self::Roll(roll) => roll.encode_size(),
            }
    }
}

/// A state-changing request against the slots engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// Open a session under a caller-chosen identifier.
    CreateSession { session_id: SessionId },
    PlayRoll { session_id: SessionId },
    CashOut { session_id: SessionId },
}

impl Instruction {
    pub fn session_id(&self) -> SessionId {
        match self {
            Self::CreateSession { session_id }
            | Self::PlayRoll { session_id }
            | Self::CashOut { session_id } => *session_id,
        }
    }
}

/// Result of a successfully applied instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Output {
    SessionCreated(SessionCreated),
    Roll(RollOutcome),
    CashOut(CashOutReceipt),
}
