//! Append-only log of committed changes.
//!
//! Every committed instruction is written as one frame:
//!
//! ```text
//! [len:u32] [count:u32] ([Key] [Value])*
//! ```
//!
//! where `len` covers everything after it. A frame cut short by a crash is
//! dropped (and truncated away) when the journal is reopened.

use bytes::Buf;
use commonware_codec::{EncodeSize, Error as CodecError, ReadExt, Write};
use slots_types::execution::{Key, Value};
use std::{
    fs::{File, OpenOptions},
    io::{Read as _, Write as _},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{error, info, warn};

const LEN_PREFIX: usize = 4;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("journal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt journal frame at offset {offset}: {source}")]
    Corrupt { offset: usize, source: CodecError },
    #[error("batch too large for one frame")]
    Oversized,
    #[error("journal disabled after a failed rollback")]
    Failed,
}

pub type Batch = Vec<(Key, Value)>;

pub struct Journal {
    path: PathBuf,
    file: File,
    /// Length of the file up to the last complete frame.
    len: u64,
    /// Set when a failed append could not be rolled back.
    failed: bool,
}

impl Journal {
    /// Open (or create) the journal at `path`, returning every complete batch
    /// it holds in write order.
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, Vec<Batch>), JournalError> {
        let path = path.as_ref().to_path_buf();
        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&path)?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        let (batches, valid) = decode_frames(&contents)?;
        if valid < contents.len() {
            warn!(
                path = %path.display(),
                dropped = contents.len() - valid,
                "dropping truncated journal frame"
            );
            file.set_len(valid as u64)?;
        }
        info!(path = %path.display(), batches = batches.len(), "journal opened");

        Ok((
            Self {
                path,
                file,
                len: valid as u64,
                failed: false,
            },
            batches,
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durably append one batch.
    ///
    /// On failure the file is cut back to the last complete frame. If that
    /// also fails, every later append is refused.
    pub fn append(&mut self, changes: &[(Key, Value)]) -> Result<(), JournalError> {
        if self.failed {
            return Err(JournalError::Failed);
        }
        let frame = encode_frame(changes)?;
        match self.write_frame(&frame) {
            Ok(()) => {
                self.len += frame.len() as u64;
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = self.rollback() {
                    error!(
                        path = %self.path.display(),
                        error = %rollback,
                        "journal rollback failed, refusing further appends"
                    );
                    self.failed = true;
                }
                Err(e.into())
            }
        }
    }

    fn write_frame(&mut self, frame: &[u8]) -> std::io::Result<()> {
        self.file.write_all(frame)?;
        self.file.sync_data()
    }

    fn rollback(&mut self) -> std::io::Result<()> {
        self.file.set_len(self.len)?;
        self.file.sync_data()
    }
}

fn encode_frame(changes: &[(Key, Value)]) -> Result<Vec<u8>, JournalError> {
    let count = u32::try_from(changes.len()).map_err(|_| JournalError::Oversized)?;
    let payload_len = count.encode_size()
        + changes
            .iter()
            .map(|(key, value)| key.encode_size() + value.encode_size())
            .sum::<usize>();
    let len = u32::try_from(payload_len).map_err(|_| JournalError::Oversized)?;

    let mut frame = Vec::with_capacity(LEN_PREFIX + payload_len);
    len.write(&mut frame);
    count.write(&mut frame);
    for (key, value) in changes {
        key.write(&mut frame);
        value.write(&mut frame);
    }
    Ok(frame)
}

/// Decode all complete frames, returning them with the byte length they span.
fn decode_frames(contents: &[u8]) -> Result<(Vec<Batch>, usize), JournalError> {
    let mut batches = Vec::new();
    let mut offset = 0;
    while contents.len() - offset >= LEN_PREFIX {
        let mut reader = &contents[offset..];
        let len = reader.get_u32() as usize;
        if reader.remaining() < len {
            break;
        }
        let mut payload = &reader[..len];
        let batch = decode_batch(&mut payload)
            .map_err(|source| JournalError::Corrupt { offset, source })?;
        if payload.has_remaining() {
            return Err(JournalError::Corrupt {
                offset,
                source: CodecError::Invalid("Journal", "trailing bytes in frame"),
            });
        }
        batches.push(batch);
        offset += LEN_PREFIX + len;
    }
    Ok((batches, offset))
}

fn decode_batch(reader: &mut impl Buf) -> Result<Batch, CodecError> {
    let count = u32::read(reader)?;
    let mut batch = Vec::new();
    for _ in 0..count {
        let key = Key::read(reader)?;
        let value = Value::read(reader)?;
        batch.push((key, value));
    }
    Ok(batch)
}
