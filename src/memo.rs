//! # Memo Store
//!
//! Owner of the `.dbt` sidecar. Memo fields in the table file hold a block
//! pointer; the body lives in the sidecar as a run of consecutive 512-byte
//! blocks terminated by `0x1A 0x1A` (or a single `0x1A` for dialects that
//! say so). Block 0 starts with the 4-byte little-endian next-available-block
//! counter.
//!
//! Writes are buffered: `write_value` allocates blocks and records the body
//! under its pointer, and nothing touches the file until `flush`. If record
//! serialization fails after some memo values were already allocated,
//! `rollback` restores the next-available-block counter and drops the
//! buffer, leaving the sidecar exactly as it was. The buffer is ordered by
//! pointer so a flush walks the file forward once, zero-padding any gap
//! between the current end of file and the next block it writes.
//!
//! The counter is persisted to the sidecar head at close, not on every
//! mutation.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use crate::condition::{Condition, ConditionSink};
use crate::config::{MEMO_BLOCK_SIZE, MEMO_TERMINATOR};

/// Buffered writer/reader for the `.dbt` sidecar.
#[derive(Debug)]
pub struct MemoStore {
    path: PathBuf,
    file: Option<File>,
    next_block: u32,
    buffer: BTreeMap<u32, Vec<u8>>,
    rollback_anchor: Option<u32>,
    single_terminator: bool,
}

impl MemoStore {
    /// Attaches to the sidecar at `path`, opening it if it exists. A missing
    /// sidecar is not an error; it gets created on the first memo write.
    pub fn attach(path: impl Into<PathBuf>, single_terminator: bool) -> Result<MemoStore> {
        let path = path.into();
        let mut store = MemoStore {
            path,
            file: None,
            next_block: 1,
            buffer: BTreeMap::new(),
            rollback_anchor: None,
            single_terminator,
        };

        if store.path.exists() {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .open(&store.path)
                .wrap_err_with(|| format!("failed to open memo file '{}'", store.path.display()))?;
            let mut head = [0u8; 4];
            if file.read_exact(&mut head).is_ok() {
                store.next_block = u32::from_le_bytes(head).max(1);
            }
            store.file = Some(file);
        }

        Ok(store)
    }

    /// True when a sidecar file is attached.
    pub fn exists(&self) -> bool {
        self.file.is_some()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The block the next memo value will be placed at.
    pub fn next_block(&self) -> u32 {
        self.next_block
    }

    /// Switches the terminator rule; used when the owning table changes
    /// dialect state after a reload.
    pub fn set_single_terminator(&mut self, single: bool) {
        self.single_terminator = single;
    }

    fn create_sidecar(&mut self, sink: &mut ConditionSink) -> bool {
        match OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.path)
        {
            Ok(mut file) => {
                let mut block0 = [0u8; MEMO_BLOCK_SIZE];
                block0[..4].copy_from_slice(&1u32.to_le_bytes());
                if file.write_all(&block0).is_err() {
                    sink(&Condition::DbtReadOnly {
                        path: self.path.clone(),
                    });
                    return false;
                }
                self.file = Some(file);
                self.next_block = 1;
                tracing::debug!(path = %self.path.display(), "created memo sidecar");
                true
            }
            Err(_) => {
                sink(&Condition::DbtReadOnly {
                    path: self.path.clone(),
                });
                false
            }
        }
    }

    /// Buffers one memo body and returns the block pointer it was assigned,
    /// or `None` when the sidecar cannot be written (reported through the
    /// sink; the field then stores a blank pointer).
    pub fn write_value(&mut self, body: &[u8], sink: &mut ConditionSink) -> Result<Option<u32>> {
        if self.file.is_none() && !self.create_sidecar(sink) {
            return Ok(None);
        }

        let mut data = Vec::with_capacity(body.len() + MEMO_TERMINATOR.len());
        data.extend_from_slice(body);
        // Writes always use the classic two-byte terminator; the dialect flag
        // only affects how reads find the end of a value.
        data.extend_from_slice(&MEMO_TERMINATOR);

        let blocks = data.len().div_ceil(MEMO_BLOCK_SIZE) as u32;
        let pointer = self.next_block;
        if self.rollback_anchor.is_none() {
            self.rollback_anchor = Some(pointer);
        }
        self.buffer.insert(pointer, data);
        self.next_block += blocks;
        Ok(Some(pointer))
    }

    /// Reads the memo body starting at `pointer`, up to and excluding the
    /// terminator. Returns `None` when no sidecar is attached.
    pub fn read_value(&mut self, pointer: u32) -> Result<Option<Vec<u8>>> {
        let Some(file) = self.file.as_mut() else {
            return Ok(None);
        };

        file.seek(SeekFrom::Start(pointer as u64 * MEMO_BLOCK_SIZE as u64))
            .wrap_err("failed to seek memo block")?;

        let single = self.single_terminator;
        let mut body = Vec::new();
        let mut chunk = [0u8; MEMO_BLOCK_SIZE];
        loop {
            let n = file.read(&mut chunk)?;
            if n == 0 {
                // EOF without a terminator: everything read is the body.
                return Ok(Some(body));
            }
            // Search from one byte before the chunk so a two-byte terminator
            // straddling the block boundary is still found.
            let scan_from = body.len().saturating_sub(1);
            body.extend_from_slice(&chunk[..n]);
            if let Some(end) = find_terminator(single, &body, scan_from) {
                body.truncate(end);
                return Ok(Some(body));
            }
        }
    }

    /// Writes every buffered value at its block offset, zero-padding any gap
    /// between the end of file and the block, then clears the buffer and the
    /// rollback anchor.
    pub fn flush(&mut self) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        if self.buffer.is_empty() {
            return Ok(());
        }

        let mut file_len = file.metadata()?.len();
        for (&pointer, data) in &self.buffer {
            let target = pointer as u64 * MEMO_BLOCK_SIZE as u64;
            if file_len < target {
                file.seek(SeekFrom::Start(file_len))?;
                let mut gap = target - file_len;
                let zeros = [0u8; MEMO_BLOCK_SIZE];
                while gap > 0 {
                    let n = gap.min(MEMO_BLOCK_SIZE as u64) as usize;
                    file.write_all(&zeros[..n])?;
                    gap -= n as u64;
                }
            } else {
                file.seek(SeekFrom::Start(target))?;
            }
            file.write_all(data)?;
            file_len = file_len.max(target + data.len() as u64);
        }
        file.sync_data().wrap_err("failed to flush memo file")?;

        self.buffer.clear();
        self.rollback_anchor = None;
        Ok(())
    }

    /// Discards buffered values and restores the next-available-block
    /// counter to its pre-operation value. Nothing reached the file, so no
    /// bytes need undoing.
    pub fn rollback(&mut self) {
        if let Some(anchor) = self.rollback_anchor.take() {
            self.next_block = anchor;
        }
        self.buffer.clear();
    }

    /// Persists the next-available-block counter to the sidecar head and
    /// releases the handle.
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.seek(SeekFrom::Start(0))?;
            file.write_all(&self.next_block.to_le_bytes())?;
            file.sync_data()
                .wrap_err("failed to sync memo file at close")?;
        }
        Ok(())
    }

    /// Replaces the sidecar contents in place with the file at `source`,
    /// keeping the existing handle. A missing source resets the sidecar to
    /// a bare counter block (the rewrite produced no memo values). No-op
    /// when no sidecar is attached.
    pub fn overwrite_from(&mut self, source: &Path) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        if source.exists() {
            let mut src = File::open(source)
                .wrap_err_with(|| format!("failed to open '{}'", source.display()))?;
            std::io::copy(&mut src, file)?;
        } else {
            let mut block0 = [0u8; MEMO_BLOCK_SIZE];
            block0[..4].copy_from_slice(&1u32.to_le_bytes());
            file.write_all(&block0)?;
        }
        file.sync_data()?;
        self.reload()
    }

    /// Re-reads the next-available-block counter, used after vacuum rewrote
    /// the sidecar in place.
    pub fn reload(&mut self) -> Result<()> {
        if let Some(file) = self.file.as_mut() {
            file.seek(SeekFrom::Start(0))?;
            let mut head = [0u8; 4];
            file.read_exact(&mut head)?;
            self.next_block = u32::from_le_bytes(head).max(1);
        }
        Ok(())
    }
}

fn find_terminator(single: bool, body: &[u8], from: usize) -> Option<usize> {
    if single {
        body[from..].iter().position(|&b| b == 0x1a).map(|i| from + i)
    } else {
        body[from..]
            .windows(2)
            .position(|w| w == MEMO_TERMINATOR)
            .map(|i| from + i)
    }
}
