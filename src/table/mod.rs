//! # Table Engine
//!
//! The `Table` struct is the public entry point: it owns the DBF file
//! handle, the parsed header state, the field list with its compiled record
//! layout, and the memo sidecar. One instance serves one file from
//! open/create until close.
//!
//! ## Record protocol
//!
//! Every record is one deletion byte (`0x20` live, `0x2A` tombstone)
//! followed by the fixed-width field slots in declaration order. Deletes
//! only flip the marker; inserts reuse the earliest tombstoned slot before
//! appending. Record indexes in the public API always count live records:
//! `seek(1)` means the second record a scan would visit, not the second
//! physical slot.
//!
//! ## Write ordering
//!
//! Within a mutation, record bytes reach the main file before the memo
//! buffer flushes, and the in-memory record count only advances after both.
//! The header is written lazily: creating a table and adding columns stays
//! in memory until the first insert (or close) flushes the initial header.
//! On close, the modification date and record count are rewritten if
//! records changed, the descriptor block if the column list changed, and a
//! final `0x1A` end-of-file marker is appended if the file was modified and
//! does not end with one.
//!
//! ## Concurrency
//!
//! The engine is single-threaded and blocking. Nothing here locks the
//! file; two writers on the same path are last-writer-wins.

mod header;
mod vacuum;

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use eyre::{bail, ensure, Result, WrapErr};

use crate::codepage::CodePage;
use crate::condition::{default_sink, Condition, ConditionSink};
use crate::config::{
    DEFAULT_VERSION, DESCRIPTOR_SIZE, DESCRIPTOR_TERMINATOR, EOF_MARKER, FIELD_NAME_SIZE,
    HEADER_SIZE, RECORD_DELETED, RECORD_LIVE,
};
use crate::convert;
use crate::dialect::Dialect;
use crate::field::{FieldDescriptor, FieldType};
use crate::layout::{Decoded, RecordLayout};
use crate::memo::MemoStore;
use crate::value::Value;

use header::{RawDescriptor, RawHeader};
use zerocopy::IntoBytes;

#[derive(Debug, Default, Clone, Copy)]
struct DirtyFlags {
    records: bool,
    fields: bool,
}

/// One live record presented to a `for_each` body: field values plus
/// name-based access, detached from the engine's scan buffer.
pub struct Row<'a> {
    fields: &'a [FieldDescriptor],
    values: Vec<Value>,
}

impl<'a> Row<'a> {
    /// Looks a value up by column name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .position(|f| f.name() == name)
            .map(|idx| &self.values[idx])
    }

    /// Values in declaration order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields
            .iter()
            .map(|f| f.name())
            .zip(self.values.iter())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A dBase-family table: the DBF file plus its optional DBT memo sidecar.
pub struct Table {
    path: PathBuf,
    file: Option<File>,
    raw_header: RawHeader,
    version: u8,
    dialect: &'static Dialect,
    language_driver: u8,
    codepage: Option<&'static CodePage>,
    record_count: u32,
    header_size: u16,
    record_size: u16,
    fields: Vec<FieldDescriptor>,
    layout: RecordLayout,
    memo: MemoStore,
    cursor: Option<u64>,
    header_on_disk: bool,
    written: bool,
    closed: bool,
    dirty: DirtyFlags,
    sink: ConditionSink,
}

fn sidecar_path(path: &Path) -> PathBuf {
    path.with_extension("dbt")
}

impl Table {
    /// Creates a new empty table at `path`, truncating whatever was there.
    /// Nothing is written until the first insert (or close) flushes the
    /// header.
    pub fn create(path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .wrap_err_with(|| format!("failed to create table '{}'", path.display()))?;

        let dialect = Dialect::lookup(DEFAULT_VERSION);
        let memo = MemoStore::attach(sidecar_path(&path), dialect.single_memo_terminator)?;
        tracing::debug!(path = %path.display(), "created table");

        Ok(Table {
            raw_header: RawHeader::new(DEFAULT_VERSION, 0),
            version: DEFAULT_VERSION,
            dialect,
            language_driver: 0,
            codepage: None,
            record_count: 0,
            header_size: 0,
            record_size: 0,
            fields: Vec::new(),
            layout: RecordLayout::compile(&[], dialect)?,
            memo,
            cursor: None,
            header_on_disk: false,
            written: false,
            closed: false,
            dirty: DirtyFlags::default(),
            sink: default_sink(),
            file: Some(file),
            path,
        })
    }

    /// Opens the table at `path`, or creates an empty one when the file
    /// does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Table> {
        let path = path.as_ref();
        if !path.exists() {
            return Self::create(path);
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(path)
            .wrap_err_with(|| format!("failed to open table '{}'", path.display()))?;

        let mut table = Table {
            path: path.to_path_buf(),
            file: Some(file),
            raw_header: RawHeader::new(DEFAULT_VERSION, 0),
            version: DEFAULT_VERSION,
            dialect: Dialect::lookup(DEFAULT_VERSION),
            language_driver: 0,
            codepage: None,
            record_count: 0,
            header_size: 0,
            record_size: 0,
            fields: Vec::new(),
            layout: RecordLayout::compile(&[], Dialect::lookup(DEFAULT_VERSION))?,
            memo: MemoStore::attach(sidecar_path(path), false)?,
            cursor: None,
            header_on_disk: false,
            written: false,
            closed: false,
            dirty: DirtyFlags::default(),
            sink: default_sink(),
        };
        table.load()?;

        if table.dialect.expects_memo && !table.memo.exists() {
            let condition = Condition::DbtMissing {
                path: table.memo.path().to_path_buf(),
            };
            (table.sink)(&condition);
        }

        tracing::debug!(
            path = %path.display(),
            dialect = table.dialect.name,
            records = table.record_count,
            columns = table.fields.len(),
            "opened table"
        );
        Ok(table)
    }

    /// Parses the header and descriptor array from the current file. Also
    /// used to refresh state after vacuum rewrote the file in place.
    fn load(&mut self) -> Result<()> {
        // Pull the raw bytes first; state is assigned only after the file
        // borrow ends.
        let (head, descriptors) = {
            let file = self.file.as_mut().expect("load requires an open file");
            file.seek(SeekFrom::Start(0))?;

            let mut head = [0u8; HEADER_SIZE];
            if file.read_exact(&mut head).is_err() {
                (None, Vec::new())
            } else {
                let mut raws: Vec<[u8; DESCRIPTOR_SIZE]> = Vec::new();
                loop {
                    let mut first = [0u8; 1];
                    if file.read_exact(&mut first).is_err()
                        || first[0] == DESCRIPTOR_TERMINATOR
                    {
                        break;
                    }
                    let mut raw = [0u8; DESCRIPTOR_SIZE];
                    raw[0] = first[0];
                    if file.read_exact(&mut raw[1..]).is_err() {
                        break;
                    }
                    raws.push(raw);
                }
                (Some(head), raws)
            }
        };

        let Some(head) = head else {
            // A short header reads as an empty table with no columns.
            self.raw_header = RawHeader::new(DEFAULT_VERSION, 0);
            self.version = DEFAULT_VERSION;
            self.dialect = Dialect::lookup(DEFAULT_VERSION);
            self.language_driver = 0;
            self.codepage = None;
            self.record_count = 0;
            self.header_size = 0;
            self.record_size = 0;
            self.fields.clear();
            self.layout = RecordLayout::compile(&[], self.dialect)?;
            self.header_on_disk = false;
            self.cursor = None;
            return Ok(());
        };

        self.raw_header = RawHeader::from_bytes(&head)?;
        self.version = self.raw_header.version();
        self.dialect = Dialect::lookup(self.version);
        self.language_driver = self.raw_header.language_driver();
        self.codepage = CodePage::from_driver(self.language_driver);
        self.record_count = self.raw_header.record_count();
        self.header_size = self.raw_header.header_size();
        self.record_size = self.raw_header.record_size();

        self.fields.clear();
        for raw in &descriptors {
            let field = RawDescriptor::from_bytes(raw)?.to_field(self.dialect)?;
            self.fields.push(field);
        }

        self.layout = RecordLayout::compile(&self.fields, self.dialect)?;
        self.memo =
            MemoStore::attach(sidecar_path(&self.path), self.dialect.single_memo_terminator)?;
        self.header_on_disk = true;
        self.cursor = None;
        Ok(())
    }

    /// Appends a column. The column list is only mutable while the table
    /// holds no records; afterwards the addition is skipped and reported as
    /// `RECORDS_EXIST`. Returns whether the column was added.
    pub fn add_column(
        &mut self,
        name: &str,
        field_type: FieldType,
        length: Option<u32>,
        precision: Option<u8>,
    ) -> Result<bool> {
        if self.record_count > 0 {
            self.emit(Condition::RecordsExist);
            return Ok(false);
        }
        if self.fields.iter().any(|f| f.name() == name) {
            self.emit(Condition::ColumnExists { name: name.into() });
            return Ok(false);
        }

        let field = FieldDescriptor::validated(name, field_type, length, precision)?;
        if name.len() > FIELD_NAME_SIZE {
            self.emit(Condition::ColumnNameTooLong { name: name.into() });
        }

        let body: u64 = self.fields.iter().map(|f| f.length() as u64).sum();
        ensure!(
            1 + body + field.length() as u64 <= u16::MAX as u64,
            "record size would exceed {} bytes",
            u16::MAX
        );

        self.fields.push(field);
        self.layout = RecordLayout::compile(&self.fields, self.dialect)?;
        self.record_size = self.layout.record_size() as u16;
        self.header_size = (HEADER_SIZE + DESCRIPTOR_SIZE * self.fields.len() + 1) as u16;
        self.dirty.fields = true;
        Ok(true)
    }

    /// Inserts one record, reusing the earliest tombstoned slot if any.
    pub fn insert(&mut self, values: &[Value]) -> Result<()> {
        ensure!(
            values.len() == self.fields.len(),
            "expected {} values, got {}",
            self.fields.len(),
            values.len()
        );
        if !self.header_on_disk {
            self.flush_initial_header()?;
        }

        let body = match self.encode_body(values) {
            Ok(body) => body,
            Err(err) => {
                self.memo.rollback();
                return Err(err);
            }
        };

        let addr = self.free_slot_address()?;
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(addr))?;
        file.write_all(&[RECORD_LIVE])?;
        file.write_all(&body)?;
        file.sync_data()?;
        self.memo.flush()?;

        self.record_count += 1;
        self.dirty.records = true;
        self.written = true;
        self.cursor = Some(addr);
        Ok(())
    }

    /// Rewrites all fields of the `index`-th live record. Returns false when
    /// the record does not exist.
    pub fn update(&mut self, index: usize, values: &[Value]) -> Result<bool> {
        if self.record_count == 0 {
            self.emit(Condition::NoRecordsWhileUpdating);
            return Ok(false);
        }
        ensure!(
            values.len() == self.fields.len(),
            "expected {} values, got {}",
            self.fields.len(),
            values.len()
        );
        if !self.seek(index)? {
            return Ok(false);
        }
        let addr = self.cursor.expect("seek succeeded");

        let body = match self.encode_body(values) {
            Ok(body) => body,
            Err(err) => {
                // Nothing reached the sidecar yet; undo the block
                // allocations before propagating.
                self.memo.rollback();
                return Err(err);
            }
        };

        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(addr + 1))?;
        file.write_all(&body)?;
        file.sync_data()?;
        self.memo.flush()?;

        self.dirty.records = true;
        self.written = true;
        Ok(true)
    }

    /// Rewrites a single column of the `index`-th live record, leaving the
    /// other slots untouched.
    pub fn update_column(&mut self, index: usize, column: &str, value: &Value) -> Result<bool> {
        if self.record_count == 0 {
            self.emit(Condition::NoRecordsWhileUpdating);
            return Ok(false);
        }
        let Some(col) = self.layout.column_index(column) else {
            bail!("unknown column '{}'", column);
        };
        if !self.seek(index)? {
            return Ok(false);
        }
        let addr = self.cursor.expect("seek succeeded");
        let offset = self.layout.slot(col).offset() as u64;

        let mut bytes = Vec::new();
        if let Err(err) = self.encode_field(col, value, &mut bytes) {
            self.memo.rollback();
            return Err(err);
        }

        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(addr + 1 + offset))?;
        file.write_all(&bytes)?;
        file.sync_data()?;
        self.memo.flush()?;

        self.dirty.records = true;
        self.written = true;
        Ok(true)
    }

    /// Tombstones the `index`-th live record. Returns false when the record
    /// does not exist.
    pub fn delete(&mut self, index: usize) -> Result<bool> {
        if !self.seek(index)? {
            return Ok(false);
        }
        let addr = self.cursor.expect("seek succeeded");
        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(addr))?;
        file.write_all(&[RECORD_DELETED])?;
        file.sync_data()?;

        self.dirty.records = true;
        self.written = true;
        Ok(true)
    }

    /// Positions the cursor at the `index`-th live record.
    pub fn seek(&mut self, index: usize) -> Result<bool> {
        let lives = self.live_addresses()?;
        match lives.get(index) {
            Some(&addr) => {
                self.cursor = Some(addr);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Ordinal of the cursor within the live-record sequence.
    pub fn tell(&mut self) -> Result<Option<usize>> {
        let Some(cursor) = self.cursor else {
            return Ok(None);
        };
        let lives = self.live_addresses()?;
        Ok(lives.iter().position(|&addr| addr == cursor))
    }

    /// Reads the record at the cursor and advances past any tombstones that
    /// follow, so the next call returns the next live record. Returns `None`
    /// at end of data.
    pub fn gets(&mut self) -> Result<Option<Vec<Value>>> {
        let Some(addr) = self.cursor else {
            return Ok(None);
        };
        let size = self.record_size as u64;
        let end = self.data_offset() + self.record_count as u64 * size;
        if size == 0 || addr >= end {
            return Ok(None);
        }

        let mut buf = vec![0u8; size as usize];
        {
            let file = self.file_mut()?;
            file.seek(SeekFrom::Start(addr))?;
            if file.read_exact(&mut buf).is_err() {
                return Ok(None);
            }
        }
        let values = self.decode_record(&buf)?;

        let mut next = addr + size;
        while next < end {
            let mut marker = [0u8; 1];
            let file = self.file_mut()?;
            file.seek(SeekFrom::Start(next))?;
            if file.read_exact(&mut marker).is_err() || marker[0] != RECORD_DELETED {
                break;
            }
            next += size;
        }
        self.cursor = Some(next);

        Ok(Some(values))
    }

    /// Visits every live record in file order.
    pub fn for_each<F>(&mut self, mut body: F) -> Result<()>
    where
        F: FnMut(Row<'_>) -> Result<()>,
    {
        let size = self.record_size as u64;
        if size == 0 {
            return Ok(());
        }
        let offset = self.data_offset();
        let end = offset + self.record_count as u64 * size;

        let mut addr = offset;
        while addr < end {
            let mut buf = vec![0u8; size as usize];
            {
                let file = self.file_mut()?;
                file.seek(SeekFrom::Start(addr))?;
                if file.read_exact(&mut buf).is_err() {
                    break;
                }
            }
            if buf[0] != RECORD_DELETED {
                let values = self.decode_record(&buf)?;
                body(Row {
                    fields: &self.fields,
                    values,
                })?;
            }
            addr += size;
        }
        Ok(())
    }

    /// All live records in file order, as value rows.
    pub fn all_records(&mut self) -> Result<Vec<Vec<Value>>> {
        let mut out = Vec::new();
        self.for_each(|row| {
            out.push(row.into_values());
            Ok(())
        })?;
        Ok(out)
    }

    /// Number of live records (scans the deletion bytes).
    pub fn live_count(&mut self) -> Result<usize> {
        Ok(self.live_addresses()?.len())
    }

    /// Record count from the header; tombstones included.
    pub fn record_count(&self) -> u32 {
        self.record_count
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    pub fn language_driver(&self) -> u8 {
        self.language_driver
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replaces the receiver for non-fatal conditions.
    pub fn set_condition_sink<F>(&mut self, sink: F)
    where
        F: FnMut(&Condition) + Send + 'static,
    {
        self.sink = Box::new(sink);
    }

    /// Flushes pending header state and the memo counter, appends the
    /// end-of-file marker if needed, and releases both handles. Called from
    /// `Drop` as well; calling it twice is a no-op.
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.memo.close()?;

        if self.file.is_some() {
            if !self.header_on_disk {
                self.flush_initial_header()?;
            } else if self.dirty.fields {
                // Column list changed after open: sizes moved, so the whole
                // header block goes out again.
                self.flush_initial_header()?;
            } else if self.dirty.records {
                let date = convert::date_to_short(&convert::today())?;
                self.raw_header.set_modified(date);
                self.raw_header.set_record_count(self.record_count);
                let count_bytes = self.record_count.to_le_bytes();
                let file = self.file_mut()?;
                file.seek(SeekFrom::Start(1))?;
                file.write_all(&date)?;
                file.write_all(&count_bytes)?;
            }

            if self.written {
                self.ensure_eof_marker()?;
            }
            let file = self.file_mut()?;
            file.sync_data()
                .wrap_err("failed to sync table at close")?;
        }

        self.file = None;
        self.closed = true;
        tracing::debug!(path = %self.path.display(), "closed table");
        Ok(())
    }

    fn ensure_eof_marker(&mut self) -> Result<()> {
        let file = self.file_mut()?;
        let len = file.metadata()?.len();
        if len > 0 {
            file.seek(SeekFrom::End(-1))?;
            let mut last = [0u8; 1];
            file.read_exact(&mut last)?;
            if last[0] == EOF_MARKER {
                return Ok(());
            }
        }
        file.seek(SeekFrom::End(0))?;
        file.write_all(&[EOF_MARKER])?;
        Ok(())
    }

    /// Writes the full header, descriptor array, and terminator byte.
    fn flush_initial_header(&mut self) -> Result<()> {
        let date = convert::date_to_short(&convert::today())?;
        self.header_size = (HEADER_SIZE + DESCRIPTOR_SIZE * self.fields.len() + 1) as u16;
        self.record_size = self.layout.record_size() as u16;
        self.raw_header.set_modified(date);
        self.raw_header.set_record_count(self.record_count);
        self.raw_header.set_header_size(self.header_size);
        self.raw_header.set_record_size(self.record_size);

        let header_bytes = self.raw_header.as_bytes().to_vec();
        let descriptor_bytes: Vec<u8> = self
            .fields
            .iter()
            .flat_map(|f| RawDescriptor::from_field(f).as_bytes().to_vec())
            .collect();

        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&header_bytes)?;
        file.write_all(&descriptor_bytes)?;
        file.write_all(&[DESCRIPTOR_TERMINATOR])?;
        file.sync_data()?;

        self.header_on_disk = true;
        self.written = true;
        self.dirty.fields = false;
        Ok(())
    }

    fn emit(&mut self, condition: Condition) {
        (self.sink)(&condition)
    }

    fn file_mut(&mut self) -> Result<&mut File> {
        self.file
            .as_mut()
            .ok_or_else(|| eyre::eyre!("table '{}' is closed", self.path.display()))
    }

    fn data_offset(&self) -> u64 {
        if self.header_on_disk {
            self.header_size as u64
        } else {
            (HEADER_SIZE + DESCRIPTOR_SIZE * self.fields.len() + 1) as u64
        }
    }

    /// Byte addresses of the live records, in file order.
    fn live_addresses(&mut self) -> Result<Vec<u64>> {
        let size = self.record_size as u64;
        let mut out = Vec::new();
        if size == 0 || self.file.is_none() {
            return Ok(out);
        }
        let offset = self.data_offset();
        let file = self.file.as_mut().expect("checked above");
        for i in 0..self.record_count as u64 {
            let addr = offset + i * size;
            file.seek(SeekFrom::Start(addr))?;
            let mut marker = [0u8; 1];
            if file.read_exact(&mut marker).is_err() {
                break;
            }
            if marker[0] != RECORD_DELETED {
                out.push(addr);
            }
        }
        Ok(out)
    }

    /// Address of the earliest tombstone, or the append position.
    fn free_slot_address(&mut self) -> Result<u64> {
        let size = self.record_size as u64;
        let offset = self.data_offset();
        let count = self.record_count as u64;
        let file = self.file_mut()?;
        for i in 0..count {
            let addr = offset + i * size;
            file.seek(SeekFrom::Start(addr))?;
            let mut marker = [0u8; 1];
            if file.read_exact(&mut marker).is_err() {
                break;
            }
            if marker[0] == RECORD_DELETED {
                return Ok(addr);
            }
        }
        Ok(offset + count * size)
    }

    /// Serializes one record body (deletion byte not included), buffering
    /// memo bodies through the sidecar store.
    fn encode_body(&mut self, values: &[Value]) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.layout.record_size().saturating_sub(1));
        for (idx, value) in values.iter().enumerate() {
            self.encode_field(idx, value, &mut out)?;
        }
        Ok(out)
    }

    fn encode_field(&mut self, idx: usize, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        let slot = *self.layout.slot(idx);
        if slot.is_memo() {
            let pointer = match slot.memo_body(value, self.codepage)? {
                None => None,
                Some(body) => self.memo.write_value(&body, &mut self.sink)?,
            };
            slot.encode_memo_pointer(pointer, out)
        } else {
            slot.encode(value, self.codepage, out)
        }
    }

    /// Decodes a full record buffer (deletion byte included), resolving
    /// memo pointers through the sidecar.
    fn decode_record(&mut self, buf: &[u8]) -> Result<Vec<Value>> {
        let body = &buf[1..];
        let mut values = Vec::with_capacity(self.fields.len());
        for idx in 0..self.fields.len() {
            let slot = *self.layout.slot(idx);
            let raw = body
                .get(slot.offset()..slot.offset() + slot.width())
                .ok_or_else(|| eyre::eyre!("record shorter than its layout"))?;
            match slot.decode(raw, self.codepage)? {
                Decoded::Value(value) => values.push(value),
                Decoded::Memo { pointer, .. } => {
                    let value = match pointer {
                        None => Value::Null,
                        Some(ptr) => match self.memo.read_value(ptr)? {
                            None => Value::Null,
                            Some(bytes) => slot.memo_value(bytes, self.codepage),
                        },
                    };
                    values.push(value);
                }
            }
        }
        Ok(values)
    }
}

impl fmt::Debug for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table")
            .field("path", &self.path)
            .field("version", &format_args!("0x{:02X}", self.version))
            .field("dialect", &self.dialect.name)
            .field("records", &self.record_count)
            .field("columns", &self.fields.len())
            .field("closed", &self.closed)
            .finish()
    }
}

impl Drop for Table {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(err) = self.close() {
                tracing::warn!(
                    error = %err,
                    path = %self.path.display(),
                    "failed to close table during drop"
                );
            }
        }
    }
}
