//! # DBF Header and Descriptor Codec
//!
//! Type-safe, zerocopy-based structs for the two fixed on-disk shapes of a
//! table file: the 32-byte header and the 32-byte field descriptor entries
//! that follow it. Both are `repr(C)` with little-endian wrapper types, so
//! reading and writing is a byte copy with no hand-rolled offset math.
//!
//! ## Header layout
//!
//! ```text
//! Offset  Size  Description
//! 0       1     Version byte (selects the dialect)
//! 1       3     Last modification date: year-1900, month, day
//! 4       4     Record count, LE u32 (tombstones included)
//! 8       2     Header size in bytes, LE u16
//! 10      2     Record size in bytes, LE u16
//! 12      2     Reserved
//! 14      1     Incomplete-transaction flag
//! 15      1     Encryption flag
//! 16      12    Reserved
//! 28      1     MDX flag
//! 29      1     Language driver (code page)
//! 30      2     Reserved
//! ```
//!
//! ## Descriptor layout
//!
//! ```text
//! Offset  Size  Description
//! 0       10    Field name, NUL-padded ASCII
//! 10      1     Reserved
//! 11      1     Type byte
//! 12      4     Reserved
//! 16      1     Length (low byte)
//! 17      1     Decimal count (or length high byte, see below)
//! 18      13    Reserved
//! 31      1     Indexed flag
//! ```
//!
//! Dialects with the decimal-as-high-byte rule store N/I lengths above 255
//! as `decimals * 256 + length`; `to_field` applies the rule on read and
//! `from_field` splits oversized lengths the same way on write.

use eyre::{bail, Result};
use zerocopy::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::config::{DESCRIPTOR_SIZE, FIELD_NAME_SIZE, HEADER_SIZE};
use crate::dialect::Dialect;
use crate::field::{FieldDescriptor, FieldType};

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct RawHeader {
    version: u8,
    modified: [u8; 3],
    record_count: U32,
    header_size: U16,
    record_size: U16,
    reserved1: [u8; 2],
    incomplete_tx: u8,
    encryption: u8,
    reserved2: [u8; 12],
    mdx: u8,
    language_driver: u8,
    reserved3: [u8; 2],
}

const _: () = assert!(std::mem::size_of::<RawHeader>() == HEADER_SIZE);

impl RawHeader {
    pub fn new(version: u8, language_driver: u8) -> Self {
        Self {
            version,
            modified: [0; 3],
            record_count: U32::new(0),
            header_size: U16::new(0),
            record_size: U16::new(0),
            reserved1: [0; 2],
            incomplete_tx: 0,
            encryption: 0,
            reserved2: [0; 12],
            mdx: 0,
            language_driver,
            reserved3: [0; 2],
        }
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from_bytes(&bytes[..HEADER_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse DBF header: {:?}", e))
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn modified(&self) -> [u8; 3] {
        self.modified
    }

    pub fn set_modified(&mut self, short: [u8; 3]) {
        self.modified = short;
    }

    pub fn record_count(&self) -> u32 {
        self.record_count.get()
    }

    pub fn set_record_count(&mut self, count: u32) {
        self.record_count = U32::new(count);
    }

    pub fn header_size(&self) -> u16 {
        self.header_size.get()
    }

    pub fn set_header_size(&mut self, size: u16) {
        self.header_size = U16::new(size);
    }

    pub fn record_size(&self) -> u16 {
        self.record_size.get()
    }

    pub fn set_record_size(&mut self, size: u16) {
        self.record_size = U16::new(size);
    }

    pub fn language_driver(&self) -> u8 {
        self.language_driver
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct RawDescriptor {
    name: [u8; FIELD_NAME_SIZE],
    reserved1: u8,
    field_type: u8,
    reserved2: [u8; 4],
    length: u8,
    decimals: u8,
    reserved3: [u8; 13],
    indexed: u8,
}

const _: () = assert!(std::mem::size_of::<RawDescriptor>() == DESCRIPTOR_SIZE);

impl RawDescriptor {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from_bytes(&bytes[..DESCRIPTOR_SIZE])
            .map_err(|e| eyre::eyre!("failed to parse field descriptor: {:?}", e))
    }

    /// Decodes into the in-memory model, applying the dialect's length rule.
    pub fn to_field(&self, dialect: &Dialect) -> Result<FieldDescriptor> {
        let name_end = self
            .name
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(FIELD_NAME_SIZE);
        let name = String::from_utf8_lossy(&self.name[..name_end])
            .trim_end()
            .to_string();

        let Some(field_type) = FieldType::from_code(self.field_type) else {
            bail!(
                "unsupported field type 0x{:02X} in descriptor '{}'",
                self.field_type,
                name
            );
        };

        let wide = dialect.decimal_as_high_byte
            && matches!(field_type, FieldType::Numeric | FieldType::Integer);
        let (length, precision) = if wide {
            (self.decimals as u32 * 256 + self.length as u32, 0)
        } else {
            (self.length as u32, self.decimals)
        };

        Ok(FieldDescriptor::raw(
            name,
            field_type,
            length,
            precision,
            self.indexed != 0,
        ))
    }

    /// Encodes the in-memory model; names longer than the slot are truncated
    /// and lengths above 255 are split into the decimal byte.
    pub fn from_field(field: &FieldDescriptor) -> Self {
        let mut name = [0u8; FIELD_NAME_SIZE];
        let bytes = field.name().as_bytes();
        let n = bytes.len().min(FIELD_NAME_SIZE);
        name[..n].copy_from_slice(&bytes[..n]);

        let (length, decimals) = if field.length() > 255 {
            ((field.length() & 0xff) as u8, (field.length() >> 8) as u8)
        } else {
            (field.length() as u8, field.precision())
        };

        Self {
            name,
            reserved1: 0,
            field_type: field.field_type().code(),
            reserved2: [0; 4],
            length,
            decimals,
            reserved3: [0; 13],
            indexed: field.indexed() as u8,
        }
    }
}
