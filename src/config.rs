//! # Format Constants
//!
//! This module centralizes the fixed sizes and marker bytes of the DBF/DBT
//! on-disk format. Constants that depend on each other are co-located and the
//! relationships are enforced with compile-time assertions.
//!
//! ```text
//! HEADER_SIZE (32 bytes)
//!       │
//!       └─> data offset = HEADER_SIZE + DESCRIPTOR_SIZE * field_count + 1
//!             The +1 is the descriptor terminator byte (0x0D).
//!
//! DESCRIPTOR_SIZE (32 bytes)
//!       │
//!       └─> FIELD_NAME_SIZE (10 bytes, NUL-padded) lives in bytes 0..10
//!
//! MEMO_BLOCK_SIZE (512 bytes)
//!       │
//!       └─> memo pointers address the sidecar in whole blocks;
//!           block 0 holds the 4-byte next-available-block counter
//! ```
//!
//! Import constants from this module rather than defining them locally:
//!
//! ```ignore
//! use crate::config::{HEADER_SIZE, MEMO_BLOCK_SIZE};
//! ```

/// Size of the fixed DBF file header in bytes.
pub const HEADER_SIZE: usize = 32;

/// Size of one field descriptor entry in bytes.
pub const DESCRIPTOR_SIZE: usize = 32;

/// Width of the NUL-padded field name slot inside a descriptor.
pub const FIELD_NAME_SIZE: usize = 10;

/// Byte that terminates the descriptor array.
pub const DESCRIPTOR_TERMINATOR: u8 = 0x0d;

/// End-of-file marker appended after the last record.
pub const EOF_MARKER: u8 = 0x1a;

/// Deletion marker for a live record.
pub const RECORD_LIVE: u8 = 0x20;

/// Deletion marker for a tombstoned record.
pub const RECORD_DELETED: u8 = 0x2a;

/// Memo sidecar block size; memo pointers count these.
pub const MEMO_BLOCK_SIZE: usize = 512;

/// Classic two-byte memo value terminator.
pub const MEMO_TERMINATOR: [u8; 2] = [0x1a, 0x1a];

/// Version byte stamped on freshly created tables
/// (Visual FoxPro with varchar/varbinary support).
pub const DEFAULT_VERSION: u8 = 0x32;

const _: () = assert!(FIELD_NAME_SIZE < DESCRIPTOR_SIZE);
const _: () = assert!(MEMO_BLOCK_SIZE >= 4, "block 0 must fit the next-block counter");
