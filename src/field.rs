//! # Field Descriptors
//!
//! A `FieldDescriptor` is the in-memory entity for one column: name, one
//! letter type code, length, precision (decimal count), and the indexed flag.
//! The indexed flag is read from disk and written back but never consulted
//! for lookup; secondary index files are outside this crate.
//!
//! `FieldDescriptor::validated` applies the write-time constraints; open
//! bypasses it and takes descriptors as the file declares them (files from
//! other writers may carry shapes we would not create ourselves, such as V/X
//! variable fields).

use eyre::{bail, ensure, Result};

/// One-letter field type codes of the dBase family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// `C`: space-padded text.
    Character,
    /// `N`: ASCII-formatted number.
    Numeric,
    /// `F`: ASCII-formatted float, 20 columns.
    Float,
    /// `L`: logical, one byte.
    Logical,
    /// `D`: `YYYYMMDD` text, 8 bytes.
    Date,
    /// `M`: memo pointer, text body.
    Memo,
    /// `G`: general/OLE memo pointer, text body.
    General,
    /// `B`: memo pointer, binary body.
    Binary,
    /// `P`: picture memo pointer, binary body.
    Picture,
    /// `Y`: currency, u64 scaled by 10^4.
    Currency,
    /// `T`: datetime as a Julian day pair.
    DateTime,
    /// `@`: timestamp, same wire shape as `T`.
    Timestamp,
    /// `I`: 32-bit little-endian integer.
    Integer,
    /// `+`: autoincrement, same wire shape as `I`.
    AutoIncrement,
    /// `O`: 64-bit little-endian double.
    Double,
    /// `V`: variable field (read-only; width rules depend on the dialect).
    Varifield,
    /// `X`: variable field variant (read-only).
    Extended,
}

impl FieldType {
    /// Resolves a type byte from a descriptor.
    pub fn from_code(code: u8) -> Option<FieldType> {
        Some(match code {
            b'C' => FieldType::Character,
            b'N' => FieldType::Numeric,
            b'F' => FieldType::Float,
            b'L' => FieldType::Logical,
            b'D' => FieldType::Date,
            b'M' => FieldType::Memo,
            b'G' => FieldType::General,
            b'B' => FieldType::Binary,
            b'P' => FieldType::Picture,
            b'Y' => FieldType::Currency,
            b'T' => FieldType::DateTime,
            b'@' => FieldType::Timestamp,
            b'I' => FieldType::Integer,
            b'+' => FieldType::AutoIncrement,
            b'O' => FieldType::Double,
            b'V' => FieldType::Varifield,
            b'X' => FieldType::Extended,
            _ => return None,
        })
    }

    /// The on-disk type byte.
    pub fn code(&self) -> u8 {
        match self {
            FieldType::Character => b'C',
            FieldType::Numeric => b'N',
            FieldType::Float => b'F',
            FieldType::Logical => b'L',
            FieldType::Date => b'D',
            FieldType::Memo => b'M',
            FieldType::General => b'G',
            FieldType::Binary => b'B',
            FieldType::Picture => b'P',
            FieldType::Currency => b'Y',
            FieldType::DateTime => b'T',
            FieldType::Timestamp => b'@',
            FieldType::Integer => b'I',
            FieldType::AutoIncrement => b'+',
            FieldType::Double => b'O',
            FieldType::Varifield => b'V',
            FieldType::Extended => b'X',
        }
    }

    /// True for the four types whose slot holds a memo block pointer.
    pub fn is_memo(&self) -> bool {
        matches!(
            self,
            FieldType::Memo | FieldType::General | FieldType::Binary | FieldType::Picture
        )
    }

    /// True for the read-only variable types.
    pub fn is_variable(&self) -> bool {
        matches!(self, FieldType::Varifield | FieldType::Extended)
    }
}

/// In-memory description of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: String,
    field_type: FieldType,
    length: u32,
    precision: u8,
    indexed: bool,
}

impl FieldDescriptor {
    /// Builds a descriptor without constraint checks, as the header parser
    /// does for descriptors already on disk.
    pub fn raw(
        name: impl Into<String>,
        field_type: FieldType,
        length: u32,
        precision: u8,
        indexed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            field_type,
            length,
            precision,
            indexed,
        }
    }

    /// Builds a descriptor for a new column, enforcing the per-type length
    /// and precision rules. `length`/`precision` are only consulted for the
    /// types that admit a choice (C, N, F); fixed-shape types get their
    /// mandated values.
    pub fn validated(
        name: impl Into<String>,
        field_type: FieldType,
        length: Option<u32>,
        precision: Option<u8>,
    ) -> Result<Self> {
        let name = name.into();
        let (length, precision) = match field_type {
            FieldType::Character => {
                let len = length.ok_or_else(|| eyre::eyre!("length required for C field"))?;
                ensure!(
                    (1..=65536).contains(&len),
                    "C field length {} out of range 1..=65536",
                    len
                );
                (len, 0)
            }
            FieldType::Numeric => {
                let len = length.ok_or_else(|| eyre::eyre!("length required for N field"))?;
                ensure!(
                    (1..=20).contains(&len),
                    "N field length {} out of range 1..=20",
                    len
                );
                (len, precision.unwrap_or(0))
            }
            FieldType::Float => (20, precision.unwrap_or(0)),
            FieldType::Logical => (1, 0),
            FieldType::Date => (8, 0),
            FieldType::Memo | FieldType::General | FieldType::Binary | FieldType::Picture => {
                (10, 0)
            }
            FieldType::Currency => (8, 4),
            FieldType::DateTime | FieldType::Timestamp => (8, 0),
            FieldType::Integer | FieldType::AutoIncrement => (4, 0),
            FieldType::Double => (8, 0),
            FieldType::Varifield | FieldType::Extended => {
                bail!("field type {:?} is not supported for writing", field_type)
            }
        };
        Ok(Self {
            name,
            field_type,
            length,
            precision,
            indexed: false,
        })
    }

    /// Column name as declared (may exceed the 10-byte slot; the writer
    /// truncates it).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Effective field length in bytes.
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Decimal count.
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// The round-tripped (but unused) indexed flag.
    pub fn indexed(&self) -> bool {
        self.indexed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_round_trip() {
        for code in [
            b'C', b'N', b'F', b'L', b'D', b'M', b'G', b'B', b'P', b'Y', b'T', b'@', b'I', b'+',
            b'O', b'V', b'X',
        ] {
            let ft = FieldType::from_code(code).unwrap();
            assert_eq!(ft.code(), code);
        }
        assert!(FieldType::from_code(b'Z').is_none());
    }

    #[test]
    fn validated_enforces_required_lengths() {
        assert!(FieldDescriptor::validated("a", FieldType::Numeric, None, None).is_err());
        assert!(FieldDescriptor::validated("a", FieldType::Numeric, Some(21), None).is_err());
        assert!(FieldDescriptor::validated("a", FieldType::Character, None, None).is_err());
        assert!(FieldDescriptor::validated("a", FieldType::Character, Some(0), None).is_err());
        assert!(FieldDescriptor::validated("a", FieldType::Character, Some(65536), None).is_ok());
        assert!(FieldDescriptor::validated("a", FieldType::Character, Some(70000), None).is_err());
    }

    #[test]
    fn validated_fixes_shape_for_fixed_types() {
        let f = FieldDescriptor::validated("ok", FieldType::Logical, Some(99), Some(9)).unwrap();
        assert_eq!((f.length(), f.precision()), (1, 0));

        let f = FieldDescriptor::validated("amount", FieldType::Currency, None, None).unwrap();
        assert_eq!((f.length(), f.precision()), (8, 4));

        let f = FieldDescriptor::validated("note", FieldType::Memo, None, None).unwrap();
        assert_eq!((f.length(), f.precision()), (10, 0));

        let f = FieldDescriptor::validated("n", FieldType::Integer, None, None).unwrap();
        assert_eq!((f.length(), f.precision()), (4, 0));
    }

    #[test]
    fn variable_types_rejected_for_writing() {
        assert!(FieldDescriptor::validated("v", FieldType::Varifield, Some(2), None).is_err());
        assert!(FieldDescriptor::validated("x", FieldType::Extended, Some(4), None).is_err());
    }

    #[test]
    fn memo_classification() {
        assert!(FieldType::Memo.is_memo());
        assert!(FieldType::Picture.is_memo());
        assert!(!FieldType::Character.is_memo());
        assert!(FieldType::Varifield.is_variable());
    }
}
