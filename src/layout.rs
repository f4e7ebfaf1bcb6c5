//! # Record Layout Compiler
//!
//! Compiles an ordered field descriptor list plus the file's dialect into a
//! `RecordLayout`: one fixed-width slot per column with a pre-computed byte
//! offset, a slot kind selecting the decode/encode rule, and a transcode bit
//! for the slots that carry text in the file's code page.
//!
//! The layout is built once per open (or per column-list change) and reused
//! for every record, so all per-type decisions happen here rather than in
//! the record loop. Single-column updates use the pre-computed offsets to
//! write one slot in place without touching its neighbors.
//!
//! ## Slot shapes
//!
//! | Kind | Bytes | Decoded as |
//! |------|-------|------------|
//! | Character | declared length, space padded | trimmed text |
//! | Numeric / FloatNum | declared length, ASCII | integer or float, blank = null |
//! | Logical | 1 | `Y/y/T/t` true, `N/n/F/f` false, else null |
//! | Date | 8 ASCII | `YYYYMMDD` text |
//! | Integer | 4 LE | i32 |
//! | Double | 8 LE | f64 |
//! | Currency | 8 LE u64 | decimal text, four places |
//! | Timestamp | 4 LE i32 + 4 LE u32 | Julian day pair |
//! | MemoText / MemoBinary | declared length, ASCII pointer | memo body via sidecar |
//! | VariShort / VariDate / VariInt / VariDouble / VariText | per dialect | read-only |
//!
//! The memo slots decode to a block pointer; resolving the pointer through
//! the sidecar is the table engine's job, so `decode` returns a `Decoded`
//! that distinguishes the two cases.

use eyre::{bail, ensure, Result};
use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::codepage::CodePage;
use crate::convert;
use crate::dialect::Dialect;
use crate::field::{FieldDescriptor, FieldType};
use crate::value::Value;

const MILLIS_PER_DAY: u32 = 86_400_000;

/// Decode/encode rule for one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Character,
    Numeric { decimals: u8 },
    FloatNum { decimals: u8 },
    Logical,
    Date,
    Integer,
    Double,
    Currency,
    Timestamp,
    MemoText,
    MemoBinary,
    VariShort,
    VariDate,
    VariInt,
    VariDouble,
    VariText,
}

/// One fixed-width binary slot of the record body.
#[derive(Debug, Clone, Copy)]
pub struct FieldSlot {
    kind: SlotKind,
    /// Byte offset within the record body (the deletion byte is not counted).
    offset: usize,
    width: usize,
    /// Field text is stored in the file's code page.
    transcode: bool,
}

/// Result of decoding one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Value(Value),
    Memo { pointer: Option<u32>, binary: bool },
}

/// Compiled scan/emit plan for one record shape.
#[derive(Debug, Clone)]
pub struct RecordLayout {
    slots: SmallVec<[FieldSlot; 16]>,
    by_name: HashMap<String, usize>,
    record_size: usize,
}

impl RecordLayout {
    /// Compiles the layout for an ordered field list under a dialect.
    pub fn compile(fields: &[FieldDescriptor], dialect: &Dialect) -> Result<RecordLayout> {
        let mut slots = SmallVec::with_capacity(fields.len());
        let mut by_name = HashMap::with_capacity(fields.len());
        let mut offset = 0usize;

        for (idx, field) in fields.iter().enumerate() {
            let slot = Self::compile_slot(field, dialect, offset)?;
            offset += slot.width;
            slots.push(slot);
            by_name.insert(field.name().to_string(), idx);
        }

        Ok(RecordLayout {
            slots,
            by_name,
            record_size: offset + 1,
        })
    }

    fn compile_slot(field: &FieldDescriptor, dialect: &Dialect, offset: usize) -> Result<FieldSlot> {
        let length = field.length() as usize;
        let (kind, width, transcode) = match field.field_type() {
            FieldType::Character => (SlotKind::Character, length, true),
            FieldType::Numeric => (
                SlotKind::Numeric {
                    decimals: field.precision(),
                },
                length,
                false,
            ),
            FieldType::Float => (
                SlotKind::FloatNum {
                    decimals: field.precision(),
                },
                length,
                false,
            ),
            FieldType::Logical => {
                ensure!(length == 1, "L field '{}' must have length 1", field.name());
                (SlotKind::Logical, 1, false)
            }
            FieldType::Date => {
                ensure!(length == 8, "D field '{}' must have length 8", field.name());
                (SlotKind::Date, 8, false)
            }
            FieldType::Integer | FieldType::AutoIncrement => {
                ensure!(length == 4, "I field '{}' must have length 4", field.name());
                (SlotKind::Integer, 4, false)
            }
            FieldType::Double => {
                ensure!(length == 8, "O field '{}' must have length 8", field.name());
                (SlotKind::Double, 8, false)
            }
            FieldType::Currency => {
                ensure!(length == 8, "Y field '{}' must have length 8", field.name());
                (SlotKind::Currency, 8, false)
            }
            FieldType::DateTime | FieldType::Timestamp => {
                ensure!(length == 8, "T field '{}' must have length 8", field.name());
                (SlotKind::Timestamp, 8, false)
            }
            FieldType::Memo | FieldType::General => (SlotKind::MemoText, length, true),
            FieldType::Binary | FieldType::Picture => (SlotKind::MemoBinary, length, false),
            FieldType::Varifield | FieldType::Extended => match (dialect.flagship, length) {
                (true, 2) => (SlotKind::VariShort, 2, false),
                (_, 3) => (SlotKind::VariDate, 3, false),
                (_, 4) => (SlotKind::VariInt, 4, false),
                (true, 8) => (SlotKind::VariDouble, 8, false),
                (true, 10) => (SlotKind::VariText, 10, true),
                (_, n) => (SlotKind::VariText, n, true),
            },
        };
        Ok(FieldSlot {
            kind,
            offset,
            width,
            transcode,
        })
    }

    /// Record size in bytes, deletion byte included.
    pub fn record_size(&self) -> usize {
        self.record_size
    }

    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    pub fn slot(&self, idx: usize) -> &FieldSlot {
        &self.slots[idx]
    }

    /// Index of a column by its declared name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }
}

impl FieldSlot {
    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    /// Byte offset within the record body.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_memo(&self) -> bool {
        matches!(self.kind, SlotKind::MemoText | SlotKind::MemoBinary)
    }

    fn text_of(&self, raw: &[u8], page: Option<&'static CodePage>) -> String {
        match (self.transcode, page) {
            (true, Some(page)) => page.decode(raw),
            _ => String::from_utf8_lossy(raw).into_owned(),
        }
    }

    fn bytes_of(&self, text: &str, page: Option<&'static CodePage>) -> Vec<u8> {
        match (self.transcode, page) {
            (true, Some(page)) => page.encode(text),
            _ => text.as_bytes().to_vec(),
        }
    }

    /// Decodes one slot from its raw bytes. `raw` must be exactly `width`
    /// bytes, sliced from the record body by the caller.
    pub fn decode(&self, raw: &[u8], page: Option<&'static CodePage>) -> Result<Decoded> {
        ensure!(
            raw.len() == self.width,
            "slot expects {} bytes, got {}",
            self.width,
            raw.len()
        );
        let value = match self.kind {
            SlotKind::Character => {
                let text = self.text_of(raw, page);
                Value::Text(text.trim_matches(' ').to_string())
            }
            SlotKind::Numeric { .. } | SlotKind::FloatNum { .. } => parse_numeric(raw),
            SlotKind::Logical => match raw[0] {
                b'Y' | b'y' | b'T' | b't' => Value::Bool(true),
                b'N' | b'n' | b'F' | b'f' => Value::Bool(false),
                _ => Value::Null,
            },
            SlotKind::Date => {
                let text = String::from_utf8_lossy(raw);
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    Value::Null
                } else {
                    Value::Text(trimmed.to_string())
                }
            }
            SlotKind::Integer => Value::Int(i32::from_le_bytes(raw.try_into()?) as i64),
            SlotKind::Double => Value::Float(f64::from_le_bytes(raw.try_into()?)),
            SlotKind::Currency => {
                Value::Text(convert::currency_to_string(u64::from_le_bytes(raw.try_into()?)))
            }
            SlotKind::Timestamp => Value::Timestamp {
                days: i32::from_le_bytes(raw[..4].try_into()?),
                millis: u32::from_le_bytes(raw[4..8].try_into()?),
            },
            SlotKind::MemoText | SlotKind::MemoBinary => {
                return Ok(Decoded::Memo {
                    pointer: parse_memo_pointer(raw),
                    binary: self.kind == SlotKind::MemoBinary,
                });
            }
            SlotKind::VariShort => Value::Int(i16::from_le_bytes(raw.try_into()?) as i64),
            SlotKind::VariDate => {
                if raw == [0, 0, 0] {
                    Value::Null
                } else {
                    Value::Text(convert::short_to_date([raw[0], raw[1], raw[2]]))
                }
            }
            SlotKind::VariInt => Value::Int(i32::from_le_bytes(raw.try_into()?) as i64),
            SlotKind::VariDouble => Value::Float(f64::from_le_bytes(raw.try_into()?)),
            SlotKind::VariText => {
                let text = self.text_of(raw, page);
                Value::Text(text.trim_matches(' ').to_string())
            }
        };
        Ok(Decoded::Value(value))
    }

    /// Encodes a value into `out`. Not valid for memo slots; the engine
    /// stores the body through the memo store and calls
    /// `encode_memo_pointer` with the resulting block pointer.
    pub fn encode(&self, value: &Value, page: Option<&'static CodePage>, out: &mut Vec<u8>) -> Result<()> {
        match self.kind {
            SlotKind::Character => {
                let bytes = match value {
                    Value::Null => Vec::new(),
                    Value::Text(s) => self.bytes_of(s, page),
                    other => bail!("C slot cannot encode {:?}", other),
                };
                ensure!(
                    bytes.len() <= self.width,
                    "text of {} bytes does not fit C({})",
                    bytes.len(),
                    self.width
                );
                out.extend_from_slice(&bytes);
                out.resize(out.len() + self.width - bytes.len(), b' ');
            }
            SlotKind::Numeric { decimals } | SlotKind::FloatNum { decimals } => {
                match format_numeric(value, decimals)? {
                    None => out.resize(out.len() + self.width, b' '),
                    Some(text) => {
                        ensure!(
                            text.len() <= self.width,
                            "numeric value '{}' does not fit in {} columns",
                            text,
                            self.width
                        );
                        out.resize(out.len() + self.width - text.len(), b' ');
                        out.extend_from_slice(text.as_bytes());
                    }
                }
            }
            SlotKind::Logical => out.push(match value {
                Value::Bool(true) => b'T',
                Value::Bool(false) => b'F',
                Value::Null => b'?',
                other => bail!("L slot cannot encode {:?}", other),
            }),
            SlotKind::Date => match value {
                Value::Null => out.resize(out.len() + 8, b' '),
                Value::Text(s) => {
                    ensure!(
                        s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit()),
                        "D value '{}' must be YYYYMMDD",
                        s
                    );
                    out.extend_from_slice(s.as_bytes());
                }
                other => bail!("D slot cannot encode {:?}", other),
            },
            SlotKind::Integer => {
                let v = match value {
                    Value::Null => 0i64,
                    other => other
                        .as_int()
                        .ok_or_else(|| eyre::eyre!("I slot cannot encode {:?}", other))?,
                };
                let v = i32::try_from(v)?;
                out.extend_from_slice(&v.to_le_bytes());
            }
            SlotKind::Double => {
                let v = match value {
                    Value::Null => 0.0,
                    other => other
                        .as_float()
                        .ok_or_else(|| eyre::eyre!("O slot cannot encode {:?}", other))?,
                };
                out.extend_from_slice(&v.to_le_bytes());
            }
            SlotKind::Currency => {
                let raw = match value {
                    Value::Null => 0u64,
                    Value::Text(s) => convert::string_to_currency(s)?,
                    Value::Int(i) => {
                        ensure!(*i >= 0, "Y slot stores unsigned values, got {}", i);
                        (*i as u64)
                            .checked_mul(convert::CURRENCY_SCALE)
                            .ok_or_else(|| eyre::eyre!("currency value {} overflows", i))?
                    }
                    Value::Float(f) => {
                        let scaled = (f * convert::CURRENCY_SCALE as f64).round();
                        ensure!(
                            scaled >= 0.0 && scaled <= u64::MAX as f64,
                            "currency value {} out of range",
                            f
                        );
                        scaled as u64
                    }
                    other => bail!("Y slot cannot encode {:?}", other),
                };
                out.extend_from_slice(&raw.to_le_bytes());
            }
            SlotKind::Timestamp => match value {
                Value::Null => out.resize(out.len() + 8, 0),
                Value::Timestamp { days, millis } => {
                    ensure!(
                        *millis < MILLIS_PER_DAY,
                        "timestamp milliseconds {} exceed one day",
                        millis
                    );
                    out.extend_from_slice(&days.to_le_bytes());
                    out.extend_from_slice(&millis.to_le_bytes());
                }
                other => bail!("T slot cannot encode {:?}", other),
            },
            SlotKind::MemoText | SlotKind::MemoBinary => {
                bail!("memo slots are written through the memo store")
            }
            SlotKind::VariShort
            | SlotKind::VariDate
            | SlotKind::VariInt
            | SlotKind::VariDouble
            | SlotKind::VariText => bail!("V/X fields are not supported for writing"),
        }
        Ok(())
    }

    /// Writes the ASCII block pointer for a memo slot; a missing pointer is
    /// a blank slot.
    pub fn encode_memo_pointer(&self, pointer: Option<u32>, out: &mut Vec<u8>) -> Result<()> {
        ensure!(self.is_memo(), "not a memo slot");
        match pointer {
            None => out.resize(out.len() + self.width, b' '),
            Some(ptr) => {
                let text = ptr.to_string();
                ensure!(
                    text.len() <= self.width,
                    "memo pointer {} does not fit in {} columns",
                    ptr,
                    self.width
                );
                out.resize(out.len() + self.width - text.len(), b' ');
                out.extend_from_slice(text.as_bytes());
            }
        }
        Ok(())
    }

    /// Converts a memo body read from the sidecar into a value: text for
    /// M/G slots (through the code page), raw bytes for B/P slots.
    pub fn memo_value(&self, bytes: Vec<u8>, page: Option<&'static CodePage>) -> Value {
        match self.kind {
            SlotKind::MemoText => Value::Text(self.text_of(&bytes, page)),
            _ => Value::Blob(bytes),
        }
    }

    /// Converts a value into the memo body bytes to store in the sidecar.
    /// Returns `None` for a blank slot.
    pub fn memo_body(&self, value: &Value, page: Option<&'static CodePage>) -> Result<Option<Vec<u8>>> {
        match (self.kind, value) {
            (_, Value::Null) => Ok(None),
            (SlotKind::MemoText, Value::Text(s)) => Ok(Some(self.bytes_of(s, page))),
            (SlotKind::MemoBinary, Value::Blob(b)) => Ok(Some(b.clone())),
            (SlotKind::MemoBinary, Value::Text(s)) => Ok(Some(s.as_bytes().to_vec())),
            (kind, other) => bail!("{:?} slot cannot store {:?}", kind, other),
        }
    }
}

fn parse_numeric(raw: &[u8]) -> Value {
    let text = String::from_utf8_lossy(raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    match trimmed.parse::<f64>() {
        Ok(f) => Value::Float(f),
        // Unparsable numerics read as blank rather than aborting the scan.
        Err(_) => Value::Null,
    }
}

fn parse_memo_pointer(raw: &[u8]) -> Option<u32> {
    let text = String::from_utf8_lossy(raw);
    match text.trim().parse::<u32>() {
        Ok(ptr) if ptr > 0 => Some(ptr),
        _ => None,
    }
}

fn format_numeric(value: &Value, decimals: u8) -> Result<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::Int(i) => {
            if decimals == 0 {
                Ok(Some(i.to_string()))
            } else {
                Ok(Some(format!("{:.*}", decimals as usize, *i as f64)))
            }
        }
        Value::Float(f) => Ok(Some(format!("{:.*}", decimals as usize, f))),
        Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            if let Ok(i) = trimmed.parse::<i64>() {
                return format_numeric(&Value::Int(i), decimals);
            }
            let f: f64 = trimmed
                .parse()
                .map_err(|_| eyre::eyre!("'{}' is not numeric", s))?;
            format_numeric(&Value::Float(f), decimals)
        }
        other => bail!("numeric slot cannot encode {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    fn plain_dialect() -> &'static Dialect {
        Dialect::lookup(0x03)
    }

    fn layout_of(fields: &[FieldDescriptor]) -> RecordLayout {
        RecordLayout::compile(fields, plain_dialect()).unwrap()
    }

    fn descriptor(name: &str, ft: FieldType, len: u32, dec: u8) -> FieldDescriptor {
        FieldDescriptor::raw(name, ft, len, dec, false)
    }

    #[test]
    fn offsets_accumulate_in_declaration_order() {
        let layout = layout_of(&[
            descriptor("ID", FieldType::Numeric, 5, 0),
            descriptor("NAME", FieldType::Character, 10, 0),
            descriptor("BORN", FieldType::Date, 8, 0),
        ]);
        assert_eq!(layout.slot(0).offset(), 0);
        assert_eq!(layout.slot(1).offset(), 5);
        assert_eq!(layout.slot(2).offset(), 15);
        assert_eq!(layout.record_size(), 24);
        assert_eq!(layout.column_index("BORN"), Some(2));
        assert_eq!(layout.column_index("nope"), None);
    }

    #[test]
    fn character_pads_and_trims() {
        let layout = layout_of(&[descriptor("NAME", FieldType::Character, 8, 0)]);
        let slot = layout.slot(0);

        let mut out = Vec::new();
        slot.encode(&Value::Text("Bob".into()), None, &mut out).unwrap();
        assert_eq!(out, b"Bob     ");

        match slot.decode(&out, None).unwrap() {
            Decoded::Value(Value::Text(s)) => assert_eq!(s, "Bob"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn character_rejects_oversized_text() {
        let layout = layout_of(&[descriptor("NAME", FieldType::Character, 3, 0)]);
        let mut out = Vec::new();
        assert!(layout
            .slot(0)
            .encode(&Value::Text("toolong".into()), None, &mut out)
            .is_err());
    }

    #[test]
    fn numeric_right_justifies_and_round_trips() {
        let layout = layout_of(&[descriptor("N", FieldType::Numeric, 6, 0)]);
        let slot = layout.slot(0);

        let mut out = Vec::new();
        slot.encode(&Value::Int(42), None, &mut out).unwrap();
        assert_eq!(out, b"    42");
        assert_eq!(
            slot.decode(&out, None).unwrap(),
            Decoded::Value(Value::Int(42))
        );

        let mut out = Vec::new();
        slot.encode(&Value::Null, None, &mut out).unwrap();
        assert_eq!(out, b"      ");
        assert_eq!(slot.decode(&out, None).unwrap(), Decoded::Value(Value::Null));
    }

    #[test]
    fn numeric_with_decimals_formats_fixed_point() {
        let layout = layout_of(&[descriptor("N", FieldType::Numeric, 8, 2)]);
        let slot = layout.slot(0);

        let mut out = Vec::new();
        slot.encode(&Value::Float(3.5), None, &mut out).unwrap();
        assert_eq!(out, b"    3.50");
        assert_eq!(
            slot.decode(&out, None).unwrap(),
            Decoded::Value(Value::Float(3.5))
        );
    }

    #[test]
    fn numeric_overflow_is_an_error() {
        let layout = layout_of(&[descriptor("N", FieldType::Numeric, 3, 0)]);
        let mut out = Vec::new();
        assert!(layout
            .slot(0)
            .encode(&Value::Int(12345), None, &mut out)
            .is_err());
    }

    #[test]
    fn logical_tristate() {
        let layout = layout_of(&[descriptor("OK", FieldType::Logical, 1, 0)]);
        let slot = layout.slot(0);

        for (value, byte) in [
            (Value::Bool(true), b'T'),
            (Value::Bool(false), b'F'),
            (Value::Null, b'?'),
        ] {
            let mut out = Vec::new();
            slot.encode(&value, None, &mut out).unwrap();
            assert_eq!(out, [byte]);
        }

        assert_eq!(slot.decode(b"y", None).unwrap(), Decoded::Value(Value::Bool(true)));
        assert_eq!(slot.decode(b"f", None).unwrap(), Decoded::Value(Value::Bool(false)));
        assert_eq!(slot.decode(b"?", None).unwrap(), Decoded::Value(Value::Null));
    }

    #[test]
    fn integer_and_double_are_little_endian() {
        let layout = layout_of(&[
            descriptor("I", FieldType::Integer, 4, 0),
            descriptor("O", FieldType::Double, 8, 0),
        ]);

        let mut out = Vec::new();
        layout.slot(0).encode(&Value::Int(-7), None, &mut out).unwrap();
        assert_eq!(out, (-7i32).to_le_bytes());

        let mut out = Vec::new();
        layout.slot(1).encode(&Value::Float(1.25), None, &mut out).unwrap();
        assert_eq!(out, 1.25f64.to_le_bytes());
        assert_eq!(
            layout.slot(1).decode(&out, None).unwrap(),
            Decoded::Value(Value::Float(1.25))
        );
    }

    #[test]
    fn currency_scales_by_ten_thousand() {
        let layout = layout_of(&[descriptor("AMT", FieldType::Currency, 8, 4)]);
        let slot = layout.slot(0);

        let mut out = Vec::new();
        slot.encode(&Value::Text("123.4567".into()), None, &mut out).unwrap();
        assert_eq!(u64::from_le_bytes(out.clone().try_into().unwrap()), 1_234_567);
        assert_eq!(
            slot.decode(&out, None).unwrap(),
            Decoded::Value(Value::Text("123.4567".into()))
        );
    }

    #[test]
    fn timestamp_pair_round_trips() {
        let layout = layout_of(&[descriptor("TS", FieldType::DateTime, 8, 0)]);
        let slot = layout.slot(0);

        let value = Value::Timestamp {
            days: 2_451_545,
            millis: 43_200_000,
        };
        let mut out = Vec::new();
        slot.encode(&value, None, &mut out).unwrap();
        assert_eq!(out.len(), 8);
        assert_eq!(slot.decode(&out, None).unwrap(), Decoded::Value(value));

        // An explicit zero pair is a value in its own right; a blank write
        // lands on the same bytes, the slot has no separate null form.
        let zero = Value::Timestamp { days: 0, millis: 0 };
        let mut out = Vec::new();
        slot.encode(&zero, None, &mut out).unwrap();
        assert_eq!(slot.decode(&out, None).unwrap(), Decoded::Value(zero.clone()));

        let mut out = Vec::new();
        slot.encode(&Value::Null, None, &mut out).unwrap();
        assert_eq!(slot.decode(&out, None).unwrap(), Decoded::Value(zero));
    }

    #[test]
    fn memo_pointer_blank_and_numeric() {
        let layout = layout_of(&[descriptor("NOTE", FieldType::Memo, 10, 0)]);
        let slot = layout.slot(0);

        let mut out = Vec::new();
        slot.encode_memo_pointer(Some(7), &mut out).unwrap();
        assert_eq!(out, b"         7");
        assert_eq!(
            slot.decode(&out, None).unwrap(),
            Decoded::Memo {
                pointer: Some(7),
                binary: false
            }
        );

        let mut out = Vec::new();
        slot.encode_memo_pointer(None, &mut out).unwrap();
        assert_eq!(out, b"          ");
        assert_eq!(
            slot.decode(&out, None).unwrap(),
            Decoded::Memo {
                pointer: None,
                binary: false
            }
        );
    }

    #[test]
    fn memo_slots_refuse_direct_encode() {
        let layout = layout_of(&[descriptor("NOTE", FieldType::Memo, 10, 0)]);
        let mut out = Vec::new();
        assert!(layout
            .slot(0)
            .encode(&Value::Text("x".into()), None, &mut out)
            .is_err());
    }

    #[test]
    fn flagship_variable_widths() {
        let flagship = Dialect::lookup(0xB3);
        let fields = [
            descriptor("A", FieldType::Varifield, 2, 0),
            descriptor("B", FieldType::Varifield, 3, 0),
            descriptor("C", FieldType::Varifield, 8, 0),
            descriptor("D", FieldType::Extended, 10, 0),
        ];
        let layout = RecordLayout::compile(&fields, flagship).unwrap();
        assert_eq!(layout.slot(0).kind(), SlotKind::VariShort);
        assert_eq!(layout.slot(1).kind(), SlotKind::VariDate);
        assert_eq!(layout.slot(2).kind(), SlotKind::VariDouble);
        assert_eq!(layout.slot(3).kind(), SlotKind::VariText);

        // Outside Flagship the 2-byte shape is plain text.
        let plain = RecordLayout::compile(&fields[..1], plain_dialect()).unwrap();
        assert_eq!(plain.slot(0).kind(), SlotKind::VariText);
    }

    #[test]
    fn variable_fields_decode_but_do_not_encode() {
        let flagship = Dialect::lookup(0xB3);
        let layout =
            RecordLayout::compile(&[descriptor("V", FieldType::Varifield, 3, 0)], flagship).unwrap();
        let slot = layout.slot(0);

        assert_eq!(
            slot.decode(&[100, 7, 15], None).unwrap(),
            Decoded::Value(Value::Text("20000715".into()))
        );
        let mut out = Vec::new();
        assert!(slot.encode(&Value::Int(1), None, &mut out).is_err());
    }
}
