//! # Dialect Table
//!
//! The version byte at offset 0 of a DBF file selects a dialect: a small
//! immutable record of parsing and emission rules. The dialect is resolved
//! once at open and passed by reference to the header parser and the layout
//! compiler; nothing dispatches on the raw version byte after that.
//!
//! Two wildcard families exist: any version byte whose low nibble is `4` or
//! `C` is a dBASE 7 file (without and with memo respectively).
//!
//! Unrecognized version bytes resolve to an "unknown" dialect with every flag
//! off, which reads like plain dBASE III.

use phf::phf_map;

/// Parsing and emission rules selected by the version byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Human-readable product name.
    pub name: &'static str,
    /// A memo sidecar is expected next to the table file.
    pub expects_memo: bool,
    /// The decimal-count byte of an N/I descriptor supplies the high byte of
    /// the field length, extending it beyond 255.
    pub decimal_as_high_byte: bool,
    /// Memo values end at a single `0x1A` instead of the classic `0x1A 0x1A`.
    pub single_memo_terminator: bool,
    /// Flagship variant; changes how V/X field widths are interpreted.
    pub flagship: bool,
}

const fn dialect(
    name: &'static str,
    expects_memo: bool,
    decimal_as_high_byte: bool,
    single_memo_terminator: bool,
    flagship: bool,
) -> Dialect {
    Dialect {
        name,
        expects_memo,
        decimal_as_high_byte,
        single_memo_terminator,
        flagship,
    }
}

static UNKNOWN: Dialect = dialect("unknown", false, false, false, false);
static DBASE7: Dialect = dialect("dBASE 7", false, false, false, false);
static DBASE7_MEMO: Dialect = dialect("dBASE 7 with memo", true, false, false, false);

static DIALECTS: phf::Map<u8, Dialect> = phf_map! {
    0x02u8 => dialect("FoxBASE", false, false, false, false),
    0x03u8 => dialect("dBASE III", false, false, false, false),
    0x05u8 => dialect("dBASE V", false, false, false, false),
    0x07u8 => dialect("VO/Vulcan", false, false, false, false),
    0x30u8 => dialect("Visual FoxPro", false, false, false, false),
    0x31u8 => dialect("Visual FoxPro, autoincrement", false, true, false, false),
    0x32u8 => dialect("Visual FoxPro, varchar", false, false, false, false),
    0x43u8 => dialect("dBASE IV SQL table", false, false, false, false),
    0x63u8 => dialect("dBASE IV SQL system", false, false, false, false),
    0x7Bu8 => dialect("dBASE IV with memo", true, false, false, false),
    0x83u8 => dialect("dBASE III with memo", true, false, false, false),
    0x87u8 => dialect("VO/Vulcan with memo", true, false, false, false),
    0x8Bu8 => dialect("dBASE IV with memo", true, false, false, false),
    0x8Eu8 => dialect("dBASE IV with SQL table", false, false, false, false),
    0xB3u8 => dialect("Flagship with memo", true, true, false, true),
    0xCBu8 => dialect("dBASE IV SQL table with memo", true, false, false, false),
    0xE5u8 => dialect("Clipper SIX with memo", true, false, true, false),
    0xF5u8 => dialect("FoxPro with memo", true, false, true, false),
    0xFBu8 => dialect("FoxBASE with memo", true, false, true, false),
};

impl Dialect {
    /// Resolves the dialect for a version byte.
    pub fn lookup(version: u8) -> &'static Dialect {
        if let Some(d) = DIALECTS.get(&version) {
            return d;
        }
        match version & 0x0f {
            0x04 => &DBASE7,
            0x0c => &DBASE7_MEMO,
            _ => &UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_versions() {
        assert_eq!(Dialect::lookup(0x03).name, "dBASE III");
        assert!(Dialect::lookup(0x83).expects_memo);
        assert!(Dialect::lookup(0xF5).single_memo_terminator);
        assert!(Dialect::lookup(0xB3).flagship);
        assert!(Dialect::lookup(0xB3).decimal_as_high_byte);
    }

    #[test]
    fn autoincrement_variant_extends_lengths() {
        assert!(Dialect::lookup(0x31).decimal_as_high_byte);
        assert!(!Dialect::lookup(0x32).decimal_as_high_byte);
    }

    #[test]
    fn dbase7_wildcards_match_on_low_nibble() {
        assert_eq!(Dialect::lookup(0x04).name, "dBASE 7");
        assert_eq!(Dialect::lookup(0x74).name, "dBASE 7");
        assert_eq!(Dialect::lookup(0x8C).name, "dBASE 7 with memo");
        assert!(Dialect::lookup(0x0C).expects_memo);
    }

    #[test]
    fn unknown_versions_get_inert_flags() {
        let d = Dialect::lookup(0xAA);
        assert_eq!(d.name, "unknown");
        assert!(!d.expects_memo);
        assert!(!d.decimal_as_high_byte);
        assert!(!d.single_memo_terminator);
        assert!(!d.flagship);
    }
}
