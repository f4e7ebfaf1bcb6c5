//! # Language Driver Table
//!
//! Byte 29 of the DBF header names the "language driver": the code page the
//! file's text fields are stored in. This module maps driver bytes to code
//! pages and performs the transcoding between file bytes and native strings.
//!
//! Transcoding only happens when a file carries a recognized driver byte;
//! otherwise field bytes pass through as UTF-8 (lossy on read). The driver
//! byte itself is round-tripped by the table engine regardless of whether a
//! conversion backend exists for it.
//!
//! Single-byte OEM and Windows pages go through `yore`; the multi-byte CJK
//! pages and the Macintosh variants go through `encoding_rs`. A few pages
//! (cp895, cp790, macGreek) have no mapping in either crate and keep their
//! bytes as-is.

use phf::phf_map;
use yore::code_pages as cp;
use yore::CodePage as SingleByte;

#[derive(Clone, Copy)]
enum Backend {
    Yore(&'static (dyn SingleByte + Sync)),
    EncodingRs(&'static encoding_rs::Encoding),
    Raw,
}

/// A code page selected by the header's language-driver byte.
#[derive(Clone, Copy)]
pub struct CodePage {
    code: u8,
    name: &'static str,
    backend: Backend,
}

const fn yore_page(code: u8, name: &'static str, page: &'static (dyn SingleByte + Sync)) -> CodePage {
    CodePage {
        code,
        name,
        backend: Backend::Yore(page),
    }
}

const fn wide_page(code: u8, name: &'static str, enc: &'static encoding_rs::Encoding) -> CodePage {
    CodePage {
        code,
        name,
        backend: Backend::EncodingRs(enc),
    }
}

const fn raw_page(code: u8, name: &'static str) -> CodePage {
    CodePage {
        code,
        name,
        backend: Backend::Raw,
    }
}

static CODE_PAGES: phf::Map<u8, CodePage> = phf_map! {
    0x01u8 => yore_page(0x01, "cp437", &cp::CP437),
    0x02u8 => yore_page(0x02, "cp850", &cp::CP850),
    0x03u8 => yore_page(0x03, "cp1252", &cp::CP1252),
    0x04u8 => wide_page(0x04, "macRoman", encoding_rs::MACINTOSH),
    0x64u8 => yore_page(0x64, "cp852", &cp::CP852),
    0x65u8 => yore_page(0x65, "cp865", &cp::CP865),
    0x66u8 => yore_page(0x66, "cp866", &cp::CP866),
    0x67u8 => yore_page(0x67, "cp861", &cp::CP861),
    0x68u8 => raw_page(0x68, "cp895"),
    0x69u8 => raw_page(0x69, "cp790"),
    0x6Au8 => yore_page(0x6A, "cp737", &cp::CP737),
    0x6Bu8 => yore_page(0x6B, "cp857", &cp::CP857),
    0x78u8 => wide_page(0x78, "cp950", encoding_rs::BIG5),
    0x7Au8 => wide_page(0x7A, "cp936", encoding_rs::GBK),
    0x7Du8 => yore_page(0x7D, "cp1255", &cp::CP1255),
    0x7Eu8 => yore_page(0x7E, "cp1256", &cp::CP1256),
    0x8Bu8 => wide_page(0x8B, "cp932", encoding_rs::SHIFT_JIS),
    0x96u8 => wide_page(0x96, "macCyrillic", encoding_rs::X_MAC_CYRILLIC),
    0x98u8 => raw_page(0x98, "macGreek"),
    0xC8u8 => yore_page(0xC8, "cp1250", &cp::CP1250),
    0xC9u8 => yore_page(0xC9, "cp1251", &cp::CP1251),
    0xCAu8 => yore_page(0xCA, "cp1254", &cp::CP1254),
    0xCBu8 => yore_page(0xCB, "cp1253", &cp::CP1253),
};

impl CodePage {
    /// Resolves a language-driver byte, if it names a known code page.
    pub fn from_driver(code: u8) -> Option<&'static CodePage> {
        CODE_PAGES.get(&code)
    }

    /// The language-driver byte this page is registered under.
    pub fn driver(&self) -> u8 {
        self.code
    }

    /// Canonical page name, e.g. `cp1252`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decodes file bytes into a native string.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self.backend {
            Backend::Yore(page) => page.decode_lossy(bytes).into_owned(),
            Backend::EncodingRs(enc) => {
                let (text, _, _) = enc.decode(bytes);
                text.into_owned()
            }
            Backend::Raw => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// Encodes a native string into file bytes. Unmappable characters become
    /// `?` for single-byte pages and numeric references for wide pages.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self.backend {
            Backend::Yore(page) => page.encode_lossy(text, b'?').into_owned(),
            Backend::EncodingRs(enc) => {
                let (bytes, _, _) = enc.encode(text);
                bytes.into_owned()
            }
            Backend::Raw => text.as_bytes().to_vec(),
        }
    }
}

impl std::fmt::Debug for CodePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CodePage")
            .field("driver", &format_args!("0x{:02X}", self.code))
            .field("name", &self.name)
            .finish()
    }
}
