//! # xbase - dBase-Family Table File Engine
//!
//! xbase reads and writes DBF table files of the dBASE III/IV/V/7, FoxBASE,
//! FoxPro, Visual FoxPro, Clipper and Flagship families, together with their
//! companion DBT memo files. A table file carries a 32-byte header, an array
//! of 32-byte field descriptors, and fixed-size records; memo fields
//! indirect into the sidecar as 512-byte block pointers.
//!
//! ## Quick Start
//!
//! ```ignore
//! use xbase::{FieldType, Table, Value};
//!
//! let mut table = Table::create("people.dbf")?;
//! table.add_column("ID", FieldType::Numeric, Some(5), None)?;
//! table.add_column("NAME", FieldType::Character, Some(10), None)?;
//! table.add_column("NOTE", FieldType::Memo, None, None)?;
//!
//! table.insert(&[Value::Int(1), "Alice".into(), "hello".into()])?;
//! table.close()?;
//!
//! let mut table = Table::open("people.dbf")?;
//! table.for_each(|row| {
//!     println!("{:?}", row.get("NAME"));
//!     Ok(())
//! })?;
//! table.close()?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │         Public API (Table)           │
//! ├──────────────────────────────────────┤
//! │  Header/Descriptor Codec │  Vacuum   │
//! ├──────────────────────────┼───────────┤
//! │  Record Layout Compiler  │ MemoStore │
//! ├──────────────────────────────────────┤
//! │  Dialect / CodePage / Conversions    │
//! └──────────────────────────────────────┘
//! ```
//!
//! Opening a table reads the header, resolves the version byte to a
//! [`Dialect`], parses the descriptor array, and compiles a record layout
//! (one fixed-width slot per column with pre-computed offsets). Reads apply
//! the layout to each record and resolve memo pointers through the
//! [`MemoStore`]; writes run the same plan in reverse, buffering memo
//! bodies so a failed serialization can roll back without touching the
//! sidecar.
//!
//! ## File Layout
//!
//! ```text
//! people.dbf           # header + descriptors + fixed-size records
//! people.dbt           # 512-byte memo blocks; block 0 holds the
//!                      # next-available-block counter
//! ```
//!
//! ## Module Overview
//!
//! - [`table`]: the engine - open/create, insert/update/delete, cursor
//!   operations, close, vacuum
//! - [`layout`]: per-type slot compilation, decode/encode rules
//! - [`memo`]: the DBT sidecar with buffered, rollback-capable writes
//! - [`dialect`]: version byte to parsing rules
//! - [`codepage`]: language driver byte to text encoding
//! - [`convert`]: short-date, Julian-day and currency conversions
//! - [`condition`]: the non-fatal condition protocol
//!
//! ## What This Crate Does Not Do
//!
//! Secondary index files are neither parsed nor maintained (the per-field
//! indexed flag round-trips but is never used), there is no SQL layer, no
//! file locking, and no journalling beyond flushing after each mutation.

pub mod codepage;
pub mod condition;
pub mod config;
pub mod convert;
pub mod dialect;
pub mod field;
pub mod layout;
pub mod memo;
pub mod table;
pub mod value;

pub use codepage::CodePage;
pub use condition::{Condition, ConditionSink};
pub use dialect::Dialect;
pub use field::{FieldDescriptor, FieldType};
pub use layout::RecordLayout;
pub use memo::MemoStore;
pub use table::{Row, Table};
pub use value::Value;
