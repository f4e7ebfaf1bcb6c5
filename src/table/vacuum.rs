//! # Vacuum
//!
//! Compaction rewrites a live table into a scratch DBF/DBT pair holding
//! only the non-tombstoned records, then streams the scratch pair back over
//! the originals in place and refreshes the engine state. Any failure
//! leaves the original files untouched; the scratch files are removed on
//! every path.

use std::fs::File;
use std::io::{Seek, SeekFrom};
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use crate::layout::RecordLayout;

use super::header::RawHeader;
use super::{sidecar_path, Table};

impl Table {
    /// Compacts the table: tombstoned records are dropped, live records
    /// keep their order, and memo bodies are rewritten densely. The cursor
    /// is left at record 0.
    pub fn vacuum(&mut self) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let scratch = tempfile::Builder::new()
            .prefix("vacuum")
            .suffix(".dbf")
            .tempfile_in(&dir)
            .wrap_err("failed to create temporary file for vacuum")?;
        let scratch_dbf = scratch.into_temp_path();
        let scratch_dbt = sidecar_path(&scratch_dbf);

        let result = self.vacuum_through(&scratch_dbf, &scratch_dbt);

        // The scratch pair goes away on success and failure alike; the DBF
        // half is removed when the TempPath drops.
        let _ = std::fs::remove_file(&scratch_dbt);
        drop(scratch_dbf);

        if result.is_ok() {
            tracing::debug!(path = %self.path.display(), "vacuumed table");
        }
        result
    }

    fn vacuum_through(&mut self, scratch_dbf: &Path, scratch_dbt: &Path) -> Result<()> {
        let mut scratch = Table::create(scratch_dbf)?;

        // Compaction must not rewrite the file's identity: the scratch pair
        // inherits the version byte and language driver, and with them the
        // memo terminator and length rules.
        scratch.version = self.version;
        scratch.dialect = self.dialect;
        scratch.language_driver = self.language_driver;
        scratch.codepage = self.codepage;
        scratch.raw_header = RawHeader::new(self.version, self.language_driver);
        scratch
            .memo
            .set_single_terminator(self.dialect.single_memo_terminator);

        scratch.fields = self.fields.clone();
        scratch.layout = RecordLayout::compile(&scratch.fields, scratch.dialect)?;

        if self.seek(0)? {
            while let Some(values) = self.gets()? {
                scratch.insert(&values)?;
            }
        }
        scratch.close()?;

        let file = self.file_mut()?;
        file.seek(SeekFrom::Start(0))?;
        file.set_len(0)?;
        let mut source = File::open(scratch_dbf)
            .wrap_err("failed to reopen vacuum scratch file")?;
        std::io::copy(&mut source, file)?;
        file.sync_data()?;

        self.memo.overwrite_from(scratch_dbt)?;

        self.load()?;
        self.written = true;
        self.seek(0)?;
        Ok(())
    }
}
