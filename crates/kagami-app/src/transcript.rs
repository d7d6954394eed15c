use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::{NaiveDate, Utc};

/// Appends every finalized text event to a UTC-dated file, one raw
/// JSON line each, switching files when the date rolls over. Lines are
/// flushed as they land so a tail of the file is always current.
pub struct TranscriptWriter {
    dir: PathBuf,
    current: Option<(NaiveDate, File)>,
}

impl TranscriptWriter {
    pub fn new(dir: PathBuf) -> Self {
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("Could not create transcript directory {}: {}", dir.display(), e);
        }
        Self { dir, current: None }
    }

    pub fn append(&mut self, line: &str) -> io::Result<()> {
        let today = Utc::now().date_naive();

        if !matches!(&self.current, Some((date, _)) if *date == today) {
            let path = self.dir.join(format!("kagami.{}.log", today));
            tracing::info!("Transcript file: {}", path.display());
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            self.current = Some((today, file));
        }

        if let Some((_, file)) = &mut self.current {
            file.write_all(line.as_bytes())?;
            file.write_all(b"\n")?;
            file.flush()?;
        }

        Ok(())
    }
}
