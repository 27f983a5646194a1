//! CSV export of a ranking.
//!
//! Columns: `rank,vehicle,eta_min,speed_kmh,distance_km,status`.  Unknown
//! values are written as empty fields, never as `0` or `inf`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use ed_dispatch::Ranking;

use crate::OutputResult;

const HEADER: [&str; 6] = ["rank", "vehicle", "eta_min", "speed_kmh", "distance_km", "status"];

/// Writes rankings as CSV rows to any `Write` sink.
pub struct CsvWriter<W: Write> {
    inner:    Writer<W>,
    finished: bool,
}

impl CsvWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> CsvWriter<W> {
    pub fn from_writer(sink: W) -> OutputResult<Self> {
        let mut inner = Writer::from_writer(sink);
        inner.write_record(HEADER)?;
        Ok(Self { inner, finished: false })
    }

    /// Append one row per ranked vehicle, rank starting at 1.
    pub fn write_ranking(&mut self, ranking: &Ranking) -> OutputResult<()> {
        for (i, r) in ranking.results().iter().enumerate() {
            self.inner.write_record(&[
                (i + 1).to_string(),
                r.vehicle.clone(),
                r.eta.minutes().map(|m| format!("{m:.2}")).unwrap_or_default(),
                r.speed_kmh.map(|s| s.to_string()).unwrap_or_default(),
                r.distance_km.map(|d| format!("{d:.3}")).unwrap_or_default(),
                r.status.as_str().to_owned(),
            ])?;
        }
        Ok(())
    }

    /// Flush buffered rows.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }

    /// Flush and return the underlying sink.
    pub fn into_inner(mut self) -> OutputResult<W> {
        self.finish()?;
        self.inner
            .into_inner()
            .map_err(|e| crate::OutputError::Io(e.into_error()))
    }
}
