// 📥 CSV Import - Bulk load any record type through the registry rules
//
// Each row goes through Registry::save, so rejected rows are the ones that
// fail to parse, break a rule or hit a constraint. They are counted and
// logged, not fatal.

use crate::record::Record;
use crate::registry::Registry;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ImportSummary {
    pub saved: usize,
    pub rejected: usize,
    /// (csv line, reason) for every rejected row
    pub rejections: Vec<(u64, String)>,
}

impl ImportSummary {
    fn reject<R: Record>(&mut self, line: u64, reason: String) {
        warn!(entity = R::ENTITY, line, error = %reason, "row rejected");
        self.rejected += 1;
        self.rejections.push((line, reason));
    }
}

/// Load every row of `csv_path` as an `R` and save it.
///
/// Fails only when the file cannot be opened or read.
pub fn import_csv<R>(registry: &mut Registry, csv_path: &Path) -> Result<ImportSummary>
where
    R: Record + DeserializeOwned,
{
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let mut summary = ImportSummary::default();

    for (index, result) in rdr.deserialize::<R>().enumerate() {
        // header is line 1
        let line = index as u64 + 2;
        let mut record = match result {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(e)
                    .with_context(|| format!("Failed to read {} at line {}", csv_path.display(), line));
            }
            Err(e) => {
                summary.reject::<R>(line, e.to_string());
                continue;
            }
        };

        match registry.save(&mut record) {
            Ok(_) => summary.saved += 1,
            Err(e) => summary.reject::<R>(line, e.to_string()),
        }
    }

    info!(
        entity = R::ENTITY,
        saved = summary.saved,
        rejected = summary.rejected,
        "import finished"
    );

    Ok(summary)
}
