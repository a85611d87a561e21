use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use crate::{
    core::utils::ensure_dir,
    domain::Account,
    errors::{LedgerError, LedgerResult},
};

use super::{LoadReport, StorageBackend};

const TMP_SUFFIX: &str = "tmp";

/// Stores every account as one JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn report_unreadable(&self, report: &mut LoadReport, err: LedgerError) {
        tracing::error!(
            path = %self.path.display(),
            %err,
            "data file unreadable, starting with an empty ledger"
        );
        report
            .warnings
            .push(format!("Failed to load data file: {err}"));
    }
}

impl StorageBackend for JsonStorage {
    fn load(&self) -> LoadReport {
        let mut report = LoadReport::default();
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                report.created = true;
                if let Err(err) = self.save(&[]) {
                    tracing::error!(path = %self.path.display(), %err, "data file not created");
                    report
                        .warnings
                        .push(format!("Failed to create data file: {err}"));
                }
                return report;
            }
            Err(err) => {
                self.report_unreadable(&mut report, err.into());
                return report;
            }
        };
        let trimmed = data.trim();
        if trimmed.is_empty() {
            return report;
        }
        match serde_json::from_str(trimmed) {
            Ok(accounts) => report.accounts = accounts,
            Err(err) => self.report_unreadable(&mut report, err.into()),
        }
        report
    }

    fn save(&self, accounts: &[Account]) -> LedgerResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(accounts)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        tracing::debug!(path = %self.path.display(), count = accounts.len(), "ledger saved");
        Ok(())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

pub(crate) fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
