//! CSV file holding store: `symbol,weight,shares`, one row per holding.

use crate::domain::error::PortviewError;
use crate::domain::holding::Holding;
use crate::ports::holding_store_port::HoldingStorePort;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

pub struct CsvHoldingStore {
    path: PathBuf,
}

impl CsvHoldingStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn store_error(&self, e: impl std::fmt::Display) -> PortviewError {
        PortviewError::Store {
            reason: format!("{}: {}", self.path.display(), e),
        }
    }
}

impl HoldingStorePort for CsvHoldingStore {
    fn load(&self) -> Result<Option<Vec<Holding>>, PortviewError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.store_error(e)),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let holdings = rdr
            .deserialize()
            .collect::<Result<Vec<Holding>, _>>()
            .map_err(|e| self.store_error(e))?;

        Ok(Some(holdings))
    }

    /// Writes to a sibling temp file and renames it over the target, so a
    /// failed write never leaves a truncated store behind.
    fn save(&self, holdings: &[Holding]) -> Result<(), PortviewError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.store_error(e))?;
        }

        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["symbol", "weight", "shares"])
            .map_err(|e| self.store_error(e))?;
        for h in holdings {
            wtr.serialize((&h.symbol, h.weight, h.shares))
                .map_err(|e| self.store_error(e))?;
        }
        let bytes = wtr.into_inner().map_err(|e| self.store_error(e))?;

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).map_err(|e| self.store_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.store_error(e))?;
        Ok(())
    }
}
