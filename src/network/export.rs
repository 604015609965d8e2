use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::Metrics;
use crate::symbol::ResonanceState;

/// Snapshot of a network in the JSON layout consumed by downstream integrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkExport {
    pub timestamp: String,
    pub network_coherence: f64,
    pub active_symbols_count: usize,
    pub symbols: Vec<SymbolExport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolExport {
    pub name: String,
    pub frequency: f64,
    pub resonance_state: ResonanceState,
    pub analysis: Metrics,
}

impl NetworkExport {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("parse network export")
    }

    pub fn write_to_path(&self, path: &Path) -> Result<()> {
        let json = self.to_json_string()?;
        let mut file =
            File::create(path).with_context(|| format!("create export file {:?}", path))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("write export file {:?}", path))?;
        Ok(())
    }

    pub fn composites(&self) -> Vec<f64> {
        self.symbols
            .iter()
            .map(|symbol| symbol.analysis.composite)
            .collect()
    }
}
