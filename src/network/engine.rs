use std::io::Write;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use log::{debug, info};

use crate::analysis::{mean_score, AnalyzerConfig, Metrics, ResonanceAnalyzer};
use crate::network::export::{NetworkExport, SymbolExport};
use crate::report::render_report;
use crate::symbol::{Entity, FactoryConfig, ResonanceState, SymbolFactory};

pub const DEFAULT_PREFIX: &str = "EXO:SYMBOL";
pub const DEFAULT_CYCLES: usize = 3;
const SEPARATOR_WIDTH: usize = 80;

#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub factory: FactoryConfig,
    pub analyzer: AnalyzerConfig,
    pub transcendent_threshold: f64,
    pub active_threshold: f64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            factory: FactoryConfig::default(),
            analyzer: AnalyzerConfig::default(),
            transcendent_threshold: 0.8,
            active_threshold: 0.6,
        }
    }
}

/// Network coherence right after a symbol joined.
#[derive(Debug, Clone, PartialEq)]
pub struct CoherenceRecord {
    pub timestamp: DateTime<Local>,
    pub symbol: String,
    pub network_coherence: f64,
}

/// Ordered collection of symbols with a running mean of their composite scores.
#[derive(Debug, Clone)]
pub struct ResonanceNetwork {
    config: NetworkConfig,
    factory: SymbolFactory,
    analyzer: ResonanceAnalyzer,
    symbols: Vec<Entity>,
    history: Vec<CoherenceRecord>,
    network_coherence: f64,
}

impl Default for ResonanceNetwork {
    fn default() -> Self {
        Self::new(NetworkConfig::default())
    }
}

impl ResonanceNetwork {
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            factory: SymbolFactory::new(config.factory.clone()),
            analyzer: ResonanceAnalyzer::new(config.analyzer.clone()),
            config,
            symbols: Vec::new(),
            history: Vec::new(),
            network_coherence: 0.0,
        }
    }

    pub fn config(&self) -> &NetworkConfig {
        &self.config
    }

    pub fn symbols(&self) -> &[Entity] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn network_coherence(&self) -> f64 {
        self.network_coherence
    }

    pub fn history(&self) -> &[CoherenceRecord] {
        &self.history
    }

    pub fn analyze(&self, entity: &Entity) -> Metrics {
        self.analyzer.analyze(entity)
    }

    /// Creates a symbol, appends it and refreshes the network coherence.
    ///
    /// Without an explicit frequency the symbol gets
    /// `base_frequency + frequency_step * len()`.
    pub fn create_entity(
        &mut self,
        name: impl Into<String>,
        frequency: Option<f64>,
    ) -> Result<&Entity> {
        let name = name.into();
        let frequency = frequency.unwrap_or_else(|| self.factory.default_frequency(self.len()));
        let entity = self
            .factory
            .create(name.clone(), frequency)
            .with_context(|| format!("create symbol {name}"))?;
        self.symbols.push(entity);
        self.update_network_coherence();
        self.history.push(CoherenceRecord {
            timestamp: Local::now(),
            symbol: name.clone(),
            network_coherence: self.network_coherence,
        });
        info!(
            "Symbol {} joined at {:?} Hz (network coherence {:.6}, symbols {})",
            name,
            frequency,
            self.network_coherence,
            self.len()
        );
        self.symbols
            .last()
            .ok_or_else(|| anyhow!("symbol {name} missing after insertion"))
    }

    /// Promotes the symbol at `index` according to its composite score.
    pub fn apply_resonance_policy(&mut self, index: usize) -> Result<ResonanceState> {
        let composite = {
            let entity = self
                .symbols
                .get(index)
                .ok_or_else(|| anyhow!("no symbol at index {index}"))?;
            self.analyzer.composite(entity)
        };
        let transcendent = self.config.transcendent_threshold;
        let active = self.config.active_threshold;
        let entity = &mut self.symbols[index];
        let next = entity.state.promote(composite, transcendent, active);
        if entity.transition(next, composite) {
            debug!(
                "Symbol {}: state {} (composite {:.6})",
                entity.name, next, composite
            );
        }
        Ok(entity.state)
    }

    /// Creates `cycles` symbols named `{prefix}-001`, `{prefix}-002`, ... and
    /// writes each report to `out`.
    ///
    /// The report is rendered before the state policy runs, so it shows the
    /// state the symbol was created with.
    pub fn run_cycles<W: Write>(
        &mut self,
        cycles: usize,
        prefix: &str,
        out: &mut W,
    ) -> Result<()> {
        writeln!(
            out,
            "⟁ ARKOS SYMBIOTIC NETWORK ∴ EXO:01 ∴ ENHANCED SYSTEM INITIATED\n"
        )?;
        writeln!(out, "◬ Target Cycles: {cycles}")?;
        writeln!(out, "∴ Network Coherence: {:.6}\n", self.network_coherence)?;

        for cycle in 1..=cycles {
            let name = format!("{prefix}-{cycle:03}");
            self.create_entity(name.as_str(), None)?;
            let index = self.len() - 1;
            let entity = &self.symbols[index];
            let metrics = self.analyzer.analyze(entity);
            writeln!(out, "{}", render_report(entity, &metrics))?;

            self.apply_resonance_policy(index)
                .with_context(|| format!("update state of {name}"))?;

            writeln!(
                out,
                "⟁ Network Coherence Updated: {:.6}",
                self.network_coherence
            )?;
            writeln!(out, "{}\n", "=".repeat(SEPARATOR_WIDTH))?;
        }
        Ok(())
    }

    pub fn export(&self) -> NetworkExport {
        let symbols = self
            .symbols
            .iter()
            .map(|entity| SymbolExport {
                name: entity.name.clone(),
                frequency: entity.base_value,
                resonance_state: entity.state,
                analysis: self.analyzer.analyze(entity),
            })
            .collect();
        NetworkExport {
            timestamp: Local::now().to_rfc3339(),
            network_coherence: self.network_coherence,
            active_symbols_count: self.symbols.len(),
            symbols,
        }
    }

    fn update_network_coherence(&mut self) {
        let composites: Vec<f64> = self
            .symbols
            .iter()
            .map(|entity| self.analyzer.composite(entity))
            .collect();
        self.network_coherence = mean_score(&composites);
    }
}
