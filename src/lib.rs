pub mod analysis;
pub mod network;
pub mod report;
pub mod symbol;

pub use analysis::{AnalyzerConfig, Metrics, ResonanceAnalyzer, COMPOSITE_WEIGHTS};
pub use network::{NetworkConfig, NetworkExport, ResonanceNetwork, SymbolExport};
pub use report::render_report;
pub use symbol::{Entity, EthicalMatrix, FactoryConfig, ResonanceState, SymbolFactory};
