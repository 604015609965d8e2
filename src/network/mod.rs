pub mod engine;
pub mod export;

pub use engine::{
    CoherenceRecord, NetworkConfig, ResonanceNetwork, DEFAULT_CYCLES, DEFAULT_PREFIX,
};
pub use export::{NetworkExport, SymbolExport};
