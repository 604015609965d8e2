pub mod construction;
pub mod model;

pub use construction::{FactoryConfig, SymbolFactory, HARMONIC_MULTIPLIERS};
pub use model::{
    ContextField, Entity, EthicalMatrix, HarmonicSpectrum, ResonanceState, SemanticVector,
    StateTransition,
};
