use anyhow::{bail, Context, Result};
use chrono::Local;
use indexmap::IndexMap;
use log::debug;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::symbol::model::{
    ContextField, Entity, EthicalMatrix, HarmonicSpectrum, ResonanceState, SemanticVector,
};

const SEED_MODULUS: f64 = 4_294_967_296.0;

/// Label and multiplier of each harmonic, in spectrum order.
///
/// `octave` repeats `second_harmonic`; consumers read both keys.
pub const HARMONIC_MULTIPLIERS: [(&str, f64); 6] = [
    ("fundamental", 1.0),
    ("second_harmonic", 2.0),
    ("third_harmonic", 3.0),
    ("golden_ratio", 1.618),
    ("fibonacci_5th", 5.0),
    ("octave", 2.0),
];

#[derive(Debug, Clone)]
pub struct FactoryConfig {
    pub base_frequency: f64,
    pub frequency_step: f64,
    pub diagonal: f64,
    pub modulation_amplitude: f64,
    pub modulation_period: f64,
    pub ethics: EthicalMatrix,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            base_frequency: 117.0,
            frequency_step: 7.0,
            diagonal: 0.7,
            modulation_amplitude: 0.2,
            modulation_period: 60.0,
            ethics: EthicalMatrix::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SymbolFactory {
    config: FactoryConfig,
}

impl SymbolFactory {
    pub fn new(config: FactoryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FactoryConfig {
        &self.config
    }

    /// Frequency assigned to the next symbol when the caller gives none.
    pub fn default_frequency(&self, existing: usize) -> f64 {
        self.config.base_frequency + self.config.frequency_step * existing as f64
    }

    pub fn create(&self, name: impl Into<String>, base_value: f64) -> Result<Entity> {
        let name = name.into();
        if !base_value.is_finite() {
            bail!("Symbol {name} requires a finite base frequency, got {base_value}");
        }
        self.config
            .ethics
            .validate()
            .with_context(|| format!("Symbol {name} has an invalid ethical signature"))?;

        let vector = semantic_vector(base_value);
        let matrix = self.context_field(base_value);
        let harmonics = harmonic_spectrum(base_value);
        debug!(
            "Symbol {}: seed {}, field offset {:.6}",
            name,
            vector_seed(base_value),
            matrix[(0, 1)]
        );

        Ok(Entity {
            name,
            base_value,
            creation_time: Local::now(),
            vector,
            matrix,
            harmonics,
            ethics: self.config.ethics,
            state: ResonanceState::default(),
            history: Vec::new(),
        })
    }

    pub fn context_field(&self, base_value: f64) -> ContextField {
        let offset =
            self.config.modulation_amplitude * (base_value / self.config.modulation_period).sin();
        ContextField::identity() * self.config.diagonal + ContextField::repeat(offset)
    }
}

/// `floor(base_value * 100) mod 2^32`, always non-negative.
pub fn vector_seed(base_value: f64) -> u64 {
    (base_value * 100.0).floor().rem_euclid(SEED_MODULUS) as u64
}

pub fn semantic_vector(base_value: f64) -> SemanticVector {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(vector_seed(base_value));
    SemanticVector::from_fn(|_, _| rng.gen_range(-1.0f64..=1.0f64))
}

pub fn harmonic_spectrum(base_value: f64) -> HarmonicSpectrum {
    let mut spectrum = IndexMap::with_capacity(HARMONIC_MULTIPLIERS.len());
    for (label, multiplier) in HARMONIC_MULTIPLIERS {
        spectrum.insert(label.to_string(), base_value * multiplier);
    }
    spectrum
}
