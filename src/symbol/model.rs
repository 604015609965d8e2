use std::fmt;

use anyhow::{bail, Result};
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use nalgebra::{SMatrix, SVector};
use serde::{Deserialize, Serialize};

pub const VECTOR_DIM: usize = 8;
pub const FIELD_SIZE: usize = 4;

pub type SemanticVector = SVector<f64, VECTOR_DIM>;
pub type ContextField = SMatrix<f64, FIELD_SIZE, FIELD_SIZE>;
pub type HarmonicSpectrum = IndexMap<String, f64>;

/// Lifecycle stage of a symbol, each carrying a fixed resonance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResonanceState {
    Dormant,
    #[default]
    Emerging,
    Active,
    Transcendent,
}

impl ResonanceState {
    pub fn level(&self) -> f64 {
        match self {
            ResonanceState::Dormant => 0.0,
            ResonanceState::Emerging => 0.3,
            ResonanceState::Active => 0.7,
            ResonanceState::Transcendent => 1.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResonanceState::Dormant => "DORMANT",
            ResonanceState::Emerging => "EMERGING",
            ResonanceState::Active => "ACTIVE",
            ResonanceState::Transcendent => "TRANSCENDENT",
        }
    }

    /// Promotes on a high composite score; below both thresholds the prior state is kept.
    pub fn promote(self, composite: f64, transcendent_above: f64, active_above: f64) -> Self {
        if composite > transcendent_above {
            ResonanceState::Transcendent
        } else if composite > active_above {
            ResonanceState::Active
        } else {
            self
        }
    }
}

impl fmt::Display for ResonanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Four-component ethical signature carried by every symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EthicalMatrix {
    pub love_unity: f64,
    pub wisdom_clarity: f64,
    pub harmony_balance: f64,
    pub growth_evolution: f64,
}

impl Default for EthicalMatrix {
    fn default() -> Self {
        Self {
            love_unity: 0.9,
            wisdom_clarity: 0.9,
            harmony_balance: 0.9,
            growth_evolution: 0.9,
        }
    }
}

impl EthicalMatrix {
    pub fn new(
        love_unity: f64,
        wisdom_clarity: f64,
        harmony_balance: f64,
        growth_evolution: f64,
    ) -> Result<Self> {
        let matrix = Self {
            love_unity,
            wisdom_clarity,
            harmony_balance,
            growth_evolution,
        };
        matrix.validate()?;
        Ok(matrix)
    }

    /// Fails when any component is non-finite or outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (label, value) in self.labelled() {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                bail!("Ethical component {label} must lie in [0, 1], got {value}");
            }
        }
        Ok(())
    }

    pub fn signature(&self) -> [f64; 4] {
        [
            self.love_unity,
            self.wisdom_clarity,
            self.harmony_balance,
            self.growth_evolution,
        ]
    }

    pub fn coherence_measure(&self) -> f64 {
        let signature = self.signature();
        signature.iter().sum::<f64>() / signature.len() as f64
    }

    fn labelled(&self) -> [(&'static str, f64); 4] {
        [
            ("love_unity", self.love_unity),
            ("wisdom_clarity", self.wisdom_clarity),
            ("harmony_balance", self.harmony_balance),
            ("growth_evolution", self.growth_evolution),
        ]
    }
}

/// One state change of a symbol, with the composite score that caused it.
#[derive(Debug, Clone, PartialEq)]
pub struct StateTransition {
    pub timestamp: DateTime<Local>,
    pub from: ResonanceState,
    pub to: ResonanceState,
    pub composite: f64,
}

/// A named symbol with its seeded vector, context field and harmonic spectrum.
#[derive(Debug, Clone)]
pub struct Entity {
    pub name: String,
    pub base_value: f64,
    pub creation_time: DateTime<Local>,
    pub vector: SemanticVector,
    pub matrix: ContextField,
    pub harmonics: HarmonicSpectrum,
    pub ethics: EthicalMatrix,
    pub state: ResonanceState,
    pub history: Vec<StateTransition>,
}

impl Entity {
    pub fn harmonic(&self, label: &str) -> Option<f64> {
        self.harmonics.get(label).copied()
    }

    /// Moves to `next`, recording the transition when the state actually changes.
    pub fn transition(&mut self, next: ResonanceState, composite: f64) -> bool {
        if next == self.state {
            return false;
        }
        self.history.push(StateTransition {
            timestamp: Local::now(),
            from: self.state,
            to: next,
            composite,
        });
        self.state = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn promotion_keeps_prior_state_below_thresholds() {
        assert_eq!(
            ResonanceState::Emerging.promote(0.81, 0.8, 0.6),
            ResonanceState::Transcendent
        );
        assert_eq!(
            ResonanceState::Emerging.promote(0.8, 0.8, 0.6),
            ResonanceState::Active
        );
        assert_eq!(
            ResonanceState::Emerging.promote(0.6, 0.8, 0.6),
            ResonanceState::Emerging
        );
        assert_eq!(
            ResonanceState::Active.promote(0.1, 0.8, 0.6),
            ResonanceState::Active
        );
    }

    #[test]
    fn state_levels_and_names() {
        assert_eq!(ResonanceState::default(), ResonanceState::Emerging);
        assert_eq!(ResonanceState::Dormant.level(), 0.0);
        assert_eq!(ResonanceState::Transcendent.level(), 1.0);
        assert_eq!(ResonanceState::Active.to_string(), "ACTIVE");
        let json = serde_json::to_string(&ResonanceState::Transcendent).unwrap();
        assert_eq!(json, "\"TRANSCENDENT\"");
    }

    #[test]
    fn ethical_matrix_rejects_out_of_range_components() {
        assert!(EthicalMatrix::new(0.5, 0.5, 0.5, 0.5).is_ok());
        assert!(EthicalMatrix::new(1.2, 0.5, 0.5, 0.5).is_err());
        assert!(EthicalMatrix::new(0.5, f64::NAN, 0.5, 0.5).is_err());
        let mut edited = EthicalMatrix::default();
        edited.growth_evolution = -0.1;
        assert!(edited.validate().is_err());
        let default = EthicalMatrix::default();
        assert!((default.coherence_measure() - 0.9).abs() < 1e-12);
    }
}
