use std::cmp::Ordering;

use log::debug;
use nalgebra::SymmetricEigen;
use serde::{Deserialize, Serialize};

use crate::symbol::Entity;

/// Weights for coherence, ethical resonance, contextual stability and harmonic coherence.
pub const COMPOSITE_WEIGHTS: [f64; 4] = [0.382, 0.618, 0.236, 0.146];

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub weights: [f64; 4],
    /// Harmonic ratios whose deviation falls below this count as coherent.
    pub coherence_threshold: f64,
    /// Delta degrees of freedom for the ratio deviation (0 = population).
    ///
    /// The harmonic ratios do not depend on the frequency, so the flag is a
    /// constant: 1.0 with ddof 0 (the legacy export values) and 0.0 with
    /// ddof 1 (sample deviation).
    pub ratio_ddof: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            weights: COMPOSITE_WEIGHTS,
            coherence_threshold: 1.0,
            ratio_ddof: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub coherence: f64,
    pub ethical_resonance: f64,
    pub contextual_stability: f64,
    pub harmonic_coherence: f64,
    #[serde(rename = "composite_resonance")]
    pub composite: f64,
}

impl Metrics {
    pub fn components(&self) -> [f64; 4] {
        [
            self.coherence,
            self.ethical_resonance,
            self.contextual_stability,
            self.harmonic_coherence,
        ]
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResonanceAnalyzer {
    config: AnalyzerConfig,
}

impl ResonanceAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Mean of the squared vector components.
    pub fn coherence(&self, entity: &Entity) -> f64 {
        entity.vector.dot(&entity.vector) / entity.vector.len() as f64
    }

    pub fn ethical_resonance(&self, entity: &Entity) -> f64 {
        entity.ethics.coherence_measure()
    }

    pub fn contextual_stability(&self, entity: &Entity) -> f64 {
        let eigenvalues = field_eigenvalues(entity);
        eigenvalues.iter().sum::<f64>() / eigenvalues.len() as f64
    }

    /// 1.0 when consecutive harmonic ratios deviate less than the threshold, else 0.0.
    pub fn harmonic_coherence(&self, entity: &Entity) -> f64 {
        let values: Vec<f64> = entity.harmonics.values().copied().collect();
        let ratios: Vec<f64> = values.windows(2).map(|pair| pair[1] / pair[0]).collect();
        let deviation = standard_deviation(&ratios, self.config.ratio_ddof);
        if deviation < self.config.coherence_threshold {
            1.0
        } else {
            0.0
        }
    }

    pub fn composite(&self, entity: &Entity) -> f64 {
        self.weighted(&[
            self.coherence(entity),
            self.ethical_resonance(entity),
            self.contextual_stability(entity),
            self.harmonic_coherence(entity),
        ])
    }

    pub fn analyze(&self, entity: &Entity) -> Metrics {
        let coherence = self.coherence(entity);
        let ethical_resonance = self.ethical_resonance(entity);
        let contextual_stability = self.contextual_stability(entity);
        let harmonic_coherence = self.harmonic_coherence(entity);
        let composite = self.weighted(&[
            coherence,
            ethical_resonance,
            contextual_stability,
            harmonic_coherence,
        ]);
        debug!(
            "Symbol {}: coherence {:.6}, ethical {:.6}, contextual {:.6}, harmonic {}, composite {:.6}",
            entity.name,
            coherence,
            ethical_resonance,
            contextual_stability,
            harmonic_coherence,
            composite
        );
        Metrics {
            coherence,
            ethical_resonance,
            contextual_stability,
            harmonic_coherence,
            composite,
        }
    }

    fn weighted(&self, values: &[f64; 4]) -> f64 {
        let weights = &self.config.weights;
        let total: f64 = weights.iter().sum();
        let numerator: f64 = weights.iter().zip(values.iter()).map(|(w, v)| w * v).sum();
        numerator / total
    }
}

/// Eigenvalues of the context field in ascending order.
///
/// The field is symmetric by construction, so every eigenvalue is real.
pub fn field_eigenvalues(entity: &Entity) -> Vec<f64> {
    let symmetric = 0.5 * (entity.matrix + entity.matrix.transpose());
    let eigen = SymmetricEigen::new(symmetric);
    let mut eigenvalues: Vec<f64> = eigen.eigenvalues.iter().copied().collect();
    eigenvalues.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    eigenvalues
}

/// Mean of the given scores, 0.0 when there are none.
pub fn mean_score(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }
    scores.iter().sum::<f64>() / scores.len() as f64
}

fn standard_deviation(values: &[f64], ddof: usize) -> f64 {
    if values.len() <= ddof {
        return f64::NAN;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let squared: f64 = values.iter().map(|v| (v - mean) * (v - mean)).sum();
    (squared / (values.len() - ddof) as f64).sqrt()
}
