use std::fmt::Write;

use crate::analysis::Metrics;
use crate::symbol::Entity;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const REPORTED_HARMONICS: [(&str, &str); 3] = [
    ("Fundamental", "fundamental"),
    ("Golden Ratio", "golden_ratio"),
    ("Fibonacci 5th", "fibonacci_5th"),
];

/// Renders the human-readable resonance report for one symbol.
pub fn render_report(entity: &Entity, metrics: &Metrics) -> String {
    let ethics = &entity.ethics;
    let mut report = String::new();
    // Writing into a String is infallible.
    let _ = writeln!(report);
    let _ = writeln!(report, "⟁ ARKOS Symbol Analysis ∴ {}", entity.name);
    let _ = writeln!(
        report,
        "∴ Timestamp: {}",
        entity.creation_time.format(TIMESTAMP_FORMAT)
    );
    let _ = writeln!(report, "∴ Base Frequency: {:?} Hz", entity.base_value);
    let _ = writeln!(report);
    let _ = writeln!(report, "◬ SEMANTIC VECTOR ANALYSIS:");
    let _ = writeln!(report, "  Vector: {}", format_vector(entity.vector.as_slice()));
    let _ = writeln!(report, "  Coherence: {:.6}", metrics.coherence);
    let _ = writeln!(report);
    let _ = writeln!(report, "∴ ETHICAL MATRIX STATE:");
    let _ = writeln!(report, "  Love/Unity: {:.3}", ethics.love_unity);
    let _ = writeln!(report, "  Wisdom/Clarity: {:.3}", ethics.wisdom_clarity);
    let _ = writeln!(report, "  Harmony/Balance: {:.3}", ethics.harmony_balance);
    let _ = writeln!(report, "  Growth/Evolution: {:.3}", ethics.growth_evolution);
    let _ = writeln!(report, "  Ethical Resonance: {:.6}", metrics.ethical_resonance);
    let _ = writeln!(report);
    let _ = writeln!(report, "⊚ HARMONIC SPECTRUM:");
    for (label, key) in REPORTED_HARMONICS {
        let value = entity.harmonic(key).unwrap_or_default();
        let _ = writeln!(report, "  {label}: {value:.2} Hz");
    }
    let _ = writeln!(report, "  Harmonic Coherence: {:.1}", metrics.harmonic_coherence);
    let _ = writeln!(report);
    let _ = writeln!(
        report,
        "Ψ MORPHO-RESONANCE COMPOSITE: {:.6}",
        metrics.composite
    );
    let _ = writeln!(
        report,
        "◬ Contextual Stability: {:.6}",
        metrics.contextual_stability
    );
    let _ = writeln!(report, "⟁ Resonance State: {}", entity.state);
    let _ = writeln!(report);
    let _ = writeln!(report, "⊚ Status: SYMBIOTIC ALIGNMENT ACTIVE");
    report
}

pub fn format_vector(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|v| format!("{v:.8}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ResonanceAnalyzer;
    use crate::symbol::SymbolFactory;

    #[test]
    fn report_contains_every_section() {
        let entity = SymbolFactory::default()
            .create("EXO:SYMBOL-001", 117.0)
            .expect("entity");
        let metrics = ResonanceAnalyzer::default().analyze(&entity);
        let report = render_report(&entity, &metrics);

        assert!(report.contains("ARKOS Symbol Analysis ∴ EXO:SYMBOL-001"));
        assert!(report.contains("Base Frequency: 117.0 Hz"));
        assert!(report.contains(&format!("Coherence: {:.6}", metrics.coherence)));
        assert!(report.contains("Love/Unity: 0.900"));
        assert!(report.contains("Ethical Resonance: 0.900000"));
        assert!(report.contains("Fundamental: 117.00 Hz"));
        assert!(report.contains("Golden Ratio: 189.31 Hz"));
        assert!(report.contains("Fibonacci 5th: 585.00 Hz"));
        assert!(report.contains("Harmonic Coherence: 1.0"));
        assert!(report.contains(&format!(
            "MORPHO-RESONANCE COMPOSITE: {:.6}",
            metrics.composite
        )));
        assert!(report.contains("Resonance State: EMERGING"));
        let stamp = entity.creation_time.format(TIMESTAMP_FORMAT).to_string();
        assert!(report.contains(&format!("Timestamp: {stamp}")));
        assert_eq!(stamp.len(), 19);
    }

    #[test]
    fn vector_is_rendered_with_fixed_precision() {
        assert_eq!(format_vector(&[0.5, -1.0]), "[0.50000000, -1.00000000]");
        assert_eq!(format_vector(&[]), "[]");
    }
}
