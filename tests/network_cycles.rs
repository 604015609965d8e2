use anyhow::Result;
use arkos::{NetworkConfig, ResonanceNetwork, ResonanceState};

fn run(cycles: usize, prefix: &str) -> Result<(ResonanceNetwork, String)> {
    let mut network = ResonanceNetwork::new(NetworkConfig::default());
    let mut buffer = Vec::new();
    network.run_cycles(cycles, prefix, &mut buffer)?;
    Ok((network, String::from_utf8(buffer)?))
}

#[test]
fn three_cycles_create_sequential_symbols() -> Result<()> {
    let (network, output) = run(3, "EXO:SYMBOL")?;

    let names: Vec<&str> = network
        .symbols()
        .iter()
        .map(|symbol| symbol.name.as_str())
        .collect();
    assert_eq!(names, ["EXO:SYMBOL-001", "EXO:SYMBOL-002", "EXO:SYMBOL-003"]);

    let frequencies: Vec<f64> = network
        .symbols()
        .iter()
        .map(|symbol| symbol.base_value)
        .collect();
    assert_eq!(frequencies, [117.0, 124.0, 131.0]);

    assert!(output.contains("Target Cycles: 3"));
    assert_eq!(output.matches("ARKOS Symbol Analysis").count(), 3);
    assert_eq!(output.matches("Network Coherence Updated:").count(), 3);
    assert_eq!(output.matches(&"=".repeat(80)).count(), 3);
    assert!(output.contains(&format!(
        "Network Coherence Updated: {:.6}",
        network.network_coherence()
    )));
    Ok(())
}

#[test]
fn states_follow_composite_thresholds() -> Result<()> {
    let (network, _) = run(3, "EXO:SYMBOL")?;
    for symbol in network.symbols() {
        let composite = network.analyze(symbol).composite;
        let expected = if composite > 0.8 {
            ResonanceState::Transcendent
        } else if composite > 0.6 {
            ResonanceState::Active
        } else {
            ResonanceState::Emerging
        };
        assert_eq!(symbol.state, expected, "symbol {}", symbol.name);
    }
    Ok(())
}

#[test]
fn reports_show_state_before_promotion() -> Result<()> {
    let (_, output) = run(1, "EXO:FIRST")?;
    assert!(output.contains("ARKOS Symbol Analysis ∴ EXO:FIRST-001"));
    assert!(output.contains("Resonance State: EMERGING"));
    Ok(())
}

#[test]
fn zero_cycles_only_write_the_banner() -> Result<()> {
    let (network, output) = run(0, "EXO:NONE")?;
    assert!(network.is_empty());
    assert!(output.contains("Network Coherence: 0.000000"));
    assert!(!output.contains("ARKOS Symbol Analysis"));
    Ok(())
}

#[test]
fn repeated_runs_produce_identical_vectors() -> Result<()> {
    let (first, _) = run(3, "EXO:SYMBOL")?;
    let (second, _) = run(3, "EXO:SYMBOL")?;
    for (a, b) in first.symbols().iter().zip(second.symbols()) {
        assert_eq!(a.vector, b.vector);
        assert_eq!(a.matrix, b.matrix);
    }
    assert_eq!(first.network_coherence(), second.network_coherence());
    Ok(())
}
