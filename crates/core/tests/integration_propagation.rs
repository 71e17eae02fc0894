//! End-to-end propagation behavior: spreading, gating, deduplication and
//! termination over full engine runs.

use fire_spread_core::{
    FirePoint, PropagationEngine, Region, RegionSet, SimulationConfig, Termination, UniformNdvi,
    Weather,
};

/// One region comfortably covering everything a short run can reach
fn covering_region() -> RegionSet {
    RegionSet::new(vec![Region::rectangle("siberia-test", 80.0, 45.0, 100.0, 65.0)])
}

fn hot_dry_ignition() -> FirePoint {
    FirePoint::ignition(90.0, 55.0, Weather::new(30.0, 20.0, 8.0, 45.0))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[test]
fn test_single_step_spread_scenario() {
    init_tracing();

    let ignition = hot_dry_ignition();
    assert_eq!(ignition.risk_score(), 0.747);

    let config = SimulationConfig {
        steps: 1,
        risk_threshold: 0.3,
        max_distance: 0.2,
        samples_per_point: 16,
        ..SimulationConfig::default()
    };
    let regions = covering_region();
    let output = PropagationEngine::new(config)
        .run(&[ignition], &UniformNdvi::new(0.5), &regions)
        .unwrap();

    // Above threshold, permissive gates: the fire spreads. Key collisions
    // among 16 continuous random samples are vanishingly unlikely, but the
    // contract only promises at least one survivor.
    assert!(
        (1..=16).contains(&output.points.len()),
        "expected 1..=16 spread points, got {}",
        output.points.len()
    );
    assert_eq!(output.termination, Termination::StepLimitReached);
    assert_eq!(output.stats.steps_run, 1);

    for pt in &output.points {
        assert_eq!(pt.ndvi(), Some(0.5));
        assert_eq!(pt.step(), Some(1));
        assert!(
            regions.contains(pt.x(), pt.y()),
            "spread point ({}, {}) escaped the monitored region",
            pt.x(),
            pt.y()
        );
        // Weather is inherited verbatim, so the recomputed risk matches
        assert_eq!(pt.weather(), Weather::new(30.0, 20.0, 8.0, 45.0));
        approx::assert_relative_eq!(pt.risk_score(), 0.747);
    }
}

#[test]
fn test_halts_at_step_budget_with_permissive_gates() {
    // Everything passes every gate, so only the step budget can stop the run
    let config = SimulationConfig {
        steps: 3,
        risk_threshold: 0.3,
        ..SimulationConfig::default()
    };
    let output = PropagationEngine::new(config)
        .run(&[hot_dry_ignition()], &UniformNdvi::new(0.9), &covering_region())
        .unwrap();

    assert_eq!(output.termination, Termination::StepLimitReached);
    assert_eq!(output.stats.steps_run, 3);
    assert!(!output.points.is_empty());

    // Later steps exist in the output, so expansion actually compounded
    assert!(output.points.iter().any(|p| p.step() == Some(3)));
}

#[test]
fn test_output_has_no_duplicate_dedup_keys() {
    let config = SimulationConfig {
        steps: 4,
        risk_threshold: 0.3,
        seed: 1234,
        ..SimulationConfig::default()
    };
    let output = PropagationEngine::new(config)
        .run(&[hot_dry_ignition()], &UniformNdvi::new(0.9), &covering_region())
        .unwrap();

    let mut keys: Vec<(i64, i64)> = output.points.iter().map(|p| p.dedup_key(4)).collect();
    let total = keys.len();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), total, "output contains duplicate coordinate keys");
}

#[test]
fn test_region_gating_confines_spread() {
    // A region barely larger than the ignition point: nearly all candidates
    // land outside and are discarded, and whatever survives stays inside.
    let tight = RegionSet::new(vec![Region::rectangle("tight", 89.95, 54.95, 90.05, 55.05)]);
    let config = SimulationConfig {
        steps: 5,
        risk_threshold: 0.3,
        ..SimulationConfig::default()
    };
    let output = PropagationEngine::new(config)
        .run(&[hot_dry_ignition()], &UniformNdvi::new(0.9), &tight)
        .unwrap();

    assert!(output.stats.rejected_outside_regions > 0);
    for pt in &output.points {
        assert!(tight.contains(pt.x(), pt.y()));
    }
}

#[test]
fn test_ignition_points_excluded_from_output() {
    let config = SimulationConfig {
        steps: 2,
        risk_threshold: 0.3,
        ..SimulationConfig::default()
    };
    let ignition = hot_dry_ignition();
    let output = PropagationEngine::new(config)
        .run(&[ignition.clone()], &UniformNdvi::new(0.9), &covering_region())
        .unwrap();

    // Every output point is a descendant (step set); the ignition key was
    // burned first, so nothing can re-emit its coordinate.
    let ignition_key = ignition.dedup_key(4);
    for pt in &output.points {
        assert!(pt.step().is_some());
        assert_ne!(pt.dedup_key(4), ignition_key);
    }
}

#[test]
fn test_duplicate_ignition_points_processed_once() {
    let config = SimulationConfig {
        steps: 1,
        risk_threshold: 0.3,
        ..SimulationConfig::default()
    };
    let ignition = hot_dry_ignition();
    let output = PropagationEngine::new(config)
        .run(
            &[ignition.clone(), ignition],
            &UniformNdvi::new(0.9),
            &covering_region(),
        )
        .unwrap();

    // The second copy shares the first's dedup key and is skipped outright
    assert_eq!(output.stats.points_processed, 1);
    assert!(output.points.len() <= 16);
}
