//! Kernel certification tests
//!
//! Runs the full harness against every backend this CPU supports:
//! - alignment sweep over the fixed case table with guarded buffers
//! - 300-trial randomized differential run against the naive reference
//! - the literal scenarios from the case table, checked directly

use cscal::{
    available_backends, same, scal_cases, scal_unitary, scal_unitary_with_backend, AlignmentSweep, Backend,
    Complex32, DifferentialRunner, HarnessConfig,
};

fn reals(values: &[f32]) -> Vec<Complex32> {
    values.iter().map(|&r| Complex32::new(r, 0.0)).collect()
}

fn kernel_for(backend: Backend) -> impl FnMut(Complex32, &mut [Complex32]) {
    move |alpha, x| scal_unitary_with_backend(backend, alpha, x).expect("backend is available")
}

// ============================================================================
// ALIGNMENT SWEEP
// ============================================================================

#[test]
fn test_sweep_every_backend() {
    let sweep = AlignmentSweep::new(&HarnessConfig::default()).unwrap();
    let cases = scal_cases();

    for backend in available_backends() {
        let reports = sweep.run_table(&cases, kernel_for(backend));
        assert_eq!(reports.len(), cases.len());

        let failures: Vec<String> = reports
            .iter()
            .flat_map(|r| r.failures.iter().map(|f| f.to_string()))
            .collect();
        assert!(failures.is_empty(), "{backend:?} failed:\n{}", failures.join("\n"));
    }
}

#[test]
fn test_sweep_wide_guards() {
    let sweep = AlignmentSweep::new(&HarnessConfig::thorough()).unwrap();
    for report in sweep.run_table(&scal_cases(), scal_unitary) {
        assert!(report.passed(), "case {}: {:?}", report.case, report.failures);
        assert!(!report.has_memory_fault());
    }
}

#[test]
fn test_sweep_second_sentinel() {
    // A kernel writing exactly -0.5 into a guard would slip past the default
    // sentinel; a second value closes that gap.
    let sweep = AlignmentSweep::new(&HarnessConfig::default())
        .unwrap()
        .with_sentinel(Complex32::new(f32::MAX, -1.0));
    for report in sweep.run_table(&scal_cases(), scal_unitary) {
        assert!(report.passed(), "case {}: {:?}", report.case, report.failures);
    }
}

#[test]
fn test_sweep_refuses_config_that_checks_nothing() {
    // A kernel that clobbers every element must never get a passing report
    let clobber = |_: Complex32, x: &mut [Complex32]| x.fill(Complex32::new(9.0, 9.0));

    let empty = HarnessConfig::new().with_offsets(vec![]);
    assert!(AlignmentSweep::new(&empty).is_err());

    let sweep = AlignmentSweep::new(&HarnessConfig::quick()).unwrap();
    let reports = sweep.run_table(&scal_cases(), clobber);
    assert!(reports.iter().skip(1).all(|r| !r.passed()));
}

// ============================================================================
// DIFFERENTIAL
// ============================================================================

#[test]
fn test_differential_every_backend() {
    for backend in available_backends() {
        let mut runner = DifferentialRunner::new(HarnessConfig::default());
        let report = runner.run(kernel_for(backend)).unwrap();

        assert_eq!(report.trials.len(), 300);
        assert!(report.covers_all_remainders(), "{backend:?}: {:?}", report.remainder_histogram());
        let failures: Vec<String> = report.failures().map(ToString::to_string).collect();
        assert!(failures.is_empty(), "{backend:?} seed {}: {failures:?}", report.seed);
    }
}

#[test]
fn test_differential_other_seeds() {
    for seed in [1u64, 0xDEAD_BEEF, u64::MAX] {
        let config = HarnessConfig::new().with_seed(seed).with_trials(100).with_max_len(2000);
        let report = DifferentialRunner::new(config).run(scal_unitary).unwrap();
        assert!(report.passed(), "seed {seed}: {:?}", report.failures().collect::<Vec<_>>());
    }
}

// ============================================================================
// LITERAL SCENARIOS
// ============================================================================

#[test]
fn test_scenario_alpha_two_short() {
    let mut x = reals(&[1.0, -2.0]);
    scal_unitary(Complex32::new(2.0, 0.0), &mut x);
    assert_eq!(x, reals(&[2.0, -4.0]));
}

#[test]
fn test_scenario_alpha_two_five() {
    let mut x = reals(&[1.0, -2.0, 3.0, 4.0, -5.0]);
    scal_unitary(Complex32::new(2.0, 0.0), &mut x);
    assert_eq!(x, reals(&[2.0, -4.0, 6.0, 8.0, -10.0]));
}

#[test]
fn test_scenario_three_minus_four_i() {
    let mut x = reals(&[0.0, 1.0, -2.0, 3.0, 4.0, -5.0, 6.0, -7.0, 8.0, 9.0, 12.0]);
    scal_unitary(Complex32::new(3.0, -4.0), &mut x);

    let want = [
        (0.0, 0.0),
        (3.0, -4.0),
        (-6.0, 8.0),
        (9.0, -12.0),
        (12.0, -16.0),
        (-15.0, 20.0),
        (18.0, -24.0),
        (-21.0, 28.0),
        (24.0, -32.0),
        (27.0, -36.0),
        (36.0, -48.0),
    ];
    for (i, (got, &(re, im))) in x.iter().zip(want.iter()).enumerate() {
        assert!(same(*got, Complex32::new(re, im)), "index {i}: {got}");
    }
}

#[test]
fn test_scenario_empty() {
    let mut x: Vec<Complex32> = vec![];
    scal_unitary(Complex32::new(0.0, 0.0), &mut x);
    assert!(x.is_empty());
}

#[test]
fn test_scenario_single_element() {
    let mut x = reals(&[1.0]);
    scal_unitary(Complex32::new(1.0, 1.0), &mut x);
    assert_eq!(x, vec![Complex32::new(1.0, 1.0)]);
}

#[test]
fn test_identity_and_zero_scalar_every_backend() {
    let x: Vec<Complex32> = (0..37)
        .map(|i| Complex32::new(i as f32 * 0.25 - 4.0, 3.0 - i as f32 * 0.5))
        .collect();

    for backend in available_backends() {
        let mut got = x.clone();
        scal_unitary_with_backend(backend, Complex32::new(1.0, 0.0), &mut got).unwrap();
        assert_eq!(got, x, "{backend:?} alpha = 1");

        scal_unitary_with_backend(backend, Complex32::new(0.0, 0.0), &mut got).unwrap();
        assert!(
            got.iter().all(|v| *v == Complex32::new(0.0, 0.0)),
            "{backend:?} alpha = 0: {got:?}"
        );
    }
}

// ============================================================================
// IEEE PROPAGATION
// ============================================================================

#[test]
fn test_nan_and_infinity_propagate_like_reference() {
    let alpha = Complex32::new(0.5, -2.0);
    let mut x = vec![Complex32::new(1.0, 1.0); 19];
    x[3] = Complex32::new(f32::NAN, 0.0);
    x[9] = Complex32::new(f32::INFINITY, 1.0);
    x[17] = Complex32::new(-0.0, f32::NEG_INFINITY);

    for backend in available_backends() {
        let mut got = x.clone();
        let mut want = x.clone();
        scal_unitary_with_backend(backend, alpha, &mut got).unwrap();
        cscal::scal_naive(alpha, &mut want);
        for (i, (g, w)) in got.iter().zip(want.iter()).enumerate() {
            assert!(same(*g, *w), "{backend:?} index {i}: {g} vs {w}");
        }
    }
}
