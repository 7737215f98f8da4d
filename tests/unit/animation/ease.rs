use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in [Ease::Linear, Ease::SmoothStep] {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn smoothstep_is_symmetric_at_midpoint() {
    assert_eq!(Ease::SmoothStep.apply(0.5), 0.5);
    let a = Ease::SmoothStep.apply(0.2);
    let b = Ease::SmoothStep.apply(0.8);
    assert!((a + b - 1.0).abs() < 1e-12);
}

#[test]
fn smoothstep_is_monotonic_non_decreasing() {
    let mut prev = Ease::SmoothStep.apply(0.0);
    for i in 1..=1000 {
        let v = Ease::SmoothStep.apply(f64::from(i) / 1000.0);
        assert!(v >= prev, "ease dropped at step {i}: {v} < {prev}");
        prev = v;
    }
}

#[test]
fn smoothstep_is_flat_at_both_ends() {
    let h = 1e-4;
    let start_slope = (Ease::SmoothStep.apply(h) - Ease::SmoothStep.apply(0.0)) / h;
    let end_slope = (Ease::SmoothStep.apply(1.0) - Ease::SmoothStep.apply(1.0 - h)) / h;
    assert!(start_slope < 1e-3);
    assert!(end_slope < 1e-3);
}

#[test]
fn out_of_range_inputs_clamp() {
    assert_eq!(Ease::SmoothStep.apply(-3.0), 0.0);
    assert_eq!(Ease::SmoothStep.apply(7.5), 1.0);
    assert_eq!(Ease::Linear.apply(1.5), 1.0);
}

#[test]
fn default_is_smoothstep() {
    assert_eq!(Ease::default(), Ease::SmoothStep);
}
