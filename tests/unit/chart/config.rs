use super::*;

#[test]
fn defaults_match_production_constants() {
    let cfg = RevealConfig::default();
    assert_eq!(cfg.total_frames(), 168);
    assert_eq!(cfg.column_count(), 6);
    assert_eq!(
        cfg.canvas,
        Canvas {
            width: 720,
            height: 420
        }
    );
    assert_eq!(cfg.style.accent, Rgba8::rgb(254, 223, 0));
    assert_eq!(cfg.target_label, "300K");
    assert_eq!(cfg.out_path, PathBuf::from("grafico_lamborghini_target.gif"));
    let labels: Vec<&str> = cfg.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, ["Gen", "Feb", "Mar", "Apr", "Mag", "Giu"]);
    cfg.validate().unwrap();
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut cfg = RevealConfig::default();
    cfg.bars.clear();
    assert!(matches!(cfg.validate(), Err(ReelError::Validation(_))));

    let mut cfg = RevealConfig::default();
    cfg.bars[2].height = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = RevealConfig::default();
    cfg.duration_secs = 0.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RevealConfig::default();
    cfg.padding.left = 400.0;
    cfg.padding.right = 400.0;
    assert!(cfg.validate().is_err());

    let mut cfg = RevealConfig::default();
    cfg.phases.arrow_secs = f64::NAN;
    assert!(cfg.validate().is_err());

    let mut cfg = RevealConfig::default();
    cfg.fps.num = 0;
    assert!(cfg.validate().is_err());

    let mut cfg = RevealConfig::default();
    cfg.gif_speed = 0;
    assert!(cfg.validate().is_err());
}

#[test]
fn config_serializes_for_diagnostics() {
    let cfg = RevealConfig::default();
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"target_label\":\"300K\""));
    assert!(json.contains("\"ease\":\"SmoothStep\""));
}
