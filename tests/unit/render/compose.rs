use super::*;

struct Fixture {
    cfg: RevealConfig,
    geom: ChartGeometry,
    timeline: Timeline,
}

fn fixture() -> Fixture {
    let cfg = RevealConfig::default();
    let geom = ChartGeometry::from_config(&cfg).unwrap();
    let timeline = Timeline::plan(&cfg).unwrap();
    Fixture {
        cfg,
        geom,
        timeline,
    }
}

fn count(scene: &Scene, pred: impl Fn(&DrawCmd) -> bool) -> usize {
    scene.commands.iter().filter(|c| pred(c)).count()
}

#[test]
fn target_scale_bounces_through_peak() {
    assert_eq!(target_scale(0.0, 1.1, 0.6), 1.0);
    assert!((target_scale(0.6, 1.1, 0.6) - 1.1).abs() < 1e-12);
    assert!((target_scale(0.3, 1.1, 0.6) - 1.05).abs() < 1e-12);
    assert!((target_scale(0.8, 1.1, 0.6) - 1.05).abs() < 1e-12);
    assert!((target_scale(1.0, 1.1, 0.6) - 1.0).abs() < 1e-12);
}

#[test]
fn arrowhead_points_along_direction() {
    let [tip, a, b] = arrowhead(
        Point::new(10.0, 0.0),
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        12.0,
        6.6,
    );
    assert_eq!(tip, Point::new(10.0, 0.0));
    assert!((a.x - -2.0).abs() < 1e-9 && (a.y - 6.6).abs() < 1e-9);
    assert!((b.x - -2.0).abs() < 1e-9 && (b.y + 6.6).abs() < 1e-9);
}

#[test]
fn first_frame_shows_only_the_start_of_the_axes() {
    let fx = fixture();
    let state = FrameState::at(&fx.timeline, fx.cfg.ease, FrameIndex(0));
    assert_eq!(state.axes, 0.0);
    assert!(state.bars.iter().all(|&p| p == 0.0));
    assert_eq!(state.arrow, 0.0);
    assert_eq!(state.target, 0.0);

    let scene = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, FrameIndex(0));
    assert_eq!(count(&scene, |c| matches!(c, DrawCmd::StrokeLine { .. })), 4);
    for cmd in &scene.commands {
        let DrawCmd::StrokeLine { from, to, .. } = cmd else {
            panic!("unexpected command at frame 0: {cmd:?}");
        };
        assert_eq!(from, to);
    }
}

#[test]
fn bar_is_full_on_last_frame_of_its_phase() {
    let fx = fixture();
    let first = fx.timeline.bars[0];
    let frame = FrameIndex(first.end().0 - 1);
    let state = FrameState::at(&fx.timeline, fx.cfg.ease, frame);
    assert_eq!(state.bars[0], 1.0);
    assert_eq!(state.bars[1], 0.0);

    let scene = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, frame);
    let main = scene
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCmd::FillRect { rect, color } if *color == fx.cfg.style.accent => Some(*rect),
            _ => None,
        })
        .unwrap();
    assert!((main.height() - fx.geom.bar_heights[0]).abs() < 1e-9);
    assert!((main.width() - fx.geom.bar_width).abs() < 1e-9);
}

#[test]
fn bars_grow_in_strict_sequence() {
    let fx = fixture();
    for f in fx.timeline.frames() {
        let state = FrameState::at(&fx.timeline, fx.cfg.ease, f);
        for pair in state.bars.windows(2) {
            if pair[1] > 0.0 {
                assert_eq!(pair[0], 1.0, "bar started early at {f:?}");
            }
        }
    }
}

#[test]
fn labels_fade_with_their_phase() {
    let fx = fixture();
    let before = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, fx.timeline.labels.start());
    assert_eq!(before.texts().count(), 0);

    let mid = FrameIndex(fx.timeline.labels.start().0 + 4);
    let scene = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, mid);
    let alphas: Vec<u8> = scene
        .commands
        .iter()
        .filter(|c| c.is_text())
        .map(|c| c.color().a)
        .collect();
    assert_eq!(alphas.len(), 6);
    assert!(alphas.iter().all(|&a| a > 0 && a < 255));
    assert_eq!(
        scene.texts().collect::<Vec<_>>(),
        ["Gen", "Feb", "Mar", "Apr", "Mag", "Giu"]
    );
}

#[test]
fn final_frame_is_fully_revealed() {
    let fx = fixture();
    let last = fx.timeline.last_frame();
    let state = FrameState::at(&fx.timeline, fx.cfg.ease, last);
    assert!(state.bars.iter().all(|&p| p == 1.0));
    assert_eq!(state.arrow, 1.0);
    assert_eq!(state.target, 1.0);
    assert_eq!(target_scale(state.target, 1.1, 0.6), 1.0);

    let scene = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, last);
    let style = &fx.cfg.style;

    // Endpoint accents plus the three target rings.
    let circles: Vec<(f64, u8)> = scene
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCmd::FillCircle { radius, color, .. } => Some((*radius, color.a)),
            _ => None,
        })
        .collect();
    assert_eq!(circles.len(), 5);
    let rings: Vec<f64> = circles[2..].iter().map(|(r, _)| *r).collect();
    assert_eq!(rings, [28.0, 18.0, 9.0]);
    assert!(circles.iter().all(|(_, a)| *a == 255));

    let head = scene
        .commands
        .iter()
        .rev()
        .find_map(|c| match c {
            DrawCmd::FillPolygon { points, color } if *color == style.accent => {
                Some(points.clone())
            }
            _ => None,
        })
        .unwrap();
    assert!(head[0].distance(fx.geom.arrow_end) < 1e-9);

    let label = scene.commands.last().unwrap();
    let DrawCmd::Text {
        text, bold, color, ..
    } = label
    else {
        panic!("target label should be drawn last");
    };
    assert_eq!(text, "300K");
    assert!(*bold);
    assert_eq!(color.a, 255);

    assert_eq!(
        count(&scene, |c| matches!(c, DrawCmd::FillRect { .. })),
        12
    );
}

#[test]
fn arrowhead_waits_for_threshold() {
    let fx = fixture();
    let start = fx.timeline.arrow.start();
    let scene = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, start);
    assert_eq!(count(&scene, |c| matches!(c, DrawCmd::FillPolygon { .. })), 0);

    let later = FrameIndex(start.0 + 5);
    let scene = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, later);
    assert_eq!(count(&scene, |c| matches!(c, DrawCmd::FillPolygon { .. })), 2);
}

#[test]
fn composition_is_deterministic() {
    let fx = fixture();
    for f in [0, 30, 90, 120, 167] {
        let a = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, FrameIndex(f));
        let b = compose_frame(&fx.cfg, &fx.geom, &fx.timeline, FrameIndex(f));
        assert_eq!(a, b);
    }
}
