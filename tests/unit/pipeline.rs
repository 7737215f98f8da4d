use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::*;

/// Backend that records the scenes it was asked to draw and returns blank frames.
struct Recorder {
    calls: Rc<Cell<u64>>,
    texts: Rc<RefCell<Vec<usize>>>,
}

impl RenderBackend for Recorder {
    fn render_scene(&mut self, scene: &Scene) -> ReelResult<FrameRGBA> {
        self.calls.set(self.calls.get() + 1);
        self.texts.borrow_mut().push(scene.texts().count());
        Ok(FrameRGBA::transparent(
            scene.canvas.width,
            scene.canvas.height,
        ))
    }
}

fn reel(config: RevealConfig) -> (Reel, Rc<Cell<u64>>, Rc<RefCell<Vec<usize>>>) {
    let calls = Rc::new(Cell::new(0));
    let texts = Rc::new(RefCell::new(Vec::new()));
    let backend = Recorder {
        calls: Rc::clone(&calls),
        texts: Rc::clone(&texts),
    };
    let reel = Reel::with_backend(config, Box::new(backend)).unwrap();
    (reel, calls, texts)
}

#[test]
fn progress_lines_match_console_format() {
    assert_eq!(
        ProgressEvent::Started { total: 168 }.to_string(),
        "Generating frames..."
    );
    assert_eq!(
        ProgressEvent::Frame {
            index: 12,
            total: 168
        }
        .to_string(),
        " frame 12/168"
    );
    assert_eq!(ProgressEvent::Encoding.to_string(), "Encoding GIF...");
    assert_eq!(
        ProgressEvent::Saved {
            path: PathBuf::from("grafico_lamborghini_target.gif")
        }
        .to_string(),
        "Saved grafico_lamborghini_target.gif"
    );
}

#[test]
fn frames_render_once_each_in_ascending_order() {
    let (mut reel, calls, texts) = reel(RevealConfig::default());
    let mut seen = Vec::new();
    let frames = reel.render_frames(|f| seen.push(f.0)).unwrap();

    assert_eq!(frames.len(), 168);
    assert_eq!(calls.get(), 168);
    assert_eq!(seen, (0..168).collect::<Vec<_>>());
    // Labels appear after the axes and the target label last of all.
    let texts = texts.borrow();
    assert_eq!(texts[0], 0);
    assert_eq!(texts[167], 7);
}

#[test]
fn scene_rejects_frames_past_the_end() {
    let (reel, _, _) = reel(RevealConfig::default());
    assert!(reel.scene(FrameIndex(167)).is_ok());
    assert!(matches!(
        reel.scene(FrameIndex(168)),
        Err(ReelError::Validation(_))
    ));
}

#[test]
fn invalid_config_is_rejected_before_planning() {
    let mut cfg = RevealConfig::default();
    cfg.bars.clear();
    let backend = Recorder {
        calls: Rc::default(),
        texts: Rc::default(),
    };
    assert!(Reel::with_backend(cfg, Box::new(backend)).is_err());
}

#[test]
fn render_to_gif_reports_milestones_in_order() {
    let dir = std::env::temp_dir().join(format!("chartreel-pipeline-{}", std::process::id()));
    let out = dir.join("reveal.gif");
    let cfg = RevealConfig {
        duration_secs: 1.0,
        out_path: out.clone(),
        gif_speed: 30,
        ..RevealConfig::default()
    };
    let (mut reel, calls, _) = reel(cfg);

    let mut events = Vec::new();
    let stats = render_to_gif(&mut reel, |e| events.push(e.clone())).unwrap();

    assert_eq!(stats.frames_total, 24);
    assert_eq!(calls.get(), 24);
    assert_eq!(
        events,
        vec![
            ProgressEvent::Started { total: 24 },
            ProgressEvent::Frame {
                index: 0,
                total: 24
            },
            ProgressEvent::Frame {
                index: 12,
                total: 24
            },
            ProgressEvent::Encoding,
            ProgressEvent::Saved { path: out.clone() },
        ]
    );
    assert!(out.exists());
    let _ = std::fs::remove_dir_all(&dir);
}
