use super::*;
use crate::core::event::{Key, KeyInput};
use crate::core::state::UiState;
use crate::core::widget::DirtyFlag;
use crate::layout::Region;
use crate::tui::terminal_guard::TerminalOps;
use ratatui::backend::TestBackend;
use ratatui::text::Text;
use std::io;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct RecordingOps {
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingOps {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }
}

impl TerminalOps for RecordingOps {
    fn setup(&self) -> io::Result<()> {
        self.calls.lock().unwrap().push("setup");
        Ok(())
    }

    fn restore(&self) -> io::Result<()> {
        self.calls.lock().unwrap().push("restore");
        Ok(())
    }
}

struct Label {
    text: String,
    dirty: DirtyFlag,
}

impl Label {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            dirty: DirtyFlag::new(),
        }
    }

    fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.dirty.mark();
    }
}

impl Widget for Label {
    fn render(&mut self) -> Text<'static> {
        self.dirty.clear();
        Text::raw(self.text.clone())
    }

    fn needs_update(&self) -> bool {
        self.dirty.is_set()
    }

    fn handle_key(&mut self, key: &Key) -> bool {
        if *key == Key::Char('u') {
            self.set("updated");
            return true;
        }
        false
    }
}

/// Quits after a fixed number of idle polls.
struct QuitAfter(u32);

impl KeySource for QuitAfter {
    fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>> {
        if self.0 == 0 {
            return Ok(Some(KeyInput::Quit));
        }
        self.0 -= 1;
        thread::sleep(timeout);
        Ok(None)
    }
}

const PERIOD: Duration = Duration::from_millis(10);

fn scheduler(ops: Arc<RecordingOps>) -> FrameScheduler<TestBackend> {
    let shared = SharedState::new(UiState::default());
    shared
        .lock()
        .registry_mut()
        .register("label", Label::new("hello"), "main", "Label", "green")
        .unwrap();

    let mut compositor = LayoutCompositor::new();
    compositor
        .declare(Region::new("root").split_column([
            Region::new("header").length(3),
            Region::new("main"),
        ]))
        .unwrap();

    let session = TerminalSession::with_ops(ops).unwrap();
    let terminal = Terminal::new(TestBackend::new(30, 10)).unwrap();
    FrameScheduler::new(session, terminal, shared, compositor, FramePacer::new(PERIOD))
        .with_input_poll_interval(Duration::from_millis(1))
}

fn screen(scheduler: &FrameScheduler<TestBackend>) -> String {
    let buffer = scheduler.terminal().backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn first_step_composites_and_refreshes() {
    let mut scheduler = scheduler(Arc::new(RecordingOps::default()));
    let report = scheduler.step(Instant::now()).unwrap();

    assert_eq!(
        report,
        FrameReport {
            processed: true,
            composited: 1,
            refreshed: true,
        }
    );
    assert_eq!(scheduler.refreshes(), 1);
    assert_eq!(scheduler.shared().frame_count(), 1);
    assert!(screen(&scheduler).contains("hello"));
    assert!(!scheduler
        .shared()
        .lock()
        .registry()
        .entry("label")
        .unwrap()
        .widget()
        .needs_update());
}

#[test]
fn step_before_the_period_elapsed_does_nothing() {
    let mut scheduler = scheduler(Arc::new(RecordingOps::default()));
    let start = Instant::now();
    scheduler.step(start).unwrap();

    let report = scheduler.step(start + PERIOD / 2).unwrap();
    assert!(!report.processed);
    assert_eq!(scheduler.shared().frame_count(), 1);
}

#[test]
fn clean_frame_skips_the_refresh() {
    let mut scheduler = scheduler(Arc::new(RecordingOps::default()));
    let start = Instant::now();
    scheduler.step(start).unwrap();

    let report = scheduler.step(start + PERIOD).unwrap();
    assert!(report.processed);
    assert_eq!(report.composited, 0);
    assert!(!report.refreshed);
    assert_eq!(scheduler.refreshes(), 1);
    assert_eq!(scheduler.shared().frame_count(), 2);
}

#[test]
fn key_handled_between_frames_shows_up_next_frame() {
    let mut scheduler = scheduler(Arc::new(RecordingOps::default()));
    let start = Instant::now();
    scheduler.step(start).unwrap();

    assert!(scheduler
        .shared()
        .lock()
        .registry_mut()
        .dispatch_key(&Key::Char('u')));

    let report = scheduler.step(start + PERIOD).unwrap();
    assert_eq!(report.composited, 1);
    assert!(report.refreshed);
    assert!(screen(&scheduler).contains("updated"));
}

#[test]
fn post_frame_hook_sees_every_frame_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = seen.clone();
    let hook: PostFrameHook = Box::new(move |ctx| {
        log.lock().unwrap().push(ctx.frame_count());
        if ctx.frame_count() == 3 {
            if let Some(label) = ctx.widget_mut::<Label>("label") {
                label.set("third");
            }
        }
    });
    let mut scheduler = scheduler(Arc::new(RecordingOps::default())).with_post_frame_hook(hook);

    let start = Instant::now();
    for i in 0..3 {
        scheduler.step(start + PERIOD * i).unwrap();
    }

    assert_eq!(&*seen.lock().unwrap(), &[1, 2, 3]);
    assert!(screen(&scheduler).contains("third"));
}

#[test]
fn widget_in_undeclared_region_is_a_configuration_error() {
    let mut scheduler = scheduler(Arc::new(RecordingOps::default()));
    scheduler
        .shared()
        .lock()
        .registry_mut()
        .register("stray", Label::new("x"), "sidebar", "", "red")
        .unwrap();

    let err = scheduler.step(Instant::now()).unwrap_err();
    assert!(matches!(err, DashError::UnknownRegion(ref name) if name == "sidebar"));
}

#[test]
fn run_stops_on_quit_and_restores_the_terminal() {
    let ops = Arc::new(RecordingOps::default());
    let mut scheduler = scheduler(ops.clone());
    assert_eq!(scheduler.state(), SchedulerState::Idle);

    scheduler.run(QuitAfter(5)).unwrap();

    assert_eq!(scheduler.state(), SchedulerState::Stopped);
    assert!(scheduler.session().is_released());
    assert_eq!(
        scheduler.shared().lock().stop_reason(),
        Some(StopReason::QuitKey)
    );
    assert!(scheduler.shared().frame_count() >= 1);
    assert_eq!(ops.calls(), vec!["setup", "restore"]);
}

#[test]
fn finish_is_idempotent() {
    let ops = Arc::new(RecordingOps::default());
    let mut scheduler = scheduler(ops.clone());

    scheduler.finish();
    scheduler.finish();

    assert_eq!(scheduler.state(), SchedulerState::Stopped);
    assert_eq!(ops.calls(), vec!["setup", "restore"]);
}

#[test]
#[ignore = "timing-sensitive; frame rate is best effort"]
fn run_keeps_close_to_the_target_rate() {
    struct QuitAt(Instant);

    impl KeySource for QuitAt {
        fn poll_key(&mut self, timeout: Duration) -> io::Result<Option<KeyInput>> {
            if Instant::now() >= self.0 {
                return Ok(Some(KeyInput::Quit));
            }
            thread::sleep(timeout);
            Ok(None)
        }
    }

    let mut scheduler = scheduler(Arc::new(RecordingOps::default()));
    let window = Duration::from_millis(500);
    scheduler.run(QuitAt(Instant::now() + window)).unwrap();

    let expected = FramePacer::new(PERIOD).expected_frames(window);
    let frames = scheduler.shared().frame_count();
    assert!(frames * 10 >= expected * 8, "frames={frames} expected={expected}");
    assert!(frames <= expected + 2, "frames={frames} expected={expected}");
}
