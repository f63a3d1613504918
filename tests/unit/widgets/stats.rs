use super::*;
use std::sync::{Arc, Mutex};

fn fixed_clock(now: &Arc<Mutex<String>>) -> ClockFn {
    let now = now.clone();
    Box::new(move || now.lock().unwrap().clone())
}

fn flatten(text: &Text<'static>) -> Vec<String> {
    text.lines
        .iter()
        .map(|line| {
            line.spans
                .iter()
                .map(|span| span.content.as_ref())
                .collect::<String>()
        })
        .collect()
}

#[test]
fn render_shows_time_runtime_and_fps() {
    let now = Arc::new(Mutex::new("12:00:00".to_string()));
    let mut stats = StatsWidget::with_clock(fixed_clock(&now));
    stats.update_frames(250, Duration::from_millis(2_500));

    let lines = flatten(&stats.render());
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Time") && lines[0].ends_with("12:00:00"));
    assert!(lines[1].starts_with("Runtime") && lines[1].ends_with("2s"));
    assert!(lines[2].starts_with("FPS") && lines[2].ends_with("100.0"));
}

#[test]
fn fps_is_zero_before_any_time_passed() {
    let stats = StatsWidget::new();
    assert_eq!(stats.fps(), 0.0);
}

#[test]
fn dirty_when_the_second_ticks() {
    let now = Arc::new(Mutex::new("12:00:00".to_string()));
    let mut stats = StatsWidget::with_clock(fixed_clock(&now));

    assert!(stats.needs_update());
    stats.render();
    assert!(!stats.needs_update());

    stats.update_frames(10, Duration::from_millis(100));
    assert!(!stats.needs_update());

    *now.lock().unwrap() = "12:00:01".to_string();
    assert!(stats.needs_update());
    stats.render();
    assert!(!stats.needs_update());
}

#[test]
fn invalidate_forces_a_repaint() {
    let now = Arc::new(Mutex::new("12:00:00".to_string()));
    let mut stats = StatsWidget::with_clock(fixed_clock(&now));
    stats.render();

    stats.invalidate();
    assert!(stats.needs_update());
}
