use super::*;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn standard() -> Region {
    Region::new("root").split_column([
        Region::new("header").length(3),
        Region::new("main"),
        Region::new("footer").length(3),
    ])
}

fn screen(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    buffer
        .content
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn place_into_undeclared_region_fails() {
    let mut compositor = LayoutCompositor::new();
    compositor.declare(standard()).unwrap();

    let err = compositor
        .place("sidebar", Text::raw("x"), "Side", "green")
        .unwrap_err();
    assert!(matches!(err, DashError::UnknownRegion(ref name) if name == "sidebar"));
    assert!(compositor.panel("sidebar").is_none());
}

#[test]
fn place_before_declare_fails() {
    let mut compositor = LayoutCompositor::new();
    assert!(matches!(
        compositor.place_static("header", Text::raw("x"), "blue"),
        Err(DashError::UnknownRegion(_))
    ));
}

#[test]
fn duplicate_region_names_are_rejected() {
    let mut compositor = LayoutCompositor::new();
    let root = Region::new("root").split_column([Region::new("a"), Region::new("a")]);
    assert!(matches!(
        compositor.declare(root),
        Err(DashError::DuplicateRegion(ref name)) if name == "a"
    ));
    assert!(!compositor.has_region("a"));
}

#[test]
fn place_overwrites_previous_content() {
    let mut compositor = LayoutCompositor::new();
    compositor.declare(standard()).unwrap();

    compositor.place("main", Text::raw("one"), "Counter", "green").unwrap();
    compositor.place("main", Text::raw("two"), "Counter", "green").unwrap();

    let panel = compositor.panel("main").unwrap();
    assert_eq!(panel.title(), Some("Counter"));
    assert_eq!(panel.content(), &Text::raw("two"));
}

#[test]
fn changed_flag_tracks_placements_and_paints() {
    let mut compositor = LayoutCompositor::new();
    compositor.declare(standard()).unwrap();
    assert!(compositor.is_changed());

    let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();
    terminal.draw(|f| compositor.paint(f)).unwrap();
    assert!(!compositor.is_changed());

    compositor.place("main", Text::raw("hi"), "Main", "green").unwrap();
    assert!(compositor.is_changed());
}

#[test]
fn paint_draws_titled_panels_in_their_regions() {
    let mut compositor = LayoutCompositor::new();
    compositor.declare(standard()).unwrap();
    compositor.place_static("header", Text::raw("Dash"), "bright_blue").unwrap();
    compositor.place("main", Text::raw("42"), "Counter", "green").unwrap();

    let mut terminal = Terminal::new(TestBackend::new(30, 12)).unwrap();
    terminal.draw(|f| compositor.paint(f)).unwrap();

    let rows: Vec<String> = screen(&terminal).lines().map(str::to_string).collect();
    assert!(rows[1].contains("Dash"), "{rows:#?}");
    assert!(rows[3].contains("Counter"), "{rows:#?}");
    assert!(rows[3..9].iter().any(|row| row.contains("42")), "{rows:#?}");
    // The footer was never placed, so nothing is drawn there.
    assert!(rows[9..].iter().all(|row| row.trim().is_empty()), "{rows:#?}");
}

#[test]
fn redeclare_drops_panels_of_removed_regions() {
    let mut compositor = LayoutCompositor::new();
    compositor.declare(standard()).unwrap();
    compositor.place("main", Text::raw("x"), "Main", "green").unwrap();
    compositor.place_static("footer", Text::raw("keys"), "yellow").unwrap();

    compositor
        .declare(Region::new("root").split_column([Region::new("main")]))
        .unwrap();

    assert!(compositor.panel("main").is_some());
    assert!(compositor.panel("footer").is_none());
}
