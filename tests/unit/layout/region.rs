use super::*;

fn dashboard() -> Region {
    Region::new("root").split_column([
        Region::new("header").length(3),
        Region::new("body").split_row([Region::new("left"), Region::new("right").fill(2)]),
        Region::new("footer").length(4),
    ])
}

#[test]
fn walk_visits_parents_before_children_in_order() {
    let root = dashboard();
    let names: Vec<&str> = root.walk().into_iter().map(Region::name).collect();
    assert_eq!(names, ["root", "header", "body", "left", "right", "footer"]);
}

#[test]
fn sizes_map_to_constraints() {
    assert_eq!(RegionSize::Length(3).constraint(), Constraint::Length(3));
    assert_eq!(RegionSize::Fill(2).constraint(), Constraint::Fill(2));
    assert_eq!(RegionSize::Fill(0).constraint(), Constraint::Fill(1));
}

#[test]
fn splits_record_direction() {
    let root = dashboard();
    assert_eq!(root.direction(), Some(Direction::Vertical));
    assert_eq!(root.children()[1].direction(), Some(Direction::Horizontal));
    assert_eq!(root.children()[0].direction(), None);
    assert!(root.children()[0].children().is_empty());
    assert_eq!(root.children()[0].size(), RegionSize::Length(3));
}
