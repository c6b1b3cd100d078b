//! Property tests for the geometry and editing invariants.

use pagecraft::editor::interaction::{drag_position, resize_position};
use pagecraft::editor::{layers, pages, Handle, SessionState};
use pagecraft::model::{
    Document, Element, ElementId, ElementKind, Page, PageSize, Position, MAX_PAGES,
    MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH,
};
use pagecraft::units::{to_millimeters, to_pixels, Zoom};
use pagecraft::{Editor, ElementPatch};
use proptest::prelude::*;

const EPS: f64 = 1e-6;

fn zoom_strategy() -> impl Strategy<Value = Zoom> {
    (1u16..=8).prop_map(|step| Zoom::new(step * 25))
}

fn snap_strategy() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![Just(None), Just(Some(1.0)), Just(Some(2.5)), Just(Some(5.0)), Just(Some(10.0))]
}

/// An element that fits on an A4 page.
fn position_strategy() -> impl Strategy<Value = Position> {
    (
        MIN_ELEMENT_WIDTH..150.0f64,
        MIN_ELEMENT_HEIGHT..150.0f64,
    )
        .prop_flat_map(|(w, h)| {
            (0.0..=(210.0 - w), 0.0..=(297.0 - h))
                .prop_map(move |(x, y)| Position::new(x, y, w, h))
        })
}

fn deltas() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec((-400.0..400.0f64, -400.0..400.0f64), 1..12)
}

proptest! {
    #[test]
    fn pixel_roundtrip(mm in -1000.0..1000.0f64, zoom in zoom_strategy()) {
        let z = zoom.as_f64();
        let back = to_millimeters(to_pixels(mm, z), z);
        prop_assert!((back - mm).abs() < 1e-9);
    }

    #[test]
    fn drag_stays_on_page(origin in position_strategy(), moves in deltas(), snap in snap_strategy()) {
        let page = PageSize::a4();
        for (dx, dy) in moves {
            let pos = drag_position(origin, dx, dy, snap, page);
            prop_assert!(pos.x >= 0.0 && pos.x <= page.width - pos.width + EPS);
            prop_assert!(pos.y >= 0.0 && pos.y <= page.height - pos.height + EPS);
            prop_assert_eq!(pos.width, origin.width);
            prop_assert_eq!(pos.height, origin.height);
        }
    }

    #[test]
    fn south_east_resize_keeps_origin(origin in position_strategy(), moves in deltas(), snap in snap_strategy()) {
        for (dx, dy) in moves {
            let pos = resize_position(origin, Handle::Se, dx, dy, snap, PageSize::a4());
            prop_assert_eq!(pos.x, origin.x);
            prop_assert_eq!(pos.y, origin.y);
            prop_assert!(pos.width >= MIN_ELEMENT_WIDTH);
            prop_assert!(pos.height >= MIN_ELEMENT_HEIGHT);
        }
    }

    #[test]
    fn north_west_resize_keeps_far_corner(origin in position_strategy(), moves in deltas(), snap in snap_strategy()) {
        for (dx, dy) in moves {
            let pos = resize_position(origin, Handle::Nw, dx, dy, snap, PageSize::a4());
            prop_assert!((pos.right() - origin.right()).abs() < EPS);
            prop_assert!((pos.bottom() - origin.bottom()).abs() < EPS);
            prop_assert!(pos.x >= 0.0 && pos.y >= 0.0);
            prop_assert!(pos.width >= MIN_ELEMENT_WIDTH - EPS);
            prop_assert!(pos.height >= MIN_ELEMENT_HEIGHT - EPS);
        }
    }

    #[test]
    fn every_handle_respects_minimum(origin in position_strategy(), dx in -400.0..400.0f64, dy in -400.0..400.0f64) {
        for handle in Handle::ALL {
            let pos = resize_position(origin, handle, dx, dy, None, PageSize::a4());
            prop_assert!(pos.width >= MIN_ELEMENT_WIDTH - EPS);
            prop_assert!(pos.height >= MIN_ELEMENT_HEIGHT - EPS);
            prop_assert!(pos.x >= 0.0 && pos.y >= 0.0);
        }
    }

    #[test]
    fn resized_elements_stay_on_page(
        origin in position_strategy(),
        width in 0.0..1000.0f64,
        height in 0.0..1000.0f64,
    ) {
        let mut editor = Editor::default();
        let element = Element::with_position(ElementKind::Box, ElementId::from("b"), origin);
        editor.add_element(element);
        editor.update_element(&ElementId::from("b"), &ElementPatch::new().with_size(width, height));
        let pos = editor.current_page().element(&ElementId::from("b")).unwrap().position();
        prop_assert!(pos.x >= 0.0 && pos.right() <= 210.0 + EPS);
        prop_assert!(pos.y >= 0.0 && pos.bottom() <= 297.0 + EPS);
        prop_assert!(pos.width >= MIN_ELEMENT_WIDTH && pos.height >= MIN_ELEMENT_HEIGHT);
    }

    #[test]
    fn reordering_keeps_ids(count in 1usize..10, ops in prop::collection::vec((0u8..4, 0usize..12), 0..20)) {
        let mut page = Page::new();
        for i in 0..count {
            page.add_element(Element::with_position(
                ElementKind::Box,
                ElementId::from(format!("e{}", i)),
                Position::new(0.0, 0.0, 20.0, 20.0),
            ));
        }
        let mut expected: Vec<String> = page.elements.iter().map(|e| e.id().to_string()).collect();
        expected.sort();

        for (op, target) in ops {
            let id = ElementId::from(format!("e{}", target));
            match op {
                0 => layers::bring_to_front(&mut page, &id),
                1 => layers::send_to_back(&mut page, &id),
                2 => layers::bring_forward(&mut page, &id),
                _ => layers::send_backward(&mut page, &id),
            };
        }

        let mut actual: Vec<String> = page.elements.iter().map(|e| e.id().to_string()).collect();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn page_count_stays_in_bounds(ops in prop::collection::vec((any::<bool>(), 0usize..25), 0..60)) {
        let mut doc = Document::new();
        let mut session = SessionState::default();
        for (add, index) in ops {
            if add {
                pages::add_page(&mut doc);
            } else {
                pages::delete_page(&mut doc, &mut session, index);
            }
            prop_assert!(doc.page_count() >= 1 && doc.page_count() <= MAX_PAGES);
            prop_assert!(session.current_page < doc.page_count());
        }
    }
}

#[test]
fn add_page_twenty_five_times() {
    let mut doc = Document::new();
    for _ in 0..25 {
        pages::add_page(&mut doc);
    }
    assert_eq!(doc.page_count(), 20);
}

#[test]
fn delete_only_page_is_noop() {
    let mut doc = Document::new();
    let mut session = SessionState::default();
    assert!(!pages::delete_page(&mut doc, &mut session, 0));
    assert_eq!(doc.page_count(), 1);
}
