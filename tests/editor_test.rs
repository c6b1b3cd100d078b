//! Integration tests for editing sessions.

use pagecraft::editor::{Handle, InteractionState, Point, PointerTarget};
use pagecraft::model::{ElementPatch, TextStylePatch, MAX_PAGES};
use pagecraft::{
    EditOutcome, Editor, EditorOptions, Element, ElementId, ElementKind, Position, RefusalReason,
    VariableCatalog, VariableDefinition, Zoom,
};

fn px(zoom: Zoom, mm: f64) -> f64 {
    zoom.to_pixels(mm)
}

fn position_of(editor: &Editor, id: &ElementId) -> Position {
    editor.current_page().element(id).unwrap().position()
}

fn text_at_10_10(editor: &mut Editor) -> ElementId {
    let element = Element::text("Tenant", Position::new(10.0, 10.0, 50.0, 20.0));
    let id = element.id().clone();
    assert_eq!(editor.add_element(element), EditOutcome::Applied);
    id
}

#[test]
fn test_snapped_drag_then_east_resize() {
    let mut editor = Editor::new(EditorOptions::new().with_snap(true).with_grid_spacing(5.0));
    let id = text_at_10_10(&mut editor);
    let zoom = editor.session().zoom;

    let start = Point::new(px(zoom, 20.0), px(zoom, 20.0));
    assert!(editor.pointer_down_on(PointerTarget::Element(id.clone()), start));
    editor.pointer_move(Point::new(start.x + px(zoom, 5.0), start.y + px(zoom, 5.0)));
    editor.pointer_up();
    assert_eq!(position_of(&editor, &id), Position::new(15.0, 15.0, 50.0, 20.0));

    editor.toggle_snap();
    assert!(editor.pointer_down_on(PointerTarget::Handle(Handle::E), Point::default()));
    editor.pointer_move(Point::new(px(zoom, 12.0), 0.0));
    editor.pointer_leave();

    let pos = position_of(&editor, &id);
    assert!((pos.width - 62.0).abs() < 1e-9);
    assert_eq!(pos.x, 15.0);
    assert!(editor.interaction().is_idle());
}

#[test]
fn test_drag_at_half_zoom() {
    let mut editor = Editor::new(EditorOptions::new().with_zoom(50));
    let id = text_at_10_10(&mut editor);

    editor.pointer_down_on(PointerTarget::Element(id.clone()), Point::default());
    // 10 mm at 50% zoom
    editor.pointer_move(Point::new(Zoom::new(50).to_pixels(10.0), 0.0));
    editor.pointer_up();

    assert!((position_of(&editor, &id).x - 20.0).abs() < 1e-9);
}

#[test]
fn test_resize_through_hit_tested_handle() {
    let mut editor = Editor::default();
    let id = text_at_10_10(&mut editor);
    let zoom = editor.session().zoom;

    // south-west grip of the selected element sits at (10, 30) mm
    let grip = Point::new(px(zoom, 10.0), px(zoom, 30.0));
    assert!(editor.pointer_down(grip));
    assert!(matches!(
        editor.interaction(),
        InteractionState::Resizing {
            handle: Handle::Sw,
            ..
        }
    ));
    editor.pointer_move(Point::new(grip.x - px(zoom, 5.0), grip.y + px(zoom, 10.0)));
    editor.pointer_up();

    let pos = position_of(&editor, &id);
    assert!((pos.x - 5.0).abs() < 1e-9);
    assert!((pos.right() - 60.0).abs() < 1e-9);
    assert!((pos.height - 30.0).abs() < 1e-9);
    assert_eq!(pos.y, 10.0);
}

#[test]
fn test_background_click_clears_selection() {
    let mut editor = Editor::default();
    text_at_10_10(&mut editor);
    let zoom = editor.session().zoom;

    assert!(!editor.pointer_down(Point::new(px(zoom, 150.0), px(zoom, 200.0))));
    assert!(editor.session().selected.is_none());
}

#[test]
fn test_delete_during_drag_is_harmless() {
    let mut editor = Editor::default();
    let id = text_at_10_10(&mut editor);

    editor.pointer_down_on(PointerTarget::Element(id.clone()), Point::default());
    assert_eq!(editor.delete_element(&id), EditOutcome::Applied);
    assert_eq!(editor.pointer_move(Point::new(40.0, 40.0)), EditOutcome::Unchanged);
    assert!(editor.pointer_up());
    assert!(editor.interaction().is_idle());
    assert!(editor.current_page().is_empty());
}

#[test]
fn test_every_kind_can_be_added() {
    let mut editor = Editor::default();
    for (i, kind) in ElementKind::ALL.into_iter().enumerate() {
        let outcome = editor.add_element_of_kind(kind, 5.0, 5.0 + i as f64 * 20.0);
        assert_eq!(outcome, EditOutcome::Applied);
        assert_eq!(editor.selected_element().unwrap().kind(), kind);
    }
    assert_eq!(editor.current_page().element_count(), ElementKind::ALL.len());
    assert!(editor.document().validate().is_ok());
}

#[test]
fn test_new_table_is_two_by_two_with_header() {
    let mut editor = Editor::default();
    editor.add_element_of_kind(ElementKind::Table, 10.0, 10.0);
    match editor.selected_element().unwrap() {
        Element::Table(table) => {
            assert_eq!(table.rows, vec![vec![String::new(); 2]; 2]);
            assert!(table.header_row);
        }
        other => panic!("expected table, got {:?}", other.kind()),
    }
}

#[test]
fn test_variable_from_catalog() {
    let catalog: VariableCatalog = vec![
        VariableDefinition::new("tenant_name", "Tenant", "Parties", "Jane Doe"),
        VariableDefinition::new("rent", "Monthly rent", "Terms", "1200"),
    ]
    .into_iter()
    .collect();

    let mut editor = Editor::default();
    let rent = catalog.get("rent").unwrap();
    assert!(editor.add_variable_element(rent, 20.0, 40.0).is_applied());
    match editor.selected_element().unwrap() {
        Element::Variable(v) => {
            assert_eq!(v.key, "rent");
            assert_eq!(v.label, "Monthly rent");
            assert_eq!(v.placeholder(), "{{rent}}");
        }
        other => panic!("expected variable, got {:?}", other.kind()),
    }
}

#[test]
fn test_update_keeps_identity_and_tag() {
    let mut editor = Editor::default();
    let id = text_at_10_10(&mut editor);
    let patch = ElementPatch::new()
        .with_style(TextStylePatch {
            font_size: Some(18.0),
            ..Default::default()
        })
        .with_label("ignored for text");

    assert!(editor.update_element(&id, &patch).is_applied());
    let element = editor.current_page().element(&id).unwrap();
    assert_eq!(element.kind(), ElementKind::Text);
    assert_eq!(element.text_style().unwrap().font_size, 18.0);
    assert_eq!(element.plain_text().as_deref(), Some("Tenant"));
}

#[test]
fn test_z_order_operations() {
    let mut editor = Editor::default();
    let a = text_at_10_10(&mut editor);
    editor.add_element_of_kind(ElementKind::Box, 0.0, 0.0);
    editor.add_element_of_kind(ElementKind::Line, 0.0, 0.0);
    let ids = |editor: &Editor| -> Vec<ElementId> {
        editor
            .current_page()
            .elements
            .iter()
            .map(|e| e.id().clone())
            .collect()
    };

    assert!(editor.bring_to_front(&a).is_applied());
    assert_eq!(ids(&editor).last(), Some(&a));
    assert_eq!(editor.bring_to_front(&a), EditOutcome::Unchanged);
    assert!(editor.send_to_back(&a).is_applied());
    assert_eq!(ids(&editor).first(), Some(&a));
    assert!(editor.bring_forward(&a).is_applied());
    assert_eq!(ids(&editor)[1], a);
}

#[test]
fn test_pages_lifecycle() {
    let mut editor = Editor::default();
    for _ in 0..25 {
        editor.add_page();
    }
    assert_eq!(editor.document().page_count(), MAX_PAGES);
    assert_eq!(editor.current_page_index(), MAX_PAGES - 1);

    editor.go_to_page(1000);
    assert_eq!(editor.current_page_index(), MAX_PAGES - 1);

    for _ in 0..MAX_PAGES {
        editor.delete_page(0);
    }
    assert_eq!(editor.document().page_count(), 1);
    assert_eq!(editor.current_page_index(), 0);
}

#[test]
fn test_duplicate_page_copies_elements() {
    let mut editor = Editor::default();
    text_at_10_10(&mut editor);
    assert!(editor.duplicate_page(0).is_applied());
    editor.next_page();
    assert_eq!(editor.current_page().element_count(), 1);
    assert!(editor.document().validate().is_ok());
}

#[test]
fn test_read_only_session() {
    let mut seed = Editor::default();
    let id = text_at_10_10(&mut seed);
    seed.add_page();
    let doc = seed.into_document();
    let before = serde_json::to_vec(&doc).unwrap();

    let mut editor = Editor::open(doc, EditorOptions::new().read_only());
    let refused = EditOutcome::Refused(RefusalReason::ReadOnly);

    assert!(!editor.pointer_down_on(PointerTarget::Element(id.clone()), Point::default()));
    assert_eq!(editor.pointer_move(Point::new(100.0, 100.0)), EditOutcome::Unchanged);
    editor.pointer_up();
    assert!(!editor.pointer_down_on(PointerTarget::Handle(Handle::Se), Point::default()));
    assert_eq!(editor.add_element_of_kind(ElementKind::Box, 0.0, 0.0), refused);
    assert_eq!(editor.delete_element(&id), refused);
    assert_eq!(editor.duplicate_element(&id), refused);
    assert_eq!(editor.nudge_selected(1.0, 1.0), refused);
    assert_eq!(editor.send_to_back(&id), refused);
    assert_eq!(editor.add_page(), refused);
    assert_eq!(editor.delete_page(1), refused);
    assert_eq!(editor.duplicate_page(0), refused);

    editor.next_page();
    assert_eq!(editor.current_page_index(), 1);
    editor.zoom_out();
    editor.toggle_grid();

    assert_eq!(serde_json::to_vec(editor.document()).unwrap(), before);
    assert!(!editor.is_dirty());
}

#[test]
fn test_dirty_flag_and_save() {
    let mut editor = Editor::default();
    assert!(!editor.is_dirty());
    let id = text_at_10_10(&mut editor);
    assert!(editor.is_dirty());
    editor.mark_saved();

    editor.select(&id);
    editor.set_zoom(175);
    assert!(!editor.is_dirty());

    editor.nudge_selected(0.0, 1.0);
    assert!(editor.is_dirty());
}
