//! Serializable editor commands, used to replay recorded sessions.

use super::{EditOutcome, Editor, Point};
use crate::model::{
    BandKind, BandPatch, Element, ElementId, ElementKind, ElementPatch, Margins, TableEdit,
    VariableDefinition,
};
use serde::{Deserialize, Serialize};

/// One user action, as recorded by a UI layer.
///
/// Commands mirror the [`Editor`] methods. View-only commands (zoom, grid,
/// navigation, selection) report [`EditOutcome::Unchanged`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Create an element with default attributes
    AddElement {
        /// Element type
        kind: ElementKind,
        /// Left edge in mm
        x: f64,
        /// Top edge in mm
        y: f64,
    },
    /// Create a variable placeholder
    AddVariable {
        /// Catalog entry
        definition: VariableDefinition,
        /// Left edge in mm
        x: f64,
        /// Top edge in mm
        y: f64,
    },
    /// Merge a partial update into an element
    UpdateElement {
        /// Target element
        id: ElementId,
        /// Fields to change
        patch: ElementPatch,
    },
    /// Merge a partial update into the selected element
    UpdateSelected {
        /// Fields to change
        patch: ElementPatch,
    },
    /// Remove an element
    DeleteElement {
        /// Target element
        id: ElementId,
    },
    /// Remove the selected element
    DeleteSelected,
    /// Copy an element
    DuplicateElement {
        /// Source element
        id: ElementId,
    },
    /// Move to the top of the stack
    BringToFront {
        /// Target element
        id: ElementId,
    },
    /// Move to the bottom of the stack
    SendToBack {
        /// Target element
        id: ElementId,
    },
    /// Move one step up
    BringForward {
        /// Target element
        id: ElementId,
    },
    /// Move one step down
    SendBackward {
        /// Target element
        id: ElementId,
    },
    /// Move the selected element
    Nudge {
        /// Horizontal offset in mm
        dx: f64,
        /// Vertical offset in mm
        dy: f64,
    },
    /// Move the selected element by keyboard steps
    NudgeSteps {
        /// Horizontal steps
        dx: i32,
        /// Vertical steps
        dy: i32,
    },
    /// Change a table's grid
    EditTable {
        /// Target table
        id: ElementId,
        /// Row, column or cell change
        edit: TableEdit,
    },
    /// Change header or footer settings
    UpdateBand {
        /// Header or footer
        band: BandKind,
        /// Fields to change
        patch: BandPatch,
    },
    /// Create an element inside a band
    AddBandElement {
        /// Header or footer
        band: BandKind,
        /// Element type
        kind: ElementKind,
        /// Left edge in mm
        x: f64,
        /// Top edge in mm, relative to the band
        y: f64,
    },
    /// Remove an element from a band
    RemoveBandElement {
        /// Header or footer
        band: BandKind,
        /// Target element
        id: ElementId,
    },
    /// Append a page
    AddPage,
    /// Remove a page
    DeletePage {
        /// 0-based page index
        index: usize,
    },
    /// Copy a page
    DuplicatePage {
        /// 0-based page index
        index: usize,
    },
    /// Show a page
    GoToPage {
        /// 0-based page index
        index: usize,
    },
    /// Select an element on the current page
    Select {
        /// Target element
        id: ElementId,
    },
    /// Clear the selection
    ClearSelection,
    /// Pointer pressed at a canvas pixel position
    PointerDown {
        /// Horizontal pixel coordinate
        x: f64,
        /// Vertical pixel coordinate
        y: f64,
    },
    /// Pointer moved
    PointerMove {
        /// Horizontal pixel coordinate
        x: f64,
        /// Vertical pixel coordinate
        y: f64,
    },
    /// Pointer released
    PointerUp,
    /// Pointer left the canvas
    PointerLeave,
    /// Change the zoom percentage
    SetZoom {
        /// Zoom in percent
        percent: u16,
    },
    /// Toggle snapping
    ToggleSnap,
    /// Toggle grid visibility
    ToggleGrid,
    /// Change the grid spacing
    SetGridSpacing {
        /// Spacing in mm
        spacing: f64,
    },
    /// Set the current page's background
    SetBackground {
        /// Hex color
        color: String,
    },
    /// Replace the margins
    SetMargins {
        /// New margins in mm
        margins: Margins,
    },
    /// Rename the document
    Rename {
        /// New name
        name: String,
    },
}

impl Editor {
    /// Apply one recorded command.
    pub fn apply(&mut self, command: &EditorCommand) -> EditOutcome {
        use EditorCommand as C;

        match command {
            C::AddElement { kind, x, y } => self.add_element_of_kind(*kind, *x, *y),
            C::AddVariable { definition, x, y } => self.add_variable_element(definition, *x, *y),
            C::UpdateElement { id, patch } => self.update_element(id, patch),
            C::UpdateSelected { patch } => self.update_selected(patch),
            C::DeleteElement { id } => self.delete_element(id),
            C::DeleteSelected => self.delete_selected(),
            C::DuplicateElement { id } => self.duplicate_element(id),
            C::BringToFront { id } => self.bring_to_front(id),
            C::SendToBack { id } => self.send_to_back(id),
            C::BringForward { id } => self.bring_forward(id),
            C::SendBackward { id } => self.send_backward(id),
            C::Nudge { dx, dy } => self.nudge_selected(*dx, *dy),
            C::NudgeSteps { dx, dy } => self.nudge_selected_by_steps(*dx, *dy),
            C::EditTable { id, edit } => self.edit_table(id, edit),
            C::UpdateBand { band, patch } => self.update_band(*band, patch),
            C::AddBandElement { band, kind, x, y } => {
                self.add_band_element(*band, Element::new(*kind, *x, *y))
            }
            C::RemoveBandElement { band, id } => self.remove_band_element(*band, id),
            C::AddPage => self.add_page(),
            C::DeletePage { index } => self.delete_page(*index),
            C::DuplicatePage { index } => self.duplicate_page(*index),
            C::SetBackground { color } => self.set_background(color),
            C::SetMargins { margins } => self.set_margins(*margins),
            C::Rename { name } => self.rename(name),
            C::PointerMove { x, y } => self.pointer_move(Point::new(*x, *y)),
            C::PointerDown { x, y } => {
                self.pointer_down(Point::new(*x, *y));
                EditOutcome::Unchanged
            }
            C::PointerUp => {
                self.pointer_up();
                EditOutcome::Unchanged
            }
            C::PointerLeave => {
                self.pointer_leave();
                EditOutcome::Unchanged
            }
            C::GoToPage { index } => {
                self.go_to_page(*index);
                EditOutcome::Unchanged
            }
            C::Select { id } => {
                self.select(id);
                EditOutcome::Unchanged
            }
            C::ClearSelection => {
                self.clear_selection();
                EditOutcome::Unchanged
            }
            C::SetZoom { percent } => {
                self.set_zoom(*percent);
                EditOutcome::Unchanged
            }
            C::ToggleSnap => {
                self.toggle_snap();
                EditOutcome::Unchanged
            }
            C::ToggleGrid => {
                self.toggle_grid();
                EditOutcome::Unchanged
            }
            C::SetGridSpacing { spacing } => {
                self.set_grid_spacing(*spacing);
                EditOutcome::Unchanged
            }
        }
    }

    /// Apply a sequence of commands, collecting the outcome of each.
    pub fn apply_all<'a, I>(&mut self, commands: I) -> Vec<EditOutcome>
    where
        I: IntoIterator<Item = &'a EditorCommand>,
    {
        commands.into_iter().map(|c| self.apply(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::RefusalReason;
    use crate::options::EditorOptions;

    #[test]
    fn test_parse_script() {
        let script = r#"[
            {"command": "add_element", "kind": "qrcode", "x": 10, "y": 10},
            {"command": "nudge", "dx": 1.5, "dy": 0},
            {"command": "add_page"},
            {"command": "set_zoom", "percent": 150}
        ]"#;
        let commands: Vec<EditorCommand> = serde_json::from_str(script).unwrap();
        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands[0],
            EditorCommand::AddElement {
                kind: ElementKind::QrCode,
                x: 10.0,
                y: 10.0
            }
        );
    }

    #[test]
    fn test_apply_script() {
        let mut editor = Editor::new(EditorOptions::new());
        let commands = vec![
            EditorCommand::AddElement {
                kind: ElementKind::Box,
                x: 20.0,
                y: 20.0,
            },
            EditorCommand::Nudge { dx: 2.0, dy: 3.0 },
            EditorCommand::UpdateSelected {
                patch: ElementPatch::new().with_size(30.0, 30.0),
            },
            EditorCommand::SetZoom { percent: 50 },
        ];
        let outcomes = editor.apply_all(&commands);
        assert_eq!(
            outcomes,
            vec![
                EditOutcome::Applied,
                EditOutcome::Applied,
                EditOutcome::Applied,
                EditOutcome::Unchanged
            ]
        );
        let pos = editor.selected_element().unwrap().position();
        assert_eq!((pos.x, pos.y, pos.width, pos.height), (22.0, 23.0, 30.0, 30.0));
        assert_eq!(editor.session().zoom.percent(), 50);
    }

    #[test]
    fn test_band_and_table_commands() {
        let script = r#"[
            {"command": "update_band", "band": "footer", "patch": {"enabled": true, "show_date": true}},
            {"command": "add_band_element", "band": "header", "kind": "text", "x": 10, "y": 40},
            {"command": "add_element", "kind": "table", "x": 10, "y": 10},
            {"command": "nudge_steps", "dx": 3, "dy": 0},
            {"command": "pointer_leave"}
        ]"#;
        let commands: Vec<EditorCommand> = serde_json::from_str(script).unwrap();
        let mut editor = Editor::new(EditorOptions::new());
        let outcomes = editor.apply_all(&commands);
        assert_eq!(outcomes[..4], [EditOutcome::Applied; 4]);
        assert_eq!(outcomes[4], EditOutcome::Unchanged);

        let doc = editor.document();
        assert!(doc.footer.enabled && doc.footer.show_date);
        let banded = doc.header.elements[0].position();
        assert!(banded.bottom() <= doc.header.height + 1e-9);

        let id = editor.selected_element().unwrap().id().clone();
        assert_eq!(editor.selected_element().unwrap().position().x, 13.0);
        let edit: EditorCommand = serde_json::from_str(&format!(
            r#"{{"command": "edit_table", "id": "{}", "edit": {{"op": "add_row"}}}}"#,
            id
        ))
        .unwrap();
        assert_eq!(editor.apply(&edit), EditOutcome::Applied);
        match editor.selected_element().unwrap() {
            Element::Table(table) => assert_eq!(table.row_count(), 3),
            other => panic!("expected table, got {:?}", other.kind()),
        }
    }

    #[test]
    fn test_selected_commands_refused_when_read_only() {
        let mut editor = Editor::new(EditorOptions::new().read_only());
        let refused = EditOutcome::Refused(RefusalReason::ReadOnly);
        let patch = ElementPatch::new().with_size(30.0, 30.0);
        assert_eq!(editor.apply(&EditorCommand::UpdateSelected { patch }), refused);
        assert_eq!(editor.apply(&EditorCommand::DeleteSelected), refused);
        assert_eq!(
            editor.apply(&EditorCommand::UpdateBand {
                band: BandKind::Header,
                patch: BandPatch {
                    enabled: Some(true),
                    ..Default::default()
                },
            }),
            refused
        );
        assert!(!editor.document().header.enabled);
    }
}
