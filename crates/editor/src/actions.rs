//! Built-in edit actions.

use quill_input::{ActionError, ActionTable, EditAction};
use quill_primitives::{Key, KeyCode};
use tracing::trace;

use crate::editor::EditorCore;

/// Tab: expand a template, else indent the selected lines, else insert one
/// indent unit at the caret.
#[derive(Debug, Clone, Copy, Default)]
pub struct TabAction;

impl EditAction<EditorCore> for TabAction {
	fn name(&self) -> &str {
		"indent_or_expand"
	}

	fn execute(&self, ctx: &mut EditorCore) -> Result<(), ActionError> {
		if ctx.try_expand_template() {
			return Ok(());
		}
		if ctx.indentation().indent_selection(false, true) {
			return Ok(());
		}
		let unit = ctx.options().indent().unit();
		ctx.doc_mut().atomic(|doc| {
			if let Some((start, end)) = doc.selection_bounds() {
				doc.delete(start, end)?;
			}
			doc.insert_at_cursor(&unit)
		})?;
		Ok(())
	}
}

/// Shift+Tab: unindent the selected lines or the caret line.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnindentAction;

impl EditAction<EditorCore> for UnindentAction {
	fn name(&self) -> &str {
		"unindent"
	}

	fn execute(&self, ctx: &mut EditorCore) -> Result<(), ActionError> {
		if !ctx.indentation().indent_selection(true, false) {
			trace!("Unindent left some lines untouched");
		}
		Ok(())
	}
}

/// Enter: break the line and indent the new one per the indent style.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewlineAction;

impl EditAction<EditorCore> for NewlineAction {
	fn name(&self) -> &str {
		"newline_and_indent"
	}

	fn execute(&self, ctx: &mut EditorCore) -> Result<(), ActionError> {
		ctx.doc_mut().begin_atomic();
		let result = insert_newline_and_indent(ctx);
		ctx.doc_mut().end_atomic()?;
		result
	}
}

fn insert_newline_and_indent(ctx: &mut EditorCore) -> Result<(), ActionError> {
	let doc = ctx.doc_mut();
	if let Some((start, end)) = doc.selection_bounds() {
		doc.delete(start, end)?;
	}
	doc.insert_at_cursor("\n")?;
	let line = doc.cursor_position().line;
	ctx.format_line(line)?;
	Ok(())
}

/// Ctrl+Y: delete the caret line.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeleteLineAction;

impl EditAction<EditorCore> for DeleteLineAction {
	fn name(&self) -> &str {
		"delete_line"
	}

	fn execute(&self, ctx: &mut EditorCore) -> Result<(), ActionError> {
		let line = ctx.doc().cursor_position().line;
		ctx.indentation().delete_line(line)?;
		Ok(())
	}
}

/// Binds the built-in actions, replacing whatever those keys held.
pub fn install_default_actions(table: &mut ActionTable<EditorCore>) {
	table.rebind(Key::new(KeyCode::Tab), TabAction);
	table.rebind(Key::new(KeyCode::Tab).shift(), UnindentAction);
	table.rebind(Key::new(KeyCode::Enter), NewlineAction);
	table.rebind(Key::char('y').ctrl(), DeleteLineAction);
}

/// Returns a table holding only the built-in actions.
pub fn default_action_table() -> ActionTable<EditorCore> {
	let mut table = ActionTable::new();
	install_default_actions(&mut table);
	table
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use quill_input::KeyTarget;
	use quill_primitives::Document;

	use super::*;
	use crate::config::{EditorOptions, IndentStyle};
	use crate::file::FileId;
	use crate::template::{CodeTemplate, TemplateGroup, TomlTemplateStore};

	fn editor_with(text: &str, caret: usize) -> EditorCore {
		let mut doc = Document::from(text);
		doc.place_cursor(caret).unwrap();
		let templates = TomlTemplateStore::new(vec![TemplateGroup {
			extensions: vec!["cs".into()],
			templates: vec![CodeTemplate::new("if", "if (|) {\n\t\n}")],
		}]);
		EditorCore::new(doc, FileId::new("Main.cs"), EditorOptions::default()).with_templates(templates)
	}

	fn press(core: &mut EditorCore, key: Key) -> bool {
		default_action_table().dispatch(core, key).consumed()
	}

	#[test]
	fn tab_prefers_template_expansion() {
		let mut core = editor_with("  if", 4);
		assert!(press(&mut core, Key::new(KeyCode::Tab)));
		assert_eq!(core.doc().to_string(), "  if () {\n  \t\n  }");
		assert_eq!(core.doc().cursor(), 6);
	}

	#[test]
	fn tab_indents_multi_line_selection() {
		let mut core = editor_with("a\nb\n", 0);
		core.doc_mut().select_range(0, 3).unwrap();
		press(&mut core, Key::new(KeyCode::Tab));
		assert_eq!(core.doc().to_string(), "\ta\n\tb\n");
	}

	#[test]
	fn tab_falls_back_to_indent_unit() {
		let mut core = editor_with("ab", 1);
		core.set_options(EditorOptions {
			insert_spaces: true,
			tab_width: 2,
			..EditorOptions::default()
		});
		press(&mut core, Key::new(KeyCode::Tab));
		assert_eq!(core.doc().to_string(), "a  b");
		assert_eq!(core.doc().cursor(), 3);
	}

	#[test]
	fn shift_tab_unindents_caret_line() {
		let mut core = editor_with("\tx\n\ty", 4);
		press(&mut core, Key::new(KeyCode::Tab).shift());
		assert_eq!(core.doc().to_string(), "\tx\ny");
	}

	#[test]
	fn enter_indents_per_style() {
		let mut core = editor_with("\tif (a) {", 9);
		press(&mut core, Key::new(KeyCode::Enter));
		assert_eq!(core.doc().to_string(), "\tif (a) {\n\t\t");
		assert_eq!(core.doc().cursor(), 12);
		assert!(core.doc_mut().undo());
		assert_eq!(core.doc().to_string(), "\tif (a) {", "newline and indent undo together");

		core.set_options(EditorOptions {
			indent_style: IndentStyle::None,
			..EditorOptions::default()
		});
		press(&mut core, Key::new(KeyCode::Enter));
		assert_eq!(core.doc().to_string(), "\tif (a) {\n");
	}

	#[test]
	fn ctrl_y_deletes_caret_line() {
		let mut core = editor_with("one\ntwo\nthree", 5);
		press(&mut core, Key::char('y').ctrl());
		assert_eq!(core.doc().to_string(), "one\nthree");
	}

	#[test]
	fn unbound_keys_reach_the_widget() {
		let mut core = editor_with("", 0);
		assert!(press(&mut core, Key::char('q')));
		assert!(core.forward_to_widget(Key::char('!')));
		assert_eq!(core.doc().to_string(), "q!");
	}

	#[test]
	fn install_replaces_existing_bindings() {
		let mut table = ActionTable::new();
		table
			.bind(Key::new(KeyCode::Enter), quill_input::FnAction::new("custom", |_: &mut EditorCore| Ok(())))
			.unwrap();
		install_default_actions(&mut table);
		assert_eq!(table.get(Key::new(KeyCode::Enter)).map(|a| a.name()), Some("newline_and_indent"));
		assert_eq!(table.len(), 4);
	}
}
