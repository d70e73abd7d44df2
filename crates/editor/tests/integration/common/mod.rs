//! Common fixtures for source view integration tests.

use std::cell::RefCell;
use std::rc::Rc;

use quill_editor::{
	EditorCore, EditorOptions, FileId, IdentifierQuery, MonospaceLayout, ParserContext, SourceView, SymbolService, TomlTemplateStore,
	TooltipPresenter,
};
use quill_primitives::{Document, ScreenPoint};

/// Cell width of the test layout.
pub const CW: i32 = 8;
/// Line height of the test layout.
pub const LH: i32 = 16;

/// A resolved symbol: the first char of the hovered expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol(pub char);

/// Resolves any non-empty expression to [`Symbol`] of its first char.
#[derive(Default)]
pub struct FirstCharContext {
	pub queries: RefCell<Vec<String>>,
}

impl ParserContext for FirstCharContext {
	type Item = Symbol;

	fn resolve_identifier(&self, query: &IdentifierQuery<'_>) -> Option<Symbol> {
		self.queries.borrow_mut().push(query.expression.to_string());
		query.expression.chars().next().filter(|c| c.is_alphabetic()).map(Symbol)
	}
}

/// Symbol service that may not have parsed the file yet.
#[derive(Default)]
pub struct Symbols {
	pub context: Option<FirstCharContext>,
}

impl Symbols {
	pub fn parsed() -> Self {
		Self {
			context: Some(FirstCharContext::default()),
		}
	}
}

impl SymbolService for Symbols {
	type Item = Symbol;

	fn parser_context(&self, _file: &FileId) -> Option<&dyn ParserContext<Item = Symbol>> {
		self.context.as_ref().map(|c| c as &dyn ParserContext<Item = Symbol>)
	}
}

/// What the presenter was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Popup {
	Show(Symbol, ScreenPoint),
	Destroy,
}

/// Records presenter calls into a shared log.
#[derive(Clone, Default)]
pub struct Presenter {
	pub log: Rc<RefCell<Vec<Popup>>>,
}

impl Presenter {
	/// Number of tooltips currently on screen.
	pub fn visible(&self) -> usize {
		let log = self.log.borrow();
		let shown = log.iter().filter(|c| matches!(c, Popup::Show(..))).count();
		shown - (log.len() - shown)
	}

	pub fn shows(&self) -> Vec<Symbol> {
		self.log
			.borrow()
			.iter()
			.filter_map(|c| match c {
				Popup::Show(symbol, _) => Some(symbol.clone()),
				Popup::Destroy => None,
			})
			.collect()
	}
}

impl TooltipPresenter<Symbol> for Presenter {
	fn show(&mut self, item: &Symbol, anchor: ScreenPoint) {
		self.log.borrow_mut().push(Popup::Show(item.clone(), anchor));
	}

	fn destroy(&mut self) {
		self.log.borrow_mut().push(Popup::Destroy);
	}
}

pub const TEMPLATES: &str = r#"
[[group]]
extensions = ["cs"]

[[group.template]]
shortcut = "if"
text = "if (|) {\n\t\n}"
"#;

/// Builds a view over `text` for `Main.cs`, caret at 0.
pub fn view(text: &str) -> (SourceView<Symbols>, Presenter) {
	view_with(text, Symbols::parsed(), EditorOptions::default())
}

pub fn view_with(text: &str, symbols: Symbols, options: EditorOptions) -> (SourceView<Symbols>, Presenter) {
	let _ = tracing_subscriber::fmt::try_init();
	let templates = TomlTemplateStore::from_toml_str(TEMPLATES).expect("templates parse");
	let core = EditorCore::new(Document::from(text), FileId::new("Main.cs"), options).with_templates(templates);
	let presenter = Presenter::default();
	let layout = MonospaceLayout {
		char_width: CW as u32,
		line_height: LH as u32,
		..MonospaceLayout::default()
	};
	(SourceView::new(core, symbols, layout, presenter.clone()), presenter)
}

/// Screen point at the middle of the cell at `(line, column)`; tab-free text only.
pub fn cell(line: i32, column: i32) -> ScreenPoint {
	ScreenPoint::new(column * CW + CW / 2, line * LH + LH / 2)
}
