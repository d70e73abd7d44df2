#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Interaction core of a source editor.
//!
//! Decides what happens on every keystroke, pointer movement, and buffer edit,
//! independent of how text is rendered.
//!
//! * [`view::SourceView`]: Wires raw input events to the components below
//! * [`indent::IndentationEngine`]: Selection-aware indent and unindent
//! * [`template::TemplateExpander`]: Shortcut expansion with caret placement
//! * [`hover::HoverScheduler`]: Debounced, single-flight hover tooltips
//! * [`resolve::LanguageItemResolver`]: Expression under a position to a symbol
//! * [`completion::CompletionContextTracker`]: Context-change relay for completion
//! * [`actions`]: The built-in Tab, Shift+Tab, Enter, and Ctrl+Y actions

pub mod actions;
pub mod completion;
pub mod config;
pub mod editor;
pub mod file;
pub mod hover;
pub mod indent;
pub mod layout;
pub mod resolve;
pub mod template;
pub mod view;
pub mod widget;

pub use completion::{CompletionContext, CompletionContextTracker, CompletionWidget, ContextChange, SubscriptionId};
pub use config::{ConfigError, EditorOptions, IndentOptions, IndentStyle};
pub use editor::EditorCore;
pub use file::FileId;
pub use hover::{HoverHost, HoverScheduler, TooltipState};
pub use indent::{DefaultFormattingStrategy, FormattingStrategy, IndentationEngine};
pub use layout::{MonospaceLayout, ViewLayout};
pub use resolve::{ExpressionFinder, IdentifierQuery, LanguageItemResolver, ParserContext, SymbolService};
pub use template::{CodeTemplate, TemplateExpander, TemplateGroup, TemplateStore, TomlTemplateStore};
pub use view::{SourceView, TooltipPresenter};
pub use widget::{PlainTextWidget, WidgetKeyHandler};
