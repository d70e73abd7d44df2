#![allow(unused_crate_dependencies)]

#[path = "integration/common/mod.rs"]
mod common;

#[path = "integration/view_keys.rs"]
mod view_keys;

#[path = "integration/view_hover.rs"]
mod view_hover;

#[path = "integration/view_completion.rs"]
mod view_completion;
