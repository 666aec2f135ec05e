//! Small helpers shared across layers.

pub mod i18n;
pub mod parse;
