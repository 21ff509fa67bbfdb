mod i18n;
mod model;

pub use i18n::{tr, Lang, Text};
pub use model::*;
