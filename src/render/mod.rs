pub mod markdown;

pub use markdown::{render_document, render_personas, render_view};
