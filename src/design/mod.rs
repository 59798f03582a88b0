pub mod color;
pub mod css;

pub use color::{palette, ColorError, Palette};
pub use css::render_css_variables;
