// handlers/design/mod.rs - design system endpoints (/api/v1/design/*)
pub mod collection;
pub mod color_scheme;
pub mod record;
pub mod theme;

pub use collection::{design_create, design_list};
pub use color_scheme::{color_scheme_get, color_scheme_put};
pub use record::{
    design_activate, design_active, design_delete, design_get, design_get_by_name, design_update,
};
pub use theme::{design_css, design_palette};
