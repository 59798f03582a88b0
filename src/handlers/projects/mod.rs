pub mod collection;
pub mod record;

pub use collection::{project_create, projects_list};
pub use record::{project_delete, project_get, project_update};
