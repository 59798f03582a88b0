pub mod collection;
pub mod record;

pub use collection::{experience_create, experiences_list};
pub use record::{experience_delete, experience_get, experience_update};
