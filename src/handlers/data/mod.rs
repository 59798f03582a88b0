// handlers/data/mod.rs - tagged dynamic data endpoints (/api/v1/data/*)
pub mod collection;
pub mod record;
pub mod search;

pub use collection::{data_create, data_list};
pub use record::{data_delete, data_get, data_update};
pub use search::data_search;
