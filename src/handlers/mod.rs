// handlers/mod.rs - HTTP handlers grouped by resource
//
// Every handler receives `AppState` through the `Extension` layer and
// returns `ApiResult`, so store failures and validation errors share one
// error envelope.
pub mod contact;
pub mod data;
pub mod design;
pub mod experiences;
pub mod portfolio;
pub mod profile;
pub mod projects;
pub mod root;
