pub mod api;
pub mod http;
pub mod wire;

pub use api::KanbanApi;
pub use http::HttpKanbanApi;
pub use wire::*;
