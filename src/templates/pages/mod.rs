pub mod editor;
pub mod search;

pub use editor::editor_page;
pub use search::search_page;
