pub mod context;
pub mod store;
pub mod token;

pub use context::{EditorSession, SearchOutcome, SearchSession};
pub use store::{session_cookie, OpenedSession, SessionStore};
pub use token::token_from_cookie;
