mod error;
mod session;

pub use error::SessionError;
pub use session::{
    Clock, FileSessionStore, MemorySessionStore, SessionManager, SessionRecord, SessionStore,
    SystemClock,
};
