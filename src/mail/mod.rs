pub use inbox::inbox_view;
pub use message::Message;
pub use store::MessageStore;
pub use thread::{reconstruct, Thread, ThreadEntry};

mod inbox;
mod message;
mod store;
mod thread;
