mod contact;
mod message_status;

pub use contact::{ContactMessage, ContactSubmission};
pub use message_status::MessageStatus;
