//! Message tree builder: maps decoded nodes onto typed SML messages.

pub mod body;
pub mod file;
pub mod list_response;
pub(crate) mod schema;
pub mod sml_message;
pub mod time;

pub use body::{CloseResponse, MessageBody, MessageTag, OpenResponse};
pub use file::{build_file, RejectedMessage, SmlFile};
pub use list_response::{GetListResponse, ListEntry, SmlValue};
pub use sml_message::SmlMessage;
pub use time::SmlTime;
