//! RFC 1035 wire-format codec: header bit-fields, label-encoded domain
//! names, question and resource-record sections, and the RDATA variants
//! this proxy understands. All multi-byte integers are network byte order.
pub mod errors;
pub mod message;
pub mod name;
pub mod question;
pub mod record;
pub mod types;
pub mod wire;

pub use errors::ProtoError;
pub use message::DnsMessage;
pub use question::Question;
pub use record::{RData, ResourceRecord};
pub use types::{Opcode, RecordClass, RecordType, ResponseCode};
