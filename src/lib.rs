//! dnswire - a minimal DNS wire format codec (RFC 1035).
//!
//! Serializes host/query-type pairs into request packets and parses
//! response buffers into structured elements without copying, including
//! decompression of pointer-compressed domain names. Transport is out of
//! scope: external collaborators hand the codec a byte buffer and receive
//! back either a byte count or parsed elements.

pub mod dump;
pub mod error;
pub mod header;
mod name;
pub mod request;
pub mod response;
pub mod types;

pub use dump::dump_packet;
pub use error::{Result, WireError};
pub use header::{Header, ResponseCode, HEADER_SIZE};
pub use name::{MAX_HOSTNAME_LEN, MAX_LABEL_LEN};
pub use request::{write_request, Query};
pub use response::{Element, NameRef, RecordInfo, ResponseParser, RR_HEADER_SIZE};
pub use types::{QueryTypes, RecordType, CLASS_IN};
