//! DNS request serialization.
//!
//! [`write_request`] turns a list of host/type queries into a wire-format
//! request in a caller-supplied buffer. Every write is bounds-checked; the
//! function either fits the whole request or fails with
//! [`WireError::BufferTooSmall`] without partial-output guarantees.

use crate::error::{Result, WireError};
use crate::header::{Header, HEADER_SIZE};
use crate::name::encode_host;
use crate::types::{QueryTypes, RecordType, CLASS_IN};
use tracing::debug;

/// Compression pointer flag bits of a 16-bit name field.
const POINTER_FLAG: u16 = 0xC000;
/// Largest message offset a 14-bit compression pointer can target.
const MAX_POINTER_OFFSET: usize = 0x3FFF;

/// Question types the writer emits, in priority order. Requests for any
/// other type bit are skipped, a documented limitation of the writer rather than
/// of the parser.
const WRITE_ORDER: [(QueryTypes, RecordType); 4] = [
    (QueryTypes::A, RecordType::A),
    (QueryTypes::TXT, RecordType::TXT),
    (QueryTypes::MX, RecordType::MX),
    (QueryTypes::NS, RecordType::NS),
];

/// One query: a hostname and the record types requested for it.
#[derive(Debug, Clone, Copy)]
pub struct Query<'a> {
    /// ASCII hostname, labels separated by `.`
    pub host: &'a str,
    /// Requested record types; see [`QueryTypes`] for which bits are honored
    pub types: QueryTypes,
}

/// Serialize a request with the given transaction id into `out`.
///
/// The header carries the id, the recursion-desired flag and the final
/// question count; everything else is zero. Each host's label sequence is
/// written once; additional questions for the same host use a compression
/// pointer back to it. Returns the number of bytes written.
pub fn write_request(id: u16, queries: &[Query<'_>], out: &mut [u8]) -> Result<usize> {
    if out.len() < HEADER_SIZE {
        return Err(WireError::BufferTooSmall(HEADER_SIZE));
    }
    // Unused trailing bytes must never carry stale data
    out.fill(0);

    Header::request(id).encode(out)?;
    let mut cursor = HEADER_SIZE;
    let mut questions: u16 = 0;

    let supported = QueryTypes::A | QueryTypes::TXT | QueryTypes::MX | QueryTypes::NS;

    for query in queries {
        let anchor = cursor;
        cursor += encode_host(query.host, out, cursor)?;

        let unsupported = query.types.bits() & !supported.bits();
        if unsupported != 0 {
            debug!(host = %query.host, bits = unsupported, "query type bits not emitted");
        }

        let mut inline_name = true;
        for (bit, rtype) in WRITE_ORDER {
            if !query.types.contains(bit) {
                continue;
            }

            if inline_name {
                // First question for this host reuses the label sequence
                // written above
                inline_name = false;
            } else {
                if anchor > MAX_POINTER_OFFSET {
                    return Err(WireError::InvalidPointer(anchor));
                }
                put_u16(out, cursor, POINTER_FLAG | anchor as u16)?;
                cursor += 2;
            }

            put_u16(out, cursor, rtype.to_u16())?;
            put_u16(out, cursor + 2, CLASS_IN)?;
            cursor += 4;
            questions += 1;
        }
    }

    // Back-patch the question count now that it is known
    out[4..6].copy_from_slice(&questions.to_be_bytes());

    debug!(bytes = cursor, questions = questions, "DNS request written");

    Ok(cursor)
}

fn put_u16(buf: &mut [u8], pos: usize, value: u16) -> Result<()> {
    if pos + 2 > buf.len() {
        return Err(WireError::BufferTooSmall(pos + 2));
    }
    buf[pos..pos + 2].copy_from_slice(&value.to_be_bytes());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_a_query_layout() {
        let mut buf = [0u8; 64];
        let query = Query {
            host: "example.com",
            types: QueryTypes::A,
        };
        let written = write_request(0x07E4, &[query], &mut buf).unwrap();

        assert_eq!(written, 29);
        // Header: id, RD flag, QDCOUNT=1, other counts zero
        assert_eq!(&buf[0..4], &[0x07, 0xE4, 0x01, 0x00]);
        assert_eq!(&buf[4..6], &[0x00, 0x01]);
        assert_eq!(&buf[6..12], &[0; 6]);
        // Question: inline name, QTYPE=A, QCLASS=IN
        assert_eq!(&buf[12..25], b"\x07example\x03com\x00");
        assert_eq!(&buf[25..29], &[0x00, 0x01, 0x00, 0x01]);
    }

    #[test]
    fn test_multi_type_uses_compression_pointer() {
        let mut buf = [0u8; 64];
        let query = Query {
            host: "example.com",
            types: QueryTypes::A | QueryTypes::TXT,
        };
        let written = write_request(1, &[query], &mut buf).unwrap();

        assert_eq!(written, 35);
        assert_eq!(&buf[4..6], &[0x00, 0x02]); // QDCOUNT = 2
        // First question inline
        assert_eq!(&buf[25..29], &[0x00, 0x01, 0x00, 0x01]);
        // Second question: pointer to the name anchor at offset 12, then TXT
        assert_eq!(&buf[29..31], &[0xC0, 0x0C]);
        assert_eq!(&buf[31..35], &[0x00, 0x10, 0x00, 0x01]);
    }

    #[test]
    fn test_type_priority_order() {
        let mut buf = [0u8; 128];
        let query = Query {
            host: "example.com",
            types: QueryTypes::NS | QueryTypes::MX | QueryTypes::TXT | QueryTypes::A,
        };
        write_request(1, &[query], &mut buf).unwrap();

        assert_eq!(&buf[4..6], &[0x00, 0x04]);
        // Emission order is A, TXT, MX, NS regardless of mask construction
        let qtype_at = |pos: usize| u16::from_be_bytes([buf[pos], buf[pos + 1]]);
        assert_eq!(qtype_at(25), 1); // A, inline name
        assert_eq!(qtype_at(31), 16); // TXT, after 2-byte pointer
        assert_eq!(qtype_at(37), 15); // MX
        assert_eq!(qtype_at(43), 2); // NS
    }

    #[test]
    fn test_two_hosts_have_distinct_anchors() {
        let mut buf = [0u8; 128];
        let queries = [
            Query {
                host: "example.com",
                types: QueryTypes::A | QueryTypes::NS,
            },
            Query {
                host: "example.org",
                types: QueryTypes::A | QueryTypes::NS,
            },
        ];
        let written = write_request(1, &queries, &mut buf).unwrap();

        assert_eq!(&buf[4..6], &[0x00, 0x04]);
        // Host 1 anchored at 12; its NS question points there
        assert_eq!(&buf[29..31], &[0xC0, 0x0C]);
        // Host 2 anchored right after host 1's block (12 + 13 + 4 + 6 = 35)
        assert_eq!(&buf[35..48], b"\x07example\x03org\x00");
        assert_eq!(&buf[52..54], &[0xC0, 0x23]);
        assert_eq!(written, 58);
    }

    #[test]
    fn test_unsupported_types_are_skipped() {
        let mut buf = [0u8; 64];
        let query = Query {
            host: "example.com",
            types: QueryTypes::CNAME | QueryTypes::SOA | QueryTypes::PTR,
        };
        let written = write_request(1, &[query], &mut buf).unwrap();

        // Name anchor is written, no questions are emitted
        assert_eq!(written, 25);
        assert_eq!(&buf[4..6], &[0x00, 0x00]);
        assert_eq!(&buf[12..25], b"\x07example\x03com\x00");
    }

    #[test]
    fn test_supported_bit_among_unsupported_still_emitted() {
        let mut buf = [0u8; 64];
        let query = Query {
            host: "example.com",
            types: QueryTypes::CNAME | QueryTypes::MX,
        };
        write_request(1, &[query], &mut buf).unwrap();

        assert_eq!(&buf[4..6], &[0x00, 0x01]);
        assert_eq!(&buf[25..29], &[0x00, 0x0F, 0x00, 0x01]);
    }

    #[test]
    fn test_no_queries_writes_bare_header() {
        let mut buf = [0u8; 16];
        let written = write_request(3, &[], &mut buf).unwrap();
        assert_eq!(written, HEADER_SIZE);
        assert_eq!(&buf[4..6], &[0x00, 0x00]);
    }

    #[test]
    fn test_zero_fills_stale_data() {
        let mut buf = [0xFFu8; 64];
        let query = Query {
            host: "example.com",
            types: QueryTypes::A,
        };
        let written = write_request(1, &[query], &mut buf).unwrap();
        assert!(buf[written..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_buffer_too_small_for_header() {
        let mut buf = [0u8; 8];
        assert_eq!(
            write_request(1, &[], &mut buf),
            Err(WireError::BufferTooSmall(HEADER_SIZE))
        );
    }

    #[test]
    fn test_buffer_too_small_for_name() {
        let mut buf = [0u8; 20];
        let query = Query {
            host: "example.com",
            types: QueryTypes::A,
        };
        assert_eq!(
            write_request(1, &[query], &mut buf),
            Err(WireError::BufferTooSmall(25))
        );
    }

    #[test]
    fn test_buffer_too_small_for_question_entry() {
        // Name fits exactly, the 4-byte question entry does not
        let mut buf = [0u8; 27];
        let query = Query {
            host: "example.com",
            types: QueryTypes::A,
        };
        assert!(matches!(
            write_request(1, &[query], &mut buf),
            Err(WireError::BufferTooSmall(_))
        ));
    }

    #[test]
    fn test_oversized_label_rejected() {
        let host = format!("{}.com", "a".repeat(64));
        let mut buf = [0u8; 256];
        let query = Query {
            host: &host,
            types: QueryTypes::A,
        };
        assert_eq!(
            write_request(1, &[query], &mut buf),
            Err(WireError::LabelTooLong(64))
        );
    }
}
