//! DNS message header: the fixed 12-byte layout (RFC 1035 section 4.1.1).
//!
//! The flags word is packed and unpacked with explicit masks and shifts so
//! wire order holds on every platform.

use crate::error::{Result, WireError};

/// Size of the fixed DNS message header in bytes.
pub const HEADER_SIZE: usize = 12;

// Flags word bit layout: QR(1) OPCODE(4) AA(1) TC(1) RD(1) | RA(1) Z(3) RCODE(4)
const FLAG_QR: u16 = 0x8000; // Query/Response flag
const FLAG_AA: u16 = 0x0400; // Authoritative Answer
const FLAG_TC: u16 = 0x0200; // TrunCation
const FLAG_RD: u16 = 0x0100; // Recursion Desired
const FLAG_RA: u16 = 0x0080; // Recursion Available
const FLAG_RCODE_MASK: u16 = 0x000F; // Response code mask
const OPCODE_MASK: u16 = 0x7800;
const OPCODE_SHIFT: u16 = 11;

/// DNS response codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseCode {
    NoError = 0,
    FormErr = 1,
    ServFail = 2,
    NxDomain = 3,
    NotImp = 4,
    Refused = 5,
}

impl ResponseCode {
    /// Create from the low 4 bits of a flags word
    pub fn from_u16(value: u16) -> Self {
        match value & FLAG_RCODE_MASK {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormErr,
            2 => ResponseCode::ServFail,
            3 => ResponseCode::NxDomain,
            4 => ResponseCode::NotImp,
            5 => ResponseCode::Refused,
            _ => ResponseCode::ServFail, // Treat unknown as server failure
        }
    }
}

/// Decoded DNS message header, host-endian.
///
/// The three reserved Z bits are never interpreted: ignored on read, written
/// as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub id: u16,
    /// QR bit: false for queries, true for responses
    pub response: bool,
    /// Kind of query. 0 for standard
    pub opcode: u8,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub rcode: ResponseCode,
    pub question_count: u16,
    pub answer_count: u16,
    /// Name server records in the authority section
    pub authority_count: u16,
    /// Records in the additional section
    pub additional_count: u16,
}

impl Header {
    /// Header for a fresh request: everything zero except the id and RD.
    pub fn request(id: u16) -> Header {
        Header {
            id,
            response: false,
            opcode: 0,
            authoritative: false,
            truncated: false,
            recursion_desired: true,
            recursion_available: false,
            rcode: ResponseCode::NoError,
            question_count: 0,
            answer_count: 0,
            authority_count: 0,
            additional_count: 0,
        }
    }

    /// Decode the first 12 bytes of `buf`, converting all fields from
    /// big-endian.
    pub fn decode(buf: &[u8]) -> Result<Header> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::TruncatedBuffer(buf.len()));
        }

        let flags = u16::from_be_bytes([buf[2], buf[3]]);

        Ok(Header {
            id: u16::from_be_bytes([buf[0], buf[1]]),
            response: flags & FLAG_QR != 0,
            opcode: ((flags & OPCODE_MASK) >> OPCODE_SHIFT) as u8,
            authoritative: flags & FLAG_AA != 0,
            truncated: flags & FLAG_TC != 0,
            recursion_desired: flags & FLAG_RD != 0,
            recursion_available: flags & FLAG_RA != 0,
            rcode: ResponseCode::from_u16(flags),
            question_count: u16::from_be_bytes([buf[4], buf[5]]),
            answer_count: u16::from_be_bytes([buf[6], buf[7]]),
            authority_count: u16::from_be_bytes([buf[8], buf[9]]),
            additional_count: u16::from_be_bytes([buf[10], buf[11]]),
        })
    }

    /// Encode into the first 12 bytes of `buf`, big-endian.
    pub fn encode(&self, buf: &mut [u8]) -> Result<()> {
        if buf.len() < HEADER_SIZE {
            return Err(WireError::BufferTooSmall(HEADER_SIZE));
        }

        let mut flags: u16 = 0;
        if self.response {
            flags |= FLAG_QR;
        }
        flags |= (u16::from(self.opcode) << OPCODE_SHIFT) & OPCODE_MASK;
        if self.authoritative {
            flags |= FLAG_AA;
        }
        if self.truncated {
            flags |= FLAG_TC;
        }
        if self.recursion_desired {
            flags |= FLAG_RD;
        }
        if self.recursion_available {
            flags |= FLAG_RA;
        }
        flags |= self.rcode as u16;

        buf[0..2].copy_from_slice(&self.id.to_be_bytes());
        buf[2..4].copy_from_slice(&flags.to_be_bytes());
        buf[4..6].copy_from_slice(&self.question_count.to_be_bytes());
        buf[6..8].copy_from_slice(&self.answer_count.to_be_bytes());
        buf[8..10].copy_from_slice(&self.authority_count.to_be_bytes());
        buf[10..12].copy_from_slice(&self.additional_count.to_be_bytes());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_header_roundtrip() {
        let header = Header::request(0x1234);
        let mut buf = [0u8; HEADER_SIZE];
        header.encode(&mut buf).unwrap();

        assert_eq!(buf[0], 0x12);
        assert_eq!(buf[1], 0x34);
        // Flags: RD only -> 0x0100
        assert_eq!(buf[2], 0x01);
        assert_eq!(buf[3], 0x00);

        let decoded = Header::decode(&buf).unwrap();
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_decode_response_flags() {
        // QR=1, RD=1, RA=1, RCODE=NXDOMAIN
        let buf = [
            0xAB, 0xCD, 0x81, 0x83, 0x00, 0x01, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01,
        ];
        let header = Header::decode(&buf).unwrap();

        assert_eq!(header.id, 0xABCD);
        assert!(header.response);
        assert_eq!(header.opcode, 0);
        assert!(!header.authoritative);
        assert!(!header.truncated);
        assert!(header.recursion_desired);
        assert!(header.recursion_available);
        assert_eq!(header.rcode, ResponseCode::NxDomain);
        assert_eq!(header.question_count, 1);
        assert_eq!(header.answer_count, 2);
        assert_eq!(header.authority_count, 0);
        assert_eq!(header.additional_count, 1);
    }

    #[test]
    fn test_decode_opcode_and_aa_tc() {
        // QR=1, OPCODE=2 (status), AA=1, TC=1
        let flags: u16 = 0x8000 | (2 << 11) | 0x0400 | 0x0200;
        let mut buf = [0u8; HEADER_SIZE];
        buf[2..4].copy_from_slice(&flags.to_be_bytes());

        let header = Header::decode(&buf).unwrap();
        assert_eq!(header.opcode, 2);
        assert!(header.authoritative);
        assert!(header.truncated);
    }

    #[test]
    fn test_reserved_bits_ignored() {
        // Same header with and without Z bits set decodes identically
        let mut buf = [0u8; HEADER_SIZE];
        let flags_clean: u16 = 0x8180;
        buf[2..4].copy_from_slice(&flags_clean.to_be_bytes());
        let clean = Header::decode(&buf).unwrap();

        let flags_dirty: u16 = flags_clean | 0x0070; // all three Z bits
        buf[2..4].copy_from_slice(&flags_dirty.to_be_bytes());
        let dirty = Header::decode(&buf).unwrap();

        assert_eq!(clean, dirty);
    }

    #[test]
    fn test_encode_never_sets_reserved_bits() {
        let mut header = Header::request(1);
        header.response = true;
        header.rcode = ResponseCode::Refused;
        let mut buf = [0u8; HEADER_SIZE];
        header.encode(&mut buf).unwrap();

        let flags = u16::from_be_bytes([buf[2], buf[3]]);
        assert_eq!(flags & 0x0070, 0);
    }

    #[test]
    fn test_decode_too_short() {
        let buf = [0u8; 11];
        assert_eq!(
            Header::decode(&buf),
            Err(WireError::TruncatedBuffer(11))
        );
    }

    #[test]
    fn test_encode_too_short() {
        let header = Header::request(7);
        let mut buf = [0u8; 4];
        assert_eq!(
            header.encode(&mut buf),
            Err(WireError::BufferTooSmall(HEADER_SIZE))
        );
    }

    #[test]
    fn test_response_code_from_u16() {
        assert_eq!(ResponseCode::from_u16(0x8180), ResponseCode::NoError);
        assert_eq!(ResponseCode::from_u16(0x8183), ResponseCode::NxDomain);
        assert_eq!(ResponseCode::from_u16(5), ResponseCode::Refused);
        // Unknown codes collapse to server failure
        assert_eq!(ResponseCode::from_u16(11), ResponseCode::ServFail);
    }
}
