//! DNS record types and classes.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// The Internet class, the only class this codec emits or expects.
pub const CLASS_IN: u16 = 1;

// DNS record type values (RFC 1035)
const TYPE_A: u16 = 1;
const TYPE_NS: u16 = 2;
const TYPE_CNAME: u16 = 5;
const TYPE_SOA: u16 = 6;
const TYPE_WKS: u16 = 11;
const TYPE_PTR: u16 = 12;
const TYPE_HINFO: u16 = 13;
const TYPE_MINFO: u16 = 14;
const TYPE_MX: u16 = 15;
const TYPE_TXT: u16 = 16;

/// DNS record types we care about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum RecordType {
    A,
    NS,
    CNAME,
    SOA,
    WKS,
    PTR,
    HINFO,
    MINFO,
    MX,
    TXT,
    Other(u16),
}

impl RecordType {
    /// Create from raw wire type value
    pub fn from_u16(value: u16) -> Self {
        match value {
            TYPE_A => RecordType::A,
            TYPE_NS => RecordType::NS,
            TYPE_CNAME => RecordType::CNAME,
            TYPE_SOA => RecordType::SOA,
            TYPE_WKS => RecordType::WKS,
            TYPE_PTR => RecordType::PTR,
            TYPE_HINFO => RecordType::HINFO,
            TYPE_MINFO => RecordType::MINFO,
            TYPE_MX => RecordType::MX,
            TYPE_TXT => RecordType::TXT,
            other => RecordType::Other(other),
        }
    }

    /// Convert to raw wire type value
    pub fn to_u16(self) -> u16 {
        match self {
            RecordType::A => TYPE_A,
            RecordType::NS => TYPE_NS,
            RecordType::CNAME => TYPE_CNAME,
            RecordType::SOA => TYPE_SOA,
            RecordType::WKS => TYPE_WKS,
            RecordType::PTR => TYPE_PTR,
            RecordType::HINFO => TYPE_HINFO,
            RecordType::MINFO => TYPE_MINFO,
            RecordType::MX => TYPE_MX,
            RecordType::TXT => TYPE_TXT,
            RecordType::Other(v) => v,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordType::A => write!(f, "A"),
            RecordType::NS => write!(f, "NS"),
            RecordType::CNAME => write!(f, "CNAME"),
            RecordType::SOA => write!(f, "SOA"),
            RecordType::WKS => write!(f, "WKS"),
            RecordType::PTR => write!(f, "PTR"),
            RecordType::HINFO => write!(f, "HINFO"),
            RecordType::MINFO => write!(f, "MINFO"),
            RecordType::MX => write!(f, "MX"),
            RecordType::TXT => write!(f, "TXT"),
            RecordType::Other(v) => write!(f, "TYPE{}", v),
        }
    }
}

/// Caller-facing query-type bitmask, distinct from the wire type codes:
/// a single query can request several record types for one host.
///
/// The request writer only honors [`QueryTypes::A`], [`QueryTypes::NS`],
/// [`QueryTypes::MX`] and [`QueryTypes::TXT`]; other bits are accepted and
/// skipped. This mirrors the documented writer limitation, it is not a
/// parsing restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueryTypes(u16);

impl QueryTypes {
    pub const A: QueryTypes = QueryTypes(1);
    pub const NS: QueryTypes = QueryTypes(2);
    pub const CNAME: QueryTypes = QueryTypes(4);
    pub const SOA: QueryTypes = QueryTypes(8);
    pub const WKS: QueryTypes = QueryTypes(16);
    pub const PTR: QueryTypes = QueryTypes(32);
    pub const HINFO: QueryTypes = QueryTypes(64);
    pub const MINFO: QueryTypes = QueryTypes(128);
    pub const MX: QueryTypes = QueryTypes(256);
    pub const TXT: QueryTypes = QueryTypes(512);

    /// True if any bit of `other` is set in `self`
    pub fn contains(self, other: QueryTypes) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bitmask value
    pub fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for QueryTypes {
    type Output = QueryTypes;

    fn bitor(self, rhs: QueryTypes) -> QueryTypes {
        QueryTypes(self.0 | rhs.0)
    }
}

impl BitOrAssign for QueryTypes {
    fn bitor_assign(&mut self, rhs: QueryTypes) {
        self.0 |= rhs.0;
    }
}
