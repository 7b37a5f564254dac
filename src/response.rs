//! Zero-copy DNS response parsing.
//!
//! [`ResponseParser`] wraps a received buffer and yields a lazy, forward-only
//! sequence of elements: every question in wire order, then every answer.
//! Elements borrow from the buffer, names as [`NameRef`] positions, rdata as
//! plain slices, so nothing is copied until the caller asks for a display
//! string via [`ResponseParser::extract_name`].

use crate::error::{Result, WireError};
use crate::header::{Header, ResponseCode, HEADER_SIZE};
use crate::name::{decode_name, decode_name_into, raw_name_len};
use crate::types::RecordType;
use tracing::debug;

/// Fixed part of a resource record after the name: TYPE(2) + CLASS(2) +
/// TTL(4) + RDLENGTH(2). Cursor advancement uses this wire size, never the
/// size of any in-memory struct.
pub const RR_HEADER_SIZE: usize = 10;

/// Position of a (possibly compressed) name inside the response buffer.
///
/// `raw_len` is the name's wire extent at that position: a compression
/// pointer counts as 2 bytes, labels as `1 + len` each, the terminator as 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameRef {
    offset: usize,
    raw_len: usize,
}

impl NameRef {
    /// Byte offset of the name from the start of the message
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Wire length of the name at that offset, pointers not followed
    pub fn raw_len(&self) -> usize {
        self.raw_len
    }
}

/// Fields common to questions and answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordInfo {
    pub name: NameRef,
    pub rtype: RecordType,
    pub class: u16,
}

/// One parsed element of the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element<'a> {
    Question {
        info: RecordInfo,
    },
    Answer {
        info: RecordInfo,
        ttl: u32,
        /// Raw rdata, interpretation depends on `info.rtype`
        data: &'a [u8],
    },
}

impl<'a> Element<'a> {
    /// The fields shared by both variants
    pub fn info(&self) -> &RecordInfo {
        match self {
            Element::Question { info } => info,
            Element::Answer { info, .. } => info,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Questions,
    Answers,
}

/// Forward-only parser over a DNS response buffer.
///
/// The parser and every element it yields borrow the buffer; neither can
/// outlive it. The main cursor only ever moves forward; name decompression
/// is a side, read-only walk.
#[derive(Debug)]
pub struct ResponseParser<'a> {
    buf: &'a [u8],
    header: Header,
    cursor: usize,
    phase: Phase,
    index: u16,
}

impl<'a> ResponseParser<'a> {
    /// Decode the header and position the cursor on the first question.
    ///
    /// Fails only when `buf` is shorter than a header. The response code is
    /// available right away via [`ResponseParser::response_code`] so callers
    /// can detect server-side failures before iterating.
    pub fn new(buf: &'a [u8]) -> Result<ResponseParser<'a>> {
        let header = Header::decode(buf)?;

        debug!(
            id = header.id,
            questions = header.question_count,
            answers = header.answer_count,
            rcode = ?header.rcode,
            "DNS response parser ready"
        );

        Ok(ResponseParser {
            buf,
            header,
            cursor: HEADER_SIZE,
            phase: Phase::Questions,
            index: 0,
        })
    }

    /// The decoded message header, host-endian
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Response code from the header
    pub fn response_code(&self) -> ResponseCode {
        self.header.rcode
    }

    /// Yield the next element: all questions in wire order, then all
    /// answers. `Ok(None)` means the sequence is exhausted; the authority
    /// and additional sections are never parsed.
    ///
    /// A failed read returns the error and terminates the iteration: the
    /// cursor state is no longer trustworthy after a malformed element.
    pub fn next_element(&mut self) -> Result<Option<Element<'a>>> {
        match self.advance() {
            Ok(el) => Ok(el),
            Err(e) => {
                debug!(error = %e, offset = self.cursor, "DNS response parse failed");
                self.phase = Phase::Answers;
                self.index = self.header.answer_count;
                Err(e)
            }
        }
    }

    /// Resolve a name found during iteration into a dot-joined display
    /// string, following compression pointers (which may point backward
    /// anywhere in the buffer). Read-only: the main cursor is not touched,
    /// and repeated calls yield identical output.
    pub fn extract_name(&self, name: NameRef) -> Result<String> {
        decode_name(self.buf, name.offset)
    }

    /// Like [`ResponseParser::extract_name`], but into a caller-supplied
    /// buffer, truncating when `out` is full. Returns the number of bytes
    /// written.
    pub fn extract_name_into(&self, name: NameRef, out: &mut [u8]) -> Result<usize> {
        decode_name_into(self.buf, name.offset, out)
    }

    fn advance(&mut self) -> Result<Option<Element<'a>>> {
        if self.phase == Phase::Questions {
            if self.index < self.header.question_count {
                let el = self.read_question()?;
                self.index += 1;
                if self.index == self.header.question_count {
                    self.phase = Phase::Answers;
                    self.index = 0;
                }
                return Ok(Some(el));
            }
            // No questions at all; fall through to the answer section
            self.phase = Phase::Answers;
            self.index = 0;
        }

        if self.index < self.header.answer_count {
            let el = self.read_answer()?;
            self.index += 1;
            return Ok(Some(el));
        }

        Ok(None)
    }

    fn read_question(&mut self) -> Result<Element<'a>> {
        let name = self.read_name_ref()?;
        let rtype = self.read_u16()?;
        let class = self.read_u16()?;

        Ok(Element::Question {
            info: RecordInfo {
                name,
                rtype: RecordType::from_u16(rtype),
                class,
            },
        })
    }

    fn read_answer(&mut self) -> Result<Element<'a>> {
        let name = self.read_name_ref()?;

        let pos = self.cursor;
        if pos + RR_HEADER_SIZE > self.buf.len() {
            return Err(WireError::TruncatedBuffer(pos + RR_HEADER_SIZE));
        }

        let rtype = u16::from_be_bytes([self.buf[pos], self.buf[pos + 1]]);
        let class = u16::from_be_bytes([self.buf[pos + 2], self.buf[pos + 3]]);
        let ttl = u32::from_be_bytes([
            self.buf[pos + 4],
            self.buf[pos + 5],
            self.buf[pos + 6],
            self.buf[pos + 7],
        ]);
        let rd_length = u16::from_be_bytes([self.buf[pos + 8], self.buf[pos + 9]]) as usize;

        let data_start = pos + RR_HEADER_SIZE;
        let data_end = data_start + rd_length;
        if data_end > self.buf.len() {
            return Err(WireError::TruncatedBuffer(data_end));
        }
        self.cursor = data_end;

        Ok(Element::Answer {
            info: RecordInfo {
                name,
                rtype: RecordType::from_u16(rtype),
                class,
            },
            ttl,
            data: &self.buf[data_start..data_end],
        })
    }

    /// Record the name at the cursor and advance past its wire extent
    /// without following pointers.
    fn read_name_ref(&mut self) -> Result<NameRef> {
        let raw_len = raw_name_len(self.buf, self.cursor)?;
        let name = NameRef {
            offset: self.cursor,
            raw_len,
        };
        self.cursor += raw_len;
        Ok(name)
    }

    fn read_u16(&mut self) -> Result<u16> {
        if self.cursor + 2 > self.buf.len() {
            return Err(WireError::TruncatedBuffer(self.cursor + 2));
        }
        let value = u16::from_be_bytes([self.buf[self.cursor], self.buf[self.cursor + 1]]);
        self.cursor += 2;
        Ok(value)
    }
}

impl<'a> Iterator for ResponseParser<'a> {
    type Item = Result<Element<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_element().transpose()
    }
}

// ==================== Helper for building DNS packets (tests) ====================
