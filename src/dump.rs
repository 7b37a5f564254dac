//! Human-readable rendering of a whole DNS packet.
//!
//! Built entirely on the public parser API; useful for logging and
//! debugging. Rendering never writes anywhere itself; the caller decides
//! what to do with the string.

use crate::error::Result;
use crate::response::{Element, ResponseParser};
use crate::types::RecordType;

/// Render the header and every question and answer of `buf`.
///
/// A-record rdata is shown as a dotted quad, TXT as text, anything else as
/// hex bytes.
pub fn dump_packet(buf: &[u8]) -> Result<String> {
    let mut parser = ResponseParser::new(buf)?;
    let header = *parser.header();

    let mut out = String::new();
    out.push_str(&format!("ID: {}\n", header.id));
    out.push_str(&format!("Response: {}\n", header.response));
    out.push_str(&format!("Opcode: {}\n", header.opcode));
    out.push_str(&format!("Authoritative: {}\n", header.authoritative));
    out.push_str(&format!("Truncated: {}\n", header.truncated));
    out.push_str(&format!("Recursion desired: {}\n", header.recursion_desired));
    out.push_str(&format!(
        "Recursion available: {}\n",
        header.recursion_available
    ));
    out.push_str(&format!("Response code: {:?}\n", header.rcode));
    out.push_str(&format!("Questions: {}\n", header.question_count));
    out.push_str(&format!("Answers: {}\n", header.answer_count));

    out.push_str("\nQuestions:\n");
    let mut index = 0;
    let mut answers_started = false;

    while let Some(el) = parser.next_element()? {
        if matches!(el, Element::Answer { .. }) && !answers_started {
            answers_started = true;
            index = 0;
            out.push_str("\nAnswers:\n");
        }

        let name = parser.extract_name(el.info().name)?;
        out.push_str(&format!("[{}]\n", index));
        index += 1;
        out.push_str(&format!("    Name: {}\n", name));
        out.push_str(&format!("    Type: {}\n", el.info().rtype));
        out.push_str(&format!("    Class: {}\n", el.info().class));

        if let Element::Answer { ttl, data, .. } = el {
            out.push_str(&format!("    TTL: {}\n", ttl));
            out.push_str(&format!("    RDLength: {}\n", data.len()));
            out.push_str(&format!(
                "    RData: {}\n",
                render_rdata(el.info().rtype, data)
            ));
        }
    }

    Ok(out)
}

fn render_rdata(rtype: RecordType, data: &[u8]) -> String {
    match rtype {
        RecordType::A => data
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join("."),
        RecordType::TXT => data.iter().map(|&b| b as char).collect(),
        _ => {
            let mut hex = String::new();
            for b in data {
                if !hex.is_empty() {
                    hex.push(' ');
                }
                hex.push_str(&format!("0x{:02X}", b));
            }
            hex
        }
    }
}
