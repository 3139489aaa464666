use crate::errors::ProtoError;
use crate::name;
use crate::types::{RecordClass, RecordType};
use crate::wire::{WireReader, WireWriter};

/// One query entry: name, type, class (RFC 1035 §4.1.2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub name: String,
    pub qtype: RecordType,
    pub class: RecordClass,
}

impl Question {
    pub fn decode(r: &mut WireReader<'_>) -> Result<Self, ProtoError> {
        let qname = name::decode_name(r)?;
        let qtype = RecordType::from_u16(r.read_u16()?);
        let class = RecordClass::from_u16(r.read_u16()?);
        Ok(Question {
            name: qname,
            qtype,
            class,
        })
    }

    pub fn encode(&self, out: &mut WireWriter) -> Result<(), ProtoError> {
        name::encode_name(&self.name, out)?;
        out.put_u16(self.qtype.to_u16());
        out.put_u16(self.class.to_u16());
        Ok(())
    }
}

/// Decodes exactly `count` sequential questions, advancing the shared cursor.
/// A count that outruns the buffer fails the whole parse.
pub fn decode_section(r: &mut WireReader<'_>, count: u16) -> Result<Vec<Question>, ProtoError> {
    let mut questions = Vec::with_capacity(count as usize);
    for _ in 0..count {
        questions.push(Question::decode(r)?);
    }
    Ok(questions)
}

pub fn encode_section(questions: &[Question], out: &mut WireWriter) -> Result<(), ProtoError> {
    for question in questions {
        question.encode(out)?;
    }
    Ok(())
}
