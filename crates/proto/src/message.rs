//! Top-level message codec: the 12-byte header and the four record sections.
//!
//! Header layout (RFC 1035 §4.1.1), all fields big-endian:
//!
//! ```text
//! ID (16) | QR OPCODE(4) AA TC RD | RA Z AD CD RCODE(4)
//! QDCOUNT (16) | ANCOUNT (16) | NSCOUNT (16) | ARCOUNT (16)
//! ```
//!
//! Typed fields are the only representation; wire bytes are re-derived on
//! every serialization, and the four section counts always come from the
//! list lengths rather than anything a caller could set independently.

use crate::errors::ProtoError;
use crate::question::{self, Question};
use crate::record::{self, ResourceRecord};
use crate::types::{Opcode, ResponseCode};
use crate::wire::{WireReader, WireWriter};

pub const HEADER_LEN: usize = 12;

const QR: u16 = 0x8000;
const OPCODE: u16 = 0x7800;
const AA: u16 = 0x0400;
const TC: u16 = 0x0200;
const RD: u16 = 0x0100;
const RA: u16 = 0x0080;
const ZERO: u16 = 0x0040;
const AD: u16 = 0x0020;
const CD: u16 = 0x0010;
const RCODE: u16 = 0x000F;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DnsMessage {
    /// Caller-assigned correlation ID, opaque to the codec.
    pub id: u16,
    flags: u16,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub authorities: Vec<ResourceRecord>,
    pub additionals: Vec<ResourceRecord>,
}

impl DnsMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a complete message. Fails on anything short of a well-formed
    /// header plus exactly the claimed number of entries per section.
    pub fn parse(bytes: &[u8]) -> Result<Self, ProtoError> {
        if bytes.len() < HEADER_LEN {
            return Err(ProtoError::MalformedHeader(bytes.len()));
        }
        let mut r = WireReader::new(bytes);

        let mut msg = DnsMessage::new();
        msg.id = r.read_u16()?;
        msg.flags = r.read_u16()?;
        let qdcount = r.read_u16()?;
        let ancount = r.read_u16()?;
        let nscount = r.read_u16()?;
        let arcount = r.read_u16()?;

        msg.questions = question::decode_section(&mut r, qdcount)?;
        msg.answers = record::decode_section(&mut r, ancount)?;
        msg.authorities = record::decode_section(&mut r, nscount)?;
        msg.additionals = record::decode_section(&mut r, arcount)?;

        Ok(msg)
    }

    /// Non-propagating form of [`parse`](Self::parse): any decode failure
    /// becomes `None` so the caller's loop can carry on.
    pub fn try_parse(bytes: &[u8]) -> Option<Self> {
        Self::parse(bytes).ok()
    }

    pub fn write_to(&self, out: &mut WireWriter) -> Result<(), ProtoError> {
        out.put_u16(self.id);
        out.put_u16(self.flags);
        out.put_u16(self.questions.len() as u16);
        out.put_u16(self.answers.len() as u16);
        out.put_u16(self.authorities.len() as u16);
        out.put_u16(self.additionals.len() as u16);

        question::encode_section(&self.questions, out)?;
        record::encode_section(&self.answers, out)?;
        record::encode_section(&self.authorities, out)?;
        record::encode_section(&self.additionals, out)?;
        Ok(())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtoError> {
        let mut out = WireWriter::with_capacity(512);
        self.write_to(&mut out)?;
        Ok(out.into_bytes())
    }

    pub fn is_query(&self) -> bool {
        !self.qr()
    }

    // Flag accessors. Each setter touches only its own bits.

    pub fn flags_word(&self) -> u16 {
        self.flags
    }

    pub fn qr(&self) -> bool {
        self.flags & QR != 0
    }

    pub fn set_qr(&mut self, v: bool) {
        self.set_bit(QR, v);
    }

    pub fn opcode(&self) -> Opcode {
        Opcode::from_u8(((self.flags & OPCODE) >> 11) as u8)
    }

    pub fn set_opcode(&mut self, opcode: Opcode) {
        self.flags = (self.flags & !OPCODE) | ((opcode.to_u8() as u16 & 0x0F) << 11);
    }

    pub fn aa(&self) -> bool {
        self.flags & AA != 0
    }

    pub fn set_aa(&mut self, v: bool) {
        self.set_bit(AA, v);
    }

    pub fn tc(&self) -> bool {
        self.flags & TC != 0
    }

    pub fn set_tc(&mut self, v: bool) {
        self.set_bit(TC, v);
    }

    pub fn rd(&self) -> bool {
        self.flags & RD != 0
    }

    pub fn set_rd(&mut self, v: bool) {
        self.set_bit(RD, v);
    }

    pub fn ra(&self) -> bool {
        self.flags & RA != 0
    }

    pub fn set_ra(&mut self, v: bool) {
        self.set_bit(RA, v);
    }

    /// Reserved bit. Reads the wire value; there is no setter because the
    /// field must stay zero (RFC 1035 §4.1.1).
    pub fn zero(&self) -> bool {
        self.flags & ZERO != 0
    }

    pub fn ad(&self) -> bool {
        self.flags & AD != 0
    }

    pub fn set_ad(&mut self, v: bool) {
        self.set_bit(AD, v);
    }

    pub fn cd(&self) -> bool {
        self.flags & CD != 0
    }

    pub fn set_cd(&mut self, v: bool) {
        self.set_bit(CD, v);
    }

    pub fn rcode(&self) -> ResponseCode {
        ResponseCode::from_u8((self.flags & RCODE) as u8)
    }

    pub fn set_rcode(&mut self, rcode: ResponseCode) {
        self.flags = (self.flags & !RCODE) | (rcode.to_u8() as u16 & RCODE);
    }

    fn set_bit(&mut self, mask: u16, v: bool) {
        if v {
            self.flags |= mask;
        } else {
            self.flags &= !mask;
        }
    }
}
