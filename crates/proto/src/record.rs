use crate::errors::ProtoError;
use crate::name;
use crate::types::{RecordClass, RecordType};
use crate::wire::{WireReader, WireWriter};
use std::net::Ipv4Addr;

/// Type-specific payload of a resource record. Unrecognized (class, type)
/// combinations keep their raw bytes so re-encoding is byte-exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RData {
    A(Ipv4Addr),
    Cname(String),
    Ptr(String),
    Ns(String),
    Soa {
        primary_ns: String,
        mailbox: String,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum_ttl: u32,
    },
    Unknown(Vec<u8>),
}

impl RData {
    /// Wire length of the encoded payload, computed from the actual label
    /// encoding (one prefix byte per label), not from raw string length.
    pub fn encoded_len(&self) -> usize {
        match self {
            RData::A(_) => 4,
            RData::Cname(n) | RData::Ptr(n) | RData::Ns(n) => name::encoded_len(n),
            RData::Soa {
                primary_ns,
                mailbox,
                ..
            } => name::encoded_len(primary_ns) + name::encoded_len(mailbox) + 20,
            RData::Unknown(raw) => raw.len(),
        }
    }

    pub fn encode(&self, out: &mut WireWriter) -> Result<(), ProtoError> {
        match self {
            RData::A(addr) => out.put_slice(&addr.octets()),
            RData::Cname(n) | RData::Ptr(n) | RData::Ns(n) => name::encode_name(n, out)?,
            RData::Soa {
                primary_ns,
                mailbox,
                serial,
                refresh,
                retry,
                expire,
                minimum_ttl,
            } => {
                name::encode_name(primary_ns, out)?;
                name::encode_name(mailbox, out)?;
                out.put_u32(*serial);
                out.put_u32(*refresh);
                out.put_u32(*retry);
                out.put_u32(*expire);
                out.put_u32(*minimum_ttl);
            }
            RData::Unknown(raw) => out.put_slice(raw),
        }
        Ok(())
    }

    /// Dispatches on (class, type) over the declared RDATA bytes.
    fn decode(
        class: RecordClass,
        rtype: RecordType,
        rdata: &[u8],
    ) -> Result<Self, ProtoError> {
        let mut r = WireReader::new(rdata);
        match (class, rtype) {
            (RecordClass::In, RecordType::A) => {
                let octets = r.read_slice(4)?;
                Ok(RData::A(Ipv4Addr::new(
                    octets[0], octets[1], octets[2], octets[3],
                )))
            }
            (_, RecordType::Cname) => Ok(RData::Cname(name::decode_name(&mut r)?)),
            (_, RecordType::Ptr) => Ok(RData::Ptr(name::decode_name(&mut r)?)),
            (_, RecordType::Ns) => Ok(RData::Ns(name::decode_name(&mut r)?)),
            (_, RecordType::Soa) => {
                let primary_ns = name::decode_name(&mut r)?;
                let mailbox = name::decode_name(&mut r)?;
                Ok(RData::Soa {
                    primary_ns,
                    mailbox,
                    serial: r.read_u32()?,
                    refresh: r.read_u32()?,
                    retry: r.read_u32()?,
                    expire: r.read_u32()?,
                    minimum_ttl: r.read_u32()?,
                })
            }
            _ => Ok(RData::Unknown(rdata.to_vec())),
        }
    }
}

/// One answer/authority/additional entry (RFC 1035 §4.1.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: String,
    pub rtype: RecordType,
    pub class: RecordClass,
    pub ttl: u32,
    /// RDATA length as declared on the wire. Decoding trusts this value to
    /// advance the cursor; it is never recomputed from the decoded payload,
    /// so a non-conforming server's declared length is preserved as-is.
    pub data_len: u16,
    pub rdata: RData,
}

impl ResourceRecord {
    pub fn new(
        name: impl Into<String>,
        rtype: RecordType,
        class: RecordClass,
        ttl: u32,
        rdata: RData,
    ) -> Self {
        let data_len = rdata.encoded_len() as u16;
        Self {
            name: name.into(),
            rtype,
            class,
            ttl,
            data_len,
            rdata,
        }
    }

    pub fn decode(r: &mut WireReader<'_>) -> Result<Self, ProtoError> {
        let rname = name::decode_name(r)?;
        let rtype = RecordType::from_u16(r.read_u16()?);
        let class = RecordClass::from_u16(r.read_u16()?);
        let ttl = r.read_u32()?;
        let data_len = r.read_u16()?;
        let rdata_bytes = r.read_slice(data_len as usize)?;
        let rdata = RData::decode(class, rtype, rdata_bytes)?;
        Ok(ResourceRecord {
            name: rname,
            rtype,
            class,
            ttl,
            data_len,
            rdata,
        })
    }

    pub fn encode(&self, out: &mut WireWriter) -> Result<(), ProtoError> {
        name::encode_name(&self.name, out)?;
        out.put_u16(self.rtype.to_u16());
        out.put_u16(self.class.to_u16());
        out.put_u32(self.ttl);
        // Length derives from the payload actually written, not from the
        // possibly stale wire-declared value.
        out.put_u16(self.rdata.encoded_len() as u16);
        self.rdata.encode(out)
    }
}

/// Decodes exactly `count` sequential records, advancing the shared cursor.
pub fn decode_section(
    r: &mut WireReader<'_>,
    count: u16,
) -> Result<Vec<ResourceRecord>, ProtoError> {
    let mut records = Vec::with_capacity(count as usize);
    for _ in 0..count {
        records.push(ResourceRecord::decode(r)?);
    }
    Ok(records)
}

pub fn encode_section(
    records: &[ResourceRecord],
    out: &mut WireWriter,
) -> Result<(), ProtoError> {
    for record in records {
        record.encode(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(record: &ResourceRecord) -> Vec<u8> {
        let mut w = WireWriter::default();
        record.encode(&mut w).unwrap();
        w.into_bytes()
    }

    #[test]
    fn a_record_round_trip() {
        let record = ResourceRecord::new(
            "example.com",
            RecordType::A,
            RecordClass::In,
            300,
            RData::A(Ipv4Addr::new(93, 184, 216, 34)),
        );
        let bytes = encode(&record);

        let mut r = WireReader::new(&bytes);
        let decoded = ResourceRecord::decode(&mut r).unwrap();
        assert_eq!(decoded, record);
        assert_eq!(decoded.data_len, 4);
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn cname_length_uses_label_encoding() {
        // "a.bc" encodes as 1 'a' 2 'b' 'c' 0 = 7 bytes, not len("a.bc") + 2.
        let rdata = RData::Cname("a.bc".to_string());
        assert_eq!(rdata.encoded_len(), 7);
    }

    #[test]
    fn soa_round_trip() {
        let record = ResourceRecord::new(
            "example.com",
            RecordType::Soa,
            RecordClass::In,
            3600,
            RData::Soa {
                primary_ns: "ns1.example.com".to_string(),
                mailbox: "hostmaster.example.com".to_string(),
                serial: 2024010100,
                refresh: 3600,
                retry: 900,
                expire: 604800,
                minimum_ttl: 86400,
            },
        );
        let bytes = encode(&record);
        let mut r = WireReader::new(&bytes);
        assert_eq!(ResourceRecord::decode(&mut r).unwrap(), record);
    }

    #[test]
    fn soa_fields_are_big_endian() {
        let rdata = RData::Soa {
            primary_ns: "".to_string(),
            mailbox: "".to_string(),
            serial: 2024010100,
            refresh: 3600,
            retry: 0,
            expire: 0,
            minimum_ttl: 0,
        };
        let mut w = WireWriter::default();
        rdata.encode(&mut w).unwrap();
        let bytes = w.into_bytes();
        // two empty names then serial, refresh
        assert_eq!(&bytes[2..6], &2024010100u32.to_be_bytes());
        assert_eq!(&bytes[6..10], &[0x00, 0x00, 0x0E, 0x10]);

        match RData::decode(RecordClass::In, RecordType::Soa, &bytes).unwrap() {
            RData::Soa {
                serial, refresh, ..
            } => {
                assert_eq!(serial, 2024010100);
                assert_eq!(refresh, 3600);
            }
            other => panic!("expected SOA, got {:?}", other),
        }
    }

    #[test]
    fn unrecognized_type_preserves_raw_bytes() {
        // TXT is not in the dispatch set; its payload must survive verbatim.
        let raw = b"\x0bhello world".to_vec();
        let record = ResourceRecord::new(
            "example.com",
            RecordType::Txt,
            RecordClass::In,
            60,
            RData::Unknown(raw.clone()),
        );
        let bytes = encode(&record);

        let mut r = WireReader::new(&bytes);
        let decoded = ResourceRecord::decode(&mut r).unwrap();
        assert_eq!(decoded.rdata, RData::Unknown(raw));
        assert_eq!(encode(&decoded), bytes);
    }

    #[test]
    fn declared_length_advances_cursor_past_unknown_rdata() {
        let mut w = WireWriter::default();
        // record with 6 opaque bytes, followed by a trailing marker
        ResourceRecord::new(
            "x",
            RecordType::Unknown(200),
            RecordClass::In,
            0,
            RData::Unknown(vec![1, 2, 3, 4, 5, 6]),
        )
        .encode(&mut w)
        .unwrap();
        w.put_u8(0xAB);
        let bytes = w.into_bytes();

        let mut r = WireReader::new(&bytes);
        ResourceRecord::decode(&mut r).unwrap();
        assert_eq!(r.read_u8().unwrap(), 0xAB);
    }

    #[test]
    fn declared_length_beyond_buffer_fails() {
        let mut w = WireWriter::default();
        name::encode_name("x", &mut w).unwrap();
        w.put_u16(1); // type A
        w.put_u16(1); // class IN
        w.put_u32(0); // ttl
        w.put_u16(50); // claims 50 RDATA bytes
        w.put_slice(&[0; 4]);
        let bytes = w.into_bytes();

        let mut r = WireReader::new(&bytes);
        assert!(matches!(
            ResourceRecord::decode(&mut r),
            Err(ProtoError::Truncated { .. })
        ));
    }
}
