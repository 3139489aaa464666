use dns_relay_proto::{
    DnsMessage, Opcode, ProtoError, Question, RData, RecordClass, RecordType, ResourceRecord,
    ResponseCode,
};
use std::net::Ipv4Addr;

/// Query for example.com type A class IN, ID 1, RD set — the canonical
/// 29-byte packet a stub resolver emits.
fn example_com_query() -> Vec<u8> {
    let mut bytes = vec![
        0x00, 0x01, // ID = 1
        0x01, 0x00, // RD
        0x00, 0x01, // QDCOUNT = 1
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    bytes.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    bytes
}

#[test]
fn parses_example_com_query() {
    let msg = DnsMessage::parse(&example_com_query()).unwrap();

    assert_eq!(msg.id, 1);
    assert!(!msg.qr());
    assert!(msg.is_query());
    assert_eq!(msg.opcode(), Opcode::Query);
    assert!(msg.rd());
    assert!(!msg.aa());
    assert_eq!(msg.rcode(), ResponseCode::NoError);

    assert_eq!(msg.questions.len(), 1);
    assert_eq!(msg.questions[0].name, "example.com");
    assert_eq!(msg.questions[0].qtype, RecordType::A);
    assert_eq!(msg.questions[0].class, RecordClass::In);
    assert!(msg.answers.is_empty());
    assert!(msg.authorities.is_empty());
    assert!(msg.additionals.is_empty());
}

#[test]
fn reencodes_example_com_query_byte_for_byte() {
    let bytes = example_com_query();
    let msg = DnsMessage::parse(&bytes).unwrap();
    assert_eq!(msg.to_bytes().unwrap(), bytes);
}

#[test]
fn serialize_parse_serialize_is_stable() {
    let mut msg = DnsMessage::new();
    msg.id = 0xCAFE;
    msg.set_qr(true);
    msg.set_ra(true);
    msg.set_rd(true);
    msg.questions.push(Question {
        name: "www.example.com".to_string(),
        qtype: RecordType::A,
        class: RecordClass::In,
    });
    msg.answers.push(ResourceRecord::new(
        "www.example.com",
        RecordType::Cname,
        RecordClass::In,
        600,
        RData::Cname("example.com".to_string()),
    ));
    msg.answers.push(ResourceRecord::new(
        "example.com",
        RecordType::A,
        RecordClass::In,
        300,
        RData::A(Ipv4Addr::new(93, 184, 216, 34)),
    ));
    msg.authorities.push(ResourceRecord::new(
        "example.com",
        RecordType::Ns,
        RecordClass::In,
        86400,
        RData::Ns("ns1.example.com".to_string()),
    ));
    msg.authorities.push(ResourceRecord::new(
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
    ));

    let first = msg.to_bytes().unwrap();
    let reparsed = DnsMessage::parse(&first).unwrap();
    assert_eq!(reparsed.to_bytes().unwrap(), first);
    assert_eq!(reparsed, msg);
}

#[test]
fn counts_match_section_lengths_after_parse() {
    let mut msg = DnsMessage::new();
    msg.id = 7;
    msg.questions.push(Question {
        name: "example.com".to_string(),
        qtype: RecordType::Mx,
        class: RecordClass::In,
    });
    msg.additionals.push(ResourceRecord::new(
        "mail.example.com",
        RecordType::A,
        RecordClass::In,
        60,
        RData::A(Ipv4Addr::new(192, 0, 2, 1)),
    ));
    let bytes = msg.to_bytes().unwrap();

    let parsed = DnsMessage::parse(&bytes).unwrap();
    assert_eq!(parsed.questions.len(), 1);
    assert_eq!(parsed.answers.len(), 0);
    assert_eq!(parsed.authorities.len(), 0);
    assert_eq!(parsed.additionals.len(), 1);
}

#[test]
fn question_count_overrunning_buffer_fails_whole_parse() {
    let mut bytes = example_com_query();
    bytes[5] = 3; // QDCOUNT = 3, but only one question follows
    assert!(matches!(
        DnsMessage::parse(&bytes),
        Err(ProtoError::Truncated { .. })
    ));
}

#[test]
fn answer_count_overrunning_buffer_fails_whole_parse() {
    let mut bytes = example_com_query();
    bytes[7] = 1; // ANCOUNT = 1 with no answer bytes
    assert!(DnsMessage::parse(&bytes).is_err());
}

#[test]
fn try_parse_returns_none_instead_of_failing() {
    assert!(DnsMessage::try_parse(&[]).is_none());
    assert!(DnsMessage::try_parse(&[0u8; 11]).is_none());
    assert!(DnsMessage::try_parse(&example_com_query()).is_some());
}

#[test]
fn unknown_rdata_round_trips_through_raw_bytes() {
    let mut msg = DnsMessage::new();
    msg.id = 42;
    msg.set_qr(true);
    msg.answers.push(ResourceRecord::new(
        "example.com",
        RecordType::Txt,
        RecordClass::In,
        120,
        RData::Unknown(b"\x10v=spf1 -all pad.".to_vec()),
    ));

    let bytes = msg.to_bytes().unwrap();
    let parsed = DnsMessage::parse(&bytes).unwrap();
    assert_eq!(
        parsed.answers[0].rdata,
        RData::Unknown(b"\x10v=spf1 -all pad.".to_vec())
    );
    assert_eq!(parsed.to_bytes().unwrap(), bytes);
}

#[test]
fn compressed_answer_name_is_rejected_not_misread() {
    // response with an answer whose name is a pointer back to offset 12
    let mut bytes = vec![
        0x00, 0x01, 0x81, 0x80, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
    ];
    bytes.extend_from_slice(b"\x07example\x03com\x00\x00\x01\x00\x01");
    bytes.extend_from_slice(&[0xC0, 0x0C]); // compressed name
    bytes.extend_from_slice(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2C, 0x00, 0x04]);
    bytes.extend_from_slice(&[93, 184, 216, 34]);

    assert!(matches!(
        DnsMessage::parse(&bytes),
        Err(ProtoError::CompressedName(_))
    ));
    assert!(DnsMessage::try_parse(&bytes).is_none());
}
