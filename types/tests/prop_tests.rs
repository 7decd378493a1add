use proptest::prelude::*;

use veriseal_types::{CallerIdentity, Timestamp, TokenId, TokenRecord, TokenStatus, TxRef};

proptest! {
    /// TxRef roundtrip: new -> as_bytes produces identical bytes.
    #[test]
    fn tx_ref_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let tx = TxRef::new(bytes);
        prop_assert_eq!(tx.as_bytes(), &bytes);
    }

    /// TxRef::is_zero is true only for all-zero bytes.
    #[test]
    fn tx_ref_is_zero_correct(bytes in prop::array::uniform32(0u8..)) {
        let tx = TxRef::new(bytes);
        prop_assert_eq!(tx.is_zero(), bytes == [0u8; 32]);
    }

    /// TxRef hex display roundtrips through from_hex.
    #[test]
    fn tx_ref_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let tx = TxRef::new(bytes);
        let parsed = TxRef::from_hex(&tx.to_string()).unwrap();
        prop_assert_eq!(parsed, tx);
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// Timestamp elapsed_since: elapsed_since(now) = now - self (saturating).
    #[test]
    fn timestamp_elapsed_since(base in 0u64..1_000_000, offset in 0u64..1_000_000) {
        let t = Timestamp::new(base);
        let now = Timestamp::new(base + offset);
        prop_assert_eq!(t.elapsed_since(now), offset);
    }

    /// Any non-empty alphanumeric string parses as a TokenId and survives
    /// the round trip through its string form.
    #[test]
    fn token_id_parse_roundtrip(s in "[a-zA-Z0-9-]{1,64}") {
        let id = TokenId::parse(s.clone()).unwrap();
        prop_assert_eq!(id.as_str(), s.as_str());
        prop_assert_eq!(TokenId::parse(id.to_string()).unwrap(), id);
    }

    /// TokenRecord JSON serialization roundtrip.
    #[test]
    fn token_record_json_roundtrip(s in "[a-f0-9-]{8,36}", secs in 0u64..10_000_000) {
        let record = TokenRecord::registered(
            TokenId::parse(s).unwrap(),
            Timestamp::new(secs),
        );
        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: TokenRecord = serde_json::from_str(&encoded).unwrap();
        prop_assert_eq!(decoded.id, record.id);
        prop_assert_eq!(decoded.status, TokenStatus::Registered);
        prop_assert!(decoded.consumed_at.is_none());
    }
}

#[test]
fn token_id_rejects_empty_and_whitespace() {
    assert!(TokenId::parse("").is_err());
    assert!(TokenId::parse("has space").is_err());
    assert!(TokenId::parse("tab\there").is_err());
    assert!(TokenId::parse("new\nline").is_err());
}

#[test]
fn identity_rejects_empty_and_whitespace() {
    assert!(CallerIdentity::parse("").is_err());
    assert!(CallerIdentity::parse("0x12 34").is_err());
    assert!(CallerIdentity::parse("0x1234abcd").is_ok());
}

#[test]
fn identity_abbreviation() {
    let id = CallerIdentity::parse("0xabcdef0123456789abcdef0123456789abcdef01").unwrap();
    let short = id.abbreviated();
    assert!(short.starts_with("0xabcd"));
    assert!(short.ends_with("ef01"));
    let tiny = CallerIdentity::parse("0x1234").unwrap();
    assert_eq!(tiny.abbreviated(), "0x1234");
}

#[test]
fn tx_ref_from_hex_rejects_bad_input() {
    assert!(TxRef::from_hex("abcd").is_none());
    assert!(TxRef::from_hex(&"zz".repeat(32)).is_none());
    assert!(TxRef::from_hex(&"AB".repeat(32)).is_none()); // uppercase not accepted
}
