//! Document identifier generation.
//!
//! Identifiers are 12 bytes rendered as 24 lowercase hex characters: a
//! big-endian seconds timestamp followed by 8 random bytes, so ids sort
//! roughly by creation time.

use jiff::Timestamp;

pub fn generate() -> String {
    generate_at(Timestamp::now())
}

pub fn generate_at(ts: Timestamp) -> String {
    let seconds = u32::try_from(ts.as_second().max(0)).unwrap_or(u32::MAX);
    let random: [u8; 8] = rand::random();

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&seconds.to_be_bytes());
    bytes[4..].copy_from_slice(&random);

    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validate::is_document_id;

    #[test]
    fn test_generated_ids_match_document_format() {
        for _ in 0..32 {
            assert!(is_document_id(&generate()));
        }
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate();
        let b = generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_timestamp_prefix() {
        let ts = Timestamp::from_second(0x6500_0000).unwrap();
        assert!(generate_at(ts).starts_with("65000000"));
    }
}
