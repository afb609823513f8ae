// src/utils/hex.rs
//! Hex rendering for printing keys, digests and ciphertexts

/// Uppercase hexadecimal rendering of `bytes`
pub fn to_hex(bytes: impl AsRef<[u8]>) -> String {
    hex::encode_upper(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([0x00u8, 0x0f, 0xa5, 0xff]), "000FA5FF");
        assert_eq!(to_hex(b"AB"), "4142");
        assert_eq!(to_hex(Vec::<u8>::new()), "");
    }
}
