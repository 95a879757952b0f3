//! Non-reversible fingerprint of the token signing secret.
//!
//! Logged at startup so operators can tell which secret a process holds.

use sha2::{Digest, Sha256};

const FINGERPRINT_BYTES: usize = 8;

/// First eight bytes of the secret's SHA-256 digest, lower-case hex.
///
/// # Examples
///
/// ```rust
/// use cerealnotes::inbound::http::token_config::fingerprint::secret_fingerprint;
///
/// let fp = secret_fingerprint(&[7_u8; 64]);
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn secret_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn equal_secrets_share_a_fingerprint() {
        assert_eq!(secret_fingerprint(b"alpha"), secret_fingerprint(b"alpha"));
    }

    #[rstest]
    fn distinct_secrets_differ() {
        assert_ne!(
            secret_fingerprint(&[b'a'; 64]),
            secret_fingerprint(&[b'b'; 64])
        );
    }

    #[rstest]
    fn fingerprint_is_sixteen_lowercase_hex_chars() {
        let fp = secret_fingerprint(&[0_u8; 64]);
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert_eq!(fp, fp.to_lowercase());
    }
}
