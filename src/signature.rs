use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes the HMAC-SHA256 signature of a request body.
///
/// The signature is computed over the exact bytes as received on the wire,
/// never a re-serialized form, and encoded as lowercase hex (64 characters).
pub fn compute_signature(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a supplied signature token against the expected HMAC of the body.
///
/// A missing token takes the same comparison path as a wrong token, so the
/// observable outcome never reveals whether a token was presented at all.
/// Comparison is constant-time to avoid timing side channels.
pub fn verify_signature(secret: &str, body: &[u8], token: Option<&str>) -> bool {
    let expected = compute_signature(secret, body);
    let supplied = token.unwrap_or("");
    expected.as_bytes().ct_eq(supplied.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_secret_key_for_testing";

    #[test]
    fn accepts_matching_signature() {
        let body = br#"{"message_id":"m1"}"#;
        let token = compute_signature(SECRET, body);
        assert!(verify_signature(SECRET, body, Some(&token)));
    }

    #[test]
    fn signature_is_lowercase_hex() {
        let token = compute_signature(SECRET, b"payload");
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn rejects_missing_token() {
        assert!(!verify_signature(SECRET, b"payload", None));
    }

    #[test]
    fn rejects_empty_token() {
        assert!(!verify_signature(SECRET, b"payload", Some("")));
    }

    #[test]
    fn rejects_tampered_token() {
        let body = b"payload";
        let mut token = compute_signature(SECRET, body);
        // Flip the first hex digit.
        let flipped = if token.starts_with('0') { "1" } else { "0" };
        token.replace_range(0..1, flipped);
        assert!(!verify_signature(SECRET, body, Some(&token)));
    }

    #[test]
    fn rejects_tampered_body() {
        let token = compute_signature(SECRET, b"payload");
        assert!(!verify_signature(SECRET, b"payloae", Some(&token)));
    }

    #[test]
    fn rejects_uppercase_hex() {
        let body = b"payload";
        let token = compute_signature(SECRET, body).to_uppercase();
        assert!(!verify_signature(SECRET, body, Some(&token)));
    }

    #[test]
    fn rejects_wrong_secret() {
        let body = b"payload";
        let token = compute_signature("other_secret", body);
        assert!(!verify_signature(SECRET, body, Some(&token)));
    }
}
