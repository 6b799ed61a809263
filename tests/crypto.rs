//! Document encryption tests.

use assetsafe_core::crypto::{decrypt_document, encrypt_document};
use assetsafe_core::error::CoreError;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

#[test]
fn test_round_trip() {
    let payload = encrypt_document("correct horse", "deed scan, page 1").unwrap();
    let plaintext = decrypt_document("correct horse", &payload).unwrap();
    assert_eq!(plaintext, "deed scan, page 1");
}

#[test]
fn test_round_trip_empty_and_unicode() {
    for plaintext in ["", "\u{1F510} sensitive \u{00E9}t\u{00E9}"] {
        let payload = encrypt_document("pw", plaintext).unwrap();
        assert_eq!(decrypt_document("pw", &payload).unwrap(), plaintext);
    }
}

#[test]
fn test_same_plaintext_encrypts_differently() {
    // Random salt and nonce per call
    let a = encrypt_document("pw", "same document").unwrap();
    let b = encrypt_document("pw", "same document").unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_wrong_passphrase_fails() {
    let payload = encrypt_document("right", "secret").unwrap();
    let err = decrypt_document("wrong", &payload).unwrap_err();
    assert!(matches!(err, CoreError::Crypto(_)));
}

#[test]
fn test_tampered_payload_fails() {
    let payload = encrypt_document("pw", "secret").unwrap();

    let mut bytes = BASE64.decode(&payload).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x01;
    let tampered = BASE64.encode(bytes);

    let err = decrypt_document("pw", &tampered).unwrap_err();
    assert!(matches!(err, CoreError::Crypto(_)));
}

#[test]
fn test_garbage_payloads_rejected() {
    // Not base64
    assert!(matches!(
        decrypt_document("pw", "%%%").unwrap_err(),
        CoreError::Crypto(_)
    ));

    // Valid base64, too short
    assert!(matches!(
        decrypt_document("pw", &BASE64.encode(b"tiny")).unwrap_err(),
        CoreError::Crypto(_)
    ));

    // Right length, wrong magic
    assert!(matches!(
        decrypt_document("pw", &BASE64.encode([0u8; 64])).unwrap_err(),
        CoreError::Crypto(_)
    ));
}
