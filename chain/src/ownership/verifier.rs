//! Signature verification for ownership challenges.
//!
//! An address is the hex-encoded Ed25519 verifying key of its owner and a
//! signature is the hex-encoded detached Ed25519 signature over the UTF-8
//! bytes of the challenge message.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};

/// Verification primitive used by the submission workflow.
///
/// Malformed input (bad hex, wrong key or signature length, keys that are
/// not valid curve points) must yield `false` rather than an error.
pub trait SignatureVerifier: Send + Sync {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool;
}

/// Ed25519 implementation of [`SignatureVerifier`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        let Some(key) = parse_address(address) else {
            return false;
        };
        let Ok(sig_bytes) = hex::decode(signature) else {
            return false;
        };
        let Ok(sig) = Signature::from_slice(&sig_bytes) else {
            return false;
        };
        key.verify(message.as_bytes(), &sig).is_ok()
    }
}

fn parse_address(address: &str) -> Option<VerifyingKey> {
    let bytes = hex::decode(address).ok()?;
    let arr: [u8; 32] = bytes.as_slice().try_into().ok()?;
    VerifyingKey::from_bytes(&arr).ok()
}

/// Address owned by `key`.
pub fn address_of(key: &VerifyingKey) -> String {
    hex::encode(key.to_bytes())
}

/// Signs a challenge message the way clients are expected to.
pub fn sign_message(key: &SigningKey, message: &str) -> String {
    hex::encode(key.sign(message.as_bytes()).to_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(seed: u8) -> SigningKey {
        SigningKey::from_bytes(&[seed; 32])
    }

    #[test]
    fn accepts_signature_from_address_owner() {
        let sk = key(7);
        let address = address_of(&sk.verifying_key());
        let sig = sign_message(&sk, "hello");
        assert!(Ed25519Verifier.verify("hello", &address, &sig));
    }

    #[test]
    fn rejects_other_message_or_other_key() {
        let sk = key(7);
        let other = key(8);
        let address = address_of(&sk.verifying_key());
        let sig = sign_message(&sk, "hello");

        assert!(!Ed25519Verifier.verify("hello!", &address, &sig));
        assert!(!Ed25519Verifier.verify(
            "hello",
            &address_of(&other.verifying_key()),
            &sig
        ));
    }

    #[test]
    fn malformed_inputs_verify_false() {
        let sk = key(7);
        let address = address_of(&sk.verifying_key());
        let sig = sign_message(&sk, "hello");

        assert!(!Ed25519Verifier.verify("hello", "not-hex", &sig));
        assert!(!Ed25519Verifier.verify("hello", "abcd", &sig));
        assert!(!Ed25519Verifier.verify("hello", &address, "zz"));
        assert!(!Ed25519Verifier.verify("hello", &address, "abcd"));
        assert!(!Ed25519Verifier.verify("hello", &address, ""));
    }
}
