//! HKDF sha256.

pub type Kdf = super::hkdf::Hkdf<crate::hmac::sha256::Hmac>;
