//! HKDF sha1.

pub type Kdf = super::hkdf::Hkdf<crate::hmac::sha1::Hmac>;
