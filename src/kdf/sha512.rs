//! HKDF sha512.

pub type Kdf = super::hkdf::Hkdf<crate::hmac::sha512::Hmac>;
