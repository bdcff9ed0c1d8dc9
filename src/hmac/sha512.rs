//! SHA-512 based HMAC.

super::keyed_hash!(
    /// SHA-512 based HMAC.
    ::sha2::Sha512,
    64
);
