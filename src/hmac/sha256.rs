//! SHA-256 based HMAC.

super::keyed_hash!(
    /// SHA-256 based HMAC.
    ::sha2::Sha256,
    32
);
