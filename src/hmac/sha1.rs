//! SHA-1 based HMAC.

super::keyed_hash!(
    /// SHA-1 based HMAC.
    ::sha1::Sha1,
    20
);
