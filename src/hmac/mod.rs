//! Keyed-hash primitives used as the HKDF PRF.
//!
//! Every primitive wraps [`::hmac::Hmac`] over one hash function and exposes
//! it through [`cryptraits::hmac::Hmac`], with the digest size as
//! [`cryptraits::convert::Len::LEN`].

pub mod sha1;
pub mod sha256;
pub mod sha512;

macro_rules! keyed_hash {
    ($(#[$meta:meta])* $digest:ty, $len:expr) => {
        #[cfg(not(feature = "std"))]
        use alloc::vec::Vec;

        use ::hmac::Mac;

        use crate::errors::HmacError;

        $(#[$meta])*
        #[derive(Clone, ::zeroize::Zeroize)]
        pub struct Hmac(#[zeroize(skip)] ::hmac::Hmac<$digest>);

        impl cryptraits::hmac::Hmac for Hmac {
            type E = HmacError;

            fn new_from_slice(key: &[u8]) -> Result<Self, Self::E>
            where
                Self: Sized,
            {
                let hmac = ::hmac::Hmac::new_from_slice(key).or(Err(HmacError::InvalidLength))?;
                Ok(Self(hmac))
            }

            fn update(&mut self, data: &[u8]) {
                self.0.update(data);
            }

            fn verify_slice(self, tag: &[u8]) -> Result<(), Self::E> {
                self.0.verify_slice(tag).or(Err(HmacError::MacError))
            }

            fn finalize(self) -> Vec<u8> {
                self.0.finalize().into_bytes().to_vec()
            }
        }

        impl cryptraits::convert::Len for Hmac {
            const LEN: usize = $len;
        }
    };
}

pub(crate) use keyed_hash;
