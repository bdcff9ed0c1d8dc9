//! HKDF implementation (RFC 5869), generic over the HMAC primitive.

use core::marker::PhantomData;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use cryptraits::{convert::Len, hmac::Hmac, kdf::Kdf as KdfTrait};
use log::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::KdfError;

/// Expand appends a one-byte block counter, so at most 255 blocks exist.
pub const MAX_BLOCKS: usize = 255;

/// HKDF over `PRF`, holding the pseudorandom key produced by Extract.
pub struct Hkdf<PRF>
where
    PRF: Hmac + Len,
{
    prk: Vec<u8>,

    _prf: PhantomData<PRF>,
}

impl<PRF> Zeroize for Hkdf<PRF>
where
    PRF: Hmac + Len,
{
    fn zeroize(&mut self) {
        self.prk.zeroize();
    }
}

impl<PRF> Drop for Hkdf<PRF>
where
    PRF: Hmac + Len,
{
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<PRF> KdfTrait for Hkdf<PRF>
where
    PRF: Hmac + Len,
{
    type E = KdfError;

    /// Runs Extract over `data` with `salt`.
    ///
    /// HMAC takes keys of any size, so this only fails for a PRF with a
    /// restricted key space. The instance then holds no key and every
    /// `expand` returns [`KdfError::InvalidLength`].
    fn new(salt: Option<&[u8]>, data: &[u8]) -> Self {
        let prk = match Self::extract(data, salt.unwrap_or_default()) {
            Ok(prk) => prk,
            Err(_) => {
                debug!("hkdf extract: salt rejected as PRF key, instance holds no key");
                Vec::new()
            }
        };

        Self {
            prk,
            _prf: PhantomData,
        }
    }

    fn expand(&self, info: &[u8], okm: &mut [u8]) -> Result<(), Self::E> {
        if self.prk.len() < PRF::LEN {
            return Err(KdfError::InvalidLength);
        }

        Self::expand_prk_into(&self.prk, info, okm)
    }
}

impl<PRF> Hkdf<PRF>
where
    PRF: Hmac + Len,
{
    /// Largest output Expand can produce: `255 * HashLen`.
    pub const MAX_OUTPUT_LEN: usize = MAX_BLOCKS * PRF::LEN;

    /// Wraps an existing pseudorandom key. RFC 5869 requires at least
    /// HashLen bytes.
    pub fn from_prk(prk: &[u8]) -> Result<Self, KdfError> {
        if prk.len() < PRF::LEN {
            return Err(KdfError::InvalidLength);
        }

        Ok(Self {
            prk: Vec::from(prk),
            _prf: PhantomData,
        })
    }

    pub fn prk(&self) -> &[u8] {
        &self.prk
    }

    /// `PRK = HMAC(salt, ikm)`. An empty salt means HashLen zero bytes.
    pub fn extract(ikm: &[u8], salt: &[u8]) -> Result<Vec<u8>, KdfError> {
        let zero_salt;
        let salt = if salt.is_empty() {
            zero_salt = vec![0u8; PRF::LEN];
            &zero_salt[..]
        } else {
            salt
        };

        let mut prf = PRF::new_from_slice(salt).or(Err(KdfError::InvalidLength))?;
        prf.update(ikm);

        Ok(prf.finalize())
    }

    /// Expand `prk` into a freshly allocated `length`-byte buffer.
    pub fn expand_prk(prk: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>, KdfError> {
        if length > Self::MAX_OUTPUT_LEN {
            return Err(KdfError::OutputTooLarge);
        }

        let mut okm = vec![0u8; length];
        Self::expand_prk_into(prk, info, &mut okm)?;

        Ok(okm)
    }

    /// Fill `okm` with `T(1) || T(2) || ...` truncated to its length, where
    /// `T(i) = HMAC(prk, T(i-1) || info || i)`.
    ///
    /// `okm` is left untouched on error.
    pub fn expand_prk_into(prk: &[u8], info: &[u8], okm: &mut [u8]) -> Result<(), KdfError> {
        if okm.len() > Self::MAX_OUTPUT_LEN {
            return Err(KdfError::OutputTooLarge);
        }

        let mut previous = Zeroizing::new(Vec::new());

        for (i, chunk) in okm.chunks_mut(PRF::LEN).enumerate() {
            let counter = u8::try_from(i + 1).or(Err(KdfError::OutputTooLarge))?;

            // Fresh keyed instance per block; finalize consumes it.
            let mut prf = PRF::new_from_slice(prk).or(Err(KdfError::InvalidLength))?;
            prf.update(&previous);
            prf.update(info);
            prf.update(&[counter]);

            let block = Zeroizing::new(prf.finalize());
            chunk.copy_from_slice(&block[..chunk.len()]);
            previous = block;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use cryptraits::{convert::Len, hmac::Hmac as _, kdf::Kdf as _};
    use hex_literal::hex;
    use proptest::{collection::vec, prelude::*};
    use zeroize::Zeroize;

    use super::{Hkdf, MAX_BLOCKS};
    use crate::{errors::KdfError, hmac};

    type Sha256Hkdf = Hkdf<hmac::sha256::Hmac>;

    /// PRF that accepts no key at all.
    struct KeylessPrf;

    impl Zeroize for KeylessPrf {
        fn zeroize(&mut self) {}
    }

    impl cryptraits::hmac::Hmac for KeylessPrf {
        type E = crate::errors::HmacError;

        fn new_from_slice(_key: &[u8]) -> Result<Self, Self::E> {
            Err(crate::errors::HmacError::InvalidLength)
        }

        fn update(&mut self, _data: &[u8]) {}

        fn verify_slice(self, _tag: &[u8]) -> Result<(), Self::E> {
            Err(crate::errors::HmacError::MacError)
        }

        fn finalize(self) -> Vec<u8> {
            Vec::new()
        }
    }

    impl Len for KeylessPrf {
        const LEN: usize = 16;
    }

    const IKM: [u8; 22] = [0x0b; 22];
    const SALT: [u8; 13] = hex!("000102030405060708090a0b0c");
    const INFO: [u8; 10] = hex!("f0f1f2f3f4f5f6f7f8f9");

    #[test]
    fn test_extract_hash_len_bytes() {
        assert_eq!(
            Hkdf::<hmac::sha1::Hmac>::extract(&IKM, &SALT).unwrap().len(),
            20
        );
        assert_eq!(Sha256Hkdf::extract(&IKM, &SALT).unwrap().len(), 32);
        assert_eq!(
            Hkdf::<hmac::sha512::Hmac>::extract(&IKM, &SALT).unwrap().len(),
            64
        );
    }

    #[test]
    fn test_default_empty_salt_to_zeros() {
        let defaulted = Hkdf::<hmac::sha512::Hmac>::extract(&IKM, &[]).unwrap();
        let explicit = Hkdf::<hmac::sha512::Hmac>::extract(&IKM, &[0u8; 64]).unwrap();

        assert_eq!(defaulted, explicit);
    }

    #[test]
    fn test_chain_blocks() {
        let prk = Sha256Hkdf::extract(&IKM, &SALT).unwrap();
        let okm = Sha256Hkdf::expand_prk(&prk, &INFO, 64).unwrap();

        let mut t1 = hmac::sha256::Hmac::new_from_slice(&prk).unwrap();
        t1.update(&INFO);
        t1.update(&[1]);
        let t1 = t1.finalize();

        let mut t2 = hmac::sha256::Hmac::new_from_slice(&prk).unwrap();
        t2.update(&t1);
        t2.update(&INFO);
        t2.update(&[2]);
        let t2 = t2.finalize();

        assert_eq!(&okm[..32], &t1[..]);
        assert_eq!(&okm[32..], &t2[..]);
    }

    #[test]
    fn test_expand_to_empty_output() {
        let prk = Sha256Hkdf::extract(&IKM, &SALT).unwrap();

        assert!(Sha256Hkdf::expand_prk(&prk, &INFO, 0).unwrap().is_empty());
    }

    #[test]
    fn test_reject_oversized_output() {
        let prk = Sha256Hkdf::extract(&IKM, &SALT).unwrap();

        assert_eq!(Sha256Hkdf::MAX_OUTPUT_LEN, MAX_BLOCKS * hmac::sha256::Hmac::LEN);
        assert!(Sha256Hkdf::expand_prk(&prk, &INFO, 8160).is_ok());
        assert_eq!(
            Sha256Hkdf::expand_prk(&prk, &INFO, 8161),
            Err(KdfError::OutputTooLarge)
        );
    }

    #[test]
    fn test_leave_buffer_untouched_on_error() {
        let prk = Sha256Hkdf::extract(&IKM, &SALT).unwrap();
        let mut okm = vec![0xaau8; 8161];

        assert!(Sha256Hkdf::expand_prk_into(&prk, &INFO, &mut okm).is_err());
        assert!(okm.iter().all(|b| *b == 0xaa));
    }

    #[test]
    fn test_derive_through_kdf_trait() {
        let kdf = Sha256Hkdf::new(Some(&SALT[..]), &IKM);

        let mut okm = [0u8; 42];
        kdf.expand(&INFO, &mut okm).unwrap();

        assert_eq!(
            kdf.prk(),
            &hex!("077709362c2e32df0ddc3f0dc47bba6390b6c73bb50f9c3122ec844ad7c2b3e5")[..]
        );
        assert_eq!(
            okm,
            hex!("3cb25f25faacd57a90434f64d0362f2a2d2d0a90cf1a5a4c5db02d56ecc4c5bf34007208d5b887185865")
        );
    }

    #[test]
    fn test_treat_missing_salt_as_empty() {
        let missing = Sha256Hkdf::new(None, &IKM);
        let empty = Sha256Hkdf::new(Some(&[][..]), &IKM);

        assert_eq!(missing.prk(), empty.prk());
    }

    #[test]
    fn test_reject_short_prk() {
        assert!(matches!(
            Sha256Hkdf::from_prk(&[0u8; 31]),
            Err(KdfError::InvalidLength)
        ));

        let kdf = Sha256Hkdf::from_prk(&[7u8; 32]).unwrap();
        let mut okm = [0u8; 16];
        assert!(kdf.expand(b"", &mut okm).is_ok());
    }

    #[test]
    fn test_rejected_salt_leaves_no_key() {
        let kdf = Hkdf::<KeylessPrf>::new(Some(&SALT[..]), &IKM);
        let mut okm = [0xaau8; 16];

        assert!(kdf.prk().is_empty());
        assert_eq!(kdf.expand(&INFO, &mut okm), Err(KdfError::InvalidLength));
        assert_eq!(okm, [0xaau8; 16]);

        assert_eq!(
            Hkdf::<KeylessPrf>::extract(&IKM, &SALT),
            Err(KdfError::InvalidLength)
        );
    }

    proptest! {
        #[test]
        fn test_expand_matches_reference_sha1(
            ikm in vec(any::<u8>(), 0..96),
            salt in vec(any::<u8>(), 0..96),
            info in vec(any::<u8>(), 0..96),
            length in 0usize..=Hkdf::<hmac::sha1::Hmac>::MAX_OUTPUT_LEN,
        ) {
            let prk = Hkdf::<hmac::sha1::Hmac>::extract(&ikm, &salt).unwrap();
            let okm = Hkdf::<hmac::sha1::Hmac>::expand_prk(&prk, &info, length).unwrap();

            let reference = ::hkdf::Hkdf::<::sha1::Sha1>::new(Some(&salt[..]), &ikm);
            let mut expected = vec![0u8; length];
            reference.expand(&info, &mut expected).unwrap();

            prop_assert_eq!(okm, expected);
        }

        #[test]
        fn test_expand_matches_reference_sha256(
            ikm in vec(any::<u8>(), 0..96),
            salt in vec(any::<u8>(), 0..96),
            info in vec(any::<u8>(), 0..96),
            length in 0usize..=1024,
        ) {
            let prk = Sha256Hkdf::extract(&ikm, &salt).unwrap();
            let okm = Sha256Hkdf::expand_prk(&prk, &info, length).unwrap();

            let reference = ::hkdf::Hkdf::<::sha2::Sha256>::new(Some(&salt[..]), &ikm);
            let mut expected = vec![0u8; length];
            reference.expand(&info, &mut expected).unwrap();

            prop_assert_eq!(okm, expected);
        }

        #[test]
        fn test_expand_matches_reference_sha512(
            ikm in vec(any::<u8>(), 0..192),
            salt in vec(any::<u8>(), 0..192),
            info in vec(any::<u8>(), 0..192),
            length in 0usize..=1024,
        ) {
            let prk = Hkdf::<hmac::sha512::Hmac>::extract(&ikm, &salt).unwrap();
            let okm = Hkdf::<hmac::sha512::Hmac>::expand_prk(&prk, &info, length).unwrap();

            let reference = ::hkdf::Hkdf::<::sha2::Sha512>::new(Some(&salt[..]), &ikm);
            let mut expected = vec![0u8; length];
            reference.expand(&info, &mut expected).unwrap();

            prop_assert_eq!(okm, expected);
        }

        #[test]
        fn test_shorter_output_is_prefix_of_longer(
            info in vec(any::<u8>(), 0..64),
            short in 0usize..=512,
            extra in 1usize..=512,
        ) {
            let prk = Sha256Hkdf::extract(&IKM, &SALT).unwrap();

            let a = Sha256Hkdf::expand_prk(&prk, &info, short).unwrap();
            let b = Sha256Hkdf::expand_prk(&prk, &info, short + extra).unwrap();

            prop_assert_eq!(&b[..short], &a[..]);
        }
    }
}
