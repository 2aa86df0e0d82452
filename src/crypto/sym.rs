use crate::crypto::errors::{CryptoResult, Error};
use base64::{Engine, engine::general_purpose::STANDARD};
use openssl::rand::rand_bytes;
use openssl::symm::{Cipher as OpenSslCipher, Crypter, Mode};
use secrecy::{ExposeSecret, SecretSlice};

const AES_BLOCK_SIZE: usize = 16;

/// Represents a symmetric cipher algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    /// AES-128-CBC cipher
    Aes128Cbc,
    /// AES-192-CBC cipher
    Aes192Cbc,
    /// AES-256-CBC cipher
    Aes256Cbc,
}

impl Cipher {
    /// Select the AES variant matching a raw key length, the way CryptoJS
    /// picks it from a word-array key.
    pub fn for_key_len(len: usize) -> CryptoResult<Self> {
        match len {
            16 => Ok(Self::Aes128Cbc),
            24 => Ok(Self::Aes192Cbc),
            32 => Ok(Self::Aes256Cbc),
            other => Err(Error::InvalidKeyLength(other)),
        }
    }

    /// Get the block size of the cipher in bytes.
    pub const fn block_size(self) -> usize {
        AES_BLOCK_SIZE
    }

    fn to_openssl_cipher(self) -> OpenSslCipher {
        match self {
            Self::Aes128Cbc => OpenSslCipher::aes_128_cbc(),
            Self::Aes192Cbc => OpenSslCipher::aes_192_cbc(),
            Self::Aes256Cbc => OpenSslCipher::aes_256_cbc(),
        }
    }
}

/// Encrypts identity numbers for the banking vendor.
///
/// Output is `base64(IV || AES-CBC-PKCS7(plaintext))` with a fresh random IV
/// per call. The vendor decrypts it with CryptoJS defaults, so the padding
/// scheme and the IV position must not change.
#[derive(Debug)]
pub struct IdentityCipher {
    cipher: Cipher,
    key: SecretSlice<u8>,
}

impl IdentityCipher {
    /// Create a cipher from raw key bytes (16, 24 or 32 bytes).
    pub fn new(key: impl AsRef<[u8]>) -> CryptoResult<Self> {
        let key = key.as_ref();
        let cipher = Cipher::for_key_len(key.len())?;
        Ok(Self {
            cipher,
            key: SecretSlice::new(key.to_vec().into()),
        })
    }

    pub fn cipher(&self) -> Cipher {
        self.cipher
    }

    /// Encrypt a UTF-8 identity number and return the base64 wire form.
    pub fn encrypt(&self, plaintext: &str) -> CryptoResult<String> {
        let mut iv = [0u8; AES_BLOCK_SIZE];
        rand_bytes(&mut iv).map_err(Error::Random)?;

        let ciphertext = self.encrypt_with_iv(&iv, plaintext.as_bytes())?;

        let mut wire = Vec::with_capacity(iv.len() + ciphertext.len());
        wire.extend_from_slice(&iv);
        wire.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(wire))
    }

    /// Reverse of [`IdentityCipher::encrypt`].
    pub fn decrypt(&self, encoded: &str) -> CryptoResult<String> {
        let wire = STANDARD.decode(encoded.trim())?;
        if wire.len() < 2 * AES_BLOCK_SIZE || wire.len() % AES_BLOCK_SIZE != 0 {
            return Err(Error::Invalid(format!(
                "ciphertext of {} bytes is not IV plus whole blocks",
                wire.len()
            )));
        }
        let (iv, ciphertext) = wire.split_at(AES_BLOCK_SIZE);

        let mut decrypter = Crypter::new(
            self.cipher.to_openssl_cipher(),
            Mode::Decrypt,
            self.key.expose_secret(),
            Some(iv),
        )?;
        decrypter.pad(true);

        let mut plaintext = vec![0u8; ciphertext.len() + self.cipher.block_size()];
        let mut count = decrypter.update(ciphertext, &mut plaintext)?;
        count += decrypter.finalize(&mut plaintext[count..])?;
        plaintext.truncate(count);

        String::from_utf8(plaintext).map_err(|e| Error::Invalid(e.to_string()))
    }

    fn encrypt_with_iv(&self, iv: &[u8], plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let mut encrypter = Crypter::new(
            self.cipher.to_openssl_cipher(),
            Mode::Encrypt,
            self.key.expose_secret(),
            Some(iv),
        )?;
        // PKCS#7
        encrypter.pad(true);

        let mut ciphertext = vec![0u8; plaintext.len() + self.cipher.block_size()];
        let mut count = if plaintext.is_empty() {
            0
        } else {
            encrypter.update(plaintext, &mut ciphertext)?
        };
        count += encrypter.finalize(&mut ciphertext[count..])?;
        ciphertext.truncate(count);

        Ok(ciphertext)
    }
}
