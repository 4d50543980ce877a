//! Binary container format and the compress-then-encrypt pipeline.
//!
//! A `.tomb` file has this layout (integers big-endian):
//!
//! ```text
//! [magic: 7][version: 1][salt: 16][kdf params][IV: 12][AES-GCM ciphertext + 16-byte tag]
//! ```
//!
//! - **Magic**: `89 54 4F 4D 42 0D 0A` (`\x89TOMB\r\n`). The legacy magic
//!   `.TOMB` + `C3 BF` is still accepted on read.
//! - **Version**: `2` = legacy bcrypt recipe, params are 1 cost byte;
//!   `3` = Argon2id, params are memory KiB, iterations, parallelism as u32.
//! - **Ciphertext**: the zlib-compressed JSON document, encrypted under the
//!   derived key. Compression happens inside the authenticated boundary.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use zeroize::Zeroizing;

use crate::crypto::encryption::{self, IV_LEN};
use crate::crypto::kdf::{
    generate_salt, Argon2Params, KdfParams, MAX_LEGACY_COST, MIN_LEGACY_COST, SALT_LEN,
};
use crate::errors::{Result, TombError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Length of the magic prefix.
pub const MAGIC_LEN: usize = 7;

/// Magic bytes written at the start of every container.
pub const MAGIC: [u8; MAGIC_LEN] = *b"\x89TOMB\r\n";

/// Magic bytes of containers written by earlier releases.
pub const LEGACY_MAGIC: [u8; MAGIC_LEN] = *b".TOMB\xc3\xbf";

/// Version byte of the bcrypt recipe.
pub const LEGACY_VERSION: u8 = 2;

/// Version byte of the Argon2id recipe, written by every save.
pub const CURRENT_VERSION: u8 = 3;

// ---------------------------------------------------------------------------
// ContainerHeader
// ---------------------------------------------------------------------------

/// Everything in a container ahead of the ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerHeader {
    pub salt: [u8; SALT_LEN],
    pub kdf: KdfParams,
    pub iv: [u8; IV_LEN],
}

impl ContainerHeader {
    /// A header with a fresh random salt and IV.
    pub fn generate(kdf: KdfParams) -> Result<Self> {
        Ok(Self {
            salt: generate_salt()?,
            kdf,
            iv: encryption::generate_iv()?,
        })
    }

    /// Version byte implied by the key derivation recipe.
    pub fn version(&self) -> u8 {
        match self.kdf {
            KdfParams::Bcrypt { .. } => LEGACY_VERSION,
            KdfParams::Argon2id(_) => CURRENT_VERSION,
        }
    }

    /// Encode the header, starting with the current magic.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(MAGIC_LEN + 1 + SALT_LEN + 12 + IV_LEN);

        buf.extend_from_slice(&MAGIC); // 7 bytes
        buf.push(self.version()); // 1 byte
        buf.extend_from_slice(&self.salt); // 16 bytes
        match self.kdf {
            KdfParams::Bcrypt { cost } => buf.push(cost), // 1 byte
            KdfParams::Argon2id(params) => {
                buf.extend_from_slice(&params.memory_kib.to_be_bytes()); // 4 bytes BE
                buf.extend_from_slice(&params.iterations.to_be_bytes()); // 4 bytes BE
                buf.extend_from_slice(&params.parallelism.to_be_bytes()); // 4 bytes BE
            }
        }
        buf.extend_from_slice(&self.iv); // 12 bytes

        buf
    }

    /// Parse a header from the start of `data`.
    ///
    /// Returns the header and the offset at which the ciphertext begins.
    pub fn decode(data: &[u8]) -> Result<(Self, usize)> {
        let mut reader = HeaderReader { data, offset: 0 };

        let magic: [u8; MAGIC_LEN] = reader.take()?;
        if magic != MAGIC && magic != LEGACY_MAGIC {
            return Err(TombError::InvalidFormat("invalid magic".into()));
        }

        let [version] = reader.take::<1>()?;
        let salt = reader.take()?;

        let kdf = match version {
            LEGACY_VERSION => {
                let [cost] = reader.take::<1>()?;
                if !(MIN_LEGACY_COST..=MAX_LEGACY_COST).contains(&cost) {
                    return Err(TombError::InvalidFormat(format!(
                        "bcrypt cost {cost} out of range"
                    )));
                }
                KdfParams::Bcrypt { cost }
            }
            CURRENT_VERSION => {
                let params = Argon2Params {
                    memory_kib: u32::from_be_bytes(reader.take()?),
                    iterations: u32::from_be_bytes(reader.take()?),
                    parallelism: u32::from_be_bytes(reader.take()?),
                };
                params.validate().map_err(|_| {
                    TombError::InvalidFormat(format!(
                        "Argon2 parameters out of range (m={}, t={}, p={})",
                        params.memory_kib, params.iterations, params.parallelism
                    ))
                })?;
                KdfParams::Argon2id(params)
            }
            other => {
                return Err(TombError::InvalidFormat(format!(
                    "version unsupported ({other})"
                )));
            }
        };

        let iv = reader.take()?;

        Ok((Self { salt, kdf, iv }, reader.offset))
    }
}

/// Cursor over the fixed-size header fields.
struct HeaderReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl HeaderReader<'_> {
    fn take<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.offset + N;
        let bytes = self
            .data
            .get(self.offset..end)
            .ok_or_else(|| TombError::InvalidFormat("file too small to be a container".into()))?;
        self.offset = end;

        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }
}

// ---------------------------------------------------------------------------
// Seal / open
// ---------------------------------------------------------------------------

/// Compress `document`, encrypt it under a key derived from `passphrase`
/// with `kdf`, and return the complete container bytes.
///
/// A fresh salt and IV are generated on every call.
pub fn seal(document: &[u8], passphrase: &[u8], kdf: KdfParams) -> Result<Vec<u8>> {
    let header = ContainerHeader::generate(kdf)?;
    let key = header.kdf.derive_key(passphrase, &header.salt)?;

    let compressed = compress(document)?;
    let ciphertext = encryption::encrypt(&key, &header.iv, &compressed)?;
    drop(key);

    let mut buf = header.encode();
    buf.extend_from_slice(&ciphertext);
    tracing::debug!(
        version = header.version(),
        document_len = document.len(),
        container_len = buf.len(),
        "sealed container"
    );
    Ok(buf)
}

/// Decrypt and decompress a container, returning the document bytes.
///
/// The whole ciphertext is authenticated before any plaintext is used.
pub fn open(data: &[u8], passphrase: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let (header, offset) = ContainerHeader::decode(data)?;
    tracing::debug!(version = header.version(), "opening container");

    let key = header.kdf.derive_key(passphrase, &header.salt)?;
    let compressed = Zeroizing::new(encryption::decrypt(&key, &header.iv, &data[offset..])?);
    drop(key);

    decompress(&compressed)
}

/// zlib-compress `data`.
pub fn compress(data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| TombError::SerializationError(format!("compression: {e}")))?;
    encoder
        .finish()
        .map(Zeroizing::new)
        .map_err(|e| TombError::SerializationError(format!("compression: {e}")))
}

/// Inflate zlib-compressed `data`.
pub fn decompress(data: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    let mut out = Zeroizing::new(Vec::new());
    ZlibDecoder::new(data)
        .read_to_end(&mut out)
        .map_err(|e| TombError::MalformedPayload(format!("decompression: {e}")))?;
    Ok(out)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Write container bytes to disk **atomically**.
///
/// The bytes go to a temp file in the same directory, which is then renamed
/// over the target so readers never see a half-written container. On
/// failure the temp file is removed and the target is left as it was.
pub fn write_container(path: &Path, bytes: &[u8]) -> Result<()> {
    let unwritable =
        |e: std::io::Error| TombError::ContainerUnwritable(path.to_path_buf(), e.to_string());

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    let replace = || -> std::io::Result<()> {
        fs::write(&tmp_path, bytes)?;

        // On Unix, restrict permissions to owner-only read/write.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, path)
    };

    if let Err(e) = replace() {
        // The temp file holds a full container; never leave it behind.
        let _ = fs::remove_file(&tmp_path);
        return Err(unwritable(e));
    }
    Ok(())
}

/// Read the raw bytes of a container file.
pub fn read_container(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(TombError::ContainerNotFound(path.to_path_buf()));
    }
    Ok(fs::read(path)?)
}
