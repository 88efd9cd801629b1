use crate::utils::error::{KitError, Result};
use md5::Md5;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha512};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::str::FromStr;

const READ_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestAlgorithm {
    Md5,
    Sha1,
    Sha256,
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 4] = [
        DigestAlgorithm::Md5,
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha512,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Md5 => "MD5",
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Md5 => 16,
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = KitError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "MD5" => Ok(DigestAlgorithm::Md5),
            "SHA1" => Ok(DigestAlgorithm::Sha1),
            "SHA256" => Ok(DigestAlgorithm::Sha256),
            "SHA512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(KitError::invalid_argument(
                "algorithm",
                s,
                "Supported algorithms: MD5, SHA-1, SHA-256, SHA-512",
            )),
        }
    }
}

fn hash_reader<D: Digest, R: Read + ?Sized>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut hasher = D::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..read]);
    }
    Ok(hasher.finalize().to_vec())
}

pub fn digest_bytes(algorithm: DigestAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Md5 => Md5::digest(data).to_vec(),
        DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Lowercase hex digest.
pub fn digest_hex(algorithm: DigestAlgorithm, data: &[u8]) -> String {
    hex::encode(digest_bytes(algorithm, data))
}

pub fn digest_reader<R: Read + ?Sized>(
    algorithm: DigestAlgorithm,
    reader: &mut R,
) -> Result<Vec<u8>> {
    let digest = match algorithm {
        DigestAlgorithm::Md5 => hash_reader::<Md5, _>(reader)?,
        DigestAlgorithm::Sha1 => hash_reader::<Sha1, _>(reader)?,
        DigestAlgorithm::Sha256 => hash_reader::<Sha256, _>(reader)?,
        DigestAlgorithm::Sha512 => hash_reader::<Sha512, _>(reader)?,
    };
    Ok(digest)
}

/// Lowercase hex digest of a file's contents.
pub fn digest_file<P: AsRef<Path>>(algorithm: DigestAlgorithm, path: P) -> Result<String> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);
    let digest = digest_reader(algorithm, &mut reader)?;
    tracing::debug!("{} of {}: {}", algorithm, path.display(), hex::encode(&digest));
    Ok(hex::encode(digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_known_vectors_for_abc() {
        assert_eq!(
            digest_hex(DigestAlgorithm::Md5, b"abc"),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            digest_hex(DigestAlgorithm::Sha1, b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            digest_hex(DigestAlgorithm::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert!(digest_hex(DigestAlgorithm::Sha512, b"abc").starts_with("ddaf35a193617aba"));
    }

    #[test]
    fn test_output_lengths() {
        for algorithm in DigestAlgorithm::ALL {
            assert_eq!(digest_bytes(algorithm, b"").len(), algorithm.output_len());
        }
    }

    #[test]
    fn test_reader_matches_bytes() {
        let data: Vec<u8> = (0..20_000u32).map(|i| (i % 251) as u8).collect();
        for algorithm in DigestAlgorithm::ALL {
            let streamed = digest_reader(algorithm, &mut Cursor::new(&data)).unwrap();
            assert_eq!(streamed, digest_bytes(algorithm, &data));
        }
    }

    #[test]
    fn test_parse_algorithm_names() {
        assert_eq!("sha-256".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha256);
        assert_eq!("SHA1".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha1);
        assert_eq!("md5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);
        assert_eq!(DigestAlgorithm::Sha512.to_string(), "SHA-512");
        assert!("crc32".parse::<DigestAlgorithm>().is_err());
    }
}
