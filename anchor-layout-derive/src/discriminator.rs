use sha2::{Digest, Sha256};

/// First eight bytes of `sha256("<namespace>:<name>")`.
pub fn hashed(namespace: &str, name: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("{namespace}:{name}").as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    bytes
}
