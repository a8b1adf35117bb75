use std::{fs, path::Path};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// panic unless `path` holds a non-empty PNG image
pub fn assert_png(path: &Path) {
    let bytes = fs::read(path).unwrap_or_else(|e| panic!("unable to read {:?}: {}", path, e));
    assert!(bytes.len() > PNG_SIGNATURE.len(), "{:?} is empty", path);
    assert_eq!(bytes[..8], PNG_SIGNATURE, "{:?} is not a PNG", path);
}
