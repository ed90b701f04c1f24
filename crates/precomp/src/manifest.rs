use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// Bump when the emitted table layout changes shape.
pub const TABLE_FORMAT_VERSION: u16 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub file_name: String,
    pub byte_len: u64,
    pub sha256_hex: String,
}

// Written next to the emitted assembly so CI can verify a regeneration
// reproduced the committed tables without diffing the full text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedManifest {
    pub table_format_version: u16,
    pub generator_version: String,
    pub ring_count: usize,
    pub total_waypoints: usize,
    pub hit_flag_count: usize,
    pub hit_count: usize,
    pub grid_masks_emitted: bool,
    pub files: Vec<GeneratedFile>,
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    to_hex(hasher.finalize().as_slice())
}

fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_matches_known_vectors() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let manifest = GeneratedManifest {
            table_format_version: TABLE_FORMAT_VERSION,
            generator_version: "0.1.0".to_string(),
            ring_count: 8,
            total_waypoints: 2896,
            hit_flag_count: 1024,
            hit_count: 137,
            grid_masks_emitted: true,
            files: vec![GeneratedFile {
                file_name: "sprite_paths.asm".to_string(),
                byte_len: 42,
                sha256_hex: sha256_hex(b"stand-in"),
            }],
        };

        let json = serde_json::to_string_pretty(&manifest).expect("manifest serializes");
        let parsed: GeneratedManifest = serde_json::from_str(&json).expect("manifest parses");
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn manifest_json_keeps_its_field_names() {
        let manifest = GeneratedManifest {
            table_format_version: TABLE_FORMAT_VERSION,
            generator_version: "0.1.0".to_string(),
            ring_count: 0,
            total_waypoints: 0,
            hit_flag_count: 0,
            hit_count: 0,
            grid_masks_emitted: false,
            files: Vec::new(),
        };
        let value = serde_json::to_value(&manifest).expect("manifest serializes");
        assert!(value.get("table_format_version").is_some());
        assert!(value.get("generator_version").is_some());
        assert!(value.get("files").is_some());
    }
}
