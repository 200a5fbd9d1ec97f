//! Shared I/O helpers for the OxiFloat CLI.

use std::error::Error;
use std::fs;
use std::io::{self, Read, Write};

/// Read a whole input, treating "-" as stdin.
pub fn read_input(path: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    if path == "-" {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        Ok(data)
    } else {
        Ok(fs::read(path)?)
    }
}

/// Write a whole output, treating "-" as stdout.
pub fn write_output(path: &str, data: &[u8]) -> Result<(), Box<dyn Error>> {
    if path == "-" {
        io::stdout().write_all(data)?;
        io::stdout().flush()?;
    } else {
        fs::write(path, data)?;
    }
    Ok(())
}

/// Reinterpret raw bytes as little-endian f32 values.
pub fn floats_from_bytes(bytes: &[u8]) -> Result<Vec<f32>, Box<dyn Error>> {
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "input holds {} bytes, which is not a whole number of f32 values",
            bytes.len()
        )
        .into());
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Serialize f32 values as little-endian bytes.
pub fn floats_to_bytes(floats: &[f32]) -> Vec<u8> {
    let mut out = Vec::with_capacity(floats.len() * 4);
    for f in floats {
        out.extend_from_slice(&f.to_le_bytes());
    }
    out
}

/// Human-readable byte size.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_byte_roundtrip() {
        let floats = [0.0f32, -1.5, 3.25e7];
        let bytes = floats_to_bytes(&floats);
        assert_eq!(floats_from_bytes(&bytes).unwrap(), floats);
    }

    #[test]
    fn test_rejects_ragged_input() {
        assert!(floats_from_bytes(&[1, 2, 3]).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KiB");
    }
}
