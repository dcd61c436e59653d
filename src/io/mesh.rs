//! Read/write binary mesh files.
//!
//! Layout (little-endian):
//!
//! ```text
//! offset 0 : i32          n
//! offset 4 : n*n x f64    values, row-major (j varies fastest)
//! ```
//!
//! Values are copied bit-for-bit; NaN and infinities survive a round-trip.
//! Bytes after the last value are never read.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::Mesh;

const HEADER_BYTES: usize = 4;
const VALUE_BYTES: usize = 8;

/// Errors produced while decoding or encoding a mesh file.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("Failed to open mesh file '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to create mesh file '{}': {source}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Truncated mesh header: expected 4 bytes, found {found}")]
    TruncatedHeader { found: usize },
    #[error("Invalid mesh dimension {0}: must be >= 0")]
    NegativeDimension(i32),
    #[error("Mesh dimension {0} is too large")]
    DimensionTooLarge(usize),
    #[error("Truncated mesh data: n={n} needs {expected} bytes of values, found {found}")]
    TruncatedData {
        n: usize,
        expected: usize,
        found: usize,
    },
    #[error("Mesh is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
    #[error("Mesh I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a mesh file, printing start/finish progress notices to stdout.
pub fn read_mesh(path: &Path) -> Result<(usize, Mesh), MeshError> {
    let file = File::open(path).map_err(|source| MeshError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let file_len = file.metadata().map(|m| m.len()).ok();

    println!("Started reading file");
    let (n, mesh) = decode_mesh(BufReader::new(file))?;
    println!("Finished reading file");

    if let Some(len) = file_len {
        let extra = trailing_bytes(len, n)?;
        if extra > 0 {
            log::warn!(
                "ignoring {extra} trailing bytes after the {n}x{n} mesh in '{}'",
                path.display()
            );
        }
    }
    log::debug!("decoded {n}x{n} mesh from '{}'", path.display());

    Ok((n, mesh))
}

/// Decode a mesh from any byte stream.
///
/// The payload is pulled in a single bounded read so that a lying header on a
/// short stream cannot force a large allocation up front.
pub fn decode_mesh<R: Read>(mut reader: R) -> Result<(usize, Mesh), MeshError> {
    let mut header = Vec::with_capacity(HEADER_BYTES);
    (&mut reader)
        .take(HEADER_BYTES as u64)
        .read_to_end(&mut header)?;
    let header: [u8; HEADER_BYTES] = header
        .as_slice()
        .try_into()
        .map_err(|_| MeshError::TruncatedHeader { found: header.len() })?;

    let raw_n = i32::from_le_bytes(header);
    let n = usize::try_from(raw_n).map_err(|_| MeshError::NegativeDimension(raw_n))?;
    let expected = payload_len(n)?;

    let mut payload = Vec::new();
    reader.take(expected as u64).read_to_end(&mut payload)?;
    if payload.len() < expected {
        return Err(MeshError::TruncatedData {
            n,
            expected,
            found: payload.len(),
        });
    }

    let values: Vec<f64> = payload
        .chunks_exact(VALUE_BYTES)
        .map(|chunk| {
            let mut bytes = [0u8; VALUE_BYTES];
            bytes.copy_from_slice(chunk);
            f64::from_le_bytes(bytes)
        })
        .collect();
    let mesh = Mesh::from_row_slice(n, n, &values);

    Ok((n, mesh))
}

/// Write a mesh file. Returns the number of bytes written.
pub fn write_mesh(path: &Path, mesh: &Mesh) -> Result<usize, MeshError> {
    let file = File::create(path).map_err(|source| MeshError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    let written = encode_mesh(&mut writer, mesh)?;
    writer.flush()?;

    println!("File size: {written} bytes");
    println!("File successfully saved at: {}", path.display());
    Ok(written)
}

/// Encode a square mesh into any byte sink. Returns the number of bytes written.
pub fn encode_mesh<W: Write>(mut writer: W, mesh: &Mesh) -> Result<usize, MeshError> {
    if mesh.nrows() != mesh.ncols() {
        return Err(MeshError::NotSquare {
            rows: mesh.nrows(),
            cols: mesh.ncols(),
        });
    }
    let n = mesh.nrows();
    let header = i32::try_from(n).map_err(|_| MeshError::DimensionTooLarge(n))?;
    let total = encoded_len(n)?;

    writer.write_all(&header.to_le_bytes())?;
    for i in 0..n {
        for j in 0..n {
            writer.write_all(&mesh[(i, j)].to_le_bytes())?;
        }
    }
    Ok(total)
}

/// Total file size for a mesh of dimension `n`.
pub fn encoded_len(n: usize) -> Result<usize, MeshError> {
    payload_len(n)?
        .checked_add(HEADER_BYTES)
        .ok_or(MeshError::DimensionTooLarge(n))
}

/// Bytes past the end of an `n x n` mesh in a file of `file_len` bytes.
pub fn trailing_bytes(file_len: u64, n: usize) -> Result<u64, MeshError> {
    Ok(file_len.saturating_sub(encoded_len(n)? as u64))
}

fn payload_len(n: usize) -> Result<usize, MeshError> {
    n.checked_mul(n)
        .and_then(|cells| cells.checked_mul(VALUE_BYTES))
        .ok_or(MeshError::DimensionTooLarge(n))
}
