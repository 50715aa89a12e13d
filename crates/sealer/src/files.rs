//! Reading plaintext resources and writing envelope files.
//!
//! Envelopes are written to a temporary file in the destination directory and
//! renamed into place, so a failed write never leaves a truncated envelope
//! where the key broker would pick it up.

use std::fs;
use std::io::Write;
use std::path::Path;

use common::{Envelope, EnvelopeError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Read the resource to be sealed.
pub fn read_plaintext(path: &Path) -> Result<Vec<u8>, EnvelopeError> {
    let data = fs::read(path)?;
    debug!(path = %path.display(), len = data.len(), "read plaintext");
    Ok(data)
}

/// Read and parse an envelope file.
pub fn read_envelope(path: &Path) -> Result<Envelope, EnvelopeError> {
    let data = fs::read(path)?;
    Envelope::from_slice(&data)
}

/// Serialise `envelope` to `path`, replacing any existing file atomically.
///
/// `pretty` selects two-space indented JSON; otherwise the output is a single
/// line. A trailing newline is always written.
///
/// # Errors
///
/// Returns [`EnvelopeError::Io`] if the temporary file cannot be created,
/// written, or renamed over `path`.
pub fn write_envelope(path: &Path, envelope: &Envelope, pretty: bool) -> Result<(), EnvelopeError> {
    let json = envelope.to_json(pretty)?;
    write_atomic(path, format!("{json}\n").as_bytes())?;
    debug!(path = %path.display(), alg = %envelope.alg, "wrote envelope");
    Ok(())
}

/// Write decrypted plaintext to `path`, replacing any existing file atomically.
pub fn write_plaintext(path: &Path, data: &[u8]) -> Result<(), EnvelopeError> {
    write_atomic(path, data)?;
    debug!(path = %path.display(), len = data.len(), "wrote plaintext");
    Ok(())
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), EnvelopeError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
