//! Keystore file input and output

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use tempfile::NamedTempFile;
use tracing::debug;
use vaultkey_crypto::EncryptedKeystore;

/// Fail unless `path` is an existing regular file
pub fn check_input(path: &Path) -> Result<()> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(anyhow!("Input file not found: {}", path.display()));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to access {}", path.display()));
        }
    };

    if metadata.is_dir() {
        return Err(anyhow!("Input path is a directory: {}", path.display()));
    }
    Ok(())
}

/// Read and parse a keystore envelope
pub fn load_keystore(path: &Path) -> Result<EncryptedKeystore> {
    check_input(path)?;

    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let keystore = EncryptedKeystore::from_json(&contents)
        .map_err(|e| anyhow!("Invalid keystore file {}: {}", path.display(), e))?;

    debug!(path = %path.display(), uuid = keystore.uuid(), "loaded keystore");
    Ok(keystore)
}

/// True when `output` names the same file as `input`
pub fn same_file(input: &Path, output: &Path) -> bool {
    if input == output {
        return true;
    }
    match (fs::canonicalize(input), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Write `contents` to `path` through a sibling temporary file.
///
/// The temporary file is created owner-only, flushed to disk, then renamed
/// over `path`. If anything fails it is removed and `path` is untouched.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .context("Failed to set file permissions")?;
    }

    file.write_all(contents)
        .context("Failed to write temporary file")?;
    file.as_file()
        .sync_all()
        .context("Failed to flush temporary file")?;

    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
