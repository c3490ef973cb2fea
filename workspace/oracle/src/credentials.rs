use std::io::{Error, ErrorKind, Result};
use std::path::{Path, PathBuf};

use scroll::ServiceAccountKey;

use crate::http::json_error;

/// The directory holding the running executable, with symlinks resolved.
pub fn program_dir() -> Result<PathBuf> {
  let executable = std::env::current_exe()?;
  let resolved = std::fs::canonicalize(&executable).unwrap_or(executable);

  resolved
    .parent()
    .map(|parent| parent.to_path_buf())
    .ok_or_else(|| Error::new(ErrorKind::NotFound, "executable has no parent directory"))
}

/// Credential names are relative to `base`; absolute paths are kept as they are.
pub fn resolve<P>(base: &Path, name: P) -> PathBuf
where
  P: AsRef<Path>,
{
  base.join(name)
}

pub fn parse(contents: &str) -> Result<ServiceAccountKey> {
  serde_json::from_str::<ServiceAccountKey>(contents).map_err(|error| {
    log::warn!("unable to parse service account key - {}", error);
    json_error(error)
  })
}

pub fn load(path: &Path) -> Result<ServiceAccountKey> {
  log::debug!("loading service account key from '{}'", path.display());

  let contents = std::fs::read_to_string(path).map_err(|error| {
    log::warn!("unable to read credential file '{}' - {}", path.display(), error);
    Error::new(error.kind(), format!("{} ({})", error, path.display()))
  })?;

  let key = parse(&contents)?;
  log::info!("loaded credentials for '{}'", key.client_email);
  Ok(key)
}
