use std::path::{Path, PathBuf};

/// Expand a leading `~` to `$HOME`. Other paths are returned unchanged.
#[must_use]
pub fn expand_home(path: &str) -> PathBuf {
  let rest = if path == "~" {
    Some("")
  } else {
    path.strip_prefix("~/")
  };
  if let Some(rest) = rest
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  PathBuf::from(path)
}

/// Resolve the session root: expand `~`, then anchor relative paths at `cwd`.
#[must_use]
pub fn resolve_session_root(declared: &str, cwd: &Path) -> PathBuf {
  let expanded = expand_home(declared.trim());
  if expanded.as_os_str().is_empty() {
    return cwd.to_path_buf();
  }
  if expanded.is_absolute() {
    expanded
  } else {
    cwd.join(expanded)
  }
}

/// Resolve a window or pane root against the nearest resolved ancestor.
///
/// Empty inherits the parent, relative joins onto it, absolute is used verbatim.
#[must_use]
pub fn resolve_root(declared: Option<&str>, parent: &Path) -> PathBuf {
  match declared.map(str::trim) {
    None | Some("") => parent.to_path_buf(),
    Some(p) if Path::new(p).is_absolute() => PathBuf::from(p),
    Some(p) => parent.join(p),
  }
}
