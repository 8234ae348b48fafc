use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::Deserialize;

use crate::utils::tmux::SplitKind;

/// Extensions searched, in order, when resolving a project name to a layout file.
const LAYOUT_EXTENSIONS: &[&str] = &["yml", "yaml", "toml"];

/// Layout file used when neither a project nor `--file` is given.
pub const LOCAL_LAYOUT_FILE: &str = ".muxup.yml";

/// Embedded layout template with every option shown.
const LAYOUT_TEMPLATE: &str =
  include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/defaults/layout.template.yml"));

/// Returns the layout template for a new project, with the session name filled in.
#[must_use]
pub fn layout_template(session: &str) -> String {
  LAYOUT_TEMPLATE.replace("<session>", session)
}

/// A declared session: what `start` builds and `stop` tears down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layout {
  pub session: String,
  #[serde(default)]
  pub root: String,
  /// Shell commands run in the session root before a new session is created.
  #[serde(default)]
  pub before_start: Vec<String>,
  /// Shell commands run in the session root before the session is killed.
  #[serde(default)]
  pub stop: Vec<String>,
  #[serde(default)]
  pub windows: Vec<Window>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Window {
  pub name: String,
  #[serde(default)]
  pub root: Option<String>,
  /// tmux layout name, `even-horizontal` when unset.
  #[serde(default)]
  pub layout: Option<String>,
  /// Only created when requested by name.
  #[serde(default)]
  pub manual: bool,
  #[serde(default)]
  pub commands: Vec<String>,
  #[serde(default)]
  pub panes: Vec<Pane>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pane {
  #[serde(default)]
  pub root: Option<String>,
  #[serde(default, rename = "type")]
  pub split: SplitKind,
  #[serde(default)]
  pub commands: Vec<String>,
}

impl Layout {
  /// Check the invariants the orchestrator relies on for target addressing.
  ///
  /// # Errors
  /// Returns an error naming the first offending field.
  pub fn validate(&self) -> Result<()> {
    if self.session.trim().is_empty() {
      bail!("layout is missing a session name");
    }
    if self.session.contains([':', '.']) {
      bail!("session name '{}' must not contain ':' or '.'", self.session);
    }
    let mut seen = BTreeSet::new();
    for window in &self.windows {
      if window.name.trim().is_empty() {
        bail!("every window needs a name");
      }
      if window.name.contains([':', '.']) {
        bail!("window name '{}' must not contain ':' or '.'", window.name);
      }
      if !seen.insert(window.name.as_str()) {
        bail!("window '{}' is declared more than once", window.name);
      }
    }
    Ok(())
  }

  #[must_use]
  pub fn window(&self, name: &str) -> Option<&Window> {
    self.windows.iter().find(|w| w.name == name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
  Yaml,
  Toml,
}

impl Format {
  fn of(path: &Path) -> Self {
    match path.extension().and_then(|e| e.to_str()) {
      Some("toml") => Self::Toml,
      _ => Self::Yaml,
    }
  }
}

/// Replace `${NAME}` with an override from `vars` or the process environment.
/// Unknown names stay as written.
#[must_use]
pub fn expand_vars(text: &str, vars: &BTreeMap<String, String>) -> String {
  let var_re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid var regex");
  var_re
    .replace_all(text, |caps: &regex::Captures| {
      let name = &caps[1];
      vars
        .get(name)
        .cloned()
        .or_else(|| std::env::var(name).ok())
        .unwrap_or_else(|| caps[0].to_string())
    })
    .into_owned()
}

/// Parse layout text, choosing YAML or TOML from `path`'s extension.
///
/// # Errors
/// Returns an error if the text does not parse or fails validation.
pub fn parse_layout(text: &str, path: &Path) -> Result<Layout> {
  let layout: Layout = match Format::of(path) {
    Format::Yaml => {
      serde_yaml::from_str(text).with_context(|| format!("invalid YAML in {}", path.display()))?
    }
    Format::Toml => {
      toml::from_str(text).with_context(|| format!("invalid TOML in {}", path.display()))?
    }
  };
  layout
    .validate()
    .with_context(|| format!("invalid layout in {}", path.display()))?;
  Ok(layout)
}

/// Read, expand and parse the layout file at `path`.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a valid layout.
pub fn load_layout(path: &Path, vars: &BTreeMap<String, String>) -> Result<Layout> {
  let data =
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  parse_layout(&expand_vars(&data, vars), path)
}

/// Directory holding project layouts: `$XDG_CONFIG_HOME/muxup` or `~/.config/muxup`.
///
/// # Errors
/// Returns an error if the XDG config home cannot be resolved.
pub fn layouts_dir() -> Result<PathBuf> {
  let xdg = xdg::BaseDirectories::new();
  let config_home = xdg
    .get_config_home()
    .ok_or_else(|| anyhow::anyhow!("unable to resolve XDG config home"))?;
  Ok(config_home.join("muxup"))
}

/// Where `--debug` writes the command log.
///
/// # Errors
/// Returns an error if the XDG state home cannot be resolved.
pub fn command_log_path() -> Result<PathBuf> {
  let xdg = xdg::BaseDirectories::new();
  let state_home = xdg
    .get_state_home()
    .ok_or_else(|| anyhow::anyhow!("unable to resolve XDG state home"))?;
  Ok(state_home.join("muxup").join("muxup.log"))
}

/// Find the layout file for `project` in `dir`. Falls back to the `.yml` path when none exists.
#[must_use]
pub fn project_path_in(dir: &Path, project: &str) -> PathBuf {
  LAYOUT_EXTENSIONS
    .iter()
    .map(|ext| dir.join(format!("{project}.{ext}")))
    .find(|p| p.is_file())
    .unwrap_or_else(|| dir.join(format!("{project}.yml")))
}

/// Layout file path for a project in the user's layouts directory.
///
/// # Errors
/// Returns an error if the layouts directory cannot be resolved.
pub fn project_path(project: &str) -> Result<PathBuf> {
  Ok(project_path_in(&layouts_dir()?, project))
}

/// Project names with a layout file in `dir`, sorted and de-duplicated.
///
/// # Errors
/// Returns an error if `dir` exists but cannot be read.
pub fn list_projects_in(dir: &Path) -> Result<Vec<String>> {
  if !dir.exists() {
    return Ok(Vec::new());
  }
  let mut names = BTreeSet::new();
  for entry in fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))? {
    let path = entry?.path();
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
      continue;
    };
    if !LAYOUT_EXTENSIONS.contains(&ext) || !path.is_file() {
      continue;
    }
    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
      names.insert(stem.to_string());
    }
  }
  Ok(names.into_iter().collect())
}

/// A project argument split into its name and any `:w1,w2` window selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRef {
  pub name: String,
  pub windows: Vec<String>,
}

impl ProjectRef {
  /// Split `name[:w1,w2]`.
  ///
  /// # Errors
  /// Returns an error when a `:` is present but no window names follow it.
  pub fn parse(raw: &str) -> Result<Self> {
    let Some((name, windows)) = raw.split_once(':') else {
      return Ok(Self {
        name: raw.to_string(),
        windows: Vec::new(),
      });
    };
    let windows: Vec<String> = windows
      .split(',')
      .map(str::trim)
      .filter(|w| !w.is_empty())
      .map(str::to_string)
      .collect();
    if windows.is_empty() {
      bail!("no windows after `:` in `{raw}`");
    }
    Ok(Self {
      name: name.to_string(),
      windows,
    })
  }
}

/// Resolve the editor argv: `$EDITOR` split via shell-words, else `vi`.
#[must_use]
pub fn editor_argv() -> Vec<String> {
  std::env::var("EDITOR")
    .ok()
    .filter(|raw| !raw.trim().is_empty())
    .and_then(|raw| shell_words::split(raw.trim()).ok())
    .filter(|tokens| !tokens.is_empty())
    .unwrap_or_else(|| vec!["vi".to_string()])
}
