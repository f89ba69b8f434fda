//! Configuration for locating the delegates, read from the environment.
//!
//! A `.env` file is loaded into the environment by the binary before [`ToolConfig::from_env`] is called, so every
//! variable here can also be set there.

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::Context;

/// Java executable used to launch the delegates.
pub const JAVA_VAR: &str = "AIRBAG_JAVA";
/// Path to the ANTLR "complete" jar.
pub const ANTLR_JAR_VAR: &str = "AIRBAG_ANTLR_JAR";
/// Extra classpath entries, in the platform's path-list syntax.
pub const CLASSPATH_VAR: &str = "AIRBAG_CLASSPATH";
/// `tracing` filter directives.
pub const LOG_VAR: &str = "AIRBAG_LOG";

const DEFAULT_JAVA: &str = "java";
const DEFAULT_CLASSPATH: &str = ".";

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ToolConfig {
  pub java: OsString,
  pub antlr_jar: Option<PathBuf>,
  pub classpath: OsString,
}

impl Default for ToolConfig {
  fn default() -> Self {
    Self {
      java: DEFAULT_JAVA.into(),
      antlr_jar: None,
      classpath: DEFAULT_CLASSPATH.into(),
    }
  }
}

impl ToolConfig {
  /// Read the configuration from the process environment.
  pub fn from_env() -> Self {
    Self::from_vars(|name| env::var_os(name))
  }

  /// Read the configuration through `var`, which looks up a variable by name. Empty values count as unset.
  pub fn from_vars(var: impl Fn(&str) -> Option<OsString>) -> Self {
    let lookup = |name: &str| var(name).filter(|v| !v.is_empty());
    let default = Self::default();
    Self {
      java: lookup(JAVA_VAR).unwrap_or(default.java),
      antlr_jar: lookup(ANTLR_JAR_VAR).map(PathBuf::from),
      classpath: lookup(CLASSPATH_VAR).unwrap_or(default.classpath),
    }
  }

  /// Classpath to pass to the JVM: the ANTLR jar (if configured) followed by the extra entries. Returns `None` when
  /// there is nothing to pass, leaving the JVM's own `CLASSPATH` in charge.
  ///
  /// # Errors
  ///
  /// Returns an error when the configured jar cannot be found, or when an entry contains the platform's path
  /// separator.
  pub fn resolve_classpath(&self) -> Result<Option<OsString>, anyhow::Error> {
    let mut entries = Vec::new();
    if let Some(jar) = &self.antlr_jar {
      // Use dunce to not make an absolute path prefixed with "\\?\" (UNC path) on Windows, as the JVM does not
      // support these.
      let jar = dunce::canonicalize(jar)
        .with_context(|| format!("ANTLR jar '{}' (from {}) was not found", jar.display(), ANTLR_JAR_VAR))?;
      entries.push(jar);
    }
    entries.extend(env::split_paths(&self.classpath));
    if entries.is_empty() {
      return Ok(None);
    }
    let classpath = env::join_paths(entries)
      .context("creating the JVM classpath failed")?;
    Ok(Some(classpath))
  }
}
