use std::fmt::{self, Display};
use std::path::Path;

/// Ordered argument vector handed to a delegate. Immutable once built.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct InvocationRequest {
  args: Vec<String>,
}

impl InvocationRequest {
  /// Start building a request.
  pub fn builder() -> InvocationBuilder { InvocationBuilder::default() }

  /// Gets the tokens of this request, in order.
  pub fn args(&self) -> &[String] { &self.args }
}

impl Display for InvocationRequest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, arg) in self.args.iter().enumerate() {
      if i > 0 {
        f.write_str(" ")?;
      }
      if arg.is_empty() || arg.contains(char::is_whitespace) {
        write!(f, "'{}'", arg)?;
      } else {
        f.write_str(arg)?;
      }
    }
    Ok(())
  }
}

impl<'a> IntoIterator for &'a InvocationRequest {
  type Item = &'a String;
  type IntoIter = std::slice::Iter<'a, String>;
  fn into_iter(self) -> Self::IntoIter { self.args.iter() }
}

/// Builder for [`InvocationRequest`]. Absent values never produce a token.
#[derive(Default, Debug)]
pub struct InvocationBuilder {
  args: Vec<String>,
}

impl InvocationBuilder {
  /// Emit `token` if `enabled`.
  pub fn flag(mut self, token: &str, enabled: bool) -> Self {
    if enabled {
      self.args.push(token.to_string());
    }
    self
  }

  /// Emit `token` followed by `value`, if `value` is present.
  pub fn option(mut self, token: &str, value: Option<impl AsRef<str>>) -> Self {
    if let Some(value) = value {
      self.args.push(token.to_string());
      self.args.push(value.as_ref().to_string());
    }
    self
  }

  /// Emit `token` followed by `path`, if `path` is present.
  pub fn path_option(self, token: &str, path: Option<impl AsRef<Path>>) -> Self {
    let value = path.map(|p| path_to_arg(p.as_ref()));
    self.option(token, value)
  }

  /// Emit a single positional `value`.
  pub fn arg(mut self, value: impl Into<String>) -> Self {
    self.args.push(value.into());
    self
  }

  /// Emit each of `values` as a positional, in order.
  pub fn args<I, S>(mut self, values: I) -> Self where
    I: IntoIterator<Item=S>,
    S: Into<String>,
  {
    self.args.extend(values.into_iter().map(Into::into));
    self
  }

  /// Emit each of `paths` as a positional, in order.
  pub fn paths<I, P>(self, paths: I) -> Self where
    I: IntoIterator<Item=P>,
    P: AsRef<Path>,
  {
    self.args(paths.into_iter().map(|p| path_to_arg(p.as_ref())))
  }

  pub fn build(self) -> InvocationRequest {
    InvocationRequest { args: self.args }
  }
}

// Non-UTF-8 paths are forwarded lossily; the delegate's argument grammar is string based.
fn path_to_arg(path: &Path) -> String {
  path.to_string_lossy().into_owned()
}
