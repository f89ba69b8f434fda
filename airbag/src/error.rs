use std::error::Error;
use std::fmt::{self, Display};

/// A delegate ran but reported failure through its exit status.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct DelegateFailed {
  /// Name of the delegate, e.g. `"ANTLR tool"`.
  pub delegate: &'static str,
  /// Exit code of the delegate process, or `None` if it was terminated by a signal.
  pub code: Option<i32>,
}

impl DelegateFailed {
  /// Exit code this process should exit with. Falls back to 1 when the delegate's code is missing, zero, or does not
  /// fit an exit code.
  pub fn exit_code(&self) -> u8 {
    self.code
      .and_then(|c| u8::try_from(c).ok())
      .filter(|c| *c != 0)
      .unwrap_or(1)
  }
}

impl Display for DelegateFailed {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.code {
      Some(code) => write!(f, "{} failed with exit code {}", self.delegate, code),
      None => write!(f, "{} was terminated by a signal", self.delegate),
    }
  }
}

impl Error for DelegateFailed {}

/// Exit code for `error`: the delegate's own code when `error` is a [`DelegateFailed`], 1 otherwise.
pub fn exit_code(error: &anyhow::Error) -> u8 {
  error.downcast_ref::<DelegateFailed>()
    .map(DelegateFailed::exit_code)
    .unwrap_or(1)
}
