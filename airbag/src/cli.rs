use std::ffi::OsStr;
use std::io::{self, Write};

use clap::{CommandFactory, Parser, Subcommand};

use crate::delegate::{GrammarCompiler, TestHarness};
use crate::generate::GenerateArgs;
use crate::run::RunArgs;

/// Raw argument marking that the test rig owns a GUI window, which this process must not force closed.
pub const DETACH_ARG: &str = "--gui";

/// Generate ANTLR parsers and run them on input.
#[derive(Parser, Debug)]
#[command(name = "airbag", version, propagate_version = true)]
pub struct Cli {
  #[command(subcommand)]
  pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Generate parser and lexer from ANTLR grammar files.
  Generate(GenerateArgs),
  /// Run a lexer/parser combination, optionally printing the token stream or parse tree, or rendering the tree.
  Run(RunArgs),
}

/// How a successful command finished.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Completion {
  pub exit_code: u8,
  /// A delegate may own a graphical surface that this process must not force closed.
  pub detach: bool,
}

/// Returns `true` if [`DETACH_ARG`] occurs anywhere in `args`.
pub fn wants_detach<I, T>(args: I) -> bool where
  I: IntoIterator<Item=T>,
  T: AsRef<OsStr>,
{
  args.into_iter().any(|a| a.as_ref() == DETACH_ARG)
}

impl Cli {
  /// Execute the selected subcommand with `delegates`. Without a subcommand, prints usage to standard error.
  ///
  /// # Errors
  ///
  /// Returns the delegate's error when it fails.
  pub fn execute<D: GrammarCompiler + TestHarness>(self, delegates: &D, detach: bool) -> Result<Completion, anyhow::Error> {
    match self.command {
      Some(Command::Generate(args)) => args.execute(delegates)?,
      Some(Command::Run(args)) => args.execute(delegates)?,
      None => {
        // Ignore error: nothing sensible can be done when standard error is closed.
        let _ = write!(io::stderr(), "{}", Self::command().render_help());
      }
    }
    Ok(Completion { exit_code: 0, detach })
  }
}
