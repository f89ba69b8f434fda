use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::delegate::TestHarness;
use crate::invocation::InvocationRequest;

/// Run a generated lexer/parser pair, optionally printing the token stream or parse tree, or rendering the tree.
/// Reads from standard input when no input files are given.
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
  /// Name of the grammar to use for parsing.
  pub grammar_name: String,
  /// Name of the rule to start parsing at.
  pub start_rule_name: String,
  /// Print the token stream from the lexer.
  #[arg(long)]
  pub tokens: bool,
  /// Print the parse tree in LISP-style format.
  #[arg(long)]
  pub tree: bool,
  /// Show the parse tree in a window.
  #[arg(long)]
  pub gui: bool,
  /// Render the parse tree to a PostScript file.
  #[arg(long = "ps", value_name = "FILE")]
  pub postscript_file: Option<String>,
  /// Encoding of the input files.
  #[arg(long, value_name = "NAME")]
  pub encoding: Option<String>,
  /// Print rule entry and exit events while parsing.
  #[arg(long)]
  pub trace: bool,
  /// Report ambiguities and context sensitivity while parsing.
  #[arg(long)]
  pub diagnostics: bool,
  /// Use the SLL prediction mode.
  #[arg(long = "SLL")]
  pub sll: bool,
  /// Input files to parse.
  #[arg(value_name = "INPUT_FILE")]
  pub input_files: Vec<PathBuf>,
}

impl RunArgs {
  /// Assemble the arguments for the test harness: grammar and start rule first, input files last.
  pub fn to_request(&self) -> InvocationRequest {
    InvocationRequest::builder()
      .arg(self.grammar_name.as_str())
      .arg(self.start_rule_name.as_str())
      .flag("-tokens", self.tokens)
      .flag("-tree", self.tree)
      .flag("-gui", self.gui)
      .option("-ps", self.postscript_file.as_ref())
      .option("-encoding", self.encoding.as_ref())
      .flag("-trace", self.trace)
      .flag("-diagnostics", self.diagnostics)
      .flag("-SLL", self.sll)
      .paths(&self.input_files)
      .build()
  }

  /// Run the test harness on the input files.
  ///
  /// # Errors
  ///
  /// Returns the harness's error unchanged.
  pub fn execute(&self, harness: &impl TestHarness) -> Result<(), anyhow::Error> {
    let request = self.to_request();
    if self.input_files.is_empty() {
      info!(%request, "running test rig on standard input");
    } else {
      info!(inputs = self.input_files.len(), %request, "running test rig");
    }
    harness.run(&request)
  }
}
