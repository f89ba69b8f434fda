use std::path::PathBuf;

use clap::Args;
use tracing::info;

use crate::delegate::GrammarCompiler;
use crate::invocation::InvocationRequest;

/// Generate parser and lexer from ANTLR grammar files.
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
  /// Directory where generated files are placed.
  #[arg(short = 'o', long = "out", value_name = "DIR")]
  pub output_directory: Option<PathBuf>,
  /// Location of imported grammar and tokens files.
  #[arg(long = "lib", value_name = "DIR")]
  pub library_directory: Option<PathBuf>,
  /// Generate rule augmented transition network diagrams.
  #[arg(long)]
  pub atn: bool,
  /// Grammar file encoding, e.g. euc-jp.
  #[arg(long, value_name = "ENC")]
  pub encoding: Option<String>,
  /// Output style for messages: antlr, gnu, or vs2005.
  #[arg(long, value_name = "FORMAT")]
  pub message_format: Option<String>,
  /// Show exception details for errors and warnings when available.
  #[arg(long)]
  pub long_messages: bool,
  /// Generate a parse tree listener.
  #[arg(long, overrides_with = "no_listener")]
  listener: bool,
  /// Do not generate a parse tree listener.
  #[arg(long, overrides_with = "listener")]
  no_listener: bool,
  /// Generate a parse tree visitor.
  #[arg(long, overrides_with = "no_visitor")]
  visitor: bool,
  /// Do not generate a parse tree visitor.
  #[arg(long, overrides_with = "visitor")]
  no_visitor: bool,
  /// Package or namespace for the generated code.
  #[arg(long = "package", value_name = "NAMESPACE")]
  pub namespace: Option<String>,
  /// Generate file dependencies.
  #[arg(long)]
  pub depend: bool,
  /// Set or override a grammar-level option.
  #[arg(short = 'D', value_name = "OPTION=VALUE", value_parser = parse_grammar_option)]
  pub grammar_options: Vec<(String, String)>,
  /// Treat warnings as errors.
  #[arg(long = "Werror")]
  pub warnings_as_errors: bool,
  /// Launch the StringTemplate visualizer on generated code.
  #[arg(long = "XdbgST")]
  pub debug_string_template: bool,
  /// Wait for the StringTemplate visualizer to close before continuing.
  #[arg(long = "XdbgSTWait")]
  pub debug_string_template_wait: bool,
  /// Use the ATN simulator for all predictions.
  #[arg(long = "Xforce-atn")]
  pub force_atn: bool,
  /// Dump lots of logging info to antlr-<timestamp>.log.
  #[arg(long = "Xlog")]
  pub log: bool,
  /// All output goes into the output directory regardless of paths or package.
  #[arg(long = "Xexact-output-dir")]
  pub exact_output_dir: bool,
  /// Grammar files (.g4) to process.
  #[arg(required = true, value_name = "GRAMMAR_FILE")]
  pub grammar_files: Vec<PathBuf>,
}

/// Whether a piece of code gets generated, when explicitly requested either way.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Generation {
  Enabled,
  Disabled,
}

impl Generation {
  fn from_flags(enabled: bool, disabled: bool) -> Option<Self> {
    // `overrides_with` leaves at most one of the two set.
    match (enabled, disabled) {
      (true, _) => Some(Self::Enabled),
      (false, true) => Some(Self::Disabled),
      (false, false) => None,
    }
  }
}

impl GenerateArgs {
  /// Listener generation as requested on the command line, `None` leaving it to the compiler's default.
  pub fn listener(&self) -> Option<Generation> {
    Generation::from_flags(self.listener, self.no_listener)
  }

  /// Visitor generation as requested on the command line, `None` leaving it to the compiler's default.
  pub fn visitor(&self) -> Option<Generation> {
    Generation::from_flags(self.visitor, self.no_visitor)
  }

  /// Grammar-level option overrides with unique keys. A repeated key keeps the position of its first occurrence and
  /// the value of its last.
  pub fn unique_grammar_options(&self) -> Vec<(&str, &str)> {
    let mut options: Vec<(&str, &str)> = Vec::with_capacity(self.grammar_options.len());
    for (key, value) in &self.grammar_options {
      match options.iter_mut().find(|(k, _)| *k == key.as_str()) {
        Some(existing) => existing.1 = value.as_str(),
        None => options.push((key.as_str(), value.as_str())),
      }
    }
    options
  }

  /// Assemble the arguments for the grammar compiler. The order is fixed, independent of the order in which flags
  /// were given.
  pub fn to_request(&self) -> InvocationRequest {
    let listener = self.listener();
    let visitor = self.visitor();
    InvocationRequest::builder()
      .path_option("-o", self.output_directory.as_ref())
      .path_option("-lib", self.library_directory.as_ref())
      .flag("-atn", self.atn)
      .option("-encoding", self.encoding.as_ref())
      .option("-message-format", self.message_format.as_ref())
      .flag("-long-messages", self.long_messages)
      .flag("-listener", listener == Some(Generation::Enabled))
      .flag("-no-listener", listener == Some(Generation::Disabled))
      .flag("-visitor", visitor == Some(Generation::Enabled))
      .flag("-no-visitor", visitor == Some(Generation::Disabled))
      .option("-package", self.namespace.as_ref())
      .flag("-depend", self.depend)
      .args(self.unique_grammar_options().into_iter().map(|(key, value)| format!("-D{}={}", key, value)))
      .flag("-Werror", self.warnings_as_errors)
      .flag("-XdbgST", self.debug_string_template)
      .flag("-XdbgSTWait", self.debug_string_template_wait)
      .flag("-Xforce-atn", self.force_atn)
      .flag("-Xlog", self.log)
      .flag("-Xexact-output-dir", self.exact_output_dir)
      .paths(&self.grammar_files)
      .build()
  }

  /// Compile the grammar files with `compiler`.
  ///
  /// # Errors
  ///
  /// Returns the compiler's error unchanged.
  pub fn execute(&self, compiler: &impl GrammarCompiler) -> Result<(), anyhow::Error> {
    let request = self.to_request();
    info!(grammars = self.grammar_files.len(), %request, "compiling grammars");
    compiler.compile(&request)
  }
}

fn parse_grammar_option(s: &str) -> Result<(String, String), String> {
  let (key, value) = s.split_once('=')
    .ok_or_else(|| format!("invalid grammar option '{}': expected OPTION=VALUE", s))?;
  if key.is_empty() {
    return Err(format!("invalid grammar option '{}': option name is empty", s));
  }
  Ok((key.to_string(), value.to_string()))
}
