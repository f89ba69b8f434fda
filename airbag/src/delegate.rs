//! The external engines that do the actual work, behind capability traits so that commands can be exercised without
//! a JVM.

use std::ffi::OsString;

use anyhow::Context;
use tracing::{debug, info};

use crate::config::{JAVA_VAR, ToolConfig};
use crate::error::DelegateFailed;
use crate::invocation::InvocationRequest;

/// Compiles grammars into lexers, parsers, listeners, and visitors.
pub trait GrammarCompiler {
  /// Compile with `request` as the compiler's arguments.
  ///
  /// # Errors
  ///
  /// Returns an error when the compiler cannot be launched or reports failure.
  fn compile(&self, request: &InvocationRequest) -> Result<(), anyhow::Error>;
}

/// Runs a generated lexer/parser pair on input.
pub trait TestHarness {
  /// Run with `request` as the harness's arguments.
  ///
  /// # Errors
  ///
  /// Returns an error when the harness cannot be launched or reports failure.
  fn run(&self, request: &InvocationRequest) -> Result<(), anyhow::Error>;
}

const TOOL_MAIN_CLASS: &str = "org.antlr.v4.Tool";
const TEST_RIG_MAIN_CLASS: &str = "org.antlr.v4.gui.TestRig";

/// ANTLR's grammar tool and test rig, launched in a JVM.
#[derive(Clone, Debug)]
pub struct Antlr {
  config: ToolConfig,
}

impl Antlr {
  pub fn new(config: ToolConfig) -> Self {
    Self { config }
  }

  fn expression(&self, main_class: &str, request: &InvocationRequest) -> Result<duct::Expression, anyhow::Error> {
    let args = jvm_args(self.config.resolve_classpath()?, main_class, request);
    debug!(java = ?self.config.java, args = ?args, "launching JVM");
    Ok(duct::cmd(self.config.java.clone(), args).unchecked())
  }

  fn launch_error(&self) -> String {
    format!("failed to launch Java executable '{}' (set {} to override)", self.config.java.to_string_lossy(), JAVA_VAR)
  }
}

impl GrammarCompiler for Antlr {
  fn compile(&self, request: &InvocationRequest) -> Result<(), anyhow::Error> {
    let output = self.expression(TOOL_MAIN_CLASS, request)?
      .run()
      .with_context(|| self.launch_error())?;
    check_status("ANTLR tool", output.status)
  }
}

impl TestHarness for Antlr {
  fn run(&self, request: &InvocationRequest) -> Result<(), anyhow::Error> {
    // Blocks for as long as the rig runs, including while its GUI window is open.
    let output = self.expression(TEST_RIG_MAIN_CLASS, request)?
      .run()
      .with_context(|| self.launch_error())?;
    check_status("ANTLR test rig", output.status)
  }
}

fn jvm_args(classpath: Option<OsString>, main_class: &str, request: &InvocationRequest) -> Vec<OsString> {
  let mut args = Vec::with_capacity(3 + request.args().len());
  if let Some(classpath) = classpath {
    args.push("-cp".into());
    args.push(classpath);
  }
  args.push(main_class.into());
  args.extend(request.into_iter().map(OsString::from));
  args
}

fn check_status(delegate: &'static str, status: std::process::ExitStatus) -> Result<(), anyhow::Error> {
  if status.success() {
    info!(delegate, "completed");
    Ok(())
  } else {
    Err(DelegateFailed { delegate, code: status.code() }.into())
  }
}
