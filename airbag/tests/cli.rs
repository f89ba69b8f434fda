use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Command for the `airbag` binary, isolated from the developer's environment and `.env` files.
fn airbag(work_dir: &TempDir) -> assert_cmd::Command {
  let mut cmd = cargo_bin_cmd!("airbag");
  cmd.current_dir(work_dir.path())
    .env_remove("AIRBAG_JAVA")
    .env_remove("AIRBAG_ANTLR_JAR")
    .env_remove("AIRBAG_CLASSPATH")
    .env_remove("AIRBAG_LOG");
  cmd
}

#[test]
fn no_subcommand_prints_usage_to_stderr() {
  let work_dir = TempDir::new().unwrap();
  airbag(&work_dir)
    .assert()
    .success()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Usage:").and(predicate::str::contains("generate")));
}

#[test]
fn help_and_version() {
  let work_dir = TempDir::new().unwrap();
  airbag(&work_dir).args(["generate", "--help"])
    .assert()
    .success()
    .stdout(predicate::str::contains("--Xexact-output-dir").and(predicate::str::contains("--no-visitor")));
  airbag(&work_dir).args(["run", "--version"])
    .assert()
    .success()
    .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_grammar_file_is_a_usage_error() {
  let work_dir = TempDir::new().unwrap();
  airbag(&work_dir).args(["generate", "-o", "out"])
    .env("AIRBAG_JAVA", "/nonexistent/bin/java")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("GRAMMAR_FILE"));
}

#[test]
fn missing_start_rule_is_a_usage_error() {
  let work_dir = TempDir::new().unwrap();
  airbag(&work_dir).args(["run", "MyGrammar"])
    .env("AIRBAG_JAVA", "/nonexistent/bin/java")
    .assert()
    .code(2)
    .stderr(predicate::str::contains("START_RULE_NAME"));
}

#[test]
fn missing_java_is_reported() {
  let work_dir = TempDir::new().unwrap();
  airbag(&work_dir).args(["generate", "A.g4"])
    .env("AIRBAG_JAVA", "/nonexistent/bin/java")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("/nonexistent/bin/java").and(predicate::str::contains("AIRBAG_JAVA")));
}

#[test]
fn missing_antlr_jar_is_reported() {
  let work_dir = TempDir::new().unwrap();
  airbag(&work_dir).args(["generate", "A.g4"])
    .env("AIRBAG_ANTLR_JAR", "missing-antlr.jar")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("missing-antlr.jar"));
}

#[cfg(unix)]
mod fake_java {
  use std::fs;
  use std::os::unix::fs::PermissionsExt;
  use std::path::PathBuf;

  use super::*;

  /// Writes a `java` stand-in into `work_dir` that records its arguments, one per line, into `args.txt` and exits
  /// with `exit_code`.
  fn fake_java(work_dir: &TempDir, exit_code: i32) -> PathBuf {
    let path = work_dir.path().join("java");
    let script = format!("#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$(dirname \"$0\")/args.txt\"\nexit {}\n", exit_code);
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
  }

  fn recorded_args(work_dir: &TempDir) -> Option<Vec<String>> {
    let text = fs::read_to_string(work_dir.path().join("args.txt")).ok()?;
    Some(text.lines().map(str::to_string).collect())
  }

  #[test]
  fn generate_invokes_tool() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 0);
    airbag(&work_dir).args(["generate", "--package", "foo.bar", "-D", "language=Java", "--atn", "A.g4", "B.g4"])
      .env("AIRBAG_JAVA", &java)
      .env("AIRBAG_CLASSPATH", "classes")
      .assert()
      .success();
    assert_eq!(
      recorded_args(&work_dir).unwrap(),
      ["-cp", "classes", "org.antlr.v4.Tool", "-atn", "-package", "foo.bar", "-Dlanguage=Java", "A.g4", "B.g4"]
    );
  }

  #[test]
  fn run_invokes_test_rig() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 0);
    airbag(&work_dir).args(["run", "MyGrammar", "start", "--tree", "input.txt"])
      .env("AIRBAG_JAVA", &java)
      .assert()
      .success();
    assert_eq!(
      recorded_args(&work_dir).unwrap(),
      ["-cp", ".", "org.antlr.v4.gui.TestRig", "MyGrammar", "start", "-tree", "input.txt"]
    );
  }

  #[test]
  fn jar_precedes_classpath() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 0);
    let jar = work_dir.path().join("antlr-complete.jar");
    fs::write(&jar, b"").unwrap();
    airbag(&work_dir).args(["run", "MyGrammar", "start"])
      .env("AIRBAG_JAVA", &java)
      .env("AIRBAG_ANTLR_JAR", &jar)
      .assert()
      .success();
    let jar = fs::canonicalize(&jar).unwrap();
    let classpath = format!("{}:.", jar.display());
    assert_eq!(
      recorded_args(&work_dir).unwrap(),
      ["-cp", classpath.as_str(), "org.antlr.v4.gui.TestRig", "MyGrammar", "start"]
    );
  }

  #[test]
  fn delegate_exit_code_is_forwarded() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 3);
    airbag(&work_dir).args(["generate", "Broken.g4"])
      .env("AIRBAG_JAVA", &java)
      .assert()
      .code(3)
      .stderr(predicate::str::contains("ANTLR tool failed with exit code 3"));
  }

  #[test]
  fn gui_run_forwards_rig_failure() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 3);
    airbag(&work_dir).args(["run", "Expr", "prog", "--gui", "in.txt"])
      .env("AIRBAG_JAVA", &java)
      .assert()
      .code(3)
      .stderr(predicate::str::contains("ANTLR test rig failed with exit code 3"));
  }

  #[test]
  fn gui_run_waits_for_rig() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 0);
    airbag(&work_dir).args(["run", "Expr", "prog", "--gui", "in.txt"])
      .env("AIRBAG_JAVA", &java)
      .assert()
      .success();
    // The rig has finished writing by the time the command returns.
    assert_eq!(
      recorded_args(&work_dir).unwrap(),
      ["-cp", ".", "org.antlr.v4.gui.TestRig", "Expr", "prog", "-gui", "in.txt"]
    );
  }

  #[test]
  fn usage_error_never_invokes_delegate() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 0);
    airbag(&work_dir).args(["generate", "--atn"])
      .env("AIRBAG_JAVA", &java)
      .assert()
      .code(2);
    airbag(&work_dir).args(["run", "MyGrammar", "--tree"])
      .env("AIRBAG_JAVA", &java)
      .assert()
      .code(2);
    assert_eq!(recorded_args(&work_dir), None);
  }

  #[test]
  fn environment_file_configures_java() {
    let work_dir = TempDir::new().unwrap();
    let java = fake_java(&work_dir, 0);
    fs::write(work_dir.path().join(".env"), format!("AIRBAG_JAVA={}\nAIRBAG_CLASSPATH=gen\n", java.display())).unwrap();
    airbag(&work_dir).args(["generate", "-o", "out", "MyGrammar.g4"])
      .assert()
      .success();
    assert_eq!(
      recorded_args(&work_dir).unwrap(),
      ["-cp", "gen", "org.antlr.v4.Tool", "-o", "out", "MyGrammar.g4"]
    );
  }
}
