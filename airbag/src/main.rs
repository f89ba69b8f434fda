use std::env;
use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use airbag::cli::{Cli, wants_detach};
use airbag::config::{LOG_VAR, ToolConfig};
use airbag::delegate::Antlr;

fn main() -> ExitCode {
  // A missing `.env` file is fine; variables set in the environment take precedence over it.
  let dotenv_path = dotenv::dotenv().ok();
  init_tracing();
  if let Some(path) = dotenv_path {
    debug!(path = %path.display(), "loaded environment file");
  }

  let args: Vec<OsString> = env::args_os().collect();
  let detach = wants_detach(&args);
  // Exits with usage text on standard error when arguments are invalid.
  let cli = Cli::parse_from(&args);

  let delegates = Antlr::new(ToolConfig::from_env());
  match cli.execute(&delegates, detach) {
    Ok(completion) => {
      if completion.detach {
        debug!("test rig GUI was requested; not forcing exit of its window");
      }
      ExitCode::from(completion.exit_code)
    }
    Err(error) => {
      eprintln!("Error: {:?}", error);
      ExitCode::from(airbag::error::exit_code(&error))
    }
  }
}

fn init_tracing() {
  let filter = EnvFilter::try_from_env(LOG_VAR)
    .unwrap_or_else(|_| EnvFilter::new("warn"));
  tracing_subscriber::registry()
    .with(filter)
    .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
    .init();
}
