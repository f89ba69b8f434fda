//! Command-line front-end for the ANTLR grammar tool and test rig.
//!
//! Flags are translated into an [`InvocationRequest`](invocation::InvocationRequest) and handed to a
//! [`GrammarCompiler`](delegate::GrammarCompiler) or [`TestHarness`](delegate::TestHarness). The production
//! delegates launch ANTLR in a JVM; see [`config`] for how they are located.

pub mod cli;
pub mod config;
pub mod delegate;
pub mod error;
pub mod generate;
pub mod invocation;
pub mod run;
