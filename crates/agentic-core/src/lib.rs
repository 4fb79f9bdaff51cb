pub mod catalog;
pub mod cleanup;
pub mod copy;
pub mod error;
pub mod ide;
pub mod install;
pub mod io;
pub mod migrate;
pub mod namespace;
pub mod naming;
pub mod paths;
pub mod settings;
pub mod strategy;
pub mod template;
pub mod workflows;

pub use error::{AgenticError, Result};
