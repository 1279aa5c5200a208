//! Ambient runtime configuration, pulled out of `main.rs` so the REPL
//! history path and the interpreter's recursion budget are overridable
//! without recompiling. Defaults match what the teacher hardcoded inline
//! (`home::home_dir()` joined with a dotfile) plus a call-depth ceiling the
//! teacher had no equivalent for (spec.md mentions no cancellation model
//! for a runaway script; this is the core's own stack-overflow guard, not
//! a host-level timeout).

use std::path::PathBuf;

const DEFAULT_MAX_CALL_DEPTH: usize = 1024;
const HISTORY_FILE_NAME: &str = ".glint_history";

pub struct Config {
    pub history_file: PathBuf,
    pub max_call_depth: usize,
}

impl Config {
    pub fn load() -> Self {
        let history_file = std::env::var_os("GLINT_HISTORY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| home::home_dir().unwrap_or_default().join(HISTORY_FILE_NAME));

        let max_call_depth = std::env::var("GLINT_MAX_CALL_DEPTH")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(DEFAULT_MAX_CALL_DEPTH);

        Config { history_file, max_call_depth }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            history_file: home::home_dir().unwrap_or_default().join(HISTORY_FILE_NAME),
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
        }
    }
}
