// src/config.rs
// Generator knobs. Defaults can be overridden through the environment:
//   KWTABLE_MAX_TRIES=<n>         attempts per signature before moving on
//   KWTABLE_PAYLOAD_TYPE=<Type>   payload type named by the emitted `lookup`
//   KWTABLE_JSON=<path>           also dump the finalized table as JSON

use std::path::PathBuf;

pub const DEFAULT_MAX_TRIES: usize = 10_000;
pub const DEFAULT_PAYLOAD_TYPE: &str = "TokenKind";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub max_tries: usize,
    pub payload_type: String,
    pub json_out: Option<PathBuf>,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            payload_type: DEFAULT_PAYLOAD_TYPE.to_string(),
            json_out: None,
        }
    }
}

impl GenConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a config from an arbitrary variable source; unparsable values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("KWTABLE_MAX_TRIES") {
            match raw.trim().parse::<usize>() {
                Ok(n) => cfg.max_tries = n,
                Err(e) => log::warn!("ignoring KWTABLE_MAX_TRIES={raw:?}: {e}"),
            }
        }
        if let Some(ty) = lookup("KWTABLE_PAYLOAD_TYPE") {
            let ty = ty.trim();
            if !ty.is_empty() {
                cfg.payload_type = ty.to_string();
            }
        }
        cfg.json_out = lookup("KWTABLE_JSON")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        cfg
    }
}
