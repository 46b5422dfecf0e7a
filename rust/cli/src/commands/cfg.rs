//! `holdem cfg`: prints the resolved configuration with the source of each
//! value as pretty JSON.
//!
//! ```json
//! {
//!   "starting_stack": { "value": 1500, "source": "default" },
//!   "small_blind": { "value": 25, "source": "env" },
//!   ...
//! }
//! ```

use std::io::Write;

use crate::config::{self, ConfigResolved};
use crate::error::CliError;

pub fn handle_cfg_command(out: &mut dyn Write) -> Result<(), CliError> {
    let resolved = config::load_with_sources()?;
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "starting_stack": {
            "value": config.starting_stack,
            "source": sources.starting_stack,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.small_blind.saturating_mul(2),
            "source": sources.small_blind,
        },
        "seats": {
            "value": config.seats,
            "source": sources.seats,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "max_invalid_actions": {
            "value": config.max_invalid_actions,
            "source": sources.max_invalid_actions,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, ConfigSources, ValueSource};

    #[test]
    fn writes_values_with_sources() {
        let resolved = ConfigResolved {
            config: Config {
                small_blind: 25,
                seed: Some(9),
                ..Config::default()
            },
            sources: ConfigSources {
                small_blind: ValueSource::Env,
                seed: ValueSource::File,
                ..ConfigSources::default()
            },
        };
        let mut out = Vec::new();
        write_resolved(&resolved, &mut out).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(json["small_blind"]["value"], 25);
        assert_eq!(json["small_blind"]["source"], "env");
        assert_eq!(json["big_blind"]["value"], 50);
        assert_eq!(json["seed"]["value"], 9);
        assert_eq!(json["seed"]["source"], "file");
        assert_eq!(json["starting_stack"]["source"], "default");
        assert!(String::from_utf8(out).unwrap().contains("\n  "));
    }
}
