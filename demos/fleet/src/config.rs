//! Environment-driven configuration for the fleet demo.
//!
//! Every variable is optional; unset means the default.
//!
//! | Variable         | Default                        | Meaning                          |
//! |------------------|--------------------------------|----------------------------------|
//! | `KIT_SEED`       | 42                             | RNG seed for reply delays/drift  |
//! | `KIT_METRIC`     | `geographic`                   | `geographic` or `signal`         |
//! | `KIT_OUTPUT_DIR` | `output/fleet`                 | Directory for the CSV logs       |
//! | `KIT_FLEET_CSV`  | *(built-in sample fleet)*      | Device CSV to load instead       |
//! | `KIT_TICKS`      | 3                              | Status sweeps after the alert    |
//! | `KIT_ALERT`      | `Severe weather approaching`   | Alert text                       |

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};

use kit_alert::BroadcastConfig;
use kit_mesh::CostMetric;

/// Parse an optional environment variable with `FromStr`, falling back to a default.
macro_rules! parse_env {
    ($var_name:expr, $ty:ty, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<$ty>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub broadcast:  BroadcastConfig,
    pub output_dir: PathBuf,
    pub fleet_csv:  Option<PathBuf>,
    pub ticks:      u32,
    pub alert:      String,
}

pub fn load_from_env() -> Result<DemoConfig> {
    let defaults = BroadcastConfig::default();
    let broadcast = BroadcastConfig {
        seed:   parse_env!("KIT_SEED", u64, defaults.seed),
        metric: parse_env!("KIT_METRIC", CostMetric, defaults.metric),
        ..defaults
    };
    broadcast.validate()?;

    Ok(DemoConfig {
        broadcast,
        output_dir: env::var("KIT_OUTPUT_DIR").map_or_else(|_| PathBuf::from("output/fleet"), PathBuf::from),
        fleet_csv:  env::var("KIT_FLEET_CSV").ok().map(PathBuf::from),
        ticks:      parse_env!("KIT_TICKS", u32, 3),
        alert:      env::var("KIT_ALERT").unwrap_or_else(|_| "Severe weather approaching".to_owned()),
    })
}

impl DemoConfig {
    pub fn log_config(&self) {
        tracing::info!(
            seed = self.broadcast.seed,
            metric = %self.broadcast.metric,
            output_dir = %self.output_dir.display(),
            fleet_csv = ?self.fleet_csv,
            ticks = self.ticks,
            "configuration loaded"
        );
    }
}
