//! Run configuration with documented defaults.

use crate::{SimError, SimResult};

/// Global simulation parameters.
///
/// | Field             | Default      | Meaning                                  |
/// |-------------------|--------------|------------------------------------------|
/// | `num_agents`      | `50`         | Agents spawned at run start              |
/// | `seed`            | `42`         | Root RNG seed for agent spawning         |
/// | `max_ticks`       | `10_000`     | Step budget before the run is cut off    |
/// | `dt`              | `0.05`       | Integration step in seconds              |
/// | `arrival_radius`  | `0.5`        | Distance at which a target node counts as reached |
/// | `radius_range`    | `(0.2, 0.4)` | Uniform body-radius range in metres      |
/// | `mass_range`      | `(45, 75)`   | Uniform body-mass range in kilograms     |
/// | `speed_range`     | `(3, 5)`     | Uniform max-speed range in metres/second |
/// | `output_interval` | `0`          | Ticks between observer snapshots, 0 = never |
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    pub num_agents:      usize,
    pub seed:            u64,
    pub max_ticks:       u64,
    pub dt:              f32,
    pub arrival_radius:  f32,
    pub radius_range:    (f32, f32),
    pub mass_range:      (f32, f32),
    pub speed_range:     (f32, f32),
    pub output_interval: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_agents:      50,
            seed:            42,
            max_ticks:       10_000,
            dt:              0.05,
            arrival_radius:  0.5,
            radius_range:    (0.2, 0.4),
            mass_range:      (45.0, 75.0),
            speed_range:     (3.0, 5.0),
            output_interval: 0,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> SimResult<()> {
        if self.dt <= 0.0 {
            return Err(SimError::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if self.max_ticks == 0 {
            return Err(SimError::Config("max_ticks must be at least 1".into()));
        }
        if self.arrival_radius <= 0.0 {
            return Err(SimError::Config(format!(
                "arrival_radius must be positive, got {}",
                self.arrival_radius
            )));
        }
        for (name, (lo, hi)) in [
            ("radius_range", self.radius_range),
            ("mass_range", self.mass_range),
            ("speed_range", self.speed_range),
        ] {
            if lo <= 0.0 || hi < lo {
                return Err(SimError::Config(format!(
                    "{name} must satisfy 0 < lo <= hi, got ({lo}, {hi})"
                )));
            }
        }
        Ok(())
    }
}
