use crate::error::ConfigError;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoConfig {
    /// Chance per frame of a random poke.
    pub poke_chance: f64,
    /// Chance per frame of clearing the surface.
    pub clear_chance: f64,
    /// Random poke force is drawn from `[0, max_force)`.
    pub max_force: f32,
    /// Interference mode flips once this much time has passed.
    pub toggle_interval_ms: u64,
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            poke_chance: 0.05,
            clear_chance: 0.0018,
            max_force: 10.0,
            toggle_interval_ms: 30_000,
        }
    }
}

impl AutoConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("poke", self.poke_chance), ("clear", self.clear_chance)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        if !self.max_force.is_finite() || self.max_force < 0.0 {
            return Err(ConfigError::Force(self.max_force));
        }
        Ok(())
    }
}

/// The uniform `[0, 1)` numbers one scheduler tick consumes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Draws {
    pub poke: f64,
    pub x: f64,
    pub y: f64,
    pub force: f64,
    pub clear: f64,
}

impl Draws {
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        Self {
            poke: rng.gen(),
            x: rng.gen(),
            y: rng.gen(),
            force: rng.gen(),
            clear: rng.gen(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AutoEvent {
    Poke { x: i64, y: i64, force: f32 },
    Clear,
    ToggleInterference,
}

/// Random pokes, occasional clears and a periodic interference flip.
///
/// Holds only the time of the last flip; the clock reading and the random
/// draws come in through [`Scheduler::tick`].
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    last_toggle_ms: Option<u64>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last flip; the next tick restarts the interval.
    pub fn disarm(&mut self) {
        self.last_toggle_ms = None;
    }

    pub fn last_toggle_ms(&self) -> Option<u64> {
        self.last_toggle_ms
    }

    pub fn tick(
        &mut self,
        cfg: &AutoConfig,
        now_ms: u64,
        draws: Draws,
        w: usize,
        h: usize,
    ) -> Vec<AutoEvent> {
        let mut events = Vec::new();

        if draws.poke < cfg.poke_chance {
            let x = ((draws.x * w as f64) as i64).min(w as i64 - 1);
            let y = ((draws.y * h as f64) as i64).min(h as i64 - 1);
            let force = (draws.force * cfg.max_force as f64) as f32;
            events.push(AutoEvent::Poke { x, y, force });
        }

        if draws.clear < cfg.clear_chance {
            events.push(AutoEvent::Clear);
        }

        match self.last_toggle_ms {
            None => self.last_toggle_ms = Some(now_ms),
            Some(last) if now_ms.saturating_sub(last) > cfg.toggle_interval_ms => {
                self.last_toggle_ms = Some(now_ms);
                events.push(AutoEvent::ToggleInterference);
            }
            Some(_) => {}
        }

        events
    }
}
