use crate::color::{render_into, ColorMode, Frame};
use crate::config::SimConfig;
use crate::error::ConfigError;
use crate::field::{Buffers, Field, FieldStats};
use crate::kernel::Kernel;
use crate::poke::poke;
use crate::scheduler::{AutoEvent, Draws, Scheduler};
use crate::wave::{advance, Stencil, WaveParams};
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info, warn};

/// Input the platform side forwards, one per detected event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Poke { x: i64, y: i64, force: f32 },
    /// Zero both buffers.
    Reset,
    /// Zero the current buffer only.
    Jostle,
    ToggleInterference,
    ToggleAutomatic,
}

/// One simulation session: owns both field buffers, the kernels, the mode
/// flags and the automatic scheduler. Grid size never changes; start a new
/// session for a new size.
pub struct Session {
    cfg: SimConfig,
    buffers: Buffers,
    wave: WaveParams,
    poke_kernel: Kernel,
    interference: bool,
    auto: bool,
    scheduler: Scheduler,
    rng: StdRng,
    frame: Frame,
    frames: u64,
}

impl Session {
    pub fn new(cfg: SimConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let stencil = Stencil::new(&cfg.stencil.build()?)?;
        let poke_kernel = cfg.poke_kernel.build()?;

        info!(
            width = cfg.width,
            height = cfg.height,
            damping = cfg.damping,
            boundary = cfg.boundary.name(),
            "ripple session started"
        );

        Ok(Self {
            buffers: Buffers::new(cfg.width, cfg.height),
            wave: WaveParams {
                stencil,
                damping: cfg.damping,
                boundary: cfg.boundary,
            },
            poke_kernel,
            interference: cfg.interference,
            auto: cfg.auto_ripples,
            scheduler: Scheduler::new(),
            rng: StdRng::seed_from_u64(cfg.seed),
            frame: Frame::new(cfg.width, cfg.height),
            frames: 0,
            cfg,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn width(&self) -> usize {
        self.buffers.width()
    }

    pub fn height(&self) -> usize {
        self.buffers.height()
    }

    pub fn interference(&self) -> bool {
        self.interference
    }

    pub fn auto_ripples(&self) -> bool {
        self.auto
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The field at the latest time step.
    pub fn field(&self) -> &Field {
        self.buffers.current()
    }

    pub fn buffers(&self) -> &Buffers {
        &self.buffers
    }

    pub fn stats(&self) -> FieldStats {
        self.buffers.current().stats()
    }

    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Poke { x, y, force } => {
                poke(
                    self.buffers.current_mut(),
                    &self.poke_kernel,
                    x,
                    y,
                    force,
                    self.cfg.poke_style(),
                );
            }
            Command::Reset => {
                self.buffers.reset();
                debug!("reset");
            }
            Command::Jostle => {
                self.buffers.jostle();
                debug!("jostle");
            }
            Command::ToggleInterference => {
                self.interference = !self.interference;
                debug!(interference = self.interference, "color mode toggled");
            }
            Command::ToggleAutomatic => {
                self.auto = !self.auto;
                self.scheduler.disarm();
                debug!(auto = self.auto, "automatic ripples toggled");
            }
        }
    }

    /// Run one wave step, then the scheduler if automatic mode is on.
    pub fn advance_frame(&mut self, now_ms: u64) {
        let draws = if self.auto {
            Some(Draws::sample(&mut self.rng))
        } else {
            None
        };
        self.step(now_ms, draws);
    }

    /// Like [`Session::advance_frame`] with the scheduler's random numbers
    /// supplied by the caller. The draws are ignored when automatic mode is
    /// off.
    pub fn advance_frame_with(&mut self, now_ms: u64, draws: Draws) {
        self.step(now_ms, Some(draws));
    }

    fn step(&mut self, now_ms: u64, draws: Option<Draws>) {
        advance(&mut self.buffers, &self.wave);
        self.frames += 1;

        let Some(draws) = draws.filter(|_| self.auto) else {
            return;
        };
        let events = self.scheduler.tick(
            &self.cfg.auto,
            now_ms,
            draws,
            self.width(),
            self.height(),
        );
        for ev in events {
            match ev {
                AutoEvent::Poke { x, y, force } => self.apply(Command::Poke { x, y, force }),
                AutoEvent::Clear => self.apply(Command::Reset),
                AutoEvent::ToggleInterference => self.apply(Command::ToggleInterference),
            }
        }
    }

    /// Color the current field with the active mode.
    pub fn frame_image(&mut self) -> &Frame {
        let bad = render_into(
            self.buffers.current(),
            ColorMode::from_interference(self.interference),
            self.cfg.gradient(),
            self.cfg.scale,
            &mut self.frame,
        );
        if bad > 0 {
            warn!(cells = bad, frame = self.frames, "non-finite amplitudes clamped");
        }
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> SimConfig {
        SimConfig::default().with_size(24, 16)
    }

    #[test]
    fn test_rejects_invalid_config() {
        assert!(Session::new(SimConfig::default().with_size(0, 0)).is_err());
    }

    #[test]
    fn test_poke_lands_in_current() {
        let mut s = Session::new(small()).unwrap();
        s.apply(Command::Poke {
            x: 10,
            y: 8,
            force: 1.0,
        });
        assert_eq!(s.field().get(10, 8), Some(-1.0));
        assert!(s.buffers().previous().is_zero());
    }

    #[test]
    fn test_toggles() {
        let mut s = Session::new(small()).unwrap();
        assert!(s.interference());
        assert!(!s.auto_ripples());
        s.apply(Command::ToggleInterference);
        s.apply(Command::ToggleAutomatic);
        assert!(!s.interference());
        assert!(s.auto_ripples());
    }

    #[test]
    fn test_disabled_scheduler_ignores_draws() {
        let mut s = Session::new(small()).unwrap();
        let loud = Draws {
            poke: 0.0,
            x: 0.5,
            y: 0.5,
            force: 0.9,
            clear: 1.0,
        };
        s.advance_frame_with(0, loud);
        assert!(s.field().is_zero());
        assert_eq!(s.frames(), 1);
    }

    #[test]
    fn test_enabled_scheduler_pokes_and_toggles() {
        let mut s = Session::new(small()).unwrap();
        s.apply(Command::ToggleAutomatic);
        let loud = Draws {
            poke: 0.0,
            x: 0.5,
            y: 0.5,
            force: 0.5,
            clear: 1.0,
        };
        s.advance_frame_with(1_000, loud);
        assert_eq!(s.field().get(12, 8), Some(-5.0));

        let quiet = Draws {
            poke: 1.0,
            clear: 1.0,
            ..loud
        };
        s.advance_frame_with(20_000, quiet);
        assert!(s.interference());
        s.advance_frame_with(31_001, quiet);
        assert!(!s.interference());
    }

    #[test]
    fn test_scheduler_clear_resets_field() {
        let mut s = Session::new(small()).unwrap();
        s.apply(Command::Poke {
            x: 5,
            y: 5,
            force: 2.0,
        });
        s.apply(Command::ToggleAutomatic);
        let clear = Draws {
            poke: 1.0,
            clear: 0.0,
            ..Draws::default()
        };
        s.advance_frame_with(0, clear);
        assert!(s.field().is_zero());
        assert!(s.buffers().previous().is_zero());
    }

    #[test]
    fn test_frame_matches_grid() {
        let mut s = Session::new(small()).unwrap();
        let img = s.frame_image();
        assert_eq!((img.width(), img.height()), (24, 16));
    }
}
