use crate::color::{Gradient, Rgb};
use crate::error::ConfigError;
use crate::kernel::KernelSpec;
use crate::poke::{EdgePolicy, PokeSign, PokeStyle};
use crate::scheduler::AutoConfig;
use crate::wave::BoundaryMode;
use serde::{Deserialize, Serialize};

/// Largest accepted `width * height`.
pub const MAX_GRID_CELLS: usize = 1 << 24;

/// Everything a session is built from. Fixed once the session exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    /// Per-step energy loss, in (0, 1].
    pub damping: f32,
    pub boundary: BoundaryMode,
    /// Propagation stencil.
    pub stencil: KernelSpec,
    /// Shape stamped by a poke.
    pub poke_kernel: KernelSpec,
    pub poke_sign: PokeSign,
    pub edge_policy: EdgePolicy,
    /// Amplitude that maps to the full gradient (contrast).
    pub scale: f32,
    pub color_low: Rgb,
    pub color_high: Rgb,
    /// Start in interference mode.
    pub interference: bool,
    /// Start with automatic ripples on.
    pub auto_ripples: bool,
    pub auto: AutoConfig,
    /// Force of a fresh pointer press.
    pub click_force: f32,
    /// Force applied every frame while the pointer is held.
    pub hold_force: f32,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        let colors = Gradient::default();
        Self {
            width: 160,
            height: 90,
            damping: 0.99,
            boundary: BoundaryMode::Zero,
            stencil: KernelSpec::Neighbors8,
            poke_kernel: KernelSpec::Drop,
            poke_sign: PokeSign::Depress,
            edge_policy: EdgePolicy::Clip,
            scale: 1.0,
            color_low: colors.low,
            color_high: colors.high,
            interference: true,
            auto_ripples: false,
            auto: AutoConfig::default(),
            click_force: 2.5,
            hold_force: 0.1,
            seed: 0xC0FFEE_u64,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.width,
                height: self.height,
            });
        }
        if !matches!(self.width.checked_mul(self.height), Some(n) if n <= MAX_GRID_CELLS) {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Damping(self.damping));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::Scale(self.scale));
        }
        for f in [self.click_force, self.hold_force] {
            if !f.is_finite() || f < 0.0 {
                return Err(ConfigError::Force(f));
            }
        }
        self.stencil.build()?;
        self.poke_kernel.build()?;
        self.auto.validate()
    }

    pub fn gradient(&self) -> Gradient {
        Gradient {
            low: self.color_low,
            high: self.color_high,
        }
    }

    pub fn poke_style(&self) -> PokeStyle {
        PokeStyle {
            sign: self.poke_sign,
            edges: self.edge_policy,
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}
