use thiserror::Error;

/// Reasons a [`SimConfig`](crate::config::SimConfig) is refused at session
/// construction. Nothing on the per-frame path produces one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("damping factor must lie in (0, 1], got {0}")]
    Damping(f32),

    #[error("grid of {width}x{height} exceeds {} cells", crate::config::MAX_GRID_CELLS)]
    GridTooLarge { width: usize, height: usize },

    #[error("display scale must be positive and finite, got {0}")]
    Scale(f32),

    #[error("kernel size must be odd, non-zero and at most {}, got {0}", crate::kernel::MAX_KERNEL_SIZE)]
    KernelSize(usize),

    #[error("kernel of size {size} needs {expected} weights, got {got}")]
    KernelShape {
        size: usize,
        expected: usize,
        got: usize,
    },

    #[error("kernel weights must be finite and non-negative")]
    KernelWeight,

    #[error("stencil weights sum to zero")]
    EmptyStencil,

    #[error("{name} probability must lie in [0, 1], got {value}")]
    Probability { name: &'static str, value: f64 },

    #[error("force must be finite and non-negative, got {0}")]
    Force(f32),
}
