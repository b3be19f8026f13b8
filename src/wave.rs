use crate::error::ConfigError;
use crate::field::{Buffers, Field};
use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};

/// What a stencil tap sees when it falls outside the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Outside cells read as zero; waves partially reflect off the edges.
    #[default]
    Zero,
    /// Periodic: leaving one edge re-enters at the opposite one.
    Wrap,
    /// Outside cells copy the nearest edge cell.
    Replicate,
}

impl BoundaryMode {
    pub fn name(self) -> &'static str {
        match self {
            BoundaryMode::Zero => "zero",
            BoundaryMode::Wrap => "wrap",
            BoundaryMode::Replicate => "replicate",
        }
    }

    #[inline]
    fn resolve(self, x: isize, y: isize, w: usize, h: usize) -> Option<usize> {
        let (wi, hi) = (w as isize, h as isize);
        let (xx, yy) = match self {
            BoundaryMode::Zero => {
                if x < 0 || y < 0 || x >= wi || y >= hi {
                    return None;
                }
                (x, y)
            }
            BoundaryMode::Wrap => (x.rem_euclid(wi), y.rem_euclid(hi)),
            BoundaryMode::Replicate => (x.clamp(0, wi - 1), y.clamp(0, hi - 1)),
        };
        Some(yy as usize * w + xx as usize)
    }
}

/// A propagation kernel prepared for repeated use: its non-zero taps and the
/// factor that divides by half the total weight, so that `2·avg(u_t) - u_{t-1}`
/// leaves a uniform field unchanged.
#[derive(Clone, Debug)]
pub struct Stencil {
    taps: Vec<(isize, isize, f32)>,
    radius: usize,
    norm: f32,
}

impl Stencil {
    pub fn new(kernel: &Kernel) -> Result<Self, ConfigError> {
        let sum = kernel.sum();
        if sum <= 0.0 {
            return Err(ConfigError::EmptyStencil);
        }
        Ok(Self {
            taps: kernel.taps(),
            radius: kernel.radius(),
            norm: 2.0 / sum,
        })
    }

    #[inline]
    fn apply_interior(&self, f: &Field, x: usize, y: usize) -> f32 {
        let cells = f.cells();
        let w = f.width() as isize;
        let i = f.idx(x, y) as isize;
        let mut acc = 0.0;
        for &(dx, dy, wt) in &self.taps {
            acc += wt * cells[(i + dy * w + dx) as usize];
        }
        acc
    }

    #[inline]
    fn apply_edge(&self, f: &Field, x: usize, y: usize, boundary: BoundaryMode) -> f32 {
        let cells = f.cells();
        let mut acc = 0.0;
        for &(dx, dy, wt) in &self.taps {
            if let Some(j) = boundary.resolve(
                x as isize + dx,
                y as isize + dy,
                f.width(),
                f.height(),
            ) {
                acc += wt * cells[j];
            }
        }
        acc
    }
}

/// Parameters of the wave update that stay fixed for a session.
#[derive(Clone, Debug)]
pub struct WaveParams {
    pub stencil: Stencil,
    pub damping: f32,
    pub boundary: BoundaryMode,
}

/// Advance the field one time step.
///
/// `next = damping · (Σ stencil·current / (Σ stencil / 2) − previous)` for
/// every cell. The result is written over `previous` (each previous cell is
/// only read at its own position) and the two buffers then trade places, so
/// afterwards `current` holds t+1 and `previous` holds t.
pub fn advance(buffers: &mut Buffers, params: &WaveParams) {
    let (w, h) = (buffers.width(), buffers.height());
    let r = params.stencil.radius;
    let norm = params.stencil.norm;
    let damping = params.damping;

    {
        let (cur, prev) = buffers.split_mut();
        let prev_cells = prev.cells_mut();
        for y in 0..h {
            let y_inside = y >= r && y + r < h;
            for x in 0..w {
                let acc = if y_inside && x >= r && x + r < w {
                    params.stencil.apply_interior(cur, x, y)
                } else {
                    params.stencil.apply_edge(cur, x, y, params.boundary)
                };
                let i = y * w + x;
                prev_cells[i] = damping * (acc * norm - prev_cells[i]);
            }
        }
    }

    buffers.swap();
}
