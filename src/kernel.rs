use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

// Radial falloff for pokes.
const DROP: [[f32; 9]; 9] = [
    [0.0, 0.0, 1. / 6., 1. / 5., 1. / 4., 1. / 5., 1. / 6., 0.0, 0.0],
    [0.0, 1. / 6., 1. / 5., 1. / 4., 1. / 3., 1. / 4., 1. / 5., 1. / 6., 0.0],
    [1. / 6., 1. / 5., 1. / 4., 1. / 3., 1. / 2., 1. / 3., 1. / 4., 1. / 5., 1. / 6.],
    [1. / 5., 1. / 4., 1. / 3., 1. / 2., 1.0, 1. / 2., 1. / 3., 1. / 4., 1. / 5.],
    [1. / 4., 1. / 3., 1. / 2., 1.0, 1.0, 1.0, 1. / 2., 1. / 3., 1. / 4.],
    [1. / 5., 1. / 4., 1. / 3., 1. / 2., 1.0, 1. / 2., 1. / 3., 1. / 4., 1. / 5.],
    [1. / 6., 1. / 5., 1. / 4., 1. / 3., 1. / 2., 1. / 3., 1. / 4., 1. / 5., 1. / 6.],
    [0.0, 1. / 6., 1. / 5., 1. / 4., 1. / 3., 1. / 4., 1. / 5., 1. / 6., 0.0],
    [0.0, 0.0, 1. / 6., 1. / 5., 1. / 4., 1. / 5., 1. / 6., 0.0, 0.0],
];

/// Largest accepted kernel side.
pub const MAX_KERNEL_SIZE: usize = 129;

/// Immutable odd-sized square weight matrix, centre at `(radius, radius)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self, ConfigError> {
        if size == 0 || size % 2 == 0 || size > MAX_KERNEL_SIZE {
            return Err(ConfigError::KernelSize(size));
        }
        if weights.len() != size * size {
            return Err(ConfigError::KernelShape {
                size,
                expected: size * size,
                got: weights.len(),
            });
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ConfigError::KernelWeight);
        }
        Ok(Self { size, weights })
    }

    /// 9×9 drop shape with a plus-shaped plateau of 1.0 at the centre.
    pub fn drop() -> Self {
        Self {
            size: 9,
            weights: DROP.iter().flatten().copied().collect(),
        }
    }

    /// 8-neighbour average: 1/4 off-centre, nothing at the centre.
    pub fn neighbors8() -> Self {
        Self {
            size: 3,
            weights: vec![0.25, 0.25, 0.25, 0.25, 0.0, 0.25, 0.25, 0.25, 0.25],
        }
    }

    /// 4-neighbour cross.
    pub fn neighbors4() -> Self {
        Self {
            size: 3,
            weights: vec![0.0, 0.5, 0.0, 0.5, 0.0, 0.5, 0.0, 0.5, 0.0],
        }
    }

    pub fn point() -> Self {
        Self {
            size: 1,
            weights: vec![1.0],
        }
    }

    /// Linear radial falloff, 1.0 at the centre and 0.0 at distance `radius + 1`.
    pub fn cone(radius: usize) -> Self {
        let size = 2 * radius + 1;
        let r = radius as f32 + 1.0;
        let mut weights = Vec::with_capacity(size * size);
        for y in 0..size {
            for x in 0..size {
                let dx = x as f32 - radius as f32;
                let dy = y as f32 - radius as f32;
                let d = (dx * dx + dy * dy).sqrt();
                weights.push((1.0 - d / r).max(0.0));
            }
        }
        Self { size, weights }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// Weight at an offset from the centre; zero outside the matrix.
    pub fn weight(&self, dx: isize, dy: isize) -> f32 {
        let r = self.radius() as isize;
        if dx.abs() > r || dy.abs() > r {
            return 0.0;
        }
        let x = (dx + r) as usize;
        let y = (dy + r) as usize;
        self.weights[y * self.size + x]
    }

    pub fn center(&self) -> f32 {
        self.weight(0, 0)
    }

    pub fn sum(&self) -> f32 {
        self.weights.iter().sum()
    }

    /// Non-zero taps as `(dx, dy, weight)`.
    pub fn taps(&self) -> Vec<(isize, isize, f32)> {
        let r = self.radius() as isize;
        let mut out = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let w = self.weights[y * self.size + x];
                if w != 0.0 {
                    out.push((x as isize - r, y as isize - r, w));
                }
            }
        }
        out
    }
}

/// Kernel choice as it appears in the settings file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KernelSpec {
    Drop,
    Neighbors8,
    Neighbors4,
    Point,
    Cone { radius: usize },
    Custom { size: usize, weights: Vec<f32> },
}

impl KernelSpec {
    pub fn build(&self) -> Result<Kernel, ConfigError> {
        Ok(match self {
            KernelSpec::Drop => Kernel::drop(),
            KernelSpec::Neighbors8 => Kernel::neighbors8(),
            KernelSpec::Neighbors4 => Kernel::neighbors4(),
            KernelSpec::Point => Kernel::point(),
            KernelSpec::Cone { radius } => {
                if *radius > MAX_KERNEL_SIZE / 2 {
                    return Err(ConfigError::KernelSize(radius.saturating_mul(2).saturating_add(1)));
                }
                Kernel::cone(*radius)
            }
            KernelSpec::Custom { size, weights } => Kernel::new(*size, weights.clone())?,
        })
    }
}
