/// One W×H grid of wave amplitudes, row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    w: usize,
    h: usize,
    cells: Vec<f32>,
}

impl Field {
    pub fn zeros(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            cells: vec![0.0; w * h],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    /// `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.w && y < self.h {
            Some(self.cells[self.idx(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: usize, y: usize, v: f32) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = v;
        }
    }

    pub fn add(&mut self, x: usize, y: usize, dv: f32) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] += dv;
        }
    }

    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    pub fn is_zero(&self) -> bool {
        self.cells.iter().all(|&v| v == 0.0)
    }

    /// Sum of squared amplitudes.
    pub fn energy(&self) -> f64 {
        self.cells.iter().map(|&v| (v as f64) * (v as f64)).sum()
    }

    pub fn stats(&self) -> FieldStats {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in &self.cells {
            min = min.min(v);
            max = max.max(v);
        }
        if self.cells.is_empty() {
            min = 0.0;
            max = 0.0;
        }
        FieldStats {
            min,
            max,
            energy: self.energy(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FieldStats {
    pub min: f32,
    pub max: f32,
    pub energy: f64,
}

/// The field at time t (`current`) and t-1 (`previous`).
///
/// Both grids always share one shape. Advancing the wave writes the next
/// state over `previous` and then swaps the two, so no grid is ever copied or
/// reallocated after construction.
#[derive(Clone, Debug)]
pub struct Buffers {
    current: Field,
    previous: Field,
}

impl Buffers {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            current: Field::zeros(w, h),
            previous: Field::zeros(w, h),
        }
    }

    pub fn width(&self) -> usize {
        self.current.w
    }

    pub fn height(&self) -> usize {
        self.current.h
    }

    pub fn current(&self) -> &Field {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Field {
        &mut self.current
    }

    pub fn previous(&self) -> &Field {
        &self.previous
    }

    pub fn previous_mut(&mut self) -> &mut Field {
        &mut self.previous
    }

    /// Both grids at once: `(current, previous)`.
    pub fn split_mut(&mut self) -> (&Field, &mut Field) {
        (&self.current, &mut self.previous)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.previous);
    }

    /// Zero both grids.
    pub fn reset(&mut self) {
        self.current.clear();
        self.previous.clear();
    }

    /// Zero the current grid only; the remembered previous state makes the
    /// surface kick back on the next step.
    pub fn jostle(&mut self) {
        self.current.clear();
    }
}
