use crate::field::Field;
use crate::kernel::Kernel;
use serde::{Deserialize, Serialize};

/// Whether a poke pushes the surface down or lifts it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PokeSign {
    /// Subtract the kernel: a finger pressing into the water.
    #[default]
    Depress,
    Raise,
}

impl PokeSign {
    #[inline]
    fn factor(self) -> f32 {
        match self {
            PokeSign::Depress => -1.0,
            PokeSign::Raise => 1.0,
        }
    }
}

/// What happens when the kernel footprint hangs over the grid edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Apply the part of the kernel that lands inside the grid.
    #[default]
    Clip,
    /// Drop the whole poke unless the full footprint fits.
    Skip,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PokeStyle {
    pub sign: PokeSign,
    pub edges: EdgePolicy,
}

/// Add `sign · force · kernel` to `field` with the kernel centre on `(cx, cy)`.
///
/// Returns whether any cell was touched. Never resizes the field; a zero
/// force, a non-finite force or a footprint entirely off the grid leave it
/// untouched.
pub fn poke(field: &mut Field, kernel: &Kernel, cx: i64, cy: i64, force: f32, style: PokeStyle) -> bool {
    if force == 0.0 || !force.is_finite() {
        return false;
    }
    let r = kernel.radius() as i64;
    let (w, h) = (field.width() as i64, field.height() as i64);

    let x0 = cx.saturating_sub(r);
    let y0 = cy.saturating_sub(r);
    let x1 = cx.saturating_add(r);
    let y1 = cy.saturating_add(r);

    if x1 < 0 || y1 < 0 || x0 >= w || y0 >= h {
        return false;
    }
    if style.edges == EdgePolicy::Skip && (x0 < 0 || y0 < 0 || x1 >= w || y1 >= h) {
        return false;
    }

    let amount = style.sign.factor() * force;
    for y in y0.max(0)..=y1.min(h - 1) {
        for x in x0.max(0)..=x1.min(w - 1) {
            let k = kernel.weight((x - cx) as isize, (y - cy) as isize);
            if k != 0.0 {
                field.add(x as usize, y as usize, amount * k);
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIP: PokeStyle = PokeStyle {
        sign: PokeSign::Depress,
        edges: EdgePolicy::Clip,
    };
    const SKIP: PokeStyle = PokeStyle {
        sign: PokeSign::Depress,
        edges: EdgePolicy::Skip,
    };

    #[test]
    fn test_centered_poke_subtracts_kernel() {
        let mut f = Field::zeros(20, 20);
        assert!(poke(&mut f, &Kernel::drop(), 10, 10, 2.0, CLIP));
        assert_eq!(f.get(10, 10), Some(-2.0));
        assert!((f.get(10, 12).unwrap() + 1.0).abs() < 1e-6);
        assert_eq!(f.get(14, 14), Some(0.0));
        assert_eq!(f.get(15, 10), Some(0.0));
    }

    #[test]
    fn test_raise_adds() {
        let mut f = Field::zeros(5, 5);
        let style = PokeStyle {
            sign: PokeSign::Raise,
            edges: EdgePolicy::Clip,
        };
        poke(&mut f, &Kernel::point(), 2, 2, 0.5, style);
        assert_eq!(f.get(2, 2), Some(0.5));
    }

    #[test]
    fn test_zero_force_is_noop() {
        let mut f = Field::zeros(10, 10);
        f.set(3, 3, 0.25);
        let before = f.clone();
        assert!(!poke(&mut f, &Kernel::drop(), 5, 5, 0.0, CLIP));
        assert_eq!(f, before);
    }

    #[test]
    fn test_outside_grid_never_mutates() {
        let mut f = Field::zeros(10, 10);
        let k = Kernel::drop();
        for (x, y) in [
            (-5, 5),
            (5, -5),
            (14, 0),
            (0, 14),
            (-100, -100),
            (i64::MAX / 2, 3),
            (i64::MAX, 3),
            (i64::MIN, 3),
            (3, i64::MAX),
            (i64::MIN, i64::MIN),
        ] {
            assert!(!poke(&mut f, &k, x, y, 3.0, CLIP));
            assert!(!poke(&mut f, &k, x, y, 3.0, SKIP));
        }
        assert!(f.is_zero());
    }

    #[test]
    fn test_edge_policies() {
        let k = Kernel::drop();

        let mut clipped = Field::zeros(10, 10);
        assert!(poke(&mut clipped, &k, 1, 1, 1.0, CLIP));
        assert_eq!(clipped.get(1, 1), Some(-1.0));
        assert_eq!(clipped.cells().len(), 100);

        let mut skipped = Field::zeros(10, 10);
        assert!(!poke(&mut skipped, &k, 1, 1, 1.0, SKIP));
        assert!(skipped.is_zero());

        assert!(poke(&mut skipped, &k, 4, 4, 1.0, SKIP));
        assert_eq!(skipped.get(4, 4), Some(-1.0));
    }

    #[test]
    fn test_nan_force_ignored() {
        let mut f = Field::zeros(10, 10);
        assert!(!poke(&mut f, &Kernel::drop(), 5, 5, f32::NAN, CLIP));
        assert!(f.is_zero());
    }
}
