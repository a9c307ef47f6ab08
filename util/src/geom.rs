use glam::{ivec2, IVec2};

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

pub trait VecExt: Sized + Default {
    /// Absolute size of vector in chessboard metric.
    ///
    /// This is the grid distance when diagonal steps cost the same as
    /// orthogonal ones.
    fn chess_len(&self) -> i32;

    /// Vec points to one of the 8 cells surrounding the origin.
    fn is_adjacent(&self) -> bool {
        self.chess_len() == 1
    }

    /// Unit step (diagonals included) pointing from self towards other.
    fn dir8_towards(&self, other: &Self) -> Self;
}

impl VecExt for IVec2 {
    fn chess_len(&self) -> i32 {
        self[0].abs().max(self[1].abs())
    }

    fn dir8_towards(&self, other: &Self) -> Self {
        ivec2(other[0] - self[0], other[1] - self[1]).signum()
    }
}

/// Trace a digital differential analyzer line from `a` to `b`.
///
/// Emits one point per unit along the longer axis, both endpoints included.
/// Positions are accumulated in floating point and truncated towards zero,
/// so the result does not always agree with an integer Bresenham trace. The
/// last point is always exactly `b`.
pub fn dda_line(a: impl Into<IVec2>, b: impl Into<IVec2>) -> Vec<IVec2> {
    let (a, b): (IVec2, IVec2) = (a.into(), b.into());

    let n = (b - a).chess_len();
    if n == 0 {
        return vec![a];
    }

    let step = (b - a).as_dvec2() / n as f64;
    let mut p = a.as_dvec2();
    let mut ret = Vec::with_capacity(n as usize + 1);
    for _ in 0..n {
        ret.push(p.as_ivec2());
        p += step;
    }
    // Accumulated rounding error must not make us miss the target.
    ret.push(b);
    ret
}
