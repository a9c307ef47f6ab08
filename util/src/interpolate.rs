/// Piecewise linear interpolation over a list of `(x, y)` control points.
///
/// Points must be sorted by x. Inputs left of the first point or right of
/// the last point clamp to the y value of the respective end point.
///
/// ```
/// # use util::segment_interpolation;
/// let curve = [(0.0, 30.0), (10.0, 10.0), (20.0, 7.0)];
/// assert_eq!(segment_interpolation(5.0, &curve), 20.0);
/// assert_eq!(segment_interpolation(-1.0, &curve), 30.0);
/// assert_eq!(segment_interpolation(100.0, &curve), 7.0);
/// ```
pub fn segment_interpolation(x: f32, points: &[(f32, f32)]) -> f32 {
    assert!(
        points.len() >= 2,
        "segment_interpolation: Need at least two points"
    );

    let (mut left_x, mut left_y) = points[0];
    if x < left_x {
        return left_y;
    }

    for &(right_x, right_y) in &points[1..] {
        if x <= right_x {
            return (x - left_x) / (right_x - left_x) * (right_y - left_y)
                + left_y;
        }
        (left_x, left_y) = (right_x, right_y);
    }

    left_y
}
