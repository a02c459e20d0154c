/// Recursion level inside a [`crate::fractal::SegmentTree`].
///
/// Depth `0` is the primary three hands at the clock center; depth `d`
/// holds the hands emanating from the tips of depth `d - 1`.
pub type Depth = usize;
