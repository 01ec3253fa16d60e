use std::fmt::Debug;

use geo_traits::{CoordTrait, Dimensions};
use num_traits::ToPrimitive;

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Every distance and
/// splitting-plane computation in this crate is carried out in `f64`, so the trait only admits
/// types that convert into `f64` without overflow.
pub trait IndexableNum: private::Sealed + ToPrimitive + PartialOrd + Copy + Debug + Send + Sync {
    /// Convert this coordinate to `f64`.
    #[inline]
    fn as_f64(self) -> f64 {
        // Every sealed type has an f64 representation
        self.to_f64().unwrap_or(f64::NAN)
    }
}

impl IndexableNum for i8 {}
impl IndexableNum for u8 {}
impl IndexableNum for i16 {}
impl IndexableNum for u16 {}
impl IndexableNum for i32 {}
impl IndexableNum for u32 {}
impl IndexableNum for f32 {}
impl IndexableNum for f64 {}

/// A 2D point.
///
/// Points have no identity beyond their coordinates: two points with the same `x` and `y` are
/// equal, and a set of points may contain duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point<N: IndexableNum> {
    /// The x coordinate
    pub x: N,
    /// The y coordinate
    pub y: N,
}

impl<N: IndexableNum> Point<N> {
    /// Construct a new point.
    pub fn new(x: N, y: N) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    ///
    /// ```
    /// use kd_index::Point;
    ///
    /// let a = Point::new(0u8, 0);
    /// let b = Point::new(3u8, 4);
    /// assert_eq!(a.distance(&b), 5.0);
    /// assert_eq!(b.distance(&a), 5.0);
    /// ```
    #[inline]
    pub fn distance(&self, other: &Point<N>) -> f64 {
        let dx = self.x.as_f64() - other.x.as_f64();
        let dy = self.y.as_f64() - other.y.as_f64();
        (dx * dx + dy * dy).sqrt()
    }

    /// Returns `true` if either coordinate is NaN.
    #[inline]
    pub(crate) fn has_nan(&self) -> bool {
        self.x.as_f64().is_nan() || self.y.as_f64().is_nan()
    }
}

impl<N: IndexableNum> From<(N, N)> for Point<N> {
    fn from((x, y): (N, N)) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> From<[N; 2]> for Point<N> {
    fn from([x, y]: [N; 2]) -> Self {
        Self { x, y }
    }
}

impl<N: IndexableNum> CoordTrait for Point<N> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 => self.x,
            1 => self.y,
            _ => panic!("Invalid index of coord"),
        }
    }

    fn x(&self) -> Self::T {
        self.x
    }

    fn y(&self) -> Self::T {
        self.y
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}
