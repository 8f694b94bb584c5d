use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{AddAssign, SubAssign}
};
use rand::distributions::uniform::SampleUniform;

pub trait Primitive: AddAssign + Sum + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + LowerExp + 'static {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// A single sample in the 2D plane.
///
/// Points are plain values. A dataset is an ordered `Vec<Point<T>>` that is never mutated once
/// it was handed to a [`crate::ClusterEngine`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point<T: Primitive> {
    pub x: T,
    pub y: T
}
impl<T: Primitive> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Whether any of the two coordinates is NaN (e.g. the mean of an empty cluster).
    pub fn is_nan(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}
impl<T: Primitive> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}
impl<T: Primitive> Display for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4})", self.x, self.y)
    }
}


/// Convenience for building a dataset out of coordinate tuples.
pub fn points<T: Primitive>(coords: &[(T, T)]) -> Vec<Point<T>> {
    coords.iter().cloned().map(Point::from).collect()
}
