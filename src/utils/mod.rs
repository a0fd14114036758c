//! Various unsorted geometrical and logical operators.

pub use self::center::center;
pub use self::polar_sort::{dominant_plane_axes, sort_by_polar_angle};
pub use self::polynomial::{lerp_by_level, Antiderivative, Cubic, Linear, Polynomial, Quadratic};
pub use self::sorted_pair::SortedPair;

mod center;
pub mod hashmap;
mod polar_sort;
mod polynomial;
mod sorted_pair;
