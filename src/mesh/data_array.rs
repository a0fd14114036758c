use crate::math::Real;

/// A named array of fixed-size tuples, attached to the points or to the cells of a mesh.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct DataArray {
    /// The name used to look this array up.
    pub name: String,
    /// The number of components of each tuple.
    pub num_components: usize,
    /// The tuples, stored contiguously.
    pub values: Vec<Real>,
}

impl DataArray {
    /// Creates an array from its contiguous tuple values.
    pub fn new(name: impl Into<String>, num_components: usize, values: Vec<Real>) -> Self {
        Self {
            name: name.into(),
            num_components,
            values,
        }
    }

    /// Creates an array with one component per tuple.
    pub fn scalars(name: impl Into<String>, values: Vec<Real>) -> Self {
        Self::new(name, 1, values)
    }

    /// Creates an array with three components per tuple.
    pub fn vectors(name: impl Into<String>, values: &[[Real; 3]]) -> Self {
        Self::new(name, 3, values.iter().flatten().copied().collect())
    }

    /// Creates an empty array with the same name and number of components as `self`.
    pub fn empty_like(&self) -> Self {
        Self::new(self.name.clone(), self.num_components, Vec::new())
    }

    /// The number of tuples.
    pub fn len(&self) -> usize {
        if self.num_components == 0 {
            0
        } else {
            self.values.len() / self.num_components
        }
    }

    /// Is this array empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `i`-th tuple.
    pub fn tuple(&self, i: usize) -> &[Real] {
        &self.values[i * self.num_components..(i + 1) * self.num_components]
    }

    /// The `c`-th component of the `i`-th tuple, or zero if this array has fewer
    /// components.
    pub fn component(&self, i: usize, c: usize) -> Real {
        if c < self.num_components {
            self.values[i * self.num_components + c]
        } else {
            0.0
        }
    }

    /// Appends a tuple.
    pub fn push_tuple(&mut self, tuple: &[Real]) {
        debug_assert_eq!(tuple.len(), self.num_components);
        self.values.extend_from_slice(tuple);
    }

    /// The largest value of the `c`-th component, if this array is not empty.
    pub fn max_component(&self, c: usize) -> Option<Real> {
        (0..self.len())
            .map(|i| self.component(i, c))
            .reduce(Real::max)
    }
}

/// A view of the point arrays of a mesh, as one flat tuple per point.
///
/// The tuple of a point is the concatenation of its tuples in each array, in array order.
#[derive(Copy, Clone, Debug)]
pub struct PointAttributes<'a> {
    arrays: &'a [DataArray],
    stride: usize,
}

impl<'a> PointAttributes<'a> {
    /// Creates a view of the given point arrays.
    pub fn new(arrays: &'a [DataArray]) -> Self {
        let stride = arrays.iter().map(|a| a.num_components).sum();
        Self { arrays, stride }
    }

    /// A view without any array.
    pub fn empty() -> Self {
        Self::new(&[])
    }

    /// The viewed arrays.
    pub fn arrays(&self) -> &'a [DataArray] {
        self.arrays
    }

    /// The total number of components of a point.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Appends the flat tuple of the point `id` to `out`.
    pub fn gather(&self, id: u32, out: &mut Vec<Real>) {
        for array in self.arrays {
            out.extend_from_slice(array.tuple(id as usize));
        }
    }

    /// Splits a flat point tuple and appends each part to the matching array of `dest`.
    ///
    /// `dest` must have the same layout as the viewed arrays.
    pub fn scatter(&self, flat: &[Real], dest: &mut [DataArray]) {
        let mut start = 0;
        for array in dest.iter_mut() {
            let end = start + array.num_components;
            array.push_tuple(&flat[start..end]);
            start = end;
        }
    }
}
