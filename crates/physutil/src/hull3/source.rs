//! Read-only point access for the hull builder.

use nalgebra::Vector3;

/// Indexed 3D point collection.
pub trait PointSource {
    fn len(&self) -> usize;
    fn point(&self, i: usize) -> Vector3<f64>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointSource for [Vector3<f64>] {
    #[inline]
    fn len(&self) -> usize {
        <[Vector3<f64>]>::len(self)
    }
    #[inline]
    fn point(&self, i: usize) -> Vector3<f64> {
        self[i]
    }
}

impl PointSource for [[f64; 3]] {
    #[inline]
    fn len(&self) -> usize {
        <[[f64; 3]]>::len(self)
    }
    #[inline]
    fn point(&self, i: usize) -> Vector3<f64> {
        Vector3::from(self[i])
    }
}

/// Points embedded in a flat `f64` buffer: point `i` is
/// `data[offset + i*stride ..][..3]`, so positions can be read straight out of
/// interleaved vertex records.
#[derive(Clone, Copy, Debug)]
pub struct Strided<'a> {
    data: &'a [f64],
    offset: usize,
    stride: usize,
    len: usize,
}

impl<'a> Strided<'a> {
    /// `None` if `stride < 3`.
    pub fn new(data: &'a [f64], stride: usize) -> Option<Self> {
        Self::with_offset(data, 0, stride)
    }

    /// `None` if `stride < 3` or `offset` leaves no room for a point.
    pub fn with_offset(data: &'a [f64], offset: usize, stride: usize) -> Option<Self> {
        if stride < 3 || data.len() < offset + 3 {
            return None;
        }
        let len = (data.len() - offset - 3) / stride + 1;
        Some(Self {
            data,
            offset,
            stride,
            len,
        })
    }
}

impl PointSource for Strided<'_> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }
    #[inline]
    fn point(&self, i: usize) -> Vector3<f64> {
        let at = self.offset + i * self.stride;
        Vector3::new(self.data[at], self.data[at + 1], self.data[at + 2])
    }
}
