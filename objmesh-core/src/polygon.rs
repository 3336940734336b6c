/// Per-face index lists
use std::collections::VecDeque;

/// One corner of a face: 1-based indices into the vertex, texture
/// coordinate and normal arrays. Zero means the attribute is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexTriplet {
    pub vertex: u32,
    pub texture: u32,
    pub normal: u32,
}

impl IndexTriplet {
    pub fn new(vertex: u32, texture: u32, normal: u32) -> Self {
        Self {
            vertex,
            texture,
            normal,
        }
    }

    /// A triplet carrying only a vertex index.
    pub fn vertex(vertex: u32) -> Self {
        Self::new(vertex, 0, 0)
    }
}

/// A face built by prepending points as they are read.
///
/// The stored order is therefore the reverse of the order in which the
/// points appear on the face line. Normal computation anchors its fan at
/// the first stored point, so this order decides the sign of every
/// computed normal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Polygon {
    points: VecDeque<IndexTriplet>,
}

impl Polygon {
    pub fn new() -> Self {
        Self {
            points: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
        }
    }

    /// Build a polygon from points in face-line order, prepending each one
    /// the same way the loader does.
    pub fn from_file_order<I>(points: I) -> Self
    where
        I: IntoIterator<Item = IndexTriplet>,
    {
        let mut polygon = Self::new();
        for point in points {
            polygon.push_front(point);
        }
        polygon
    }

    pub fn push_front(&mut self, point: IndexTriplet) {
        self.points.push_front(point);
    }

    /// Remove and return the first stored point.
    pub fn pop_front(&mut self) -> Option<IndexTriplet> {
        self.points.pop_front()
    }

    /// Remove the first point referencing `vertex`. Returns the removed point.
    pub fn remove_vertex(&mut self, vertex: u32) -> Option<IndexTriplet> {
        let position = self.points.iter().position(|p| p.vertex == vertex)?;
        self.points.remove(position)
    }

    /// Drop every point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&IndexTriplet> {
        self.points.front()
    }

    pub fn get(&self, index: usize) -> Option<&IndexTriplet> {
        self.points.get(index)
    }

    /// Points in stored (reversed) order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &IndexTriplet> + ExactSizeIterator {
        self.points.iter()
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl DoubleEndedIterator<Item = &mut IndexTriplet> + ExactSizeIterator {
        self.points.iter_mut()
    }

    /// Points in the order they appeared on the face line.
    pub fn iter_file_order(&self) -> impl Iterator<Item = &IndexTriplet> {
        self.points.iter().rev()
    }
}

impl<'a> IntoIterator for &'a Polygon {
    type Item = &'a IndexTriplet;
    type IntoIter = std::collections::vec_deque::Iter<'a, IndexTriplet>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertices(polygon: &Polygon) -> Vec<u32> {
        polygon.iter().map(|p| p.vertex).collect()
    }

    #[test]
    fn test_prepend_reverses_order() {
        let polygon = Polygon::from_file_order((1..=4).map(IndexTriplet::vertex));
        assert_eq!(vertices(&polygon), vec![4, 3, 2, 1]);
        let file_order: Vec<u32> = polygon.iter_file_order().map(|p| p.vertex).collect();
        assert_eq!(file_order, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_pop_front() {
        let mut polygon = Polygon::from_file_order((1..=3).map(IndexTriplet::vertex));
        assert_eq!(polygon.pop_front(), Some(IndexTriplet::vertex(3)));
        assert_eq!(polygon.len(), 2);
        polygon.clear();
        assert!(polygon.is_empty());
        assert_eq!(polygon.pop_front(), None);
    }

    #[test]
    fn test_remove_vertex_takes_first_match_only() {
        let mut polygon = Polygon::new();
        polygon.push_front(IndexTriplet::new(2, 1, 0));
        polygon.push_front(IndexTriplet::new(5, 0, 0));
        polygon.push_front(IndexTriplet::new(2, 7, 0));

        let removed = polygon.remove_vertex(2);
        assert_eq!(removed, Some(IndexTriplet::new(2, 7, 0)));
        assert_eq!(vertices(&polygon), vec![5, 2]);
        assert_eq!(polygon.get(1), Some(&IndexTriplet::new(2, 1, 0)));
        assert_eq!(polygon.remove_vertex(9), None);
        assert_eq!(polygon.len(), 2);
    }
}
