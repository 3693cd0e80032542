//! Exact k-nearest-neighbor search under squared Euclidean distance
//!
//! Brute-force scan over every stored vector. Built per request and dropped
//! with it; there is no removal or persistence.

use crate::error::{Error, Result};

/// One search result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Insertion position of the matched vector (the chunk index)
    pub index: usize,
    /// Squared Euclidean distance to the query
    pub distance: f32,
}

/// Flat (exhaustive) L2 index
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimensions: usize,
    /// Row-major storage, `dimensions` floats per vector
    data: Vec<f32>,
}

impl FlatL2Index {
    /// Create an empty index for vectors of `dimensions`
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            data: Vec::new(),
        }
    }

    /// Build an index over `vectors`, taking the dimension from the first one
    pub fn build(vectors: &[Vec<f32>]) -> Result<Self> {
        let dimensions = vectors.first().map(|v| v.len()).unwrap_or(0);
        let mut index = Self::new(dimensions);
        index.data.reserve(dimensions * vectors.len());
        for vector in vectors {
            index.add(vector)?;
        }
        Ok(index)
    }

    /// Append a vector; its position is the next insertion index
    pub fn add(&mut self, vector: &[f32]) -> Result<usize> {
        if vector.len() != self.dimensions {
            return Err(Error::index(format!(
                "Vector dimension mismatch: expected {}, got {}",
                self.dimensions,
                vector.len()
            )));
        }

        let position = self.len();
        self.data.extend_from_slice(vector);
        Ok(position)
    }

    /// Number of stored vectors
    pub fn len(&self) -> usize {
        if self.dimensions == 0 {
            0
        } else {
            self.data.len() / self.dimensions
        }
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Vector dimensions
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return up to `k` nearest vectors, nearest first.
    ///
    /// Equal distances keep insertion order, so the lower index wins.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if self.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        if query.len() != self.dimensions {
            return Err(Error::index(format!(
                "Query dimension mismatch: expected {}, got {}",
                self.dimensions,
                query.len()
            )));
        }

        let mut hits: Vec<SearchHit> = self
            .data
            .chunks_exact(self.dimensions)
            .enumerate()
            .map(|(index, vector)| SearchHit {
                index,
                distance: squared_l2(query, vector),
            })
            .collect();

        // Stable sort; NaN distances sort last
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or_else(|| a.distance.is_nan().cmp(&b.distance.is_nan()))
        });
        hits.truncate(k);

        Ok(hits)
    }
}

/// Squared Euclidean distance
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(vectors: &[[f32; 2]]) -> FlatL2Index {
        let vectors: Vec<Vec<f32>> = vectors.iter().map(|v| v.to_vec()).collect();
        FlatL2Index::build(&vectors).unwrap()
    }

    #[test]
    fn test_exact_match_first() {
        let index = index_of(&[[0.0, 0.0], [1.0, 1.0], [5.0, 5.0]]);
        let hits = index.search(&[1.0, 1.0], 1).unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[0].distance, 0.0);
    }

    #[test]
    fn test_ordered_nearest_to_farthest() {
        let index = index_of(&[[10.0, 0.0], [1.0, 0.0], [3.0, 0.0], [0.5, 0.0]]);
        let hits = index.search(&[0.0, 0.0], 3).unwrap();

        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(hits[0].distance, 0.25);
        assert_eq!(hits[1].distance, 1.0);
        assert_eq!(hits[2].distance, 9.0);
    }

    #[test]
    fn test_ties_prefer_lower_index() {
        let index = index_of(&[[1.0, 0.0], [0.0, 1.0], [-1.0, 0.0], [0.0, -1.0]]);
        let hits = index.search(&[0.0, 0.0], 4).unwrap();

        let order: Vec<usize> = hits.iter().map(|h| h.index).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_k_larger_than_len() {
        let index = index_of(&[[0.0, 0.0], [2.0, 0.0]]);
        let hits = index.search(&[3.0, 0.0], 10).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[1].index, 0);
    }

    #[test]
    fn test_empty_index_and_zero_k() {
        let empty = FlatL2Index::build(&[]).unwrap();
        assert!(empty.is_empty());
        assert!(empty.search(&[1.0, 2.0], 3).unwrap().is_empty());

        let index = index_of(&[[0.0, 0.0]]);
        assert!(index.search(&[0.0, 0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut index = FlatL2Index::new(3);
        assert_eq!(index.add(&[1.0, 2.0, 3.0]).unwrap(), 0);
        assert!(matches!(index.add(&[1.0, 2.0]), Err(Error::Index(_))));
        assert!(matches!(index.search(&[1.0], 1), Err(Error::Index(_))));

        let ragged = vec![vec![0.0, 0.0], vec![0.0]];
        assert!(FlatL2Index::build(&ragged).is_err());
    }

    #[test]
    fn test_squared_l2() {
        assert_eq!(squared_l2(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
        assert_eq!(squared_l2(&[1.5], &[1.5]), 0.0);
    }
}
