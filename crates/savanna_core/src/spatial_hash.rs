use glam::Vec2;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

#[derive(Clone, Debug, Default)]
/// Spatial indexing structure for radius queries over mob positions.
///
/// Implements a grid-based uniform spatial hash using offset-indexed entity lists.
/// Used by the herd for separation neighbors.
///
/// # Performance Characteristics
/// - Radius queries: O(entities in overlapped cells)
/// - Construction: O(entity_count) with Rayon-parallel cell counting
/// - Memory: O(entity_count) for indices + O(grid_cells) for offsets
///
/// # Implementation Notes
/// - Uses "offset array" pattern (like compressed sparse rows)
/// - `cell_offsets[i]..cell_offsets[i+1]` contains all entities in cell i
/// - Positions outside the world or non-finite are not indexed
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use savanna_core::spatial_hash::SpatialHash;
///
/// let mut spatial = SpatialHash::new(10.0, 100.0, 100.0);
/// let positions = vec![Vec2::new(15.0, 15.0), Vec2::new(25.0, 25.0), Vec2::new(85.0, 85.0)];
/// spatial.build(&positions, 100.0, 100.0);
///
/// let mut nearby = Vec::new();
/// spatial.query_into(Vec2::new(15.0, 15.0), 20.0, &mut nearby);
/// assert!(nearby.contains(&0));
/// ```
pub struct SpatialHash {
    pub cell_size: f32,
    pub width: f32,
    pub height: f32,
    pub cols: usize,
    pub rows: usize,
    pub cell_offsets: Vec<usize>,
    pub entity_indices: Vec<usize>,
}

impl SpatialHash {
    /// Creates an empty spatial hash covering a `width` x `height` world.
    pub fn new(cell_size: f32, width: f32, height: f32) -> Self {
        let cols = (width / cell_size).ceil().max(1.0) as usize;
        let rows = (height / cell_size).ceil().max(1.0) as usize;
        Self {
            cell_size,
            width,
            height,
            cols,
            rows,
            cell_offsets: vec![0; cols * rows + 1],
            entity_indices: Vec::new(),
        }
    }

    /// Computes the flat cell index for a world position.
    ///
    /// Non-finite coordinates and coordinates outside the world return `None`.
    #[inline]
    pub fn get_cell_idx(&self, position: Vec2) -> Option<usize> {
        if !position.is_finite() || position.x < 0.0 || position.y < 0.0 {
            return None;
        }

        let cx = (position.x / self.cell_size) as usize;
        let cy = (position.y / self.cell_size) as usize;
        if cx >= self.cols || cy >= self.rows {
            None
        } else {
            Some(cy * self.cols + cx)
        }
    }

    /// Rebuilds the index. Entity `i` is `positions[i]`.
    pub fn build(&mut self, positions: &[Vec2], width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.cols = (width / self.cell_size).ceil().max(1.0) as usize;
        self.rows = (height / self.cell_size).ceil().max(1.0) as usize;

        let cell_count = self.cols * self.rows;

        let atomic_counts: Vec<AtomicUsize> =
            (0..cell_count).map(|_| AtomicUsize::new(0)).collect();
        positions.par_iter().for_each(|&position| {
            if let Some(idx) = self.get_cell_idx(position) {
                atomic_counts[idx].fetch_add(1, AtomicOrdering::Relaxed);
            }
        });
        let counts: Vec<usize> = atomic_counts.into_iter().map(|a| a.into_inner()).collect();

        self.cell_offsets.resize(cell_count + 1, 0);
        let mut total = 0;
        for (i, &count) in counts.iter().enumerate() {
            self.cell_offsets[i] = total;
            total += count;
        }
        self.cell_offsets[cell_count] = total;

        self.entity_indices.clear();
        self.entity_indices.resize(total, 0);

        let mut current_offsets = self.cell_offsets[..cell_count].to_vec();
        for (entity_idx, &position) in positions.iter().enumerate() {
            if let Some(cell_idx) = self.get_cell_idx(position) {
                let write_idx = current_offsets[cell_idx];
                self.entity_indices[write_idx] = entity_idx;
                current_offsets[cell_idx] += 1;
            }
        }
    }

    /// Inclusive cell range overlapped by the query square, clamped to the grid.
    fn cell_range(&self, center: Vec2, radius: f32) -> Option<(usize, usize, usize, usize)> {
        if !center.is_finite() || !radius.is_finite() || radius < 0.0 {
            return None;
        }
        let min_cx = ((center.x - radius) / self.cell_size).floor() as i64;
        let max_cx = ((center.x + radius) / self.cell_size).floor() as i64;
        let min_cy = ((center.y - radius) / self.cell_size).floor() as i64;
        let max_cy = ((center.y + radius) / self.cell_size).floor() as i64;

        if max_cx < 0 || max_cy < 0 || min_cx >= self.cols as i64 || min_cy >= self.rows as i64 {
            return None;
        }
        Some((
            min_cx.max(0) as usize,
            max_cx.min(self.cols as i64 - 1) as usize,
            min_cy.max(0) as usize,
            max_cy.min(self.rows as i64 - 1) as usize,
        ))
    }

    /// Calls `callback` with every entity in the cells overlapped by the query
    /// square. Callers filter by exact distance.
    pub fn query_callback<F>(&self, center: Vec2, radius: f32, mut callback: F)
    where
        F: FnMut(usize),
    {
        let Some((min_cx, max_cx, min_cy, max_cy)) = self.cell_range(center, radius) else {
            return;
        };
        for cy in min_cy..=max_cy {
            for cx in min_cx..=max_cx {
                let cell_idx = cy * self.cols + cx;
                let start = self.cell_offsets[cell_idx];
                let end = self.cell_offsets[cell_idx + 1];
                for &entity_idx in &self.entity_indices[start..end] {
                    callback(entity_idx);
                }
            }
        }
    }

    pub fn count_nearby(&self, center: Vec2, radius: f32) -> usize {
        let mut count = 0;
        if let Some((min_cx, max_cx, min_cy, max_cy)) = self.cell_range(center, radius) {
            for cy in min_cy..=max_cy {
                for cx in min_cx..=max_cx {
                    let cell_idx = cy * self.cols + cx;
                    count += self.cell_offsets[cell_idx + 1] - self.cell_offsets[cell_idx];
                }
            }
        }
        count
    }

    #[inline]
    pub fn query_into(&self, center: Vec2, radius: f32, result: &mut Vec<usize>) {
        result.clear();
        self.query_callback(center, radius, |idx| result.push(idx));
    }
}
