//! Principal-component projection.
//!
//! Centers the input matrix, extracts the leading directions of
//! maximal variance from its covariance, and projects each row onto
//! them. Eigenvectors come from power iteration with deflation, with a
//! deterministic start vector: a fixed input always yields the same
//! output (up to the sign ambiguity inherent to eigen-decomposition).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ProjectionError, Result};

/// Convergence tolerance for power iteration.
const TOLERANCE: f64 = 1e-12;

/// Iteration cap for power iteration.
const MAX_ITERATIONS: usize = 500;

/// A 2-D point produced by [`project_2d`].
///
/// `source_index` points back at the row (and label) it came from and
/// doubles as the sequential color index when plotted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// First principal component coordinate.
    pub x: f64,

    /// Second principal component coordinate.
    pub y: f64,

    /// Index of the source row in the input matrix.
    pub source_index: usize,
}

/// Project each row of `rows` onto the leading `target_dim` principal
/// components.
///
/// Requires strictly more samples than target dimensions: with `n`
/// samples the covariance has at most `n - 1` non-degenerate
/// directions, so `n <= target_dim` fails with
/// [`ProjectionError::InsufficientData`], as does asking for more
/// output dimensions than the rows have. Ragged rows fail with
/// [`ProjectionError::DimensionMismatch`].
pub fn project(rows: &[Vec<f32>], target_dim: usize) -> Result<Vec<Vec<f64>>> {
    if rows.len() <= target_dim {
        return Err(ProjectionError::InsufficientData {
            samples: rows.len(),
            target_dim,
        });
    }

    let dim = rows[0].len();
    for row in rows {
        if row.len() != dim {
            return Err(ProjectionError::DimensionMismatch {
                expected: dim,
                actual: row.len(),
            });
        }
    }

    if dim < target_dim {
        return Err(ProjectionError::InsufficientData {
            samples: rows.len(),
            target_dim,
        });
    }

    debug!(
        "Projecting {} rows from {dim} to {target_dim} dimensions",
        rows.len()
    );

    let centered = center(rows, dim);
    let mut covariance = covariance_matrix(&centered, dim);

    let mut coords = vec![vec![0.0f64; target_dim]; rows.len()];
    for component in 0..target_dim {
        let (direction, eigenvalue) = leading_eigenvector(&covariance, dim);

        for (row, out) in centered.iter().zip(coords.iter_mut()) {
            out[component] = dot(row, &direction);
        }

        deflate(&mut covariance, &direction, eigenvalue, dim);
    }

    Ok(coords)
}

/// Project to 2-D, tagging each point with its source row index.
pub fn project_2d(rows: &[Vec<f32>]) -> Result<Vec<ProjectedPoint>> {
    let coords = project(rows, 2)?;

    Ok(coords
        .into_iter()
        .enumerate()
        .map(|(source_index, c)| ProjectedPoint {
            x: c[0],
            y: c[1],
            source_index,
        })
        .collect())
}

/// Subtract the per-dimension mean from every row.
fn center(rows: &[Vec<f32>], dim: usize) -> Vec<Vec<f64>> {
    let n = rows.len() as f64;

    let mut means = vec![0.0f64; dim];
    for row in rows {
        for (mean, value) in means.iter_mut().zip(row) {
            *mean += f64::from(*value) / n;
        }
    }

    rows.iter()
        .map(|row| {
            row.iter()
                .zip(&means)
                .map(|(value, mean)| f64::from(*value) - mean)
                .collect()
        })
        .collect()
}

/// Sample covariance of the centered matrix, 1/(n-1) normalization.
fn covariance_matrix(centered: &[Vec<f64>], dim: usize) -> Vec<Vec<f64>> {
    let scale = 1.0 / (centered.len() as f64 - 1.0);

    let mut covariance = vec![vec![0.0f64; dim]; dim];
    for row in centered {
        for i in 0..dim {
            for j in i..dim {
                covariance[i][j] += row[i] * row[j] * scale;
            }
        }
    }
    for i in 0..dim {
        for j in 0..i {
            covariance[i][j] = covariance[j][i];
        }
    }

    covariance
}

/// Dominant eigenvector and eigenvalue via power iteration.
///
/// Starts from the basis vector of the dimension with the largest
/// remaining variance so the iteration is deterministic. A matrix with
/// no remaining variance yields a zero vector and eigenvalue 0.
fn leading_eigenvector(matrix: &[Vec<f64>], dim: usize) -> (Vec<f64>, f64) {
    let start = (0..dim)
        .max_by(|&a, &b| matrix[a][a].total_cmp(&matrix[b][b]))
        .unwrap_or(0);

    if matrix[start][start] <= 0.0 {
        // No variance left to capture.
        return (vec![0.0; dim], 0.0);
    }

    let mut vector = vec![0.0f64; dim];
    vector[start] = 1.0;

    for _ in 0..MAX_ITERATIONS {
        let next = multiply(matrix, &vector);
        let norm = dot(&next, &next).sqrt();
        if norm == 0.0 {
            return (vec![0.0; dim], 0.0);
        }

        let next: Vec<f64> = next.iter().map(|v| v / norm).collect();
        let alignment = dot(&next, &vector).abs();
        vector = next;

        if (1.0 - alignment).abs() < TOLERANCE {
            break;
        }
    }

    // Fix the sign: largest-magnitude entry is positive.
    let extreme = vector
        .iter()
        .copied()
        .max_by(|a, b| a.abs().total_cmp(&b.abs()))
        .unwrap_or(0.0);
    if extreme < 0.0 {
        for v in &mut vector {
            *v = -*v;
        }
    }

    let eigenvalue = dot(&multiply(matrix, &vector), &vector);
    (vector, eigenvalue)
}

/// Remove a found component: `M -= lambda * v * v^T`.
fn deflate(matrix: &mut [Vec<f64>], vector: &[f64], eigenvalue: f64, dim: usize) {
    for i in 0..dim {
        for j in 0..dim {
            matrix[i][j] -= eigenvalue * vector[i] * vector[j];
        }
    }
}

fn multiply(matrix: &[Vec<f64>], vector: &[f64]) -> Vec<f64> {
    matrix.iter().map(|row| dot(row, vector)).collect()
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
