use rand::prelude::*;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul};

use crate::error::{Result, SoftmaxError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Uniform samples in [-scale, scale).
    pub fn random<R: Rng>(rows: usize, cols: usize, scale: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = (rng.gen::<f64>() * 2.0 - 1.0) * scale;
            }
        }

        res
    }

    /// Builds a matrix from row vectors, rejecting ragged input.
    ///
    /// An empty `data` yields a 0 x 0 matrix.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, |row| row.len());
        for (row, values) in data.iter().enumerate() {
            if values.len() != cols {
                return Err(SoftmaxError::RaggedRows { row, expected: cols, found: values.len() });
            }
        }

        Ok(Matrix {
            rows: data.len(),
            cols,
            data
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect()
        }
    }

    /// Matrix product that reports a shape error instead of panicking.
    pub fn try_matmul(&self, rhs: &Matrix) -> Result<Matrix> {
        if self.cols != rhs.rows {
            return Err(SoftmaxError::ShapeMismatch {
                context: "matrix product",
                expected: (self.cols, rhs.cols),
                found: rhs.shape(),
            });
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        // i-k-j order keeps the inner loop on contiguous rows.
        for i in 0..self.rows {
            let out = &mut res.data[i];
            for (k, &a) in self.data[i].iter().enumerate() {
                for (o, &b) in out.iter_mut().zip(rhs.data[k].iter()) {
                    *o += a * b;
                }
            }
        }

        Ok(res)
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    pub fn sum_squares(&self) -> f64 {
        self.data.iter().flatten().map(|x| x * x).sum()
    }

    /// Largest element-wise absolute difference; `None` when shapes differ.
    pub fn max_abs_diff(&self, other: &Matrix) -> Option<f64> {
        if self.shape() != other.shape() {
            return None;
        }

        Some(self.data.iter().flatten()
            .zip(other.data.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = self;

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] += rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = self;

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] -= rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Self) -> Self::Output {
        match self.try_matmul(rhs) {
            Ok(res) => res,
            Err(_) => panic!("Matrices are of incorrect sizes"),
        }
    }
}
