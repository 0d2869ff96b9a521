use pyo3::exceptions::PyValueError;
use pyo3::{prelude::*, IntoPyObjectExt};

use gaussbits::BitMatrix;

use crate::bitvector::PyBitVector;
use crate::{rng_from_seed, value_error};

#[pyclass(name = "BitMatrix")]
#[derive(Clone)]
pub struct PyBitMatrix {
    pub(crate) inner: BitMatrix,
}

#[pymethods]
impl PyBitMatrix {
    /// Creates a new BitMatrix of the given shape initialized to zero
    #[new]
    pub fn new(rows: usize, cols: usize) -> Self {
        PyBitMatrix {
            inner: BitMatrix::zeros(rows, cols),
        }
    }

    #[staticmethod]
    pub fn zeros(rows: usize, cols: usize) -> Self {
        PyBitMatrix {
            inner: BitMatrix::zeros(rows, cols),
        }
    }

    #[staticmethod]
    pub fn identity(size: usize) -> Self {
        PyBitMatrix {
            inner: BitMatrix::identity(size),
        }
    }

    /// Creates a new random BitMatrix
    #[staticmethod]
    #[pyo3(signature = (rows, cols, seed=None))]
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> Self {
        let mut rng = rng_from_seed(seed);
        PyBitMatrix {
            inner: BitMatrix::random(&mut rng, rows, cols),
        }
    }

    /// Creates a new BitMatrix from a list of rows, each a list of bools
    #[staticmethod]
    pub fn from_list(data: Vec<Vec<bool>>) -> PyResult<Self> {
        let cols = data.first().map_or(0, |row| row.len());
        if data.iter().any(|row| row.len() != cols) {
            return Err(PyValueError::new_err("All rows must have the same length"));
        }
        Ok(PyBitMatrix {
            inner: BitMatrix::from_bool_vec(&data),
        })
    }

    /// Convert the matrix to a list of rows, each a list of bools
    pub fn to_list(&self) -> Vec<Vec<bool>> {
        self.inner
            .row_iter()
            .map(|row| row.iter().collect())
            .collect()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    /// Gets the entry at row i, column j
    pub fn bit(&self, i: usize, j: usize) -> PyResult<bool> {
        self.inner.get(i, j).map_err(value_error)
    }

    /// Sets the entry at row i, column j to b
    pub fn set_bit(&mut self, i: usize, j: usize, b: bool) -> PyResult<()> {
        self.inner.set(i, j, b).map_err(value_error)
    }

    /// Returns row i as a BitVector
    pub fn row(&self, i: usize) -> PyResult<PyBitVector> {
        if i >= self.inner.rows() {
            return Err(PyValueError::new_err("Row index out of bounds"));
        }
        Ok(PyBitVector::from(self.inner.row(i).clone()))
    }

    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    /// Matrix-vector product over GF(2)
    pub fn dot(&self, x: &PyBitVector) -> PyResult<PyBitVector> {
        self.inner
            .dot(&x.inner)
            .map(PyBitVector::from)
            .map_err(value_error)
    }

    /// Solves self * x == b, returning None if there is no solution
    pub fn x_for(&self, b: &PyBitVector) -> PyResult<Option<PyBitVector>> {
        Ok(self
            .inner
            .x_for(&b.inner)
            .map_err(value_error)?
            .map(PyBitVector::from))
    }

    pub fn rank(&self) -> usize {
        self.inner.rank()
    }

    /// Performs Gaussian elimination in place and returns the pivot columns
    #[pyo3(signature = (full=false))]
    pub fn gauss(&mut self, full: bool) -> Vec<usize> {
        self.inner.gauss(full)
    }

    pub fn transposed(&self) -> Self {
        PyBitMatrix {
            inner: self.inner.transposed(),
        }
    }

    /// Returns the inverse, raising ValueError if the matrix is not invertible
    pub fn inverse(&self) -> PyResult<Self> {
        self.inner
            .try_inverse()
            .map(PyBitMatrix::from)
            .map_err(value_error)
    }

    /// A multi-line summary of the matrix's storage
    pub fn describe(&self) -> String {
        self.inner.describe()
    }

    pub fn copy(&self) -> Self {
        self.clone()
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "BitMatrix(rows={}, cols={})",
            self.inner.rows(),
            self.inner.cols()
        )
    }

    /// Support for indexing with [i, j]
    pub fn __getitem__(&self, key: (usize, usize)) -> PyResult<bool> {
        self.bit(key.0, key.1)
    }

    /// Support for item assignment with [i, j] = value
    pub fn __setitem__(&mut self, key: (usize, usize), value: bool) -> PyResult<()> {
        self.set_bit(key.0, key.1, value)
    }

    /// Matrix-matrix or matrix-vector product using the * operator
    pub fn __mul__(&self, other: PyObject) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            if let Ok(m) = other.extract::<PyRef<'_, PyBitMatrix>>(py) {
                let product = self.inner.try_mul(&m.inner).map_err(value_error)?;
                PyBitMatrix::from(product).into_py_any(py)
            } else if let Ok(v) = other.extract::<PyRef<'_, PyBitVector>>(py) {
                self.dot(&v)?.into_py_any(py)
            } else {
                Err(PyValueError::new_err(
                    "Can only multiply a BitMatrix by a BitMatrix or a BitVector",
                ))
            }
        })
    }

    pub fn __eq__(&self, other: &PyBitMatrix) -> bool {
        self.inner == other.inner
    }
}

impl From<BitMatrix> for PyBitMatrix {
    fn from(inner: BitMatrix) -> Self {
        PyBitMatrix { inner }
    }
}

impl From<PyBitMatrix> for BitMatrix {
    fn from(py_matrix: PyBitMatrix) -> Self {
        py_matrix.inner
    }
}
