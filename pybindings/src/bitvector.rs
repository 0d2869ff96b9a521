use pyo3::exceptions::PyValueError;
use pyo3::{prelude::*, IntoPyObjectExt};

use gaussbits::BitVector;

use crate::{rng_from_seed, value_error};

#[pyclass(name = "BitVector")]
#[derive(Clone)]
pub struct PyBitVector {
    pub(crate) inner: BitVector,
}

#[pymethods]
impl PyBitVector {
    /// Creates a new BitVector of specified length initialized to zero
    #[new]
    pub fn new(length: usize) -> Self {
        PyBitVector {
            inner: BitVector::zeros(length),
        }
    }

    /// Gets the bit at position i
    pub fn bit(&self, i: usize) -> PyResult<bool> {
        self.inner.get(i).map_err(value_error)
    }

    /// Sets the bit at position i to b
    pub fn set_bit(&mut self, i: usize, b: bool) -> PyResult<()> {
        self.inner.set(i, b).map_err(value_error)
    }

    /// Creates a new BitVector of specified length initialized to zero
    #[staticmethod]
    pub fn zeros(length: usize) -> Self {
        PyBitVector {
            inner: BitVector::zeros(length),
        }
    }

    /// Creates a new BitVector whose odd-indexed bits are set
    #[staticmethod]
    pub fn alternating(length: usize) -> Self {
        PyBitVector {
            inner: BitVector::alternating(length),
        }
    }

    /// Creates a new random BitVector of specified length
    #[staticmethod]
    #[pyo3(signature = (length, seed=None))]
    pub fn random(length: usize, seed: Option<u64>) -> Self {
        let mut rng = rng_from_seed(seed);
        PyBitVector {
            inner: BitVector::random(&mut rng, length),
        }
    }

    /// Checks if the vector consists of all zero bits
    pub fn is_zero(&self) -> bool {
        self.inner.is_zero()
    }

    /// Returns the length of the vector
    #[getter]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    /// Returns the number of 1s in the vector
    pub fn count_ones(&self) -> usize {
        self.inner.count_ones()
    }

    /// Returns the number of 0s in the vector
    pub fn count_zeros(&self) -> usize {
        self.inner.count_zeros()
    }

    /// Returns the number of 1s in the vector (Hamming weight)
    pub fn weight(&self) -> usize {
        self.inner.weight()
    }

    /// A multi-line summary of the vector's storage
    pub fn describe(&self) -> String {
        self.inner.describe()
    }

    /// XORs another BitVector into this one
    pub fn xor_with(&mut self, other: &PyBitVector) -> PyResult<()> {
        self.inner.xor_with(&other.inner).map_err(value_error)
    }

    /// Returns a copy of the vector
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// String representation of the vector
    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    /// Python representation of the vector
    pub fn __repr__(&self) -> String {
        format!("BitVector('{}')", self.inner)
    }

    /// Support for indexing with [i]
    pub fn __getitem__(&self, key: PyObject) -> PyResult<PyObject> {
        Python::with_gil(|py| {
            if let Ok(i) = key.extract::<usize>(py) {
                self.inner.get(i).map_err(value_error)?.into_py_any(py)
            } else {
                Err(PyValueError::new_err("Invalid index type"))
            }
        })
    }

    /// Support for item assignment with [i] = value
    pub fn __setitem__(&mut self, key: PyObject, value: PyObject) -> PyResult<()> {
        Python::with_gil(|py| {
            if let Ok(i) = key.extract::<usize>(py) {
                let bit_value = value.is_truthy(py)?;
                self.inner.set(i, bit_value).map_err(value_error)
            } else {
                Err(PyValueError::new_err("Invalid index type for assignment"))
            }
        })
    }

    /// XOR operation using the ^ operator
    pub fn __xor__(&self, other: &PyBitVector) -> PyResult<Self> {
        let mut result = self.clone();
        result.xor_with(other)?;
        Ok(result)
    }

    /// In-place XOR operation using ^=
    pub fn __ixor__(&mut self, other: &PyBitVector) -> PyResult<()> {
        self.xor_with(other)
    }

    /// Vector equality comparison
    pub fn __eq__(&self, other: &PyBitVector) -> bool {
        self.inner == other.inner
    }

    /// Vector inequality comparison
    pub fn __ne__(&self, other: &PyBitVector) -> bool {
        !self.__eq__(other)
    }

    /// Returns the length of the vector (for len() function)
    pub fn __len__(&self) -> usize {
        self.inner.len()
    }

    /// Convert vector to a list of bools
    pub fn to_list(&self) -> Vec<bool> {
        self.inner.iter().collect()
    }

    /// Create vector from a list of bools
    #[staticmethod]
    pub fn from_list(data: Vec<bool>) -> Self {
        PyBitVector {
            inner: BitVector::from_bool_vec(&data),
        }
    }

    /// Convert vector to a list of integers (0 or 1)
    pub fn to_int_list(&self) -> Vec<usize> {
        self.inner.iter().map(usize::from).collect()
    }

    /// Create vector from a list of integers (0 or 1)
    #[staticmethod]
    pub fn from_int_list(data: Vec<usize>) -> Self {
        PyBitVector {
            inner: BitVector::from_int_vec(&data),
        }
    }
}

impl From<BitVector> for PyBitVector {
    fn from(inner: BitVector) -> Self {
        PyBitVector { inner }
    }
}

impl From<PyBitVector> for BitVector {
    fn from(py_vector: PyBitVector) -> Self {
        py_vector.inner
    }
}
