// There seems to be some issues with the pyo3 bindings generation on methods returning
// a `PyResult<T>`.
#![allow(clippy::useless_conversion)]

pub mod bitmatrix;
pub mod bitvector;

use crate::bitmatrix::PyBitMatrix;
use crate::bitvector::PyBitVector;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pymodule]
fn gaussbits(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyBitMatrix>()?;
    m.add_class::<PyBitVector>()?;
    Ok(())
}

/// Precondition violations from the library surface as `ValueError`
pub(crate) fn value_error(e: ::gaussbits::Error) -> PyErr {
    PyValueError::new_err(e.to_string())
}

pub(crate) fn rng_from_seed(seed: Option<u64>) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    match seed {
        Some(s) => rand::rngs::SmallRng::seed_from_u64(s),
        None => rand::rngs::SmallRng::from_os_rng(),
    }
}
