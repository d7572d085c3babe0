use crate::apriori::Apriori;
use crate::config::{Extraction, MiningConfig};
use crate::error::MiningError;
use crate::fp::{FpGrowth, StreamingMiner};
use crate::storage::MiningResult;
use crate::support::Threshold;
use crate::traits::ItemsetMiner;
use crate::transactions::{ItemDictionary, TransactionStore};
use numpy::ndarray::{Array1, Array2};
use numpy::{IntoPyArray, PyArray1, PyArray2, PyReadonlyArray2};
use once_cell::sync::Lazy;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

// Global storage for streaming processors
static PROCESSORS: Lazy<Mutex<HashMap<usize, StreamingMiner>>> = Lazy::new(|| Mutex::new(HashMap::new()));
static NEXT_PID: Lazy<Mutex<usize>> = Lazy::new(|| Mutex::new(0));

/// Per level: itemsets as rows of column indices, and their supports.
type PyLevels<'py> = Vec<(Bound<'py, PyArray2<usize>>, Bound<'py, PyArray1<usize>>)>;

impl From<MiningError> for PyErr {
    fn from(err: MiningError) -> PyErr {
        if err.is_invalid_threshold() {
            PyValueError::new_err(err.to_string())
        } else {
            PyRuntimeError::new_err(err.to_string())
        }
    }
}

fn processors() -> PyResult<MutexGuard<'static, HashMap<usize, StreamingMiner>>> {
    PROCESSORS
        .lock()
        .map_err(|e| PyRuntimeError::new_err(format!("Lock error: {}", e)))
}

fn column_of(dictionary: &ItemDictionary, id: usize) -> Result<usize, MiningError> {
    dictionary
        .label(id)
        .and_then(|label| label.parse::<usize>().ok())
        .ok_or_else(|| MiningError::UnknownItem(id.to_string()))
}

fn levels_to_arrays<'py>(
    py: Python<'py>,
    result: &MiningResult,
    dictionary: &ItemDictionary,
) -> PyResult<PyLevels<'py>> {
    let mut arrays = Vec::new();

    for level in result.levels() {
        if level.is_empty() {
            continue;
        }

        let itemset_size = level.itemset_size();
        let num_itemsets = level.len();
        let mut data = Vec::with_capacity(num_itemsets * itemset_size);
        let mut supports = Vec::with_capacity(num_itemsets);

        for (itemset, support) in level.iter() {
            let mut columns = itemset
                .iter()
                .map(|&id| column_of(dictionary, id))
                .collect::<Result<Vec<usize>, _>>()?;
            columns.sort_unstable();
            data.extend(columns);
            supports.push(support);
        }

        let array = Array2::from_shape_vec((num_itemsets, itemset_size), data)
            .map_err(|_| PyValueError::new_err("Failed to create array"))?;

        arrays.push((array.into_pyarray(py), Array1::from(supports).into_pyarray(py)));
    }

    Ok(arrays)
}

fn extraction_for(conditional: bool) -> Extraction {
    if conditional {
        Extraction::Conditional
    } else {
        Extraction::BranchLocal
    }
}

#[pyfunction]
#[pyo3(signature = (transactions, min_support, parallel = false))]
fn apriori<'py>(
    py: Python<'py>,
    transactions: PyReadonlyArray2<'py, i32>,
    min_support: f64,
    parallel: bool,
) -> PyResult<PyLevels<'py>> {
    let store = TransactionStore::from_one_hot(transactions.as_array());
    let config = MiningConfig::new(min_support).with_parallel(parallel);
    let result = Apriori::new(config).mine(&store)?;
    levels_to_arrays(py, &result, store.dictionary())
}

#[pyfunction]
#[pyo3(signature = (transactions, min_support, conditional = false, parallel = false))]
fn fp_growth<'py>(
    py: Python<'py>,
    transactions: PyReadonlyArray2<'py, i32>,
    min_support: f64,
    conditional: bool,
    parallel: bool,
) -> PyResult<PyLevels<'py>> {
    let store = TransactionStore::from_one_hot(transactions.as_array());
    let config = MiningConfig::new(min_support)
        .with_extraction(extraction_for(conditional))
        .with_parallel(parallel);
    let result = FpGrowth::new(config).mine(&store)?;
    levels_to_arrays(py, &result, store.dictionary())
}

#[pyfunction]
fn create_lazy_fp_growth() -> PyResult<usize> {
    let mut pid_lock = NEXT_PID
        .lock()
        .map_err(|e| PyRuntimeError::new_err(format!("Lock error: {}", e)))?;
    let pid = *pid_lock;
    *pid_lock += 1;
    drop(pid_lock);

    processors()?.insert(pid, StreamingMiner::new());
    Ok(pid)
}

fn with_processor<T>(pid: usize, f: impl FnOnce(&mut StreamingMiner) -> PyResult<T>) -> PyResult<T> {
    let mut processors = processors()?;
    let state = processors
        .get_mut(&pid)
        .ok_or_else(|| PyValueError::new_err("Invalid processor ID"))?;
    f(state)
}

#[pyfunction]
fn lazy_count_pass(pid: usize, transactions: PyReadonlyArray2<'_, i32>) -> PyResult<()> {
    with_processor(pid, |state| Ok(state.count_matrix(transactions.as_array())?))
}

#[pyfunction]
fn lazy_finalize_counts(pid: usize, min_support: f64) -> PyResult<()> {
    with_processor(pid, |state| Ok(state.finalize_counts(Threshold::Fraction(min_support))?))
}

#[pyfunction]
fn lazy_build_pass(pid: usize, transactions: PyReadonlyArray2<'_, i32>) -> PyResult<()> {
    with_processor(pid, |state| Ok(state.build_matrix(transactions.as_array())?))
}

#[pyfunction]
fn lazy_finalize_building(pid: usize) -> PyResult<()> {
    with_processor(pid, |state| Ok(state.finalize_building()?))
}

#[pyfunction]
#[pyo3(signature = (pid, conditional = false))]
fn lazy_mine_patterns<'py>(py: Python<'py>, pid: usize, conditional: bool) -> PyResult<PyLevels<'py>> {
    with_processor(pid, |state| {
        let result = state.mine(extraction_for(conditional), false)?;
        levels_to_arrays(py, &result, state.dictionary())
    })
}

#[pyfunction]
fn lazy_cleanup(pid: usize) -> PyResult<()> {
    processors()?
        .remove(&pid)
        .ok_or_else(|| PyValueError::new_err("Invalid processor ID"))?;
    Ok(())
}

#[pymodule]
fn freqmine(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(apriori, m)?)?;
    m.add_function(wrap_pyfunction!(fp_growth, m)?)?;
    m.add_function(wrap_pyfunction!(create_lazy_fp_growth, m)?)?;
    m.add_function(wrap_pyfunction!(lazy_count_pass, m)?)?;
    m.add_function(wrap_pyfunction!(lazy_finalize_counts, m)?)?;
    m.add_function(wrap_pyfunction!(lazy_build_pass, m)?)?;
    m.add_function(wrap_pyfunction!(lazy_finalize_building, m)?)?;
    m.add_function(wrap_pyfunction!(lazy_mine_patterns, m)?)?;
    m.add_function(wrap_pyfunction!(lazy_cleanup, m)?)?;
    Ok(())
}
