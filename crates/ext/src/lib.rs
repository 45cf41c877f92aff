//! cmodulea: Python bindings for the pymodule core
//!
//! Exposes the two entry points of `ExtensionModule` to Python:
//! - `print_hello_cmodulea()` prints the greeting and calls the utils hello
//! - `c_benchmark(n)` runs the timed sum-of-squares loop and returns the sum
//!
//! `c_benchmark` takes `*args` and parses them in the core, so argument
//! errors surface as the same exceptions a C extension using
//! `PyArg_ParseTuple(args, "i", ...)` would raise.

use pyo3::exceptions::{PyOSError, PyOverflowError, PyRuntimeError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyString, PyTuple};
use pymodule_core::{ArgumentParseError, BenchmarkError, ExtensionModule, HostArg};

/// An exact int, or an int that does not fit in 64 bits
fn int_arg(obj: &Bound<'_, PyAny>) -> PyResult<HostArg> {
    Ok(match obj.extract::<i64>() {
        Ok(n) => HostArg::Int(n),
        Err(_) => HostArg::OversizedInt {
            negative: obj.lt(0)?,
        },
    })
}

/// Convert one Python object into the core's argument model
fn host_arg(obj: &Bound<'_, PyAny>) -> PyResult<HostArg> {
    if obj.is_none() {
        return Ok(HostArg::NoneValue);
    }
    // bool before int: bool is an int subclass
    if let Ok(b) = obj.downcast::<PyBool>() {
        return Ok(HostArg::Bool(b.is_true()));
    }
    if obj.is_instance_of::<PyInt>() {
        return int_arg(obj);
    }
    if let Ok(f) = obj.downcast::<PyFloat>() {
        return Ok(HostArg::Float(f.value()));
    }
    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(HostArg::Str(s.to_cow()?.into_owned()));
    }
    // Integer-like objects such as numpy scalars go through `__index__`
    if obj.hasattr("__index__")? {
        let index = obj.call_method0("__index__")?;
        if index.is_instance_of::<PyInt>() {
            return int_arg(&index);
        }
        return Err(PyTypeError::new_err(format!(
            "__index__ returned non-int (type {})",
            index.get_type().name()?
        )));
    }
    Ok(HostArg::Other(obj.get_type().name()?.to_string()))
}

fn to_py_err(err: BenchmarkError) -> PyErr {
    match err {
        BenchmarkError::Args(e @ ArgumentParseError::Overflow { .. }) => {
            PyOverflowError::new_err(e.to_string())
        }
        BenchmarkError::Args(e) => PyTypeError::new_err(e.to_string()),
        BenchmarkError::Io(e) => PyOSError::new_err(e.to_string()),
    }
}

/// Prints a hello message from Rust
#[pyfunction]
fn print_hello_cmodulea() -> PyResult<()> {
    ExtensionModule::stdout()
        .print_hello()
        .map_err(|e| PyOSError::new_err(e.to_string()))
}

/// Run a benchmark with an integer input
#[pyfunction]
#[pyo3(signature = (*args))]
fn c_benchmark(args: &Bound<'_, PyTuple>) -> PyResult<i64> {
    let args = args
        .iter()
        .map(|arg| host_arg(&arg))
        .collect::<PyResult<Vec<_>>>()?;
    ExtensionModule::stdout()
        .c_benchmark(&args)
        .map_err(to_py_err)
}

/// Route the core's tracing events to stderr
#[pyfunction]
#[pyo3(signature = (level = None))]
fn init_tracing(level: Option<String>) -> PyResult<()> {
    let level = level.as_deref().unwrap_or("info");
    let filter = tracing_subscriber::EnvFilter::try_new(format!("pymodule_core={}", level))
        .map_err(|e| PyRuntimeError::new_err(format!("Invalid log level '{}': {}", level, e)))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| PyRuntimeError::new_err(format!("Failed to initialize tracing: {}", e)))
}

/// A simple example module
#[pymodule]
fn cmodulea(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(print_hello_cmodulea, m)?)?;
    m.add_function(wrap_pyfunction!(c_benchmark, m)?)?;
    m.add_function(wrap_pyfunction!(init_tracing, m)?)?;
    Ok(())
}
