//! Dataset persistence for generated benchmarks.
//!
//! One dataset captures everything a downstream experiment needs to replay
//! a moving landscape: the optimum position per change period, the unmoved
//! optimum it was built from, the per-dimension waveform parameters, and
//! the calibrated step size. Datasets are written as JSON with a
//! date-stamped file name so repeated generation runs never overwrite each
//! other.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::landscape::Landscape;
use crate::waveform::WaveformSpec;
use crate::{Calibration, DynamicBenchmark};

/// A stored dynamic benchmark: one landscape at one dimensionality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamicDataset {
    /// Name of the base landscape
    pub landscape: String,
    /// Global optimum fitness per change period (constant: movement shifts
    /// the optimum position, never its fitness)
    pub global_opt_fit_per_period: Vec<f64>,
    /// Global optimum position per change period, shape `(n_periods, dim)`
    pub global_opt_pos_per_period: Array2<f64>,
    /// Global optimum position of the unmoved landscape
    pub orig_global_opt_pos: Array1<f64>,
    /// Global optimum fitness of the unmoved landscape
    pub orig_global_opt_fit: f64,
    /// Per-dimension waveform parameterization
    pub waveforms_per_dim: Vec<WaveformSpec>,
    /// Step size and realized movement statistics
    pub calibration: Calibration,
}

impl DynamicDataset {
    /// Package a generation result for persistence.
    pub fn new(
        landscape: Landscape,
        orig_global_opt_pos: Array1<f64>,
        orig_global_opt_fit: f64,
        benchmark: &DynamicBenchmark,
    ) -> Self {
        let n_periods = benchmark.trajectory.nrows();
        Self {
            landscape: landscape.name().to_string(),
            global_opt_fit_per_period: vec![orig_global_opt_fit; n_periods],
            global_opt_pos_per_period: benchmark.trajectory.clone(),
            orig_global_opt_pos,
            orig_global_opt_fit,
            waveforms_per_dim: benchmark.waveforms.clone(),
            calibration: benchmark.calibration.clone(),
        }
    }

    /// Number of change periods in the stored trajectory.
    pub fn n_chg_periods(&self) -> usize {
        self.global_opt_pos_per_period.nrows()
    }

    /// Dimensionality of the stored trajectory.
    pub fn dim(&self) -> usize {
        self.global_opt_pos_per_period.ncols()
    }

    /// Write this dataset as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Surfaces I/O and serialization failures.
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read a dataset previously written with [`DynamicDataset::write_json`].
    ///
    /// # Errors
    ///
    /// Surfaces I/O and deserialization failures.
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let dataset = serde_json::from_reader(BufReader::new(file))?;
        Ok(dataset)
    }
}

/// Date-stamped dataset file name:
/// `<landscape>_d-<dim>_chgperiods-<n>_<YYYY-MM-DD>_<HH-MM>.json`.
pub fn dataset_file_name(landscape: Landscape, dim: usize, n_chg_periods: usize) -> String {
    let stamp = chrono::Local::now().format("%Y-%m-%d_%H-%M");
    format!(
        "{}_d-{}_chgperiods-{}_{}.json",
        landscape.name(),
        dim,
        n_chg_periods,
        stamp
    )
}
