use clap::Parser;
use dynopt_generator::{
    DynamicDataset, GeneratorConfig, GeneratorConfigBuilder, Landscape, dataset_file_name,
    generate,
};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

#[derive(Parser, Debug)]
#[command(
    name = "generate_datasets",
    about = "Generate dynamic benchmark data sets, one per (landscape, dimension) pair"
)]
struct Cli {
    /// Comma-separated landscape names (sphere, rosenbrock, rastrigin, griewank)
    #[arg(long, value_delimiter = ',', default_value = "sphere,rosenbrock,rastrigin,griewank")]
    functions: Vec<String>,

    /// Comma-separated dimensionalities to generate
    #[arg(long, value_delimiter = ',', default_value = "2,5,10,20")]
    dims: Vec<usize>,

    /// Number of change periods per trajectory
    #[arg(long, default_value_t = 10000)]
    n_chg_periods: usize,

    /// Random seed; the same seed is used for every landscape so the
    /// optimum movement is identical across landscapes
    #[arg(long, default_value_t = 234012)]
    seed: u64,

    /// Lower bound of every trajectory coordinate
    #[arg(long, default_value_t = 0.0)]
    lbound: f64,

    /// Upper bound of every trajectory coordinate
    #[arg(long, default_value_t = 900.0)]
    ubound: f64,

    /// Target mean absolute second difference of the movement
    #[arg(long, default_value_t = 10.0)]
    desired_curvature: f64,

    /// Target median absolute displacement per change period
    #[arg(long, default_value_t = 2.0)]
    desired_median_velocity: f64,

    /// Maximum number of sine terms composed per dimension
    #[arg(long, default_value_t = 4)]
    max_terms: usize,

    /// Number of probe points for the calibration
    #[arg(long, default_value_t = 100)]
    n_base_points: usize,

    /// Directory the data sets are written to (one subdirectory per landscape)
    #[arg(long, default_value = "datasets")]
    output_dir: PathBuf,
}

fn generate_one(
    config: &GeneratorConfig,
    landscape: Landscape,
    dim: usize,
    n_chg_periods: usize,
    output_dir: &Path,
) -> dynopt_generator::Result<PathBuf> {
    let (orig_pos, orig_fit) = landscape.original_optimum(dim)?;
    let benchmark = generate(config, n_chg_periods, &orig_pos)?;
    let dataset = DynamicDataset::new(landscape, orig_pos, orig_fit, &benchmark);

    let dir = output_dir.join(landscape.name());
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(dataset_file_name(landscape, dim, n_chg_periods));
    dataset.write_json(&path)?;
    Ok(path)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let mut landscapes = Vec::with_capacity(cli.functions.len());
    for name in &cli.functions {
        match Landscape::from_str(name) {
            Ok(landscape) => landscapes.push(landscape),
            Err(err) => {
                eprintln!("{}", err);
                process::exit(2);
            }
        }
    }

    let config = match GeneratorConfigBuilder::new()
        .seed(cli.seed)
        .max_terms(cli.max_terms)
        .n_base_points(cli.n_base_points)
        .bounds(cli.lbound, cli.ubound)
        .desired_curvature(cli.desired_curvature)
        .desired_median_velocity(cli.desired_median_velocity)
        .build()
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            process::exit(2);
        }
    };

    let pairs: Vec<(Landscape, usize)> = landscapes
        .iter()
        .flat_map(|&landscape| cli.dims.iter().map(move |&dim| (landscape, dim)))
        .collect();

    // Pairs are independent generation calls with no shared state, so they
    // are safe to run in parallel.
    let results: Vec<_> = pairs
        .par_iter()
        .map(|&(landscape, dim)| {
            let outcome = generate_one(&config, landscape, dim, cli.n_chg_periods, &cli.output_dir);
            (landscape, dim, outcome)
        })
        .collect();

    let mut failures = 0usize;
    for (landscape, dim, outcome) in results {
        match outcome {
            Ok(path) => println!("{} d={} -> {}", landscape, dim, path.display()),
            Err(err) => {
                failures += 1;
                eprintln!("{} d={} failed: {}", landscape, dim, err);
            }
        }
    }
    if failures > 0 {
        process::exit(1);
    }
}
