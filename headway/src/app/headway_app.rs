use std::path::Path;

use clap::Parser;
use headway_core::config::PrepConfig;

use crate::app::app_error::AppError;
use crate::app::operation::Operation;
use crate::store::CsvStore;

/// command line tool for batch preparation of transit graph relations
/// and trip time estimates from agency snapshot files
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct HeadwayApp {
    #[command(subcommand)]
    pub op: Operation,
    /// path to a .toml or .json run configuration file; defaults apply
    /// when omitted
    #[arg(long)]
    pub config_file: Option<String>,
    /// directory containing the snapshot csv files
    #[arg(long, default_value_t = String::from("snapshot"))]
    pub input_dir: String,
    /// directory receiving the derived relation files
    #[arg(long, default_value_t = String::from("derived"))]
    pub output_dir: String,
    #[arg(long, default_value_t = 1)]
    pub parallelism: usize,
}

impl HeadwayApp {
    pub fn run(&self) -> Result<(), AppError> {
        let config = match &self.config_file {
            None => PrepConfig::default().validated()?,
            Some(f) => {
                log::info!("reading run configuration from {f}");
                PrepConfig::try_from(f)?
            }
        };

        rayon::ThreadPoolBuilder::new()
            .num_threads(self.parallelism)
            .build_global()
            .map_err(|e| AppError::ThreadPoolError(format!("{e}")))?;

        let store = CsvStore::new(Path::new(&self.input_dir), Path::new(&self.output_dir))?;
        self.op.run(&config, &store)
    }
}
