//! The API

#[macro_use]
extern crate log;
#[macro_use]
extern crate pest_derive;

mod field_io;
pub mod parser;

// Re-export.
pub use field_io::*;

use integrators::*;
use photon_core::app::Options;
use photon_core::error::*;
use photon_core::params::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Runs field descriptions and writes the resulting fields.
#[derive(Clone, Debug)]
pub struct Api {
    /// Execution options passed to every engine.
    options: TransportOptions,

    /// Seed used instead of the one in the description.
    seed: Option<u64>,

    /// Photon budget used instead of the one in the description.
    hops: Option<u64>,

    /// Directory receiving `<name>.pfld` files.
    out_dir: Option<PathBuf>,
}

impl Api {
    /// Returns a new `Api` that keeps results in memory only.
    ///
    /// * `options` - Execution options.
    pub fn new(options: TransportOptions) -> Self {
        Self {
            options,
            seed: None,
            hops: None,
            out_dir: None,
        }
    }

    /// Overrides the seed of every description.
    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self { seed, ..self }
    }

    /// Overrides the photon budget of every description.
    pub fn with_hops(self, hops: Option<u64>) -> Self {
        Self { hops, ..self }
    }

    /// Writes fields to the given directory.
    pub fn with_out_dir<P: Into<PathBuf>>(self, out_dir: Option<P>) -> Self {
        Self {
            out_dir: out_dir.map(Into::into),
            ..self
        }
    }

    /// Runs one field description and returns the normalized field.
    ///
    /// * `description` - Validated field description.
    pub fn simulate(&self, description: &FieldDescription) -> Result<SimulationResult> {
        let hops = self.hops.unwrap_or(description.hops);
        let seed = self.seed.unwrap_or(description.seed);
        info!(
            "{} '{}': {} photons, {}",
            description.kind, description.name, hops, description.params
        );

        let mut engine = PhotonTransport::new(
            description.kind,
            description.params,
            self.options.with_seed(seed),
        )?;
        engine.run(hops)?;
        Ok(postprocess(&engine))
    }

    /// Parses a field description file, runs every field in it and writes
    /// the results if an output directory is set. Stops at the first
    /// failing field. Returns the number of fields computed.
    ///
    /// * `path` - Field description file.
    pub fn process_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let descriptions = parser::parse_file(path)?;
        if descriptions.is_empty() {
            warn!("No fields described");
        }

        for description in descriptions.iter() {
            let result = self.simulate(description)?;
            match result.max_value {
                Some(max_value) => info!(
                    "'{}': {} photons, area {}, max {:.6}",
                    description.name,
                    result.total_photons,
                    result.emitter_area.unwrap_or_default(),
                    max_value
                ),
                None => info!(
                    "'{}': {} photons, max {:.6}",
                    description.name,
                    result.total_photons,
                    result.max().unwrap_or_default()
                ),
            }

            if let Some(out_dir) = &self.out_dir {
                fs::create_dir_all(out_dir)?;
                let out_path = out_dir.join(format!("{}.pfld", description.name));
                write_field(&out_path, &result)?;
                info!("Wrote '{}'", out_path.display());
            }
        }

        Ok(descriptions.len())
    }
}

impl From<&Options> for Api {
    /// Create an `Api` from command line options.
    ///
    /// * `options` - Command line options.
    fn from(options: &Options) -> Self {
        let accumulation = if options.atomic {
            Accumulation::SharedAtomic
        } else {
            Accumulation::PrivateTiles
        };
        let transport = TransportOptions::default()
            .with_threads(options.threads())
            .with_accumulation(accumulation)
            .with_progress(!options.quiet);

        Self::new(transport)
            .with_seed(options.seed)
            .with_hops(options.hops)
            .with_out_dir(options.out_dir.as_ref())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
