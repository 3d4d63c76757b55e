#[macro_use]
extern crate log;

use api::*;
use photon_core::app::*;
use photon_core::error::Result;

#[cfg(all(feature = "dhat-rs", feature = "jemalloc"))]
compile_error!("feature 'dhat-rs' and feature 'jemalloc' cannot be enabled at the same time");

#[cfg(feature = "dhat-rs")]
use dhat::{Dhat, DhatAlloc};

#[cfg(feature = "dhat-rs")]
#[global_allocator]
static ALLOCATOR: DhatAlloc = DhatAlloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static ALLOCATOR: Jemalloc = Jemalloc;

fn main() {
    #[cfg(feature = "dhat-rs")]
    let _dhat = Dhat::start_heap_profiling();

    // Initialize `env_logger`.
    env_logger::init();

    let api = Api::from(&*OPTIONS);
    if OPTIONS.out_dir.is_none() {
        warn!("No output directory given; fields are computed but not written");
    }

    // Process field descriptions.
    for path in OPTIONS.paths.iter() {
        // In case of error report it and continue.
        if let Err(e) = simulate(path, &api) {
            error!("'{}': {}", path, e);
        }
    }
}

fn simulate(path: &str, api: &Api) -> Result<()> {
    let n = api.process_file(path)?;
    info!("Finished '{}' ({} field(s))", path, n);
    Ok(())
}
