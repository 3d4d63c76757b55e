//! Photon Transport

use crossbeam_channel::Sender;
use emitters::ApertureEmitter;
use media::HomogeneousMedium;
use photon_core::base::*;
use photon_core::emitter::*;
use photon_core::error::*;
use photon_core::medium::*;
use photon_core::params::{FieldKind, SimulationParameters};
use photon_core::photon::PhotonFate;
use photon_core::progress::create_progress_bar;
use photon_core::rng::RNG;
use photon_core::stats::WalkStats;
use photon_core::voxel::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

/// Number of walks between progress messages from a worker.
const PROGRESS_BATCH: u64 = 1024;

/// How workers share the voxel accumulation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Accumulation {
    /// Each worker fills a private grid. Grids are summed in worker order
    /// after all walks finish, so results are bit reproducible for a fixed
    /// seed and thread count.
    #[default]
    PrivateTiles,

    /// All workers add into one grid with atomic operations. Needs a single
    /// grid's worth of memory; summation order varies between runs.
    SharedAtomic,
}

/// Execution options for `PhotonTransport`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TransportOptions {
    /// Run-level seed.
    pub seed: u64,

    /// Number of worker threads.
    pub n_threads: usize,

    /// Accumulation discipline.
    pub accumulation: Accumulation,

    /// Draw a progress bar.
    pub show_progress: bool,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            n_threads: 1,
            accumulation: Accumulation::PrivateTiles,
            show_progress: false,
        }
    }
}

impl TransportOptions {
    pub const fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub const fn with_threads(self, n_threads: usize) -> Self {
        Self { n_threads, ..self }
    }

    pub const fn with_accumulation(self, accumulation: Accumulation) -> Self {
        Self {
            accumulation,
            ..self
        }
    }

    pub const fn with_progress(self, show_progress: bool) -> Self {
        Self {
            show_progress,
            ..self
        }
    }
}

/// Messages from workers to the coordinating thread.
enum WorkerMessage {
    /// Number of walks completed since the last message.
    Progress(u64),

    /// The worker finished its share.
    Done { worker: usize, stats: WalkStats },
}

/// Monte Carlo photon transport engine. Launches photons from an emitter,
/// follows their random walks through a medium and accumulates the
/// visitation density of their paths in a voxel grid.
pub struct PhotonTransport {
    /// Field variant being estimated.
    kind: FieldKind,

    /// Validated parameters.
    params: SimulationParameters,

    /// Grid layout.
    grid: VoxelGrid,

    /// Scattering and absorption model.
    medium: ArcMedium,

    /// Source of photon walks.
    emitter: ArcEmitter,

    /// Execution options.
    options: TransportOptions,

    /// Raw accumulated visitation density.
    volume: VoxelTile,

    /// Number of completed walks.
    total_count: u64,

    /// Aggregate walk statistics.
    stats: WalkStats,

    /// Set once a run has accumulated into `volume`.
    has_run: bool,
}

impl PhotonTransport {
    /// Create a new engine with a homogeneous medium and an aperture emitter
    /// built from the parameters. Fails if the grid cannot be allocated.
    ///
    /// * `kind`    - Field variant; selects how the aperture launches photons.
    /// * `params`  - Validated simulation parameters.
    /// * `options` - Execution options.
    pub fn new(
        kind: FieldKind,
        params: SimulationParameters,
        options: TransportOptions,
    ) -> Result<Self> {
        let medium: ArcMedium = Arc::new(HomogeneousMedium::from(&params));
        let emitter: ArcEmitter = match kind {
            FieldKind::Detector => Arc::new(ApertureEmitter::detector(&params)),
            FieldKind::Emitter => Arc::new(ApertureEmitter::from(&params)),
        };
        Self::with_components(kind, params, medium, emitter, options)
    }

    /// Create a new engine with a custom medium and emitter.
    ///
    /// * `kind`    - Field variant.
    /// * `params`  - Validated simulation parameters (grid shape and pitch).
    /// * `medium`  - Scattering and absorption model.
    /// * `emitter` - Source of photon walks.
    /// * `options` - Execution options.
    pub fn with_components(
        kind: FieldKind,
        params: SimulationParameters,
        medium: ArcMedium,
        emitter: ArcEmitter,
        options: TransportOptions,
    ) -> Result<Self> {
        let grid = VoxelGrid::new(params.dims(), params.pitch())?;
        let volume = VoxelTile::new(grid)?;
        debug!(
            "{} transport on {:?} grid ({} voxels, bounds {})",
            kind,
            grid.dims(),
            grid.len(),
            grid.bounds()
        );

        Ok(Self {
            kind,
            params,
            grid,
            medium,
            emitter,
            options,
            volume,
            total_count: 0,
            stats: WalkStats::default(),
            has_run: false,
        })
    }

    /// Returns the field variant.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the simulation parameters.
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Returns the grid layout.
    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    /// Returns the emitting area of the source.
    pub fn emitter_area(&self) -> Float {
        self.emitter.area()
    }

    /// Returns the number of completed walks.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns the raw accumulated visitation density.
    pub fn volume(&self) -> &VoxelTile {
        &self.volume
    }

    /// Returns the aggregate walk statistics.
    pub fn stats(&self) -> &WalkStats {
        &self.stats
    }

    /// Clears accumulated results so that `run` may be called again.
    pub fn reset(&mut self) {
        self.volume.clear();
        self.total_count = 0;
        self.stats = WalkStats::default();
        self.has_run = false;
    }

    /// Runs exactly `hops` photon walks and returns the number of completed
    /// walks.
    ///
    /// * `hops` - Photon budget; one hop is one walk from emission to
    ///            termination.
    pub fn run(&mut self, hops: u64) -> Result<u64> {
        let never = AtomicBool::new(false);
        self.run_with_cancel(hops, &never)
    }

    /// Runs up to `hops` photon walks. Workers check `cancel` between walks
    /// and stop once it is set; the partial accumulation is kept and the
    /// number of walks actually completed is returned.
    ///
    /// * `hops`   - Photon budget.
    /// * `cancel` - Cooperative cancellation flag.
    pub fn run_with_cancel(&mut self, hops: u64, cancel: &AtomicBool) -> Result<u64> {
        if self.has_run {
            return Err(FieldError::AlreadyRun);
        }
        if hops == 0 {
            return Err(FieldError::InvalidParameter(String::from(
                "hops must be positive",
            )));
        }

        let shares = partition(hops, self.options.n_threads.max(1));
        let n_workers = shares.iter().filter(|&&n| n > 0).count();
        info!(
            "Tracing {} photons on {} worker(s), {:?}, seed {}",
            hops, n_workers, self.options.accumulation, self.options.seed
        );

        // Allocate everything up front so no worker can fail mid-run.
        let (mut tiles, shared) = match self.options.accumulation {
            Accumulation::PrivateTiles => {
                let tiles = (0..n_workers)
                    .map(|_| VoxelTile::new(self.grid))
                    .collect::<Result<Vec<_>>>()?;
                (tiles, None)
            }
            Accumulation::SharedAtomic => (vec![], Some(SharedVoxelTile::new(self.grid)?)),
        };

        let progress = create_progress_bar(hops, self.options.show_progress);
        progress.set_message("Tracing photons");
        let start = Instant::now();

        let mut worker_stats: Vec<WalkStats> = vec![WalkStats::default(); n_workers];
        let medium = self.medium.as_ref();
        let emitter = self.emitter.as_ref();
        let seed = self.options.seed;

        thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded::<WorkerMessage>(8 * n_workers);

            // Workers are numbered densely so the RNG stream of a worker
            // depends only on its index.
            let jobs = shares
                .iter()
                .take(n_workers)
                .enumerate()
                .map(move |(worker, &count)| WalkJob {
                    worker,
                    count,
                    seed,
                    medium,
                    emitter,
                    cancel,
                });

            // Spawn worker threads.
            match shared.as_ref() {
                Some(shared) => {
                    for job in jobs {
                        let tx = tx.clone();
                        scope.spawn(move || {
                            let mut acc = shared;
                            job.run(&mut acc, &tx);
                        });
                    }
                }
                None => {
                    for (job, tile) in jobs.zip(tiles.iter_mut()) {
                        let tx = tx.clone();
                        scope.spawn(move || job.run(tile, &tx));
                    }
                }
            }
            drop(tx); // Drop extra since we've cloned one for each worker.

            for msg in rx.iter() {
                match msg {
                    WorkerMessage::Progress(n) => progress.inc(n),
                    WorkerMessage::Done { worker, stats } => worker_stats[worker] = stats,
                }
            }
        });

        // Merge in worker order so the summation order is fixed.
        match shared {
            Some(shared) => self.volume = shared.to_tile(),
            None => {
                for tile in tiles.iter() {
                    self.volume.merge(tile);
                }
            }
        }
        for stats in worker_stats.iter() {
            self.stats.merge(stats);
        }
        self.total_count = self.stats.walks;
        self.has_run = true;

        if self.total_count < hops {
            progress.abandon_with_message("Cancelled");
            warn!(
                "Photon transport cancelled after {} of {} walks",
                self.total_count, hops
            );
        } else {
            progress.finish_with_message("Done");
        }
        info!(
            "Traced {} photons in {:.2?}",
            self.total_count,
            start.elapsed()
        );
        self.stats.log();

        Ok(self.total_count)
    }
}

/// Splits `hops` walks over `n` workers. The first `hops % n` workers get one
/// extra walk.
///
/// * `hops` - Total number of walks.
/// * `n`    - Number of workers.
fn partition(hops: u64, n: usize) -> Vec<u64> {
    let n = n as u64;
    (0..n).map(|w| hops / n + u64::from(w < hops % n)).collect()
}

/// A contiguous share of walks executed by one worker.
struct WalkJob<'a> {
    /// Worker index; selects the RNG stream.
    worker: usize,

    /// Number of walks to trace.
    count: u64,

    /// Run-level seed.
    seed: u64,

    /// Scattering and absorption model.
    medium: &'a (dyn Medium + Send + Sync),

    /// Source of photon walks.
    emitter: &'a (dyn Emitter + Send + Sync),

    /// Cooperative cancellation flag.
    cancel: &'a AtomicBool,
}

impl<'a> WalkJob<'a> {
    /// Traces the walks of this share into `acc`, reporting progress and the
    /// final statistics over `tx`.
    ///
    /// * `acc` - Voxel accumulator.
    /// * `tx`  - Channel to the coordinating thread.
    fn run<A: VoxelAccumulator>(&self, acc: &mut A, tx: &Sender<WorkerMessage>) {
        let mut rng = RNG::with_seed(self.worker as u64, self.seed);
        let mut stats = WalkStats::default();
        let mut pending = 0;

        for _ in 0..self.count {
            if self.cancel.load(Ordering::Relaxed) {
                break;
            }

            trace_photon(self.medium, self.emitter, acc, &mut rng, &mut stats);

            pending += 1;
            if pending == PROGRESS_BATCH {
                let _ = tx.send(WorkerMessage::Progress(pending));
                pending = 0;
            }
        }

        if pending > 0 {
            let _ = tx.send(WorkerMessage::Progress(pending));
        }
        let _ = tx.send(WorkerMessage::Done {
            worker: self.worker,
            stats,
        });
    }
}

/// Traces one photon from emission to absorption or exit, depositing its
/// path into `acc`. Returns the terminal state of the photon.
///
/// * `medium`  - Scattering and absorption model.
/// * `emitter` - Source of the photon.
/// * `acc`     - Voxel accumulator.
/// * `rng`     - Random number generator of the calling worker.
/// * `stats`   - Walk statistics to update.
pub fn trace_photon<A: VoxelAccumulator>(
    medium: &dyn Medium,
    emitter: &dyn Emitter,
    acc: &mut A,
    rng: &mut RNG,
    stats: &mut WalkStats,
) -> PhotonFate {
    let sample = emitter.sample_photon(rng);
    let mut photon = sample.photon;
    let mut resampled = u64::from(sample.resamples);
    let mut scatters = 0_u64;
    let mut path_length = 0.0;

    while photon.is_alive() {
        let free_path = medium.sample_free_path(rng);
        match acc.accumulate_segment(&photon.p, &photon.d, free_path.distance, photon.weight) {
            SegmentEnd::Exited { distance } => {
                path_length += distance;
                photon.advance(distance);
                photon.exit();
            }
            SegmentEnd::Inside => {
                path_length += free_path.distance;
                photon.advance(free_path.distance);
                match free_path.event {
                    InteractionEvent::Scatter => {
                        let scattered = medium.sample_scatter_direction(&photon.d, rng);
                        resampled += u64::from(scattered.resamples);
                        photon.scatter(scattered.wi);
                        scatters += 1;
                    }
                    InteractionEvent::Absorb => photon.absorb(),
                }
            }
        }
    }

    stats.walks += 1;
    stats.scatter_events += scatters;
    stats.resampled += resampled;
    match photon.fate {
        PhotonFate::Absorbed => stats.absorbed += 1,
        _ => stats.exited += 1,
    }
    stats.scatters_per_walk.report(scatters);
    stats.path_length.report(path_length);

    photon.fate
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
