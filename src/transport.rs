use std::ops::Range;

use calohits::{Hit, HitBuffer};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use rayon::prelude::*;
use spacemath::{Bounds3, Point3, Vector3};

use crate::config::{ConfigError, SimConfig};
use crate::geometry::CellGrid;

// cm/ns
pub const SPEED_OF_LIGHT: f64 = 29.979_245_8;

// Worker buffers grow past this on demand instead of reserving it up front
pub const MAX_RESERVED_HITS: usize = 1 << 20;

pub struct SimOutcome {
    // Merged, one hit per (primary, cell)
    pub hits: HitBuffer,
    pub raw_hits: usize,
    pub escaped_tracks: usize,
    pub deposited_energy: f64,
}

struct WorkerOutput {
    hits: HitBuffer,
    escaped_tracks: usize,
}

/*
    Splits the primaries into one contiguous range per worker. Every worker
    fills its own buffer, the buffers are merged afterwards on this thread.
    Each primary has its own rng stream so the result does not depend on
    the number of workers.
*/
pub fn simulate(config: &SimConfig, grid: &CellGrid) -> Result<SimOutcome, ConfigError> {
    config.validate()?;

    let workers = config.workers.max(1);
    let per_worker = (config.primaries + workers - 1) / workers;

    info!("Transporting {} primaries ({} tracks) over {} workers", config.primaries, config.total_tracks(), workers);

    let outputs: Vec<WorkerOutput> = (0..workers)
        .into_par_iter()
        .map(|worker| {
            let start = (worker * per_worker).min(config.primaries);
            let end = (start + per_worker).min(config.primaries);
            run_worker(config, grid, worker, start..end)
        })
        .collect();

    let raw_hits: usize = outputs.iter().map(|output| output.hits.len()).sum();
    let escaped_tracks: usize = outputs.iter().map(|output| output.escaped_tracks).sum();
    let deposited_energy: f64 = outputs.iter().map(|output| output.hits.total_energy_loss()).sum();

    if escaped_tracks * 2 > config.total_tracks() {
        warn!("{} of {} tracks left the calorimeter before their last step", escaped_tracks, config.total_tracks());
    }

    let hits = HitBuffer::merge_all(outputs.into_iter().map(|output| output.hits));
    info!("Collected {} hits, {} after merging", raw_hits, hits.len());

    Ok(SimOutcome { hits, raw_hits, escaped_tracks, deposited_energy })
}

// Upper bound on the hits a worker can produce, capped at MAX_RESERVED_HITS
fn initial_capacity(primaries: usize, tracks_per_primary: usize, steps_per_track: usize) -> usize {
    primaries
        .checked_mul(tracks_per_primary)
        .and_then(|tracks| tracks.checked_mul(steps_per_track))
        .map_or(MAX_RESERVED_HITS, |hits| hits.min(MAX_RESERVED_HITS))
}

fn run_worker(config: &SimConfig, grid: &CellGrid, worker: usize, primaries: Range<usize>) -> WorkerOutput {
    let capacity = initial_capacity(primaries.len(), config.tracks_per_primary, config.steps_per_track);
    let mut hits = HitBuffer::with_capacity(capacity);
    let mut escaped_tracks = 0;

    for primary in primaries.clone() {
        escaped_tracks += transport_primary(config, grid, primary, &mut hits);
    }

    debug!("Worker {} produced {} hits for primaries {:?}", worker, hits.len(), primaries);
    WorkerOutput { hits, escaped_tracks }
}

fn primary_rng(seed: u64, primary: usize) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).wrapping_add(primary as u64))
}

// Returns how many of the primary's tracks escaped the volume
fn transport_primary(config: &SimConfig, grid: &CellGrid, primary: usize, hits: &mut HitBuffer) -> usize {
    let primary_id = match i32::try_from(primary) {
        Ok(id) => id,
        Err(_) => {
            warn!("Primary {} does not fit in a hit id, skipping it", primary);
            return 0;
        }
    };

    let mut rng = primary_rng(config.seed, primary);
    let range = config.primary_energy;
    let energy = if range.max > range.min { rng.gen_range(range.min..range.max) } else { range.min };

    // Particles enter through the central half of the front face
    let center = grid.bounds.center();
    let half = grid.bounds.half_extent();
    let entry_face = Bounds3::new_from_extents(
        Point3::new(center.x - half.x / 2.0, center.y - half.y / 2.0, grid.front_face()),
        Point3::new(center.x + half.x / 2.0, center.y + half.y / 2.0, grid.front_face()),
    );
    let entry = entry_face.get_random_within(&mut rng);

    let tracks = config.tracks_per_primary;
    let step_length = grid.bounds.extent().z / config.steps_per_track.max(1) as f64;
    let track_energy = energy / tracks.max(1) as f64;
    let mut escaped = 0;

    for track in 0..tracks {
        let track_id = match primary.checked_mul(tracks).and_then(|first| first.checked_add(track)).map(i32::try_from) {
            Some(Ok(id)) => id,
            _ => {
                warn!("Track {} of primary {} does not fit in a track id, dropping the rest", track, primary);
                break;
            }
        };
        let direction = Vector3::new(rng.gen_range(-0.3..0.3), rng.gen_range(-0.3..0.3), 1.0).normalized();
        let mut pos = entry;
        let mut tof = 0.0;
        let mut remaining = track_energy;

        for _ in 0..config.steps_per_track {
            pos = pos + direction * step_length;
            tof += step_length / SPEED_OF_LIGHT;

            match grid.detector_id(pos) {
                Some(detector_id) => {
                    let deposit = remaining * rng.gen_range(0.05..0.25);
                    remaining -= deposit;
                    hits.push(Hit::new(primary_id, track_id, detector_id, energy, pos, direction * remaining, tof, deposit));
                }
                None => {
                    escaped += 1;
                    break;
                }
            }
        }
    }

    escaped
}
