#![deny(clippy::all)]

use anyhow::Result;
use calohits::XyzeHit;
use log::info;

mod config;
mod geometry;
mod transport;

use crate::config::SimConfig;
use crate::geometry::CellGrid;

// Hits echoed after the summary
const SHOWN_HITS: usize = 10;

fn main() -> Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading config from {}", path);
            SimConfig::load(&path)?
        }
        None => SimConfig::default(),
    };

    let grid = CellGrid::from_config(&config);
    info!("Calorimeter {} split into {} cells", grid.bounds, grid.cell_count());

    let outcome = transport::simulate(&config, &grid)?;

    println!("Seed: {}", config.seed);
    println!("{} raw hits merged into {} (primary, cell) deposits", outcome.raw_hits, outcome.hits.len());
    println!("{} of {} tracks escaped the calorimeter", outcome.escaped_tracks, config.total_tracks());
    println!("Deposited {:.4} GeV (after merge {:.4} GeV)", outcome.deposited_energy, outcome.hits.total_energy_loss());

    if let Some(hottest) = outcome.hits.iter().max_by(|a, b| a.energy_loss().total_cmp(&b.energy_loss())) {
        println!("Hottest deposit: {}", hottest);
        if let Some(center) = grid.cell_center(hottest.detector_id()) {
            println!("Hottest cell {} is centered at {}", hottest.detector_id(), center);
        }
    }

    let mut stdout = std::io::stdout().lock();
    for hit in outcome.hits.iter().take(SHOWN_HITS) {
        hit.print_stream(&mut stdout)?;
    }

    Ok(())
}
