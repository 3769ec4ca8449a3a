//! Hunt for NaN/Inf in long runs.
//!
//! Sweeps several seeds, runs each simulation for thousands of frames, and
//! reports the first non-finite record it ever sees.
//!
//! Run with: cargo run --example nan_hunt --release

use swarm::SwarmSimulation;

const FRAMES: u32 = 5000;
const SEEDS: [u64; 5] = [0, 1, 7, 42, 0xDEAD_BEEF];

fn first_bad_record(sim: &SwarmSimulation) -> Option<usize> {
    sim.store()
        .records()
        .iter()
        .position(|record| !record.is_finite())
}

fn main() {
    env_logger::init();
    println!("=== NAN HUNT === ({} frames per seed)", FRAMES);

    let mut failures = 0;
    for seed in SEEDS {
        let mut sim = SwarmSimulation::with_seed(seed);
        let mut bad = None;

        for frame in 0..FRAMES {
            sim.update(frame as f32 / 60.0);
            if let Some(index) = first_bad_record(&sim) {
                bad = Some((frame, index));
                break;
            }
        }

        match bad {
            Some((frame, index)) => {
                failures += 1;
                println!(
                    "seed {:>10}: !!! record {} went non-finite at frame {}: {:?}",
                    seed,
                    index,
                    frame,
                    sim.store().load(index)
                );
            }
            None => {
                let step = sim.global_state().step;
                println!("seed {:>10}: clean ({} steps)", seed, step);
            }
        }
    }

    if failures == 0 {
        println!("all seeds clean");
    } else {
        println!("{} seed(s) failed", failures);
        std::process::exit(1);
    }
}
