//! Headless swarm run.
//!
//! Advances the simulation for a few simulated seconds and prints per-second
//! summaries: leader position, centroid, momentum, peak speeds.
//!
//! Run with: cargo run --example swarm_run --release

use swarm::constants::{DT, N_BODIES};
use swarm::diagnostics::summarize;
use swarm::SwarmSimulation;

const SECONDS: u32 = 20;

fn main() {
    env_logger::init();

    let mut sim = SwarmSimulation::with_seed(7);
    let frames_per_second = (1.0 / DT) as u32;

    println!("=== SWARM RUN ===");
    println!("{} bodies, dt {}, {} s", N_BODIES, DT, SECONDS);

    for second in 1..=SECONDS {
        for _ in 0..frames_per_second {
            let time = sim.frame() as f32 * DT;
            sim.update(time);
        }

        let summary = summarize(&sim.bodies());
        let leader = sim.leader();
        println!(
            "t={:>3}s step={:>5} leader=({:+.2},{:+.2},{:+.2}) centroid=({:+.2},{:+.2},{:+.2}) |p|={:>7.3} v_max={:>6.3} w_max={:>6.3}",
            second,
            sim.global_state().step,
            leader.x,
            leader.y,
            leader.z,
            summary.centroid.x,
            summary.centroid.y,
            summary.centroid.z,
            summary.momentum.length(),
            summary.max_speed,
            summary.max_spin,
        );
        if !summary.all_finite {
            println!("!!! non-finite state at t={}s, aborting", second);
            return;
        }
    }

    let offset = sim.centroid() - sim.leader();
    println!(
        "final centroid-to-leader offset: ({:+.2},{:+.2},{:+.2})",
        offset.x, offset.y, offset.z
    );
}
