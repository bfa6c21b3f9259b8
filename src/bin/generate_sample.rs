use std::path::Path;

use anyhow::Result;

use rusty_burette::data::loader::save_file;
use rusty_burette::data::model::{Experiment, ExperimentSet};

/// Density of water at about 23 °C, g/mL.
const WATER: f64 = 0.9968;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5)).rotate_left(7).wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Simulated weighings of water for an instrument that delivers
/// `target × (1 + bias)` on average.
fn simulate(
    rng: &mut SimpleRng,
    name: &str,
    target: f64,
    bias: f64,
    rel_spread: f64,
    n: usize,
) -> Experiment {
    let mean_weight = target * (1.0 + bias) * WATER;
    let weights = (0..n)
        .map(|_| {
            let w = rng.gauss(mean_weight, mean_weight * rel_spread);
            // Balance resolution: 0.1 mg
            (w * 1e4).round() / 1e4
        })
        .collect();
    Experiment::new(name, target, WATER, weights)
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let mut experiments = ExperimentSet::builtin().experiments;
    experiments.push(simulate(&mut rng, "25mL burette", 25.0, -0.002, 0.001, 10));
    experiments.push(simulate(&mut rng, "5mL volumetric pipette", 5.0, 0.0, 0.0015, 10));
    experiments.push(simulate(&mut rng, "200μL micropipette", 0.2, 0.012, 0.008, 8));
    let set = ExperimentSet::from_experiments(experiments);

    for output in ["sample_experiments.json", "sample_experiments.csv"] {
        save_file(Path::new(output), &set)?;
        println!("Wrote {} instruments to {output}", set.len());
    }
    Ok(())
}
