// Scripted buy traffic: Poisson arrivals of buys at three intensity levels,
// plus an occasional forced mutation.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Small / regular / whale buys.
const INTENSITIES: [f64; 3] = [0.3, 1.0, 1.8];
const INTENSITY_CDF: [f64; 3] = [0.55, 0.90, 1.00];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stimulus {
    Buy(f64),
    ForceMutation,
}

pub struct BuyTraffic {
    rng: ChaCha8Rng,
    /// Expected buys per simulated second.
    rate: f64,
    /// Chance per second of a forced mutation.
    force_rate: f64,
    pub buy_count: u32,
    pub force_count: u32,
}

impl BuyTraffic {
    pub fn new(rng: ChaCha8Rng, rate: f64) -> Self {
        Self {
            rng,
            rate: rate.max(0.0),
            force_rate: 0.05,
            buy_count: 0,
            force_count: 0,
        }
    }

    /// Stimuli arriving during a frame of length `dt`.
    pub fn frame(&mut self, dt: f64) -> Vec<Stimulus> {
        let mut out = Vec::new();
        let arrivals = poisson_sample(&mut self.rng, self.rate * dt);
        for _ in 0..arrivals {
            out.push(Stimulus::Buy(select_intensity(&mut self.rng)));
            self.buy_count += 1;
        }
        if self.rng.gen_bool((self.force_rate * dt).clamp(0.0, 1.0)) {
            out.push(Stimulus::ForceMutation);
            self.force_count += 1;
        }
        out
    }
}

/// Knuth's method; frame-sized lambdas are always small.
fn poisson_sample(rng: &mut ChaCha8Rng, lambda: f64) -> u32 {
    if lambda <= 0.0 {
        return 0;
    }
    let l = (-lambda).exp();
    let mut k: u32 = 0;
    let mut p: f64 = 1.0;
    loop {
        k += 1;
        p *= rng.gen::<f64>();
        if p <= l {
            return k - 1;
        }
    }
}

fn select_intensity(rng: &mut ChaCha8Rng) -> f64 {
    let r: f64 = rng.gen();
    for (i, &cdf) in INTENSITY_CDF.iter().enumerate() {
        if r < cdf {
            return INTENSITIES[i];
        }
    }
    INTENSITIES[2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_poisson_mean() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let n = 20_000;
        let sum: u64 = (0..n).map(|_| poisson_sample(&mut rng, 0.5) as u64).sum();
        let mean = sum as f64 / n as f64;
        assert!((mean - 0.5).abs() < 0.05, "Poisson mean {} far from 0.5", mean);
    }

    #[test]
    fn test_zero_rate_is_silent() {
        let mut traffic = BuyTraffic::new(ChaCha8Rng::seed_from_u64(1), 0.0);
        let buys = (0..1_000)
            .flat_map(|_| traffic.frame(0.016))
            .filter(|s| matches!(s, Stimulus::Buy(_)))
            .count();
        assert_eq!(buys, 0);
    }

    #[test]
    fn test_intensities_from_table() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..200 {
            assert!(INTENSITIES.contains(&select_intensity(&mut rng)));
        }
    }
}
