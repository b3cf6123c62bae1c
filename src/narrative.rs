//! Scripted demo walkthrough
//!
//! Prints a paced, randomly-flavoured narrative of an O-RAN handover study.
//! Nothing is simulated and nothing is written to disk; every figure is drawn
//! from a fixed range so the output looks plausible on a terminal.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Decision methods compared in the evaluation phase
pub const METHODS: [&str; 2] = ["RL-Optimized", "RSRP-Based"];

const XAPPS: [&str; 3] = ["handover-optimizer", "traffic-steering", "qos-monitor"];
const MEC_SERVICES: [(&str, &str); 3] = [
    ("video-analytics", "edge-site-1"),
    ("v2x-relay", "edge-site-2"),
    ("ar-rendering", "edge-site-3"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeConfig {
    pub num_enbs: u32,
    pub num_ues: u32,
    pub episodes: u32,
    /// Pause between steps
    pub pace: Duration,
    /// Fixed seed for reproducible figures
    pub seed: Option<u64>,
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            num_enbs: 7,
            num_ues: 50,
            episodes: 10,
            pace: Duration::from_millis(400),
            seed: None,
        }
    }
}

impl NarrativeConfig {
    /// No pauses, fixed seed
    pub fn instant(seed: u64) -> Self {
        Self {
            pace: Duration::ZERO,
            seed: Some(seed),
            ..Default::default()
        }
    }
}

/// Writes the walkthrough to any sink
pub struct Narrator<R: Rng, W: Write> {
    config: NarrativeConfig,
    rng: R,
    out: W,
}

impl<W: Write> Narrator<StdRng, W> {
    /// Seeded from `config.seed`, or from entropy when unset
    pub fn new(config: NarrativeConfig, out: W) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng, out)
    }
}

impl<R: Rng, W: Write> Narrator<R, W> {
    pub fn with_rng(config: NarrativeConfig, rng: R, out: W) -> Self {
        Self { config, rng, out }
    }

    /// Play every phase in order
    pub fn run(&mut self) -> io::Result<()> {
        self.topology()?;
        self.ric()?;
        self.training()?;
        self.evaluation()?;
        self.mec()?;
        self.closing()?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn step(&mut self, line: String) -> io::Result<()> {
        writeln!(self.out, "{}", line)?;
        if !self.config.pace.is_zero() {
            self.out.flush()?;
            thread::sleep(self.config.pace);
        }
        Ok(())
    }

    fn phase(&mut self, n: u32, title: &str) -> io::Result<()> {
        debug!("Narrative phase {}: {}", n, title);
        writeln!(self.out)?;
        self.step(format!("[{}/6] {}", n, title))
    }

    fn topology(&mut self) -> io::Result<()> {
        self.phase(1, "Building O-RAN topology")?;
        for i in 0..self.config.num_enbs {
            let x = self.rng.gen_range(0.0..1000.0);
            let y = self.rng.gen_range(0.0..1000.0);
            let tx = self.rng.gen_range(40.0..46.0);
            self.step(format!("  ✓ eNB-{} at ({:.0}, {:.0}) m, Tx {:.1} dBm", i, x, y, tx))?;
        }
        let speed = self.rng.gen_range(3.0..30.0);
        self.step(format!(
            "  ✓ {} UEs attached, mean speed {:.1} m/s",
            self.config.num_ues, speed
        ))
    }

    fn ric(&mut self) -> io::Result<()> {
        self.phase(2, "Deploying near-RT RIC")?;
        for xapp in XAPPS {
            let latency = self.rng.gen_range(2.0..9.0);
            self.step(format!("  ✓ xApp {:<20} E2 round-trip {:.1} ms", xapp, latency))?;
        }
        Ok(())
    }

    fn training(&mut self) -> io::Result<()> {
        self.phase(3, "Training RL handover agent")?;
        let mut epsilon: f64 = 1.0;
        for episode in 1..=self.config.episodes {
            // Rewards drift upward as exploration decays
            let progress = episode as f64 / self.config.episodes.max(1) as f64;
            let reward = -20.0 + 60.0 * progress + self.rng.gen_range(-5.0..5.0);
            let loss = (1.0 - progress) * self.rng.gen_range(0.5..1.5) + 0.05;
            self.step(format!(
                "  Episode {:>3}/{}  reward {:>7.2}  loss {:.4}  ε {:.3}",
                episode, self.config.episodes, reward, loss, epsilon
            ))?;
            epsilon = (epsilon * 0.9).max(0.05);
        }
        Ok(())
    }

    fn evaluation(&mut self) -> io::Result<()> {
        self.phase(4, "Evaluating handover decisions")?;
        for method in METHODS {
            let (rate, latency) = if method == "RL-Optimized" {
                (self.rng.gen_range(92.0..99.0), self.rng.gen_range(12.0..25.0))
            } else {
                (self.rng.gen_range(80.0..90.0), self.rng.gen_range(25.0..45.0))
            };
            let attempts = self.rng.gen_range(150..400);
            self.step(format!(
                "  {:<14} {:>4} handovers  {:>5.1}% success  {:>5.1} ms avg",
                method, attempts, rate, latency
            ))?;
        }
        Ok(())
    }

    fn mec(&mut self) -> io::Result<()> {
        self.phase(5, "Deploying MEC services")?;
        for (name, site) in MEC_SERVICES {
            let cpu = self.rng.gen_range(10.0..75.0);
            self.step(format!("  ✓ {:<16} @ {:<12} running, CPU {:.0}%", name, site, cpu))?;
        }
        Ok(())
    }

    fn closing(&mut self) -> io::Result<()> {
        self.phase(6, "Summary")?;
        let gain = self.rng.gen_range(8.0..20.0);
        self.step(format!(
            "  RL-Optimized handover cut mean latency by {:.1}% against RSRP-Based",
            gain
        ))?;
        self.step("  Run `oran-sim show` against real outputs for measured figures.".to_string())
    }
}
