//! Writes a synthetic red-wine quality CSV with the same header as the real
//! dataset, so the dashboard can run without it.
//!
//! Usage: `generate_sample [OUTPUT] [ROWS]`

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

#[derive(Parser, Debug)]
#[command(about = "Write a synthetic red-wine quality CSV")]
struct Args {
    /// Destination file; parent directories are created.
    #[arg(default_value = "data/winequality-red.csv")]
    output: PathBuf,

    /// Number of rows to write, duplicates included.
    #[arg(default_value_t = 1599)]
    rows: usize,
}

const HEADER: [&str; 12] = [
    "fixed acidity",
    "volatile acidity",
    "citric acid",
    "residual sugar",
    "chlorides",
    "free sulfur dioxide",
    "total sulfur dioxide",
    "density",
    "pH",
    "sulphates",
    "alcohol",
    "quality",
];

/// (mean, std dev, lower bound, decimals) per measurement, roughly the
/// marginals of the red-wine data.
const MARGINALS: [(f64, f64, f64, usize); 11] = [
    (8.32, 1.74, 4.6, 1),
    (0.53, 0.18, 0.12, 3),
    (0.27, 0.19, 0.0, 2),
    (2.54, 1.41, 0.9, 1),
    (0.087, 0.047, 0.012, 3),
    (15.9, 10.5, 1.0, 0),
    (46.5, 32.9, 6.0, 0),
    (0.9967, 0.0019, 0.990, 4),
    (3.31, 0.15, 2.74, 2),
    (0.66, 0.17, 0.33, 2),
    (10.42, 1.07, 8.4, 1),
];

/// Every n-th row repeats its predecessor, so duplicate removal has work to do.
const DUPLICATE_EVERY: usize = 7;

fn round_to(v: f64, decimals: usize) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (v * scale).round() / scale
}

/// Per-column distributions, built once.
struct WineGenerator {
    marginals: Vec<(Normal<f64>, f64, usize)>,
    noise: Normal<f64>,
}

impl WineGenerator {
    fn new() -> Result<Self> {
        let marginals = MARGINALS
            .iter()
            .map(|&(mean, sd, floor, decimals)| {
                Normal::new(mean, sd)
                    .map(|normal| (normal, floor, decimals))
                    .map_err(|e| anyhow!("marginal ({mean}, {sd}): {e}"))
            })
            .collect::<Result<Vec<_>>>()?;
        let noise = Normal::new(0.0, 0.55).map_err(|e| anyhow!("quality noise: {e}"))?;
        Ok(WineGenerator { marginals, noise })
    }

    /// One synthetic wine: measurements then an integer quality score.
    fn wine(&self, rng: &mut StdRng) -> Vec<f64> {
        let mut row: Vec<f64> = self
            .marginals
            .iter()
            .map(|(normal, floor, decimals)| round_to(normal.sample(rng).max(*floor), *decimals))
            .collect();

        // Alcohol and sulphates push quality up, volatile acidity pulls it down.
        let (volatile, sulphates, alcohol) = (row[1], row[9], row[10]);
        let score = 5.64 + 0.45 * (alcohol - 10.42) - 2.2 * (volatile - 0.53)
            + 1.3 * (sulphates - 0.66)
            + self.noise.sample(rng);
        row.push(score.round().clamp(3.0, 8.0));
        row
    }
}

fn main() -> Result<()> {
    let Args {
        output: output_path,
        rows,
    } = Args::parse();

    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let generator = WineGenerator::new()?;
    let mut rng = StdRng::seed_from_u64(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADER).context("writing header")?;

    let mut previous: Option<Vec<f64>> = None;
    let mut good = 0usize;
    for i in 0..rows {
        let wine = match &previous {
            Some(prev) if i % DUPLICATE_EVERY == 0 => prev.clone(),
            _ => generator.wine(&mut rng),
        };
        if wine[11] >= 6.0 {
            good += 1;
        }
        writer
            .write_record(wine.iter().map(|v| v.to_string()))
            .with_context(|| format!("writing row {i}"))?;
        previous = Some(wine);
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {rows} wines ({good} good) to {}",
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_default_to_full_sized_file() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from("data/winequality-red.csv"));
        assert_eq!(args.rows, 1599);

        let args = Args::try_parse_from(["generate_sample", "out.csv", "40"]).unwrap();
        assert_eq!(args.output, PathBuf::from("out.csv"));
        assert_eq!(args.rows, 40);

        assert!(Args::try_parse_from(["generate_sample", "out.csv", "many"]).is_err());
    }

    #[test]
    fn wines_respect_floors_and_quality_range() {
        let generator = WineGenerator::new().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let wine = generator.wine(&mut rng);
            assert_eq!(wine.len(), HEADER.len());
            for (v, &(_, _, floor, _)) in wine.iter().zip(MARGINALS.iter()) {
                assert!(*v >= floor, "{v} below {floor}");
            }
            let quality = wine[11];
            assert!((3.0..=8.0).contains(&quality));
            assert_eq!(quality, quality.round());
        }
    }

    #[test]
    fn same_seed_same_wines() {
        let generator = WineGenerator::new().unwrap();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(generator.wine(&mut a), generator.wine(&mut b));
        }
    }
}
