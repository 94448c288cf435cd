//! Magnitude response command.

use super::common::EqArgs;
use clap::Args;
use simpleq_core::StereoEngine;

/// ISO 266 third-octave centre frequencies.
const THIRD_OCTAVES: [f32; 31] = [
    20.0, 25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0,
    500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0,
    8000.0, 10000.0, 12500.0, 16000.0, 20000.0,
];

#[derive(Args)]
pub struct ResponseArgs {
    #[command(flatten)]
    eq: EqArgs,

    /// Sample rate the filters are designed for
    #[arg(long, default_value = "48000")]
    sample_rate: f32,

    /// Extra frequencies to evaluate, in Hz
    #[arg(long = "freq", value_name = "HZ")]
    freqs: Vec<f32>,
}

pub fn run(args: ResponseArgs) -> anyhow::Result<()> {
    let store = args.eq.build_store()?;
    let mut engine = StereoEngine::new(store);
    engine.prepare(args.sample_rate, 1)?;

    let nyquist = args.sample_rate / 2.0;
    let mut freqs: Vec<f32> = if args.freqs.is_empty() {
        THIRD_OCTAVES.to_vec()
    } else {
        args.freqs
    };
    freqs.retain(|&f| f > 0.0 && f < nyquist);

    println!("{:>10}  {:>9}", "FREQ (Hz)", "GAIN (dB)");
    for freq in freqs {
        let Some(db) = engine.response_db(freq) else {
            continue;
        };
        println!("{freq:>10.1}  {db:>9.2}  {}", bar(db));
    }
    Ok(())
}

/// Coarse text bar, one cell per 3 dB, centred on 0 dB.
fn bar(db: f64) -> String {
    let cells = (db / 3.0).round().clamp(-16.0, 8.0) as i32;
    if cells >= 0 {
        format!("|{}", "+".repeat(cells as usize))
    } else {
        format!("{}|", "-".repeat(cells.unsigned_abs() as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar() {
        assert_eq!(bar(0.0), "|");
        assert_eq!(bar(6.0), "|++");
        assert_eq!(bar(-9.0), "---|");
        assert_eq!(bar(-200.0).len(), 17);
    }
}
