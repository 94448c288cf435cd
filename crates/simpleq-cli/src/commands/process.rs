//! File-based equalizer processing command.

use super::common::EqArgs;
use crate::wav::{read_audio, write_audio};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use simpleq_core::{StereoEngine, linear_to_db, rms_db};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    eq: EqArgs,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32", value_parser = parse_bit_depth)]
    bit_depth: u16,
}

fn parse_bit_depth(s: &str) -> Result<u16, String> {
    match s.parse::<u16>() {
        Ok(bits @ (16 | 24 | 32)) => Ok(bits),
        _ => Err(format!("unsupported bit depth '{s}' (expected 16, 24 or 32)")),
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("--block-size must be at least 1");
    }

    println!("Reading {}...", args.input.display());
    let audio = read_audio(&args.input)?;
    let frames = audio.frames();
    println!(
        "  {} frames, {} channel(s), {} Hz, {}-bit, {:.2}s",
        frames,
        audio.channels.len(),
        audio.sample_rate,
        audio.bits_per_sample,
        audio.duration_secs()
    );
    if audio.channels.len() > 2 {
        tracing::warn!(
            channels = audio.channels.len(),
            "only the first two channels are equalized"
        );
    }

    let store = args.eq.build_store()?;
    let snapshot = store.get_snapshot();
    println!(
        "EQ: low cut {:.0} Hz @ {}, peak {:.0} Hz {:+.1} dB Q {:.2}, high cut {:.0} Hz @ {}",
        snapshot.low_cut_freq_hz,
        snapshot.low_cut_slope,
        snapshot.peak_freq_hz,
        snapshot.peak_gain_db,
        snapshot.peak_quality,
        snapshot.high_cut_freq_hz,
        snapshot.high_cut_slope,
    );

    let mut engine = StereoEngine::new(store);
    engine.prepare(audio.sample_rate as f32, args.block_size)?;

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let input_stats = Stats::of(&audio.channels);
    let mut channels = audio.channels;

    let mut start = 0;
    while start < frames {
        let end = (start + args.block_size).min(frames);
        let mut block: Vec<&mut [f32]> = channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        engine.process_channels(&mut block)?;
        start = end;
        pb.set_position(end as u64);
    }

    pb.finish_with_message("done");

    let output_stats = Stats::of(&channels);
    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        input_stats.rms_db, input_stats.peak_db
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        output_stats.rms_db, output_stats.peak_db
    );

    println!("\nWriting {}...", args.output.display());
    write_audio(&args.output, &channels, audio.sample_rate, args.bit_depth)?;
    println!("Done!");

    Ok(())
}

struct Stats {
    rms_db: f32,
    peak_db: f32,
}

impl Stats {
    /// Loudest channel wins for both figures.
    fn of(channels: &[Vec<f32>]) -> Self {
        let rms_db = channels
            .iter()
            .map(|c| rms_db(c))
            .fold(-120.0f32, f32::max);
        let peak = channels
            .iter()
            .flat_map(|c| c.iter())
            .map(|s| s.abs())
            .fold(0.0f32, f32::max);
        Self {
            rms_db,
            peak_db: linear_to_db(peak),
        }
    }
}
