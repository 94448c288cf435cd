//! Parameter listing command.

use simpleq_core::{PARAMS, ParamDescriptor, ParamFlags, SlopeOrder};

pub fn run() -> anyhow::Result<()> {
    println!(
        "{:<4} {:<16} {:<15} {:<24} {:<12}",
        "ID", "KEY", "NAME", "RANGE", "DEFAULT"
    );
    println!("{}", "-".repeat(74));

    for desc in &PARAMS {
        println!(
            "{:<4} {:<16} {:<15} {:<24} {:<12}",
            desc.id.0,
            desc.string_id,
            desc.name,
            range(desc),
            format_value(desc, desc.default),
        );
    }

    println!();
    println!("Slopes are set with --low-cut-slope / --high-cut-slope in dB/oct.");
    Ok(())
}

fn range(desc: &ParamDescriptor) -> String {
    if desc.flags.contains(ParamFlags::STEPPED) {
        SlopeOrder::ALL
            .iter()
            .map(|s| s.db_per_octave().to_string())
            .collect::<Vec<_>>()
            .join("/")
            + desc.unit.suffix()
    } else {
        format!("{} to {}{}", desc.min, desc.max, desc.unit.suffix())
    }
}

fn format_value(desc: &ParamDescriptor, value: f32) -> String {
    if desc.flags.contains(ParamFlags::STEPPED) {
        return SlopeOrder::from_value(value).map_or_else(|| value.to_string(), |s| s.to_string());
    }
    format!("{value}{}", desc.unit.suffix())
}
