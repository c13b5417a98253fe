//! List the values a request may use.

use clap::ValueEnum;

use ffwrap_command::{Codec, FileFormat, LogLevel, PixelFormat};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Table {
    Codecs,
    PixelFormats,
    Formats,
    LogLevels,
}

pub fn run(table: Table) -> anyhow::Result<()> {
    for name in names(table) {
        println!("{name}");
    }
    Ok(())
}

fn names(table: Table) -> Vec<&'static str> {
    match table {
        Table::Codecs => Codec::ALL.iter().map(|c| c.as_str()).collect(),
        Table::PixelFormats => PixelFormat::ALL.iter().map(|p| p.as_str()).collect(),
        Table::Formats => FileFormat::ALL.iter().map(|f| f.as_str()).collect(),
        Table::LogLevels => LogLevel::ALL.iter().map(|l| l.as_str()).collect(),
    }
}
