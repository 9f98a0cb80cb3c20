// src/sim/sink.rs

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::data_input::sample_row::SampleRow;

/// Receives each sampled wrench as soon as it is read. No buffering across samples.
pub trait SampleSink {
    fn emit(&mut self, step: u64, row: &SampleRow) -> io::Result<()>;
}

/// Reports samples through the `log` facade.
#[derive(Debug, Default)]
pub struct LogSink;

impl SampleSink for LogSink {
    fn emit(&mut self, step: u64, row: &SampleRow) -> io::Result<()> {
        log::info!("step {step}: {row}");
        Ok(())
    }
}

/// Writes one bracketed row per sample, the format `series_parser` loads.
pub struct SeriesWriter<W: Write> {
    writer: W,
    rows_written: usize,
}

impl SeriesWriter<BufWriter<File>> {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> SeriesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows_written: 0,
        }
    }

    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SampleSink for SeriesWriter<W> {
    fn emit(&mut self, _step: u64, row: &SampleRow) -> io::Result<()> {
        writeln!(self.writer, "{row}")?;
        self.writer.flush()?;
        self.rows_written += 1;
        Ok(())
    }
}

/// Collects samples in memory.
impl SampleSink for Vec<SampleRow> {
    fn emit(&mut self, _step: u64, row: &SampleRow) -> io::Result<()> {
        self.push(*row);
        Ok(())
    }
}

/// Fans one sample out to two sinks.
impl<A: SampleSink, B: SampleSink> SampleSink for (A, B) {
    fn emit(&mut self, step: u64, row: &SampleRow) -> io::Result<()> {
        self.0.emit(step, row)?;
        self.1.emit(step, row)
    }
}


// src/sim/sink.rs
