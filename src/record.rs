use std::io::Write;
use std::time::Duration;

pub const CSV_HEADER: &str = "problem_size,elapsed_time";

/// One measured sweep iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingRecord {
    pub problem_size: usize,
    pub elapsed: Duration,
}

impl TimingRecord {
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    pub fn to_csv_row(&self) -> String {
        format!("{},{:.8}", self.problem_size, self.elapsed_seconds())
    }
}

/// Line-oriented CSV sink. Every line is flushed as soon as it is written.
pub struct CsvWriter<W: Write> {
    out: W,
}

impl<W: Write> CsvWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_header(&mut self) -> std::io::Result<()> {
        writeln!(self.out, "{CSV_HEADER}")?;
        self.out.flush()
    }

    pub fn write_record(&mut self, record: &TimingRecord) -> std::io::Result<()> {
        writeln!(self.out, "{}", record.to_csv_row())?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
