use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::schema::{config::AnalysisConfig, input::MeasurementFile};

/// Where a report is written.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Destination {
    #[display("stdout")]
    Stdout,
    #[display("{}", _0.display())]
    File(PathBuf),
}

impl Destination {
    pub fn from_output_path(output_path: Option<&Path>) -> Self {
        output_path.map_or(Self::Stdout, |path| Self::File(path.to_owned()))
    }
}

/// Buffered report writer bound to its [`Destination`].
pub struct Output {
    writer: Box<dyn Write>,
    destination: Destination,
}

impl Output {
    pub fn create(destination: Destination) -> anyhow::Result<Self> {
        let writer: Box<dyn Write> = match &destination {
            Destination::Stdout => Box::new(io::stdout().lock()),
            Destination::File(path) => {
                let file = File::create(path).with_context(|| {
                    format!("Failed to create output file: {}", path.display())
                })?;
                Box::new(BufWriter::new(file))
            }
        };
        Ok(Self {
            writer,
            destination,
        })
    }

    pub fn stdout() -> Self {
        Self {
            writer: Box::new(io::stdout().lock()),
            destination: Destination::Stdout,
        }
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn write_json<T>(&mut self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut self.writer, value)
            .with_context(|| format!("Failed to write JSON to {}", self.destination))?;
        writeln!(self.writer)
            .with_context(|| format!("Failed to write JSON to {}", self.destination))?;
        self.finish()
    }

    pub fn finish(&mut self) -> anyhow::Result<()> {
        self.writer
            .flush()
            .with_context(|| format!("Failed to flush output to {}", self.destination))
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {file_kind} file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {file_kind} JSON file: {}", path.display()))
}

/// Read product measurements from a JSON file
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_measurement_file<P>(path: P) -> anyhow::Result<MeasurementFile>
where
    P: AsRef<Path>,
{
    read_json_file("measurement", path)
}

/// Read analysis defaults from a JSON config file
///
/// # Errors
///
/// Returns error if file cannot be opened or parsed
pub fn read_config_file<P>(path: P) -> anyhow::Result<AnalysisConfig>
where
    P: AsRef<Path>,
{
    read_json_file("config", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_display() {
        assert_eq!(Destination::from_output_path(None).to_string(), "stdout");
        let destination = Destination::from_output_path(Some(Path::new("report.json")));
        assert_eq!(destination, Destination::File(PathBuf::from("report.json")));
        assert_eq!(destination.to_string(), "report.json");
    }
}
