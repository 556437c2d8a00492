use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::PathBuf,
};

use anyhow::Context as _;

/// Destination of a JSON report.
#[derive(Debug)]
pub enum Output {
    Stdout(StdoutLock<'static>),
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    /// Writes `value` as pretty JSON to `output_path`, or to stdout when `None`.
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = match output_path {
            Some(path) => {
                let file = File::create(&path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Output::File {
                    writer: BufWriter::new(file),
                    path,
                }
            }
            None => Output::Stdout(io::stdout().lock()),
        };
        let write = |output: &mut Output| -> io::Result<()> {
            serde_json::to_writer_pretty(&mut *output, value)?;
            writeln!(output)?;
            output.flush()
        };
        write(&mut output)
            .with_context(|| format!("Failed to write JSON to {}", output.destination()))
    }

    fn destination(&self) -> String {
        match self {
            Output::Stdout(_) => "stdout".to_owned(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout(writer) => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout(writer) => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Percent granularity of progress lines.
const PROGRESS_STEP_PERCENT: usize = 10;

/// Prints a progress line to stderr every [`PROGRESS_STEP_PERCENT`] percent.
#[derive(Debug)]
pub struct Progress {
    label: &'static str,
    last_reported: Option<usize>,
}

impl Progress {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            last_reported: None,
        }
    }

    pub fn update(&mut self, done: usize, total: usize) {
        if let Some(percent) = self.advance(done, total) {
            eprintln!("{}: {percent:>3}% ({done}/{total})", self.label);
        }
    }

    /// Returns the percentage to report, if a new step was reached.
    fn advance(&mut self, done: usize, total: usize) -> Option<usize> {
        if total == 0 {
            return None;
        }
        let percent = done * 100 / total;
        let step = percent / PROGRESS_STEP_PERCENT * PROGRESS_STEP_PERCENT;
        if step == 0 || self.last_reported.is_some_and(|last| last >= step) {
            return None;
        }
        self.last_reported = Some(step);
        Some(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_reports_each_step_once() {
        let mut progress = Progress::new("test");
        let reported = (1..=1000)
            .filter_map(|done| progress.advance(done, 1000))
            .collect::<Vec<_>>();
        assert_eq!(reported, [10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[test]
    fn test_progress_small_totals() {
        let mut progress = Progress::new("test");
        let reported = (1..=3)
            .filter_map(|done| progress.advance(done, 3))
            .collect::<Vec<_>>();
        assert_eq!(reported, [30, 60, 100]);

        let mut progress = Progress::new("test");
        assert_eq!(progress.advance(0, 0), None);
    }

    #[test]
    fn test_save_json_to_file() {
        let path = std::env::temp_dir().join(format!(
            "pairdist-cli-save-json-{}.json",
            std::process::id()
        ));
        Output::save_json(&serde_json::json!({ "points": 2 }), Some(path.clone())).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["points"], 2);
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_save_json_reports_unwritable_path() {
        let path = std::env::temp_dir()
            .join(format!("pairdist-cli-missing-{}", std::process::id()))
            .join("summary.json");
        let err = Output::save_json(&serde_json::json!({}), Some(path)).unwrap_err();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
