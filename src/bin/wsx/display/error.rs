use std::io::{self, Write};

use anyhow::Error;

use ws22_explore::{AnalysisError, ModelError};

use crate::util::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    let msg = err.to_string();
    for line in wrap(&msg, 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 59) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn new() -> Self {
        Self {
            hints: Vec::new(),
            has_typed_hints: false,
        }
    }

    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self::new();

        collector.collect_io_hints(err);
        collector.collect_analysis_hints(err);

        if !collector.has_typed_hints {
            collector.collect_dataset_hints(err);
        }
        if !collector.has_typed_hints {
            collector.collect_fallback_hints(err);
        }

        if collector.hints.is_empty() {
            None
        } else {
            Some(collector.hints)
        }
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
    }

    fn mark_typed(&mut self) {
        self.has_typed_hints = true;
    }

    fn collect_io_hints(&mut self, err: &Error) {
        use ws22_explore::io::Error as IoError;

        let Some(io_err) = err.downcast_ref::<IoError>() else {
            return;
        };

        self.mark_typed();

        match io_err {
            IoError::Io { source } => {
                self.collect_std_io_hints(source);
            }

            IoError::Transfer { url, .. } => {
                self.add("The archive download did not complete");
                self.add(format!("Check the network connection and that {} is reachable", url));
                self.add("Use --data-dir to read archives already on disk");
            }

            IoError::DatasetNotFound { .. } => {
                self.add("Check --base-url (or --data-dir) for the right location");
                self.add("Run 'wsx list' to see every archive location");
            }

            IoError::Archive { .. } => {
                self.add("The archive is not readable as a ZIP file");
                self.add("It may be a partial download; fetch a fresh copy");
            }

            IoError::Decode { entry, .. } => {
                self.add(format!("Archive member '{}' is not a readable NumPy array", entry));
                self.add("The archive may be truncated; fetch a fresh copy");
            }

            IoError::Malformed { source } => {
                self.add("The archive decoded, but its arrays do not fit together");
                self.collect_model_hints(source);
            }

            IoError::Csv(_) => {
                self.add("CSV output could not be written");
                self.add("Check the output path and available disk space");
            }

            IoError::Json(_) => {
                self.add("JSON output could not be written");
                self.add("Check the output path and available disk space");
            }
        }
    }

    fn collect_std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("File or directory not found");
                self.add("Check the path spelling and ensure the file exists");
            }

            ErrorKind::PermissionDenied => {
                self.add("Permission denied accessing the file");
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("File contains invalid or corrupt data");
                self.add("Verify the file is not truncated");
            }

            ErrorKind::UnexpectedEof => {
                self.add("Unexpected end of file encountered");
                self.add("The file may be an incomplete download");
            }

            ErrorKind::WriteZero => {
                self.add("Failed to write data (disk full?)");
                self.add("Check available disk space");
            }

            ErrorKind::BrokenPipe => {
                self.add("The output consumer closed the pipe");
                self.add("This can happen when piping to commands like `head`");
            }

            _ => {
                self.add("I/O operation failed");
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn collect_analysis_hints(&mut self, err: &Error) {
        let Some(analysis_err) = err.downcast_ref::<AnalysisError>() else {
            return;
        };

        self.mark_typed();

        match analysis_err {
            AnalysisError::InvalidCoordinateSpec { .. } => {
                self.add("Give 2 indices for a distance, 3 for an angle, 4 for a dihedral");
                self.add("Separate indices with ',', e.g. --coords 0,1,2");
            }

            AnalysisError::AtomIndex { count, .. } => {
                self.add(format!(
                    "Atom indices are 0-based; this molecule has atoms 0 through {}",
                    count.saturating_sub(1)
                ));
                self.add("Run 'wsx info' to see the atom count");
            }

            AnalysisError::SpecParse { .. } => {
                self.add("Separate indices with ',' and specs with '-', e.g. 0,1-0,1,2");
                self.add("Indices must be plain non-negative integers");
            }

            AnalysisError::ModeOutOfRange { .. } => {
                self.add("Run 'wsx info' to see the normal-mode count");
                self.add("Mode indices are 0-based");
            }

            AnalysisError::MissingColumn(_) | AnalysisError::ColumnKind(_) => {
                self.add("Summaries need a numeric value column to describe");
            }

            AnalysisError::Model(source) => {
                self.collect_model_hints(source);
            }
        }
    }

    fn collect_dataset_hints(&mut self, err: &Error) {
        let Some(model_err) = err.downcast_ref::<ModelError>() else {
            return;
        };

        self.mark_typed();
        self.collect_model_hints(model_err);
    }

    fn collect_model_hints(&mut self, err: &ModelError) {
        match err {
            ModelError::MissingField(field) => {
                self.add(format!("This archive does not carry the '{}' field", field));
                self.add("Run 'wsx info' to list the fields it does carry");
            }

            ModelError::FieldShape { .. } => {
                self.add("The archive does not match the published WS22 layout");
                self.add("Fetch a fresh copy of the archive");
            }

            ModelError::UnknownElement(_) => {
                self.add("WS22 molecules contain H, C, N and O only");
                self.add("The Z field may be corrupt; fetch a fresh copy");
            }

            ModelError::ColumnLength { .. } | ModelError::ConformationMismatch { .. } => {
                self.add("The result table could not be assembled from this archive");
                self.add("Fetch a fresh copy of the archive");
            }

            ModelError::GeometryIndex { count, .. } => {
                self.add(format!(
                    "Conformations are numbered 1 through {} on the command line",
                    count
                ));
            }
        }
    }

    fn collect_fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("unknown molecule") {
            self.add("Run 'wsx list' for the molecule catalog");
            return;
        }

        if msg.contains("cannot infer format") {
            self.add("Name outputs with a .csv, .json or .xyz extension");
            self.add("Or pass --outfmt to set the format explicitly");
            return;
        }

        if msg.contains("no such file") || msg.contains("not found") {
            self.add("Check that the path is correct");
            self.add("Verify the file exists and is readable");
            return;
        }

        if msg.contains("permission denied") {
            self.add("Check file permissions with `ls -la`");
            self.add("Ensure you have the required access rights");
            return;
        }

        if msg.contains("timed out") || msg.contains("connection") || msg.contains("dns") {
            self.add("Check the network connection");
            self.add("Use --data-dir to read archives already on disk");
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    let mut text = String::new();

    text.push_str(&err.to_string());

    let mut source = err.source();
    while let Some(cause) = source {
        text.push('\n');
        text.push_str(&cause.to_string());
        source = cause.source();
    }

    text.to_lowercase()
}
