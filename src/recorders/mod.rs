//! Recorders that persist incremental units as flat text
//!
//! A recorder is a consuming module with a `setup` -> `process_iu`* ->
//! `shutdown` lifecycle. Each accepted unit becomes one line: fields joined
//! by a separator (tab by default) and terminated by a newline. Fields are
//! not escaped, so a separator inside a text or concept value shifts the
//! columns of that line.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{RecorderError, RecorderResult};
use crate::units::{IncrementalUnit, IuKind};

pub mod dialogue_act;
pub mod render;
pub mod text;

pub use dialogue_act::{DialogueActFormat, DialogueActRecorder};
pub use text::{TextFormat, TextRecorder};

/// Default field separator
pub const DEFAULT_SEPARATOR: &str = "\t";

/// A module that consumes incremental units delivered by a pipeline runtime
pub trait ConsumingModule {
    /// Display name of the module
    fn name(&self) -> &'static str;

    /// Human readable description
    fn description(&self) -> &'static str;

    /// Unit kinds this module accepts
    fn input_ius(&self) -> &'static [IuKind];

    fn accepts(&self, kind: IuKind) -> bool {
        self.input_ius().contains(&kind)
    }

    /// Acquire resources before units are delivered
    fn setup(&mut self) -> RecorderResult<()>;

    /// Consume a single unit
    fn process_iu(&mut self, unit: &IncrementalUnit) -> RecorderResult<()>;

    /// Release resources. Safe to call repeatedly.
    fn shutdown(&mut self);
}

/// Line layout for one family of units
pub trait RecordFormat {
    const NAME: &'static str;
    const DESCRIPTION: &'static str;
    const INPUT_IUS: &'static [IuKind];

    /// Render the fields of one record, in column order
    fn fields(unit: &IncrementalUnit) -> RecorderResult<Vec<String>>;
}

/// Construction parameters of a recorder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// File the records are written to
    pub path: PathBuf,
    /// Token placed between fields
    #[serde(default = "default_separator")]
    pub separator: String,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

impl RecorderConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            separator: default_separator(),
        }
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn validate(&self) -> RecorderResult<()> {
        if self.separator.contains('\n') {
            return Err(RecorderError::InvalidSeparator {
                separator: self.separator.clone(),
            });
        }
        Ok(())
    }
}

/// File-backed recorder for the unit family described by `F`
pub struct Recorder<F: RecordFormat> {
    config: RecorderConfig,
    writer: Option<BufWriter<File>>,
    records_written: u64,
    _format: PhantomData<F>,
}

impl<F: RecordFormat> Recorder<F> {
    /// Create a closed recorder. Nothing is touched on disk until `setup`.
    pub fn new(config: RecorderConfig) -> RecorderResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            writer: None,
            records_written: 0,
            _format: PhantomData,
        })
    }

    /// Recorder writing to `path` with the default separator
    pub fn at_path(path: impl Into<PathBuf>) -> RecorderResult<Self> {
        Self::new(RecorderConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn separator(&self) -> &str {
        &self.config.separator
    }

    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Records written since the last `setup`
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Render a unit as one newline-terminated line
    pub fn format_record(&self, unit: &IncrementalUnit) -> RecorderResult<String> {
        Ok(self.join_fields(&F::fields(unit)?))
    }

    fn join_fields(&self, fields: &[String]) -> String {
        let mut line = fields.join(&self.config.separator);
        line.push('\n');
        line
    }

    /// Push buffered records to the file
    pub fn flush(&mut self) -> RecorderResult<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush().map_err(|source| RecorderError::Write {
                path: self.config.path.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

impl<F: RecordFormat> ConsumingModule for Recorder<F> {
    fn name(&self) -> &'static str {
        F::NAME
    }

    fn description(&self) -> &'static str {
        F::DESCRIPTION
    }

    fn input_ius(&self) -> &'static [IuKind] {
        F::INPUT_IUS
    }

    fn setup(&mut self) -> RecorderResult<()> {
        if self.is_open() {
            self.shutdown();
        }

        let file = File::create(&self.config.path).map_err(|source| RecorderError::Open {
            path: self.config.path.clone(),
            source,
        })?;
        self.writer = Some(BufWriter::new(file));
        self.records_written = 0;

        info!(module = F::NAME, path = %self.config.path.display(), "recording started");
        Ok(())
    }

    fn process_iu(&mut self, unit: &IncrementalUnit) -> RecorderResult<()> {
        if !self.is_open() {
            debug!(module = F::NAME, kind = %unit.kind(), "recorder closed, unit ignored");
            return Ok(());
        }

        let fields = F::fields(unit)?;
        let line = self.join_fields(&fields);
        if let Some(writer) = self.writer.as_mut() {
            writer
                .write_all(line.as_bytes())
                .map_err(|source| RecorderError::Write {
                    path: self.config.path.clone(),
                    source,
                })?;
            self.records_written += 1;
            debug!(
                module = F::NAME,
                kind = %unit.kind(),
                fields = fields.len(),
                "record written"
            );
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        let Some(mut writer) = self.writer.take() else {
            return;
        };

        if let Err(e) = writer.flush() {
            warn!(
                module = F::NAME,
                path = %self.config.path.display(),
                "failed to flush recording: {}",
                e
            );
        }
        info!(
            module = F::NAME,
            path = %self.config.path.display(),
            records = self.records_written,
            "recording stopped"
        );
    }
}

impl<F: RecordFormat> Drop for Recorder<F> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<F: RecordFormat> std::fmt::Debug for Recorder<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recorder")
            .field("module", &F::NAME)
            .field("config", &self.config)
            .field("open", &self.is_open())
            .field("records_written", &self.records_written)
            .finish()
    }
}
