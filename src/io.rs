//! Reader/Writer traits and format dispatch for the host harness
//!
//! The layout engine itself never touches files. These readers turn graph
//! documents (JSON or YAML) into nodes and edges, and the writers emit
//! published snapshots for whatever renders them.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, LayoutConfig};
use crate::engine::LayoutSnapshot;
use crate::framing::CameraFraming;
use crate::graph::{Edge, Node, NodeId};
use crate::hints::RenderHint;

/// Errors that can occur during reading or writing
#[derive(Error, Debug)]
pub enum IoError {
    /// The file format is not supported
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The file extension could not be determined
    #[error("could not determine file format from path: {0}")]
    UnknownExtension(String),

    /// An I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A parsing error occurred
    #[error("parse error: {0}")]
    Parse(String),

    /// A serialization/writing error occurred
    #[error("write error: {0}")]
    Write(String),

    /// A config file parsed but holds unusable values
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
}

/// Result type for reader/writer operations
pub type IoResult<T> = Result<T, IoError>;

/// Nodes and edges as stored in a graph file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

/// A published snapshot plus the renderer-facing extras
#[derive(Debug, Clone, Serialize)]
pub struct SnapshotDocument<'a> {
    #[serde(flatten)]
    pub snapshot: &'a LayoutSnapshot,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framing: Option<CameraFraming>,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub hints: IndexMap<NodeId, RenderHint>,
}

impl<'a> SnapshotDocument<'a> {
    pub fn new(snapshot: &'a LayoutSnapshot) -> Self {
        Self {
            snapshot,
            framing: None,
            hints: IndexMap::new(),
        }
    }

    pub fn with_framing(mut self, framing: Option<CameraFraming>) -> Self {
        self.framing = framing;
        self
    }

    /// Attach render hints for every node that has a position
    pub fn with_hints(mut self, nodes: &[Node]) -> Self {
        self.hints = nodes
            .iter()
            .filter(|n| self.snapshot.contains(&n.id))
            .map(|n| (n.id.clone(), RenderHint::for_node(n)))
            .collect();
        self
    }
}

/// A reader parses an input file into a graph document
pub trait Reader {
    fn read(&self, input: &Path) -> IoResult<GraphDocument> {
        let text = fs::read_to_string(input)?;
        self.parse(&text)
    }

    fn parse(&self, text: &str) -> IoResult<GraphDocument>;

    /// File extensions this reader can handle (e.g., ["yaml", "yml"])
    fn supported_extensions(&self) -> &[&str];

    /// Check if this reader can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|e| e.eq_ignore_ascii_case(ext))
    }
}

/// A writer renders a snapshot document in a specific format
pub trait Writer {
    fn render(&self, doc: &SnapshotDocument<'_>) -> IoResult<String>;

    /// Identifier for this output format (e.g., "json", "yaml")
    fn format_id(&self) -> &str;

    /// Render and write to `output`
    fn write(&self, doc: &SnapshotDocument<'_>, output: &Path) -> IoResult<()> {
        let text = self.render(doc)?;
        fs::write(output, text)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct JsonReader;

impl Reader for JsonReader {
    fn parse(&self, text: &str) -> IoResult<GraphDocument> {
        serde_json::from_str(text).map_err(|e| IoError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}

#[derive(Debug, Default)]
pub struct YamlReader;

impl Reader for YamlReader {
    fn parse(&self, text: &str) -> IoResult<GraphDocument> {
        serde_yaml::from_str(text).map_err(|e| IoError::Parse(e.to_string()))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[derive(Debug, Default)]
pub struct JsonWriter;

impl Writer for JsonWriter {
    fn render(&self, doc: &SnapshotDocument<'_>) -> IoResult<String> {
        serde_json::to_string_pretty(doc).map_err(|e| IoError::Write(e.to_string()))
    }

    fn format_id(&self) -> &str {
        "json"
    }
}

#[derive(Debug, Default)]
pub struct YamlWriter;

impl Writer for YamlWriter {
    fn render(&self, doc: &SnapshotDocument<'_>) -> IoResult<String> {
        serde_yaml::to_string(doc).map_err(|e| IoError::Write(e.to_string()))
    }

    fn format_id(&self) -> &str {
        "yaml"
    }
}

/// Registry of available readers and writers
pub struct FormatRegistry {
    readers: Vec<Box<dyn Reader + Send + Sync>>,
    writers: Vec<Box<dyn Writer + Send + Sync>>,
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            readers: Vec::new(),
            writers: Vec::new(),
        }
    }

    /// Registry with the JSON and YAML readers and writers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_reader(Box::new(JsonReader));
        registry.register_reader(Box::new(YamlReader));
        registry.register_writer(Box::new(JsonWriter));
        registry.register_writer(Box::new(YamlWriter));
        registry
    }

    pub fn register_reader(&mut self, reader: Box<dyn Reader + Send + Sync>) {
        self.readers.push(reader);
    }

    pub fn register_writer(&mut self, writer: Box<dyn Writer + Send + Sync>) {
        self.writers.push(writer);
    }

    /// Find a reader for the given file extension
    pub fn reader_for_extension(&self, ext: &str) -> Option<&dyn Reader> {
        self.readers
            .iter()
            .find(|r| r.supports_extension(ext))
            .map(|r| r.as_ref() as &dyn Reader)
    }

    /// Find a writer by format ID
    pub fn writer_for_format(&self, format_id: &str) -> Option<&dyn Writer> {
        self.writers
            .iter()
            .find(|w| w.format_id().eq_ignore_ascii_case(format_id))
            .map(|w| w.as_ref() as &dyn Writer)
    }

    /// Get file extension from a path
    pub fn extension_from_path(path: &Path) -> Option<&str> {
        path.extension().and_then(|e| e.to_str())
    }

    /// Find a reader for the given path based on its extension
    pub fn reader_for_path(&self, path: &Path) -> IoResult<&dyn Reader> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;

        self.reader_for_extension(ext)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }

    /// Find a writer for the given output path based on its extension
    pub fn writer_for_path(&self, path: &Path) -> IoResult<&dyn Writer> {
        let ext = Self::extension_from_path(path)
            .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;
        let format = if ext.eq_ignore_ascii_case("yml") { "yaml" } else { ext };

        self.writer_for_format(format)
            .ok_or_else(|| IoError::UnsupportedFormat(ext.to_string()))
    }
}

/// Load a graph document, picking the reader from the file extension
pub fn read_graph(path: &Path) -> IoResult<GraphDocument> {
    FormatRegistry::with_defaults().reader_for_path(path)?.read(path)
}

/// Load a layout config from a YAML or JSON file and validate it
pub fn read_config(path: &Path) -> IoResult<LayoutConfig> {
    let ext = FormatRegistry::extension_from_path(path)
        .ok_or_else(|| IoError::UnknownExtension(path.display().to_string()))?;
    let text = fs::read_to_string(path)?;

    let config: LayoutConfig = match ext.to_ascii_lowercase().as_str() {
        "json" => parse_with(&text, |t| serde_json::from_str(t).map_err(|e| e.to_string()))?,
        "yaml" | "yml" => {
            parse_with(&text, |t| serde_yaml::from_str(t).map_err(|e| e.to_string()))?
        }
        other => return Err(IoError::UnsupportedFormat(other.to_string())),
    };
    config.validate()?;
    Ok(config)
}

fn parse_with<T: DeserializeOwned>(
    text: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> IoResult<T> {
    parse(text).map_err(IoError::Parse)
}
