//! Span loader for reading activity spans from disk or stdin
//!
//! The loader accepts the body of the heartbeat spans endpoint as saved or
//! piped by the caller: either the `{"spans": [...]}` envelope or a bare
//! JSON array of spans.
//!
//! # Examples
//!
//! ```no_run
//! use hackastats::span_loader::SpanLoader;
//!
//! # async fn example() -> hackastats::Result<()> {
//! let loader = SpanLoader::from_path("spans.json");
//! let spans = loader.load().await?;
//! println!("Loaded {} spans", spans.len());
//! # Ok(())
//! # }
//! ```

use hackastats_core::error::{HackastatsError, Result};
use hackastats_core::types::{Span, SpansResponse};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::debug;

/// Where a span document is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpanSource {
    File(PathBuf),
    Stdin,
}

/// Reads and decodes span documents
#[derive(Debug, Clone)]
pub struct SpanLoader {
    source: SpanSource,
}

impl SpanLoader {
    pub fn new(source: SpanSource) -> Self {
        Self { source }
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self::new(SpanSource::File(path.into()))
    }

    pub fn stdin() -> Self {
        Self::new(SpanSource::Stdin)
    }

    /// Pick the source from an optional CLI path; `-` or no path means stdin
    pub fn from_arg(input: Option<&Path>) -> Self {
        match input {
            Some(path) if path != Path::new("-") => Self::from_path(path),
            _ => Self::stdin(),
        }
    }

    pub fn source(&self) -> &SpanSource {
        &self.source
    }

    /// Read the whole document and decode its spans
    pub async fn load(&self) -> Result<Vec<Span>> {
        match &self.source {
            SpanSource::File(path) => {
                debug!("Reading spans from {}", path.display());
                let content = tokio::fs::read_to_string(path).await?;
                Self::parse_str(&content)
            }
            SpanSource::Stdin => {
                debug!("Reading spans from stdin");
                Self::from_reader(tokio::io::stdin()).await
            }
        }
    }

    /// Decode spans from any async reader
    pub async fn from_reader<R>(mut reader: R) -> Result<Vec<Span>>
    where
        R: AsyncRead + Unpin,
    {
        let mut content = String::new();
        reader.read_to_string(&mut content).await?;
        Self::parse_str(&content)
    }

    /// Decode a span document from a string
    pub fn parse_str(content: &str) -> Result<Vec<Span>> {
        let document: Value = serde_json::from_str(content)?;

        let spans = match document {
            Value::Array(_) => serde_json::from_value::<Vec<Span>>(document)?,
            Value::Object(map) if map.contains_key("spans") => {
                serde_json::from_value::<SpansResponse>(Value::Object(map))?.spans
            }
            Value::Null => {
                return Err(HackastatsError::InvalidArgument(
                    "span document is null".to_string(),
                ));
            }
            _ => {
                return Err(HackastatsError::InvalidArgument(
                    "expected a JSON array of spans or an object with a \"spans\" field"
                        .to_string(),
                ));
            }
        };

        debug!("Decoded {} spans", spans.len());
        Ok(spans)
    }
}
