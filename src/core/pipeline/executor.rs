//! Pipeline execution implementation.

use crate::core::decode::{self, ContainerFormat, DispatchConfig, ImageSource};
use crate::core::fingerprint::Fingerprint;
use crate::core::hasher::{BlockHasher, HashMethod, HashParameters};
use crate::core::scanner::{ScanConfig, WalkDirScanner};
use crate::error::BlockhashError;
use crate::events::{
    EventSender, HashEvent, HashProgress, PipelineEvent, PipelinePhase, PipelineSummary,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, warn};

/// Outcome for one source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashOutcome {
    /// Display form of the source (path or buffer name)
    pub source: String,
    /// Detected container, when dispatch got that far
    pub format: Option<ContainerFormat>,
    /// The fingerprint, on success
    pub fingerprint: Option<Fingerprint>,
    /// Why the source failed, otherwise
    pub error: Option<String>,
}

impl HashOutcome {
    pub fn is_ok(&self) -> bool {
        self.fingerprint.is_some()
    }
}

/// Result of pipeline execution
#[derive(Debug)]
pub struct PipelineResult {
    /// One entry per source, in input order
    pub entries: Vec<HashOutcome>,
    /// Paths that could not be scanned
    pub scan_errors: Vec<String>,
    /// Parameters every fingerprint was computed with
    pub params: HashParameters,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl PipelineResult {
    pub fn succeeded(&self) -> usize {
        self.entries.iter().filter(|e| e.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.len() - self.succeeded()
    }
}

/// Configuration for the pipeline
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Files or directories to scan for images
    pub paths: Vec<PathBuf>,
    /// Sources hashed as given, after the scanned paths
    pub sources: Vec<ImageSource>,
    /// Block grid and method
    pub params: HashParameters,
    /// Decode boundary settings
    pub dispatch: DispatchConfig,
    /// Scanner configuration
    pub scan_config: ScanConfig,
}

/// Builder for pipeline configuration
#[derive(Default)]
pub struct PipelineBuilder {
    config: PipelineConfig,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Files or directories to expand into image files
    pub fn paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.config.paths = paths;
        self
    }

    /// Sources to hash directly
    pub fn sources(mut self, sources: Vec<ImageSource>) -> Self {
        self.config.sources = sources;
        self
    }

    /// Set the block grid side length
    pub fn bits(mut self, bits: u32) -> Self {
        self.config.params.bits = bits;
        self
    }

    /// Set the block-value method
    pub fn method(mut self, method: HashMethod) -> Self {
        self.config.params.method = method;
        self
    }

    /// Set decode boundary settings
    pub fn dispatch(mut self, dispatch: DispatchConfig) -> Self {
        self.config.dispatch = dispatch;
        self
    }

    /// Set scanner configuration
    pub fn scan_config(mut self, config: ScanConfig) -> Self {
        self.config.scan_config = config;
        self
    }

    /// Build the pipeline
    pub fn build(self) -> Pipeline {
        Pipeline {
            config: self.config,
        }
    }
}

/// Batch fingerprinting: scan, then hash every source in parallel
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::new()
    }

    /// Run the pipeline without events
    pub fn run(&self) -> Result<PipelineResult, BlockhashError> {
        self.run_with_events(&EventSender::disabled())
    }

    /// Run the pipeline with event reporting.
    ///
    /// Only invalid parameters fail the whole run; per-source failures are
    /// recorded in the matching [`HashOutcome`].
    pub fn run_with_events(&self, events: &EventSender) -> Result<PipelineResult, BlockhashError> {
        let start_time = Instant::now();
        let hasher = BlockHasher::new(self.config.params)?;

        events.pipeline(PipelineEvent::Started);

        // Phase 1: Scanning
        let mut sources = Vec::new();
        let mut scan_errors = Vec::new();
        if !self.config.paths.is_empty() {
            events.pipeline(PipelineEvent::PhaseChanged {
                phase: PipelinePhase::Scanning,
            });

            let scanner = WalkDirScanner::new(self.config.scan_config.clone());
            let scanned = scanner.scan(&self.config.paths, events);
            scan_errors.extend(scanned.errors.iter().map(|e| e.to_string()));
            sources.extend(scanned.files.into_iter().map(ImageSource::Path));
        }
        sources.extend(self.config.sources.iter().cloned());

        // Phase 2: Hashing
        events.pipeline(PipelineEvent::PhaseChanged {
            phase: PipelinePhase::Hashing,
        });
        events.hash(HashEvent::Started {
            total: sources.len(),
        });

        let total = sources.len();
        let completed = AtomicUsize::new(0);

        let entries: Vec<HashOutcome> = sources
            .par_iter()
            .map(|source| {
                let outcome = self.hash_one(&hasher, source);
                let current = outcome.source.clone();

                match (&outcome.fingerprint, &outcome.error) {
                    (Some(fingerprint), _) => events.hash(HashEvent::Hashed {
                        source: current.clone(),
                        hex: fingerprint.to_hex(),
                    }),
                    (None, message) => events.hash(HashEvent::Error {
                        source: current.clone(),
                        message: message.clone().unwrap_or_default(),
                    }),
                }

                events.hash(HashEvent::Progress(HashProgress {
                    completed: completed.fetch_add(1, Ordering::SeqCst) + 1,
                    total,
                    current,
                }));

                outcome
            })
            .collect();

        let result = PipelineResult {
            entries,
            scan_errors,
            params: self.config.params,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        events.hash(HashEvent::Completed {
            succeeded: result.succeeded(),
            failed: result.failed(),
        });
        events.pipeline(PipelineEvent::Completed {
            summary: PipelineSummary {
                total,
                succeeded: result.succeeded(),
                failed: result.failed(),
                duration_ms: result.duration_ms,
            },
        });

        Ok(result)
    }

    fn hash_one(&self, hasher: &BlockHasher, source: &ImageSource) -> HashOutcome {
        let name = source.to_string();

        let decoded = match decode::load(source, &self.config.dispatch) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!(source = %name, error = %e, "failed to decode image");
                return HashOutcome {
                    source: name,
                    format: None,
                    fingerprint: None,
                    error: Some(e.to_string()),
                };
            }
        };

        match hasher.hash(&decoded.grid) {
            Ok(fingerprint) => {
                debug!(source = %name, hex = %fingerprint, "hashed image");
                HashOutcome {
                    source: name,
                    format: Some(decoded.format),
                    fingerprint: Some(fingerprint),
                    error: None,
                }
            }
            Err(e) => {
                warn!(source = %name, error = %e, "failed to hash image");
                HashOutcome {
                    source: name,
                    format: Some(decoded.format),
                    fingerprint: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
