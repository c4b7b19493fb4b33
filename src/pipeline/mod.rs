//! Tagging pipeline
//!
//! Orchestrates one run:
//! 1. Read each document and classify its level from the filename
//! 2. Segment into sentences and tag every sentence
//! 3. Fold tagged sentences into the level aggregate
//! 4. Build the POS matrix / frequency reports and write all outputs
//!
//! Nothing is written until every document has been processed, so a run
//! aborted by a per-document error leaves the output directory untouched.

mod files;

pub use files::collect_documents;

use crate::aggregate::{Aggregator, LevelAggregate};
use crate::config::{FreqKind, OnError, RunConfig};
use crate::error::{PipelineError, PipelineResult};
use crate::freq::FreqReport;
use crate::matrix::PosMatrix;
use crate::models::{Document, DocumentTags, TaggedSentence};
use crate::nlp::{Segmenter, Tagger};
use crate::reporters::{self, matrix_file_name, OutputFormat};
use indicatif::ProgressBar;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name of the frequency report file for a distribution kind
pub fn freq_file_name(kind: FreqKind) -> String {
    format!("freq_dist_{}.json", kind)
}

/// One tagging run over a set of documents.
pub struct Pipeline<'a> {
    config: &'a RunConfig,
    segmenter: &'a dyn Segmenter,
    tagger: &'a dyn Tagger,
    progress: Option<ProgressBar>,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a RunConfig, segmenter: &'a dyn Segmenter, tagger: &'a dyn Tagger) -> Self {
        Self {
            config,
            segmenter,
            tagger,
            progress: None,
        }
    }

    /// Advance the given bar once per document.
    pub fn with_progress(mut self, bar: ProgressBar) -> Self {
        self.progress = Some(bar);
        self
    }

    /// Process `files` in order, then write every enabled output.
    pub fn run(&self, files: &[PathBuf]) -> PipelineResult<RunOutput> {
        let mut output = self.process(files)?;
        output.written = self.write_outputs(&output)?;
        Ok(output)
    }

    /// Tag and aggregate without touching the output directory.
    pub fn process(&self, files: &[PathBuf]) -> PipelineResult<RunOutput> {
        debug!(
            "Processing {} documents with the {} tagger",
            files.len(),
            self.tagger.name()
        );
        self.check_output_names(files)?;
        let mut aggregator = Aggregator::new(self.config.modes, self.config.unknown_level);
        let mut stats = RunStats::default();
        let mut documents = Vec::new();

        for path in files {
            let result = self.process_document(path, &mut aggregator);
            if let Some(bar) = &self.progress {
                bar.inc(1);
            }
            match result {
                Ok(processed) => {
                    stats.documents += 1;
                    stats.sentences += processed.sentences;
                    stats.tokens += processed.tokens;
                    if let Some(tags) = processed.tags {
                        documents.push((processed.output_name, tags));
                    }
                }
                Err(e) if e.is_per_document() && self.config.on_error == OnError::Skip => {
                    warn!("Skipping {}: {}", path.display(), e);
                    stats.skipped.push(path.clone());
                }
                Err(e) => return Err(e),
            }
        }

        let aggregate = aggregator.finish();
        let matrix = self
            .config
            .modes
            .pos_stats
            .then(|| PosMatrix::build(&aggregate));
        let freq = self.config.modes.freq_dist.map(|kind| {
            FreqReport::build(&aggregate, kind, self.config.freq_scope, self.config.top_n)
        });

        Ok(RunOutput {
            stats,
            documents,
            aggregate,
            matrix,
            freq,
            written: Vec::new(),
        })
    }

    /// Reject inputs whose per-document outputs would overwrite each other
    /// or one of the aggregate outputs.
    fn check_output_names(&self, files: &[PathBuf]) -> PipelineResult<()> {
        if !self.config.pos_tags {
            return Ok(());
        }
        let fixed: Vec<String> = self
            .aggregate_outputs()
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        let mut seen: FxHashMap<String, &Path> = FxHashMap::default();

        for path in files {
            let name = Document::output_file_name_for(path);
            if fixed.contains(&name) {
                return Err(PipelineError::Config(format!(
                    "{} would overwrite the {} output; rename the document",
                    path.display(),
                    name
                )));
            }
            if let Some(first) = seen.insert(name.clone(), path) {
                return Err(PipelineError::Config(format!(
                    "{} and {} would both be written to {}; rename one of them",
                    first.display(),
                    path.display(),
                    name
                )));
            }
        }
        Ok(())
    }

    /// Aggregate outputs enabled by the run config, in write order
    fn aggregate_outputs(&self) -> Vec<(AggregateOutput, String)> {
        let mut outputs = Vec::new();
        if self.config.modes.pos_stats {
            outputs.push((
                AggregateOutput::Matrix(OutputFormat::Matrix),
                matrix_file_name(OutputFormat::Matrix),
            ));
            if self.config.emit_matrix_json {
                outputs.push((
                    AggregateOutput::Matrix(OutputFormat::Json),
                    matrix_file_name(OutputFormat::Json),
                ));
            }
        }
        if let Some(kind) = self.config.modes.freq_dist {
            outputs.push((AggregateOutput::Freq, freq_file_name(kind)));
        }
        outputs
    }

    fn process_document(
        &self,
        path: &Path,
        aggregator: &mut Aggregator,
    ) -> PipelineResult<ProcessedDocument> {
        debug!("Getting text from {}", path.display());
        let text = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        let document = Document::new(path, text);

        // Resolve the bucket before tagging so a rejected document records nothing
        if aggregator.modes().any() {
            aggregator.key_for(document.level, &document.stem)?;
        }

        let sentences = self.tag_document(&document)?;
        for sentence in &sentences {
            aggregator.record(document.level, &document.stem, sentence)?;
        }

        let tags = self.config.pos_tags.then(|| {
            let mut tags = DocumentTags::new();
            for sentence in &sentences {
                tags.insert(sentence.text.clone(), sentence.to_record());
            }
            tags
        });

        debug!(
            "{}: level {}, {} sentences",
            document.stem,
            document.level.map(|l| l.as_str()).unwrap_or("none"),
            sentences.len()
        );
        Ok(ProcessedDocument {
            output_name: document.output_file_name(),
            sentences: sentences.len(),
            tokens: sentences.iter().map(|s| s.word_count).sum(),
            tags,
        })
    }

    fn tag_document(&self, document: &Document) -> PipelineResult<Vec<TaggedSentence>> {
        self.segmenter
            .segment(&document.text)
            .iter()
            .map(|sentence| self.tagger.tag(sentence))
            .collect()
    }

    fn write_outputs(&self, output: &RunOutput) -> PipelineResult<Vec<PathBuf>> {
        let dir_out = &self.config.dir_out;
        fs::create_dir_all(dir_out).map_err(|e| PipelineError::io(dir_out, e))?;
        let mut written = Vec::new();

        for (name, tags) in &output.documents {
            let path = dir_out.join(name);
            reporters::write_json(tags, &path)?;
            written.push(path);
        }

        for (kind, name) in self.aggregate_outputs() {
            let path = dir_out.join(name);
            match (kind, &output.matrix, &output.freq) {
                (AggregateOutput::Matrix(format), Some(matrix), _) => {
                    reporters::write(matrix, &path, format)?
                }
                (AggregateOutput::Freq, _, Some(report)) => reporters::write_json(report, &path)?,
                _ => continue,
            }
            written.push(path);
        }

        info!("Wrote {} files to {}", written.len(), dir_out.display());
        Ok(written)
    }
}

#[derive(Debug, Clone, Copy)]
enum AggregateOutput {
    Matrix(OutputFormat),
    Freq,
}

struct ProcessedDocument {
    output_name: String,
    sentences: usize,
    tokens: usize,
    tags: Option<DocumentTags>,
}

/// Counters for one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunStats {
    /// Documents fully processed
    pub documents: usize,
    pub sentences: usize,
    pub tokens: usize,
    /// Documents left out under `on_error = skip`
    pub skipped: Vec<PathBuf>,
}

impl RunStats {
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("{} documents", self.documents),
            format!("{} sentences", self.sentences),
            format!("{} tokens", self.tokens),
        ];
        if !self.skipped.is_empty() {
            parts.push(format!("{} skipped", self.skipped.len()));
        }
        parts.join(", ")
    }
}

/// Everything a run produced
#[derive(Debug)]
pub struct RunOutput {
    pub stats: RunStats,
    /// Per-document output file name and tagged sentences
    pub documents: Vec<(String, DocumentTags)>,
    pub aggregate: LevelAggregate,
    pub matrix: Option<PosMatrix>,
    pub freq: Option<FreqReport>,
    /// Files written by `run`, in write order
    pub written: Vec<PathBuf>,
}
