//! Batch conversion surface and builder

use std::sync::Arc;
use std::time::Instant;

use pinmerge_core::{
    reconcile, Aligner, ContextAwareRomanizer, ContextFreeRomanizer, LineAlignment,
    NormalizationRules, PinmergeConfig, ReconciledLine, ReconciliationPolicy, WordSegmenter,
};
use serde::Serialize;

use crate::{
    config::EngineConfig,
    error::{EngineError, Result},
    executor::{auto_select, ExecutionMode, Executor, SequentialExecutor},
    phrase::PhraseRomanizer,
    romanizer::PinyinRomanizer,
    segmenter::JiebaSegmenter,
};

#[cfg(feature = "parallel")]
use crate::executor::ParallelExecutor;

/// Final tokens of one line and how they were chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineReport {
    /// Final token sequence
    pub tokens: Vec<String>,
    /// Chinese characters met during the walk
    pub consumed: usize,
    /// Filtered sentence stream length
    pub expected: usize,
    /// Whether this line's streams lined up
    pub aligned: bool,
    /// Whether the context-free sequence was returned
    pub fell_back: bool,
}

impl From<ReconciledLine> for LineReport {
    fn from(line: ReconciledLine) -> Self {
        Self {
            tokens: line.tokens,
            consumed: line.consumed,
            expected: line.expected,
            aligned: line.aligned,
            fell_back: line.fell_back,
        }
    }
}

/// Conversion metadata
#[derive(Debug, Clone, Serialize)]
pub struct ConversionMetadata {
    /// Execution mode that was actually used
    pub execution_mode: ExecutionMode,
    /// Reconciliation policy applied
    pub policy: ReconciliationPolicy,
    /// Lines in the batch
    pub lines_processed: usize,
    /// Lines whose streams did not line up
    pub mismatched_lines: usize,
    /// Lines that returned context-free readings
    pub fallback_lines: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: f64,
}

/// Output of one batch, in input order
#[derive(Debug, Clone, Serialize)]
pub struct BatchOutput {
    /// One report per input line
    pub lines: Vec<LineReport>,
    /// Batch metadata
    pub metadata: ConversionMetadata,
}

impl BatchOutput {
    /// Token sequences only
    pub fn into_tokens(self) -> Vec<Vec<String>> {
        self.lines.into_iter().map(|line| line.tokens).collect()
    }
}

/// Converts batches of mixed-script lines into aligned pinyin token sequences
///
/// Holds its collaborators behind `Arc` handles; cloning the converter
/// shares them.
#[derive(Clone)]
pub struct PinyinConverter {
    segmenter: Arc<dyn WordSegmenter>,
    context_free: Arc<dyn ContextFreeRomanizer>,
    context_aware: Arc<dyn ContextAwareRomanizer>,
    rules: NormalizationRules,
    engine: EngineConfig,
    debug: bool,
}

impl PinyinConverter {
    /// Create a converter with the default collaborators and configuration
    pub fn new() -> Result<Self> {
        PinyinConverterBuilder::new().build()
    }

    /// Start building a converter
    pub fn builder() -> PinyinConverterBuilder {
        PinyinConverterBuilder::new()
    }

    /// Engine configuration in use
    pub fn engine_config(&self) -> &EngineConfig {
        &self.engine
    }

    /// Convert a batch of lines.
    ///
    /// `handle_heteronyms` enables whole-segment romanization of pure
    /// East-Asian segments; otherwise every segment is walked character by
    /// character.
    pub fn convert<S>(&self, lines: &[S], handle_heteronyms: bool) -> Result<BatchOutput>
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let mode = self.select_mode(lines.len());

        let alignments = self.align(lines, handle_heteronyms, mode)?;
        let mismatched_lines = alignments.iter().filter(|l| !l.is_aligned()).count();

        let reports: Vec<LineReport> = reconcile(alignments, self.engine.policy)
            .into_iter()
            .map(LineReport::from)
            .collect();
        let fallback_lines = reports.iter().filter(|l| l.fell_back).count();

        let metadata = ConversionMetadata {
            execution_mode: mode,
            policy: self.engine.policy,
            lines_processed: lines.len(),
            mismatched_lines,
            fallback_lines,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        log::info!(
            "converted {} lines ({} mismatched, {} fell back) in {:.2}ms using {:?}",
            metadata.lines_processed,
            metadata.mismatched_lines,
            metadata.fallback_lines,
            metadata.processing_time_ms,
            mode
        );

        Ok(BatchOutput {
            lines: reports,
            metadata,
        })
    }

    /// Convert a batch and return the token sequences only
    pub fn convert_tokens<S>(&self, lines: &[S], handle_heteronyms: bool) -> Result<Vec<Vec<String>>>
    where
        S: AsRef<str> + Sync,
    {
        Ok(self.convert(lines, handle_heteronyms)?.into_tokens())
    }

    /// Align a single line without reconciliation
    pub fn align_line(&self, line: &str, handle_heteronyms: bool) -> Result<LineAlignment> {
        Ok(self.aligner().align_line(line, handle_heteronyms)?)
    }

    fn aligner(&self) -> Aligner<'_> {
        Aligner::new(
            self.segmenter.as_ref(),
            self.context_free.as_ref(),
            self.context_aware.as_ref(),
            &self.rules,
        )
        .with_debug(self.debug)
    }

    fn select_mode(&self, line_count: usize) -> ExecutionMode {
        match self.engine.execution_mode {
            ExecutionMode::Adaptive => auto_select(line_count, self.engine.parallel_threshold),
            mode => mode,
        }
    }

    fn align<S>(
        &self,
        lines: &[S],
        polyphone: bool,
        mode: ExecutionMode,
    ) -> Result<Vec<LineAlignment>>
    where
        S: AsRef<str> + Sync,
    {
        let aligner = self.aligner();
        match mode {
            #[cfg(feature = "parallel")]
            ExecutionMode::Parallel => {
                ParallelExecutor::new(self.engine.threads).align_lines(&aligner, lines, polyphone)
            }
            _ => SequentialExecutor.align_lines(&aligner, lines, polyphone),
        }
    }
}

/// Builder for [`PinyinConverter`]
#[derive(Default)]
pub struct PinyinConverterBuilder {
    segmenter: Option<Arc<dyn WordSegmenter>>,
    context_free: Option<Arc<dyn ContextFreeRomanizer>>,
    context_aware: Option<Arc<dyn ContextAwareRomanizer>>,
    config: Option<PinmergeConfig>,
    engine: EngineConfig,
    policy: Option<ReconciliationPolicy>,
    debug: bool,
}

impl PinyinConverterBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific word segmenter
    pub fn segmenter(mut self, segmenter: Arc<dyn WordSegmenter>) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Use a specific context-free romanizer
    pub fn context_free(mut self, romanizer: Arc<dyn ContextFreeRomanizer>) -> Self {
        self.context_free = Some(romanizer);
        self
    }

    /// Use a pre-built context-aware romanizer
    pub fn context_aware(mut self, romanizer: Arc<dyn ContextAwareRomanizer>) -> Self {
        self.context_aware = Some(romanizer);
        self
    }

    /// Normalization tables and the default policy come from `config`
    pub fn config(mut self, config: PinmergeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the engine configuration
    pub fn engine_config(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// Set the reconciliation policy, overriding the configuration
    pub fn policy(mut self, policy: ReconciliationPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Set the execution mode
    pub fn execution_mode(mut self, mode: ExecutionMode) -> Self {
        self.engine.execution_mode = mode;
        self
    }

    /// Set the thread count
    pub fn threads(mut self, count: Option<usize>) -> Self {
        self.engine.threads = count;
        self
    }

    /// Set the adaptive threshold in lines
    pub fn parallel_threshold(mut self, lines: usize) -> Self {
        self.engine.parallel_threshold = lines;
        self
    }

    /// Log every alignment step at debug level
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Build the converter
    pub fn build(self) -> Result<PinyinConverter> {
        let config = match self.config {
            Some(config) => {
                config.validate()?;
                config
            }
            None => pinmerge_core::default_config().clone(),
        };

        let mut engine = self.engine;
        engine.policy = self.policy.unwrap_or(config.alignment.policy);
        engine.validate().map_err(EngineError::Config)?;

        let context_aware = match self.context_aware {
            Some(romanizer) => romanizer,
            None => Arc::new(PhraseRomanizer::builtin()?),
        };

        Ok(PinyinConverter {
            segmenter: self
                .segmenter
                .unwrap_or_else(|| Arc::new(JiebaSegmenter::new())),
            context_free: self
                .context_free
                .unwrap_or_else(|| Arc::new(PinyinRomanizer::new())),
            context_aware,
            rules: config.rules(),
            engine,
            debug: self.debug,
        })
    }
}
