use crate::lexical::LexicalMetrics;
use crate::logging::Code;
use std::time::Duration;

/// A parsed tree together with what it took to produce it
#[derive(Debug, Clone)]
pub struct PipelineResult<N> {
    pub value: N,
    pub source_name: String,
    pub lexical_metrics: LexicalMetrics,
    pub token_count: usize,
    pub processing_duration: Duration,
}

impl<N> PipelineResult<N> {
    pub fn new(
        value: N,
        source_name: &str,
        lexical_metrics: LexicalMetrics,
        processing_duration: Duration,
    ) -> Self {
        Self {
            value,
            source_name: source_name.to_string(),
            token_count: lexical_metrics.significant_tokens(),
            lexical_metrics,
            processing_duration,
        }
    }

    pub fn into_value(self) -> N {
        self.value
    }

    pub fn log_success(&self, code: Code, entry: &str) {
        log_success!(code, "Value-reference parsing succeeded",
            "source" => &self.source_name,
            "entry" => entry,
            "tokens" => self.token_count,
            "duration_us" => self.processing_duration.as_micros()
        );
    }
}
