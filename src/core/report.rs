// thumbnailer/src/core/report.rs
use super::RunOutcome;
use crate::utils::bytes_to_megabytes;

pub const COMPLETION_LINE: &str = "Thumbnail generation complete.";

/// Terminal summary of a finished run.
pub struct RunReport<'a> {
    outcome: &'a RunOutcome,
    verbose: bool,
}

impl<'a> RunReport<'a> {
    pub fn new(outcome: &'a RunOutcome) -> Self {
        Self {
            outcome,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn summary_line(&self) -> String {
        format!("Success: {}, Fail: {}", self.outcome.succeeded, self.outcome.failed)
    }

    pub fn metrics_line(&self) -> String {
        format!(
            "Elapsed: {} ms, Peak memory: {:.2} MB",
            self.outcome.elapsed.as_millis(),
            bytes_to_megabytes(self.outcome.peak_memory)
        )
    }

    pub fn render(&self) -> String {
        let mut lines = vec![COMPLETION_LINE.to_string(), self.summary_line()];
        if self.verbose {
            lines.push(self.metrics_line());
        }
        lines.join("\n")
    }
}
