// thumbnailer/src/processors/batch.rs
use crate::core::memory::MemoryProbe;
use crate::core::processor::ImageTransformer;
use crate::core::report::RunReport;
use crate::core::{ItemResult, Result, RunOutcome, SourceItem, ThumbnailError};
use crate::storage::StorageSink;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

/// Runs every item through the transformer and into the sink, counting outcomes.
///
/// With `threads == 1` (the default) items are handled strictly in order on the
/// calling thread. `threads == 0` uses the global rayon pool and `threads > 1`
/// a dedicated pool of that size.
pub struct BatchProcessor {
    threads: usize,
    verbose: bool,
    show_progress: bool,
    thread_pool: Option<rayon::ThreadPool>,
}

impl BatchProcessor {
    pub fn new(threads: usize) -> Result<Self> {
        let mut processor = Self {
            threads,
            verbose: false,
            show_progress: true,
            thread_pool: None,
        };

        if threads > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    ThumbnailError::Validation(format!("Failed to create thread pool: {}", e))
                })?;
            processor.thread_pool = Some(pool);
        }

        Ok(processor)
    }

    pub fn sequential() -> Self {
        Self {
            threads: 1,
            verbose: false,
            show_progress: true,
            thread_pool: None,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Runs the batch, writing diagnostics and the final report to stdout.
    pub fn run(
        &self,
        items: Vec<SourceItem>,
        transformer: &dyn ImageTransformer,
        sink: &dyn StorageSink,
    ) -> RunOutcome {
        self.run_with_output(items, transformer, sink, std::io::stdout())
    }

    pub fn run_with_output<W: Write + Send>(
        &self,
        items: Vec<SourceItem>,
        transformer: &dyn ImageTransformer,
        sink: &dyn StorageSink,
        output: W,
    ) -> RunOutcome {
        let output = Mutex::new(output);
        let started = Instant::now();
        let total = items.len();

        if total == 0 {
            log::warn!("No images to process");
        } else {
            log::info!("Processing {} images into {} storage", total, sink.backend());
        }

        let pb = self.create_progress_bar(total);
        let mut memory = MemoryProbe::new();

        let mut outcome = if self.threads == 1 {
            self.run_sequential(&items, transformer, sink, &pb, &output, &mut memory)
        } else {
            self.run_parallel(&items, transformer, sink, &pb, &output, &mut memory)
        };

        pb.finish_and_clear();

        outcome.total = total;
        outcome.elapsed = started.elapsed();
        outcome.peak_memory = memory.peak();
        debug_assert!(outcome.is_consistent());

        let report = RunReport::new(&outcome).verbose(self.verbose).render();
        Self::emit(&output, &pb, &report);

        outcome
    }

    fn run_sequential<W: Write + Send>(
        &self,
        items: &[SourceItem],
        transformer: &dyn ImageTransformer,
        sink: &dyn StorageSink,
        pb: &ProgressBar,
        output: &Mutex<W>,
        memory: &mut MemoryProbe,
    ) -> RunOutcome {
        let mut outcome = RunOutcome::default();

        for item in items {
            pb.set_message(format!("processing {}", item.display_name));

            match Self::process_item(item, transformer, sink) {
                ItemResult::Succeeded => outcome.succeeded += 1,
                ItemResult::Failed(reason) => {
                    Self::report_failure(output, pb, item, &reason);
                    outcome.failed += 1;
                    outcome.failures.push((item.display_name.clone(), reason));
                }
            }

            memory.sample();
            pb.inc(1);
        }

        outcome
    }

    fn run_parallel<W: Write + Send>(
        &self,
        items: &[SourceItem],
        transformer: &dyn ImageTransformer,
        sink: &dyn StorageSink,
        pb: &ProgressBar,
        output: &Mutex<W>,
        memory: &mut MemoryProbe,
    ) -> RunOutcome {
        let succeeded = AtomicUsize::new(0);
        let failures = Mutex::new(Vec::new());
        let memory = Mutex::new(memory);

        let work = || {
            items
                .par_iter()
                .map(|item| {
                    pb.set_message(format!("processing {}", item.display_name));
                    (item, Self::process_item(item, transformer, sink))
                })
                .progress_with(pb.clone())
                .for_each(|(item, result)| {
                    if let Ok(mut probe) = memory.lock() {
                        probe.sample();
                    }

                    match result {
                        ItemResult::Succeeded => {
                            succeeded.fetch_add(1, Ordering::SeqCst);
                        }
                        ItemResult::Failed(reason) => {
                            Self::report_failure(output, pb, item, &reason);
                            failures
                                .lock()
                                .unwrap_or_else(|poisoned| poisoned.into_inner())
                                .push((item.display_name.clone(), reason));
                        }
                    }
                })
        };

        match &self.thread_pool {
            Some(pool) => pool.install(work),
            None => work(),
        }

        let failures = failures
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        RunOutcome {
            succeeded: succeeded.into_inner(),
            failed: failures.len(),
            failures,
            ..Default::default()
        }
    }

    /// Transform and write failures are both recorded against the item; neither stops the run.
    fn process_item(
        item: &SourceItem,
        transformer: &dyn ImageTransformer,
        sink: &dyn StorageSink,
    ) -> ItemResult {
        log::debug!("Processing {}", item.path.display());

        let bytes = match transformer.transform(item) {
            Ok(bytes) => bytes,
            Err(e) => return ItemResult::Failed(e.to_string()),
        };

        match sink.write(&item.display_name, &bytes) {
            Ok(()) => ItemResult::Succeeded,
            Err(e) => ItemResult::Failed(ThumbnailError::from(e).to_string()),
        }
    }

    fn report_failure<W: Write>(
        output: &Mutex<W>,
        pb: &ProgressBar,
        item: &SourceItem,
        reason: &str,
    ) {
        log::debug!("{} failed: {}", item.path.display(), reason);
        Self::emit(
            output,
            pb,
            &format!("Failed to process {}: {}", item.display_name, reason),
        );
    }

    fn emit<W: Write>(output: &Mutex<W>, pb: &ProgressBar, text: &str) {
        let mut output = output.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        pb.suspend(|| {
            if let Err(e) = writeln!(output, "{}", text).and_then(|_| output.flush()) {
                log::warn!("Cannot write run output: {}", e);
            }
        });
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

impl Default for BatchProcessor {
    fn default() -> Self {
        Self::sequential()
    }
}
