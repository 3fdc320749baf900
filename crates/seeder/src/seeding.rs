//! Interactive seeding session.
//!
//! ```text
//! AwaitingBatchSize --N--> Seeding(N) --> AwaitingRepeat --y--> AwaitingBatchSize
//!        |                                      |
//!        +--EOF--> Terminal <----anything else--+
//! ```
//!
//! A batch never aborts on a single failed write; each record's outcome is
//! reported on the console and in the log, then tallied in a
//! [`BatchSummary`].

use lostfound_core::synthesizer::RecordSource;
use lostfound_core::types::RecordId;
use lostfound_db::{StoreHandle, StoreSettings};

use crate::console::Console;

pub const BATCH_SIZE_PROMPT: &str = "How many lost items records should be created?";
pub const INVALID_BATCH_SIZE: &str = "Invalid number. Please enter a positive integer.";
pub const REPEAT_PROMPT: &str = "Add more records? [y/N]";
pub const MISSING_PLACE: &str = "Error: CreateUserPlace is not set.";

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedState {
    AwaitingBatchSize,
    Seeding(u32),
    AwaitingRepeat,
    Terminal,
}

/// Parse an operator-entered batch size. Only positive integers qualify.
pub fn parse_batch_size(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|n| *n > 0)
}

/// `y` or `Y`, surrounding whitespace ignored.
pub fn wants_repeat(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("y")
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

/// One record that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    /// Zero-based position within the batch.
    pub index: u32,
    pub record_id: RecordId,
    pub kind: &'static str,
    pub message: String,
}

/// Outcome of one seeding batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub requested: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub written_ids: Vec<RecordId>,
    pub failures: Vec<RecordFailure>,
}

impl BatchSummary {
    fn new(requested: u32) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    fn record_failure(&mut self, failure: RecordFailure) {
        self.failed += 1;
        self.failures.push(failure);
    }
}

/// Everything a session produced, batch by batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    pub batches: Vec<BatchSummary>,
}

impl SessionReport {
    pub fn total_succeeded(&self) -> u32 {
        self.batches.iter().map(|b| b.succeeded).sum()
    }

    pub fn total_failed(&self) -> u32 {
        self.batches.iter().map(|b| b.failed).sum()
    }
}

// ---------------------------------------------------------------------------
// Banner
// ---------------------------------------------------------------------------

/// Intro banner followed by an Enter-to-continue pause.
///
/// Returns `false` if input ended before the operator confirmed.
pub fn greet<C: Console>(console: &mut C, settings: &StoreSettings) -> Result<bool, SeedError> {
    console.write_line(&format!(
        "This code will generate sample lost items in the {} in the {} container with a partition key of {}.",
        settings.database, settings.container, settings.partition_key_path
    ))?;
    console.write_line("Press Enter to continue.")?;
    Ok(console.read_line()?.is_some())
}

/// Closing message followed by an Enter-to-exit pause.
pub fn farewell<C: Console>(console: &mut C, settings: &StoreSettings) -> Result<(), SeedError> {
    console.write_line(&format!("Check {} for new LostItems", settings.container))?;
    console.write_line("Press Enter to exit.")?;
    console.read_line()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Loop
// ---------------------------------------------------------------------------

/// Drives batches of generated records into a provisioned container.
pub struct SeedingLoop<S> {
    source: S,
    handle: StoreHandle,
}

impl<S: RecordSource> SeedingLoop<S> {
    pub fn new(source: S, handle: StoreHandle) -> Self {
        Self { source, handle }
    }

    /// Run until the operator declines another batch or input ends.
    pub async fn run<C: Console>(&mut self, console: &mut C) -> Result<SessionReport, SeedError> {
        let mut report = SessionReport::default();
        let mut state = SeedState::AwaitingBatchSize;

        loop {
            state = match state {
                SeedState::AwaitingBatchSize => {
                    console.write_line(BATCH_SIZE_PROMPT)?;
                    match console.read_line()? {
                        None => SeedState::Terminal,
                        Some(line) => match parse_batch_size(&line) {
                            Some(n) => SeedState::Seeding(n),
                            None => {
                                tracing::debug!(input = %line, "Rejected batch size");
                                console.write_line(INVALID_BATCH_SIZE)?;
                                SeedState::AwaitingBatchSize
                            }
                        },
                    }
                }
                SeedState::Seeding(n) => {
                    let summary = self.seed_batch(n, console).await?;
                    report.batches.push(summary);
                    SeedState::AwaitingRepeat
                }
                SeedState::AwaitingRepeat => {
                    console.write_line(REPEAT_PROMPT)?;
                    match console.read_line()? {
                        Some(line) if wants_repeat(&line) => SeedState::AwaitingBatchSize,
                        _ => SeedState::Terminal,
                    }
                }
                SeedState::Terminal => break,
            };
        }

        Ok(report)
    }

    async fn seed_batch<C: Console>(
        &mut self,
        requested: u32,
        console: &mut C,
    ) -> Result<BatchSummary, SeedError> {
        tracing::info!(requested, "Seeding batch started");
        let mut summary = BatchSummary::new(requested);

        for index in 0..requested {
            let record = self.source.next_record();

            if record.create_user_place.is_empty() {
                tracing::error!(
                    record_id = %record.id,
                    index,
                    "Generated record has no createUserPlace"
                );
                console.write_line(MISSING_PLACE)?;
                summary.record_failure(RecordFailure {
                    index,
                    record_id: record.id,
                    kind: "missing_partition_key",
                    message: "createUserPlace is empty".to_string(),
                });
                continue;
            }

            match self.handle.write_record(&record).await {
                Ok(receipt) => {
                    tracing::info!(
                        record_id = %receipt.id,
                        partition = %receipt.partition_key,
                        "LostItem created"
                    );
                    console.write_line(&format!(
                        "LostItem created successfully with ID: {}",
                        receipt.id
                    ))?;
                    summary.succeeded += 1;
                    summary.written_ids.push(receipt.id);
                }
                Err(e) => {
                    tracing::warn!(
                        record_id = %record.id,
                        partition = %record.create_user_place,
                        kind = e.kind(),
                        error = %e,
                        "LostItem write failed"
                    );
                    console.write_line(&format!(
                        "Error creating LostItem {}: {} - {}",
                        record.id,
                        e.kind(),
                        e
                    ))?;
                    summary.record_failure(RecordFailure {
                        index,
                        record_id: record.id,
                        kind: e.kind(),
                        message: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            requested,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Seeding batch finished"
        );
        console.write_line(&format!(
            "Batch complete: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        ))?;
        Ok(summary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
