//! Output observer.
//!
//! Sensitive to the word and to both identification flags. The scheduler
//! calls [`Observer::observe`] at most once per simulated instant, after the
//! instant has settled, so each record reflects a consistent view of the
//! stage outputs.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::common::SimError;
use crate::common::time::SimTime;
use crate::core::signals::StageControl;
use crate::isa::disasm::disassemble;
use crate::isa::instruction::DecodeResult;

use super::signal::{ChangeSet, SignalId};
use super::wires::Wires;

/// Signals whose change triggers an observation.
pub const SENSITIVITY: ChangeSet = ChangeSet::of(&[
    SignalId::Instr,
    SignalId::BranchIdentified,
    SignalId::CondRegIdentified,
]);

/// One settled view of the stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Observation {
    /// Simulated time.
    pub time: SimTime,
    /// Word on the stage input.
    pub word: u32,
    /// Control lines.
    pub control: StageControl,
    /// Stage outputs folded back into a decode result.
    pub decode: DecodeResult,
    /// Stall toward the fetch arbiter.
    pub stall_fetch: bool,
}

/// Samples the stage and, when asked to, keeps the samples for export.
#[derive(Debug, Default)]
pub struct Observer {
    log: bool,
    keep: bool,
    records: Vec<Observation>,
}

impl Observer {
    /// Creates an observer. With `log` set each record is also logged at info
    /// level; with `keep` set records are retained for [`Observer::records`].
    pub const fn new(log: bool, keep: bool) -> Self {
        Self {
            log,
            keep,
            records: Vec::new(),
        }
    }

    /// Samples the wires.
    ///
    /// Returns `None` only if the output wires carry a combination the stage
    /// never drives; that is logged and not recorded.
    pub fn observe(&mut self, time: SimTime, wires: &Wires) -> Option<Observation> {
        let Some(decode) = wires.outputs.decode() else {
            warn!(%time, flags = ?wires.outputs.flags(), "inconsistent stage outputs");
            return None;
        };
        let record = Observation {
            time,
            word: wires.inputs.instr.read(),
            control: wires.inputs.control(),
            decode,
            stall_fetch: wires.outputs.stall_fetch_arb.read(),
        };
        if self.log {
            info!(
                "{time}: {:#010x} {:<24} branch={} form={} cond={} condreg={} op={} stall={}",
                record.word,
                disassemble(record.word),
                decode.branch_identified(),
                decode.branch_form(),
                decode.branch_condition(),
                decode.condreg_identified(),
                decode.condreg_op(),
                record.stall_fetch,
            );
        }
        if self.keep {
            self.records.push(record);
        }
        Some(record)
    }

    /// Everything retained so far, in time order. Empty unless the observer keeps records.
    pub fn records(&self) -> &[Observation] {
        &self.records
    }

    /// Writes the records as JSON lines.
    ///
    /// # Errors
    ///
    /// Any error of the underlying writer.
    pub fn write_json_lines<W: Write>(&self, mut out: W) -> io::Result<()> {
        for record in &self.records {
            serde_json::to_writer(&mut out, record)?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// Writes the records as JSON lines to a new file at `path`.
    ///
    /// Returns the number of records written.
    ///
    /// # Errors
    ///
    /// [`SimError::EventsWrite`] if the file cannot be created or written.
    pub fn export(&self, path: &Path) -> Result<usize, SimError> {
        File::create(path)
            .and_then(|file| self.write_json_lines(BufWriter::new(file)))
            .map_err(|source| SimError::EventsWrite {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(self.records.len())
    }
}
