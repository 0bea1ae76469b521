//! Value Change Dump waveform writer.
//!
//! Declares every [`SignalId`] under a single `top` scope with a 1 ps
//! timescale. The first sample dumps all values; later samples write only
//! the wires whose value changed since the previous sample.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::common::error::SimError;
use crate::common::time::SimTime;

use super::signal::{SignalId, TraceValue};
use super::wires::Wires;

/// First printable VCD identifier character.
const ID_BASE: u8 = b'!';

/// Streams a waveform to `W`.
pub struct VcdWriter<W: Write> {
    out: W,
    last: Vec<Option<TraceValue>>,
    last_time: Option<SimTime>,
}

impl<W: Write> fmt::Debug for VcdWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VcdWriter")
            .field("last_time", &self.last_time)
            .finish_non_exhaustive()
    }
}

impl VcdWriter<BufWriter<File>> {
    /// Creates the trace file at `path` and writes the header.
    ///
    /// # Errors
    ///
    /// [`SimError::TraceOpen`] if the file cannot be created or the header
    /// cannot be written.
    pub fn create(path: &Path) -> Result<Self, SimError> {
        let open_err = |source| SimError::TraceOpen {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(open_err)?;
        Self::new(BufWriter::new(file)).map_err(open_err)
    }
}

impl<W: Write> VcdWriter<W> {
    /// Wraps `out` and writes the header.
    ///
    /// # Errors
    ///
    /// Any error of the underlying writer.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "$version identify-core {} $end", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "$timescale 1 ps $end")?;
        writeln!(out, "$scope module top $end")?;
        for id in SignalId::ALL {
            writeln!(out, "$var wire {} {} {} $end", id.width(), code(id), id.name())?;
        }
        writeln!(out, "$upscope $end")?;
        writeln!(out, "$enddefinitions $end")?;
        Ok(Self {
            out,
            last: vec![None; SignalId::ALL.len()],
            last_time: None,
        })
    }

    /// Records the committed wire values at `time`.
    ///
    /// # Errors
    ///
    /// Any error of the underlying writer.
    pub fn sample(&mut self, time: SimTime, wires: &Wires) -> io::Result<()> {
        let initial = self.last_time.is_none();
        let mut stamped = self.last_time == Some(time);
        if initial {
            writeln!(self.out, "#{}", time.as_ps())?;
            writeln!(self.out, "$dumpvars")?;
            stamped = true;
        }
        for id in SignalId::ALL {
            let value = wires.value(id);
            let slot = &mut self.last[id.index()];
            if *slot == Some(value) {
                continue;
            }
            *slot = Some(value);
            if !stamped {
                writeln!(self.out, "#{}", time.as_ps())?;
                stamped = true;
            }
            match value {
                TraceValue::Bit(bit) => writeln!(self.out, "{}{}", u8::from(bit), code(id))?,
                TraceValue::Vector(v) => writeln!(self.out, "b{v:b} {}", code(id))?,
            }
        }
        if initial {
            writeln!(self.out, "$end")?;
        }
        if stamped {
            self.last_time = Some(time);
        }
        Ok(())
    }

    /// Flushes buffered output.
    ///
    /// # Errors
    ///
    /// Any error of the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flushes and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Any error of the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

/// VCD identifier code of a signal.
fn code(id: SignalId) -> char {
    char::from(ID_BASE + id.index() as u8)
}
