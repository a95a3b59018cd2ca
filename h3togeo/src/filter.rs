//! The stdin to stdout filter loop.

use crate::{
    cell::{self, Coordinate},
    error::{DecodeError, H3ToGeoError},
    options::Cli,
    sink::PointSink,
    text::{BoundedText, BUFF_SIZE},
};
use h3o::CellIndex;
use log::{debug, warn};
use std::{
    fmt::Display,
    io::{self, BufRead, ErrorKind, Read, Write},
};

/// Most bytes kept from one input line. Enough for a full
/// [`BoundedText`] of 4-byte characters.
const LINE_BYTES: usize = BUFF_SIZE * 4;

/// Points handled by one run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    /// Cells written to the output.
    pub emitted: usize,

    /// Inputs which did not decode to a valid cell.
    pub skipped: usize,
}

impl Tally {
    /// Emits `decoded` to `sink`, or logs why `source` was skipped.
    fn record<S>(
        &mut self,
        decoded: Result<CellIndex, DecodeError>,
        source: impl Display,
        sink: &mut S,
    ) -> Result<(), H3ToGeoError>
    where
        S: PointSink + ?Sized,
    {
        match decoded {
            Ok(cell) => {
                sink.point(cell, Coordinate::from(cell))?;
                self.emitted += 1;
            }
            Err(err) => {
                warn!("skipping {source}: {err}");
                self.skipped += 1;
            }
        }
        Ok(())
    }
}

impl Cli {
    /// Converts `--index`, or else every line of `input`, writing
    /// centers to `output`.
    ///
    /// A KML footer is written even when reading `input` fails.
    pub fn run<R, W>(&self, input: R, output: W) -> Result<Tally, H3ToGeoError>
    where
        R: BufRead,
        W: Write,
    {
        let mode = self.output_mode();
        debug!("output mode {mode:?}");
        let mut sink = mode.open(output)?;

        let outcome = match self.index {
            Some(raw) => {
                let mut tally = Tally::default();
                tally
                    .record(
                        cell::decode_raw(raw),
                        format_args!("index {raw:x}"),
                        sink.as_mut(),
                    )
                    .map(|()| tally)
            }
            None => stream(input, sink.as_mut()),
        };
        let closed = sink.finish();

        let tally = outcome?;
        closed?;
        debug!("emitted {} cells, skipped {}", tally.emitted, tally.skipped);
        Ok(tally)
    }
}

/// Decodes and emits each line of `input` until EOF.
fn stream<R, S>(mut input: R, sink: &mut S) -> Result<Tally, H3ToGeoError>
where
    R: BufRead,
    S: PointSink + ?Sized,
{
    let mut tally = Tally::default();
    let mut buf = Vec::with_capacity(LINE_BYTES);
    let mut line_no: usize = 0;
    loop {
        buf.clear();
        let read = read_line_bounded(&mut input, &mut buf);
        if read.map_err(H3ToGeoError::Read)? == 0 {
            return Ok(tally);
        }
        line_no += 1;
        let line = BoundedText::truncated(&String::from_utf8_lossy(&buf));
        tally.record(
            cell::decode(line.as_str()),
            format_args!("line {line_no}"),
            sink,
        )?;
    }
}

/// Reads one line into `buf`, keeping at most [`LINE_BYTES`] of it
/// and discarding the rest up to and including the newline.
///
/// Returns the number of bytes kept; 0 means EOF.
fn read_line_bounded<R: BufRead>(input: &mut R, buf: &mut Vec<u8>) -> io::Result<usize> {
    let kept = input
        .by_ref()
        .take(LINE_BYTES as u64)
        .read_until(b'\n', buf)?;
    if kept == LINE_BYTES && buf.last() != Some(&b'\n') {
        discard_line(input)?;
    }
    Ok(kept)
}

fn discard_line<R: BufRead>(input: &mut R) -> io::Result<()> {
    loop {
        let (found, used) = {
            let available = match input.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            };
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(idx) => (true, idx + 1),
                None => (false, available.len()),
            }
        };
        input.consume(used);
        if found {
            return Ok(());
        }
    }
}
