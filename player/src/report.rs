//! Text output of a move choice.

use std::io::{self, Write};

use mcts::{ColumnStat, SearchEvent, SearchObserver, SearchResult};

/// Writes every search event as text.
///
/// The first write error stops further output and is returned by
/// [`EventPrinter::finish`].
pub struct EventPrinter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> EventPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    pub fn finish(self) -> io::Result<W> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }
}

impl<W: Write> SearchObserver for EventPrinter<W> {
    fn on_event(&mut self, event: &SearchEvent) {
        if self.error.is_none() {
            if let Err(e) = writeln!(self.out, "{event}") {
                self.error = Some(e);
            }
        }
    }
}

/// One summary line per column: `Column c: mean`, or `Null` when the column
/// was never searched or is full.
pub fn write_summary<W: Write>(out: &mut W, result: &SearchResult) -> io::Result<()> {
    for (index, stat) in result.stats.iter().enumerate() {
        let column = index + 1;
        match stat {
            ColumnStat::Visited { mean, .. } => writeln!(out, "Column {column}: {mean:.2}")?,
            ColumnStat::NotVisited | ColumnStat::NotApplicable => {
                writeln!(out, "Column {column}: Null")?
            }
        }
    }
    Ok(())
}

pub fn write_final_move<W: Write>(out: &mut W, column: usize) -> io::Result<()> {
    writeln!(out, "FINAL Move selected: {column}")
}
