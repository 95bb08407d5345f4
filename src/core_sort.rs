use crate::compare::{LineComparator, SortKey};
use crate::config::SortConfig;
use crate::error::{SortError, SortResult};
use crate::input::InputBuffer;
use std::io::{self, BufWriter, Write};

/// Result of a sortedness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Every adjacent pair is in the requested order
    Sorted,
    /// 1-based number of the first line that sorts before its predecessor
    Disorder { line: usize },
}

/// Core sort implementation: sort, deduplicate, or check a line stream
pub struct CoreSort {
    config: SortConfig,
}

impl CoreSort {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    /// Read the configured input and write the result to stdout
    pub fn sort(&self) -> SortResult<()> {
        let input = InputBuffer::open(self.config.input_file.as_deref())?;
        let stdout = io::stdout();
        let mut output = BufWriter::new(stdout.lock());
        self.run(&input, &mut output)?;
        output.flush()?;
        Ok(())
    }

    /// Process an already loaded input, writing sorted lines to `output`.
    ///
    /// In check mode nothing is written; a disorder comes back as
    /// [`SortError::NotSorted`].
    pub fn run<W: Write>(&self, input: &InputBuffer, output: &mut W) -> SortResult<()> {
        let mut lines = input.lines();
        log::debug!(
            "read {} lines ({} bytes), mode={}, field={}, reverse={}",
            lines.len(),
            input.as_bytes().len(),
            self.config.mode,
            self.config.field,
            self.config.reverse
        );

        if self.config.check {
            return match self.check_sorted(&lines) {
                CheckOutcome::Sorted => Ok(()),
                CheckOutcome::Disorder { line } => Err(SortError::not_sorted(line)),
            };
        }

        self.sort_lines(&mut lines);
        if self.config.unique {
            let before = lines.len();
            dedup_lines(&mut lines);
            log::debug!("unique: dropped {} adjacent duplicates", before - lines.len());
        }

        write_lines(output, &lines)?;
        Ok(())
    }

    /// Stable sort of `lines` under the configured comparator.
    ///
    /// Keys are extracted once per line up front, so each comparison only
    /// looks at precomputed fields.
    pub fn sort_lines<'a>(&self, lines: &mut Vec<&'a [u8]>) {
        if lines.len() < 2 {
            return;
        }

        let comparator = LineComparator::new(&self.config);
        let mut keyed: Vec<SortKey<'a>> =
            lines.iter().map(|&line| comparator.key(line)).collect();
        keyed.sort_by(|a, b| comparator.compare_keys(a, b));

        lines.clear();
        lines.extend(keyed.iter().map(|key| key.line));
    }

    /// Single pass over the original order, stopping at the first inversion
    pub fn check_sorted(&self, lines: &[&[u8]]) -> CheckOutcome {
        let comparator = LineComparator::new(&self.config);

        match lines
            .windows(2)
            .position(|pair| !comparator.in_order(pair[0], pair[1]))
        {
            Some(idx) => {
                // idx is the 0-based index of the first line of the pair
                let line = idx + 2;
                log::trace!("disorder at line {line} ({} mode)", self.config.mode);
                CheckOutcome::Disorder { line }
            }
            None => CheckOutcome::Sorted,
        }
    }
}

/// Collapse runs of identical adjacent lines, keeping the first of each run
pub fn dedup_lines(lines: &mut Vec<&[u8]>) {
    lines.dedup();
}

fn write_lines<W: Write>(output: &mut W, lines: &[&[u8]]) -> io::Result<()> {
    for line in lines {
        output.write_all(line)?;
        output.write_all(b"\n")?;
    }
    Ok(())
}
