//! Header scanner.
//!
//! Walks the lines of a vendor device header, finds the `IRQn_Type` enumeration and collects
//! `Name_IRQn = <number>` enumerators into an [`IrqTable`].

use log::{debug, trace};
use std::fmt;

use crate::config::SuffixRule;
use crate::slot::{Slot, NVIC_VECTORS};
use crate::table::IrqTable;

/// Substring that marks the start of the interrupt enumeration.
pub const MARKER: &str = "_IRQn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for the first line containing [`MARKER`].
    Seeking,
    /// Inside the enumeration.
    Scanning,
    /// Closing brace seen; remaining lines are ignored.
    Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The number has no slot in the vector table.
    OutOfRange(i64),
    /// Stripping the suffix leaves no name.
    EmptyName,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            RejectReason::OutOfRange(n) => write!(f, "interrupt number {} out of range", n),
            RejectReason::EmptyName => f.write_str("empty handler name"),
        }
    }
}

/// An enumerator line the scanner recognised but could not store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// One-based line number in the header.
    pub line_number: usize,
    pub line: String,
    pub reason: RejectReason,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "line {}: {}: {}", self.line_number, self.reason, self.line.trim_end())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    pub table: IrqTable,
    pub rejected: Vec<Rejection>,
    /// False when the header never contained [`MARKER`].
    pub found_marker: bool,
}

/// Match `<identifier> = <signed integer>`, ignoring anything after the number.
///
/// The identifier is the first whitespace-delimited token of the line, so `A=1` does not
/// match while `A =1` and `A = -1,` do.
pub fn parse_enumerator(line: &str) -> Option<(&str, i64)> {
    let line = line.trim_start();
    let ident_end = line.find(char::is_whitespace)?;
    let (ident, rest) = line.split_at(ident_end);
    let rest = rest.trim_start().strip_prefix('=')?.trim_start();
    let digits_start = if rest.starts_with('-') || rest.starts_with('+') { 1 } else { 0 };
    let digits_len = rest[digits_start..]
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len() - digits_start);
    if digits_len == 0 {
        return None;
    }
    let number = rest[..digits_start + digits_len].parse().ok()?;
    Some((ident, number))
}

pub struct Scanner {
    state: ScanState,
    rule: SuffixRule,
    table: IrqTable,
    rejected: Vec<Rejection>,
    line_number: usize,
    found_marker: bool,
}

impl Scanner {
    pub fn new(rule: SuffixRule) -> Scanner {
        Scanner {
            state: ScanState::Seeking,
            rule,
            table: IrqTable::new(),
            rejected: Vec::new(),
            line_number: 0,
            found_marker: false,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Feed the next header line and return the state after it.
    pub fn feed(&mut self, line: &str) -> ScanState {
        self.line_number += 1;
        self.state = match self.state {
            ScanState::Seeking if line.contains(MARKER) => {
                debug!("interrupt enumeration starts at line {}", self.line_number);
                self.found_marker = true;
                self.scan_line(line)
            },
            ScanState::Seeking => ScanState::Seeking,
            ScanState::Scanning => self.scan_line(line),
            ScanState::Done => ScanState::Done,
        };
        self.state
    }

    fn scan_line(&mut self, line: &str) -> ScanState {
        match parse_enumerator(line) {
            Some((ident, irqn)) if irqn < i64::from(NVIC_VECTORS) => {
                self.store(line, ident, irqn);
                ScanState::Scanning
            },
            _ if line.contains('}') => {
                debug!("interrupt enumeration ends at line {}", self.line_number);
                ScanState::Done
            },
            _ => ScanState::Scanning,
        }
    }

    fn store(&mut self, line: &str, ident: &str, irqn: i64) {
        let reason = match (Slot::from_irqn(irqn), self.rule.strip(ident, irqn)) {
            (Some(slot), Some(name)) => {
                trace!("{} -> {}", slot, name);
                self.table.insert(slot, name);
                return;
            },
            (None, _) => RejectReason::OutOfRange(irqn),
            (_, None) => RejectReason::EmptyName,
        };
        self.rejected.push(Rejection {
            line_number: self.line_number,
            line: line.to_string(),
            reason,
        });
    }

    pub fn finish(self) -> ScanReport {
        ScanReport {
            table: self.table,
            rejected: self.rejected,
            found_marker: self.found_marker,
        }
    }
}

/// Scan `lines` until the enumeration's closing brace.
pub fn scan<'a, I>(lines: I, rule: SuffixRule) -> ScanReport where
    I: IntoIterator<Item = &'a str>,
{
    let mut scanner = Scanner::new(rule);
    for line in lines {
        if scanner.feed(line) == ScanState::Done {
            break;
        }
    }
    scanner.finish()
}
