//! Human-readable and JSON renderings of a chain.
//!
//! The text layout lists every block oldest first.  Each block prints its
//! previous hash, own hash and transaction on three lines indented by two
//! spaces per level of depth, so the report visibly grows with the chain.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::hasher::BlockHash;

const INDENT_STEP: usize = 2;

/// Display-ready snapshot of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    /// Position counted from the oldest block.
    pub depth: usize,
    /// Digest of the predecessor, `0` for genesis.
    pub previous_hash: BlockHash,
    /// Digest of this block.
    pub block_hash: BlockHash,
    /// Recorded vote payload.
    pub transaction: String,
}

impl BlockSummary {
    /// Captures `block` at the given depth.
    pub fn new(depth: usize, block: &Block) -> Self {
        Self {
            depth,
            previous_hash: block.previous_hash(),
            block_hash: block.block_hash(),
            transaction: block.transaction().to_string(),
        }
    }

    /// Leading whitespace width for this summary.
    pub fn indent(&self) -> usize {
        self.depth * INDENT_STEP
    }

    /// Adapter that prints digests using `format`.
    pub fn display(&self, format: DigestFormat) -> SummaryDisplay<'_> {
        SummaryDisplay {
            summary: self,
            format,
        }
    }
}

impl fmt::Display for BlockSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.display(DigestFormat::Decimal), f)
    }
}

/// Formats a [`BlockSummary`] with a chosen [`DigestFormat`].
#[derive(Debug, Clone, Copy)]
pub struct SummaryDisplay<'a> {
    summary: &'a BlockSummary,
    format: DigestFormat,
}

impl fmt::Display for SummaryDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = "";
        let width = self.summary.indent();
        writeln!(
            f,
            "{pad:width$}Previous hash\t{}",
            self.format.apply(self.summary.previous_hash)
        )?;
        writeln!(
            f,
            "{pad:width$}Block hash\t{}",
            self.format.apply(self.summary.block_hash)
        )?;
        writeln!(f, "{pad:width$}Transaction\t{}", self.summary.transaction)?;
        writeln!(f, "{pad:width$}")
    }
}

/// How digests are printed in the text report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestFormat {
    /// Base-10 integer.
    #[default]
    Decimal,
    /// `0x`-prefixed big-endian hex, always sixteen digits.
    Hex,
}

impl DigestFormat {
    /// Renders `hash` in this format.
    pub fn apply(&self, hash: BlockHash) -> String {
        match self {
            DigestFormat::Decimal => hash.to_string(),
            DigestFormat::Hex => format!("0x{}", hex::encode(hash.to_be_bytes())),
        }
    }
}

/// Output flavour of the final report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Indented plain text.
    #[default]
    Text,
    /// Pretty-printed JSON array of summaries.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format `{other}`")),
        }
    }
}

/// Writes the indented text report.
pub fn write_text_report<W: Write>(
    out: &mut W,
    summaries: &[BlockSummary],
    format: DigestFormat,
) -> io::Result<()> {
    writeln!(out, "Print chain")?;
    writeln!(out, "=======")?;
    for summary in summaries {
        write!(out, "{}", summary.display(format))?;
    }
    writeln!(out)
}

/// Writes the summaries as a pretty JSON array followed by a newline.
pub fn write_json_report<W: Write>(out: &mut W, summaries: &[BlockSummary]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, summaries)?;
    writeln!(out)
}

/// Writes `summaries` in the requested report flavour.
pub fn write_report<W: Write>(
    out: &mut W,
    summaries: &[BlockSummary],
    report: ReportFormat,
    digests: DigestFormat,
) -> io::Result<()> {
    match report {
        ReportFormat::Text => write_text_report(out, summaries, digests),
        ReportFormat::Json => write_json_report(out, summaries),
    }
}
