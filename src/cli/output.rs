//! Console report formatting

use crate::cli::table::Table;
use crate::detection::OutlierMask;
use colored::Colorize;
use std::io::{self, Write};
use std::path::Path;

const RULE_WIDTH: usize = 24;

fn rule<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(RULE_WIDTH).cyan())
}

/// Print the flagged rows, prefixed by their row index, and the total.
pub fn outlier_report<W: Write>(out: &mut W, table: &Table, mask: &OutlierMask) -> io::Result<()> {
    rule(out)?;
    writeln!(out, "    Outliers Found")?;
    rule(out)?;

    let flagged: Vec<Vec<String>> = mask
        .outlier_indices()
        .into_iter()
        .filter_map(|i| table.rows().get(i).map(|row| (i, row)))
        .map(|(i, row)| std::iter::once(i.to_string()).chain(row.iter().map(String::from)).collect())
        .collect();

    if flagged.is_empty() {
        writeln!(out, "No outliers found")?;
    } else {
        let header: Vec<String> =
            std::iter::once(String::new()).chain(table.headers().iter().map(String::from)).collect();
        let widths: Vec<usize> = (0..header.len())
            .map(|c| {
                flagged
                    .iter()
                    .chain(std::iter::once(&header))
                    .map(|r| r[c].chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        for line in std::iter::once(&header).chain(flagged.iter()) {
            let cells: Vec<String> =
                line.iter().zip(&widths).map(|(cell, &w)| format!("{cell:>w$}")).collect();
            writeln!(out, "{}", cells.join("  "))?;
        }
    }

    rule(out)?;
    writeln!(out, "Total: {}", mask.count())?;
    rule(out)
}

/// Confirm where the cleaned table was written.
pub fn saved<W: Write>(out: &mut W, destination: &Path) -> io::Result<()> {
    writeln!(
        out,
        "{} {}",
        "Cleaned data saved to".green(),
        destination.display().to_string().cyan()
    )
}

/// Print a single-line error to stderr.
pub fn error(message: &str) {
    eprintln!("{}{}", "Error: ".red(), message);
}
