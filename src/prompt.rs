// src/prompt.rs

//! Interactive menu and confirmation prompts
//!
//! Implements the "suggest + confirm" pattern: list what can be done,
//! read a selection, confirm before anything irreversible runs. All
//! functions are generic over the input/output streams so the re-prompt
//! loops can be driven by buffers in tests.

use crate::error::Result;
use std::collections::HashSet;
use std::io::{BufRead, Write};

/// What the user asked for at the selection prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    /// Remove the package at this index of the displayed list
    Remove(usize),
    /// Upgrade the package at this index of the displayed list
    Upgrade(usize),
    /// Replace the search filter (empty pattern clears it)
    Search(String),
    /// Exit without further action
    Quit,
}

/// Render the numbered package menu
///
/// Upgradable packages are marked with `*` after the number.
pub fn render_menu<W: Write>(
    out: &mut W,
    packages: &[String],
    upgradable: &HashSet<String>,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "Installed packages:")?;
    for (i, name) in packages.iter().enumerate() {
        let marker = if upgradable.contains(name) { '*' } else { ' ' };
        writeln!(out, "{:5}.{} {}", i + 1, marker, name)?;
    }
    if packages.is_empty() {
        writeln!(out, "  (no packages match the current filter)")?;
    }
    Ok(())
}

/// Read one menu choice, re-prompting until the input is valid
///
/// Accepted forms: a number in `[1, len]`, `u N` to upgrade entry N,
/// `/pattern` to change the search filter, `q` to quit. End of input
/// behaves like `q`.
pub fn read_choice<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    len: usize,
) -> Result<MenuChoice> {
    loop {
        write!(
            out,
            "Select a package to remove (number), 'u N' to upgrade, '/text' to search, 'q' to quit: "
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(MenuChoice::Quit);
        }
        let line = line.trim();

        if line.eq_ignore_ascii_case("q") {
            return Ok(MenuChoice::Quit);
        }

        if let Some(pattern) = line.strip_prefix('/') {
            return Ok(MenuChoice::Search(pattern.trim().to_string()));
        }

        // Only `u` followed by digits is an upgrade request; anything else
        // (say a stray "update") falls through to the generic handling
        if let Some(rest) = line.strip_prefix(['u', 'U']) {
            let rest = rest.trim();
            if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
                match parse_index(rest, len) {
                    Some(index) => return Ok(MenuChoice::Upgrade(index)),
                    None => {
                        writeln!(out, "Invalid upgrade selection. Please try again.")?;
                        continue;
                    }
                }
            }
        }

        match line.parse::<usize>() {
            Ok(selection) if (1..=len).contains(&selection) => {
                return Ok(MenuChoice::Remove(selection - 1));
            }
            Ok(_) => writeln!(out, "Invalid selection. Please try again.")?,
            Err(_) => writeln!(out, "Invalid input. Please enter a number.")?,
        }
    }
}

/// Parse a 1-based selection into a 0-based index, rejecting out-of-range
fn parse_index(text: &str, len: usize) -> Option<usize> {
    let selection: usize = text.parse().ok()?;
    (1..=len).contains(&selection).then(|| selection - 1)
}

/// Ask a yes/no question; only `y`/`yes` (any case) means yes
pub fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<bool> {
    write!(out, "{} [y/N]: ", question)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(false);
    }

    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
