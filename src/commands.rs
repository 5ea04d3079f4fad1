// src/commands.rs
//! The interactive debsweep session

use anyhow::Result;
use debsweep::prompt::{self, MenuChoice};
use debsweep::{apt, dpkg};
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use std::io::{self, Write};
use tracing::{debug, warn};

/// In-memory state for one interactive session
struct Session {
    packages: Vec<String>,
    upgradable: HashSet<String>,
    filter: Option<Regex>,
}

/// What the session loop should do after a menu choice is applied
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Remove(String),
    Upgrade(String),
    Quit,
}

impl Session {
    fn new(packages: Vec<String>, upgradable: HashSet<String>) -> Self {
        Self {
            packages,
            upgradable,
            filter: None,
        }
    }

    /// The master list with the current search filter applied
    fn displayed(&self) -> Vec<String> {
        filter_packages(&self.packages, self.filter.as_ref())
    }

    /// Apply one menu choice
    ///
    /// Returns `Some(action)` when the loop should stop and act, `None`
    /// when the menu should be re-rendered (filter changes, rejected
    /// upgrade targets).
    fn apply_choice<W: Write>(
        &mut self,
        choice: MenuChoice,
        displayed: &[String],
        out: &mut W,
    ) -> Result<Option<Action>> {
        match choice {
            MenuChoice::Quit => Ok(Some(Action::Quit)),
            MenuChoice::Search(pattern) => {
                if pattern.is_empty() {
                    self.filter = None;
                    return Ok(None);
                }
                match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                    Ok(re) => self.filter = Some(re),
                    // Keep the previous filter on a bad pattern
                    Err(e) => writeln!(out, "Invalid search pattern: {}", e)?,
                }
                Ok(None)
            }
            MenuChoice::Remove(index) => Ok(Some(Action::Remove(displayed[index].clone()))),
            MenuChoice::Upgrade(index) => {
                let name = &displayed[index];
                if !self.upgradable.contains(name) {
                    writeln!(out, "{} has no upgrade available.", name)?;
                    return Ok(None);
                }
                Ok(Some(Action::Upgrade(name.clone())))
            }
        }
    }
}

/// Run one interactive session: menu, selection, confirmation, execution
pub fn cmd_interactive() -> Result<()> {
    if !dpkg::is_available() {
        anyhow::bail!("dpkg not found in PATH; debsweep requires a dpkg-based system");
    }

    let packages = dpkg::list_installed()?;
    if packages.is_empty() {
        println!("No installed packages found.");
        return Ok(());
    }

    // Upgradable markers are cosmetic; losing them is not fatal
    let upgradable = match apt::list_upgradable() {
        Ok(set) => set,
        Err(e) => {
            warn!("Could not enumerate upgradable packages: {}", e);
            HashSet::new()
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let mut session = Session::new(packages, upgradable);

    loop {
        let displayed = session.displayed();
        prompt::render_menu(&mut out, &displayed, &session.upgradable)?;

        let choice = prompt::read_choice(&mut input, &mut out, displayed.len())?;
        match session.apply_choice(choice, &displayed, &mut out)? {
            None => continue,
            Some(Action::Quit) => {
                writeln!(out, "Nothing removed.")?;
                return Ok(());
            }
            Some(Action::Remove(name)) => {
                show_details(&mut out, &name)?;
                if prompt::confirm(&mut input, &mut out, &format!("Remove {}?", name))? {
                    apt::remove(&name)?;
                    writeln!(out, "{} has been removed.", name)?;
                } else {
                    writeln!(out, "Removal cancelled.")?;
                }
                return Ok(());
            }
            Some(Action::Upgrade(name)) => {
                show_details(&mut out, &name)?;
                if prompt::confirm(&mut input, &mut out, &format!("Upgrade {}?", name))? {
                    apt::upgrade(&name)?;
                    writeln!(out, "{} has been upgraded.", name)?;
                } else {
                    writeln!(out, "Upgrade cancelled.")?;
                }
                return Ok(());
            }
        }
    }
}

/// Apply a search filter, preserving master-list order
fn filter_packages(packages: &[String], filter: Option<&Regex>) -> Vec<String> {
    match filter {
        Some(re) => packages
            .iter()
            .filter(|name| re.is_match(name))
            .cloned()
            .collect(),
        None => packages.to_vec(),
    }
}

/// Print version/description for the selected package, best effort
fn show_details<W: Write>(out: &mut W, name: &str) -> Result<()> {
    match dpkg::query_package(name) {
        Ok(details) => {
            writeln!(out)?;
            writeln!(
                out,
                "  {} {} ({})",
                details.name, details.version, details.arch
            )?;
            if let Some(description) = &details.description {
                writeln!(out, "  {}", description)?;
            }
        }
        Err(e) => debug!("Could not query details for {}: {}", name, e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn session(packages: &[&str], upgradable: &[&str]) -> Session {
        Session::new(
            names(packages),
            upgradable.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn apply(session: &mut Session, choice: MenuChoice) -> (Option<Action>, String) {
        let displayed = session.displayed();
        let mut out = Vec::new();
        let action = session.apply_choice(choice, &displayed, &mut out).unwrap();
        (action, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_search_narrows_the_displayed_list() {
        let mut session = session(&["libssl-dev", "vim", "zlib1g"], &[]);
        let (action, _) = apply(&mut session, MenuChoice::Search("lib".to_string()));
        assert_eq!(action, None);
        assert_eq!(session.displayed(), names(&["libssl-dev", "zlib1g"]));
    }

    #[test]
    fn test_invalid_search_pattern_keeps_current_filter() {
        let mut session = session(&["libssl-dev", "vim", "zlib1g"], &[]);
        apply(&mut session, MenuChoice::Search("lib".to_string()));

        let (action, out) = apply(&mut session, MenuChoice::Search("[unclosed".to_string()));
        assert_eq!(action, None);
        assert!(out.contains("Invalid search pattern"));
        assert_eq!(session.displayed(), names(&["libssl-dev", "zlib1g"]));
    }

    #[test]
    fn test_empty_search_clears_the_filter() {
        let mut session = session(&["libssl-dev", "vim"], &[]);
        apply(&mut session, MenuChoice::Search("lib".to_string()));
        apply(&mut session, MenuChoice::Search(String::new()));
        assert_eq!(session.displayed(), names(&["libssl-dev", "vim"]));
    }

    #[test]
    fn test_upgrade_of_non_upgradable_entry_is_rejected() {
        let mut session = session(&["apt", "vim"], &["vim"]);
        let (action, out) = apply(&mut session, MenuChoice::Upgrade(0));
        assert_eq!(action, None);
        assert!(out.contains("apt has no upgrade available."));
    }

    #[test]
    fn test_upgrade_of_upgradable_entry_resolves_name() {
        let mut session = session(&["apt", "vim"], &["vim"]);
        let (action, _) = apply(&mut session, MenuChoice::Upgrade(1));
        assert_eq!(action, Some(Action::Upgrade("vim".to_string())));
    }

    #[test]
    fn test_remove_resolves_name_from_filtered_list() {
        let mut session = session(&["libssl-dev", "vim", "zlib1g"], &[]);
        apply(&mut session, MenuChoice::Search("lib".to_string()));
        // Index 1 of the filtered list is zlib1g, not vim
        let (action, _) = apply(&mut session, MenuChoice::Remove(1));
        assert_eq!(action, Some(Action::Remove("zlib1g".to_string())));
    }

    #[test]
    fn test_quit_maps_to_quit_action() {
        let mut session = session(&["apt"], &[]);
        let (action, _) = apply(&mut session, MenuChoice::Quit);
        assert_eq!(action, Some(Action::Quit));
    }

    #[test]
    fn test_filter_packages_no_filter_keeps_everything() {
        let packages = names(&["apt", "vim", "zsh"]);
        assert_eq!(filter_packages(&packages, None), packages);
    }

    #[test]
    fn test_filter_packages_is_case_insensitive() {
        let packages = names(&["libssl-dev", "vim", "LibreOffice-core"]);
        let re = RegexBuilder::new("lib")
            .case_insensitive(true)
            .build()
            .unwrap();
        assert_eq!(
            filter_packages(&packages, Some(&re)),
            names(&["libssl-dev", "LibreOffice-core"])
        );
    }

    #[test]
    fn test_filter_packages_can_match_nothing() {
        let packages = names(&["apt", "vim"]);
        let re = RegexBuilder::new("nonexistent").build().unwrap();
        assert!(filter_packages(&packages, Some(&re)).is_empty());
    }
}
