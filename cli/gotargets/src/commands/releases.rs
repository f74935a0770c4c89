//! `gotargets releases` — the version range table.

use anyhow::Result;

use gotargets_platforms::{defaults, History};

/// One line per table entry: constraint, release, total and default counts.
pub fn table_lines(history: &History) -> Vec<String> {
    history
        .table()
        .iter()
        .map(|entry| {
            let snapshot = history.entry_snapshot(entry);
            format!(
                "  {:<16} go{:<6} {:>3} platforms ({} default)",
                entry.constraint,
                snapshot.release,
                snapshot.platforms.len(),
                defaults(&snapshot.platforms).len()
            )
        })
        .collect()
}

/// Print the resolution table.
pub fn run() -> Result<()> {
    let history = gotargets_platforms::history();
    println!("Go releases:");
    println!();
    for line in table_lines(history) {
        println!("{line}");
    }
    println!();
    println!("Versions outside these ranges resolve to go{}.", history.latest().release);
    Ok(())
}
