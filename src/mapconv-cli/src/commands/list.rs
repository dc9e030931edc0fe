//! List command handler

use anyhow::Result;
use std::path::Path;

use crate::scan::{scan_dir, Scan};

/// Print the maps found in `input`
pub fn handle(input: &Path) -> Result<()> {
    let scan = scan_dir(input)?;
    print_scan(input, &scan);
    Ok(())
}

fn print_scan(input: &Path, scan: &Scan) {
    println!("Input folder: {}", input.display());
    println!("Found a total of {} maps.", scan.total());
    println!(
        "Of those, {} were valid and {} were invalid.",
        scan.valid.len(),
        scan.invalid.len()
    );

    for name in &scan.valid {
        println!("  {}", name);
    }

    if !scan.invalid.is_empty() {
        println!();
        println!("Invalid maps (missing .idx, .map or .obj):");
        for name in &scan.invalid {
            println!("  {}", name);
        }
    }
}
