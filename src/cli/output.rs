//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for colorizing output, printing decision
//! tables and rendering diffs. By centralizing output logic here, we ensure
//! a consistent user experience across all commands.

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::fragments::GENERATORS;
use crate::plan::LifecyclePlan;

/// Colors only when stdout is a terminal.
pub fn color_choice() -> ColorChoice {
    if atty::is(atty::Stream::Stdout) {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

// ============================================================================
// CORE OUTPUT FUNCTIONS: User-facing CLI output utilities
// ============================================================================

/// Prints each phase with its emitted steps, or `skipped`.
pub fn print_plan(plan: &LifecyclePlan) {
    let mut stdout = StandardStream::stdout(color_choice());
    for generator in GENERATORS.iter() {
        let emitted = (generator.emit_when)(plan);
        let color = if emitted { Color::Green } else { Color::Red };
        let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
        print!("{:<20}", generator.phase.as_str());
        let _ = stdout.reset();
        if !emitted {
            println!(" skipped");
            continue;
        }
        println!();
        for (i, label) in generator.active_steps(plan).iter().enumerate() {
            println!("  {}. {}", i + 1, label);
        }
    }
}

/// Prints a line diff between the file on disk and the regenerated text.
/// Returns true when they differ.
pub fn print_drift(existing: &str, regenerated: &str) -> bool {
    if existing == regenerated {
        return false;
    }
    let mut stdout = StandardStream::stdout(color_choice());
    let changeset = Changeset::new(existing, regenerated, "\n");
    print_diff(&mut stdout, &changeset.diffs);
    true
}

/// Prints a one-line status in bold `color`.
pub fn print_status(color: Color, message: &str) {
    let mut stderr = StandardStream::stderr(color_choice());
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
    eprintln!("{}", message);
    let _ = stderr.reset();
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_diff(stdout: &mut StandardStream, diffs: &[Difference]) {
    for diff in diffs {
        match diff {
            Difference::Same(ref x) => {
                let _ = stdout.reset();
                for line in x.lines() {
                    println!(" {}", line);
                }
            }
            Difference::Add(ref x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                for line in x.lines() {
                    println!("+{}", line);
                }
            }
            Difference::Rem(ref x) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                for line in x.lines() {
                    println!("-{}", line);
                }
            }
        }
    }
    let _ = stdout.reset();
}
