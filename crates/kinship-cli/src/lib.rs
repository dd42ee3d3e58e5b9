//! CLI logic for the Kinship family tree tool.
//!
//! A run replays a script of commands against a fresh session, prints search
//! results to stdout, and writes the final tree as SVG.

pub mod error_adapter;
pub mod script;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::{debug, info};

use kinship::{FamilyTree, KinshipError, request::Command};

use script::Script;

/// Run the Kinship CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `KinshipError` for:
/// - File I/O errors
/// - Configuration or script loading errors
/// - Rejected commands
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), KinshipError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing script"
    );

    let app_config = config::load_config(args.config.as_ref())?;
    let script = Script::load(&args.input)?;

    let mut tree = FamilyTree::new(app_config);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    replay(&mut tree, &script, &mut out)?;

    let svg = tree.render_svg()?;
    fs::write(&args.output, svg)?;

    info!(output_file = args.output, members = tree.store().len(); "SVG exported successfully");

    Ok(())
}

/// Applies every command of `script` in order, stopping at the first rejection.
///
/// Search results are written to `out`, one `#id<TAB>name` line per match.
///
/// # Errors
///
/// Returns the error of the first rejected command, or an I/O error from `out`.
pub fn replay(
    tree: &mut FamilyTree,
    script: &Script,
    out: &mut impl Write,
) -> Result<(), KinshipError> {
    for (index, command) in script.commands().iter().enumerate() {
        debug!(index, command:?; "Replaying command");
        match command {
            Command::Add(request) => {
                tree.apply(request)?;
            }
            Command::Delete(request) => {
                tree.delete(request)?;
            }
            Command::Search(request) => {
                for person in tree.search(request) {
                    writeln!(out, "{}\t{}", person.id(), person.name())?;
                }
            }
        }
    }
    Ok(())
}
