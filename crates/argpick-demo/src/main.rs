use std::io::IsTerminal;

use anyhow::{Context, Result};
use argpick::{ArgStore, BoolMode, Flag};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    init_tracing();

    let mut args = ArgStore::from_env();

    let strict = args.get_boolean(
        Flag::long("strict"),
        BoolMode::FlagOnly,
        false,
        "exit on invalid arguments instead of using defaults",
    );
    args.set_quit_on_error(strict);

    // Flagged arguments first.
    let index = args.get_integer(("i", "index"), 0, "specifies the index of the item");
    let radius = args.get_double(("r", "radius"), 6750.0, "the radius of the sphere");
    let filter = args.get_string(("f", "filter"), "", "specifies an image effect filter");
    let show_image = args.get_boolean(
        ("s", "show_image"),
        BoolMode::FlagOnly,
        false,
        "whether to display the image during processing",
    );
    let check = args.get_boolean(
        Flag::long("check"),
        BoolMode::FlagOnly,
        false,
        "reject unknown flags",
    );

    // Then the unflagged ones.
    let source = args.get_string_at(1, "", "file name of the source image");
    let target = args.get_string_at(2, "", "file name of the target image");
    let preview = args.get_boolean_at(3, false, "open the target image when done");

    if args.help_requested(Some(3)) {
        args.print_help();
        return Ok(());
    }

    if check {
        args.check_validity().context("invalid command line")?;
    }

    tracing::debug!(diagnostics = args.diagnostics().len(), "arguments extracted");

    println!("index = {index}");
    println!("radius = {radius}");
    println!("show_image = {show_image}");
    println!("filter = {filter}");
    println!("source = {source}");
    println!("target = {target}");
    println!("preview = {preview}");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .compact()
        .init();
}
