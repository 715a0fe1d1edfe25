//! Square-fit CLI tool
//!
//! Command-line interface for trimming transparent borders from images and
//! fitting them onto fixed-size square canvases using the squarefit library.

#[cfg(feature = "cli")]
use squarefit::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<()> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
