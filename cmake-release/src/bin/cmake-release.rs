//! cmake-release - CMake zip release with optional Android Studio package
//!
//! Usage:
//!   cmake-release <src> <out-dir> <dest-dir> <build-id>
//!       [--cmake <path>] [--ninja <path>] [--clang-repo <path>]
//!       [--android-cmake <path>] [-v]

use clap::Parser;
use cmake_release::cli::{self, StudioCli};
use cmake_release::ReleaseVariant;
use std::process;

fn main() {
    let cli = StudioCli::parse();
    cli::init_tracing(cli.release.verbose);

    match cli::run(cli.release, cli.android_cmake, ReleaseVariant::STUDIO) {
        Ok(outcome) => cli::report(&outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
