//! cmake-release-tarball - CMake release as a versioned tar.bz2
//!
//! Usage:
//!   cmake-release-tarball <src> <out-dir> <dest-dir> <build-id>
//!       [--cmake <path>] [--ninja <path>] [--clang-repo <path>] [-v]

use clap::Parser;
use cmake_release::cli::{self, TarballCli};
use cmake_release::ReleaseVariant;
use std::process;

fn main() {
    let cli = TarballCli::parse();
    cli::init_tracing(cli.release.verbose);

    match cli::run(cli.release, None, ReleaseVariant::TARBALL) {
        Ok(outcome) => cli::report(&outcome),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
