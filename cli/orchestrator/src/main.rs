//! `protoc-gen-twirp-swift`
//!
//! protoc plugin generating Swift Twirp clients. Invoked by the host compiler with the
//! request on stdin; takes no flags.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

use std::io;
use std::process;

use tracing::error;

fn main() {
    if let Err(e) = twirpgen_cli::execute(io::stdin().lock(), io::stdout().lock()) {
        error!(error = %e, "generation aborted");
        eprintln!("protoc-gen-twirp-swift: {e}");
        process::exit(1);
    }
}
