//! Stdin drain
//!
//! Hook runners may pipe event JSON into the process. It is not needed, but
//! it must be consumed so the writer never blocks on a full pipe.

use std::io;
use std::thread;

/// Copy stdin to a sink on a detached thread.
///
/// The pipeline does not wait for this; the thread dies with the process.
pub fn drain_stdin() {
    let spawned = thread::Builder::new()
        .name("stdin-drain".to_string())
        .spawn(|| {
            let _ = io::copy(&mut io::stdin().lock(), &mut io::sink());
        });

    if let Err(e) = spawned {
        tracing::debug!(error = %e, "could not start stdin drain");
    }
}
