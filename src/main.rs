//! ccbell CLI entry point

use std::panic;
use std::process::ExitCode;

use ccbell::cli::{presenter::Presenter, run, EXIT_INTERNAL_ERROR};

fn main() -> ExitCode {
    // Panics are reported once, below, as an internal error.
    panic::set_hook(Box::new(|_| {}));

    let outcome = panic::catch_unwind(|| {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(runtime.block_on(run(std::env::args_os())))
    });

    let presenter = Presenter::new();
    match outcome {
        Ok(Ok(code)) => code,
        Ok(Err(e)) => {
            presenter.internal_error(&format!("could not start runtime: {e}"));
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            presenter.internal_error(&message);
            ExitCode::from(EXIT_INTERNAL_ERROR)
        }
    }
}
