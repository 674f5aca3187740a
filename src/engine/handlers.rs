//! Command handler: wire CLI args into the scan and the interactive run.

use anyhow::Result;
use std::io::Write;
use std::time::Duration;

use crate::cancel::CancelToken;
use crate::engine::Cli;
use crate::relay::{CommandSpec, run_interactive};
use crate::scanner;
use crate::types::{RelayOpts, ScanOpts};
use crate::utils::setup_logging;

/// Setup logging, install the ctrl-c hook, and build options from the CLI.
fn setup_operation(cli: &Cli) -> Result<(ScanOpts, RelayOpts)> {
    setup_logging(cli.verbose.unwrap_or(false));

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel())?;
    }

    let scan_opts = ScanOpts {
        workers: cli.workers,
        strict: cli.strict.unwrap_or(false),
        cancel: cancel.clone(),
    };
    let relay_opts = RelayOpts {
        exit_timeout: cli.exit_timeout.map(Duration::from_secs),
        cancel,
    };
    Ok((scan_opts, relay_opts))
}

/// Run the scan (streaming each path to stdout) and then, when requested,
/// the interactive command. Returns the process exit code: 0 on success,
/// the child's own code when it exits nonzero.
pub fn handle_run(cli: &Cli) -> Result<i32> {
    let (scan_opts, relay_opts) = setup_operation(cli)?;

    run_scan(cli, &scan_opts)?;

    let Some(command) = &cli.command else {
        return Ok(0);
    };
    let spec = CommandSpec::new(command).args(cli.command_args.iter().cloned());
    let status = run_interactive(spec, std::io::stdin(), &mut std::io::stdout(), &relay_opts)?;
    Ok(status.code().unwrap_or(1))
}

/// Stream discovered paths to stdout as they arrive, then join the pool and
/// apply the strict/skip policy.
fn run_scan(cli: &Cli, opts: &ScanOpts) -> Result<()> {
    let handles = scanner::spawn_scan(&cli.dir, opts)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    while let Ok(path) = handles.path_rx.recv() {
        writeln!(out, "{}", path.display())?;
    }

    for h in handles.worker_handles {
        h.join()
            .map_err(|_| anyhow::anyhow!("scan worker panicked"))?;
    }
    if opts.cancel.is_cancelled() {
        anyhow::bail!("scan cancelled");
    }
    scanner::check_scan_errors(opts.strict, &handles.first_error, &handles.skipped)?;
    Ok(())
}
