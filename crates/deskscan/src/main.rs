//! Deskscan - desktop shortcut scan followed by the tray menu demo.
//!
//! Scans the user and public desktops for shortcuts, warns when the
//! expected application is missing, then sets up the window and tray
//! through a headless shell.

use anyhow::Result;
use clap::Parser;
use deskscan_core::{
    is_present, resolve, AppConfig, DesktopRoots, MessageBoxNotifier, PresenceConfig, PresenceNotice,
    ScanReport, ShellSession,
};
use deskscan_shell::tray::{greeting, GREETING_BINDING};
use deskscan_shell::{
    build_demo_tray, AppShell, HeadlessShell, MenuContext, PowerShellStartApps, WindowOptions,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "deskscan")]
#[command(about = "Resolve desktop shortcuts and run the tray menu demo")]
struct Args {
    /// Shortcut file name that must be present on a desktop
    #[arg(long, default_value = PresenceConfig::DEFAULT_EXPECTED_SHORTCUT)]
    expect: String,

    /// Directory to scan instead of the user and public desktops (repeatable)
    #[arg(long = "root")]
    roots: Vec<PathBuf>,

    /// Print the resolved shortcuts as JSON
    #[arg(long)]
    json: bool,

    /// Click a tray menu item by its slash-separated title path (repeatable)
    #[arg(long = "click")]
    clicks: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact();
    if std::env::var_os("RUST_LOG").is_some() {
        builder.with_env_filter(EnvFilter::from_default_env()).init();
    } else {
        builder.init();
    }

    info!("Starting {}", AppConfig::APP_NAME);

    let roots = if args.roots.is_empty() {
        DesktopRoots::from_env().to_vec()
    } else {
        args.roots.clone()
    };

    let report = scan(&roots);
    print_index(&report, args.json)?;

    let notice = PresenceNotice::for_shortcut(&args.expect);
    is_present(&report.index, &args.expect, &MessageBoxNotifier, &notice);

    run_shell(&args.clicks)
}

/// Resolve shortcuts under `roots` inside a single COM session.
fn scan(roots: &[PathBuf]) -> ScanReport {
    for root in roots {
        info!("Desktop root: {}", root.display());
    }

    match ShellSession::open() {
        Ok(session) => resolve(&session, roots),
        Err(e) => {
            warn!("Shortcut resolution unavailable: {}", e);
            ScanReport::default()
        }
    }
}

fn print_index(report: &ScanReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.index)?);
        return Ok(());
    }

    println!("Desktop Shortcuts:");
    for (name, target) in report.index.sorted() {
        println!("{}: {}", name, target);
    }
    println!();
    Ok(())
}

fn run_shell(clicks: &[String]) -> Result<()> {
    let shell = HeadlessShell::new(WindowOptions::default());
    shell.bind(GREETING_BINDING, Arc::new(greeting));

    let mut tray = build_demo_tray();
    let start_apps = PowerShellStartApps;
    let ctx = MenuContext {
        shell: &shell,
        start_apps: &start_apps,
    };

    shell.show();
    shell.navigate(&shell.options().start_url);

    for click in clicks {
        let path: Vec<&str> = click.split('/').map(str::trim).collect();
        tray.click(&path, &ctx)?;
    }

    info!("{} shell calls issued", shell.calls().len());
    Ok(())
}
