//! Interactive terminal frontend for the dojo.
//!
//! Renders each academy as a scrollable chapter document with a sidebar
//! progress tracker and an embedded context playground. All animation is
//! tick-driven through the app event loop; see `app.rs` for the timer
//! lifecycle rules.

use std::path::PathBuf;

use clap::Parser;
use dojo_content::AcademyId;
use dojo_core::config::Config;
use dojo_core::config::ConfigOverrides;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod academy_picker;
mod app;
mod app_event;
mod app_event_sender;
mod chapter;
mod colors;
mod key_hint;
mod playground;
mod sidebar;
mod text_formatting;
mod tui;
mod typewriter;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive terminal academies for agent engineering")]
pub struct Cli {
    /// Open this academy directly, skipping the picker
    /// (e.g. "context-engineering").
    #[arg(long, value_name = "ACADEMY")]
    pub academy: Option<AcademyId>,

    /// Directory for dojo state (config, logs). Defaults to `$DOJO_HOME`,
    /// falling back to `~/.dojo`.
    #[arg(long, value_name = "DIR")]
    pub dojo_home: Option<PathBuf>,
}

pub fn run_main(cli: Cli) -> color_eyre::Result<()> {
    let config = Config::load(ConfigOverrides {
        academy: cli.academy,
        dojo_home: cli.dojo_home,
    })?;

    // The curriculum is static, so a defect here is an authoring bug that
    // `dojo check` and the test suite should have caught. Refuse to start
    // rather than render from inconsistent data.
    let defects = dojo_content::validate::validate_all(dojo_content::academies());
    if !defects.is_empty() {
        return Err(dojo_core::DojoErr::CurriculumInvalid { defects }.into());
    }

    // Stdout belongs to the terminal UI, so logs go to a file under
    // `$DOJO_HOME/log/`. The guard must live as long as the program or the
    // non-blocking writer drops buffered lines on exit.
    let _log_guard = init_logging(&config)?;

    // Chain the panic hook through a terminal restore so a crash never
    // leaves the user's shell in raw mode on the alternate screen.
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install()?;
    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        tui::restore();
        panic_hook(info);
    }));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let mut tui = tui::Tui::new()?;
        app::App::run(config, &mut tui).await?;
        Ok(())
    })
}

fn init_logging(config: &Config) -> std::io::Result<WorkerGuard> {
    let log_dir = config.log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let file_appender = tracing_appender::rolling::never(log_dir, "dojo-tui.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init();
    Ok(guard)
}
