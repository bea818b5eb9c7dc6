use clap::Parser;
use tracing::info;
use tracing_appender::rolling;

use payroll::cli::{self, Cli};
use payroll::config::Config;
use payroll::{FileStore, Session};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env().with_data_file(cli.data_file.clone());

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "payroll.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .init();

    info!(data_file = %config.data_file.display(), "Payroll session starting");

    let (mut session, status) = Session::open(FileStore::new(&config.data_file));
    info!(status = status.message(), employees = session.registry().len(), "Startup load");

    let mut stdout = std::io::stdout().lock();
    cli::run_command(&mut session, cli.command, &mut stdout)
}
