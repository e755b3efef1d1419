use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use winup::engine::Engine;
use winup::events::{LogLevel, Reporter, UiEvent};
use winup::settings::{JsonSettingsStore, SettingsStore};
use winup_windows::{DismInstaller, PswuSource};

const USAGE: &str = "usage: winup <command>

commands:
  check              check the update source for pending updates
  download           download pending updates into the local repository
  install            install pending updates online
  offline            install downloaded .msu packages via the servicing tool
  office             update Office through its Click-to-Run client
  dotnet             install pending .NET framework updates
  vcredist           upgrade the VC++ redistributables
  auto-reboot on|off allow or suppress automatic restarts after installs
  repo <path>        change the local repository path";

#[tokio::main]
async fn main() {
    winup::logging::init();

    let mut args = std::env::args().skip(1);
    let Some(command) = args.next() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };
    let argument = args.next();

    let store = JsonSettingsStore::at_default_location();
    let settings = store.load();

    let source = Arc::new(PswuSource::new(Duration::from_secs(
        settings.shell_timeout_secs,
    )));
    let installer = Arc::new(DismInstaller::new(Duration::from_secs(
        settings.servicing_timeout_secs,
    )));

    let (reporter, events) = Reporter::channel();
    let engine = Engine::new(source, installer, Arc::new(store), reporter);

    // The engine only talks through its event channel; this thread is the
    // stand-in for a frontend, printing the stream until the channel closes.
    let printer = std::thread::spawn(move || {
        for event in &events {
            render(&event);
        }
    });

    match command.as_str() {
        "check" => engine.check_for_updates().await,
        "download" => engine.download_updates().await,
        "install" => engine.install_updates().await,
        "offline" => engine.install_offline().await,
        "office" => engine.update_office().await,
        "dotnet" => engine.update_dotnet().await,
        "vcredist" => engine.update_vcredist().await,
        "auto-reboot" => match argument.as_deref() {
            Some("on") => engine.set_auto_reboot(true),
            Some("off") => engine.set_auto_reboot(false),
            _ => exit_with_usage("auto-reboot expects 'on' or 'off'"),
        },
        "repo" => match argument {
            Some(path) => engine.set_repo_path(PathBuf::from(path)),
            None => exit_with_usage("repo expects a path"),
        },
        other => exit_with_usage(&format!("unknown command: {other}")),
    }

    engine.shutdown();
    engine.quiesce().await;
    drop(engine);
    let _ = printer.join();
}

fn exit_with_usage(message: &str) -> ! {
    eprintln!("{message}");
    eprintln!("{USAGE}");
    std::process::exit(2);
}

fn render(event: &UiEvent) {
    match event {
        UiEvent::Log { message, level } => {
            let timestamp = chrono::Local::now().format("%H:%M:%S");
            match level {
                LogLevel::Info => println!("[{timestamp}] {message}"),
                LogLevel::Error => eprintln!("[{timestamp}] {message}"),
            }
        }
        UiEvent::Progress(percent) => {
            if *percent > 0 {
                println!("  ... {percent}%");
            }
        }
        UiEvent::Status {
            title, subtitle, ..
        } => match subtitle {
            Some(subtitle) => println!("== {title} ({subtitle})"),
            None => println!("== {title}"),
        },
    }
}
