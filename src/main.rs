mod config;
mod controller;
mod event;
mod pointer;
mod position;
mod protocol;
mod save;
mod source;
mod tablets;

use anyhow::Result;
use env_logger::Env;
use log::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() -> Result<()> {
    init_logging();
    info!("pen-cursor v{VERSION}");

    let mut config = save::load();

    for arg in std::env::args().skip(1) {
        match arg.trim() {
            "--stdin" => config.source = config::Source::Stdin,
            "--tablets" => return list_tablets(),
            "--write-config" => return write_config(&config),
            "--help" | "-h" => return usage(),
            other => {
                eprintln!("unknown argument: {other}");
                eprintln!("try --help");
                std::process::exit(2);
            }
        }
    }

    ctrlc::set_handler(|| {
        info!("Interrupted.");
        std::process::exit(130);
    })?;

    controller::run(&config)
}

fn list_tablets() -> Result<()> {
    for (name, ratio) in tablets::KNOWN_TABLETS {
        println!("{name}  ({ratio})");
    }
    Ok(())
}

fn write_config(config: &config::Config) -> Result<()> {
    let path = save::save(config)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn usage() -> Result<()> {
    println!("pen-cursor v{VERSION}");
    println!();
    println!("usage: pen-cursor [--stdin] [--tablets] [--write-config]");
    println!();
    println!("  --stdin         read protocol lines from standard input instead");
    println!("                  of launching the driver");
    println!("  --tablets       list tablet models with a known aspect ratio");
    println!("  --write-config  write the active configuration to disk and exit");
    Ok(())
}

fn init_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}
