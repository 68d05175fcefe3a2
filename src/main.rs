mod config;

use std::{env, fs, io::Write, process::ExitCode};

use emu::bus::InternalMemory;
use emu::cartridge_header::CartridgeHeader;
use emu::cpu::arm7tdmi::Arm7tdmi;
use emu::cpu::instruction::DecodedInstruction;
use emu::cpu::psr::CpuState;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, USAGE};

const LOG_FILE_NAME: &str = "gbadis.log";

/// Stderr subscriber filtered by `RUST_LOG`, plus a file layer when asked.
/// The returned guard flushes the file writer on drop.
fn init_tracing(log_file: bool) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let stderr = fmt::layer().with_writer(std::io::stderr);

    if log_file {
        let appender = tracing_appender::rolling::never(env::temp_dir(), LOG_FILE_NAME);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .with(fmt::layer().with_writer(writer).with_ansi(false))
            .init();
        Some(guard)
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr)
            .init();
        None
    }
}

fn main() -> ExitCode {
    let config = match Config::parse(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let _guard = init_tracing(config.log_file);

    let data = match fs::read(&config.rom) {
        Ok(data) => data,
        Err(e) => {
            tracing::error!("cannot open {}: {e}", config.rom.display());
            return ExitCode::from(1);
        }
    };

    tracing::info!(bytes = data.len(), "loaded {}", config.rom.display());
    match CartridgeHeader::new(&data) {
        Ok(header) => {
            let entry = DecodedInstruction::decode(CpuState::Arm, header.rom_entry_point());
            tracing::info!(
                code = header.game_code(),
                maker = header.maker_code(),
                version = header.software_version(),
                entry = %entry.render(),
                "{}",
                header.game_title()
            );
        }
        Err(e) => tracing::warn!("cartridge header: {e}"),
    }

    let state = if config.thumb {
        CpuState::Thumb
    } else {
        CpuState::Arm
    };
    let mut cpu = Arm7tdmi::new(InternalMemory::new(data))
        .with_state(state)
        .with_program_counter(config.start);

    let mut stdout = std::io::stdout().lock();
    for _ in 0..config.count {
        let line = match cpu.step() {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!("stopping: {e}");
                break;
            }
        };

        let written = if config.json {
            serde_json::to_string(&line)
                .map_err(std::io::Error::from)
                .and_then(|json| writeln!(stdout, "{json}"))
        } else {
            writeln!(stdout, "{line}")
        };

        // Closed pipe.
        if written.is_err() {
            break;
        }
    }

    ExitCode::SUCCESS
}
