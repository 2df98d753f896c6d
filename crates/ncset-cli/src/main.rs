mod cli;
mod commands;
mod settings;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use settings::Context;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("ncset=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let ctx = Context::new(
        args.config.as_deref(),
        args.generations.as_deref(),
        args.generation,
    )?;

    match args.command {
        Command::Detect { file, report } => commands::detect::run(&ctx, &file, report.as_deref()),
        Command::Show { file, mode } => commands::show::run(&ctx, &file, mode),
        Command::SetSlot {
            file,
            mode,
            slot,
            item,
            write,
        } => commands::edit::set_slot(&ctx, &file, mode, slot, item, &write),
        Command::SetPrefix {
            file,
            mode,
            prefix,
            write,
        } => commands::edit::set_prefix(&ctx, &file, mode, &prefix, &write),
        Command::CopySection {
            file,
            from,
            to,
            write,
        } => commands::edit::copy_section(&ctx, &file, from, to, &write),
        Command::ResetSection { file, mode, write } => {
            commands::edit::reset_section(&ctx, &file, mode, &write)
        }
        Command::Verify { file } => commands::checksum::verify(&file),
        Command::Repair { file, output } => commands::checksum::repair(&file, output.as_deref()),
        Command::Export { file, output } => commands::export::run(&ctx, &file, output.as_deref()),
        Command::Compare {
            before,
            after,
            limit,
        } => commands::compare::run(&ctx, &before, &after, limit),
        Command::Hexdump {
            file,
            offset,
            size,
            ascii,
        } => commands::hexdump::run(&file, &offset, size, ascii),
        Command::Probe { file, offset } => commands::probe::run(&ctx, &file, &offset),
        Command::Offset { from, to } => commands::offset::run(&from, &to),
    }
}
