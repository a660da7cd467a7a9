use anyhow::Context as _;
use log::LevelFilter;

/// Installs the global logger: `HH:MM:SS.mmm [LEVEL target] message` lines
/// on stderr.  wgpu and naga are capped at `warn` whatever `level` says.
pub fn init(level: LevelFilter) -> anyhow::Result<()> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} [{} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("wgpu_core", level.min(LevelFilter::Warn))
        .level_for("wgpu_hal", level.min(LevelFilter::Warn))
        .level_for("naga", level.min(LevelFilter::Warn))
        .chain(std::io::stderr())
        .apply()
        .context("a logger is already installed")
}

/// Parses `error`/`warn`/`info`/`debug`/`trace`/`off`, case-insensitively.
pub fn parse_level(s: &str) -> anyhow::Result<LevelFilter> {
    s.parse::<LevelFilter>()
        .map_err(|_| anyhow::anyhow!("unknown log level `{s}`"))
}
