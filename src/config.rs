use {
    crate::policy::ErrorPolicy,
    chrono::format::{Item, StrftimeItems},
    clap::Parser,
    std::path::PathBuf,
};

/// tee(1) with file rotation.
///
/// Copies stdin to stdout while mirroring the stream into timestamped
/// files under `dir`, starting a new file whenever the current one would
/// exceed the size limit or a SIGHUP arrives.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Config {
    /// Output directory.
    #[arg(short, long, default_value = ".")]
    pub dir: PathBuf,

    /// Timestamp format (strftime) used in generated filenames.
    #[arg(short, long, default_value = "%+.log", value_parser = strftime_format)]
    pub format: String,

    /// Max file size before rotation (MiB).
    #[arg(long = "maxsize", value_name = "MIB", default_value = "100", value_parser = mib_to_bytes)]
    pub max_size: u64,

    /// Ignore SIGTERM.
    #[arg(long)]
    pub ignore: bool,

    /// Behavior on a write error.
    #[arg(long, value_enum, default_value = "sigpipe")]
    pub output_error: ErrorPolicy,

    /// Filename prefix for rotated files.
    #[arg(default_value = "stdout")]
    pub prefix: String,
}

fn mib_to_bytes(s: &str) -> Result<u64, String> {
    let mib: u64 = s.parse().map_err(|err| format!("{err}"))?;
    if mib == 0 {
        return Err("max size must be positive".into());
    }
    mib.checked_mul(1024 * 1024)
        .ok_or_else(|| "max size out of range".into())
}

fn strftime_format(s: &str) -> Result<String, String> {
    if StrftimeItems::new(s).any(|item| matches!(item, Item::Error)) {
        return Err(format!("unrecognized timestamp specifier in {s:?}"));
    }
    Ok(s.to_owned())
}
