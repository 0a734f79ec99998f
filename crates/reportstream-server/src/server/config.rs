use anyhow::bail;
use clap::{Parser, ValueEnum};
use core::time::Duration;
use reportstream::CorrelationPool;
use reportstream_api::content::ContentFormat;

/// Runtime configuration for the `reportstream-server` binary.
///
/// All values are parsed from CLI arguments or environment variables (a `.env`
/// file is loaded first), with defaults that reproduce the reference mock
/// backend.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "reportstream-server",
    version,
    about = "An HTTP service that streams mock chat reports frame by frame",
    args_override_self = true
)]
pub struct CliArgs {
    /// Address to listen on.
    ///
    /// Environment variable: `SERVER_ADDR`
    #[arg(long, env = "SERVER_ADDR", default_value_t = String::from("0.0.0.0:8000"))]
    pub server_addr: String,

    /// Delay between two consecutive stream frames, in milliseconds.
    ///
    /// Zero disables pacing entirely.
    ///
    /// Environment variable: `PACING_MS`
    #[arg(long, env = "PACING_MS", default_value_t = 10)]
    pub pacing_ms: u64,

    /// Identifiers handed out, in order, by the link frame closing each
    /// segment. Once exhausted, link frames carry `null`.
    ///
    /// Environment variable: `LINK_POOL` (comma separated)
    #[arg(
        long,
        env = "LINK_POOL",
        value_delimiter = ',',
        default_value = "id1,id2,id3"
    )]
    pub link_pool: Vec<String>,

    /// How the pacing delay is applied: a timer sleep, or a scheduler yield
    /// with no wall-clock delay.
    ///
    /// Environment variable: `PACING_STRATEGY` (`sleep` or `yield`)
    #[arg(long, env = "PACING_STRATEGY", value_enum, default_value_t = PacingStrategy::Sleep)]
    pub pacing_strategy: PacingStrategy,

    /// Which rendition of the report text to stream and store.
    ///
    /// Environment variable: `CONTENT_FORMAT` (`html` or `plain`)
    #[arg(long, env = "CONTENT_FORMAT", default_value_t = ContentFormat::Html)]
    pub content_format: ContentFormat,

    /// Number of sample reports registered at startup (`id1..=idN`).
    ///
    /// Environment variable: `REPORT_COUNT`
    #[arg(long, env = "REPORT_COUNT", default_value_t = 5)]
    pub report_count: usize,

    /// Capacity of the buffer between a stream coordinator and the response
    /// body, in frames.
    ///
    /// Lower values make backpressure from slow clients kick in earlier.
    ///
    /// Environment variable: `STREAM_BUFFER_SIZE`
    #[arg(long, env = "STREAM_BUFFER_SIZE", default_value_t = 8)]
    pub stream_buffer_size: usize,

    /// Upper bound on the lifetime of a single stream, in seconds. Unset means
    /// streams run to completion.
    ///
    /// Environment variable: `STREAM_DEADLINE_SECS`
    #[arg(long, env = "STREAM_DEADLINE_SECS")]
    pub stream_deadline_secs: Option<u64>,

    /// How long shutdown waits for in-flight streams before cancelling them,
    /// in seconds.
    ///
    /// Environment variable: `SHUTDOWN_TIMEOUT`
    #[arg(long, env = "SHUTDOWN_TIMEOUT", default_value_t = 5)]
    pub shutdown_timeout: u64,

    /// Log output format.
    ///
    /// Environment variable: `LOG_FORMAT`
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Console log layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Multi-line, human readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Pacing provider used by stream coordinators.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PacingStrategy {
    /// Sleep on the Tokio timer for the configured pacing.
    #[default]
    Sleep,
    /// Yield to the scheduler between frames; `PACING_MS` is ignored.
    Yield,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub server_addr: String,
    pub pacing: Duration,
    pub pacing_strategy: PacingStrategy,
    pub link_pool: CorrelationPool,
    pub content_format: ContentFormat,
    pub report_count: usize,
    pub stream_buffer_size: usize,
    pub stream_deadline: Option<Duration>,
    pub shutdown_timeout: Duration,
    pub log_format: LogFormat,
}

impl TryFrom<CliArgs> for ServerConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if args.report_count == 0 {
            bail!("REPORT_COUNT must be greater than 0");
        }

        if args.stream_buffer_size == 0 {
            bail!("STREAM_BUFFER_SIZE must be greater than 0");
        }

        if args.stream_deadline_secs == Some(0) {
            bail!("STREAM_DEADLINE_SECS must be greater than 0 when set");
        }

        let mut link_pool = Vec::with_capacity(args.link_pool.len());
        for (i, id) in args.link_pool.into_iter().enumerate() {
            let id = id.trim();
            if id.is_empty() {
                bail!("LINK_POOL entry {} is empty", i + 1);
            }
            link_pool.push(id.to_string());
        }

        Ok(Self {
            server_addr: args.server_addr,
            pacing: Duration::from_millis(args.pacing_ms),
            pacing_strategy: args.pacing_strategy,
            link_pool: link_pool.into_iter().collect(),
            content_format: args.content_format,
            report_count: args.report_count,
            stream_buffer_size: args.stream_buffer_size,
            stream_deadline: args.stream_deadline_secs.map(Duration::from_secs),
            shutdown_timeout: Duration::from_secs(args.shutdown_timeout),
            log_format: args.log_format,
        })
    }
}

#[cfg(test)]
pub(crate) fn test_config(extra: &[&str]) -> ServerConfig {
    let argv = ["reportstream-server", "--pacing-ms", "0"]
        .into_iter()
        .chain(extra.iter().copied());
    ServerConfig::try_from(CliArgs::parse_from(argv)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> anyhow::Result<ServerConfig> {
        let argv = ["reportstream-server"].into_iter().chain(extra.iter().copied());
        ServerConfig::try_from(CliArgs::try_parse_from(argv)?)
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.server_addr, "0.0.0.0:8000");
        assert_eq!(config.pacing, Duration::from_millis(10));
        assert_eq!(config.pacing_strategy, PacingStrategy::Sleep);
        assert_eq!(config.link_pool.ids(), ["id1", "id2", "id3"]);
        assert_eq!(config.content_format, ContentFormat::Html);
        assert_eq!(config.report_count, 5);
        assert_eq!(config.stream_buffer_size, 8);
        assert_eq!(config.stream_deadline, None);
        assert_eq!(config.shutdown_timeout, Duration::from_secs(5));
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn link_pool_is_comma_separated_and_trimmed() {
        let config = parse(&["--link-pool", "a, b,c"]).unwrap();
        assert_eq!(config.link_pool.ids(), ["a", "b", "c"]);
    }

    #[test]
    fn content_format_and_log_format_parse() {
        let config = parse(&["--content-format", "plain", "--log-format", "json"]).unwrap();
        assert_eq!(config.content_format, ContentFormat::Plain);
        assert_eq!(config.log_format, LogFormat::Json);
        assert!(parse(&["--content-format", "markdown"]).is_err());
    }

    #[test]
    fn repeated_flags_keep_the_last_value() {
        let config = parse(&["--pacing-ms", "0", "--pacing-ms", "400"]).unwrap();
        assert_eq!(config.pacing, Duration::from_millis(400));
        assert_eq!(test_config(&["--pacing-ms", "25"]).pacing, Duration::from_millis(25));
    }

    #[test]
    fn pacing_strategy_parses() {
        let config = parse(&["--pacing-strategy", "yield"]).unwrap();
        assert_eq!(config.pacing_strategy, PacingStrategy::Yield);
        assert!(parse(&["--pacing-strategy", "spin"]).is_err());
    }

    #[test]
    fn empty_pool_entry_is_rejected() {
        let err = parse(&["--link-pool", "id1,,id3"]).unwrap_err();
        assert!(err.to_string().contains("LINK_POOL entry 2"));
    }

    #[test]
    fn zero_report_count_is_rejected() {
        let err = parse(&["--report-count", "0"]).unwrap_err();
        assert!(err.to_string().contains("REPORT_COUNT"));
    }

    #[test]
    fn zero_buffer_and_deadline_are_rejected() {
        assert!(parse(&["--stream-buffer-size", "0"]).is_err());
        assert!(parse(&["--stream-deadline-secs", "0"]).is_err());
        let config = parse(&["--stream-deadline-secs", "30"]).unwrap();
        assert_eq!(config.stream_deadline, Some(Duration::from_secs(30)));
    }
}
