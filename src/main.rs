//! pada-detect - Leg-based person detection daemon
//!
//! Receives laser scans over UDP, detects people from leg clusters and
//! publishes markers, a text summary, a people list and tracker measurements
//! as length-prefixed UDP datagrams.
//!
//! # Usage
//!
//! ```bash
//! # With default config (pada-detect.toml, then /etc/pada-detect.toml)
//! cargo run --release
//!
//! # With custom config file and model override
//! cargo run --release -- --config site.toml --model models/leg_model.toml
//! ```

use std::io::Write;
use std::net::{SocketAddr, ToSocketAddrs, UdpSocket};
use std::path::PathBuf;

use clap::Parser;

use pada_detect::config::AppConfig;
use pada_detect::error::{Error, Result};
use pada_detect::io::{MessageSink, Serializer, UdpScanReceiver, UdpSink};
use pada_detect::utils::setup_ctrl_c_handler;
use pada_detect::{
    DetectionAdapter, FanoutSinks, FrameDriver, PersonAggregator, PublicationFanout,
    ScanSanitizer,
};

#[derive(Parser, Debug)]
#[command(name = "pada-detect")]
#[command(about = "Leg-based person detection daemon for 2D laser scans")]
struct Args {
    /// Configuration file (default: pada-detect.toml, then /etc/pada-detect.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Detection model file (overrides detector.model_file)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Log level (overrides logging.level)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {} - {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn resolve_target(address: &str) -> Result<SocketAddr> {
    address
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| Error::Other(format!("No address for publication target '{}'", address)))
}

fn build_sinks(config: &AppConfig) -> Result<FanoutSinks> {
    let target = resolve_target(&config.publication.target_address)?;
    let serializer = Serializer::new(config.publication.wire_format);
    let socket = UdpSocket::bind(if target.is_ipv4() {
        "0.0.0.0:0"
    } else {
        "[::]:0"
    })?;

    let sink = |topic: &str| -> Result<Box<dyn MessageSink>> {
        Ok(Box::new(UdpSink::with_socket(
            topic,
            socket.try_clone()?,
            target,
            serializer,
        )))
    };

    let topics = &config.topics;
    let scan_markers = if config.publication.visualize_scan {
        Some(sink(topics.scan_markers.as_str())?)
    } else {
        None
    };

    Ok(FanoutSinks {
        marker: sink(topics.marker.as_str())?,
        text: sink(topics.text.as_str())?,
        people: sink(topics.people.as_str())?,
        measurements: sink(topics.measurements.as_str())?,
        scan_markers,
    })
}

fn main() -> Result<()> {
    let args = Args::parse();

    let loaded = AppConfig::load(args.config.as_deref());
    let level = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|(c, _)| c.logging.level.clone()))
        .unwrap_or_else(|| "info".to_string());
    init_logging(&level);

    let (mut config, config_path) = loaded.inspect_err(|e| {
        log::error!("Failed to load configuration: {}", e);
    })?;
    if let Some(model) = args.model {
        config.detector.model_file = model;
    }

    log::info!("pada-detect starting");
    match &config_path {
        Some(path) => log::info!("  Config: {}", path.display()),
        None => log::info!("  Config: built-in defaults"),
    }
    log::info!(
        "  Scans: udp://{} ({:?})",
        config.source.bind_address,
        config.source.wire_format
    );
    log::info!(
        "  Output: udp://{} ({:?}, frame {})",
        config.publication.target_address,
        config.publication.wire_format,
        config.publication.frame_id
    );

    // Without a model nothing downstream is meaningful; fail before binding
    let adapter = DetectionAdapter::initialize(config.detector.clone()).inspect_err(|e| {
        log::error!("{}", e);
    })?;

    let fanout = PublicationFanout::new(build_sinks(&config)?, &config.publication);
    let mut source = UdpScanReceiver::bind(
        &config.source.bind_address,
        Serializer::new(config.source.wire_format),
    )?;

    let running = setup_ctrl_c_handler()?;

    let mut driver = FrameDriver::new(
        ScanSanitizer::new(config.sanitizer.seed),
        adapter,
        PersonAggregator::new(),
        fanout,
    )
    .with_poll_timeout(config.source.poll_timeout());

    if let Err(e) = driver.run(&mut source, &running) {
        log::error!("Daemon error: {}", e);
        return Err(e);
    }

    log::info!("pada-detect shutdown complete");
    Ok(())
}
