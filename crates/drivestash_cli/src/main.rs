//! CLI entry point.
//!
//! # Responsibility
//! - Parse overrides for the hard-coded demo configuration.
//! - Wire the OS volume source and the chosen store backend into the demo.
//! - Map store failures to a non-zero exit code.

use clap::Parser;
use drivestash_core::{
    default_log_level, init_logging, run_demo, AppConfig, InMemoryBackend, KvBackend,
    RecordStore, RedisBackend, SystemVolumeSource, VolumeResolver,
};
use std::process;

#[derive(Parser)]
#[command(name = "drivestash")]
#[command(version)]
#[command(about = "Find an external drive by label and round-trip a record through Redis", long_about = None)]
struct Cli {
    /// Volume label of the external drive to look for
    #[arg(short, long)]
    label: Option<String>,
    /// Key-value store endpoint
    #[arg(short, long, value_name = "URL")]
    store_url: Option<String>,
    /// Namespace prepended to record keys
    #[arg(long)]
    namespace: Option<String>,
    /// Logical key of the sample record
    #[arg(long)]
    record_id: Option<String>,
    /// Sample record `name` field
    #[arg(long)]
    name: Option<String>,
    /// Sample record `email` field
    #[arg(long)]
    email: Option<String>,
    /// Use a process-local store instead of Redis
    #[arg(long)]
    in_memory: bool,
    /// Print a JSON summary instead of progress lines
    #[arg(long)]
    json: bool,
    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
    /// Absolute directory for rotating log files (stderr when omitted)
    #[arg(long)]
    log_dir: Option<String>,
}

impl Cli {
    fn config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        if let Some(label) = &self.label {
            config.drive_label = label.clone();
        }
        if let Some(url) = &self.store_url {
            config.store_url = url.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.key_namespace = namespace.clone();
        }
        if let Some(record_id) = &self.record_id {
            config.record_id = record_id.clone();
        }
        if let Some(name) = &self.name {
            config.sample_fields.insert("name".to_string(), name.clone());
        }
        if let Some(email) = &self.email {
            config.sample_fields.insert("email".to_string(), email.clone());
        }
        config
    }

    fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or_else(|| default_log_level())
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.log_level(), cli.log_dir.as_deref()) {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let config = cli.config();
    if let Err(e) = config.validate() {
        eprintln!("Error: {e}");
        process::exit(1);
    }

    let backend: Box<dyn KvBackend> = if cli.in_memory {
        log::info!("event=cli_backend module=cli status=ok backend=memory");
        Box::new(InMemoryBackend::new())
    } else {
        match RedisBackend::new(&config.store_url) {
            Ok(backend) => Box::new(backend),
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    };

    if let Err(e) = run(&cli, &config, backend) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(cli: &Cli, config: &AppConfig, backend: Box<dyn KvBackend>) -> Result<(), String> {
    let resolver = VolumeResolver::new(SystemVolumeSource::new());
    let store = RecordStore::with_namespace(backend, config.key_namespace.as_str())
        .map_err(|err| err.to_string())?;

    if cli.json {
        let report = run_demo(config, &resolver, &store, &mut std::io::sink())
            .map_err(|err| err.to_string())?;
        let json = serde_json::to_string_pretty(&report).map_err(|err| err.to_string())?;
        println!("{json}");
    } else {
        let stdout = std::io::stdout();
        run_demo(config, &resolver, &store, &mut stdout.lock()).map_err(|err| err.to_string())?;
    }
    Ok(())
}
