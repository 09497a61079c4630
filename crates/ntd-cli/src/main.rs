use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use ntd_core::{local_time, Audit, Scan, ScanId};
use ntd_store::{Client, Store};

#[derive(Parser)]
#[command(name = "ntd", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create .ntd/ with default config and an empty session db
    Init,

    /// Show the persisted session and API settings
    Session,

    /// Store a bearer token for later requests
    Login {
        #[arg(long)]
        token: String,
    },

    /// Forget the stored token
    Logout,

    /// Record the answer to the usage policy prompt
    AcceptPolicy {
        #[arg(default_value = "true")]
        value: String,
    },

    /// Render an audit JSON file, optionally applying scan updates first
    Audit {
        file: PathBuf,
        /// Scan JSON files to apply with updateScan, in order
        #[arg(long)]
        update: Vec<PathBuf>,
        /// Select one scan of the audit and show its status
        #[arg(long)]
        scan: Option<String>,
    },

    /// Print the display status of a scan JSON file
    Classify { file: PathBuf },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Init => "init",
            Command::Session => "session",
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::AcceptPolicy { .. } => "accept-policy",
            Command::Audit { .. } => "audit",
            Command::Classify { .. } => "classify",
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cli = Cli::parse();
    let root = std::env::current_dir()?;
    debug!(cmd = cli.cmd.name(), "running");

    match cli.cmd {
        Command::Init => {
            let db = Client::init_dir(&root)?;
            println!("Initialized ntd in {} (session db {})", root.display(), db.display());
        }
        Command::Session => {
            let c = Client::open(root)?;
            let state = c.store.state();
            println!("API endpoint: {} (timeout {} ms)", state.api_endpoint, state.api_timeout_ms);
            if let Some(ip) = &state.source_ip_address {
                println!("Scans originate from: {ip}");
            }
            println!("Signed in: {}", if state.is_authenticated() { "yes" } else { "no" });
            println!("Policy accepted: {}", if state.is_policy_accepted { "yes" } else { "no" });
        }
        Command::Login { token } => {
            let mut c = Client::open(root)?;
            c.store.set_token(Some(token))?;
            println!("Token saved");
        }
        Command::Logout => {
            let mut c = Client::open(root)?;
            c.store.forget_token()?;
            println!("Token removed");
        }
        Command::AcceptPolicy { value } => {
            let mut c = Client::open(root)?;
            c.store.set_is_policy_accepted(value)?;
            let accepted = c.store.state().is_policy_accepted;
            println!("Policy accepted: {}", if accepted { "yes" } else { "no" });
        }
        Command::Audit { file, update, scan } => {
            let mut c = Client::open(root)?;
            let audit: Audit = read_json(&file)?;
            let uuid = audit.uuid.clone();
            c.store.set_current_audit(audit)?;
            c.store.set_current_audit_uuid(uuid)?;
            for path in &update {
                let scan: Scan = read_json(path)?;
                c.store.update_scan(scan)?;
            }
            if let Some(uuid) = scan {
                select_scan(&mut c.store, ScanId::from_str(uuid))?;
            }
            render_audit(&c.store);
        }
        Command::Classify { file } => {
            let scan: Scan = read_json(&file)?;
            println!("{}", scan.status());
        }
    }

    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

fn select_scan(store: &mut Store, uuid: ScanId) -> Result<()> {
    let scan = store
        .state()
        .current_audit
        .scan(&uuid)
        .cloned()
        .with_context(|| format!("no scan {uuid} in this audit"))?;
    store.set_current_scan(scan)?;
    store.set_current_scan_uuid(uuid)?;
    Ok(())
}

fn render_audit(store: &Store) {
    let state = store.state();
    let audit = &state.current_audit;
    println!("Audit {} {}", state.current_audit_uuid, audit.name);
    println!("Scans: {}", audit.scans.len());
    for scan in &audit.scans {
        let when = scan
            .ended_at()
            .or(scan.started_at())
            .or(scan.scheduled_at())
            .map(display_time)
            .unwrap_or_default();
        println!("- {} [{}] {} {}", scan.uuid, scan.status(), scan.target, when);
    }
    if !state.current_scan_uuid.is_empty() {
        println!("Selected scan {} [{}]", state.current_scan_uuid, state.current_scan_status());
    }
}

fn display_time(utc: &str) -> String {
    match local_time(utc) {
        Ok(t) => t.format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => utc.to_string(),
    }
}
