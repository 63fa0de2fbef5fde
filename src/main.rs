use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use clap::{Parser, Subcommand};
use tracing::{debug, info, warn};

use padmap::codec::bits::read_field;
use padmap::config as cfg;
use padmap::files;
use padmap::profile::{self, ActionId, ButtonId, Profile};
use padmap::session::Session;
use padmap::utils::{display_label, format_field, hex_bytes};

/// Padmap CLI
#[derive(Debug, Parser)]
#[command(
    name = padmap::PKG_NAME,
    version = padmap::PKG_VERSION,
    about = "Inspect and edit the button mapping of a binary gamepad configuration file"
)]
struct Args {
    /// Device profile (offset and action tables) to use
    #[arg(short = 'p', long = "profile", global = true, default_value = profile::DEFAULT_PROFILE)]
    profile: String,

    /// Set log level (e.g., trace, debug, info, warn, error). Overrides RUST_LOG.
    #[arg(long = "log-level", global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print every button field with its raw value and decoded actions
    Show {
        /// Binary configuration file
        file: PathBuf,
    },

    /// Write the decoded mapping as a JSON edit document
    Decode {
        /// Binary configuration file
        file: PathBuf,
        /// Output path for the document (stdout when omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Apply a JSON edit document onto a binary configuration file
    Encode {
        /// Binary configuration file the document is merged onto
        file: PathBuf,
        /// JSON edit document
        #[arg(short = 'd', long = "doc")]
        doc: PathBuf,
        /// Output path (rewrites FILE in place when omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Enable one action on one button
    Set {
        file: PathBuf,
        /// Button label, e.g. "A" or "UP DPAD"
        button: String,
        /// Action label, e.g. "LB_BUTTON"
        action: String,
        /// Output path (rewrites FILE in place when omitted)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// Disable one action on one button
    Unset {
        file: PathBuf,
        button: String,
        action: String,
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },

    /// List built-in device profiles and their tables
    Profiles,

    /// Print the JSON Schema of the edit document and exit
    Schema,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    padmap::init_tracing(args.log_level.as_deref());
    if let Some(level) = &args.log_level {
        if padmap::parse_level(level).is_none() {
            warn!(%level, "Unknown log level; using default");
        }
    }
    debug!(
        version = padmap::PKG_VERSION,
        profile = %args.profile,
        "Starting Padmap"
    );

    match args.command {
        Command::Profiles => print_profiles(),
        Command::Schema => {
            let stdout = std::io::stdout();
            cfg::write_schema_to_writer(stdout.lock())?;
            println!();
            Ok(())
        }
        Command::Show { file } => {
            let profile = cfg::profile_by_name(&args.profile)?;
            let session = open_session(&file, profile).await?;
            print_session(&session)
        }
        Command::Decode { file, output } => {
            let profile = cfg::profile_by_name(&args.profile)?;
            let session = open_session(&file, profile).await?;
            let doc = session.to_document();
            match output {
                Some(path) => {
                    let mut buf = Vec::new();
                    cfg::write_to_writer(&doc, &mut buf)?;
                    tokio::fs::write(&path, buf).await.with_context(|| {
                        format!("Failed to write edit document {}", path.display())
                    })?;
                    info!(path = %path.display(), "Wrote edit document");
                }
                None => cfg::write_to_writer(&doc, std::io::stdout().lock())?,
            }
            Ok(())
        }
        Command::Encode { file, doc, output } => {
            let document = cfg::load_from_path_async(&doc).await?;
            let profile = cfg::document_profile(&document)?;
            if !profile.name.eq_ignore_ascii_case(args.profile.trim()) {
                info!(
                    requested = %args.profile,
                    document = profile.name,
                    "Using the profile named by the edit document"
                );
            }
            let mut session = open_session(&file, profile).await?;
            session.apply_document(&document)?;
            save(&session, output.as_deref().unwrap_or(file.as_path())).await
        }
        Command::Set {
            file,
            button,
            action,
            output,
        } => {
            let profile = cfg::profile_by_name(&args.profile)?;
            toggle(&file, profile, &button, &action, true, output.as_deref()).await
        }
        Command::Unset {
            file,
            button,
            action,
            output,
        } => {
            let profile = cfg::profile_by_name(&args.profile)?;
            toggle(&file, profile, &button, &action, false, output.as_deref()).await
        }
    }
}

async fn open_session<'p>(path: &Path, profile: &'p Profile) -> anyhow::Result<Session<'p>> {
    let bytes = files::read_buffer(path).await?;
    if bytes.len() < profile.min_len() {
        warn!(
            path = %path.display(), len = bytes.len(), expected = profile.min_len(),
            "File is shorter than the profile layout; missing fields decode as empty"
        );
    }
    Ok(Session::open(bytes, files::file_name_of(path), profile))
}

async fn toggle(
    file: &Path,
    profile: &'static Profile,
    button: &str,
    action: &str,
    enabled: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let button_id: ButtonId = profile
        .resolve_button(button)
        .ok_or_else(|| anyhow!("Button '{button}' is not mapped by profile '{}'", profile.name))?;
    let action_id: ActionId = profile
        .resolve_action(action)
        .ok_or_else(|| anyhow!("Action '{action}' is not defined by profile '{}'", profile.name))?;

    let mut session = open_session(file, profile).await?;
    let changed = session.set_action(button_id, action_id, enabled)?;
    match output {
        Some(path) => save(&session, path).await,
        None if !changed => {
            info!(
                button = %button_id, action = %action_id, enabled,
                "Mapping already in requested state; file left unchanged"
            );
            Ok(())
        }
        None => save(&session, file).await,
    }
}

async fn save(session: &Session<'_>, path: &Path) -> anyhow::Result<()> {
    let bytes = session
        .export()
        .with_context(|| format!("Cannot export {}", session.file_name()))?;
    files::write_buffer(path, &bytes).await?;
    info!(path = %path.display(), dirty = session.is_dirty(), "Saved configuration");
    Ok(())
}

fn print_session(session: &Session<'_>) -> anyhow::Result<()> {
    let profile = session.profile();
    let original = session.original();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "{} ({} bytes, profile {})",
        session.file_name(),
        original.len(),
        profile.name
    )?;
    for slot in profile.buttons {
        let raw = read_field(original, slot.offset)
            .map(|v| format!("{} [{}]", format_field(v), hex_bytes(&v.to_be_bytes())))
            .unwrap_or_else(|| "<missing>".to_string());
        let actions: Vec<_> = session
            .actions(slot.button)
            .iter()
            .map(|a| display_label(profile.action_label(*a)))
            .collect();
        let note = if slot.verified { "" } else { " (not tested)" };
        writeln!(
            out,
            "  {:<11} 0x{:02X}  {}  {}{}",
            slot.button.label(),
            slot.offset,
            raw,
            if actions.is_empty() {
                "-".to_string()
            } else {
                actions.join(", ")
            },
            note
        )?;
    }
    for d in session.diagnostics() {
        writeln!(out, "warning: {d}")?;
    }
    Ok(())
}

fn print_profiles() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for p in profile::BUILTIN {
        writeln!(out, "{}: {}", p.name, p.description)?;
        writeln!(out, "  buttons:")?;
        for slot in p.buttons {
            let note = if slot.verified { "" } else { " (not tested)" };
            writeln!(out, "    {:<11} 0x{:02X}{}", slot.button.label(), slot.offset, note)?;
        }
        writeln!(out, "  actions:")?;
        for a in p.actions {
            writeln!(out, "    {:<12} {}", a.label, format_field(a.flag))?;
        }
    }
    Ok(())
}
