use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, Subcommand};
use rtags_bridge::commands::{format_key_mappings, key_mappings, PluginCommand};
use rtags_bridge::config::Config;
use rtags_bridge::host::terminal::TerminalHost;
use rtags_bridge::host::{CursorPosition, EditorHost};
use rtags_bridge::services::tracing_setup;
use rtags_bridge::RtagsPlugin;
use std::path::PathBuf;

/// Run RTags editor operations from the shell
#[derive(Parser, Debug)]
#[command(name = "rtags-bridge")]
#[command(about = "Query the RTags daemon the way the editor plugin does", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Path to log file (default: system temp dir)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// rc binary to run, overriding the configuration
    #[arg(long, value_name = "PATH")]
    rc: Option<String>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    dump_schema: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Describe the symbol at FILE:LINE:COL
    Info { target: String },
    /// List references to the symbol at FILE:LINE:COL
    Refs { target: String },
    /// List references to every symbol named NAME
    RefsByName { name: String },
    /// List overrides of the virtual method at FILE:LINE:COL
    Virtuals { target: String },
    /// Print the definition of the symbol at FILE:LINE:COL
    Follow { target: String },
    /// Print the scope enclosing FILE:LINE:COL
    Parent { target: String },
    /// List subclasses of the class at FILE:LINE:COL
    Subclasses { target: String },
    /// List superclasses of the class at FILE:LINE:COL
    Superclasses { target: String },
    /// Print diagnostics for FILE
    Diagnose { file: PathBuf },
    /// List indexed projects and pick one
    Projects,
    /// Rename the symbol at FILE:LINE:COL
    Rename {
        target: String,
        new_name: String,
        /// Apply to every file without asking
        #[arg(long)]
        yes_to_all: bool,
    },
    /// Print completions at FILE:LINE:COL as JSON
    Complete {
        target: String,
        /// Prefix to complete; defaults to the word before the position
        #[arg(long)]
        base: Option<String>,
    },
    /// Print the key mappings the plugin registers
    Keymap,
}

/// `FILE:LINE:COL` with a 1-based column, as printed by compilers and rc
#[derive(Debug, Clone, PartialEq, Eq)]
struct Target {
    path: String,
    cursor: CursorPosition,
}

fn parse_target(target: &str) -> AnyhowResult<Target> {
    let mut parts = target.rsplitn(3, ':');
    let (Some(column), Some(line), Some(path)) = (parts.next(), parts.next(), parts.next())
    else {
        anyhow::bail!("Expected FILE:LINE:COL, got {:?}", target);
    };
    let line: usize = line
        .parse()
        .with_context(|| format!("Invalid line in {:?}", target))?;
    let column: usize = column
        .parse()
        .with_context(|| format!("Invalid column in {:?}", target))?;
    if line == 0 || column == 0 {
        anyhow::bail!("Line and column are 1-based in {:?}", target);
    }
    let path = std::fs::canonicalize(path)
        .with_context(|| format!("Failed to resolve {}", path))?
        .to_string_lossy()
        .into_owned();
    Ok(Target {
        path,
        cursor: CursorPosition::new(line, column - 1),
    })
}

fn load_config(args: &Args) -> AnyhowResult<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load_or_default(),
    };
    if let Some(rc) = &args.rc {
        config.rc_command = rc.clone();
    }
    Ok(config)
}

fn open_target(host: &mut TerminalHost, target: &str) -> AnyhowResult<()> {
    let target = parse_target(target)?;
    host.open_at(&target.path, target.cursor)
        .with_context(|| format!("Failed to open {}", target.path))
}

fn print_position(host: &TerminalHost) {
    let cursor = host.cursor();
    println!("{}:{}:{}", host.buffer_name(), cursor.line, cursor.column + 1);
}

/// Text between the completion start and the cursor; a cursor past the end of
/// the line takes the rest of the line
fn completion_base(line: &str, start: usize, column: usize) -> String {
    let end = column.min(line.len());
    line.get(start..end).unwrap_or_default().to_string()
}

fn run(args: Args, config: Config) -> AnyhowResult<()> {
    let Some(command) = args.command else {
        anyhow::bail!("No command given, see --help");
    };

    if matches!(command, Command::Keymap) {
        print!("{}", format_key_mappings(&key_mappings(&config)));
        return Ok(());
    }

    let plugin = RtagsPlugin::from_config(config).context("Failed to set up rc")?;
    let mut host = TerminalHost::new();

    match command {
        Command::Info { target } => {
            open_target(&mut host, &target)?;
            plugin.execute(PluginCommand::SymbolInfo, &mut host)?;
        }
        Command::Refs { target } => {
            open_target(&mut host, &target)?;
            plugin.execute(PluginCommand::FindReferences, &mut host)?;
        }
        Command::RefsByName { name } => {
            host.queue_answer(name);
            plugin.execute(PluginCommand::FindReferencesByName, &mut host)?;
        }
        Command::Virtuals { target } => {
            open_target(&mut host, &target)?;
            plugin.execute(PluginCommand::FindVirtuals, &mut host)?;
        }
        Command::Follow { target } => {
            open_target(&mut host, &target)?;
            plugin.execute(PluginCommand::FollowLocation, &mut host)?;
            print_position(&host);
        }
        Command::Parent { target } => {
            open_target(&mut host, &target)?;
            plugin.execute(PluginCommand::JumpToParent, &mut host)?;
            print_position(&host);
        }
        Command::Subclasses { target } => {
            open_target(&mut host, &target)?;
            plugin.execute(PluginCommand::FindSubclasses, &mut host)?;
        }
        Command::Superclasses { target } => {
            open_target(&mut host, &target)?;
            plugin.execute(PluginCommand::FindSuperclasses, &mut host)?;
        }
        Command::Diagnose { file } => {
            let path = std::fs::canonicalize(&file)
                .with_context(|| format!("Failed to resolve {}", file.display()))?;
            let path = path.to_string_lossy();
            host.open_at(&path, CursorPosition::new(1, 0))
                .with_context(|| format!("Failed to open {}", path))?;
            plugin.execute(PluginCommand::Diagnose, &mut host)?;
        }
        Command::Projects => {
            plugin.execute(PluginCommand::ListProjects, &mut host)?;
        }
        Command::Rename {
            target,
            new_name,
            yes_to_all,
        } => {
            open_target(&mut host, &target)?;
            host.queue_answer(new_name);
            if yes_to_all {
                host.queue_answer("a");
            }
            let outcome = plugin.rename_symbol(&mut host)?;
            println!(
                "Renamed {} occurrences in {} files{}",
                outcome.edits_applied,
                outcome.files_renamed,
                if outcome.cancelled { ", cancelled" } else { "" }
            );
        }
        Command::Complete { target, base } => {
            open_target(&mut host, &target)?;
            let base = match base {
                Some(base) => base,
                None => {
                    let cursor = host.cursor();
                    let start = plugin.complete_find_start(&host);
                    let line = host
                        .buffer_lines()
                        .get(cursor.line - 1)
                        .cloned()
                        .unwrap_or_default();
                    let base = completion_base(&line, start, cursor.column);
                    host.set_cursor(CursorPosition::new(cursor.line, start))?;
                    base
                }
            };
            let result = plugin.complete(&host, &base)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Keymap => {}
    }
    Ok(())
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    if args.dump_schema {
        println!("{}", serde_json::to_string_pretty(&Config::json_schema())?);
        return Ok(());
    }

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(tracing_setup::default_log_path);
    tracing_setup::init_global(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    tracing::info!("rtags-bridge starting");

    let config = load_config(&args)?;
    if args.dump_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    run(args, config)
}
