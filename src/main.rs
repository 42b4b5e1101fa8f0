//! toolbelt - Entry Point

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use toolbelt::config::{resolve_settings, CliOverrides, Settings};
use toolbelt::integration::{self, ConvertInput, ConvertOp, ConvertOutcome, PromptHost};
use toolbelt::model::{AppError, Axis, OutputUnit};
use toolbelt::scripts::WorkspaceMode;
use toolbelt::source::EnvFile;
use toolbelt::state::{default_state_path, LastUsed, StateStore};
use toolbelt::terminal::Prepared;
use tracing::info;

/// Unit conversion, env block switching and project commands for editors
#[derive(Parser, Debug)]
#[command(name = "toolbelt")]
#[command(version)]
#[command(about = "Unit conversion, env block switching and project commands for editors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Reference screen for this run (WIDTHxHEIGHT)
    #[arg(long, global = true)]
    pub screen: Option<String>,

    /// Decimal digits of converted values (0-8)
    #[arg(long, global = true)]
    pub precision: Option<i32>,

    /// Pixels per rem
    #[arg(long, global = true)]
    pub base_font_size: Option<f64>,

    /// Env file, absolute or relative to the workspace
    #[arg(long, global = true)]
    pub env_file: Option<String>,

    /// Debug logging for this crate (unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert CSS values at a cursor or in a selection
    Convert {
        #[command(subcommand)]
        action: ConvertAction,
    },
    /// Reference screens
    Screen {
        #[command(subcommand)]
        action: ScreenAction,
    },
    /// Env file blocks
    Env {
        #[command(subcommand)]
        action: EnvAction,
    },
    /// List package.json scripts with the command that runs each
    Scripts {
        #[command(flatten)]
        args: ScriptsArgs,
    },
    /// Custom terminal commands
    Command {
        #[command(subcommand)]
        action: CommandAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConvertAction {
    /// px/rem to vw/vh
    ToViewport {
        #[command(flatten)]
        target: TargetArgs,
        /// Axis unit; guessed from the line when omitted
        #[arg(long, value_enum)]
        axis: Option<AxisArg>,
    },
    /// vw/vh/vmin/... to px or rem
    FromViewport {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },
    /// Toggle px/rem and the axis unit
    CycleAxis {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, value_enum)]
        axis: AxisArg,
    },
    /// Step a Tailwind value: spacing step, [px], [rem]
    Tailwind {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Conversions available at the cursor
    Actions {
        #[arg(long)]
        line: String,
        #[arg(long)]
        column: usize,
    },
}

/// Cursor (`--line` and `--column`) or selection (`--selection`).
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Line text; with --selection only used to guess the axis
    #[arg(long)]
    pub line: Option<String>,

    /// Cursor position as a character column of --line
    #[arg(long, requires = "line", conflicts_with = "selection")]
    pub column: Option<usize>,

    /// Selected text
    #[arg(long)]
    pub selection: Option<String>,
}

impl TargetArgs {
    fn into_input(self) -> Result<ConvertInput, AppError> {
        match (self.selection, self.line, self.column) {
            (Some(text), line, _) => Ok(ConvertInput::Selection { text, line }),
            (None, Some(line), Some(column)) => Ok(ConvertInput::Cursor { line, column }),
            _ => Err(AppError::Usage(
                "expected --line with --column, or --selection".to_string(),
            )),
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisArg {
    Vw,
    Vh,
}

impl From<AxisArg> for Axis {
    fn from(arg: AxisArg) -> Self {
        match arg {
            AxisArg::Vw => Axis::Vw,
            AxisArg::Vh => Axis::Vh,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitArg {
    Px,
    Rem,
}

impl From<UnitArg> for OutputUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Px => OutputUnit::Px,
            UnitArg::Rem => OutputUnit::Rem,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModeArg {
    First,
    All,
    Pick,
}

impl From<ModeArg> for WorkspaceMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::First => WorkspaceMode::First,
            ModeArg::All => WorkspaceMode::All,
            ModeArg::Pick => WorkspaceMode::Pick,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ScreenAction {
    /// Switch to the next configured screen
    Next,
    /// Configured screens, last used first
    List,
    /// Status label of the active screen
    Status,
}

#[derive(Args, Debug)]
pub struct WorkspaceArg {
    /// Workspace root (defaults to the current directory)
    #[arg(long)]
    pub workspace: Option<PathBuf>,
}

impl WorkspaceArg {
    fn resolve(self) -> Result<PathBuf, AppError> {
        match self.workspace {
            Some(path) => Ok(path),
            None => Ok(std::env::current_dir()?),
        }
    }
}

#[derive(Args, Debug)]
pub struct ScriptsArgs {
    /// Workspace folder, repeat for a multi-root workspace (defaults to the
    /// current directory)
    #[arg(long = "workspace")]
    pub workspaces: Vec<PathBuf>,
    /// How several folders are combined (overrides `scripts.workspace_mode`)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,
}

#[derive(Args, Debug)]
pub struct EnvFileArgs {
    /// Env file, overriding the configured one
    #[arg(long)]
    pub file: Option<String>,

    #[command(flatten)]
    pub workspace: WorkspaceArg,
}

#[derive(Subcommand, Debug)]
pub enum EnvAction {
    /// Active block in status-bar form
    Status {
        #[command(flatten)]
        file: EnvFileArgs,
    },
    /// Every block, active one marked
    List {
        #[command(flatten)]
        file: EnvFileArgs,
    },
    /// Activate a block
    Switch {
        name: String,
        #[command(flatten)]
        file: EnvFileArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum CommandAction {
    /// Commands configured for this platform
    List,
    /// Resolve a command's placeholders, prompting on stdin
    Render {
        title: String,
        #[command(flatten)]
        workspace: WorkspaceArg,
    },
    /// Recently rendered commands, newest first
    History,
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Terminal(io::Error::new(io::ErrorKind::InvalidData, e)))?;
    println!("{text}");
    Ok(())
}

fn print_convert(outcome: &ConvertOutcome, json: bool) -> Result<(), AppError> {
    if json {
        return print_json(outcome);
    }
    println!("{}", outcome.text);
    Ok(())
}

fn env_file(
    settings: &Settings,
    args: EnvFileArgs,
) -> Result<EnvFile, AppError> {
    let workspace = args.workspace.resolve()?;
    Ok(integration::env_file(
        settings,
        args.file.as_deref(),
        Some(&workspace),
    )?)
}

fn run(cli: Cli, settings: &Settings, store: &StateStore) -> Result<(), AppError> {
    let json = cli.json;
    let mut state: LastUsed = store.load()?;

    match cli.command {
        Command::Convert { action } => {
            let (op, target) = match action {
                ConvertAction::Actions { line, column } => {
                    let actions = integration::actions(&line, column);
                    if json {
                        return print_json(&actions);
                    }
                    for action in actions {
                        println!("{}", action.title());
                    }
                    return Ok(());
                }
                ConvertAction::ToViewport { target, axis } => (
                    ConvertOp::ToViewport {
                        axis: axis.map(Axis::from),
                    },
                    target,
                ),
                ConvertAction::FromViewport { target, unit } => (
                    ConvertOp::FromViewport {
                        unit: unit.map(OutputUnit::from),
                    },
                    target,
                ),
                ConvertAction::CycleAxis { target, axis } => (
                    ConvertOp::CycleAxis { axis: axis.into() },
                    target,
                ),
                ConvertAction::Tailwind { target } => (ConvertOp::Tailwind, target),
            };
            let input = target.into_input()?;
            let outcome = integration::convert(settings, &mut state, op, &input)?;
            store.save(&state)?;
            print_convert(&outcome, json)
        }
        Command::Screen { action } => match action {
            ScreenAction::Next => {
                let screen = integration::screen_next(settings, &mut state)?;
                store.save(&state)?;
                let label = integration::screen_status(settings, &state)?;
                if json {
                    return print_json(&serde_json::json!({
                        "screen": screen.to_string(),
                        "label": label,
                    }));
                }
                println!("{label}");
                Ok(())
            }
            ScreenAction::List => {
                let screens: Vec<String> = integration::screen_list(settings, &state)
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                if json {
                    return print_json(&screens);
                }
                for screen in screens {
                    println!("{screen}");
                }
                Ok(())
            }
            ScreenAction::Status => {
                let label = integration::screen_status(settings, &state)?;
                if json {
                    return print_json(&serde_json::json!({ "label": label }));
                }
                println!("{label}");
                Ok(())
            }
        },
        Command::Env { action } => match action {
            EnvAction::Status { file } => {
                let workspace = file.workspace.resolve()?;
                let status = integration::env_status(integration::env_file(
                    settings,
                    file.file.as_deref(),
                    Some(&workspace),
                ));
                if json {
                    return print_json(&status);
                }
                println!("{}", status.status);
                if let Some(tooltip) = &status.tooltip {
                    println!("{tooltip}");
                }
                Ok(())
            }
            EnvAction::List { file } => {
                let summary = integration::env_list(&env_file(settings, file)?)?;
                if json {
                    return print_json(&summary);
                }
                for name in &summary.blocks {
                    let marker = if summary.is_active(name) { "*" } else { " " };
                    println!("{marker} {name}");
                }
                Ok(())
            }
            EnvAction::Switch { name, file } => {
                let report = integration::env_switch(&env_file(settings, file)?, &name)?;
                if json {
                    return print_json(&report);
                }
                println!("{}", report.message(&name));
                Ok(())
            }
        },
        Command::Scripts { args } => {
            let roots = if args.workspaces.is_empty() {
                vec![std::env::current_dir()?]
            } else {
                args.workspaces
            };
            let mode = args.mode.map(Into::into).unwrap_or(settings.workspace_mode);
            let report = integration::scripts(settings, &roots, mode)?;
            if json {
                return print_json(&report);
            }
            for script in report.iter() {
                for variant in &script.variants {
                    if report.folders > 1 {
                        println!("{}\t{}\t{}", script.name, variant.run, variant.folder.display());
                    } else {
                        println!("{}\t{}", script.name, variant.run);
                    }
                }
            }
            Ok(())
        }
        Command::Command { action } => match action {
            CommandAction::List => {
                let commands = integration::command_list(settings);
                if json {
                    return print_json(&commands);
                }
                for command in commands {
                    println!("{}\t{}", command.title, command.command);
                }
                Ok(())
            }
            CommandAction::Render { title, workspace } => {
                let root = workspace.resolve()?;
                let stdin = io::stdin();
                let mut host = PromptHost::new(stdin.lock(), io::stderr(), Some(root));
                let rendered = integration::command_render(
                    settings,
                    &mut state,
                    &title,
                    &mut host,
                    chrono::Utc::now(),
                )?;
                store.save(&state)?;
                if json {
                    return print_json(&rendered);
                }
                match &rendered.prepared {
                    Prepared::Run { command, .. } => println!("{command}"),
                    Prepared::Snippet { head, tail } => {
                        println!("{head}{tail}")
                    }
                }
                if rendered.confirm {
                    eprintln!("warning: this command can discard work; confirm before running");
                }
                Ok(())
            }
            CommandAction::History => {
                if json {
                    return print_json(&state.history);
                }
                for entry in state.history.entries() {
                    println!("{}\t{}\t{}", entry.at.to_rfc3339(), entry.title, entry.command);
                }
                Ok(())
            }
        },
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let settings = resolve_settings(
        cli.config.clone(),
        CliOverrides {
            screen: cli.screen.clone(),
            precision: cli.precision,
            base_font_size: cli.base_font_size,
            env_file: cli.env_file.clone(),
        },
    )?;

    toolbelt::logging::init(&settings.log_file_path, cli.verbose)?;
    info!(settings = ?settings, "Configuration loaded and resolved");

    let store = StateStore::new(default_state_path());
    run(cli, &settings, &store)?;
    Ok(())
}
