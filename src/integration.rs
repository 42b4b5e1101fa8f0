//! Operations of the command-line host.
//!
//! Each function runs one operation end to end: settings and remembered
//! state in, engine call, printable or serializable outcome out. Reading and
//! saving the state file and printing are left to `main`, so everything here
//! is testable with in-memory values and temporary files.

use crate::config::Settings;
use crate::convert::{
    available_actions, next_screen, order_screens, plan_axis_cycle, plan_from_viewport,
    plan_tailwind_cycle, plan_to_viewport, resolve_axis, status_label, CodeAction,
    ConversionContext, Replacement, Target,
};
use crate::env::EnvSummary;
use crate::model::error::{AppError, ConversionError, InputError};
use crate::model::{Axis, OutputUnit, Screen};
use crate::scripts::{collect_scripts, WorkspaceFolder, WorkspaceMode, WorkspaceScript};
use crate::source::{resolve_env_path, EnvFile, SwitchReport};
use crate::state::{LastCommand, LastUsed};
use crate::terminal::{current_platform, CustomCommand, PlaceholderHost, Prepared};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

// ===== Columns =====

/// Byte offset of character `column` in `text`, clamped to the end.
pub fn char_to_byte(text: &str, column: usize) -> usize {
    text.char_indices()
        .nth(column)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Character column of byte `offset` in `text`.
pub fn byte_to_char(text: &str, offset: usize) -> usize {
    text.char_indices().take_while(|(i, _)| *i < offset).count()
}

// ===== Screens =====

/// Screen conversions run against.
///
/// An explicit `--screen`/`TOOLBELT_SCREEN` wins; otherwise the last used
/// screen if it is still configured, otherwise the first configured one.
///
/// # Errors
///
/// `ConversionError::UnknownScreen` when the explicit screen is not in the
/// configured list.
pub fn active_screen(settings: &Settings, state: &LastUsed) -> Result<Screen, ConversionError> {
    if let Some(screen) = settings.screen_override {
        if !settings.screens.contains(&screen) {
            return Err(ConversionError::UnknownScreen(screen.to_string()));
        }
        return Ok(screen);
    }
    order_screens(&settings.screens, state.screen())
        .first()
        .copied()
        .ok_or(ConversionError::NoScreens)
}

/// Configured screens, last used first.
pub fn screen_list(settings: &Settings, state: &LastUsed) -> Vec<Screen> {
    order_screens(&settings.screens, state.screen())
}

/// Status label for the active screen.
pub fn screen_status(settings: &Settings, state: &LastUsed) -> Result<String, ConversionError> {
    let screen = active_screen(settings, state)?;
    Ok(status_label(&screen, settings.base_font_size, settings.precision))
}

/// Advance the remembered screen and return it.
pub fn screen_next(settings: &Settings, state: &mut LastUsed) -> Result<Screen, ConversionError> {
    let screen =
        next_screen(&settings.screens, state.screen()).ok_or(ConversionError::NoScreens)?;
    state.set_screen(screen);
    info!(screen = %screen, "screen selected");
    Ok(screen)
}

// ===== Conversions =====

/// What a `convert` subcommand applies to. Columns are character columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertInput {
    Cursor { line: String, column: usize },
    /// `line` is the selection's source line, used for the axis guess.
    Selection { text: String, line: Option<String> },
}

impl ConvertInput {
    fn source(&self) -> &str {
        match self {
            ConvertInput::Cursor { line, .. } => line,
            ConvertInput::Selection { text, .. } => text,
        }
    }

    /// Line the axis is guessed from.
    fn axis_line(&self) -> &str {
        match self {
            ConvertInput::Cursor { line, .. } => line,
            ConvertInput::Selection { text, line } => line.as_deref().unwrap_or(text),
        }
    }

    fn target(&self) -> Target<'_> {
        match self {
            ConvertInput::Cursor { line, column } => Target::Cursor {
                line,
                column: char_to_byte(line, *column),
            },
            ConvertInput::Selection { text, .. } => Target::Selection { text },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOp {
    ToViewport { axis: Option<Axis> },
    FromViewport { unit: Option<OutputUnit> },
    CycleAxis { axis: Axis },
    Tailwind,
}

/// Result of a conversion: the rewritten text and the edits that made it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvertOutcome {
    /// Line or selection after every edit.
    pub text: String,
    /// Edits in reverse source order, ranges in character columns.
    pub edits: Vec<Replacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis: Option<Axis>,
    /// `WIDTHxHEIGHT` the conversion used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
}

impl ConvertOutcome {
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }
}

fn context(
    settings: &Settings,
    state: &LastUsed,
    axis: Axis,
) -> Result<ConversionContext, ConversionError> {
    Ok(ConversionContext {
        screen: active_screen(settings, state)?,
        axis,
        base_font_size: settings.base_font_size,
        precision: settings.precision,
    })
}

/// Run one conversion. An explicitly chosen axis is remembered in `state`.
///
/// # Errors
///
/// Converter configuration errors only; finding nothing to convert is an
/// outcome with no edits.
pub fn convert(
    settings: &Settings,
    state: &mut LastUsed,
    op: ConvertOp,
    input: &ConvertInput,
) -> Result<ConvertOutcome, ConversionError> {
    let fallback = state.axis.unwrap_or(settings.default_axis);
    let target = input.target();

    let (edits, axis, screen) = match op {
        ConvertOp::ToViewport { axis } => {
            let axis = resolve_axis(input.axis_line(), axis, settings.auto_detect_axis, fallback);
            let ctx = context(settings, state, axis)?;
            (plan_to_viewport(target, &ctx), Some(axis), Some(ctx.screen))
        }
        ConvertOp::FromViewport { unit } => {
            let ctx = context(settings, state, fallback)?;
            let output = unit.unwrap_or(settings.default_output_unit);
            (plan_from_viewport(target, &ctx, output), None, Some(ctx.screen))
        }
        ConvertOp::CycleAxis { axis } => {
            let ctx = context(settings, state, axis)?;
            (plan_axis_cycle(target, &ctx), Some(axis), Some(ctx.screen))
        }
        ConvertOp::Tailwind => (plan_tailwind_cycle(target, settings.base_font_size), None, None),
    };

    if let ConvertOp::ToViewport { axis: Some(chosen) } | ConvertOp::CycleAxis { axis: chosen } = op {
        state.axis = Some(chosen);
    }

    let source = input.source();
    let text = Replacement::apply_all(source, &edits);
    debug!(edits = edits.len(), "conversion planned");
    let edits = edits
        .into_iter()
        .map(|edit| Replacement {
            start: byte_to_char(source, edit.start),
            end: byte_to_char(source, edit.end),
            text: edit.text,
        })
        .collect();

    Ok(ConvertOutcome {
        text,
        edits,
        axis,
        screen: screen.map(|s| s.to_string()),
    })
}

/// Actions offered at a character column of `line`.
pub fn actions(line: &str, column: usize) -> Vec<CodeAction> {
    available_actions(line, char_to_byte(line, column))
}

// ===== Env =====

/// Env file for this run: `file` if given, else the configured one.
///
/// # Errors
///
/// `InputError::NotConfigured` when nothing is configured or a relative
/// path has no workspace to resolve against.
pub fn env_file(
    settings: &Settings,
    file: Option<&str>,
    workspace: Option<&Path>,
) -> Result<EnvFile, InputError> {
    let configured = file.unwrap_or(&settings.env_file);
    let path = resolve_env_path(configured, workspace)?;
    Ok(EnvFile::new(path, workspace.map(Path::to_path_buf)))
}

/// What a status display shows for the env file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvStatus {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<EnvSummary>,
}

/// Status for `file`. A missing configuration or unreadable file shows
/// `env: n/a` instead of failing.
pub fn env_status(file: Result<EnvFile, InputError>) -> EnvStatus {
    let not_available = |path: Option<String>| EnvStatus {
        status: "env: n/a".to_string(),
        tooltip: None,
        path,
        summary: None,
    };
    let file = match file {
        Ok(file) => file,
        Err(e) => {
            debug!(error = %e, "no env file");
            return not_available(None);
        }
    };
    let display = file.display_path();
    match file.summary() {
        Some(summary) => EnvStatus {
            status: summary.status_text(),
            tooltip: Some(summary.tooltip(&display)),
            path: Some(display),
            summary: Some(summary),
        },
        None => not_available(Some(display)),
    }
}

/// Block listing for a picker.
pub fn env_list(file: &EnvFile) -> Result<EnvSummary, InputError> {
    Ok(EnvSummary::from_parsed(&file.read()?))
}

/// Switch `file` to block `name`.
pub fn env_switch(file: &EnvFile, name: &str) -> Result<SwitchReport, AppError> {
    Ok(file.switch(name)?)
}

// ===== Scripts =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptsReport {
    pub mode: WorkspaceMode,
    /// Folders whose manifest was read.
    pub folders: usize,
    pub visible: Vec<WorkspaceScript>,
    pub overflow: Vec<WorkspaceScript>,
}

impl ScriptsReport {
    pub fn iter(&self) -> impl Iterator<Item = &WorkspaceScript> {
        self.visible.iter().chain(self.overflow.iter())
    }
}

/// Scripts of the `package.json` files in `roots`, combined per `mode`.
///
/// `first` reads only the first root and fails on a bad manifest. The other
/// modes skip folders whose manifest can't be read and fail only when none
/// could be.
pub fn scripts(
    settings: &Settings,
    roots: &[PathBuf],
    mode: WorkspaceMode,
) -> Result<ScriptsReport, AppError> {
    let roots = match mode {
        WorkspaceMode::First => &roots[..roots.len().min(1)],
        WorkspaceMode::All | WorkspaceMode::Pick => roots,
    };
    let mut folders = Vec::with_capacity(roots.len());
    let mut first_error = None;
    for root in roots {
        match WorkspaceFolder::load(root) {
            Ok(folder) => folders.push(folder),
            Err(e) => {
                warn!(root = %root.display(), error = %e, "skipping workspace folder");
                first_error.get_or_insert(e);
            }
        }
    }
    if folders.is_empty() {
        if let Some(e) = first_error {
            return Err(e.into());
        }
    }

    let list = collect_scripts(
        &folders,
        mode,
        &settings.script_exclude,
        &settings.script_order,
        settings.max_buttons,
    );
    debug!(?mode, folders = folders.len(), scripts = list.iter().count(), "scripts collected");
    Ok(ScriptsReport {
        mode,
        folders: folders.len(),
        visible: list.visible,
        overflow: list.overflow,
    })
}

// ===== Custom commands =====

/// Configured commands offered on this platform.
pub fn command_list(settings: &Settings) -> Vec<&CustomCommand> {
    let platform = current_platform();
    settings
        .commands
        .iter()
        .filter(|c| c.applies_to(&platform))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedCommand {
    pub title: String,
    #[serde(flatten)]
    pub prepared: Prepared,
    /// The host must ask before running.
    pub confirm: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

/// Resolve the command titled `title` and record it in `state`.
///
/// # Errors
///
/// `AppError::Usage` when no command with that title applies here.
pub fn command_render<H: PlaceholderHost + ?Sized>(
    settings: &Settings,
    state: &mut LastUsed,
    title: &str,
    host: &mut H,
    now: DateTime<Utc>,
) -> Result<RenderedCommand, AppError> {
    let command = command_list(settings)
        .into_iter()
        .find(|c| c.title == title)
        .ok_or_else(|| AppError::Usage(format!("no custom command titled '{title}'")))?;

    let prepared = command.prepare(host, &settings.cursor_symbol);
    let (confirm, text) = match &prepared {
        Prepared::Run { command, dangerous } => (*dangerous && settings.confirm_dangerous, command.clone()),
        Prepared::Snippet { head, tail } => (false, format!("{head}{tail}")),
    };

    state.command = Some(LastCommand {
        title: command.title.clone(),
        command: command.command.clone(),
    });
    state
        .history
        .push(&command.title, &text, now, settings.history_size);
    info!(title, confirm, "custom command rendered");

    Ok(RenderedCommand {
        title: command.title.clone(),
        prepared,
        confirm,
        cwd: command.cwd.clone(),
    })
}

/// Placeholder values for a terminal session: prompts on `reader`/`writer`,
/// the process environment, and `--workspace`. No clipboard access.
pub struct PromptHost<R, W> {
    reader: R,
    writer: W,
    workspace: Option<PathBuf>,
}

impl<R: BufRead, W: Write> PromptHost<R, W> {
    pub fn new(reader: R, writer: W, workspace: Option<PathBuf>) -> Self {
        Self {
            reader,
            writer,
            workspace,
        }
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut answer = String::new();
        match self.reader.read_line(&mut answer) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(answer.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl<R: BufRead, W: Write> PlaceholderHost for PromptHost<R, W> {
    fn input(&mut self, label: &str) -> Option<String> {
        write!(self.writer, "{label}: ").ok()?;
        self.writer.flush().ok()?;
        self.read_answer()
    }

    /// Accepts a 1-based number or the option text.
    fn pick(&mut self, label: &str, options: &[&str]) -> Option<String> {
        writeln!(self.writer, "{label}").ok()?;
        for (i, option) in options.iter().enumerate() {
            writeln!(self.writer, "  {}) {option}", i + 1).ok()?;
        }
        write!(self.writer, "> ").ok()?;
        self.writer.flush().ok()?;
        let answer = self.read_answer()?;
        let answer = answer.trim();
        if let Ok(n) = answer.parse::<usize>() {
            return n
                .checked_sub(1)
                .and_then(|i| options.get(i))
                .map(|s| s.to_string());
        }
        options
            .iter()
            .find(|option| **option == answer)
            .map(|s| s.to_string())
    }

    fn env(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn workspace_folder(&self) -> Option<String> {
        self.workspace
            .as_ref()
            .map(|path| path.display().to_string())
    }

    fn clipboard(&mut self) -> Option<String> {
        None
    }
}
