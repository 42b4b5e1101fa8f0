//! Rewrite planning for an env block switch.

use crate::env::parser::{parse_env_file, ParsedEnvFile};
use crate::model::EnvError;
use tracing::{debug, info};

/// What a switch should do to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The file has no blocks; nothing to switch.
    NoBlocks,
    /// The rewrite equals the current content; skip the write.
    Unchanged,
    /// Write `content` as the whole new file.
    Rewritten { content: String },
}

/// Rewrite a parsed file so that only `target`'s entries are enabled.
///
/// When several headers share the name, the first one is the target and the
/// others are disabled like any other block. Every tracked entry is
/// rewritten in its canonical form, so commented entries of other blocks are
/// normalized to a single space after `#`.
pub fn rewrite(parsed: &ParsedEnvFile, target: &str) -> Result<String, EnvError> {
    let Some(target_index) = parsed.blocks.iter().position(|b| b.name == target) else {
        return Err(EnvError::BlockDisappeared {
            name: target.to_string(),
        });
    };
    let mut lines = parsed.lines.clone();
    for (index, block) in parsed.blocks.iter().enumerate() {
        let enable = index == target_index;
        for entry in &block.entries {
            lines[entry.line_index] = if enable {
                entry.enabled_line()
            } else {
                entry.disabled_line()
            };
        }
    }
    Ok(lines.join(parsed.eol.as_str()))
}

/// Plan a switch on freshly read `current` text.
///
/// Takes the raw text rather than a parse so that callers always plan
/// against what is on disk now, not what was listed to the user earlier.
pub fn plan_switch(current: &str, target: &str) -> Result<SwitchOutcome, EnvError> {
    let parsed = parse_env_file(current);
    if parsed.blocks.is_empty() {
        debug!(target, "switch requested on a file without env blocks");
        return Ok(SwitchOutcome::NoBlocks);
    }
    let content = rewrite(&parsed, target)?;
    if content == current {
        debug!(target, "env block already active");
        return Ok(SwitchOutcome::Unchanged);
    }
    info!(
        from = parsed.active.as_deref().unwrap_or("none"),
        to = target,
        "env block switched"
    );
    Ok(SwitchOutcome::Rewritten { content })
}
