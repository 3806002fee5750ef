//! Interactive editing session.
//!
//! One draft at a time. Switching to another key with unsaved edits asks
//! first; errors are printed and never end the session or drop the draft.
//! Saves made in this process are picked up from the change broadcaster so a
//! clean draft always shows the stored value.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, anyhow, bail};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use stell_core::{
    ContentSection, Draft, OpenOutcome, RedirectRule, RedirectStatus, SeoUpdate, SettingKey,
    SettingKind, SettingValue, SettingsEditor, SettingsEvent, SitemapUrl,
};
use tokio::sync::broadcast::{self, error::TryRecvError};

use crate::bootstrap::CliContext;
use crate::handlers::common::{print_saved, read_input_file, write_export};
use crate::handlers::seo::split_keywords;
use crate::presentation::display_value;
use crate::utils::input::{TerminalConfirmation, prompt_confirmation};

const HELP: &str = "\
Commands:
  open <key>              open a setting (sitemap, robots, redirects, seo:/path, content:/path)
  show                    print the draft
  status                  print the active key and whether it has unsaved edits
  set <field> <value>     seo: title, description, canonical, keywords, og-title,
                          og-description, og-image, noindex, nofollow
                          robots: content (use \\n for line breaks)
                          content: <section>.heading, <section>.body
  add <args>              sitemap: <loc> | redirects: <from> <to> [status] | content: <id> <heading>
  remove <arg>            sitemap: <loc> | redirects: <from> | content: <id>
  move <id> up|down       reorder a content section
  import <file>           replace the sitemap (XML) or robots.txt from a file
  save                    save the draft
  discard                 drop unsaved edits
  delete                  delete the stored value and fall back to defaults
  export [file]           print or write the draft as a file
  help                    show this help
  quit                    leave the session";

/// A parsed session line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Open(String),
    Show,
    Status,
    Set { field: String, value: String },
    Add(Vec<String>),
    Remove(String),
    Move { id: String, up: bool },
    Import(PathBuf),
    Save,
    Discard,
    Delete,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<SessionCommand> {
    let line = line.trim();
    let (verb, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(v, r)| (v, r.trim()));

    let needs_arg = |name: &str| -> Result<String> {
        if rest.is_empty() {
            bail!("'{name}' needs an argument (type 'help')");
        }
        Ok(rest.to_string())
    };

    Ok(match verb.to_ascii_lowercase().as_str() {
        "open" => SessionCommand::Open(needs_arg("open")?),
        "show" => SessionCommand::Show,
        "status" => SessionCommand::Status,
        "set" => {
            let rest = needs_arg("set")?;
            let (field, value) = rest
                .split_once(char::is_whitespace)
                .map_or((rest.as_str(), ""), |(f, v)| (f, v.trim()));
            SessionCommand::Set {
                field: field.to_string(),
                value: value.to_string(),
            }
        }
        "add" => SessionCommand::Add(
            needs_arg("add")?
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        ),
        "remove" | "rm" => SessionCommand::Remove(needs_arg("remove")?),
        "move" => {
            let rest = needs_arg("move")?;
            let mut parts = rest.split_whitespace();
            let (Some(id), Some(direction), None) = (parts.next(), parts.next(), parts.next())
            else {
                bail!("usage: move <id> up|down");
            };
            let up = match direction {
                "up" => true,
                "down" => false,
                other => bail!("direction must be 'up' or 'down', got '{other}'"),
            };
            SessionCommand::Move {
                id: id.to_string(),
                up,
            }
        }
        "import" => SessionCommand::Import(PathBuf::from(needs_arg("import")?)),
        "save" => SessionCommand::Save,
        "discard" => SessionCommand::Discard,
        "delete" => SessionCommand::Delete,
        "export" => SessionCommand::Export((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        other => bail!("unknown command '{other}' (type 'help')"),
    })
}

/// Run the interactive session until `quit` or end of input.
pub async fn execute(ctx: &CliContext, initial: Option<String>) -> Result<()> {
    let mut editor = ctx.editor(Arc::new(TerminalConfirmation));
    let mut updates = ctx.broadcaster().subscribe();
    let mut rl = DefaultEditor::new().context("Failed to start line editor")?;

    println!("Stell settings session. Type 'help' for commands.");
    if let Some(key) = initial {
        report(run_command(&mut editor, SessionCommand::Open(key)).await);
    }

    loop {
        let line = match rl.readline(&prompt_for(&editor)) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("(type 'quit' to leave)");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);

        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if command == SessionCommand::Quit && !confirm_quit(&editor)? {
            continue;
        }
        if let Some(Flow::Quit) = report(run_command(&mut editor, command).await) {
            break;
        }
        follow_changes(&mut updates, &mut editor);
    }
    Ok(())
}

fn report(result: Result<Flow>) -> Option<Flow> {
    match result {
        Ok(flow) => Some(flow),
        Err(e) => {
            eprintln!("✗ {e:#}");
            None
        }
    }
}

fn confirm_quit(editor: &SettingsEditor) -> Result<bool> {
    match editor.active_key() {
        Some(key) if editor.is_dirty() => {
            prompt_confirmation(&format!("{key} has unsaved changes. Quit anyway?"))
        }
        _ => Ok(true),
    }
}

fn prompt_for(editor: &SettingsEditor) -> String {
    match editor.active_key() {
        Some(key) if editor.is_dirty() => format!("stell [{key}*]> "),
        Some(key) => format!("stell [{key}]> "),
        None => "stell> ".to_string(),
    }
}

fn follow_changes(updates: &mut broadcast::Receiver<SettingsEvent>, editor: &mut SettingsEditor) {
    loop {
        match updates.try_recv() {
            Ok(event) => {
                if editor.apply_event(&event) {
                    tracing::debug!(key = %event.key(), event = event.event_name(), "Draft refreshed");
                }
            }
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Missed settings events");
            }
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }
}

async fn run_command(editor: &mut SettingsEditor, command: SessionCommand) -> Result<Flow> {
    match command {
        SessionCommand::Open(raw) => {
            let key: SettingKey = raw.parse()?;
            let current = editor.active_key().cloned();
            match editor.open(key.clone()).await? {
                OpenOutcome::Opened(source) => println!("Opened {key} ({})", source.label()),
                OpenOutcome::Declined => {
                    if let Some(current) = current {
                        println!("Kept unsaved changes to {current}.");
                    }
                }
            }
        }
        SessionCommand::Show => {
            let draft = active(editor)?;
            print_header(draft);
            if let Some(value) = draft.value() {
                display_value(value);
            }
        }
        SessionCommand::Status => match editor.draft() {
            Some(draft) => print_header(draft),
            None => println!("No setting open."),
        },
        SessionCommand::Set { field, value } => apply_set(editor.draft_mut()?, &field, &value)?,
        SessionCommand::Add(args) => apply_add(editor.draft_mut()?, &args)?,
        SessionCommand::Remove(target) => apply_remove(editor.draft_mut()?, &target)?,
        SessionCommand::Move { id, up } => apply_move(editor.draft_mut()?, &id, up)?,
        SessionCommand::Import(path) => {
            let text = read_input_file(&path)?;
            let kind = active(editor)?.key().kind();
            match kind {
                SettingKind::Sitemap => {
                    let count = editor.import_sitemap_xml(&text)?;
                    println!("Imported {count} entries (unsaved).");
                }
                SettingKind::Robots => editor.set_robots(text)?,
                other => bail!("import works for sitemap and robots, not {other}"),
            }
        }
        SessionCommand::Save => print_saved(&editor.save().await?),
        SessionCommand::Discard => {
            editor.discard()?;
            println!("Unsaved changes discarded.");
        }
        SessionCommand::Delete => {
            let existed = editor.delete().await?;
            let draft = active(editor)?;
            if existed {
                println!("Deleted stored {}.", draft.key());
            } else {
                println!("Nothing stored for {}.", draft.key());
            }
            print_header(draft);
        }
        SessionCommand::Export(path) => write_export(&editor.export()?, path.as_deref())?,
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn active(editor: &SettingsEditor) -> Result<&Draft> {
    editor
        .draft()
        .ok_or_else(|| anyhow!("no setting is open (use 'open <key>')"))
}

fn print_header(draft: &Draft) {
    let source = draft.source().map_or("loading", |s| s.label());
    let state = if draft.is_dirty() { ", unsaved changes" } else { "" };
    println!("{} ({source}{state})", draft.key());
}

/// Apply `set <field> <value>` to the draft.
pub(crate) fn apply_set(draft: &mut Draft, field: &str, value: &str) -> Result<()> {
    match draft.key().kind() {
        SettingKind::PageSeo => {
            let update = seo_update(field, value)?;
            draft.edit_seo(&update)?;
        }
        SettingKind::Robots if field == "content" => {
            draft.set_robots(value.replace("\\n", "\n"))?;
        }
        SettingKind::PageContent => {
            let Some((id, part)) = field.split_once('.') else {
                bail!("content fields are <section>.heading or <section>.body");
            };
            if !matches!(part, "heading" | "body") {
                bail!("unknown section field '{part}'");
            }
            ensure_section(draft, id)?;
            draft.edit_content(|content| {
                if let Some(section) = content.section_mut(id) {
                    if part == "heading" {
                        section.heading = value.to_string();
                    } else {
                        section.body = value.to_string();
                    }
                }
            })?;
        }
        kind => bail!("'set {field}' does not apply to {kind} (type 'help')"),
    }
    Ok(())
}

fn seo_update(field: &str, value: &str) -> Result<SeoUpdate> {
    let optional = || Some(value.to_string()).filter(|v| !v.is_empty());
    let mut update = SeoUpdate::default();
    match field {
        "title" => update.title = Some(value.to_string()),
        "description" => update.description = Some(value.to_string()),
        "canonical" => update.canonical = Some(value.to_string()),
        "keywords" => update.keywords = Some(split_keywords(value)),
        "og-title" => update.og_title = Some(optional()),
        "og-description" => update.og_description = Some(optional()),
        "og-image" => update.og_image = Some(optional()),
        "noindex" => update.noindex = Some(parse_flag(value)?),
        "nofollow" => update.nofollow = Some(parse_flag(value)?),
        other => bail!("unknown SEO field '{other}'"),
    }
    Ok(update)
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => bail!("expected true or false, got '{other}'"),
    }
}

/// Apply `add ...` to the draft.
pub(crate) fn apply_add(draft: &mut Draft, args: &[String]) -> Result<()> {
    match (draft.key().kind(), args) {
        (SettingKind::Sitemap, [loc]) => {
            let url = SitemapUrl::new(loc.clone());
            draft.edit_sitemap(|sitemap| sitemap.upsert(url))?;
        }
        (SettingKind::Redirects, [from, to, rest @ ..]) => {
            let status = match rest {
                [] => RedirectStatus::default(),
                [code] => RedirectStatus::try_from(
                    code.parse::<u16>()
                        .with_context(|| format!("invalid status '{code}'"))?,
                )?,
                _ => bail!("usage: add <from> <to> [status]"),
            };
            let rule = RedirectRule::new(from.clone(), to.clone(), status);
            draft.edit_redirects(|redirects| redirects.upsert(rule))?;
        }
        (SettingKind::PageContent, [id, heading @ ..]) if !heading.is_empty() => {
            if current_content(draft).is_some_and(|c| c.section(id).is_some()) {
                bail!("section '{id}' already exists");
            }
            let section = ContentSection::new(id.clone(), heading.join(" "), "");
            draft.edit_content(|content| content.sections.push(section))?;
        }
        (SettingKind::Sitemap, _) => bail!("usage: add <loc>"),
        (SettingKind::Redirects, _) => bail!("usage: add <from> <to> [status]"),
        (SettingKind::PageContent, _) => bail!("usage: add <id> <heading>"),
        (kind, _) => bail!("'add' does not apply to {kind}"),
    }
    Ok(())
}

/// Apply `remove <target>` to the draft. Nothing changes when the target
/// does not exist.
pub(crate) fn apply_remove(draft: &mut Draft, target: &str) -> Result<()> {
    let found = match draft.value() {
        Some(SettingValue::Sitemap(sitemap)) => sitemap.contains(target),
        Some(SettingValue::Redirects(redirects)) => redirects.lookup(target).is_some(),
        Some(SettingValue::PageContent(content)) => content.section(target).is_some(),
        Some(other) => bail!("'remove' does not apply to {}", other.kind()),
        None => bail!("the draft is still loading"),
    };
    if !found {
        bail!("'{target}' not found in {}", draft.key());
    }
    match draft.key().kind() {
        SettingKind::Sitemap => draft.edit_sitemap(|sitemap| {
            sitemap.remove(target);
        })?,
        SettingKind::Redirects => draft.edit_redirects(|redirects| {
            redirects.remove(target);
        })?,
        _ => draft.edit_content(|content| content.sections.retain(|s| s.id != target))?,
    }
    Ok(())
}

fn apply_move(draft: &mut Draft, id: &str, up: bool) -> Result<()> {
    ensure_section(draft, id)?;
    let mut moved = false;
    draft.edit_content(|content| moved = content.move_section(id, up))?;
    if !moved {
        println!("'{id}' is already at the {}.", if up { "top" } else { "bottom" });
    }
    Ok(())
}

fn current_content(draft: &Draft) -> Option<&stell_core::PageContent> {
    draft.value().and_then(SettingValue::as_page_content)
}

fn ensure_section(draft: &Draft, id: &str) -> Result<()> {
    match current_content(draft) {
        Some(content) if content.section(id).is_some() => Ok(()),
        Some(_) => bail!("no section '{id}' on this page"),
        None => bail!("{} is not page content", draft.key()),
    }
}
