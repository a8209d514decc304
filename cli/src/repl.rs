//! Line-oriented chat loop over stdin.

#[cfg(test)]
#[path = "repl_test.rs"]
mod repl_test;

use std::path::Path;

use chatpad::chat::{ChatError, ChatStore};
use chatpad::error::{ErrorCategory, UserFacing};
use chatpad::types::{FileUpload, Role};
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
commands:
  /attach <path>   add a file to the next message
  /detach <id>     drop a pending attachment
  /pending         list pending attachments
  /new             start a new conversation
  /dismiss         clear the error message
  /history         print the conversation
  /quit            leave";

#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand<'a> {
    Send(&'a str),
    Attach(&'a str),
    Detach(&'a str),
    Pending,
    New,
    Dismiss,
    History,
    Help,
    Quit,
    Unknown(&'a str),
}

#[must_use]
pub fn parse_line(line: &str) -> ReplCommand<'_> {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return ReplCommand::Send(line);
    };
    let (cmd, arg) = rest.split_once(' ').map_or((rest, ""), |(c, a)| (c, a.trim()));
    match cmd {
        "attach" if !arg.is_empty() => ReplCommand::Attach(arg),
        "detach" if !arg.is_empty() => ReplCommand::Detach(arg),
        "pending" => ReplCommand::Pending,
        "new" => ReplCommand::New,
        "dismiss" => ReplCommand::Dismiss,
        "history" => ReplCommand::History,
        "help" => ReplCommand::Help,
        "quit" | "exit" => ReplCommand::Quit,
        _ => ReplCommand::Unknown(line),
    }
}

/// MIME type from the file extension. Unknown extensions map to
/// `application/octet-stream`, which the allow-list rejects.
#[must_use]
pub fn guess_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "webm" => "audio/webm",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        _ => "application/octet-stream",
    }
}

fn label(category: ErrorCategory) -> &'static str {
    match category {
        ErrorCategory::Validation => "input",
        ErrorCategory::Authentication => "auth",
        ErrorCategory::Upload => "upload",
        ErrorCategory::Recording => "recording",
        ErrorCategory::Network => "network",
        ErrorCategory::Conversation => "chat",
        ErrorCategory::Storage => "storage",
    }
}

fn print_error(err: &impl UserFacing) {
    eprintln!("[{}] {}", label(err.category()), err.user_message());
}

fn attach_path(chat: &ChatStore, raw: &str) {
    let path = Path::new(raw);
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            chat.report_error(format!("Could not read {raw}: {e}"));
            eprintln!("[upload] could not read {raw}: {e}");
            return;
        }
    };
    let name = path
        .file_name()
        .map_or_else(|| raw.to_owned(), |n| n.to_string_lossy().into_owned());
    match chat.attach(FileUpload::new(name, guess_mime(path), bytes)) {
        Ok(attachment) => println!("attached {} ({} bytes) as {}", attachment.name, attachment.size, attachment.id),
        Err(e) => print_error(&e),
    }
}

async fn send(chat: &ChatStore, text: &str) {
    if text.is_empty() && chat.snapshot().pending_attachments.is_empty() {
        return;
    }
    println!("assistant is typing...");
    match chat.send_pending(text).await {
        Ok(reply) => println!("assistant: {}", reply.content),
        Err(ChatError::Superseded) => {}
        Err(e) => print_error(&e),
    }
}

/// Read commands until `/quit` or end of input.
///
/// # Errors
///
/// Returns an error if stdin cannot be read.
pub async fn run(chat: &ChatStore) -> std::io::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            ReplCommand::Send(text) => send(chat, text).await,
            ReplCommand::Attach(path) => attach_path(chat, path),
            ReplCommand::Detach(id) => {
                if !chat.remove_attachment(id) {
                    eprintln!("no pending attachment {id}");
                }
            }
            ReplCommand::Pending => {
                for a in chat.snapshot().pending_attachments {
                    println!("{}  {}  {}  {} bytes", a.id, a.name, a.mime_type, a.size);
                }
            }
            ReplCommand::New => println!("new conversation {}", chat.new_conversation()),
            ReplCommand::Dismiss => chat.dismiss_error(),
            ReplCommand::History => {
                for m in chat.snapshot().messages {
                    let who = match m.role {
                        Role::User => "you",
                        Role::Assistant => "assistant",
                    };
                    println!("{who}: {} [{} attachment(s)]", m.content, m.attachments.len());
                }
            }
            ReplCommand::Help => println!("{HELP}"),
            ReplCommand::Quit => break,
            ReplCommand::Unknown(raw) => eprintln!("unknown command {raw}; try /help"),
        }
    }
    Ok(())
}
