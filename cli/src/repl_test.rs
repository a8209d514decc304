use super::*;

#[test]
fn plain_text_is_sent_trimmed() {
    assert_eq!(parse_line("  hello there \n"), ReplCommand::Send("hello there"));
    assert_eq!(parse_line(""), ReplCommand::Send(""));
}

#[test]
fn slash_commands_parse_arguments() {
    assert_eq!(parse_line("/attach ./docs/a b.pdf"), ReplCommand::Attach("./docs/a b.pdf"));
    assert_eq!(parse_line("/detach abc"), ReplCommand::Detach("abc"));
    assert_eq!(parse_line("/new"), ReplCommand::New);
    assert_eq!(parse_line("/exit"), ReplCommand::Quit);
    assert_eq!(parse_line("/history"), ReplCommand::History);
}

#[test]
fn commands_missing_arguments_are_unknown() {
    assert_eq!(parse_line("/attach"), ReplCommand::Unknown("/attach"));
    assert_eq!(parse_line("/frobnicate now"), ReplCommand::Unknown("/frobnicate now"));
}

#[test]
fn guess_mime_by_extension() {
    assert_eq!(guess_mime(Path::new("cat.PNG")), "image/png");
    assert_eq!(guess_mime(Path::new("notes.md")), "text/markdown");
    assert_eq!(guess_mime(Path::new("voice.webm")), "audio/webm");
    assert_eq!(guess_mime(Path::new("setup.exe")), "application/octet-stream");
    assert_eq!(guess_mime(Path::new("README")), "application/octet-stream");
}

#[test]
fn every_guessed_type_except_fallback_is_allowed() {
    for ext in ["jpg", "png", "gif", "webp", "pdf", "txt", "md", "csv", "json", "doc", "docx", "webm", "ogg", "wav", "mp3", "m4a"] {
        let mime = guess_mime(Path::new(&format!("f.{ext}")));
        assert!(chatpad::attachments::is_mime_type_allowed(mime), "{ext} -> {mime}");
    }
}
