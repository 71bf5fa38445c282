use std::path::PathBuf;

use tarjama_types::{AppEvent, TranslationRequest};

/// What one typed line asks for
#[derive(Debug)]
pub enum Command {
    Send(AppEvent),
    /// Start collecting lyrics until a line holding a single `.`
    BeginLyrics,
    ReadLyricsFile(PathBuf),
    Help,
    Nothing,
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  translate <lyrics>          translate one line of lyrics
  translate                   paste lyrics, finish with a line holding '.'
  translate-file <path>       translate lyrics read from a file
  song <artist> | <title>     look a song up by name
  show                        print the current translation again
  save <n>                    save word n to your vocabulary
  save-line <n>               save line n to your vocabulary
  vocab                       list your vocabulary
  forget <id>                 remove a vocabulary entry
  ask <n> [question]          ask about word n
  close                       close the word conversation
  signup <email> <password>   create an account
  signin <email> <password>   sign in
  signout                     sign out
  whoami                      show who is signed in
  help                        this text
  quit                        leave";

/// Item numbers are 1-based for the user and 0-based everywhere else
fn item_index(arg: &str) -> Result<usize, String> {
    match arg.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("Expected an item number, got \"{}\"", arg.trim())),
    }
}

fn credentials(rest: &str) -> Option<(String, String)> {
    let mut parts = rest.split_whitespace();
    let email = parts.next()?.to_string();
    let password = parts.next()?.to_string();
    Some((email, password))
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if line.is_empty() {
        return Command::Nothing;
    }

    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };

    match name {
        "translate" if rest.is_empty() => Command::BeginLyrics,
        "translate" => Command::Send(AppEvent::Translate(TranslationRequest::lyrics(rest))),
        "translate-file" if rest.is_empty() => {
            Command::Invalid("Usage: translate-file <path>".to_string())
        }
        "translate-file" => Command::ReadLyricsFile(PathBuf::from(rest)),
        "song" => match rest.split_once('|') {
            Some((artist, title)) => Command::Send(AppEvent::Translate(
                TranslationRequest::song(artist.trim(), title.trim()),
            )),
            None => Command::Invalid("Usage: song <artist> | <title>".to_string()),
        },
        "show" => Command::Send(AppEvent::Show),
        "save" => match item_index(rest) {
            Ok(index) => Command::Send(AppEvent::SaveWord(index)),
            Err(e) => Command::Invalid(e),
        },
        "save-line" => match item_index(rest) {
            Ok(index) => Command::Send(AppEvent::SaveLine(index)),
            Err(e) => Command::Invalid(e),
        },
        "vocab" => Command::Send(AppEvent::ListVocab),
        "forget" if rest.is_empty() => Command::Invalid("Usage: forget <id>".to_string()),
        "forget" => Command::Send(AppEvent::RemoveVocab(rest.to_string())),
        "ask" => {
            let (number, query) = match rest.split_once(char::is_whitespace) {
                Some((number, query)) => (number, query.trim()),
                None => (rest, ""),
            };
            match item_index(number) {
                Ok(index) => Command::Send(AppEvent::AskWord {
                    index,
                    query: query.to_string(),
                }),
                Err(e) => Command::Invalid(e),
            }
        }
        "close" => Command::Send(AppEvent::CloseChat),
        "signup" | "signin" => match credentials(rest) {
            Some((email, password)) if name == "signup" => {
                Command::Send(AppEvent::SignUp { email, password })
            }
            Some((email, password)) => Command::Send(AppEvent::SignIn { email, password }),
            None => Command::Invalid(format!("Usage: {} <email> <password>", name)),
        },
        "signout" => Command::Send(AppEvent::SignOut),
        "whoami" => Command::Send(AppEvent::WhoAmI),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Send(AppEvent::Quit),
        other => Command::Invalid(format!("Unknown command \"{}\", try help", other)),
    }
}
