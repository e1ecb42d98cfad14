//! Interactive storyboard session.
//!
//! Reads one command per line from stdin. Every failure is reported and the
//! prompt comes back; only `quit` or end of input ends the session.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use storyboard::{
    AspectRatio, BoardError, BoardErrorKind, GeminiClient, ReferenceKind, ReferenceSpec,
    Storyboard, StoryboardConfig, StoryboardResult, load_image, read_story,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, instrument};

use super::board::{build_board, spawn_progress};
use super::commands::SessionArgs;
use super::guide::PROMPT_GUIDE;

const HELP: &str = "\
Commands:
  story <file>       generate a new storyboard from a story file
  list               list scenes
  refs               list reference images
  ref add <kind> [LABEL=]PATH
                     add a character or background reference
  ref label <kind> N <label>
                     relabel reference N of a kind
  ref rm <kind> N    remove reference N of a kind
  show N             show scene N
  edit N <prompt>    replace the prompt of scene N
  regen N            render scene N again
  delete N           remove scene N
  style <text>       set the style override (empty to clear)
  ratio <r>          set the aspect ratio (16:9, 9:16, 1:1, 4:3)
  export [sketch]    write the archive, optionally as sketches
  guide              tips for writing scene prompts
  help               show this help
  quit               leave the session";

/// One parsed session line. Scene and reference numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Story(PathBuf),
    List,
    Refs,
    RefAdd(ReferenceKind, ReferenceSpec),
    RefLabel(ReferenceKind, usize, String),
    RefRemove(ReferenceKind, usize),
    Show(usize),
    Edit(usize, String),
    Regen(usize),
    Delete(usize),
    Style(String),
    Ratio(AspectRatio),
    Export { sketch: bool },
    Guide,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (word, rest) = split_word(line);

        match word.to_ascii_lowercase().as_str() {
            "story" if !rest.is_empty() => Ok(Self::Story(PathBuf::from(rest))),
            "story" => Err("Usage: story <file>".to_string()),
            "list" | "ls" => Ok(Self::List),
            "refs" => Ok(Self::Refs),
            "ref" => parse_ref(rest),
            "show" => scene_number(rest).map(Self::Show),
            "edit" => {
                let (number, prompt) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "Usage: edit N <prompt>".to_string())?;
                let prompt = prompt.trim();
                if prompt.is_empty() {
                    return Err("Usage: edit N <prompt>".to_string());
                }
                Ok(Self::Edit(scene_number(number)?, prompt.to_string()))
            }
            "regen" => scene_number(rest).map(Self::Regen),
            "delete" | "rm" => scene_number(rest).map(Self::Delete),
            "style" => Ok(Self::Style(rest.to_string())),
            "ratio" => rest.parse().map(Self::Ratio),
            "export" => match rest {
                "" => Ok(Self::Export { sketch: false }),
                "sketch" => Ok(Self::Export { sketch: true }),
                other => Err(format!("Unknown export mode: {}", other)),
            },
            "guide" => Ok(Self::Guide),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            "" => Err(String::new()),
            other => Err(format!("Unknown command: {} (try help)", other)),
        }
    }
}

fn parse_ref(rest: &str) -> Result<SessionCommand, String> {
    let (action, rest) = split_word(rest);
    let (kind, args) = split_word(rest);
    let kind = Some(kind).filter(|k| !k.is_empty()).map(reference_kind).transpose()?;

    match (action, kind) {
        ("add", Some(kind)) if !args.is_empty() => {
            Ok(SessionCommand::RefAdd(kind, args.parse::<ReferenceSpec>()?))
        }
        ("add", _) => Err("Usage: ref add <character|background> [LABEL=]PATH".to_string()),
        ("label", Some(kind)) => {
            let (number, label) = args
                .split_once(char::is_whitespace)
                .map(|(n, l)| (n, l.trim()))
                .filter(|(_, l)| !l.is_empty())
                .ok_or_else(|| "Usage: ref label <kind> N <label>".to_string())?;
            Ok(SessionCommand::RefLabel(kind, position(number)?, label.to_string()))
        }
        ("label", None) => Err("Usage: ref label <kind> N <label>".to_string()),
        ("rm" | "remove", Some(kind)) => Ok(SessionCommand::RefRemove(kind, position(args)?)),
        ("rm" | "remove", None) => Err("Usage: ref rm <kind> N".to_string()),
        (other, _) => Err(format!("Unknown ref action: '{}' (add, label or rm)", other)),
    }
}

/// First word and the trimmed remainder.
fn split_word(text: &str) -> (&str, &str) {
    let text = text.trim();
    text.split_once(char::is_whitespace)
        .map(|(word, rest)| (word, rest.trim()))
        .unwrap_or((text, ""))
}

fn reference_kind(text: &str) -> Result<ReferenceKind, String> {
    match text.to_ascii_lowercase().as_str() {
        "character" | "char" | "c" => Ok(ReferenceKind::Character),
        "background" | "bg" | "b" => Ok(ReferenceKind::Background),
        other => Err(format!("Unknown reference kind: '{}' (character or background)", other)),
    }
}

fn scene_number(text: &str) -> Result<usize, String> {
    position(text).map_err(|_| format!("Expected a scene number, got '{}'", text.trim()))
}

fn position(text: &str) -> Result<usize, String> {
    match text.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Expected a number starting at 1, got '{}'", text.trim())),
    }
}

fn reference_id(
    board: &Storyboard<GeminiClient>,
    kind: ReferenceKind,
    n: usize,
) -> StoryboardResult<uuid::Uuid> {
    board
        .references()
        .get(kind)
        .get(n - 1)
        .map(|reference| *reference.id())
        .ok_or_else(|| {
            BoardError::new(BoardErrorKind::ReferenceNotFound(format!("{} {}", kind, n))).into()
        })
}

/// Run the interactive loop.
#[instrument(skip_all)]
pub async fn run_session(config: &StoryboardConfig, args: SessionArgs) -> StoryboardResult<()> {
    let (mut board, events) = build_board(config, &args.board)?;
    let progress = spawn_progress(events);

    if let Some(path) = &args.story {
        generate(&mut board, path).await;
    }

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print_prompt();
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Failed to read input: {}", e);
                break;
            }
        };

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(message) => {
                if !message.is_empty() {
                    eprintln!("{}", message);
                }
                continue;
            }
        };
        debug!(?command, "Session command");

        if command == SessionCommand::Quit {
            break;
        }
        if let Err(e) = execute(&mut board, command, &args.output).await {
            eprintln!("{}", e);
        }
    }

    drop(board);
    progress.await.ok();
    Ok(())
}

fn print_prompt() {
    use std::io::Write;
    print!("storyboard> ");
    std::io::stdout().flush().ok();
}

async fn generate(board: &mut Storyboard<GeminiClient>, path: &Path) {
    let story = match read_story(path) {
        Ok(story) => story,
        Err(e) => {
            eprintln!("{}", e);
            return;
        }
    };

    match board.generate_story(&story).await {
        Ok(count) => println!("Generated {} scenes.", count),
        Err(e) => eprintln!("{}", e),
    }
}

async fn execute(
    board: &mut Storyboard<GeminiClient>,
    command: SessionCommand,
    output: &Path,
) -> StoryboardResult<()> {
    match command {
        SessionCommand::Story(path) => generate(board, &path).await,
        SessionCommand::List => {
            if board.scenes().is_empty() {
                println!("No scenes yet.");
            }
            for (i, scene) in board.scenes().iter().enumerate() {
                let mark = if scene.has_image() { "*" } else { " " };
                println!("{:>3}{} {}", i + 1, mark, scene.prompt());
            }
        }
        SessionCommand::Refs => {
            for kind in [ReferenceKind::Character, ReferenceKind::Background] {
                let references = board.references().get(kind);
                if references.is_empty() {
                    println!("{}: none", kind);
                    continue;
                }
                println!("{}:", kind);
                for (i, reference) in references.iter().enumerate() {
                    println!("{:>3} {} ({})", i + 1, reference.label(), reference.image().mime());
                }
            }
        }
        SessionCommand::RefAdd(kind, spec) => {
            let image = load_image(spec.path())?;
            let store = board.references_mut();
            let reference = match spec.label() {
                Some(label) => store.add_labeled(kind, label, image)?,
                None => store.add(kind, image)?,
            };
            println!("Added {} reference '{}'.", kind, reference.label());
        }
        SessionCommand::RefLabel(kind, n, label) => {
            let id = reference_id(board, kind, n)?;
            board.references_mut().relabel(kind, id, label.clone())?;
            println!("{} reference {} is now '{}'.", kind, n, label);
        }
        SessionCommand::RefRemove(kind, n) => {
            let id = reference_id(board, kind, n)?;
            let removed = board.references_mut().remove(kind, id)?;
            println!("Removed {} reference '{}'.", kind, removed.label());
        }
        SessionCommand::Show(n) => {
            let id = board.state().id_at(n)?;
            if let Some(scene) = board.state().scene(id) {
                println!("Scene {} [{}]", n, scene.status());
                println!("{}", scene.prompt());
                match scene.current_image() {
                    Some(image) => println!("Image: {} ({} bytes)", image.mime(), image.len()),
                    None => println!("Image: none"),
                }
            }
        }
        SessionCommand::Edit(n, prompt) => {
            let id = board.state().id_at(n)?;
            board.edit_prompt(id, prompt)?;
            println!("Scene {} updated. Use regen {} to render it.", n, n);
        }
        SessionCommand::Regen(n) => {
            let id = board.state().id_at(n)?;
            if board.regenerate(id).await? {
                println!("Scene {} rendered.", n);
            } else {
                println!("Scene {} could not be rendered; the previous image was kept.", n);
            }
        }
        SessionCommand::Delete(n) => {
            let id = board.state().id_at(n)?;
            board.delete_scene(id)?;
            println!("Scene {} deleted.", n);
        }
        SessionCommand::Style(style) => {
            board.set_style(style.clone());
            if style.is_empty() {
                println!("Style override cleared.");
            } else {
                println!("Style: {}", style);
            }
        }
        SessionCommand::Ratio(ratio) => {
            board.set_aspect_ratio(ratio);
            println!("Aspect ratio: {}", ratio);
        }
        SessionCommand::Export { sketch } => {
            let archive = board.export(sketch).await?;
            let path = archive.write_to(output).await?;
            println!("Wrote {} ({} scenes)", path.display(), archive.entries().len());
        }
        SessionCommand::Guide => println!("{}", PROMPT_GUIDE),
        SessionCommand::Help => println!("{}", HELP),
        SessionCommand::Quit => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scene_commands() {
        assert_eq!("show 2".parse(), Ok(SessionCommand::Show(2)));
        assert_eq!("regen 10".parse(), Ok(SessionCommand::Regen(10)));
        assert_eq!("DELETE 1".parse(), Ok(SessionCommand::Delete(1)));
        assert_eq!(
            "edit 3   A lighthouse at dusk".parse(),
            Ok(SessionCommand::Edit(3, "A lighthouse at dusk".to_string()))
        );
    }

    #[test]
    fn rejects_bad_scene_numbers() {
        assert!("show".parse::<SessionCommand>().is_err());
        assert!("show 0".parse::<SessionCommand>().is_err());
        assert!("regen two".parse::<SessionCommand>().is_err());
        assert!("edit 2".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn parses_settings_and_export() {
        assert_eq!("style".parse(), Ok(SessionCommand::Style(String::new())));
        assert_eq!(
            "style ink wash, muted".parse(),
            Ok(SessionCommand::Style("ink wash, muted".to_string()))
        );
        assert_eq!("ratio 1:1".parse(), Ok(SessionCommand::Ratio(AspectRatio::Square1x1)));
        assert!("ratio 2:1".parse::<SessionCommand>().is_err());
        assert_eq!("export".parse(), Ok(SessionCommand::Export { sketch: false }));
        assert_eq!("export sketch".parse(), Ok(SessionCommand::Export { sketch: true }));
        assert!("export pdf".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn parses_reference_commands() {
        assert_eq!(
            "ref add character Mira=refs/mira.png".parse(),
            Ok(SessionCommand::RefAdd(
                ReferenceKind::Character,
                "Mira=refs/mira.png".parse().unwrap()
            ))
        );
        assert_eq!(
            "ref add bg refs/harbour.jpg".parse(),
            Ok(SessionCommand::RefAdd(
                ReferenceKind::Background,
                "refs/harbour.jpg".parse().unwrap()
            ))
        );
        assert_eq!(
            "ref label character 2 Captain Reyes".parse(),
            Ok(SessionCommand::RefLabel(
                ReferenceKind::Character,
                2,
                "Captain Reyes".to_string()
            ))
        );
        assert_eq!(
            "ref rm background 1".parse(),
            Ok(SessionCommand::RefRemove(ReferenceKind::Background, 1))
        );
    }

    #[test]
    fn rejects_bad_reference_commands() {
        assert!("ref".parse::<SessionCommand>().is_err());
        assert!("ref add character".parse::<SessionCommand>().is_err());
        assert!("ref add prop hat.png".parse::<SessionCommand>().is_err());
        assert!("ref label character 1".parse::<SessionCommand>().is_err());
        assert!("ref rm character 0".parse::<SessionCommand>().is_err());
        assert!("ref move character 1".parse::<SessionCommand>().is_err());
    }

    #[test]
    fn guide_is_a_command() {
        assert_eq!("guide".parse(), Ok(SessionCommand::Guide));
        assert!(PROMPT_GUIDE.contains("[CHARACTER: label]"));
    }

    #[test]
    fn blank_line_is_silent() {
        assert_eq!("   ".parse::<SessionCommand>(), Err(String::new()));
        assert!("dance".parse::<SessionCommand>().is_err());
    }
}
