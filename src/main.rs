//! slideforge – command-line deck → PDF converter.
//!
//! Usage:
//!   slideforge <deck.json> [output] [--html] [--chrome PATH] [--no-sandbox]
//!   slideforge --demo <name> [output] [--html]
//!
//! If `output` is omitted the file is written next to the input with the
//! same stem (e.g. `talk.json` → `talk.pdf`, or `talk.html` with `--html`).

use std::path::{Path, PathBuf};
use std::{env, fs, process};

use slide_forge::deck::Deck;
use slide_forge::document::Document;
use slide_forge::render::{ChromeConfig, ChromeRenderer};
use slide_forge::templates;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut positionals: Vec<PathBuf> = Vec::new();
    let mut demo: Option<String> = None;
    let mut html_only = false;
    let mut chrome = ChromeConfig::default();

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--html" => html_only = true,
            "--no-sandbox" => chrome.sandbox = false,
            "--chrome" => match iter.next() {
                Some(v) => chrome.executable = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--chrome needs a path");
                    process::exit(1);
                }
            },
            "--demo" => match iter.next() {
                Some(v) => demo = Some(v.clone()),
                None => {
                    eprintln!("--demo needs a deck name");
                    print_usage(&args[0]);
                    process::exit(1);
                }
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => positionals.push(PathBuf::from(path)),
        }
    }

    let (input_path, output_path) = match split_positionals(positionals, demo.is_some()) {
        Ok(paths) => paths,
        Err(extra) => {
            eprintln!("Unexpected argument: {}", extra.display());
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let (json, stem_path) = match (&demo, &input_path) {
        (Some(name), _) => match find_demo(name) {
            Some(json) => (json.to_string(), PathBuf::from(name)),
            None => {
                eprintln!("Unknown demo deck: {name}");
                print_usage(&args[0]);
                process::exit(1);
            }
        },
        (None, Some(input)) => match fs::read_to_string(input) {
            Ok(s) => (s, input.clone()),
            Err(e) => {
                eprintln!("Error reading '{}': {e}", input.display());
                process::exit(1);
            }
        },
        (None, None) => {
            eprintln!("Error: no input deck specified.");
            print_usage(&args[0]);
            process::exit(1);
        }
    };

    let output = output_path.unwrap_or_else(|| {
        let mut o = stem_path.clone();
        o.set_extension(if html_only { "html" } else { "pdf" });
        o
    });

    let doc = match Deck::from_json(&json).and_then(|deck| Document::from_deck(&deck)) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error building deck: {e}");
            process::exit(1);
        }
    };
    let pages = doc.page_count();
    for warning in doc.warnings() {
        eprintln!("warning: {warning}");
    }

    let result = if html_only {
        let rendered = doc.render();
        write_markup(&output, &rendered.markup).map(|()| rendered.markup.len())
    } else {
        let renderer = ChromeRenderer::new(chrome);
        match output.to_str() {
            Some(name) => doc
                .write_file(name, &renderer)
                .await
                .and_then(|path| Ok(fs::metadata(path)?.len() as usize)),
            None => {
                eprintln!("Output path is not valid UTF-8: {}", output.display());
                process::exit(1);
            }
        }
    };

    match result {
        Ok(bytes) => eprintln!(
            "Wrote '{}' ({} bytes, {} page{})",
            output.display(),
            bytes,
            pages,
            if pages == 1 { "" } else { "s" }
        ),
        Err(e) => {
            eprintln!("Error writing '{}': {e}", output.display());
            process::exit(1);
        }
    }
}

/// Split positionals into `(input, output)`, independent of where the flags
/// appeared. With `--demo` there is no input, so the first positional is the
/// output. Returns the first surplus argument as the error.
fn split_positionals(
    positionals: Vec<PathBuf>,
    demo: bool,
) -> Result<(Option<PathBuf>, Option<PathBuf>), PathBuf> {
    let mut positionals = positionals.into_iter();
    let input = if demo { None } else { positionals.next() };
    let output = positionals.next();
    match positionals.next() {
        Some(extra) => Err(extra),
        None => Ok((input, output)),
    }
}

fn find_demo(name: &str) -> Option<&'static str> {
    templates::all_decks()
        .into_iter()
        .find(|(n, _)| *n == name)
        .map(|(_, json)| json)
}

fn write_markup(output: &Path, markup: &str) -> slide_forge::Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, markup)?;
    Ok(())
}

fn print_usage(prog: &str) {
    eprintln!("slideforge – slide deck to PDF converter");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <deck.json> [output] [--html] [--chrome PATH] [--no-sandbox]");
    eprintln!("  {prog} --demo <name> [output] [--html]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <deck.json>    Deck to render");
    eprintln!("  [output]       Output path (default: same stem as input with .pdf/.html)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --html         Write the HTML markup instead of printing a PDF");
    eprintln!("  --chrome PATH  Chromium/Chrome executable (default: auto-detect)");
    eprintln!("  --no-sandbox   Launch the browser without its sandbox (containers)");
    eprintln!("  --demo NAME    Use a built-in deck: sales-report, talk, banner");
    eprintln!("  --help         Print this message");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(args: &[&str]) -> Vec<PathBuf> {
        args.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn demo_output_ignores_flag_order() {
        let (input, output) = split_positionals(paths(&["out.pdf"]), true).unwrap();
        assert_eq!(input, None);
        assert_eq!(output, Some(PathBuf::from("out.pdf")));
    }

    #[test]
    fn deck_input_then_output() {
        let (input, output) = split_positionals(paths(&["talk.json", "talk.pdf"]), false).unwrap();
        assert_eq!(input, Some(PathBuf::from("talk.json")));
        assert_eq!(output, Some(PathBuf::from("talk.pdf")));

        let (input, output) = split_positionals(paths(&["talk.json"]), false).unwrap();
        assert_eq!(input, Some(PathBuf::from("talk.json")));
        assert_eq!(output, None);
    }

    #[test]
    fn surplus_positional_is_rejected() {
        let err = split_positionals(paths(&["a.pdf", "b.pdf"]), true).unwrap_err();
        assert_eq!(err, PathBuf::from("b.pdf"));
        let err = split_positionals(paths(&["a.json", "b.pdf", "c.pdf"]), false).unwrap_err();
        assert_eq!(err, PathBuf::from("c.pdf"));
    }

    #[test]
    fn demo_names_resolve() {
        assert!(find_demo("talk").is_some());
        assert!(find_demo("keynote").is_none());
    }
}
