//! CLI for quillmark - Markdown preview renderer

use clap::Parser;
use quillmark::host::{open_document, word_count, word_count_label, PromptLibrary};
use quillmark::{extract_links, MarkdownToHtml, RenderOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input Markdown file path (not needed with --prompt)
    #[arg(required_unless_present = "prompt")]
    input: Option<PathBuf>,

    /// Output HTML file path (optional, prints to stdout if not specified)
    output: Option<PathBuf>,

    /// Render plain anchors instead of opening links in a new context
    #[arg(long)]
    no_external_links: bool,

    /// Keep literal <br> and <hr> escaped
    #[arg(long)]
    keep_escaped_tags: bool,

    /// List the links found in the rendered preview instead of printing HTML
    #[arg(long)]
    links: bool,

    /// Print the word count of the input instead of rendering it
    #[arg(long)]
    word_count: bool,

    /// Print a random writing prompt
    #[arg(long)]
    prompt: bool,

    /// JSON prompt library (defaults to the built-in prompts)
    #[arg(long, requires = "prompt")]
    prompts_file: Option<PathBuf>,

    /// Restrict --prompt to one category
    #[arg(long, requires = "prompt")]
    category: Option<String>,

    /// Enable info-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> quillmark::Result<()> {
    if args.prompt {
        let library = match &args.prompts_file {
            Some(path) => PromptLibrary::load(path)?,
            None => PromptLibrary::default(),
        };
        let prompt = library.random(&mut rand::thread_rng(), args.category.as_deref())?;
        println!("{}", prompt);
        return Ok(());
    }

    let Some(input) = args.input else {
        return Ok(());
    };
    let markdown = open_document(&input)?;

    if args.word_count {
        println!("{}", word_count_label(word_count(&markdown)));
        return Ok(());
    }

    let options = RenderOptions {
        open_links_externally: !args.no_external_links,
        restore_safe_tags: !args.keep_escaped_tags,
        ..Default::default()
    };
    let html = MarkdownToHtml::new(options).convert(&markdown);

    if args.links {
        for link in extract_links(&html) {
            println!("{}\t{}", link.href, link.text);
        }
        return Ok(());
    }

    if let Some(output) = args.output {
        std::fs::write(&output, &html)?;
        println!("Successfully rendered to {:?}", output);
    } else {
        println!("{}", html);
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
