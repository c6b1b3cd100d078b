//! pagecraft CLI - create, inspect and script layout documents

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use pagecraft::model::DocumentVariant;
use pagecraft::render;
use pagecraft::{
    load_file, save_file, Document, EditOutcome, Editor, EditorCommand, EditorOptions, Element,
    ElementKind, JsonFormat, PageSize,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "pagecraft")]
#[command(version)]
#[command(about = "Create, inspect and script page-layout documents", long_about = None)]
struct Cli {
    /// Editor options file (JSON)
    #[arg(long, global = true, value_name = "FILE", env = "PAGECRAFT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a blank document
    New {
        /// Output file
        #[arg(value_name = "FILE")]
        output: PathBuf,

        /// Document name
        #[arg(short, long)]
        name: Option<String>,

        /// Sheet size
        #[arg(long, value_enum, default_value = "a4")]
        size: SheetSize,

        /// Rotate the sheet
        #[arg(long)]
        landscape: bool,

        /// Style preset
        #[arg(long, value_enum, default_value = "classic")]
        variant: Variant,
    },

    /// Show document information
    Info {
        /// Document file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Validate and re-emit a document as JSON
    Json {
        /// Document file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the canvas display list of a page
    Layout {
        /// Document file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Zoom percentage
        #[arg(short, long)]
        zoom: Option<u16>,
    },

    /// Add or remove pages
    Pages {
        #[command(subcommand)]
        action: PagesAction,
    },

    /// Apply a JSON script of editor commands
    Replay {
        /// Document file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Script file (JSON array of commands)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output file (overwrites the input if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Apply without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
enum PagesAction {
    /// Append blank pages
    Add {
        /// Document file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of pages to add
        #[arg(short, long, default_value = "1")]
        count: usize,
    },

    /// Remove a page
    Delete {
        /// Document file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Page number (1-based)
        #[arg(value_name = "PAGE")]
        page: usize,
    },
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SheetSize {
    /// ISO A4 (210 x 297 mm)
    A4,
    /// ISO A5 (148 x 210 mm)
    A5,
    /// US Letter
    Letter,
    /// US Legal
    Legal,
}

impl From<SheetSize> for PageSize {
    fn from(size: SheetSize) -> Self {
        match size {
            SheetSize::A4 => PageSize::a4(),
            SheetSize::A5 => PageSize::a5(),
            SheetSize::Letter => PageSize::letter(),
            SheetSize::Legal => PageSize::legal(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Blue accent
    Classic,
    /// Teal accent
    Modern,
    /// Monochrome
    Minimal,
    /// Contracts
    Formal,
}

impl From<Variant> for DocumentVariant {
    fn from(variant: Variant) -> Self {
        match variant {
            Variant::Classic => DocumentVariant::Classic,
            Variant::Modern => DocumentVariant::Modern,
            Variant::Minimal => DocumentVariant::Minimal,
            Variant::Formal => DocumentVariant::Formal,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = load_options(cli.config.as_deref()).and_then(|options| match cli.command {
        Commands::New {
            output,
            name,
            size,
            landscape,
            variant,
        } => cmd_new(&output, name, size, landscape, variant),
        Commands::Info { input } => cmd_info(&input),
        Commands::Json {
            input,
            output,
            compact,
        } => cmd_json(&input, output.as_deref(), compact),
        Commands::Layout { input, page, zoom } => cmd_layout(&input, page, zoom, options),
        Commands::Pages { action } => match action {
            PagesAction::Add { input, count } => cmd_pages_add(&input, count, options),
            PagesAction::Delete { input, page } => cmd_pages_delete(&input, page, options),
        },
        Commands::Replay {
            input,
            script,
            output,
            dry_run,
        } => cmd_replay(&input, &script, output.as_deref(), dry_run, options),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn load_options(path: Option<&Path>) -> CliResult<EditorOptions> {
    match path {
        Some(path) => Ok(EditorOptions::from_json_file(path)?),
        None => Ok(EditorOptions::default()),
    }
}

fn cmd_new(
    output: &Path,
    name: Option<String>,
    size: SheetSize,
    landscape: bool,
    variant: Variant,
) -> CliResult<()> {
    let mut page_size: PageSize = size.into();
    if landscape {
        page_size = page_size.landscape();
    }
    let mut doc = Document::new()
        .with_page_size(page_size)
        .with_variant(variant.into());
    if let Some(name) = name {
        doc.name = name;
    }

    save_file(&doc, output)?;
    println!("{} {}", "Created".green(), output.display());
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult<()> {
    let doc = load_file(input)?;
    let elements: Vec<&Element> = doc.pages.iter().flat_map(|p| &p.elements).collect();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Name".bold(), doc.name);
    println!("{}: {:?}", "Variant".bold(), doc.variant);
    println!(
        "{}: {} x {} mm",
        "Page size".bold(),
        doc.page_size.width,
        doc.page_size.height
    );
    println!("{}: {}", "Pages".bold(), doc.page_count());
    println!(
        "{}: {}",
        "Header".bold(),
        if doc.header.enabled { "Yes" } else { "No" }
    );
    println!(
        "{}: {}",
        "Footer".bold(),
        if doc.footer.enabled { "Yes" } else { "No" }
    );
    println!("{}: {}", "Created".bold(), doc.created.to_rfc3339());
    println!("{}: {}", "Modified".bold(), doc.modified.to_rfc3339());

    println!();
    println!("{}", "Content".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Elements".bold(), elements.len());
    for kind in ElementKind::ALL {
        let count = elements.iter().filter(|e| e.kind() == kind).count();
        if count > 0 {
            println!("  {} {}: {}", "├─".dimmed(), kind, count);
        }
    }
    let mut keys: Vec<&str> = elements
        .iter()
        .filter_map(|e| match e {
            Element::Variable(v) => Some(v.key.as_str()),
            _ => None,
        })
        .collect();
    keys.sort_unstable();
    keys.dedup();
    if !keys.is_empty() {
        println!("{}: {}", "Variables".bold(), keys.join(", "));
    }

    Ok(())
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> CliResult<()> {
    let doc = load_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_layout(
    input: &Path,
    page: usize,
    zoom: Option<u16>,
    options: EditorOptions,
) -> CliResult<()> {
    let mut editor = Editor::open(load_file(input)?, options);
    if let Some(percent) = zoom {
        editor.set_zoom(percent);
    }
    let index = page_index(page, editor.document().page_count())?;
    editor.go_to_page(index);

    let today = chrono::Local::now().date_naive();
    let list = render::render_page(editor.document(), editor.session(), today)
        .ok_or_else(|| format!("Page {} not found", page))?;
    println!("{}", serde_json::to_string_pretty(&list)?);
    Ok(())
}

fn cmd_pages_add(input: &Path, count: usize, options: EditorOptions) -> CliResult<()> {
    let mut editor = Editor::open(load_file(input)?, options);
    let mut added = 0;
    for _ in 0..count {
        match editor.add_page() {
            EditOutcome::Applied => added += 1,
            EditOutcome::Unchanged => {
                println!("{}", "Page limit reached".yellow());
                break;
            }
            EditOutcome::Refused(reason) => return Err(reason.to_string().into()),
        }
    }

    save_if_dirty(&editor, input)?;
    println!(
        "{} {} page(s), now {}",
        "Added".green(),
        added,
        editor.document().page_count()
    );
    Ok(())
}

fn cmd_pages_delete(input: &Path, page: usize, options: EditorOptions) -> CliResult<()> {
    let mut editor = Editor::open(load_file(input)?, options);
    let index = page_index(page, editor.document().page_count())?;

    match editor.delete_page(index) {
        EditOutcome::Applied => {
            save_if_dirty(&editor, input)?;
            println!("{} page {}", "Deleted".green(), page);
        }
        EditOutcome::Unchanged => println!("{}", "The last page cannot be deleted".yellow()),
        EditOutcome::Refused(reason) => return Err(reason.to_string().into()),
    }
    Ok(())
}

fn cmd_replay(
    input: &Path,
    script: &Path,
    output: Option<&Path>,
    dry_run: bool,
    options: EditorOptions,
) -> CliResult<()> {
    let commands: Vec<EditorCommand> = serde_json::from_str(&fs::read_to_string(script)?)?;
    let mut editor = Editor::open(load_file(input)?, options);

    let summary = replay(&mut editor, &commands);
    println!(
        "{} {} command(s): {} applied, {} unchanged, {} refused",
        "Replayed".cyan(),
        commands.len(),
        summary.applied,
        summary.unchanged,
        summary.refused
    );

    if dry_run {
        println!("{}", "Dry run, nothing written".yellow());
        return Ok(());
    }
    let target = output.unwrap_or(input);
    save_if_dirty(&editor, target)?;
    if editor.is_dirty() {
        println!("{} {}", "Saved to".green(), target.display());
    }
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
struct ReplaySummary {
    applied: usize,
    unchanged: usize,
    refused: usize,
}

fn replay(editor: &mut Editor, commands: &[EditorCommand]) -> ReplaySummary {
    let mut summary = ReplaySummary::default();
    for (i, command) in commands.iter().enumerate() {
        match editor.apply(command) {
            EditOutcome::Applied => summary.applied += 1,
            EditOutcome::Unchanged => summary.unchanged += 1,
            EditOutcome::Refused(reason) => {
                log::warn!("Command {} refused: {}", i + 1, reason);
                summary.refused += 1;
            }
        }
    }
    summary
}

fn save_if_dirty(editor: &Editor, path: &Path) -> CliResult<()> {
    if editor.is_dirty() {
        save_file(editor.document(), path)?;
    }
    Ok(())
}

fn page_index(page: usize, count: usize) -> CliResult<usize> {
    if page == 0 || page > count {
        return Err(format!("Page {} out of range (1-{})", page, count).into());
    }
    Ok(page - 1)
}

fn cmd_version() {
    println!("{} {}", "pagecraft".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Page-layout document tool");
    println!();
    println!("License: MIT");
}
