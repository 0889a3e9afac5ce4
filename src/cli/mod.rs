//! Command-line interface for plotseed.
//!
//! Provides commands for importing a plot, re-parsing previously
//! downloaded content, inspecting single pieces and parsing local files.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::adapters::ZipExtractor;
use crate::config::{self, ResolvedConfig};
use crate::core::{frontmatter, walker, ImportSettings, Importer, PlotContent};
use crate::domain::{ContentTree, FileEntry, Piece, PieceField, TreeStats};
use crate::library::Library;

/// plotseed - Demo content importer
#[derive(Parser, Debug)]
#[command(name = "plotseed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download the content archive, extract it and parse a plot
    Import {
        /// Plot name or wizard scenario (e.g. color-line, problem-org)
        plot: String,

        /// Print the parsed tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parse a plot from the last downloaded archive (no download)
    Reparse {
        /// Plot name or wizard scenario
        plot: String,

        /// Print the parsed tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one piece of a previously downloaded plot
    Show {
        /// Plot name or wizard scenario
        plot: String,

        /// Piece name (file name without .md)
        piece: String,

        /// Section (directory) the piece lives in
        #[arg(short, long)]
        section: Option<String>,

        /// Print only this field (title, lead, content, slug, url, thumb, tags, cat, ...)
        #[arg(short, long)]
        field: Option<String>,

        /// Print the body rendered to HTML
        #[arg(long)]
        html: bool,
    },

    /// Parse a single local front-matter file
    Parse {
        /// File to parse
        file: PathBuf,

        /// Section to attribute the piece to
        #[arg(short, long, default_value = "")]
        section: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Import { plot, json } => import_plot(&plot, json).await,
            Commands::Reparse { plot, json } => reparse_plot(&plot, json),
            Commands::Show {
                plot,
                piece,
                section,
                field,
                html,
            } => show_piece(&plot, &piece, section.as_deref(), field.as_deref(), html),
            Commands::Parse { file, section } => parse_local_file(&file, &section),
            Commands::Config => show_config(),
        }
    }
}

type DefaultPlot = PlotContent<Library, ZipExtractor>;

/// Build the facade for a plot with the configured collaborators
fn open_plot(config: &ResolvedConfig, plot: &str) -> Result<DefaultPlot> {
    let library = Library::from_config(config)?;
    let extractor = ZipExtractor::new(config.fs_method);
    let settings: ImportSettings = config.import_settings();

    Ok(PlotContent::new(
        plot,
        &config.plot_aliases,
        Importer::new(library, extractor, settings),
    ))
}

/// Download, extract and parse a plot
async fn import_plot(plot: &str, json: bool) -> Result<()> {
    let config = config::config()?;
    let mut content = open_plot(config, plot)?;
    let plot_name = content.plot_name().to_string();

    let tree = content
        .import_content()
        .await
        .with_context(|| format!("Import of plot '{}' failed", plot))?;

    print_tree(tree, &plot_name, json)
}

/// Parse a plot from earlier extracted files
fn reparse_plot(plot: &str, json: bool) -> Result<()> {
    let config = config::config()?;
    let mut content = open_plot(config, plot)?;
    let plot_name = content.plot_name().to_string();

    let tree = content
        .import_downloaded_content()
        .with_context(|| format!("Re-parse of plot '{}' failed", plot))?;

    print_tree(tree, &plot_name, json)
}

fn print_tree(tree: &ContentTree, plot_name: &str, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(tree)?);
        return Ok(());
    }

    let Some(plot) = tree.plot(plot_name) else {
        println!("Plot '{}' is empty", plot_name);
        return Ok(());
    };

    let stats = TreeStats::collect(plot);
    println!("Plot: {}", plot_name);
    println!("Sections: {}", stats.dirs);
    println!("Pieces: {}", stats.pieces);
    println!("Attachments: {}", stats.attachments);
    println!("Other files: {}", stats.other_files);

    println!("\n{:<24} {:<32} {:<10}", "SECTION", "KEY", "KIND");
    println!("{}", "-".repeat(68));
    for (key, entry) in plot {
        match entry {
            FileEntry::Dir(dir) => {
                for (inner_key, inner) in dir {
                    println!("{:<24} {:<32} {:<10}", key, inner_key, entry_kind(inner));
                }
            }
            leaf => println!("{:<24} {:<32} {:<10}", "-", key, entry_kind(leaf)),
        }
    }

    Ok(())
}

fn entry_kind(entry: &FileEntry) -> &'static str {
    match entry {
        FileEntry::Dir(_) => "dir",
        FileEntry::File(leaf) if leaf.piece.is_some() => "piece",
        FileEntry::File(leaf) if leaf.attachment_id.is_some() => "image",
        FileEntry::File(_) => "file",
    }
}

/// Show a single piece from the last download
fn show_piece(
    plot: &str,
    piece_name: &str,
    section: Option<&str>,
    field: Option<&str>,
    html: bool,
) -> Result<()> {
    let field = field.map(str::parse::<PieceField>).transpose()?;

    let config = config::config()?;
    let mut content = open_plot(config, plot)?;
    content
        .import_downloaded_content()
        .with_context(|| format!("Re-parse of plot '{}' failed", plot))?;

    let Some(piece) = content.get_piece(piece_name, section) else {
        anyhow::bail!(
            "Piece '{}' not found in plot '{}'{}",
            piece_name,
            content.plot_name(),
            section.map(|s| format!(" section '{}'", s)).unwrap_or_default()
        );
    };

    if let Some(field) = field {
        let value = content
            .get_val(piece_name, field, section)
            .map(|v| v.to_string())
            .unwrap_or_default();
        println!("{}", value);
    } else if html {
        println!("{}", content.parse_text(&piece.content));
    } else {
        print_piece(piece)?;
        if let Some(id) = content.get_thumb_attachment_id(piece) {
            eprintln!("[thumb attachment: {}]", id);
        }
    }

    Ok(())
}

/// Parse a local file the way the walker would
fn parse_local_file(file: &Path, section: &str) -> Result<()> {
    let fields = frontmatter::parse_file(file)?;

    let file_name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("Not a file path: {}", file.display()))?;

    let piece = Piece::from_fields(&fields, walker::piece_key(&file_name), section);
    print_piece(&piece)
}

fn print_piece(piece: &Piece) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(piece)?);
    eprintln!("[post slug: {}]", piece.post_slug());
    Ok(())
}

/// Show resolved configuration
fn show_config() -> Result<()> {
    let config = config::config()?;

    println!("plotseed configuration");
    println!("======================");
    println!();

    if let Some(ref path) = config.config_file {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: (none - using defaults)");
    }
    println!();

    println!("Paths:");
    println!("  home:      {}", config.home.display());
    println!("  catalog:   {}", config::paths::catalog_path(&config.home).display());
    println!("  library:   {}", config::paths::library_dir(&config.home).display());
    println!("  uploads:   {}", config.uploads.display());
    println!("  extracted: {}", config::paths::extracted_dir()?.display());
    println!();

    println!("Source:");
    println!("  archive:   {}", config.archive_url);
    println!("  fs method: {}", config.fs_method);
    println!();

    println!("Plot aliases:");
    let mut aliases: Vec<_> = config.plot_aliases.iter().collect();
    aliases.sort();
    for (alias, plot) in aliases {
        println!("  {} -> {}", alias, plot);
    }

    Ok(())
}
