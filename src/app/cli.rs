use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about = "Concatenate a project's source files into one text dump for LLMs"
)]
pub struct Cli {
    /// Directory to walk (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Output file, relative to the current directory [default: ai_dump.txt]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Use a named preset from presets.toml
    #[arg(long)]
    pub preset: Option<String>,

    /// Read presets from this file instead of ~/.config/ai_dump/presets.toml
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Additional directory name to skip entirely (repeatable)
    #[arg(long = "ignore-dir", action = ArgAction::Append)]
    pub ignore_dirs: Option<Vec<String>>,

    /// Additional file extension to skip, e.g. '.lock' or 'lock' (repeatable)
    #[arg(long = "ignore-ext", action = ArgAction::Append)]
    pub ignore_extensions: Option<Vec<String>>,

    /// Additional exact file name to skip (repeatable)
    #[arg(long = "ignore-file", action = ArgAction::Append)]
    pub ignore_files: Option<Vec<String>>,

    /// Glob pattern for files or directories to exclude, e.g. 'src/gen/**' (repeatable)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Option<Vec<String>>,

    /// Start from empty ignore lists instead of the built-in defaults
    #[arg(long)]
    pub no_default_ignores: bool,

    /// Also honor .gitignore and .ignore files
    #[arg(long)]
    pub gitignore: bool,
}
