use crate::app::cli::Cli;
use crate::app::models::{
    FilterConfig, DEFAULT_IGNORED_DIRS, DEFAULT_IGNORED_EXTENSIONS, DEFAULT_IGNORED_FILES,
    DEFAULT_OUTPUT,
};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug)]
struct PresetsFile {
    #[serde(flatten)]
    presets: HashMap<String, PresetConfig>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    output: Option<PathBuf>,
    ignore_dirs: Option<Vec<String>>,
    ignore_extensions: Option<Vec<String>>,
    ignore_files: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    no_default_ignores: Option<bool>,
    gitignore: Option<bool>,
}

fn default_presets_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ai_dump").join("presets.toml"))
}

/// Loads named presets. An explicit path must exist; the default one may not.
pub fn load_presets_file(explicit: Option<&Path>) -> Result<HashMap<String, PresetConfig>> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = default_presets_path()?;
            if !path.exists() {
                return Ok(HashMap::new());
            }
            path
        }
    };

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config at {:?}", config_path))?;

    parse_presets(&content).with_context(|| format!("Failed to parse {:?}", config_path))
}

fn parse_presets(content: &str) -> Result<HashMap<String, PresetConfig>> {
    let parsed: PresetsFile = toml::from_str(content)?;
    Ok(parsed.presets)
}

fn merge_sets(
    defaults: &[&str],
    use_defaults: bool,
    preset_vec: Option<Vec<String>>,
    cli_vec: Option<Vec<String>>,
) -> BTreeSet<String> {
    let mut combined: BTreeSet<String> = if use_defaults {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        BTreeSet::new()
    };
    combined.extend(preset_vec.unwrap_or_default());
    combined.extend(cli_vec.unwrap_or_default());
    combined
}

fn merge_vecs(preset_vec: Option<Vec<String>>, cli_vec: Option<Vec<String>>) -> Vec<String> {
    let mut combined = preset_vec.unwrap_or_default();
    if let Some(mut cli_items) = cli_vec {
        combined.append(&mut cli_items);
    }
    let mut seen = std::collections::HashSet::new();
    combined.retain(|item| seen.insert(item.clone()));
    combined
}

fn with_leading_dot(ext: String) -> String {
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// Builds the final filter configuration: defaults, then preset, then CLI.
/// The preset is the one named on the command line, falling back to the
/// project directory's name.
pub fn resolve_config(
    cli: Cli,
    project_name: Option<&str>,
    presets: &HashMap<String, PresetConfig>,
) -> Result<FilterConfig> {
    let preset = match cli.preset.as_deref() {
        Some(name) => presets
            .get(name)
            .cloned()
            .with_context(|| format!("Unknown preset '{}'", name))?,
        None => project_name
            .and_then(|name| presets.get(name))
            .cloned()
            .unwrap_or_default(),
    };

    let use_defaults = !(cli.no_default_ignores || preset.no_default_ignores.unwrap_or(false));
    let normalize = |exts: Option<Vec<String>>| {
        exts.map(|v| v.into_iter().map(with_leading_dot).collect::<Vec<_>>())
    };

    let config = FilterConfig {
        output: cli
            .output
            .or(preset.output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
        ignored_dir_names: merge_sets(
            DEFAULT_IGNORED_DIRS,
            use_defaults,
            preset.ignore_dirs,
            cli.ignore_dirs,
        ),
        ignored_extensions: merge_sets(
            DEFAULT_IGNORED_EXTENSIONS,
            use_defaults,
            normalize(preset.ignore_extensions),
            normalize(cli.ignore_extensions),
        ),
        ignored_file_names: merge_sets(
            DEFAULT_IGNORED_FILES,
            use_defaults,
            preset.ignore_files,
            cli.ignore_files,
        ),
        exclude: merge_vecs(preset.exclude, cli.exclude),
        respect_gitignore: cli.gitignore || preset.gitignore.unwrap_or(false),
    };

    Ok(config)
}
