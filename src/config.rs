/// External configuration loader.
///
/// Reads an optional `config.toml` from the executable's directory, the
/// current directory or `$XDG_CONFIG_HOME/termsnake`. Falls back to
/// defaults if the file is missing or incomplete. Board size and tick
/// rate are fixed and not read from here.

use serde::Deserialize;
use std::path::PathBuf;

use crossterm::style::Color;

use crate::ui::theme::{Style, Theme};

const APP_DIR: &str = "termsnake";
const CONFIG_FILE: &str = "config.toml";

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub theme: Theme,
    /// Fixed seed for food placement; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub log: LogConfig,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub file: PathBuf,
    /// `EnvFilter` directive, used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig::from_toml(TomlConfig::default(), &mut Vec::new())
    }
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    theme: TomlTheme,
    #[serde(default)]
    game: TomlGame,
    #[serde(default)]
    log: TomlLog,
}

#[derive(Deserialize, Debug, Default)]
struct TomlTheme {
    #[serde(default)]
    border: TomlStyle,
    #[serde(default)]
    head: TomlStyle,
    #[serde(default)]
    body: TomlStyle,
    #[serde(default)]
    food: TomlStyle,
    #[serde(default)]
    text: TomlStyle,
}

#[derive(Deserialize, Debug, Default)]
struct TomlStyle {
    fg: Option<String>,
    bg: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlGame {
    seed: Option<u64>,
}

#[derive(Deserialize, Debug)]
struct TomlLog {
    #[serde(default = "default_log_file")]
    file: String,
    #[serde(default = "default_log_level")]
    level: String,
}

// ── Defaults ──

fn default_log_file() -> String {
    std::env::temp_dir().join("termsnake.log").to_string_lossy().into_owned()
}
fn default_log_level() -> String { "info".into() }

impl Default for TomlLog {
    fn default() -> Self {
        TomlLog {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Problems are reported on stderr, before the terminal is taken over,
    /// and never stop the game.
    pub fn load() -> Self {
        let mut warnings = Vec::new();
        let config = load_toml(&candidate_dirs(), &mut warnings);
        for w in &warnings {
            eprintln!("Warning: {w}");
        }
        config
    }

    /// Parse config text. Unknown colour names fall back to defaults and
    /// are reported in `warnings`.
    pub fn from_toml_str(text: &str, warnings: &mut Vec<String>) -> Result<Self, toml::de::Error> {
        let toml_cfg = toml::from_str::<TomlConfig>(text)?;
        Ok(GameConfig::from_toml(toml_cfg, warnings))
    }

    fn from_toml(cfg: TomlConfig, warnings: &mut Vec<String>) -> Self {
        let defaults = Theme::default();
        let t = &cfg.theme;
        let theme = Theme {
            border: resolve_style("border", &t.border, defaults.border, warnings),
            head: resolve_style("head", &t.head, defaults.head, warnings),
            body: resolve_style("body", &t.body, defaults.body, warnings),
            food: resolve_style("food", &t.food, defaults.food, warnings),
            text: resolve_style("text", &t.text, defaults.text, warnings),
        };

        GameConfig {
            theme,
            seed: cfg.game.seed,
            log: LogConfig {
                file: PathBuf::from(cfg.log.file),
                level: cfg.log.level,
            },
        }
    }
}

fn resolve_style(name: &str, raw: &TomlStyle, default: Style, warnings: &mut Vec<String>) -> Style {
    let mut pick = |slot: &str, value: &Option<String>, fallback: Color| match value {
        None => fallback,
        Some(s) => parse_color(s).unwrap_or_else(|| {
            warnings.push(format!("theme.{name}.{slot}: unknown colour {s:?}"));
            fallback
        }),
    };
    let fg = pick("fg", &raw.fg, default.fg);
    let bg = pick("bg", &raw.bg, default.bg);
    Style::new(fg, bg)
}

/// Colour names as crossterm spells them (`dark_blue`, `grey`, ...),
/// plus `reset`/`default` and `#rrggbb`.
pub fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if s.eq_ignore_ascii_case("reset") || s.eq_ignore_ascii_case("default") {
        return Some(Color::Reset);
    }
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        return Some(Color::Rgb { r: byte(0)?, g: byte(2)?, b: byte(4)? });
    }
    Color::try_from(s).ok()
}

/// Candidate directories to search: exe dir + CWD + XDG config dir (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // 1. Directory of the running executable
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    // 2. Current working directory
    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    // 3. XDG config home (~/.config/termsnake)
    let xdg = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")));
    if let Some(base) = xdg {
        let dir = base.join(APP_DIR);
        if dir.is_dir() && !dirs.iter().any(|d| d == &dir) {
            dirs.push(dir);
        }
    }

    dirs
}

/// Search for config.toml in candidate directories.
/// The first readable file wins; a parse error means defaults.
fn load_toml(search_dirs: &[PathBuf], warnings: &mut Vec<String>) -> GameConfig {
    for dir in search_dirs {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            continue;
        }
        match std::fs::read_to_string(&path) {
            Ok(text) => match GameConfig::from_toml_str(&text, warnings) {
                Ok(cfg) => return cfg,
                Err(e) => {
                    warnings.push(format!("{} parse error: {e}", path.display()));
                    warnings.push("Using default settings.".into());
                    return GameConfig::default();
                }
            },
            Err(e) => {
                warnings.push(format!("could not read {}: {e}", path.display()));
            }
        }
    }
    GameConfig::default()
}
