use crate::{
    app::FolioApp,
    carousel::{StartPosition, SystemClock},
    config::{FolioConfig, HeroConfig},
    render::{
        banner::BannerGenerator,
        layout::{HeroLayout, Lettering},
        terminal::TerminalGuard,
    },
};
use anyhow::Context;
use clap::Parser;
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
    sync::Arc,
};

mod app;
mod carousel;
mod config;
mod interpolate;
mod render;

/// Show a personal portfolio page in the terminal.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The YAML config to load. Defaults to the user's config directory.
    config: Option<PathBuf>,

    /// Comma separated words to cycle through in the hero line.
    #[clap(long, value_delimiter = ',')]
    words: Option<Vec<String>>,

    /// Milliseconds between words.
    #[clap(long)]
    delay: Option<u64>,

    /// Seconds spent easing from one word to the next.
    #[clap(long)]
    speed: Option<f64>,

    /// The word shown first.
    #[clap(long, value_enum)]
    start: Option<StartPosition>,

    /// Draw the hero line with a FIGlet font, by name or path.
    #[clap(long)]
    font: Option<String>,

    /// Print the first frame as plain text and exit.
    #[clap(long)]
    print: bool,

    /// Write logs to this file. Logs are discarded while the page is shown otherwise.
    #[clap(long, env = "TERMFOLIO_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Print the configuration as YAML and exit: the defaults, merged with the config file and flags.
    #[clap(long)]
    generate_config: bool,
}

impl Cli {
    fn apply_overrides(&self, hero: &mut HeroConfig) {
        if let Some(words) = &self.words {
            hero.words = words.iter().map(|word| word.trim().to_string()).filter(|word| !word.is_empty()).collect();
        }
        if let Some(delay) = self.delay {
            hero.transition_delay_ms = delay;
        }
        if let Some(speed) = self.speed {
            hero.transition_speed_sec = speed;
        }
        if let Some(start) = self.start {
            hero.start = start;
        }
        if let Some(font) = &self.font {
            hero.font = Some(font.clone());
        }
    }

    fn is_interactive(&self) -> bool {
        !self.print && !self.generate_config
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        // Anything written to stderr would land on top of the page.
        None if interactive => {
            builder.filter_level(log::LevelFilter::Off);
        }
        None => {}
    }
    builder.try_init().context("initializing logger")
}

fn build_layout(hero: &HeroConfig) -> anyhow::Result<HeroLayout> {
    let words = hero.word_list()?;
    let layout = match &hero.font {
        Some(font) => {
            let generator = BannerGenerator::new(font).with_context(|| format!("loading font '{font}'"))?;
            HeroLayout::new(&hero.prefix, &hero.suffix, &words, &Lettering::Banner(&generator))
        }
        None => HeroLayout::new(&hero.prefix, &hero.suffix, &words, &Lettering::Plain),
    };
    Ok(layout)
}

/// The config file (or the built-in defaults) with the command line applied on top.
fn effective_config(cli: &Cli) -> anyhow::Result<FolioConfig> {
    let (mut config, source) = FolioConfig::discover(cli.config.as_deref())?;
    log::info!("loaded config from {source}");
    cli.apply_overrides(&mut config.hero);
    config.validate().context("invalid command line overrides")?;
    Ok(config)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_logging(cli.log_file.as_deref(), cli.is_interactive())?;

    let config = effective_config(&cli)?;
    log::debug!("cycling {} word(s) starting at the {} word", config.hero.words.len(), config.hero.start);

    if cli.generate_config {
        print!("{}", config.to_yaml()?);
        return Ok(());
    }

    let layout = Arc::new(build_layout(&config.hero)?);
    let app = FolioApp::new(&config, layout, SystemClock::default())?;
    if cli.print {
        let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
        println!("{}", app.frame(width, height)?.to_plain_text());
        app.shutdown();
        return Ok(());
    }

    let mut terminal = TerminalGuard::acquire(io::stdout()).context("setting up terminal")?;
    let result = app.run(&mut terminal);
    terminal.restore().context("restoring terminal")?;
    result
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_replace_hero_settings() {
        let cli = Cli::parse_from(["termfolio", "--words", "rust, tools ,,cli", "--delay", "250", "--start", "first"]);
        let mut hero = HeroConfig::default();
        cli.apply_overrides(&mut hero);
        assert_eq!(hero.words, ["rust", "tools", "cli"]);
        assert_eq!(hero.transition_delay_ms, 250);
        assert_eq!(hero.start, StartPosition::First);
        assert_eq!(hero.transition_speed_sec, 0.3);
    }

    #[test]
    fn print_and_generate_are_not_interactive() {
        assert!(Cli::parse_from(["termfolio"]).is_interactive());
        assert!(!Cli::parse_from(["termfolio", "--print"]).is_interactive());
        assert!(!Cli::parse_from(["termfolio", "--generate-config"]).is_interactive());
    }

    #[test]
    fn generated_config_includes_file_and_flags() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hero:\n  suffix: stuff.").unwrap();
        let path = file.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["termfolio", &path, "--generate-config", "--delay", "250"]);

        let config = effective_config(&cli).unwrap();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("suffix: stuff."), "{yaml}");
        assert!(yaml.contains("transition_delay_ms: 250"), "{yaml}");
        assert_eq!(FolioConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn plain_layout_without_font() {
        let layout = build_layout(&HeroConfig::default()).unwrap();
        assert_eq!(layout.line_height(), 1);
    }

    #[test]
    fn unknown_font_fails_layout() {
        let hero = HeroConfig { font: Some("no_such_font_here".into()), ..HeroConfig::default() };
        assert!(build_layout(&hero).is_err());
    }
}
