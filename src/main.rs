use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use shuddho::cli::{Cli, Commands, ConfigAction, RenderArgs};
use shuddho::config::{Config, OutputFormat};
use shuddho::correction::handle::{self, EngineHandle};
use shuddho::correction::{CorrectionResult, Mode, batch};
use shuddho::output;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);

    // Config commands must work even when the file is broken or absent.
    if let Commands::Config { action } = &cli.command {
        shuddho::logging::init(cli.verbose, cli.quiet, io::stderr().is_terminal());
        return handle_config_command(action, &config_path);
    }
    if let Commands::Completions { shell } = &cli.command {
        clap_complete::generate(*shell, &mut Cli::command(), "shuddho", &mut io::stdout());
        return Ok(());
    }
    if let Commands::Distance { a, b } = &cli.command {
        println!("{}", shuddho::text::distance(a, b));
        return Ok(());
    }

    let mut config = load_config(&config_path)?;
    if let Some(artifact) = &cli.artifact {
        config.artifact.manifest = Some(artifact.clone());
    }
    let color = config.output.color && io::stdout().is_terminal();
    shuddho::logging::init(cli.verbose, cli.quiet, io::stderr().is_terminal());
    tracing::debug!(version = %shuddho::version_string(), config = %config_path.display(), "starting");

    let manifest = config.artifact_path();
    let engine = EngineHandle::load(&manifest, config.corrector_options())
        .with_context(|| format!("cannot serve without an artifact ({})", manifest.display()))?;
    let engine = handle::install_global(engine)?;

    match cli.command {
        Commands::Correct { text, render } => {
            let mode = render.mode.unwrap_or(config.correction.mode);
            let style = Style::new(&render, &config, color);
            match text {
                Some(text) => style.print(&engine.correct(&text, mode))?,
                None => correct_stdin(engine, mode, &style)?,
            }
        }
        Commands::Batch {
            file,
            render,
            workers,
        } => {
            let mode = render.mode.unwrap_or(config.correction.mode);
            let style = Style::new(&render, &config, color);
            let workers = workers.unwrap_or(config.output.workers);
            correct_file(engine, &file, mode, workers, &style)?;
        }
        Commands::Compare { text } => {
            let corrector = engine.current();
            let results: Vec<CorrectionResult> = Mode::ALL
                .iter()
                .map(|&mode| corrector.correct(&text, mode))
                .collect();
            println!("{}", output::render_comparison(&results, color));
        }
        Commands::Inspect => {
            println!("shuddho {}", shuddho::version_string());
            println!("{}", output::render_summary(&engine.current()));
        }
        Commands::Config { .. } | Commands::Completions { .. } | Commands::Distance { .. } => {}
    }
    Ok(())
}

fn load_config(path: &Path) -> Result<Config> {
    let config = Config::load_or_default(path)
        .with_context(|| format!("failed to load config from {}", path.display()))?
        .with_env_overrides()?;
    Ok(config)
}

/// How results are printed for one invocation.
struct Style {
    json: bool,
    details: bool,
    color: bool,
}

impl Style {
    fn new(render: &RenderArgs, config: &Config, color: bool) -> Self {
        Self {
            json: render.json || (!render.plain && config.output.format == OutputFormat::Json),
            details: !render.plain,
            color,
        }
    }

    fn print(&self, result: &CorrectionResult) -> Result<()> {
        let line = if self.json {
            output::render_json(result)?
        } else {
            output::render_text(result, self.color, self.details)
        };
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", line)?;
        Ok(())
    }
}

/// Each stdin line is an independent sentence.
fn correct_stdin(engine: &EngineHandle, mode: Mode, style: &Style) -> Result<()> {
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read stdin")?;
        style.print(&engine.correct(&line, mode))?;
    }
    Ok(())
}

fn correct_file(
    engine: &EngineHandle,
    file: &Path,
    mode: Mode,
    workers: usize,
    style: &Style,
) -> Result<()> {
    let contents = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let sentences: Vec<String> = contents.lines().map(str::to_string).collect();

    let corrector = engine.current();
    let results = batch::correct_all(&corrector, &sentences, mode, workers);
    let changed = results.iter().filter(|r| r.is_changed()).count();
    for result in &results {
        style.print(result)?;
    }
    tracing::info!(lines = results.len(), changed, %mode, "batch finished");
    Ok(())
}

/// Handle configuration commands.
fn handle_config_command(action: &ConfigAction, config_path: &Path) -> Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = load_config(config_path)?;
            println!("{}", config.get_value_by_path(key)?);
        }
        ConfigAction::Set { key, value } => {
            Config::set_value_by_path(config_path, key, value)?;
            println!("Set {} = {}", key, value);
        }
        ConfigAction::List => {
            let config = load_config(config_path)?;
            print!("{}", config.to_display_toml()?);
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}
