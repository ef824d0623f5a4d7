use clap::{Parser, Subcommand};
use log::LevelFilter;
use railpress::{config, mirror, output, render, template, walk};
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "railpress")]
#[command(about = "Static site generator for grammar and syntax documentation")]
#[command(long_about = "\
Static site generator for grammar and syntax documentation

Your filesystem is the site map. Every Markdown file becomes an HTML page at
the mirrored output path; fenced Railroad: blocks become inline SVG diagrams.

Project structure:

  project/
  ├── config.toml                  # Site config (optional)
  ├── template/                    # Static assets, mirrored to the output root
  │   ├── template.html            # Shared page template: {title} {up} {content}
  │   └── style.css
  ├── src/                         # Markdown content root
  │   ├── index.md                 # First line: #Page Title
  │   └── guide/
  │       ├── statements.md
  │       └── expressions.md
  └── html/                        # Output — DELETED AND REBUILT every run

Page format:
  The first line of every page is '#' followed by the title. A fenced block
  opened with ```Railroad: holds a diagram description, e.g.

    ```Railroad:
    Sequence(\"let\", NonTerminal(\"pattern\"), Optional(\"mut\"))
    ```

Run 'railpress gen-config' and 'railpress gen-template' for documented
starting points.")]
#[command(version = version_string())]
struct Cli {
    /// Template/assets directory (overrides config)
    #[arg(long, global = true)]
    template: Option<PathBuf>,

    /// Markdown content directory (overrides config)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Mirror template assets and render the full site
    Build,
    /// Render every page in memory without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
    /// Print the stock page template
    GenTemplate,
}

/// The three directories a run touches, after CLI flags override config.
struct ResolvedPaths {
    template_dir: PathBuf,
    source_dir: PathBuf,
    output_dir: PathBuf,
}

fn resolve_paths(cli: &Cli, cfg: &config::SiteConfig) -> ResolvedPaths {
    ResolvedPaths {
        template_dir: cli
            .template
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.template)),
        source_dir: cli
            .source
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.source)),
        output_dir: cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&cfg.paths.output)),
    }
}

fn build_context(
    cfg: &config::SiteConfig,
    paths: &ResolvedPaths,
) -> Result<render::RenderContext, template::TemplateError> {
    let template_path = paths.template_dir.join(template::TEMPLATE_FILENAME);
    let template = template::PageTemplate::load(&template_path)?;
    Ok(render::RenderContext {
        template,
        markdown_options: cfg.markdown.to_options(),
        diagrams_enabled: cfg.diagrams.enabled,
    })
}

fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logger(cli.verbose)?;

    match cli.command {
        Command::Build => {
            let cfg = config::load_config(&cli.config)?;
            let paths = resolve_paths(&cli, &cfg);
            config::validate_paths(&paths.template_dir, &paths.source_dir, &paths.output_dir)?;
            let ctx = build_context(&cfg, &paths)?;

            println!(
                "==> Mirroring {} → {}",
                paths.template_dir.display(),
                paths.output_dir.display()
            );
            let assets_copied = mirror::mirror(&paths.template_dir, &paths.output_dir)?;

            println!(
                "==> Compiling {} → {}",
                paths.source_dir.display(),
                paths.output_dir.display()
            );
            let report = walk::compile_tree(
                &ctx,
                &paths.source_dir,
                &paths.output_dir,
                walk::Mode::Write,
            )?;
            output::print_build_output(&report, assets_copied);
        }
        Command::Check => {
            let cfg = config::load_config(&cli.config)?;
            let paths = resolve_paths(&cli, &cfg);
            config::validate_paths(&paths.template_dir, &paths.source_dir, &paths.output_dir)?;
            let ctx = build_context(&cfg, &paths)?;

            println!("==> Checking {}", paths.source_dir.display());
            let report = walk::compile_tree(
                &ctx,
                &paths.source_dir,
                &paths.output_dir,
                walk::Mode::DryRun,
            )?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::GenTemplate => {
            print!("{}", template::stock_template_html());
        }
    }

    Ok(())
}
