mod commands;
mod context;
mod examples;
mod output;
mod theme;
mod views;

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::{
    ColorChoice, Command, CommandFactory, FromArgMatches, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Color as ClapColor, Style},
    },
};
use colored::{Color as ThemeColor, Colorize, control::ShouldColorize};
use microblog::Network;

use commands::{query, tour};
use context::AppContext;
use examples::{ExampleGroup, command_examples};
use output::{GlobalOptions, OutputFormat, OutputManager};
use theme::{ICONS, THEME};

const ENVIRONMENT_VARIABLES: &[(&str, &str)] = &[
    ("MICROBLOG_CONFIG", "Path to microblog.toml"),
    ("MICROBLOG_DATASET", "Seed dataset (.toml or .json) overriding the config"),
    ("RUST_LOG", "Log filter (e.g. debug, microblog=trace)"),
];

#[derive(Parser)]
#[command(name = "microblog")]
#[command(version)]
#[command(
    about = "Explore an in-memory microblog network",
    long_about = r#"Explore an in-memory microblog network where following is derived from likes:

• Build a network from a seed dataset (or the built-in sample)
• Query influencers, mentions, authorship and words
• Run a scripted tour of every mutation with invariant checks

Commands:
  show         Followers, authorship and likes
  influencers  Users followed by more users than they follow
  mentions     Users mentioned in posts
  written-by   Posts by one user
  search       Posts containing any of the given words
  check        Verify the network invariants
  tour         Scripted walkthrough of every operation
"#
)]
#[command(subcommand_required = true, arg_required_else_help = true)]
struct Cli {
    /// Output format (defaults to the config file, then table)
    #[arg(long, value_enum)]
    output: Option<OutputFormat>,

    /// Suppress output (only errors will be shown)
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Enable verbose output and debug logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Config file (defaults to ./microblog.toml when present)
    #[arg(long, env = "MICROBLOG_CONFIG")]
    config: Option<PathBuf>,

    /// Seed dataset overriding the config
    #[arg(long, env = "MICROBLOG_DATASET")]
    dataset: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show followers, authorship and likes
    Show,

    /// List users followed by more users than they follow
    Influencers,

    /// List users mentioned with @name in any post
    Mentions,

    /// List the posts written by a user
    #[command(name = "written-by")]
    WrittenBy {
        /// Author username
        user: String,
    },

    /// List posts containing any of the given words
    Search {
        /// Words to look for (case-insensitive, whole words)
        #[arg(required = true)]
        words: Vec<String>,
    },

    /// Verify the follower/post invariants
    Check,

    /// Run the scripted walkthrough on the sample network
    Tour,
}

fn build_cli_command() -> Command {
    let use_color = detect_color_support();
    let mut command = Cli::command()
        .after_long_help(render_top_level_appendix(use_color))
        .color(if use_color { ColorChoice::Auto } else { ColorChoice::Never })
        .styles(help_styles());

    for example in command_examples() {
        if let Some(subcommand) = command.find_subcommand_mut(example.name) {
            let help_text = render_examples(example.groups, use_color);
            *subcommand = subcommand.clone().after_long_help(help_text);
        }
    }
    command
}

fn render_examples(groups: &[ExampleGroup], use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let _ = writeln!(buffer, "{}", stylize("Examples:", theme.highlight, true, use_color));
    for (index, group) in groups.iter().enumerate() {
        let _ = writeln!(buffer, "  {}", stylize(group.title, theme.primary, true, use_color));
        for command in group.commands {
            let arrow = stylize(ICONS.arrow, theme.secondary, false, use_color);
            let command_text = stylize(command, theme.secondary, false, use_color);
            let _ = writeln!(buffer, "    {arrow} {command_text}");
        }
        if index + 1 < groups.len() {
            buffer.push('\n');
        }
    }
    buffer
}

fn render_top_level_appendix(use_color: bool) -> String {
    let theme = &THEME;
    let mut buffer = String::new();

    let env_heading = stylize("Environment Variables:", theme.highlight, true, use_color);
    let _ = writeln!(buffer, "{env_heading}");
    for (key, description) in ENVIRONMENT_VARIABLES {
        let key_text = stylize(key, theme.key, true, use_color);
        let value_text = stylize(description, theme.value, false, use_color);
        let _ = writeln!(buffer, "  {key_text}  {value_text}");
    }

    buffer.push('\n');
    let tip_heading = stylize("Tip:", theme.highlight, true, use_color);
    let tip_text = stylize(
        "Use 'microblog <command> --help' to view examples for each command.",
        theme.secondary,
        false,
        use_color,
    );
    let _ = writeln!(buffer, "{tip_heading} {tip_text}");
    buffer
}

fn stylize(text: &str, color: ThemeColor, bold: bool, use_color: bool) -> String {
    match (use_color, bold) {
        (false, _) => text.to_string(),
        (true, true) => text.color(color).bold().to_string(),
        (true, false) => text.color(color).to_string(),
    }
}

fn detect_color_support() -> bool {
    ShouldColorize::from_env().should_colorize()
}

fn help_styles() -> Styles {
    let theme = &THEME;
    Styles::styled()
        .usage(style_from_color(theme.primary).bold())
        .header(style_from_color(theme.highlight).bold())
        .literal(style_from_color(theme.secondary))
        .placeholder(style_from_color(theme.muted))
        .valid(style_from_color(theme.success))
        .invalid(style_from_color(theme.warning))
        .error(style_from_color(theme.error).bold())
}

fn style_from_color(color: ThemeColor) -> Style {
    let ansi = match color {
        ThemeColor::Red => AnsiColor::Red,
        ThemeColor::Green => AnsiColor::Green,
        ThemeColor::Yellow => AnsiColor::Yellow,
        ThemeColor::Cyan => AnsiColor::Cyan,
        ThemeColor::Magenta => AnsiColor::Magenta,
        ThemeColor::BrightBlack => AnsiColor::BrightBlack,
        ThemeColor::BrightBlue => AnsiColor::BrightBlue,
        ThemeColor::BrightCyan => AnsiColor::BrightCyan,
        _ => AnsiColor::White,
    };
    Style::new().fg_color(Some(ClapColor::Ansi(ansi)))
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn main() {
    let matches = build_cli_command().get_matches();
    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    init_logging(cli.verbose);

    if let Err(err) = execute(cli) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn execute(cli: Cli) -> Result<()> {
    let context = AppContext::load(cli.config.as_deref())?;

    let global_options = GlobalOptions {
        output_format: cli
            .output
            .or(context.config.output.format)
            .unwrap_or_default(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        no_color: cli.no_color || !detect_color_support(),
    };
    let output = OutputManager::new(global_options);

    if let Some(path) = &context.config_path {
        output.verbose(&format!("using config {}", path.display()));
    }

    // The tour always runs on the built-in sample, so only queries load a dataset.
    let load = || -> Result<Network> {
        let network = context.load_network(cli.dataset.as_deref())?;
        output.verbose(&format!(
            "network has {} users and {} posts",
            network.user_count(),
            network.post_count()
        ));
        Ok(network)
    };

    match cli.command {
        Commands::Show => query::handle_show(&load()?, &output),
        Commands::Influencers => query::handle_influencers(&load()?, &output),
        Commands::Mentions => query::handle_mentions(&load()?, &output),
        Commands::WrittenBy { user } => query::handle_written_by(&load()?, &user, &output),
        Commands::Search { words } => query::handle_search(&load()?, &words, &output),
        Commands::Check => query::handle_check(&load()?, &output),
        Commands::Tour => tour::handle_tour(&output),
    }
}
