use clap::Parser;
use cue::{
    cli::{AppContext, Cli, Commands},
    core::commands::finish_with_exit,
};
use tracing_subscriber::EnvFilter;

fn main()
{
    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext { quiet: cli.quiet, no_color: cli.no_color, verbose: cli.verbose };

    init_tracing(&ctx);

    let result = match cli.command
    {
        Commands::Concepts(args) => cue::core::concepts_run(args, &ctx),
        Commands::Typical(args) => cue::core::typical_run(args, &ctx),
        Commands::Representative(args) => cue::core::representative_run(args, &ctx),
        Commands::Init(args) => cue::infra::config::init(args, &ctx),
        Commands::Completions(args) => cue::completion::run(args, &ctx),
    };

    finish_with_exit(result)
}

/// Events go to stderr; RUST_LOG wins, else `--verbose` means debug
fn init_tracing(ctx: &AppContext)
{
    let fallback = if ctx.verbose { "cue=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!ctx.no_color)
        .with_target(false)
        .init();
}
