use clap::{CommandFactory, Parser};
use deckmap::cli::{AnalyzeArgs, Cli, Command, OutputFormat};
use deckmap::{cmd_analyze, cmd_diff, cmd_graph, cmd_init, cmd_show};

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Some(Command::Analyze(args)) => cmd_analyze(args),
        Some(Command::Show(args)) => cmd_show(args),
        Some(Command::Graph(args)) => cmd_graph(args),
        Some(Command::Diff(args)) => cmd_diff(args),
        Some(Command::Init(args)) => cmd_init(args),
        // `deckmap kong.yaml` is shorthand for `deckmap analyze kong.yaml`
        None => match cli.file {
            Some(file) => cmd_analyze(AnalyzeArgs {
                file,
                format: OutputFormat::Markdown,
                output: None,
            }),
            None => {
                let _ = Cli::command().print_help();
                1
            }
        },
    };

    std::process::exit(exit_code);
}
