use clap::{Args, Parser, Subcommand, ValueEnum};
use flowgen::ast::DisplayProgram;
use flowgen::prelude::*;
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

/// How the intermediate tree is printed before the generated source.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TreeFormat {
    /// Compact JSON on a single line
    Json,
    /// Indented JSON
    Pretty,
    /// Box-drawing tree view
    Tree,
    /// Do not print the tree
    None,
}

/// Compiles low-code flow graphs into async JavaScript
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a flow graph document and print the tree and the source
    Compile(CompileArgs),
    /// Re-render a tree previously printed with `--tree json` or `--tree pretty`
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Path to the flow graph JSON file
    graph_path: String,

    #[arg(short, long, value_enum, default_value = "json")]
    tree: TreeFormat,

    /// Name of the generated function
    #[arg(long, default_value = "flow")]
    function_name: String,

    /// Identifier of the HTTP client used by http-call nodes
    #[arg(long, default_value = "axios")]
    http_client: String,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 2)]
    indent: usize,

    /// Append every conditional to the function body instead of its enclosing block
    #[arg(long)]
    hoist_conditionals: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Path to the serialized tree JSON file
    tree_path: String,

    #[arg(long, default_value = "flow")]
    function_name: String,

    #[arg(long, default_value_t = 2)]
    indent: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Compile(args) => run_compile(args),
        Command::Render(args) => run_render(args),
    };

    if let Err(e) = result {
        eprintln!("\nError: {}", e);
        process::exit(e.exit_code());
    }
}

fn run_compile(args: CompileArgs) -> Result<(), FlowError> {
    tracing::info!(path = %args.graph_path, "loading flow graph");
    let document = FlowDocument::from_file(&args.graph_path)?;

    let placement = if args.hoist_conditionals {
        ConditionalPlacement::Hoisted
    } else {
        ConditionalPlacement::Nested
    };
    let compiler = Compiler::builder(document)
        .with_function_name(&args.function_name)
        .with_http_client(&args.http_client)
        .with_indent_width(args.indent)
        .with_conditional_placement(placement)
        .build();

    let artifacts = compiler.compile()?;

    match args.tree {
        TreeFormat::Json => println!("{}", artifacts.tree_json()?),
        TreeFormat::Pretty => println!("{}", artifacts.tree_json_pretty()?),
        TreeFormat::Tree => println!("{}", DisplayProgram(&artifacts.program)),
        TreeFormat::None => {}
    }
    print!("{}", artifacts.source);
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), FlowError> {
    let json = fs::read_to_string(&args.tree_path).map_err(|source| FlowError::Io {
        path: args.tree_path.clone(),
        source,
    })?;
    let renderer = Renderer::new(RenderOptions {
        function_name: args.function_name,
        indent_width: args.indent,
    });
    print!("{}", renderer.render_json(&json)?);
    Ok(())
}
