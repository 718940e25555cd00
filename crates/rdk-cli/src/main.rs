mod commands;

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use rdk_core::config::LogFormat;
use rdk_core::{InitOptions, PhaseUpdate, StateUpdate, Workspace};

const EXAMPLES: &str = "Examples:
  recursive-devkit init \"My Project\" --description \"A new software project\"
  recursive-devkit prompt
  recursive-devkit state --completed \"Implemented basic file structure\" --next \"Create module X\"
  recursive-devkit phase --new \"2/3 - Feature Development\" --progress 0";

/// recursive-devkit -- keep project context, development state and the next
/// AI prompt in sync across sessions.
#[derive(Parser)]
#[command(name = "recursive-devkit", version, about, after_help = EXAMPLES)]
struct Cli {
    /// Project directory holding the framework files.
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project_dir: PathBuf,

    /// Config file (default: <project>/.recursive-devkit.toml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON on stderr.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new project with the framework files.
    Init {
        /// Name of the project.
        project_name: String,
        /// Project description.
        #[arg(short, long, default_value = "A software project")]
        description: String,
        /// Number of planned phases.
        #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
        phases: u32,
        /// Name of the first phase.
        #[arg(short, long, default_value = "Initialization")]
        initial_phase: String,
        /// Overwrite existing framework files without asking.
        #[arg(long)]
        force: bool,
    },

    /// Generate a new prompt from the current context and state.
    Prompt {
        /// Override the current task focus.
        #[arg(short, long)]
        focus: Option<String>,
        /// Also print the prompt to stdout.
        #[arg(long)]
        stdout: bool,
    },

    /// Update the development state.
    State {
        /// Description of completed work.
        #[arg(short, long)]
        completed: Option<String>,
        /// Next task to focus on.
        #[arg(short, long)]
        next: Option<String>,
        /// Completion criteria for the next task.
        #[arg(long, requires = "next")]
        criteria: Option<String>,
        /// Working files for the next task.
        #[arg(long, requires = "next")]
        files: Option<String>,
        /// Integration points for the next task.
        #[arg(long, requires = "next")]
        integration: Option<String>,
        /// Record a challenge.
        #[arg(long)]
        challenge: Option<String>,
        /// Record a decision.
        #[arg(long)]
        decision: Option<String>,
        /// Rationale for the recorded decision.
        #[arg(long, requires = "decision")]
        rationale: Option<String>,
        /// Reset state for a new phase.
        #[arg(long)]
        reset: bool,
    },

    /// Update the project phase.
    Phase {
        /// New phase (e.g. "2/3 - Feature Development").
        #[arg(long = "new")]
        new_phase: Option<String>,
        /// Phase progress percentage (without %).
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        progress: Option<u8>,
    },

    /// Show the current phase, task and backlog.
    Status {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Init { .. } => "init",
            Commands::Prompt { .. } => "prompt",
            Commands::State { .. } => "state",
            Commands::Phase { .. } => "phase",
            Commands::Status { .. } => "status",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = commands::load_config(&cli.project_dir, cli.config.as_deref())?;
    let level = if cli.verbose {
        "debug"
    } else {
        config.general.log_level.as_str()
    };
    if cli.log_json || config.general.log_format == LogFormat::Json {
        rdk_telemetry::logging::init_logging_json("recursive-devkit", level);
    } else {
        rdk_telemetry::logging::init_logging("recursive-devkit", level);
    }

    let (span, trace_id) = rdk_telemetry::tracing_setup::command_span(command.name());
    let _guard = span.enter();
    tracing::debug!(%trace_id, project_dir = %cli.project_dir.display(), "running command");

    let workspace = Workspace::new(&cli.project_dir, config.files.clone());

    match command {
        Commands::Init {
            project_name,
            description,
            phases,
            initial_phase,
            force,
        } => {
            let opts = InitOptions {
                project_name,
                description,
                phases,
                initial_phase,
            };
            commands::init::run(&workspace, &config, &opts, force)?;
        }
        Commands::Prompt { focus, stdout } => {
            commands::prompt::run(&workspace, &config, focus.as_deref(), stdout)?;
        }
        Commands::State {
            completed,
            next,
            criteria,
            files,
            integration,
            challenge,
            decision,
            rationale,
            reset,
        } => {
            let update = StateUpdate {
                reset,
                completed,
                next_task: next,
                criteria,
                files,
                integration,
                challenge,
                decision,
                rationale,
            };
            commands::state::run(&workspace, &update)?;
        }
        Commands::Phase {
            new_phase,
            progress,
        } => {
            let update = PhaseUpdate {
                phase: new_phase,
                progress,
            };
            commands::phase::run(&workspace, &update)?;
        }
        Commands::Status { json } => {
            commands::status::run(&workspace, json)?;
        }
    }

    Ok(())
}
