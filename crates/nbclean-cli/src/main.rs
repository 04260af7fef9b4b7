//! nbclean command line

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use nbclean_core::{
    discover, BatchReport, BatchRunner, CleanError, Cleaner, ExecutedCopies, Settings,
};
use nbclean_mutators::{
    Clear, ClearKind, CreateTests, LimitOutput, MatchMode, Mutator, Remove, ReplaceText, Selector,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Operation run on each discovered notebook
type Job = Box<dyn Fn(&Path) -> Result<(), CleanError> + Sync>;

fn path_arg() -> Arg {
    Arg::new("path")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Notebook file or directory of notebooks")
}

fn skip_arg() -> Arg {
    Arg::new("skip")
        .long("skip")
        .value_name("PATTERN")
        .action(ArgAction::Append)
        .help("Skip notebooks whose path contains PATTERN (default: .ipynb_checkpoints)")
}

fn tag_arg(help: &'static str) -> Arg {
    Arg::new("tag").long("tag").value_name("TAG").help(help)
}

fn text_arg(help: &'static str) -> Arg {
    Arg::new("text").long("text").value_name("TEXT").help(help)
}

fn match_arg() -> Arg {
    Arg::new("match")
        .long("match")
        .value_parser(["first", "all"])
        .help("How --tag, --text and --empty combine: first set criterion only, or all of them")
}

fn cli() -> Command {
    Command::new("nbclean")
        .version(nbclean_core::VERSION)
        .about("Clean, convert and run Jupyter notebooks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Settings file (default: ./nbclean.toml when present)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output (repeatable)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .global(true)
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only log errors"),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .global(true)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of notebooks processed in parallel"),
        )
        .arg(
            Arg::new("keep-going")
                .long("keep-going")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Process every notebook even after a failure"),
        )
        .subcommand(
            Command::new("clear")
                .about("Clear parts of matching cells")
                .arg(path_arg())
                .arg(
                    Arg::new("kind")
                        .long("kind")
                        .action(ArgAction::Append)
                        .value_delimiter(',')
                        .default_value("output")
                        .value_name("KIND")
                        .help(format!("What to clear (repeatable): {}", ClearKind::names())),
                )
                .arg(tag_arg("Only cells with this tag"))
                .arg(text_arg("Only cells whose source contains this text"))
                .arg(match_arg())
                .arg(skip_arg()),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove matching cells")
                .arg(path_arg())
                .arg(tag_arg("Remove cells with this tag"))
                .arg(text_arg("Remove cells whose source contains this text"))
                .arg(
                    Arg::new("empty")
                        .long("empty")
                        .action(ArgAction::SetTrue)
                        .help("Remove cells with empty source"),
                )
                .arg(match_arg())
                .arg(skip_arg()),
        )
        .subcommand(
            Command::new("replace")
                .about("Replace solution regions with answer stubs")
                .arg(path_arg())
                .arg(Arg::new("begin").long("begin").value_name("TEXT").help("Begin delimiter"))
                .arg(Arg::new("end").long("end").value_name("TEXT").help("End delimiter"))
                .arg(
                    Arg::new("code-stub")
                        .long("code-stub")
                        .value_name("TEXT")
                        .help("Stub inserted into code cells"),
                )
                .arg(
                    Arg::new("markdown-stub")
                        .long("markdown-stub")
                        .value_name("TEXT")
                        .help("Stub inserted into markdown cells"),
                )
                .arg(skip_arg()),
        )
        .subcommand(
            Command::new("create-tests")
                .about("Move tagged code cells into generated test files")
                .arg(path_arg())
                .arg(tag_arg("Cells to convert").required(true))
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .help("Test directory, relative to each notebook (default: tests)"),
                )
                .arg(skip_arg()),
        )
        .subcommand(
            Command::new("run")
                .about("Execute notebooks in place, or into an output directory")
                .arg(path_arg())
                .arg(
                    Arg::new("output-dir")
                        .long("output-dir")
                        .value_name("DIR")
                        .value_parser(value_parser!(PathBuf))
                        .help("Write executed copies as DIR/<name>-exe.ipynb instead of in place"),
                )
                .arg(
                    Arg::new("overwrite")
                        .long("overwrite")
                        .action(ArgAction::SetTrue)
                        .requires("output-dir")
                        .help("Reuse an existing output directory, deleting its executed copies"),
                )
                .arg(
                    Arg::new("max-output-lines")
                        .long("max-output-lines")
                        .value_name("N")
                        .value_parser(value_parser!(usize))
                        .help("Truncate outputs longer than N lines (default: 1000)"),
                )
                .arg(
                    Arg::new("timeout")
                        .long("timeout")
                        .value_name("SECS")
                        .value_parser(value_parser!(u64))
                        .help("Per-cell timeout in seconds (default: 600)"),
                )
                .arg(Arg::new("kernel").long("kernel").value_name("NAME").help("Kernel name"))
                .arg(skip_arg()),
        )
}

fn init_tracing(args: &ArgMatches) {
    let level = if args.get_flag("quiet") {
        "error"
    } else {
        match args.get_count("verbose") {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();
}

/// Directory a notebook runs in and writes tests next to
fn notebook_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn string_arg<'a>(args: &'a ArgMatches, id: &str, default: &'a str) -> &'a str {
    args.get_one::<String>(id).map_or(default, String::as_str)
}

fn selector(args: &ArgMatches, settings: &Settings, empty: bool) -> Result<Selector> {
    let mode = args
        .get_one::<String>("match")
        .map(|m| m.parse::<MatchMode>())
        .transpose()?
        .unwrap_or(settings.match_mode);
    let mut selector = Selector::any().with_empty(empty).with_mode(mode);
    if let Some(tag) = args.get_one::<String>("tag") {
        selector = selector.with_tag(tag);
    }
    if let Some(text) = args.get_one::<String>("text") {
        selector = selector.with_text(text);
    }
    Ok(selector)
}

fn apply_job<M: Mutator + Sync + 'static>(mutator: M) -> Job {
    tracing::debug!(mutator = %mutator.record(), "configured");
    Box::new(move |path: &Path| {
        Cleaner::open(path)?.apply(&mutator)?.save(path)?;
        Ok(())
    })
}

/// Validate the command's configuration and build its per-file job
fn build_job(name: &str, args: &ArgMatches, settings: &Settings, root: &Path) -> Result<Job> {
    let job: Job = match name {
        "clear" => {
            let kinds = args.get_many::<String>("kind").into_iter().flatten();
            apply_job(Clear::from_names(kinds, selector(args, settings, false)?)?)
        }
        "remove" => apply_job(Remove::new(selector(args, settings, args.get_flag("empty"))?)?),
        "replace" => {
            let defaults = &settings.replace;
            let replace = ReplaceText::new(
                string_arg(args, "begin", &defaults.begin),
                string_arg(args, "end", &defaults.end),
            )?
            .with_code_stub(string_arg(args, "code-stub", &defaults.code_stub))
            .with_markdown_stub(string_arg(args, "markdown-stub", &defaults.markdown_stub));
            apply_job(replace)
        }
        "create-tests" => {
            let tag = args.get_one::<String>("tag").context("--tag is required")?.clone();
            let output_dir = args
                .get_one::<PathBuf>("output-dir")
                .unwrap_or(&settings.tests.output_dir)
                .clone();
            CreateTests::new(&tag, &output_dir, ".")?;
            Box::new(move |path: &Path| {
                Cleaner::open(path)?
                    .create_tests(&tag, &output_dir, notebook_dir(path))?
                    .save(path)?;
                Ok(())
            })
        }
        "run" => {
            let max_lines = args
                .get_one::<usize>("max-output-lines")
                .copied()
                .unwrap_or(settings.run.max_output_lines);
            let limit = LimitOutput::new(max_lines)?;
            let mut executor = settings.executor();
            if let Some(secs) = args.get_one::<u64>("timeout") {
                executor = executor.with_timeout(Duration::from_secs(*secs));
            }
            if let Some(kernel) = args.get_one::<String>("kernel") {
                executor = executor.with_kernel(kernel);
            }
            let copies = args
                .get_one::<PathBuf>("output-dir")
                .map(|dir| ExecutedCopies::prepare(root, dir, args.get_flag("overwrite")))
                .transpose()?;
            Box::new(move |path: &Path| {
                let target = copies
                    .as_ref()
                    .map_or_else(|| path.to_path_buf(), |copies| copies.target(path));
                Cleaner::open(path)?
                    .execute(&executor, notebook_dir(path))?
                    .apply(&limit)?
                    .save(&target)?;
                Ok(())
            })
        }
        other => anyhow::bail!("unknown command '{other}'"),
    };
    Ok(job)
}

fn run(matches: &ArgMatches) -> Result<BatchReport> {
    let (name, args) = matches.subcommand().context("no command given")?;
    init_tracing(args);

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let config = args.get_one::<PathBuf>("config").map(PathBuf::as_path);
    let settings = Settings::discover(config, &cwd)?;

    let root = args.get_one::<PathBuf>("path").context("missing notebook path")?;
    let skip: Vec<String> = match args.get_many::<String>("skip") {
        Some(patterns) => patterns.cloned().collect(),
        None => settings.skip.clone(),
    };
    let mut paths = discover(root, skip.as_slice())
        .with_context(|| format!("cannot read notebooks from {}", root.display()))?;

    let job = build_job(name, args, &settings, root)?;
    if name == "run" {
        // executed copies are outputs, never inputs
        if let Some(dir) = args.get_one::<PathBuf>("output-dir") {
            paths.retain(|path| !path.starts_with(dir));
        }
    }
    if paths.is_empty() {
        tracing::warn!(path = %root.display(), "no notebooks found");
    }

    let keep_going = args.get_flag("keep-going");
    let runner = BatchRunner::new()
        .with_jobs(args.get_one::<usize>("jobs").copied().unwrap_or(1))
        .with_keep_going(keep_going);
    let report = runner.run(&paths, |path: &Path| job(path));

    for (path, error) in report.failures() {
        eprintln!("error: {}: {error}", path.display());
    }
    if keep_going {
        println!("{report}");
    }
    Ok(report)
}

fn main() -> ExitCode {
    match run(&cli().get_matches()) {
        Ok(report) if report.is_success() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
