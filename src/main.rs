use anyhow::Context;
use clap::Parser;
use log::info;
use std::{
    env,
    fs::OpenOptions,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
};

use quizdoc::{
    canvas,
    render::{self, RenderOptions},
};

const DEFAULT_LOG_FILTER: &str = "quizdoc=info";
const OUTPUT_SUFFIX: &str = "_quiz_solutions.md";

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Quiz export JSON (e.g. wk12.json). Prompted for when missing.
    #[arg(long = "in", env = "QUIZDOC_QUIZ")]
    quiz: Option<PathBuf>,

    /// Graded results JSON (e.g. wk12_result.json). Prompted for when missing.
    #[arg(long, env = "QUIZDOC_RESULTS")]
    results: Option<PathBuf>,

    /// Output Markdown file. Defaults to <first 4 chars of quiz name>_quiz_solutions.md
    /// next to the quiz file.
    #[arg(long, env = "QUIZDOC_OUT")]
    out: Option<PathBuf>,

    /// Heading label such as WK03. Derived from the file names when missing.
    #[arg(long)]
    week: Option<String>,

    /// Prepend YAML front matter to the output.
    #[arg(long)]
    frontmatter: bool,
}

pub struct Config {
    pub quiz: PathBuf,
    pub results: PathBuf,
    pub out: PathBuf,
    pub week: Option<String>,
    pub frontmatter: bool,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", DEFAULT_LOG_FILTER);
    }
    pretty_env_logger::init();

    let args = Args::parse();
    let config = resolve_config(args, &mut io::stdin().lock()).context("invalid arguments")?;

    let items = canvas::read_quiz(&config.quiz).context("failed to load quiz")?;
    let results = canvas::read_results(&config.results).context("failed to load results")?;
    info!(
        "loaded {} quiz items and {} results",
        items.len(),
        results.len()
    );

    let questions = canvas::assemble(&items, &results);
    let unscored = questions.iter().filter(|q| !q.is_scored()).count();
    if unscored > 0 {
        info!("{} of {} questions have no result data", unscored, questions.len());
    }

    let markdown = render::render_markdown(
        &questions,
        &RenderOptions {
            week: config.week.clone(),
            frontmatter: config.frontmatter,
        },
    )
    .context("failed to render markdown")?;

    write_output(&config.out, &markdown)
        .context(format!("failed to write {}", config.out.display()))?;

    println!(
        "Generated {} from {} and {}",
        config.out.display(),
        config.quiz.display(),
        config.results.display()
    );

    Ok(())
}

fn resolve_config(args: Args, input: &mut impl BufRead) -> anyhow::Result<Config> {
    let quiz = match args.quiz {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => prompt(input, "Enter quiz JSON path (e.g., wk12.json): ")?,
    };
    let results = match args.results {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => prompt(input, "Enter results JSON path (e.g., wk12_result.json): ")?,
    };
    let out = match args.out {
        Some(path) if !path.as_os_str().is_empty() => path,
        _ => default_output_path(&quiz),
    };

    let week = args
        .week
        .filter(|w| !w.trim().is_empty())
        .or_else(|| file_stem(&quiz).and_then(|s| render::week_label(&s)))
        .or_else(|| file_stem(&out).and_then(|s| render::week_label(&s)));

    Ok(Config {
        quiz: absolute(quiz)?,
        results: absolute(results)?,
        out: absolute(out)?,
        week,
        frontmatter: args.frontmatter,
    })
}

fn prompt(input: &mut impl BufRead, message: &str) -> anyhow::Result<PathBuf> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line).context("failed to read from stdin")?;
    let line = line.trim();
    if line.is_empty() {
        anyhow::bail!("no path given");
    }

    Ok(PathBuf::from(line))
}

/// `dir/wk12.json` -> `dir/wk12_quiz_solutions.md`
fn default_output_path(quiz: &Path) -> PathBuf {
    let stem = file_stem(quiz).unwrap_or_default();
    let prefix: String = stem.chars().take(4).collect();
    let dir = quiz.parent().unwrap_or_else(|| Path::new(""));

    dir.join(format!("{}{}", prefix, OUTPUT_SUFFIX))
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

fn absolute(path: PathBuf) -> anyhow::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path);
    }
    Ok(env::current_dir()
        .context("failed to resolve current directory")?
        .join(path))
}

fn write_output(path: &Path, content: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;

    write!(file, "{}", content)?;
    file.flush()?;
    Ok(())
}
