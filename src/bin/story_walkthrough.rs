use std::fs;
use std::path::{Path, PathBuf};

use story_rs::api::{StoryConfig, StoryEngine};
use story_rs::render::NullRenderer;
use story_rs::telemetry::init_default_tracing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Next,
    Previous,
    ClickYear(i32),
    Toggle(bool),
    Hover(usize),
    PointerOut,
}

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    steps: Vec<Step>,
}

const USAGE: &str = "usage: story_walkthrough --input <csv> [--config <json>] [--output <path>] \
                     [--step next|prev|click:<year>|toggle:on|toggle:off|hover:<index>|out]...\n\
                     Writes one snapshot after loading and one per step. A failing step ends the \
                     run with exit code 1 after the snapshots taken so far are written.";

fn main() {
    let _ = init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => StoryConfig::from_json_path(path).map_err(|err| err.to_string())?,
        None => StoryConfig::default(),
    };

    let mut engine = StoryEngine::open(NullRenderer::default(), &args.input, config)
        .map_err(|err| err.to_string())?;

    let mut snapshots = vec![snapshot_json(&engine)?];
    let mut failure = None;
    for step in &args.steps {
        if let Err(err) = apply_step(&mut engine, *step) {
            failure = Some(format!("step {step:?} failed: {err}"));
            break;
        }
        snapshots.push(snapshot_json(&engine)?);
    }

    write_snapshots(args.output.as_deref(), &snapshots)?;
    failure.map_or(Ok(()), Err)
}

fn write_snapshots(output: Option<&Path>, snapshots: &[String]) -> Result<(), String> {
    let body = format!("[\n{}\n]\n", snapshots.join(",\n"));
    match output {
        Some(path) => fs::write(path, body)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display())),
        None => {
            print!("{body}");
            Ok(())
        }
    }
}

fn apply_step(engine: &mut StoryEngine<NullRenderer>, step: Step) -> story_rs::StoryResult<()> {
    match step {
        Step::Next => engine.next().map(|_| ()),
        Step::Previous => engine.previous().map(|_| ()),
        Step::ClickYear(year) => engine.click_year_bar(year),
        Step::Toggle(all_time) => engine.set_all_time(all_time),
        Step::Hover(index) => engine.hover_bar(index).map(|_| ()),
        Step::PointerOut => engine.pointer_out(),
    }
}

fn snapshot_json(engine: &StoryEngine<NullRenderer>) -> Result<String, String> {
    engine
        .snapshot()
        .to_json_contract_v1_pretty()
        .map_err(|err| err.to_string())
}

fn parse_step(raw: &str) -> Result<Step, String> {
    let step = match raw.split_once(':') {
        None => match raw {
            "next" => Step::Next,
            "prev" => Step::Previous,
            "out" => Step::PointerOut,
            _ => return Err(format!("unknown step `{raw}`")),
        },
        Some(("click", year)) => Step::ClickYear(
            year.parse()
                .map_err(|err| format!("invalid year in `{raw}`: {err}"))?,
        ),
        Some(("toggle", "on")) => Step::Toggle(true),
        Some(("toggle", "off")) => Step::Toggle(false),
        Some(("hover", index)) => Step::Hover(
            index
                .parse()
                .map_err(|err| format!("invalid bar index in `{raw}`: {err}"))?,
        ),
        Some(_) => return Err(format!("unknown step `{raw}`")),
    };
    Ok(step)
}

fn parse_args() -> Result<CliArgs, String> {
    let mut args = std::env::args().skip(1);
    let mut input = None::<PathBuf>;
    let mut config = None::<PathBuf>;
    let mut output = None::<PathBuf>;
    let mut steps = Vec::new();

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--step" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --step".to_owned())?;
                steps.push(parse_step(&value)?);
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown flag `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| format!("missing --input\n{USAGE}"))?,
        config,
        output,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_step_kind() {
        assert_eq!(parse_step("next"), Ok(Step::Next));
        assert_eq!(parse_step("prev"), Ok(Step::Previous));
        assert_eq!(parse_step("out"), Ok(Step::PointerOut));
        assert_eq!(parse_step("click:2016"), Ok(Step::ClickYear(2016)));
        assert_eq!(parse_step("toggle:on"), Ok(Step::Toggle(true)));
        assert_eq!(parse_step("toggle:off"), Ok(Step::Toggle(false)));
        assert_eq!(parse_step("hover:3"), Ok(Step::Hover(3)));
    }

    #[test]
    fn rejects_malformed_steps() {
        assert!(parse_step("jump").is_err());
        assert!(parse_step("click:soon").is_err());
        assert!(parse_step("toggle:maybe").is_err());
        assert!(parse_step("hover:-1").is_err());
    }
}
