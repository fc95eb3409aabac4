use std::path::PathBuf;

use anyhow::{bail, Context};
use paintboard::app::RunOptions;

const USAGE: &str = "usage: paintboard <script.json> [--out DIR] [--config FILE]";

fn parse_args<I>(args: I) -> anyhow::Result<RunOptions>
where
    I: IntoIterator<Item = String>,
{
    let mut script = None;
    let mut output_dir = None;
    let mut config = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" | "-o" => {
                let value = args.next().context("--out expects a directory")?;
                output_dir = Some(PathBuf::from(value));
            }
            "--config" | "-c" => {
                let value = args.next().context("--config expects a file")?;
                config = Some(PathBuf::from(value));
            }
            "--help" | "-h" => bail!(USAGE),
            flag if flag.starts_with('-') => bail!("unknown flag `{flag}`\n{USAGE}"),
            _ if script.is_some() => bail!("only one script may be given\n{USAGE}"),
            _ => script = Some(PathBuf::from(&arg)),
        }
    }

    let script = script.context(USAGE)?;
    Ok(RunOptions {
        script,
        output_dir,
        config,
    })
}

fn main() -> anyhow::Result<()> {
    let options = parse_args(std::env::args().skip(1))?;
    let report = paintboard::run(&options)
        .with_context(|| format!("replaying {}", options.script.display()))?;

    for path in &report.saved {
        println!("{}", path.display());
    }
    if report.rejected > 0 {
        eprintln!(
            "{} of {} commands were rejected",
            report.rejected, report.commands
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn parses_script_and_flags() {
        let options = parse_args(args(&["draw.json", "--out", "/tmp/out", "-c", "cfg.json"]))
            .expect("arguments should parse");
        assert_eq!(options.script, PathBuf::from("draw.json"));
        assert_eq!(options.output_dir, Some(PathBuf::from("/tmp/out")));
        assert_eq!(options.config, Some(PathBuf::from("cfg.json")));
    }

    #[test]
    fn rejects_missing_script_and_unknown_flags() {
        assert!(parse_args(args(&[])).is_err());
        assert!(parse_args(args(&["a.json", "--verbose"])).is_err());
        assert!(parse_args(args(&["a.json", "b.json"])).is_err());
        assert!(parse_args(args(&["a.json", "--out"])).is_err());
    }
}
