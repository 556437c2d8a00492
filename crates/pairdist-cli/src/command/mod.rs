use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pairdist_core::{LoadError, SampleError};

use self::{analyze::AnalyzeArg, generate::GenerateArg};

mod analyze;
mod generate;

#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about,
    long_about = None,
    args_conflicts_with_subcommands = true,
    subcommand_negates_reqs = true
)]
pub(crate) struct CommandArgs {
    /// Run something other than the distance analysis
    #[command(subcommand)]
    mode: Option<Mode>,
    #[command(flatten)]
    analyze: AnalyzeArg,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Write a random dataset to analyze
    Generate(#[clap(flatten)] GenerateArg),
}

pub(crate) fn run() -> anyhow::Result<ExitCode> {
    run_with(&CommandArgs::parse())
}

fn run_with(args: &CommandArgs) -> anyhow::Result<ExitCode> {
    let result = match &args.mode {
        Some(Mode::Generate(arg)) => generate::run(arg),
        None => analyze::run(&args.analyze),
    };
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if is_reported_to_user(&err) => {
            println!("Error: {err}");
            Ok(ExitCode::from(1))
        }
        Err(err) => Err(err),
    }
}

/// Errors caused by the dataset rather than by the program.
///
/// These are printed as a single line on stdout instead of a context chain.
fn is_reported_to_user(err: &anyhow::Error) -> bool {
    err.downcast_ref::<LoadError>()
        .is_some_and(LoadError::is_missing_input_file)
        || err.downcast_ref::<SampleError>().is_some()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use anyhow::Context as _;

    use super::*;

    #[test]
    fn test_parse_analyze_defaults() {
        let args = CommandArgs::try_parse_from(["pairdist", "data/Random_10000_128d"]).unwrap();
        assert!(args.mode.is_none());
        let arg = &args.analyze;
        assert_eq!(
            arg.dataset_dir.as_deref(),
            Some(Path::new("data/Random_10000_128d"))
        );
        assert_eq!(arg.samples, 100_000);
        assert_eq!(arg.output, Path::new("distance_distribution.png"));
        assert_eq!(arg.bins.get(), 50);
        assert_eq!(arg.dpi.get(), 300);
        assert_eq!(arg.seed, None);
        assert_eq!(arg.summary, None);
    }

    #[test]
    fn test_parse_analyze_options() {
        let args = CommandArgs::try_parse_from([
            "pairdist", "data/X", "-s", "500", "-o", "out.png", "--bins", "20", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(args.analyze.samples, 500);
        assert_eq!(args.analyze.output, Path::new("out.png"));
        assert_eq!(args.analyze.bins.get(), 20);
        assert_eq!(args.analyze.seed, Some(7));
    }

    #[test]
    fn test_parse_rejects_invalid_arguments() {
        assert!(CommandArgs::try_parse_from(["pairdist"]).is_err());
        assert!(CommandArgs::try_parse_from(["pairdist", "data/X", "--bins", "0"]).is_err());
        assert!(CommandArgs::try_parse_from(["pairdist", "data/X", "-s", "-3"]).is_err());
    }

    #[test]
    fn test_parse_generate() {
        let args = CommandArgs::try_parse_from(["pairdist", "generate", "data/Y"]).unwrap();
        let Some(Mode::Generate(arg)) = &args.mode else {
            panic!("expected generate mode, got {args:?}");
        };
        assert_eq!(arg.dataset_dir, Path::new("data/Y"));
        assert_eq!(arg.points, 10_000);
        assert_eq!(arg.dims, 128);
        assert!(!arg.force);
    }

    struct TempDir(std::path::PathBuf);

    impl TempDir {
        fn new(label: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "pairdist-cli-{label}-{}",
                std::process::id()
            ));
            let _ = std::fs::remove_dir_all(&path);
            std::fs::create_dir_all(&path).unwrap();
            Self(path)
        }

        fn args(&self, extra: &[&str]) -> CommandArgs {
            let dir = self.0.to_str().unwrap();
            let output = self.0.join("plot.png");
            let mut argv = vec!["pairdist", dir, "-o", output.to_str().unwrap()];
            argv.extend_from_slice(extra);
            CommandArgs::try_parse_from(argv).unwrap()
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    #[test]
    fn test_missing_input_exits_with_one() {
        let dir = TempDir::new("missing_input");
        let code = run_with(&dir.args(&[])).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!dir.0.join("plot.png").exists());
    }

    #[test]
    fn test_single_point_exits_with_one() {
        let dir = TempDir::new("single_point");
        std::fs::write(dir.0.join("nodes.txt"), "1 2 3\n").unwrap();
        let code = run_with(&dir.args(&["-s", "10"])).unwrap();
        assert_eq!(code, ExitCode::from(1));
        assert!(!dir.0.join("plot.png").exists());
    }

    #[test]
    fn test_malformed_input_propagates() {
        let dir = TempDir::new("malformed_input");
        std::fs::write(dir.0.join("nodes.txt"), "0 0\nnan 1\n3 4\n").unwrap();
        let err = run_with(&dir.args(&["-s", "10"])).unwrap_err();
        let load_err = err.downcast_ref::<LoadError>().unwrap();
        assert!(load_err.is_non_finite());
    }

    #[test]
    fn test_generate_writes_dataset() {
        let dir = TempDir::new("generate");
        let dataset_dir = dir.0.join("Random_5_3d");
        let args = CommandArgs::try_parse_from([
            "pairdist",
            "generate",
            dataset_dir.to_str().unwrap(),
            "--points",
            "5",
            "--dims",
            "3",
            "--seed",
            "1",
        ])
        .unwrap();
        assert_eq!(run_with(&args).unwrap(), ExitCode::SUCCESS);
        let points = pairdist_core::PointSet::load_from_dir(&dataset_dir).unwrap();
        assert_eq!(points.shape(), (5, 3));
    }

    #[test]
    fn test_user_facing_errors() {
        let missing = anyhow::Error::from(LoadError::MissingInputFile {
            dir: "data/None".into(),
        });
        assert!(is_reported_to_user(&missing));

        let insufficient = anyhow::Error::from(SampleError::InsufficientData { num_points: 1 });
        assert!(is_reported_to_user(&insufficient));

        let ragged = anyhow::Error::from(LoadError::InconsistentDimensions {
            line: 2,
            expected: 3,
            found: 2,
        });
        assert!(!is_reported_to_user(&ragged));

        let other = Err::<(), _>(std::io::Error::other("disk full"))
            .context("Failed to write summary")
            .unwrap_err();
        assert!(!is_reported_to_user(&other));
    }
}
