//! Command line tool to train the classifier and write its artifacts

use std::path::PathBuf;

use burn::backend::{ndarray::NdArrayDevice, Autodiff, NdArray};
use fake_news_detector::{
    datasets::news,
    pipelines::text_classification::{self, TrainingConfig},
};
use log::info;
use pico_args::Arguments;

const HELP: &str = "\
Usage: train [OPTIONS]

Options:
  -h, --help             Print help
  -d, --data-dir         Directory holding Fake.csv/.xlsx and True.csv/.xlsx (defaults to the working directory)
  -o, --artifact-dir     Directory to write model.mpk, config.json and vector.json (defaults to 'artifacts')
  -n, --num-epochs       Number of epochs to train for
  -b, --batch-size       Batch size
  -l, --learning-rate    Learning rate
  -s, --seed             Random seed for the split and shuffling
  -f, --max-features     Vocabulary size cap
  --no-tui               Disable TUI
";

#[derive(Debug)]
struct Args {
    data_dir: PathBuf,
    artifact_dir: PathBuf,
    num_epochs: Option<usize>,
    batch_size: Option<usize>,
    learning_rate: Option<f64>,
    seed: Option<u64>,
    max_features: Option<usize>,
    use_tui: bool,
}

impl Args {
    fn parse() -> anyhow::Result<Option<Self>> {
        let mut pargs = Arguments::from_env();

        // Help has a higher priority and should be handled separately.
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let args = Args {
            data_dir: pargs
                .opt_value_from_str(["-d", "--data-dir"])?
                .unwrap_or_else(|| PathBuf::from(".")),
            artifact_dir: pargs
                .opt_value_from_str(["-o", "--artifact-dir"])?
                .unwrap_or_else(|| PathBuf::from("artifacts")),
            num_epochs: pargs.opt_value_from_str(["-n", "--num-epochs"])?,
            batch_size: pargs.opt_value_from_str(["-b", "--batch-size"])?,
            learning_rate: pargs.opt_value_from_str(["-l", "--learning-rate"])?,
            seed: pargs.opt_value_from_str(["-s", "--seed"])?,
            max_features: pargs.opt_value_from_str(["-f", "--max-features"])?,
            use_tui: !(pargs.contains("--no-tui")),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            anyhow::bail!("Unexpected arguments: {:?}", remaining);
        }

        Ok(Some(args))
    }

    fn config(&self) -> TrainingConfig {
        let mut config = TrainingConfig::new();

        if let Some(num_epochs) = self.num_epochs {
            config.num_epochs = num_epochs;
        }

        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }

        if let Some(learning_rate) = self.learning_rate {
            config.learning_rate = learning_rate;
        }

        if let Some(seed) = self.seed {
            config.seed = seed;
        }

        if let Some(max_features) = self.max_features {
            config.max_features = max_features;
        }

        config
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::formatted_builder()
        .parse_filters(&std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let Some(args) = Args::parse()? else {
        print!("{}", HELP);

        return Ok(());
    };

    let dataset = news::Dataset::load(&args.data_dir)?;

    let report = text_classification::train::<Autodiff<NdArray>>(
        NdArrayDevice::Cpu,
        dataset.items(),
        args.config(),
        &args.artifact_dir,
        args.use_tui,
    )?;

    info!(
        "Trained on {} samples ({} dropped as empty), evaluated on {}",
        report.train_size, report.dropped, report.test_size
    );

    println!("Accuracy: {:.4}", report.evaluation.accuracy);
    println!("{}", report.evaluation);

    Ok(())
}
