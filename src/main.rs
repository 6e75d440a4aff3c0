use clap::{Args, Parser, Subcommand};
use phylink_rs::phy::scheme::SchemeRegistry;
use phylink_rs::transmission::text::{format_bits, parse_bit_string};
use phylink_rs::transmission::{
    Receiver, Transmitter, bits_to_text, count_bit_errors, run_ber_sweep, text_to_bits,
};
use phylink_rs::ui::progress::{ProgressManager, templates};
use phylink_rs::ui::{print_banner, print_schemes};
use phylink_rs::utils::dump::{DictionaryDump, SignalDump, load_json, save_json};
use phylink_rs::utils::logging::init_logging;
use phylink_rs::utils::wav::{read_wav, write_to_wav};
use phylink_rs::{PhyConfig, PhyError, Result};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

const DEFAULT_MESSAGE: &str = "Hello World!";

#[derive(Parser)]
#[command(author, version, about = "Baseband line coding and carrier modulation simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags layered on top of the JSON config (or the defaults).
#[derive(Args, Clone, Debug)]
struct PhyArgs {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    scheme: Option<String>,
    #[arg(short = 'w', long)]
    bits_per_symbol: Option<usize>,
    #[arg(long)]
    peak_voltage: Option<f64>,
    #[arg(long)]
    symbol_rate: Option<f64>,
    #[arg(long)]
    carrier_freq: Option<f64>,
    #[arg(long)]
    sample_rate: Option<u32>,
    /// Noise standard deviation
    #[arg(long)]
    sigma: Option<f64>,
    /// No pulse shaping, no noise
    #[arg(long)]
    ideal: bool,
    #[arg(long)]
    seed: Option<u64>,
}

impl PhyArgs {
    fn resolve(&self, registry: &SchemeRegistry) -> Result<PhyConfig> {
        let mut config = match &self.config {
            Some(path) => PhyConfig::load(path)?,
            None => PhyConfig::default(),
        };
        if let Some(name) = &self.scheme {
            config.scheme = registry.resolve(name)?;
        }
        if let Some(w) = self.bits_per_symbol {
            config.bits_per_symbol = w;
        }
        if let Some(v) = self.peak_voltage {
            config.peak_voltage = v;
        }
        if let Some(r) = self.symbol_rate {
            config.symbol_rate = r;
        }
        if let Some(f) = self.carrier_freq {
            config.carrier_freq = f;
        }
        if let Some(r) = self.sample_rate {
            config.sample_rate = r;
        }
        if let Some(sigma) = self.sigma {
            config.noise_sigma = sigma;
        }
        if self.ideal {
            config.ideal = true;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Clone, Debug)]
struct MessageArgs {
    /// Bit string such as 01010100
    #[arg(short, long, conflicts_with = "text")]
    bits: Option<String>,
    /// UTF-8 text sent as 8 bits per byte
    #[arg(short, long)]
    text: Option<String>,
}

impl MessageArgs {
    fn bits(&self) -> Result<Vec<u8>> {
        match (&self.bits, &self.text) {
            (Some(bits), _) => parse_bit_string(bits)
                .ok_or_else(|| PhyError::invalid("bits", format!("not a bit string: {bits}"))),
            (None, Some(text)) => Ok(text_to_bits(text)),
            (None, None) => Ok(text_to_bits(DEFAULT_MESSAGE)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Bits or text -> samples
    Encode {
        #[command(flatten)]
        phy: PhyArgs,
        #[command(flatten)]
        message: MessageArgs,
        #[arg(long)]
        wav: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Samples (.wav or .json) -> bits
    Decode {
        #[command(flatten)]
        phy: PhyArgs,
        #[arg(short, long)]
        input: PathBuf,
        /// Also print the bits as text
        #[arg(long)]
        as_text: bool,
    },
    /// Transmit, receive and count bit errors
    Roundtrip {
        #[command(flatten)]
        phy: PhyArgs,
        #[command(flatten)]
        message: MessageArgs,
    },
    /// Bit error rate over a list of noise levels
    Sweep {
        #[command(flatten)]
        phy: PhyArgs,
        #[command(flatten)]
        message: MessageArgs,
        #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 0.5, 1.0, 2.0, 4.0])]
        sigmas: Vec<f64>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Waveform of every symbol value as JSON
    Dictionary {
        #[command(flatten)]
        phy: PhyArgs,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List scheme names
    Schemes,
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let registry = SchemeRegistry::builtin();

    match cli.command {
        Commands::Encode {
            phy,
            message,
            wav,
            json,
        } => {
            let config = phy.resolve(&registry)?;
            let bits = message.bits()?;
            let samples = Transmitter::new(config.clone())?.transmit(&bits);
            info!("Encoded {} bits into {} samples", bits.len(), samples.len());

            if let Some(path) = &wav {
                write_to_wav(&samples, config.sample_rate, config.peak_voltage, path)?;
            }
            if let Some(path) = &json {
                let dump = SignalDump::new(
                    config.scheme.name(),
                    config.bits_per_symbol,
                    config.sample_rate,
                    samples,
                );
                save_json(&dump, path)?;
                info!("Signal dump saved to {}", path.display());
            }
            if wav.is_none() && json.is_none() {
                warn!("No --wav or --json output given; samples discarded");
            }
        }
        Commands::Decode {
            phy,
            input,
            as_text,
        } => {
            let mut config = phy.resolve(&registry)?;
            let samples = read_samples(&input, &mut config, &registry)?;
            let bits = Receiver::new(config)?.receive(&samples);
            println!("{}", format_bits(&bits));
            if as_text {
                println!("{}", bits_to_text(&bits));
            }
        }
        Commands::Roundtrip { phy, message } => {
            let config = phy.resolve(&registry)?;
            let bits = message.bits()?;
            let samples = Transmitter::new(config.clone())?.transmit(&bits);
            let received = Receiver::new(config)?.receive(&samples);
            let errors = count_bit_errors(&bits, &received);
            println!("sent:     {}", format_bits(&bits));
            println!("received: {}", format_bits(&received));
            println!("bit errors: {} / {}", errors, bits.len());
            if message.text.is_some() || message.bits.is_none() {
                println!("text: {}", bits_to_text(&received));
            }
        }
        Commands::Sweep {
            phy,
            message,
            sigmas,
            output,
        } => {
            print_banner();
            let config = phy.resolve(&registry)?;
            let bits = message.bits()?;
            let progress = ProgressManager::new();
            let bar = progress
                .create_bar("sweep", sigmas.len() as u64, templates::SWEEP, config.scheme.name())
                .map_err(|e| warn!("Progress bar unavailable: {}", e))
                .ok();
            let points = run_ber_sweep(&config, &bits, &sigmas, bar.as_ref())?;
            if bar.is_some() {
                let _ = progress.finish("sweep", "sweep complete");
            }
            for point in &points {
                println!(
                    "sigma {:>8.3}  errors {:>6} / {:<6}  BER {:.5}",
                    point.sigma, point.errors, point.bits, point.ber
                );
            }
            if let Some(path) = &output {
                save_json(&points, path)?;
                info!("Sweep results saved to {}", path.display());
            }
        }
        Commands::Dictionary { phy, output } => {
            let config = phy.resolve(&registry)?;
            let dictionary = Transmitter::new(config.clone().ideal())?.waveform_dictionary()?;
            let dump = DictionaryDump::new(config.scheme.name(), config.sample_rate, &dictionary);
            match &output {
                Some(path) => {
                    save_json(&dump, path)?;
                    info!("Dictionary saved to {}", path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&dump)?),
            }
        }
        Commands::Schemes => print_schemes(&registry),
    }
    Ok(())
}

/// A JSON dump carries its own scheme, width and sample rate, which
/// override the config; a WAV only carries the sample rate.
fn read_samples(
    path: &Path,
    config: &mut PhyConfig,
    registry: &SchemeRegistry,
) -> Result<Vec<f64>> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        let dump: SignalDump = load_json(path)?;
        dump.apply_to(config, registry)?;
        return Ok(dump.samples);
    }

    let (samples, sample_rate) = read_wav(path, config.peak_voltage)?;
    if sample_rate != config.sample_rate {
        warn!(
            "Input sample rate {} Hz overrides configured {} Hz",
            sample_rate, config.sample_rate
        );
        config.sample_rate = sample_rate;
        config.validate()?;
    }
    Ok(samples)
}
