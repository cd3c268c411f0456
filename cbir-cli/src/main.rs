mod store;

use cbir::io::load_bgr_image;
use cbir::{
    without_self, CbirError, CustomWeights, Descriptor, GaborParams, GlcmAngle, GlcmParams,
    RankConfig, Ranker, ScoredMatch,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "tif", "tiff"];

#[derive(Parser, Debug)]
#[command(author, version, about = "Content-based image retrieval CLI")]
struct Cli {
    /// JSON file overriding descriptor and ranking parameters.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for performance profiling.
    #[arg(long, global = true)]
    trace: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract features for every image in a directory into a feature file.
    Extract {
        /// Descriptor tag (b, h2, h3, m, t, tc, glcm, laws, gabor, c).
        #[arg(short, long)]
        descriptor: String,
        /// Directory holding the corpus images (not searched recursively).
        #[arg(long)]
        dir: PathBuf,
        /// Feature file to write; an existing file is replaced.
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Rank a feature file against a target image.
    Query {
        /// Descriptor tag the feature file was extracted with.
        #[arg(short, long)]
        descriptor: String,
        /// Target image path, or the target identifier for embeddings.
        #[arg(short, long)]
        target: String,
        /// Feature file to search.
        #[arg(short, long)]
        features: PathBuf,
        /// Number of matches to report.
        #[arg(long, default_value_t = 3)]
        top: usize,
        /// Drop the target's own entry from the results.
        #[arg(long)]
        exclude_self: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum WeightsConfig {
    Small,
    Medium,
    Large,
    Custom([f32; 4]),
}

impl From<WeightsConfig> for CustomWeights {
    fn from(value: WeightsConfig) -> Self {
        match value {
            WeightsConfig::Small => CustomWeights::SMALL,
            WeightsConfig::Medium => CustomWeights::MEDIUM,
            WeightsConfig::Large => CustomWeights::LARGE,
            WeightsConfig::Custom(weights) => CustomWeights(weights),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GlcmConfigJson {
    distance: usize,
    angle_deg: u32,
    levels: usize,
}

impl Default for GlcmConfigJson {
    fn default() -> Self {
        let cfg = GlcmParams::default();
        Self {
            distance: cfg.distance,
            angle_deg: cfg.angle.degrees(),
            levels: cfg.levels,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GaborConfigJson {
    kernel_size: usize,
    sigma: f32,
    gamma: f32,
    psi: f32,
    wavelengths: Vec<f32>,
    orientations_deg: Vec<f32>,
}

impl Default for GaborConfigJson {
    fn default() -> Self {
        let cfg = GaborParams::default();
        Self {
            kernel_size: cfg.kernel_size,
            sigma: cfg.sigma,
            gamma: cfg.gamma,
            psi: cfg.psi,
            wavelengths: cfg.wavelengths,
            orientations_deg: cfg.orientations.iter().map(|t| t.to_degrees()).collect(),
        }
    }
}

/// Optional overrides; anything left out keeps the tag's default.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Config {
    bins: Option<usize>,
    color_bins: Option<usize>,
    texture_bins: Option<usize>,
    weights: Option<WeightsConfig>,
    glcm: Option<GlcmConfigJson>,
    gabor: Option<GaborConfigJson>,
    parallel: bool,
}

impl Config {
    fn load(path: Option<&Path>) -> Result<Self, Box<dyn std::error::Error>> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)?;
                Ok(serde_json::from_str(&text)?)
            }
            None => Ok(Self::default()),
        }
    }

    fn descriptor(self, tag: &str) -> Result<Descriptor, Box<dyn std::error::Error>> {
        let descriptor = match Descriptor::from_tag(tag)? {
            Descriptor::Chroma2d { bins } => Descriptor::Chroma2d {
                bins: self.bins.unwrap_or(bins),
            },
            Descriptor::Chroma3d { bins } => Descriptor::Chroma3d {
                bins: self.bins.unwrap_or(bins),
            },
            Descriptor::MultiPart { bins } => Descriptor::MultiPart {
                bins: self.bins.unwrap_or(bins),
            },
            Descriptor::Texture { bins } => Descriptor::Texture {
                bins: self.texture_bins.or(self.bins).unwrap_or(bins),
            },
            Descriptor::ColorTexture {
                color_bins,
                texture_bins,
            } => Descriptor::ColorTexture {
                color_bins: self.color_bins.unwrap_or(color_bins),
                texture_bins: self.texture_bins.unwrap_or(texture_bins),
            },
            Descriptor::Glcm(params) => match self.glcm {
                Some(glcm) => Descriptor::Glcm(GlcmParams {
                    distance: glcm.distance,
                    angle: GlcmAngle::from_degrees(glcm.angle_deg)?,
                    levels: glcm.levels,
                }),
                None => Descriptor::Glcm(params),
            },
            Descriptor::Gabor(params) => match self.gabor {
                Some(gabor) => Descriptor::Gabor(GaborParams {
                    kernel_size: gabor.kernel_size,
                    sigma: gabor.sigma,
                    gamma: gabor.gamma,
                    psi: gabor.psi,
                    wavelengths: gabor.wavelengths,
                    orientations: gabor
                        .orientations_deg
                        .iter()
                        .map(|d| d.to_radians())
                        .collect(),
                }),
                None => Descriptor::Gabor(params),
            },
            Descriptor::Custom { bins, weights } => Descriptor::Custom {
                bins: self.bins.unwrap_or(bins),
                weights: self.weights.map(CustomWeights::from).unwrap_or(weights),
            },
            other => other,
        };
        Ok(descriptor)
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    id: String,
    score: f32,
}

impl From<ScoredMatch> for MatchRecord {
    fn from(value: ScoredMatch) -> Self {
        Self {
            id: value.id,
            score: value.score,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let default_directive = if cli.trace { "cbir=info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_directive.parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let Some(command) = cli.command else {
        return Err("a subcommand is required (extract or query); see --help".into());
    };
    let config = Config::load(cli.config.as_deref())?;
    let ranking = RankConfig {
        parallel: config.parallel,
    };

    match command {
        Command::Extract {
            descriptor,
            dir,
            out,
        } => {
            let descriptor = config.descriptor(&descriptor)?;
            extract_dir(&descriptor, &dir, &out)
        }
        Command::Query {
            descriptor,
            target,
            features,
            top,
            exclude_self,
        } => {
            let descriptor = config.descriptor(&descriptor)?;
            let matches = query(&descriptor, ranking, &target, &features, top, exclude_self)?;
            let output = Output {
                matches: matches.into_iter().map(MatchRecord::from).collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Identifier stored for an image: its file name.
fn image_id(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn extract_dir(
    descriptor: &Descriptor,
    dir: &Path,
    out: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_image(e.path()))
        .map(|e| e.into_path())
        .collect();
    paths.sort();

    let rows = extract_features(descriptor, &paths)?;
    let mut writer = store::create(out)?;
    for (id, vector) in &rows {
        store::append(&mut writer, id, vector)?;
    }
    writer.flush()?;
    tracing::info!(
        descriptor = descriptor.tag(),
        images = rows.len(),
        "wrote {}",
        out.display()
    );
    Ok(())
}

/// Extracts `(id, vector)` rows, skipping images that fail to decode or that
/// the descriptor rejects as input.
fn extract_features(
    descriptor: &Descriptor,
    paths: &[PathBuf],
) -> Result<Vec<(String, Vec<f32>)>, CbirError> {
    let mut rows = Vec::with_capacity(paths.len());
    for path in paths {
        let image = match load_bgr_image(path) {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!("skipping {}: {err}", path.display());
                continue;
            }
        };
        match descriptor.extract(image.view()) {
            Ok(vector) => rows.push((image_id(path), vector)),
            Err(err @ CbirError::InvalidInput { .. }) => {
                tracing::warn!("skipping {}: {err}", path.display());
            }
            Err(err) => return Err(err),
        }
    }
    Ok(rows)
}

fn query(
    descriptor: &Descriptor,
    ranking: RankConfig,
    target: &str,
    features: &Path,
    top: usize,
    exclude_self: bool,
) -> Result<Vec<ScoredMatch>, Box<dyn std::error::Error>> {
    let corpus = store::load(features)?;
    let ranker = Ranker::new(descriptor.metric()).with_config(ranking);

    let (target_id, ranked) = match descriptor {
        Descriptor::Embedding => (target.to_owned(), ranker.rank_by_id(target, &corpus, top)?),
        _ => {
            let path = Path::new(target);
            let image = load_bgr_image(path)?;
            let vector = descriptor.extract(image.view())?;
            (image_id(path), ranker.rank(&vector, &corpus, top)?)
        }
    };

    if exclude_self {
        Ok(without_self(ranked, &target_id, top))
    } else {
        Ok(ranked)
    }
}
