use clap::{Parser, Subcommand, ValueEnum};
use overlay_gal::classify::media_mime;
use overlay_gal::link::{decode_link, encode_external_link, encode_link};
use overlay_gal::session::{AdminGate, LocalFile, Session};
use overlay_gal::types::{AssetType, Category, CategoryFilter};
use overlay_gal::{config, generate, output, resolve, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("OVERLAY_GAL_ON_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("OVERLAY_GAL_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "overlay-gal")]
#[command(about = "Gallery and OBS overlay pages for stream media assets")]
#[command(long_about = "\
Gallery and OBS overlay pages for stream media assets

Your media folder is the data source. Every video or image becomes a card on
a dashboard, filed into a category by keywords in its filename, and gets a
transparent overlay page you can add to OBS as a browser source.

Source structure:

  animations/
  ├── config.toml                  # Site config (optional)
  ├── notes.md                     # Shown in the dashboard sidebar (optional)
  ├── inicio 1.mp4                 # → Stream Intro, \"Inicio 1\"
  ├── donacion-grande.webm         # → Donations, \"Donacion Grande\"
  ├── camara v2.png                # → Camera Frame, \"Camara V2\"
  └── .drafts/                     # Hidden entries are skipped

Category keywords (first match wins):
  intro, inicio → Stream Intro     fin, ending, off → Stream Ending
  brb, pausa    → BRB              cam, marco, frame → Camera Frame
  follow        → New Followers    sub, prime       → Subscribers
  donation, bit, tip, alert → Donations      (no match → Stream Intro)

Deep links:
  <page>#/overlay/<id>
  <page>#/overlay/custom?src=<url>&type=VIDEO|IMAGE

Run 'overlay-gal gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Media source directory
    #[arg(long, default_value = "animations", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".overlay-gal-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan the source directory into a manifest
    Scan,
    /// Produce the dashboard and overlay pages from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Verify that every media file is present and non-empty
    Check,
    /// Show what the dashboard lists, optionally with session edits applied
    List {
        /// Only show one category (donations, followers, subscribers, intro, ending, brb, camera)
        #[arg(long)]
        category: Option<String>,
        /// Admin secret; required for --hide and --add-local
        #[arg(long)]
        secret: Option<String>,
        /// Hide an asset by id for this listing
        #[arg(long)]
        hide: Vec<String>,
        /// Add a local file as a temporary asset for this listing
        #[arg(long)]
        add_local: Vec<PathBuf>,
    },
    /// Print the overlay deep link for an asset id or an external URL
    Link {
        /// Asset id
        #[arg(required_unless_present = "external")]
        id: Option<String>,
        /// Page URL to build the link on (defaults to `base_url` from config)
        #[arg(long)]
        base: Option<String>,
        /// Link to this media URL instead of a catalog asset
        #[arg(long, conflicts_with = "id")]
        external: Option<String>,
        /// Media type of the external URL
        #[arg(long = "type", value_enum, default_value_t = MediaKind::Video)]
        media_type: MediaKind,
    },
    /// Show what a deep link resolves to
    Resolve {
        /// Full URL or `/overlay/...` route
        url: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// Media types an external link can request.
#[derive(Clone, Copy, ValueEnum)]
enum MediaKind {
    Video,
    Image,
}

impl From<MediaKind> for AssetType {
    fn from(kind: MediaKind) -> Self {
        match kind {
            MediaKind::Video => AssetType::Video,
            MediaKind::Image => AssetType::Image,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let manifest_path = cli.temp_dir.join("manifest.json");
            let site = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            let manifest_content = std::fs::read_to_string(&manifest_path)?;
            let manifest: scan::Manifest = serde_json::from_str(&manifest_content)?;
            output::print_generate_output(&manifest, &site);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let manifest_path = write_manifest(&manifest, &cli.temp_dir)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let site = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&manifest, &site);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            let checked = manifest.assets.len();
            let gate = AdminGate::new(manifest.config.admin.secret.clone());
            let mut session = Session::new(manifest.assets.clone(), gate);
            for asset in &manifest.assets {
                let Some(rel) = manifest.files.get(&asset.id) else {
                    continue;
                };
                match std::fs::metadata(cli.source.join(rel)) {
                    Ok(meta) if meta.len() == 0 => session.mark_load_failed(&asset.id, "file is empty"),
                    Ok(_) => {}
                    Err(e) => session.mark_load_failed(&asset.id, e.to_string()),
                }
            }
            let failures: Vec<_> = manifest
                .assets
                .iter()
                .filter_map(|asset| session.load_failure(&asset.id))
                .collect();
            output::print_check_output(checked, failures.iter().copied());
            let failed = failures.len();
            if failed > 0 {
                return Err(format!("{failed} of {checked} media files failed to load").into());
            }
            println!("==> Media is valid");
        }
        Command::List {
            category,
            secret,
            hide,
            add_local,
        } => {
            let filter = parse_filter(category.as_deref())?;
            let manifest = scan::scan(&cli.source)?;
            let base_url = manifest.config.base_url.clone();
            let gate = AdminGate::new(manifest.config.admin.secret.clone());
            let mut session = Session::new(manifest.assets, gate);

            if let Some(secret) = secret {
                if !session.unlock(&secret) {
                    log::warn!("wrong admin secret; editing stays locked");
                }
            }
            for id in &hide {
                session.hide_asset(id)?;
            }
            for path in &add_local {
                let file = local_file(path)?;
                session.add_temporary_asset(file, filter)?;
            }

            output::print_list_output(&session.visible(filter), filter, &base_url);
        }
        Command::Link {
            id,
            base,
            external,
            media_type,
        } => {
            let base = match base {
                Some(base) => base,
                None => config::load_config(&cli.source)?.base_url,
            };
            let link = match (id, external) {
                (_, Some(src)) => encode_external_link(&base, &src, media_type.into()),
                (Some(id), None) => encode_link(&base, &id),
                (None, None) => return Err("an asset id or --external URL is required".into()),
            };
            println!("{link}");
        }
        Command::Resolve { url } => {
            let manifest = scan::scan(&cli.source)?;
            let result = resolve::resolve(&decode_link(&url), &manifest.assets);
            output::print_resolve_output(&result);
            result?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Serialize the scan manifest into the temp directory, returning its path.
fn write_manifest(manifest: &scan::Manifest, temp_dir: &Path) -> std::io::Result<PathBuf> {
    std::fs::create_dir_all(temp_dir)?;
    let manifest_path = temp_dir.join("manifest.json");
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(&manifest_path, json)?;
    Ok(manifest_path)
}

fn parse_filter(slug: Option<&str>) -> Result<CategoryFilter, String> {
    let Some(slug) = slug else {
        return Ok(CategoryFilter::All);
    };
    Category::from_slug(slug)
        .map(CategoryFilter::Only)
        .ok_or_else(|| {
            let known: Vec<&str> = Category::ALL.iter().map(|c| c.slug()).collect();
            format!("unknown category '{slug}' (expected one of: {})", known.join(", "))
        })
}

/// Describe a local file the way a file picker would hand it over.
fn local_file(path: &Path) -> std::io::Result<LocalFile> {
    let absolute = std::fs::canonicalize(path)?;
    let name = absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(LocalFile {
        mime: media_mime(&name).to_string(),
        blob_url: format!("file://{}", absolute.display()),
        name,
    })
}
