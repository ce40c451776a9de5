use clap::Parser;
use showroom_media::{catalog, cli, config, error, resolver, scanner, server};
use showroom_media_common::rank_by_name;
use catalog::Catalog;
use cli::{Cli, Commands};
use config::Config;
use error::{MediaError, Result};
use resolver::ImageRoot;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    match &config.catalog_path {
        Some(path) => Catalog::from_file(path),
        None => Ok(Catalog::default()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load()?;
    if let Some(root) = cli.root.clone() {
        config.images_root = root;
    }
    if let Some(catalog) = cli.catalog.clone() {
        config.catalog_path = Some(catalog);
    }

    match cli.command {
        Commands::Lookup { name, folder, explain } => {
            let root = ImageRoot::new(&config.images_root, &config.url_prefix);

            let lookup = match (folder, name) {
                (Some(folder), _) => root.lookup_folder(&folder)?,
                (None, Some(name)) => {
                    if explain {
                        let groups = scanner::scan_asset_groups(&config.images_root)?;
                        // 標準出力はJSONのみ
                        eprintln!("候補フォルダ:");
                        for r in rank_by_name(&name, &groups) {
                            eprintln!("  {:>5}  {}", r.score, r.candidate.raw);
                        }
                        eprintln!();
                    }
                    root.lookup_by_name(&name)
                }
                (None, None) => resolver::ImageLookup::empty(),
            };

            print_json(&lookup)?;
        }

        Commands::Folders => {
            let folders = scanner::folder_infos(&config.images_root, &config.url_prefix)?;
            print_json(&folders)?;
        }

        Commands::Vehicle { id } => {
            let catalog = load_catalog(&config)?;
            let vehicle = catalog
                .get(&id)
                .ok_or_else(|| MediaError::VehicleNotFound(id.clone()))?;

            let root = ImageRoot::new(&config.images_root, &config.url_prefix);
            print_json(&root.lookup_vehicle(vehicle))?;
        }

        Commands::Diagnose { summary } => {
            let catalog = load_catalog(&config)?;
            let root = ImageRoot::new(&config.images_root, &config.url_prefix);
            let report = root.diagnose(&catalog);

            if summary {
                let s = &report.summary;
                println!("メディア診断:");
                println!("  フォルダ: {}", s.folders);
                println!("  車両: {}", s.vehicles);
                println!("  画像なし: {}", s.vehicles_missing);
                println!("  孤立フォルダ: {}", s.folders_orphan);
                println!("  重複車両: {}", s.vehicles_duplicated);
                println!("  曖昧なフォルダ: {}", s.folders_ambiguous);
            } else {
                print_json(&report)?;
            }
        }

        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let catalog = load_catalog(&config)?;
            server::start_server(server::AppState::new(config, catalog)).await?;
        }

        Commands::Config { set_images_root, set_catalog, show } => {
            if let Some(root) = set_images_root {
                config.set_images_root(root)?;
                println!("✔ 画像ルートを設定しました");
            }

            if let Some(path) = set_catalog {
                config.set_catalog_path(path)?;
                println!("✔ 車両カタログを設定しました");
            }

            if show {
                println!("設定:");
                println!("  画像ルート: {}", config.images_root.display());
                println!("  URL接頭辞: {}", config.url_prefix);
                println!(
                    "  車両カタログ: {}",
                    config
                        .catalog_path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "未設定".into())
                );
                println!("  ポート: {}", config.port);
            }
        }
    }

    Ok(())
}
