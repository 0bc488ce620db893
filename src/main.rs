use clap::Parser;
use kyoto_temple_map::{check, cli, config, draft, error, fixer, logging, matcher};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

fn main() {
    let cli = Cli::parse();
    logging::configure_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("エラーが発生しました: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load()?;
    if let Some(root) = cli.root {
        config = config.with_root(root);
    }

    match cli.command {
        Commands::Generate => {
            println!("画像ファイルからtemples.jsonを生成します...\n");

            let report = draft::run_generate(&config)?;

            println!("✓ {} を生成しました", report.output.display());
            println!("\n次のステップ:");
            println!("1. 生成されたファイルを確認");
            println!("2. 写真から寺社情報の注釈JSONを作成（{}）", config.annotations_path().display());
            println!("3. temple-map merge を実行");
        }

        Commands::Merge => {
            println!("JSONデータをマージします...\n");

            let report = matcher::run_merge(&config)?;

            println!("\n{}", report);
            println!("\n次のステップ:");
            println!("1. 生成されたファイルを確認");
            println!("2. 必要に応じて手動で編集");
            println!("3. アプリケーションをリロード");
        }

        Commands::FixPaths => {
            let report = fixer::run_fix_paths(&config)?;

            println!("\n{}", report);
            println!("\n{} has been updated!", config.catalog_path().display());
        }

        Commands::Check => {
            let report = check::run_check(&config)?;

            println!("寺社: {}件 / 画像: {}枚", report.sites, report.images);
            for name in &report.without_coordinates {
                println!("✗ {}: 位置情報なし（地図に表示されません）", name);
            }
            for name in &report.without_images {
                println!("✗ {}: 画像なし", name);
            }
            if cli.verbose {
                for url in &report.image_urls {
                    println!("  {}", url);
                }
            }
            if report.is_clean() {
                println!("✓ 問題は見つかりませんでした");
            }
        }

        Commands::Config { show, init } => {
            if init {
                config.save()?;
                println!("✔ 設定を保存しました: {}", Config::config_path()?.display());
            }

            if show || !init {
                println!("設定:");
                println!("  プロジェクトルート: {}", config.project_root.display());
                println!("  画像フォルダ: {}", config.images_dir().display());
                println!("  雛形JSON: {}", config.draft_path().display());
                println!("  注釈JSON: {}", config.annotations_path().display());
                println!("  カタログ: {}", config.catalog_path().display());
                println!("  画像パス接頭辞: {}", config.image_prefix);
                println!("  ベースパス: {}", config.base_path);
                println!("  クラスタ閾値: {}", config.cluster_threshold);
            }
        }
    }

    Ok(())
}
