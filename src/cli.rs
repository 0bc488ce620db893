use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "temple-map")]
#[command(about = "京都寺社マップのデータ生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// プロジェクトルート（省略時は設定ファイルの値）
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 画像のEXIFから寺社の雛形JSONを生成
    Generate,

    /// 雛形JSONと注釈JSONをマージしてカタログを生成
    Merge,

    /// カタログ内の画像パスを実ファイル名に合わせて修正
    FixPaths,

    /// カタログを表示側と同じ規則で検証
    Check,

    /// 設定を表示/初期化
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 既定値で設定ファイルを作成
        #[arg(long)]
        init: bool,
    },
}
