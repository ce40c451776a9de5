use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "showroom-media")]
#[command(about = "車両在庫と画像フォルダの照合・画像API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 画像ルート（設定ファイルより優先）
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// 車両カタログJSON（設定ファイルより優先）
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 名前またはフォルダから画像を探す
    Lookup {
        /// 車両名（例: "BMW X6 M Competition"）
        #[arg(required_unless_present = "folder", conflicts_with = "folder")]
        name: Option<String>,

        /// フォルダを直接指定
        #[arg(short, long)]
        folder: Option<String>,

        /// 候補フォルダのスコアを表示
        #[arg(long)]
        explain: bool,
    },

    /// 画像フォルダの一覧を出力
    Folders,

    /// カタログの車両に対応する画像を探す
    Vehicle {
        /// 車両ID
        #[arg(required = true)]
        id: String,
    },

    /// 車両とフォルダの対応を診断
    Diagnose {
        /// サマリのみ表示
        #[arg(long)]
        summary: bool,
    },

    /// HTTPサーバを起動
    Serve {
        /// 待ち受けポート
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// 設定を表示/編集
    Config {
        /// 画像ルートを設定
        #[arg(long)]
        set_images_root: Option<PathBuf>,

        /// 車両カタログを設定
        #[arg(long)]
        set_catalog: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
