//! 京都寺社マップのデータ生成ツール
//!
//! 1. generate: 画像のEXIFから位置・撮影日を抽出し、近接する画像を寺社候補にまとめる
//! 2. merge: 候補と人手/AIの注釈を画像ファイル名で照合し、カタログを作る
//! 3. fix-paths / check: カタログの保守

pub mod check;
pub mod cli;
pub mod cluster;
pub mod config;
pub mod draft;
pub mod error;
pub mod fixer;
pub mod logging;
pub mod matcher;
pub mod scanner;
pub mod store;
