//! Showroom Media Common Library
//!
//! 車両名と画像フォルダ名の照合ロジック（CLIとHTTPサーバで共有）。
//! ファイルシステムやネットワークには触れない純粋な計算のみ。

pub mod normalize;
pub mod tokens;
pub mod types;
pub mod score;
pub mod rank;
pub mod images;
pub mod diagnostics;

pub use normalize::normalize_name;
pub use tokens::expand_tokens;
pub use types::{AssetGroup, CandidateName, FolderInfo, MatchResult, VehicleIdentity};
pub use score::{overlap_score, MatchSignals};
pub use rank::{best_match, match_files, rank, rank_by_name};
pub use images::{has_priority_marker, order_images, PRIORITY_TERMS};
pub use diagnostics::{diagnose, IdentifiedVehicle, MediaReport};
