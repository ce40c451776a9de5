use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("不正なパスです: {0}")]
    PathTraversal(String),

    #[error("カタログファイルが見つかりません: {0}")]
    CatalogNotFound(String),

    #[error("カタログが不正: {0}")]
    InvalidCatalog(String),

    #[error("車両が見つかりません: {0}")]
    VehicleNotFound(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("サーバエラー: {0}")]
    Server(String),
}

impl MediaError {
    pub fn status(&self) -> StatusCode {
        match self {
            MediaError::PathTraversal(_) => StatusCode::BAD_REQUEST,
            MediaError::VehicleNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for MediaError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({ "error": self.to_string() });

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, MediaError>;
