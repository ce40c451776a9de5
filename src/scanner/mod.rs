//! 画像フォルダの走査
//!
//! 画像ルート直下のフォルダ・画像ファイルを列挙し、照合の入力を作る。
//! 再帰はしない（ルート直下とフォルダ直下のみ）。

use crate::error::{MediaError, Result};
use showroom_media_common::{order_images, normalize_name, AssetGroup, FolderInfo};
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// 拡張子が画像か（大文字小文字無視）
pub fn is_image_file(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// 直下のエントリを名前順で列挙
fn children(dir: &Path) -> Result<impl Iterator<Item = DirEntry>> {
    if !dir.is_dir() {
        return Err(MediaError::FolderNotFound(dir.display().to_string()));
    }

    Ok(WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok()))
}

fn entry_name(entry: &DirEntry) -> String {
    entry.file_name().to_string_lossy().to_string()
}

/// 直下のサブフォルダ名（名前順）
pub fn list_folders(root: &Path) -> Result<Vec<String>> {
    Ok(children(root)?
        .filter(|e| e.file_type().is_dir())
        .map(|e| entry_name(&e))
        .collect())
}

/// 直下の画像ファイル名（名前順、並び替えは呼び出し側で行う）
pub fn list_image_files(dir: &Path) -> Result<Vec<String>> {
    Ok(children(dir)?
        .filter(|e| e.file_type().is_file())
        .map(|e| entry_name(&e))
        .filter(|name| is_image_file(name))
        .collect())
}

/// ルート直下に置かれた画像（フォールバック照合の対象）
pub fn list_root_images(root: &Path) -> Result<Vec<String>> {
    list_image_files(root)
}

/// ルート直下の全フォルダとその画像一覧
pub fn scan_asset_groups(root: &Path) -> Result<Vec<AssetGroup>> {
    let mut groups = Vec::new();

    for name in list_folders(root)? {
        let files = list_image_files(&root.join(&name))?;
        debug!("フォルダ {}: {}枚", name, files.len());
        groups.push(AssetGroup::new(name, files));
    }

    Ok(groups)
}

/// 呼び出し側が指定したフォルダをルート配下のパスに解決する
///
/// `..` を含む指定や絶対パスは拒否。存在しない場合は `Ok(None)`。
pub fn resolve_folder(root: &Path, folder: &str) -> Result<Option<PathBuf>> {
    if folder.contains("..") {
        return Err(MediaError::PathTraversal(folder.to_string()));
    }

    let relative = Path::new(folder);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(MediaError::PathTraversal(folder.to_string()));
    }

    let path = root.join(relative);
    if path.is_dir() {
        Ok(Some(path))
    } else {
        Ok(None)
    }
}

/// 画像URL（各要素をURLエンコード）
pub fn image_url(prefix: &str, folder: Option<&str>, file_name: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    match folder {
        Some(folder) => format!(
            "{}/{}/{}",
            prefix,
            urlencoding::encode(folder),
            urlencoding::encode(file_name)
        ),
        None => format!("{}/{}", prefix, urlencoding::encode(file_name)),
    }
}

/// フォルダ内の画像URLを代表画像優先の順で返す
pub fn folder_image_urls(prefix: &str, folder: &str, files: &[String]) -> Vec<String> {
    order_images(files)
        .iter()
        .map(|f| image_url(prefix, Some(folder), f))
        .collect()
}

/// フォルダ一覧APIのレコードを作る
pub fn folder_infos(root: &Path, prefix: &str) -> Result<Vec<FolderInfo>> {
    let groups = scan_asset_groups(root)?;

    Ok(groups
        .into_iter()
        .map(|group| FolderInfo {
            normalized_name: normalize_name(&group.name),
            image_count: group.asset_count(),
            has_destaque: group.has_priority_asset(),
            images: folder_image_urls(prefix, &group.name, &group.files),
            name: group.name,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_is_image_file() {
        assert!(is_image_file("a.jpg"));
        assert!(is_image_file("a.JPG"));
        assert!(is_image_file("a.jpeg"));
        assert!(is_image_file("a.png"));
        assert!(is_image_file("a.webp"));
        assert!(is_image_file("a.GIF"));
        assert!(!is_image_file("a.txt"));
        assert!(!is_image_file("a.mp4"));
        assert!(!is_image_file("jpg"));
    }

    #[test]
    fn test_list_folders_and_images() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("bmw-x6")).unwrap();
        fs::create_dir(dir.path().join("audi-rs6")).unwrap();
        File::create(dir.path().join("bmw-x6").join("02.jpg")).unwrap();
        File::create(dir.path().join("bmw-x6").join("01-capa.png")).unwrap();
        File::create(dir.path().join("bmw-x6").join("notes.txt")).unwrap();
        File::create(dir.path().join("root.webp")).unwrap();

        assert_eq!(list_folders(dir.path()).unwrap(), vec!["audi-rs6", "bmw-x6"]);
        assert_eq!(
            list_image_files(&dir.path().join("bmw-x6")).unwrap(),
            vec!["01-capa.png", "02.jpg"]
        );
        assert_eq!(list_root_images(dir.path()).unwrap(), vec!["root.webp"]);
    }

    #[test]
    fn test_missing_root() {
        let result = list_folders(Path::new("/nonexistent/showroom/images"));
        assert!(matches!(result, Err(MediaError::FolderNotFound(_))));
    }

    #[test]
    fn test_resolve_folder_rejects_traversal() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            resolve_folder(dir.path(), "../etc"),
            Err(MediaError::PathTraversal(_))
        ));
        assert!(matches!(
            resolve_folder(dir.path(), "a/../../b"),
            Err(MediaError::PathTraversal(_))
        ));
        assert!(matches!(
            resolve_folder(dir.path(), "/etc"),
            Err(MediaError::PathTraversal(_))
        ));
    }

    #[test]
    fn test_resolve_folder_missing_and_present() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("porsche")).unwrap();

        assert_eq!(resolve_folder(dir.path(), "missing").unwrap(), None);
        assert_eq!(
            resolve_folder(dir.path(), "porsche").unwrap(),
            Some(dir.path().join("porsche"))
        );
    }

    #[test]
    fn test_image_url_encodes_components() {
        assert_eq!(
            image_url("/images", Some("BMW X6 M"), "01 capa.jpg"),
            "/images/BMW%20X6%20M/01%20capa.jpg"
        );
        assert_eq!(image_url("/images/", None, "a.jpg"), "/images/a.jpg");
    }

    #[test]
    fn test_folder_infos() {
        let dir = tempdir().unwrap();
        let folder = dir.path().join("Mustang GT500");
        fs::create_dir(&folder).unwrap();
        File::create(folder.join("2.jpg")).unwrap();
        File::create(folder.join("Mustang-destaque.jpg")).unwrap();

        let infos = folder_infos(dir.path(), "/images").unwrap();
        assert_eq!(infos.len(), 1);
        assert_eq!(infos[0].name, "Mustang GT500");
        assert_eq!(infos[0].normalized_name, "mustang gt500");
        assert_eq!(infos[0].image_count, 2);
        assert!(infos[0].has_destaque);
        assert_eq!(
            infos[0].images,
            vec![
                "/images/Mustang%20GT500/Mustang-destaque.jpg",
                "/images/Mustang%20GT500/2.jpg",
            ]
        );
    }
}
