//! 文件系统工具（异步）

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 尝试读取文件，不存在时返回 None
pub async fn try_read_file(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// 原子写入文件：先写临时文件再 rename，避免写到一半的状态文件
pub async fn write_file_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    // 确保父目录存在
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let tmp = tmp_path(path);
    fs::write(&tmp, content).await?;

    if let Err(e) = fs::rename(&tmp, path).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(e);
    }
    Ok(())
}

/// 删除文件，不存在视为成功
pub async fn remove_file_if_exists(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}

/// 将任意 key 编码为安全的文件名
///
/// 使用百分号编码，保证不同 key 不会映射到同一文件。
pub fn key_file_name(key: &str) -> String {
    let encoded = urlencoding::encode(key);
    // 开头的 `.` 会变成隐藏文件，与临时文件冲突
    match encoded.strip_prefix('.') {
        Some(rest) => format!("%2E{}.json", rest),
        None => format!("{}.json", encoded),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("nested/dir/test.json");

        write_file_atomic(&file_path, "{}").await.unwrap();
        assert_eq!(try_read_file(&file_path).await.unwrap(), Some("{}".to_string()));

        // 覆盖写入
        write_file_atomic(&file_path, "{\"a\":\"b\"}").await.unwrap();
        assert_eq!(
            try_read_file(&file_path).await.unwrap().as_deref(),
            Some("{\"a\":\"b\"}")
        );
        assert!(!tmp_path(&file_path).exists());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("missing.json");

        assert_eq!(try_read_file(&file_path).await.unwrap(), None);
        remove_file_if_exists(&file_path).await.unwrap();
    }

    #[test]
    fn test_key_file_name() {
        assert_eq!(key_file_name("@profile_data"), "%40profile_data.json");
        assert_eq!(key_file_name("a/b"), "a%2Fb.json");
        assert_eq!(key_file_name(".hidden"), "%2Ehidden.json");
        assert_eq!(key_file_name("my key"), "my%20key.json");
        assert_ne!(key_file_name("a%2Fb"), key_file_name("a/b"));
    }
}
