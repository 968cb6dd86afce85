//! # FFmpeg 调用工具
//!
//! 定位 ffmpeg 可执行文件并以 concat demuxer 方式调用。
//!
//! ## 功能
//! - 解析 ffmpeg 路径：显式路径优先，否则搜索 PATH
//! - 构造 `-f concat -safe 0 -i <list> -c copy <out>` 参数
//! - 执行命令并捕获 stderr 用于错误报告
//!
//! ## 依赖关系
//! - 被 `batch/driver.rs` 调用
//! - 无外部模块依赖

use crate::error::{DashmergeError, Result};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// 默认工具名
pub const TOOL_NAME: &str = "ffmpeg";

/// 解析 ffmpeg 可执行文件路径
///
/// 给了显式路径就只认它，不存在直接报错；否则在 PATH
/// 各目录里找 `ffmpeg` / `ffmpeg.exe`，取第一个命中。
pub fn resolve_tool(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path.to_path_buf());
        }
        return Err(DashmergeError::ToolNotFound {
            path: path.display().to_string(),
        });
    }

    let dirs: Vec<PathBuf> = std::env::var_os("PATH")
        .map(|v| std::env::split_paths(&v).collect())
        .unwrap_or_default();

    search_dirs(&dirs).ok_or_else(|| DashmergeError::ToolNotFound {
        path: TOOL_NAME.to_string(),
    })
}

/// 在目录列表中查找 ffmpeg 可执行文件
fn search_dirs(dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in dirs {
        for name in [TOOL_NAME, "ffmpeg.exe"] {
            let candidate = dir.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

/// concat demuxer 的参数序列
///
/// 顺序固定：`-f concat -safe 0 -i <manifest> -c copy <output>`。
pub fn concat_args(manifest: &Path, output: &Path) -> Vec<OsString> {
    vec![
        OsString::from("-f"),
        OsString::from("concat"),
        OsString::from("-safe"),
        OsString::from("0"),
        OsString::from("-i"),
        manifest.as_os_str().to_os_string(),
        OsString::from("-c"),
        OsString::from("copy"),
        output.as_os_str().to_os_string(),
    ]
}

/// 运行一次 concat 合并，等待退出并捕获输出
pub fn run_concat(tool: &Path, manifest: &Path, output: &Path) -> Result<()> {
    let result = Command::new(tool)
        .args(concat_args(manifest, output))
        .output()
        .map_err(|e| DashmergeError::ToolLaunchError {
            command: tool.display().to_string(),
            source: e,
        })?;

    if !result.status.success() {
        return Err(DashmergeError::ToolFailed {
            command: format!(
                "{} -f concat -safe 0 -i {} -c copy {}",
                tool.display(),
                manifest.display(),
                output.display()
            ),
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_concat_args_order() {
        let args = concat_args(Path::new("list.txt"), Path::new("out.mp4"));
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            rendered,
            vec!["-f", "concat", "-safe", "0", "-i", "list.txt", "-c", "copy", "out.mp4"]
        );
    }

    #[test]
    fn test_resolve_explicit_path() {
        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("ffmpeg");
        fs::write(&tool, b"").unwrap();

        let resolved = resolve_tool(Some(&tool)).unwrap();
        assert_eq!(resolved, tool);
    }

    #[test]
    fn test_resolve_explicit_path_missing() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("ffmpeg");
        assert!(matches!(
            resolve_tool(Some(&gone)),
            Err(DashmergeError::ToolNotFound { .. })
        ));
    }

    #[test]
    fn test_search_dirs_finds_first_hit() {
        let empty = TempDir::new().unwrap();
        let hit = TempDir::new().unwrap();
        fs::write(hit.path().join("ffmpeg"), b"").unwrap();

        let dirs = vec![empty.path().to_path_buf(), hit.path().to_path_buf()];
        let found = search_dirs(&dirs).unwrap();
        assert_eq!(found, hit.path().join("ffmpeg"));
    }

    #[test]
    fn test_search_dirs_empty() {
        let empty = TempDir::new().unwrap();
        assert!(search_dirs(&[empty.path().to_path_buf()]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_concat_reports_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("ffmpeg");
        fs::write(&tool, "#!/bin/sh\necho 'demux error' >&2\nexit 1\n").unwrap();
        let mut perms = fs::metadata(&tool).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&tool, perms).unwrap();

        let err = run_concat(&tool, Path::new("list.txt"), Path::new("out.mp4")).unwrap_err();
        match err {
            DashmergeError::ToolFailed { status, stderr, .. } => {
                assert_eq!(status.code(), Some(1));
                assert_eq!(stderr, "demux error");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_run_concat_success() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let tool = dir.path().join("ffmpeg");
        fs::write(&tool, "#!/bin/sh\nexit 0\n").unwrap();
        let mut perms = fs::metadata(&tool).unwrap().permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&tool, perms).unwrap();

        run_concat(&tool, Path::new("list.txt"), Path::new("out.mp4")).unwrap();
    }
}
