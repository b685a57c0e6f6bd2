//! 設定ファイルの読み込み関数

use std::path::Path;

use super::{
    ConfigError,
    I18nSettings,
};

/// ワークスペース直下に置く設定ファイル名
pub const CONFIG_FILE_NAME: &str = ".i18n-catalog.json";

/// ワークスペースから設定を読み込む
///
/// `.i18n-catalog.json` ファイルを探して読み込む
///
/// # Returns
/// - `Ok(Some(settings))`: 設定ファイルが見つかり、読み込みに成功
/// - `Ok(None)`: 設定ファイルが見つからない
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<I18nSettings>, ConfigError> {
    let config_path = workspace_root.join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    load_from_file(&config_path).map(Some)
}

/// 明示的に指定された設定ファイルを読み込む
///
/// ファイルが存在しない場合もエラーになる
///
/// # Errors
/// - ファイル読み込みエラー
/// - JSON パースエラー
pub(super) fn load_from_file(config_path: &Path) -> Result<I18nSettings, ConfigError> {
    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(config_path)?;
    let settings: I18nSettings = serde_json::from_str(&content)?;

    Ok(settings)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_workspace`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_workspace_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"fuzzyThreshold": 0.8}"#).unwrap();

        let settings = load_from_workspace(temp_dir.path()).unwrap();

        assert_that!(settings.map(|s| s.fuzzy_threshold), some(eq(0.8)));
    }

    /// `load_from_workspace`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_workspace_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Ok(None)));
    }

    /// `load_from_workspace`: JSON パースエラー
    #[rstest]
    fn test_load_from_workspace_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "invalid json").unwrap();

        let result = load_from_workspace(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// `load_from_file`: 存在しないファイルは I/O エラー
    #[rstest]
    fn test_load_from_file_missing() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_file(&temp_dir.path().join("absent.json"));

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    /// `load_from_file`: 任意のファイル名で読み込める
    #[rstest]
    fn test_load_from_file_custom_name() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog-settings.json");
        fs::write(&path, r#"{"excludePatterns": ["vendor/**"]}"#).unwrap();

        let settings = load_from_file(&path).unwrap();

        assert_that!(settings.exclude_patterns, elements_are![eq("vendor/**")]);
    }
}
