//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    I18nSettings,
    loader,
};

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: I18nSettings,

    /// 設定の読み込み元ファイル（デフォルト値の場合は `None`）
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: I18nSettings::default(), source: None }
    }

    /// ワークスペースの設定を読み込む
    ///
    /// 設定ファイルがなければデフォルト値を使う
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings(&mut self, workspace_root: Option<&Path>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        if let Some(root) = workspace_root
            && let Some(settings) = loader::load_from_workspace(root)?
        {
            return self.apply(settings, Some(root.join(loader::CONFIG_FILE_NAME)));
        }

        self.apply(I18nSettings::default(), None)
    }

    /// 指定されたファイルから設定を読み込む
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー
    pub fn load_settings_from_file(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        let settings = loader::load_from_file(config_path)?;
        self.apply(settings, Some(config_path.to_path_buf()))
    }

    /// 検証済みの設定を反映する
    fn apply(
        &mut self,
        settings: I18nSettings,
        source: Option<PathBuf>,
    ) -> Result<(), ConfigError> {
        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.source = source;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &I18nSettings {
        &self.current_settings
    }

    /// 設定の読み込み元ファイルを取得
    #[must_use]
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}
