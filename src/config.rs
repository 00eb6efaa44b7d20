use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    #[serde(default)]
    pub draw: DrawConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// 奖池 JSON 文件所在目录
    pub data_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 拒绝采样重抽上限，超过视为数据不一致
    #[serde(default = "default_max_redraws")]
    pub max_redraws: u32,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            max_redraws: default_max_redraws(),
        }
    }
}

fn default_max_redraws() -> u32 {
    10_000
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                // 有配置文件：先解析再用环境变量覆盖
                toml::from_str(&config_str).map_err(|e| format!("解析配置文件失败: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // 无配置文件：使用环境变量与默认值构建
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                Config {
                    storage: StorageConfig {
                        data_dir: get_env("STORAGE_DATA_DIR").unwrap_or_else(|| "data".to_string()),
                    },
                    draw: DrawConfig {
                        max_redraws: get_env_parse("DRAW_MAX_REDRAWS", default_max_redraws()),
                    },
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        if let Ok(v) = env::var("STORAGE_DATA_DIR") {
            config.storage.data_dir = v;
        }
        if let Ok(v) = env::var("DRAW_MAX_REDRAWS")
            && let Ok(n) = v.parse()
        {
            config.draw.max_redraws = n;
        }

        Ok(config)
    }
}
