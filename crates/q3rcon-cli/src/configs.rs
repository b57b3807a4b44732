use std::fs::File;
use std::collections::HashMap;

use serde::Deserialize;
use serde_json;

/// One named server entry of the `RCON_CONFIG_PATH` file.
///
/// `address` may carry a `:port` suffix; an explicit `port` wins over it.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ServerConfig {
    pub address: String,
    pub password: String,
    #[serde(default)]
    pub port: Option<u16>,
    /// Milliseconds.
    #[serde(default)]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub debug: Option<bool>,
}

#[derive(Deserialize, Debug)]
struct ServerConfigMap {
    configs: HashMap<String, ServerConfig>,
}

const ENV_VAR_KEY: &str = "RCON_CONFIG_PATH";

fn get_config_path_env_var() -> Option<String> {
    match std::env::var(ENV_VAR_KEY) {
        Ok(path) => {
            log::debug!("Found environment variable {}: {}", ENV_VAR_KEY, path);
            Some(path)
        },
        Err(_) => {
            log::debug!("Environment variable {} not set", ENV_VAR_KEY);
            None
        }
    }
}

pub fn load_config_from_env(config_name: Option<String>) -> Option<ServerConfig> {
    let config_path = get_config_path_env_var()?;
    load_config(&config_path, config_name)
}

fn load_config(config_file_path: &str, config_name: Option<String>) -> Option<ServerConfig> {
    let mut file = match File::open(config_file_path) {
        Ok(f) => f,
        Err(e) => {
            log::error!("Failed to open config file {}: {}", config_file_path, e);
            return None;
        }
    };

    let config: ServerConfigMap = match serde_json::from_reader(&mut file) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to parse config file {}: {}", config_file_path, e);
            return None;
        }
    };
    log::debug!("Loaded {} server config(s) from {}", config.configs.len(), config_file_path);

    match config_name {
        Some(name) => {
            let server_config = config.configs.get(&name).cloned();
            if server_config.is_some() {
                log::info!("Using config: {}", name);
            } else {
                log::error!("Config with name '{}' not found in config file.", name);
            }
            server_config
        },
        None if config.configs.len() == 1 => {
            let (name, server_config) = config.configs.into_iter().next()?;
            log::info!("No config name provided. Using the only available config: {}", name);
            Some(server_config)
        },
        None => {
            log::error!("No config name provided. Please specify a config name.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::load_config;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_load_config_with_specific_name() {
        let config_content = r#"{
            "configs": {
                "ffa": {
                    "address": "192.168.1.1",
                    "port": 27960,
                    "password": "password123",
                    "timeout": 2000,
                    "debug": true
                },
                "ctf": {
                    "address": "192.168.1.2:27961",
                    "password": "password456"
                }
            }
        }"#;

        let temp_file = create_test_config_file(config_content);
        let config = load_config(temp_file.path().to_str().unwrap(), Some("ffa".to_string())).unwrap();

        assert_eq!(config.address, "192.168.1.1");
        assert_eq!(config.port, Some(27960));
        assert_eq!(config.password, "password123");
        assert_eq!(config.timeout, Some(2000));
        assert_eq!(config.debug, Some(true));
    }

    #[test]
    fn test_load_config_optional_fields_default_to_none() {
        let config_content = r#"{
            "configs": {
                "ctf": {
                    "address": "192.168.1.2:27961",
                    "password": "password456"
                }
            }
        }"#;

        let temp_file = create_test_config_file(config_content);
        let config = load_config(temp_file.path().to_str().unwrap(), None).unwrap();

        assert_eq!(config.address, "192.168.1.2:27961");
        assert_eq!(config.port, None);
        assert_eq!(config.timeout, None);
        assert_eq!(config.debug, None);
    }

    #[test]
    fn test_load_config_nonexistent_name() {
        let config_content = r#"{
            "configs": {
                "ffa": {
                    "address": "192.168.1.1",
                    "password": "password123"
                }
            }
        }"#;

        let temp_file = create_test_config_file(config_content);
        let result = load_config(
            temp_file.path().to_str().unwrap(),
            Some("nonexistent".to_string()),
        );

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_multiple_servers_no_name() {
        let config_content = r#"{
            "configs": {
                "ffa": { "address": "192.168.1.1", "password": "password123" },
                "ctf": { "address": "192.168.1.2", "password": "password456" }
            }
        }"#;

        let temp_file = create_test_config_file(config_content);
        let result = load_config(temp_file.path().to_str().unwrap(), None);

        assert!(result.is_none());
    }

    #[test]
    fn test_load_config_invalid_json() {
        let temp_file = create_test_config_file(r#"{ invalid json }"#);
        assert!(load_config(temp_file.path().to_str().unwrap(), None).is_none());
    }

    #[test]
    fn test_load_config_nonexistent_file() {
        assert!(load_config("/nonexistent/path/to/config.json", None).is_none());
    }

    #[test]
    fn test_load_config_empty_configs() {
        let temp_file = create_test_config_file(r#"{ "configs": {} }"#);
        assert!(load_config(temp_file.path().to_str().unwrap(), None).is_none());
    }
}
