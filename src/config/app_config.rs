//! 애플리케이션 설정 본체
//!
//! 환경 변수에서 모든 설정을 읽어 [`AppConfig`] 하나로 묶습니다.
//! 필수 값이 없거나 형식이 잘못된 경우 [`ConfigError`]를 반환하며,
//! 이는 시작 단계의 치명적 오류로 취급됩니다.

use std::env;
use std::time::Duration;
use thiserror::Error;

use super::auth_config::{JwtConfig, SessionConfig};
use super::data_config::{DatabaseConfig, RedisConfig};

/// 설정 로드 실패
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// 필수 환경 변수 누락
    #[error("Environment variable {0} is required")]
    Missing(&'static str),

    /// 값 파싱 실패
    #[error("Environment variable {key} has invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 운영 환경
    Production,
}

impl Environment {
    /// 문자열에서 Environment를 생성합니다. 알 수 없는 값은 `Production`.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 사용자/게시글/댓글 저장소 및 토큰 폐기 저장소 백엔드
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StorageBackend {
    /// MongoDB + Redis
    Mongo,
    /// 프로세스 내 메모리 (로컬 실행, 테스트)
    Memory,
}

/// 서버 바인딩 설정
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Rate Limiting 설정
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

/// 애플리케이션 전체 설정
///
/// 시작 시 한 번 생성되어 `AppContext` 구성에 사용됩니다.
/// 이후 변경되지 않으므로 여러 워커에서 공유해도 안전합니다.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub rate_limit: RateLimitConfig,
    pub jwt: JwtConfig,
    pub session: SessionConfig,
    pub redis: RedisConfig,
    pub database: DatabaseConfig,
    pub storage: StorageBackend,
}

impl AppConfig {
    /// 프로세스 환경 변수에서 설정을 로드합니다.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 임의의 키 조회 함수로부터 설정을 로드합니다.
    ///
    /// 테스트에서는 `HashMap` 기반 조회 함수를 넘겨 프로세스 환경을 건드리지 않습니다.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = EnvReader { lookup: &lookup };

        let environment = Environment::parse(&vars.string_or("ENVIRONMENT", "development"));

        let server = ServerConfig {
            host: vars.string_or("HOST", "127.0.0.1"),
            port: vars.parse_or("PORT", 8080u16)?,
            workers: vars.parse_or("WORKERS", 4usize)?,
        };

        let rate_limit = RateLimitConfig {
            per_second: vars.parse_or("RATE_LIMIT_PER_SECOND", 100u64)?,
            burst_size: vars.parse_or("RATE_LIMIT_BURST_SIZE", 200u32)?,
        };

        let secret = vars.required("JWT_SECRET_KEY")?;
        if secret.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET_KEY",
                value: String::new(),
                reason: "signing secret must not be empty".to_string(),
            });
        }

        let jwt = JwtConfig {
            secret,
            session_ttl: vars.duration_or("JWT_TOKEN_EXPIRATION", "15m")?,
            password_reset_ttl: vars.duration_or("JWT_RESET_TOKEN_EXPIRATION", "60m")?,
            verification_ttl: vars.duration_or("JWT_VERIFICATION_TOKEN_EXPIRATION", "1440m")?,
        };

        let session = SessionConfig {
            revocation_failure_policy: vars
                .string_or("REVOCATION_FAILURE_POLICY", "anonymous")
                .parse()
                .map_err(|reason| ConfigError::Invalid {
                    key: "REVOCATION_FAILURE_POLICY",
                    value: vars.string_or("REVOCATION_FAILURE_POLICY", ""),
                    reason,
                })?,
        };

        let redis = RedisConfig {
            url: vars.string_or("REDIS_URL", "redis://localhost:6379"),
            timeout: Duration::from_millis(vars.parse_or("REDIS_TIMEOUT_MS", 500u64)?),
        };

        let database = DatabaseConfig {
            uri: vars.string_or("MONGODB_URI", "mongodb://localhost:27017"),
            name: vars.string_or("DATABASE_NAME", "blog_dev"),
            timeout: Duration::from_millis(vars.parse_or("DATABASE_TIMEOUT_MS", 2000u64)?),
        };

        let storage = match vars.string_or("STORAGE_BACKEND", "mongo").to_lowercase().as_str() {
            "mongo" | "mongodb" => StorageBackend::Mongo,
            "memory" | "in-memory" => StorageBackend::Memory,
            other => {
                return Err(ConfigError::Invalid {
                    key: "STORAGE_BACKEND",
                    value: other.to_string(),
                    reason: "expected 'mongo' or 'memory'".to_string(),
                });
            }
        };

        Ok(Self {
            environment,
            server,
            rate_limit,
            jwt,
            session,
            redis,
            database,
            storage,
        })
    }
}

struct EnvReader<'a, F: Fn(&str) -> Option<String>> {
    lookup: &'a F,
}

impl<F: Fn(&str) -> Option<String>> EnvReader<'_, F> {
    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        (self.lookup)(key).ok_or(ConfigError::Missing(key))
    }

    fn string_or(&self, key: &str, default: &str) -> String {
        (self.lookup)(key).unwrap_or_else(|| default.to_string())
    }

    fn parse_or<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.lookup)(key) {
            Some(value) => value.trim().parse::<T>().map_err(|e| ConfigError::Invalid {
                key,
                value: value.clone(),
                reason: e.to_string(),
            }),
            None => Ok(default),
        }
    }

    fn duration_or(&self, key: &'static str, default: &str) -> Result<Duration, ConfigError> {
        let value = self.string_or(key, default);
        parse_duration(&value).map_err(|reason| ConfigError::Invalid { key, value, reason })
    }
}

/// `30s`, `15m`, `2h`, `1d`, `1h30m`, `250ms` 형식의 기간 문자열을 파싱합니다.
pub fn parse_duration(input: &str) -> Result<Duration, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("empty duration".to_string());
    }

    let mut total = Duration::ZERO;
    let mut rest = input;

    while !rest.is_empty() {
        let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
        if digits == 0 {
            return Err(format!("expected a number in '{}'", input));
        }
        let (number, tail) = rest.split_at(digits);
        let amount: u64 = number.parse().map_err(|e| format!("{}", e))?;

        let unit_len = tail.chars().take_while(|c| c.is_ascii_alphabetic()).count();
        let (unit, tail) = tail.split_at(unit_len);

        let part = match unit {
            "ms" => Some(Duration::from_millis(amount)),
            "s" => Some(Duration::from_secs(amount)),
            "m" => amount.checked_mul(60).map(Duration::from_secs),
            "h" => amount.checked_mul(3600).map(Duration::from_secs),
            "d" => amount.checked_mul(86_400).map(Duration::from_secs),
            "" => return Err(format!("missing unit in '{}'", input)),
            other => return Err(format!("unknown unit '{}'", other)),
        };

        total = part
            .and_then(|part| total.checked_add(part))
            .ok_or_else(|| "duration out of range".to_string())?;
        rest = tail;
    }

    Ok(total)
}
