use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub identity: IdentityConfig,
    pub bootstrap: BootstrapConfig,
    pub pagination: PaginationConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig::from_env()?;
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse::<u16>()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse::<u64>()?,
        };
        let identity = IdentityConfig {
            issuer: std::env::var("IDENTITY_ISSUER")?,
            audience: std::env::var("IDENTITY_AUDIENCE")?,
            secret: std::env::var("IDENTITY_SECRET")?,
        };
        // 初期管理者はコードに埋め込まず、設定値としてのみ受け取る
        let bootstrap = BootstrapConfig::from_list(
            &std::env::var("BOOTSTRAP_ADMIN_EMAILS").unwrap_or_default(),
        );
        let pagination = PaginationConfig::new(
            optional_var("PAGE_SIZE")?.unwrap_or(DEFAULT_PAGE_SIZE),
            optional_var("MAX_PAGE_SIZE")?.unwrap_or(DEFAULT_MAX_PAGE_SIZE),
        );
        Ok(Self {
            database,
            redis,
            auth,
            identity,
            bootstrap,
            pagination,
        })
    }
}

fn optional_var(key: &str) -> Result<Option<i64>> {
    match std::env::var(key) {
        Ok(v) => Ok(Some(v.parse::<i64>()?)),
        Err(_) => Ok(None),
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

impl DatabaseConfig {
    // 一括登録ツールはデータベースの設定だけを読む
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse::<u16>()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        })
    }
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    pub ttl: u64,
}

#[derive(Clone)]
pub struct IdentityConfig {
    pub issuer: String,
    pub audience: String,
    pub secret: String,
}

#[derive(Clone, Debug, Default)]
pub struct BootstrapConfig {
    admin_emails: Vec<String>,
}

impl BootstrapConfig {
    pub fn from_list(raw: &str) -> Self {
        let admin_emails = raw
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { admin_emails }
    }

    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        let email = email.trim().to_lowercase();
        self.admin_emails.iter().any(|e| *e == email)
    }
}

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;

#[derive(Clone, Copy, Debug)]
pub struct PaginationConfig {
    pub page_size: i64,
    pub max_page_size: i64,
}

impl PaginationConfig {
    pub fn new(page_size: i64, max_page_size: i64) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            page_size: page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    // リクエストで指定されたページサイズを許容範囲に丸める
    pub fn resolve(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.page_size)
            .clamp(1, self.max_page_size)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, DEFAULT_MAX_PAGE_SIZE)
    }
}
