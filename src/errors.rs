use std::fmt;

#[derive(Debug, Clone)]
pub enum CryptoLinkError {
    KeyGeneration(String),
    MalformedAddress(String),
    NotFound(String),
    Expired(String),
    AsymmetricDecrypt(String),
    SymmetricDecrypt(String),
    Integrity(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    Validation(String),
}

impl CryptoLinkError {
    pub fn code(&self) -> &'static str {
        match self {
            CryptoLinkError::KeyGeneration(_) => "E001",
            CryptoLinkError::MalformedAddress(_) => "E002",
            CryptoLinkError::NotFound(_) => "E003",
            CryptoLinkError::Expired(_) => "E004",
            CryptoLinkError::AsymmetricDecrypt(_) => "E005",
            CryptoLinkError::SymmetricDecrypt(_) => "E006",
            CryptoLinkError::Integrity(_) => "E007",
            CryptoLinkError::DatabaseConnection(_) => "E008",
            CryptoLinkError::DatabaseOperation(_) => "E009",
            CryptoLinkError::Validation(_) => "E010",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            CryptoLinkError::KeyGeneration(_) => "Key Generation Error",
            CryptoLinkError::MalformedAddress(_) => "Malformed Short Address",
            CryptoLinkError::NotFound(_) => "Link Not Found",
            CryptoLinkError::Expired(_) => "Link Expired",
            CryptoLinkError::AsymmetricDecrypt(_) => "Asymmetric Decrypt Error",
            CryptoLinkError::SymmetricDecrypt(_) => "Symmetric Decrypt Error",
            CryptoLinkError::Integrity(_) => "Integrity Check Failed",
            CryptoLinkError::DatabaseConnection(_) => "Database Connection Error",
            CryptoLinkError::DatabaseOperation(_) => "Database Operation Error",
            CryptoLinkError::Validation(_) => "Validation Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CryptoLinkError::KeyGeneration(msg) => msg,
            CryptoLinkError::MalformedAddress(msg) => msg,
            CryptoLinkError::NotFound(msg) => msg,
            CryptoLinkError::Expired(msg) => msg,
            CryptoLinkError::AsymmetricDecrypt(msg) => msg,
            CryptoLinkError::SymmetricDecrypt(msg) => msg,
            CryptoLinkError::Integrity(msg) => msg,
            CryptoLinkError::DatabaseConnection(msg) => msg,
            CryptoLinkError::DatabaseOperation(msg) => msg,
            CryptoLinkError::Validation(msg) => msg,
        }
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for CryptoLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CryptoLinkError {}

// Convenience constructors
impl CryptoLinkError {
    pub fn key_generation<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::KeyGeneration(msg.into())
    }

    pub fn malformed_address<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::MalformedAddress(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::NotFound(msg.into())
    }

    pub fn expired<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::Expired(msg.into())
    }

    pub fn asymmetric_decrypt<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::AsymmetricDecrypt(msg.into())
    }

    pub fn symmetric_decrypt<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::SymmetricDecrypt(msg.into())
    }

    pub fn integrity<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::Integrity(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::DatabaseOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        CryptoLinkError::Validation(msg.into())
    }
}

impl From<rusqlite::Error> for CryptoLinkError {
    fn from(err: rusqlite::Error) -> Self {
        CryptoLinkError::DatabaseOperation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CryptoLinkError>;
