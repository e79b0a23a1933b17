// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Escopo

// Port Configuration
pub const PORT: &str = "PORT";
pub const DEFAULT_PORT: u16 = 4001;

// CORS Configuration
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

// Table Store Configuration
pub const ESCOPO_BACKEND: &str = "ESCOPO_BACKEND";
pub const ESCOPO_TABLE_URL: &str = "ESCOPO_TABLE_URL";
pub const ESCOPO_TABLE_NAME: &str = "ESCOPO_TABLE_NAME";
pub const ESCOPO_TABLE_TOKEN: &str = "ESCOPO_TABLE_TOKEN";
pub const ESCOPO_HTTP_TIMEOUT_SECS: &str = "ESCOPO_HTTP_TIMEOUT_SECS";
pub const DEFAULT_TABLE_NAME: &str = "Escopo";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

// Worksheets inside the table
pub const SHEET_CONFIG: &str = "Config";
pub const SHEET_PROJECTS: &str = "Projetos";
pub const SHEET_HISTORY: &str = "Historico";
pub const SHEET_SUPPLIERS: &str = "Fornecedores";
