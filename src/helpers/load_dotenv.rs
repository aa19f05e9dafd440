use std::path::PathBuf;

/// Load a local `.env`, if present, before the logger reads its settings
pub fn load_dotenv() -> Option<PathBuf> {
    dotenv::dotenv().ok()
}
