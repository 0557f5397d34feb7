/// Application name
pub const APP_NAME: &str = "DocVault AI";

/// Key under which the whole vault snapshot is persisted
pub const STORAGE_KEY: &str = "docvault_ai_state";

/// Maximum size of a file accepted for ingestion in bytes (50 MiB)
pub const MAX_FILE_SIZE: usize = 50 * 1024 * 1024;

/// MIME type recorded when the uploaded file does not report one
pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";

/// Name of the conventional catch-all category
pub const FALLBACK_CATEGORY: &str = "Other";

/// Summary used when content analysis is unavailable
pub const FALLBACK_SUMMARY: &str = "Could not analyze document content.";

/// Icon and color given to categories created by the user
pub const NEW_CATEGORY_ICON: &str = "📁";
pub const NEW_CATEGORY_COLOR: &str = "bg-indigo-500";

/// Icon shown for a document whose category no longer resolves
pub const UNKNOWN_CATEGORY_ICON: &str = "📄";

/// Simulated latencies of the stubbed external services, in milliseconds
pub const DEFAULT_LOGIN_DELAY_MS: u64 = 2_000;
pub const DEFAULT_UPLOAD_DELAY_MS: u64 = 1_500;

/// Prefix and random-part length of simulated Drive file ids
pub const DRIVE_FILE_ID_PREFIX: &str = "drive-file-";
pub const DRIVE_FILE_ID_LEN: usize = 9;

/// Base URL used to build a "view file" link from a Drive file id
pub const DRIVE_VIEW_URL: &str = "https://drive.google.com/file/d";

/// (id, name, icon, color) of the categories a fresh vault starts with.
/// The last entry is the catch-all.
pub const DEFAULT_CATEGORIES: &[(&str, &str, &str, &str)] = &[
    ("cat-1", "Personal ID", "🪪", "bg-blue-500"),
    ("cat-2", "Health", "🏥", "bg-red-500"),
    ("cat-3", "Education", "🎓", "bg-green-500"),
    ("cat-4", "Finance", "💰", "bg-emerald-500"),
    ("cat-5", "Employment", "💼", "bg-purple-500"),
    ("cat-6", "Legal", "⚖️", "bg-amber-500"),
    ("cat-7", FALLBACK_CATEGORY, "🗂️", "bg-slate-500"),
];

/// Synthetic identity assigned by the simulated login
pub const DEMO_USER_ID: &str = "user-123";
pub const DEMO_USER_NAME: &str = "John Doe";
pub const DEMO_USER_EMAIL: &str = "john.doe@gmail.com";
pub const DEMO_USER_AVATAR: &str = "https://picsum.photos/100/100";
