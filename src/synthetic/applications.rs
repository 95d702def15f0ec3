//! Registered application records.

use serde::{Deserialize, Serialize};

/// Platform an application is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppPlatform {
    #[serde(rename = "iOS")]
    Ios,
    Android,
    Web,
    #[serde(rename = "React Native")]
    ReactNative,
    Flutter,
    Unity,
}

impl AppPlatform {
    const CYCLE: [AppPlatform; 6] = [
        AppPlatform::Ios,
        AppPlatform::Android,
        AppPlatform::Web,
        AppPlatform::ReactNative,
        AppPlatform::Flutter,
        AppPlatform::Unity,
    ];

    fn bundles(&self) -> &'static [&'static str] {
        match self {
            AppPlatform::Ios => &[
                "com.acme.app",
                "com.acme.lite",
                "com.globex.main",
                "com.initech.pro",
            ],
            AppPlatform::Android => &["com.acme.android", "com.globex.droid", "com.initech.android"],
            AppPlatform::Web => &["app.acme.io", "dashboard.globex.com", "portal.initech.dev"],
            AppPlatform::ReactNative => &["com.acme.rn", "com.globex.rn"],
            AppPlatform::Flutter => &["com.acme.flutter", "com.initech.flutter"],
            AppPlatform::Unity => &["com.acme.unity", "com.globex.unity"],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppStatus {
    Active,
    Inactive,
    Suspended,
}

/// An app registered in the console, with its SDK keys and usage counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub org_id: String,
    pub name: String,
    pub bundle_id: String,
    pub platform: AppPlatform,
    pub status: AppStatus,
    pub sdk_version: String,
    pub sandbox_key: String,
    pub production_key: String,
    pub created_at: String,
    pub last_active: String,
    pub daily_requests: u64,
    pub error_rate: f64,
}

const APP_NAMES: [&str; 54] = [
    "Shopping App", "News Reader", "Social Feed", "Payment Gateway", "Ad Manager",
    "Analytics Hub", "Campaign Tracker", "Content Browser", "Media Player", "Auth Portal",
    "Notification Center", "User Dashboard", "Search Engine", "Data Sync", "File Manager",
    "Chat Client", "Video Streamer", "Map Navigator", "Weather Station", "Fitness Tracker",
    "Recipe Book", "Travel Planner", "Budget Manager", "Task Organizer", "Music Player",
    "Photo Editor", "Code Runner", "Doc Viewer", "Email Client", "Calendar App",
    "Notes App", "Podcast Player", "Stock Tracker", "Crypto Wallet", "QR Scanner",
    "Barcode Reader", "Voice Recorder", "Drawing Pad", "Quiz App", "Learning Hub",
    "Job Board", "Real Estate", "Food Delivery", "Ride Share", "Pet Tracker",
    "Plant Care", "Meditation", "Sleep Tracker", "Habit Builder", "Language Learn",
    "Flashcards", "Study Timer", "Grade Book", "Alumni Connect",
];

const STATUSES: [AppStatus; 6] = [
    AppStatus::Active,
    AppStatus::Active,
    AppStatus::Active,
    AppStatus::Active,
    AppStatus::Inactive,
    AppStatus::Suspended,
];

const SDK_VERSIONS: [&str; 7] = ["4.2.1", "4.1.0", "4.0.3", "3.9.8", "3.8.5", "4.2.0", "4.1.2"];

const ORGS: [&str; 3] = ["org_1", "org_2", "org_3"];

const DAILY_REQUESTS: [u64; 54] = [
    32841, 8567, 45123, 21987, 3429, 48012, 15678, 37645, 9812, 41234, 28976, 5643, 49321, 18765,
    42109, 36587, 7890, 44321, 26543, 2198, 47654, 14321, 39876, 11234, 43567, 31098, 6789, 46543,
    19876, 40123, 34567, 8901, 45678, 23456, 1234, 48765, 16543, 38901, 12345, 43210, 29876, 4567,
    47890, 17654, 41098, 35432, 7654, 44567, 25678, 3456, 49012, 13579, 37890, 10234,
];

const ERROR_RATES: [f64; 54] = [
    0.34, 1.21, 0.08, 0.67, 1.89, 0.12, 0.45, 1.56, 0.23, 0.78, 0.91, 1.34, 0.05, 0.89, 0.34,
    1.67, 0.56, 0.12, 0.98, 1.45, 0.23, 0.67, 1.12, 0.34, 0.08, 0.89, 1.78, 0.45, 0.56, 0.12,
    0.98, 1.23, 0.34, 0.67, 1.89, 0.08, 0.45, 1.56, 0.23, 0.78, 0.91, 1.34, 0.05, 0.89, 0.34,
    1.67, 0.56, 0.12, 0.98, 1.45, 0.23, 0.67, 1.12, 0.34,
];

const CREATED: [&str; 54] = [
    "2024-03-15", "2024-01-22", "2024-06-08", "2024-09-12", "2025-01-05", "2024-02-18",
    "2024-07-30", "2024-11-14", "2024-04-25", "2025-02-01", "2024-05-19", "2024-08-07",
    "2024-12-23", "2024-03-11", "2024-10-28", "2025-03-15", "2024-06-02", "2024-01-30",
    "2024-09-18", "2025-04-10", "2024-07-14", "2024-02-26", "2024-11-09", "2024-04-03",
    "2025-01-22", "2024-08-17", "2024-12-05", "2024-05-28", "2024-10-15", "2025-02-28",
    "2024-03-20", "2024-06-30", "2024-01-08", "2024-09-25", "2025-05-01", "2024-04-14",
    "2024-07-22", "2024-02-10", "2024-11-28", "2024-05-06", "2025-03-08", "2024-08-24",
    "2024-12-12", "2024-03-05", "2024-10-20", "2025-04-18", "2024-06-15", "2024-01-28",
    "2024-09-03", "2025-01-12", "2024-07-08", "2024-02-20", "2024-11-01", "2024-04-28",
];

const LAST_ACTIVE: [&str; 54] = [
    "2026-02-05", "2026-01-30", "2026-02-06", "2026-02-03", "2025-12-15", "2026-02-04",
    "2026-01-28", "2026-02-01", "2025-11-20", "2026-02-06", "2026-02-02", "2025-10-30",
    "2026-02-05", "2026-01-25", "2026-02-04", "2026-02-06", "2026-01-22", "2026-02-03",
    "2025-12-28", "2026-01-15", "2026-02-05", "2026-02-01", "2026-01-30", "2025-11-10",
    "2026-02-06", "2026-01-28", "2025-12-20", "2026-02-04", "2026-02-02", "2026-02-06",
    "2026-01-25", "2026-02-03", "2025-10-18", "2026-02-05", "2026-01-20", "2026-02-01",
    "2026-01-30", "2026-02-04", "2025-12-05", "2026-02-06", "2026-01-28", "2025-11-25",
    "2026-02-05", "2026-02-02", "2026-01-22", "2026-02-03", "2026-02-06", "2025-12-15",
    "2026-01-30", "2026-02-04", "2026-02-01", "2025-10-28", "2026-02-05", "2026-01-25",
];

pub(crate) fn build_applications() -> Vec<Application> {
    (0..APP_NAMES.len())
        .map(|i| {
            let platform = AppPlatform::CYCLE[i % AppPlatform::CYCLE.len()];
            let bundles = platform.bundles();

            Application {
                id: format!("app_{:03}", i + 1),
                org_id: ORGS[i % ORGS.len()].to_string(),
                name: APP_NAMES[i].to_string(),
                bundle_id: format!("{}.v{}", bundles[i % bundles.len()], i),
                platform,
                status: STATUSES[i % STATUSES.len()],
                sdk_version: SDK_VERSIONS[i % SDK_VERSIONS.len()].to_string(),
                sandbox_key: format!("sb_k{:012}", i * 7 + 3),
                production_key: format!("pk_k{:012}", i * 13 + 7),
                created_at: format!("{}T10:00:00Z", CREATED[i]),
                last_active: format!("{}T14:00:00Z", LAST_ACTIVE[i]),
                daily_requests: DAILY_REQUESTS[i],
                error_rate: ERROR_RATES[i],
            }
        })
        .collect()
}
