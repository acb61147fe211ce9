use super::{AppId, AppRecord, Category, License, Os};

pub struct SeedApp {
    pub id: &'static str,
    pub name: &'static str,
    pub developer: &'static str,
    pub category: Category,
    pub os: Os,
    pub license: License,
    pub version: &'static str,
    pub downloads: &'static str,
    pub rating: f32,
    pub description: &'static str,
}

impl SeedApp {
    pub fn to_record(&self) -> AppRecord {
        AppRecord {
            id: AppId::new(self.id),
            name: self.name.to_string(),
            developer: self.developer.to_string(),
            category: self.category,
            os: self.os,
            license: self.license,
            version: self.version.to_string(),
            downloads: self.downloads.to_string(),
            rating: self.rating,
            description: self.description.to_string(),
        }
    }
}

pub const SEED: &[SeedApp] = &[
    // ── Browsers ─────────────────────────────────────────────────────
    SeedApp {
        id: "1",
        name: "Google Chrome",
        developer: "Google",
        category: Category::Browsers,
        os: Os::Windows,
        license: License::Free,
        version: "120.0.6099",
        downloads: "150M",
        rating: 9.0,
        description: "Fast, secure web browser with sync across devices and a huge extension library.",
    },
    SeedApp {
        id: "2",
        name: "Mozilla Firefox",
        developer: "Mozilla",
        category: Category::Browsers,
        os: Os::Mac,
        license: License::OpenSource,
        version: "121.0",
        downloads: "80M",
        rating: 8.8,
        description: "Privacy-focused open source browser with tracking protection built in.",
    },
    SeedApp {
        id: "3",
        name: "Brave Browser",
        developer: "Brave Software",
        category: Category::Browsers,
        os: Os::Android,
        license: License::Free,
        version: "1.61.109",
        downloads: "50M",
        rating: 8.5,
        description: "Browser that blocks ads and trackers by default for faster page loads.",
    },

    // ── Security ─────────────────────────────────────────────────────
    SeedApp {
        id: "4",
        name: "Malwarebytes",
        developer: "Malwarebytes Inc.",
        category: Category::Security,
        os: Os::Windows,
        license: License::Trial,
        version: "4.6.8",
        downloads: "45M",
        rating: 8.9,
        description: "Anti-malware scanner that finds and removes threats antivirus tools miss.",
    },
    SeedApp {
        id: "5",
        name: "Bitwarden",
        developer: "Bitwarden Inc.",
        category: Category::Security,
        os: Os::Ios,
        license: License::OpenSource,
        version: "2023.12.0",
        downloads: "10M",
        rating: 9.1,
        description: "Open source password manager with end-to-end encrypted vault sync.",
    },

    // ── Productivity ─────────────────────────────────────────────────
    SeedApp {
        id: "6",
        name: "LibreOffice",
        developer: "The Document Foundation",
        category: Category::Productivity,
        os: Os::Windows,
        license: License::OpenSource,
        version: "7.6.4",
        downloads: "30M",
        rating: 8.2,
        description: "Full office suite with word processor, spreadsheets and presentations.",
    },
    SeedApp {
        id: "7",
        name: "Notion",
        developer: "Notion Labs",
        category: Category::Productivity,
        os: Os::Web,
        license: License::Free,
        version: "3.0.0",
        downloads: "20M",
        rating: 8.7,
        description: "All-in-one workspace for notes, docs, wikis and project tracking.",
    },
    SeedApp {
        id: "8",
        name: "Microsoft Excel",
        developer: "Microsoft",
        category: Category::Productivity,
        os: Os::Mac,
        license: License::Paid,
        version: "16.80",
        downloads: "90M",
        rating: 8.6,
        description: "Spreadsheet application with charts, pivot tables and formulas.",
    },

    // ── Multimedia ───────────────────────────────────────────────────
    SeedApp {
        id: "9",
        name: "VLC Media Player",
        developer: "VideoLAN",
        category: Category::Multimedia,
        os: Os::Windows,
        license: License::OpenSource,
        version: "3.0.20",
        downloads: "120M",
        rating: 9.3,
        description: "Plays almost any video or audio format without extra codecs.",
    },
    SeedApp {
        id: "10",
        name: "Spotify",
        developer: "Spotify AB",
        category: Category::Multimedia,
        os: Os::Android,
        license: License::Free,
        version: "8.8.96",
        downloads: "500M",
        rating: 8.4,
        description: "Music and podcast streaming with personalised playlists.",
    },
    SeedApp {
        id: "11",
        name: "Adobe Photoshop",
        developer: "Adobe",
        category: Category::Multimedia,
        os: Os::Mac,
        license: License::Trial,
        version: "25.3",
        downloads: "40M",
        rating: 8.9,
        description: "Industry standard image editor for photos, design and digital art.",
    },

    // ── Development ──────────────────────────────────────────────────
    SeedApp {
        id: "12",
        name: "Visual Studio Code",
        developer: "Microsoft",
        category: Category::Development,
        os: Os::Windows,
        license: License::Free,
        version: "1.85.1",
        downloads: "70M",
        rating: 9.4,
        description: "Lightweight code editor with debugging, git integration and extensions.",
    },
    SeedApp {
        id: "13",
        name: "Docker Desktop",
        developer: "Docker Inc.",
        category: Category::Development,
        os: Os::Mac,
        license: License::Free,
        version: "4.26.1",
        downloads: "25M",
        rating: 8.0,
        description: "Build and run containers locally with a bundled Kubernetes cluster.",
    },

    // ── Communication ────────────────────────────────────────────────
    SeedApp {
        id: "14",
        name: "WhatsApp",
        developer: "Meta",
        category: Category::Communication,
        os: Os::Ios,
        license: License::Free,
        version: "23.25.79",
        downloads: "1B",
        rating: 8.3,
        description: "Messaging and voice calls with end-to-end encryption.",
    },
    SeedApp {
        id: "15",
        name: "Zoom",
        developer: "Zoom Video Communications",
        category: Category::Communication,
        os: Os::Windows,
        license: License::Free,
        version: "5.17.0",
        downloads: "300M",
        rating: 7.9,
        description: "Video meetings, webinars and team chat for remote work.",
    },

    // ── Utilities ────────────────────────────────────────────────────
    SeedApp {
        id: "16",
        name: "7-Zip",
        developer: "Igor Pavlov",
        category: Category::Utilities,
        os: Os::Windows,
        license: License::OpenSource,
        version: "23.01",
        downloads: "60M",
        rating: 9.0,
        description: "File archiver with a high compression ratio and 7z, zip and rar support.",
    },
    SeedApp {
        id: "17",
        name: "CCleaner",
        developer: "Piriform",
        category: Category::Utilities,
        os: Os::Android,
        license: License::Trial,
        version: "6.19",
        downloads: "100M",
        rating: 7.5,
        description: "Frees up storage space and cleans junk files to speed up your device.",
    },

    // ── Games ────────────────────────────────────────────────────────
    SeedApp {
        id: "18",
        name: "Minecraft",
        developer: "Mojang Studios",
        category: Category::Games,
        os: Os::Android,
        license: License::Paid,
        version: "1.20.51",
        downloads: "200M",
        rating: 9.2,
        description: "Sandbox game about building, exploring and surviving in blocky worlds.",
    },
    SeedApp {
        id: "19",
        name: "Steam",
        developer: "Valve",
        category: Category::Games,
        os: Os::Windows,
        license: License::Free,
        version: "2.10.91",
        downloads: "250M",
        rating: 8.8,
        description: "Game store and launcher with cloud saves, friends and the Windows workshop.",
    },
];
