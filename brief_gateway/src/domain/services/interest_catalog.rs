use serde::Serialize;
use std::collections::HashSet;

use crate::domain::entities::interest::InterestSelection;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: &'static str,
    pub label: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
    pub subcategories: &'static [Subcategory],
}

#[derive(Debug, Serialize)]
pub struct Subcategory {
    pub id: &'static str,
    pub label: &'static str,
    /// Search phrases a selection of this subcategory expands to
    pub keywords: &'static [&'static str],
}

/// Taxonomy of topics offered during onboarding
pub static INTEREST_CATEGORIES: &[Category] = &[
    Category {
        id: "finance",
        label: "Finance & Markets",
        emoji: "📈",
        description: "Deep dives into markets, economy, and assets",
        subcategories: &[
            Subcategory {
                id: "ma",
                label: "M&A / Dealmaking",
                keywords: &[
                    "mergers and acquisitions",
                    "M&A",
                    "investment banking",
                    "deal flow",
                    "private equity",
                ],
            },
            Subcategory {
                id: "vc",
                label: "Venture Capital",
                keywords: &[
                    "venture capital",
                    "seed funding",
                    "series A",
                    "startup valuation",
                    "term sheets",
                ],
            },
            Subcategory {
                id: "macro",
                label: "Global Macro",
                keywords: &[
                    "inflation",
                    "federal reserve",
                    "interest rates",
                    "gdp",
                    "central banks",
                    "forex",
                ],
            },
            Subcategory {
                id: "crypto",
                label: "Crypto / DeFi",
                keywords: &[
                    "bitcoin",
                    "ethereum",
                    "DeFi",
                    "web3",
                    "stablecoins",
                    "crypto regulation",
                ],
            },
            Subcategory {
                id: "equities",
                label: "Equities / Stocks",
                keywords: &[
                    "stock market",
                    "earnings reports",
                    "S&P 500",
                    "nasdaq",
                    "stock buybacks",
                ],
            },
            Subcategory {
                id: "commodities",
                label: "Commodities",
                keywords: &[
                    "oil prices",
                    "gold",
                    "natural gas",
                    "agriculture commodities",
                    "energy markets",
                ],
            },
            Subcategory {
                id: "fintech",
                label: "Fintech",
                keywords: &[
                    "fintech",
                    "payments",
                    "neobanks",
                    "stripe",
                    "plaid",
                    "digital wallets",
                ],
            },
        ],
    },
    Category {
        id: "tech",
        label: "Technology",
        emoji: "⚡",
        description: "Frontier tech, software, and hardware",
        subcategories: &[
            Subcategory {
                id: "ai",
                label: "Artificial Intelligence",
                keywords: &[
                    "LLMs",
                    "generative AI",
                    "OpenAI",
                    "Anthropic",
                    "GPU compute",
                    "machine learning",
                ],
            },
            Subcategory {
                id: "saas",
                label: "B2B SaaS",
                keywords: &[
                    "enterprise software",
                    "SaaS",
                    "cloud computing",
                    "API economy",
                    "software earnings",
                ],
            },
            Subcategory {
                id: "consumer",
                label: "Consumer Tech",
                keywords: &[
                    "Apple",
                    "smartphones",
                    "wearables",
                    "AR/VR",
                    "consumer electronics",
                ],
            },
            Subcategory {
                id: "cyber",
                label: "Cybersecurity",
                keywords: &[
                    "cybersecurity",
                    "ransomware",
                    "zero trust",
                    "infosec",
                    "network security",
                ],
            },
            Subcategory {
                id: "chips",
                label: "Semiconductors",
                keywords: &[
                    "NVIDIA",
                    "TSMC",
                    "semiconductors",
                    "chip manufacturing",
                    "Moore's law",
                ],
            },
            Subcategory {
                id: "robotics",
                label: "Robotics & Automation",
                keywords: &[
                    "robotics",
                    "industrial automation",
                    "autonomous vehicles",
                    "drones",
                ],
            },
        ],
    },
    Category {
        id: "science",
        label: "Science & Future",
        emoji: "🧬",
        description: "Breakthroughs in health, space, and energy",
        subcategories: &[
            Subcategory {
                id: "biotech",
                label: "Biotech / Pharma",
                keywords: &[
                    "biotech",
                    "clinical trials",
                    "CRISPR",
                    "pharmaceuticals",
                    "drug discovery",
                ],
            },
            Subcategory {
                id: "space",
                label: "Space Economy",
                keywords: &[
                    "SpaceX",
                    "commercial space",
                    "satellite constellations",
                    "orbital launch",
                    "NASA",
                ],
            },
            Subcategory {
                id: "energy",
                label: "Clean Energy",
                keywords: &[
                    "nuclear fusion",
                    "solar energy",
                    "batteries",
                    "EVs",
                    "climate tech",
                    "hydrogen",
                ],
            },
            Subcategory {
                id: "physics",
                label: "Quantum / Physics",
                keywords: &[
                    "quantum computing",
                    "physics research",
                    "material science",
                    "superconductors",
                ],
            },
        ],
    },
    Category {
        id: "politics",
        label: "Geopolitics",
        emoji: "🌍",
        description: "Global power dynamics and policy",
        subcategories: &[
            Subcategory {
                id: "us-pol",
                label: "US Policy",
                keywords: &[
                    "US congress",
                    "white house",
                    "federal regulation",
                    "supreme court",
                    "elections",
                ],
            },
            Subcategory {
                id: "china",
                label: "China / Asia",
                keywords: &[
                    "China economy",
                    "geopolitics asia",
                    "US-China relations",
                    "semiconductor war",
                ],
            },
            Subcategory {
                id: "eu",
                label: "Europe",
                keywords: &[
                    "EU regulation",
                    "European economy",
                    "Brexit implications",
                    "Eurozone",
                ],
            },
            Subcategory {
                id: "defense",
                label: "Defense / Security",
                keywords: &[
                    "defense spending",
                    "military tech",
                    "NATO",
                    "conflict zones",
                    "geopolitical risk",
                ],
            },
        ],
    },
    Category {
        id: "business",
        label: "Business Strategy",
        emoji: "💼",
        description: "Corporate strategy, leadership, and media",
        subcategories: &[
            Subcategory {
                id: "strategy",
                label: "Corp Strategy",
                keywords: &[
                    "corporate strategy",
                    "business models",
                    "competitive moat",
                    "disruption",
                ],
            },
            Subcategory {
                id: "media",
                label: "Media & Streaming",
                keywords: &[
                    "streaming wars",
                    "digital media",
                    "advertising trends",
                    "social media platforms",
                ],
            },
            Subcategory {
                id: "retail",
                label: "Retail / E-comm",
                keywords: &[
                    "e-commerce",
                    "retail trends",
                    "supply chain",
                    "consumer spending",
                    "DTC brands",
                ],
            },
            Subcategory {
                id: "transport",
                label: "Transport / Logistics",
                keywords: &[
                    "supply chain",
                    "logistics",
                    "shipping",
                    "automotive industry",
                    "airlines",
                ],
            },
        ],
    },
    Category {
        id: "lifestyle",
        label: "Lifestyle",
        emoji: "🎨",
        description: "Culture, travel, and design",
        subcategories: &[
            Subcategory {
                id: "travel",
                label: "Travel & Hospitality",
                keywords: &[
                    "travel trends",
                    "airlines",
                    "hospitality industry",
                    "tourism",
                ],
            },
            Subcategory {
                id: "design",
                label: "Design & Architecture",
                keywords: &[
                    "architecture",
                    "urban planning",
                    "product design",
                    "interior design",
                ],
            },
            Subcategory {
                id: "fashion",
                label: "Fashion & Luxury",
                keywords: &[
                    "luxury market",
                    "fashion trends",
                    "retail apparel",
                    "sneaker culture",
                ],
            },
        ],
    },
];

pub fn find_category(category_id: &str) -> Option<&'static Category> {
    INTEREST_CATEGORIES.iter().find(|c| c.id == category_id)
}

impl Category {
    pub fn find_subcategory(&self, subcategory_id: &str) -> Option<&'static Subcategory> {
        self.subcategories.iter().find(|s| s.id == subcategory_id)
    }
}

/// Expands interest selections into a flat list of unique search keywords
///
/// `custom` entries contribute their subcategory ids verbatim. Category and subcategory ids
/// missing from the catalog are skipped without error, so stored interests referencing
/// removed entries keep working.
///
/// The order of first appearance is kept. An empty result is valid: callers decide
/// whether it is an error.
pub fn expand_keywords(selections: &[InterestSelection]) -> Vec<String> {
    let mut keywords: Vec<String> = vec![];
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |keyword: &str| {
        if seen.insert(keyword.to_string()) {
            keywords.push(keyword.to_string());
        }
    };

    for selection in selections {
        if selection.is_custom() {
            selection
                .subcategory_ids
                .iter()
                .for_each(|k| push(k.as_str()));
            continue;
        }

        let Some(category) = find_category(&selection.category_id) else {
            continue;
        };

        selection
            .subcategory_ids
            .iter()
            .filter_map(|id| category.find_subcategory(id))
            .flat_map(|subcategory| subcategory.keywords.iter().copied())
            .for_each(&mut push);
    }

    keywords
}
