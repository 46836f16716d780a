//! Term Categorization
//!
//! Assigns every query term to exactly one semantic category by keyword
//! affinity. Categories are checked in declaration order and the first one
//! whose keyword list matches wins; terms matching nothing land in
//! [`Category::General`].
//!
//! A term matches a keyword when either string contains the other, so short
//! terms such as `ai` match long keywords (`domain`) and long terms such as
//! `learning` match short keywords (`learn`).

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Semantic bucket a query term belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Skills,
    Domains,
    Locations,
    Companies,
    Institutes,
    Roles,
    Experience,
    Projects,
    /// Fallback for terms no keyword list claims
    General,
}

impl Category {
    /// All categories, in priority order
    pub const ALL: [Category; 9] = [
        Category::Skills,
        Category::Domains,
        Category::Locations,
        Category::Companies,
        Category::Institutes,
        Category::Roles,
        Category::Experience,
        Category::Projects,
        Category::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Skills => "skills",
            Category::Domains => "domains",
            Category::Locations => "locations",
            Category::Companies => "companies",
            Category::Institutes => "institutes",
            Category::Roles => "roles",
            Category::Experience => "experience",
            Category::Projects => "projects",
            Category::General => "general",
        }
    }

    /// Representative keywords for this category (empty for `General`)
    pub fn keywords(&self) -> &'static [&'static str] {
        CATEGORY_KEYWORDS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyword table; declaration order is match priority
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Skills,
        &[
            "skill", "technology", "tech", "programming", "language", "framework", "tool",
            "expertise", "proficient", "know", "learn", "master",
        ],
    ),
    (
        Category::Domains,
        &[
            "domain", "field", "area", "industry", "sector", "vertical", "category", "type",
            "kind",
        ],
    ),
    (
        Category::Locations,
        &[
            "location", "place", "city", "remote", "onsite", "hybrid", "bangalore", "mumbai",
            "delhi", "hyderabad", "chennai", "pune",
        ],
    ),
    (
        Category::Companies,
        &[
            "company", "startup", "organization", "firm", "enterprise", "corporate", "google",
            "microsoft", "amazon", "meta", "apple",
        ],
    ),
    (
        Category::Institutes,
        &["college", "university", "institute", "iit", "nit", "bits", "school", "academy"],
    ),
    (
        Category::Roles,
        &[
            "role", "position", "job", "title", "designation", "professor", "mentor", "student",
            "developer", "engineer",
        ],
    ),
    (
        Category::Experience,
        &[
            "experience", "years", "senior", "junior", "fresher", "expert", "beginner",
            "intermediate", "advanced",
        ],
    ),
    (
        Category::Projects,
        &[
            "project", "work", "build", "develop", "create", "implement", "design", "research",
            "study",
        ],
    ),
];

/// Query terms grouped by category
///
/// Every term sits in exactly one bucket; within a bucket terms keep the order
/// in which they were categorized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorizedTerms {
    buckets: [Vec<String>; 9],
}

impl CategorizedTerms {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a term to a category bucket
    pub fn push(&mut self, category: Category, term: impl Into<String>) {
        self.buckets[category.index()].push(term.into());
    }

    /// Terms in one category
    pub fn terms(&self, category: Category) -> &[String] {
        &self.buckets[category.index()]
    }

    /// All buckets in priority order, empty ones included
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> {
        Category::ALL
            .iter()
            .map(move |category| (*category, self.terms(*category)))
    }

    /// Number of terms across all categories
    pub fn total_terms(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_terms() == 0
    }
}

impl Serialize for CategorizedTerms {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for (category, terms) in self.iter() {
            map.serialize_entry(category.as_str(), terms)?;
        }
        map.end()
    }
}

/// Category for a single normalized term
pub fn classify_term(term: &str) -> Category {
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| term.contains(keyword) || keyword.contains(term))
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}

/// Group tokens into categories
pub fn categorize<S: AsRef<str>>(tokens: &[S]) -> CategorizedTerms {
    let mut terms = CategorizedTerms::new();
    for token in tokens {
        let token = token.as_ref();
        terms.push(classify_term(token), token);
    }
    terms
}

// ============================================================================
// TESTS
// ============================================================================
