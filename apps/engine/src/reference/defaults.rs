//! Built-in reference tables. These are the fixture-sized defaults compiled
//! into the binary; deployments override them with versioned JSON files via
//! `ReferenceData::from_dir`.

/// Synonym equivalence classes: head term plus its equivalents. Lookup is
/// bidirectional, so either side appearing in the text matches the other.
pub(crate) const SYNONYM_CLASSES: &[(&str, &[&str])] = &[
    ("javascript", &["js", "ecmascript"]),
    ("typescript", &["ts"]),
    ("kubernetes", &["k8s"]),
    ("postgresql", &["postgres"]),
    ("machine learning", &["ml"]),
    ("natural language processing", &["nlp"]),
    ("artificial intelligence", &["ai"]),
    ("rest api", &["restful api", "rest apis"]),
    ("ci/cd", &["continuous integration", "continuous delivery"]),
    ("aws", &["amazon web services"]),
    ("gcp", &["google cloud", "google cloud platform"]),
    ("user experience", &["ux"]),
    ("user interface", &["ui"]),
    ("quality assurance", &["qa"]),
    ("object-oriented", &["oop", "object oriented"]),
    ("version control", &["git"]),
    ("database", &["db", "databases"]),
    ("infrastructure as code", &["iac"]),
];

/// Curated verb vocabulary mapped to impact tiers. 0 is vague, 4 is
/// strategic/transformational. Verbs missing from the table classify at
/// tier 1, not tier 0.
pub(crate) const VERB_TIERS: &[(&str, u8)] = &[
    // Tier 4: strategic, transformational
    ("transformed", 4),
    ("revolutionized", 4),
    ("pioneered", 4),
    ("spearheaded", 4),
    ("architected", 4),
    ("founded", 4),
    ("modernized", 4),
    // Tier 3: leadership, delivery at scale
    ("led", 3),
    ("launched", 3),
    ("drove", 3),
    ("established", 3),
    ("delivered", 3),
    ("scaled", 3),
    ("automated", 3),
    ("optimized", 3),
    ("mentored", 3),
    // Tier 2: solid execution
    ("built", 2),
    ("created", 2),
    ("developed", 2),
    ("designed", 2),
    ("implemented", 2),
    ("improved", 2),
    ("reduced", 2),
    ("increased", 2),
    ("migrated", 2),
    ("shipped", 2),
    // Tier 1: routine contribution
    ("managed", 1),
    ("maintained", 1),
    ("coordinated", 1),
    ("contributed", 1),
    ("analyzed", 1),
    ("tested", 1),
    ("documented", 1),
    ("reviewed", 1),
    // Tier 0: vague, passive
    ("helped", 0),
    ("assisted", 0),
    ("worked", 0),
    ("participated", 0),
    ("supported", 0),
    ("involved", 0),
    ("responsible", 0),
];

pub(crate) struct DefaultRole {
    pub id: &'static str,
    pub required: &'static [&'static str],
    pub preferred: &'static [&'static str],
}

pub(crate) const ROLE_PROFILES: &[DefaultRole] = &[
    DefaultRole {
        id: "backend-engineer",
        required: &["python", "sql", "rest api", "microservices", "docker"],
        preferred: &["kubernetes", "aws", "ci/cd", "postgresql", "redis", "terraform"],
    },
    DefaultRole {
        id: "frontend-engineer",
        required: &["javascript", "typescript", "react", "css", "html"],
        preferred: &["next.js", "graphql", "webpack", "accessibility", "testing"],
    },
    DefaultRole {
        id: "data-scientist",
        required: &["python", "machine learning", "sql", "statistics", "pandas"],
        preferred: &["tensorflow", "pytorch", "spark", "nlp", "data visualization"],
    },
    DefaultRole {
        id: "devops-engineer",
        required: &["linux", "docker", "kubernetes", "ci/cd", "terraform"],
        preferred: &["aws", "ansible", "prometheus", "python", "networking"],
    },
];

/// Level bands in years, inclusive. Adjacent bands overlap at their
/// boundaries on purpose: a candidate near a boundary scores full credit
/// against either adjacent level.
pub(crate) const LEVEL_BANDS: &[(&str, f64, f64)] = &[
    ("entry", 0.0, 3.0),
    ("mid", 2.0, 6.0),
    ("senior", 5.0, 10.0),
    ("lead", 8.0, 40.0),
];
