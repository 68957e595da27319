use crate::store::AssessmentType;

/// Terms indicating a federally regulated financial institution model,
/// i.e. an OSFI E-23 engagement.
const OSFI_KEYWORDS: &[&str] = &[
    "bank",
    "banking",
    "financial institution",
    "credit risk",
    "credit scoring",
    "loan",
    "lending",
    "mortgage",
    "insurance",
    "insurer",
    "capital",
    "liquidity",
    "trading",
    "fraud detection",
    "aml",
    "anti-money laundering",
    "osfi",
    "basel",
    "model risk",
];

/// Terms indicating a federal government automated-decision system,
/// i.e. an AIA engagement.
const AIA_KEYWORDS: &[&str] = &[
    "government",
    "federal",
    "public service",
    "public sector",
    "citizen",
    "benefit",
    "benefits",
    "immigration",
    "visa",
    "permit",
    "licence",
    "eligibility",
    "automated decision",
    "administrative decision",
    "treasury board",
    "service delivery",
    "grant",
];

fn match_count(description: &str, keywords: &[&str]) -> usize {
    keywords.iter().filter(|k| description.contains(*k)).count()
}

/// Picks a workflow template from a free-text project description by
/// counting keyword hits. Pure and deterministic; every input maps to
/// exactly one template.
pub fn classify(description: &str) -> AssessmentType {
    let lowered = description.to_lowercase();
    let osfi_hits = match_count(&lowered, OSFI_KEYWORDS);
    let aia_hits = match_count(&lowered, AIA_KEYWORDS);

    if osfi_hits > aia_hits && osfi_hits >= 2 {
        AssessmentType::OsfiE23
    } else if aia_hits >= 2 {
        AssessmentType::AiaFull
    } else if osfi_hits > 0 && aia_hits > 0 {
        AssessmentType::Combined
    } else {
        AssessmentType::AiaPreview
    }
}
