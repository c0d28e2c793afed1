//! Scans assistant-facing text for numeric claims and classifies each one,
//! flagging material-property numbers that have no recorded provenance.

use std::collections::HashSet;

use regex_lite::Regex;

use crate::material;
use crate::registry::ProvenanceTuple;
use crate::registry::ProvenanceValueRegistry;

/// Closed vocabulary of property names that require provenance whenever a
/// number appears alongside them.
pub const MATERIAL_PROPERTIES: &[&str] = &[
    "formation_energy",
    "formation energy",
    "binding_energy",
    "binding energy",
    "cohesive_energy",
    "cohesive energy",
    "total_energy",
    "total energy",
    "energy_above_hull",
    "energy above hull",
    "decomposition_energy",
    "ev/atom",
    "kj/mol",
    "kcal/mol",
    "hartree",
    "band_gap",
    "band gap",
    "bandgap",
    "homo",
    "lumo",
    "fermi_level",
    "fermi level",
    "work_function",
    "work function",
    "electron_affinity",
    "lattice_parameter",
    "lattice parameter",
    "lattice_constant",
    "space_group",
    "space group",
    "spacegroup",
    "crystal_system",
    "unit_cell",
    "unit cell",
    "cell_volume",
    "density",
    "bulk_modulus",
    "bulk modulus",
    "young_modulus",
    "young's modulus",
    "shear_modulus",
    "shear modulus",
    "hardness",
    "fracture_toughness",
    "stress",
    "strain",
    "gpa",
    "mpa",
    "magnetic_moment",
    "magnetic moment",
    "magnetization",
    "curie_temperature",
    "curie temperature",
    "néel_temperature",
    "melting_point",
    "melting point",
    "boiling_point",
    "boiling point",
    "heat_capacity",
    "heat capacity",
    "entropy",
    "enthalpy",
    "gibbs_energy",
    "gibbs energy",
    "free_energy",
    "voltage",
    "capacity",
    "mah/g",
    "wh/kg",
    "coulombic_efficiency",
    "oxidation_state",
    "oxidation state",
    "redox_potential",
];

pub const CONTEXTUAL_INDICATORS: &[&str] = &[
    "typically",
    "usually",
    "generally",
    "approximately",
    "about",
    "roughly",
    "around",
    "often",
    "commonly",
    "tend to",
    "tends to",
    "in the range",
    "between",
    "from",
    "varies",
    "can be",
    "literature",
    "reported",
    "known",
    "established",
    "theoretical",
    "experimental",
    "measured",
    "observed",
    "found to be",
    "according to",
    "based on",
    "ref",
    "reference",
    "study",
    "paper",
    "work",
    "research",
    "average",
    "mean",
    "typical",
];

pub const STATISTICAL_INDICATORS: &[&str] = &[
    "out of", "percent", "%", "fraction", "ratio", "total", "count", "number of", "materials", "structures",
    "candidates", "passed", "failed", "stable", "unstable", "metastable",
];

pub const DERIVED_INDICATORS: &[&str] = &[
    "calculated from",
    "derived from",
    "computed using",
    "based on calculation",
    "sum of",
    "difference between",
    "product of",
    "divided by",
    "multiplied by",
    "times",
    "plus",
    "minus",
    "equals",
    "resulting in",
    "gives",
    "yields",
    "therefore",
    "thus",
];

pub const LITERATURE_INDICATORS: &[&str] = &[
    "materials project",
    "mp-",
    "icsd",
    "cod",
    "csd",
    "pubchem",
    "according to",
    "reported in",
    "published",
    "literature",
    "paper",
    "study",
    "research",
    "et al.",
    "reference",
    "database",
    "repository",
    "archive",
    "journal",
];

/// Names of this assistant's own computational tools: a number explicitly
/// described as "calculated"/"computed" using one of these stays classified
/// as a material property instead of being demoted to derived.
const OWN_TOOLS: &[&str] = &["mace", "pymatgen", "smact", "chemeleon"];

/// The flag attached to a material-property number with no matching
/// registered artefact.
pub const UNPROVENANCED_FLAG: &str = "UNPROVENANCED_MATERIAL_PROPERTY";

/// Classification of a numerical value found in assistant output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberType {
    /// Must be backed by a registered artefact.
    MaterialProperty,
    /// General explanatory number, not a specific claim.
    Contextual,
    /// Computed from other, already-provenanced values.
    Derived,
    /// Attributed to a paper, database, or other external reference.
    Literature,
    /// A count, percentage, or other summary statistic.
    Statistical,
    /// Not enough signal to classify.
    Unknown,
}

/// A numeric value detected in a piece of text, along with its classification.
#[derive(Debug, Clone)]
pub struct DetectedNumber {
    pub value: String,
    pub context: String,
    pub full_sentence: String,
    pub number_type: NumberType,
    pub provenance: Option<ProvenanceTuple>,
    pub position: (usize, usize),
    pub flags: HashSet<String>,
}

impl DetectedNumber {
    fn new(value: String, context: String, full_sentence: String, position: (usize, usize)) -> Self {
        Self {
            value,
            context,
            full_sentence,
            number_type: NumberType::Unknown,
            provenance: None,
            position,
            flags: HashSet::new(),
        }
    }
}

const NUMBER_PATTERN_PARTS: &[&str] = &[
    r"-?\d+\.?\d*[eE][+-]?\d+",
    r"-?\d+\.?\d*\s*(?:eV|keV|MeV|GeV|kJ|kcal|Å|Angstrom|nm|pm|GPa|MPa|kPa|Pa|K|°C|°F|V|mV|mAh|Wh|g/cm³|g/mol)",
    r"-?\d+\.\d+",
    r"-?\d+\s*(?:%|percent)?",
    r"-?\d+\.?\d*\s*(?:to|-|–|—)\s*-?\d+\.?\d*",
];

fn number_pattern() -> Regex {
    let combined = format!("(?i){}", NUMBER_PATTERN_PARTS.join("|"));
    Regex::new(&combined).expect("static pattern is valid")
}

const CONTEXT_RADIUS: usize = 50;

/// Splits `text` into sentences on a `.` that is not immediately followed by
/// a digit, so a decimal point inside a number (`-3.45`) is never mistaken
/// for a sentence boundary.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        if ch != '.' {
            continue;
        }
        let next_is_digit = text[i + 1..].chars().next().is_some_and(|n| n.is_ascii_digit());
        if !next_is_digit {
            sentences.push(&text[start..i]);
            start = i + 1;
        }
    }
    sentences.push(&text[start..]);
    sentences
}

/// Detects numerical claims in `text`, sentence by sentence, with ±50
/// character surrounding context.
fn detect_numbers(text: &str) -> Vec<DetectedNumber> {
    let pattern = number_pattern();
    let mut numbers = Vec::new();

    for sentence in split_sentences(text) {
        for found in pattern.find_iter(sentence) {
            let start = found.start().saturating_sub(CONTEXT_RADIUS);
            let end = (found.end() + CONTEXT_RADIUS).min(sentence.len());
            let context = char_safe_slice(sentence, start, end);

            numbers.push(DetectedNumber::new(
                found.as_str().to_string(),
                context,
                sentence.trim().to_string(),
                (found.start(), found.end()),
            ));
        }
    }

    numbers
}

fn char_safe_slice(text: &str, start: usize, end: usize) -> String {
    let start = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).find(|&i| i >= start).unwrap_or(0);
    let end = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).find(|&i| i >= end).unwrap_or(text.len());
    text[start..end].to_string()
}

fn count_matches(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|needle| haystack.contains(*needle)).count()
}

fn has_mathematical_expression(text: &str) -> bool {
    let patterns = [r"\d+\s*[+\-*/]\s*\d+", r"\d+\s*=\s*\d+", r"\(\s*\d+.*?\)", r"\d+\s*×\s*\d+", r"∑|∏|∫"];
    for pattern in patterns {
        if Regex::new(pattern).expect("static pattern is valid").is_match(text) {
            return true;
        }
    }

    let math_words = ["sum", "product", "difference", "quotient", "times", "plus", "minus", "divided"];
    count_matches(&text.to_lowercase(), &math_words) >= 2
}

fn classify_number(sentence: &str) -> NumberType {
    let lower = sentence.to_lowercase();

    let material_property_score = count_matches(&lower, MATERIAL_PROPERTIES);
    let contextual_score = count_matches(&lower, CONTEXTUAL_INDICATORS);
    let statistical_score = count_matches(&lower, STATISTICAL_INDICATORS);
    let derived_score = count_matches(&lower, DERIVED_INDICATORS);
    let literature_score = count_matches(&lower, LITERATURE_INDICATORS);

    if literature_score >= 2 || ["mp-", "icsd-", "cod-"].iter().any(|db| lower.contains(db)) {
        return NumberType::Literature;
    }

    if derived_score >= 2 || has_mathematical_expression(sentence) {
        return NumberType::Derived;
    }

    if statistical_score > 0 {
        return NumberType::Statistical;
    }

    if material_property_score > 0 {
        if contextual_score >= 2 || literature_score > 0 {
            return NumberType::Literature;
        }
        if lower.contains("calculated") || lower.contains("computed") {
            return if OWN_TOOLS.iter().any(|tool| lower.contains(tool)) {
                NumberType::MaterialProperty
            } else {
                NumberType::Derived
            };
        }
        return NumberType::MaterialProperty;
    }

    if contextual_score >= 2 {
        return NumberType::Contextual;
    }

    NumberType::Unknown
}

const UNIT_STRIP_PATTERN: &str =
    r"(?i)\s*(eV|keV|MeV|GeV|kJ|kcal|Å|Angstrom|nm|pm|GPa|MPa|kPa|Pa|K|°C|°F|V|mV|mAh|Wh|g/cm³|g/mol|/atom|/mol|/unit).*$";

fn parse_numeric_value(raw: &str) -> Option<f64> {
    let stripped = Regex::new(UNIT_STRIP_PATTERN)
        .expect("static pattern is valid")
        .replace(raw.trim(), "")
        .trim()
        .replace(',', "");
    stripped.parse::<f64>().ok()
}

/// Analyzes assistant-facing output: detects numbers, classifies them, and
/// checks material-property numbers against `registry`. Returns the
/// (unmodified) text, the detected numbers, and whether any were flagged.
pub fn analyze(text: &str, registry: Option<&ProvenanceValueRegistry>) -> (String, Vec<DetectedNumber>, bool) {
    let mut detected = detect_numbers(text);
    let mut has_violations = false;

    for number in &mut detected {
        number.number_type = classify_number(&number.full_sentence);

        if number.number_type == NumberType::MaterialProperty {
            number.provenance = registry.and_then(|registry| find_provenance(number, registry));
            if number.provenance.is_none() {
                number.flags.insert(UNPROVENANCED_FLAG.to_string());
                has_violations = true;
                tracing::warn!(value = %number.value, context = %number.context, "unprovenanced material property detected");
            }
        }
    }

    (text.to_string(), detected, has_violations)
}

fn find_provenance(number: &DetectedNumber, registry: &ProvenanceValueRegistry) -> Option<ProvenanceTuple> {
    let value = parse_numeric_value(&number.value)?;
    let formula = material::extract_from_text(&number.full_sentence);
    registry.lookup_provenance(value, 0.001, formula.as_deref())
}

#[cfg(test)]
#[path = "render_gate.test.rs"]
mod tests;
