//! Free-text vital-sign extraction.
//!
//! Tolerant, best-effort pattern matching over clinical prose. Every
//! vital is matched independently; a field that cannot be recognized is
//! simply absent from the partial record. This function never fails —
//! the pipeline must swallow partially illegible or atypical document
//! formats.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::ExtractedVitals;

// ── Compiled patterns ───────────────────────────────────────

/// "temperature 38.5", "temp to 104.4", "Temp of 101" — filler words
/// between keyword and value are tolerated.
static TEMP_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:temperature|temp)\s*(?:of|to|is|at|:)?\s*(\d{2,3}(?:\.\d)?)").unwrap()
});

/// "104.4°F", "39 ° C" — bare degree-mark readings.
static TEMP_DEGREES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2,3}(?:\.\d)?)\s*°\s*[FfCc]").unwrap());

/// "SpO2: 92", "oxygen saturation of 88", "O2 sat 85" — the leading
/// character class absorbs zero/letter-O confusion from scanned text.
static SPO2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:spo2|oxygen\s*saturation|[O0o]2\s*sat)\s*(?:of|to|is|at|:)?\s*(\d{2,3})")
        .unwrap()
});

/// "heart rate 110", "HR of 120", "Pulse: 95".
static HEART_RATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:heart\s*rate|hr|pulse)\s*(?:of|to|is|at|:)?\s*(\d{2,3})").unwrap()
});

/// "BP 180/95", "blood pressure of 200 / 110" — systolic is the number
/// immediately before the slash.
static SYSTOLIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:blood\s*pressure|bp)\s*(?:of|to|is|at|:)?\s*(\d{2,3})\s*/").unwrap()
});

/// "Age: 70" or "70 year old" / "70 y.o." forms.
static AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:age\s*[:\s]+(\d{1,3}))|(?:(\d{1,3})\s*-?\s*(?:years?\s*-?\s*old|y\.?o\.?))")
        .unwrap()
});

/// Condition vocabulary counted toward chronic_disease_count. Each entry
/// is matched once, word-bounded, case-insensitively.
const CHRONIC_CONDITIONS: &[&str] = &[
    "hypertension",
    "asthma",
    "diabetes",
    "psoriatic arthritis",
    "coronary artery disease",
    "cad",
    "copd",
    "cancer",
    "heart failure",
];

static CHRONIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CHRONIC_CONDITIONS
        .iter()
        .map(|kw| Regex::new(&format!(r"(?i)\b{kw}\b")).unwrap())
        .collect()
});

// ── Extraction ──────────────────────────────────────────────

/// Scan raw document text for vitals and demographics.
///
/// The returned partial record carries the input text unmodified in
/// `raw_text` for downstream narrative synthesis.
pub fn extract_vitals(raw_text: &str) -> ExtractedVitals {
    ExtractedVitals {
        age: extract_age(raw_text),
        heart_rate: extract_heart_rate(raw_text),
        systolic_blood_pressure: extract_systolic(raw_text),
        oxygen_saturation: extract_spo2(raw_text),
        body_temperature: extract_temperature(raw_text),
        pain_level: None,
        chronic_disease_count: extract_chronic_count(raw_text),
        previous_er_visits: None,
        arrival_mode: None,
        raw_text: raw_text.to_string(),
    }
}

/// Both temperature forms, normalized to Celsius.
///
/// Values above 50 are treated as Fahrenheit and converted. This unit
/// heuristic can misread a miswritten reading near the boundary; it is
/// kept as-is pending clinical input on the threshold.
fn extract_temperature(text: &str) -> Option<f64> {
    let candidates = TEMP_KEYWORD
        .captures_iter(text)
        .chain(TEMP_DEGREES.captures_iter(text))
        .filter_map(|c| c.get(1))
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .map(|v| {
            if v > 50.0 {
                round1((v - 32.0) * 5.0 / 9.0)
            } else {
                v
            }
        })
        .filter(|v| (30.0..=45.0).contains(v));

    // Several plausible readings: record the highest fever.
    candidates.fold(None, |acc: Option<f64>, v| {
        Some(acc.map_or(v, |a| a.max(v)))
    })
}

/// Lowest plausible saturation wins — worst-case reading.
fn extract_spo2(text: &str) -> Option<u32> {
    SPO2.captures_iter(text)
        .filter_map(|c| c.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|v| (50..=100).contains(v))
        .min()
}

fn extract_heart_rate(text: &str) -> Option<u32> {
    HEART_RATE
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|v| (30..=250).contains(v))
        .max()
}

fn extract_systolic(text: &str) -> Option<u32> {
    SYSTOLIC
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .filter_map(|m| m.as_str().parse::<u32>().ok())
        .filter(|v| (50..=300).contains(v))
        .max()
}

fn extract_age(text: &str) -> Option<u32> {
    let captures = AGE.captures(text)?;
    let value = captures
        .get(1)
        .or_else(|| captures.get(2))?
        .as_str()
        .parse::<u32>()
        .ok()?;
    (value <= 120).then_some(value)
}

/// Count of distinct vocabulary conditions present in the text.
fn extract_chronic_count(text: &str) -> Option<u32> {
    let count = CHRONIC_PATTERNS.iter().filter(|re| re.is_match(text)).count() as u32;
    (count > 0).then_some(count)
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
