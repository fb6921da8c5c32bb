//! Heuristic contact scraping for uploaded résumés.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::cv::ContactInfo;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static NAME_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
    })
}

fn phone_re() -> &'static Regex {
    PHONE_RE.get_or_init(|| Regex::new(r"\+?[\d\s\-()]{10,}").expect("valid phone regex"))
}

fn name_re() -> &'static Regex {
    NAME_RE.get_or_init(|| Regex::new(r"^[A-Za-z\s]{2,30}$").expect("valid name regex"))
}

pub fn extract_contact(text: &str) -> ContactInfo {
    ContactInfo {
        name: find_name(text),
        email: email_re().find(text).map(|m| m.as_str().to_string()),
        phone: find_phone(text),
    }
}

/// First run of phone-like characters that actually contains a digit.
fn find_phone(text: &str) -> Option<String> {
    phone_re()
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|candidate| candidate.chars().any(|c| c.is_ascii_digit()))
        .map(|candidate| candidate.split_whitespace().collect::<Vec<_>>().join(" "))
}

/// First short line made only of letters, at most three words.
fn find_name(text: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| line.len() <= 50 && !line.contains('@') && !line.contains("http"))
        .find(|line| name_re().is_match(line) && line.split(' ').count() <= 3)
        .map(str::to_string)
}
