// file: src/redaction/scanner.rs
// description: offline PII scan over corpus source files
// reference: reports findings before a corpus is considered publishable

use crate::error::{ResumeError, Result};
use crate::redaction::patterns::{CREDIT_CARD, PHONE_NUMBER, SSN, looks_like_ssn, luhn_check};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PiiKind {
    PhoneNumber,
    Ssn,
    CreditCard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiFinding {
    pub kind: PiiKind,
    pub severity: Severity,
    pub origin: String,
    pub matched: String,
}

pub struct PiiScanner {
    extensions: Vec<String>,
}

impl PiiScanner {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    /// Scan raw text. The scanner only reports; it never rewrites.
    pub fn check_text(&self, text: &str, origin: &str) -> Vec<PiiFinding> {
        let mut findings = Vec::new();

        for candidate in PHONE_NUMBER.find_iter(text) {
            let matched = candidate.as_str();
            // No lookarounds in the regex crate: reject matches embedded in a
            // longer digit run (card numbers, row ids) here instead.
            if digit_adjacent(text, candidate.start(), candidate.end()) {
                continue;
            }
            if is_phone_false_positive(matched) {
                continue;
            }
            findings.push(PiiFinding {
                kind: PiiKind::PhoneNumber,
                severity: Severity::High,
                origin: origin.to_string(),
                matched: matched.to_string(),
            });
        }

        for candidate in SSN.find_iter(text) {
            let matched = candidate.as_str();
            if !looks_like_ssn(matched) {
                continue;
            }
            // A bare 9/10-digit run already reported as a phone number is
            // the same finding.
            if findings.iter().any(|f| f.matched.contains(matched)) {
                continue;
            }
            findings.push(PiiFinding {
                kind: PiiKind::Ssn,
                severity: Severity::Critical,
                origin: origin.to_string(),
                matched: matched.to_string(),
            });
        }

        for candidate in CREDIT_CARD.find_iter(text) {
            let matched = candidate.as_str();
            let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();
            if digits.len() == 16 && luhn_check(&digits) {
                findings.push(PiiFinding {
                    kind: PiiKind::CreditCard,
                    severity: Severity::Critical,
                    origin: origin.to_string(),
                    matched: matched.to_string(),
                });
            }
        }

        findings
    }

    pub fn scan_file(&self, path: &Path) -> Result<Vec<PiiFinding>> {
        let content = std::fs::read_to_string(path)?;
        let findings = self.check_text(&content, &path.display().to_string());
        debug!("Scanned {}: {} finding(s)", path.display(), findings.len());
        Ok(findings)
    }

    /// Walk a directory and scan every file with a configured extension.
    pub fn scan_dir(&self, root: &Path) -> Result<Vec<PiiFinding>> {
        if !root.exists() {
            return Err(ResumeError::Redaction(format!(
                "scan target does not exist: {}",
                root.display()
            )));
        }

        let mut findings = Vec::new();

        for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let matches_extension = path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| self.extensions.iter().any(|allowed| allowed == ext));
            if !matches_extension {
                continue;
            }

            findings.extend(self.scan_file(path)?);
        }

        if !findings.is_empty() {
            warn!("PII scan found {} issue(s) under {}", findings.len(), root.display());
        }

        Ok(findings)
    }
}

fn digit_adjacent(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}

/// Years, percentages, short metrics, and version numbers match the loose
/// phone shapes but carry no PII.
fn is_phone_false_positive(matched: &str) -> bool {
    let digits: String = matched.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() < 10 {
        return true;
    }

    // Date-like "2015 - 12/2018" fragments never reach 10 digits, but a
    // dotted version string can.
    if matched.contains('.') && matched.split('.').count() > 3 {
        return true;
    }

    false
}
