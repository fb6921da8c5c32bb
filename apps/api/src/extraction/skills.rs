use std::collections::BTreeSet;

use crate::extraction::document::ResumeDocument;

/// Technology keywords detected by substring match. Lowercase.
pub const SKILL_VOCABULARY: [&str; 21] = [
    "python",
    "javascript",
    "java",
    "react",
    "node.js",
    "sql",
    "mongodb",
    "aws",
    "docker",
    "kubernetes",
    "git",
    "html",
    "css",
    "typescript",
    "angular",
    "vue",
    "django",
    "flask",
    "express",
    "postgresql",
    "mysql",
];

/// Scans the document for vocabulary hits. Each skill appears once, in canonical form.
///
/// Matching is plain substring containment, so "java" also fires inside "javascript"
/// and "sql" inside "postgresql".
pub fn extract_skills(doc: &ResumeDocument) -> BTreeSet<String> {
    skills_in(doc.lowered_text())
}

pub(crate) fn skills_in(lowered: &str) -> BTreeSet<String> {
    SKILL_VOCABULARY
        .iter()
        .filter(|skill| lowered.contains(*skill))
        .map(|skill| canonical_name(skill))
        .collect()
}

/// Upper-cases every letter that follows a non-letter: "node.js" -> "Node.Js".
pub fn canonical_name(skill: &str) -> String {
    let mut out = String::with_capacity(skill.len());
    let mut prev_is_letter = false;
    for ch in skill.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn doc(text: &str) -> ResumeDocument {
        ResumeDocument::new(text, vec![])
    }

    #[test]
    fn test_canonical_name_title_cases_word_starts() {
        assert_eq!(canonical_name("python"), "Python");
        assert_eq!(canonical_name("node.js"), "Node.Js");
        assert_eq!(canonical_name("aws"), "Aws");
    }

    #[test]
    fn test_case_insensitive_hits_recorded_once() {
        let skills = extract_skills(&doc("PYTHON, python and Python. Also Docker."));
        assert_eq!(
            skills,
            BTreeSet::from(["Docker".to_string(), "Python".to_string()])
        );
    }

    #[test]
    fn test_node_js_spellings_collapse() {
        let skills = extract_skills(&doc("Node.js backend, NODE.JS services"));
        assert!(skills.contains("Node.Js"));
        assert_eq!(skills.iter().filter(|s| s.starts_with("Node")).count(), 1);
    }

    #[test]
    fn test_substring_semantics_are_preserved() {
        let skills = extract_skills(&doc("JavaScript and PostgreSQL"));
        assert!(skills.contains("Javascript"));
        assert!(skills.contains("Java"));
        assert!(skills.contains("Postgresql"));
        assert!(skills.contains("Sql"));
    }

    #[test]
    fn test_no_duplicates_case_insensitively() {
        let text = SKILL_VOCABULARY.join(" ").to_uppercase();
        let skills = extract_skills(&doc(&text));
        let folded: HashSet<String> = skills.iter().map(|s| s.to_lowercase()).collect();
        assert_eq!(folded.len(), skills.len());
        assert_eq!(skills.len(), SKILL_VOCABULARY.len());
    }

    #[test]
    fn test_no_hits_yields_empty_set() {
        assert!(extract_skills(&doc("Carpentry and woodworking")).is_empty());
    }
}
