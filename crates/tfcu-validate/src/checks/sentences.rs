//! Sentence length in body paragraphs.
//!
//! Sentences are split on runs of `.`, `!` and `?`, and words on whitespace.
//! Both limits produce warnings; the message says which one was crossed.

use tfcu_model::{Category, ErrorKind, ExtractedDocument, ValidationError};
use tfcu_standards::SPEC_CONFIG;

use crate::context::{RuleCheck, ValidationContext};

const EXCERPT_CHARS: usize = 100;

pub fn check(
    ctx: &mut ValidationContext,
    document: &ExtractedDocument,
) -> Result<(), ValidationError> {
    let limits = &SPEC_CONFIG.structure.sentence_length;
    let mut long_sentences = 0usize;

    for paragraph in &document.paragraphs {
        let mut ctx = ctx.scope(format!("paragraph[{}]", paragraph.index));
        for (position, sentence) in sentences(&paragraph.text).enumerate() {
            let words = sentence.split_whitespace().count();
            if words <= limits.target_max {
                continue;
            }
            long_sentences += 1;
            let check = RuleCheck::new(
                Category::Structure,
                format!("STR-SENTENCE-{}-{position}", paragraph.index),
                format!("Sentences stay within {} words", limits.target_max),
            )
            .values(format!("{words} words"), format!("<= {} words", limits.target_max));
            let message = if words > limits.absolute_max {
                format!(
                    "Sentence has {words} words, over the {}-word maximum: \"{}\"",
                    limits.absolute_max,
                    excerpt(sentence)
                )
            } else {
                format!(
                    "Sentence has {words} words, over the {}-word target: \"{}\"",
                    limits.target_max,
                    excerpt(sentence)
                )
            };
            ctx.warn(check, ErrorKind::Structure, message);
        }
    }

    if long_sentences == 0 {
        let check = RuleCheck::new(
            Category::Structure,
            "STR-SENTENCE-LENGTH",
            format!("Sentences stay within {} words", limits.target_max),
        )
        .values("no long sentences", format!("<= {} words", limits.target_max));
        ctx.pass(check);
    }
    Ok(())
}

/// Non-empty, trimmed sentences of `text`.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split(['.', '!', '?'])
        .map(str::trim)
        .filter(|sentence| !sentence.is_empty())
}

fn excerpt(sentence: &str) -> String {
    match sentence.char_indices().nth(EXCERPT_CHARS) {
        Some((end, _)) => format!("{}...", &sentence[..end]),
        None => sentence.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ValidationMode;
    use tfcu_model::{AuditResults, Paragraph};

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    fn audit(texts: &[String]) -> AuditResults {
        let document = ExtractedDocument {
            paragraphs: texts
                .iter()
                .enumerate()
                .map(|(index, text)| Paragraph {
                    index,
                    text: text.clone(),
                    ..Paragraph::default()
                })
                .collect(),
            ..ExtractedDocument::default()
        };
        let mut ctx = ValidationContext::new(ValidationMode::Strict);
        check(&mut ctx, &document).unwrap();
        ctx.finish()
    }

    #[test]
    fn short_sentences_pass_once() {
        let results = audit(&[format!("{}. {}!", words(25), words(3))]);
        assert_eq!(results.results.len(), 1);
        assert_eq!(results.passed()[0].rule_id, "STR-SENTENCE-LENGTH");
    }

    #[test]
    fn long_sentences_warn_with_position_and_limit() {
        let results = audit(&[
            "OVERVIEW".to_string(),
            format!("Short one. {}? {}.", words(26), words(36)),
        ]);
        let warnings = results.warnings();
        assert_eq!(warnings.len(), 2);
        assert!(results.failed().is_empty());

        let target = warnings[0].error().unwrap();
        assert_eq!(target.rule, "STR-SENTENCE-1-1");
        assert_eq!(target.location, "paragraph[1]");
        assert!(target.message.contains("26 words, over the 25-word target"));

        let maximum = warnings[1].error().unwrap();
        assert_eq!(maximum.rule, "STR-SENTENCE-1-2");
        assert!(maximum.message.contains("36 words, over the 35-word maximum"));
    }

    #[test]
    fn excerpts_are_truncated() {
        let long = "x".repeat(150);
        let cut = excerpt(&long);
        assert_eq!(cut.len(), 103);
        assert!(cut.ends_with("..."));
        assert_eq!(excerpt("short"), "short");
    }
}
