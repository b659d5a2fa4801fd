//! SEO rule engine
//!
//! A fixed, ordered list of predicates over the analysis. Every predicate
//! that holds contributes one human-readable finding with its
//! recommendation; the final list keeps first occurrences only.

mod rules;

pub use rules::RULES;

use crate::classify::{DependencyLevel, RenderingScores};
use crate::ProbeResult;
use scraper::Html;
use std::fmt;

/// Separator between a finding and its recommendation
pub const RECOMMENDATION_SEPARATOR: &str = " - ";

/// The analysis-so-far the rules are evaluated against
#[derive(Debug, Clone, Copy)]
pub struct SeoContext<'a> {
    pub document: &'a Html,
    pub scores: &'a RenderingScores,
    pub dependency_level: DependencyLevel,
    pub frameworks: &'a [String],
    /// Page load time in milliseconds
    pub load_time: f64,
}

/// One SEO problem and what to do about it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub finding: String,
    pub recommendation: String,
}

impl Finding {
    pub fn new(finding: impl Into<String>, recommendation: impl Into<String>) -> Self {
        Self {
            finding: finding.into(),
            recommendation: recommendation.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.finding, RECOMMENDATION_SEPARATOR, self.recommendation
        )
    }
}

/// A predicate with optional sub-checks gated on it
pub struct SeoRule {
    pub name: &'static str,
    pub check: fn(&SeoContext<'_>) -> ProbeResult<Option<Finding>>,
    /// Evaluated only when `check` produced a finding
    pub nested: &'static [SeoRule],
}

/// Runs the built-in rule table
pub fn evaluate_seo(ctx: &SeoContext<'_>) -> Vec<String> {
    evaluate_rules(RULES, ctx)
}

/// Runs a rule table, returning deduplicated issue strings in rule order
pub fn evaluate_rules(rules: &[SeoRule], ctx: &SeoContext<'_>) -> Vec<String> {
    let mut issues = Vec::new();
    evaluate_into(rules, ctx, &mut issues);
    issues
}

fn evaluate_into(rules: &[SeoRule], ctx: &SeoContext<'_>, issues: &mut Vec<String>) {
    for rule in rules {
        let finding = match (rule.check)(ctx) {
            Ok(Some(finding)) => finding,
            Ok(None) => continue,
            Err(e) => {
                tracing::warn!("SEO rule '{}' could not be evaluated: {}", rule.name, e);
                continue;
            }
        };

        let issue = finding.to_string();
        if !issues.contains(&issue) {
            issues.push(issue);
        }
        evaluate_into(rule.nested, ctx, issues);
    }
}

/// Splits an issue string into its finding and recommendation
pub fn split_issue(issue: &str) -> (&str, Option<&str>) {
    match issue.split_once(RECOMMENDATION_SEPARATOR) {
        Some((finding, recommendation)) => (finding, Some(recommendation)),
        None => (issue, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <title>A perfectly reasonable page title</title>
    <meta name="description" content="This description is long enough to satisfy the search engine guidance and stays well under the limit.">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <link rel="canonical" href="https://example.com/">
</head>
<body>
    <h1>Welcome</h1>
    <h2>Section</h2>
    <img src="a.png" alt="A">
</body>
</html>"#;

    struct Fixture {
        document: Html,
        scores: RenderingScores,
        dependency_level: DependencyLevel,
        frameworks: Vec<String>,
        load_time: f64,
    }

    impl Fixture {
        fn new(html: &str) -> Self {
            Self {
                document: Html::parse_document(html),
                scores: RenderingScores::new(0.8, 0.1, 0.1),
                dependency_level: DependencyLevel::Low,
                frameworks: vec![],
                load_time: 0.0,
            }
        }

        fn issues(&self) -> Vec<String> {
            evaluate_seo(&SeoContext {
                document: &self.document,
                scores: &self.scores,
                dependency_level: self.dependency_level,
                frameworks: &self.frameworks,
                load_time: self.load_time,
            })
        }
    }

    fn has_finding(issues: &[String], finding: &str) -> bool {
        issues.iter().any(|issue| split_issue(issue).0 == finding)
    }

    #[test]
    fn test_clean_page_has_no_issues() {
        assert!(Fixture::new(CLEAN_PAGE).issues().is_empty());
    }

    #[test]
    fn test_bare_page_reports_everything_in_order() {
        let issues = Fixture::new("<html><body><img src=\"x.png\"><img src=\"y.png\"></body></html>").issues();

        assert_eq!(
            issues,
            vec![
                "Missing title tag - Add a descriptive page title",
                "Missing meta description - Add a meta description tag for better search results",
                "Missing H1 heading - Add a primary heading for better content structure",
                "Missing viewport meta tag - Add viewport settings for mobile-friendly display",
                "Missing canonical tag - Add a canonical link to prevent duplicate content issues",
                "2 images missing alt text - Add descriptive alt text for accessibility and SEO",
                "Missing language attribute - Add a lang attribute to the HTML tag",
            ]
        );
    }

    #[test]
    fn test_high_csr_with_nested_checks() {
        let mut fixture = Fixture::new("<html lang=\"en\"><body><h1>x</h1></body></html>");
        fixture.scores = RenderingScores::new(0.1, 0.1, 0.8);
        fixture.frameworks = vec!["React".to_string(), "Vue".to_string()];
        let issues = fixture.issues();

        assert_eq!(
            &issues[..3],
            &[
                "High client-side rendering may impact SEO - Consider implementing SSR or pre-rendering for better search engine visibility",
                "Missing meta description - Add a meta description tag that will be present in initial HTML",
                "Using React, Vue - Consider using the SSR version (Next.js, Nuxt.js, etc.) for better SEO",
            ]
        );
        // The general description check still reports its own recommendation
        assert!(issues.contains(
            &"Missing meta description - Add a meta description tag for better search results".to_string()
        ));
    }

    #[test]
    fn test_nested_checks_gated_by_parent() {
        let mut fixture = Fixture::new(CLEAN_PAGE);
        fixture.scores = RenderingScores::new(0.3, 0.3, 0.4);
        fixture.frameworks = vec!["React".to_string()];

        assert!(fixture.issues().is_empty());
    }

    #[test]
    fn test_csr_threshold_is_strict() {
        let mut fixture = Fixture::new(CLEAN_PAGE);
        fixture.scores = RenderingScores::new(0.2, 0.2, 0.6);
        assert!(fixture.issues().is_empty());
    }

    #[test]
    fn test_dependency_and_load_time() {
        let mut fixture = Fixture::new(CLEAN_PAGE);
        fixture.dependency_level = DependencyLevel::High;
        fixture.load_time = 4200.0;
        let issues = fixture.issues();

        assert!(has_finding(&issues, "High JavaScript dependency may affect crawling"));
        assert!(has_finding(&issues, "Slow page load time may impact SEO"));
    }

    #[test]
    fn test_title_length_and_duplicates() {
        let short = Fixture::new("<html lang=\"en\"><head><title>Hi</title></head></html>").issues();
        assert!(has_finding(&short, "Title tag length issue"));

        let long_title = "x".repeat(61);
        let long = Fixture::new(&format!("<html><head><title>{}</title></head></html>", long_title)).issues();
        assert!(has_finding(&long, "Title tag length issue"));

        let twice = Fixture::new(
            "<html><head><title>First reasonable title</title><title>Second title here</title></head></html>",
        )
        .issues();
        assert!(has_finding(&twice, "Multiple title tags"));
        assert!(!has_finding(&twice, "Title tag length issue"));
    }

    #[test]
    fn test_meta_description_length() {
        let short = Fixture::new(r#"<html><head><meta name="description" content="Too short"></head></html>"#).issues();
        assert!(has_finding(&short, "Meta description length issue"));

        let empty = Fixture::new(r#"<html><head><meta name="description" content=""></head></html>"#).issues();
        assert!(!has_finding(&empty, "Meta description length issue"));
        assert!(!has_finding(&empty, "Missing meta description"));
    }

    #[test]
    fn test_heading_rules() {
        let multiple = Fixture::new("<html><body><h1>a</h1><h1>b</h1></body></html>").issues();
        assert!(has_finding(&multiple, "Multiple H1 headings"));

        let h2_only = Fixture::new("<html><body><h2>a</h2></body></html>").issues();
        assert!(has_finding(&h2_only, "Missing H1 heading"));
        assert!(has_finding(&h2_only, "Using H2 without H1"));
    }

    #[test]
    fn test_duplicates_removed() {
        fn always(_: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
            Ok(Some(Finding::new("Same", "Thing")))
        }
        static REPEATING: &[SeoRule] = &[
            SeoRule {
                name: "a",
                check: always,
                nested: &[SeoRule {
                    name: "a-nested",
                    check: always,
                    nested: &[],
                }],
            },
            SeoRule {
                name: "b",
                check: always,
                nested: &[],
            },
        ];

        let fixture = Fixture::new(CLEAN_PAGE);
        let issues = evaluate_rules(
            REPEATING,
            &SeoContext {
                document: &fixture.document,
                scores: &fixture.scores,
                dependency_level: fixture.dependency_level,
                frameworks: &fixture.frameworks,
                load_time: fixture.load_time,
            },
        );
        assert_eq!(issues, vec!["Same - Thing"]);
    }

    #[test]
    fn test_split_issue() {
        assert_eq!(
            split_issue("Missing title tag - Add a descriptive page title"),
            ("Missing title tag", Some("Add a descriptive page title"))
        );
        assert_eq!(split_issue("Just a finding"), ("Just a finding", None));
    }
}
