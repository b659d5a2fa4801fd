//! The SEO rule table
//!
//! Messages are `<finding> - <recommendation>`. Rules are independent of each
//! other except the nested CSR checks, which only run when high client-side
//! rendering was flagged.

use crate::classify::DependencyLevel;
use crate::collect::{compile_selector, count_matches};
use crate::seo::{Finding, SeoContext, SeoRule};
use crate::ProbeResult;

const TITLE_MIN_CHARS: usize = 10;
const TITLE_MAX_CHARS: usize = 60;
const DESCRIPTION_MIN_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 160;

/// CSR share above which client rendering is an SEO risk
const CSR_WARNING_SCORE: f64 = 0.6;
const SLOW_LOAD_MS: f64 = 3000.0;

const META_DESCRIPTION: &str = "meta[name=\"description\"]";

pub static RULES: &[SeoRule] = &[
    SeoRule {
        name: "high-csr",
        check: high_client_rendering,
        nested: &[
            SeoRule {
                name: "csr-meta-description",
                check: csr_missing_meta_description,
                nested: &[],
            },
            SeoRule {
                name: "csr-frameworks",
                check: csr_frameworks,
                nested: &[],
            },
        ],
    },
    SeoRule {
        name: "high-dependency",
        check: high_dependency,
        nested: &[],
    },
    SeoRule {
        name: "slow-load",
        check: slow_load,
        nested: &[],
    },
    SeoRule {
        name: "title",
        check: title,
        nested: &[],
    },
    SeoRule {
        name: "duplicate-title",
        check: duplicate_title,
        nested: &[],
    },
    SeoRule {
        name: "meta-description",
        check: meta_description,
        nested: &[],
    },
    SeoRule {
        name: "h1",
        check: h1,
        nested: &[],
    },
    SeoRule {
        name: "heading-hierarchy",
        check: heading_hierarchy,
        nested: &[],
    },
    SeoRule {
        name: "viewport",
        check: viewport,
        nested: &[],
    },
    SeoRule {
        name: "canonical",
        check: canonical,
        nested: &[],
    },
    SeoRule {
        name: "image-alt",
        check: image_alt,
        nested: &[],
    },
    SeoRule {
        name: "lang",
        check: lang,
        nested: &[],
    },
];

fn found(finding: impl Into<String>, recommendation: impl Into<String>) -> ProbeResult<Option<Finding>> {
    Ok(Some(Finding::new(finding, recommendation)))
}

fn exists(ctx: &SeoContext<'_>, selector: &str) -> ProbeResult<bool> {
    Ok(count_matches(ctx.document, selector)? > 0)
}

fn high_client_rendering(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if ctx.scores.csr > CSR_WARNING_SCORE {
        return found(
            "High client-side rendering may impact SEO",
            "Consider implementing SSR or pre-rendering for better search engine visibility",
        );
    }
    Ok(None)
}

fn csr_missing_meta_description(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if !exists(ctx, META_DESCRIPTION)? {
        return found(
            "Missing meta description",
            "Add a meta description tag that will be present in initial HTML",
        );
    }
    Ok(None)
}

fn csr_frameworks(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if ctx.frameworks.is_empty() {
        return Ok(None);
    }
    found(
        format!("Using {}", ctx.frameworks.join(", ")),
        "Consider using the SSR version (Next.js, Nuxt.js, etc.) for better SEO",
    )
}

fn high_dependency(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if ctx.dependency_level == DependencyLevel::High {
        return found(
            "High JavaScript dependency may affect crawling",
            "Consider reducing JavaScript reliance for core content",
        );
    }
    Ok(None)
}

fn slow_load(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if ctx.load_time > SLOW_LOAD_MS {
        return found(
            "Slow page load time may impact SEO",
            "Optimize JavaScript and resource loading for better performance",
        );
    }
    Ok(None)
}

fn title(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    let selector = compile_selector("title")?;
    let Some(element) = ctx.document.select(&selector).next() else {
        return found("Missing title tag", "Add a descriptive page title");
    };

    let text = element.text().collect::<String>();
    let length = text.split_whitespace().collect::<Vec<_>>().join(" ").chars().count();
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&length) {
        return found(
            "Title tag length issue",
            format!(
                "Use a title between {}-{} characters for optimal SEO",
                TITLE_MIN_CHARS, TITLE_MAX_CHARS
            ),
        );
    }
    Ok(None)
}

fn duplicate_title(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if count_matches(ctx.document, "title")? > 1 {
        return found("Multiple title tags", "Keep a single title tag per page");
    }
    Ok(None)
}

fn meta_description(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    let selector = compile_selector(META_DESCRIPTION)?;
    let Some(meta) = ctx.document.select(&selector).next() else {
        return found(
            "Missing meta description",
            "Add a meta description tag for better search results",
        );
    };

    let length = meta.value().attr("content").unwrap_or("").chars().count();
    if length > 0 && !(DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&length) {
        return found(
            "Meta description length issue",
            format!(
                "Use {}-{} characters for optimal visibility",
                DESCRIPTION_MIN_CHARS, DESCRIPTION_MAX_CHARS
            ),
        );
    }
    Ok(None)
}

fn h1(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    match count_matches(ctx.document, "h1")? {
        0 => found(
            "Missing H1 heading",
            "Add a primary heading for better content structure",
        ),
        1 => Ok(None),
        _ => found(
            "Multiple H1 headings",
            "Use only one H1 heading per page for clear hierarchy",
        ),
    }
}

fn heading_hierarchy(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if exists(ctx, "h2")? && !exists(ctx, "h1")? {
        return found(
            "Using H2 without H1",
            "Improve heading hierarchy by adding an H1 element",
        );
    }
    Ok(None)
}

fn viewport(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if !exists(ctx, "meta[name=\"viewport\"]")? {
        return found(
            "Missing viewport meta tag",
            "Add viewport settings for mobile-friendly display",
        );
    }
    Ok(None)
}

fn canonical(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if !exists(ctx, "link[rel=\"canonical\"]")? {
        return found(
            "Missing canonical tag",
            "Add a canonical link to prevent duplicate content issues",
        );
    }
    Ok(None)
}

fn image_alt(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    let missing = count_matches(ctx.document, "img:not([alt])")?;
    if missing > 0 {
        return found(
            format!("{} images missing alt text", missing),
            "Add descriptive alt text for accessibility and SEO",
        );
    }
    Ok(None)
}

fn lang(ctx: &SeoContext<'_>) -> ProbeResult<Option<Finding>> {
    if ctx.document.root_element().value().attr("lang").is_none() {
        return found(
            "Missing language attribute",
            "Add a lang attribute to the HTML tag",
        );
    }
    Ok(None)
}
